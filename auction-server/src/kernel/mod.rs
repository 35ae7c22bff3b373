pub mod entities;
pub mod workers;
