pub use pipeline_auction_api_types::{
    session::UserRole,
    Credits,
    ModuleId,
    RoundNumber,
    TeamName,
    Username,
};

pub type SessionToken = String;
