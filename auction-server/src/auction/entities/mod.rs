mod bid;
mod round;

pub use {
    bid::*,
    round::*,
};
