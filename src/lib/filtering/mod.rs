pub mod heading;
pub mod sma;
