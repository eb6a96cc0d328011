pub mod text;
pub mod units;
