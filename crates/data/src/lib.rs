//! Data loading and validation for scoring tables and saved rounds.

pub mod load;

pub use load::*;
