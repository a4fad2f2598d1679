//! Scoring engine for played poker hands under joker and boss blind rules.
//! Keep this crate free of IO and platform concerns.

pub mod blind;
pub mod cards;
pub mod config;
pub mod context;
pub mod effects;
pub mod engine;
pub mod hand;
pub mod joker;
pub mod parse;
pub mod rules;
pub mod scoring;

pub use blind::*;
pub use cards::*;
pub use config::*;
pub use context::*;
pub use effects::*;
pub use engine::*;
pub use hand::*;
pub use joker::*;
pub use parse::*;
pub use rules::*;
pub use scoring::*;
