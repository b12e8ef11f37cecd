//! Computer opponents.
//!
//! - [`CribbagePlayer`]: the decision trait
//! - [`HeuristicPlayer`]: solver discards and greedy pegging
//! - [`RandomPlayer`]: seedable uniform baseline

pub mod heuristic;
pub mod player;
pub mod random;

pub use heuristic::HeuristicPlayer;
pub use player::{AiError, CribbagePlayer};
pub use random::RandomPlayer;
