//! Game rules.
//!
//! - `engine`: the `RulesEngine` trait, `Transition`, and `GameResult`
//! - `pegging`: the pegging state machine (turns, go, resets)
//! - `cribbage`: the phase reducer implementing `RulesEngine`
//!
//! Scoring arithmetic lives in `scoring`; this module decides when it
//! applies and to whom.

pub mod engine;
pub mod pegging;
pub mod cribbage;

pub use engine::{GameResult, RulesEngine, Transition, WinKind};
pub use pegging::{GoOutcome, PeggingState, PlayOutcome, LAST_CARD_POINTS};
pub use cribbage::Cribbage;
