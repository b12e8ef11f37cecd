//! Post-hoc review of logged decisions.
//!
//! Reads a game's `decision_log` and never touches engine state. Discards
//! are re-solved with the discard solver. Pegging plays are re-valued by
//! the seeded look-ahead, which guesses the opponent's hidden cards and
//! plays a few cards ahead. The difference between the best option and the
//! recorded choice is the decision's EV loss.
//!
//! ## Severity
//!
//! | loss      | severity    |
//! |-----------|-------------|
//! | < 0.1     | excellent   |
//! | < 0.5     | minor       |
//! | < 1.5     | significant |
//! | < 3.0     | major       |
//! | otherwise | critical    |
//!
//! ## Grade
//!
//! Average loss per decision: below 0.1 is A+, then A, B, C and D at 0.3,
//! 0.7, 1.5 and 2.5; anything higher is F.

pub mod decision;
pub mod game;

pub use decision::{
    analyze_decision, AnalysisError, Analyzer, DecisionAnalysis, Recommendation, Severity,
};
pub use game::{analyze_game, GameAnalysis, Grade, HandSummary, PlayerReport};
