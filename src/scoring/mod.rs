//! Pure scoring functions.
//!
//! - `hand`: the show, for a hand or the crib plus the starter
//! - `pegging`: points for the latest card in the pegging sequence

pub mod hand;
pub mod pegging;

pub use hand::{score_fifteens, score_hand, score_pairs, score_runs, ScoreBreakdown};
pub use pegging::{
    score_pegging_play, score_pegging_play_at, sequence_count, PeggingCombo, PeggingPlayScore,
    MAX_COUNT,
};
