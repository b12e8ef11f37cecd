//! Solvers: exact discard EV plus a crib estimate, and pegging look-ahead.
//!
//! ## Key Types
//!
//! - `DiscardSolver`: enumerates the 15 discards of a six-card hand
//! - `CribEstimator`: values the discarded pair (`SchellTable`, `Exhaustive`)
//! - `DiscardResult`: the choice plus every option for later comparison
//! - `PeggingLookahead`: seeded look-ahead value of each pegging play

pub mod crib;
pub mod discard;
pub mod pegging;

pub use crib::{CribEstimator, Exhaustive, SchellTable};
pub use discard::{
    expected_hand_value, optimal_discard, DiscardOption, DiscardResult, DiscardSolver,
    SolverError, DEALT_HAND_SIZE,
};
pub use pegging::{PeggingLookahead, PeggingPosition};
