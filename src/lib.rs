//! # cribbage-engine
//!
//! A rules engine for two-handed cribbage with an expected-value discard
//! solver and a pegging opponent.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `(GameState, Action) -> GameState`. States are
//!    immutable values; every transition returns a new one, and the RNG
//!    position travels inside the state so replays are exact.
//!
//! 2. **Typed Outcomes**: illegal moves come back as a typed `Rejection`
//!    with the state unchanged; structurally broken input is an
//!    `EngineError`. Nothing panics.
//!
//! 3. **Configuration Over Convention**: win score, skunk lines, hand
//!    sizes and AI tuning live in `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: histories use `im::Vector` so each
//!   new state shares structure with the last.
//!
//! - **Read-Only Collaborators**: the solver, the AI players and the
//!   analysis layer only read states; none of them mutate the game.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, state, errors
//! - `cards`: ranks, suits, card ids, the deck
//! - `scoring`: show scoring and pegging-play scoring
//! - `rules`: the `RulesEngine` trait and the cribbage reducer
//! - `solver`: discard selection by expected value, pegging look-ahead
//! - `ai`: computer opponents
//! - `analysis`: post-game review of logged decisions

pub mod core;
pub mod cards;
pub mod scoring;
pub mod rules;
pub mod solver;
pub mod ai;
pub mod analysis;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    RulesConfig, SolverConfig, PeggingHeuristicConfig,
    Action, Phase, GameState, DecisionSnapshot, ScoreEvent, ScoreReason,
    EngineError, Rejection,
};

pub use crate::cards::{Card, CardId, Deck, Rank, Suit};

pub use crate::scoring::{score_hand, score_pegging_play, PeggingPlayScore, ScoreBreakdown};

pub use crate::rules::{Cribbage, GameResult, RulesEngine, Transition, WinKind};

pub use crate::solver::{optimal_discard, DiscardResult, DiscardSolver, PeggingLookahead};

pub use crate::ai::{CribbagePlayer, HeuristicPlayer, RandomPlayer};

pub use crate::analysis::{analyze_decision, analyze_game, Analyzer, Grade, Severity};
