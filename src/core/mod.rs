//! Core engine types: players, RNG, configuration, actions, state, errors.
//!
//! Everything the reducer reads or returns is defined here; the rules
//! themselves live in `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{
    ConfigError, CribEstimatorKind, LookaheadConfig, PeggingHeuristicConfig, RulesConfig,
    SolverConfig, TieBreak, SHOW_HAND_SIZE,
};
pub use action::Action;
pub use state::{
    DecisionSnapshot, GameState, HandStats, HandStatsSnapshot, Phase, PlayerState, ScoreEvent,
    ScoreReason,
};
pub use error::{EngineError, Rejection};
