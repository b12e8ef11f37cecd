//! Reducer outcomes other than a clean transition.
//!
//! Two kinds:
//!
//! - [`Rejection`]: an in-protocol policy violation (out of turn, card not
//!   in hand, ...). The game is fine; the action simply does nothing.
//! - [`EngineError`]: a structural fault in the caller (unsupported player
//!   count, malformed remote deal, corrupt snapshot). Fails loudly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::CardId;

/// Why a well-formed action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
    #[error("{action} is not allowed during {phase:?}")]
    WrongPhase { action: String, phase: Phase },

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("expected {expected} cards to discard, got {got}")]
    WrongDiscardCount { expected: usize, got: usize },

    #[error("{player} has already discarded")]
    AlreadyDiscarded { player: PlayerId },

    #[error("{card} is not in the player's hand")]
    CardNotInHand { card: CardId },

    #[error("{card} would take the count from {count} past 31")]
    ExceedsThirtyOne { card: CardId, count: u32 },

    #[error("{player} cannot say go while holding a legal play")]
    HasLegalPlay { player: PlayerId },

    #[error("the game is over")]
    GameOver,
}

/// A defect in the calling layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported player count {0}; only 2 players are supported")]
    UnsupportedPlayerCount(usize),

    #[error("invalid player index {0}")]
    InvalidPlayer(usize),

    #[error("malformed online deal: {0}")]
    MalformedDeal(String),

    #[error("deck exhausted while {0}")]
    DeckExhausted(&'static str),

    #[error("inconsistent state: {0}")]
    InconsistentState(&'static str),

    #[error("state snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
