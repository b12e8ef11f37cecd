//! Game state: one immutable value per point in the game.
//!
//! ## Lifecycle
//!
//! A `GameState` is created once ([`GameState::new`]) and afterwards only
//! replaced: the reducer takes `&GameState` and returns a new value. Nothing
//! is mutated in place, so equality-based tests, replay, and undo are
//! straightforward.
//!
//! ## Histories
//!
//! Append-only histories use `im::Vector`, so cloning a state to build the
//! next one shares their storage instead of copying it.
//!
//! ## Randomness
//!
//! The state carries its generator position (`rng`). Shuffles draw from it
//! and store the advanced position in the next state, which keeps the
//! reducer a pure function of `(state, action)`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRngState;
use crate::cards::{Card, Deck};
use crate::rules::pegging::PeggingState;
use crate::scoring::{PeggingPlayScore, ScoreBreakdown};

/// Where the game is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Before the first `NEW_GAME`.
    #[default]
    GameStart,
    Dealing,
    DiscardToCrib,
    CutStarter,
    Pegging,
    ShowNondealer,
    ShowDealer,
    ShowCrib,
    HandComplete,
    /// Terminal.
    GameOver,
}

/// One seat's cards and pegs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cards held. Six after the deal, four after discarding. Pegging
    /// plays from a separate copy, so this is intact for the show.
    pub hand: Vec<Card>,
    pub score: u32,
    /// Leading peg; always equals `score`.
    pub peg_front: u32,
    /// Trailing peg; the score before the most recent award.
    pub peg_back: u32,
}

/// Points one player earned in the current hand, by source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandStats {
    pub pegging: u32,
    pub hand: u32,
    pub crib: u32,
}

impl HandStats {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.pegging + self.hand + self.crib
    }
}

/// Archived hand stats, written when a hand ends.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandStatsSnapshot {
    pub hand_number: u32,
    pub dealer: PlayerId,
    pub stats: PlayerMap<HandStats>,
    pub starter: Option<Card>,
}

/// Audit record of a player decision.
///
/// Appended by the reducer and read only by analysis collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionSnapshot {
    Discard {
        player: PlayerId,
        hand_number: u32,
        is_dealer: bool,
        /// The full dealt hand before discarding.
        hand: Vec<Card>,
        choice: Vec<Card>,
    },
    PeggingPlay {
        player: PlayerId,
        hand_number: u32,
        is_dealer: bool,
        /// Cards still in the pegging hand before the play.
        hand: Vec<Card>,
        choice: Card,
        /// Current sequence before the play.
        sequence: Vec<Card>,
        count: u32,
        /// Cards the opponent still held for play.
        opponent_cards: usize,
    },
}

impl DecisionSnapshot {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            DecisionSnapshot::Discard { player, .. }
            | DecisionSnapshot::PeggingPlay { player, .. } => *player,
        }
    }

    #[must_use]
    pub fn hand_number(&self) -> u32 {
        match self {
            DecisionSnapshot::Discard { hand_number, .. }
            | DecisionSnapshot::PeggingPlay { hand_number, .. } => *hand_number,
        }
    }
}

/// Why points were awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreReason {
    /// Starter turned up a jack.
    HisHeels,
    Pegging(PeggingPlayScore),
    /// Go or last card of the hand.
    LastCard,
    Hand(ScoreBreakdown),
    Crib(ScoreBreakdown),
}

/// One award of points, for narration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub player: PlayerId,
    pub points: u32,
    pub reason: ScoreReason,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,

    /// Undealt cards; the starter is cut from the top.
    pub deck: Deck,

    pub players: PlayerMap<PlayerState>,

    pub crib: Vec<Card>,

    pub starter: Option<Card>,

    pub dealer: PlayerId,

    /// 1-based; 0 before the first `NEW_GAME`.
    pub hand_number: u32,

    /// Present from the cut until the show begins.
    pub pegging: Option<PeggingState>,

    pub hand_stats: PlayerMap<HandStats>,

    pub hand_stats_history: Vector<HandStatsSnapshot>,

    /// Set the instant a score reaches the win score.
    pub winner: Option<PlayerId>,

    pub decision_log: Vector<DecisionSnapshot>,

    /// Score events for the current hand.
    pub hand_events: Vector<ScoreEvent>,

    pub rng: GameRngState,
}

impl GameState {
    /// A blank table waiting for `NEW_GAME`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRngState::seeded(seed))
    }

    pub(crate) fn with_rng(rng: GameRngState) -> Self {
        Self {
            phase: Phase::GameStart,
            deck: Deck::default(),
            players: PlayerMap::default(),
            crib: Vec::new(),
            starter: None,
            dealer: PlayerId::ZERO,
            hand_number: 0,
            pegging: None,
            hand_stats: PlayerMap::default(),
            hand_stats_history: Vector::new(),
            winner: None,
            decision_log: Vector::new(),
            hand_events: Vector::new(),
            rng,
        }
    }

    /// The non-dealer.
    #[must_use]
    pub fn pone(&self) -> PlayerId {
        self.dealer.opponent()
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.players[player].score
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.players[player].hand
    }

    /// Seat whose move it is, when exactly one seat may act.
    #[must_use]
    pub fn to_act(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Pegging => self.pegging.as_ref().map(|p| p.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Serialize for hand-off or replay checkpoints.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
