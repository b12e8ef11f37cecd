//! AI player trait.

use thiserror::Error;
use tracing::debug;

use crate::cards::Card;
use crate::core::{Action, GameState, Phase, PlayerId};
use crate::rules::PeggingState;
use crate::solver::{SolverError, DEALT_HAND_SIZE};

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error)]
pub enum AiError {
    /// Asked for a decision the state does not call for.
    #[error("{player} has no {decision} to make during {phase:?}")]
    NothingToDecide {
        player: PlayerId,
        decision: &'static str,
        phase: Phase,
    },

    #[error("discard solver failed: {0}")]
    Solver(#[from] SolverError),
}

/// Trait for cribbage AI players.
///
/// Implementations read the full `GameState` but must only use what the
/// acting seat could see: its own hand, the pegging history, and the
/// starter. Decisions are synchronous and deterministic for a given state.
pub trait CribbagePlayer {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Choose the cards to lay away from the dealt hand.
    fn choose_discard(&self, state: &GameState, player: PlayerId) -> Result<Vec<Card>, AiError>;

    /// Choose a pegging card; `None` means go.
    fn choose_play(&self, state: &GameState, player: PlayerId) -> Result<Option<Card>, AiError>;

    /// The action this player would dispatch now, if it has one.
    fn suggest_action(&self, state: &GameState, player: PlayerId) -> Option<Action> {
        let decision = match state.phase {
            Phase::DiscardToCrib if state.hand(player).len() == DEALT_HAND_SIZE => self
                .choose_discard(state, player)
                .map(|cards| {
                    let ids: Vec<_> = cards.iter().map(|c| c.id()).collect();
                    Action::discard(player, &ids)
                }),
            Phase::Pegging if state.to_act() == Some(player) => {
                self.choose_play(state, player).map(|choice| match choice {
                    Some(card) => Action::play(player, card.id()),
                    None => Action::go(player),
                })
            }
            _ => return None,
        };

        match decision {
            Ok(action) => Some(action),
            Err(err) => {
                debug!(ai = self.name(), %player, error = %err, "no suggestion");
                None
            }
        }
    }
}

/// Pegging state when `player` is the one to act.
pub(crate) fn pegging_turn(state: &GameState, player: PlayerId) -> Result<&PeggingState, AiError> {
    state
        .pegging
        .as_ref()
        .filter(|p| state.phase == Phase::Pegging && p.current == player)
        .ok_or(AiError::NothingToDecide {
            player,
            decision: "play",
            phase: state.phase,
        })
}

/// Dealt hand when `player` still has to discard.
pub(crate) fn discard_turn(state: &GameState, player: PlayerId) -> Result<&[Card], AiError> {
    let hand = state.hand(player);
    if state.phase == Phase::DiscardToCrib && hand.len() == DEALT_HAND_SIZE {
        Ok(hand)
    } else {
        Err(AiError::NothingToDecide {
            player,
            decision: "discard",
            phase: state.phase,
        })
    }
}
