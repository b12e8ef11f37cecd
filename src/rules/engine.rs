//! Rules engine trait and game results.
//!
//! A rules engine answers three questions about an immutable `GameState`:
//! - What may a player do?
//! - What state does an action produce?
//! - Is the game over, and how did it end?

use serde::{Deserialize, Serialize};

use crate::core::{Action, EngineError, GameState, PlayerId, Rejection, RulesConfig};

/// How decisively a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    Normal,
    /// Loser finished below the skunk line.
    Skunk,
    /// Loser finished below the double-skunk line.
    DoubleSkunk,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub winner_score: u32,
    pub loser_score: u32,
    pub kind: WinKind,
}

impl GameResult {
    /// Classify a finished game from the final scores.
    #[must_use]
    pub fn new(winner: PlayerId, winner_score: u32, loser_score: u32, config: &RulesConfig) -> Self {
        let kind = if loser_score < config.double_skunk_line {
            WinKind::DoubleSkunk
        } else if loser_score < config.skunk_line {
            WinKind::Skunk
        } else {
            WinKind::Normal
        };

        Self {
            winner,
            loser: winner.opponent(),
            winner_score,
            loser_score,
            kind,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Outcome of a well-formed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The action took effect.
    Applied(GameState),
    /// The action broke a rule; the prior state stands.
    Rejected(Rejection),
}

impl Transition {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Transition::Rejected(r) => Some(r),
            Transition::Applied(_) => None,
        }
    }

    /// The new state, or `prior` unchanged on rejection.
    #[must_use]
    pub fn into_state(self, prior: &GameState) -> GameState {
        match self {
            Transition::Applied(state) => state,
            Transition::Rejected(_) => prior.clone(),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply` must be a pure function of `(state, action)`: all randomness
///   comes from the generator position stored in the state.
/// - `legal_actions` returns an empty vec when the player cannot act.
/// - `is_terminal` returns `None` while the game continues.
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Actions `player` may dispatch in `state`.
    ///
    /// Table actions (deal, cut, show, next hand) are listed for both seats.
    /// `NEW_GAME` is always accepted and never listed.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action.
    fn apply(&self, state: &GameState, action: &Action) -> Result<Transition, EngineError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply an action, treating a rejection as a no-op.
    fn reduce(&self, state: &GameState, action: &Action) -> Result<GameState, EngineError> {
        Ok(self.apply(state, action)?.into_state(state))
    }

    /// Apply a sequence of actions in order, stopping at the first fault.
    fn replay<'a>(
        &self,
        state: &GameState,
        actions: impl IntoIterator<Item = &'a Action>,
    ) -> Result<GameState, EngineError>
    where
        Self: Sized,
    {
        actions
            .into_iter()
            .try_fold(state.clone(), |acc, action| self.reduce(&acc, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_kinds() {
        let config = RulesConfig::default();

        let normal = GameResult::new(PlayerId::ZERO, 121, 100, &config);
        assert_eq!(normal.kind, WinKind::Normal);
        assert_eq!(normal.loser, PlayerId::ONE);
        assert!(normal.is_winner(PlayerId::ZERO));
        assert!(!normal.is_winner(PlayerId::ONE));

        assert_eq!(GameResult::new(PlayerId::ONE, 121, 91, &config).kind, WinKind::Normal);
        assert_eq!(GameResult::new(PlayerId::ONE, 121, 90, &config).kind, WinKind::Skunk);
        assert_eq!(GameResult::new(PlayerId::ONE, 121, 61, &config).kind, WinKind::Skunk);
        assert_eq!(
            GameResult::new(PlayerId::ONE, 121, 60, &config).kind,
            WinKind::DoubleSkunk
        );
    }

    #[test]
    fn test_transition_into_state() {
        let prior = GameState::new(3);
        let rejected = Transition::Rejected(Rejection::GameOver);
        assert!(!rejected.is_applied());
        assert_eq!(rejected.rejection(), Some(&Rejection::GameOver));
        assert_eq!(rejected.into_state(&prior), prior);

        let mut changed = prior.clone();
        changed.hand_number = 4;
        let applied = Transition::Applied(changed.clone());
        assert!(applied.is_applied());
        assert_eq!(applied.into_state(&prior), changed);
    }
}
