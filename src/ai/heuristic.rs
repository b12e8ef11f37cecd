//! Heuristic: the built-in opponent.
//!
//! Discarding:
//! - Delegate to the discard solver and take its choice as-is.
//!
//! Pegging:
//! - Rate every legal card by the points it makes right now.
//! - Add a bonus for reaching exactly 31.
//! - Subtract a penalty for leaving a danger count (5 and 21 by default),
//!   where a ten-card gives the opponent an easy fifteen or thirty-one.
//! - Ties go to the lowest card, or to a seeded pick when configured.
//! - No legal card means go.
//!
//! Determinism:
//! - The seeded tie-break derives its generator from the seed, the hand
//!   number, and the running count, so the same state always yields the
//!   same card.

use tracing::trace;

use super::player::{discard_turn, pegging_turn, AiError, CribbagePlayer};
use crate::cards::Card;
use crate::core::{GameRng, GameState, PeggingHeuristicConfig, PlayerId, RulesConfig, TieBreak};
use crate::rules::PeggingState;
use crate::scoring::{score_pegging_play_at, MAX_COUNT};
use crate::solver::DiscardSolver;

#[derive(Clone, Debug, Default)]
pub struct HeuristicPlayer {
    solver: DiscardSolver,
    pegging: PeggingHeuristicConfig,
}

impl HeuristicPlayer {
    pub const NAME: &'static str = "Heuristic";

    #[must_use]
    pub fn new(solver: DiscardSolver, pegging: PeggingHeuristicConfig) -> Self {
        Self { solver, pegging }
    }

    /// Player tuned by the rules configuration.
    #[must_use]
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(DiscardSolver::new(config.solver), config.pegging.clone())
    }

    /// Heuristic value of playing `card` now.
    #[must_use]
    pub fn rate_play(&self, pegging: &PeggingState, card: Card) -> f64 {
        self.rate_card(&pegging.sequence, pegging.count, card)
    }

    /// Heuristic value of adding `card` to `sequence` at `count`.
    #[must_use]
    fn rate_card(&self, sequence: &[Card], count: u32, card: Card) -> f64 {
        let count = count + u32::from(card.value());
        let mut sequence = sequence.to_vec();
        sequence.push(card);

        let mut rating = f64::from(score_pegging_play_at(&sequence, count).total);
        if count == MAX_COUNT {
            rating += self.pegging.thirty_one_bonus;
        }
        if self.pegging.danger_counts.contains(&count) {
            rating -= self.pegging.danger_penalty;
        }
        rating
    }

    /// Pick among equally rated cards.
    fn break_tie(&self, mut tied: Vec<Card>, hand_number: u32, count: u32) -> Option<Card> {
        tied.sort_by_key(|c| (c.value(), *c));
        match self.pegging.tie_break {
            TieBreak::Lowest => tied.first().copied(),
            TieBreak::Seeded(seed) => {
                let mixed = seed ^ (u64::from(hand_number) << 32) ^ u64::from(count);
                GameRng::new(mixed).choose(&tied).copied()
            }
        }
    }
}

impl CribbagePlayer for HeuristicPlayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn choose_discard(&self, state: &GameState, player: PlayerId) -> Result<Vec<Card>, AiError> {
        let hand = discard_turn(state, player)?;
        let result = self.solver.optimal_discard(hand, player == state.dealer)?;
        Ok(result.discard.to_vec())
    }

    fn choose_play(&self, state: &GameState, player: PlayerId) -> Result<Option<Card>, AiError> {
        let pegging = pegging_turn(state, player)?;
        let legal = pegging.legal_plays(player);
        if legal.is_empty() {
            return Ok(None);
        }

        let rated: Vec<(Card, f64)> = legal
            .into_iter()
            .map(|card| (card, self.rate_play(pegging, card)))
            .collect();
        let best = rated
            .iter()
            .map(|&(_, rating)| rating)
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<Card> = rated
            .iter()
            .filter(|&&(_, rating)| rating == best)
            .map(|&(card, _)| card)
            .collect();

        let choice = self.break_tie(tied, state.hand_number, pegging.count);
        trace!(%player, count = pegging.count, best, choice = ?choice, "pegging choice");
        Ok(choice)
    }
}
