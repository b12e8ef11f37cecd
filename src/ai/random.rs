//! Random AI player: uniform choices among legal moves.
//!
//! Used as a baseline opponent and for driving fuzz-style game tests.
//! The generator is rebuilt from the seed and the visible state on every
//! call, so the player holds no mutable state and repeats itself exactly
//! when asked about the same position twice.

use super::player::{discard_turn, pegging_turn, AiError, CribbagePlayer};
use crate::cards::Card;
use crate::core::{GameRng, GameState, PlayerId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomPlayer {
    seed: u64,
}

impl RandomPlayer {
    pub const NAME: &'static str = "Random";

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng_for(&self, state: &GameState, player: PlayerId) -> GameRng {
        let (count, pile, remaining) = match state.pegging.as_ref() {
            Some(p) => (p.count, p.pile.len(), p.player_cards[player].len()),
            None => (0, 0, state.hand(player).len()),
        };
        let mixed = self.seed
            ^ (u64::from(state.hand_number) << 40)
            ^ ((pile as u64) << 24)
            ^ (u64::from(count) << 8)
            ^ ((remaining as u64) << 2)
            ^ player.index() as u64;
        GameRng::new(mixed)
    }
}

impl CribbagePlayer for RandomPlayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn choose_discard(&self, state: &GameState, player: PlayerId) -> Result<Vec<Card>, AiError> {
        let hand = discard_turn(state, player)?;
        let mut shuffled = hand.to_vec();
        self.rng_for(state, player).shuffle(&mut shuffled);
        shuffled.truncate(2);
        Ok(shuffled)
    }

    fn choose_play(&self, state: &GameState, player: PlayerId) -> Result<Option<Card>, AiError> {
        let pegging = pegging_turn(state, player)?;
        let legal = pegging.legal_plays(player);
        Ok(self.rng_for(state, player).choose(&legal).copied())
    }
}
