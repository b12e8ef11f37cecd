//! Deck construction, shuffling, and dealing.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::{GameRng, PlayerId, PlayerMap};

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered stack of cards; index 0 is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-major order.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// A standard deck shuffled with `rng`.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Wrap an explicit stack (top first).
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The top card and the rest of the deck.
    #[must_use]
    pub fn draw(&self) -> Option<(Card, Deck)> {
        let (&top, rest) = self.cards.split_first()?;
        Some((top, Deck::from_cards(rest.to_vec())))
    }

    /// Deal `per_player` cards alternately, starting with `first`.
    ///
    /// Returns `None` when the deck is too short.
    #[must_use]
    pub fn deal(&self, per_player: usize, first: PlayerId) -> Option<(PlayerMap<Vec<Card>>, Deck)> {
        let total = per_player * 2;
        if self.cards.len() < total {
            return None;
        }

        let mut hands: PlayerMap<Vec<Card>> = PlayerMap::default();
        let mut seat = first;
        for &card in &self.cards[..total] {
            hands[seat].push(card);
            seat = seat.opponent();
        }

        Some((hands, Deck::from_cards(self.cards[total..].to_vec())))
    }
}

/// Every card not in `exclude`, in standard order.
pub fn unseen_cards(exclude: &[Card]) -> Vec<Card> {
    Deck::standard()
        .cards
        .into_iter()
        .filter(|c| !exclude.contains(c))
        .collect()
}
