//! Card model: identity, counting value, and the standard deck.
//!
//! ## Key Types
//!
//! - `Card`: rank + suit, immutable
//! - `CardId`: compact identity, serialized as `"10H"`, `"JD"`, ...
//! - `Deck`: ordered stack with seeded shuffling and alternate dealing

pub mod card;
pub mod deck;

pub use card::{parse_cards, Card, CardId, ParseCardError, Rank, Suit};
pub use deck::{unseen_cards, Deck, DECK_SIZE};
