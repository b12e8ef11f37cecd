//! Card identity: rank, suit, and the compact `CardId` used as the only
//! equality key throughout the engine.
//!
//! The externally visible encoding of a card is `rank + suit letter`
//! (`"10H"`, `"JD"`, `"AS"`). `CardId` serializes as that string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card rank, Ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Sequence position used for runs: Ace = 1 .. King = 13.
    #[must_use]
    pub const fn order(self) -> u8 {
        self as u8 + 1
    }

    /// Counting value: Ace = 1, face cards = 10, otherwise pip value.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            other => other as u8 + 1,
        }
    }

    /// Rank symbol as used in card ids.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.symbol() == symbol)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    /// Single-letter code used in card ids.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
        }
    }

    fn from_letter(letter: char) -> Option<Suit> {
        Suit::ALL.iter().copied().find(|s| s.letter() == letter)
    }
}

/// Failure to parse a card id string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card id {0:?}")]
pub struct ParseCardError(pub String);

/// Compact card identity, one of 52 values.
///
/// Ordering follows rank first, then suit, which is the canonical order
/// used wherever the engine needs a deterministic sort.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CardId(u8);

impl CardId {
    /// Build the id for a rank and suit.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self(rank as u8 * 4 + suit as u8)
    }

    /// Raw index in `0..52`.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Rebuild from a raw index. Returns `None` outside `0..52`.
    #[must_use]
    pub fn from_raw(raw: u8) -> Option<Self> {
        (raw < 52).then_some(Self(raw))
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 4) as usize]
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::ALL[(self.0 % 4) as usize]
    }

    /// The card this id names.
    #[must_use]
    pub const fn card(self) -> Card {
        Card {
            rank: self.rank(),
            suit: self.suit(),
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().letter())
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({self})")
    }
}

impl FromStr for CardId {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next_back().ok_or_else(|| ParseCardError(s.to_string()))?;
        let suit = Suit::from_letter(letter).ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(CardId::new(rank, suit))
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CardId {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An immutable playing card.
///
/// Serialized through its id, so `Card` and `CardId` share one wire form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "CardId", from = "CardId")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub const fn id(self) -> CardId {
        CardId::new(self.rank, self.suit)
    }

    /// Counting value (see [`Rank::value`]).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Human label such as `"10 of Hearts"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} of {}", self.rank.symbol(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl From<CardId> for Card {
    fn from(id: CardId) -> Self {
        id.card()
    }
}

impl From<Card> for CardId {
    fn from(card: Card) -> Self {
        card.id()
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<CardId>().map(CardId::card)
    }
}

/// Parse a whitespace separated list of card ids, e.g. `"5H 5S JD"`.
///
/// Convenience for tests and fixtures.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Five.value(), 5);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::King.value(), 10);
        assert_eq!(Rank::Ace.order(), 1);
        assert_eq!(Rank::King.order(), 13);
    }

    #[test]
    fn test_card_id_round_trip_all_52() {
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let id = CardId::new(rank, suit);
                assert_eq!(id.rank(), rank);
                assert_eq!(id.suit(), suit);
                let parsed: CardId = id.to_string().parse().unwrap();
                assert_eq!(parsed, id);
            }
        }
    }

    #[test]
    fn test_card_id_encoding() {
        assert_eq!(CardId::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
        assert_eq!(CardId::new(Rank::Jack, Suit::Diamonds).to_string(), "JD");
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).label(), "A of Spades");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<CardId>().is_err());
        assert!("1H".parse::<CardId>().is_err());
        assert!("10X".parse::<CardId>().is_err());
        assert!("JDD".parse::<CardId>().is_err());
    }

    #[test]
    fn test_card_id_serializes_as_string() {
        let id: CardId = "QC".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"QC\"");
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<CardId>("\"ZZ\"").is_err());
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards("5H 10S JD").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::new(Rank::Ten, Suit::Spades));
    }
}
