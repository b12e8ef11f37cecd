//! Reducer input: the closed set of actions a caller may dispatch.
//!
//! Actions are plain data. They serialize as internally tagged JSON
//! objects so the orchestration layer can forward them over the wire:
//!
//! ```
//! use cribbage_engine::core::{Action, PlayerId};
//!
//! let play = Action::play(PlayerId::ONE, "5H".parse().unwrap());
//! let json = serde_json::to_string(&play).unwrap();
//! assert_eq!(json, r#"{"type":"PLAY_CARD","player":1,"card":"5H"}"#);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{PlayerId, PlayerMap};
use crate::cards::CardId;

/// Everything the reducer understands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the current game with a fresh one. Accepted in any phase.
    NewGame { player_count: usize },

    /// Shuffle and deal a new hand.
    Deal,

    /// Lay cards away to the crib.
    Discard {
        player: PlayerId,
        cards: SmallVec<[CardId; 2]>,
    },

    /// Turn up the starter.
    Cut,

    /// Play one card onto the pegging count.
    PlayCard { player: PlayerId, card: CardId },

    /// Declare that no card in hand fits under 31.
    DeclareGo { player: PlayerId },

    /// Score the next show step (pone, dealer, crib).
    AdvanceShow,

    /// Rotate the deal and start the next hand.
    NextHand,

    /// Install hands dealt elsewhere, bypassing the local shuffle.
    ///
    /// `dealer` is a raw seat index so that a bad value from a remote
    /// peer surfaces as a structural error instead of a decode failure.
    LoadOnlineDeal {
        hands: PlayerMap<Vec<CardId>>,
        starter: CardId,
        dealer: usize,
        hand_number: u32,
    },
}

impl Action {
    /// Discard the given cards for `player`.
    #[must_use]
    pub fn discard(player: PlayerId, cards: &[CardId]) -> Self {
        Action::Discard {
            player,
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn play(player: PlayerId, card: CardId) -> Self {
        Action::PlayCard { player, card }
    }

    #[must_use]
    pub fn go(player: PlayerId) -> Self {
        Action::DeclareGo { player }
    }

    /// The seat acting, for actions tied to one player.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        match self {
            Action::Discard { player, .. }
            | Action::PlayCard { player, .. }
            | Action::DeclareGo { player } => Some(*player),
            _ => None,
        }
    }

    /// Stable name used in logs and rejections.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::NewGame { .. } => "NEW_GAME",
            Action::Deal => "DEAL",
            Action::Discard { .. } => "DISCARD",
            Action::Cut => "CUT",
            Action::PlayCard { .. } => "PLAY_CARD",
            Action::DeclareGo { .. } => "DECLARE_GO",
            Action::AdvanceShow => "ADVANCE_SHOW",
            Action::NextHand => "NEXT_HAND",
            Action::LoadOnlineDeal { .. } => "LOAD_ONLINE_DEAL",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Discard { player, cards } => {
                write!(f, "DISCARD({player}:")?;
                for card in cards {
                    write!(f, " {card}")?;
                }
                write!(f, ")")
            }
            Action::PlayCard { player, card } => write!(f, "PLAY_CARD({player}: {card})"),
            Action::DeclareGo { player } => write!(f, "DECLARE_GO({player})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CardId {
        s.parse().unwrap()
    }

    #[test]
    fn test_constructors_and_actor() {
        let discard = Action::discard(PlayerId::ZERO, &[id("5H"), id("JD")]);
        assert_eq!(discard.actor(), Some(PlayerId::ZERO));
        assert_eq!(discard.name(), "DISCARD");
        assert_eq!(discard.to_string(), "DISCARD(Player 0: 5H JD)");

        assert_eq!(Action::go(PlayerId::ONE).actor(), Some(PlayerId::ONE));
        assert_eq!(Action::Cut.actor(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Action::NewGame { player_count: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"NEW_GAME","player_count":2}"#);

        let back: Action =
            serde_json::from_str(r#"{"type":"DISCARD","player":0,"cards":["10H","QS"]}"#).unwrap();
        assert_eq!(back, Action::discard(PlayerId::ZERO, &[id("10H"), id("QS")]));
    }

    #[test]
    fn test_unknown_type_fails_to_decode() {
        assert!(serde_json::from_str::<Action>(r#"{"type":"SHUFFLE"}"#).is_err());
        assert!(serde_json::from_str::<Action>(r#"{"type":"DECLARE_GO","player":3}"#).is_err());
    }
}
