//! The pegging state machine.
//!
//! Tracks the running count, whose turn it is, and which cards each player
//! still holds for play. Transitions return a new `PeggingState` together
//! with the points earned; applying those points to the score board is the
//! reducer's job.
//!
//! ## Turn order
//!
//! After a play the opponent moves if they have a card that fits under 31;
//! otherwise the same player keeps playing. A player with no fitting card
//! must declare go. If the opponent cannot play either, the sequence ends:
//! the player of the last card takes one point, the count resets to 0, and
//! the other player leads. Reaching exactly 31 ends the sequence at once
//! and earns no extra go point.
//!
//! When both players have played every card, the last card earns one point
//! (unless it made 31) and pegging is finished.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{PlayerId, PlayerMap, Rejection};
use crate::scoring::{score_pegging_play_at, PeggingPlayScore, MAX_COUNT};

/// Point for the last card before a go or at the end of play.
pub const LAST_CARD_POINTS: u32 = 1;

/// Pegging progress within one hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeggingState {
    /// Running total of `sequence`, 0..=31.
    pub count: u32,
    /// Every card played this hand, across resets.
    pub pile: Vector<Card>,
    /// Cards played since the last reset to 0.
    pub sequence: Vec<Card>,
    pub current: PlayerId,
    /// Seats that have declared go in the current sequence.
    pub go: PlayerMap<bool>,
    /// Cards each seat has not yet played.
    pub player_cards: PlayerMap<Vec<Card>>,
    pub last_card_player: Option<PlayerId>,
}

/// Result of a legal `play`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub state: PeggingState,
    /// Points made by the card itself.
    pub score: PeggingPlayScore,
    /// Last-card point earned by this play (end of pegging, not on 31).
    pub last_card: bool,
    /// Both players are out of cards.
    pub finished: bool,
}

/// Result of a legal `declare_go`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoOutcome {
    pub state: PeggingState,
    /// Seat awarded the go point when the sequence closed.
    pub go_point: Option<PlayerId>,
}

impl PeggingState {
    /// Fresh pegging with `leader` to play first.
    #[must_use]
    pub fn new(player_cards: PlayerMap<Vec<Card>>, leader: PlayerId) -> Self {
        Self {
            count: 0,
            pile: Vector::new(),
            sequence: Vec::new(),
            current: leader,
            go: PlayerMap::with_value(false),
            player_cards,
            last_card_player: None,
        }
    }

    /// Cards `player` may play at the current count.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<Card> {
        self.player_cards[player]
            .iter()
            .copied()
            .filter(|c| self.fits(*c))
            .collect()
    }

    #[must_use]
    pub fn can_play(&self, player: PlayerId) -> bool {
        self.player_cards[player].iter().any(|c| self.fits(*c))
    }

    /// Both seats have played every card.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.player_cards.values().all(Vec::is_empty)
    }

    fn fits(&self, card: Card) -> bool {
        self.count + u32::from(card.value()) <= MAX_COUNT
    }

    /// Play `card` for `player`.
    pub fn play(&self, player: PlayerId, card: CardId) -> Result<PlayOutcome, Rejection> {
        if player != self.current {
            return Err(Rejection::NotYourTurn { player });
        }
        let hand = &self.player_cards[player];
        let Some(pos) = hand.iter().position(|c| c.id() == card) else {
            return Err(Rejection::CardNotInHand { card });
        };
        let played = hand[pos];
        if !self.fits(played) {
            return Err(Rejection::ExceedsThirtyOne {
                card,
                count: self.count,
            });
        }

        let mut next = self.clone();
        next.player_cards[player].remove(pos);
        next.sequence.push(played);
        next.pile.push_back(played);
        next.count += u32::from(played.value());
        next.last_card_player = Some(player);

        let score = score_pegging_play_at(&next.sequence, next.count);

        if next.is_exhausted() {
            let last_card = next.count != MAX_COUNT;
            next.reset_sequence();
            return Ok(PlayOutcome {
                state: next,
                score,
                last_card,
                finished: true,
            });
        }

        if next.count == MAX_COUNT {
            next.reset_sequence();
            next.current = next.leader_after(player);
        } else if next.can_play(player.opponent()) {
            next.current = player.opponent();
        } else {
            next.current = player;
        }

        Ok(PlayOutcome {
            state: next,
            score,
            last_card: false,
            finished: false,
        })
    }

    /// Declare go for `player`.
    pub fn declare_go(&self, player: PlayerId) -> Result<GoOutcome, Rejection> {
        if player != self.current {
            return Err(Rejection::NotYourTurn { player });
        }
        if self.can_play(player) {
            return Err(Rejection::HasLegalPlay { player });
        }

        let mut next = self.clone();
        next.go[player] = true;

        if next.can_play(player.opponent()) {
            next.current = player.opponent();
            return Ok(GoOutcome {
                state: next,
                go_point: None,
            });
        }

        // Neither seat can play: close the sequence.
        let go_point = next.last_card_player;
        next.reset_sequence();
        next.current = match go_point {
            Some(last) => next.leader_after(last),
            None => next.leader_after(player.opponent()),
        };

        Ok(GoOutcome {
            state: next,
            go_point,
        })
    }

    fn reset_sequence(&mut self) {
        self.count = 0;
        self.sequence.clear();
        self.go = PlayerMap::with_value(false);
    }

    /// Who leads after `last` closed a sequence: the opponent, unless they
    /// are out of cards.
    fn leader_after(&self, last: PlayerId) -> PlayerId {
        if self.player_cards[last.opponent()].is_empty() {
            last
        } else {
            last.opponent()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    const P0: PlayerId = PlayerId::ZERO;
    const P1: PlayerId = PlayerId::ONE;

    fn state(p0: &str, p1: &str, leader: PlayerId) -> PeggingState {
        PeggingState::new(
            PlayerMap::from_array([parse_cards(p0).unwrap(), parse_cards(p1).unwrap()]),
            leader,
        )
    }

    fn id(s: &str) -> CardId {
        s.parse().unwrap()
    }

    #[test]
    fn test_play_alternates_and_scores() {
        let s = state("7H 2C", "8S 3D", P1);
        let out = s.play(P1, id("8S")).unwrap();
        assert_eq!(out.score.total, 0);
        assert_eq!(out.state.current, P0);

        let out = out.state.play(P0, id("7H")).unwrap();
        assert_eq!(out.score.fifteen, 2);
        assert_eq!(out.state.count, 15);
        assert_eq!(out.state.current, P1);
        assert_eq!(out.state.pile.len(), 2);
    }

    #[test]
    fn test_rejections() {
        let s = state("KH QH", "KS 5D", P1);
        assert_eq!(
            s.play(P0, id("KH")).unwrap_err(),
            Rejection::NotYourTurn { player: P0 }
        );
        assert_eq!(
            s.play(P1, id("KH")).unwrap_err(),
            Rejection::CardNotInHand { card: id("KH") }
        );
        assert_eq!(
            s.declare_go(P1).unwrap_err(),
            Rejection::HasLegalPlay { player: P1 }
        );

        let s = PeggingState { count: 25, ..s };
        assert_eq!(
            s.play(P1, id("KS")).unwrap_err(),
            Rejection::ExceedsThirtyOne {
                card: id("KS"),
                count: 25
            }
        );
    }

    #[test]
    fn test_opponent_stuck_same_player_continues() {
        // P0's queen would make 32.
        let mut s = state("QH", "KS 3D 9C", P1);
        s.count = 12;
        s.sequence = parse_cards("2H 10S").unwrap();
        let out = s.play(P1, id("KS")).unwrap();
        assert_eq!(out.state.count, 22);
        assert_eq!(out.state.current, P1);
    }

    #[test]
    fn test_go_closes_sequence_with_point_to_last_card() {
        let mut s = state("QH 4C", "3D 5S", P0);
        s.count = 25;
        s.sequence = parse_cards("10H 10S 5C").unwrap();
        s.last_card_player = Some(P1);

        let out = s.play(P0, id("4C")).unwrap();
        assert_eq!(out.state.count, 29);
        // Nobody fits under 31 now; P0 keeps the turn and must say go.
        assert_eq!(out.state.current, P0);

        let go = out.state.declare_go(P0).unwrap();
        assert_eq!(go.go_point, Some(P0));
        assert_eq!(go.state.count, 0);
        assert!(go.state.sequence.is_empty());
        assert_eq!(go.state.current, P1);
        assert_eq!(go.state.go, PlayerMap::with_value(false));
    }

    #[test]
    fn test_go_hands_turn_to_opponent_who_can_play() {
        let mut s = state("KH", "AD 9C", P0);
        s.count = 28;
        s.sequence = parse_cards("10H 9S 9D").unwrap();
        s.last_card_player = Some(P1);

        let go = s.declare_go(P0).unwrap();
        assert_eq!(go.go_point, None);
        assert_eq!(go.state.current, P1);
        assert!(go.state.go[P0]);

        let out = go.state.play(P1, id("AD")).unwrap();
        assert_eq!(out.state.count, 29);
        assert_eq!(out.state.current, P1);

        let go = out.state.declare_go(P1).unwrap();
        assert_eq!(go.go_point, Some(P1));
        assert_eq!(go.state.current, P0);
    }

    #[test]
    fn test_thirty_one_resets_without_go_point() {
        let mut s = state("AH 2C", "KS 3D", P0);
        s.count = 30;
        s.sequence = parse_cards("10H 10S KD").unwrap();
        let out = s.play(P0, id("AH")).unwrap();
        assert_eq!(out.score.thirty_one, 2);
        assert!(!out.last_card);
        assert_eq!(out.state.count, 0);
        assert!(out.state.sequence.is_empty());
        assert_eq!(out.state.current, P1);
    }

    #[test]
    fn test_last_card_of_hand() {
        let s = state("4H", "", P0);
        let out = s.play(P0, id("4H")).unwrap();
        assert!(out.finished);
        assert!(out.last_card);
        assert!(out.state.is_exhausted());
    }

    #[test]
    fn test_last_card_on_thirty_one_earns_no_extra() {
        let mut s = state("AH", "", P0);
        s.count = 30;
        s.sequence = parse_cards("10H 10S KD").unwrap();
        let out = s.play(P0, id("AH")).unwrap();
        assert!(out.finished);
        assert!(!out.last_card);
        assert_eq!(out.score.total, 2);
    }

    #[test]
    fn test_lead_after_go_goes_to_seat_with_cards() {
        let mut s = state("KH 5C", "", P0);
        s.count = 27;
        s.sequence = parse_cards("10H 10S 7D").unwrap();
        s.last_card_player = Some(P1);
        let go = s.declare_go(P0).unwrap();
        assert_eq!(go.go_point, Some(P1));
        assert_eq!(go.state.current, P0);
        assert_eq!(go.state.legal_plays(P0).len(), 2);
    }
}
