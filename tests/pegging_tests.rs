//! Pegging state machine driven by arbitrary legal play.

mod common;

use common::cards;
use cribbage_engine::cards::{Card, Deck};
use cribbage_engine::core::{GameRng, PlayerId, PlayerMap};
use cribbage_engine::rules::PeggingState;
use cribbage_engine::scoring::{sequence_count, MAX_COUNT};
use proptest::prelude::*;

const HAND: usize = 4;

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(256)
        .max(1);
    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}

/// Eight cards off a seeded shuffle, four per seat.
fn seeded_deal(seed: u64) -> PlayerMap<Vec<Card>> {
    let deck = Deck::shuffled(&mut GameRng::new(seed));
    let dealt = deck.cards();
    PlayerMap::from_array([dealt[..HAND].to_vec(), dealt[HAND..2 * HAND].to_vec()])
}

fn held(state: &PeggingState) -> usize {
    state.player_cards.values().map(Vec::len).sum()
}

fn assert_reset(state: &PeggingState) {
    assert_eq!(state.count, 0);
    assert!(state.sequence.is_empty());
    assert_eq!(state.go, PlayerMap::with_value(false));
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn test_invariants_hold_under_any_legal_play(
        seed in any::<u64>(),
        leader in 0usize..2,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 16),
    ) {
        let leader = PlayerId::new(leader).unwrap();
        let mut state = PeggingState::new(seeded_deal(seed), leader);
        let mut played = 0usize;
        let mut finished = false;
        let mut picks = picks.into_iter().cycle();

        for _ in 0..32 {
            let player = state.current;
            let legal = state.legal_plays(player);

            if legal.is_empty() {
                let before = state.clone();
                let outcome = state.declare_go(player).unwrap();
                state = outcome.state;
                prop_assert_eq!(state.pile.len(), before.pile.len());
                if outcome.go_point.is_some() {
                    prop_assert_eq!(outcome.go_point, before.last_card_player);
                    assert_reset(&state);
                } else {
                    prop_assert!(state.go[player]);
                    prop_assert_eq!(state.current, player.opponent());
                }
            } else {
                let card = *picks.next().unwrap().get(&legal);
                let outcome = state.play(player, card.id()).unwrap();
                state = outcome.state;
                played += 1;

                prop_assert!(outcome.score.total <= 14);
                prop_assert!(!outcome.last_card || outcome.finished);
                if outcome.finished {
                    finished = true;
                    assert_reset(&state);
                } else if state.sequence.is_empty() {
                    // Only an exact 31 resets the count on a play.
                    prop_assert_eq!(outcome.score.thirty_one, 2);
                    assert_reset(&state);
                }
            }

            prop_assert!(state.count <= MAX_COUNT);
            prop_assert_eq!(state.count, sequence_count(&state.sequence));
            prop_assert_eq!(state.pile.len(), played);
            prop_assert_eq!(held(&state) + played, 2 * HAND);
            if finished {
                break;
            }
            // The turn never sits with a stuck seat while the other could move.
            prop_assert!(state.can_play(state.current) || !state.can_play(state.current.opponent()));
        }

        prop_assert!(finished);
        prop_assert!(state.is_exhausted());
        prop_assert_eq!(state.pile.len(), 2 * HAND);
    }
}

#[test]
fn test_thirty_one_when_opponent_is_out_keeps_the_lead() {
    let mut state = PeggingState::new(
        PlayerMap::from_array([cards("AH 2C"), Vec::new()]),
        PlayerId::ZERO,
    );
    state.count = 30;
    state.sequence = cards("10H 10S KD");
    state.last_card_player = Some(PlayerId::ONE);

    let outcome = state.play(PlayerId::ZERO, "AH".parse().unwrap()).unwrap();
    assert_eq!(outcome.score.thirty_one, 2);
    assert!(!outcome.finished);
    assert!(!outcome.last_card);
    assert_eq!(outcome.state.count, 0);
    assert!(outcome.state.sequence.is_empty());
    assert_eq!(outcome.state.current, PlayerId::ZERO);

    let outcome = outcome.state.play(PlayerId::ZERO, "2C".parse().unwrap()).unwrap();
    assert!(outcome.finished);
    assert!(outcome.last_card);
    assert_eq!(outcome.state.pile.len(), 2);
}
