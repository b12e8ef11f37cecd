//! Look-ahead evaluation of pegging plays.
//!
//! The opponent's cards are hidden, so a candidate card is valued as an
//! average over sampled guesses at them. Within one guess both sides play
//! greedily, starting with the candidate, for `depth` cards. The value of
//! a guess is net points: ours minus theirs, go and last-card points
//! included. Landing on a danger count costs a flat penalty on top.
//!
//! Every candidate is played out against the same guesses, and the guesses
//! come from a fixed seed, so equal positions always get equal values.

use std::cmp::Reverse;

use tracing::trace;

use crate::cards::{unseen_cards, Card};
use crate::core::{GameRng, LookaheadConfig};
use crate::rules::LAST_CARD_POINTS;
use crate::scoring::{score_pegging_play_at, MAX_COUNT};

const ME: usize = 0;
const THEM: usize = 1;

/// What the player to move can see.
#[derive(Clone, Copy, Debug)]
pub struct PeggingPosition<'a> {
    /// Cards the mover still holds, the candidate included.
    pub hand: &'a [Card],
    /// Cards played since the last reset.
    pub sequence: &'a [Card],
    pub count: u32,
    /// How many cards the opponent still holds.
    pub opponent_cards: usize,
}

/// Seeded look-ahead evaluator.
#[derive(Clone, Debug, Default)]
pub struct PeggingLookahead {
    config: LookaheadConfig,
}

impl PeggingLookahead {
    #[must_use]
    pub fn new(config: LookaheadConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LookaheadConfig {
        &self.config
    }

    /// Expected net points of playing `candidate`.
    ///
    /// `None` when the card is not in hand or would pass 31.
    #[must_use]
    pub fn evaluate(&self, position: &PeggingPosition<'_>, candidate: Card) -> Option<f64> {
        let guesses = self.opponent_guesses(position);
        self.evaluate_against(position, candidate, &guesses)
    }

    /// Highest-valued legal card and its value; `None` means go.
    ///
    /// Equal values go to the lowest card.
    #[must_use]
    pub fn best_play(&self, position: &PeggingPosition<'_>) -> Option<(Card, f64)> {
        let guesses = self.opponent_guesses(position);
        let mut legal: Vec<Card> = position
            .hand
            .iter()
            .copied()
            .filter(|c| position.count + u32::from(c.value()) <= MAX_COUNT)
            .collect();
        legal.sort_by_key(|c| (c.value(), *c));

        let mut best: Option<(Card, f64)> = None;
        for card in legal {
            let Some(value) = self.evaluate_against(position, card, &guesses) else {
                continue;
            };
            trace!(%card, value, count = position.count, "lookahead candidate");
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((card, value));
            }
        }
        best
    }

    /// Opponent hands drawn from the cards the mover cannot see.
    fn opponent_guesses(&self, position: &PeggingPosition<'_>) -> Vec<Vec<Card>> {
        let mut known = position.hand.to_vec();
        known.extend_from_slice(position.sequence);
        let pool = unseen_cards(&known);
        let size = position.opponent_cards.min(pool.len());

        (0..self.config.determinizations.max(1))
            .map(|i| {
                let mut rng = GameRng::new(self.config.seed.wrapping_add(i as u64));
                let mut pool = pool.clone();
                for k in 0..size {
                    let j = rng.gen_range_usize(k..pool.len());
                    pool.swap(k, j);
                }
                pool.truncate(size);
                pool
            })
            .collect()
    }

    fn evaluate_against(
        &self,
        position: &PeggingPosition<'_>,
        candidate: Card,
        guesses: &[Vec<Card>],
    ) -> Option<f64> {
        let landing = position.count + u32::from(candidate.value());
        if landing > MAX_COUNT {
            return None;
        }
        let at = position.hand.iter().position(|&c| c == candidate)?;
        let mut rest = position.hand.to_vec();
        rest.remove(at);

        let total: i32 = guesses
            .iter()
            .map(|theirs| {
                Rollout {
                    hands: [rest.clone(), theirs.clone()],
                    sequence: position.sequence.to_vec(),
                    count: position.count,
                    last: None,
                    net: 0,
                }
                .run(candidate, self.config.depth, &self.config.danger_counts)
            })
            .sum();

        let mut value = f64::from(total) / guesses.len().max(1) as f64;
        if self.config.danger_counts.contains(&landing) {
            value -= self.config.danger_penalty;
        }
        Some(value)
    }
}

/// One played-out guess. Seat `ME` moves first with the candidate.
struct Rollout {
    hands: [Vec<Card>; 2],
    sequence: Vec<Card>,
    count: u32,
    last: Option<usize>,
    net: i32,
}

impl Rollout {
    fn run(mut self, candidate: Card, depth: usize, danger: &[u32]) -> i32 {
        let mut turn = self.lay(ME, candidate);
        let mut plays = 1;
        while plays < depth {
            let Some(seat) = turn else { break };
            turn = match greedy_pick(&self.hands[seat], &self.sequence, self.count, danger) {
                Some(card) => {
                    plays += 1;
                    self.lay(seat, card)
                }
                None => self.go(seat),
            };
        }
        self.net
    }

    fn credit(&mut self, seat: usize, points: u32) {
        let points = points as i32;
        if seat == ME {
            self.net += points;
        } else {
            self.net -= points;
        }
    }

    fn can_play(&self, seat: usize) -> bool {
        self.hands[seat]
            .iter()
            .any(|c| self.count + u32::from(c.value()) <= MAX_COUNT)
    }

    /// Play `card` and return who moves next; `None` once both hands are empty.
    fn lay(&mut self, seat: usize, card: Card) -> Option<usize> {
        if let Some(at) = self.hands[seat].iter().position(|&c| c == card) {
            self.hands[seat].remove(at);
        }
        self.sequence.push(card);
        self.count += u32::from(card.value());
        self.last = Some(seat);
        let points = score_pegging_play_at(&self.sequence, self.count).total;
        self.credit(seat, points);

        if self.hands.iter().all(Vec::is_empty) {
            if self.count != MAX_COUNT {
                self.credit(seat, LAST_CARD_POINTS);
            }
            return None;
        }
        if self.count == MAX_COUNT {
            self.reset();
            return Some(self.leader_after(seat));
        }
        let other = other(seat);
        Some(if self.can_play(other) { other } else { seat })
    }

    fn go(&mut self, seat: usize) -> Option<usize> {
        let other = other(seat);
        if self.can_play(other) {
            return Some(other);
        }
        let last = self.last.unwrap_or(other);
        self.credit(last, LAST_CARD_POINTS);
        self.reset();
        Some(self.leader_after(last))
    }

    fn reset(&mut self) {
        self.count = 0;
        self.sequence.clear();
    }

    fn leader_after(&self, last: usize) -> usize {
        if self.hands[other(last)].is_empty() {
            last
        } else {
            other(last)
        }
    }
}

fn other(seat: usize) -> usize {
    if seat == ME {
        THEM
    } else {
        ME
    }
}

/// Most points now, then off a danger count, then the lowest card.
fn greedy_pick(hand: &[Card], sequence: &[Card], count: u32, danger: &[u32]) -> Option<Card> {
    hand.iter()
        .copied()
        .filter(|c| count + u32::from(c.value()) <= MAX_COUNT)
        .min_by_key(|&card| {
            let next = count + u32::from(card.value());
            let mut played = sequence.to_vec();
            played.push(card);
            let points = score_pegging_play_at(&played, next).total;
            (Reverse(points), danger.contains(&next), card.value(), card)
        })
}
