//! Show scoring for a hand or crib plus the starter.
//!
//! Counts fifteens, pairs, runs (with multiplicity for double and triple
//! runs), flush, and nobs. The result does not depend on card order.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Points per fifteen combination.
const FIFTEEN_POINTS: u32 = 2;
/// Points per pair of matching rank.
const PAIR_POINTS: u32 = 2;

/// Per-category show score.
///
/// `total` always equals the sum of the other five fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub fifteens: u32,
    pub pairs: u32,
    pub runs: u32,
    pub flush: u32,
    pub nobs: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Build from components, computing the total.
    #[must_use]
    pub fn new(fifteens: u32, pairs: u32, runs: u32, flush: u32, nobs: u32) -> Self {
        Self {
            fifteens,
            pairs,
            runs,
            flush,
            nobs,
            total: fifteens + pairs + runs + flush + nobs,
        }
    }
}

/// Score `hand` (normally four cards) with `starter`.
///
/// A crib only scores a flush when the starter matches as well.
#[must_use]
pub fn score_hand(hand: &[Card], starter: Card, is_crib: bool) -> ScoreBreakdown {
    let mut all = Vec::with_capacity(hand.len() + 1);
    all.extend_from_slice(hand);
    all.push(starter);

    ScoreBreakdown::new(
        score_fifteens(&all),
        score_pairs(&all),
        score_runs(&all),
        score_flush(hand, starter, is_crib),
        score_nobs(hand, starter),
    )
}

/// Two points for every subset whose values sum to exactly 15.
#[must_use]
pub fn score_fifteens(cards: &[Card]) -> u32 {
    let values: Vec<u32> = cards.iter().map(|c| u32::from(c.value())).collect();
    let mut count = 0;

    for mask in 1u32..(1 << values.len()) {
        let sum: u32 = values
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, v)| v)
            .sum();
        if sum == 15 {
            count += 1;
        }
    }

    count * FIFTEEN_POINTS
}

/// Two points for every unordered pair sharing a rank.
#[must_use]
pub fn score_pairs(cards: &[Card]) -> u32 {
    let mut count = 0;
    for (i, a) in cards.iter().enumerate() {
        count += cards[i + 1..].iter().filter(|b| b.rank == a.rank).count() as u32;
    }
    count * PAIR_POINTS
}

/// Runs of three or more consecutive ranks.
///
/// Each maximal span scores `length * product(multiplicities)`, which covers
/// double, triple, and double-double runs without enumerating subsets.
#[must_use]
pub fn score_runs(cards: &[Card]) -> u32 {
    let mut counts = [0u32; Rank::ALL.len() + 2];
    for card in cards {
        counts[card.rank.order() as usize] += 1;
    }

    let mut total = 0;
    let mut len = 0;
    let mut ways = 1;
    for &n in &counts[1..] {
        if n > 0 {
            len += 1;
            ways *= n;
        } else {
            if len >= 3 {
                total += len * ways;
            }
            len = 0;
            ways = 1;
        }
    }
    total
}

fn score_flush(hand: &[Card], starter: Card, is_crib: bool) -> u32 {
    let Some(first) = hand.first() else {
        return 0;
    };
    if !hand.iter().all(|c| c.suit == first.suit) {
        return 0;
    }

    let len = hand.len() as u32;
    if starter.suit == first.suit {
        len + 1
    } else if is_crib {
        0
    } else {
        len
    }
}

fn score_nobs(hand: &[Card], starter: Card) -> u32 {
    u32::from(
        hand.iter()
            .any(|c| c.rank == Rank::Jack && c.suit == starter.suit),
    )
}
