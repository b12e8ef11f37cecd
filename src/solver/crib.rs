//! Crib value of a two-card discard.
//!
//! The discarded pair ends up in a four-card crib together with two cards
//! the opponent lays away, scored against a starter neither player has
//! seen. Two estimators are provided:
//!
//! - [`SchellTable`]: the published average crib value for each of the 91
//!   rank pairs. Constant time, suit-blind.
//! - [`Exhaustive`]: exact average over every opponent discard pair and
//!   every starter drawn from the cards the player cannot see. Assumes the
//!   opponent discards uniformly at random.

use crate::cards::{unseen_cards, Card, Rank};
use crate::scoring::score_hand;

/// Expected crib points from laying away a pair.
pub trait CribEstimator {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Expected crib score given `discard` from the six-card `hand`.
    fn estimate(&self, discard: [Card; 2], hand: &[Card]) -> f64;
}

/// Average crib points per discarded rank pair, upper triangle by rank.
///
/// Row `i` holds the pairs `(i, i)`, `(i, i+1)`, ..., `(i, King)`.
const SCHELL: [&[f64]; 13] = [
    // A   2     3     4     5     6     7     8     9     10    J     Q     K
    &[5.20, 4.60, 4.20, 6.10, 5.80, 4.00, 3.80, 3.60, 3.70, 3.51, 3.50, 3.50, 3.36],
    // 2
    &[5.20, 6.90, 4.10, 5.70, 4.30, 4.10, 3.80, 3.90, 3.71, 3.70, 3.86, 3.57],
    // 3
    &[5.90, 4.90, 5.60, 4.00, 4.20, 4.00, 3.80, 3.51, 3.60, 3.65, 3.89],
    // 4
    &[5.90, 6.20, 3.90, 4.10, 3.90, 3.80, 3.70, 3.70, 3.70, 3.60],
    // 5
    &[8.50, 6.40, 5.30, 5.10, 5.00, 6.66, 6.66, 6.63, 6.67],
    // 6
    &[5.50, 5.40, 4.40, 4.80, 3.60, 3.60, 3.60, 3.50],
    // 7
    &[5.50, 5.50, 4.40, 3.80, 3.80, 3.70, 3.60],
    // 8
    &[5.10, 4.50, 3.50, 3.50, 3.40, 3.20],
    // 9
    &[4.70, 3.10, 3.10, 2.90, 2.90],
    // 10
    &[4.30, 3.00, 3.00, 2.80],
    // J
    &[4.30, 2.90, 2.80],
    // Q
    &[4.30, 2.80],
    // K
    &[4.30],
];

/// Table lookup by rank pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchellTable;

impl SchellTable {
    /// Average crib value for a pair of ranks, in either order.
    #[must_use]
    pub fn value(a: Rank, b: Rank) -> f64 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let row = lo as usize;
        SCHELL[row][hi as usize - row]
    }
}

impl CribEstimator for SchellTable {
    fn name(&self) -> &'static str {
        "schell"
    }

    fn estimate(&self, discard: [Card; 2], _hand: &[Card]) -> f64 {
        SchellTable::value(discard[0].rank, discard[1].rank)
    }
}

/// Full enumeration of opponent discards and starters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exhaustive;

impl CribEstimator for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn estimate(&self, discard: [Card; 2], hand: &[Card]) -> f64 {
        let unseen = unseen_cards(hand);
        let mut total: u64 = 0;
        let mut samples: u64 = 0;
        let mut crib = [discard[0], discard[1], discard[0], discard[1]];

        for i in 0..unseen.len() {
            for j in i + 1..unseen.len() {
                crib[2] = unseen[i];
                crib[3] = unseen[j];
                for (k, &starter) in unseen.iter().enumerate() {
                    if k == i || k == j {
                        continue;
                    }
                    total += u64::from(score_hand(&crib, starter, true).total);
                    samples += 1;
                }
            }
        }

        if samples == 0 {
            0.0
        } else {
            total as f64 / samples as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_table_is_complete_triangle() {
        let entries: usize = SCHELL.iter().map(|row| row.len()).sum();
        assert_eq!(entries, 91);
        for (i, row) in SCHELL.iter().enumerate() {
            assert_eq!(row.len(), 13 - i);
        }
    }

    #[test]
    fn test_table_lookups() {
        assert_eq!(SchellTable::value(Rank::Five, Rank::Five), 8.50);
        assert_eq!(SchellTable::value(Rank::Two, Rank::Three), 6.90);
        assert_eq!(SchellTable::value(Rank::Three, Rank::Two), 6.90);
        assert_eq!(SchellTable::value(Rank::Five, Rank::Jack), 6.66);
        assert_eq!(SchellTable::value(Rank::King, Rank::Ace), 3.36);
        assert_eq!(SchellTable::value(Rank::Queen, Rank::King), 2.80);
        assert_eq!(SchellTable::value(Rank::King, Rank::King), 4.30);
    }

    #[test]
    fn test_fives_best_in_table() {
        let best = Rank::ALL
            .iter()
            .flat_map(|&a| Rank::ALL.iter().map(move |&b| SchellTable::value(a, b)))
            .fold(f64::MIN, f64::max);
        assert_eq!(best, 8.50);
    }

    #[test]
    fn test_exhaustive_orders_pairs_sensibly() {
        let hand = parse_cards("5H 5S 9D 10C KH QC").unwrap();
        let fives = Exhaustive.estimate([hand[0], hand[1]], &hand);
        let faces = Exhaustive.estimate([hand[4], hand[5]], &hand);
        assert!(fives > faces, "5-5 {fives} should beat Q-K {faces}");
        assert!(fives > 5.0 && fives < 15.0);
        assert!(faces > 1.0 && faces < 8.0);
    }
}
