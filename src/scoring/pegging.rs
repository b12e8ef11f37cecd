//! Scoring of a single pegging play.
//!
//! Only the most recent card can score: the count it reaches (15 or 31),
//! the same-rank tail it extends, and the longest run ending with it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// Highest legal running count.
pub const MAX_COUNT: u32 = 31;

/// Longest run the count can ever hold (A..7 sums to 28).
const MAX_RUN_WINDOW: usize = 7;

/// A scoring combination made by one play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeggingCombo {
    Fifteen,
    ThirtyOne,
    Pair,
    PairRoyal,
    DoublePairRoyal,
    /// Run of the given length.
    Run(u8),
}

impl PeggingCombo {
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            PeggingCombo::Fifteen | PeggingCombo::ThirtyOne | PeggingCombo::Pair => 2,
            PeggingCombo::PairRoyal => 6,
            PeggingCombo::DoublePairRoyal => 12,
            PeggingCombo::Run(len) => u32::from(len),
        }
    }
}

/// Points earned by the last card of a pegging sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeggingPlayScore {
    pub fifteen: u32,
    pub thirty_one: u32,
    pub pairs: u32,
    pub runs: u32,
    pub total: u32,
}

impl PeggingPlayScore {
    /// The combinations that produced these points, in scoring order.
    #[must_use]
    pub fn combos(&self) -> SmallVec<[PeggingCombo; 4]> {
        let mut out = SmallVec::new();
        if self.fifteen > 0 {
            out.push(PeggingCombo::Fifteen);
        }
        if self.thirty_one > 0 {
            out.push(PeggingCombo::ThirtyOne);
        }
        match self.pairs {
            2 => out.push(PeggingCombo::Pair),
            6 => out.push(PeggingCombo::PairRoyal),
            12 => out.push(PeggingCombo::DoublePairRoyal),
            _ => {}
        }
        if self.runs > 0 {
            out.push(PeggingCombo::Run(self.runs as u8));
        }
        out
    }
}

/// Running count of a sequence.
#[must_use]
pub fn sequence_count(sequence: &[Card]) -> u32 {
    sequence.iter().map(|c| u32::from(c.value())).sum()
}

/// Score the last card of `sequence` (cards since the last reset).
#[must_use]
pub fn score_pegging_play(sequence: &[Card]) -> PeggingPlayScore {
    score_pegging_play_at(sequence, sequence_count(sequence))
}

/// Score the last card of `sequence` given an explicit running `count`.
///
/// Used when the caller tracks the count separately from a partial
/// sequence, e.g. when evaluating a hypothetical play.
#[must_use]
pub fn score_pegging_play_at(sequence: &[Card], count: u32) -> PeggingPlayScore {
    if sequence.is_empty() {
        return PeggingPlayScore::default();
    }

    let fifteen = if count == 15 { 2 } else { 0 };
    let thirty_one = if count == MAX_COUNT { 2 } else { 0 };
    let pairs = tail_pair_points(sequence);
    let runs = tail_run_length(sequence);

    PeggingPlayScore {
        fifteen,
        thirty_one,
        pairs,
        runs,
        total: fifteen + thirty_one + pairs + runs,
    }
}

fn tail_pair_points(sequence: &[Card]) -> u32 {
    let Some(last) = sequence.last() else {
        return 0;
    };
    let matching = sequence
        .iter()
        .rev()
        .take_while(|c| c.rank == last.rank)
        .count();

    match matching {
        2 => 2,
        3 => 6,
        4 => 12,
        _ => 0,
    }
}

fn tail_run_length(sequence: &[Card]) -> u32 {
    let longest = sequence.len().min(MAX_RUN_WINDOW);

    for len in (3..=longest).rev() {
        let mut orders: SmallVec<[u8; MAX_RUN_WINDOW]> = sequence[sequence.len() - len..]
            .iter()
            .map(|c| c.rank.order())
            .collect();
        orders.sort_unstable();

        if orders.windows(2).all(|w| w[1] == w[0] + 1) {
            return len as u32;
        }
    }
    0
}
