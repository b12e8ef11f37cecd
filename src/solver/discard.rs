//! Expected-value discard selection.
//!
//! For a six-card hand the solver tries all 15 two-card discards. Each
//! kept four-card hand is scored against every one of the 46 cards the
//! player cannot see, and the average is its hand EV. The crib value of
//! the discarded pair comes from a [`CribEstimator`] and is added for the
//! dealer or subtracted for the pone, scaled by the configured weights.
//!
//! The hand is sorted into canonical card order before enumerating, so the
//! result never depends on input order, and ties go to the first option in
//! that order. Nothing is sampled: the same hand always gives the same
//! answer.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::crib::{CribEstimator, Exhaustive, SchellTable};
use crate::cards::{unseen_cards, Card, CardId};
use crate::core::{CribEstimatorKind, SolverConfig};
use crate::scoring::score_hand;

/// Cards the solver expects in a dealt hand.
pub const DEALT_HAND_SIZE: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("discard solver needs {DEALT_HAND_SIZE} cards, got {0}")]
    WrongCardCount(usize),

    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
}

/// One candidate discard and its valuation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscardOption {
    pub discard: [Card; 2],
    pub keep: [Card; 4],
    /// Average show score of `keep` over every unseen starter.
    pub hand_ev: f64,
    /// Estimated crib score of `discard`.
    pub crib_ev: f64,
    /// Ranking score after the dealer/pone crib adjustment.
    pub adjusted: f64,
}

/// The solver's choice plus every option it considered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscardResult {
    pub discard: [Card; 2],
    pub keep: [Card; 4],
    /// Hand EV of the chosen option.
    pub expected_value: f64,
    /// All 15 options in canonical enumeration order.
    pub all_options: Vec<DiscardOption>,
}

impl DiscardResult {
    /// The option that was chosen.
    #[must_use]
    pub fn best(&self) -> Option<&DiscardOption> {
        self.all_options.iter().find(|o| o.discard == self.discard)
    }

    /// Look up the option that discards `cards`, in either order.
    #[must_use]
    pub fn option_for(&self, cards: [Card; 2]) -> Option<&DiscardOption> {
        self.all_options.iter().find(|o| {
            (o.discard[0] == cards[0] && o.discard[1] == cards[1])
                || (o.discard[0] == cards[1] && o.discard[1] == cards[0])
        })
    }
}

/// Average show score of `keep` over each starter in `starters`.
#[must_use]
pub fn expected_hand_value(keep: &[Card], starters: &[Card]) -> f64 {
    if starters.is_empty() {
        return 0.0;
    }
    let total: u32 = starters
        .iter()
        .map(|&starter| score_hand(keep, starter, false).total)
        .sum();
    f64::from(total) / starters.len() as f64
}

/// Discard solver.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSolver {
    config: SolverConfig,
}

impl DiscardSolver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Best discard using the configured crib estimator.
    pub fn optimal_discard(&self, hand: &[Card], is_dealer: bool) -> Result<DiscardResult, SolverError> {
        match self.config.estimator {
            CribEstimatorKind::SchellTable => self.optimal_discard_with(hand, is_dealer, &SchellTable),
            CribEstimatorKind::Exhaustive => self.optimal_discard_with(hand, is_dealer, &Exhaustive),
        }
    }

    /// Best discard using a caller-supplied crib estimator.
    ///
    /// The hand is sorted into canonical card order first, and the options
    /// are enumerated as index pairs of that sorted hand. On equal adjusted
    /// scores the earliest such pair wins, so the choice does not depend on
    /// the order `hand` was given in.
    pub fn optimal_discard_with(
        &self,
        hand: &[Card],
        is_dealer: bool,
        estimator: &dyn CribEstimator,
    ) -> Result<DiscardResult, SolverError> {
        let sorted = canonical_hand(hand)?;
        let unseen = unseen_cards(&sorted);
        let weight = if is_dealer {
            self.config.dealer_crib_weight
        } else {
            -self.config.pone_crib_weight
        };

        let mut options = Vec::with_capacity(15);
        for i in 0..sorted.len() {
            for j in i + 1..sorted.len() {
                let discard = [sorted[i], sorted[j]];
                let keep = keep_without(&sorted, i, j);
                let hand_ev = expected_hand_value(&keep, &unseen);
                let crib_ev = estimator.estimate(discard, &sorted);
                let adjusted = hand_ev + weight * crib_ev;
                trace!(
                    first = %discard[0],
                    second = %discard[1],
                    hand_ev,
                    crib_ev,
                    adjusted,
                    "discard option"
                );
                options.push(DiscardOption {
                    discard,
                    keep,
                    hand_ev,
                    crib_ev,
                    adjusted,
                });
            }
        }

        let mut best = 0;
        for (idx, option) in options.iter().enumerate().skip(1) {
            if option.adjusted > options[best].adjusted {
                best = idx;
            }
        }
        let chosen = options[best];
        trace!(
            estimator = estimator.name(),
            is_dealer,
            expected_value = chosen.hand_ev,
            "discard chosen"
        );

        Ok(DiscardResult {
            discard: chosen.discard,
            keep: chosen.keep,
            expected_value: chosen.hand_ev,
            all_options: options,
        })
    }
}

/// Best discard with the default solver configuration.
pub fn optimal_discard(hand: &[Card], is_dealer: bool) -> Result<DiscardResult, SolverError> {
    DiscardSolver::default().optimal_discard(hand, is_dealer)
}

fn canonical_hand(hand: &[Card]) -> Result<[Card; DEALT_HAND_SIZE], SolverError> {
    let mut sorted: [Card; DEALT_HAND_SIZE] = hand
        .try_into()
        .map_err(|_| SolverError::WrongCardCount(hand.len()))?;
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(SolverError::DuplicateCard(pair[0].id()));
    }
    Ok(sorted)
}

fn keep_without(sorted: &[Card; DEALT_HAND_SIZE], i: usize, j: usize) -> [Card; 4] {
    let mut keep = [sorted[0]; 4];
    let mut n = 0;
    for (k, &card) in sorted.iter().enumerate() {
        if k != i && k != j {
            keep[n] = card;
            n += 1;
        }
    }
    keep
}
