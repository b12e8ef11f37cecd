//! Rules and AI configuration.
//!
//! `RulesConfig` is the single configuration value a `Cribbage` engine is
//! built from. Defaults reproduce standard two-handed cribbage to 121.
//! Every struct uses `with_*` builders and deserializes from JSON with
//! missing fields falling back to their defaults.
//!
//! ```
//! use cribbage_engine::core::{RulesConfig, TieBreak};
//!
//! let config = RulesConfig::default()
//!     .with_win_score(61)
//!     .with_skunk_lines(46, 31);
//! assert!(config.validate().is_ok());
//!
//! let json = r#"{ "win_score": 61, "skunk_line": 46, "double_skunk_line": 31 }"#;
//! let parsed = RulesConfig::from_json(json).unwrap();
//! assert_eq!(parsed.win_score, 61);
//! assert_eq!(parsed.pegging.tie_break, TieBreak::Lowest);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PLAYER_COUNT;
use crate::cards::DECK_SIZE;

/// Cards each player keeps for the show, and cards in the crib.
pub const SHOW_HAND_SIZE: usize = 4;

/// Configuration that failed to parse or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Game rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// First player to reach this score wins; scores never exceed it.
    pub win_score: u32,

    /// A loser below this score is skunked.
    pub skunk_line: u32,

    /// A loser below this score is double skunked.
    pub double_skunk_line: u32,

    /// Cards dealt to each player.
    pub cards_dealt: usize,

    /// Cards each player lays away to the crib.
    pub discard_count: usize,

    /// Points to the dealer when the starter is a jack.
    pub his_heels_points: u32,

    /// Discard solver tuning.
    pub solver: SolverConfig,

    /// Pegging heuristic tuning for the built-in AI.
    pub pegging: PeggingHeuristicConfig,

    /// Look-ahead used to review pegging decisions.
    pub lookahead: LookaheadConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            win_score: 121,
            skunk_line: 91,
            double_skunk_line: 61,
            cards_dealt: 6,
            discard_count: 2,
            his_heels_points: 2,
            solver: SolverConfig::default(),
            pegging: PeggingHeuristicConfig::default(),
            lookahead: LookaheadConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_win_score(mut self, score: u32) -> Self {
        self.win_score = score;
        self
    }

    #[must_use]
    pub fn with_skunk_lines(mut self, skunk: u32, double_skunk: u32) -> Self {
        self.skunk_line = skunk;
        self.double_skunk_line = double_skunk;
        self
    }

    #[must_use]
    pub fn with_his_heels_points(mut self, points: u32) -> Self {
        self.his_heels_points = points;
        self
    }

    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    #[must_use]
    pub fn with_pegging(mut self, pegging: PeggingHeuristicConfig) -> Self {
        self.pegging = pegging;
        self
    }

    #[must_use]
    pub fn with_lookahead(mut self, lookahead: LookaheadConfig) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Check internal consistency.
    ///
    /// Deal sizes must leave four-card hands and a four-card crib with at
    /// least one card remaining for the starter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_score == 0 {
            return Err(ConfigError::invalid("win_score", "must be > 0"));
        }
        if self.skunk_line > self.win_score {
            return Err(ConfigError::invalid(
                "skunk_line",
                format!("{} exceeds win_score {}", self.skunk_line, self.win_score),
            ));
        }
        if self.double_skunk_line > self.skunk_line {
            return Err(ConfigError::invalid(
                "double_skunk_line",
                format!(
                    "{} exceeds skunk_line {}",
                    self.double_skunk_line, self.skunk_line
                ),
            ));
        }
        if self.cards_dealt.checked_sub(self.discard_count) != Some(SHOW_HAND_SIZE) {
            return Err(ConfigError::invalid(
                "cards_dealt",
                format!(
                    "dealing {} and discarding {} does not leave {SHOW_HAND_SIZE} cards",
                    self.cards_dealt, self.discard_count
                ),
            ));
        }
        if self.discard_count * PLAYER_COUNT != SHOW_HAND_SIZE {
            return Err(ConfigError::invalid(
                "discard_count",
                format!("crib must hold {SHOW_HAND_SIZE} cards"),
            ));
        }
        if self.cards_dealt * PLAYER_COUNT >= DECK_SIZE {
            return Err(ConfigError::invalid("cards_dealt", "no card left for the starter"));
        }
        self.solver.validate()?;
        self.pegging.validate()?;
        self.lookahead.validate()
    }
}

/// How the discard solver values the two cards laid away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CribEstimatorKind {
    /// Published average crib value per discarded rank pair.
    #[default]
    SchellTable,
    /// Exact average over every opponent discard and starter.
    Exhaustive,
}

/// Discard solver tuning.
///
/// The adjusted score of a candidate discard is
/// `hand_ev + dealer_crib_weight * crib_ev` when dealing and
/// `hand_ev - pone_crib_weight * crib_ev` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub estimator: CribEstimatorKind,
    pub dealer_crib_weight: f64,
    pub pone_crib_weight: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            estimator: CribEstimatorKind::SchellTable,
            dealer_crib_weight: 1.0,
            pone_crib_weight: 1.0,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_estimator(mut self, estimator: CribEstimatorKind) -> Self {
        self.estimator = estimator;
        self
    }

    #[must_use]
    pub fn with_crib_weights(mut self, dealer: f64, pone: f64) -> Self {
        self.dealer_crib_weight = dealer;
        self.pone_crib_weight = pone;
        self
    }

    /// Ignore the crib entirely and rank by hand value alone.
    #[must_use]
    pub fn hand_only() -> Self {
        Self::default().with_crib_weights(0.0, 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, weight) in [
            ("solver.dealer_crib_weight", self.dealer_crib_weight),
            ("solver.pone_crib_weight", self.pone_crib_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("{weight} must be finite and >= 0"),
                ));
            }
        }
        Ok(())
    }
}

/// How the AI chooses among equally scored plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreak {
    /// Lowest counting value, then canonical card order.
    #[default]
    Lowest,
    /// Uniform choice from a generator seeded with the value, the hand
    /// number, and the running count, so replays pick the same card.
    Seeded(u64),
}

/// Pegging heuristic tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeggingHeuristicConfig {
    /// Counts that invite an easy fifteen or thirty-one reply.
    pub danger_counts: Vec<u32>,
    pub danger_penalty: f64,
    /// Extra weight for reaching exactly 31 on top of its points.
    pub thirty_one_bonus: f64,
    pub tie_break: TieBreak,
}

impl Default for PeggingHeuristicConfig {
    fn default() -> Self {
        Self {
            danger_counts: vec![5, 21],
            danger_penalty: 0.5,
            thirty_one_bonus: 1.0,
            tie_break: TieBreak::Lowest,
        }
    }
}

impl PeggingHeuristicConfig {
    #[must_use]
    pub fn with_danger_counts(mut self, counts: impl Into<Vec<u32>>) -> Self {
        self.danger_counts = counts.into();
        self
    }

    #[must_use]
    pub fn with_danger_penalty(mut self, penalty: f64) -> Self {
        self.danger_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_thirty_one_bonus(mut self, bonus: f64) -> Self {
        self.thirty_one_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bad) = self.danger_counts.iter().find(|&&c| c == 0 || c > 31) {
            return Err(ConfigError::invalid(
                "pegging.danger_counts",
                format!("{bad} is not a reachable count"),
            ));
        }
        if !self.danger_penalty.is_finite() || !self.thirty_one_bonus.is_finite() {
            return Err(ConfigError::invalid(
                "pegging",
                "penalty and bonus must be finite",
            ));
        }
        Ok(())
    }
}

/// Pegging look-ahead tuning.
///
/// Each candidate card is played out over `determinizations` guesses at
/// the opponent's hidden cards, `depth` plays deep, both sides playing
/// greedily. Landing on a danger count costs `danger_penalty`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookaheadConfig {
    pub determinizations: usize,
    /// Plays simulated, counting the candidate itself.
    pub depth: usize,
    pub danger_counts: Vec<u32>,
    pub danger_penalty: f64,
    /// Base seed for the opponent guesses.
    pub seed: u64,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            determinizations: 20,
            depth: 3,
            danger_counts: vec![5, 11, 21],
            danger_penalty: 1.5,
            seed: 0,
        }
    }
}

impl LookaheadConfig {
    #[must_use]
    pub fn with_determinizations(mut self, n: usize) -> Self {
        self.determinizations = n;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_danger_penalty(mut self, penalty: f64) -> Self {
        self.danger_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.determinizations == 0 {
            return Err(ConfigError::invalid("lookahead.determinizations", "must be > 0"));
        }
        if self.depth == 0 {
            return Err(ConfigError::invalid("lookahead.depth", "must be > 0"));
        }
        if let Some(bad) = self.danger_counts.iter().find(|&&c| c == 0 || c > 31) {
            return Err(ConfigError::invalid(
                "lookahead.danger_counts",
                format!("{bad} is not a reachable count"),
            ));
        }
        if !self.danger_penalty.is_finite() {
            return Err(ConfigError::invalid("lookahead.danger_penalty", "must be finite"));
        }
        Ok(())
    }
}
