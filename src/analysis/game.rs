//! Whole-game report built from the decision log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::decision::{AnalysisError, Analyzer, DecisionAnalysis};
use crate::core::{DecisionSnapshot, PlayerId, PlayerMap};

/// Letter grade from the average loss per decision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    #[default]
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    #[must_use]
    pub fn from_average_loss(loss: f64) -> Self {
        if loss < 0.1 {
            Grade::APlus
        } else if loss < 0.3 {
            Grade::A
        } else if loss < 0.7 {
            Grade::B
        } else if loss < 1.5 {
            Grade::C
        } else if loss < 2.5 {
            Grade::D
        } else {
            Grade::F
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One player's totals across the game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub decisions: usize,
    /// Decisions that cost less than a tenth of a point.
    pub excellent: usize,
    pub total_loss: f64,
    /// Loss per hand number.
    pub per_hand: BTreeMap<u32, f64>,
    pub worst: Option<DecisionAnalysis>,
}

impl PlayerReport {
    #[must_use]
    pub fn average_loss(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_loss / self.decisions as f64
        }
    }

    /// Loss per hand in which the player made a decision.
    #[must_use]
    pub fn average_loss_per_hand(&self) -> f64 {
        if self.per_hand.is_empty() {
            0.0
        } else {
            self.total_loss / self.per_hand.len() as f64
        }
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        Grade::from_average_loss(self.average_loss())
    }

    fn record(&mut self, analysis: DecisionAnalysis) {
        self.decisions += 1;
        if analysis.is_optimal() {
            self.excellent += 1;
        }
        self.total_loss += analysis.ev_loss;
        *self.per_hand.entry(analysis.hand_number).or_default() += analysis.ev_loss;
        let worse = analysis.ev_loss > 0.0
            && self
                .worst
                .as_ref()
                .map_or(true, |w| analysis.ev_loss > w.ev_loss);
        if worse {
            self.worst = Some(analysis);
        }
    }
}

/// Every decision of one hand, both seats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand_number: u32,
    pub decisions: Vec<DecisionAnalysis>,
    pub total_loss: f64,
    /// Costliest decision, if any cost anything.
    pub worst: Option<DecisionAnalysis>,
}

impl HandSummary {
    fn new(hand_number: u32, decisions: Vec<DecisionAnalysis>) -> Self {
        let total_loss = decisions.iter().map(|d| d.ev_loss).sum();
        let worst = costliest(&decisions);
        Self {
            hand_number,
            decisions,
            total_loss,
            worst,
        }
    }
}

/// Whole-game review.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameAnalysis {
    pub players: PlayerMap<PlayerReport>,
    /// Every decision in log order.
    pub decisions: Vec<DecisionAnalysis>,
    /// Per-hand summaries in hand order.
    pub hands: Vec<HandSummary>,
    pub total_loss: f64,
    pub average_loss_per_hand: f64,
    pub average_loss_per_decision: f64,
    pub excellent_count: usize,
    pub worst: Option<DecisionAnalysis>,
    pub grade: Grade,
}

impl GameAnalysis {
    #[must_use]
    pub fn report(&self, player: PlayerId) -> &PlayerReport {
        &self.players[player]
    }

    #[must_use]
    pub fn hand(&self, hand_number: u32) -> Option<&HandSummary> {
        self.hands.iter().find(|h| h.hand_number == hand_number)
    }

    fn from_decisions(decisions: Vec<DecisionAnalysis>) -> Self {
        let mut players = PlayerMap::<PlayerReport>::default();
        let mut by_hand: BTreeMap<u32, Vec<DecisionAnalysis>> = BTreeMap::new();
        for decision in &decisions {
            players[decision.player].record(decision.clone());
            by_hand
                .entry(decision.hand_number)
                .or_default()
                .push(decision.clone());
        }
        let hands: Vec<HandSummary> = by_hand
            .into_iter()
            .map(|(number, decisions)| HandSummary::new(number, decisions))
            .collect();

        let total_loss: f64 = hands.iter().map(|h| h.total_loss).sum();
        let average_loss_per_hand = if hands.is_empty() {
            0.0
        } else {
            total_loss / hands.len() as f64
        };
        let average_loss_per_decision = if decisions.is_empty() {
            0.0
        } else {
            total_loss / decisions.len() as f64
        };

        Self {
            players,
            excellent_count: decisions.iter().filter(|d| d.is_optimal()).count(),
            worst: costliest(&decisions),
            grade: Grade::from_average_loss(average_loss_per_decision),
            decisions,
            hands,
            total_loss,
            average_loss_per_hand,
            average_loss_per_decision,
        }
    }
}

/// First decision with the highest positive loss.
fn costliest(decisions: &[DecisionAnalysis]) -> Option<DecisionAnalysis> {
    decisions
        .iter()
        .filter(|d| d.ev_loss > 0.0)
        .fold(None, |worst: Option<&DecisionAnalysis>, d| match worst {
            Some(w) if w.ev_loss >= d.ev_loss => Some(w),
            _ => Some(d),
        })
        .cloned()
}

impl Analyzer {
    /// Review every decision in `log`, in order.
    pub fn analyze_game<'a>(
        &self,
        log: impl IntoIterator<Item = &'a DecisionSnapshot>,
    ) -> Result<GameAnalysis, AnalysisError> {
        let decisions = log
            .into_iter()
            .map(|snapshot| self.analyze_decision(snapshot))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GameAnalysis::from_decisions(decisions))
    }

    /// Review only `player`'s decisions.
    pub fn analyze_player<'a>(
        &self,
        log: impl IntoIterator<Item = &'a DecisionSnapshot>,
        player: PlayerId,
    ) -> Result<GameAnalysis, AnalysisError> {
        self.analyze_game(log.into_iter().filter(|s| s.player() == player))
    }
}

/// Review a decision log with the default analyzer settings.
pub fn analyze_game<'a>(
    log: impl IntoIterator<Item = &'a DecisionSnapshot>,
) -> Result<GameAnalysis, AnalysisError> {
    Analyzer::default().analyze_game(log)
}
