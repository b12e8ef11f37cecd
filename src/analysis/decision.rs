//! Single-decision review.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, CardId};
use crate::core::{DecisionSnapshot, PlayerId, RulesConfig};
use crate::solver::{DiscardSolver, PeggingLookahead, PeggingPosition, SolverError};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// The recorded choice is not something the player could have done.
    #[error("recorded choice {0} is not an option for that hand")]
    UnknownChoice(CardId),

    #[error("recorded play {card} does not fit under 31 at count {count}")]
    PlayDoesNotFit { card: CardId, count: u32 },

    #[error("discard snapshot holds {0} cards, expected 2")]
    DiscardSize(usize),
}

/// How costly a decision was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Excellent,
    Minor,
    Significant,
    Major,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn from_loss(loss: f64) -> Self {
        if loss < 0.1 {
            Severity::Excellent
        } else if loss < 0.5 {
            Severity::Minor
        } else if loss < 1.5 {
            Severity::Significant
        } else if loss < 3.0 {
            Severity::Major
        } else {
            Severity::Critical
        }
    }
}

/// Which kind of decision was reviewed, with the recommended alternative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Recommendation {
    Discard { chosen: [Card; 2], best: [Card; 2] },
    Play { chosen: Card, best: Card },
}

/// Review of one logged decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionAnalysis {
    pub player: PlayerId,
    pub hand_number: u32,
    /// Value of the best option minus the value of the chosen one.
    pub ev_loss: f64,
    pub severity: Severity,
    pub recommendation: Recommendation,
}

impl DecisionAnalysis {
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.severity == Severity::Excellent
    }
}

/// Evaluates logged decisions against the discard solver and the pegging
/// look-ahead.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    solver: DiscardSolver,
    lookahead: PeggingLookahead,
}

impl Analyzer {
    #[must_use]
    pub fn new(solver: DiscardSolver, lookahead: PeggingLookahead) -> Self {
        Self { solver, lookahead }
    }

    #[must_use]
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(
            DiscardSolver::new(config.solver),
            PeggingLookahead::new(config.lookahead.clone()),
        )
    }

    /// Compare one decision with the best alternative.
    pub fn analyze_decision(
        &self,
        snapshot: &DecisionSnapshot,
    ) -> Result<DecisionAnalysis, AnalysisError> {
        let (ev_loss, recommendation) = match snapshot {
            DecisionSnapshot::Discard {
                is_dealer,
                hand,
                choice,
                ..
            } => self.discard_loss(hand, choice, *is_dealer)?,
            DecisionSnapshot::PeggingPlay {
                hand,
                choice,
                sequence,
                count,
                opponent_cards,
                ..
            } => {
                let position = PeggingPosition {
                    hand,
                    sequence,
                    count: *count,
                    opponent_cards: *opponent_cards,
                };
                self.play_loss(&position, *choice)?
            }
        };

        Ok(DecisionAnalysis {
            player: snapshot.player(),
            hand_number: snapshot.hand_number(),
            ev_loss,
            severity: Severity::from_loss(ev_loss),
            recommendation,
        })
    }

    fn discard_loss(
        &self,
        hand: &[Card],
        choice: &[Card],
        is_dealer: bool,
    ) -> Result<(f64, Recommendation), AnalysisError> {
        let chosen: [Card; 2] = choice
            .try_into()
            .map_err(|_| AnalysisError::DiscardSize(choice.len()))?;
        let result = self.solver.optimal_discard(hand, is_dealer)?;
        let picked = result
            .option_for(chosen)
            .ok_or(AnalysisError::UnknownChoice(chosen[0].id()))?;
        let best = result
            .best()
            .ok_or(AnalysisError::UnknownChoice(chosen[0].id()))?;

        let loss = (best.adjusted - picked.adjusted).max(0.0);
        Ok((
            loss,
            Recommendation::Discard {
                chosen,
                best: best.discard,
            },
        ))
    }

    fn play_loss(
        &self,
        position: &PeggingPosition<'_>,
        choice: Card,
    ) -> Result<(f64, Recommendation), AnalysisError> {
        if !position.hand.contains(&choice) {
            return Err(AnalysisError::UnknownChoice(choice.id()));
        }
        let chosen = self
            .lookahead
            .evaluate(position, choice)
            .ok_or(AnalysisError::PlayDoesNotFit {
                card: choice.id(),
                count: position.count,
            })?;
        let (best, best_value) = self.lookahead.best_play(position).unwrap_or((choice, chosen));

        Ok((
            (best_value - chosen).max(0.0),
            Recommendation::Play {
                chosen: choice,
                best,
            },
        ))
    }
}

/// Review `snapshot` with the default analyzer settings.
pub fn analyze_decision(snapshot: &DecisionSnapshot) -> Result<DecisionAnalysis, AnalysisError> {
    Analyzer::default().analyze_decision(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::core::{LookaheadConfig, SolverConfig};

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn discard(hand: &str, choice: &str) -> DecisionSnapshot {
        DecisionSnapshot::Discard {
            player: PlayerId::ONE,
            hand_number: 3,
            is_dealer: false,
            hand: cards(hand),
            choice: cards(choice),
        }
    }

    fn play(hand: &str, choice: &str, sequence: &str) -> DecisionSnapshot {
        let sequence = cards(sequence);
        DecisionSnapshot::PeggingPlay {
            player: PlayerId::ZERO,
            hand_number: 2,
            is_dealer: true,
            hand: cards(hand),
            choice: choice.parse().unwrap(),
            count: sequence.iter().map(|c| u32::from(c.value())).sum(),
            sequence,
            opponent_cards: 0,
        }
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_loss(0.0), Severity::Excellent);
        assert_eq!(Severity::from_loss(0.099), Severity::Excellent);
        assert_eq!(Severity::from_loss(0.1), Severity::Minor);
        assert_eq!(Severity::from_loss(0.5), Severity::Significant);
        assert_eq!(Severity::from_loss(1.5), Severity::Major);
        assert_eq!(Severity::from_loss(3.0), Severity::Critical);
    }

    #[test]
    fn test_optimal_discard_costs_nothing() {
        let hand = "5C 5H 5S JD KH QC";
        let best = crate::solver::optimal_discard(&cards(hand), false).unwrap();
        let snapshot = DecisionSnapshot::Discard {
            player: PlayerId::ONE,
            hand_number: 3,
            is_dealer: false,
            hand: cards(hand),
            choice: best.discard.to_vec(),
        };

        let analysis = analyze_decision(&snapshot).unwrap();
        assert_eq!(analysis.ev_loss, 0.0);
        assert!(analysis.is_optimal());
        assert_eq!(analysis.player, PlayerId::ONE);
        assert_eq!(analysis.hand_number, 3);
    }

    #[test]
    fn test_breaking_up_fives_is_critical() {
        let analyzer = Analyzer::new(
            DiscardSolver::new(SolverConfig::hand_only()),
            PeggingLookahead::default(),
        );
        let analysis = analyzer
            .analyze_decision(&discard("5C 5H 5S JD KH QC", "5C 5H"))
            .unwrap();
        assert!(analysis.ev_loss > 3.0, "loss {}", analysis.ev_loss);
        assert_eq!(analysis.severity, Severity::Critical);
        match analysis.recommendation {
            Recommendation::Discard { best, .. } => assert_eq!(best.to_vec(), cards("QC KH")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missed_fifteen() {
        let analysis = analyze_decision(&play("5S 2H", "2H", "10H")).unwrap();
        assert_eq!(analysis.ev_loss, 2.0);
        assert_eq!(analysis.severity, Severity::Major);
        assert_eq!(
            analysis.recommendation,
            Recommendation::Play {
                chosen: "2H".parse().unwrap(),
                best: "5S".parse().unwrap(),
            }
        );

        let good = analyze_decision(&play("5S 2H", "5S", "10H")).unwrap();
        assert_eq!(good.ev_loss, 0.0);
    }

    #[test]
    fn test_immediate_points_can_cost_later() {
        // The fifteen scores 2 now; holding the fours back makes 8.
        let analysis = analyze_decision(&play("5C 4H 4S 4D", "5C", "10H")).unwrap();
        assert_eq!(analysis.ev_loss, 4.0);
        assert_eq!(analysis.severity, Severity::Critical);
        match analysis.recommendation {
            Recommendation::Play { chosen, best } => {
                assert_eq!(chosen, "5C".parse().unwrap());
                assert_eq!(best.rank, crate::cards::Rank::Four);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_depth_one_only_sees_immediate_points() {
        use crate::core::LookaheadConfig;

        let config = RulesConfig::default().with_lookahead(LookaheadConfig::default().with_depth(1));
        let analyzer = Analyzer::from_config(&config);
        let analysis = analyzer
            .analyze_decision(&play("5C 4H 4S 4D", "5C", "10H"))
            .unwrap();
        assert_eq!(analysis.ev_loss, 0.0);
        assert!(analysis.is_optimal());
    }

    #[test]
    fn test_bad_snapshots() {
        assert_eq!(
            analyze_decision(&discard("5C 5H 5S JD KH QC", "5C")).unwrap_err(),
            AnalysisError::DiscardSize(1)
        );
        assert_eq!(
            analyze_decision(&discard("5C 5H 5S JD KH QC", "5C 2D")).unwrap_err(),
            AnalysisError::UnknownChoice("5C".parse().unwrap())
        );
        assert!(matches!(
            analyze_decision(&discard("5C 5H 5S", "5C 5H")).unwrap_err(),
            AnalysisError::Solver(SolverError::WrongCardCount(3))
        ));
        assert_eq!(
            analyze_decision(&play("5S", "9D", "")).unwrap_err(),
            AnalysisError::UnknownChoice("9D".parse().unwrap())
        );
        assert_eq!(
            analyze_decision(&play("KS", "KS", "10H 10D 5C")).unwrap_err(),
            AnalysisError::PlayDoesNotFit {
                card: "KS".parse().unwrap(),
                count: 25
            }
        );
    }
}
