//! AI players against each other, reviewed by the analyzer.

mod common;

use common::{applied, drive, init_logging, StopAt};
use cribbage_engine::ai::{CribbagePlayer, HeuristicPlayer, RandomPlayer};
use cribbage_engine::analysis::{analyze_game, Recommendation};
use cribbage_engine::core::{Action, GameState, PlayerId, PlayerMap};
use cribbage_engine::rules::{Cribbage, RulesEngine};

#[test]
fn test_heuristic_beats_random() {
    init_logging();
    let engine = Cribbage::default();
    let heuristic = HeuristicPlayer::default();

    let mut wins = 0;
    for seed in 0..30u64 {
        let random = RandomPlayer::new(seed);
        // Alternate seats so the first deal does not favour one side.
        let (seats, heuristic_seat): (PlayerMap<&dyn CribbagePlayer>, PlayerId) = if seed % 2 == 0 {
            (PlayerMap::from_array([&heuristic as &dyn CribbagePlayer, &random]), PlayerId::ZERO)
        } else {
            (PlayerMap::from_array([&random as &dyn CribbagePlayer, &heuristic]), PlayerId::ONE)
        };
        let (state, _) = drive(&engine, &GameState::new(seed), &seats, StopAt::GameOver);
        if engine.is_terminal(&state).is_some_and(|r| r.is_winner(heuristic_seat)) {
            wins += 1;
        }
    }
    assert!(wins >= 20, "heuristic won only {wins} of 30");
}

#[test]
fn test_heuristic_outgrades_random() {
    init_logging();
    let engine = Cribbage::default();
    let heuristic = HeuristicPlayer::default();
    let random = RandomPlayer::new(77);
    let seats: PlayerMap<&dyn CribbagePlayer> =
        PlayerMap::from_array([&heuristic as &dyn CribbagePlayer, &random]);

    let (state, _) = drive(&engine, &GameState::new(77), &seats, StopAt::GameOver);
    let report = analyze_game(&state.decision_log).unwrap();
    assert_eq!(report.decisions.len(), state.decision_log.len());
    assert_eq!(report.hands.len() as u32, state.hand_number);

    // The heuristic discards with the same solver the analyzer uses.
    for decision in report.decisions.iter().filter(|d| d.player == PlayerId::ZERO) {
        if let Recommendation::Discard { .. } = decision.recommendation {
            assert_eq!(decision.ev_loss, 0.0);
        }
    }

    let mine = report.report(PlayerId::ZERO);
    let theirs = report.report(PlayerId::ONE);
    assert!(mine.decisions > 0);
    assert!(mine.average_loss() < theirs.average_loss());
    assert!(mine.grade() <= theirs.grade());
    assert!(theirs.worst.is_some());
    assert!(report.excellent_count >= mine.excellent);
}

#[test]
fn test_suggestions_are_legal_actions() {
    let engine = Cribbage::default();
    let mut state = applied(&engine, &engine.start(8), &Action::Deal);
    for player in PlayerId::all() {
        let action = engine.suggest_action(&state, player).unwrap();
        assert!(matches!(action, Action::Discard { .. }));
        state = applied(&engine, &state, &action);
    }
    state = applied(&engine, &state, &Action::Cut);

    while let Some(player) = state.to_act() {
        assert!(engine.suggest_action(&state, player.opponent()).is_none());
        let action = engine.suggest_action(&state, player).unwrap();
        assert!(engine.legal_actions(&state, player).contains(&action), "{action}");
        state = applied(&engine, &state, &action);
    }
    assert!(!state.is_over());
    assert!(engine.suggest_action(&state, PlayerId::ZERO).is_none());
}
