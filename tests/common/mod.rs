//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use cribbage_engine::ai::CribbagePlayer;
use cribbage_engine::cards::{parse_cards, Card, CardId};
use cribbage_engine::core::{Action, GameState, Phase, PlayerId, PlayerMap};
use cribbage_engine::rules::{Cribbage, RulesEngine, Transition};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(s: &str) -> Card {
    s.parse().unwrap()
}

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

pub fn ids(s: &str) -> Vec<CardId> {
    cards(s).into_iter().map(|c| c.id()).collect()
}

pub fn id(s: &str) -> CardId {
    s.parse().unwrap()
}

/// Apply an action that must succeed.
pub fn applied(engine: &Cribbage, state: &GameState, action: &Action) -> GameState {
    match engine.apply(state, action).unwrap() {
        Transition::Applied(next) => next,
        Transition::Rejected(reason) => panic!("{action} rejected in {:?}: {reason}", state.phase),
    }
}

/// When to stop driving a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopAt {
    HandComplete,
    GameOver,
}

/// Next action for the table: seat decisions come from `seats`.
pub fn next_action(
    engine: &Cribbage,
    state: &GameState,
    seats: &PlayerMap<&dyn CribbagePlayer>,
) -> Option<Action> {
    match state.phase {
        Phase::GameStart => Some(Action::NewGame { player_count: 2 }),
        Phase::Dealing => Some(Action::Deal),
        Phase::CutStarter => Some(Action::Cut),
        Phase::ShowNondealer | Phase::ShowDealer | Phase::ShowCrib => Some(Action::AdvanceShow),
        Phase::HandComplete => Some(Action::NextHand),
        Phase::GameOver => None,
        Phase::DiscardToCrib => PlayerId::all()
            .find(|&p| state.hand(p).len() == engine.config().cards_dealt)
            .and_then(|p| seats[p].suggest_action(state, p)),
        Phase::Pegging => state
            .to_act()
            .and_then(|p| seats[p].suggest_action(state, p)),
    }
}

/// Drive `state` with `seats` until `stop` and return the final state and
/// every action dispatched.
pub fn drive(
    engine: &Cribbage,
    state: &GameState,
    seats: &PlayerMap<&dyn CribbagePlayer>,
    stop: StopAt,
) -> (GameState, Vec<Action>) {
    let mut state = state.clone();
    let mut actions = Vec::new();
    for _ in 0..5_000 {
        if state.is_over() || (stop == StopAt::HandComplete && state.phase == Phase::HandComplete) {
            return (state, actions);
        }
        let action = next_action(engine, &state, seats)
            .unwrap_or_else(|| panic!("no action available in {:?}", state.phase));
        state = applied(engine, &state, &action);
        if let Some(pegging) = &state.pegging {
            assert!(pegging.count <= 31, "count {} after {action}", pegging.count);
        }
        actions.push(action);
    }
    panic!("game did not finish");
}
