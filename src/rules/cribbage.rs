//! Two-handed cribbage: the phase reducer.
//!
//! ## Phases
//!
//! ```text
//! GAME_START -> DEALING -> DISCARD_TO_CRIB -> CUT_STARTER -> PEGGING
//!   -> SHOW_NONDEALER -> SHOW_DEALER -> SHOW_CRIB -> HAND_COMPLETE
//!   -> (NEXT_HAND: DISCARD_TO_CRIB of the next hand) | GAME_OVER
//! ```
//!
//! Every award of points is followed by a win check. The first score to
//! reach the win score ends the game on the spot, abandoning whatever is
//! left of the hand. `GAME_OVER` is terminal: only `NEW_GAME` leaves it.
//!
//! ## Outcomes
//!
//! `apply` distinguishes three outcomes:
//! - `Ok(Transition::Applied(next))`: the action took effect.
//! - `Ok(Transition::Rejected(reason))`: a rule was broken, nothing changed.
//! - `Err(EngineError)`: the caller sent something structurally wrong.
//!
//! ## Example
//!
//! ```
//! use cribbage_engine::core::{Action, GameState, Phase};
//! use cribbage_engine::rules::{Cribbage, RulesEngine};
//!
//! let engine = Cribbage::default();
//! let state = engine.reduce(&GameState::new(42), &Action::NewGame { player_count: 2 }).unwrap();
//! let state = engine.reduce(&state, &Action::Deal).unwrap();
//! assert_eq!(state.phase, Phase::DiscardToCrib);
//! assert_eq!(state.players[state.dealer].hand.len(), 6);
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::engine::{GameResult, RulesEngine, Transition};
use super::pegging::{PeggingState, LAST_CARD_POINTS};
use crate::ai::{CribbagePlayer, HeuristicPlayer};
use crate::cards::{Card, CardId, Deck, Rank};
use crate::core::{
    Action, ConfigError, DecisionSnapshot, EngineError, GameRng, GameState, HandStatsSnapshot,
    Phase, PlayerId, PlayerMap, Rejection, RulesConfig, ScoreEvent, ScoreReason, PLAYER_COUNT,
};
use crate::scoring::score_hand;

/// Internal failure channel so both kinds propagate with `?`.
enum Failure {
    Rejected(Rejection),
    Fault(EngineError),
}

impl From<Rejection> for Failure {
    fn from(r: Rejection) -> Self {
        Failure::Rejected(r)
    }
}

impl From<EngineError> for Failure {
    fn from(e: EngineError) -> Self {
        Failure::Fault(e)
    }
}

type Step = Result<GameState, Failure>;

/// Which hand-stats bucket an award counts toward.
#[derive(Clone, Copy)]
enum StatKind {
    Pegging,
    Hand,
    Crib,
}

/// Standard cribbage rules engine.
#[derive(Clone, Debug, Default)]
pub struct Cribbage {
    config: RulesConfig,
}

impl Cribbage {
    /// Build an engine, validating the configuration.
    pub fn new(config: RulesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// A fresh game ready to deal, seeded with `seed`.
    #[must_use]
    pub fn start(&self, seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = Phase::Dealing;
        state.hand_number = 1;
        state
    }

    /// The move the built-in heuristic would make for `player` right now.
    ///
    /// `None` when `player` has no decision to make in this state.
    #[must_use]
    pub fn suggest_action(&self, state: &GameState, player: PlayerId) -> Option<Action> {
        HeuristicPlayer::from_config(&self.config).suggest_action(state, player)
    }

    fn dispatch(&self, state: &GameState, action: &Action) -> Step {
        match action {
            Action::NewGame { player_count } => Ok(self.new_game(state, *player_count)?),
            _ if state.phase == Phase::GameOver => Err(Rejection::GameOver.into()),
            Action::Deal => {
                require_phase(state, Phase::Dealing, action)?;
                Ok(self.deal_hand(state)?)
            }
            Action::Discard { player, cards } => self.discard(state, *player, cards, action),
            Action::Cut => self.cut(state, action),
            Action::PlayCard { player, card } => self.play_card(state, *player, *card, action),
            Action::DeclareGo { player } => self.declare_go(state, *player, action),
            Action::AdvanceShow => self.advance_show(state, action),
            Action::NextHand => self.next_hand(state, action),
            Action::LoadOnlineDeal {
                hands,
                starter,
                dealer,
                hand_number,
            } => Ok(self.load_online_deal(state, hands, *starter, *dealer, *hand_number)?),
        }
    }

    fn new_game(&self, state: &GameState, player_count: usize) -> Result<GameState, EngineError> {
        if player_count != PLAYER_COUNT {
            return Err(EngineError::UnsupportedPlayerCount(player_count));
        }
        let mut rng = GameRng::from_state(&state.rng);
        let game_rng = rng.fork();

        let mut next = GameState::with_rng(game_rng.state());
        next.phase = Phase::Dealing;
        next.hand_number = 1;
        Ok(next)
    }

    /// Shuffle, deal alternately starting with the pone, and open discarding.
    fn deal_hand(&self, state: &GameState) -> Result<GameState, EngineError> {
        let mut rng = GameRng::from_state(&state.rng);
        let deck = Deck::shuffled(&mut rng);
        let (hands, rest) = deck
            .deal(self.config.cards_dealt, state.pone())
            .ok_or(EngineError::DeckExhausted("dealing"))?;

        let mut next = state.clone();
        for player in PlayerId::all() {
            next.players[player].hand = hands[player].clone();
        }
        next.deck = rest;
        next.rng = rng.state();
        reset_hand(&mut next);
        Ok(next)
    }

    fn discard(
        &self,
        state: &GameState,
        player: PlayerId,
        cards: &[CardId],
        action: &Action,
    ) -> Step {
        require_phase(state, Phase::DiscardToCrib, action)?;
        if cards.len() != self.config.discard_count {
            return Err(Rejection::WrongDiscardCount {
                expected: self.config.discard_count,
                got: cards.len(),
            }
            .into());
        }
        let dealt = state.hand(player);
        if dealt.len() != self.config.cards_dealt {
            return Err(Rejection::AlreadyDiscarded { player }.into());
        }

        let mut kept = dealt.to_vec();
        let mut laid_away = Vec::with_capacity(cards.len());
        for &id in cards {
            let pos = kept
                .iter()
                .position(|c| c.id() == id)
                .ok_or(Rejection::CardNotInHand { card: id })?;
            laid_away.push(kept.remove(pos));
        }

        let mut next = state.clone();
        next.decision_log.push_back(DecisionSnapshot::Discard {
            player,
            hand_number: state.hand_number,
            is_dealer: player == state.dealer,
            hand: dealt.to_vec(),
            choice: laid_away.clone(),
        });
        next.players[player].hand = kept;
        next.crib.extend(laid_away);

        let kept_size = self.config.cards_dealt - self.config.discard_count;
        if next.players.values().all(|p| p.hand.len() == kept_size) {
            next.phase = Phase::CutStarter;
        }
        Ok(next)
    }

    fn cut(&self, state: &GameState, action: &Action) -> Step {
        require_phase(state, Phase::CutStarter, action)?;
        let (starter, rest) = state
            .deck
            .draw()
            .ok_or(EngineError::DeckExhausted("cutting"))?;

        let mut next = state.clone();
        next.deck = rest;
        next.starter = Some(starter);

        if starter.rank == Rank::Jack
            && self.award(
                &mut next,
                state.dealer,
                self.config.his_heels_points,
                ScoreReason::HisHeels,
                StatKind::Pegging,
            )
        {
            return Ok(next);
        }

        let cards: PlayerMap<Vec<Card>> = next.players.map(|p| p.hand.clone());
        next.pegging = Some(PeggingState::new(cards, state.pone()));
        next.phase = Phase::Pegging;
        Ok(next)
    }

    fn play_card(&self, state: &GameState, player: PlayerId, card: CardId, action: &Action) -> Step {
        let pegging = pegging_of(state, action)?;
        let outcome = pegging.play(player, card)?;

        let mut next = state.clone();
        next.decision_log.push_back(DecisionSnapshot::PeggingPlay {
            player,
            hand_number: state.hand_number,
            is_dealer: player == state.dealer,
            hand: pegging.player_cards[player].clone(),
            choice: card.card(),
            sequence: pegging.sequence.clone(),
            count: pegging.count,
            opponent_cards: pegging.player_cards[player.opponent()].len(),
        });
        next.pegging = Some(outcome.state);

        if outcome.score.total > 0
            && self.award(
                &mut next,
                player,
                outcome.score.total,
                ScoreReason::Pegging(outcome.score),
                StatKind::Pegging,
            )
        {
            return Ok(next);
        }
        if outcome.last_card
            && self.award(
                &mut next,
                player,
                LAST_CARD_POINTS,
                ScoreReason::LastCard,
                StatKind::Pegging,
            )
        {
            return Ok(next);
        }

        if outcome.finished {
            debug!(hand = state.hand_number, "pegging finished");
            next.pegging = None;
            next.phase = Phase::ShowNondealer;
        }
        Ok(next)
    }

    fn declare_go(&self, state: &GameState, player: PlayerId, action: &Action) -> Step {
        let pegging = pegging_of(state, action)?;
        let outcome = pegging.declare_go(player)?;

        let mut next = state.clone();
        next.pegging = Some(outcome.state);
        if let Some(scorer) = outcome.go_point {
            let won = self.award(
                &mut next,
                scorer,
                LAST_CARD_POINTS,
                ScoreReason::LastCard,
                StatKind::Pegging,
            );
            if won {
                return Ok(next);
            }
        }
        Ok(next)
    }

    /// Score pone, then dealer, then crib; one step per call.
    fn advance_show(&self, state: &GameState, action: &Action) -> Step {
        let starter = match state.phase {
            Phase::ShowNondealer | Phase::ShowDealer | Phase::ShowCrib => state
                .starter
                .ok_or(EngineError::InconsistentState("show without a starter"))?,
            _ => return Err(wrong_phase(state, action).into()),
        };

        let mut next = state.clone();
        let (owner, cards, is_crib, following) = match state.phase {
            Phase::ShowNondealer => (state.pone(), state.hand(state.pone()), false, Phase::ShowDealer),
            Phase::ShowDealer => (state.dealer, state.hand(state.dealer), false, Phase::ShowCrib),
            _ => (state.dealer, state.crib.as_slice(), true, Phase::HandComplete),
        };

        let breakdown = score_hand(cards, starter, is_crib);
        let (reason, kind) = if is_crib {
            (ScoreReason::Crib(breakdown), StatKind::Crib)
        } else {
            (ScoreReason::Hand(breakdown), StatKind::Hand)
        };
        if self.award(&mut next, owner, breakdown.total, reason, kind) {
            return Ok(next);
        }

        next.phase = following;
        if following == Phase::HandComplete {
            archive_hand(&mut next);
            debug!(
                hand = next.hand_number,
                scores = ?(next.score(PlayerId::ZERO), next.score(PlayerId::ONE)),
                "hand complete"
            );
        }
        Ok(next)
    }

    fn next_hand(&self, state: &GameState, action: &Action) -> Step {
        require_phase(state, Phase::HandComplete, action)?;

        let mut rotated = state.clone();
        rotated.dealer = state.dealer.opponent();
        rotated.hand_number = state.hand_number + 1;
        Ok(self.deal_hand(&rotated)?)
    }

    fn load_online_deal(
        &self,
        state: &GameState,
        hands: &PlayerMap<Vec<CardId>>,
        starter: CardId,
        dealer: usize,
        hand_number: u32,
    ) -> Result<GameState, EngineError> {
        let dealer = PlayerId::new(dealer).ok_or(EngineError::InvalidPlayer(dealer))?;
        if hand_number == 0 {
            return Err(EngineError::MalformedDeal("hand number must be >= 1".into()));
        }
        for (player, hand) in hands.iter() {
            if hand.len() != self.config.cards_dealt {
                return Err(EngineError::MalformedDeal(format!(
                    "{player} was dealt {} cards, expected {}",
                    hand.len(),
                    self.config.cards_dealt
                )));
            }
        }
        let mut seen = FxHashSet::default();
        for id in hands.values().flatten().chain(std::iter::once(&starter)) {
            if !seen.insert(*id) {
                return Err(EngineError::MalformedDeal(format!("{id} appears twice")));
            }
        }

        let mut next = state.clone();
        for player in PlayerId::all() {
            next.players[player].hand = hands[player].iter().map(|id| id.card()).collect();
        }
        next.deck = Deck::from_cards(vec![starter.card()]);
        next.dealer = dealer;
        next.hand_number = hand_number;
        next.winner = None;
        reset_hand(&mut next);
        Ok(next)
    }

    /// Add points, move pegs, record the event, and check for a win.
    ///
    /// Returns `true` when the award ends the game.
    fn award(
        &self,
        state: &mut GameState,
        player: PlayerId,
        points: u32,
        reason: ScoreReason,
        kind: StatKind,
    ) -> bool {
        state.hand_events.push_back(ScoreEvent {
            player,
            points,
            reason,
        });
        if points == 0 {
            return false;
        }

        let stats = &mut state.hand_stats[player];
        match kind {
            StatKind::Pegging => stats.pegging += points,
            StatKind::Hand => stats.hand += points,
            StatKind::Crib => stats.crib += points,
        }

        let win = self.config.win_score;
        let seat = &mut state.players[player];
        seat.peg_back = seat.peg_front;
        seat.score = (seat.score + points).min(win);
        seat.peg_front = seat.score;

        if seat.score < win {
            return false;
        }

        state.winner = Some(player);
        state.phase = Phase::GameOver;
        state.pegging = None;
        archive_hand(state);
        debug!(
            winner = %player,
            hand = state.hand_number,
            loser_score = state.score(player.opponent()),
            "game over"
        );
        true
    }
}

impl RulesEngine for Cribbage {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        match state.phase {
            Phase::GameStart | Phase::GameOver => Vec::new(),
            Phase::Dealing => vec![Action::Deal],
            Phase::DiscardToCrib => {
                let hand = state.hand(player);
                if hand.len() != self.config.cards_dealt {
                    return Vec::new();
                }
                let mut actions = Vec::new();
                for i in 0..hand.len() {
                    for j in i + 1..hand.len() {
                        actions.push(Action::discard(player, &[hand[i].id(), hand[j].id()]));
                    }
                }
                actions
            }
            Phase::CutStarter => vec![Action::Cut],
            Phase::Pegging => {
                let Some(pegging) = state.pegging.as_ref() else {
                    return Vec::new();
                };
                if pegging.current != player {
                    return Vec::new();
                }
                let plays: Vec<Action> = pegging
                    .legal_plays(player)
                    .into_iter()
                    .map(|c| Action::play(player, c.id()))
                    .collect();
                if plays.is_empty() {
                    vec![Action::go(player)]
                } else {
                    plays
                }
            }
            Phase::ShowNondealer | Phase::ShowDealer | Phase::ShowCrib => {
                vec![Action::AdvanceShow]
            }
            Phase::HandComplete => vec![Action::NextHand],
        }
    }

    fn apply(&self, state: &GameState, action: &Action) -> Result<Transition, EngineError> {
        match self.dispatch(state, action) {
            Ok(next) => {
                debug!(action = %action, phase = ?next.phase, "action applied");
                Ok(Transition::Applied(next))
            }
            Err(Failure::Rejected(reason)) => {
                debug!(
                    action = %action,
                    actor = ?action.actor(),
                    phase = ?state.phase,
                    reason = %reason,
                    "action rejected"
                );
                Ok(Transition::Rejected(reason))
            }
            Err(Failure::Fault(err)) => {
                warn!(action = %action, phase = ?state.phase, error = %err, "structural error");
                Err(err)
            }
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.phase != Phase::GameOver {
            return None;
        }
        let winner = state.winner?;
        Some(GameResult::new(
            winner,
            state.score(winner),
            state.score(winner.opponent()),
            &self.config,
        ))
    }
}

fn wrong_phase(state: &GameState, action: &Action) -> Rejection {
    Rejection::WrongPhase {
        action: action.name().to_string(),
        phase: state.phase,
    }
}

fn require_phase(state: &GameState, phase: Phase, action: &Action) -> Result<(), Rejection> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(wrong_phase(state, action))
    }
}

fn pegging_of<'a>(state: &'a GameState, action: &Action) -> Result<&'a PeggingState, Failure> {
    require_phase(state, Phase::Pegging, action)?;
    state
        .pegging
        .as_ref()
        .ok_or(Failure::Fault(EngineError::InconsistentState(
            "pegging phase without pegging state",
        )))
}

/// Clear per-hand fields and open discarding.
fn reset_hand(state: &mut GameState) {
    state.crib.clear();
    state.starter = None;
    state.pegging = None;
    state.hand_stats = PlayerMap::default();
    state.hand_events.clear();
    state.phase = Phase::DiscardToCrib;
}

fn archive_hand(state: &mut GameState) {
    state.hand_stats_history.push_back(HandStatsSnapshot {
        hand_number: state.hand_number,
        dealer: state.dealer,
        stats: state.hand_stats.clone(),
        starter: state.starter,
    });
}
