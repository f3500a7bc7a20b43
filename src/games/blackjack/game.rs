//! Blackjack game state and the `GameVariant` implementation.

use std::fmt;

use im::Vector;
use tracing::{debug, info, warn};

use crate::core::{
    ActionRecord, BlackjackMove, Choice, Deck, EngineError, GameRng, GameRngState, IllegalReason, Participant,
    ParticipantId, Pile, Status, TableConfig, Variant, BLACKJACK,
};
use crate::games::{position, remove_bankrupt, seat};
use crate::rules::{GameResult, GameVariant, Turn, Winner, WINNERS_PROMPT};
use crate::view::{ParticipantView, TableView};

use super::policy::{DealerPolicy, StandAt};

/// Hand index of the dealer's concealed card.
const HOLE_CARD: usize = 1;

/// Where the table is in a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Wagers are open; no cards dealt.
    Betting,
    /// Seated participants act in order.
    PlayerTurns,
    /// The dealer plays out its hand.
    DealerTurn,
    /// The hand is over.
    Complete,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Betting => "taking bets",
            Phase::PlayerTurns => "in player turns",
            Phase::DealerTurn => "in the dealer's turn",
            Phase::Complete => "settled",
        }
    }
}

/// A Blackjack table: seated players, a dealer, and one deck.
pub struct Blackjack {
    config: TableConfig,
    rng: GameRng,
    deck: Deck,
    participants: Vec<Participant>,
    dealer: Participant,
    policy: Box<dyn DealerPolicy>,
    phase: Phase,
    /// Index of the participant whose turn it is (or past the end).
    cursor: usize,
    round: u32,
    history: Vector<ActionRecord>,
    result: Option<GameResult>,
}

impl Blackjack {
    /// Seat `ids` in order with a freshly shuffled deck.
    pub fn new(config: TableConfig, ids: impl IntoIterator<Item = ParticipantId>) -> Result<Self, EngineError> {
        let mut rng = config.rng();
        let deck = Deck::shuffled(&mut rng.fork());
        Self::build(config, ids, rng, deck)
    }

    /// Seat `ids` and deal the first hand from a caller-supplied deck.
    ///
    /// Later hands still use shuffled decks from the configured RNG.
    pub fn with_deck(
        config: TableConfig,
        ids: impl IntoIterator<Item = ParticipantId>,
        deck: Deck,
    ) -> Result<Self, EngineError> {
        let rng = config.rng();
        Self::build(config, ids, rng, deck)
    }

    fn build(
        mut config: TableConfig,
        ids: impl IntoIterator<Item = ParticipantId>,
        rng: GameRng,
        deck: Deck,
    ) -> Result<Self, EngineError> {
        config.variant = Variant::Blackjack;
        let participants = seat(&config, ids)?;
        let policy = Box::new(StandAt(config.dealer_stands_at));

        info!(seats = participants.len(), seed = rng.seed(), "blackjack table opened");

        Ok(Self {
            config,
            rng,
            deck,
            participants,
            dealer: Participant::dealer(),
            policy,
            phase: Phase::Betting,
            cursor: 0,
            round: 0,
            history: Vector::new(),
            result: None,
        })
    }

    /// Replace the dealer's play policy.
    #[must_use]
    pub fn with_dealer_policy<P: DealerPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Checkpoint of the shuffle stream that deals the next hand's deck.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Dealer ===

    /// Make one dealer decision: draw a card or stand.
    pub fn play_dealer_step(&mut self) -> Result<Turn, EngineError> {
        if self.phase != Phase::DealerTurn {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }

        if self.policy.should_draw(self.dealer.hand()) {
            let card = self.deck.deal()?;
            self.dealer.add_card(card);
            let total = self.dealer.total();
            debug!(card = %card, total, "dealer draws");
            if total > BLACKJACK {
                self.dealer.set_status(Status::Busted);
                info!(total, round = self.round, "dealer busts");
            }
        } else {
            self.dealer.set_status(Status::Standing);
            debug!(total = self.dealer.total(), "dealer stands");
        }

        Ok(self.advance_turn())
    }

    /// Play the dealer's hand to completion.
    pub fn play_dealer(&mut self) -> Result<Turn, EngineError> {
        let mut turn = self.play_dealer_step()?;
        while turn == Turn::Dealer {
            turn = self.play_dealer_step()?;
        }
        Ok(turn)
    }

    // === Internals ===

    fn commit(&mut self, idx: usize, mv: BlackjackMove, timed_out: bool) -> Result<Turn, EngineError> {
        match mv {
            BlackjackMove::Hit => {
                let card = self.deck.deal()?;
                let participant = &mut self.participants[idx];
                participant.add_card(card);

                let total = participant.total();
                if total == BLACKJACK {
                    participant.set_status(Status::Blackjack);
                } else if total > BLACKJACK {
                    participant.set_status(Status::Busted);
                }
                debug!(participant = %participant.id(), card = %card, total, "hit");
            }
            BlackjackMove::Stand => {
                let participant = &mut self.participants[idx];
                participant.set_status(Status::Standing);
                debug!(participant = %participant.id(), total = participant.total(), timed_out, "stand");
            }
        }

        let mut record = ActionRecord::new(
            self.participants[idx].id().clone(),
            Choice::Blackjack(mv),
            self.round,
            self.history.len() as u32,
        );
        if timed_out {
            record = record.as_timeout();
        }
        self.history.push_back(record);

        Ok(self.advance_turn())
    }
}

impl fmt::Debug for Blackjack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blackjack")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("cursor", &self.cursor)
            .field("participants", &self.participants)
            .field("dealer", &self.dealer)
            .field("deck", &self.deck.len())
            .finish_non_exhaustive()
    }
}

impl GameVariant for Blackjack {
    type Move = BlackjackMove;

    fn variant(&self) -> Variant {
        Variant::Blackjack
    }

    fn participants(&self) -> &[Participant] {
        &self.participants
    }

    fn round(&self) -> u32 {
        self.round
    }

    fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    fn place_wager(&mut self, id: &ParticipantId, amount: u64) -> Result<(), EngineError> {
        if self.phase != Phase::Betting {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }
        let idx = position(&self.participants, id)?;
        self.participants[idx].place_wager(amount)?;
        debug!(participant = %id, amount, "wager placed");
        Ok(())
    }

    /// Two cards to every seat and the dealer, one pass at a time.
    fn initial_deal(&mut self) -> Result<Turn, EngineError> {
        if self.phase != Phase::Betting {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }
        if self.deck.len() < 2 * (self.participants.len() + 1) {
            return Err(EngineError::EmptyResource(Pile::Deck));
        }

        for _ in 0..2 {
            for participant in &mut self.participants {
                participant.add_card(self.deck.deal()?);
            }
            self.dealer.add_card(self.deck.deal()?);
        }

        for participant in &mut self.participants {
            if participant.total() == BLACKJACK {
                participant.set_status(Status::Blackjack);
                info!(participant = %participant.id(), "natural blackjack");
            }
        }

        self.round += 1;
        self.phase = Phase::PlayerTurns;
        self.cursor = 0;
        debug!(round = self.round, deck = self.deck.len(), "initial deal complete");

        Ok(self.advance_turn())
    }

    fn current_turn(&self) -> Turn {
        match self.phase {
            Phase::Betting => Turn::NotStarted,
            Phase::PlayerTurns => self
                .participants
                .iter()
                .skip(self.cursor)
                .find(|p| p.status().is_playing())
                .map_or(Turn::Dealer, |p| Turn::Participant(p.id().clone())),
            Phase::DealerTurn => Turn::Dealer,
            Phase::Complete => Turn::GameOver,
        }
    }

    fn advance_turn(&mut self) -> Turn {
        if self.phase == Phase::PlayerTurns {
            while matches!(self.participants.get(self.cursor), Some(p) if !p.status().is_playing()) {
                self.cursor += 1;
            }
            if self.cursor >= self.participants.len() {
                self.phase = Phase::DealerTurn;
                debug!(total = self.dealer.total(), "dealer reveals hole card");
            }
        }

        if self.phase == Phase::DealerTurn && !self.dealer.status().is_playing() {
            self.phase = Phase::Complete;
            info!(round = self.round, dealer = self.dealer.total(), "hand complete");
        }

        self.current_turn()
    }

    fn apply_action(&mut self, id: &ParticipantId, choice: BlackjackMove) -> Result<Turn, EngineError> {
        if self.phase != Phase::PlayerTurns {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }
        let idx = position(&self.participants, id)?;

        let status = self.participants[idx].status();
        if !status.is_playing() {
            return Err(IllegalReason::TerminalStatus { id: id.clone(), status }.into());
        }
        if !self.is_turn(id) {
            warn!(participant = %id, "out-of-turn action rejected");
            return Err(IllegalReason::NotYourTurn(id.clone()).into());
        }

        self.commit(idx, choice, false)
    }

    /// A participant who runs out the clock stands.
    fn default_move(&mut self) -> Result<Turn, EngineError> {
        match self.current_turn() {
            Turn::Participant(id) => {
                let idx = position(&self.participants, &id)?;
                self.commit(idx, BlackjackMove::Stand, true)
            }
            _ => Err(IllegalReason::NoTurnHolder.into()),
        }
    }

    fn tick(&mut self) -> Result<Turn, EngineError> {
        self.play_dealer_step()
    }

    fn is_in_progress(&self) -> bool {
        self.dealer.status().is_playing() || self.participants.iter().any(|p| p.status().is_playing())
    }

    fn display_state(&self) -> TableView {
        let reveal_hole = matches!(self.phase, Phase::DealerTurn | Phase::Complete);

        TableView {
            variant: Variant::Blackjack,
            round: self.round,
            turn: self.current_turn(),
            participants: self
                .participants
                .iter()
                .map(|p| ParticipantView::project(p, |_| true, true))
                .collect(),
            dealer: Some(ParticipantView::project(
                &self.dealer,
                |i| reveal_hole || i != HOLE_CARD,
                true,
            )),
            stake: 0,
            deck: self.deck.len(),
        }
    }

    /// Settle the hand against the dealer. Ties lose.
    fn compute_result(&mut self) -> Result<GameResult, EngineError> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }
        if self.phase != Phase::Complete {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }

        let dealer_busted = self.dealer.status() == Status::Busted;
        let dealer_total = self.dealer.total();

        let mut winners: Vec<Winner> = self
            .participants
            .iter_mut()
            .filter(|p| p.status() != Status::Busted)
            .filter(|p| dealer_busted || p.total() > dealer_total)
            .map(Winner::paid)
            .collect();

        if winners.is_empty() {
            winners.push(Winner::unpaid(&self.dealer));
        }

        info!(
            round = self.round,
            dealer_total,
            dealer_busted,
            winners = winners.len(),
            "blackjack hand settled"
        );

        let result = GameResult::new(WINNERS_PROMPT, winners);
        self.result = Some(result.clone());
        Ok(result)
    }

    fn reset_for_new_round(&mut self) -> Vec<ParticipantId> {
        if self.result.is_none() {
            for participant in &mut self.participants {
                let wager = participant.wager();
                participant.credit(wager);
            }
        }
        for participant in &mut self.participants {
            participant.reset_transient();
        }

        let removed = remove_bankrupt(&mut self.participants);
        for id in &removed {
            info!(participant = %id, "unseated for bankruptcy");
        }

        self.dealer = Participant::dealer();
        self.deck = Deck::shuffled(&mut self.rng.fork());
        self.phase = Phase::Betting;
        self.cursor = 0;
        self.result = None;

        removed
    }

    fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, EngineError> {
        let idx = position(&self.participants, id)?;
        let removed = self.participants.remove(idx);
        if idx < self.cursor {
            self.cursor -= 1;
        }
        info!(participant = %id, phase = self.phase.name(), "participant removed");

        if self.phase == Phase::PlayerTurns {
            self.advance_turn();
        }
        Ok(removed)
    }
}
