//! War game state and the `GameVariant` implementation.

use std::mem;

use im::Vector;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::core::{
    ActionRecord, Card, Choice, Deck, EngineError, GameRng, GameRngState, IllegalReason, Participant, ParticipantId,
    Status, TableConfig, Variant, WarMove,
};
use crate::games::{position, remove_bankrupt, seat};
use crate::rules::{GameResult, GameVariant, Turn, Winner, WINNERS_PROMPT};
use crate::view::{ParticipantView, TableView};

use super::round::{Resolution, RoundSummary};

/// Where the table is in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Wagers are open; reserves not dealt.
    Dealing,
    /// Live participants reveal one card each.
    Drawing,
    /// Everyone has moved; `tick` compares and escalates.
    Resolving,
    /// At most one participant holds cards.
    Finished,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Dealing => "taking bets",
            Phase::Drawing => "drawing",
            Phase::Resolving => "resolving a round",
            Phase::Finished => "finished",
        }
    }
}

/// A War table.
#[derive(Clone, Debug)]
pub struct War {
    config: TableConfig,
    rng: GameRng,
    /// Undealt remainder after the split.
    deck: Deck,
    participants: Vec<Participant>,
    /// Participants who already moved this round.
    moved: FxHashSet<ParticipantId>,
    phase: Phase,
    /// Every card revealed or committed this round.
    stake: Vec<Card>,
    /// Leaders still contesting the current war tier.
    tied: Vec<ParticipantId>,
    tier: u32,
    round: u32,
    revealed: Vec<(ParticipantId, Card)>,
    round_eliminated: Vec<ParticipantId>,
    /// Stake cards lost to unclaimed rounds this game.
    discarded: usize,
    history: Vector<ActionRecord>,
    last_round: Option<RoundSummary>,
    result: Option<GameResult>,
}

impl War {
    /// Seat `ids` in order with a freshly shuffled deck.
    pub fn new(config: TableConfig, ids: impl IntoIterator<Item = ParticipantId>) -> Result<Self, EngineError> {
        let mut rng = config.rng();
        let deck = Deck::shuffled(&mut rng.fork());
        Self::build(config, ids, rng, deck)
    }

    /// Seat `ids` and split a caller-supplied deck for the first game.
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
        config.variant = Variant::War;
        let participants = seat(&config, ids)?;

        info!(seats = participants.len(), seed = rng.seed(), "war table opened");

        Ok(Self {
            config,
            rng,
            deck,
            participants,
            moved: FxHashSet::default(),
            phase: Phase::Dealing,
            stake: Vec::new(),
            tied: Vec::new(),
            tier: 0,
            round: 0,
            revealed: Vec::new(),
            round_eliminated: Vec::new(),
            discarded: 0,
            history: Vector::new(),
            last_round: None,
            result: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cards left undealt after the split.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Checkpoint of the stream behind reshuffles and the next game's deck.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn stake(&self) -> &[Card] {
        &self.stake
    }

    /// Leaders contesting the current war tier.
    #[must_use]
    pub fn tied(&self) -> &[ParticipantId] {
        &self.tied
    }

    /// Stake cards nobody collected since the last reset.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    #[must_use]
    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// The most recent settled round as a "round winner" result.
    #[must_use]
    pub fn round_result(&self) -> Option<GameResult> {
        self.last_round.as_ref().map(RoundSummary::to_result)
    }

    // === Resolution ===

    /// Compare the current contenders once.
    ///
    /// A tie escalates to a war tier and returns `Resolution::War`; call
    /// again to compare the committed cards. Otherwise the round settles.
    pub fn resolve_step(&mut self) -> Result<Resolution, EngineError> {
        if self.phase != Phase::Resolving {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }

        if self.tier == 0 {
            self.revealed = self
                .participants
                .iter()
                .filter(|p| p.status().is_playing())
                .filter_map(|p| p.revealed().map(|card| (p.id().clone(), card)))
                .collect();
        }

        let contenders: Vec<(usize, u32)> = self
            .participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.status().is_playing())
            .filter(|(_, p)| self.tier == 0 || self.tied.contains(p.id()))
            .filter_map(|(i, p)| p.revealed().map(|card| (i, card.war_value())))
            .collect();

        let best = contenders.iter().map(|&(_, value)| value).max();
        let leaders: Vec<usize> = contenders
            .iter()
            .filter(|&&(_, value)| Some(value) == best)
            .map(|&(i, _)| i)
            .collect();

        if leaders.len() > 1 {
            return Ok(self.escalate(&leaders));
        }

        Ok(Resolution::Settled(self.settle(leaders.first().copied())))
    }

    /// Run resolution steps until the round settles.
    pub fn resolve_round(&mut self) -> Result<RoundSummary, EngineError> {
        loop {
            if let Resolution::Settled(summary) = self.resolve_step()? {
                return Ok(summary);
            }
        }
    }

    fn escalate(&mut self, leaders: &[usize]) -> Resolution {
        self.tier += 1;
        self.tied.clear();
        let commit = self.config.war_commit;

        for &i in leaders {
            let participant = &mut self.participants[i];
            match participant.take_from_reserve(commit) {
                Some(cards) => {
                    for &card in &cards {
                        participant.add_card(card);
                    }
                    self.stake.extend(cards);
                    self.tied.push(participant.id().clone());
                }
                None => {
                    let forfeited = participant.drain_reserve();
                    info!(
                        participant = %participant.id(),
                        forfeited = forfeited.len(),
                        "eliminated going to war"
                    );
                    self.stake.extend(forfeited);
                    participant.set_status(Status::Eliminated);
                    self.round_eliminated.push(participant.id().clone());
                }
            }
        }

        info!(round = self.round, tier = self.tier, tied = ?self.tied, stake = self.stake.len(), "war");
        Resolution::War {
            tier: self.tier,
            tied: self.tied.clone(),
        }
    }

    fn settle(&mut self, winner: Option<usize>) -> RoundSummary {
        let stake = mem::take(&mut self.stake);
        let stake_size = stake.len();
        let mut discarded = 0;

        let winner = match winner {
            Some(i) => {
                let participant = &mut self.participants[i];
                participant.add_to_reserve(stake);
                if self.config.reshuffle_winnings {
                    self.rng.shuffle(participant.reserve_mut().make_contiguous());
                }
                Some(participant.id().clone())
            }
            None => {
                discarded = stake_size;
                if discarded > 0 {
                    warn!(round = self.round, discarded, "no contender left; stake discarded");
                }
                None
            }
        };
        self.discarded += discarded;

        for participant in &mut self.participants {
            participant.clear_hand();
            if participant.status() == Status::Busted {
                participant.set_status(Status::Playing);
            }
            if participant.status().is_playing() && !participant.has_cards() {
                participant.set_status(Status::Eliminated);
                info!(participant = %participant.id(), "out of cards");
                self.round_eliminated.push(participant.id().clone());
            }
        }

        self.moved.clear();
        self.tied.clear();

        let summary = RoundSummary {
            round: self.round,
            winner,
            revealed: mem::take(&mut self.revealed),
            wars: mem::take(&mut self.tier),
            stake: stake_size,
            eliminated: mem::take(&mut self.round_eliminated),
            discarded,
        };
        info!(
            round = summary.round,
            winner = ?summary.winner,
            wars = summary.wars,
            stake = summary.stake,
            "round settled"
        );

        if self.is_in_progress() {
            self.round += 1;
            self.phase = Phase::Drawing;
        } else {
            self.phase = Phase::Finished;
            info!(rounds = self.round, "war game over");
        }

        self.last_round = Some(summary.clone());
        summary
    }

    fn record(&mut self, idx: usize, mv: WarMove, timed_out: bool) {
        let mut record = ActionRecord::new(
            self.participants[idx].id().clone(),
            Choice::War(mv),
            self.round,
            self.history.len() as u32,
        );
        if timed_out {
            record = record.as_timeout();
        }
        self.history.push_back(record);
    }

    fn commit(&mut self, idx: usize, mv: WarMove, timed_out: bool) -> Result<Turn, EngineError> {
        let participant = &mut self.participants[idx];
        match mv {
            WarMove::Draw => {
                let card = participant.draw_from_reserve()?;
                participant.add_card(card);
                self.stake.push(card);
                debug!(participant = %participant.id(), card = %card, timed_out, "draw");
            }
            WarMove::Forfeit => {
                participant.set_status(Status::Busted);
                debug!(participant = %participant.id(), "forfeit");
            }
        }

        self.moved.insert(participant.id().clone());
        self.record(idx, mv, timed_out);
        Ok(self.advance_turn())
    }
}

impl GameVariant for War {
    type Move = WarMove;

    fn variant(&self) -> Variant {
        Variant::War
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
        if self.phase != Phase::Dealing {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }
        let idx = position(&self.participants, id)?;
        self.participants[idx].place_wager(amount)?;
        debug!(participant = %id, amount, "wager placed");
        Ok(())
    }

    /// Split the deck round-robin into equal reserves.
    ///
    /// The `len % seats` leftover cards stay in the deck.
    fn initial_deal(&mut self) -> Result<Turn, EngineError> {
        if self.phase != Phase::Dealing {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }
        self.config.check_table_size(self.participants.len())?;

        let share = self.deck.len() / self.participants.len();
        for _ in 0..share {
            for participant in &mut self.participants {
                participant.add_to_reserve([self.deck.deal()?]);
            }
        }

        for participant in &mut self.participants {
            if !participant.has_cards() {
                participant.set_status(Status::Eliminated);
            }
        }

        debug!(share, leftover = self.deck.len(), "reserves dealt");

        self.round = 1;
        self.phase = if self.is_in_progress() {
            Phase::Drawing
        } else {
            Phase::Finished
        };
        Ok(self.advance_turn())
    }

    fn current_turn(&self) -> Turn {
        match self.phase {
            Phase::Dealing => Turn::NotStarted,
            Phase::Drawing => self
                .participants
                .iter()
                .find(|p| p.status().is_playing() && !self.moved.contains(p.id()))
                .map_or(Turn::RoundOver, |p| Turn::Participant(p.id().clone())),
            Phase::Resolving => Turn::RoundOver,
            Phase::Finished => Turn::GameOver,
        }
    }

    fn advance_turn(&mut self) -> Turn {
        if self.phase == Phase::Drawing {
            let waiting = self
                .participants
                .iter()
                .any(|p| p.status().is_playing() && !self.moved.contains(p.id()));
            if !waiting {
                self.phase = Phase::Resolving;
                debug!(round = self.round, stake = self.stake.len(), "all moves in");
            }
        }
        self.current_turn()
    }

    fn apply_action(&mut self, id: &ParticipantId, choice: WarMove) -> Result<Turn, EngineError> {
        if self.phase != Phase::Drawing {
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

    /// A participant who runs out the clock draws.
    fn default_move(&mut self) -> Result<Turn, EngineError> {
        match self.current_turn() {
            Turn::Participant(id) => {
                let idx = position(&self.participants, &id)?;
                self.commit(idx, WarMove::Draw, true)
            }
            _ => Err(IllegalReason::NoTurnHolder.into()),
        }
    }

    fn tick(&mut self) -> Result<Turn, EngineError> {
        self.resolve_step()?;
        Ok(self.current_turn())
    }

    fn is_in_progress(&self) -> bool {
        self.participants
            .iter()
            .filter(|p| p.status() != Status::Eliminated)
            .count()
            > 1
    }

    /// Hands are public; reserves show only their size.
    fn display_state(&self) -> TableView {
        TableView {
            variant: Variant::War,
            round: self.round,
            turn: self.current_turn(),
            participants: self
                .participants
                .iter()
                .map(|p| ParticipantView::project(p, |_| true, false))
                .collect(),
            dealer: None,
            stake: self.stake.len(),
            deck: self.deck.len(),
        }
    }

    /// The last participant holding cards wins and is paid `wager × 2`.
    fn compute_result(&mut self) -> Result<GameResult, EngineError> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }
        if self.phase != Phase::Finished {
            return Err(EngineError::wrong_phase(self.phase.name()));
        }

        let winners: Vec<Winner> = self
            .participants
            .iter_mut()
            .filter(|p| p.status() != Status::Eliminated)
            .map(Winner::paid)
            .collect();
        if winners.is_empty() {
            warn!(rounds = self.round, "war ended with no survivor");
        }
        info!(winners = winners.len(), rounds = self.round, "war game settled");

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

        self.deck = Deck::shuffled(&mut self.rng.fork());
        self.moved.clear();
        self.stake.clear();
        self.tied.clear();
        self.tier = 0;
        self.revealed.clear();
        self.round_eliminated.clear();
        self.discarded = 0;
        self.phase = Phase::Dealing;
        self.last_round = None;
        self.result = None;

        removed
    }

    /// Unseat a participant. Cards they already put at stake stay there.
    fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, EngineError> {
        let idx = position(&self.participants, id)?;
        let removed = self.participants.remove(idx);
        self.moved.remove(id);
        self.tied.retain(|t| t != id);
        info!(participant = %id, reserve = removed.reserve().len(), "participant removed");

        if matches!(self.phase, Phase::Drawing | Phase::Resolving) && !self.is_in_progress() {
            self.phase = Phase::Finished;
        } else if self.phase == Phase::Drawing {
            self.advance_turn();
        }
        Ok(removed)
    }
}
