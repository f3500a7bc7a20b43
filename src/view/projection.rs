//! Read-only table and participant views.

use serde::{Deserialize, Serialize};

use crate::core::{Card, EngineError, Participant, ParticipantId, Role, Status, Variant};
use crate::rules::Turn;

/// A card as seen by the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    Up(Card),
    Down,
}

impl CardFace {
    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            CardFace::Up(card) => Some(card),
            CardFace::Down => None,
        }
    }
}

/// What everyone at the table can see of one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub role: Role,
    pub cards: Vec<CardFace>,
    /// Reserve size; the cards themselves are never shown.
    pub reserve: usize,
    pub wager: u64,
    pub bank: u64,
    pub status: Status,
    /// Blackjack total, withheld while any card is face down.
    pub total: Option<u32>,
}

impl ParticipantView {
    /// Project a participant, showing the hand card at index `i` only when
    /// `face_up(i)` holds.
    pub fn project(participant: &Participant, face_up: impl Fn(usize) -> bool, with_total: bool) -> Self {
        let cards: Vec<CardFace> = participant
            .hand()
            .iter()
            .enumerate()
            .map(|(i, &card)| if face_up(i) { CardFace::Up(card) } else { CardFace::Down })
            .collect();

        let concealed = cards.iter().any(|c| *c == CardFace::Down);

        Self {
            id: participant.id().clone(),
            role: participant.role(),
            cards,
            reserve: participant.reserve().len(),
            wager: participant.wager(),
            bank: participant.bank(),
            status: participant.status(),
            total: (with_total && !concealed).then(|| participant.total()),
        }
    }

    /// Cards currently face up.
    pub fn visible_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().filter_map(|c| c.card())
    }
}

/// Sanitized snapshot of a whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub variant: Variant,
    pub round: u32,
    pub turn: Turn,
    pub participants: Vec<ParticipantView>,
    pub dealer: Option<ParticipantView>,
    /// Cards at stake in the current War round.
    pub stake: usize,
    /// Cards left in the shared deck.
    pub deck: usize,
}

impl TableView {
    /// Look up a participant's view.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&ParticipantView> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Compact binary encoding for the broadcast layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
