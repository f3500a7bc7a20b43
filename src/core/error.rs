//! Engine error taxonomy.
//!
//! Every rejected call leaves the game untouched. Errors are local to one
//! table: the caller can retry with corrected input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::participant::{ParticipantId, Status};

/// A card pile that can run dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pile {
    /// The shared deck.
    Deck,
    /// A participant's reserve (War draw pile).
    Reserve,
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pile::Deck => write!(f, "deck"),
            Pile::Reserve => write!(f, "reserve"),
        }
    }
}

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("it is not {0}'s turn")]
    NotYourTurn(ParticipantId),

    #[error("{id} is {status:?} and cannot act")]
    TerminalStatus { id: ParticipantId, status: Status },

    #[error("not allowed while the table is {0}")]
    WrongPhase(&'static str),

    #[error("choice is for a different game variant")]
    WrongVariant,

    #[error("no participant holds the turn")]
    NoTurnHolder,
}

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalReason),

    #[error("cannot draw from an empty {0}")]
    EmptyResource(Pile),

    #[error("unknown participant {0}")]
    InvalidParticipant(ParticipantId),

    #[error("participant {0} is listed twice")]
    DuplicateParticipant(ParticipantId),

    #[error("participant id {0} is reserved for the house")]
    ReservedParticipant(ParticipantId),

    #[error("invalid table config: {0}")]
    InvalidConfig(&'static str),

    #[error("unsupported table size {count} (supported {min}..={max})")]
    UnsupportedTableSize { count: usize, min: usize, max: usize },

    #[error("wager {wager} exceeds {id}'s bank of {bank}")]
    InsufficientBank { id: ParticipantId, wager: u64, bank: u64 },

    #[error("snapshot encoding failed: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Shorthand for a phase violation.
    pub(crate) fn wrong_phase(phase: &'static str) -> Self {
        EngineError::IllegalAction(IllegalReason::WrongPhase(phase))
    }

    /// True for rejections caused by acting at the wrong time.
    #[must_use]
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, EngineError::IllegalAction(_))
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}
