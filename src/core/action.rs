//! Player choices and the action log.
//!
//! Each variant has its own move enum. [`Choice`] is the tagged form the
//! table layer accepts, and [`ActionRecord`] is what lands in a game's
//! history once the move has been committed.

use serde::{Deserialize, Serialize};

use super::participant::ParticipantId;

/// Blackjack decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlackjackMove {
    /// Draw one card.
    Hit,
    /// Keep the current hand.
    Stand,
}

/// War decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarMove {
    /// Reveal the top reserve card.
    Draw,
    /// Sit out this round.
    Forfeit,
}

/// A move for either variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Blackjack(BlackjackMove),
    War(WarMove),
}

impl From<BlackjackMove> for Choice {
    fn from(mv: BlackjackMove) -> Self {
        Choice::Blackjack(mv)
    }
}

impl From<WarMove> for Choice {
    fn from(mv: WarMove) -> Self {
        Choice::War(mv)
    }
}

/// A committed action.
///
/// `timed_out` marks moves the engine applied on the participant's behalf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who acted.
    pub participant: ParticipantId,

    /// What they chose.
    pub choice: Choice,

    /// Round number when the action was taken (starts at 1).
    pub round: u32,

    /// Sequence number within the game.
    pub sequence: u32,

    pub timed_out: bool,
}

impl ActionRecord {
    #[must_use]
    pub fn new(participant: ParticipantId, choice: Choice, round: u32, sequence: u32) -> Self {
        Self {
            participant,
            choice,
            round,
            sequence,
            timed_out: false,
        }
    }

    /// Mark as applied by the engine after a timeout.
    #[must_use]
    pub fn as_timeout(mut self) -> Self {
        self.timed_out = true;
        self
    }
}
