//! Result shapes handed to the broadcast layer.

use serde::{Deserialize, Serialize};

use crate::core::{Participant, ParticipantId, Role};

/// Label for end-of-game results.
pub const WINNERS_PROMPT: &str = "👑 Winners 👑";

/// Label for a settled War round.
pub const ROUND_WINNER_PROMPT: &str = "👑 Round winner 👑";

/// One entry in a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub id: ParticipantId,
    pub role: Role,
    /// Amount credited to the winner's bank (0 for the house and for rounds).
    pub payout: u64,
}

impl Winner {
    /// Credit `wager × 2` to a participant and describe the win.
    pub(crate) fn paid(participant: &mut Participant) -> Self {
        let payout = participant.wager().saturating_mul(2);
        participant.credit(payout);
        Self {
            id: participant.id().clone(),
            role: participant.role(),
            payout,
        }
    }

    /// A win that moves no chips.
    pub(crate) fn unpaid(participant: &Participant) -> Self {
        Self {
            id: participant.id().clone(),
            role: participant.role(),
            payout: 0,
        }
    }
}

/// Display label plus ordered winners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub prompt: String,
    pub winners: Vec<Winner>,
}

impl GameResult {
    #[must_use]
    pub fn new(prompt: impl Into<String>, winners: Vec<Winner>) -> Self {
        Self {
            prompt: prompt.into(),
            winners,
        }
    }

    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, id: &ParticipantId) -> bool {
        self.winners.iter().any(|w| &w.id == id)
    }

    /// Winner identities, in order.
    pub fn winner_ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.winners.iter().map(|w| &w.id)
    }

    /// True when the house took the game.
    #[must_use]
    pub fn house_won(&self) -> bool {
        self.winners.iter().any(|w| w.role == Role::Dealer)
    }
}
