//! Per-round resolution reports.

use serde::{Deserialize, Serialize};

use crate::core::{Card, ParticipantId, Role};
use crate::rules::{GameResult, Winner, ROUND_WINNER_PROMPT};

/// Outcome of one resolution step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Leaders tied and committed cards; another step compares them.
    War { tier: u32, tied: Vec<ParticipantId> },
    /// The round is over.
    Settled(RoundSummary),
}

impl Resolution {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Resolution::Settled(_))
    }
}

/// What happened in a settled round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    /// Who collected the stake. `None` when every contender was eliminated.
    pub winner: Option<ParticipantId>,
    /// Opening card of everyone who drew.
    pub revealed: Vec<(ParticipantId, Card)>,
    /// Number of war tiers fought.
    pub wars: u32,
    /// Cards at stake when the round settled.
    pub stake: usize,
    /// Participants eliminated during this round.
    pub eliminated: Vec<ParticipantId>,
    /// Stake cards nobody collected.
    pub discarded: usize,
}

impl RoundSummary {
    /// Report the round in the shared result shape.
    #[must_use]
    pub fn to_result(&self) -> GameResult {
        let winners = self
            .winner
            .iter()
            .map(|id| Winner {
                id: id.clone(),
                role: Role::Player,
                payout: 0,
            })
            .collect();
        GameResult::new(ROUND_WINNER_PROMPT, winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_result() {
        let summary = RoundSummary {
            round: 2,
            winner: Some("ana".into()),
            revealed: vec![("ana".into(), "KH".parse().unwrap()), ("bo".into(), "3C".parse().unwrap())],
            wars: 0,
            stake: 2,
            eliminated: vec![],
            discarded: 0,
        };

        let result = summary.to_result();
        assert_eq!(result.prompt, ROUND_WINNER_PROMPT);
        assert!(result.is_winner(&"ana".into()));
        assert_eq!(result.winners[0].payout, 0);
    }

    #[test]
    fn test_unclaimed_round_has_no_winner() {
        let summary = RoundSummary {
            round: 5,
            winner: None,
            revealed: vec![],
            wars: 1,
            stake: 10,
            eliminated: vec!["ana".into(), "bo".into()],
            discarded: 10,
        };

        assert!(summary.to_result().winners.is_empty());
    }
}
