//! Game variants.
//!
//! - `blackjack`: players against an automatic dealer, one turn each.
//! - `war`: simultaneous reveal rounds with recursive tie-breaking.

pub mod blackjack;
pub mod war;

pub use blackjack::{Blackjack, DealerPolicy, StandAt};
pub use war::{Resolution, RoundSummary, War};

use rustc_hash::FxHashSet;

use crate::core::{EngineError, Participant, ParticipantId, TableConfig};

/// Seat participants in the given order with the configured starting bank.
pub(crate) fn seat(
    config: &TableConfig,
    ids: impl IntoIterator<Item = ParticipantId>,
) -> Result<Vec<Participant>, EngineError> {
    config.validate()?;
    let ids: Vec<ParticipantId> = ids.into_iter().collect();
    config.check_table_size(ids.len())?;

    let house = ParticipantId::dealer();
    let mut seen = FxHashSet::default();
    for id in &ids {
        if *id == house {
            return Err(EngineError::ReservedParticipant(house));
        }
        if !seen.insert(id) {
            return Err(EngineError::DuplicateParticipant(id.clone()));
        }
    }

    Ok(ids
        .into_iter()
        .map(|id| Participant::new(id, config.starting_bank))
        .collect())
}

/// Position of a seated participant.
pub(crate) fn position(participants: &[Participant], id: &ParticipantId) -> Result<usize, EngineError> {
    participants
        .iter()
        .position(|p| p.id() == id)
        .ok_or_else(|| EngineError::InvalidParticipant(id.clone()))
}

/// Unseat everyone with an empty bank, returning their identities.
pub(crate) fn remove_bankrupt(participants: &mut Vec<Participant>) -> Vec<ParticipantId> {
    let removed: Vec<ParticipantId> = participants
        .iter()
        .filter(|p| p.is_bankrupt())
        .map(|p| p.id().clone())
        .collect();
    participants.retain(|p| !p.is_bankrupt());
    removed
}
