//! The `GameVariant` trait and the turn signal it reports.
//!
//! ## Driving a game
//!
//! The session layer owns one game per room and serializes every call into
//! it. A typical loop:
//!
//! 1. `place_wager` for each participant, then `initial_deal`.
//! 2. While `current_turn` is `Participant(id)`, wait for that participant's
//!    choice (or the timer) and call `apply_action` / `default_move`.
//! 3. While the turn is `Dealer` or `RoundOver`, call `tick` at whatever
//!    pace the presentation needs.
//! 4. On `GameOver`, call `compute_result`, then `reset_for_new_round`.
//!
//! Every call either commits completely or returns an error and leaves the
//! game untouched.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, EngineError, Participant, ParticipantId, Variant};
use crate::view::TableView;

use super::result::GameResult;

/// Who (or what) the game is waiting on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Cards have not been dealt yet.
    NotStarted,
    /// A seated participant must choose.
    Participant(ParticipantId),
    /// The dealer plays; one `tick` per decision.
    Dealer,
    /// Every live participant has moved; `tick` resolves the round.
    RoundOver,
    /// Nothing left to play; results are available.
    GameOver,
}

impl Turn {
    /// The participant holding the turn, if any.
    #[must_use]
    pub fn participant(&self) -> Option<&ParticipantId> {
        match self {
            Turn::Participant(id) => Some(id),
            _ => None,
        }
    }

    /// True when the engine, not a participant, makes the next move.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        matches!(self, Turn::Dealer | Turn::RoundOver)
    }
}

/// Common contract for a game variant.
///
/// ## Implementation Notes
///
/// - `apply_action` rejects moves from anyone but the turn holder.
/// - `current_turn` is a pure query; `advance_turn` may move the cursor
///   past participants who can no longer act.
/// - `compute_result` settles payouts once and caches the result.
pub trait GameVariant {
    /// Variant-specific move.
    type Move: Copy + std::fmt::Debug;

    /// Which game this is.
    fn variant(&self) -> Variant;

    /// Seated participants in turn order (the dealer is not included).
    fn participants(&self) -> &[Participant];

    /// Round number (0 before the first deal).
    fn round(&self) -> u32;

    /// Every committed action, oldest first.
    fn history(&self) -> &Vector<ActionRecord>;

    /// Put chips on the table before the deal.
    fn place_wager(&mut self, id: &ParticipantId, amount: u64) -> Result<(), EngineError>;

    /// Deal the opening cards.
    fn initial_deal(&mut self) -> Result<Turn, EngineError>;

    /// Who the game is waiting on.
    fn current_turn(&self) -> Turn;

    /// Skip participants who can no longer act and report the turn holder.
    fn advance_turn(&mut self) -> Turn;

    /// Apply the turn holder's choice.
    fn apply_action(&mut self, id: &ParticipantId, choice: Self::Move) -> Result<Turn, EngineError>;

    /// Apply the variant's timeout move for the turn holder.
    fn default_move(&mut self) -> Result<Turn, EngineError>;

    /// Run one automatic step (dealer decision or war tier).
    fn tick(&mut self) -> Result<Turn, EngineError>;

    /// True while the game still has moves to make.
    fn is_in_progress(&self) -> bool;

    /// Read-only projection with concealed cards redacted.
    fn display_state(&self) -> TableView;

    /// Winners of the finished game.
    fn compute_result(&mut self) -> Result<GameResult, EngineError>;

    /// Start over with a fresh deck, keeping banks. Returns the identities
    /// removed for bankruptcy.
    fn reset_for_new_round(&mut self) -> Vec<ParticipantId>;

    /// Unseat a participant (disconnect).
    fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, EngineError>;

    // === Convenience Methods ===

    /// Look up a seated participant.
    fn participant(&self, id: &ParticipantId) -> Result<&Participant, EngineError> {
        self.participants()
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| EngineError::InvalidParticipant(id.clone()))
    }

    /// True if `id` holds the turn.
    fn is_turn(&self, id: &ParticipantId) -> bool {
        self.current_turn().participant() == Some(id)
    }
}
