//! The game a room holds.
//!
//! `Table` is a tagged union over the variants so the session layer can own
//! one value per room and route `Choice`s without knowing which game runs.
//!
//! ## Example
//!
//! ```
//! use card_table::{BlackjackMove, ParticipantId, Table, TableConfig, Turn, Variant};
//!
//! let config = TableConfig::new(Variant::Blackjack).with_seed(7);
//! let seats = [ParticipantId::from("ana"), ParticipantId::from("bo")];
//! let mut table = Table::new(config, seats).unwrap();
//!
//! table.place_wager(&"ana".into(), 10).unwrap();
//! table.initial_deal().unwrap();
//!
//! while let Some(id) = table.current_turn().participant().cloned() {
//!     table.apply(&id, BlackjackMove::Stand.into()).unwrap();
//! }
//! while table.current_turn() == Turn::Dealer {
//!     table.tick().unwrap();
//! }
//!
//! assert_eq!(table.current_turn(), Turn::GameOver);
//! assert!(!table.compute_result().unwrap().winners.is_empty());
//! ```

use im::Vector;

use crate::core::{
    ActionRecord, Choice, Deck, EngineError, GameRngState, IllegalReason, Participant, ParticipantId, TableConfig, Variant,
};
use crate::games::{Blackjack, War};
use crate::rules::{GameResult, GameVariant, Turn};
use crate::view::TableView;

/// One room's game.
#[derive(Debug)]
pub enum Table {
    Blackjack(Blackjack),
    War(War),
}

/// Run the same expression against whichever variant is inside.
macro_rules! dispatch {
    ($table:expr, $game:ident => $body:expr) => {
        match $table {
            Table::Blackjack($game) => $body,
            Table::War($game) => $body,
        }
    };
}

impl Table {
    /// Open a table for `config.variant` with a shuffled deck.
    pub fn new(config: TableConfig, ids: impl IntoIterator<Item = ParticipantId>) -> Result<Self, EngineError> {
        Ok(match config.variant {
            Variant::Blackjack => Table::Blackjack(Blackjack::new(config, ids)?),
            Variant::War => Table::War(War::new(config, ids)?),
        })
    }

    /// Open a table that deals its first game from `deck`.
    pub fn with_deck(
        config: TableConfig,
        ids: impl IntoIterator<Item = ParticipantId>,
        deck: Deck,
    ) -> Result<Self, EngineError> {
        Ok(match config.variant {
            Variant::Blackjack => Table::Blackjack(Blackjack::with_deck(config, ids, deck)?),
            Variant::War => Table::War(War::with_deck(config, ids, deck)?),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn variant(&self) -> Variant {
        dispatch!(self, game => game.variant())
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        dispatch!(self, game => game.participants())
    }

    pub fn participant(&self, id: &ParticipantId) -> Result<&Participant, EngineError> {
        dispatch!(self, game => game.participant(id))
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        dispatch!(self, game => game.round())
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        dispatch!(self, game => game.history())
    }

    #[must_use]
    pub fn current_turn(&self) -> Turn {
        dispatch!(self, game => game.current_turn())
    }

    #[must_use]
    pub fn is_turn(&self, id: &ParticipantId) -> bool {
        dispatch!(self, game => game.is_turn(id))
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        dispatch!(self, game => game.is_in_progress())
    }

    #[must_use]
    pub fn display_state(&self) -> TableView {
        dispatch!(self, game => game.display_state())
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        dispatch!(self, game => game.rng_state())
    }

    /// Latest settled War round. Always `None` for Blackjack.
    #[must_use]
    pub fn round_result(&self) -> Option<GameResult> {
        match self {
            Table::Blackjack(_) => None,
            Table::War(game) => game.round_result(),
        }
    }

    #[must_use]
    pub fn as_blackjack(&self) -> Option<&Blackjack> {
        match self {
            Table::Blackjack(game) => Some(game),
            Table::War(_) => None,
        }
    }

    #[must_use]
    pub fn as_war(&self) -> Option<&War> {
        match self {
            Table::War(game) => Some(game),
            Table::Blackjack(_) => None,
        }
    }

    // === Transitions ===

    pub fn place_wager(&mut self, id: &ParticipantId, amount: u64) -> Result<(), EngineError> {
        dispatch!(self, game => game.place_wager(id, amount))
    }

    pub fn initial_deal(&mut self) -> Result<Turn, EngineError> {
        dispatch!(self, game => game.initial_deal())
    }

    pub fn advance_turn(&mut self) -> Turn {
        dispatch!(self, game => game.advance_turn())
    }

    /// Apply a choice from `id`. A choice for the other variant is rejected.
    pub fn apply(&mut self, id: &ParticipantId, choice: Choice) -> Result<Turn, EngineError> {
        match (self, choice) {
            (Table::Blackjack(game), Choice::Blackjack(mv)) => game.apply_action(id, mv),
            (Table::War(game), Choice::War(mv)) => game.apply_action(id, mv),
            _ => Err(IllegalReason::WrongVariant.into()),
        }
    }

    pub fn default_move(&mut self) -> Result<Turn, EngineError> {
        dispatch!(self, game => game.default_move())
    }

    pub fn tick(&mut self) -> Result<Turn, EngineError> {
        dispatch!(self, game => game.tick())
    }

    pub fn compute_result(&mut self) -> Result<GameResult, EngineError> {
        dispatch!(self, game => game.compute_result())
    }

    pub fn reset_for_new_round(&mut self) -> Vec<ParticipantId> {
        dispatch!(self, game => game.reset_for_new_round())
    }

    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, EngineError> {
        dispatch!(self, game => game.remove_participant(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlackjackMove, WarMove};

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    #[test]
    fn test_new_dispatches_on_variant() {
        let war = Table::new(TableConfig::new(Variant::War).with_seed(1), ids(&["a", "b"])).unwrap();
        assert_eq!(war.variant(), Variant::War);
        assert!(war.as_war().is_some());

        let blackjack = Table::new(TableConfig::new(Variant::Blackjack).with_seed(1), ids(&["a"])).unwrap();
        assert_eq!(blackjack.variant(), Variant::Blackjack);
        assert!(blackjack.as_blackjack().is_some());
        assert_eq!(blackjack.round_result(), None);
    }

    #[test]
    fn test_wrong_variant_choice() {
        let mut table = Table::new(TableConfig::new(Variant::War).with_seed(1), ids(&["a", "b"])).unwrap();
        table.initial_deal().unwrap();

        let err = table.apply(&"a".into(), BlackjackMove::Hit.into()).unwrap_err();
        assert_eq!(err, EngineError::IllegalAction(IllegalReason::WrongVariant));
        assert!(table.history().is_empty());

        table.apply(&"a".into(), WarMove::Draw.into()).unwrap();
        assert_eq!(table.history().len(), 1);
    }

    #[test]
    fn test_war_rejects_single_seat() {
        assert!(matches!(
            Table::new(TableConfig::new(Variant::War), ids(&["a"])),
            Err(EngineError::UnsupportedTableSize { count: 1, min: 2, max: 52 })
        ));
    }
}
