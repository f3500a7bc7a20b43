//! Table configuration.
//!
//! The session layer builds a `TableConfig` when a room fills, either with
//! the builder methods or by deserializing the room document:
//!
//! ```
//! use card_table::core::{TableConfig, Variant};
//!
//! let config = TableConfig::new(Variant::Blackjack)
//!     .with_starting_bank(500)
//!     .with_seed(7);
//!
//! assert_eq!(config.dealer_stands_at, 17);
//! assert_eq!(config.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::rng::GameRng;

/// Game variant played at a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Blackjack,
    War,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Blackjack => write!(f, "Blackjack"),
            Variant::War => write!(f, "War"),
        }
    }
}

/// Smallest War table.
pub const MIN_WAR_PLAYERS: usize = 2;

/// Largest War table: everyone still gets one card.
pub const MAX_WAR_PLAYERS: usize = 52;

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Which game the table runs.
    pub variant: Variant,

    /// Bank each participant starts with.
    pub starting_bank: u64,

    /// Fixed shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Dealer draws below this total and stands at or above it.
    pub dealer_stands_at: u32,

    /// Largest Blackjack table. A single deck cannot be guaranteed to cover
    /// bigger tables.
    pub max_blackjack_seats: usize,

    /// Cards each tied participant commits per war tier. The last one
    /// committed is compared.
    pub war_commit: usize,

    /// Shuffle a War reserve after it collects a stake.
    pub reshuffle_winnings: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Blackjack,
            starting_bank: 100,
            seed: None,
            dealer_stands_at: 17,
            max_blackjack_seats: 7,
            war_commit: 4,
            reshuffle_winnings: false,
        }
    }
}

impl TableConfig {
    /// Default configuration for a variant.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_starting_bank(mut self, bank: u64) -> Self {
        self.starting_bank = bank;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_dealer_stands_at(mut self, total: u32) -> Self {
        self.dealer_stands_at = total;
        self
    }

    #[must_use]
    pub fn with_max_blackjack_seats(mut self, seats: usize) -> Self {
        self.max_blackjack_seats = seats;
        self
    }

    #[must_use]
    pub fn with_war_commit(mut self, cards: usize) -> Self {
        self.war_commit = cards.max(1);
        self
    }

    #[must_use]
    pub fn with_reshuffled_winnings(mut self) -> Self {
        self.reshuffle_winnings = true;
        self
    }

    /// RNG for a new table: seeded if configured, from entropy otherwise.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        self.seed.map_or_else(GameRng::from_entropy, GameRng::new)
    }

    /// Seat range supported by the configured variant.
    #[must_use]
    pub fn seat_range(&self) -> (usize, usize) {
        match self.variant {
            Variant::Blackjack => (1, self.max_blackjack_seats),
            Variant::War => (MIN_WAR_PLAYERS, MAX_WAR_PLAYERS),
        }
    }

    /// Reject settings the variant cannot play with.
    ///
    /// Deserialized documents skip the builder clamps, so tables call this
    /// before seating anyone.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.variant == Variant::War && self.war_commit == 0 {
            return Err(EngineError::InvalidConfig("war_commit must be at least 1"));
        }
        Ok(())
    }

    /// Reject table sizes the variant cannot deal for.
    pub fn check_table_size(&self, count: usize) -> Result<(), EngineError> {
        let (min, max) = self.seat_range();
        if (min..=max).contains(&count) {
            Ok(())
        } else {
            Err(EngineError::UnsupportedTableSize { count, min, max })
        }
    }
}
