//! Core table types: cards, deck, participants, actions, RNG, configuration.
//!
//! This module contains the building blocks shared by both variants.
//! Variant rules live in `games`.

pub mod card;
pub mod deck;
pub mod participant;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use card::{blackjack_total, Card, ParseCardError, Rank, Suit, BLACKJACK};
pub use deck::{Deck, DECK_SIZE};
pub use participant::{Hand, Participant, ParticipantId, Role, Status};
pub use rng::{GameRng, GameRngState};
pub use config::{TableConfig, Variant, MAX_WAR_PLAYERS, MIN_WAR_PLAYERS};
pub use action::{ActionRecord, BlackjackMove, Choice, WarMove};
pub use error::{EngineError, IllegalReason, Pile};
