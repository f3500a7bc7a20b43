//! # card-table
//!
//! Turn and round engine for multiplayer card rooms (Blackjack and War).
//!
//! ## Design Principles
//!
//! 1. **Engine, not server**: The crate never does I/O. A driver calls in once
//!    per player action or scheduled tick and broadcasts `display_state()`.
//!
//! 2. **One room, one owner**: Each `Table` exclusively owns its deck and
//!    participants. Calls must be serialized per room; rooms share nothing.
//!
//! 3. **Reject, never corrupt**: Every transition validates first and
//!    mutates second. Errors leave the table exactly as it was.
//!
//! ## Architecture
//!
//! - **Variant trait**: `GameVariant` is the common contract; `Blackjack` and
//!   `War` implement it and `Table` wraps both for a room.
//!
//! - **Stepwise automation**: dealer play and war escalation advance one
//!   decision per `tick`, so the driver can pace animations.
//!
//! - **Deterministic shuffles**: ChaCha8 seeded from `TableConfig::seed`.
//!
//! ## Modules
//!
//! - `core`: Cards, deck, participants, actions, RNG, configuration, errors
//! - `rules`: `GameVariant` trait, turn signal, result shapes
//! - `games`: Blackjack and War
//! - `table`: Per-room tagged union over the variants
//! - `view`: Read-only projection with concealed cards redacted

pub mod core;
pub mod rules;
pub mod games;
pub mod table;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    blackjack_total, Card, Rank, Suit, BLACKJACK,
    Deck, DECK_SIZE,
    Participant, ParticipantId, Role, Status,
    GameRng, GameRngState,
    TableConfig, Variant,
    ActionRecord, BlackjackMove, Choice, WarMove,
    EngineError, IllegalReason, Pile,
};

pub use crate::rules::{GameResult, GameVariant, Turn, Winner, ROUND_WINNER_PROMPT, WINNERS_PROMPT};

pub use crate::games::{Blackjack, DealerPolicy, Resolution, RoundSummary, StandAt, War};

pub use crate::table::Table;

pub use crate::view::{CardFace, ParticipantView, TableView};
