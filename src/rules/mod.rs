//! Common contract implemented by every game variant.
//!
//! Variants implement `GameVariant` to define:
//! - How cards are dealt and whose turn it is
//! - How a choice mutates hands and statuses
//! - When the game is over and who won
//!
//! The table layer calls into `GameVariant` but never interprets
//! variant-specific rules directly.

pub mod engine;
pub mod result;

pub use engine::{GameVariant, Turn};
pub use result::{GameResult, Winner, ROUND_WINNER_PROMPT, WINNERS_PROMPT};
