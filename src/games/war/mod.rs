//! War: simultaneous reveal rounds with recursive tie-breaking.
//!
//! ## Round Structure
//!
//! 1. Every live participant draws the top card of their reserve (or forfeits)
//! 2. Highest rank takes every card at stake
//! 3. Tied leaders go to war: each commits four more cards and the last one
//!    is compared, repeating until a single leader remains
//! 4. Anyone left without cards is eliminated
//!
//! The game ends when one participant still holds cards.
//!
//! ## Termination
//!
//! Every war tier either takes `war_commit` cards from each tied reserve or
//! eliminates the participant. Tables refuse a `war_commit` of zero, so
//! resolution always finishes in at most `52 / war_commit` tiers.

mod game;
mod round;

pub use game::{Phase, War};
pub use round::{Resolution, RoundSummary};
