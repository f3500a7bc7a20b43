//! Blackjack against an automatic dealer.
//!
//! - Two cards each, dealt one round at a time, dealer last
//! - Players act in seat order: hit until they stand, bust, or reach 21
//! - The dealer's hole card stays hidden until the dealer's turn
//! - Dealer draws by a fixed policy (below 17 by default)
//! - Players beating the dealer (or surviving a dealer bust) are paid 2×
//!
//! Ties with the dealer lose; there is no push.

mod game;
mod policy;

pub use game::{Blackjack, Phase};
pub use policy::{DealerPolicy, StandAt};
