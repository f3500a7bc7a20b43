//! Participants: the players seated at a table, and the Blackjack dealer.
//!
//! ## ParticipantId
//!
//! Opaque identity handed in by the session layer (a user id).
//!
//! ## Participant
//!
//! Per-seat mutable state shared by both variants: the active hand, the War
//! reserve pile, wager, bank, and lifecycle status. The dealer is a
//! participant with [`Role::Dealer`]; its play policy lives with the
//! Blackjack engine, not here.
//!
//! Persistent fields (identity, bank) survive [`Participant::reset_transient`];
//! everything else is per round.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{blackjack_total, Card};
use super::error::{EngineError, Pile};

/// Identity of a seated participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity used for the house.
    #[must_use]
    pub fn dealer() -> Self {
        Self("Dealer".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Acts on external input.
    Player,
    /// Acts on the engine's fixed policy.
    Dealer,
}

/// Lifecycle status.
///
/// Blackjack uses `Playing`, `Standing`, `Busted` and `Blackjack`.
/// War uses `Playing`, `Busted` (folded for the current round) and
/// `Eliminated` (out of cards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Standing,
    Busted,
    Blackjack,
    Eliminated,
}

impl Status {
    #[must_use]
    pub fn is_playing(self) -> bool {
        self == Status::Playing
    }
}

/// Cards held in the active hand. Blackjack hands rarely exceed 8.
pub type Hand = SmallVec<[Card; 8]>;

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    role: Role,
    hand: Hand,
    /// War draw pile; front is the top.
    reserve: VecDeque<Card>,
    wager: u64,
    bank: u64,
    status: Status,
}

impl Participant {
    /// A player with the given starting bank.
    #[must_use]
    pub fn new(id: ParticipantId, bank: u64) -> Self {
        Self {
            id,
            role: Role::Player,
            hand: Hand::new(),
            reserve: VecDeque::new(),
            wager: 0,
            bank,
            status: Status::Playing,
        }
    }

    /// The house.
    #[must_use]
    pub fn dealer() -> Self {
        Self {
            role: Role::Dealer,
            ..Self::new(ParticipantId::dealer(), 0)
        }
    }

    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn reserve(&self) -> &VecDeque<Card> {
        &self.reserve
    }

    #[must_use]
    pub fn wager(&self) -> u64 {
        self.wager
    }

    #[must_use]
    pub fn bank(&self) -> u64 {
        self.bank
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Blackjack total of the active hand.
    #[must_use]
    pub fn total(&self) -> u32 {
        blackjack_total(&self.hand)
    }

    /// Most recently revealed card (the last card added to the hand).
    #[must_use]
    pub fn revealed(&self) -> Option<Card> {
        self.hand.last().copied()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    // === Wagers ===

    /// Move `amount` from the bank onto the table.
    pub fn place_wager(&mut self, amount: u64) -> Result<(), EngineError> {
        // Replacing an earlier wager refunds it first.
        let available = self.bank.saturating_add(self.wager);
        if amount > available {
            return Err(EngineError::InsufficientBank {
                id: self.id.clone(),
                wager: amount,
                bank: available,
            });
        }
        self.bank = available - amount;
        self.wager = amount;
        Ok(())
    }

    /// Add winnings to the bank.
    pub fn credit(&mut self, amount: u64) {
        self.bank = self.bank.saturating_add(amount);
    }

    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        self.role == Role::Player && self.bank == 0 && self.wager == 0
    }

    // === Reserve (War) ===

    /// Append cards to the bottom of the reserve.
    pub fn add_to_reserve(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.reserve.extend(cards);
    }

    /// Pop the top reserve card.
    pub fn draw_from_reserve(&mut self) -> Result<Card, EngineError> {
        self.reserve.pop_front().ok_or(EngineError::EmptyResource(Pile::Reserve))
    }

    /// Take exactly `n` cards off the top of the reserve, or none at all.
    pub fn take_from_reserve(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.reserve.len() < n {
            return None;
        }
        Some(self.reserve.drain(..n).collect())
    }

    /// Empty the reserve, returning everything it held.
    pub fn drain_reserve(&mut self) -> Vec<Card> {
        self.reserve.drain(..).collect()
    }

    pub(crate) fn reserve_mut(&mut self) -> &mut VecDeque<Card> {
        &mut self.reserve
    }

    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.reserve.is_empty()
    }

    /// Clear hand, reserve, wager and status; keep identity and bank.
    pub fn reset_transient(&mut self) {
        self.hand.clear();
        self.reserve.clear();
        self.wager = 0;
        self.status = Status::Playing;
    }
}
