//! Playing cards: suits, ranks, and the two value scales the games use.
//!
//! ## Value scales
//!
//! - **Blackjack**: numeric ranks count their face value, J/Q/K count 10 and
//!   an Ace counts 11 (softened to 1 by [`blackjack_total`]).
//! - **War**: ordinal comparison value, 2..=10 then J=11, Q=12, K=13, A=14.
//!
//! ```
//! use card_table::core::{blackjack_total, Card, Rank, Suit};
//!
//! let hand = [Card::new(Suit::Spades, Rank::Ace), Card::new(Suit::Hearts, Rank::Ace)];
//! assert_eq!(blackjack_total(&hand), 12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blackjack bust threshold.
pub const BLACKJACK: u32 = 21;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Spades,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All suits, in deck construction order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Spades, Suit::Clubs, Suit::Diamonds];

    /// Single-letter code (`H`, `S`, `C`, `D`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }
}

/// Card rank. The discriminant is the War comparison value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, low to high.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Blackjack value with the Ace counted hard (11).
    #[must_use]
    pub const fn blackjack_value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            other => other as u32,
        }
    }

    /// War comparison value (A high).
    #[must_use]
    pub const fn war_value(self) -> u32 {
        self as u32
    }

    /// Short label used in card codes (`2`..`10`, `J`, `Q`, `K`, `A`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    #[must_use]
    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    #[must_use]
    pub const fn blackjack_value(self) -> u32 {
        self.rank.blackjack_value()
    }

    #[must_use]
    pub const fn war_value(self) -> u32 {
        self.rank.war_value()
    }
}

impl fmt::Display for Card {
    /// Formats as `<rank><suit>`, e.g. `10H`, `AS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.code())
    }
}

/// Error returned when a card code cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid card code {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses `<rank><suit>` codes such as `10H`, `AS`, `qd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());

        let mut chars = s.chars();
        let suit_ch = chars.next_back().ok_or_else(err)?;
        let rank_str = chars.as_str();

        let suit = match suit_ch.to_ascii_uppercase() {
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            _ => return Err(err()),
        };

        let rank = Rank::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(rank_str))
            .ok_or_else(err)?;

        Ok(Card::new(suit, rank))
    }
}

/// Blackjack total for a hand.
///
/// Aces start at 11. Then, once per Ace held, 10 is subtracted if the running
/// total is still over 21. The result is the best total not exceeding 21, or
/// the smallest bust total when no softening avoids the bust.
#[must_use]
pub fn blackjack_total(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|c| c.blackjack_value()).sum();
    let aces = cards.iter().filter(|c| c.is_ace()).count();

    for _ in 0..aces {
        if total > BLACKJACK {
            total -= 10;
        }
    }

    total
}
