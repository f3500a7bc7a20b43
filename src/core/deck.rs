//! The 52-card deck owned by a single game.
//!
//! The top of the deck is the end of the backing `Vec`, so dealing is a
//! `pop`. Stacked decks for replays are built with [`Deck::stacked`], which
//! takes cards in the order they should be dealt.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use super::error::{EngineError, Pile};
use super::rng::GameRng;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered, mutable sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 suit/rank combinations in construction order (unshuffled).
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    /// A standard deck shuffled with an unbiased Fisher–Yates permutation.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// A deck that deals `in_deal_order[0]` first, then `in_deal_order[1]`, ...
    #[must_use]
    pub fn stacked(in_deal_order: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = in_deal_order.into_iter().collect();
        cards.reverse();
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card that the next [`deal`](Self::deal) returns.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyResource(Pile::Deck))
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_deck_is_complete() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: FxHashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assert!(unique.contains(&Card::new(suit, rank)));
            }
        }
    }

    #[test]
    fn test_shuffled_deck_is_permutation() {
        let mut rng = GameRng::new(42);
        let deck = Deck::shuffled(&mut rng);

        let mut shuffled = deck.cards().to_vec();
        let mut standard = Deck::standard().cards().to_vec();
        assert_ne!(shuffled, standard);

        shuffled.sort_by_key(|c| (c.suit, c.rank));
        standard.sort_by_key(|c| (c.suit, c.rank));
        assert_eq!(shuffled, standard);
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let a = Deck::shuffled(&mut GameRng::new(7));
        let b = Deck::shuffled(&mut GameRng::new(7));
        let c = Deck::shuffled(&mut GameRng::new(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deal_returns_top_and_shrinks() {
        let mut deck = Deck::shuffled(&mut GameRng::new(1));
        let top = deck.peek().unwrap();
        let before = deck.len();

        assert_eq!(deck.deal().unwrap(), top);
        assert_eq!(deck.len(), before - 1);
    }

    #[test]
    fn test_deal_until_empty() {
        let mut deck = Deck::standard();
        for remaining in (0..DECK_SIZE).rev() {
            deck.deal().unwrap();
            assert_eq!(deck.len(), remaining);
        }
        assert!(deck.is_empty());
        assert_eq!(deck.deal(), Err(EngineError::EmptyResource(Pile::Deck)));
    }

    #[test]
    fn test_stacked_deal_order() {
        let order: Vec<Card> = ["10H", "7S", "9D"].iter().map(|c| c.parse().unwrap()).collect();
        let mut deck = Deck::stacked(order.clone());

        for expected in order {
            assert_eq!(deck.deal().unwrap(), expected);
        }
        assert!(deck.is_empty());
    }
}
