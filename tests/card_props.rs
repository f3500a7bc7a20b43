//! Property tests for hand totals and deck integrity.

use std::collections::HashSet;

use card_table::{blackjack_total, Card, Deck, GameRng, Rank, Suit, BLACKJACK, DECK_SIZE};
use proptest::prelude::*;

fn any_card() -> impl Strategy<Value = Card> {
    (0..Suit::ALL.len(), 0..Rank::ALL.len()).prop_map(|(s, r)| Card::new(Suit::ALL[s], Rank::ALL[r]))
}

#[test]
fn test_lone_aces() {
    let ace = Card::new(Suit::Spades, Rank::Ace);
    assert_eq!(blackjack_total(&[ace]), 11);
    assert_eq!(blackjack_total(&[ace, Card::new(Suit::Hearts, Rank::Ace)]), 12);
}

proptest! {
    /// Totals never soften below the hard sum and only stay above 21 when
    /// every ace is already counted as 1.
    #[test]
    fn prop_total_bounds(hand in prop::collection::vec(any_card(), 0..12)) {
        let hard: u32 = hand
            .iter()
            .map(|c| if c.is_ace() { 1 } else { c.blackjack_value() })
            .sum();
        let total = blackjack_total(&hand);

        prop_assert!(total >= hard);
        if total > BLACKJACK {
            prop_assert_eq!(total, hard);
        }
        if hand.iter().any(|c| c.is_ace()) && hard + 10 <= BLACKJACK {
            prop_assert_eq!(total, hard + 10);
        }
    }

    /// A shuffled deck holds every card exactly once and deals them all.
    #[test]
    fn prop_shuffled_deck_complete(seed in any::<u64>()) {
        let mut deck = Deck::shuffled(&mut GameRng::new(seed));
        prop_assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(unique.len(), DECK_SIZE);

        for remaining in (0..DECK_SIZE).rev() {
            let top = deck.peek();
            prop_assert_eq!(deck.deal().ok(), top);
            prop_assert_eq!(deck.len(), remaining);
        }
        prop_assert!(deck.deal().is_err());
    }
}
