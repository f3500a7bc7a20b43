//! Dealer play policies.

use crate::core::{blackjack_total, Card};

/// Decides whether the dealer takes another card.
pub trait DealerPolicy: Send + Sync {
    /// True to draw, false to stand.
    fn should_draw(&self, hand: &[Card]) -> bool;
}

/// Draw while the hand totals less than the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandAt(pub u32);

impl Default for StandAt {
    fn default() -> Self {
        Self(17)
    }
}

impl DealerPolicy for StandAt {
    fn should_draw(&self, hand: &[Card]) -> bool {
        blackjack_total(hand) < self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn test_stand_at_seventeen() {
        let policy = StandAt::default();
        assert!(policy.should_draw(&hand(&["10H", "6S"])));
        assert!(!policy.should_draw(&hand(&["7H", "KS"])));
        assert!(!policy.should_draw(&hand(&["10H", "9S"])));
    }

    #[test]
    fn test_soft_seventeen_stands() {
        assert!(!StandAt::default().should_draw(&hand(&["AH", "6S"])));
    }

    #[test]
    fn test_custom_threshold() {
        let policy = StandAt(15);
        assert!(policy.should_draw(&hand(&["10H", "4S"])));
        assert!(!policy.should_draw(&hand(&["10H", "5S"])));
    }
}
