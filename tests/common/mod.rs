//! Shared helpers for the integration suites.
//!
//! Logging follows `TEST_LOG`, then `RUST_LOG`, then `"warn"`:
//!
//! ```bash
//! TEST_LOG=debug cargo test --test war_tests
//! ```

#![allow(dead_code)]

use std::sync::OnceLock;

use card_table::{Card, Deck, ParticipantId};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the test subscriber once per test binary.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn id(name: &str) -> ParticipantId {
    ParticipantId::from(name)
}

pub fn ids(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|n| id(n)).collect()
}

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

/// Deck that deals `codes` in order.
pub fn stacked(codes: &[&str]) -> Deck {
    Deck::stacked(cards(codes))
}

/// Deck whose round-robin split hands `reserves[i]` to seat `i`, top first.
pub fn split(reserves: &[&[&str]]) -> Deck {
    let depth = reserves[0].len();
    assert!(reserves.iter().all(|r| r.len() == depth), "reserves must be equal length");

    let mut order = Vec::with_capacity(depth * reserves.len());
    for i in 0..depth {
        for reserve in reserves {
            order.push(reserve[i].parse::<Card>().unwrap());
        }
    }
    Deck::stacked(order)
}
