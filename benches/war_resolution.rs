//! War resolution throughput: full seeded games and single escalating rounds.

use card_table::{Card, Deck, GameVariant, ParticipantId, Rank, Suit, TableConfig, Turn, Variant, War};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn seats(count: usize) -> Vec<ParticipantId> {
    (0..count).map(|i| ParticipantId::new(format!("p{i}"))).collect()
}

/// Play until one participant remains or the round cap is hit.
fn play_out(game: &mut War, max_rounds: u32) {
    while game.is_in_progress() && game.round() < max_rounds {
        match game.current_turn() {
            Turn::Participant(_) => {
                game.default_move().unwrap();
            }
            Turn::RoundOver => {
                game.resolve_round().unwrap();
            }
            _ => break,
        }
    }
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("war_full_game");
    for count in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let config = TableConfig::new(Variant::War).with_seed(7).with_reshuffled_winnings();
                let mut game = War::new(config, seats(count)).unwrap();
                game.initial_deal().unwrap();
                play_out(&mut game, 2_000);
                black_box(game.round())
            });
        });
    }
    group.finish();
}

fn bench_escalating_round(c: &mut Criterion) {
    // Both reserves hold the same rank sequence, so every tier ties until
    // the reserves run dry.
    let mut order = Vec::with_capacity(52);
    for (left, right) in [(Suit::Hearts, Suit::Spades), (Suit::Clubs, Suit::Diamonds)] {
        for rank in Rank::ALL {
            order.push(Card::new(left, rank));
            order.push(Card::new(right, rank));
        }
    }

    c.bench_function("war_escalating_round", |b| {
        b.iter(|| {
            let deck = Deck::stacked(order.iter().copied());
            let mut game = War::with_deck(TableConfig::new(Variant::War), seats(2), deck).unwrap();
            game.initial_deal().unwrap();
            while game.current_turn().participant().is_some() {
                game.default_move().unwrap();
            }
            black_box(game.resolve_round().unwrap())
        });
    });
}

criterion_group!(benches, bench_full_game, bench_escalating_round);
criterion_main!(benches);
