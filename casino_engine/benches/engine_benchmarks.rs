use casino_engine::{
    Casino, CasinoConfig, GameKind, GameParams, Ledger, Move,
    game::{
        BaccaratSide, Blackjack, GameRng, Mines, Wager, Wordle,
        blackjack::hand_value,
        entities::{ACE, Card, KING, Suit},
        wordle::score_guess,
    },
    ledger::AccountId,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::{hint::black_box, sync::Arc};

/// Benchmark blackjack hand valuation with several aces
fn bench_hand_value(c: &mut Criterion) {
    let hand = vec![
        Card(ACE, Suit::Spade),
        Card(ACE, Suit::Heart),
        Card(9, Suit::Club),
        Card(KING, Suit::Diamond),
    ];

    c.bench_function("blackjack_hand_value", |b| {
        b.iter(|| hand_value(black_box(&hand)));
    });
}

/// Benchmark dealing a fresh blackjack hand (includes shuffling a deck)
fn bench_blackjack_deal(c: &mut Criterion) {
    c.bench_function("blackjack_deal", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            Blackjack::new(100, GameRng::seeded(seed))
        });
    });
}

/// Benchmark a full baccarat coup from a six-deck shoe
fn bench_baccarat_coup(c: &mut Criterion) {
    c.bench_function("baccarat_coup", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            GameParams::Baccarat {
                bet: 100,
                side: BaccaratSide::Banker,
            }
            .build(GameRng::seeded(seed))
        });
    });
}

/// Benchmark revealing every safe tile for various mine counts
fn bench_mines_clear_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("mines_clear_board");

    for mines in [1u8, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(mines), &mines, |b, &mines| {
            b.iter(|| {
                let mut game = Mines::new(100, mines, GameRng::seeded(3)).unwrap();
                for position in 0..20 {
                    if game.is_over() {
                        break;
                    }
                    let _ = game.reveal(position);
                }
                game.multiplier()
            });
        });
    }

    group.finish();
}

/// Benchmark wordle guess scoring
fn bench_wordle_score(c: &mut Criterion) {
    c.bench_function("wordle_score_guess", |b| {
        b.iter(|| score_guess(black_box("CRANE"), black_box("NACRE")));
    });

    c.bench_function("wordle_full_game", |b| {
        b.iter(|| {
            let mut game = Wordle::with_target("CRANE", GameRng::seeded(0));
            for word in ["ABCDE", "FGHIJ", "KLMNO", "PQRST", "CRANE"] {
                let _ = game.guess(word);
            }
            game.status()
        });
    });
}

/// Benchmark the start/move/cash-out round trip through the casino
fn bench_casino_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let casino = Casino::with_seed(
        Arc::new(Ledger::in_memory(i64::MAX / 2)),
        CasinoConfig::default(),
        9,
    );
    let player = AccountId::from("bench");

    c.bench_function("casino_tower_round_trip", |b| {
        b.iter(|| {
            runtime.block_on(async {
                casino
                    .start_game(&player, GameParams::Tower { bet: 100 })
                    .await
                    .unwrap();
                let outcome = casino
                    .apply_move(&player, GameKind::Tower, Move::Climb { level: 1, tile: 1 })
                    .await
                    .unwrap();
                if outcome.settlement.is_none() {
                    casino.cash_out(&player, GameKind::Tower).await.unwrap();
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_hand_value,
    bench_blackjack_deal,
    bench_baccarat_coup,
    bench_mines_clear_board,
    bench_wordle_score,
    bench_casino_round_trip
);
criterion_main!(benches);
