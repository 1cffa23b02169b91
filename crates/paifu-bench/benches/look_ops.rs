//! Criterion micro-benchmarks for round reconstruction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use paifu_bench::{record_game, reference_profile, stress_profile};

/// Index of the round with the most turns.
fn longest_round(replay: &paifu_replay::Replay) -> usize {
    (0..replay.rounds.len())
        .max_by_key(|&i| replay.round_len(i))
        .unwrap_or(0)
}

/// Benchmark: final snapshot of the longest reference round.
fn bench_look_final(c: &mut Criterion) {
    let replay = record_game(reference_profile(42));
    let index = longest_round(&replay);

    c.bench_function("look_final", |b| {
        b.iter(|| {
            let snap = replay.look_final(black_box(index));
            black_box(&snap);
        });
    });
}

/// Benchmark: look at every budget of the longest stress round, the
/// access pattern of a viewer stepping through a game.
fn bench_look_every_turn(c: &mut Criterion) {
    let replay = record_game(stress_profile(42));
    let index = longest_round(&replay);
    let turns = replay.round_len(index);

    c.bench_function("look_every_turn", |b| {
        b.iter(|| {
            for turn in 0..=turns {
                black_box(replay.look(index, turn));
            }
        });
    });
}

/// Benchmark: record a whole reference game through the mock table.
fn bench_record_game(c: &mut Criterion) {
    c.bench_function("record_game", |b| {
        b.iter(|| {
            let replay = record_game(reference_profile(black_box(7)));
            black_box(&replay);
        });
    });
}

criterion_group!(
    benches,
    bench_look_final,
    bench_look_every_turn,
    bench_record_game
);
criterion_main!(benches);
