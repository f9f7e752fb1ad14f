//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full move decisions at each difficulty's simulation count
//! - Evaluator cost per call
//! - Single-simulation throughput on a warm table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_gomoku::{Board, Player};
use mcts::{
    decide_move, Evaluator, HeuristicEvaluator, MctsConfig, MctsEngine, UniformEvaluator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// 15×15 midgame position with a handful of stones around the center.
fn midgame() -> Board {
    let mut board = Board::new(15).unwrap();
    let mut player = Player::Black;
    for &(r, c) in &[(7, 7), (7, 8), (8, 8), (6, 6), (8, 6), (9, 9), (6, 8), (5, 9)] {
        let (next, p) = board.apply_move(player, r * 15 + c).unwrap();
        board = next;
        player = p;
    }
    board
}

// =============================================================================
// Full move decisions
// =============================================================================

fn bench_decide_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide_move");
    group.sample_size(10);
    let board = midgame();

    for sims in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(sims as u64));

        group.bench_with_input(BenchmarkId::new("uniform", sims), &sims, |b, &sims| {
            let evaluator = UniformEvaluator::new();
            let config = MctsConfig::for_play().with_simulations(sims);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    decide_move(&evaluator, &config, &board, Player::Black, &mut rng).unwrap(),
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("heuristic", sims), &sims, |b, &sims| {
            let evaluator = HeuristicEvaluator::new();
            let config = MctsConfig::for_play().with_simulations(sims);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    decide_move(&evaluator, &config, &board, Player::Black, &mut rng).unwrap(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Evaluators
// =============================================================================

fn bench_evaluators(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluators");
    let board = midgame();

    group.bench_function("uniform", |b| {
        let evaluator = UniformEvaluator::new();
        b.iter(|| black_box(evaluator.evaluate(black_box(&board)).unwrap()))
    });

    group.bench_function("heuristic", |b| {
        let evaluator = HeuristicEvaluator::new();
        b.iter(|| black_box(evaluator.evaluate(black_box(&board)).unwrap()))
    });

    group.finish();
}

// =============================================================================
// Simulation throughput
// =============================================================================

fn bench_simulate_warm_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let board = midgame();
    let evaluator = UniformEvaluator::new();

    group.throughput(Throughput::Elements(100));
    group.bench_function("100_on_warm_table", |b| {
        let mut engine = MctsEngine::new(&evaluator, MctsConfig::for_play());
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        engine.get_action_prob(&board, 400, 0.0, &mut rng).unwrap();

        b.iter(|| {
            for _ in 0..100 {
                black_box(engine.simulate(&board).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decide_move,
    bench_evaluators,
    bench_simulate_warm_table,
);
criterion_main!(benches);
