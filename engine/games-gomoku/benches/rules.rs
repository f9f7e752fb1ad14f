//! Rule benchmarks: win scans, legality masks and state keys on a 15×15 board.
//!
//! Run with: `cargo bench -p games-gomoku`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use games_gomoku::{Board, Player};

/// Midgame position with 40 stones spread over the board and no winner.
fn midgame() -> Board {
    let mut board = Board::new(15).unwrap();
    let mut player = Player::Black;
    for i in 0..40usize {
        let action = (i * 37 + 11) % 225;
        if board.is_empty_cell(action) {
            let (next, next_player) = board.apply_move(player, action).unwrap();
            if next.is_win(player) {
                continue;
            }
            board = next;
            player = next_player;
        }
    }
    board
}

fn bench_win_scan(c: &mut Criterion) {
    let board = midgame();
    let mut group = c.benchmark_group("gomoku_rules");

    group.bench_function("is_win_full_scan", |b| {
        b.iter(|| black_box(&board).is_win(Player::Black))
    });
    group.bench_function("game_ended", |b| {
        b.iter(|| black_box(&board).game_ended(Player::White))
    });
    group.bench_function("check_win_at", |b| {
        b.iter(|| black_box(&board).check_win_at(7, 7))
    });

    group.finish();
}

fn bench_search_helpers(c: &mut Criterion) {
    let board = midgame();
    let mut group = c.benchmark_group("gomoku_search_helpers");

    group.bench_function("state_key", |b| b.iter(|| black_box(&board).state_key()));
    group.bench_function("legal_mask", |b| b.iter(|| black_box(&board).legal_mask()));
    group.bench_function("canonical_form", |b| {
        b.iter(|| black_box(&board).canonical_form(Player::White))
    });

    group.finish();
}

criterion_group!(benches, bench_win_scan, bench_search_helpers);
criterion_main!(benches);
