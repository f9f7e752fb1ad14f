use super::*;
use proptest::prelude::*;

/// Board of the given size with `player` stones at the listed cells.
fn board_with(size: usize, stones: &[(usize, usize, Player)]) -> Board {
    let mut cells = vec![0i8; size * size];
    for &(row, col, player) in stones {
        cells[row * size + col] = player.sign();
    }
    Board::from_cells(size, cells).unwrap()
}

/// Horizontal run of `len` black stones starting at (row, col).
fn horizontal_run(size: usize, row: usize, col: usize, len: usize) -> Board {
    let stones: Vec<_> = (0..len).map(|k| (row, col + k, Player::Black)).collect();
    board_with(size, &stones)
}

#[test]
fn test_new_board() {
    let board = Board::new(DEFAULT_BOARD_SIZE).unwrap();
    assert_eq!(board.size(), 15);
    assert_eq!(board.num_actions(), 225);
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.legal_moves().len(), 225);
    assert!(board.game_ended(Player::Black).is_none());
}

#[test]
fn test_invalid_sizes() {
    assert_eq!(Board::new(0), Err(BoardError::InvalidSize(0)));
    assert_eq!(
        Board::new(MAX_BOARD_SIZE + 1),
        Err(BoardError::InvalidSize(MAX_BOARD_SIZE + 1))
    );
    assert!(Board::new(MAX_BOARD_SIZE).is_ok());
}

#[test]
fn test_from_rows_rejects_ragged_and_bad_values() {
    let ragged: Vec<Vec<i8>> = vec![vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]];
    assert_eq!(Board::from_rows(&ragged), Err(BoardError::BadDimensions(3)));

    let bad: Vec<Vec<i8>> = vec![vec![0, 3], vec![0, 0]];
    assert_eq!(Board::from_rows(&bad), Err(BoardError::InvalidValue(3)));
}

#[test]
fn test_action_coords_mapping() {
    let board = Board::new(15).unwrap();
    assert_eq!(board.action(0, 0), 0);
    assert_eq!(board.action(7, 7), 112);
    assert_eq!(board.coords(112), (7, 7));
    assert_eq!(board.coords(224), (14, 14));
    assert_eq!(board.coords(board.action(3, 11)), (3, 11));
}

#[test]
fn test_apply_move() {
    let board = Board::new(9).unwrap();
    let (next, mover) = board.apply_move(Player::Black, 40).unwrap();

    assert_eq!(mover, Player::White);
    assert_eq!(next.get(4, 4), 1);
    assert_eq!(next.stone_count(), 1);
    assert!(!next.legal_mask()[40]);
    // Original board is untouched
    assert_eq!(board.stone_count(), 0);

    let (next, mover) = next.apply_move(mover, 0).unwrap();
    assert_eq!(mover, Player::Black);
    assert_eq!(next.get(0, 0), -1);
}

#[test]
fn test_apply_move_errors() {
    let board = board_with(5, &[(1, 2, Player::Black)]);
    assert_eq!(
        board.apply_move(Player::White, 7),
        Err(BoardError::Occupied { row: 1, col: 2 })
    );
    assert_eq!(
        board.apply_move(Player::White, 25),
        Err(BoardError::ActionOutOfRange {
            action: 25,
            cells: 25
        })
    );
}

#[test]
fn test_four_in_a_row_is_not_a_win() {
    let board = horizontal_run(15, 7, 3, 4);
    assert!(!board.is_win(Player::Black));
    assert!(board.game_ended(Player::Black).is_none());
}

#[test]
fn test_five_in_a_row_wins() {
    let board = horizontal_run(15, 7, 3, 5);
    assert!(board.is_win(Player::Black));
    assert!(!board.is_win(Player::White));
    assert_eq!(board.game_ended(Player::Black), Some(GameOutcome::Win));
    assert_eq!(board.game_ended(Player::White), Some(GameOutcome::Loss));
}

#[test]
fn test_overline_wins() {
    let board = horizontal_run(15, 0, 0, 6);
    assert!(board.is_win(Player::Black));
}

#[test]
fn test_vertical_and_diagonal_wins() {
    let vertical: Vec<_> = (0..5).map(|k| (k + 2, 4, Player::White)).collect();
    assert!(board_with(9, &vertical).is_win(Player::White));

    let diagonal: Vec<_> = (0..5).map(|k| (k, k, Player::Black)).collect();
    assert!(board_with(9, &diagonal).is_win(Player::Black));

    let anti_diagonal: Vec<_> = (0..5).map(|k| (k, 8 - k, Player::Black)).collect();
    assert!(board_with(9, &anti_diagonal).is_win(Player::Black));
}

#[test]
fn test_run_broken_by_opponent_is_not_a_win() {
    let mut stones: Vec<_> = (0..6).map(|k| (3, k, Player::Black)).collect();
    stones[2].2 = Player::White;
    let board = board_with(9, &stones);
    assert!(!board.is_win(Player::Black));
}

#[test]
fn test_wrapping_rows_is_not_a_win() {
    // Three at the end of row 0 and two at the start of row 1 are contiguous in
    // memory but not on the board.
    let board = board_with(
        9,
        &[
            (0, 6, Player::Black),
            (0, 7, Player::Black),
            (0, 8, Player::Black),
            (1, 0, Player::Black),
            (1, 1, Player::Black),
        ],
    );
    assert!(!board.is_win(Player::Black));
}

#[test]
fn test_check_win_at() {
    let board = horizontal_run(15, 7, 3, 5);
    assert!(board.check_win_at(7, 3));
    assert!(board.check_win_at(7, 7));
    assert!(!board.check_win_at(7, 8)); // empty
    assert!(!board.check_win_at(20, 0)); // off the board
}

#[test]
fn test_winning_line() {
    let stones: Vec<_> = (0..5).map(|k| (2 + k, 6 - k, Player::White)).collect();
    let board = board_with(9, &stones);

    let line = board.winning_line(Player::White).unwrap();
    assert_eq!(line, vec![(2, 6), (3, 5), (4, 4), (5, 3), (6, 2)]);
    assert!(board.winning_line(Player::Black).is_none());
}

#[test]
fn test_winning_line_covers_overline() {
    let board = horizontal_run(9, 4, 1, 6);
    let line = board.winning_line(Player::Black).unwrap();
    assert_eq!(line.len(), 6);
    assert_eq!(line.first(), Some(&(4, 1)));
    assert_eq!(line.last(), Some(&(4, 6)));
}

#[test]
fn test_full_board_draw() {
    // No run of five fits on a 4x4 board.
    let rows: Vec<Vec<i8>> = vec![
        vec![1, -1, 1, -1],
        vec![1, -1, 1, -1],
        vec![-1, 1, -1, 1],
        vec![-1, 1, -1, 1],
    ];
    let board = Board::from_rows(&rows).unwrap();
    assert!(board.is_full());
    assert!(board.legal_mask().iter().all(|&legal| !legal));
    assert_eq!(board.game_ended(Player::Black), Some(GameOutcome::Draw));
}

#[test]
fn test_outcome_values() {
    assert_eq!(GameOutcome::Win.value(), 1.0);
    assert_eq!(GameOutcome::Loss.value(), -1.0);
    assert_eq!(GameOutcome::Draw.value(), 0.0);
}

#[test]
fn test_canonical_form_flips_signs() {
    let board = board_with(5, &[(0, 0, Player::Black), (1, 1, Player::White)]);
    let flipped = board.canonical_form(Player::White);
    assert_eq!(flipped.get(0, 0), -1);
    assert_eq!(flipped.get(1, 1), 1);
    assert_eq!(board.canonical_form(Player::Black), board);
}

#[test]
fn test_state_key_distinguishes_sizes_and_colors() {
    let a = board_with(5, &[(0, 0, Player::Black)]);
    let b = board_with(5, &[(0, 0, Player::White)]);
    assert_ne!(a.state_key(), b.state_key());

    let empty4 = Board::new(4).unwrap();
    let empty5 = Board::new(5).unwrap();
    assert_ne!(empty4.state_key(), empty5.state_key());

    assert_eq!(a.state_key(), a.clone().state_key());
    // 1 size byte + ceil(25 / 4) packed bytes
    assert_eq!(a.state_key().as_bytes().len(), 8);
}

#[test]
fn test_player_helpers() {
    assert_eq!(Player::Black.opponent(), Player::White);
    assert_eq!(Player::from_sign(-1), Some(Player::White));
    assert_eq!(Player::from_sign(0), None);
}

#[test]
fn test_display() {
    let board = board_with(3, &[(0, 0, Player::Black), (2, 1, Player::White)]);
    assert_eq!(board.to_string(), "X..\n...\n.O.\n");
}

// =============================================================================
// Wire format
// =============================================================================

#[test]
fn test_parse_external_board() {
    let rows = vec![vec![0, 1, 2], vec![0, 0, 0], vec![2, 0, 1]];
    assert_eq!(detect_encoding(&rows), Ok(Encoding::External));

    let board = parse_board(&rows, 3).unwrap();
    assert_eq!(board.get(0, 1), 1);
    assert_eq!(board.get(0, 2), -1);
    assert_eq!(board.get(2, 0), -1);
    assert_eq!(to_external_rows(&board), rows);
}

#[test]
fn test_parse_internal_board() {
    let rows = vec![vec![0, 1, -1], vec![0, 0, 0], vec![0, 0, 0]];
    assert_eq!(detect_encoding(&rows), Ok(Encoding::Internal));

    let board = parse_board(&rows, 3).unwrap();
    assert_eq!(board.get(0, 2), -1);
}

#[test]
fn test_parse_board_rejects_bad_input() {
    let wrong_rows = vec![vec![0, 0, 0], vec![0, 0, 0]];
    assert_eq!(parse_board(&wrong_rows, 3), Err(BoardError::BadDimensions(3)));

    let wrong_cols = vec![vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]];
    assert_eq!(parse_board(&wrong_cols, 3), Err(BoardError::BadDimensions(3)));

    let out_of_range = vec![vec![0, 0, 3], vec![0, 0, 0], vec![0, 0, 0]];
    assert_eq!(
        parse_board(&out_of_range, 3),
        Err(BoardError::InvalidValue(3))
    );

    let mixed = vec![vec![0, 2, -1], vec![0, 0, 0], vec![0, 0, 0]];
    assert_eq!(parse_board(&mixed, 3), Err(BoardError::MixedEncoding));
}

#[test]
fn test_parse_player() {
    assert_eq!(parse_player(1), Ok(Player::Black));
    assert_eq!(parse_player(-1), Ok(Player::White));
    assert_eq!(parse_player(2), Ok(Player::White));
    assert_eq!(parse_player(0), Err(BoardError::InvalidPlayer(0)));
    assert_eq!(parse_player(3), Err(BoardError::InvalidPlayer(3)));
}

// =============================================================================
// Properties
// =============================================================================

fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..=9).prop_flat_map(|size| {
        prop::collection::vec(prop_oneof![Just(0i8), Just(1i8), Just(-1i8)], size * size)
            .prop_map(move |cells| Board::from_cells(size, cells).unwrap())
    })
}

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Black), Just(Player::White)]
}

proptest! {
    #[test]
    fn prop_canonical_form_is_an_involution(board in arb_board(), mover in arb_player()) {
        prop_assert_eq!(board.canonical_form(mover).canonical_form(mover), board);
    }

    #[test]
    fn prop_legal_mask_matches_empty_cells(board in arb_board()) {
        let mask = board.legal_mask();
        prop_assert_eq!(mask.len(), board.num_actions());
        prop_assert_eq!(
            mask.iter().filter(|&&legal| legal).count(),
            board.num_actions() - board.stone_count()
        );
        for (action, &legal) in mask.iter().enumerate() {
            prop_assert_eq!(legal, board.cells()[action] == 0);
        }
        prop_assert_eq!(mask.iter().all(|&legal| !legal), board.is_full());
    }

    #[test]
    fn prop_state_key_equal_iff_boards_equal(a in arb_board(), b in arb_board()) {
        prop_assert_eq!(a.state_key() == b.state_key(), a == b);
    }

    #[test]
    fn prop_horizontal_run_wins_from_five(len in 1usize..=9, row in 0usize..9) {
        let board = horizontal_run(9, row, 0, len);
        prop_assert_eq!(board.is_win(Player::Black), len >= WIN_LENGTH);
    }

    #[test]
    fn prop_win_scan_agrees_with_winning_line(board in arb_board(), player in arb_player()) {
        prop_assert_eq!(board.is_win(player), board.winning_line(player).is_some());
    }
}
