use fourfall::{Board, Error, GameState, PlacedMove, Player};

/// A full board with no four-in-a-row anywhere, as a legal move sequence.
///
/// The final position alternates pieces within every row and stacks them
/// in runs of at most two within every column and diagonal, so no prefix
/// of the sequence can contain a winning line either.
fn draw_sequence() -> Vec<usize> {
    let mut moves = Vec::new();
    // Bottom two rows, left to right.
    moves.extend(0..7);
    moves.extend(0..7);
    // Remaining four rows, column pairs interleaved so each piece lands on
    // the mover's color.
    moves.extend([1, 0, 0, 1, 0, 1, 1, 0]);
    moves.extend([3, 2, 2, 3, 2, 3, 3, 2]);
    moves.extend([5, 4, 4, 6, 6, 5, 6, 5, 4, 4, 5, 6]);
    moves
}

#[test]
fn new_game_is_open() {
    let state = GameState::new_game();
    assert!(!state.is_over());
    assert_eq!(state.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(state.winner(), None);
    assert_eq!(state.next_player(), Player::First);
    assert!(state.last_move().is_none());
    assert!(state.previous().is_none());
}

#[test]
fn player_other_is_an_involution() {
    assert_eq!(Player::First.other(), Player::Second);
    assert_eq!(Player::Second.other(), Player::First);
    assert_eq!(Player::First.other().other(), Player::First);
}

#[test]
fn apply_move_links_history_and_flips_mover() {
    let start = GameState::new_game();
    let next = start.apply_move(3).unwrap();

    assert_eq!(next.next_player(), Player::Second);
    assert_eq!(next.last_move(), Some(PlacedMove { column: 3, row: 0 }));
    assert!(next.previous().is_some());
    assert!(next.previous().unwrap().last_move().is_none());

    // The original state is untouched.
    assert_eq!(start.legal_moves().len(), 7);
    assert!(start.board().get(3, 0).is_none());
}

#[test]
fn column_fills_after_six_drops() {
    let mut state = GameState::new_game();
    for _ in 0..6 {
        state = state.apply_move(3).unwrap();
    }
    assert!(state.board().is_full_column(3));
    assert!(!state.is_over());
    assert_eq!(state.legal_moves(), vec![0, 1, 2, 4, 5, 6]);

    match state.apply_move(3) {
        Err(Error::InvalidMove(3)) => {}
        other => panic!("expected InvalidMove(3), got {:?}", other),
    }
}

#[test]
fn out_of_range_column_is_rejected() {
    let state = GameState::new_game();
    assert!(matches!(state.apply_move(7), Err(Error::InvalidMove(7))));
    assert!(!state.is_valid_move(7));
}

#[test]
fn horizontal_win_is_detected() {
    // First: columns 0..3 on the bottom row; Second stacks on top.
    let mut state = GameState::new_game();
    for column in [0, 0, 1, 1, 2, 2, 3] {
        assert!(!state.is_over());
        state = state.apply_move(column).unwrap();
    }
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Player::First));
}

#[test]
fn vertical_win_is_detected() {
    let mut state = GameState::new_game();
    for column in [0, 6, 0, 6, 0, 5, 0] {
        state = state.apply_move(column).unwrap();
    }
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Player::First));
}

#[test]
fn rising_diagonal_win_is_detected() {
    // First builds (0,0), (1,1), (2,2), (3,3).
    let mut state = GameState::new_game();
    for column in [0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3] {
        state = state.apply_move(column).unwrap();
    }
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Player::First));
}

#[test]
fn falling_diagonal_win_is_detected() {
    // Build (0,3), (1,2), (2,1), (3,0) for First directly on a board.
    let mut board = Board::new();
    for _ in 0..3 {
        board.drop_piece(Player::Second, 0).unwrap();
    }
    for _ in 0..2 {
        board.drop_piece(Player::Second, 1).unwrap();
    }
    board.drop_piece(Player::Second, 2).unwrap();
    board.drop_piece(Player::First, 3).unwrap();
    board.drop_piece(Player::First, 2).unwrap();
    board.drop_piece(Player::First, 1).unwrap();
    let placed = board.drop_piece(Player::First, 0).unwrap();

    assert_eq!(placed, PlacedMove { column: 0, row: 3 });
    assert!(board.is_winning_move(placed));
}

#[test]
fn broken_streak_does_not_win() {
    // First on columns 0, 1, 2 and 4; Second plugs the gap at 3.
    let mut board = Board::new();
    for column in [0, 1, 2] {
        board.drop_piece(Player::First, column).unwrap();
    }
    board.drop_piece(Player::Second, 3).unwrap();
    let placed = board.drop_piece(Player::First, 4).unwrap();

    assert!(!board.is_winning_move(placed));
    assert!(!board.is_winning_move(PlacedMove { column: 2, row: 0 }));
}

#[test]
fn streak_resets_at_the_board_edge() {
    // Three in a row ending at column 0: off-board neighbors count as
    // mismatches.
    let mut board = Board::new();
    board.drop_piece(Player::First, 2).unwrap();
    board.drop_piece(Player::First, 1).unwrap();
    let placed = board.drop_piece(Player::First, 0).unwrap();
    assert!(!board.is_winning_move(placed));
}

#[test]
fn full_board_without_a_line_is_a_draw() {
    let mut state = GameState::new_game();
    for (ply, column) in draw_sequence().into_iter().enumerate() {
        assert!(!state.is_over(), "game ended early at ply {}", ply);
        state = state.apply_move(column).unwrap();
    }

    assert!(state.board().is_full());
    assert!(state.is_over());
    assert_eq!(state.winner(), None);
    assert!(state.legal_moves().is_empty());
}

#[test]
fn board_renders_with_column_legend() {
    let mut state = GameState::new_game();
    state = state.apply_move(0).unwrap(); // First -> 'O'
    state = state.apply_move(1).unwrap(); // Second -> 'X'

    let rendered = format!("{}", state.board());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[6], "0 1 2 3 4 5 6");
    assert!(lines[5].starts_with("O X ."));
    assert_eq!(lines[0].trim(), ". . . . . . .");
}
