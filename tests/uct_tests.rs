use fourfall::{
    agent::{Agent, UctAgent},
    Error, GameState, SearchConfig,
};

/// First to move with three pieces on the bottom row and column 3 open:
/// dropping into column 3 wins immediately.
fn three_in_a_row_position() -> GameState {
    let mut state = GameState::new_game();
    for column in [0, 0, 1, 1, 2, 2] {
        state = state.apply_move(column).unwrap();
    }
    assert!(!state.is_over());
    state
}

#[test]
fn zero_rounds_still_returns_a_legal_move() {
    let state = GameState::new_game();
    let mut bot = UctAgent::new(SearchConfig::default().with_rounds(0));

    let column = bot.select_move(&state).unwrap();
    assert!(state.is_valid_move(column));
    assert_eq!(bot.last_statistics().rounds, 0);
}

#[test]
fn search_finds_the_immediate_win() {
    let state = three_in_a_row_position();
    let config = SearchConfig::default()
        .with_rounds(2_000)
        .with_exploration_constant(1.5);

    let mut bot = UctAgent::new(config);
    let column = bot.select_move(&state).unwrap();
    assert_eq!(column, 3, "search should converge on the winning column");
}

#[test]
fn search_statistics_are_filled() {
    let state = GameState::new_game();
    let mut bot = UctAgent::new(SearchConfig::default().with_rounds(100));

    bot.select_move(&state).unwrap();
    let stats = bot.last_statistics();
    assert_eq!(stats.rounds, 100);
    assert!(stats.tree_size > 1, "tree should have grown");
    assert!(stats.max_depth >= 1);
}

#[test]
fn terminal_position_is_rejected() {
    // Finished game: First wins on the bottom row.
    let mut state = GameState::new_game();
    for column in [0, 0, 1, 1, 2, 2, 3] {
        state = state.apply_move(column).unwrap();
    }
    assert!(state.is_over());

    let mut bot = UctAgent::new(SearchConfig::default().with_rounds(10));
    assert!(matches!(
        bot.select_move(&state),
        Err(Error::NoLegalMoves)
    ));
}
