//! Plays a UCT bot against a random bot.
//!
//! Prints the board after every ply of the first game, then runs a short
//! match and reports win rates per side.

use fourfall::{
    agent::{Agent, RandomAgent, UctAgent},
    selfplay::run_match,
    GameState, SearchConfig,
};

fn main() -> fourfall::Result<()> {
    env_logger::init();

    let config = SearchConfig::default()
        .with_rounds(1_000)
        .with_exploration_constant(1.5);

    // One verbose game first.
    let mut bot = UctAgent::new(config);
    let mut opponent = RandomAgent::new();
    let mut state = GameState::new_game();

    while !state.is_over() {
        println!("{}\n", state.board());
        let mover = state.next_player();
        let column = match mover {
            fourfall::Player::First => bot.select_move(&state)?,
            fourfall::Player::Second => opponent.select_move(&state)?,
        };
        println!("{} plays column {}\n", mover, column);
        state = state.apply_move(column)?;
    }
    println!("{}\n", state.board());
    match state.winner() {
        Some(player) => println!("{} wins!", player),
        None => println!("The game is a draw!"),
    }

    // Then a quiet match for the win-rate report.
    let games = 20;
    println!("\nRunning {} games, UCT (First) vs random (Second)...", games);
    let mut bot = UctAgent::new(config.with_rounds(200));
    let mut opponent = RandomAgent::new();
    let report = run_match(&mut bot, &mut opponent, games)?;
    println!("{}", report);

    Ok(())
}
