//! Interactive game: human (Second, 'X') against a UCT bot (First, 'O').

use std::io::{self, Write};

use fourfall::{
    agent::{Agent, UctAgent},
    GameState, Player, SearchConfig, COLS,
};

fn read_column(state: &GameState) -> usize {
    loop {
        print!("Your move (column 0-6): ");
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            continue;
        }

        match input.trim().parse::<usize>() {
            Ok(column) if column < COLS => {
                if state.is_valid_move(column) {
                    return column;
                }
                println!("Column {} is full! Choose another column.", column);
            }
            _ => println!("Invalid column! Please enter a number between 0 and 6."),
        }
    }
}

fn main() -> fourfall::Result<()> {
    env_logger::init();

    println!("fourfall: you are X, the bot is O");
    println!("==================================\n");

    let config = SearchConfig::default()
        .with_rounds(2_000)
        .with_exploration_constant(1.414);
    let mut bot = UctAgent::new(config);

    let mut state = GameState::new_game();
    while !state.is_over() {
        println!("{}\n", state.board());

        let column = if state.next_player() == Player::Second {
            read_column(&state)
        } else {
            println!("Bot is thinking...");
            let column = bot.select_move(&state)?;
            println!("Bot plays column {}", column);
            column
        };

        state = state.apply_move(column)?;
    }

    println!("{}\n", state.board());
    match state.winner() {
        Some(Player::Second) => println!("You win!"),
        Some(Player::First) => println!("Bot wins!"),
        None => println!("The game is a draw!"),
    }

    Ok(())
}
