//! Self-play orchestration.
//!
//! Runs complete games between two [`Agent`]s, delivers end-of-game rewards
//! through the agents' episode hooks, and aggregates win-rate statistics
//! over a series of games.

use std::fmt;

use log::{debug, info};

use crate::agent::Agent;
use crate::game::{GameState, Player};
use crate::Result;

/// Outcome of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// The winning side, or None for a draw.
    pub winner: Option<Player>,

    /// Columns played, in order.
    pub moves: Vec<usize>,
}

/// Plays one full game between `first` (moving first) and `second`.
///
/// Both agents get `begin_episode` before the first ply and exactly one
/// `complete_episode` at the end: +1 to the winner, -1 to the loser, 0 to
/// both on a draw. A failing agent aborts the game with its error; no
/// degraded move is ever substituted.
pub fn simulate_game(first: &mut dyn Agent, second: &mut dyn Agent) -> Result<GameRecord> {
    let mut state = GameState::new_game();
    let mut moves = Vec::new();

    first.begin_episode();
    second.begin_episode();

    while !state.is_over() {
        let mover = state.next_player();
        let agent: &mut dyn Agent = match mover {
            Player::First => first,
            Player::Second => second,
        };
        let column = agent.select_move(&state)?;
        debug!("{} plays column {}", mover, column);
        state = state.apply_move(column)?;
        moves.push(column);
    }

    let winner = state.winner();
    match winner {
        Some(Player::First) => {
            first.complete_episode(1.0);
            second.complete_episode(-1.0);
        }
        Some(Player::Second) => {
            first.complete_episode(-1.0);
            second.complete_episode(1.0);
        }
        None => {
            first.complete_episode(0.0);
            second.complete_episode(0.0);
        }
    }

    Ok(GameRecord { winner, moves })
}

/// Aggregate result of a series of games between two agents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchReport {
    /// Games played.
    pub games: usize,

    /// Games won by the first agent.
    pub wins_first: usize,

    /// Games won by the second agent.
    pub wins_second: usize,

    /// Drawn games.
    pub draws: usize,
}

impl MatchReport {
    /// Win percentage of the first agent
    pub fn win_rate_first(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins_first as f64 / self.games as f64 * 100.0
    }

    /// Win percentage of the second agent
    pub fn win_rate_second(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins_second as f64 / self.games as f64 * 100.0
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: First {:.1}% / Second {:.1}% ({} draws)",
            self.games,
            self.win_rate_first(),
            self.win_rate_second(),
            self.draws
        )
    }
}

/// Plays `games` games between the two agents and tallies the outcomes.
///
/// An error in any game is fatal to the whole match and propagates out.
pub fn run_match(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    games: usize,
) -> Result<MatchReport> {
    let mut report = MatchReport::default();

    for game in 0..games {
        let record = simulate_game(first, second)?;
        report.games += 1;
        match record.winner {
            Some(Player::First) => report.wins_first += 1,
            Some(Player::Second) => report.wins_second += 1,
            None => report.draws += 1,
        }
        info!(
            "game {}/{}: winner {:?} after {} moves",
            game + 1,
            games,
            record.winner,
            record.moves.len()
        );
    }

    Ok(report)
}
