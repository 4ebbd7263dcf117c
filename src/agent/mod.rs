//! Move-selecting agents.
//!
//! Everything that can play a game — the random bot, both search engines,
//! and scripted or human adapters — implements the single [`Agent`]
//! capability, so the self-play orchestrator composes them freely.

pub mod uct;
pub mod zero;

use rand::seq::SliceRandom;

use crate::game::GameState;
use crate::{Error, Result};

pub use uct::UctAgent;
pub use zero::ZeroAgent;

/// Capability for choosing a move in a Connect-Four position.
pub trait Agent {
    /// Returns the column this agent plays from `state`.
    ///
    /// Callers must guarantee `state.is_over()` is false; a terminal
    /// position has no legal moves and yields [`Error::NoLegalMoves`].
    fn select_move(&mut self, state: &GameState) -> Result<usize>;

    /// Notifies the agent that a new game is starting.
    ///
    /// Experience-collecting agents forward this to their collector;
    /// the default is a no-op.
    fn begin_episode(&mut self) {}

    /// Notifies the agent of its final reward for the finished game
    /// (+1 win, -1 loss, 0 draw). Default is a no-op.
    fn complete_episode(&mut self, _reward: f64) {}
}

/// Agent that plays a uniformly random legal move.
///
/// Used standalone as a weak baseline and as the rollout policy inside the
/// UCT search.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

impl RandomAgent {
    /// Creates a new random agent
    pub fn new() -> Self {
        RandomAgent
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        let mut rng = rand::thread_rng();
        state
            .legal_moves()
            .choose(&mut rng)
            .copied()
            .ok_or(Error::NoLegalMoves)
    }
}
