//! # fourfall
//!
//! Tree-search decision engines for Connect-Four.
//!
//! Two search algorithms share the fixed 7x6 game model in [`game`]:
//!
//! - [`UctAgent`](agent::UctAgent): plain Monte-Carlo Tree Search with
//!   random rollouts and UCB1 move selection.
//! - [`ZeroAgent`](agent::ZeroAgent): AlphaZero-style PUCT search guided by
//!   an external [`Evaluator`] supplying move priors and a position value.
//!
//! Every agent implements the single [`Agent`](agent::Agent) capability
//! (`select_move(state) -> column`), so random bots, both search engines,
//! and scripted or human adapters compose freely in the self-play
//! orchestrator ([`selfplay`]). PUCT searches can record per-decision
//! visit-count distributions through an [`ExperienceCollector`] for
//! external training.
//!
//! ## Basic Usage
//!
//! ```
//! use fourfall::{agent::{Agent, UctAgent}, GameState, SearchConfig};
//!
//! fn main() -> fourfall::Result<()> {
//!     let state = GameState::new_game();
//!     let config = SearchConfig::default()
//!         .with_rounds(50)
//!         .with_exploration_constant(1.414);
//!
//!     let mut bot = UctAgent::new(config);
//!     let column = bot.select_move(&state)?;
//!     let state = state.apply_move(column)?;
//!     assert!(!state.is_over());
//!     Ok(())
//! }
//! ```
//!
//! ## How a decision is made
//!
//! Each `select_move` call builds a private search tree rooted at the given
//! state, runs a fixed number of simulate-and-backpropagate rounds, picks a
//! column, and discards the tree. Nothing survives the call: there is no
//! cross-decision tree reuse and no shared mutable state, so independent
//! self-play games parallelize freely as long as the evaluator itself is
//! safe to call concurrently.

pub mod agent;
pub mod config;
pub mod evaluate;
pub mod experience;
pub mod game;
pub mod selfplay;
pub mod stats;

pub use config::SearchConfig;
pub use evaluate::{Evaluation, Evaluator, UniformEvaluator};
pub use experience::{ExperienceBuffer, ExperienceCollector, ZeroExperienceCollector};
pub use game::{Board, GameState, PlacedMove, Player, COLS, ROWS};
pub use stats::SearchStatistics;

/// Error types for game and search operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The column is out of range or already full
    #[error("invalid move: column {0} is out of range or full")]
    InvalidMove(usize),

    /// A move was requested from a position with no legal moves;
    /// callers must check `GameState::is_over` first
    #[error("no legal moves available from current state")]
    NoLegalMoves,

    /// The external evaluator broke its contract (priors covering no legal
    /// move, non-finite priors, or a value outside [-1, 1])
    #[error("evaluator contract violation: {0}")]
    EvaluatorContract(String),
}

/// Result type for fourfall operations
pub type Result<T> = std::result::Result<T, Error>;
