//! The external evaluator boundary used by the PUCT search.
//!
//! The search engine neither knows nor cares how priors and values are
//! produced; a neural network, a heuristic, or the uniform stub below all
//! satisfy the same contract.

use crate::game::{GameState, COLS, ROWS};
use crate::Result;

/// One evaluation of a position.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Probability assigned to dropping into each column.
    ///
    /// Entries for illegal columns are ignored by the search.
    pub priors: [f64; COLS],

    /// Estimated outcome in [-1, 1] from the perspective of the player to
    /// move in the evaluated state (+1 = that player wins).
    pub value: f64,
}

/// Capability the PUCT search requires from a model.
///
/// `evaluate` must be safe to call concurrently from multiple search
/// instances; otherwise each worker needs its own evaluator.
pub trait Evaluator: Send + Sync {
    /// Returns move priors and a value estimate for `state`.
    fn evaluate(&self, state: &GameState) -> Result<Evaluation>;

    /// Encodes `state` into the representation stored with recorded
    /// decisions. The search never interprets the encoding; it only hands
    /// it to the experience collector.
    fn encode(&self, state: &GameState) -> Vec<f32>;
}

/// Baseline evaluator: uniform priors over legal moves, value 0.
///
/// Useful as a stand-in before a trained model exists; PUCT guided by it
/// degenerates to pure visit-count exploration.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    /// Creates a new uniform evaluator
    pub fn new() -> Self {
        UniformEvaluator
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, state: &GameState) -> Result<Evaluation> {
        let legal = state.legal_moves();
        let mut priors = [0.0; COLS];
        if !legal.is_empty() {
            let p = 1.0 / legal.len() as f64;
            for column in legal {
                priors[column] = p;
            }
        }
        Ok(Evaluation { priors, value: 0.0 })
    }

    fn encode(&self, state: &GameState) -> Vec<f32> {
        // Two planes: the mover's pieces, then the opponent's.
        let mover = state.next_player();
        let mut planes = vec![0.0; 2 * COLS * ROWS];
        for col in 0..COLS {
            for row in 0..ROWS {
                if let Some(owner) = state.board().get(col as isize, row as isize) {
                    let plane = if owner == mover { 0 } else { 1 };
                    planes[plane * COLS * ROWS + col * ROWS + row] = 1.0;
                }
            }
        }
        planes
    }
}
