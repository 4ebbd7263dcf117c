//! Self-play experience collection.
//!
//! A collector accumulates one training example per search decision: the
//! encoded root state and the root's visit-count distribution. At game end
//! every decision of the episode is stamped with the same scalar reward
//! (+1 win, -1 loss, 0 draw from the deciding player's perspective).
//! Training itself is external; this module only produces the examples.

use crate::game::COLS;

/// Capability for receiving self-play decisions and episode rewards.
///
/// Lifecycle per game: `begin_episode`, then `record_decision` once per
/// search decision, then `complete_episode` exactly once.
pub trait ExperienceCollector {
    /// Starts a fresh episode, discarding any uncommitted decisions.
    fn begin_episode(&mut self);

    /// Records one decision: the encoded root state and the per-column
    /// visit counts of the finished search.
    fn record_decision(&mut self, encoding: Vec<f32>, visit_counts: [u64; COLS]);

    /// Finishes the episode, stamping every recorded decision with `reward`.
    fn complete_episode(&mut self, reward: f64);
}

/// In-memory experience collector for PUCT self-play.
#[derive(Debug, Clone, Default)]
pub struct ZeroExperienceCollector {
    /// Committed state encodings, one per decision.
    pub states: Vec<Vec<f32>>,

    /// Committed visit-count vectors, parallel to `states`.
    pub visit_counts: Vec<[u64; COLS]>,

    /// Committed rewards, parallel to `states`.
    pub rewards: Vec<f64>,

    current_states: Vec<Vec<f32>>,
    current_visit_counts: Vec<[u64; COLS]>,
}

impl ZeroExperienceCollector {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of committed examples
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no examples have been committed
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl ExperienceCollector for ZeroExperienceCollector {
    fn begin_episode(&mut self) {
        self.current_states.clear();
        self.current_visit_counts.clear();
    }

    fn record_decision(&mut self, encoding: Vec<f32>, visit_counts: [u64; COLS]) {
        self.current_states.push(encoding);
        self.current_visit_counts.push(visit_counts);
    }

    fn complete_episode(&mut self, reward: f64) {
        let decisions = self.current_states.len();
        self.states.append(&mut self.current_states);
        self.visit_counts.append(&mut self.current_visit_counts);
        self.rewards.extend(std::iter::repeat(reward).take(decisions));
    }
}

/// A training batch merged from finished collectors.
#[derive(Debug, Clone, Default)]
pub struct ExperienceBuffer {
    /// State encodings, one per example.
    pub states: Vec<Vec<f32>>,

    /// Visit-count vectors, parallel to `states`.
    pub visit_counts: Vec<[u64; COLS]>,

    /// Rewards, parallel to `states`.
    pub rewards: Vec<f64>,
}

impl ExperienceBuffer {
    /// Merges the committed examples of several collectors into one batch,
    /// e.g. the per-worker collectors of a self-play run.
    pub fn combine(collectors: Vec<ZeroExperienceCollector>) -> Self {
        let mut buffer = ExperienceBuffer::default();
        for mut collector in collectors {
            buffer.states.append(&mut collector.states);
            buffer.visit_counts.append(&mut collector.visit_counts);
            buffer.rewards.append(&mut collector.rewards);
        }
        buffer
    }

    /// Returns the number of examples in the batch
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
