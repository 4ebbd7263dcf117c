//! Evaluator-guided PUCT search (AlphaZero-style).
//!
//! Instead of random rollouts, every newly visited position is evaluated
//! once by an external [`Evaluator`] for move priors and a value estimate.
//! Branch selection weighs the priors; backpropagation flips the sign of
//! the value at every ply, since values are always from the perspective of
//! the player to move.
//!
//! The tree is an arena of nodes indexed by integer handle; parent and
//! child links are plain indices, so backpropagation needs no reference
//! cycles.

use std::time::Instant;

use log::debug;

use crate::agent::Agent;
use crate::config::SearchConfig;
use crate::evaluate::Evaluator;
use crate::experience::{ExperienceCollector, ZeroExperienceCollector};
use crate::game::{GameState, COLS};
use crate::stats::SearchStatistics;
use crate::{Error, Result};

/// Per-move statistics of a PUCT node.
#[derive(Debug, Clone, Copy)]
struct Branch {
    prior: f64,
    visit_count: u64,
    total_value: f64,
}

impl Branch {
    fn new(prior: f64) -> Self {
        Branch {
            prior,
            visit_count: 0,
            total_value: 0.0,
        }
    }
}

/// A node in the PUCT search arena.
struct ZeroNode {
    state: GameState,

    /// Evaluator value for `state`, from the perspective of its mover.
    value: f64,

    /// Arena index of the parent (None for the root).
    parent: Option<usize>,

    /// Column taken at the parent to reach this node (None for the root).
    column: Option<usize>,

    /// Total visits through this node. Starts at 1 for the creation visit.
    total_visits: u64,

    /// Branch statistics, indexed by column; None for illegal columns.
    branches: [Option<Branch>; COLS],

    /// Arena indices of expanded children, indexed by column.
    children: [Option<usize>; COLS],
}

impl ZeroNode {
    /// Mean backed-up value of a branch; 0.0 while unvisited.
    fn expected_value(&self, column: usize) -> f64 {
        match self.branches[column] {
            Some(branch) if branch.visit_count > 0 => {
                branch.total_value / branch.visit_count as f64
            }
            _ => 0.0,
        }
    }

    fn visit_count(&self, column: usize) -> u64 {
        self.branches[column].map_or(0, |branch| branch.visit_count)
    }

    fn record_visit(&mut self, column: usize, value: f64) {
        self.total_visits += 1;
        if let Some(branch) = self.branches[column].as_mut() {
            branch.visit_count += 1;
            branch.total_value += value;
        }
    }

    /// False only for terminal positions, which have no legal moves.
    fn has_branches(&self) -> bool {
        self.branches.iter().any(|branch| branch.is_some())
    }
}

/// Arena holding one search's nodes.
struct ZeroTree {
    nodes: Vec<ZeroNode>,
}

impl ZeroTree {
    fn new() -> Self {
        ZeroTree { nodes: Vec::new() }
    }

    fn node(&self, index: usize) -> &ZeroNode {
        &self.nodes[index]
    }

    /// Evaluates `state`, validates the evaluator contract, and appends a
    /// node for it, linked under `parent` when given.
    fn create_node<E: Evaluator>(
        &mut self,
        evaluator: &E,
        state: GameState,
        column: Option<usize>,
        parent: Option<usize>,
    ) -> Result<usize> {
        let evaluation = evaluator.evaluate(&state)?;

        if !evaluation.value.is_finite() || evaluation.value.abs() > 1.0 {
            return Err(Error::EvaluatorContract(format!(
                "value {} outside [-1, 1]",
                evaluation.value
            )));
        }

        let legal = state.legal_moves();
        let mut legal_mass = 0.0;
        for &column in &legal {
            let prior = evaluation.priors[column];
            if !prior.is_finite() || prior < 0.0 {
                return Err(Error::EvaluatorContract(format!(
                    "prior {} for column {} is not a probability",
                    prior, column
                )));
            }
            legal_mass += prior;
        }
        if !legal.is_empty() && legal_mass <= 0.0 {
            return Err(Error::EvaluatorContract(
                "priors assign no mass to any legal move".to_string(),
            ));
        }

        // Branches exist for legal moves only; their priors are
        // renormalized over the legal mass so discarded illegal-move mass
        // does not bias selection.
        let mut branches = [None; COLS];
        for &column in &legal {
            branches[column] = Some(Branch::new(evaluation.priors[column] / legal_mass));
        }

        let index = self.nodes.len();
        self.nodes.push(ZeroNode {
            state,
            value: evaluation.value,
            parent,
            column,
            total_visits: 1,
            branches,
            children: [None; COLS],
        });

        if let (Some(parent), Some(column)) = (parent, column) {
            self.nodes[parent].children[column] = Some(index);
        }

        Ok(index)
    }

    /// Records `value` for `column` at `from` and walks to the root,
    /// negating the value at every ply.
    fn backpropagate(&mut self, from: usize, column: usize, value: f64) {
        let mut index = from;
        let mut column = column;
        let mut value = value;
        loop {
            let node = &mut self.nodes[index];
            node.record_visit(column, value);
            match (node.parent, node.column) {
                (Some(parent), Some(taken)) => {
                    index = parent;
                    column = taken;
                    value = -value;
                }
                _ => break,
            }
        }
    }
}

/// PUCT search agent driven by an external evaluator.
///
/// With a collector attached, every decision records the encoded root
/// state and the root's visit-count distribution for later training.
pub struct ZeroAgent<E: Evaluator, C: ExperienceCollector = ZeroExperienceCollector> {
    evaluator: E,
    config: SearchConfig,
    collector: Option<C>,
    statistics: SearchStatistics,
}

impl<E: Evaluator, C: ExperienceCollector> ZeroAgent<E, C> {
    /// Creates a new PUCT agent around `evaluator`
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        ZeroAgent {
            evaluator,
            config,
            collector: None,
            statistics: SearchStatistics::new(),
        }
    }

    /// Attaches an experience collector to record decisions into
    pub fn set_collector(&mut self, collector: C) {
        self.collector = Some(collector);
    }

    /// Detaches and returns the collector, if one was attached
    pub fn take_collector(&mut self) -> Option<C> {
        self.collector.take()
    }

    /// Returns the statistics of the most recent decision
    pub fn last_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Picks the branch maximizing `Q + C * P * sqrt(N) / (n + 1)`.
    ///
    /// Columns are scanned in ascending order and the first strictly
    /// greater score wins. None only for branchless (terminal) nodes.
    fn select_branch(&self, node: &ZeroNode) -> Option<usize> {
        let total = node.total_visits as f64;

        let mut best_score = f64::NEG_INFINITY;
        let mut best_column = None;

        for column in 0..COLS {
            let branch = match node.branches[column] {
                Some(branch) => branch,
                None => continue,
            };
            let q = node.expected_value(column);
            let u = self.config.exploration_constant * branch.prior * total.sqrt()
                / (branch.visit_count as f64 + 1.0);

            if q + u > best_score {
                best_score = q + u;
                best_column = Some(column);
            }
        }

        best_column
    }

    /// Runs one select / expand / backpropagate round.
    fn execute_round(
        &self,
        tree: &mut ZeroTree,
        root: usize,
        stats: &mut SearchStatistics,
    ) -> Result<()> {
        // Selection: follow chosen moves into existing children until one
        // has not been expanded yet.
        let mut node = root;
        let mut depth = 0;
        let mut next_move = match self.select_branch(tree.node(node)) {
            Some(column) => column,
            None => return Err(Error::NoLegalMoves),
        };
        loop {
            let child = match tree.node(node).children[next_move] {
                Some(child) => child,
                None => break,
            };
            node = child;
            depth += 1;

            match self.select_branch(tree.node(node)) {
                Some(column) => next_move = column,
                None => {
                    // A terminal node re-visited during descent: back its
                    // stored value up again without expanding.
                    stats.max_depth = stats.max_depth.max(depth);
                    let leaf = tree.node(node);
                    if let (Some(parent), Some(taken)) = (leaf.parent, leaf.column) {
                        let value = -leaf.value;
                        tree.backpropagate(parent, taken, value);
                    }
                    return Ok(());
                }
            }
        }

        // Expansion: evaluate the new position and attach it.
        let new_state = tree.node(node).state.apply_move(next_move)?;
        let child = tree.create_node(&self.evaluator, new_state, Some(next_move), Some(node))?;
        stats.tree_size += 1;
        stats.max_depth = stats.max_depth.max(depth + 1);

        // Value propagation: the child's value is from its own mover's
        // perspective, so it flips sign before the first record and at
        // every step up.
        let value = -tree.node(child).value;
        tree.backpropagate(node, next_move, value);

        Ok(())
    }
}

impl<E: Evaluator, C: ExperienceCollector> Agent for ZeroAgent<E, C> {
    /// Runs `config.rounds` search rounds and returns the root move with
    /// the most visits.
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        let start = Instant::now();
        let mut stats = SearchStatistics::new();

        let mut tree = ZeroTree::new();
        let root = tree.create_node(&self.evaluator, state.clone(), None, None)?;
        if !tree.node(root).has_branches() {
            return Err(Error::NoLegalMoves);
        }

        for round in 0..self.config.rounds {
            self.execute_round(&mut tree, root, &mut stats)?;
            stats.rounds = round + 1;
        }
        stats.total_time = start.elapsed();

        if let Some(collector) = self.collector.as_mut() {
            let mut visit_counts = [0u64; COLS];
            for (column, count) in visit_counts.iter_mut().enumerate() {
                *count = tree.node(root).visit_count(column);
            }
            collector.record_decision(self.evaluator.encode(state), visit_counts);
        }

        // Most-visited root move; ascending column scan keeps the first of
        // any tied maxima.
        let root_node = tree.node(root);
        let mut best_visits = 0;
        let mut best_column = None;
        for column in 0..COLS {
            if root_node.branches[column].is_none() {
                continue;
            }
            let visits = root_node.visit_count(column);
            if best_column.is_none() || visits > best_visits {
                best_visits = visits;
                best_column = Some(column);
            }
        }

        debug!("puct search done: {}", stats.summary());
        self.statistics = stats;

        best_column.ok_or(Error::NoLegalMoves)
    }

    fn begin_episode(&mut self) {
        if let Some(collector) = self.collector.as_mut() {
            collector.begin_episode();
        }
    }

    fn complete_episode(&mut self, reward: f64) {
        if let Some(collector) = self.collector.as_mut() {
            collector.complete_episode(reward);
        }
    }
}
