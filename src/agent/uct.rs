//! Random-rollout Monte-Carlo Tree Search (UCT).
//!
//! Each decision builds a private tree over four repeated phases:
//! UCB1 selection, uniform-random expansion, a random playout for both
//! sides, and backpropagation of the ternary outcome (win/loss/draw) along
//! the path from the root to the expanded node.

use std::time::Instant;

use log::debug;
use rand::prelude::IteratorRandom;

use crate::agent::{Agent, RandomAgent};
use crate::config::SearchConfig;
use crate::game::{GameState, Player};
use crate::stats::SearchStatistics;
use crate::{Error, Result};

/// Per-outcome rollout counters.
///
/// A draw goes into its own bucket: a rollout only credits the player who
/// won it, so draws dilute both players' win rates symmetrically.
#[derive(Debug, Clone, Copy, Default)]
struct WinCounts {
    first: u64,
    second: u64,
    draws: u64,
}

impl WinCounts {
    fn record(&mut self, winner: Option<Player>) {
        match winner {
            Some(Player::First) => self.first += 1,
            Some(Player::Second) => self.second += 1,
            None => self.draws += 1,
        }
    }

    fn for_player(&self, player: Player) -> u64 {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }
}

/// A node in the UCT search tree.
///
/// Children are exclusively owned; backpropagation walks a root-to-leaf
/// index path instead of parent pointers, so the tree has no cycles.
struct UctNode {
    state: GameState,

    /// Column that produced this state (None for the root).
    column: Option<usize>,

    wins: WinCounts,
    rollouts: u64,
    children: Vec<UctNode>,

    /// Legal moves not yet expanded into children.
    untried_moves: Vec<usize>,
}

impl UctNode {
    fn new(state: GameState, column: Option<usize>) -> Self {
        let untried_moves = state.legal_moves();
        UctNode {
            state,
            column,
            wins: WinCounts::default(),
            rollouts: 0,
            children: Vec::new(),
            untried_moves,
        }
    }

    /// Fraction of rollouts through this node won by `player`.
    ///
    /// 0.0 before any rollouts, so an unvisited child never looks better
    /// than the -1.0 sentinel used for final move selection.
    fn win_rate(&self, player: Player) -> f64 {
        if self.rollouts == 0 {
            return 0.0;
        }
        self.wins.for_player(player) as f64 / self.rollouts as f64
    }

    fn can_expand(&self) -> bool {
        !self.untried_moves.is_empty()
    }

    fn record(&mut self, winner: Option<Player>) {
        self.wins.record(winner);
        self.rollouts += 1;
    }
}

/// Plays a position out to the end with the random rollout policy on both
/// sides and returns the winner (None for a draw).
fn simulate_random_game(state: &GameState) -> Result<Option<Player>> {
    let mut rollout = RandomAgent::new();
    let mut current = state.clone();
    while !current.is_over() {
        let column = rollout.select_move(&current)?;
        current = current.apply_move(column)?;
    }
    Ok(current.winner())
}

/// Monte-Carlo Tree Search agent with random rollouts.
pub struct UctAgent {
    config: SearchConfig,
    statistics: SearchStatistics,
}

impl UctAgent {
    /// Creates a new UCT agent with the given configuration
    pub fn new(config: SearchConfig) -> Self {
        UctAgent {
            config,
            statistics: SearchStatistics::new(),
        }
    }

    /// Returns the statistics of the most recent decision
    pub fn last_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Selects a child by UCB1 score from the perspective of the player to
    /// move at `node`. First strictly greater score wins; children are in
    /// creation order.
    fn select_child(&self, node: &UctNode) -> usize {
        let mover = node.state.next_player();
        let parent_rollouts = node.rollouts;

        let mut best_score = f64::NEG_INFINITY;
        let mut best_index = 0;

        for (i, child) in node.children.iter().enumerate() {
            let score = if child.rollouts == 0 {
                f64::INFINITY
            } else {
                let exploration = ((parent_rollouts as f64).ln() / child.rollouts as f64).sqrt();
                child.win_rate(mover) + self.config.exploration_constant * exploration
            };

            if score > best_score {
                best_score = score;
                best_index = i;
            }
        }

        best_index
    }

    /// Runs one selection / expansion / simulation / backpropagation round.
    fn execute_round(&self, root: &mut UctNode, stats: &mut SearchStatistics) -> Result<()> {
        // Selection: descend while the node has no untried moves and the
        // game is not over.
        let mut path: Vec<usize> = Vec::new();
        {
            let mut current = &*root;
            while !current.can_expand()
                && !current.state.is_over()
                && !current.children.is_empty()
            {
                let index = self.select_child(current);
                path.push(index);
                current = &current.children[index];
            }
        }

        // Expansion: follow the path mutably, then try a random untried move.
        let mut node = &mut *root;
        for &index in &path {
            node = &mut node.children[index];
        }

        let mut playout_start = node.state.clone();
        if node.can_expand() {
            let mut rng = rand::thread_rng();
            let move_index = (0..node.untried_moves.len())
                .choose(&mut rng)
                .unwrap_or(0);
            let column = node.untried_moves.swap_remove(move_index);

            let child_state = node.state.apply_move(column)?;
            playout_start = child_state.clone();
            node.children.push(UctNode::new(child_state, Some(column)));
            path.push(node.children.len() - 1);
            stats.tree_size += 1;
        }
        stats.max_depth = stats.max_depth.max(path.len());

        // Simulation.
        let winner = simulate_random_game(&playout_start)?;

        // Backpropagation: every node from the root to the expanded node
        // records the rollout and its outcome.
        root.record(winner);
        let mut node = &mut *root;
        for &index in &path {
            node = &mut node.children[index];
            node.record(winner);
        }

        Ok(())
    }
}

impl Agent for UctAgent {
    /// Runs `config.rounds` search rounds and returns the root child with
    /// the best win rate for the player to move.
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        let start = Instant::now();
        let mut stats = SearchStatistics::new();

        let mut root = UctNode::new(state.clone(), None);
        if root.untried_moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        for round in 0..self.config.rounds {
            self.execute_round(&mut root, &mut stats)?;
            stats.rounds = round + 1;
        }
        stats.total_time = start.elapsed();

        // The -1.0 sentinel guarantees every real child beats the initial
        // best, even children with a 0.0 win rate.
        let mover = state.next_player();
        let mut best_rate = -1.0;
        let mut best_move = None;
        for child in &root.children {
            let rate = child.win_rate(mover);
            if rate > best_rate {
                best_rate = rate;
                best_move = child.column;
            }
        }

        debug!("uct search done: {}", stats.summary());
        self.statistics = stats;

        match best_move {
            Some(column) => Ok(column),
            // No rounds ran, so no children exist yet; the first untried
            // move is still a legal choice.
            None => root.untried_moves.first().copied().ok_or(Error::NoLegalMoves),
        }
    }
}
