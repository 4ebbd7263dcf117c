//! Configuration for the search agents.

/// Parameters shared by both search engines.
///
/// `rounds` is the sole work bound: each decision runs exactly that many
/// simulate-and-backpropagate iterations (there is no time limit).
///
/// # Example
///
/// ```
/// use fourfall::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_rounds(2_000)
///     .with_exploration_constant(1.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Number of search rounds per decision.
    pub rounds: usize,

    /// Exploration constant.
    ///
    /// Weights the exploration term of the UCB1/PUCT score. Higher values
    /// favor less-visited moves; the classic default is sqrt(2).
    pub exploration_constant: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            rounds: 1_000,
            exploration_constant: 1.414, // sqrt(2)
        }
    }
}

impl SearchConfig {
    /// Sets the number of rounds per decision
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }
}
