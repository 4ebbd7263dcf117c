use fourfall::{
    agent::{Agent, RandomAgent, ZeroAgent},
    selfplay::{run_match, simulate_game},
    GameState, Player, Result, SearchConfig, UniformEvaluator, ZeroExperienceCollector,
};

/// Plays a fixed column sequence and remembers its episode rewards.
struct ScriptedAgent {
    script: Vec<usize>,
    next: usize,
    rewards: Vec<f64>,
}

impl ScriptedAgent {
    fn new(script: Vec<usize>) -> Self {
        ScriptedAgent {
            script,
            next: 0,
            rewards: Vec::new(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn select_move(&mut self, _state: &GameState) -> Result<usize> {
        let column = self.script[self.next];
        self.next += 1;
        Ok(column)
    }

    fn begin_episode(&mut self) {
        self.next = 0;
    }

    fn complete_episode(&mut self, reward: f64) {
        self.rewards.push(reward);
    }
}

/// Same full-board draw sequence as in the game tests, split per side.
fn draw_scripts() -> (Vec<usize>, Vec<usize>) {
    let mut moves: Vec<usize> = Vec::new();
    moves.extend(0..7);
    moves.extend(0..7);
    moves.extend([1, 0, 0, 1, 0, 1, 1, 0]);
    moves.extend([3, 2, 2, 3, 2, 3, 3, 2]);
    moves.extend([5, 4, 4, 6, 6, 5, 6, 5, 4, 4, 5, 6]);

    let first = moves.iter().step_by(2).copied().collect();
    let second = moves.iter().skip(1).step_by(2).copied().collect();
    (first, second)
}

#[test]
fn winner_gets_plus_one_and_loser_minus_one() {
    // First opens 0, 1, 2, 3 on the bottom row and wins on ply 7.
    let mut first = ScriptedAgent::new(vec![0, 1, 2, 3]);
    let mut second = ScriptedAgent::new(vec![0, 1, 2]);

    let record = simulate_game(&mut first, &mut second).unwrap();

    assert_eq!(record.winner, Some(Player::First));
    assert_eq!(record.moves, vec![0, 0, 1, 1, 2, 2, 3]);
    assert_eq!(first.rewards, vec![1.0]);
    assert_eq!(second.rewards, vec![-1.0]);
}

#[test]
fn second_player_win_is_attributed_correctly() {
    // First wastes moves on the right; Second stacks column 0.
    let mut first = ScriptedAgent::new(vec![6, 5, 4, 6]);
    let mut second = ScriptedAgent::new(vec![0, 0, 0, 0]);

    let record = simulate_game(&mut first, &mut second).unwrap();

    assert_eq!(record.winner, Some(Player::Second));
    assert_eq!(first.rewards, vec![-1.0]);
    assert_eq!(second.rewards, vec![1.0]);
}

#[test]
fn draw_rewards_both_sides_zero() {
    let (first_script, second_script) = draw_scripts();
    let mut first = ScriptedAgent::new(first_script);
    let mut second = ScriptedAgent::new(second_script);

    let record = simulate_game(&mut first, &mut second).unwrap();

    assert_eq!(record.winner, None);
    assert_eq!(record.moves.len(), 42);
    assert_eq!(first.rewards, vec![0.0]);
    assert_eq!(second.rewards, vec![0.0]);
}

#[test]
fn collecting_agent_records_one_decision_per_ply() {
    let mut collector_side = ZeroAgent::new(
        UniformEvaluator::new(),
        SearchConfig::default().with_rounds(20),
    );
    collector_side.set_collector(ZeroExperienceCollector::new());
    let mut opponent = RandomAgent::new();

    let record = simulate_game(&mut collector_side, &mut opponent).unwrap();

    let collector = collector_side.take_collector().unwrap();
    // First moves on plies 1, 3, 5, ...
    let first_plies = (record.moves.len() + 1) / 2;
    assert_eq!(collector.len(), first_plies);

    let expected_reward = match record.winner {
        Some(Player::First) => 1.0,
        Some(Player::Second) => -1.0,
        None => 0.0,
    };
    assert!(collector.rewards.iter().all(|&r| r == expected_reward));
    assert_eq!(collector.states.len(), collector.visit_counts.len());
}

#[test]
fn match_report_tallies_every_game() {
    let mut first = RandomAgent::new();
    let mut second = RandomAgent::new();

    let report = run_match(&mut first, &mut second, 10).unwrap();

    assert_eq!(report.games, 10);
    assert_eq!(
        report.wins_first + report.wins_second + report.draws,
        10
    );
    let total_rate = report.win_rate_first() + report.win_rate_second();
    assert!(total_rate <= 100.0 + 1e-9);
}
