//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per move decision.
    pub num_simulations: u32,

    /// Exploration constant for the UCB formula (c_puct in AlphaZero).
    /// Higher values encourage exploration, lower values favor exploitation.
    pub c_puct: f32,

    /// Temperature for turning root visit counts into a distribution.
    /// 0.0 = one-hot on the most visited action
    /// 1.0 = proportional to visit counts
    pub temperature: f32,

    /// Optional wall-clock cap. Checked between simulations; the search stops
    /// early once it is exceeded and reports the partial counts.
    pub time_budget: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 400,
            c_puct: 1.0,
            temperature: 0.0,
            time_budget: None,
        }
    }
}

impl MctsConfig {
    /// Config for serving moves: greedy selection.
    pub fn for_play() -> Self {
        Self::default()
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            c_puct: 1.0,
            temperature: 0.0,
            time_budget: None,
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set c_puct exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Builder pattern: set temperature.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Builder pattern: set or clear the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }
}
