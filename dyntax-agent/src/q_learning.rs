//! Tabular epsilon-greedy Q-learning over discretized states and actions

use rand::Rng;
use tracing::trace;

use dyntax_core::{
    seeded_rng, Action, Agent, DtrError, ExperimentConfig, Result, SimRng, State, Trajectory,
    Transition, ACTION_DIM, EXPLORATION_STREAM,
};

use crate::{DiscretizationScheme, QTable};

/// Q-learning hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningConfig {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate
    pub epsilon: f64,
}

impl QLearningConfig {
    /// Read hyperparameters from the `[agent]` section
    pub fn from_experiment(config: &ExperimentConfig) -> Result<Self> {
        let epsilon = config
            .agent
            .epsilon
            .ok_or_else(|| DtrError::MissingKey("agent.epsilon".into()))?;
        Ok(Self {
            alpha: config.agent.alpha,
            gamma: config.agent.gamma,
            epsilon,
        })
    }
}

/// Off-policy tabular learner.
///
/// States and actions are binned with a [`DiscretizationScheme`]; actions are
/// emitted as bin midpoints. Learning happens in `observe`, one transition at
/// a time, so `end_episode` has nothing to do.
pub struct QLearningAgent {
    config: QLearningConfig,
    scheme: DiscretizationScheme,
    q: QTable,
    rng: SimRng,
    training: bool,
}

impl QLearningAgent {
    /// Create an agent whose exploration draws from `rng`
    #[must_use]
    pub fn new(config: QLearningConfig, scheme: DiscretizationScheme, rng: SimRng) -> Self {
        let q = QTable::zeros(scheme.state_shape(), scheme.action_shape());
        Self {
            config,
            scheme,
            q,
            rng,
            training: true,
        }
    }

    /// Create an agent with the default scheme, seeded from the configuration
    pub fn from_config(config: &ExperimentConfig) -> Result<Self> {
        Ok(Self::new(
            QLearningConfig::from_experiment(config)?,
            DiscretizationScheme::default(),
            seeded_rng(config.seed, EXPLORATION_STREAM),
        ))
    }

    /// Learned action values
    #[must_use]
    pub fn q_table(&self) -> &QTable {
        &self.q
    }

    /// Discretization in use
    #[must_use]
    pub fn scheme(&self) -> &DiscretizationScheme {
        &self.scheme
    }

    /// Hyperparameters in use
    #[must_use]
    pub fn config(&self) -> QLearningConfig {
        self.config
    }

    /// Greedy action for `state`
    #[must_use]
    pub fn greedy_action(&self, state: &State) -> Action {
        let s = self.scheme.state_indices(state);
        self.scheme.action_from_indices(self.q.greedy(&s))
    }

    fn random_action(&mut self) -> Action {
        let shape = self.scheme.action_shape();
        let indices: [usize; ACTION_DIM] = std::array::from_fn(|i| self.rng.gen_range(0..shape[i]));
        self.scheme.action_from_indices(indices)
    }
}

impl Agent for QLearningAgent {
    fn act(&mut self, state: &State, _trajectory: &mut Trajectory) -> Action {
        if self.training && self.rng.gen::<f64>() < self.config.epsilon {
            return self.random_action();
        }
        self.greedy_action(state)
    }

    fn observe(&mut self, transition: &Transition, _trajectory: &mut Trajectory) {
        if !self.training {
            return;
        }

        let s = self.scheme.state_indices(&transition.state);
        let a = self.scheme.action_indices(&transition.action);
        let reward = transition.reward.value();

        let target = if transition.done {
            reward
        } else {
            let s2 = self.scheme.state_indices(&transition.next_state);
            reward + self.config.gamma * self.q.max_value(&s2)
        };

        let alpha = self.config.alpha;
        let cell = self.q.get_mut(&s, &a);
        *cell = (1.0 - alpha) * *cell + alpha * target;
        trace!(?s, ?a, target, q = *cell, "q update");
    }

    fn end_episode(&mut self, _trajectory: &mut Trajectory) {}

    fn name(&self) -> &'static str {
        "q_learning"
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn is_training(&self) -> bool {
        self.training
    }
}
