//! Linear-sigmoid policy trained with Monte-Carlo REINFORCE

use ndarray::{aview1, Array1, Array2, Axis};
use tracing::debug;

use dyntax_core::{
    mean, Action, Agent, ExperimentConfig, State, Trajectory, Transition, ACTION_DIM, STATE_DIM,
};

use crate::utils::sigmoid;

/// REINFORCE hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyGradientConfig {
    /// Step size for parameter updates
    pub learning_rate: f64,
    /// Discount factor
    pub gamma: f64,
}

impl PolicyGradientConfig {
    /// Read hyperparameters from the `[agent]` section; `alpha` is the learning rate
    #[must_use]
    pub fn from_experiment(config: &ExperimentConfig) -> Self {
        Self {
            learning_rate: config.agent.alpha,
            gamma: config.agent.gamma,
        }
    }
}

/// On-policy learner with `action = sigmoid(state · θ)`.
///
/// `act` appends to the caller's trajectory, `observe` fills in the reward of
/// the latest record, and `end_episode` applies one REINFORCE update with the
/// mean return as baseline before clearing the trajectory.
pub struct PolicyGradientAgent {
    config: PolicyGradientConfig,
    theta: Array2<f64>,
    training: bool,
}

impl PolicyGradientAgent {
    /// Create an agent with zero parameters
    #[must_use]
    pub fn new(config: PolicyGradientConfig) -> Self {
        Self {
            config,
            theta: Array2::zeros((STATE_DIM, ACTION_DIM)),
            training: true,
        }
    }

    /// Create an agent from the experiment configuration
    #[must_use]
    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self::new(PolicyGradientConfig::from_experiment(config))
    }

    /// Policy parameters, `STATE_DIM x ACTION_DIM`
    #[must_use]
    pub fn theta(&self) -> &Array2<f64> {
        &self.theta
    }

    /// Deterministic policy output for `state`
    #[must_use]
    pub fn policy(&self, state: &State) -> Action {
        let logits = aview1(&state.0).dot(&self.theta);
        let mut action = [0.0; ACTION_DIM];
        for (slot, logit) in action.iter_mut().zip(logits.iter()) {
            *slot = sigmoid(*logit);
        }
        Action(action)
    }

    fn update(&mut self, trajectory: &Trajectory) {
        let returns = trajectory.returns(self.config.gamma);
        let baseline = mean(returns.iter().copied());

        for (record, ret) in trajectory.records().iter().zip(&returns) {
            let slope: Array1<f64> = aview1(&record.action.0).mapv(|a| a * (1.0 - a));
            let grad = aview1(&record.state.0)
                .insert_axis(Axis(1))
                .dot(&slope.view().insert_axis(Axis(0)));
            self.theta
                .scaled_add(self.config.learning_rate * (ret - baseline), &grad);
        }

        debug!(
            steps = trajectory.len(),
            baseline,
            theta_norm = self.theta.iter().map(|v| v * v).sum::<f64>().sqrt(),
            "policy gradient update"
        );
    }
}

impl Agent for PolicyGradientAgent {
    fn act(&mut self, state: &State, trajectory: &mut Trajectory) -> Action {
        let action = self.policy(state);
        trajectory.push(*state, action);
        action
    }

    fn observe(&mut self, transition: &Transition, trajectory: &mut Trajectory) {
        trajectory.record_reward(transition.reward.value());
    }

    fn end_episode(&mut self, trajectory: &mut Trajectory) {
        if self.training && !trajectory.is_empty() {
            self.update(trajectory);
        }
        trajectory.clear();
    }

    fn name(&self) -> &'static str {
        "policy_gradient"
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn is_training(&self) -> bool {
        self.training
    }
}
