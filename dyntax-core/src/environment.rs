//! Environment trait and step results

use serde::{Deserialize, Serialize};

use crate::{Action, Reward, State};

/// Per-step diagnostics for downstream metrics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepInfo {
    /// Welfare before penalties
    pub welfare: f64,
    /// Constraint penalty subtracted from welfare
    pub penalty: f64,
    /// Gini coefficient of post-transfer incomes
    pub gini: f64,
    /// Revenue relative to mean income
    pub revenue_ratio: f64,
}

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Resulting state
    pub state: State,
    /// Reward signal
    pub reward: Reward,
    /// Whether the episode is done
    pub done: bool,
    /// Additional info from the environment
    pub info: StepInfo,
}

/// Core environment trait
pub trait Environment {
    /// Start a new episode and return its initial state
    fn reset(&mut self) -> State;

    /// Apply `action` and advance one step
    fn step(&mut self, action: &Action) -> Step;
}
