//! Transitions and episode-scoped trajectories

use serde::{Deserialize, Serialize};

use crate::{Action, Reward, State};

/// Single environment transition as seen by an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State the action was taken in
    pub state: State,
    /// Action taken
    pub action: Action,
    /// Reward received
    pub reward: Reward,
    /// Resulting state
    pub next_state: State,
    /// Whether the episode ended
    pub done: bool,
}

/// One `act` call and the reward later observed for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// State the action was chosen in
    pub state: State,
    /// Action returned by the agent
    pub action: Action,
    /// Reward observed for this step, zero until observed
    pub reward: f64,
}

/// Ordered step records for a single episode.
///
/// The buffer belongs to the episode scope that drives the agent. Agents that
/// learn from whole episodes append to it in `act`, fill rewards in `observe`
/// and drain it in `end_episode`.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    records: Vec<StepRecord>,
}

impl Trajectory {
    /// Create a new empty trajectory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a freshly chosen action
    pub fn push(&mut self, state: State, action: Action) {
        self.records.push(StepRecord {
            state,
            action,
            reward: 0.0,
        });
    }

    /// Store `reward` on the most recent record.
    ///
    /// Returns `false` when there is no record to attach it to.
    pub fn record_reward(&mut self, reward: f64) -> bool {
        match self.records.last_mut() {
            Some(last) => {
                last.reward = reward;
                true
            }
            None => false,
        }
    }

    /// Get the length of the trajectory
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if trajectory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recorded steps in order
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Discounted return from each step to the end of the episode
    #[must_use]
    pub fn returns(&self, gamma: f64) -> Vec<f64> {
        let mut returns = vec![0.0; self.len()];
        let mut running_return = 0.0;

        for (i, record) in self.records.iter().enumerate().rev() {
            running_return = record.reward + gamma * running_return;
            returns[i] = running_return;
        }

        returns
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
