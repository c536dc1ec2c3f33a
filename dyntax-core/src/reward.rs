//! Reward signal

use serde::{Deserialize, Serialize};

/// Reward signal from the environment
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Reward(pub f64);

impl Reward {
    /// Get the reward value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether the reward has diverged to NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }
}
