//! Economy state vector

use serde::{Deserialize, Serialize};

/// Number of components in a [`State`]
pub const STATE_DIM: usize = 5;

/// Observed state of the simulated economy.
///
/// Components, in order: `[shock_level, gini, revenue_ratio, compliance, mean_income]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct State(pub [f64; STATE_DIM]);

impl State {
    /// Create a state from its five named components
    #[must_use]
    pub fn new(shock_level: f64, gini: f64, revenue_ratio: f64, compliance: f64, mean_income: f64) -> Self {
        Self([shock_level, gini, revenue_ratio, compliance, mean_income])
    }

    /// Reported macro shock level
    #[must_use]
    pub fn shock_level(&self) -> f64 {
        self.0[0]
    }

    /// Gini coefficient of post-transfer incomes
    #[must_use]
    pub fn gini(&self) -> f64 {
        self.0[1]
    }

    /// Revenue collected relative to mean income
    #[must_use]
    pub fn revenue_ratio(&self) -> f64 {
        self.0[2]
    }

    /// Fraction of owed tax actually collected
    #[must_use]
    pub fn compliance(&self) -> f64 {
        self.0[3]
    }

    /// Mean realized income
    #[must_use]
    pub fn mean_income(&self) -> f64 {
        self.0[4]
    }
}
