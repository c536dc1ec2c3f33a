//! Experiment configuration
//!
//! Configuration is read from TOML in two passes: the document is first parsed
//! into a [`toml::Table`] so that absent keys can be reported by their dotted
//! path, then deserialized into [`ExperimentConfig`] and validated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DtrError, Result, INSTRUMENTS};

/// Seed used when the configuration does not name one
pub const DEFAULT_SEED: u64 = 1337;

/// Keys that must be present in every configuration file
const REQUIRED_KEYS: &[&str] = &[
    "horizon",
    "env.population_size",
    "env.income_grid",
    "env.compliance_base",
    "env.shock_rho",
    "env.shock_sigma",
    "env.labor_elasticity",
    "tax_instruments.tau_labor",
    "tax_instruments.tau_capital",
    "tax_instruments.vat",
    "tax_instruments.transfer",
    "objective.welfare",
    "objective.revenue_floor",
    "agent.algo",
    "agent.alpha",
    "agent.gamma",
    "logging.every",
];

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Full experiment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Seed for every random stream in the experiment
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Steps per episode before forced termination
    pub horizon: usize,
    /// Economy parameters
    pub env: EnvConfig,
    /// Instrument bounds for action mapping
    pub tax_instruments: TaxInstruments,
    /// Reward definition
    pub objective: ObjectiveConfig,
    /// Learner selection and hyperparameters
    pub agent: AgentConfig,
    /// Progress reporting
    pub logging: LoggingConfig,
}

/// Economy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Reserved; not consumed by the transition model
    pub population_size: usize,
    /// Base income distribution, expected ascending
    pub income_grid: Vec<f64>,
    /// Compliance at reset
    pub compliance_base: f64,
    /// AR(1) persistence of the productivity shock
    pub shock_rho: f64,
    /// Standard deviation of the shock innovation
    pub shock_sigma: f64,
    /// Labor-supply response exponent
    pub labor_elasticity: f64,
}

/// Closed `[lo, hi]` range for one instrument, written as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds(pub f64, pub f64);

impl Bounds {
    /// Lower bound
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.0
    }

    /// Upper bound
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.1
    }

    /// Whether `value` lies inside the bounds
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.0 && value <= self.1
    }

    /// Affinely map a normalized value onto the bounds.
    ///
    /// The input is clamped to `[0, 1]` first and the output to `[lo, hi]`, so
    /// the result is always inside the bounds. NaN maps to `lo`.
    #[must_use]
    pub fn map_unit(&self, value: f64) -> f64 {
        let unit = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        (self.0 + (self.1 - self.0) * unit).clamp(self.0, self.1)
    }
}

/// Bounds for the four tax/transfer levers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxInstruments {
    /// Labor income tax rate
    pub tau_labor: Bounds,
    /// Capital income tax rate
    pub tau_capital: Bounds,
    /// Value-added tax rate
    pub vat: Bounds,
    /// Flat transfer per unit
    pub transfer: Bounds,
}

impl TaxInstruments {
    /// Bounds in action-vector order
    #[must_use]
    pub fn as_array(&self) -> [Bounds; 4] {
        [self.tau_labor, self.tau_capital, self.vat, self.transfer]
    }
}

/// Social welfare rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WelfareRule {
    /// Mean of `log(1 + y)`
    Utilitarian,
    /// Minimum of `log(1 + y)`
    Rawls,
    /// Inequality-averse Atkinson index
    Atkinson,
}

/// Reward definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    /// Welfare rule selector
    pub welfare: WelfareRule,
    /// Atkinson inequality aversion; required for `atkinson`
    #[serde(default)]
    pub epsilon: Option<f64>,
    /// Minimum revenue ratio before the penalty applies
    pub revenue_floor: f64,
}

/// Which learner to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// Tabular epsilon-greedy Q-learning
    #[serde(rename = "q_learning")]
    QLearning,
    /// Linear-sigmoid REINFORCE
    #[serde(rename = "policy_gradient", alias = "pg")]
    PolicyGradient,
}

/// Learner hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learner selection
    pub algo: AgentKind,
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate; required for `q_learning`
    #[serde(default)]
    pub epsilon: Option<f64>,
}

/// Progress reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Report training progress every N episodes
    pub every: usize,
}

impl ExperimentConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;

        for key in REQUIRED_KEYS {
            if lookup(&table, key).is_none() {
                return Err(DtrError::MissingKey((*key).to_string()));
            }
        }

        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and conditionally required keys
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(DtrError::invalid("horizon", "must be at least 1"));
        }

        let env = &self.env;
        if env.income_grid.is_empty() {
            return Err(DtrError::invalid("env.income_grid", "must not be empty"));
        }
        if env.income_grid.iter().any(|y| !y.is_finite() || *y < 0.0) {
            return Err(DtrError::invalid(
                "env.income_grid",
                "entries must be finite and non-negative",
            ));
        }
        if !(0.5..=1.0).contains(&env.compliance_base) {
            return Err(DtrError::invalid("env.compliance_base", "must lie in [0.5, 1]"));
        }
        finite("env.shock_rho", env.shock_rho)?;
        finite("env.labor_elasticity", env.labor_elasticity)?;
        finite("env.shock_sigma", env.shock_sigma)?;
        if env.shock_sigma < 0.0 {
            return Err(DtrError::invalid("env.shock_sigma", "must be non-negative"));
        }

        for (name, bounds) in INSTRUMENTS.iter().zip(self.tax_instruments.as_array()) {
            let key = format!("tax_instruments.{name}");
            if !bounds.lo().is_finite() || !bounds.hi().is_finite() {
                return Err(DtrError::invalid(key, "bounds must be finite"));
            }
            if bounds.lo() > bounds.hi() {
                return Err(DtrError::invalid(key, "lower bound exceeds upper bound"));
            }
        }

        finite("objective.revenue_floor", self.objective.revenue_floor)?;
        if self.objective.welfare == WelfareRule::Atkinson {
            let eps = self
                .objective
                .epsilon
                .ok_or_else(|| DtrError::MissingKey("objective.epsilon".into()))?;
            finite("objective.epsilon", eps)?;
        }

        unit_interval("agent.alpha", self.agent.alpha)?;
        unit_interval("agent.gamma", self.agent.gamma)?;
        if self.agent.algo == AgentKind::QLearning {
            let eps = self
                .agent
                .epsilon
                .ok_or_else(|| DtrError::MissingKey("agent.epsilon".into()))?;
            unit_interval("agent.epsilon", eps)?;
        } else if let Some(eps) = self.agent.epsilon {
            unit_interval("agent.epsilon", eps)?;
        }

        Ok(())
    }
}

fn lookup<'a>(table: &'a toml::Table, path: &str) -> Option<&'a toml::Value> {
    let mut parts = path.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

fn finite(key: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DtrError::invalid(key, "must be finite"))
    }
}

fn unit_interval(key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DtrError::invalid(key, "must lie in [0, 1]"))
    }
}
