//! Stylized macro-micro tax environment

use rand_distr::{Distribution, Normal};
use tracing::trace;

use dyntax_core::{
    mean, seeded_rng, Action, DtrError, Environment, ExperimentConfig, Result, Reward, SimRng, State,
    Step, StepInfo, ENV_STREAM,
};

use crate::welfare::{gini, welfare};

/// Gini reported at reset
const INITIAL_GINI: f64 = 0.35;
/// Revenue ratio reported at reset
const INITIAL_REVENUE_RATIO: f64 = 0.18;
/// Internal shock accumulator at reset
const INITIAL_SHOCK: f64 = 1.0;
/// Compliance never falls below this
const MIN_COMPLIANCE: f64 = 0.5;
/// Compliance lost per unit of labor tax
const COMPLIANCE_DECAY: f64 = 0.1;
/// Penalty per unit of revenue shortfall
const PENALTY_SCALE: f64 = 10.0;
/// Denominator floor for the revenue ratio
const MEAN_INCOME_FLOOR: f64 = 1e-6;

/// Tax environment.
///
/// State: `[shock_level, gini, revenue_ratio, compliance, mean_income]`.
/// Action: `[tau_labor, tau_capital, vat, transfer]`, normalized to `[0, 1]`
/// and mapped onto the configured instrument bounds.
/// Reward: social welfare minus the revenue-floor penalty.
///
/// The inequality measure is taken over `incomes - transfer` while welfare is
/// taken over `incomes + transfer`. The asymmetry is part of the model.
pub struct TaxEnv {
    config: ExperimentConfig,
    rng: SimRng,
    shock_noise: Normal<f64>,
    /// Mean of the last two grid points, the capital-income proxy
    capital_base: f64,
    shock: f64,
    t: usize,
    state: State,
}

impl TaxEnv {
    /// Create an environment whose shock process draws from `rng`
    pub fn new(config: ExperimentConfig, rng: SimRng) -> Result<Self> {
        config.validate()?;
        let shock_noise = Normal::new(0.0, config.env.shock_sigma)
            .map_err(|e| DtrError::invalid("env.shock_sigma", e.to_string()))?;

        let grid = &config.env.income_grid;
        let capital_base = mean(grid[grid.len().saturating_sub(2)..].iter().copied());

        let mut env = Self {
            config,
            rng,
            shock_noise,
            capital_base,
            shock: INITIAL_SHOCK,
            t: 0,
            state: State::default(),
        };
        env.reset();
        Ok(env)
    }

    /// Create an environment seeded from the configuration
    pub fn from_config(config: &ExperimentConfig) -> Result<Self> {
        Self::new(config.clone(), seeded_rng(config.seed, ENV_STREAM))
    }

    /// Clamp a raw action to `[0, 1]` and map it onto the instrument bounds
    #[must_use]
    pub fn map_action(&self, action: &Action) -> [f64; 4] {
        let bounds = self.config.tax_instruments.as_array();
        let mut out = [0.0; 4];
        for ((slot, raw), b) in out.iter_mut().zip(action.0).zip(bounds) {
            *slot = b.map_unit(raw);
        }
        out
    }

    /// Steps taken since the last reset
    #[must_use]
    pub fn time(&self) -> usize {
        self.t
    }

    /// Internal shock accumulator
    #[must_use]
    pub fn shock(&self) -> f64 {
        self.shock
    }

    /// Most recent state
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Configuration the environment was built with
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    fn evolve_shock(&mut self) -> f64 {
        let eps = self.shock_noise.sample(&mut self.rng);
        self.shock = self.config.env.shock_rho * self.shock + eps;
        self.shock.exp()
    }
}

impl Environment for TaxEnv {
    fn reset(&mut self) -> State {
        self.t = 0;
        // The reported shock level starts at zero regardless of the accumulator.
        self.shock = INITIAL_SHOCK;
        self.state = State::new(
            0.0,
            INITIAL_GINI,
            INITIAL_REVENUE_RATIO,
            self.config.env.compliance_base,
            mean(self.config.env.income_grid.iter().copied()),
        );
        self.state
    }

    fn step(&mut self, action: &Action) -> Step {
        let [tau_labor, tau_capital, vat, transfer] = self.map_action(action);

        let productivity = self.evolve_shock();

        let labor_scale = (1.0 - tau_labor).powf(self.config.env.labor_elasticity);
        let incomes: Vec<f64> = self
            .config
            .env
            .income_grid
            .iter()
            .map(|y| y * productivity * labor_scale)
            .collect();

        let compliance = (self.state.compliance() - COMPLIANCE_DECAY * tau_labor).max(MIN_COMPLIANCE);

        let mean_income = mean(incomes.iter().copied());
        let revenue =
            (tau_labor * mean_income + tau_capital * self.capital_base + vat * mean_income) * compliance;

        let net: Vec<f64> = incomes.iter().map(|y| y - transfer).collect();
        let gini = gini(&net);
        let revenue_ratio = revenue / mean_income.max(MEAN_INCOME_FLOOR);

        let objective = &self.config.objective;
        let welfare = welfare(
            objective.welfare,
            &incomes,
            transfer,
            objective.epsilon.unwrap_or(0.0),
        );

        let penalty = PENALTY_SCALE * (objective.revenue_floor - revenue_ratio).max(0.0);
        let reward = Reward(welfare - penalty);

        self.state = State::new(self.shock, gini, revenue_ratio, compliance, mean_income);
        self.t += 1;
        let done = self.t >= self.config.horizon || reward.is_nan();

        trace!(t = self.t, reward = reward.value(), done, "tax env step");

        Step {
            state: self.state,
            reward,
            done,
            info: StepInfo {
                welfare,
                penalty,
                gini,
                revenue_ratio,
            },
        }
    }
}
