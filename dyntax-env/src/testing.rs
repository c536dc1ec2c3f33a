//! Fixtures shared by unit tests

use dyntax_core::{
    AgentConfig, AgentKind, Bounds, EnvConfig, ExperimentConfig, LoggingConfig, ObjectiveConfig,
    TaxInstruments, WelfareRule,
};

/// Small three-household economy with a `[0, 0.5]` labor tax
pub(crate) fn config() -> ExperimentConfig {
    ExperimentConfig {
        seed: 7,
        horizon: 5,
        env: EnvConfig {
            population_size: 3,
            income_grid: vec![1.0, 2.0, 3.0],
            compliance_base: 0.9,
            shock_rho: 0.9,
            shock_sigma: 0.05,
            labor_elasticity: 0.3,
        },
        tax_instruments: TaxInstruments {
            tau_labor: Bounds(0.0, 0.5),
            tau_capital: Bounds(0.0, 0.4),
            vat: Bounds(0.0, 0.25),
            transfer: Bounds(0.0, 1.0),
        },
        objective: ObjectiveConfig {
            welfare: WelfareRule::Rawls,
            epsilon: None,
            revenue_floor: 0.0,
        },
        agent: AgentConfig {
            algo: AgentKind::QLearning,
            alpha: 0.1,
            gamma: 0.95,
            epsilon: Some(0.1),
        },
        logging: LoggingConfig { every: 1 },
    }
}
