//! Integration tests for the tax environment

use dyntax_core::{
    seeded_rng, Action, AgentConfig, AgentKind, Bounds, EnvConfig, Environment, ExperimentConfig,
    LoggingConfig, ObjectiveConfig, TaxInstruments, WelfareRule, ENV_STREAM,
};
use dyntax_env::TaxEnv;
use proptest::prelude::*;

fn make_config(horizon: usize) -> ExperimentConfig {
    ExperimentConfig {
        seed: 1337,
        horizon,
        env: EnvConfig {
            population_size: 5,
            income_grid: vec![10_000.0, 20_000.0, 35_000.0, 60_000.0, 120_000.0],
            compliance_base: 0.95,
            shock_rho: 0.9,
            shock_sigma: 0.05,
            labor_elasticity: 0.3,
        },
        tax_instruments: TaxInstruments {
            tau_labor: Bounds(0.0, 0.5),
            tau_capital: Bounds(0.0, 0.4),
            vat: Bounds(0.05, 0.25),
            transfer: Bounds(0.0, 5_000.0),
        },
        objective: ObjectiveConfig {
            welfare: WelfareRule::Atkinson,
            epsilon: Some(1.5),
            revenue_floor: 0.15,
        },
        agent: AgentConfig {
            algo: AgentKind::PolicyGradient,
            alpha: 0.01,
            gamma: 0.99,
            epsilon: None,
        },
        logging: LoggingConfig { every: 1 },
    }
}

fn scripted_actions() -> Vec<Action> {
    (0..20)
        .map(|i| {
            let x = f64::from(i) / 20.0;
            Action([x, 1.0 - x, 0.5, x * x])
        })
        .collect()
}

/// Same seed + same actions => bit-identical states, rewards and dones.
#[test]
fn test_determinism_same_seed_same_actions() {
    let config = make_config(20);
    let mut env1 = TaxEnv::from_config(&config).unwrap();
    let mut env2 = TaxEnv::from_config(&config).unwrap();

    assert_eq!(env1.reset(), env2.reset());
    for action in scripted_actions() {
        let a = env1.step(&action);
        let b = env2.step(&action);
        assert_eq!(a.state.0.map(f64::to_bits), b.state.0.map(f64::to_bits));
        assert_eq!(a.reward.value().to_bits(), b.reward.value().to_bits());
        assert_eq!(a.done, b.done);
        assert_eq!(a.info, b.info);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let config = make_config(5);
    let mut env1 = TaxEnv::new(config.clone(), seeded_rng(1, ENV_STREAM)).unwrap();
    let mut env2 = TaxEnv::new(config, seeded_rng(2, ENV_STREAM)).unwrap();
    env1.reset();
    env2.reset();
    let action = Action::splat(0.5);
    assert_ne!(env1.step(&action).state.shock_level(), env2.step(&action).state.shock_level());
}

/// Episodes last exactly `horizon` steps when no reward is NaN.
#[test]
fn test_episode_length_matches_horizon() {
    for horizon in [1, 3, 17] {
        let mut env = TaxEnv::from_config(&make_config(horizon)).unwrap();
        for _ in 0..2 {
            env.reset();
            let mut steps = 0;
            loop {
                let step = env.step(&Action::splat(0.3));
                steps += 1;
                assert!(!step.reward.is_nan());
                if step.done {
                    break;
                }
            }
            assert_eq!(steps, horizon);
        }
    }
}

/// A diverged economy ends the episode under every welfare rule.
#[test]
fn test_nan_reward_terminates() {
    for rule in [WelfareRule::Utilitarian, WelfareRule::Rawls, WelfareRule::Atkinson] {
        let mut config = make_config(50);
        config.env.shock_rho = 1.0;
        config.env.shock_sigma = 0.0;
        config.env.income_grid = vec![1.0, f64::MAX];
        config.objective.welfare = rule;
        // A full labor tax scales incomes by zero, and f64::MAX * e * 0 is NaN
        config.tax_instruments.tau_labor = Bounds(1.0, 1.0);

        let mut env = TaxEnv::from_config(&config).unwrap();
        env.reset();
        let step = env.step(&Action::splat(0.0));

        assert!(step.reward.is_nan(), "{rule:?} reward {}", step.reward.value());
        assert!(step.done, "{rule:?} did not terminate");
        assert!(step.info.welfare.is_nan(), "{rule:?}");
        assert!(step.state.gini().is_nan(), "{rule:?}");
        assert_eq!(env.time(), 1);
    }
}

#[test]
fn test_reset_reports_zero_shock() {
    let mut env = TaxEnv::from_config(&make_config(3)).unwrap();
    env.step(&Action::splat(0.5));
    let state = env.reset();
    assert_eq!(state.shock_level(), 0.0);
    assert_eq!(env.shock(), 1.0);
    assert_eq!(state.compliance(), 0.95);
    assert_eq!(state.mean_income(), 49_000.0);
}

#[test]
fn test_compliance_never_below_half() {
    let mut env = TaxEnv::from_config(&make_config(200)).unwrap();
    env.reset();
    for _ in 0..200 {
        let step = env.step(&Action::splat(1.0));
        assert!((0.5..=1.0).contains(&step.state.compliance()));
    }
}

proptest! {
    #[test]
    fn prop_mapped_action_within_bounds(
        raw in prop::array::uniform4(-10.0f64..10.0),
    ) {
        let config = make_config(3);
        let env = TaxEnv::from_config(&config).unwrap();
        let mapped = env.map_action(&Action(raw));
        for (value, bounds) in mapped.iter().zip(config.tax_instruments.as_array()) {
            prop_assert!(bounds.contains(*value), "{value} outside {bounds:?}");
        }
    }
}
