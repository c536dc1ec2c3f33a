//! End-to-end tests driving both learners against the tax environment

use dyntax_agent::{build_agent, PolicyGradientAgent, QLearningAgent};
use dyntax_core::{
    evaluate, run_episode, train, Agent, AgentConfig, AgentKind, Bounds, EnvConfig, Environment,
    ExperimentConfig, LoggingConfig, ObjectiveConfig, TaxInstruments, Trajectory, Transition,
    WelfareRule, ACTION_DIM, STATE_DIM,
};
use dyntax_env::TaxEnv;

fn make_config(algo: AgentKind, horizon: usize) -> ExperimentConfig {
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
            vat: Bounds(0.0, 0.25),
            transfer: Bounds(0.0, 5_000.0),
        },
        objective: ObjectiveConfig {
            welfare: WelfareRule::Rawls,
            epsilon: None,
            revenue_floor: 0.0,
        },
        agent: AgentConfig {
            algo,
            alpha: 0.1,
            gamma: 0.95,
            epsilon: Some(0.0),
        },
        logging: LoggingConfig { every: 1 },
    }
}

/// Drive one episode by hand and record each `done` flag.
fn scripted_episode<A: Agent>(env: &mut TaxEnv, agent: &mut A, trajectory: &mut Trajectory) -> Vec<bool> {
    let mut dones = Vec::new();
    let mut state = env.reset();
    loop {
        let action = agent.act(&state, trajectory);
        let step = env.step(&action);
        agent.observe(
            &Transition {
                state,
                action,
                reward: step.reward,
                next_state: step.state,
                done: step.done,
            },
            trajectory,
        );
        dones.push(step.done);
        state = step.state;
        if step.done {
            break;
        }
    }
    agent.end_episode(trajectory);
    dones
}

#[test]
fn test_three_step_episode_q_learning() {
    let config = make_config(AgentKind::QLearning, 3);
    let mut env = TaxEnv::from_config(&config).unwrap();
    let mut agent = QLearningAgent::from_config(&config).unwrap();
    let mut trajectory = Trajectory::new();

    let dones = scripted_episode(&mut env, &mut agent, &mut trajectory);

    assert_eq!(dones, vec![false, false, true]);
    assert!(trajectory.is_empty());
}

#[test]
fn test_three_step_episode_policy_gradient_clears_trajectory() {
    let config = make_config(AgentKind::PolicyGradient, 3);
    let mut env = TaxEnv::from_config(&config).unwrap();
    let mut agent = PolicyGradientAgent::from_config(&config);
    let mut trajectory = Trajectory::new();

    let dones = scripted_episode(&mut env, &mut agent, &mut trajectory);

    assert_eq!(dones, vec![false, false, true]);
    assert_eq!(trajectory.len(), 0);
}

#[test]
fn test_run_episode_counts_horizon_steps() {
    for algo in [AgentKind::QLearning, AgentKind::PolicyGradient] {
        let config = make_config(algo, 7);
        let mut env = TaxEnv::from_config(&config).unwrap();
        let mut agent = build_agent(&config).unwrap();
        let mut trajectory = Trajectory::new();

        let outcome = run_episode(&mut env, &mut agent, &mut trajectory);

        assert_eq!(outcome.steps, 7);
        assert!(outcome.total_reward.is_finite());
        assert!(trajectory.is_empty());
    }
}

#[test]
fn test_q_table_shape_is_fixed() {
    let mut config = make_config(AgentKind::QLearning, 10);
    config.agent.epsilon = Some(0.3);
    let mut env = TaxEnv::from_config(&config).unwrap();
    let mut agent = QLearningAgent::from_config(&config).unwrap();

    let shape_before = agent.q_table().shape().to_vec();
    assert_eq!(shape_before.len(), STATE_DIM + ACTION_DIM);

    train(&mut env, &mut agent, 5, 1);

    assert_eq!(agent.q_table().shape(), shape_before.as_slice());
    assert!(agent.q_table().len() > 0);
}

#[test]
fn test_theta_shape_is_fixed_and_learns() {
    let config = make_config(AgentKind::PolicyGradient, 10);
    let mut env = TaxEnv::from_config(&config).unwrap();
    let mut agent = PolicyGradientAgent::from_config(&config);

    agent.end_episode(&mut Trajectory::new());
    assert!(agent.theta().iter().all(|v| *v == 0.0));

    let returns = train(&mut env, &mut agent, 3, 10);

    assert_eq!(returns.len(), 3);
    assert_eq!(agent.theta().dim(), (STATE_DIM, ACTION_DIM));
    assert!(agent.theta().iter().any(|v| *v != 0.0));
}

#[test]
fn test_training_is_reproducible() {
    let mut config = make_config(AgentKind::QLearning, 5);
    config.agent.epsilon = Some(0.5);

    let run = || {
        let mut env = TaxEnv::from_config(&config).unwrap();
        let mut agent = build_agent(&config).unwrap();
        train(&mut env, &mut agent, 4, 1)
    };

    let a: Vec<u64> = run().into_iter().map(f64::to_bits).collect();
    let b: Vec<u64> = run().into_iter().map(f64::to_bits).collect();
    assert_eq!(a, b);
}

#[test]
fn test_evaluate_after_training() {
    for algo in [AgentKind::QLearning, AgentKind::PolicyGradient] {
        let config = make_config(algo, 4);
        let mut env = TaxEnv::from_config(&config).unwrap();
        let mut agent = build_agent(&config).unwrap();
        train(&mut env, &mut agent, 3, 1);

        agent.set_training(false);
        let summary = evaluate(&mut env, &mut agent, 10);

        assert_eq!(summary.episodes, 10);
        assert!(summary.avg_return.is_finite());
        assert!(summary.avg_welfare.is_finite());
        assert!(summary.avg_revenue_ratio >= 0.0);
    }
}

#[test]
fn test_q_learning_requires_epsilon() {
    let mut config = make_config(AgentKind::QLearning, 3);
    config.agent.epsilon = None;
    let err = build_agent(&config).err().unwrap();
    assert_eq!(err.key(), Some("agent.epsilon"));
}
