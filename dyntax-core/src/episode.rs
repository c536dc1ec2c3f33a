//! Episode loop, training driver and evaluation summary

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{mean, Agent, Environment, StepInfo, Trajectory, Transition};

/// What a finished episode produced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpisodeOutcome {
    /// Sum of rewards
    pub total_reward: f64,
    /// Number of environment steps taken
    pub steps: usize,
    /// Diagnostics from the final step
    pub final_info: StepInfo,
}

/// Run one episode: reset, then act/step/observe until done, then `end_episode`.
pub fn run_episode<E, A>(env: &mut E, agent: &mut A, trajectory: &mut Trajectory) -> EpisodeOutcome
where
    E: Environment + ?Sized,
    A: Agent + ?Sized,
{
    let mut state = env.reset();
    let mut outcome = EpisodeOutcome::default();

    loop {
        let action = agent.act(&state, trajectory);
        let step = env.step(&action);
        let transition = Transition {
            state,
            action,
            reward: step.reward,
            next_state: step.state,
            done: step.done,
        };
        agent.observe(&transition, trajectory);

        outcome.total_reward += step.reward.value();
        outcome.steps += 1;
        outcome.final_info = step.info;
        state = step.state;

        if step.done {
            break;
        }
    }

    agent.end_episode(trajectory);
    outcome
}

/// Train `agent` for `episodes` episodes and return each episode's return.
///
/// Progress is reported every `log_every` episodes.
pub fn train<E, A>(env: &mut E, agent: &mut A, episodes: usize, log_every: usize) -> Vec<f64>
where
    E: Environment + ?Sized,
    A: Agent + ?Sized,
{
    let log_every = log_every.max(1);
    let mut returns = Vec::with_capacity(episodes);

    for episode in 0..episodes {
        let mut trajectory = Trajectory::new();
        let outcome = run_episode(env, agent, &mut trajectory);
        debug!(episode = episode + 1, steps = outcome.steps, "episode finished");
        if (episode + 1) % log_every == 0 {
            info!(agent = agent.name(), "Episode {} return: {:.3}", episode + 1, outcome.total_reward);
        }
        returns.push(outcome.total_reward);
    }

    returns
}

/// Averages over a batch of evaluation episodes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Number of evaluation episodes
    pub episodes: usize,
    /// Mean episode return
    pub avg_return: f64,
    /// Mean final-step welfare
    pub avg_welfare: f64,
    /// Mean final-step Gini coefficient
    pub avg_gini: f64,
    /// Mean final-step revenue ratio
    pub avg_revenue_ratio: f64,
}

/// Roll out `episodes` episodes and average their returns and final-step info.
///
/// Only `reset`/`step` and `act`/`end_episode` are called, so learners see no
/// rewards during evaluation.
pub fn evaluate<E, A>(env: &mut E, agent: &mut A, episodes: usize) -> MetricsSummary
where
    E: Environment + ?Sized,
    A: Agent + ?Sized,
{
    let mut returns = Vec::with_capacity(episodes);
    let mut finals = Vec::with_capacity(episodes);

    for _ in 0..episodes {
        let mut trajectory = Trajectory::new();
        let mut state = env.reset();
        let mut ret = 0.0;
        let info = loop {
            let action = agent.act(&state, &mut trajectory);
            let step = env.step(&action);
            ret += step.reward.value();
            state = step.state;
            if step.done {
                break step.info;
            }
        };
        agent.end_episode(&mut trajectory);

        returns.push(ret);
        finals.push(info);
    }

    MetricsSummary {
        episodes,
        avg_return: mean(returns),
        avg_welfare: mean(finals.iter().map(|i| i.welfare)),
        avg_gini: mean(finals.iter().map(|i| i.gini)),
        avg_revenue_ratio: mean(finals.iter().map(|i| i.revenue_ratio)),
    }
}
