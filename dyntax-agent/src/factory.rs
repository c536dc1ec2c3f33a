//! Agent construction from configuration

use dyntax_core::{Agent, AgentKind, ExperimentConfig, Result};
use tracing::info;

use crate::{PolicyGradientAgent, QLearningAgent};

/// Build the learner selected by `agent.algo`
pub fn build_agent(config: &ExperimentConfig) -> Result<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match config.agent.algo {
        AgentKind::QLearning => Box::new(QLearningAgent::from_config(config)?),
        AgentKind::PolicyGradient => Box::new(PolicyGradientAgent::from_config(config)),
    };
    info!(agent = agent.name(), seed = config.seed, "agent created");
    Ok(agent)
}
