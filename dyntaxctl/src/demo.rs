// `demo` subcommand: train, evaluate, write the summary artifact

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use dyntax_agent::build_agent;
use dyntax_core::{evaluate, train, Agent, ExperimentConfig, MetricsSummary};
use dyntax_env::TaxEnv;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Training episodes
    #[arg(long, default_value = "50")]
    pub episodes: usize,

    /// Evaluation episodes
    #[arg(long, default_value = "10")]
    pub eval_episodes: usize,

    /// Output directory
    #[arg(long, default_value = "artifacts/demo")]
    pub out: PathBuf,

    /// Config path
    #[arg(long, default_value = "configs/experiment.toml")]
    pub config: PathBuf,
}

pub fn run(args: &DemoArgs) -> Result<MetricsSummary> {
    let config = ExperimentConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    let mut env = TaxEnv::from_config(&config).context("Failed to build environment")?;
    let mut agent = build_agent(&config).context("Failed to build agent")?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create output directory {}", args.out.display()))?;

    info!(
        agent = agent.name(),
        episodes = args.episodes,
        horizon = config.horizon,
        "starting training"
    );
    let returns = train(&mut env, &mut agent, args.episodes, config.logging.every);
    if let Some(last) = returns.last() {
        info!(last_return = last, "training finished");
    }

    agent.set_training(false);
    let summary = evaluate(&mut env, &mut agent, args.eval_episodes);

    let path = args.out.join("summary.json");
    std::fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Done. Artifacts in {}", args.out.display());
    Ok(summary)
}
