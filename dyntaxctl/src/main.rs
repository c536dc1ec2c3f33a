// DynTax Control CLI
// Train and evaluate fiscal-policy agents from the command line

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod demo;

use demo::DemoArgs;

#[derive(Parser)]
#[command(name = "dyntaxctl")]
#[command(about = "DynTax policy optimization CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent, evaluate it and write summary.json
    Demo(DemoArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo(args) => {
            demo::run(&args)?;
        }
    }

    Ok(())
}
