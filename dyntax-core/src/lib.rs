//! Core traits and types for the DynTax fiscal-policy RL testbed
//!
//! This crate defines the interaction contract shared by the tax environment
//! and the learners: state and action vectors, the [`Environment`] and
//! [`Agent`] traits, episode-scoped trajectories, configuration, seeded random
//! sources and the episode loop.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod config;
pub mod environment;
pub mod episode;
pub mod error;
pub mod reward;
pub mod rng;
pub mod state;
pub mod stats;
pub mod trajectory;

// Re-export core traits and types
pub use action::{Action, ACTION_DIM, INSTRUMENTS};
pub use agent::Agent;
pub use config::{
    AgentConfig, AgentKind, Bounds, EnvConfig, ExperimentConfig, LoggingConfig, ObjectiveConfig,
    TaxInstruments, WelfareRule, DEFAULT_SEED,
};
pub use environment::{Environment, Step, StepInfo};
pub use episode::{evaluate, run_episode, train, EpisodeOutcome, MetricsSummary};
pub use error::{DtrError, Result};
pub use reward::Reward;
pub use rng::{seeded_rng, SimRng, ENV_STREAM, EXPLORATION_STREAM};
pub use state::{State, STATE_DIM};
pub use stats::mean;
pub use trajectory::{StepRecord, Trajectory, Transition};

