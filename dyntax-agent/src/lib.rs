//! Reinforcement learning agents for the DynTax tax environment
//!
//! Two learners share the [`dyntax_core::Agent`] contract:
//! - [`QLearningAgent`]: tabular epsilon-greedy Q-learning over a
//!   [`DiscretizationScheme`]
//! - [`PolicyGradientAgent`]: linear-sigmoid policy trained with REINFORCE
//!
//! [`build_agent`] picks one from the experiment configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod discretization;
pub mod factory;
pub mod policy_gradient;
pub mod q_learning;
pub mod q_table;
pub mod utils;

pub use discretization::{BinEdges, DiscretizationScheme};
pub use factory::build_agent;
pub use policy_gradient::{PolicyGradientAgent, PolicyGradientConfig};
pub use q_learning::{QLearningAgent, QLearningConfig};
pub use q_table::QTable;

