//! Reinforcement learning environments for fiscal-policy design
//!
//! [`TaxEnv`] simulates a small economy that reacts to a labor tax, a capital
//! tax, a VAT and a flat transfer. The [`welfare`] module holds the inequality
//! and social welfare measures it rewards.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod tax;
pub mod welfare;

#[cfg(test)]
mod testing;

pub use tax::TaxEnv;
pub use welfare::{gini, welfare};

// Re-export core types
pub use dyntax_core::{Action, Environment, Reward, State, Step, StepInfo};
