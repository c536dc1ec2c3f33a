//! Tax/transfer action vector

use serde::{Deserialize, Serialize};

/// Number of components in an [`Action`]
pub const ACTION_DIM: usize = 4;

/// Instrument names, in action-vector order
pub const INSTRUMENTS: [&str; ACTION_DIM] = ["tau_labor", "tau_capital", "vat", "transfer"];

/// Raw agent output: `[tau_labor, tau_capital, vat, transfer]`.
///
/// Components are nominally in `[0, 1]`; the environment clamps and maps them
/// onto the configured instrument bounds, so any value is accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Action(pub [f64; ACTION_DIM]);

impl Action {
    /// Action with every component set to `value`
    #[must_use]
    pub fn splat(value: f64) -> Self {
        Self([value; ACTION_DIM])
    }
}
