//! Discretization of continuous states and actions for tabular learning

use dyntax_core::{Action, DtrError, Result, State, ACTION_DIM, STATE_DIM};

/// Ascending bin edges for one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Create bin edges; they must be finite, strictly increasing and at least two
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(DtrError::invalid("bin_edges", "at least two edges are required"));
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DtrError::invalid(
                "bin_edges",
                "edges must be finite and strictly increasing",
            ));
        }
        Ok(Self { edges })
    }

    /// `num` evenly spaced edges from `lo` to `hi`, with the last pinned to `hi`
    ///
    /// # Panics
    ///
    /// Panics if `num < 2` or if `lo` and `hi` are not finite with `lo < hi`.
    #[must_use]
    pub fn linspace(lo: f64, hi: f64, num: usize) -> Self {
        assert!(num >= 2, "linspace needs at least two edges, got {num}");
        assert!(
            lo.is_finite() && hi.is_finite() && lo < hi,
            "linspace needs finite lo < hi, got [{lo}, {hi}]"
        );
        let step = (hi - lo) / (num - 1) as f64;
        let mut edges: Vec<f64> = (0..num).map(|i| i as f64 * step + lo).collect();
        if let Some(last) = edges.last_mut() {
            *last = hi;
        }
        Self { edges }
    }

    /// Number of bins
    #[must_use]
    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Edge values
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin containing `value`.
    ///
    /// Counts the edges `<= value` and subtracts one, then clamps into
    /// `0..bins()`. Values below the first edge, and NaN, land in bin 0;
    /// values at or past the last edge land in the last bin.
    #[must_use]
    pub fn digitize(&self, value: f64) -> usize {
        let raw = self.edges.partition_point(|edge| *edge <= value);
        raw.saturating_sub(1).min(self.bins() - 1)
    }

    /// Midpoint of bin `index`
    #[must_use]
    pub fn midpoint(&self, index: usize) -> f64 {
        (self.edges[index] + self.edges[index + 1]) / 2.0
    }
}

/// Bin edges for every state and action dimension
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizationScheme {
    state: [BinEdges; STATE_DIM],
    action: [BinEdges; ACTION_DIM],
}

impl Default for DiscretizationScheme {
    /// Non-uniform state bins tuned to the tax environment's ranges and five
    /// uniform bins over `[0, 1]` per action dimension.
    fn default() -> Self {
        Self {
            state: [
                BinEdges::linspace(-1.5, 1.5, 7),
                BinEdges::linspace(0.0, 1.0, 6),
                BinEdges::linspace(0.0, 1.0, 6),
                BinEdges::linspace(0.5, 1.0, 6),
                BinEdges::linspace(0.0, 1e5, 6),
            ],
            action: std::array::from_fn(|_| BinEdges::linspace(0.0, 1.0, 6)),
        }
    }
}

impl DiscretizationScheme {
    /// Create a scheme from explicit edges
    #[must_use]
    pub fn new(state: [BinEdges; STATE_DIM], action: [BinEdges; ACTION_DIM]) -> Self {
        Self { state, action }
    }

    /// Bin counts of the state dimensions
    #[must_use]
    pub fn state_shape(&self) -> [usize; STATE_DIM] {
        std::array::from_fn(|i| self.state[i].bins())
    }

    /// Bin counts of the action dimensions
    #[must_use]
    pub fn action_shape(&self) -> [usize; ACTION_DIM] {
        std::array::from_fn(|i| self.action[i].bins())
    }

    /// Bin index of each state component
    #[must_use]
    pub fn state_indices(&self, state: &State) -> [usize; STATE_DIM] {
        std::array::from_fn(|i| self.state[i].digitize(state.0[i]))
    }

    /// Bin index of each action component
    #[must_use]
    pub fn action_indices(&self, action: &Action) -> [usize; ACTION_DIM] {
        std::array::from_fn(|i| self.action[i].digitize(action.0[i]))
    }

    /// Midpoint action for a combination of action bins
    #[must_use]
    pub fn action_from_indices(&self, indices: [usize; ACTION_DIM]) -> Action {
        Action(std::array::from_fn(|i| self.action[i].midpoint(indices[i])))
    }
}
