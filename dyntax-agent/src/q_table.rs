//! Dense action-value table over discretized states and actions

use dyntax_core::{ACTION_DIM, STATE_DIM};

/// Dense Q-table stored as one flat buffer.
///
/// The table has `STATE_DIM + ACTION_DIM` axes, state axes first, laid out
/// row-major. All action values for one state are therefore contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<f64>,
    shape: [usize; STATE_DIM + ACTION_DIM],
    strides: [usize; STATE_DIM + ACTION_DIM],
}

impl QTable {
    /// Zero-initialized table for the given bin counts
    #[must_use]
    pub fn zeros(state_shape: [usize; STATE_DIM], action_shape: [usize; ACTION_DIM]) -> Self {
        let mut shape = [0; STATE_DIM + ACTION_DIM];
        shape[..STATE_DIM].copy_from_slice(&state_shape);
        shape[STATE_DIM..].copy_from_slice(&action_shape);

        let mut strides = [1; STATE_DIM + ACTION_DIM];
        for axis in (0..shape.len() - 1).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }

        Self {
            values: vec![0.0; shape.iter().product()],
            shape,
            strides,
        }
    }

    /// Bin count along every axis
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of action combinations per state
    #[must_use]
    pub fn actions_per_state(&self) -> usize {
        self.strides[STATE_DIM - 1]
    }

    /// Flat index of a `(state, action)` cell
    #[must_use]
    pub fn linear_index(&self, state: &[usize; STATE_DIM], action: &[usize; ACTION_DIM]) -> usize {
        self.state_offset(state)
            + action
                .iter()
                .zip(&self.strides[STATE_DIM..])
                .map(|(i, s)| i * s)
                .sum::<usize>()
    }

    /// Value of a `(state, action)` cell
    #[must_use]
    pub fn get(&self, state: &[usize; STATE_DIM], action: &[usize; ACTION_DIM]) -> f64 {
        self.values[self.linear_index(state, action)]
    }

    /// Mutable value of a `(state, action)` cell
    pub fn get_mut(&mut self, state: &[usize; STATE_DIM], action: &[usize; ACTION_DIM]) -> &mut f64 {
        let index = self.linear_index(state, action);
        &mut self.values[index]
    }

    /// All action values for `state`, in row-major action order
    #[must_use]
    pub fn action_values(&self, state: &[usize; STATE_DIM]) -> &[f64] {
        let start = self.state_offset(state);
        &self.values[start..start + self.actions_per_state()]
    }

    /// Largest action value for `state`; NaN entries are skipped
    #[must_use]
    pub fn max_value(&self, state: &[usize; STATE_DIM]) -> f64 {
        self.action_values(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action bins for `state`.
    ///
    /// Ties go to the first maximum in row-major order.
    #[must_use]
    pub fn greedy(&self, state: &[usize; STATE_DIM]) -> [usize; ACTION_DIM] {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &value) in self.action_values(state).iter().enumerate() {
            if value > best_value {
                best = i;
                best_value = value;
            }
        }
        self.unravel_action(best)
    }

    /// Per-axis action bins of a flat offset within a state's action slice
    #[must_use]
    pub fn unravel_action(&self, mut offset: usize) -> [usize; ACTION_DIM] {
        let mut indices = [0; ACTION_DIM];
        for (slot, stride) in indices.iter_mut().zip(&self.strides[STATE_DIM..]) {
            *slot = offset / stride;
            offset %= stride;
        }
        indices
    }

    fn state_offset(&self, state: &[usize; STATE_DIM]) -> usize {
        state.iter().zip(&self.strides[..STATE_DIM]).map(|(i, s)| i * s).sum()
    }
}
