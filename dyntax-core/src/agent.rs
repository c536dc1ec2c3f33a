//! Agent trait

use crate::{Action, State, Trajectory, Transition};

/// Interaction contract shared by every learner.
///
/// The [`Trajectory`] is owned by the caller's episode scope and lent to each
/// call. Agents that learn online may ignore it.
pub trait Agent {
    /// Select an action for `state`
    fn act(&mut self, state: &State, trajectory: &mut Trajectory) -> Action;

    /// Learn from one environment transition
    fn observe(&mut self, transition: &Transition, trajectory: &mut Trajectory);

    /// Finish the episode; episodic learners update here and drain `trajectory`
    fn end_episode(&mut self, trajectory: &mut Trajectory);

    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Switch between training and evaluation behaviour
    fn set_training(&mut self, _training: bool) {}

    /// Check if in training mode
    fn is_training(&self) -> bool {
        true
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn act(&mut self, state: &State, trajectory: &mut Trajectory) -> Action {
        (**self).act(state, trajectory)
    }

    fn observe(&mut self, transition: &Transition, trajectory: &mut Trajectory) {
        (**self).observe(transition, trajectory);
    }

    fn end_episode(&mut self, trajectory: &mut Trajectory) {
        (**self).end_episode(trajectory);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn set_training(&mut self, training: bool) {
        (**self).set_training(training);
    }

    fn is_training(&self) -> bool {
        (**self).is_training()
    }
}
