//! The one-level merging reducer.

use crate::action::Action;
use crate::state::FlatState;

/// A reducer merging partial updates directly into flat, single-section
/// state.
///
/// The simpler sibling of [`TwoLevelReducer`](super::TwoLevelReducer): there
/// is no root-key partitioning, so there is nothing to validate per update
/// and [`OneLevelReducer::reduce`] cannot fail. Incoming fields win on
/// conflict; fields absent from the change are preserved.
pub struct OneLevelReducer {
    initial: FlatState,
}

impl OneLevelReducer {
    /// Build a reducer around `initial`.
    pub fn new(initial: FlatState) -> Self {
        Self { initial }
    }

    /// The snapshot this reducer resets to.
    pub fn initial(&self) -> &FlatState {
        &self.initial
    }

    /// Apply `action` to `state`, producing the next snapshot.
    ///
    /// Same action contract as the two-level reducer: foreign kinds pass
    /// through, a reset without a change returns the original initial
    /// snapshot, a reset with a change merges it over the initial snapshot
    /// in one update.
    pub fn reduce(&self, state: Option<&FlatState>, action: &Action) -> FlatState {
        let current = state.unwrap_or(&self.initial);

        if !action.is_set_state() && !action.is_reset_state() {
            return current.clone();
        }

        let base = if action.is_reset_state() {
            if action.change().is_none() {
                return self.initial.clone();
            }
            &self.initial
        } else {
            current
        };

        let mut fields = base.fields().clone();
        if let Some(change) = action.change() {
            for (key, value) in change {
                fields.insert(key.clone(), value.clone());
            }
        }

        FlatState::from(fields)
    }
}
