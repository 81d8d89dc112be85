//! The two-level merging reducer.

use std::sync::Arc;

use serde_json::Value;

use crate::action::Action;
use crate::error::StateError;
use crate::state::{Section, State};

/// A reducer with shallow per-root-key merge semantics over two-level state.
///
/// The reducer owns the initial snapshot it was constructed with and a
/// validation mode resolved once at construction. Validation is the default;
/// [`TwoLevelReducer::new_unchecked`] trades the shape checks away for hot
/// paths that are known to dispatch well-formed changes.
///
/// Merging is exactly one level deep below the root: a touched root key gets
/// a new section with the incoming fields overlaid on the existing ones,
/// while any value *inside* a section (including nested objects) is replaced
/// wholesale. Untouched root keys keep their `Arc` across updates.
pub struct TwoLevelReducer {
    initial: State,
    validate: bool,
}

impl TwoLevelReducer {
    /// Build a validating reducer around `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidStateShape`] if any root value of
    /// `initial` is not an object.
    pub fn new(initial: State) -> Result<Self, StateError> {
        for value in initial.roots().values() {
            if !value.is_object() {
                return Err(StateError::invalid_state_shape(value));
            }
        }
        Ok(Self {
            initial,
            validate: true,
        })
    }

    /// Build a non-validating reducer around `initial`.
    ///
    /// Malformed updates are applied silently: unknown root keys are added,
    /// and a non-object value overwrites its section wholesale. Intended for
    /// optimized builds where every dispatch site is trusted.
    pub fn new_unchecked(initial: State) -> Self {
        Self {
            initial,
            validate: false,
        }
    }

    /// The snapshot this reducer resets to.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// Apply `action` to `state`, producing the next snapshot.
    ///
    /// `None` stands in for the host store's first dispatch, before any state
    /// exists; it behaves as the initial snapshot. Actions with a foreign
    /// kind tag pass through unchanged so this reducer composes with others.
    ///
    /// A reset without a change payload returns the original initial
    /// snapshot itself ([`State::ptr_eq`] holds). A reset *with* a change
    /// discards the current state and merges the change over the initial
    /// snapshot in the same update. Everything else is a shallow per-key
    /// merge over the current state.
    ///
    /// # Errors
    ///
    /// With validation enabled, returns [`StateError::InvalidRootValueShape`]
    /// if a change value is not an object and [`StateError::UnknownRootKey`]
    /// if a change addresses a root key the base state does not have. The
    /// whole change is checked before any merge is computed, so a failed
    /// update never yields a partially merged snapshot.
    pub fn reduce(&self, state: Option<&State>, action: &Action) -> Result<State, StateError> {
        let current = state.unwrap_or(&self.initial);

        if !action.is_set_state() && !action.is_reset_state() {
            return Ok(current.clone());
        }

        let base = if action.is_reset_state() {
            if action.change().is_none() {
                return Ok(self.initial.clone());
            }
            &self.initial
        } else {
            current
        };

        if self.validate {
            if let Some(change) = action.change() {
                for (key, value) in change {
                    if !value.is_object() {
                        return Err(StateError::invalid_root_value_shape(key, value));
                    }
                    if !base.contains_key(key) {
                        return Err(StateError::unknown_root_key(key));
                    }
                }
            }
        }

        // Shallow copy of the base: every untouched key keeps its Arc.
        let mut roots = base.roots().clone();
        if let Some(change) = action.change() {
            for (key, incoming) in change {
                let merged = merge_root(base.get(key), incoming);
                roots.insert(key.clone(), Arc::new(merged));
            }
        }

        Ok(State::from(roots))
    }
}

/// Overlay `incoming` on the existing root value, one level deep.
///
/// Reached with a non-object `incoming` or a missing `existing` only in
/// unchecked mode: a non-object replaces the section wholesale, a missing
/// section merges over an empty record.
fn merge_root(existing: Option<&Value>, incoming: &Value) -> Value {
    match incoming {
        Value::Object(fields) => {
            let mut merged = match existing {
                Some(Value::Object(old)) => old.clone(),
                _ => Section::new(),
            };
            for (field, value) in fields {
                merged.insert(field.clone(), value.clone());
            }
            Value::Object(merged)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_root_overlays_fields() {
        let merged = merge_root(
            Some(&json!({ "a": 1, "b": 2 })),
            &json!({ "b": 3, "c": 4 }),
        );
        assert_eq!(merged, json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn merge_root_over_missing_section_keeps_incoming() {
        let merged = merge_root(None, &json!({ "a": 1 }));
        assert_eq!(merged, json!({ "a": 1 }));
    }

    #[test]
    fn merge_root_with_non_object_replaces_wholesale() {
        let merged = merge_root(Some(&json!({ "a": 1 })), &json!(7));
        assert_eq!(merged, json!(7));
    }
}
