//! Actions understood by the merging reducers.
//!
//! Actions carry a string kind tag rather than a closed enum so that foreign
//! actions (anything not tagged [`SET_STATE`] or [`RESET_STATE`]) can flow
//! through a reducer unchanged. That keeps these reducers composable with
//! other reducers and middleware in a host store: consumers recognise the
//! library's actions by comparing tags against the exported constants.
//!
//! Each action shape has its own named constructor. The optional trace label
//! is attached with [`Action::with_trace`]; the library carries it through
//! untouched for logging middleware and never interprets it.

use serde::Serialize;

use crate::state::StateChange;

/// Kind tag for actions that merge a partial change into the current state.
pub const SET_STATE: &str = "lightstore/SET_STATE";

/// Kind tag for actions that reset state to its initial value, optionally
/// merging a partial change in the same update.
pub const RESET_STATE: &str = "lightstore/RESET_STATE";

/// A dispatched action: kind tag, optional partial change, optional trace
/// label.
///
/// Construction happens only through the named constructors; payloads are not
/// validated here. Malformed changes are rejected when the reducer applies
/// them, not when the action is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<StateChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl Action {
    /// An action merging `change` into the current state.
    pub fn set_state(change: StateChange) -> Self {
        Self {
            kind: SET_STATE.to_string(),
            state: Some(change),
            trace: None,
        }
    }

    /// An action resetting state to its initial value.
    pub fn reset_state() -> Self {
        Self {
            kind: RESET_STATE.to_string(),
            state: None,
            trace: None,
        }
    }

    /// An action resetting state to its initial value and merging `change`
    /// in the same update.
    pub fn reset_state_with(change: StateChange) -> Self {
        Self {
            kind: RESET_STATE.to_string(),
            state: Some(change),
            trace: None,
        }
    }

    /// An action belonging to some other reducer. The merging reducers pass
    /// these through unchanged.
    pub fn external(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            state: None,
            trace: None,
        }
    }

    /// Attach a trace label for logging middleware.
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// The kind tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The partial change payload, if any.
    pub fn change(&self) -> Option<&StateChange> {
        self.state.as_ref()
    }

    /// The trace label, if any.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Whether this is a [`SET_STATE`] action.
    pub fn is_set_state(&self) -> bool {
        self.kind == SET_STATE
    }

    /// Whether this is a [`RESET_STATE`] action.
    pub fn is_reset_state(&self) -> bool {
        self.kind == RESET_STATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change() -> StateChange {
        json!({ "test": { "value": 1 } })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn set_state_carries_change() {
        let action = Action::set_state(change());
        assert!(action.is_set_state());
        assert_eq!(action.change(), Some(&change()));
        assert_eq!(action.trace(), None);
    }

    #[test]
    fn reset_state_has_no_change() {
        let action = Action::reset_state();
        assert!(action.is_reset_state());
        assert_eq!(action.change(), None);
    }

    #[test]
    fn trace_rides_along() {
        let action = Action::set_state(change()).with_trace("from test");
        assert_eq!(action.trace(), Some("from test"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let action = Action::set_state(change()).with_trace("t");
        let rendered = serde_json::to_value(&action).unwrap();
        assert_eq!(
            rendered,
            json!({
                "type": "lightstore/SET_STATE",
                "state": { "test": { "value": 1 } },
                "trace": "t",
            })
        );
    }

    #[test]
    fn reset_serializes_without_absent_fields() {
        let rendered = serde_json::to_value(Action::reset_state()).unwrap();
        assert_eq!(rendered, json!({ "type": "lightstore/RESET_STATE" }));
    }
}
