//! Validation errors raised while constructing a reducer or applying an
//! update.
//!
//! All variants are synchronous programmer-error signals: they surface
//! immediately during development and are never retried. With validation
//! disabled none of them are raised and malformed input flows through
//! silently.

use serde_json::Value;
use thiserror::Error;

/// Errors produced by reducer construction and update validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The initial state, or one of its root values, is not an object.
    #[error("state and its root property values should be of type 'object', got value '{value}' of type '{kind}'")]
    InvalidStateShape {
        /// Rendering of the offending value.
        value: String,
        /// JSON type name of the offending value.
        kind: &'static str,
    },

    /// An incoming partial value for a root key is not an object.
    #[error("value for root property '{key}' should be of type 'object', got value '{value}' of type '{kind}'")]
    InvalidRootValueShape {
        /// The root key the update addressed.
        key: String,
        /// Rendering of the offending value.
        value: String,
        /// JSON type name of the offending value.
        kind: &'static str,
    },

    /// An update referenced a root key absent from the base state.
    #[error("no root property with name '{key}' found in the current state")]
    UnknownRootKey {
        /// The missing root key.
        key: String,
    },
}

impl StateError {
    pub(crate) fn invalid_state_shape(value: &Value) -> Self {
        Self::InvalidStateShape {
            value: value.to_string(),
            kind: json_kind(value),
        }
    }

    pub(crate) fn invalid_root_value_shape(key: &str, value: &Value) -> Self {
        Self::InvalidRootValueShape {
            key: key.to_string(),
            value: value.to_string(),
            kind: json_kind(value),
        }
    }

    pub(crate) fn unknown_root_key(key: &str) -> Self {
        Self::UnknownRootKey {
            key: key.to_string(),
        }
    }
}

/// JSON type name used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_state_shape_names_value_and_type() {
        let err = StateError::invalid_state_shape(&json!(4));
        assert_eq!(
            err.to_string(),
            "state and its root property values should be of type 'object', got value '4' of type 'number'"
        );
    }

    #[test]
    fn unknown_root_key_names_key() {
        let err = StateError::unknown_root_key("missing");
        assert_eq!(
            err.to_string(),
            "no root property with name 'missing' found in the current state"
        );
    }

    #[test]
    fn json_kind_covers_all_variants() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(true)), "boolean");
        assert_eq!(json_kind(&json!("s")), "string");
        assert_eq!(json_kind(&json!([1])), "array");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
