//! Immutable state snapshots for the merging reducers.
//!
//! Two-level state is a map from root key to a section value, where a section
//! is itself a record of finer-grained fields. Snapshots are never mutated in
//! place: every update builds a new snapshot, and untouched root values keep
//! their `Arc` across updates so consumers can detect change with
//! [`Arc::ptr_eq`] the way shallow-equality checks work in other reducer
//! ecosystems.
//!
//! Root values are stored as plain [`Value`]s rather than typed sections.
//! That keeps validation a runtime concern owned by the reducer: with
//! validation disabled a non-object value really can land under a root key,
//! which is the documented trade-off of the unchecked mode.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::StateError;

/// A single root section: field name to arbitrary value.
pub type Section = serde_json::Map<String, Value>;

/// A partial update: a subset of root keys, each carrying a partial section.
pub type StateChange = serde_json::Map<String, Value>;

/// Immutable snapshot of two-level state.
///
/// Cloning is cheap (one `Arc` bump). Equality compares contents; use
/// [`State::ptr_eq`] to compare snapshot identity.
#[derive(Clone, Debug, Default)]
pub struct State {
    roots: Arc<BTreeMap<String, Arc<Value>>>,
}

impl State {
    /// Build a snapshot from a JSON object.
    ///
    /// Only the top level is checked here; root-value shape is the reducer's
    /// concern so that the unchecked reducer mode stays permissive.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidStateShape`] if `value` is not an object.
    pub fn from_object(value: Value) -> Result<Self, StateError> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, Arc::new(value)))
                .collect::<BTreeMap<_, _>>()
                .into()),
            other => Err(StateError::invalid_state_shape(&other)),
        }
    }

    pub(crate) fn roots(&self) -> &BTreeMap<String, Arc<Value>> {
        &self.roots
    }

    /// The value under a root key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.roots.get(key).map(Arc::as_ref)
    }

    /// The shared handle for a root value.
    ///
    /// Two snapshots holding the same `Arc` for a key are guaranteed not to
    /// differ under that key, which makes `Arc::ptr_eq` a constant-time
    /// change check.
    pub fn root(&self, key: &str) -> Option<&Arc<Value>> {
        self.roots.get(key)
    }

    /// Whether a root key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.roots.contains_key(key)
    }

    /// Root keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Number of root keys.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the snapshot has no root keys.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Render the snapshot as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.roots
                .iter()
                .map(|(key, value)| (key.clone(), (**value).clone()))
                .collect(),
        )
    }

    /// Whether two snapshots are the same allocation.
    ///
    /// A reset without a change payload returns the original initial
    /// snapshot, observable through this check.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.roots, &b.roots)
    }
}

impl From<BTreeMap<String, Arc<Value>>> for State {
    fn from(roots: BTreeMap<String, Arc<Value>>) -> Self {
        Self {
            roots: Arc::new(roots),
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
            || (self.roots.len() == other.roots.len()
                && self
                    .roots
                    .iter()
                    .all(|(key, value)| other.get(key) == Some(value.as_ref())))
    }
}

impl Eq for State {}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.roots.len()))?;
        for (key, value) in self.roots.iter() {
            map.serialize_entry(key, value.as_ref())?;
        }
        map.end()
    }
}

/// Immutable snapshot of one-level state: a single section with no root-key
/// partitioning.
#[derive(Clone, Debug, Default)]
pub struct FlatState {
    fields: Arc<Section>,
}

impl FlatState {
    /// Build a snapshot from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidStateShape`] if `value` is not an object.
    pub fn from_object(value: Value) -> Result<Self, StateError> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(StateError::invalid_state_shape(&other)),
        }
    }

    pub(crate) fn fields(&self) -> &Section {
        &self.fields
    }

    /// The value under a field name, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a field exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Render the snapshot as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object((*self.fields).clone())
    }

    /// Whether two snapshots are the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }
}

impl From<Section> for FlatState {
    fn from(fields: Section) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }
}

impl PartialEq for FlatState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields) || self.fields == other.fields
    }
}

impl Eq for FlatState {}

impl Serialize for FlatState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
