//! Shallow-merge and reset semantics for reducer-driven state stores.
//!
//! Reducer-based stores replace the whole state on every update. This crate
//! adds two conveniences on top of that contract: per-key shallow merging of
//! partial updates, and an explicit reset-to-initial operation that can be
//! combined with a merge in the same update.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! State is a two-level map: root keys partition the state into sections,
//! and each section is a record of fields. A [`SET_STATE`] action merges a
//! partial change one level deep below the touched root keys; a
//! [`RESET_STATE`] action returns to the initial snapshot, optionally
//! merging a change over it in the same step. Any other action passes
//! through unchanged, so the reducers compose with the rest of a host
//! store's reducer tree.
//!
//! Snapshots are immutable and cheap to clone. Untouched root keys keep
//! their allocation across updates, so change detection is a pointer
//! comparison ([`State::root`] + `Arc::ptr_eq`) rather than a deep walk.
//!
//! # Example
//!
//! ```
//! use lightstore::{Action, State, TwoLevelReducer};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), lightstore::StateError> {
//! let initial = State::from_object(json!({
//!     "session": { "user": null, "token": null },
//!     "ui": { "theme": "dark" },
//! }))?;
//! let reducer = TwoLevelReducer::new(initial)?;
//!
//! let change = json!({ "session": { "user": "ada" } })
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let next = reducer.reduce(None, &Action::set_state(change))?;
//!
//! assert_eq!(next.get("session"), Some(&json!({ "user": "ada", "token": null })));
//! assert_eq!(next.get("ui"), Some(&json!({ "theme": "dark" })));
//! # Ok(())
//! # }
//! ```
//!
//! The crate also ships a [`OneLevelReducer`] for flat state with no root
//! partitioning, and a small [`Store`] for applications without a host
//! state-management library of their own.

mod action;
mod error;
mod reducer;
mod state;
mod store;

pub use action::{Action, RESET_STATE, SET_STATE};
pub use error::StateError;
pub use reducer::{OneLevelReducer, TwoLevelReducer};
pub use state::{FlatState, Section, State, StateChange};
pub use store::{Store, SubscriptionId};
