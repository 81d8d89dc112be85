//! Merging reducers: pure `(state, action) -> state` functions with shallow
//! merge and reset semantics.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Consumers
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - [`TwoLevelReducer`]: state is partitioned into root sections; a partial
//!   update merges one level deep below each touched root key.
//! - [`OneLevelReducer`]: state is a single section; a partial update merges
//!   fields directly into the top level.
//!
//! Both reducers are pure, run synchronously inside the host store's
//! dispatch, and never mutate a snapshot in place.

mod one_level;
mod two_level;

pub use one_level::OneLevelReducer;
pub use two_level::TwoLevelReducer;
