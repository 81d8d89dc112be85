//! A minimal host store wrapping the two-level reducer.
//!
//! The reducers in this crate are designed to plug into any store with the
//! standard `(state, action) -> state` contract; this module provides a small
//! one for applications that do not already carry a state-management
//! dependency. The store is a cheaply cloneable handle over shared inner
//! state, with interior mutability behind `parking_lot` locks.
//!
//! Dispatch is serialized by the state lock: updates run one at a time, and
//! every dispatch runs the reducer to completion before subscribers are
//! notified. Dispatching from inside a subscriber callback is legal and
//! stays consistent, but it is reported with a warning because it usually
//! indicates a feedback loop in the caller's change handling.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::action::Action;
use crate::error::StateError;
use crate::reducer::TwoLevelReducer;
use crate::state::{Section, State, StateChange};

type Subscriber = Arc<dyn Fn(&State, &State, &Action) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StoreInner {
    reducer: TwoLevelReducer,
    state: RwLock<State>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
    notifying: AtomicBool,
}

/// A store owning two-level state, driven by dispatched [`Action`]s.
///
/// Clones share the same state and subscriber list.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store starting at the reducer's initial snapshot.
    pub fn new(reducer: TwoLevelReducer) -> Self {
        let state = reducer.initial().clone();
        Self {
            inner: Arc::new(StoreInner {
                reducer,
                state: RwLock::new(state),
                subscribers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                notifying: AtomicBool::new(false),
            }),
        }
    }

    /// A snapshot of the current state. Cheap; does not block dispatchers
    /// for longer than the lock read.
    pub fn state(&self) -> State {
        self.inner.state.read().clone()
    }

    /// Dispatch an action: run the reducer, swap in the new state, notify
    /// subscribers with `(previous, next, &action)`.
    ///
    /// The state lock is released before subscribers run, so callbacks may
    /// read the store or even dispatch again; a nested dispatch is reported
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Propagates the reducer's validation errors. The stored state is
    /// untouched and no subscriber is notified when the update is rejected.
    pub fn dispatch(&self, action: Action) -> Result<(), StateError> {
        if self.inner.notifying.load(Ordering::Relaxed) {
            tracing::warn!(
                kind = %action.kind(),
                "dispatch from inside a change notification"
            );
        }

        let (previous, next) = {
            let mut state = self.inner.state.write();
            let next = self.inner.reducer.reduce(Some(&*state), &action)?;
            let previous = std::mem::replace(&mut *state, next.clone());
            (previous, next)
        };

        tracing::debug!(
            kind = %action.kind(),
            trace = action.trace(),
            "action dispatched"
        );

        self.notify(&previous, &next, &action);
        Ok(())
    }

    /// Dispatch a [`SET_STATE`](crate::SET_STATE) action merging `change`.
    ///
    /// # Errors
    ///
    /// Same as [`Store::dispatch`].
    pub fn set(&self, change: StateChange) -> Result<(), StateError> {
        self.dispatch(Action::set_state(change))
    }

    /// Dispatch a merge touching a single root key.
    ///
    /// # Errors
    ///
    /// Same as [`Store::dispatch`].
    pub fn set_section(&self, key: impl Into<String>, section: Section) -> Result<(), StateError> {
        let mut change = StateChange::new();
        change.insert(key.into(), Value::Object(section));
        self.set(change)
    }

    /// Dispatch a reset to the initial snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`Store::dispatch`].
    pub fn reset(&self) -> Result<(), StateError> {
        self.dispatch(Action::reset_state())
    }

    /// Dispatch a reset combined with a merge of `change`, in one update.
    ///
    /// # Errors
    ///
    /// Same as [`Store::dispatch`].
    pub fn reset_with(&self, change: StateChange) -> Result<(), StateError> {
        self.dispatch(Action::reset_state_with(change))
    }

    /// Register a change callback receiving `(previous, next, action)`.
    pub fn subscribe(
        &self,
        on_change: impl Fn(&State, &State, &Action) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .lock()
            .push((id, Arc::new(on_change)));
        id
    }

    /// Remove a subscription. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(registered, _)| *registered != id);
        subscribers.len() != before
    }

    fn notify(&self, previous: &State, next: &State, action: &Action) {
        // Snapshot the list so callbacks can subscribe or unsubscribe
        // without deadlocking, then drop the lock before calling out.
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        let was_notifying = self.inner.notifying.swap(true, Ordering::Relaxed);
        for subscriber in &subscribers {
            subscriber(previous, next, action);
        }
        self.inner.notifying.store(was_notifying, Ordering::Relaxed);
    }
}
