//! Per-journey mutual exclusion.
//!
//! Turn operations on the same journey must be serialized: answers apply in
//! request order and each decision is computed from a consistent history
//! snapshot. Different journeys share no mutable state and run fully in
//! parallel, so the lock is keyed by journey id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use crate::domain::foundation::JourneyId;

/// Registry of per-journey async locks.
pub struct JourneyLocks {
    locks: Mutex<HashMap<JourneyId, Arc<AsyncMutex<()>>>>,
}

impl JourneyLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock for a journey, creating it on first use.
    ///
    /// Hold the returned guard for the whole turn:
    ///
    /// ```ignore
    /// let lock = locks.lock_for(journey_id);
    /// let _guard = lock.lock().await;
    /// // load, mutate, persist
    /// ```
    pub fn lock_for(&self, journey_id: JourneyId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(journey_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Drops the lock entry for a journey that reached a terminal state.
    /// Existing holders keep their `Arc`; new callers get a fresh lock.
    pub fn release(&self, journey_id: &JourneyId) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.remove(journey_id);
    }

    /// Number of journeys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// True when no journey locks are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for JourneyLocks {
    fn default() -> Self {
        Self::new()
    }
}
