//! In-memory journey store for testing.
//!
//! Honors the TTL contract of the port: entries expire and later reads
//! return `None`, exactly as the Redis-backed adapter behaves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::foundation::JourneyId;
use crate::domain::journey::Journey;
use crate::ports::{JourneyStore, StoreError};

struct Entry {
    journey: Journey,
    expires_at: Instant,
}

/// In-memory, TTL-aware journey store.
pub struct InMemoryJourneyStore {
    entries: RwLock<HashMap<JourneyId, Entry>>,
}

impl InMemoryJourneyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries, for test assertions.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// True when the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forces an entry to expire immediately, for TTL tests.
    pub fn expire(&self, journey_id: &JourneyId) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get_mut(journey_id) {
            entry.expires_at = Instant::now();
        }
    }
}

impl Default for InMemoryJourneyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JourneyStore for InMemoryJourneyStore {
    async fn get(&self, journey_id: &JourneyId) -> Result<Option<Journey>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        match entries.get(journey_id) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.journey.clone())),
            Some(_) => {
                entries.remove(journey_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put_with_expiry(&self, journey: &Journey, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            journey.id(),
            Entry {
                journey: journey.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
