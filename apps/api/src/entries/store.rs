//! Entry data-access layer: cached, per-owner access to entry lists with
//! write-through invalidation. The cache is an explicit map from owner id to
//! `{entries, fetched_at}`; invalidation removes the slot and the next read
//! lazily refetches. Slots are only ever replaced wholesale, never patched,
//! so concurrent mutations cannot corrupt it — last refetch wins.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use crate::gateway::{Gateway, GatewayError};
use crate::models::entry::{Entry, NewEntry};

struct CacheSlot {
    entries: Vec<Entry>,
    fetched_at: DateTime<Utc>,
}

pub struct EntryStore {
    gateway: Arc<dyn Gateway>,
    // Never held across a gateway call.
    cache: Mutex<HashMap<Uuid, CacheSlot>>,
}

impl EntryStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The owner's entry list, newest first: from cache when present,
    /// otherwise fetched through the gateway and cached. Keys are per owner,
    /// so two identities never observe each other's cached data.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Entry>, GatewayError> {
        if let Some(entries) = self.cached(owner) {
            return Ok(entries);
        }

        let entries = self.gateway.list_entries(owner).await?;
        self.lock_cache().insert(
            owner,
            CacheSlot {
                entries: entries.clone(),
                fetched_at: Utc::now(),
            },
        );
        Ok(entries)
    }

    /// Sends the insert; on success invalidates the owner's slot so the next
    /// read recomputes strictly server-confirmed state. A failed write leaves
    /// the cache untouched and surfaces the error.
    pub async fn create(&self, entry: NewEntry) -> Result<Entry, GatewayError> {
        let owner = entry.user_id;
        let created = self.gateway.create_entry(entry).await?;
        self.invalidate(owner);
        Ok(created)
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), GatewayError> {
        self.gateway.delete_entry(id, owner).await?;
        self.invalidate(owner);
        Ok(())
    }

    /// Idempotent and commutative: removing an absent slot is a no-op, and
    /// the order of invalidations from concurrent mutations does not matter.
    pub fn invalidate(&self, owner: Uuid) {
        self.lock_cache().remove(&owner);
    }

    fn cached(&self, owner: Uuid) -> Option<Vec<Entry>> {
        let cache = self.lock_cache();
        let slot = cache.get(&owner)?;
        debug!("entry cache hit for {owner} (fetched {})", slot.fetched_at);
        Some(slot.entries.clone())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, CacheSlot>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
