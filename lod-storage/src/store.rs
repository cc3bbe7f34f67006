use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use lod_core::errors::StoreError;
use lod_core::{CacheEntry, EntryId};
use tracing::{debug, warn};

use crate::eviction;
use crate::expiry;

/// What an insert did besides storing the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// An entry with the same id was atomically replaced.
    pub replaced: bool,
    /// Entries evicted to make room, in eviction order.
    pub evicted: Vec<EntryId>,
}

/// Capacity-bounded map of live entries.
///
/// Entry lifecycle: absent → present (insert) → present/touched (touch) →
/// absent (evict, expiry purge, clear, or replacement by a same-id insert).
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<EntryId, CacheEntry>,
    max_entries: usize,
}

impl EntryStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_entries.min(4096)),
            max_entries,
        }
    }

    /// Store `entry`. A same-id entry is replaced in place; otherwise, when
    /// full, the lowest-value entry is evicted first.
    ///
    /// # Errors
    /// `OverCapacityUnrecoverable` when capacity is 0 or no slot can be freed.
    pub fn insert(&mut self, entry: CacheEntry) -> Result<InsertOutcome, StoreError> {
        if self.max_entries == 0 {
            return Err(StoreError::OverCapacityUnrecoverable { max_entries: 0 });
        }

        if let Some(existing) = self.entries.get_mut(&entry.id) {
            debug!(id = %entry.id, "replacing entry with same id");
            *existing = entry;
            return Ok(InsertOutcome {
                replaced: true,
                evicted: Vec::new(),
            });
        }

        let mut evicted = Vec::new();
        while self.entries.len() >= self.max_entries {
            match self.evict_one() {
                Some(id) => evicted.push(id),
                None => {
                    return Err(StoreError::OverCapacityUnrecoverable {
                        max_entries: self.max_entries,
                    })
                }
            }
        }

        self.entries.insert(entry.id.clone(), entry);
        Ok(InsertOutcome {
            replaced: false,
            evicted,
        })
    }

    pub fn get(&self, id: &EntryId) -> Option<&CacheEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Record a hit: bump `access_count`, set `last_accessed` to now.
    pub fn touch(&mut self, id: &EntryId) -> Option<&CacheEntry> {
        self.touch_at(id, Utc::now())
    }

    pub fn touch_at(&mut self, id: &EntryId, now: DateTime<Utc>) -> Option<&CacheEntry> {
        let entry = self.entries.get_mut(id)?;
        entry.record_access(now);
        Some(entry)
    }

    /// Remove the entry with the lowest value score (oldest on ties).
    pub fn evict_one(&mut self) -> Option<EntryId> {
        let victim = eviction::select_victim(self.entries.values())?.clone();
        if let Some(entry) = self.entries.remove(&victim) {
            debug!(
                id = %victim,
                value_score = entry.value_score(),
                "evicted entry"
            );
        }
        Some(victim)
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change capacity, evicting down to it immediately.
    pub fn set_max_entries(&mut self, max_entries: usize) -> Vec<EntryId> {
        self.max_entries = max_entries;
        let mut evicted = Vec::new();
        while self.entries.len() > self.max_entries {
            match self.evict_one() {
                Some(id) => evicted.push(id),
                None => break,
            }
        }
        if !evicted.is_empty() {
            warn!(
                max_entries,
                evicted = evicted.len(),
                "capacity reduced, evicted entries"
            );
        }
        evicted
    }

    /// Remove entries older than `ttl`. Returns the removed ids.
    pub fn purge_expired(&mut self, ttl: Option<Duration>, now: DateTime<Utc>) -> Vec<EntryId> {
        if ttl.is_none() {
            return Vec::new();
        }
        let expired: Vec<EntryId> = self
            .entries
            .values()
            .filter(|e| expiry::is_expired(e, ttl, now))
            .map(|e| e.id.clone())
            .collect();
        for id in &expired {
            self.entries.remove(id);
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "purged expired entries");
        }
        expired
    }

    pub fn values(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }
}
