//! Read-through write cache over an `IStoreSnapshot`, tracking per-key
//! state so `commit` only touches what actually changed.

use crate::storage::IReadOnlyStore;
use std::collections::BTreeMap;

/// Tracks what happened to a cached entry since the cache was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Unchanged since it was read from the underlying store.
    None,
    /// Did not exist in the underlying store; created in the cache.
    Added,
    /// Existed in the underlying store; overwritten in the cache.
    Changed,
    /// Existed in the underlying store (or was `Added`); removed from the cache.
    Deleted,
}

struct Entry {
    value: Vec<u8>,
    state: TrackState,
}

/// A write-back cache keyed on raw bytes, backed by any `IReadOnlyStore`.
/// Reads populate the cache on first access (`TrackState::None`); writes
/// mark the entry `Added`/`Changed`; `delete` marks it `Deleted` without
/// dropping the entry, so `commit` knows to remove it downstream. `commit`
/// drains deletions before upserts in a single pass and resets every
/// surviving entry back to `TrackState::None`.
pub struct DataCache<'a> {
    store: &'a dyn IReadOnlyStore<Vec<u8>, Vec<u8>>,
    entries: BTreeMap<Vec<u8>, Entry>,
}

impl<'a> DataCache<'a> {
    pub fn new(store: &'a dyn IReadOnlyStore<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            store,
            entries: BTreeMap::new(),
        }
    }

    /// Reads through the cache to the underlying store on a miss.
    pub fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        if let Some(entry) = self.entries.get(key) {
            return match entry.state {
                TrackState::Deleted => None,
                _ => Some(entry.value.clone()),
            };
        }
        let value = self.store.try_get(&key.to_vec())?;
        self.entries.insert(
            key.to_vec(),
            Entry {
                value: value.clone(),
                state: TrackState::None,
            },
        );
        Some(value)
    }

    pub fn contains(&mut self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or overwrites `key`. Marks `Added` if the cache (after a
    /// read-through) has never seen the key, `Changed` otherwise.
    pub fn put(&mut self, key: &[u8], value: Vec<u8>) {
        let existed = self.entries.contains_key(key) || self.store.try_get(&key.to_vec()).is_some();
        self.entries.insert(
            key.to_vec(),
            Entry {
                value,
                state: if existed { TrackState::Changed } else { TrackState::Added },
            },
        );
    }

    /// Marks `key` deleted. A no-op for a key that never existed anywhere.
    pub fn delete(&mut self, key: &[u8]) {
        match self.entries.get_mut(key) {
            Some(entry) if entry.state == TrackState::Added => {
                self.entries.remove(key);
            }
            Some(entry) => entry.state = TrackState::Deleted,
            None => {
                if self.store.try_get(&key.to_vec()).is_some() {
                    self.entries.insert(
                        key.to_vec(),
                        Entry {
                            value: Vec::new(),
                            state: TrackState::Deleted,
                        },
                    );
                }
            }
        }
    }

    pub fn track_state(&self, key: &[u8]) -> TrackState {
        self.entries.get(key).map(|e| e.state).unwrap_or(TrackState::None)
    }

    /// Drains deletions then upserts into `writer`, then resets every
    /// surviving entry's state to `None` so a second `commit` is a no-op.
    pub fn commit<W>(&mut self, writer: &mut W)
    where
        W: crate::storage::IWriteStore<Vec<u8>, Vec<u8>>,
    {
        let deleted: Vec<Vec<u8>> = self
            .entries
            .iter()
            .filter(|(_, e)| e.state == TrackState::Deleted)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &deleted {
            writer.delete(key);
            self.entries.remove(key);
        }

        for (key, entry) in self.entries.iter_mut() {
            if entry.state == TrackState::Added || entry.state == TrackState::Changed {
                writer.put(key.clone(), entry.value.clone());
                entry.state = TrackState::None;
            }
        }
    }
}
