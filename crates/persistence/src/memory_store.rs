//! Synchronous in-memory store.
//!
//! This is the only store this crate ships: a `BTreeMap<Vec<u8>, Vec<u8>>`
//! behind a `parking_lot::RwLock`, implementing the same `IReadOnlyStore` /
//! `IWriteStore` / `IStore` / `IStoreSnapshot` / `StorageProvider` lattice a
//! persistent backend would. `BTreeMap` gives ordered iteration, which
//! `find`'s `SeekDirection` depends on to mean something.

use crate::storage::{IReadOnlyStore, IStore, IStoreSnapshot, SeekDirection, StorageConfig, StorageProvider};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

fn find_in(map: &BTreeMap<Vec<u8>, Vec<u8>>, key_or_prefix: Option<&[u8]>, direction: SeekDirection) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut entries: Vec<(Vec<u8>, Vec<u8>)> = match key_or_prefix {
        Some(prefix) => map
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    };
    if direction == SeekDirection::Backward {
        entries.reverse();
    }
    entries
}

/// The in-memory store. Cloning shares the underlying map (an `Arc`), so a
/// snapshot observes concurrent writes to the live store unless it copies
/// the map itself, which is what `get_snapshot` does.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        self.data.read().contains_key(key)
    }

    fn find(&self, key_or_prefix: Option<&[u8]>, direction: SeekDirection) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let entries = find_in(&self.data.read(), key_or_prefix, direction);
        Box::new(entries.into_iter())
    }
}

impl crate::storage::IWriteStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data.write().insert(key, value);
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.data.write().remove(key);
    }
}

impl IStore for MemoryStore {
    fn get_snapshot(&self) -> Box<dyn IStoreSnapshot> {
        Box::new(MemoryStoreSnapshot {
            base: self.clone(),
            overlay: BTreeMap::new(),
            deleted: Default::default(),
        })
    }
}

/// A point-in-time view over a `MemoryStore` with a local write overlay.
/// Reads check the overlay/tombstones first, then fall back to the base
/// store; writes stay local until `commit`.
pub struct MemoryStoreSnapshot {
    base: MemoryStore,
    overlay: BTreeMap<Vec<u8>, Vec<u8>>,
    deleted: std::collections::BTreeSet<Vec<u8>>,
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemoryStoreSnapshot {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        if self.deleted.contains(key) {
            return None;
        }
        if let Some(v) = self.overlay.get(key) {
            return Some(v.clone());
        }
        self.base.try_get(key)
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        if self.deleted.contains(key) {
            return false;
        }
        self.overlay.contains_key(key) || self.base.contains(key)
    }

    fn find(&self, key_or_prefix: Option<&[u8]>, direction: SeekDirection) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let base_data = self.base.data.read();
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = base_data.clone();
        drop(base_data);
        for key in &self.deleted {
            merged.remove(key);
        }
        for (k, v) in &self.overlay {
            merged.insert(k.clone(), v.clone());
        }
        let entries = find_in(&merged, key_or_prefix, direction);
        Box::new(entries.into_iter())
    }
}

impl crate::storage::IWriteStore<Vec<u8>, Vec<u8>> for MemoryStoreSnapshot {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.deleted.remove(&key);
        self.overlay.insert(key, value);
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.overlay.remove(key);
        self.deleted.insert(key.clone());
    }
}

impl IStoreSnapshot for MemoryStoreSnapshot {
    fn store(&self) -> &dyn IStore {
        &self.base
    }

    fn commit(&mut self) {
        let mut data = self.base.data.write();
        for key in self.deleted.drain() {
            data.remove(&key);
        }
        for (key, value) in std::mem::take(&mut self.overlay) {
            data.insert(key, value);
        }
    }
}

/// Storage provider for `MemoryStore`. `create_store` ignores `config`
/// beyond its presence: there is no path, no compression, nothing to
/// configure for a process-lifetime map.
pub struct MemoryStorageProvider;

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MemoryStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn create_store(&self, _config: &StorageConfig) -> crate::Result<Box<dyn IStore>> {
        Ok(Box::new(MemoryStore::new()))
    }
}
