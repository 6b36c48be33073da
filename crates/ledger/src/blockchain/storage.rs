//! Storage interface and implementation.
//!
//! This module provides storage functionality exactly matching C# Neo Storage classes.

use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

const STORAGE_PREFIX_STORAGE: u8 = 0x05; // Matches C# StoragePrefix.Storage

/// Storage key for blockchain data (matches C# Neo Storage key structure)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub prefix: Vec<u8>,
    pub key: Vec<u8>,
}

impl StorageKey {
    /// Creates a new storage key
    pub fn new(prefix: Vec<u8>, key: Vec<u8>) -> Self {
        Self { prefix, key }
    }

    /// Gets the full key bytes (prefix + key)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut full_key = self.prefix.clone();
        full_key.extend_from_slice(&self.key);
        full_key
    }

    /// Creates a storage key for current blockchain height
    pub fn current_height() -> Self {
        Self::new(b"SYS".to_vec(), b"CurrentHeight".to_vec())
    }

    /// Creates a storage key for contract data
    pub fn contract(script_hash: neo_core::UInt160) -> Self {
        Self::new(b"ST".to_vec(), script_hash.as_bytes().to_vec())
    }

    /// Creates a storage key for contract storage entries (script hash prefix + raw key).
    pub fn contract_storage(script_hash: &neo_core::UInt160, key: &[u8]) -> Self {
        let mut prefix = Vec::with_capacity(1 + script_hash.as_bytes().len());
        prefix.push(STORAGE_PREFIX_STORAGE);
        prefix.extend_from_slice(&script_hash.as_bytes());
        Self::new(prefix, key.to_vec())
    }

    /// Creates a storage key for block header
    pub fn block_header(index: u32) -> Self {
        Self::new(b"DATA_BlockHeader".to_vec(), index.to_le_bytes().to_vec())
    }

    /// Creates a storage key for block hash
    pub fn block_hash(index: u32) -> Self {
        Self::new(b"DATA_BlockHash".to_vec(), index.to_le_bytes().to_vec())
    }

    /// Creates a storage key for transaction
    pub fn transaction(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_Transaction".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for transaction block index
    pub fn transaction_block(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_TransactionBlock".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for transaction index within block
    pub fn transaction_index(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_TransactionIndex".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for the list of transactions in a block
    pub fn block_transactions(index: u32) -> Self {
        Self::new(b"DATA_BlockTxs".to_vec(), index.to_le_bytes().to_vec())
    }
}

/// Storage item containing value data (matches C# Neo StorageItem)
#[derive(Debug, Clone, PartialEq)]
pub struct StorageItem {
    pub value: Vec<u8>,
}

impl StorageItem {
    /// Creates a new storage item
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }
}

/// Storage interface for blockchain data (matches C# Neo Storage interface exactly)
#[async_trait::async_trait]
pub trait StorageProvider: Send + Sync {
    /// Gets a value by key
    async fn get(&self, key: &StorageKey) -> Result<StorageItem>;

    /// Puts a value by key
    async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()>;

    /// Deletes a value by key
    async fn delete(&self, key: &StorageKey) -> Result<()>;

    /// Checks if a key exists
    async fn contains(&self, key: &StorageKey) -> Result<bool>;

    /// Creates a snapshot for consistent reads
    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>>;
}

/// Synchronous in-memory storage implementation: a `HashMap` behind a
/// `parking_lot::RwLock`. This is the only storage backend the ledger ships.
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Creates a new, empty in-memory storage instance.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageProvider for MemoryStorage {
    async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        let full_key = key.to_bytes();
        match self.data.read().get(&full_key) {
            Some(value) => Ok(StorageItem::new(value.clone())),
            None => Err(Error::NotFound),
        }
    }

    async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()> {
        let full_key = key.to_bytes();
        self.data.write().insert(full_key, item.value.clone());
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        let full_key = key.to_bytes();
        self.data.write().remove(&full_key);
        Ok(())
    }

    async fn contains(&self, key: &StorageKey) -> Result<bool> {
        let full_key = key.to_bytes();
        Ok(self.data.read().contains_key(&full_key))
    }

    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>> {
        let data = self.data.read().clone();
        Ok(Arc::new(InMemorySnapshot::new(data)))
    }
}

/// Point-in-time, read-only view used for consistent reads during a snapshot's lifetime.
struct InMemorySnapshot {
    data: Arc<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemorySnapshot {
    fn new(data: HashMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}

#[async_trait::async_trait]
impl StorageProvider for InMemorySnapshot {
    async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        let full_key = key.to_bytes();
        match self.data.get(&full_key) {
            Some(value) => Ok(StorageItem::new(value.clone())),
            None => Err(Error::NotFound),
        }
    }

    async fn put(&self, _key: &StorageKey, _item: &StorageItem) -> Result<()> {
        Err(Error::StorageError("Snapshots are read-only".to_string()))
    }

    async fn delete(&self, _key: &StorageKey) -> Result<()> {
        Err(Error::StorageError("Snapshots are read-only".to_string()))
    }

    async fn contains(&self, key: &StorageKey) -> Result<bool> {
        let full_key = key.to_bytes();
        Ok(self.data.contains_key(&full_key))
    }

    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>> {
        Ok(Arc::new(InMemorySnapshot {
            data: self.data.clone(),
        }))
    }
}

/// Main storage wrapper (matches C# Neo Storage class exactly)
pub struct Storage {
    provider: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("provider", &"<dyn StorageProvider>")
            .finish()
    }
}

impl Storage {
    /// Creates a new storage instance with a provider
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Creates a new in-memory storage instance (default)
    pub fn new_default() -> Result<Self> {
        Ok(Self::new_memory())
    }

    /// Creates a new in-memory storage instance
    pub fn new_memory() -> Self {
        Self {
            provider: Arc::new(MemoryStorage::new()),
        }
    }

    /// Creates a new in-memory storage instance for testing
    pub fn new_temp() -> Self {
        Self::new_memory()
    }

    /// Gets a value by key
    pub async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        self.provider.get(key).await
    }

    /// Puts a value by key
    pub async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()> {
        self.provider.put(key, item).await
    }

    /// Deletes a value by key
    pub async fn delete(&self, key: &StorageKey) -> Result<()> {
        self.provider.delete(key).await
    }

    /// Checks if a key exists
    pub async fn contains(&self, key: &StorageKey) -> Result<bool> {
        self.provider.contains(key).await
    }

    /// Creates a snapshot for consistent reads
    pub async fn snapshot(&self) -> Result<Storage> {
        let snapshot_provider = self.provider.snapshot().await?;
        Ok(Storage {
            provider: snapshot_provider,
        })
    }
}
