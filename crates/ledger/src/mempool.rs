//! Memory Pool Implementation
//!
//! This module provides a complete transaction memory pool implementation
//! that exactly matches the C# Neo.Network.P2P.MemoryPool functionality.

use crate::{Error, Result, VerifyResult};
use neo_core::{Transaction, UInt160, UInt256};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// Memory pool configuration (matches C# MemoryPool settings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolConfig {
    /// Maximum number of transactions in pool
    pub max_transactions: usize,
    /// Maximum memory usage in bytes
    pub max_memory_usage: usize,
    /// Transaction timeout in seconds
    pub transaction_timeout: u64,
    /// Minimum fee per byte
    pub min_fee_per_byte: u64,
    /// Enable transaction replacement
    pub enable_replacement: bool,
    /// Maximum transaction size
    pub max_transaction_size: usize,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            max_transactions: 50000,             // Matches C# Neo default
            max_memory_usage: 100 * 1024 * 1024, // 100MB
            transaction_timeout: 120,            // 2 minutes
            min_fee_per_byte: 1000,              // 0.001 GAS per byte
            enable_replacement: true,
            max_transaction_size: 102400, // 100KB
        }
    }
}

/// Transaction pool entry with metadata
#[derive(Debug, Clone)]
pub struct PooledTransaction {
    /// The transaction
    pub transaction: Transaction,
    /// When it was added to the pool
    pub timestamp: SystemTime,
    /// Network fee per byte
    pub fee_per_byte: u64,
    /// Total size in bytes
    pub size: usize,
    /// Sender addresses
    pub senders: Vec<UInt160>,
    /// Whether this is a high priority transaction
    pub high_priority: bool,
}

impl PooledTransaction {
    /// Creates a new pooled transaction
    pub fn new(transaction: Transaction, high_priority: bool) -> Result<Self> {
        let size = transaction.size();
        let fee_per_byte = if size > 0 {
            transaction.network_fee() as u64 / size as u64
        } else {
            0
        };

        // Extract sender addresses from signers
        let senders = transaction
            .signers()
            .iter()
            .map(|signer| signer.account)
            .collect();

        Ok(Self {
            transaction,
            timestamp: SystemTime::now(),
            fee_per_byte,
            size,
            senders,
            high_priority,
        })
    }

    /// Gets the transaction hash
    pub fn hash(&self) -> Result<UInt256> {
        self.transaction
            .hash()
            .map_err(|e| Error::Generic(e.to_string()))
    }

    /// Checks if the transaction has expired
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.timestamp.elapsed().unwrap_or(Duration::ZERO) > timeout
    }

    /// Gets the priority score for block-building order. Eviction never
    /// consults this: it is decided purely on `fee_per_byte`.
    pub fn priority_score(&self) -> u64 {
        if self.high_priority {
            u64::MAX - 1000 + self.fee_per_byte
        } else {
            self.fee_per_byte
        }
    }
}

/// Memory pool statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolStats {
    /// Current transaction count
    pub transaction_count: usize,
    /// Current memory usage in bytes
    pub memory_usage: usize,
    /// Transactions added total
    pub transactions_added: u64,
    /// Transactions removed total
    pub transactions_removed: u64,
    /// High priority transactions
    pub high_priority_count: usize,
    /// Average fee per byte
    pub average_fee_per_byte: f64,
    /// Pool utilization percentage
    pub utilization_percentage: f64,
}

impl Default for MempoolStats {
    fn default() -> Self {
        Self {
            transaction_count: 0,
            memory_usage: 0,
            transactions_added: 0,
            transactions_removed: 0,
            high_priority_count: 0,
            average_fee_per_byte: 0.0,
            utilization_percentage: 0.0,
        }
    }
}

/// Transaction verification delegate for mempool (matches C# IMemoryPoolTxObserverPlugin)
pub trait TxVerifier: Send + Sync {
    /// Verifies if a transaction is valid for inclusion in mempool
    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool>;

    /// Checks if transaction conflicts with any in the pool
    fn check_conflicts(
        &self,
        transaction: &Transaction,
        pool_transactions: &[&Transaction],
    ) -> Result<bool>;

    /// Called when transaction is added to mempool
    fn on_transaction_added(&self, transaction: &Transaction) -> Result<()>;

    /// Called when transaction is removed from mempool
    fn on_transaction_removed(&self, transaction: &Transaction, reason: RemovalReason) -> Result<()>;
}

/// Reason for transaction removal from mempool (matches C# MemoryPool.RemovalReason)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Included in a persisted block
    AddedToBlock,
    /// Expired due to timeout
    Expired,
    /// Invalid transaction
    Invalid,
    /// Removed under a policy decision, e.g. fee-priority eviction on overflow
    PolicyViolation,
    /// Removed for an unspecified reason
    Unknown,
}

/// Default transaction verifier
#[derive(Debug)]
pub struct DefaultTxVerifier;

impl TxVerifier for DefaultTxVerifier {
    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool> {
        // Full transaction validation (matches C# Neo verification)

        // 1. Check basic format
        if transaction.script().is_empty() {
            debug!("Transaction rejected: empty script");
            return Ok(false);
        }

        // 2. Check signers
        if transaction.signers().is_empty() {
            debug!("Transaction rejected: no signers");
            return Ok(false);
        }

        // 3. Check witnesses match signers
        if transaction.witnesses().len() != transaction.signers().len() {
            debug!("Transaction rejected: witness/signer count mismatch");
            return Ok(false);
        }

        // 4. Check fees are reasonable
        if transaction.network_fee() < 0 || transaction.system_fee() < 0 {
            debug!("Transaction rejected: negative fees");
            return Ok(false);
        }

        // 5. Check transaction size limits
        let tx_size = transaction.size();
        if tx_size > 102400 {
            // 100KB max transaction size (C# Neo default)
            debug!("Transaction rejected: size {} exceeds limit", tx_size);
            return Ok(false);
        }

        // 6. Check script length limits
        if transaction.script().len() > 65536 {
            // 64KB max script size
            debug!("Transaction rejected: script too large");
            return Ok(false);
        }

        // 7. Validate version
        if transaction.version() != 0 {
            debug!("Transaction rejected: unsupported version {}", transaction.version());
            return Ok(false);
        }

        // 8. Check valid until block
        if transaction.valid_until_block() == 0 {
            debug!("Transaction rejected: invalid validUntilBlock");
            return Ok(false);
        }

        debug!("Transaction {} passed basic verification", transaction.hash().unwrap_or_default());
        Ok(true)
    }

    fn check_conflicts(
        &self,
        transaction: &Transaction,
        pool_transactions: &[&Transaction],
    ) -> Result<bool> {
        let tx_hash = transaction.hash()?;

        // Check for duplicate transaction hash
        for pool_tx in pool_transactions {
            if pool_tx.hash()? == tx_hash {
                debug!("Transaction conflict: duplicate hash {}", tx_hash);
                return Ok(true); // Conflict found
            }

            // Check for conflicting signers with same nonce (if using nonce-based replay protection)
            for signer in transaction.signers() {
                for pool_signer in pool_tx.signers() {
                    if signer.account == pool_signer.account {
                        // In a full implementation, check nonces or other conflict detection
                        debug!("Potential signer conflict detected for account {}", signer.account);
                    }
                }
            }
        }

        Ok(false) // No conflicts
    }

    fn on_transaction_added(&self, transaction: &Transaction) -> Result<()> {
        info!("Transaction {} added to mempool", transaction.hash().unwrap_or_default());
        Ok(())
    }

    fn on_transaction_removed(&self, transaction: &Transaction, reason: RemovalReason) -> Result<()> {
        debug!("Transaction {} removed from mempool: {:?}",
               transaction.hash().unwrap_or_default(), reason);
        Ok(())
    }
}

/// The pool's indexed transaction data, guarded by a single lock so the
/// capacity check, eviction, and insertion inside `try_add` execute as one
/// linearizable step with respect to capacity and eviction.
struct MempoolState {
    /// Transactions by hash
    transactions: HashMap<UInt256, PooledTransaction>,
    /// Transaction hashes sorted by priority (for block-building order)
    priority_queue: BTreeMap<u64, Vec<UInt256>>,
    /// Transaction hashes by sender address
    sender_map: HashMap<UInt160, HashSet<UInt256>>,
}

impl MempoolState {
    fn new() -> Self {
        Self {
            transactions: HashMap::new(),
            priority_queue: BTreeMap::new(),
            sender_map: HashMap::new(),
        }
    }

    fn insert(&mut self, tx_hash: UInt256, pooled_tx: PooledTransaction) {
        let priority = pooled_tx.priority_score();
        for sender in &pooled_tx.senders {
            self.sender_map
                .entry(*sender)
                .or_insert_with(HashSet::new)
                .insert(tx_hash);
        }
        self.priority_queue
            .entry(priority)
            .or_insert_with(Vec::new)
            .push(tx_hash);
        self.transactions.insert(tx_hash, pooled_tx);
    }

    fn remove(&mut self, tx_hash: &UInt256) -> Option<PooledTransaction> {
        let pooled_tx = self.transactions.remove(tx_hash)?;

        let priority = pooled_tx.priority_score();
        if let Some(tx_list) = self.priority_queue.get_mut(&priority) {
            tx_list.retain(|hash| hash != tx_hash);
            if tx_list.is_empty() {
                self.priority_queue.remove(&priority);
            }
        }

        for sender in &pooled_tx.senders {
            if let Some(tx_set) = self.sender_map.get_mut(sender) {
                tx_set.remove(tx_hash);
                if tx_set.is_empty() {
                    self.sender_map.remove(sender);
                }
            }
        }

        Some(pooled_tx)
    }

    /// The pooled transaction with the lowest network-fee-per-byte, if any.
    fn lowest_fee_entry(&self) -> Option<UInt256> {
        self.transactions
            .iter()
            .min_by_key(|(_, tx)| tx.fee_per_byte)
            .map(|(hash, _)| *hash)
    }
}

/// Main memory pool implementation (matches C# MemoryPool exactly)
pub struct MemoryPool {
    /// Configuration
    config: MempoolConfig,
    /// All indexed pool data, guarded by a single lock (see `MempoolState`)
    state: RwLock<MempoolState>,
    /// Pool statistics
    stats: Arc<RwLock<MempoolStats>>,
    /// Transaction verifier
    verifier: Arc<dyn TxVerifier>,
}

impl MemoryPool {
    /// Creates a new memory pool
    pub fn new(config: MempoolConfig) -> Self {
        Self {
            config,
            state: RwLock::new(MempoolState::new()),
            stats: Arc::new(RwLock::new(MempoolStats::default())),
            verifier: Arc::new(DefaultTxVerifier),
        }
    }

    /// Creates a new memory pool with custom verifier
    pub fn with_verifier(config: MempoolConfig, verifier: Arc<dyn TxVerifier>) -> Self {
        Self {
            config,
            state: RwLock::new(MempoolState::new()),
            stats: Arc::new(RwLock::new(MempoolStats::default())),
            verifier,
        }
    }

    /// Tries to add a transaction to the pool (matches C# TryAdd).
    ///
    /// On overflow, evicts the pool's lowest network-fee-per-byte transaction,
    /// but only if it is strictly lower than the incoming transaction's fee
    /// per byte; otherwise the incoming transaction is rejected with
    /// `OutOfMemory`. `len(pool) <= capacity` holds after every call.
    pub fn try_add(&self, transaction: Transaction, high_priority: bool) -> Result<VerifyResult> {
        let tx_hash = transaction.hash()?;

        // 1. Check transaction size
        let tx_size = transaction.size();
        if tx_size > self.config.max_transaction_size {
            warn!("Transaction {} too large: {} bytes", tx_hash, tx_size);
            return Ok(VerifyResult::OverSize);
        }

        // 2. Check minimum fee
        let fee_per_byte = if tx_size > 0 {
            transaction.network_fee() as u64 / tx_size as u64
        } else {
            0
        };

        if fee_per_byte < self.config.min_fee_per_byte {
            warn!(
                "Transaction {} fee too low: {} per byte",
                tx_hash, fee_per_byte
            );
            return Ok(VerifyResult::PolicyFail);
        }

        // 3. Verify transaction
        if !self.verifier.verify_transaction(&transaction)? {
            warn!("Transaction {} failed verification", tx_hash);
            return Ok(VerifyResult::Invalid);
        }

        let pooled_tx = PooledTransaction::new(transaction, high_priority)?;

        // 4-6. Duplicate/conflict check, capacity check, eviction, and
        // insertion all happen under one write guard so the admission
        // decision is linearizable with respect to capacity and eviction.
        let evicted = {
            let mut state = self.state.write().unwrap();

            if state.transactions.contains_key(&tx_hash) {
                debug!("Transaction {} already in pool", tx_hash);
                return Ok(VerifyResult::AlreadyInPool);
            }

            let pool_txs: Vec<&Transaction> = state
                .transactions
                .values()
                .map(|pooled| &pooled.transaction)
                .collect();
            if self.verifier.check_conflicts(&pooled_tx.transaction, &pool_txs)? {
                warn!(
                    "Transaction {} conflicts with existing transactions",
                    tx_hash
                );
                return Ok(VerifyResult::HasConflicts);
            }

            let evicted = if state.transactions.len() >= self.config.max_transactions {
                match state.lowest_fee_entry() {
                    Some(victim_hash)
                        if state.transactions[&victim_hash].fee_per_byte < pooled_tx.fee_per_byte =>
                    {
                        state.remove(&victim_hash)
                    }
                    _ => {
                        debug!("Cannot add transaction {}, pool is full", tx_hash);
                        return Ok(VerifyResult::OutOfMemory);
                    }
                }
            } else {
                None
            };

            state.insert(tx_hash, pooled_tx.clone());
            evicted
        };

        if let Some(victim) = evicted {
            self.update_stats_on_remove(&victim);
            let _ = self
                .verifier
                .on_transaction_removed(&victim.transaction, RemovalReason::PolicyViolation);
            debug!("Evicted transaction {} to make space", victim.hash()?);
        }

        self.update_stats_on_add(&pooled_tx);
        self.verifier.on_transaction_added(&pooled_tx.transaction)?;

        info!("Added transaction {} to mempool", tx_hash);
        Ok(VerifyResult::Succeed)
    }

    /// Removes a transaction from the pool (matches C# TryRemove)
    pub fn try_remove(&self, tx_hash: &UInt256) -> Result<Option<Transaction>> {
        let removed = self.state.write().unwrap().remove(tx_hash);

        if let Some(pooled_tx) = removed {
            self.update_stats_on_remove(&pooled_tx);
            info!("Removed transaction {} from mempool", tx_hash);
            Ok(Some(pooled_tx.transaction))
        } else {
            Ok(None)
        }
    }

    /// Removes a transaction and notifies the verifier with an explicit reason.
    fn try_remove_with_reason(
        &self,
        tx_hash: &UInt256,
        reason: RemovalReason,
    ) -> Result<Option<Transaction>> {
        let removed = self.try_remove(tx_hash)?;
        if let Some(transaction) = &removed {
            let _ = self.verifier.on_transaction_removed(transaction, reason);
        }
        Ok(removed)
    }

    /// Checks if a transaction exists in the pool (matches C# ContainsKey)
    pub fn contains(&self, tx_hash: &UInt256) -> bool {
        self.state.read().unwrap().transactions.contains_key(tx_hash)
    }

    /// Gets a transaction from the pool (matches C# TryGetValue)
    pub fn get_transaction(&self, tx_hash: &UInt256) -> Option<Transaction> {
        self.state
            .read()
            .unwrap()
            .transactions
            .get(tx_hash)
            .map(|pooled_tx| pooled_tx.transaction.clone())
    }

    /// Gets transactions for block creation (matches C# GetSortedTransactions)
    pub fn get_sorted_transactions(&self, max_count: usize) -> Vec<Transaction> {
        let state = self.state.read().unwrap();

        let mut result = Vec::new();
        let mut total_size = 0usize;
        let max_block_size = 1024 * 1024; // 1MB max block size

        // Iterate from highest to lowest priority
        for (_priority, tx_hashes) in state.priority_queue.iter().rev() {
            for tx_hash in tx_hashes {
                if result.len() >= max_count {
                    return result;
                }

                if let Some(pooled_tx) = state.transactions.get(tx_hash) {
                    let tx_size = pooled_tx.size;
                    if total_size + tx_size > max_block_size {
                        continue; // Skip if would exceed block size
                    }

                    result.push(pooled_tx.transaction.clone());
                    total_size += tx_size;
                }
            }
        }

        result
    }

    /// Gets verified transactions (matches C# GetVerifiedTransactions)
    pub fn get_verified_transactions(&self) -> Vec<Transaction> {
        self.state
            .read()
            .unwrap()
            .transactions
            .values()
            .map(|pooled_tx| pooled_tx.transaction.clone())
            .collect()
    }

    /// Invalidates transactions from a specific sender (matches C# InvalidateVerifiedTransactions)
    pub fn invalidate_transactions_from_sender(&self, sender: &UInt160) -> Result<Vec<UInt256>> {
        let tx_hashes: Vec<UInt256> = {
            let state = self.state.read().unwrap();
            state
                .sender_map
                .get(sender)
                .map(|hashes| hashes.iter().copied().collect())
                .unwrap_or_default()
        };

        let mut invalidated = Vec::new();
        for tx_hash in tx_hashes {
            if self
                .try_remove_with_reason(&tx_hash, RemovalReason::Invalid)?
                .is_some()
            {
                invalidated.push(tx_hash);
            }
        }

        Ok(invalidated)
    }

    /// Clears all transactions from pool (matches C# Clear)
    pub fn clear(&self) -> Result<usize> {
        let removed: Vec<PooledTransaction> = {
            let mut state = self.state.write().unwrap();
            let transactions = std::mem::take(&mut state.transactions)
                .into_values()
                .collect();
            state.priority_queue.clear();
            state.sender_map.clear();
            transactions
        };

        for pooled_tx in &removed {
            let _ = self
                .verifier
                .on_transaction_removed(&pooled_tx.transaction, RemovalReason::Unknown);
        }

        let mut stats = self.stats.write().unwrap();
        *stats = MempoolStats::default();

        info!("Cleared {} transactions from mempool", removed.len());
        Ok(removed.len())
    }

    /// Gets pool statistics (matches C# MemoryPool properties)
    pub fn get_stats(&self) -> MempoolStats {
        self.stats.read().unwrap().clone()
    }

    /// Gets current transaction count (matches C# Count property)
    pub fn count(&self) -> usize {
        self.state.read().unwrap().transactions.len()
    }

    /// Gets memory usage in bytes (matches C# MemoryUsage property)
    pub fn memory_usage(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .transactions
            .values()
            .map(|pooled_tx| pooled_tx.size)
            .sum()
    }

    /// Removes expired transactions (matches C# CheckExpired)
    pub fn remove_expired_transactions(&self) -> Result<Vec<UInt256>> {
        let timeout = Duration::from_secs(self.config.transaction_timeout);

        let tx_hashes: Vec<UInt256> = {
            let state = self.state.read().unwrap();
            state
                .transactions
                .iter()
                .filter_map(|(hash, pooled_tx)| {
                    if pooled_tx.is_expired(timeout) {
                        Some(*hash)
                    } else {
                        None
                    }
                })
                .collect()
        };

        let mut expired = Vec::new();
        for tx_hash in tx_hashes {
            if self
                .try_remove_with_reason(&tx_hash, RemovalReason::Expired)?
                .is_some()
            {
                expired.push(tx_hash);
            }
        }

        if !expired.is_empty() {
            info!("Removed {} expired transactions from mempool", expired.len());
        }

        Ok(expired)
    }

    /// Updates transactions when new block is persisted (matches C# UpdatePoolForBlockPersisted)
    pub fn update_for_block_persisted(&self, block_transactions: &[UInt256]) -> Result<()> {
        let mut removed_count = 0;

        for tx_hash in block_transactions {
            if self
                .try_remove_with_reason(tx_hash, RemovalReason::AddedToBlock)?
                .is_some()
            {
                removed_count += 1;
            }
        }

        if removed_count > 0 {
            info!("Removed {} transactions from mempool (included in block)", removed_count);
        }

        Ok(())
    }

    // Private helper methods

    /// Updates statistics when transaction is added
    fn update_stats_on_add(&self, pooled_tx: &PooledTransaction) {
        let mut stats = self.stats.write().unwrap();
        stats.transaction_count += 1;
        stats.memory_usage += pooled_tx.size;
        stats.transactions_added += 1;

        if pooled_tx.high_priority {
            stats.high_priority_count += 1;
        }

        // Update average fee per byte
        let total_fees: u64 = stats.average_fee_per_byte as u64 * (stats.transaction_count - 1) as u64 + pooled_tx.fee_per_byte;
        stats.average_fee_per_byte = total_fees as f64 / stats.transaction_count as f64;

        // Update utilization percentage
        stats.utilization_percentage = (stats.transaction_count as f64 / self.config.max_transactions as f64) * 100.0;
    }

    /// Updates statistics when transaction is removed
    fn update_stats_on_remove(&self, pooled_tx: &PooledTransaction) {
        let mut stats = self.stats.write().unwrap();
        stats.transaction_count = stats.transaction_count.saturating_sub(1);
        stats.memory_usage = stats.memory_usage.saturating_sub(pooled_tx.size);
        stats.transactions_removed += 1;

        if pooled_tx.high_priority {
            stats.high_priority_count = stats.high_priority_count.saturating_sub(1);
        }

        // Update utilization percentage
        stats.utilization_percentage = (stats.transaction_count as f64 / self.config.max_transactions as f64) * 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::{Signer, Transaction, UInt160, UInt256, Witness, WitnessScope};

    fn tx_with_fee(nonce: u32, fee: i64) -> Transaction {
        let mut tx = Transaction::new();
        tx.set_nonce(nonce);
        tx.set_script(vec![0x40]); // Simple RET script
        tx.set_network_fee(fee);
        tx.add_signer(Signer {
            account: UInt160::zero(),
            scopes: WitnessScope::CalledByEntry,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        });
        tx.add_witness(Witness::default());
        tx
    }

    #[test]
    fn test_mempool_creation() {
        let config = MempoolConfig::default();
        let pool = MemoryPool::new(config.clone());

        let stats = pool.get_stats();
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(stats.memory_usage, 0);
    }

    #[test]
    fn test_pooled_transaction_creation() {
        let tx = tx_with_fee(0, 1000);
        let pooled_tx = PooledTransaction::new(tx, false).unwrap();
        assert!(!pooled_tx.high_priority);
        assert!(pooled_tx.size > 0);
        assert_eq!(pooled_tx.senders.len(), 1);
    }

    #[test]
    fn test_add_transaction() {
        let config = MempoolConfig::default();
        let pool = MemoryPool::new(config);

        let tx = tx_with_fee(0, 100000); // High fee
        let tx_hash = tx.hash().unwrap();
        let result = pool.try_add(tx, false).unwrap();

        assert_eq!(result, VerifyResult::Succeed);
        assert!(pool.contains(&tx_hash));

        let stats = pool.get_stats();
        assert_eq!(stats.transaction_count, 1);
    }

    #[test]
    fn test_duplicate_transaction_rejected() {
        let config = MempoolConfig::default();
        let pool = MemoryPool::new(config);

        let tx = tx_with_fee(0, 100000);
        assert_eq!(pool.try_add(tx.clone(), false).unwrap(), VerifyResult::Succeed);
        assert_eq!(pool.try_add(tx, false).unwrap(), VerifyResult::AlreadyInPool);
    }

    #[test]
    fn test_get_sorted_transactions() {
        let config = MempoolConfig::default();
        let pool = MemoryPool::new(config);

        // Add transactions with different fees
        for i in 0..5u32 {
            let tx = tx_with_fee(i, (i as i64 + 1) * 10000);
            assert_eq!(pool.try_add(tx, false).unwrap(), VerifyResult::Succeed);
        }

        let sorted_txs = pool.get_sorted_transactions(3);
        assert_eq!(sorted_txs.len(), 3);

        // Should be sorted by fee (highest first)
        assert!(sorted_txs[0].network_fee() >= sorted_txs[1].network_fee());
        assert!(sorted_txs[1].network_fee() >= sorted_txs[2].network_fee());
    }

    #[test]
    fn test_clear_pool() {
        let config = MempoolConfig::default();
        let pool = MemoryPool::new(config);

        for i in 0..3u32 {
            let tx = tx_with_fee(i, 10000);
            pool.try_add(tx, false).unwrap();
        }

        assert_eq!(pool.get_stats().transaction_count, 3);

        let cleared_count = pool.clear().unwrap();
        assert_eq!(cleared_count, 3);
        assert_eq!(pool.get_stats().transaction_count, 0);
    }

    /// Matches the "Mempool eviction" scenario: a capacity-3 pool filled with
    /// fees 1, 2, 3; adding fee 4 evicts fee 1; adding fee 1 to the full pool
    /// (now {2, 3, 4}) is rejected.
    #[test]
    fn test_eviction_matches_capacity_scenario() {
        let config = MempoolConfig {
            max_transactions: 3,
            min_fee_per_byte: 0,
            ..Default::default()
        };
        let pool = MemoryPool::new(config);

        for (i, fee) in [1i64, 2, 3].into_iter().enumerate() {
            let tx = tx_with_fee(i as u32, fee);
            assert_eq!(pool.try_add(tx, false).unwrap(), VerifyResult::Succeed);
        }
        assert_eq!(pool.count(), 3);

        // fee 4 > lowest pooled fee (1) -> evicts the fee-1 transaction
        let tx4 = tx_with_fee(10, 4);
        let tx4_hash = tx4.hash().unwrap();
        assert_eq!(pool.try_add(tx4, false).unwrap(), VerifyResult::Succeed);
        assert_eq!(pool.count(), 3);
        assert!(pool.contains(&tx4_hash));

        // fee 1 is not strictly greater than the new lowest pooled fee (2) -> rejected
        let tx1_again = tx_with_fee(11, 1);
        assert_eq!(pool.try_add(tx1_again, false).unwrap(), VerifyResult::OutOfMemory);
        assert_eq!(pool.count(), 3);
    }

    #[test]
    fn test_oversize_transaction_rejected() {
        let config = MempoolConfig {
            max_transaction_size: 10,
            ..Default::default()
        };
        let pool = MemoryPool::new(config);

        let mut tx = tx_with_fee(0, 100000);
        tx.set_script(vec![0x40; 64]);
        assert_eq!(pool.try_add(tx, false).unwrap(), VerifyResult::OverSize);
    }
}
