//! Application execution record and the block persistence observer hooks.
//!
//! `ApplicationExecuted` is the canonical record of one transaction's (or the
//! block-level trigger's) execution, produced while persisting a block.
//! Observers registered on `Blockchain` receive these records in registration
//! order as the block is persisted and again once it is fully committed.

use crate::Block;
use neo_vm::{NotificationEvent, TriggerType, VMState};
use neo_core::UInt256;
use std::fmt;
use std::sync::Arc;

/// Record of a single application execution, produced during `persist_block`.
#[derive(Debug, Clone)]
pub struct ApplicationExecuted {
    /// Hash of the transaction that was executed (zero hash for the
    /// block-level `OnPersist`/`PostPersist` system triggers).
    pub tx_hash: UInt256,
    /// Trigger this execution ran under.
    pub trigger: TriggerType,
    /// Final VM state (HALT or FAULT).
    pub vm_state: VMState,
    /// GAS consumed by the execution, in datoshi.
    pub gas_consumed: u64,
    /// Fault message, if the execution ended in FAULT.
    pub exception: Option<String>,
    /// Result stack, rendered for logging/comparison purposes.
    pub stack: Vec<String>,
    /// Notifications emitted during the execution, in emission order.
    pub notifications: Vec<NotificationEvent>,
}

impl ApplicationExecuted {
    pub fn for_transaction(tx_hash: UInt256, vm_state: VMState, gas_consumed: u64) -> Self {
        Self {
            tx_hash,
            trigger: TriggerType::Application,
            vm_state,
            gas_consumed,
            exception: None,
            stack: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

/// Receives `ApplicationExecuted` records as a block is persisted, plus a
/// final notification once the block and its executions are committed.
///
/// Observers must not raise: any panic unwinding out of a callback is caught
/// and logged, and any `Err` returned is logged, but neither aborts
/// persistence of the block. Observers are invoked in registration order.
pub trait PersistObserver: Send + Sync {
    /// Called once per executed transaction (and, for the block itself, once
    /// more with a zero `tx_hash`) while the block is being persisted.
    fn on_persist(&self, _block: &Block, _executed: &ApplicationExecuted) {}

    /// Called once after the block and all its executions have been
    /// committed to storage.
    fn on_committed(&self, _block: &Block) {}
}

impl fmt::Debug for dyn PersistObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<persist observer>")
    }
}

/// Fires `on_persist` across every registered observer, in order, catching
/// panics and logging `Err`s so that one misbehaving observer cannot abort
/// persistence of the block.
pub(super) fn fire_on_persist(
    observers: &[Arc<dyn PersistObserver>],
    block: &Block,
    executed: &ApplicationExecuted,
) {
    for observer in observers {
        let observer = observer.clone();
        let block_ref = block;
        let executed_ref = executed;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            observer.on_persist(block_ref, executed_ref);
        }));
        if let Err(panic) = result {
            tracing::error!(
                "persist observer panicked on_persist for tx {}: {:?}",
                executed.tx_hash,
                panic
            );
        }
    }
}

/// Fires `on_committed` across every registered observer, in order, with the
/// same panic-swallowing guarantee as `fire_on_persist`.
pub(super) fn fire_on_committed(observers: &[Arc<dyn PersistObserver>], block: &Block) {
    for observer in observers {
        let observer = observer.clone();
        let block_ref = block;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            observer.on_committed(block_ref);
        }));
        if let Err(panic) = result {
            tracing::error!(
                "persist observer panicked on_committed for block {}: {:?}",
                block_ref.header.index,
                panic
            );
        }
    }
}
