//! Core of a Neo N3 protocol-compatible node.
//!
//! This crate is a thin facade over the workspace's subsystem crates: the
//! binary codec and cryptographic primitives (`neo_io`, `neo_cryptography`),
//! the data model (`neo_core`), the persistence layer (`neo_persistence`),
//! the stack machine and interop layer (`neo_vm`, `neo_smart_contract`), and
//! the ledger (`neo_ledger`). It re-exports the pieces most commonly used
//! together so downstream binaries (the differential-testing harness in
//! `neo-diff`, or a future node process) don't need to depend on every crate
//! individually.

pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as cryptography;
pub use neo_ledger as ledger;
pub use neo_persistence as persistence;
pub use neo_smart_contract as smart_contract;
pub use neo_vm as vm;

pub use neo_core::{Signer, Transaction, UInt160, UInt256, Witness};
pub use neo_ledger::{Block, BlockHeader, VerifyResult};
pub use neo_smart_contract::ApplicationEngine;
pub use neo_vm::{ExecutionEngine, StackItem, VMState};
