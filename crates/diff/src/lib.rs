//! Cross-client differential testing and state-transition (t8n) harness.
//!
//! This crate replays typed test vectors through the core execution path
//! (`neo_smart_contract::ApplicationEngine` over a fresh in-memory snapshot)
//! and compares the observed outcome against an expected result, either
//! recorded alongside the vector or produced by an external reference
//! implementation. It also exposes a small state-transition ("t8n") tool
//! in the style of Ethereum's `evm t8n`, reading `alloc`/`env`/`txs` JSON
//! and emitting a post-state allocation and a receipt list.

pub mod compare;
pub mod coverage;
pub mod executor;
pub mod report;
pub mod t8n;
pub mod vector;

pub use compare::{Difference, ResultComparator};
pub use coverage::CoverageManifest;
pub use executor::{EngineExecutor, ExecutionOutcome, Executor};
pub use report::DiffReporter;
pub use vector::{ExpectedOutcome, TestVector, VectorLoader};

use thiserror::Error;

/// Errors raised while loading vectors, executing them, or running t8n.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid vector: {0}")]
    InvalidVector(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("{0}")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, DiffError>;
