//! Test vector format and loader.
//!
//! A vector is a single JSON document describing a script to run, the
//! contract-scoped storage it should start with, and the outcome it is
//! expected to produce. Vectors are grouped into categories (e.g.
//! `"arithmetic"`, `"storage"`, `"oracle"`) for coverage reporting.

use crate::{DiffError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One contract's pre-seeded storage: key/value pairs, hex-encoded.
pub type StorageMap = BTreeMap<String, String>;

/// A single test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Human-readable name, unique within its category.
    pub name: String,

    /// Grouping used by the coverage manifest (e.g. "arithmetic", "native").
    pub category: String,

    /// Hex-encoded script bytes to execute.
    pub script: String,

    /// Gas limit for the run. Defaults to a generous ceiling if omitted.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: i64,

    /// Pre-state: contract hash (hex, 20 bytes) -> storage map.
    #[serde(default)]
    pub pre_state: BTreeMap<String, StorageMap>,

    /// The outcome this vector is expected to produce.
    pub expected: ExpectedOutcome,
}

fn default_gas_limit() -> i64 {
    20_000_000_00000000
}

/// The expected outcome of running a vector's script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// "HALT" or "FAULT".
    pub state: String,

    /// Expected result stack, hex-encoded items, bottom to top. Ignored for
    /// FAULT vectors.
    #[serde(default)]
    pub stack: Vec<String>,

    /// Expected gas consumed. Ignored for FAULT vectors if absent.
    pub gas_consumed: Option<i64>,

    /// Expected exception substring for FAULT vectors.
    pub exception: Option<String>,

    /// Expected notifications, as `(contract hex, event name)` pairs.
    #[serde(default)]
    pub notifications: Vec<(String, String)>,
}

impl ExpectedOutcome {
    pub fn is_fault(&self) -> bool {
        self.state.eq_ignore_ascii_case("FAULT")
    }
}

/// Loads test vectors from a single file or a directory of `*.json` files.
pub struct VectorLoader;

impl VectorLoader {
    /// Loads a single vector from a JSON file.
    pub fn load_file(path: &Path) -> Result<TestVector> {
        let data = std::fs::read_to_string(path)?;
        let vector: TestVector = serde_json::from_str(&data)?;
        Ok(vector)
    }

    /// Loads every `*.json` file directly under `dir` as a vector, sorted by
    /// file name for a deterministic run order.
    pub fn load_dir(dir: &Path) -> Result<Vec<TestVector>> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        entries.sort();

        let mut vectors = Vec::with_capacity(entries.len());
        for path in entries {
            vectors.push(Self::load_file(&path).map_err(|e| {
                DiffError::InvalidVector(format!("{}: {}", path.display(), e))
            })?);
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_vector() {
        let json = r#"{
            "name": "push_one",
            "category": "arithmetic",
            "script": "11",
            "expected": { "state": "HALT", "stack": ["01"] }
        }"#;
        let vector: TestVector = serde_json::from_str(json).unwrap();
        assert_eq!(vector.name, "push_one");
        assert_eq!(vector.expected.stack, vec!["01".to_string()]);
        assert!(!vector.expected.is_fault());
    }

    #[test]
    fn fault_vector_ignores_stack() {
        let json = r#"{
            "name": "div_by_zero",
            "category": "arithmetic",
            "script": "00",
            "expected": { "state": "FAULT", "exception": "division by zero" }
        }"#;
        let vector: TestVector = serde_json::from_str(json).unwrap();
        assert!(vector.expected.is_fault());
    }
}
