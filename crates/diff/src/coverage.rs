//! Tracks which vector categories a run actually exercised against a
//! declared set of categories the suite is expected to cover.

use crate::vector::TestVector;
use serde::Serialize;
use std::collections::BTreeSet;

/// Compares the categories seen in a run against a required set.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageManifest {
    required: BTreeSet<String>,
    seen: BTreeSet<String>,
}

impl CoverageManifest {
    pub fn new(required: impl IntoIterator<Item = String>) -> Self {
        Self {
            required: required.into_iter().collect(),
            seen: BTreeSet::new(),
        }
    }

    pub fn observe(&mut self, vector: &TestVector) {
        self.seen.insert(vector.category.clone());
    }

    pub fn observe_all<'a>(&mut self, vectors: impl IntoIterator<Item = &'a TestVector>) {
        for vector in vectors {
            self.observe(vector);
        }
    }

    /// Categories required but never exercised by the run.
    pub fn missing(&self) -> Vec<String> {
        self.required.difference(&self.seen).cloned().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::ExpectedOutcome;

    fn vector(category: &str) -> TestVector {
        TestVector {
            name: "v".to_string(),
            category: category.to_string(),
            script: "11".to_string(),
            gas_limit: 100,
            pre_state: Default::default(),
            expected: ExpectedOutcome {
                state: "HALT".to_string(),
                stack: vec![],
                gas_consumed: None,
                exception: None,
                notifications: vec![],
            },
        }
    }

    #[test]
    fn reports_missing_categories() {
        let mut manifest = CoverageManifest::new(
            ["arithmetic", "storage", "oracle"].map(String::from),
        );
        manifest.observe(&vector("arithmetic"));
        assert_eq!(manifest.missing(), vec!["oracle".to_string(), "storage".to_string()]);
        assert!(!manifest.is_complete());
    }
}
