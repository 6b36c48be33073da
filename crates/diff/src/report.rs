//! Accumulates per-vector results into a run summary.

use crate::compare::Difference;
use serde::Serialize;

/// Outcome of running and comparing a single vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorResult {
    pub name: String,
    pub category: String,
    pub differences: Vec<Difference>,
    pub error: Option<String>,
}

impl VectorResult {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.differences.is_empty()
    }
}

/// Accumulates `(total, passed, failed, errors)` across a run and holds the
/// per-vector detail needed to explain a failure.
#[derive(Debug, Default, Serialize)]
pub struct DiffReporter {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub results: Vec<VectorResult>,
}

impl DiffReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a vector that ran and was compared (possibly with differences).
    pub fn record_comparison(&mut self, name: &str, category: &str, differences: Vec<Difference>) {
        self.total += 1;
        if differences.is_empty() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(VectorResult {
            name: name.to_string(),
            category: category.to_string(),
            differences,
            error: None,
        });
    }

    /// Records a vector that could not be run at all (load failure, executor panic).
    pub fn record_error(&mut self, name: &str, category: &str, error: String) {
        self.total += 1;
        self.errors += 1;
        self.results.push(VectorResult {
            name: name.to_string(),
            category: category.to_string(),
            differences: Vec::new(),
            error: Some(error),
        });
    }

    /// A run is clean iff every vector ran and matched its expectation.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "total={} passed={} failed={} errors={}\n",
            self.total, self.passed, self.failed, self.errors
        );
        for result in &self.results {
            if result.passed() {
                continue;
            }
            if let Some(error) = &result.error {
                out.push_str(&format!("ERROR {} [{}]: {}\n", result.name, result.category, error));
            } else {
                out.push_str(&format!(
                    "FAIL  {} [{}]: {} difference(s)\n",
                    result.name,
                    result.category,
                    result.differences.len()
                ));
                for diff in &result.differences {
                    out.push_str(&format!("      {:?}\n", diff));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_with_no_vectors() {
        let reporter = DiffReporter::new();
        assert!(reporter.is_clean());
    }

    #[test]
    fn failure_marks_run_unclean() {
        let mut reporter = DiffReporter::new();
        reporter.record_comparison(
            "v1",
            "arithmetic",
            vec![Difference::StateMismatch {
                expected: "HALT".to_string(),
                actual: "FAULT".to_string(),
            }],
        );
        assert!(!reporter.is_clean());
        assert_eq!(reporter.failed, 1);
    }
}
