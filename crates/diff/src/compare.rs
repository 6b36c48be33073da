//! Compares an observed [`ExecutionOutcome`] against a vector's expectation.

use crate::executor::ExecutionOutcome;
use crate::vector::TestVector;
use serde::Serialize;

/// A single point of divergence between expected and observed outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Difference {
    StateMismatch { expected: String, actual: String },
    StackLength { expected: usize, actual: usize },
    StackValue { index: usize, expected: String, actual: String },
    GasMismatch { expected: i64, actual: i64, tolerance: i64 },
    NotificationMismatch { expected: Vec<String>, actual: Vec<String> },
    ExceptionMismatch { expected: String, actual: Option<String> },
}

/// Compares outcomes with a configurable gas tolerance.
///
/// For FAULT vectors only the VM state is compared; stack and gas variance
/// between implementations is expected and ignored.
pub struct ResultComparator {
    gas_tolerance: i64,
}

impl ResultComparator {
    pub fn new(gas_tolerance: i64) -> Self {
        Self { gas_tolerance }
    }

    pub fn compare(&self, vector: &TestVector, actual: &ExecutionOutcome) -> Vec<Difference> {
        let expected = &vector.expected;
        let mut diffs = Vec::new();

        if !expected.state.eq_ignore_ascii_case(&actual.state) {
            diffs.push(Difference::StateMismatch {
                expected: expected.state.clone(),
                actual: actual.state.clone(),
            });
        }

        if expected.is_fault() {
            if let Some(expected_exception) = &expected.exception {
                let matches = actual
                    .exception
                    .as_ref()
                    .map(|a| a.contains(expected_exception.as_str()))
                    .unwrap_or(false);
                if !matches {
                    diffs.push(Difference::ExceptionMismatch {
                        expected: expected_exception.clone(),
                        actual: actual.exception.clone(),
                    });
                }
            }
            return diffs;
        }

        if expected.stack.len() != actual.stack.len() {
            diffs.push(Difference::StackLength {
                expected: expected.stack.len(),
                actual: actual.stack.len(),
            });
        } else {
            for (index, (expected_item, actual_item)) in
                expected.stack.iter().zip(actual.stack.iter()).enumerate()
            {
                let actual_hex = hex::encode(actual_item);
                if !expected_item.eq_ignore_ascii_case(&actual_hex) {
                    diffs.push(Difference::StackValue {
                        index,
                        expected: expected_item.clone(),
                        actual: actual_hex,
                    });
                }
            }
        }

        if let Some(expected_gas) = expected.gas_consumed {
            if (expected_gas - actual.gas_consumed).abs() > self.gas_tolerance {
                diffs.push(Difference::GasMismatch {
                    expected: expected_gas,
                    actual: actual.gas_consumed,
                    tolerance: self.gas_tolerance,
                });
            }
        }

        if !expected.notifications.is_empty() {
            let actual_notifications: Vec<String> = actual
                .notifications
                .iter()
                .map(|(contract, name)| format!("{}:{}", contract, name))
                .collect();
            let expected_notifications: Vec<String> = expected
                .notifications
                .iter()
                .map(|(contract, name)| format!("{}:{}", contract, name))
                .collect();
            if actual_notifications != expected_notifications {
                diffs.push(Difference::NotificationMismatch {
                    expected: expected_notifications,
                    actual: actual_notifications,
                });
            }
        }

        diffs
    }
}

impl Default for ResultComparator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::ExpectedOutcome;

    fn vector_with(expected: ExpectedOutcome) -> TestVector {
        TestVector {
            name: "t".to_string(),
            category: "c".to_string(),
            script: "11".to_string(),
            gas_limit: 100,
            pre_state: Default::default(),
            expected,
        }
    }

    #[test]
    fn matching_outcome_has_no_differences() {
        let vector = vector_with(ExpectedOutcome {
            state: "HALT".to_string(),
            stack: vec!["01".to_string()],
            gas_consumed: Some(30),
            exception: None,
            notifications: vec![],
        });
        let actual = ExecutionOutcome {
            state: "HALT".to_string(),
            stack: vec![vec![0x01]],
            gas_consumed: 30,
            exception: None,
            notifications: vec![],
        };
        assert!(ResultComparator::new(0).compare(&vector, &actual).is_empty());
    }

    #[test]
    fn fault_vector_ignores_stack_and_gas() {
        let vector = vector_with(ExpectedOutcome {
            state: "FAULT".to_string(),
            stack: vec!["ff".to_string()],
            gas_consumed: Some(1),
            exception: Some("overflow".to_string()),
            notifications: vec![],
        });
        let actual = ExecutionOutcome {
            state: "FAULT".to_string(),
            stack: vec![],
            gas_consumed: 9999,
            exception: Some("integer overflow detected".to_string()),
            notifications: vec![],
        };
        assert!(ResultComparator::new(0).compare(&vector, &actual).is_empty());
    }

    #[test]
    fn gas_tolerance_absorbs_small_variance() {
        let vector = vector_with(ExpectedOutcome {
            state: "HALT".to_string(),
            stack: vec![],
            gas_consumed: Some(100),
            exception: None,
            notifications: vec![],
        });
        let actual = ExecutionOutcome {
            state: "HALT".to_string(),
            stack: vec![],
            gas_consumed: 105,
            exception: None,
            notifications: vec![],
        };
        assert!(ResultComparator::new(10).compare(&vector, &actual).is_empty());
        assert!(!ResultComparator::new(2).compare(&vector, &actual).is_empty());
    }
}
