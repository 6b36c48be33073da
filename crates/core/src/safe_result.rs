//! Safe Result handling utilities for Neo-RS
//!
//! This module provides safe alternatives to unwrap() and expect() calls,
//! ensuring proper error propagation and preventing runtime panics.

use crate::error::CoreError;
use std::fmt::Display;

/// Extension trait for Result types providing safe handling methods
pub trait SafeResult<T> {
    /// Safely unwrap with context-aware error message
    fn safe_unwrap_or(self, default: T, context: &str) -> T;

    /// Safely unwrap with error logging
    fn safe_unwrap_or_log(self, default: T, context: &str) -> T;

    /// Convert to CoreError with context
    fn with_context(self, context: &str) -> Result<T, CoreError>;

    /// Safe expect alternative that returns Result
    fn safe_expect(self, msg: &str) -> Result<T, CoreError>;
}

impl<T, E: Display> SafeResult<T> for Result<T, E> {
    fn safe_unwrap_or(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Error in {}: {}", context, e);
                default
            }
        }
    }

    fn safe_unwrap_or_log(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::error!("Critical error in {}: {}", context, e);
                // In production, we might want to increment error metrics here
                default
            }
        }
    }

    fn with_context(self, context: &str) -> Result<T, CoreError> {
        self.map_err(|e| CoreError::InvalidOperation {
            message: format!("{}: {}", context, e),
        })
    }

    fn safe_expect(self, msg: &str) -> Result<T, CoreError> {
        self.map_err(|e| CoreError::InvalidOperation {
            message: format!("{}: {}", msg, e),
        })
    }
}

/// Extension trait for Option types providing safe handling methods
pub trait SafeOption<T> {
    /// Safely unwrap Option with default value
    fn safe_unwrap_or(self, default: T, context: &str) -> T;

    /// Convert Option to Result with context
    fn ok_or_context(self, context: &str) -> Result<T, CoreError>;

    /// Safe expect alternative for Options
    fn safe_expect(self, msg: &str) -> Result<T, CoreError>;
}

impl<T> SafeOption<T> for Option<T> {
    fn safe_unwrap_or(self, default: T, context: &str) -> T {
        match self {
            Some(value) => value,
            None => {
                log::warn!("None value encountered in {}", context);
                default
            }
        }
    }

    fn ok_or_context(self, context: &str) -> Result<T, CoreError> {
        self.ok_or_else(|| CoreError::InvalidData {
            message: format!("Missing value in {}", context),
        })
    }

    fn safe_expect(self, msg: &str) -> Result<T, CoreError> {
        self.ok_or_else(|| CoreError::InvalidData {
            message: msg.to_string(),
        })
    }
}

/// Macro for safe try operations with automatic context
#[macro_export]
macro_rules! safe_try {
    ($expr:expr, $context:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("Error in {}: {:?}", $context, e);
                return Err($crate::error::CoreError::InvalidOperation {
                    message: format!("{}: {}", $context, e),
                });
            }
        }
    };
}

/// Macro for safe option handling with automatic context
#[macro_export]
macro_rules! safe_some {
    ($expr:expr, $context:expr) => {
        match $expr {
            Some(val) => val,
            None => {
                log::error!("None value in {}", $context);
                return Err($crate::error::CoreError::InvalidData {
                    message: format!("Missing value in {}", $context),
                });
            }
        }
    };
}

/// Safe wrapper for potentially panicking operations
pub fn safe_operation<T, F>(operation: F, context: &str) -> Result<T, CoreError>
where
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    operation().map_err(|e| CoreError::InvalidOperation {
        message: format!("{}: {}", context, e),
    })
}

/// Safe wrapper for async operations
pub async fn safe_async_operation<T, F, Fut>(operation: F, context: &str) -> Result<T, CoreError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, Box<dyn std::error::Error>>>,
{
    operation().await.map_err(|e| CoreError::InvalidOperation {
        message: format!("{}: {}", context, e),
    })
}
