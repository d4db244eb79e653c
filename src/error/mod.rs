//! Error handling for the bookstore query run.
//!
//! This module provides:
//! - The crate-wide [`BookstoreError`] and [`Result`] alias
//! - Connection, operation and configuration error kinds
//! - Structured information extracted from MongoDB driver errors
//!
//! # Example
//!
//! ```rust,no_run
//! use bookstore_queries::error::mongo::extract_error_info;
//!
//! fn describe(err: &mongodb::error::Error) -> String {
//!     extract_error_info(err).summary()
//! }
//! ```

pub mod kinds;
pub mod mongo;

// Re-export commonly used types
pub use kinds::{BookstoreError, ConfigError, ConnectionError, OperationError, Result};
pub use mongo::ErrorInfo;
