//! Operation execution for the bookstore run
//!
//! - `operations`: the fixed, ordered list of named operations
//! - `runner`: dispatches operations and reports each result
//! - `query`: find, update, delete, aggregate and explain
//! - `admin`: index creation
//! - `context`: database and collection handles passed to every executor
//! - `result`: result and statistics types

pub mod admin;
pub mod context;
pub mod operations;
pub mod query;
pub mod result;
pub mod runner;

pub use admin::AdminExecutor;
pub use context::ExecutionContext;
pub use operations::{Operation, OperationKind, bookstore_operations};
pub use query::{PlanSummary, QueryExecutor};
pub use result::{ExecutionResult, ExecutionStats, ResultData};
pub use runner::{INDEX_SCAN_CONFIRMED, OperationRunner};
