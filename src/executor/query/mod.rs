//! Query executor for the bookstore operations
//!
//! Organized into sub-modules by operation type:
//! - `read`: find with projection, sort and limit
//! - `write`: updateOne, deleteOne
//! - `aggregate`: aggregation pipelines
//! - `explain`: explain plans and their summary

use futures::stream::TryStreamExt;
use mongodb::Cursor;
use mongodb::bson::Document;

use crate::error::kinds::describe;
use crate::error::{OperationError, Result};
use super::context::ExecutionContext;

// Sub-modules
mod aggregate;
mod explain;
mod read;
mod write;

pub use explain::PlanSummary;

/// Query executor for reads, writes, aggregations and explain
pub struct QueryExecutor {
    /// Execution context
    context: ExecutionContext,
}

impl QueryExecutor {
    /// Create a new query executor
    pub fn new(context: ExecutionContext) -> Self {
        Self { context }
    }
}

/// Drain a cursor, attributing failures to `label`
async fn collect_documents(cursor: Cursor<Document>, label: &str) -> Result<Vec<Document>> {
    cursor.try_collect::<Vec<Document>>().await.map_err(|e| {
        OperationError::CursorFailed {
            label: label.to_string(),
            reason: describe(&e),
        }
        .into()
    })
}
