//! Operation runner
//!
//! Dispatches each [`Operation`] to the executor for its kind and hands the
//! result to the [`Reporter`] before starting the next one:
//! - find, update, delete, aggregate, explain → QueryExecutor
//! - createIndex → AdminExecutor
//!
//! The first failing operation stops the run.

use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::Result;
use crate::formatter::Reporter;

use super::admin::AdminExecutor;
use super::context::ExecutionContext;
use super::operations::{Operation, OperationKind};
use super::query::QueryExecutor;
use super::result::{ExecutionResult, ResultData};

/// Printed when an explain's winning plan is itself an index scan
pub const INDEX_SCAN_CONFIRMED: &str =
    "Performance improvement confirmed: the query used an index scan (IXSCAN).";

/// Runs operations in order against one collection
pub struct OperationRunner {
    /// Reads, writes, aggregations, explain
    query: QueryExecutor,

    /// Index management
    admin: AdminExecutor,
}

impl OperationRunner {
    /// Create a runner bound to a context
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            query: QueryExecutor::new(context.clone()),
            admin: AdminExecutor::new(context),
        }
    }

    /// Execute one operation and record its elapsed time
    ///
    /// # Arguments
    /// * `operation` - Operation to execute
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Execution result or error
    pub async fn execute(&self, operation: &Operation) -> Result<ExecutionResult> {
        debug!("Routing operation: {:?}", operation.kind);

        let start = Instant::now();
        let label = operation.label.as_str();

        let mut result = match &operation.kind {
            OperationKind::Find {
                filter,
                projection,
                sort,
                limit,
            } => {
                self.query
                    .execute_find(
                        label,
                        filter.clone(),
                        projection.clone(),
                        sort.clone(),
                        *limit,
                    )
                    .await?
            }
            OperationKind::UpdateOne { filter, update } => {
                self.query
                    .execute_update_one(label, filter.clone(), update.clone())
                    .await?
            }
            OperationKind::DeleteOne { filter } => {
                self.query.execute_delete_one(label, filter.clone()).await?
            }
            OperationKind::Aggregate { pipeline } => {
                self.query.execute_aggregate(label, pipeline.clone()).await?
            }
            OperationKind::CreateIndex { keys } => {
                self.admin.create_index(label, keys.clone()).await?
            }
            OperationKind::Explain { filter, .. } => {
                self.query.execute_explain(label, filter.clone()).await?
            }
        };

        result.stats.execution_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Operation '{}' executed in {}ms",
            label, result.stats.execution_time_ms
        );

        Ok(result)
    }

    /// Run every operation in order, rendering each result
    ///
    /// Stops at the first error and returns it; results already rendered
    /// stay printed.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of operations completed
    pub async fn run<W: Write>(
        &self,
        operations: &[Operation],
        reporter: &mut Reporter<W>,
    ) -> Result<usize> {
        let mut completed = 0;

        for operation in operations {
            let kind = if operation.is_write() { "write" } else { "read" };
            info!("Running {} '{}'", kind, operation.label);

            let result = self.execute(operation).await?;
            if let ResultData::Plan(summary) = &result.data {
                if summary.is_collection_scan() {
                    info!("'{}' scans the whole collection", operation.label);
                }
            }
            reporter.render(&operation.label, &result)?;

            if let Some(note) = &operation.note {
                reporter.note(note)?;
            }

            if confirms_index_scan(operation, &result) {
                reporter.note(INDEX_SCAN_CONFIRMED)?;
            }

            completed += 1;
        }

        reporter.flush()?;
        info!("Completed {} operations", completed);
        Ok(completed)
    }
}

/// Whether the IXSCAN confirmation should follow this result
fn confirms_index_scan(operation: &Operation, result: &ExecutionResult) -> bool {
    match (&operation.kind, &result.data) {
        (
            OperationKind::Explain {
                confirm_index_scan: true,
                ..
            },
            ResultData::Plan(summary),
        ) => summary.is_index_scan(),
        _ => false,
    }
}
