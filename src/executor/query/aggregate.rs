//! Aggregate operations

use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::kinds::describe;
use crate::error::{OperationError, Result};
use super::super::result::{ExecutionResult, ExecutionStats, ResultData};
use super::collect_documents;

/// Aggregate operations implementation
impl super::QueryExecutor {
    /// Execute an aggregation pipeline and collect its output
    pub async fn execute_aggregate(
        &self,
        label: &str,
        pipeline: Vec<Document>,
    ) -> Result<ExecutionResult> {
        info!(
            "Executing aggregate on collection '{}' with {} pipeline stages",
            self.context.collection_name(),
            pipeline.len()
        );
        debug!("Pipeline: {:?}", pipeline);

        let cursor = self
            .context
            .collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| OperationError::AggregateFailed {
                label: label.to_string(),
                reason: describe(&e),
            })?;

        let documents = collect_documents(cursor, label).await?;
        let count = documents.len();
        debug!("Aggregation returned {} documents", count);

        Ok(ExecutionResult::new(
            ResultData::Documents(documents),
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: count,
                documents_affected: None,
            },
        ))
    }
}
