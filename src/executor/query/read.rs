//! Read operations: find with optional projection, sort and limit

use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::kinds::describe;
use crate::error::{OperationError, Result};
use super::super::result::{ExecutionResult, ExecutionStats, ResultData};
use super::collect_documents;

/// Read operations implementation
impl super::QueryExecutor {
    /// Execute a find and collect every matching document
    ///
    /// # Arguments
    /// * `label` - Operation label, used in errors
    /// * `filter` - Query filter
    /// * `projection` - Optional field allow-list
    /// * `sort` - Optional sort specification
    /// * `limit` - Optional maximum number of documents
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Matching documents
    pub async fn execute_find(
        &self,
        label: &str,
        filter: Document,
        projection: Option<Document>,
        sort: Option<Document>,
        limit: Option<i64>,
    ) -> Result<ExecutionResult> {
        info!(
            "Executing find on collection '{}' with filter: {:?}",
            self.context.collection_name(),
            filter
        );

        let mut find_opts = mongodb::options::FindOptions::default();

        if let Some(projection) = projection {
            debug!("Applied projection: {:?}", projection);
            find_opts.projection = Some(projection);
        }

        if let Some(sort) = sort {
            debug!("Applied sort: {:?}", sort);
            find_opts.sort = Some(sort);
        }

        if let Some(limit) = limit {
            debug!("Applied limit: {}", limit);
            find_opts.limit = Some(limit);
        }

        let cursor = self
            .context
            .collection()
            .find(filter)
            .with_options(find_opts)
            .await
            .map_err(|e| OperationError::QueryFailed {
                label: label.to_string(),
                reason: describe(&e),
            })?;

        let documents = collect_documents(cursor, label).await?;
        let count = documents.len();
        debug!("Retrieved {} documents", count);

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
