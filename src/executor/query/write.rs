//! Write operations: updateOne, deleteOne
//!
//! A filter that matches nothing is reported as a zero count, never as an
//! error.

use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::kinds::describe;
use crate::error::{OperationError, Result};
use super::super::result::{ExecutionResult, ExecutionStats, ResultData};

/// Write operations implementation
impl super::QueryExecutor {
    /// Execute updateOne command
    ///
    /// # Arguments
    /// * `label` - Operation label, used in errors
    /// * `filter` - Query filter
    /// * `update` - Update document
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Matched and modified counts
    pub async fn execute_update_one(
        &self,
        label: &str,
        filter: Document,
        update: Document,
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing updateOne on collection '{}' with filter: {:?}",
            self.context.collection_name(),
            filter
        );

        let result = self
            .context
            .collection()
            .update_one(filter, update)
            .await
            .map_err(|e| OperationError::UpdateFailed {
                label: label.to_string(),
                reason: describe(&e),
            })?;

        if result.matched_count == 0 {
            info!("updateOne matched no documents");
        }

        Ok(ExecutionResult::new(
            ResultData::Update {
                matched: result.matched_count,
                modified: result.modified_count,
            },
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 0,
                documents_affected: Some(result.modified_count),
            },
        ))
    }

    /// Execute deleteOne command
    ///
    /// # Arguments
    /// * `label` - Operation label, used in errors
    /// * `filter` - Query filter
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Deleted count (0 or 1)
    pub async fn execute_delete_one(
        &self,
        label: &str,
        filter: Document,
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing deleteOne on collection '{}' with filter: {:?}",
            self.context.collection_name(),
            filter
        );

        let result = self
            .context
            .collection()
            .delete_one(filter)
            .await
            .map_err(|e| OperationError::DeleteFailed {
                label: label.to_string(),
                reason: describe(&e),
            })?;

        if result.deleted_count == 0 {
            info!("deleteOne matched no documents");
        }

        Ok(ExecutionResult::new(
            ResultData::Delete {
                deleted: result.deleted_count,
            },
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 0,
                documents_affected: Some(result.deleted_count),
            },
        ))
    }
}
