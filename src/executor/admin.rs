//! Admin executor for index management

use mongodb::IndexModel;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::mongo::extract_error_info;
use crate::error::{OperationError, Result};

use super::context::ExecutionContext;
use super::result::{ExecutionResult, ExecutionStats, ResultData};

/// Executor for administrative commands
pub struct AdminExecutor {
    /// Execution context
    context: ExecutionContext,
}

impl AdminExecutor {
    /// Create a new admin executor
    pub fn new(context: ExecutionContext) -> Self {
        Self { context }
    }

    /// Create an index on the collection
    ///
    /// Creating an index identical to an existing one succeeds. A definition
    /// that conflicts with an existing index fails with
    /// [`OperationError::IndexFailed`].
    ///
    /// # Arguments
    /// * `label` - Operation label, used in errors
    /// * `keys` - Index keys document
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Name of the index
    pub async fn create_index(&self, label: &str, keys: Document) -> Result<ExecutionResult> {
        debug!(
            "Creating index on collection '{}' with keys: {:?}",
            self.context.collection_name(),
            keys
        );

        let index_model = IndexModel::builder().keys(keys).build();

        let result = self
            .context
            .collection()
            .create_index(index_model)
            .await
            .map_err(|e| {
                let info = extract_error_info(&e);
                if info.is_index_conflict() {
                    debug!("Index definition conflicts with an existing index");
                }
                OperationError::IndexFailed {
                    label: label.to_string(),
                    reason: info.summary(),
                }
            })?;

        info!("Created index with name: {}", result.index_name);

        Ok(ExecutionResult::new(
            ResultData::IndexCreated {
                name: result.index_name,
            },
            ExecutionStats::default(),
        ))
    }
}
