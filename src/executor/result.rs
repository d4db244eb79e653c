//! Execution result types
//!
//! - ExecutionResult: result of one operation
//! - ResultData: the data an operation returns
//! - ExecutionStats: statistics about the execution

use mongodb::bson::Document;

use super::query::PlanSummary;

/// Result of one operation
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Result data (documents, counts, plan)
    pub data: ResultData,

    /// Execution statistics
    pub stats: ExecutionStats,
}

/// Data returned from an operation
#[derive(Debug, Clone)]
pub enum ResultData {
    /// List of documents (find, aggregate)
    Documents(Vec<Document>),

    /// Update result
    Update { matched: u64, modified: u64 },

    /// Delete result
    Delete { deleted: u64 },

    /// Name of the created (or already existing) index
    IndexCreated { name: String },

    /// Summary of an explain plan
    Plan(PlanSummary),
}

/// Execution statistics
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Number of documents returned
    pub documents_returned: usize,

    /// Number of documents affected
    pub documents_affected: Option<u64>,
}

impl ExecutionResult {
    /// Create a result with the given stats
    pub fn new(data: ResultData, stats: ExecutionStats) -> Self {
        Self { data, stats }
    }

    /// Documents returned, if this result carries any
    pub fn documents(&self) -> Option<&[Document]> {
        match &self.data {
            ResultData::Documents(docs) => Some(docs),
            _ => None,
        }
    }
}
