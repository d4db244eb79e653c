//! Explain operations
//!
//! Runs `explain` for a find at `queryPlanner` verbosity and condenses the
//! winning plan into a [`PlanSummary`].

use bson::{Bson, Document};
use tracing::debug;

use crate::error::kinds::describe;
use crate::error::{OperationError, Result};
use super::super::result::{ExecutionResult, ExecutionStats, ResultData};

/// Explain verbosity sent with every explain command
const VERBOSITY: &str = "queryPlanner";

/// The parts of a winning plan worth printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    /// Top-level stage of the winning plan, e.g. `FETCH` or `COLLSCAN`
    pub stage: String,

    /// Stage directly below the top-level stage
    pub input_stage: Option<String>,

    /// First index name found walking down the plan
    pub index_name: Option<String>,

    /// Every stage from the top of the plan to its leaf
    pub stages: Vec<String>,
}

impl PlanSummary {
    /// Build a summary from raw explain output
    ///
    /// Handles the classic layout (`winningPlan.stage`), the slot-based
    /// engine layout (`winningPlan.queryPlan.stage`) and mongos output
    /// (`winningPlan.shards[0].winningPlan`). Returns `None` when no stage
    /// can be found.
    pub fn from_explain(explain: &Document) -> Option<Self> {
        let plan = winning_plan(explain)?;

        let mut stages = Vec::new();
        let mut index_name = None;
        let mut node = Some(plan);

        while let Some(current) = node {
            if let Ok(stage) = current.get_str("stage") {
                stages.push(stage.to_string());
            }
            if index_name.is_none() {
                if let Ok(name) = current.get_str("indexName") {
                    index_name = Some(name.to_string());
                }
            }
            node = next_stage(current);
        }

        let mut iter = stages.iter();
        let stage = iter.next()?.clone();
        let input_stage = iter.next().cloned();

        Some(Self {
            stage,
            input_stage,
            index_name,
            stages,
        })
    }

    /// Whether the top-level stage itself is an index scan
    pub fn is_index_scan(&self) -> bool {
        is_index_scan_stage(&self.stage)
    }

    /// Whether any stage of the plan reads through an index
    pub fn uses_index(&self) -> bool {
        self.stages.iter().any(|s| is_index_scan_stage(s))
    }

    /// Whether the plan scans the whole collection
    pub fn is_collection_scan(&self) -> bool {
        self.stages.iter().any(|s| s == "COLLSCAN")
    }
}

fn is_index_scan_stage(stage: &str) -> bool {
    stage == "IXSCAN" || stage.ends_with("_IXSCAN")
}

fn winning_plan(explain: &Document) -> Option<&Document> {
    let mut plan = explain
        .get_document("queryPlanner")
        .ok()?
        .get_document("winningPlan")
        .ok()?;

    if let Ok(shards) = plan.get_array("shards") {
        plan = match shards.first() {
            Some(Bson::Document(shard)) => shard.get_document("winningPlan").ok()?,
            _ => return None,
        };
    }

    if let Ok(query_plan) = plan.get_document("queryPlan") {
        plan = query_plan;
    }

    Some(plan)
}

fn next_stage(node: &Document) -> Option<&Document> {
    if let Ok(input) = node.get_document("inputStage") {
        return Some(input);
    }
    match node.get_array("inputStages").ok()?.first() {
        Some(Bson::Document(input)) => Some(input),
        _ => None,
    }
}

/// Explain operations implementation
impl super::QueryExecutor {
    /// Explain a find with the given filter
    ///
    /// # Arguments
    /// * `label` - Operation label, used in errors
    /// * `filter` - Query filter to explain
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Plan summary
    pub async fn execute_explain(&self, label: &str, filter: Document) -> Result<ExecutionResult> {
        debug!(
            "Executing explain on collection '{}' with filter: {:?}",
            self.context.collection_name(),
            filter
        );

        let mut find_cmd = Document::new();
        find_cmd.insert("find", self.context.collection_name());
        find_cmd.insert("filter", filter);

        let mut explain_cmd = Document::new();
        explain_cmd.insert("explain", find_cmd);
        explain_cmd.insert("verbosity", VERBOSITY);

        let explain = self
            .context
            .database()
            .run_command(explain_cmd)
            .await
            .map_err(|e| OperationError::ExplainFailed {
                label: label.to_string(),
                reason: describe(&e),
            })?;

        let summary =
            PlanSummary::from_explain(&explain).ok_or_else(|| OperationError::ExplainFailed {
                label: label.to_string(),
                reason: "explain output has no winning plan stage".to_string(),
            })?;

        debug!("Winning plan stages: {:?}", summary.stages);

        Ok(ExecutionResult::new(
            ResultData::Plan(summary),
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 1,
                documents_affected: None,
            },
        ))
    }
}
