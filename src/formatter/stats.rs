//! Statistics line printed under each table

use crate::executor::ExecutionResult;

/// Statistics formatter for operation results
pub struct StatsFormatter {
    /// Show execution time
    show_time: bool,

    /// Show affected count
    show_count: bool,
}

impl StatsFormatter {
    /// Create a new statistics formatter
    pub fn new(show_time: bool, show_count: bool) -> Self {
        Self {
            show_time,
            show_count,
        }
    }

    /// Format execution statistics; empty when there is nothing to show
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut parts = Vec::new();

        if self.show_time {
            parts.push(format!(
                "Execution time: {}ms",
                result.stats.execution_time_ms
            ));
        }

        if self.show_count {
            if let Some(count) = result.stats.documents_affected {
                parts.push(format!("Documents affected: {}", count));
            } else if result.documents().is_some() {
                parts.push(format!(
                    "Documents returned: {}",
                    result.stats.documents_returned
                ));
            }
        }

        parts.join(", ")
    }
}
