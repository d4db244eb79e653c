//! Output formatting for operation results
//!
//! - [`Reporter`]: writes a heading, a table and an optional stats line per
//!   operation
//! - [`TableFormatter`]: renders result data as a table
//! - [`StatsFormatter`]: renders execution statistics

use nu_ansi_term::{Color, Style};
use std::io::Write;

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::executor::ExecutionResult;

pub mod stats;
pub mod table;

pub use stats::StatsFormatter;
pub use table::TableFormatter;

/// Writes labeled result tables to a sink
pub struct Reporter<W: Write> {
    /// Output sink
    out: W,

    /// Table renderer
    table: TableFormatter,

    /// Stats line renderer
    stats: StatsFormatter,

    /// Style for headings
    heading: Option<Style>,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W, config: &DisplayConfig) -> Self {
        let table = TableFormatter::new()
            .with_style(config.table_style)
            .with_max_column_width(config.max_column_width)
            .with_colors(config.color_output);

        let heading = config
            .color_output
            .then(|| Style::new().bold().fg(Color::Green));

        Self {
            out,
            table,
            stats: StatsFormatter::new(config.show_timing, config.show_timing),
            heading,
        }
    }

    /// Print a heading followed by the result table
    ///
    /// # Arguments
    /// * `label` - Heading text
    /// * `result` - Operation result
    pub fn render(&mut self, label: &str, result: &ExecutionResult) -> Result<()> {
        let heading = format!("{label}:");
        match self.heading {
            Some(style) => writeln!(self.out, "\n{}", style.paint(heading))?,
            None => writeln!(self.out, "\n{heading}")?,
        }

        writeln!(self.out, "{}", self.table.format(&result.data))?;

        let stats = self.stats.format(result);
        if !stats.is_empty() {
            writeln!(self.out, "{stats}")?;
        }

        Ok(())
    }

    /// Print a single line
    pub fn note(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    /// Flush the sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the reporter and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
