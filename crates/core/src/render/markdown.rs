use crate::errors::CoreError;
use crate::models::table::Table;

use super::traits::TableRenderer;

/// Pipe-delimited table with a right-aligned separator row.
///
/// ```text
/// |tradeDay|balance|nav|change|
/// | --: | --: | --: | --: |
/// |2024-01-02|100.0|1.0|0.0|
/// ```
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for MarkdownRenderer {
    fn name(&self) -> &str {
        "markdown"
    }

    fn render(&self, table: &Table) -> Result<String, CoreError> {
        if table.is_empty() {
            return Ok(String::new());
        }

        let mut lines = Vec::with_capacity(table.rows.len() + 2);
        lines.push(format!("|{}|", table.columns.join("|")));
        lines.push(format!("|{}", " --: |".repeat(table.columns.len())));
        for row in &table.rows {
            lines.push(format!("|{}|", row.join("|")));
        }

        Ok(lines.join("\n"))
    }
}
