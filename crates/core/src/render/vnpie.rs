use crate::errors::CoreError;
use crate::models::table::Table;

use super::traits::TableRenderer;

/// Fixed column labels: NAV date, equity, NAV, change.
pub const VNPIE_COLUMNS: [&str; 4] = ["净值日", "权益", "净值", "涨幅"];

/// Forum-style bracketed table with a fixed four-column header.
///
/// ```text
/// [table]
/// 净值日|权益|净值|涨幅
/// 2024-01-02|100.0|1.0|0.0
/// [/table]
/// ```
pub struct VnpieRenderer;

impl VnpieRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VnpieRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for VnpieRenderer {
    fn name(&self) -> &str {
        "vnpie"
    }

    fn render(&self, table: &Table) -> Result<String, CoreError> {
        if table.is_empty() {
            return Ok(String::new());
        }
        if table.columns.len() != VNPIE_COLUMNS.len() {
            return Err(CoreError::InvalidArgument(format!(
                "vnpie tables need {} columns, got {}",
                VNPIE_COLUMNS.len(),
                table.columns.len()
            )));
        }

        let mut lines = Vec::with_capacity(table.rows.len() + 1);
        lines.push(VNPIE_COLUMNS.join("|"));
        for row in &table.rows {
            lines.push(row.join("|"));
        }

        Ok(format!("[table]\n{}\n[/table]", lines.join("\n")))
    }
}
