use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Plain row/column payload handed to table renderers.
///
/// Cells are already stringified so renderers stay format-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// True when there are no data rows (a header alone counts as empty).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render a float the way report consumers expect: shortest form that
/// round-trips, always with a decimal point (`100.0`, `1.1`, `-0.25`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
