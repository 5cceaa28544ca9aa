use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::render::TableFormat;

use super::nav::Session;

/// Minutes in one calendar day; intraday bucket widths must tile it exactly.
pub const MINUTES_PER_DAY: u32 = 60 * 24;

fn default_field() -> String {
    "balance".to_string()
}

fn default_bucket_minutes() -> u32 {
    1
}

fn default_table_format() -> String {
    TableFormat::Markdown.to_string()
}

/// Report settings: which field to track, the invested capital,
/// and how intraday curves and tables are produced.
///
/// Loadable from JSON; only `origin` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSettings {
    /// Ledger field to track ("balance", "margin", ...)
    #[serde(default = "default_field")]
    pub field: String,

    /// Capital actually invested. With 1,000,000 allocated but only
    /// 100,000 at work, set this to 100,000.
    pub origin: f64,

    /// Intraday bucket width in minutes, must divide 1440
    #[serde(default = "default_bucket_minutes")]
    pub bucket_minutes: u32,

    /// Intraday session selector
    #[serde(default)]
    pub session: Session,

    /// Table format selector ("markdown" or "vnpie")
    #[serde(default = "default_table_format")]
    pub table_format: String,
}

impl NavSettings {
    pub fn new(origin: f64) -> Self {
        Self {
            field: default_field(),
            origin,
            bucket_minutes: default_bucket_minutes(),
            session: Session::default(),
            table_format: default_table_format(),
        }
    }

    /// Parse settings from JSON. A zero `origin` is accepted here and only
    /// rejected by [`validate`](Self::validate) on the daily path.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: NavSettings = serde_json::from_str(json)?;
        settings.validate_for_intraday()?;
        Ok(settings)
    }

    /// Check every setting the daily report depends on, before touching data.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validate_for_intraday()?;
        if self.origin == 0.0 {
            return Err(CoreError::DivisionByZero("origin must not be 0".into()));
        }
        Ok(())
    }

    /// Same checks as [`validate`](Self::validate) minus the zero-origin one:
    /// intraday curves are normalized by their first bucket, not by `origin`.
    pub fn validate_for_intraday(&self) -> Result<(), CoreError> {
        if self.field.trim().is_empty() {
            return Err(CoreError::InvalidArgument("field must not be empty".into()));
        }
        if !self.origin.is_finite() {
            return Err(CoreError::InvalidArgument(format!(
                "origin must be finite, got {}",
                self.origin
            )));
        }
        validate_bucket_minutes(self.bucket_minutes)?;
        self.table_format.parse::<TableFormat>()?;
        Ok(())
    }
}

/// Bucket width must be positive and tile a day with no partial bucket.
pub fn validate_bucket_minutes(bucket_minutes: u32) -> Result<(), CoreError> {
    if bucket_minutes == 0 || MINUTES_PER_DAY % bucket_minutes != 0 {
        return Err(CoreError::InvalidArgument(format!(
            "bucket width of {bucket_minutes} minutes does not divide {MINUTES_PER_DAY}"
        )));
    }
    Ok(())
}
