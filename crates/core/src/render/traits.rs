use crate::errors::CoreError;
use crate::models::table::Table;

/// Turns a plain `Table` into report text.
///
/// Each output format implements this trait; NAV computation never
/// depends on a concrete renderer.
pub trait TableRenderer: Send + Sync {
    /// Selector name of this format (e.g. "markdown").
    fn name(&self) -> &str;

    /// Render the full table. An empty table renders as an empty string.
    fn render(&self, table: &Table) -> Result<String, CoreError>;
}
