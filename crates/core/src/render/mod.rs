pub mod markdown;
pub mod traits;
pub mod vnpie;

use std::str::FromStr;

use crate::errors::CoreError;
use crate::models::table::Table;

use markdown::MarkdownRenderer;
use traits::TableRenderer;
use vnpie::VnpieRenderer;

/// Supported report table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    Markdown,
    Vnpie,
}

impl FromStr for TableFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(TableFormat::Markdown),
            "vnpie" => Ok(TableFormat::Vnpie),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableFormat::Markdown => write!(f, "markdown"),
            TableFormat::Vnpie => write!(f, "vnpie"),
        }
    }
}

impl TableFormat {
    /// The renderer implementing this format.
    pub fn renderer(&self) -> Box<dyn TableRenderer> {
        match self {
            TableFormat::Markdown => Box::new(MarkdownRenderer::new()),
            TableFormat::Vnpie => Box::new(VnpieRenderer::new()),
        }
    }
}

/// Render `table` using the format named by `format` ("markdown" / "vnpie").
pub fn render_table(table: &Table, format: &str) -> Result<String, CoreError> {
    let format: TableFormat = format.parse()?;
    format.renderer().render(table)
}
