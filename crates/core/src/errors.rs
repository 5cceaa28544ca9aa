use thiserror::Error;

/// Unified error type for the entire futures-nav-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Arguments ───────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    // ── Computation ─────────────────────────────────────────────────
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Field '{field}' missing on tick at {timestamp}")]
    MissingField {
        field: String,
        timestamp: String,
    },

    // ── Calendar ────────────────────────────────────────────────────
    #[error("Trading calendar error: {0}")]
    Calendar(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
