//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors the analyzer can surface to a caller.
///
/// `InputShape` and `InputValue` map to a 4xx-class signal at the HTTP
/// adapter; `Internal` maps to 5xx. `BudgetExceeded` is never returned as an
/// `Err` — it is recorded as a warning on the finished report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("not a valid record stream: {0}")]
    InputShape(String),

    #[error("row {row}: {message}")]
    InputValue { row: usize, message: String },

    #[error("internal error in {component}: {message}")]
    Internal { component: String, message: String },
}
