//! Error types for the form widgets.

use thiserror::Error;

/// Errors produced while loading widget options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options text is not valid JSON for the expected shape.
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
