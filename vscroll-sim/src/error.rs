use thiserror::Error;
use vscroll::{ConfigError, ScrollError};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("usage: vscroll-sim <scenario.json>")]
    Usage,

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scroll(#[from] ScrollError),

    #[error("unknown log level: {0}")]
    LogLevel(String),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("page already carries a scrollbar")]
    AlreadyMounted,
}
