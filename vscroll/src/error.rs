//! Error types for the scrollbar core.

use thiserror::Error;

/// Errors raised while mounting or driving the scrollbar.
///
/// These indicate a misconfigured host page; runtime conditions such as a
/// missing store or an odd layout are absorbed instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollError {
    /// A page element the widget needs to attach to does not exist.
    #[error("required page anchor missing: {0}")]
    MissingAnchor(&'static str),
}

/// Errors reported by a session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage is disabled or not provided by the environment.
    #[error("session storage unavailable")]
    Unavailable,

    /// The store refused a write because it is full.
    #[error("session storage quota exceeded ({limit} entries)")]
    QuotaExceeded {
        /// Maximum number of entries the store accepts.
        limit: usize,
    },
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the expected shape.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The breakpoint must be a positive width.
    #[error("destroyOn breakpoint must be greater than zero")]
    ZeroBreakpoint,
}
