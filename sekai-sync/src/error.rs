//! Error types for sekai-sync
//!
//! Only collaborator boundaries (listing API, metadata file, store, config)
//! produce errors. Title parsing and matching never fail; they degrade to
//! documented defaults instead.

use thiserror::Error;

/// Sync error type
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP transport failure talking to the listing API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Listing API answered with a non-zero status code
    #[error("Listing API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Catalog source produced unusable data
    #[error("Catalog source error: {0}")]
    Source(String),

    /// Metadata table missing or unreadable
    #[error("Metadata source error: {0}")]
    Metadata(String),

    /// Catalog could not be persisted
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// sekai-common error
    #[error("Common error: {0}")]
    Common(#[from] sekai_common::Error),
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
