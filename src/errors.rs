//! Error types for Mod Fetcher
//!
//! This module defines the error types for all components of the application.
//! Failures are converted to status or outcome values at the operation
//! boundaries; none of these errors is allowed to abort a batch or stop the
//! process.

use std::path::PathBuf;
use thiserror::Error;

/// Reference-data (version/category directory) errors
///
/// Directory failures are always non-fatal: the session degrades to a
/// hardcoded default vocabulary and surfaces a status message.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// HTTP request for a tag endpoint failed
    #[error("HTTP request for reference data failed")]
    Http(#[from] reqwest::Error),

    /// Tag endpoint returned an error status
    #[error("Reference data endpoint returned HTTP {status}")]
    ServerError { status: u16 },

    /// Tag endpoint payload could not be decoded
    #[error("Reference data payload could not be decoded")]
    Decode(#[source] serde_json::Error),

    /// Any other failed reference-data request
    #[error("Reference data request failed: {detail}")]
    Request { detail: String },
}

/// Catalog search and pagination errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned error status
    #[error("Search endpoint returned HTTP {status}")]
    ServerError { status: u16 },

    /// Rate limit exceeded after retries
    #[error("Rate limit exceeded. Server responded with HTTP 429")]
    RateLimitExceeded,

    /// Search response payload could not be decoded
    #[error("Search response could not be decoded")]
    Decode(#[source] serde_json::Error),

    /// Invalid URL constructed for a search request
    #[error("Invalid search URL: {url}")]
    InvalidUrl { url: String },

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded for search request")]
    MaxRetriesExceeded { max_retries: u32 },

    /// The fetch sequence was superseded by a newer one
    ///
    /// Never shown to the user as an error; the superseded sequence's
    /// partial results are silently discarded.
    #[error("Fetch sequence cancelled by a newer request")]
    Cancelled,
}

/// Per-item artifact transfer errors
///
/// These are accumulated into the batch report; a single item's failure
/// never aborts the batch.
#[derive(Error, Debug)]
pub enum TransferError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// I/O error during file operations
    #[error("File I/O error")]
    Io(#[from] std::io::Error),

    /// Server returned error status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// File already exists and force flag not set
    #[error("File already exists: {path}. Use --force to overwrite")]
    FileExists { path: String },

    /// Invalid artifact URL
    #[error("Invalid artifact URL: {url}")]
    InvalidUrl { url: String },

    /// Atomic file operation failed
    #[error("Atomic file operation failed: could not rename {temp_path} to {final_path}")]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

    /// Generic error for other issues
    #[error("{0}")]
    Other(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// I/O error reading configuration
    #[error("I/O error reading configuration")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Reference-data error
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Catalog fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Artifact transfer error
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Directory(_) => "directory",
            AppError::Fetch(_) => "fetch",
            AppError::Transfer(_) => "transfer",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Directory result type alias
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Transfer result type alias
pub type TransferResult<T> = std::result::Result<T, TransferError>;

// Artifact transfers share the rate-limited HTTP path with search, so
// fetch-level failures are narrowed into transfer outcomes here
impl From<FetchError> for TransferError {
    fn from(fetch_error: FetchError) -> Self {
        match fetch_error {
            FetchError::Http(e) => TransferError::Http(e),
            FetchError::ServerError { status } => TransferError::ServerError { status },
            FetchError::RateLimitExceeded => TransferError::ServerError { status: 429 },
            other => TransferError::Other(other.to_string()),
        }
    }
}

// The tag endpoints share the rate-limited HTTP path with search, so their
// failures arrive as FetchError and are narrowed here
impl From<FetchError> for DirectoryError {
    fn from(fetch_error: FetchError) -> Self {
        match fetch_error {
            FetchError::Http(e) => DirectoryError::Http(e),
            FetchError::ServerError { status } => DirectoryError::ServerError { status },
            FetchError::Decode(e) => DirectoryError::Decode(e),
            other => DirectoryError::Request {
                detail: other.to_string(),
            },
        }
    }
}
