//! Error types and classification for the S3 package poller.
//!
//! This crate provides:
//! - [`PollerError`] - Top-level error enum for every poller operation
//! - [`StorageError`] - Failures reported by an object store adapter
//! - [`ErrorCategory`] for deciding how a failure is surfaced and logged
//!
//! None of these errors is meant to escape the poller's public operations:
//! the checker and resolver convert them into failure results or unresolved
//! revisions. They exist so that conversion happens in one place with the
//! underlying cause still attached.

use thiserror::Error;

/// Top-level error type for the poller.
#[derive(Error, Debug)]
pub enum PollerError {
    /// Object store errors (bucket lookup, listing, metadata)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A required configuration field is missing or blank
    #[error("Configuration error: {0}")]
    Config(String),

    /// The prefix exists but yields no objects
    #[error("No objects found under prefix '{prefix}' in bucket '{bucket}'")]
    EmptyListing { bucket: String, prefix: String },

    /// A request body could not be decoded or a response encoded
    #[error("Message error: {0}")]
    Message(String),
}

/// Errors raised by an object store adapter.
///
/// Each variant carries the adapter's own error text so that it can be
/// embedded verbatim in check results and log lines.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Bucket existence check failed
    #[error("Bucket lookup failed: {0}")]
    BucketLookup(String),

    /// Listing a page of objects failed
    #[error("List objects failed: {0}")]
    List(String),

    /// Fetching object metadata failed
    #[error("Metadata fetch failed: {0}")]
    Metadata(String),
}

/// Failure classification.
///
/// Mirrors the ways a poller operation can fail without being fatal to the
/// host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid user configuration
    Configuration,

    /// Network, permission or not-found failure talking to the object store
    Transport,

    /// The location is reachable but holds no objects
    Empty,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Transport => write!(f, "Transport"),
            Self::Empty => write!(f, "Empty"),
        }
    }
}

impl PollerError {
    /// Classifies this error into an [`ErrorCategory`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Storage(_) => ErrorCategory::Transport,
            Self::Config(_) | Self::Message(_) => ErrorCategory::Configuration,
            Self::EmptyListing { .. } => ErrorCategory::Empty,
        }
    }

    /// Creates a configuration error for a missing required field.
    pub fn missing_field(name: &str) -> Self {
        Self::Config(format!("missing required field '{name}'"))
    }
}

/// Result type alias using PollerError.
pub type Result<T> = std::result::Result<T, PollerError>;
