//! Error types for the HTML bundle viewer.
//!
//! Every failure a user action can hit is one of the variants below. Errors
//! are handled at the boundary where the action originates (upload, navigate,
//! inspect) and rendered once as a user notification.
//!
//! # Examples
//!
//! ```
//! use html_viewer_core::{Error, Result};
//!
//! fn resolve_entry(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(Error::NotFound {
//!             path: path.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = resolve_entry("").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

/// Main error type for the viewer.
///
/// All errors crossing crate boundaries use this type, providing consistent
/// handling across the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// The runtime lacks the interception mechanism required for previewing.
    ///
    /// Fatal to the current preview attempt only; the session stays usable.
    #[error("Preview unavailable: {reason}")]
    Capability {
        /// Why interception is unavailable
        reason: String,
    },

    /// A bundle-relative entry path does not exist in the content store.
    #[error("File not found: {path}")]
    NotFound {
        /// The normalized path that was requested
        path: String,
    },

    /// File inspection was requested for content with no preview renderer.
    #[error("Preview is not supported for this file type: {path}")]
    UnsupportedKind {
        /// The normalized path that was requested
        path: String,
    },

    /// Archive expansion failed; the upload batch was discarded.
    #[error("Failed to read archive '{archive}': {message}")]
    Ingest {
        /// Name of the archive being expanded
        archive: String,
        /// Description of the decoding failure
        message: String,
    },

    /// The snapshot storage behind the interception layer failed.
    #[error("Snapshot storage failure during {operation}: {message}")]
    Storage {
        /// Storage operation that failed (`put`, `delete`, ...)
        operation: String,
        /// Description of the failure
        message: String,
    },

    /// Configuration or preference file is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument from the shell.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem failure while loading inputs or persisting preferences.
    #[error("I/O error at {path}")]
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying error cause
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is a capability error.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_core::Error;
    ///
    /// let err = Error::Capability {
    ///     reason: "interception server is not running".to_string(),
    /// };
    /// assert!(err.is_capability_error());
    /// ```
    #[must_use]
    pub const fn is_capability_error(&self) -> bool {
        matches!(self, Self::Capability { .. })
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an unsupported preview kind error.
    #[must_use]
    pub const fn is_unsupported_kind(&self) -> bool {
        matches!(self, Self::UnsupportedKind { .. })
    }

    /// Returns `true` if this is an archive ingestion error.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_core::Error;
    ///
    /// let err = Error::Ingest {
    ///     archive: "site.zip".to_string(),
    ///     message: "invalid Zip archive".to_string(),
    /// };
    /// assert!(err.is_ingest_error());
    /// assert!(!err.is_storage_error());
    /// ```
    #[must_use]
    pub const fn is_ingest_error(&self) -> bool {
        matches!(self, Self::Ingest { .. })
    }

    /// Returns `true` if this is a snapshot storage error.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Creates a storage error for the given operation.
    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Type alias for viewer results.
pub type Result<T> = std::result::Result<T, Error>;
