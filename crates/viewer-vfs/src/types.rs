//! Error types for the content store.
//!
//! All error variants include contextual information and implement
//! `is_xxx()` methods for easy error classification.
//!
//! # Examples
//!
//! ```
//! use html_viewer_vfs::VfsError;
//!
//! let error = VfsError::FileNotFound {
//!     path: "missing.txt".to_string(),
//! };
//!
//! assert!(error.is_not_found());
//! ```

use thiserror::Error;

/// Errors that can occur during content store operations.
#[derive(Error, Debug)]
pub enum VfsError {
    /// No entry exists at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The normalized path that was not found
        path: String,
    },

    /// The archive could not be expanded
    #[error("Failed to read archive '{archive}': {message}")]
    InvalidArchive {
        /// Name of the archive
        archive: String,
        /// Description of the decoding failure
        message: String,
    },

    /// The store has nothing to export
    #[error("No files to download")]
    EmptyStore,

    /// Reading an input from disk failed
    #[error("Failed to read {path}")]
    Io {
        /// The path being read
        path: String,
        /// Underlying error cause
        #[source]
        source: std::io::Error,
    },
}

impl VfsError {
    /// Returns `true` if this is a file not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::EmptyStore)
    }

    /// Returns `true` if this is an archive error.
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(self, Self::InvalidArchive { .. })
    }
}

impl From<VfsError> for html_viewer_core::Error {
    fn from(err: VfsError) -> Self {
        match err {
            VfsError::FileNotFound { path } => Self::NotFound { path },
            VfsError::InvalidArchive { archive, message } => Self::Ingest { archive, message },
            VfsError::EmptyStore => Self::NotFound {
                path: "(empty bundle)".to_string(),
            },
            VfsError::Io { path, source } => Self::Io { path, source },
        }
    }
}

/// Type alias for content store results.
pub type Result<T> = std::result::Result<T, VfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vfs_error_is_not_found() {
        let error = VfsError::FileNotFound {
            path: "a.txt".to_string(),
        };
        assert!(error.is_not_found());
        assert!(!error.is_archive_error());
    }

    #[test]
    fn test_conversion_to_core_error() {
        let error = VfsError::InvalidArchive {
            archive: "site.zip".to_string(),
            message: "invalid Zip archive".to_string(),
        };
        let core: html_viewer_core::Error = error.into();
        assert!(core.is_ingest_error());

        let core: html_viewer_core::Error = VfsError::EmptyStore.into();
        assert!(core.is_not_found());
    }
}
