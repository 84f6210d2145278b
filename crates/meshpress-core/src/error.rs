//! Unified error handling for meshpress
//!
//! This module provides a single error type shared by the scene, encoder,
//! and export crates, plus a context extension for `Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all meshpress operations
#[derive(Error, Debug)]
pub enum Error {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The scene graph provider cannot produce a usable scene
    #[error("Unsupported input: {message}")]
    UnsupportedInput {
        message: String,
    },

    /// A geometry violates a structural requirement
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        message: String,
    },

    /// Writing an exported asset failed
    #[error("Export failed: {message}")]
    ExportFailed {
        message: String,
    },

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an unsupported input error
    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Error::UnsupportedInput {
            message: message.into(),
        }
    }

    /// Create an invalid geometry error
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Error::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Create an export failure error
    pub fn export_failed(message: impl Into<String>) -> Self {
        Error::ExportFailed {
            message: message.into(),
        }
    }

    /// Check if this error aborts the whole run (as opposed to one unit)
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedInput { .. } | Error::FileNotFound(_)
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = Error::FileNotFound(PathBuf::from("/scene.json"));
        let contextualized = err.with_context("while loading scene");

        assert!(contextualized.to_string().contains("while loading scene"));
    }

    #[test]
    fn test_is_fatal_input() {
        assert!(Error::unsupported_input(".fbx is not supported").is_fatal_input());
        assert!(Error::FileNotFound(PathBuf::from("/x")).is_fatal_input());
        assert!(!Error::export_failed("disk full").is_fatal_input());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::FileNotFound(PathBuf::from("/scene.json")));
        let with_context = result.context("loading scene");

        assert!(with_context.is_err());
        assert!(with_context.unwrap_err().to_string().contains("loading scene"));
    }
}
