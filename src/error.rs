//! Error types for archive assembly and dependency resolution.
//!
//! This module defines the crate-wide [`Error`] enum together with the
//! [`Context`] and [`ErrorExt`] extension traits and the [`bail!`](crate::bail)
//! macro used throughout the builders.

use crate::archive::ArchiveShape;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all archive and resolver operations
#[derive(Error, Debug)]
pub enum Error {
    /// Archive name rejected at creation
    #[error("Invalid archive name {name:?}: {reason}")]
    InvalidName {
        /// Rejected name
        name: String,
        /// Reason for the error
        reason: String,
    },

    /// Entry path could not be normalized
    #[error("Invalid archive path {path:?}: {reason}")]
    InvalidPath {
        /// Rejected path
        path: String,
        /// Reason for the error
        reason: String,
    },

    /// Dependency coordinate is malformed
    #[error("Invalid coordinate {coordinate:?}: {reason}")]
    InvalidCoordinate {
        /// Rejected coordinate
        coordinate: String,
        /// Reason for the error
        reason: String,
    },

    /// Scope name is not one of the known dependency scopes
    #[error("Unknown dependency scope: {0}")]
    UnknownScope(String),

    /// Archive cannot be viewed as the requested shape
    #[error("Cannot narrow {shape} archive {name:?} to {target}")]
    ShapeMismatch {
        /// Archive name
        name: String,
        /// Shape the archive was created with
        shape: ArchiveShape,
        /// Requested shape
        target: ArchiveShape,
    },

    /// Operation not available for the archive's shape
    #[error("{operation} is not supported by {shape} archives")]
    UnsupportedOperation {
        /// Operation name
        operation: &'static str,
        /// Archive shape
        shape: ArchiveShape,
    },

    /// Class not present on any class path root
    #[error("Class {class} not found on class path {roots:?}")]
    ClassNotFound {
        /// Fully-qualified class name
        class: String,
        /// Searched roots
        roots: Vec<PathBuf>,
    },

    /// Package directory not present on any class path root
    #[error("Package {package} not found on class path {roots:?}")]
    PackageNotFound {
        /// Package name
        package: String,
        /// Searched roots
        roots: Vec<PathBuf>,
    },

    /// Resource not present on the class path nor as a file
    #[error("Resource {resource} not found on class path {roots:?}")]
    ResourceNotFound {
        /// Resource name
        resource: String,
        /// Searched roots
        roots: Vec<PathBuf>,
    },

    /// Project descriptor could not be read or parsed
    #[error("Invalid project descriptor {}: {reason}", path.display())]
    Descriptor {
        /// Descriptor location
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// No version available for a coordinate
    #[error("No version declared for {coordinate}")]
    UnresolvedVersion {
        /// Coordinate without version
        coordinate: String,
    },

    /// Artifact file missing from the repository
    #[error("Artifact {coordinate} not found at {}", path.display())]
    ArtifactNotFound {
        /// Pinned coordinate
        coordinate: String,
        /// Expected location
        path: PathBuf,
    },

    /// Settings validation errors
    #[error("Settings error: {0}")]
    Settings(String),

    /// File system errors with the operation and path that failed
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error wrapped with additional context
    #[error("{message}: {source}")]
    Context {
        /// Context message
        message: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP container errors
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal errors
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Generic errors raised with [`bail!`](crate::bail)
    #[error("{0}")]
    GenericError(String),

    /// Errors from custom descriptor loaders
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Attach a message to a failed `Result` or an empty `Option`.
pub trait Context<T> {
    /// Wraps the error (or absence of a value) with `message`.
    fn context<C: Display>(self, message: C) -> Result<T>;

    /// Like [`Context::context`], building the message lazily.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, message: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(message.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T, E: Into<Error>> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, message: C) -> Result<T> {
        self.map_err(|e| Error::Context {
            message: message.to_string(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            message: f().to_string(),
            source: Box::new(e.into()),
        })
    }
}

/// File system flavoured context for IO results.
pub trait ErrorExt<T> {
    /// Records which operation failed on which path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_source_error() {
        let failed: std::result::Result<(), Error> = Err(Error::UnresolvedVersion {
            coordinate: "g:a".into(),
        });
        let err = failed.context("resolving g:a").unwrap_err();

        assert_eq!(err.to_string(), "resolving g:a: No version declared for g:a");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let err = None::<u8>.context("nothing here").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "nothing here"));
    }

    #[test]
    fn fs_context_names_operation_and_path() {
        let io: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = io.fs_context("reading class file", "/tmp/A.class").unwrap_err();
        assert_eq!(err.to_string(), "reading class file /tmp/A.class: gone");
    }
}
