//! Source access error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use void_types::{ErrorCode, VoidError};

/// Errors raised while locating or reading source files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path does not exist.
    #[error("source path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::Io { path, .. } => path,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::SOURCE_NOT_FOUND,
            Self::Io { .. } => ErrorCode::SOURCE_UNREADABLE,
        }
    }
}

impl From<SourceError> for VoidError {
    fn from(err: SourceError) -> Self {
        VoidError::new(
            err.path().display().to_string(),
            err.code(),
            err.to_string(),
            None,
        )
    }
}
