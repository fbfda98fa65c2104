//! Error types for pattern compilation and directory walking.

use std::path::PathBuf;

use thiserror::Error;

/// A gitignore line that could not be compiled into a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `[` with no closing `]` in the same path segment.
    #[error("unterminated character class at offset {position} in pattern `{pattern}`")]
    UnterminatedClass { pattern: String, position: usize },

    /// Nothing is left once `!`, anchoring and trailing `/` are stripped (e.g. `/`).
    #[error("pattern `{pattern}` matches nothing")]
    Empty { pattern: String },

    /// The glob backend rejected a segment.
    #[error("invalid pattern `{pattern}`: {message}")]
    Invalid { pattern: String, message: String },
}

/// Errors reported to the walk's error handler.
///
/// None of these abort a walk on their own: the affected directory is
/// skipped and traversal continues with its siblings.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Path not found (including a missing walk root).
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a directory listing.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while listing a directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory's ignore file exists but could not be read.
    #[error("cannot read ignore file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A followed symlink resolves to one of its own ancestors.
    #[error("Symlink loop: {path} -> {target}")]
    SymlinkLoop { path: PathBuf, target: PathBuf },
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. }
            | Self::IgnoreFile { path, .. }
            | Self::SymlinkLoop { path, .. } => path,
        }
    }
}
