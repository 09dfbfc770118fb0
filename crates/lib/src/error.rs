//! Error types for hostio-lib

use std::io;

use thiserror::Error;

/// Errors returned by path parsing, environment queries and file system operations.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid path {path:?}: {reason}")]
  InvalidPath { path: String, reason: String },

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("not found: {path}")]
  NotFound {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("access denied: {path}")]
  AccessDenied {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("already exists: {path}")]
  AlreadyExists { path: String },

  #[error("I/O error on {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to determine home directory")]
  NoHomeDirectory,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::InvalidPath {
      path: path.into(),
      reason: reason.into(),
    }
  }

  /// Classify an OS error by its kind, keeping it as the source.
  pub(crate) fn from_io(path: impl ToString, source: io::Error) -> Self {
    let path = path.to_string();
    match source.kind() {
      io::ErrorKind::NotFound => Self::NotFound { path, source },
      io::ErrorKind::PermissionDenied => Self::AccessDenied { path, source },
      io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
      _ => Self::Io { path, source },
    }
  }

  /// A synthetic not-found error for backends that have no OS error to wrap.
  pub(crate) fn not_found(path: impl ToString) -> Self {
    let path = path.to_string();
    let source = io::Error::new(io::ErrorKind::NotFound, format!("{path} does not exist"));
    Self::NotFound { path, source }
  }

  /// True when the error is [`Error::NotFound`].
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn io_errors_are_classified_by_kind() {
    let err = Error::from_io("/a", io::Error::from(io::ErrorKind::NotFound));
    assert!(err.is_not_found());

    let err = Error::from_io("/a", io::Error::from(io::ErrorKind::PermissionDenied));
    assert!(matches!(err, Error::AccessDenied { .. }));

    let err = Error::from_io("/a", io::Error::from(io::ErrorKind::AlreadyExists));
    assert!(matches!(err, Error::AlreadyExists { .. }));

    let err = Error::from_io("/a", io::Error::other("boom"));
    assert!(matches!(err, Error::Io { .. }));
  }

  #[test]
  fn invalid_path_message_names_the_input() {
    let err = Error::invalid_path("  ", "path is empty");
    assert_eq!(err.to_string(), "invalid path \"  \": path is empty");
  }
}
