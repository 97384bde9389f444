//! Error types for gamescout-platform.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the platform layer.
///
/// Expected absence is never an error here: a missing marker file, a missing
/// registry value or key, and a removable volume that is not ready are all
/// reported as `Ok(None)` or an empty sequence by the operations that can
/// encounter them.
#[derive(Debug, Error)]
pub enum Error {
  /// The OS refused or failed an operation that should normally succeed.
  #[error("{operation} failed for {target}: {source}")]
  Access {
    operation: &'static str,
    target: String,
    #[source]
    source: io::Error,
  },

  /// An externally authored marker file violates the expected format.
  #[error("malformed marker file at {path}: {reason}")]
  MalformedMarker { path: PathBuf, reason: String },

  /// The caller supplied an argument outside the accepted domain.
  #[error("invalid input: {0}")]
  InvalidInput(String),
}

impl Error {
  pub(crate) fn access(operation: &'static str, target: impl Into<String>, source: io::Error) -> Self {
    Error::Access {
      operation,
      target: target.into(),
      source,
    }
  }
}
