//! Error types for the relearn CLI.

use thiserror::Error;

/// Error type alias used for the CLI crate.
pub type Result<T> = core::result::Result<T, RelearndError>;

/// Errors that can occur while running CLI commands.
#[derive(Error, Debug)]
pub enum RelearndError {
  /// An error bubbled up from the relearn library.
  #[error(transparent)]
  Relearn(#[from] relearn::error::RelearnError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Session state could not be (de)serialized.
  #[error(transparent)]
  Serde(#[from] serde_json::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// The data directory is missing or inconsistent.
  #[error("{0}")]
  State(String),
}
