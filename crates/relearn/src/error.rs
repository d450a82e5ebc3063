//! Error types for the relearn library.
//!
//! This module provides a single error type covering all failure modes when
//! working with catalogs and progress records:
//! - Catalog configuration problems
//! - Storage operations (local blob and sqlite-backed document store)
//! - Malformed stored progress entries
//!
//! Note that most storage failures never surface to callers as errors: the
//! adapters in [`crate::store`] convert them into "absent"/no-op results
//! with a diagnostic, per the product rule that a broken store must not
//! crash a playback flow. The variants here are what those adapters catch.

use thiserror::Error;

/// Error type alias used for the [`relearn`](crate) crate.
pub type Result<T> = core::result::Result<T, RelearnError>;

/// Errors that can occur when working with the relearn library.
#[derive(Error, Debug)]
pub enum RelearnError {
  /// The catalog configuration was structurally invalid.
  ///
  /// This occurs when a catalog TOML file parses but violates a structural
  /// expectation, such as a collection with an empty id.
  #[error("Invalid catalog: {0}")]
  InvalidCatalog(String),

  /// A stored timestamp could not be parsed into a valid instant.
  ///
  /// Entries carrying such a timestamp are treated as absent by the store
  /// adapters rather than as "oldest possible"; this variant is how the
  /// tolerant decoder reports the individual entry it dropped.
  #[error("Invalid timestamp: {0}")]
  InvalidTimestamp(String),

  /// A stored progress entry was malformed beyond its timestamp.
  ///
  /// Covers missing fields and out-of-range values such as a negative
  /// `watched_seconds`. Like [`RelearnError::InvalidTimestamp`], this is
  /// dropped per-entry by the tolerant decoder, never failing a whole read.
  #[error("Malformed progress entry: {0}")]
  MalformedEntry(String),

  /// A SQLite operation failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation failed.
  ///
  /// This wraps errors from the `tokio-rusqlite` crate, covering
  /// async-specific failures in document store operations.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// A file system operation failed.
  ///
  /// This occurs when reading or writing the guest blob or creating the
  /// database file fails.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// JSON (de)serialization of a stored progress document failed.
  #[error(transparent)]
  Serde(#[from] serde_json::Error),

  /// A catalog TOML file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A document store backend reported a failure.
  ///
  /// The string carries the backend's diagnostic; the adapters downgrade
  /// this to "absent" for reads and "not confirmed" for writes.
  #[error("Store error: {0}")]
  Store(String),

  /// Configuration was missing or inconsistent.
  #[error("{0}")]
  Config(String),
}
