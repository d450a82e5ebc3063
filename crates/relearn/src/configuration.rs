//! Filesystem configuration for catalog and storage locations.

use super::*;
use crate::store::{GuestStore, SqliteStore};

/// Paths the platform reads and writes.
///
/// Defaults come from the platform data/config directories; `with_*`
/// builders override individual paths, which tests use to point everything
/// at temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Catalog TOML file
  pub catalog_path:     PathBuf,
  /// SQLite database backing the document store
  pub database_path:    PathBuf,
  /// Guest progress blob
  pub guest_store_path: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      catalog_path:     Self::default_catalog_path(),
      database_path:    SqliteStore::default_path(),
      guest_store_path: GuestStore::default_path(),
    }
  }
}

impl Config {
  /// Returns the default path for the catalog file.
  ///
  /// - On Unix: `~/.config/relearn/catalog.toml`
  /// - On macOS: `~/Library/Application Support/relearn/catalog.toml`
  /// - On Windows: `%APPDATA%\relearn\catalog.toml`
  /// - Fallback: `./catalog.toml` in the current directory
  pub fn default_catalog_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("relearn").join("catalog.toml")
  }

  /// Roots every path under one directory, the layout the CLI uses for its
  /// `--data-dir` override.
  pub fn under_dir(dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self {
      catalog_path:     dir.join("catalog.toml"),
      database_path:    dir.join("relearn.db"),
      guest_store_path: dir.join("guest_progress.json"),
    }
  }

  /// Overrides the catalog path.
  pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.catalog_path = path.into();
    self
  }

  /// Overrides the database path.
  pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.database_path = path.into();
    self
  }

  /// Overrides the guest blob path.
  pub fn with_guest_store_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.guest_store_path = path.into();
    self
  }
}
