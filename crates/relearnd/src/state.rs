//! Session state persisted between CLI invocations.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::*;

/// State carried across invocations: who is signed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliState {
  /// The active identity; guest when no one is signed in
  #[serde(default)]
  pub identity: Identity,
}

/// Where session state lives: next to the database file.
pub fn state_path(config: &Config) -> PathBuf { config.database_path.with_file_name("state.json") }

impl CliState {
  /// Loads the state file; an absent or corrupt file yields the default
  /// guest state rather than an error.
  pub fn load(path: &std::path::Path) -> Self {
    match std::fs::read_to_string(path) {
      Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "corrupt session state, starting as guest");
        Self::default()
      }),
      Err(_) => Self::default(),
    }
  }

  /// Writes the state file.
  pub fn save(&self, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(self)?)?;
    Ok(())
  }
}
