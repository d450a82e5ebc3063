//! Module for setting up a relearn data directory.

use super::*;

/// Starter catalog bundled with the binary.
static DEFAULT_CATALOG: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/catalog/default.toml"));

#[derive(Args, Clone)]
pub struct InitOptions {
  /// Overwrite an existing catalog without asking
  #[arg(long, action = ArgAction::SetTrue)]
  pub force: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(interaction: &I, config: &Config, options: InitOptions) -> Result<()> {
  if config.catalog_path.exists() && !options.force {
    if !interaction.confirm(&format!(
      "A catalog already exists at {:?}, overwrite it with the starter catalog?",
      config.catalog_path
    ))? {
      interaction.reply(ResponseContent::Info("Keeping the existing catalog"))?;
      // The database may still need creating below.
    } else {
      write_catalog(config)?;
    }
  } else {
    write_catalog(config)?;
  }

  // Opening the store creates the database and schema.
  SqliteStore::open(&config.database_path).await.map_err(RelearndError::from)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Initialized: catalog at {}, database at {}",
    config.catalog_path.display(),
    config.database_path.display()
  )))
}

/// Writes the bundled starter catalog to the configured path.
fn write_catalog(config: &Config) -> Result<()> {
  if let Some(parent) = config.catalog_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&config.catalog_path, DEFAULT_CATALOG)?;
  Ok(())
}
