//! Module for removing all relearn data after confirmation.

use super::*;

/// Function for the [`Commands::Clean`] in the CLI.
pub fn clean<I: UserInteraction>(interaction: &I, config: &Config) -> Result<()> {
  if !interaction.confirm("Remove the database, guest progress, and session state?")? {
    return interaction.reply(ResponseContent::Info("Nothing removed"));
  }

  let targets =
    [&config.database_path, &config.guest_store_path, &state::state_path(config)];
  let mut removed = 0;
  for path in targets {
    match std::fs::remove_file(path) {
      Ok(()) => removed += 1,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {},
      Err(err) => return Err(err.into()),
    }
  }

  interaction.reply(ResponseContent::Success(&format!("Removed {removed} files")))
}
