//! Module for the "Continue Learning" affordance.

use super::*;

/// Function for the [`Commands::Continue`] in the CLI.
pub async fn resume<I: UserInteraction>(
  interaction: &I,
  session: &Session<SqliteStore>,
  catalog: &Catalog,
  index: &CatalogIndex,
) -> Result<()> {
  match session.resume_target(catalog, index).await {
    Some(target) => interaction.reply(ResponseContent::Target(&target)),
    None => interaction.reply(ResponseContent::Info("Nothing to continue right now")),
  }
}
