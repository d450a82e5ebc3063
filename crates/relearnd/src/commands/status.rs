//! Module for progress and award summaries.

use super::*;

/// Function for the [`Commands::Status`] in the CLI.
pub async fn status<I: UserInteraction>(
  interaction: &I,
  session: &Session<SqliteStore>,
  catalog: &Catalog,
) -> Result<()> {
  let progress = session.active_progress().await.unwrap_or_default();
  let awards = AwardSummary::compute(&progress, catalog);
  interaction.reply(ResponseContent::Summary {
    identity: session.identity(),
    progress: &progress,
    awards:   &awards,
  })
}
