//! Module for recording playback-progress ticks.

use super::*;

#[derive(Args, Clone)]
pub struct TickOptions {
  /// Catalog item id (e.g. "rust-01")
  pub item_id: String,

  /// Playback position in seconds
  pub watched_seconds: f64,

  /// Mark the item as watched to completion
  #[arg(long, action = ArgAction::SetTrue)]
  pub completed: bool,
}

/// Function for the [`Commands::Tick`] in the CLI.
pub async fn tick<I: UserInteraction>(
  interaction: &I,
  session: &Session<SqliteStore>,
  index: &CatalogIndex,
  options: TickOptions,
) -> Result<()> {
  let TickOptions { item_id, watched_seconds, completed } = options;

  // Ticks for unknown ids are recorded anyway; the resolver treats them as
  // stale content. Point it out so typos are easy to spot.
  if !index.contains(&item_id) {
    interaction
      .reply(ResponseContent::Info(&format!("\"{item_id}\" is not in the current catalog")))?;
  }

  if session.record_tick(&item_id, watched_seconds, completed).await {
    let verb = if completed { "completed" } else { "at" };
    interaction.reply(ResponseContent::Success(&format!(
      "Recorded {item_id} {verb} {watched_seconds:.0}s"
    )))
  } else {
    interaction.reply(ResponseContent::Info(
      "The tick could not be persisted; it will not be reflected in progress",
    ))
  }
}
