//! Module for rendering the catalog tree.

use super::*;

#[derive(Args, Clone)]
pub struct CatalogOptions {
  /// Show only this topic tab (e.g. "programming")
  #[arg(long)]
  pub topic: Option<String>,
}

/// Function for the [`Commands::Catalog`] in the CLI.
pub fn catalog_tree<I: UserInteraction>(
  interaction: &I,
  catalog: &Catalog,
  options: CatalogOptions,
) -> Result<()> {
  match options.topic {
    None => interaction.reply(ResponseContent::Catalog(catalog)),
    Some(tag) => {
      let topic = tag.parse().map_err(RelearndError::from)?;
      let filtered = Catalog {
        sections: catalog.sections.iter().filter(|s| s.topic == topic).cloned().collect(),
      };
      if filtered.sections.is_empty() {
        interaction.reply(ResponseContent::Info(&format!("No collections under topic {topic}")))
      } else {
        interaction.reply(ResponseContent::Catalog(&filtered))
      }
    },
  }
}
