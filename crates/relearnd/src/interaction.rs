//! Styled terminal output and confirmation prompts.

use console::style;
use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch character for tree structure
pub static TREE_BRANCH: &str = "├─";
/// Leaf character for tree structure (end of branch)
pub static TREE_LEAF: &str = "└─";
/// Continuation line for tree structure
pub static CONTINUE_PREFIX: &str = "│ ";

/// Everything a command can report back to the terminal.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// The resolved "Continue Learning" target
  Target(&'a ResumeTarget),
  /// Progress and award rollup for the active identity
  Summary {
    /// Whose progress this is
    identity: &'a Identity,
    /// The active progress record
    progress: &'a ProgressRecord,
    /// Computed points and badges
    awards:   &'a AwardSummary,
  },
  /// The whole catalog as a topic tree
  Catalog(&'a Catalog),
  /// A completed action
  Success(&'a str),
  /// Neutral information
  Info(&'a str),
}

/// Seam between command logic and the terminal, so tests can drive
/// commands without a TTY.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Renders one response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(false)
        .interact()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Target(target) => {
        println!("{} Continue Learning", style(SUCCESS_PREFIX).green());
        println!("  {} {}", style(TREE_BRANCH).dim(), style(&target.item.title).bold());
        println!(
          "  {} collection {} · topic {}",
          style(TREE_BRANCH).dim(),
          target.collection_id,
          target.topic
        );
        println!("  {} resume at {}", style(TREE_LEAF).dim(), format_seconds(target.resume_seconds));
      },
      ResponseContent::Summary { identity, progress, awards } => {
        let who = match identity {
          Identity::Guest => "guest".to_string(),
          Identity::User(user_id) => format!("user {user_id}"),
        };
        println!("{} Progress for {}", style(INFO_PREFIX).cyan(), style(who).bold());
        println!(
          "  {} {} items tracked, {} completed",
          style(TREE_BRANCH).dim(),
          progress.len(),
          awards.completed_items
        );
        println!(
          "  {} {} watched, {} points",
          style(TREE_BRANCH).dim(),
          format_seconds(awards.watched_seconds),
          style(awards.points).bold()
        );
        if awards.badges.is_empty() {
          println!("  {} no badges yet", style(TREE_LEAF).dim());
        } else {
          println!("  {} badges:", style(TREE_LEAF).dim());
          for badge in &awards.badges {
            println!("  {}   🏅 {} ({})", style(CONTINUE_PREFIX).dim(), badge.title, badge.topic);
          }
        }
      },
      ResponseContent::Catalog(catalog) => {
        for section in &catalog.sections {
          println!("{}", style(section.topic.to_string()).bold().underlined());
          for collection in &section.collections {
            println!("  {} {} ({})", style(TREE_BRANCH).dim(), collection.title, collection.id);
            let last = collection.items.len().saturating_sub(1);
            for (i, item) in collection.items.iter().enumerate() {
              let glyph = if i == last { TREE_LEAF } else { TREE_BRANCH };
              match item.known_duration() {
                Some(duration) => println!(
                  "  {}   {} {} [{}] ({})",
                  style(CONTINUE_PREFIX).dim(),
                  style(glyph).dim(),
                  item.title,
                  format_seconds(f64::from(duration)),
                  item.id
                ),
                None => println!(
                  "  {}   {} {} ({})",
                  style(CONTINUE_PREFIX).dim(),
                  style(glyph).dim(),
                  item.title,
                  item.id
                ),
              }
            }
          }
        }
      },
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).cyan()),
    }
    Ok(())
  }
}

/// Renders seconds as `m:ss`.
fn format_seconds(seconds: f64) -> String {
  let total = seconds.max(0.0).round() as u64;
  format!("{}:{:02}", total / 60, total % 60)
}
