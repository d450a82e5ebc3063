//! Watch-time points and completion badges.
//!
//! A pure rollup over the active progress record and the catalog snapshot.
//! Points accrue from completions and watch time; a badge is earned for
//! each collection whose items are all completed. Progress keys that are
//! not part of the catalog contribute nothing.

use super::*;
use crate::{
  catalog::{Catalog, Topic},
  progress::ProgressRecord,
};

/// Points granted per completed item.
const COMPLETION_POINTS: u32 = 10;

/// Badge earned by completing every item of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
  /// Id of the completed collection
  pub collection_id: String,
  /// Display title of the completed collection
  pub title:         String,
  /// Topic the collection is filed under
  pub topic:         Topic,
}

/// Aggregated gamification state for one progress record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwardSummary {
  /// Total points: completions plus full minutes watched
  pub points:          u32,
  /// Number of catalog items marked completed
  pub completed_items: u32,
  /// Total seconds watched across catalog items
  pub watched_seconds: f64,
  /// Badges for fully-completed collections, in catalog order
  pub badges:          Vec<Badge>,
}

impl AwardSummary {
  /// Computes the rollup for a progress record against a catalog snapshot.
  pub fn compute(progress: &ProgressRecord, catalog: &Catalog) -> Self {
    let mut summary = AwardSummary::default();

    for pos in catalog.walk() {
      if let Some(entry) = progress.get(&pos.item.id) {
        summary.watched_seconds += entry.watched_seconds.max(0.0);
        if entry.completed {
          summary.completed_items += 1;
        }
      }
    }

    for section in &catalog.sections {
      for collection in &section.collections {
        let all_completed = !collection.items.is_empty()
          && collection
            .items
            .iter()
            .all(|item| progress.get(&item.id).is_some_and(|e| e.completed));
        if all_completed {
          summary.badges.push(Badge {
            collection_id: collection.id.clone(),
            title:         collection.title.clone(),
            topic:         section.topic,
          });
        }
      }
    }

    summary.points =
      summary.completed_items * COMPLETION_POINTS + (summary.watched_seconds / 60.0) as u32;
    summary
  }
}
