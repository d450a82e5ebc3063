//! Next-item resolution: "what should the user watch next".
//!
//! [`resolve_next`] picks the single best continue item for a progress
//! record, in strict priority order:
//!
//! 1. absent progress → nothing to resume
//! 2. the most recently touched incomplete item known to the catalog
//! 3. the first item in catalog order whose entry is absent or incomplete
//! 4. nothing, once every item in the catalog is completed
//!
//! "Continue what you most recently left unfinished" always outranks
//! "pick up something new"; only once every touched-but-unfinished item is
//! exhausted does resolution fall back to catalog order.
//!
//! Progress keys with no catalog index entry are treated as stale or
//! removed content and silently ignored, not as errors.

use super::*;
use crate::{
  catalog::{Catalog, CatalogIndex, ContentItem, Topic},
  progress::{ProgressEntry, ProgressRecord},
};

/// Why a particular item was chosen as the resume target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextReason {
  /// An incomplete item the user most recently left off in
  ResumeInProgress,
  /// The first uncompleted item in catalog order
  FirstUncompleted,
}

/// The single item selected as "what to watch next".
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeTarget {
  /// The item to continue with
  pub item:           ContentItem,
  /// Id of the owning collection
  pub collection_id:  String,
  /// Topic the item is filed under
  pub topic:          Topic,
  /// Playback position to resume from, in seconds
  pub resume_seconds: f64,
  /// Why this item was chosen
  pub reason:         NextReason,
}

/// Resolves the continue item for `progress` against a catalog snapshot.
///
/// `None` progress means an anonymous visitor with no history at all:
/// there is nothing to resume. An empty-but-present record falls through
/// to the first item of the catalog. `None` is also the normal terminal
/// state once every catalog item is completed; callers render it as
/// "nothing to show", not as a failure.
pub fn resolve_next(
  progress: Option<&ProgressRecord>,
  index: &CatalogIndex,
  catalog: &Catalog,
) -> Option<ResumeTarget> {
  let progress = progress?;

  // Most recently touched incomplete entry, among entries the catalog
  // still knows about. Exact-timestamp ties can pick either.
  let mut best: Option<(&String, &ProgressEntry)> = None;
  for (item_id, entry) in progress.iter() {
    if entry.completed || entry.watched_seconds < 0.0 || !index.contains(item_id) {
      continue;
    }
    if best.is_none_or(|(_, b)| entry.last_activity_at > b.last_activity_at) {
      best = Some((item_id, entry));
    }
  }
  if let Some((item_id, entry)) = best {
    let position = index.get(item_id)?;
    return Some(ResumeTarget {
      item:           position.item.clone(),
      collection_id:  position.collection_id.clone(),
      topic:          position.topic,
      resume_seconds: entry.watched_seconds,
      reason:         NextReason::ResumeInProgress,
    });
  }

  // Fall back to the first item in catalog order that is absent from the
  // record or incomplete.
  for pos in catalog.walk() {
    let entry = progress.get(&pos.item.id);
    if entry.is_none_or(|e| !e.completed) {
      return Some(ResumeTarget {
        item:           pos.item.clone(),
        collection_id:  pos.collection.id.clone(),
        topic:          pos.topic,
        resume_seconds: entry.map_or(0.0, |e| e.watched_seconds.max(0.0)),
        reason:         NextReason::FirstUncompleted,
      });
    }
  }

  None
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::{
    catalog::{Collection, TopicSection},
    progress::ProgressEntry,
  };

  /// 2 topics x 2 collections x 2 items = 8 items, ids "i1".."i8".
  fn fixture_catalog() -> Catalog {
    let mut next = 0;
    let mut collection = |id: &str| {
      let items = (0..2)
        .map(|_| {
          next += 1;
          ContentItem {
            id:               format!("i{next}"),
            title:            format!("Item {next}"),
            duration_seconds: Some(300),
          }
        })
        .collect();
      Collection { id: id.into(), title: id.to_uppercase(), items }
    };
    Catalog {
      sections: vec![
        TopicSection {
          topic:       Topic::Programming,
          collections: vec![collection("c1"), collection("c2")],
        },
        TopicSection {
          topic:       Topic::Science,
          collections: vec![collection("c3"), collection("c4")],
        },
      ],
    }
  }

  fn at(hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).single().unwrap()
  }

  fn entry(watched: f64, completed: bool, hour: u32) -> ProgressEntry {
    ProgressEntry::new(watched, completed, at(hour))
  }

  #[test]
  fn absent_progress_resolves_to_none() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);
    assert_eq!(resolve_next(None, &index, &catalog), None);
  }

  #[test]
  fn empty_record_resolves_to_first_catalog_item() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);
    let target = resolve_next(Some(&ProgressRecord::new()), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i1");
    assert_eq!(target.collection_id, "c1");
    assert_eq!(target.resume_seconds, 0.0);
    assert_eq!(target.reason, NextReason::FirstUncompleted);
  }

  #[test]
  fn most_recent_incomplete_item_wins() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    let mut progress = ProgressRecord::new();
    progress.insert("i1", entry(30.0, false, 1));
    progress.insert("i3", entry(75.0, false, 2));

    let target = resolve_next(Some(&progress), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i3");
    assert_eq!(target.collection_id, "c2");
    assert_eq!(target.resume_seconds, 75.0);
    assert_eq!(target.reason, NextReason::ResumeInProgress);
  }

  #[test]
  fn recency_outranks_catalog_order() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    // The last catalog item was touched most recently; it still wins over
    // the earlier-in-catalog entry.
    let mut progress = ProgressRecord::new();
    progress.insert("i2", entry(10.0, false, 1));
    progress.insert("i8", entry(20.0, false, 5));

    let target = resolve_next(Some(&progress), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i8");
    assert_eq!(target.topic, Topic::Science);
  }

  #[test]
  fn completed_entries_fall_back_to_first_uncompleted() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    let mut progress = ProgressRecord::new();
    progress.insert("i1", entry(300.0, true, 3));
    progress.insert("i2", entry(120.0, true, 4));

    let target = resolve_next(Some(&progress), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i3");
    assert_eq!(target.reason, NextReason::FirstUncompleted);
  }

  #[test]
  fn fallback_skips_completed_prefix() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    let mut progress = ProgressRecord::new();
    progress.insert("i1", entry(300.0, true, 1));
    let target = resolve_next(Some(&progress), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i2");
    assert_eq!(target.resume_seconds, 0.0);
  }

  #[test]
  fn stale_progress_keys_are_ignored() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    let mut progress = ProgressRecord::new();
    progress.insert("removed-item", entry(50.0, false, 9));
    progress.insert("i5", entry(20.0, false, 1));

    let target = resolve_next(Some(&progress), &index, &catalog).unwrap();
    assert_eq!(target.item.id, "i5");
  }

  #[test]
  fn fully_completed_catalog_resolves_to_none() {
    let catalog = fixture_catalog();
    let index = CatalogIndex::build(&catalog);

    let mut progress = ProgressRecord::new();
    for pos in catalog.walk() {
      progress.insert(pos.item.id.clone(), entry(300.0, true, 1));
    }
    assert_eq!(resolve_next(Some(&progress), &index, &catalog), None);
  }
}
