//! Progress records and the guest/remote merge engine.
//!
//! A [`ProgressRecord`] maps item ids to per-item watch state. Two records
//! exist per session: the guest record (local persistent storage, cleared
//! once merged) and the identified record (remote document store, keyed by
//! user id). [`merge`] reconciles the two at sign-in time.
//!
//! Inside this module everything is pure, synchronous computation over
//! canonical types; timestamp coercion and malformed-entry tolerance happen
//! at the [`crate::store`] boundary before data gets here.
//!
//! # Merge semantics
//!
//! Applied independently per key present in the guest record (remote-only
//! keys pass through unchanged):
//!
//! 1. remote has no entry → guest entry verbatim
//! 2. guest completed, remote not → guest wins, regardless of recency
//! 3. remote completed, guest not → remote kept unchanged
//! 4. neither completed → strictly later `last_activity_at` wins; an exact
//!    tie keeps remote
//! 5. both completed → remote kept unchanged
//!
//! The merge is idempotent and never mutates its inputs.

use super::*;

/// Watch state for a single content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
  /// Seconds watched so far; never negative once past the store adapter
  pub watched_seconds:  f64,
  /// Whether the item has been watched to completion
  pub completed:        bool,
  /// Instant of the most recent update to this entry
  pub last_activity_at: DateTime<Utc>,
}

impl ProgressEntry {
  /// Creates an entry, clamping `watched_seconds` to be non-negative.
  pub fn new(watched_seconds: f64, completed: bool, last_activity_at: DateTime<Utc>) -> Self {
    Self { watched_seconds: watched_seconds.max(0.0), completed, last_activity_at }
  }
}

/// Mapping from item id to [`ProgressEntry`].
///
/// Key order is irrelevant to the semantics; a `BTreeMap` keeps iteration
/// deterministic, which keeps write batches and test output stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord(BTreeMap<String, ProgressEntry>);

impl ProgressRecord {
  /// Creates an empty record.
  pub fn new() -> Self { Self::default() }

  /// Looks up the entry for an item.
  pub fn get(&self, item_id: &str) -> Option<&ProgressEntry> { self.0.get(item_id) }

  /// Inserts or replaces the entry for an item.
  pub fn insert(&mut self, item_id: impl Into<String>, entry: ProgressEntry) {
    self.0.insert(item_id.into(), entry);
  }

  /// Iterates entries in key order.
  pub fn iter(&self) -> impl Iterator<Item = (&String, &ProgressEntry)> { self.0.iter() }

  /// Number of entries.
  pub fn len(&self) -> usize { self.0.len() }

  /// Whether the record holds no entries.
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Entries of `self` that differ from `baseline` (changed value or absent
  /// from the baseline). All three fields are compared.
  ///
  /// This is the diff used after a merge to persist only the keys that
  /// actually changed, minimizing remote writes.
  pub fn changed_from<'a>(&'a self, baseline: &ProgressRecord) -> Vec<(&'a str, &'a ProgressEntry)> {
    self
      .0
      .iter()
      .filter(|&(item_id, entry)| baseline.get(item_id) != Some(entry))
      .map(|(item_id, entry)| (item_id.as_str(), entry))
      .collect()
  }
}

impl FromIterator<(String, ProgressEntry)> for ProgressRecord {
  fn from_iter<T: IntoIterator<Item = (String, ProgressEntry)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Reconciles a guest record into a remote record.
///
/// Returns a new record; neither input is mutated. See the module docs for
/// the per-key rules. Merging an empty guest record returns `remote`
/// unchanged, and `merge(&merge(r, g), g) == merge(r, g)`.
pub fn merge(remote: &ProgressRecord, guest: &ProgressRecord) -> ProgressRecord {
  let mut merged = remote.clone();
  for (item_id, guest_entry) in guest.iter() {
    match remote.get(item_id) {
      None => merged.insert(item_id.clone(), guest_entry.clone()),
      Some(remote_entry) => {
        if guest_entry.completed && !remote_entry.completed {
          // Completion always wins over incompletion.
          merged.insert(item_id.clone(), guest_entry.clone());
        } else if !guest_entry.completed
          && !remote_entry.completed
          && guest_entry.last_activity_at > remote_entry.last_activity_at
        {
          merged.insert(item_id.clone(), guest_entry.clone());
        }
        // All other cases keep the remote entry: a completed remote is
        // never regressed, ties keep remote, both-completed keeps remote.
      },
    }
  }
  merged
}
