//! Identity state and the guest → identified merge sequence.
//!
//! A [`Session`] owns the store adapter and the current identity, and
//! drives the three flows the presentation layer calls into:
//!
//! - [`Session::record_tick`] on a periodic playback cadence
//! - [`Session::sign_in`] exactly once per guest → identified transition
//! - [`Session::resume_target`] on demand, to render a "Continue Learning"
//!   affordance
//!
//! The sign-in merge is strictly sequential: load guest → load remote →
//! merge → diff → write changed entries → clear guest. A remote read
//! failure is treated as an empty remote so guest data is never silently
//! lost to a transient outage; the guest record is only cleared once every
//! write is confirmed, so a failed write leaves it in place for a retry on
//! the next sign-in.

use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::{
  catalog::{Catalog, CatalogIndex},
  progress::{merge, ProgressEntry, ProgressRecord},
  resolve::{resolve_next, ResumeTarget},
  store::{DocumentStore, ProgressStore},
};

/// Who the progress belongs to right now.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum Identity {
  /// Anonymous visitor; progress lives in local storage
  #[default]
  Guest,
  /// Signed-in user; progress lives in the remote document store
  User(String),
}

/// Result of a sign-in merge, for caller reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
  /// There was no guest record to merge
  NoGuestData,
  /// The merge ran; `written` entries were persisted remotely
  Merged {
    /// Number of changed entries confirmed written to the remote store
    written:       usize,
    /// Whether the guest record was cleared (false means a write failed
    /// and the record was kept for a retry on the next sign-in)
    guest_cleared: bool,
  },
  /// Another merge was already in flight; this trigger was a no-op
  AlreadyInProgress,
}

/// One user session: store adapter plus identity state.
#[derive(Debug)]
pub struct Session<S> {
  /// Uniform guest/remote progress access
  store:           ProgressStore<S>,
  /// Current identity
  identity:        Identity,
  /// Guards against a rapid double sign-in re-applying the same guest data
  merge_in_flight: AtomicBool,
}

impl<S: DocumentStore> Session<S> {
  /// Creates a session over the given store with an initial identity.
  pub fn new(store: ProgressStore<S>, identity: Identity) -> Self {
    Self { store, identity, merge_in_flight: AtomicBool::new(false) }
  }

  /// The current identity.
  pub fn identity(&self) -> &Identity { &self.identity }

  /// The underlying store adapter.
  pub fn store(&self) -> &ProgressStore<S> { &self.store }

  /// Transitions to the identified state, merging any guest history into
  /// the user's remote record first.
  pub async fn sign_in(&mut self, user_id: &str) -> MergeOutcome {
    if self.merge_in_flight.swap(true, Ordering::SeqCst) {
      warn!(user_id, "sign-in merge already in flight, ignoring trigger");
      return MergeOutcome::AlreadyInProgress;
    }
    let outcome = self.merge_guest_into(user_id).await;
    self.identity = Identity::User(user_id.to_string());
    self.merge_in_flight.store(false, Ordering::SeqCst);
    outcome
  }

  /// Drops back to the guest identity. Any remote history stays put; a new
  /// guest record starts empty.
  pub fn sign_out(&mut self) { self.identity = Identity::Guest; }

  /// The sign-in merge sequence proper.
  async fn merge_guest_into(&self, user_id: &str) -> MergeOutcome {
    let Some(guest) = self.store.load_guest() else {
      debug!(user_id, "no guest record to merge");
      return MergeOutcome::NoGuestData;
    };
    if guest.is_empty() {
      self.store.clear_guest();
      return MergeOutcome::NoGuestData;
    }

    // A failed remote read becomes an empty remote: the merge still runs
    // and the guest data is carried over rather than dropped.
    let remote = self.store.load_remote(user_id).await.unwrap_or_default();
    let merged = merge(&remote, &guest);
    let changed = merged.changed_from(&remote);
    debug!(user_id, changed = changed.len(), "merging guest progress");

    let mut written = 0;
    let mut all_confirmed = true;
    for (item_id, entry) in &changed {
      if self.store.save_entry_remote(user_id, item_id, entry).await {
        written += 1;
      } else {
        all_confirmed = false;
      }
    }

    // Clearing is strictly ordered after confirmed writes; otherwise the
    // guest record is kept so the next sign-in can re-attempt the merge.
    let guest_cleared = if all_confirmed {
      self.store.clear_guest()
    } else {
      warn!(user_id, "remote writes unconfirmed, keeping guest record for retry");
      false
    };

    MergeOutcome::Merged { written, guest_cleared }
  }

  /// Records a playback-progress tick for the current identity.
  ///
  /// Guest ticks read-modify-write the full local record with completion
  /// kept sticky; identified ticks are a single partial remote upsert.
  /// Returns whether the write was confirmed.
  pub async fn record_tick(&self, item_id: &str, watched_seconds: f64, completed: bool) -> bool {
    let entry = ProgressEntry::new(watched_seconds, completed, Utc::now());
    match &self.identity {
      Identity::User(user_id) => self.store.save_entry_remote(user_id, item_id, &entry).await,
      Identity::Guest => {
        let mut record = self.store.load_guest().unwrap_or_default();
        let completed = entry.completed || record.get(item_id).is_some_and(|e| e.completed);
        record.insert(item_id, ProgressEntry { completed, ..entry });
        self.store.save_guest(&record)
      },
    }
  }

  /// Loads the active progress record for the current identity.
  pub async fn active_progress(&self) -> Option<ProgressRecord> {
    match &self.identity {
      Identity::User(user_id) => self.store.load_remote(user_id).await,
      Identity::Guest => self.store.load_guest(),
    }
  }

  /// Resolves the "Continue Learning" target for the current identity.
  pub async fn resume_target(&self, catalog: &Catalog, index: &CatalogIndex) -> Option<ResumeTarget> {
    let progress = self.active_progress().await;
    resolve_next(progress.as_ref(), index, catalog)
  }
}
