//! In-memory [`DocumentStore`] for tests and demos.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Mutex,
};

use super::*;

/// Document store held entirely in memory.
///
/// Useful as a stand-in remote backend in tests and examples. Writes can be
/// switched to fail on demand to exercise the "guest record is kept until a
/// write is confirmed" path.
#[derive(Debug, Default)]
pub struct MemoryStore {
  /// user id → stored document
  documents:   Mutex<HashMap<String, ProgressDocument>>,
  /// When set, `put_entry` reports a store failure
  fail_writes: AtomicBool,
}

impl MemoryStore {
  /// Creates an empty store.
  pub fn new() -> Self { Self::default() }

  /// Makes subsequent writes fail (or succeed again) on demand.
  pub fn set_fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

  /// Snapshot of one user's stored document, if any.
  pub fn document(&self, user_id: &str) -> Option<ProgressDocument> {
    self.documents.lock().expect("memory store poisoned").get(user_id).cloned()
  }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
  async fn get(&self, user_id: &str) -> Result<Option<ProgressDocument>> {
    Ok(self.documents.lock().expect("memory store poisoned").get(user_id).cloned())
  }

  async fn put_entry(&self, user_id: &str, item_id: &str, entry: &ProgressEntry) -> Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(RelearnError::Store("memory store writes disabled".into()));
    }
    let mut documents = self.documents.lock().expect("memory store poisoned");
    let document = documents.entry(user_id.to_string()).or_default();
    document.insert(item_id.to_string(), serde_json::json!({
      "watched_seconds": entry.watched_seconds,
      "completed": entry.completed,
      "last_activity_at": entry.last_activity_at.to_rfc3339(),
    }));
    Ok(())
  }
}
