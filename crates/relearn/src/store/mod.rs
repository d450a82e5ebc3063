//! Storage adapters for guest and identified progress records.
//!
//! Two persisted layouts exist, both a flat map from item id to
//! `{watched_seconds, completed, last_activity_at}`:
//!
//! - **Guest**: one JSON blob in local persistent storage under a fixed
//!   well-known path, `last_activity_at` as an ISO-8601 string. Survives
//!   reloads, cleared once merged into a signed-in user's record.
//! - **Remote**: one document per user in an external store, reached
//!   through the [`DocumentStore`] trait. Entries are written one at a
//!   time as partial upserts, never as full-document overwrites.
//!
//! The adapters normalize timestamps into [`DateTime<Utc>`] here, at the
//! boundary, so the merge engine and resolver never see a raw serialized
//! variant. Individually malformed entries are skipped with a diagnostic;
//! a bad entry never fails the whole read. Store failures are likewise
//! downgraded: reads become "absent", writes become "not confirmed", and
//! nothing escapes to crash a playback flow.

use super::*;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::progress::{ProgressEntry, ProgressRecord};

/// Raw wire shape of one stored progress entry.
///
/// `last_activity_at` stays a string here; [`decode_entry`] is what turns
/// it into a canonical instant or rejects the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProgressEntry {
  /// Seconds watched, as stored
  pub watched_seconds:  f64,
  /// Completion flag; missing means false
  #[serde(default)]
  pub completed:        bool,
  /// Timestamp as serialized text (ISO-8601 / RFC 3339)
  pub last_activity_at: String,
}

/// One user's stored progress document: item id → raw entry value.
///
/// Values stay as [`serde_json::Value`] so that a single malformed entry
/// can be dropped without failing the surrounding document.
pub type ProgressDocument = BTreeMap<String, serde_json::Value>;

/// External per-user document store for identified progress records.
///
/// The store's internal replication or consistency model is not this
/// crate's concern; implementations only promise `get` and a per-entry
/// upsert that leaves other entries of the document untouched.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
  /// Fetches the user's whole progress document, or `None` if the user has
  /// no document yet.
  async fn get(&self, user_id: &str) -> Result<Option<ProgressDocument>>;

  /// Upserts exactly one entry inside the user's document without
  /// disturbing the others.
  async fn put_entry(&self, user_id: &str, item_id: &str, entry: &ProgressEntry) -> Result<()>;
}

/// Decodes one raw entry value into a canonical [`ProgressEntry`].
///
/// Rejects entries with missing fields, unparsable timestamps, or negative
/// watched seconds.
pub fn decode_entry(value: &serde_json::Value) -> Result<ProgressEntry> {
  let raw: RawProgressEntry = serde_json::from_value(value.clone())?;
  let last_activity_at = DateTime::parse_from_rfc3339(&raw.last_activity_at)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| RelearnError::InvalidTimestamp(format!("{:?}: {e}", raw.last_activity_at)))?;
  if raw.watched_seconds < 0.0 {
    return Err(RelearnError::MalformedEntry(format!(
      "negative watched_seconds: {}",
      raw.watched_seconds
    )));
  }
  Ok(ProgressEntry { watched_seconds: raw.watched_seconds, completed: raw.completed, last_activity_at })
}

/// Decodes a whole document, skipping malformed entries with a warning.
pub fn decode_document(document: &ProgressDocument) -> ProgressRecord {
  let mut record = ProgressRecord::new();
  for (item_id, value) in document {
    match decode_entry(value) {
      Ok(entry) => record.insert(item_id.clone(), entry),
      Err(err) => warn!(%item_id, %err, "skipping malformed progress entry"),
    }
  }
  record
}

/// Encodes a record into the flat wire layout with RFC 3339 timestamps.
pub fn encode_record(record: &ProgressRecord) -> ProgressDocument {
  record
    .iter()
    .map(|(item_id, entry)| {
      (item_id.clone(), serde_json::json!({
        "watched_seconds": entry.watched_seconds,
        "completed": entry.completed,
        "last_activity_at": entry.last_activity_at.to_rfc3339(),
      }))
    })
    .collect()
}

/// Local persistent storage for the anonymous guest record.
///
/// One serialized blob at a fixed well-known path. No failure escapes this
/// boundary: reads return `None` and writes report "not confirmed", each
/// with a logged diagnostic.
#[derive(Debug, Clone)]
pub struct GuestStore {
  /// Path of the guest blob
  path: PathBuf,
}

impl GuestStore {
  /// Creates a guest store over the given blob path.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// Returns the default path for the guest blob.
  ///
  /// - On Unix: `~/.local/share/relearn/guest_progress.json`
  /// - On macOS: `~/Library/Application Support/relearn/guest_progress.json`
  /// - On Windows: `%APPDATA%\relearn\guest_progress.json`
  /// - Fallback: `./guest_progress.json` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir()
      .unwrap_or_else(|| PathBuf::from("."))
      .join("relearn")
      .join("guest_progress.json")
  }

  /// Path of the blob this store reads and writes.
  pub fn path(&self) -> &Path { &self.path }

  /// Loads the guest record, or `None` when the blob is absent or the read
  /// failed. Individually malformed entries are skipped.
  pub fn load(&self) -> Option<ProgressRecord> {
    match self.try_load() {
      Ok(record) => record,
      Err(err) => {
        warn!(path = %self.path.display(), %err, "failed to load guest progress");
        None
      },
    }
  }

  /// Fallible load used by [`GuestStore::load`].
  fn try_load(&self) -> Result<Option<ProgressRecord>> {
    if !self.path.exists() {
      return Ok(None);
    }
    let text = std::fs::read_to_string(&self.path)?;
    let document: ProgressDocument = serde_json::from_str(&text)?;
    Ok(Some(decode_document(&document)))
  }

  /// Overwrites the blob with the full record. Returns whether the write
  /// was confirmed.
  pub fn save(&self, record: &ProgressRecord) -> bool {
    match self.try_save(record) {
      Ok(()) => true,
      Err(err) => {
        warn!(path = %self.path.display(), %err, "failed to save guest progress");
        false
      },
    }
  }

  /// Fallible save used by [`GuestStore::save`].
  fn try_save(&self, record: &ProgressRecord) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let document = encode_record(record);
    std::fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
    Ok(())
  }

  /// Removes the blob entirely. Returns whether the record is confirmed
  /// gone (an already-absent blob counts as cleared).
  pub fn clear(&self) -> bool {
    match std::fs::remove_file(&self.path) {
      Ok(()) => true,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
      Err(err) => {
        warn!(path = %self.path.display(), %err, "failed to clear guest progress");
        false
      },
    }
  }
}

/// Uniform access to the active progress record, guest or identified.
///
/// This is the adapter the session layer talks to; it hides which side the
/// record lives on and keeps all failure downgrading in one place.
#[derive(Debug)]
pub struct ProgressStore<S> {
  /// The external document store for identified records
  remote: S,
  /// Local persistent storage for the guest record
  guest:  GuestStore,
}

impl<S: DocumentStore> ProgressStore<S> {
  /// Creates the adapter over a remote backend and a guest store.
  pub fn new(remote: S, guest: GuestStore) -> Self { Self { remote, guest } }

  /// The underlying remote backend.
  pub fn remote(&self) -> &S { &self.remote }

  /// The underlying guest store.
  pub fn guest(&self) -> &GuestStore { &self.guest }

  /// Loads the guest record from local storage.
  pub fn load_guest(&self) -> Option<ProgressRecord> { self.guest.load() }

  /// Overwrites the guest record. Returns whether the write was confirmed.
  pub fn save_guest(&self, record: &ProgressRecord) -> bool { self.guest.save(record) }

  /// Removes the guest record. Returns whether it is confirmed gone.
  pub fn clear_guest(&self) -> bool { self.guest.clear() }

  /// Loads the identified user's record.
  ///
  /// A read failure is downgraded to `None` so that a transient store
  /// outage is treated as "no remote history" rather than aborting the
  /// calling flow.
  pub async fn load_remote(&self, user_id: &str) -> Option<ProgressRecord> {
    match self.remote.get(user_id).await {
      Ok(Some(document)) => Some(decode_document(&document)),
      Ok(None) => None,
      Err(err) => {
        warn!(user_id, %err, "remote progress read failed, treating as absent");
        None
      },
    }
  }

  /// Upserts one entry in the identified user's record. Returns whether
  /// the write was confirmed; failures are logged, never raised.
  pub async fn save_entry_remote(&self, user_id: &str, item_id: &str, entry: &ProgressEntry) -> bool {
    match self.remote.put_entry(user_id, item_id, entry).await {
      Ok(()) => true,
      Err(err) => {
        warn!(user_id, item_id, %err, "remote progress write failed");
        false
      },
    }
  }
}
