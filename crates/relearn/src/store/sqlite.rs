//! SQLite-backed [`DocumentStore`] implementation.
//!
//! The "remote" document store is an external service in production; this
//! backend gives the CLI and tests a real store with the same contract: a
//! flat per-user document and partial per-entry upserts. The schema is
//! initialized from `migrations/init.sql` when the store is opened.

use tokio_rusqlite::Connection;

use super::*;

/// Document store over a local SQLite database.
#[derive(Debug)]
pub struct SqliteStore {
  /// Async connection handle
  conn: Connection,
}

impl SqliteStore {
  /// Opens an existing database or creates a new one at the given path,
  /// initializing the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    if let Some(parent) = path.as_ref().parent() {
      std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path.as_ref().to_path_buf()).await?;

    // Initialize schema
    conn
      .call(|conn| {
        conn.execute_batch(include_str!(concat!(
          env!("CARGO_MANIFEST_DIR"),
          "/migrations/init.sql"
        )))?;
        Ok(())
      })
      .await?;

    Ok(Self { conn })
  }

  /// Returns the default path for the database file.
  ///
  /// - On Unix: `~/.local/share/relearn/relearn.db`
  /// - On macOS: `~/Library/Application Support/relearn/relearn.db`
  /// - On Windows: `%APPDATA%\relearn\relearn.db`
  /// - Fallback: `./relearn.db` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("relearn").join("relearn.db")
  }
}

#[async_trait::async_trait]
impl DocumentStore for SqliteStore {
  async fn get(&self, user_id: &str) -> Result<Option<ProgressDocument>> {
    let user_id = user_id.to_string();
    let document = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT item_id, watched_seconds, completed, last_activity_at
           FROM progress
           WHERE user_id = ?1",
        )?;
        let mut rows = stmt.query([&user_id])?;

        let mut document = ProgressDocument::new();
        while let Some(row) = rows.next()? {
          let item_id: String = row.get(0)?;
          let watched_seconds: f64 = row.get(1)?;
          let completed: bool = row.get(2)?;
          let last_activity_at: String = row.get(3)?;
          document.insert(item_id, serde_json::json!({
            "watched_seconds": watched_seconds,
            "completed": completed,
            "last_activity_at": last_activity_at,
          }));
        }
        Ok(document)
      })
      .await?;

    if document.is_empty() {
      Ok(None)
    } else {
      Ok(Some(document))
    }
  }

  async fn put_entry(&self, user_id: &str, item_id: &str, entry: &ProgressEntry) -> Result<()> {
    let user_id = user_id.to_string();
    let item_id = item_id.to_string();
    let watched_seconds = entry.watched_seconds;
    let completed = entry.completed;
    let last_activity_at = entry.last_activity_at.to_rfc3339();

    self
      .conn
      .call(move |conn| {
        // Completion stays sticky at the storage layer: an upsert carrying
        // completed=false never clears a stored completed=true.
        conn.execute(
          "INSERT INTO progress (user_id, item_id, watched_seconds, completed, last_activity_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (user_id, item_id) DO UPDATE SET
             watched_seconds  = excluded.watched_seconds,
             completed        = MAX(progress.completed, excluded.completed),
             last_activity_at = excluded.last_activity_at",
          rusqlite::params![user_id, item_id, watched_seconds, completed, last_activity_at],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
