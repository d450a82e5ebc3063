//! SQLite document store: partial upserts, sticky completion, tolerance.

use relearn::{
  prelude::*,
  store::{ProgressStore, SqliteStore},
};
use tracing_test::traced_test;

use super::*;

async fn open_store(dir: &TempDir) -> SqliteStore {
  SqliteStore::open(dir.path().join("relearn.db")).await.unwrap()
}

#[tokio::test]
#[traced_test]
async fn absent_user_has_no_document() -> TestResult<()> {
  let dir = tempdir()?;
  let store = open_store(&dir).await;
  assert!(store.get("nobody").await?.is_none());
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn put_entry_is_a_partial_upsert() -> TestResult<()> {
  let dir = tempdir()?;
  let store = open_store(&dir).await;

  store.put_entry("u1", "i1", &entry(10.0, false, 1)).await?;
  store.put_entry("u1", "i2", &entry(20.0, false, 2)).await?;
  // Updating i1 must leave i2 untouched.
  store.put_entry("u1", "i1", &entry(99.0, false, 3)).await?;

  let document = store.get("u1").await?.unwrap();
  assert_eq!(document.len(), 2);
  let record = relearn::store::decode_document(&document);
  assert_eq!(record.get("i1").unwrap().watched_seconds, 99.0);
  assert_eq!(record.get("i2").unwrap().watched_seconds, 20.0);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn documents_are_isolated_per_user() -> TestResult<()> {
  let dir = tempdir()?;
  let store = open_store(&dir).await;

  store.put_entry("u1", "i1", &entry(10.0, false, 1)).await?;
  store.put_entry("u2", "i1", &entry(50.0, true, 2)).await?;

  let record = relearn::store::decode_document(&store.get("u1").await?.unwrap());
  assert_eq!(record.get("i1").unwrap().watched_seconds, 10.0);
  assert!(!record.get("i1").unwrap().completed);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn stored_completion_is_sticky() -> TestResult<()> {
  let dir = tempdir()?;
  let store = open_store(&dir).await;

  store.put_entry("u1", "i1", &entry(290.0, true, 1)).await?;
  store.put_entry("u1", "i1", &entry(15.0, false, 2)).await?;

  let record = relearn::store::decode_document(&store.get("u1").await?.unwrap());
  let stored = record.get("i1").unwrap();
  assert!(stored.completed);
  assert_eq!(stored.watched_seconds, 15.0);
  assert_eq!(stored.last_activity_at, at(2));
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn load_remote_skips_rows_with_bad_timestamps() -> TestResult<()> {
  let dir = tempdir()?;
  let db_path = dir.path().join("relearn.db");
  let store = SqliteStore::open(&db_path).await?;
  store.put_entry("u1", "good", &entry(10.0, false, 1)).await?;

  // Corrupt a row behind the store's back.
  let conn = rusqlite::Connection::open(&db_path)?;
  conn.execute(
    "INSERT INTO progress (user_id, item_id, watched_seconds, completed, last_activity_at)
     VALUES ('u1', 'bad', 5.0, 0, 'yesterday-ish')",
    [],
  )?;
  drop(conn);

  let adapter = ProgressStore::new(store, relearn::store::GuestStore::new(dir.path().join("g.json")));
  let record = adapter.load_remote("u1").await.unwrap();
  assert_eq!(record.len(), 1);
  assert!(record.get("good").is_some());
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn reopening_the_database_preserves_progress() -> TestResult<()> {
  let dir = tempdir()?;
  let db_path = dir.path().join("relearn.db");
  {
    let store = SqliteStore::open(&db_path).await?;
    store.put_entry("u1", "i1", &entry(42.0, true, 4)).await?;
  }
  let store = SqliteStore::open(&db_path).await?;
  let record = relearn::store::decode_document(&store.get("u1").await?.unwrap());
  assert!(record.get("i1").unwrap().completed);
  Ok(())
}
