//! Playback ticks and resume-target resolution per identity.

use relearn::resolve::NextReason;
use tracing_test::traced_test;

use super::*;

#[tokio::test]
#[traced_test]
async fn guest_ticks_accumulate_in_local_storage() -> TestResult<()> {
  let (session, _dir) = guest_session();
  session.record_tick("i1", 10.0, false).await;
  session.record_tick("i1", 25.0, false).await;

  let record = session.store().load_guest().unwrap();
  assert_eq!(record.len(), 1);
  assert_eq!(record.get("i1").unwrap().watched_seconds, 25.0);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn guest_completion_is_sticky_across_ticks() -> TestResult<()> {
  let (session, _dir) = guest_session();
  session.record_tick("i1", 290.0, true).await;
  // A later tick without the completion flag must not regress it.
  session.record_tick("i1", 12.0, false).await;

  let record = session.store().load_guest().unwrap();
  assert!(record.get("i1").unwrap().completed);
  assert_eq!(record.get("i1").unwrap().watched_seconds, 12.0);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn identified_ticks_write_through_to_remote() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  session.sign_in("user-1").await;
  assert!(session.record_tick("i4", 45.0, false).await);

  let remote = session.store().load_remote("user-1").await.unwrap();
  assert_eq!(remote.get("i4").unwrap().watched_seconds, 45.0);
  // Nothing leaks into guest storage once identified.
  assert!(session.store().load_guest().is_none());
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn resume_target_follows_most_recent_guest_activity() -> TestResult<()> {
  let catalog = fixture_catalog();
  let index = fixture_index(&catalog);
  let (session, _dir) = guest_session();

  session.record_tick("i1", 30.0, false).await;
  session.record_tick("i5", 75.0, false).await;

  let target = session.resume_target(&catalog, &index).await.unwrap();
  assert_eq!(target.item.id, "i5");
  assert_eq!(target.collection_id, "c3");
  assert_eq!(target.resume_seconds, 75.0);
  assert_eq!(target.reason, NextReason::ResumeInProgress);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn resume_target_absent_for_fresh_identified_user() -> TestResult<()> {
  let catalog = fixture_catalog();
  let index = fixture_index(&catalog);
  let (mut session, _dir) = guest_session();

  // No guest history, no remote document: nothing to resume.
  session.sign_in("user-9").await;
  assert!(session.resume_target(&catalog, &index).await.is_none());
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn resume_target_survives_sign_in() -> TestResult<()> {
  let catalog = fixture_catalog();
  let index = fixture_index(&catalog);
  let (mut session, _dir) = guest_session();

  session.record_tick("i6", 120.0, false).await;
  session.sign_in("user-1").await;

  let target = session.resume_target(&catalog, &index).await.unwrap();
  assert_eq!(target.item.id, "i6");
  assert_eq!(target.resume_seconds, 120.0);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn sign_out_returns_to_an_empty_guest_record() -> TestResult<()> {
  let catalog = fixture_catalog();
  let index = fixture_index(&catalog);
  let (mut session, _dir) = guest_session();

  session.record_tick("i2", 60.0, false).await;
  session.sign_in("user-1").await;
  session.sign_out();

  assert_eq!(session.identity(), &Identity::Guest);
  // The merged-and-cleared guest record does not reappear.
  assert!(session.store().load_guest().is_none());
  assert!(session.resume_target(&catalog, &index).await.is_none());
  Ok(())
}
