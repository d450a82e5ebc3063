//! The guest → identified merge sequence end to end.

use relearn::{prelude::*, session::MergeOutcome, store::decode_document};
use tracing_test::traced_test;

use super::*;

#[tokio::test]
#[traced_test]
async fn sign_in_moves_guest_history_to_remote() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  session.record_tick("i1", 30.0, false).await;
  session.record_tick("i2", 300.0, true).await;

  let outcome = session.sign_in("user-1").await;
  assert_eq!(outcome, MergeOutcome::Merged { written: 2, guest_cleared: true });
  assert_eq!(session.identity(), &Identity::User("user-1".to_string()));

  // Guest blob is gone; remote now holds both entries.
  assert!(session.store().load_guest().is_none());
  let remote = session.store().load_remote("user-1").await.unwrap();
  assert_eq!(remote.len(), 2);
  assert!(remote.get("i2").unwrap().completed);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn sign_in_without_guest_data_is_a_noop_merge() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  assert_eq!(session.sign_in("user-1").await, MergeOutcome::NoGuestData);
  assert_eq!(session.identity(), &Identity::User("user-1".to_string()));
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn second_sign_in_does_not_reapply_guest_data() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  session.record_tick("i1", 30.0, false).await;

  assert!(matches!(session.sign_in("user-1").await, MergeOutcome::Merged { .. }));
  // The cleared guest record makes a later sign-in a no-op merge.
  assert_eq!(session.sign_in("user-1").await, MergeOutcome::NoGuestData);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn guest_completion_survives_newer_incomplete_remote() -> TestResult<()> {
  let (mut session, _dir) = guest_session();

  // Remote already has a recent, incomplete entry for i1.
  session.store().remote().put_entry("user-1", "i1", &entry(50.0, false, 9)).await?;
  // The guest finished the item earlier.
  session.record_tick("i1", 290.0, true).await;

  session.sign_in("user-1").await;
  let remote = session.store().load_remote("user-1").await.unwrap();
  assert!(remote.get("i1").unwrap().completed);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn unchanged_entries_are_not_rewritten() -> TestResult<()> {
  let (mut session, _dir) = guest_session();

  // Remote is completed; the stale incomplete guest entry loses, so no key
  // changes and nothing is written.
  session.store().remote().put_entry("user-1", "i1", &entry(300.0, true, 9)).await?;
  session.record_tick("i1", 10.0, false).await;

  let outcome = session.sign_in("user-1").await;
  assert_eq!(outcome, MergeOutcome::Merged { written: 0, guest_cleared: true });
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn failed_remote_write_keeps_guest_record_for_retry() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  session.record_tick("i1", 30.0, false).await;

  session.store().remote().set_fail_writes(true);
  let outcome = session.sign_in("user-1").await;
  assert_eq!(outcome, MergeOutcome::Merged { written: 0, guest_cleared: false });
  assert!(session.store().load_guest().is_some(), "guest record must survive a failed write");

  // The next sign-in re-attempts the merge once the store recovers.
  session.store().remote().set_fail_writes(false);
  let outcome = session.sign_in("user-1").await;
  assert_eq!(outcome, MergeOutcome::Merged { written: 1, guest_cleared: true });

  let document = session.store().remote().document("user-1").unwrap();
  assert_eq!(decode_document(&document).len(), 1);
  Ok(())
}

#[tokio::test]
#[traced_test]
async fn sign_in_with_absent_remote_carries_guest_over() -> TestResult<()> {
  let (mut session, _dir) = guest_session();
  session.record_tick("i3", 75.0, false).await;

  let outcome = session.sign_in("user-2").await;
  assert_eq!(outcome, MergeOutcome::Merged { written: 1, guest_cleared: true });
  assert!(session.store().load_remote("user-2").await.unwrap().get("i3").is_some());
  Ok(())
}
