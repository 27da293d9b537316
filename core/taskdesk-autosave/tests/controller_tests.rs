//! State machine tests for the save controller, driven with synthetic time.

use pretty_assertions::assert_eq;
use std::time::Duration;
use taskdesk_autosave::{Completion, SaveController, SlotPhase, WriteOutcome, WriteRequest};
use taskdesk_model::{DocMetaPatch, DocStatus};
use tokio::time::Instant;

const DEBOUNCE: Duration = Duration::from_millis(600);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn controller() -> (SaveController<&'static str>, Instant) {
    (SaveController::new(DEBOUNCE), Instant::now())
}

fn only(requests: Vec<WriteRequest<&'static str>>) -> WriteRequest<&'static str> {
    assert_eq!(requests.len(), 1, "expected exactly one write, got {requests:?}");
    requests.into_iter().next().unwrap()
}

// ── Debounce and coalescing ──────────────────────────────────────

#[test]
fn edits_within_quiet_period_coalesce_into_last_payload() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    c.submit("doc1", "v2", t0 + ms(100));

    assert!(c.poll_due(t0 + ms(650)).is_empty(), "deadline restarts on each edit");

    let write = only(c.poll_due(t0 + ms(700)));
    assert_eq!(write.entity_id, "doc1");
    assert_eq!(write.payload, "v2");
    assert_eq!(c.phase("doc1"), SlotPhase::Sending);
}

#[test]
fn patches_within_quiet_period_merge_fields() {
    let mut c = SaveController::new(DEBOUNCE);
    let t0 = Instant::now();
    c.submit(
        "doc7",
        DocMetaPatch {
            title: Some("Roadmap".into()),
            ..Default::default()
        },
        t0,
    );
    let seq = c.submit(
        "doc7",
        DocMetaPatch {
            status: Some(DocStatus::Published),
            ..Default::default()
        },
        t0 + ms(100),
    );

    let writes = c.poll_due(t0 + ms(100) + DEBOUNCE);
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].seq, seq);
    assert_eq!(
        writes[0].payload,
        DocMetaPatch {
            title: Some("Roadmap".into()),
            status: Some(DocStatus::Published),
            ..Default::default()
        }
    );
}

#[test]
fn many_submits_produce_one_write() {
    let (mut c, t0) = controller();
    for i in 0..20u64 {
        c.submit("doc1", if i == 19 { "last" } else { "draft" }, t0 + ms(i * 10));
    }

    let write = only(c.poll_due(t0 + ms(190) + DEBOUNCE));
    assert_eq!(write.payload, "last");
    assert!(c.poll_due(t0 + ms(5_000)).is_empty());
}

#[test]
fn next_deadline_tracks_latest_submit() {
    let (mut c, t0) = controller();
    assert_eq!(c.next_deadline(), None);

    c.submit("doc1", "a", t0);
    assert_eq!(c.next_deadline(), Some(t0 + DEBOUNCE));

    c.submit("doc1", "b", t0 + ms(200));
    assert_eq!(c.next_deadline(), Some(t0 + ms(200) + DEBOUNCE));
}

// ── One write in flight ──────────────────────────────────────────

#[test]
fn edits_during_a_write_wait_for_its_completion() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let first = only(c.poll_due(t0 + DEBOUNCE));

    c.submit("doc1", "v2", t0 + ms(700));
    c.submit("doc1", "v3", t0 + ms(710));
    assert_eq!(c.phase("doc1"), SlotPhase::SendingWithPending);
    assert!(
        c.poll_due(t0 + ms(5_000)).is_empty(),
        "no second write while one is in flight"
    );
    assert_eq!(c.next_deadline(), None);

    match c.complete("doc1", first.seq, WriteOutcome::Saved) {
        Completion::Saved { seq, next: Some(next), .. } => {
            assert_eq!(seq, first.seq);
            assert_eq!(next.payload, "v3");
        }
        other => panic!("expected a follow-up write, got {other:?}"),
    }
    assert_eq!(c.phase("doc1"), SlotPhase::Sending);
}

#[test]
fn completion_without_newer_edit_returns_to_idle() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));

    let done = c.complete("doc1", write.seq, WriteOutcome::Saved);
    assert_eq!(
        done,
        Completion::Saved {
            entity_id: "doc1".into(),
            seq: write.seq,
            next: None,
        }
    );
    assert_eq!(c.phase("doc1"), SlotPhase::Idle);
    assert!(!c.has_unsaved("doc1"));
    assert_eq!(c.active_entities(), 0);
}

#[test]
fn stale_completion_is_ignored() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));

    assert_eq!(c.complete("doc1", write.seq + 99, WriteOutcome::Saved), Completion::Ignored);
    assert_eq!(c.complete("nope", 1, WriteOutcome::Saved), Completion::Ignored);
    assert_eq!(c.phase("doc1"), SlotPhase::Sending);
}

// ── Failures ─────────────────────────────────────────────────────

#[test]
fn failure_is_reported_and_not_retried() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));

    match c.complete("doc1", write.seq, WriteOutcome::Failed("disk full".into())) {
        Completion::Failed { error, next, .. } => {
            assert_eq!(error, "disk full");
            assert!(next.is_none());
        }
        other => panic!("expected failure, got {other:?}"),
    }

    assert_eq!(c.phase("doc1"), SlotPhase::Failed);
    assert!(c.has_unsaved("doc1"));
    assert_eq!(c.slot("doc1").unwrap().last_error(), Some("disk full"));
    assert_eq!(c.slot("doc1").unwrap().latest().unwrap().payload, "v1");
    assert!(c.poll_due(t0 + ms(60_000)).is_empty(), "no automatic retry");
}

#[test]
fn manual_retry_resends_failed_content() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.complete("doc1", write.seq, WriteOutcome::Failed("offline".into()));

    let again = c.retry("doc1").unwrap();
    assert_eq!(again.payload, "v1");
    assert_eq!(again.seq, write.seq);
    assert!(c.retry("doc1").is_none(), "retry only acts on a failed slot");

    c.complete("doc1", again.seq, WriteOutcome::Saved);
    assert_eq!(c.phase("doc1"), SlotPhase::Idle);
}

#[test]
fn new_edit_after_failure_follows_normal_debounce() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.complete("doc1", write.seq, WriteOutcome::Failed("offline".into()));

    let t1 = t0 + ms(2_000);
    c.submit("doc1", "v2", t1);
    assert_eq!(c.phase("doc1"), SlotPhase::Pending);
    assert!(c.poll_due(t1 + ms(100)).is_empty());
    assert_eq!(only(c.poll_due(t1 + DEBOUNCE)).payload, "v2");
}

#[test]
fn failure_with_newer_edit_sends_the_newer_one() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.submit("doc1", "v2", t0 + ms(650));

    match c.complete("doc1", write.seq, WriteOutcome::Failed("timeout".into())) {
        Completion::Failed { next: Some(next), .. } => assert_eq!(next.payload, "v2"),
        other => panic!("expected the newer edit to follow, got {other:?}"),
    }
    assert_eq!(c.phase("doc1"), SlotPhase::Sending);
}

// ── Flush and cancel ─────────────────────────────────────────────

#[test]
fn flush_skips_the_quiet_period() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);

    let write = c.flush("doc1").unwrap();
    assert_eq!(write.payload, "v1");
    assert!(c.flush("doc1").is_none());
    assert!(c.flush("unknown").is_none());
    assert!(c.poll_due(t0 + DEBOUNCE).is_empty());
}

#[test]
fn cancel_discards_pending_edit() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);

    assert!(c.cancel("doc1"));
    assert!(c.poll_due(t0 + ms(10_000)).is_empty());
    assert_eq!(c.phase("doc1"), SlotPhase::Idle);
    assert!(!c.cancel("doc1"));
}

#[test]
fn completion_after_cancel_is_ignored() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.submit("doc1", "v2", t0 + ms(700));

    assert!(c.cancel("doc1"));
    assert_eq!(c.phase("doc1"), SlotPhase::Idle);
    assert_eq!(
        c.complete("doc1", write.seq, WriteOutcome::Failed("late".into())),
        Completion::Ignored
    );
    assert_eq!(c.active_entities(), 0);
}

#[test]
fn submit_after_cancel_still_waits_for_in_flight_write() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.cancel("doc1");

    let reopened = c.submit("doc1", "reopened", t0 + ms(800));
    assert_eq!(c.phase("doc1"), SlotPhase::Pending);
    assert!(c.poll_due(t0 + ms(5_000)).is_empty());

    assert_eq!(
        c.complete("doc1", write.seq, WriteOutcome::Saved),
        Completion::Ignored,
        "the write launched before the cancel belongs to the old owner"
    );
    let next = only(c.poll_due(t0 + ms(5_000)));
    assert_eq!(next.payload, "reopened");
    assert_eq!(next.seq, reopened);

    assert_eq!(
        c.complete("doc1", next.seq, WriteOutcome::Saved),
        Completion::Saved {
            entity_id: "doc1".into(),
            seq: reopened,
            next: None,
        }
    );
}

#[test]
fn failure_of_abandoned_write_does_not_mark_reopened_entity_failed() {
    let (mut c, t0) = controller();
    c.submit("doc1", "v1", t0);
    let write = only(c.poll_due(t0 + DEBOUNCE));
    c.cancel("doc1");
    c.submit("doc1", "reopened", t0 + ms(800));

    assert_eq!(
        c.complete("doc1", write.seq, WriteOutcome::Failed("late".into())),
        Completion::Ignored
    );
    assert_eq!(c.phase("doc1"), SlotPhase::Pending);
    assert_eq!(c.slot("doc1").unwrap().last_error(), None);
}

#[test]
fn cancel_all_reports_discarded_entities() {
    let (mut c, t0) = controller();
    c.submit("b", "x", t0);
    c.submit("a", "y", t0);
    c.submit("c", "z", t0);
    c.flush("c");

    assert_eq!(c.cancel_all(), vec!["a".to_string(), "b".to_string()]);
    assert!(c.poll_due(t0 + ms(10_000)).is_empty());
}

// ── Independence ─────────────────────────────────────────────────

#[test]
fn entities_are_independent() {
    let (mut c, t0) = controller();
    c.submit("doc1", "a1", t0);
    c.submit("doc2", "b1", t0 + ms(300));

    let first = only(c.poll_due(t0 + DEBOUNCE));
    assert_eq!(first.entity_id, "doc1");
    assert_eq!(c.phase("doc2"), SlotPhase::Pending);

    let second = only(c.poll_due(t0 + ms(900)));
    assert_eq!(second.entity_id, "doc2");

    c.complete("doc2", second.seq, WriteOutcome::Failed("nope".into()));
    assert_eq!(c.phase("doc1"), SlotPhase::Sending);
    assert_eq!(c.phase("doc2"), SlotPhase::Failed);
}

#[test]
fn due_writes_are_returned_in_submission_order() {
    let (mut c, t0) = controller();
    c.submit("z", "1", t0);
    c.submit("a", "2", t0 + ms(1));
    c.submit("m", "3", t0 + ms(2));

    let order: Vec<_> = c
        .poll_due(t0 + ms(700))
        .into_iter()
        .map(|w| w.entity_id)
        .collect();
    assert_eq!(order, vec!["z", "a", "m"]);
}
