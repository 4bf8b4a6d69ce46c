//! Tests for CopyController

use super::*;
use crate::clipboard::{MemoryClipboard, WriteOutcome};
use crate::timer::{ManualTimer, TimerCallback, TimerHandle, TokioTimer};
use std::time::Duration;

type TestController = CopyController<Arc<MemoryClipboard>, Arc<ManualTimer>>;

struct Harness {
    clipboard: Arc<MemoryClipboard>,
    timer: Arc<ManualTimer>,
    controller: TestController,
}

fn harness(timeout_ms: u64) -> Harness {
    let clipboard = Arc::new(MemoryClipboard::new());
    let timer = Arc::new(ManualTimer::new());
    let controller = CopyController::new(
        Arc::clone(&clipboard),
        Arc::clone(&timer),
        CopyConfig::new(timeout_ms),
    );
    Harness {
        clipboard,
        timer,
        controller,
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[tokio::test]
async fn test_new_controller_is_idle() {
    let h = harness(100);

    assert!(!h.controller.copied());
    assert_eq!(h.controller.error(), None);
    assert!(h.controller.status().is_idle());
    assert!(!h.controller.has_pending_reset());
}

#[tokio::test]
async fn test_default_timeout_is_two_seconds() {
    let controller = CopyController::new(
        MemoryClipboard::new(),
        ManualTimer::new(),
        CopyConfig::default(),
    );
    assert_eq!(controller.config().timeout(), ms(2000));
}

#[tokio::test]
async fn test_success_sets_copied_then_resets_after_timeout() {
    let h = harness(100);

    h.controller.copy("x").await;

    assert!(h.controller.copied());
    assert_eq!(h.controller.error(), None);
    assert_eq!(h.clipboard.contents().as_deref(), Some("x"));
    assert!(h.controller.has_pending_reset());

    h.timer.advance(ms(99));
    assert!(h.controller.copied());

    h.timer.advance(ms(1));
    assert!(!h.controller.copied());
    assert_eq!(h.controller.error(), None);
    assert!(!h.controller.has_pending_reset());
}

#[tokio::test]
async fn test_failure_sets_error_and_schedules_nothing() {
    let h = harness(100);
    h.clipboard
        .set_outcome(WriteOutcome::Fail("permission denied".to_string()));

    h.controller.copy("x").await;

    assert_eq!(
        h.controller.error(),
        Some(CopyError::WriteFailed("permission denied".to_string()))
    );
    assert!(!h.controller.copied());
    assert_eq!(h.timer.scheduled(), 0);
    assert_eq!(h.clipboard.attempts(), vec!["x".to_string()]);
}

#[tokio::test]
async fn test_failure_after_success_leaves_copied_and_timer_alone() {
    let h = harness(100);

    h.controller.copy("first").await;
    h.timer.advance(ms(40));

    h.clipboard.set_outcome(WriteOutcome::Fail("busy".to_string()));
    h.controller.copy("second").await;

    // copied stays raised until the first write's own timer expires
    assert!(h.controller.copied());
    assert_eq!(
        h.controller.error(),
        Some(CopyError::WriteFailed("busy".to_string()))
    );
    assert_eq!(h.timer.scheduled(), 1);
    assert_eq!(h.timer.pending(), 1);

    h.timer.advance(ms(60));
    assert!(!h.controller.copied());
    assert_eq!(
        h.controller.error(),
        Some(CopyError::WriteFailed("busy".to_string()))
    );
}

#[tokio::test]
async fn test_unsupported_when_clipboard_unavailable() {
    let h = harness(100);
    h.clipboard.set_outcome(WriteOutcome::Unavailable);

    h.controller.copy("x").await;

    assert_eq!(h.controller.error(), Some(CopyError::Unsupported));
    assert!(!h.controller.copied());
    assert!(h.clipboard.attempts().is_empty());
    assert_eq!(h.timer.scheduled(), 0);
}

#[tokio::test]
async fn test_unsupported_after_success_keeps_copied_and_timer() {
    let h = harness(100);

    h.controller.copy("a").await;
    h.clipboard.set_outcome(WriteOutcome::Unavailable);
    h.controller.copy("b").await;

    assert!(h.controller.copied());
    assert_eq!(h.controller.error(), Some(CopyError::Unsupported));
    assert!(h.controller.has_pending_reset());
    assert_eq!(h.timer.scheduled(), 1);
    assert_eq!(h.clipboard.attempts(), vec!["a".to_string()]);

    // The first write's timer still clears copied on schedule
    h.timer.advance(ms(100));
    assert!(!h.controller.copied());
    assert_eq!(h.controller.error(), Some(CopyError::Unsupported));
}

#[tokio::test]
async fn test_repeated_unsupported_publishes_no_idle_status() {
    let h = harness(100);
    h.clipboard.set_outcome(WriteOutcome::Unavailable);
    let mut changes = h.controller.subscribe();

    h.controller.copy("x").await;
    assert_eq!(
        changes.borrow_and_update().error,
        Some(CopyError::Unsupported)
    );

    h.controller.copy("x").await;
    assert!(!changes.has_changed().unwrap());
}

#[tokio::test]
async fn test_failure_then_unsupported_switches_error_directly() {
    let h = harness(100);
    h.clipboard.set_outcome(WriteOutcome::Fail("denied".to_string()));
    h.controller.copy("x").await;

    let mut changes = h.controller.subscribe();
    h.clipboard.set_outcome(WriteOutcome::Unavailable);
    h.controller.copy("x").await;

    assert!(changes.has_changed().unwrap());
    assert_eq!(
        changes.borrow_and_update().error,
        Some(CopyError::Unsupported)
    );
}

#[tokio::test]
async fn test_second_copy_supersedes_first_timer() {
    let h = harness(100);

    h.controller.copy("a").await;
    h.timer.advance(ms(60));
    h.controller.copy("b").await;

    assert_eq!(h.timer.pending(), 1);

    // 120ms after the first copy: its timer would have fired by now
    h.timer.advance(ms(60));
    assert!(h.controller.copied());

    // 100ms after the second copy
    h.timer.advance(ms(40));
    assert!(!h.controller.copied());

    assert_eq!(h.timer.scheduled(), 2);
    assert_eq!(h.timer.fired(), 1);
    assert_eq!(h.clipboard.contents().as_deref(), Some("b"));
}

#[tokio::test]
async fn test_copied_falls_exactly_once_per_supersession() {
    let h = harness(100);
    let mut changes = h.controller.subscribe();

    h.controller.copy("a").await;
    h.timer.advance(ms(50));
    h.controller.copy("b").await;
    assert!(changes.borrow_and_update().copied);

    h.timer.advance(ms(50));
    assert!(!changes.has_changed().unwrap());

    h.timer.advance(ms(50));
    assert!(changes.has_changed().unwrap());
    assert!(!changes.borrow_and_update().copied);
}

#[tokio::test]
async fn test_reset_clears_state_and_cancels_timer() {
    let h = harness(100);
    h.controller.copy("x").await;

    h.controller.reset();

    assert!(h.controller.status().is_idle());
    assert!(!h.controller.has_pending_reset());
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_reset_clears_error() {
    let h = harness(100);
    h.clipboard.set_outcome(WriteOutcome::Unavailable);
    h.controller.copy("x").await;

    h.controller.reset();

    assert_eq!(h.controller.error(), None);
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let h = harness(100);

    h.controller.reset();
    h.controller.reset();
    assert!(h.controller.status().is_idle());

    h.controller.copy("x").await;
    h.controller.reset();
    h.controller.reset();

    assert_eq!(h.controller.status(), CopyStatus::default());
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_zero_timeout_resets_on_next_tick() {
    let h = harness(0);

    h.controller.copy("x").await;
    assert!(h.controller.copied());

    h.timer.advance(Duration::ZERO);
    assert!(!h.controller.copied());
}

#[tokio::test]
async fn test_new_attempt_clears_previous_error() {
    let h = harness(100);
    h.clipboard.set_outcome(WriteOutcome::Fail("denied".to_string()));
    h.controller.copy("x").await;
    assert!(h.controller.error().is_some());

    h.clipboard.set_outcome(WriteOutcome::Succeed);
    h.controller.copy("x").await;

    assert_eq!(h.controller.error(), None);
    assert!(h.controller.copied());
}

#[tokio::test]
async fn test_empty_text_is_copied() {
    let h = harness(100);

    h.controller.copy("").await;

    assert!(h.controller.copied());
    assert_eq!(h.clipboard.contents().as_deref(), Some(""));
}

#[tokio::test]
async fn test_last_write_to_complete_owns_the_timer() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let timer = Arc::new(ManualTimer::new());
    let controller = Arc::new(CopyController::new(
        Arc::clone(&clipboard),
        Arc::clone(&timer),
        CopyConfig::new(100),
    ));

    let gate = clipboard.hold_next_write();
    let slow = controller.spawn_copy("slow");
    while clipboard.attempts().is_empty() {
        tokio::task::yield_now().await;
    }

    controller.copy("fast").await;
    assert!(controller.copied());

    timer.advance(ms(50));
    gate.release();
    slow.await.unwrap();

    // "slow" finished last, so its timer replaced the one from "fast"
    assert_eq!(clipboard.contents().as_deref(), Some("slow"));
    assert_eq!(timer.pending(), 1);

    timer.advance(ms(60));
    assert!(controller.copied());

    timer.advance(ms(40));
    assert!(!controller.copied());
}

#[tokio::test]
async fn test_spawn_copy_runs_in_background() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let controller = Arc::new(CopyController::new(
        Arc::clone(&clipboard),
        ManualTimer::new(),
        CopyConfig::new(100),
    ));

    controller.spawn_copy("bg").await.unwrap();

    assert!(controller.copied());
    assert_eq!(clipboard.contents().as_deref(), Some("bg"));
}

#[tokio::test]
async fn test_drop_cancels_pending_timer() {
    let h = harness(100);
    h.controller.copy("x").await;
    assert_eq!(h.timer.pending(), 1);

    drop(h.controller);

    assert_eq!(h.timer.pending(), 0);
    h.timer.advance(ms(200));
    assert_eq!(h.timer.fired(), 0);
}

/// Timer that ignores cancellation, so stale callbacks can be fired by hand
#[derive(Default)]
struct LeakyTimer {
    callbacks: Mutex<Vec<TimerCallback>>,
    inner: ManualTimer,
}

impl LeakyTimer {
    fn fire_all(&self) {
        let callbacks: Vec<_> = self.callbacks.lock().unwrap().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl Timer for LeakyTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        self.callbacks.lock().unwrap().push(callback);
        self.inner.schedule(delay, Box::new(|| {}))
    }

    fn cancel(&self, _handle: TimerHandle) {}
}

#[tokio::test]
async fn test_stale_callback_does_not_clear_newer_copy() {
    let timer = Arc::new(LeakyTimer::default());
    let controller = CopyController::new(
        MemoryClipboard::new(),
        Arc::clone(&timer),
        CopyConfig::new(100),
    );

    controller.copy("a").await;
    let stale = timer.callbacks.lock().unwrap().remove(0);
    controller.copy("b").await;

    stale();
    assert!(controller.copied());

    timer.fire_all();
    assert!(!controller.copied());
}

#[tokio::test]
async fn test_callback_after_drop_is_harmless() {
    let timer = Arc::new(LeakyTimer::default());
    let controller = CopyController::new(
        MemoryClipboard::new(),
        Arc::clone(&timer),
        CopyConfig::new(100),
    );
    controller.copy("x").await;

    drop(controller);
    timer.fire_all();
}

#[tokio::test(start_paused = true)]
async fn test_tokio_timer_resets_after_timeout() {
    let controller = CopyController::new(
        MemoryClipboard::new(),
        TokioTimer::try_current().unwrap(),
        CopyConfig::new(100),
    );

    controller.copy("hello").await;
    assert!(controller.copied());

    tokio::time::sleep(ms(150)).await;
    assert!(!controller.copied());
    assert_eq!(controller.error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_timer_zero_timeout() {
    let controller = CopyController::new(
        MemoryClipboard::new(),
        TokioTimer::try_current().unwrap(),
        CopyConfig::new(0),
    );
    let mut changes = controller.subscribe();

    controller.copy("x").await;
    assert!(controller.copied());

    changes.wait_for(|status| !status.copied).await.unwrap();
    assert!(!controller.copied());
}

#[tokio::test]
async fn test_debug_output_names_controller() {
    let h = harness(100);
    let debug = format!("{:?}", h.controller);
    assert!(debug.contains("CopyController"));
    assert!(debug.contains("timeout_ms: 100"));
}
