use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use eventpro_models::notification::{Toast, ToastId, ToastSeverity};
use eventpro_notification_contracts::NotificationSink;
use eventpro_utils::trace_instrument;
use tracing::debug;
use uuid::Uuid;

/// Stack of transient toasts.
///
/// Clones share the same stack. Toasts are kept in the order they were
/// raised and disappear once their display duration has elapsed.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    config: ToastQueueConfig,
    entries: Arc<Mutex<VecDeque<Entry>>>,
}

#[derive(Debug, Clone)]
pub struct ToastQueueConfig {
    pub duration: Duration,
}

#[derive(Debug)]
struct Entry {
    toast: Toast,
    shown_at: Instant,
}

impl ToastQueue {
    pub fn new(config: ToastQueueConfig) -> Self {
        Self {
            config,
            entries: Default::default(),
        }
    }

    pub fn push(&self, severity: ToastSeverity, message: impl Into<String>) -> ToastId {
        self.push_at(severity, message, Instant::now())
    }

    fn push_at(&self, severity: ToastSeverity, message: impl Into<String>, now: Instant) -> ToastId {
        let toast = Toast {
            id: Uuid::now_v7().into(),
            severity,
            message: message.into(),
            duration: self.config.duration,
        };
        let id = toast.id;

        debug!(?id, ?severity, text = %toast.message, "show toast");
        self.entries().push_back(Entry {
            toast,
            shown_at: now,
        });

        id
    }

    /// Returns the toasts that are still visible.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Instant::now())
    }

    /// Returns the toasts that are still visible at `now`, forgetting all
    /// that have expired.
    pub fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut entries = self.entries();
        entries.retain(|entry| now.saturating_duration_since(entry.shown_at) < entry.toast.duration);
        entries.iter().map(|entry| entry.toast.clone()).collect()
    }

    /// Removes the toast with the given id before it expires.
    ///
    /// Returns `false` if no such toast is visible.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut entries = self.entries();
        let len = entries.len();
        entries.retain(|entry| entry.toast.id != id);
        entries.len() != len
    }

    /// Removes and returns all pending toasts, regardless of their age.
    pub fn drain(&self) -> Vec<Toast> {
        self.entries().drain(..).map(|entry| entry.toast).collect()
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for ToastQueue {
    #[trace_instrument(skip(self))]
    fn notify_success(&self, message: &str) {
        self.push(ToastSeverity::Success, message);
    }

    #[trace_instrument(skip(self))]
    fn notify_failure(&self, message: &str) {
        self.push(ToastSeverity::Failure, message);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DURATION: Duration = Duration::from_secs(5);

    fn sut() -> ToastQueue {
        ToastQueue::new(ToastQueueConfig { duration: DURATION })
    }

    fn messages(toasts: &[Toast]) -> Vec<(ToastSeverity, &str)> {
        toasts
            .iter()
            .map(|toast| (toast.severity, toast.message.as_str()))
            .collect()
    }

    #[test]
    fn toasts_stack_in_order() {
        // Arrange
        let sut = sut();

        // Act
        sut.notify_success("first");
        sut.notify_failure("second");
        sut.notify_success("third");

        // Assert
        let active = sut.active();
        assert_eq!(
            messages(&active),
            [
                (ToastSeverity::Success, "first"),
                (ToastSeverity::Failure, "second"),
                (ToastSeverity::Success, "third"),
            ]
        );
        assert!(active.iter().all(|toast| toast.duration == DURATION));
    }

    #[test]
    fn toasts_expire() {
        // Arrange
        let sut = sut();
        let start = Instant::now();
        sut.push_at(ToastSeverity::Success, "old", start);
        sut.push_at(ToastSeverity::Failure, "new", start + Duration::from_secs(3));

        // Act
        let before = sut.active_at(start + Duration::from_secs(4));
        let after_first = sut.active_at(start + DURATION);
        let after_both = sut.active_at(start + Duration::from_secs(8));

        // Assert
        assert_eq!(messages(&before).len(), 2);
        assert_eq!(messages(&after_first), [(ToastSeverity::Failure, "new")]);
        assert!(after_both.is_empty());
    }

    #[test]
    fn toast_ids_are_v7() {
        // Arrange
        let sut = sut();

        // Act
        let first = sut.push(ToastSeverity::Success, "first");
        let second = sut.push(ToastSeverity::Success, "second");

        // Assert
        assert_eq!(first.get_version_num(), 7);
        assert_eq!(second.get_version_num(), 7);
        assert_ne!(first, second);
    }

    #[test]
    fn dismiss() {
        // Arrange
        let sut = sut();
        let id = sut.push(ToastSeverity::Success, "bye");
        sut.push(ToastSeverity::Success, "stay");

        // Act
        let dismissed = sut.dismiss(id);
        let dismissed_again = sut.dismiss(id);

        // Assert
        assert!(dismissed);
        assert!(!dismissed_again);
        assert_eq!(messages(&sut.active()), [(ToastSeverity::Success, "stay")]);
    }

    #[test]
    fn drain() {
        // Arrange
        let sut = sut();
        let clone = sut.clone();
        clone.notify_failure("oops");

        // Act
        let drained = sut.drain();

        // Assert
        assert_eq!(messages(&drained), [(ToastSeverity::Failure, "oops")]);
        assert!(sut.active().is_empty());
        assert!(clone.active().is_empty());
    }
}
