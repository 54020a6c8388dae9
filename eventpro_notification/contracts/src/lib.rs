/// Receives the outcome messages meant for the end user.
///
/// Notifications are transient: implementations dismiss them on their own
/// after a while and show multiple notifications at the same time.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationSink: Send + Sync + 'static {
    fn notify_success(&self, message: &str);

    fn notify_failure(&self, message: &str);
}

#[cfg(feature = "mock")]
impl MockNotificationSink {
    pub fn with_notify_success(mut self, message: &'static str) -> Self {
        self.expect_notify_success()
            .once()
            .with(mockall::predicate::eq(message))
            .return_const(());
        self
    }

    pub fn with_notify_failure(mut self, message: &'static str) -> Self {
        self.expect_notify_failure()
            .once()
            .with(mockall::predicate::eq(message))
            .return_const(());
        self
    }
}
