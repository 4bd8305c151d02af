use shared_types::{Notification, Severity, DEFAULT_NOTIFICATION_MS};

/// Display time for upload and extraction failures
pub const LONG_NOTIFICATION_MS: u64 = 6000;

/// Fire-and-forget destination for operator messages
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64);

    fn success(&mut self, message: &str) {
        self.notify(message, Severity::Success, DEFAULT_NOTIFICATION_MS);
    }

    fn info(&mut self, message: &str) {
        self.notify(message, Severity::Info, DEFAULT_NOTIFICATION_MS);
    }

    fn warning(&mut self, message: &str) {
        self.notify(message, Severity::Warning, DEFAULT_NOTIFICATION_MS);
    }

    fn error(&mut self, message: &str) {
        self.notify(message, Severity::Error, DEFAULT_NOTIFICATION_MS);
    }
}

/// Buffers notifications so a command can return them with its response
#[derive(Debug, Default)]
pub struct CollectingSink {
    notifications: Vec<Notification>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.notifications.iter().map(|n| n.message.as_str()).collect()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64) {
        tracing::debug!(severity = ?severity, "{}", message);
        self.notifications
            .push(Notification::new(message, severity, duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order_and_drains() {
        let mut sink = CollectingSink::new();
        sink.warning("first");
        sink.notify("second", Severity::Error, LONG_NOTIFICATION_MS);

        assert_eq!(sink.messages(), vec!["first", "second"]);

        let drained = sink.drain();
        assert_eq!(drained[0].duration_ms, DEFAULT_NOTIFICATION_MS);
        assert_eq!(drained[1].severity, Severity::Error);
        assert_eq!(drained[1].duration_ms, LONG_NOTIFICATION_MS);
        assert!(sink.drain().is_empty());
    }
}
