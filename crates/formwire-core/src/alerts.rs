//! Where user-facing alerts go.

use tracing::error;

/// Receives messages the end user must see, such as a broken dependency
/// declaration.
pub trait AlertSink {
    fn alert(&mut self, message: &str);
}

/// Sends alerts to the log at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn alert(&mut self, message: &str) {
        error!(alert = %message, "user alert");
    }
}

/// Keeps every alert in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordedAlerts {
    pub messages: Vec<String>,
}

impl RecordedAlerts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertSink for RecordedAlerts {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
