use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::info;

#[derive(Debug, Clone, Default)]
pub struct ServerMetrics {
    connections_accepted: Arc<AtomicU64>,
    messages_received: Arc<AtomicU64>,
    framing_errors: Arc<AtomicU64>,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_connection(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_message(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_framing_error(&self) {
        self.framing_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connections_accepted(&self) -> u64 {
        self.connections_accepted.load(Ordering::Relaxed)
    }

    pub fn messages_received(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    pub fn framing_errors(&self) -> u64 {
        self.framing_errors.load(Ordering::Relaxed)
    }

    pub fn log_summary(&self) {
        info!(
            "📊 Metrics: {} connections, {} messages, {} framing errors",
            self.connections_accepted(),
            self.messages_received(),
            self.framing_errors()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let metrics = ServerMetrics::new();
        let clone = metrics.clone();

        metrics.record_connection();
        clone.record_message();
        clone.record_message();

        assert_eq!(metrics.connections_accepted(), 1);
        assert_eq!(metrics.messages_received(), 2);
        assert_eq!(metrics.framing_errors(), 0);
    }
}
