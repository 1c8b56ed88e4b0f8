//! Broadcast pause channel.
//!
//! Relays session-side pause signals to every connected pause agent through
//! the control stream. Signals sent while nobody is subscribed are dropped.

use html_viewer_core::traits::{PauseChannel, PauseSignal};
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 16;

/// [`PauseChannel`] over a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastPauseChannel {
    tx: broadcast::Sender<PauseSignal>,
}

impl BroadcastPauseChannel {
    /// Creates a channel buffering up to `capacity` signals per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Number of connected subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastPauseChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PauseChannel for BroadcastPauseChannel {
    fn send(&self, paused: bool) {
        match self.tx.send(PauseSignal::new(paused)) {
            Ok(receivers) => debug!(paused, receivers, "pause signal sent"),
            Err(_) => debug!(paused, "pause signal dropped, no agents connected"),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<PauseSignal> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_reaches_every_subscriber() {
        let channel = BroadcastPauseChannel::default();
        let mut first = channel.subscribe();
        let mut second = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 2);

        channel.send(true);
        assert!(first.try_recv().unwrap().paused);
        assert!(second.try_recv().unwrap().paused);
    }

    #[test]
    fn test_send_without_subscribers_is_silent() {
        let channel = BroadcastPauseChannel::new(0);
        channel.send(false);

        let mut late = channel.subscribe();
        assert!(late.try_recv().is_err());
    }
}
