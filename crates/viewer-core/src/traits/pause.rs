//! Pause channel trait.
//!
//! The controller side sends pause/resume signals; every served document's
//! pause agent subscribes. Delivery is fire-and-forget and at most once: there
//! is no acknowledgment and no retry.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Message type understood by the runtime pause agent.
///
/// Also the signature marker the interception layer looks for before
/// injecting the agent into a document.
pub const PAUSE_MESSAGE_TYPE: &str = "__html_viewer_pause__";

/// A pause or resume signal.
///
/// Travels as the JSON message the agent expects:
///
/// ```
/// use html_viewer_core::traits::PauseSignal;
///
/// let message = PauseSignal::new(true).to_message();
/// assert_eq!(message, r#"{"paused":true,"type":"__html_viewer_pause__"}"#);
/// assert_eq!(PauseSignal::from_message(&message), Some(PauseSignal::new(true)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseSignal {
    /// `true` to pause, `false` to resume
    pub paused: bool,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    paused: bool,
    #[serde(rename = "type")]
    kind: String,
}

impl PauseSignal {
    /// Creates a signal.
    #[must_use]
    pub const fn new(paused: bool) -> Self {
        Self { paused }
    }

    /// Encodes the signal as the agent's JSON message.
    #[must_use]
    pub fn to_message(self) -> String {
        let wire = WireMessage {
            paused: self.paused,
            kind: PAUSE_MESSAGE_TYPE.to_string(),
        };
        serde_json::to_string(&wire).unwrap_or_default()
    }

    /// Decodes an agent message, ignoring anything that is not a pause signal.
    #[must_use]
    pub fn from_message(message: &str) -> Option<Self> {
        serde_json::from_str::<WireMessage>(message)
            .ok()
            .filter(|wire| wire.kind == PAUSE_MESSAGE_TYPE)
            .map(|wire| Self::new(wire.paused))
    }
}

/// Cross-context channel between the session and served documents.
///
/// # Examples
///
/// ```
/// use html_viewer_core::traits::{PauseChannel, PauseSignal};
/// use tokio::sync::broadcast;
///
/// struct LocalChannel(broadcast::Sender<PauseSignal>);
///
/// impl PauseChannel for LocalChannel {
///     fn send(&self, paused: bool) {
///         // No receivers is not an error: the signal is simply lost.
///         let _ = self.0.send(PauseSignal::new(paused));
///     }
///
///     fn subscribe(&self) -> broadcast::Receiver<PauseSignal> {
///         self.0.subscribe()
///     }
/// }
///
/// let channel = LocalChannel(broadcast::channel(8).0);
/// let mut rx = channel.subscribe();
/// channel.send(true);
/// assert!(rx.try_recv().unwrap().paused);
/// ```
pub trait PauseChannel: Send + Sync {
    /// Sends a pause (`true`) or resume (`false`) signal.
    fn send(&self, paused: bool);

    /// Subscribes to signals sent after this call.
    fn subscribe(&self) -> broadcast::Receiver<PauseSignal>;
}
