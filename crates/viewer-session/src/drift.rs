//! Background observers for a shared session.
//!
//! Two interval tasks run while a session is shown: one polls the surface
//! for location drift, the other advances the load progress indicator.
//! Both stop when the [`SessionObservers`] handle is dropped.

use crate::session::Session;
use html_viewer_core::ViewerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Handle to the running observer tasks.
#[derive(Debug)]
pub struct SessionObservers {
    tasks: Vec<JoinHandle<()>>,
}

impl SessionObservers {
    /// Spawns the drift poller and the progress ticker on the current
    /// runtime, at the cadences from `config`.
    #[must_use]
    pub fn spawn(session: &Arc<Mutex<Session>>, config: &ViewerConfig) -> Self {
        let drift = spawn_every(session.clone(), config.poll_interval, |session| {
            if session.poll_drift() {
                debug!(address = session.address(), "history updated from surface");
            }
        });
        let progress = spawn_every(session.clone(), config.progress_tick, |session| {
            session.progress_tick();
        });
        Self {
            tasks: vec![drift, progress],
        }
    }

    /// Stops the observers.
    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SessionObservers {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_every(
    session: Arc<Mutex<Session>>,
    period: Duration,
    mut step: impl FnMut(&mut Session) + Send + 'static,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            step(&mut *session.lock().await);
        }
    })
}
