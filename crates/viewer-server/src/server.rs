//! The preview server.
//!
//! Owns the application origin. The interception middleware wraps every
//! route; behind it live the control endpoints:
//!
//! - `GET {base}__viewer__/health`: liveness probe, returns `ok`
//! - `GET {base}__viewer__/pause`: server-sent events relaying pause signals
//!   to the agents in served documents

use crate::error::ApiError;
use crate::intercept::{InterceptState, intercept};
use crate::snapshot::MemorySnapshot;
use axum::Router;
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use html_viewer_core::traits::{PauseChannel, SnapshotStorage};
use html_viewer_core::{Error, Result, ViewerConfig};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// SSE event name the pause agent listens for.
pub const PAUSE_EVENT: &str = "pause";

#[derive(Clone)]
struct ControlState {
    pause: Arc<dyn PauseChannel>,
    keep_alive: Duration,
}

/// Builds the router: control endpoints behind the interception layer.
pub fn router(
    config: &ViewerConfig,
    snapshot: Arc<dyn SnapshotStorage>,
    pause: Arc<dyn PauseChannel>,
) -> Router {
    let control = config.control_prefix();
    let intercept_state = InterceptState::new(snapshot, config.virtual_prefix());
    let control_state = ControlState {
        pause,
        keep_alive: config.keep_alive,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&format!("{control}health"), get(health))
        .route(&format!("{control}pause"), get(pause_stream))
        .fallback(not_found)
        .with_state(control_state)
        .layer(from_fn_with_state(intercept_state, intercept))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> Response {
    ApiError::not_found().into_response()
}

async fn pause_stream(
    State(state): State<ControlState>,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<Event, Infallible>>> {
    let rx = state.pause.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|message| {
        message.ok().map(|signal| {
            Ok::<_, Infallible>(
                Event::default()
                    .event(PAUSE_EVENT)
                    .data(signal.to_message()),
            )
        })
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(state.keep_alive)
            .text("keep-alive"),
    )
}

/// A running preview server.
///
/// Dropping the server shuts it down.
#[derive(Debug)]
pub struct PreviewServer {
    addr: SocketAddr,
    base_path: String,
    snapshot: Arc<MemorySnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl PreviewServer {
    /// Binds the configured address and starts serving in the background.
    ///
    /// The snapshot is marked listening once the socket is bound.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` for an invalid configuration and
    /// `Error::Capability` if the socket cannot be bound.
    pub async fn start(
        config: &ViewerConfig,
        snapshot: Arc<MemorySnapshot>,
        pause: Arc<dyn PauseChannel>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|message| Error::ConfigError { message })?;

        let app = router(config, snapshot.clone(), pause);
        let listener = TcpListener::bind(config.socket_addr())
            .await
            .map_err(|e| Error::Capability {
                reason: format!("cannot bind {}: {e}", config.socket_addr()),
            })?;
        let addr = listener.local_addr().map_err(|e| Error::Capability {
            reason: format!("cannot read bound address: {e}"),
        })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let served = snapshot.clone();
        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            served.mark_stopped();
            if let Err(e) = result {
                warn!(error = %e, "preview server stopped with error");
            }
        });

        snapshot.mark_listening();
        info!(%addr, base = %config.base_path, "preview server listening");

        Ok(Self {
            addr,
            base_path: config.base_path.clone(),
            snapshot,
            shutdown: Some(shutdown_tx),
        })
    }

    /// The bound socket address.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Origin URL, e.g. `http://127.0.0.1:40123`.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Application base URL, e.g. `http://127.0.0.1:40123/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin(), self.base_path)
    }

    /// The snapshot this server answers from.
    #[must_use]
    pub const fn snapshot(&self) -> &Arc<MemorySnapshot> {
        &self.snapshot
    }

    /// Signals the server to stop accepting connections.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            self.snapshot.mark_stopped();
            if sender.send(()).is_err() {
                warn!("preview server already stopped");
            }
        }
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
