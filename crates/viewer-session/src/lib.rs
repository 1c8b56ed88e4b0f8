//! Preview session for the HTML bundle viewer.
//!
//! Ties the content store, the publisher and the navigating surface together
//! behind one explicit [`Session`] object:
//!
//! - [`session`] - the inactive / site / file-inspect state machine
//! - [`history`] - browser-style navigation history
//! - [`address`] - address bar grammar and bundle URL mapping
//! - [`fullscreen`] - hot-corner exit gesture
//! - [`editor`] - text buffer with the unsaved-edit check
//! - [`progress`] - indeterminate load progress
//! - [`drift`] - background drift poller and progress ticker
//!
//! # Examples
//!
//! ```no_run
//! use html_viewer_server::{BroadcastPauseChannel, MemorySnapshot, PreviewServer, Publisher};
//! use html_viewer_session::{AddressResolver, Session};
//! # use html_viewer_core::traits::{HintResponse, Prompter, Surface, UnsavedChoice};
//! # use async_trait::async_trait;
//! # struct Headless;
//! # impl Surface for Headless {
//! #     fn navigate(&self, _: &str) {}
//! #     fn current_location(&self) -> Option<String> { None }
//! #     fn blank(&self) {}
//! #     fn apply_user_agent(&self, _: &str) {}
//! # }
//! # #[async_trait]
//! # impl Prompter for Headless {
//! #     async fn unsaved_changes(&self, _: &str) -> UnsavedChoice { UnsavedChoice::Cancel }
//! #     async fn fullscreen_hint(&self) -> HintResponse { HintResponse::default() }
//! #     async fn confirm(&self, _: &str) -> bool { false }
//! # }
//! use html_viewer_core::ViewerConfig;
//! use html_viewer_vfs::UploadBatch;
//! use std::sync::Arc;
//! use url::Url;
//!
//! # async fn example() -> html_viewer_core::Result<()> {
//! let config = ViewerConfig::default();
//! let snapshot = Arc::new(MemorySnapshot::new());
//! let pause = Arc::new(BroadcastPauseChannel::default());
//! let server = PreviewServer::start(&config, snapshot.clone(), pause.clone()).await?;
//!
//! let vfs_base = Url::parse(&format!("{}{}", server.origin(), config.virtual_prefix()))
//!     .map_err(|e| html_viewer_core::Error::InvalidArgument(e.to_string()))?;
//! let mut session = Session::builder(
//!     Publisher::new(snapshot, config.virtual_prefix()),
//!     AddressResolver::new(vfs_base),
//!     Arc::new(Headless),
//!     pause,
//!     Arc::new(Headless),
//! )
//! .build();
//!
//! let batch = UploadBatch::new().add_file("index.html", "<h1>Hello</h1>");
//! session.upload(batch, false).await?;
//! session.navigate("").await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod address;
pub mod drift;
pub mod editor;
pub mod fullscreen;
pub mod history;
pub mod progress;
pub mod session;

pub use address::{AddressResolver, DEFAULT_ENTRY, Target};
pub use drift::SessionObservers;
pub use editor::TextBuffer;
pub use fullscreen::{CORNER_TAPS_TO_EXIT, Corner, FullscreenGesture};
pub use history::NavigationHistory;
pub use progress::LoadProgress;
pub use session::{
    Affordances, BLOCKED_EMBED_ADVISORY, InspectedFile, Mode, Outcome, RunButton, Session,
    SessionBuilder, looks_blocked,
};
