//! Interception server for the HTML bundle viewer.
//!
//! Serves the published snapshot of a content store at a reserved virtual
//! prefix on a local origin, so that an uploaded bundle can be browsed as if
//! it were a hosted site.
//!
//! # Architecture
//!
//! - [`MemorySnapshot`]: keyed storage the interception layer reads
//! - [`intercept`]: the middleware answering virtual-prefix requests
//! - [`agent`]: runtime pause agent injected into served HTML
//! - [`Publisher`]: replaces the snapshot with the store before each preview
//! - [`BroadcastPauseChannel`]: relays pause signals to served documents
//! - [`PreviewServer`]: binds the origin and runs the router
//!
//! # Examples
//!
//! ```no_run
//! use html_viewer_core::ViewerConfig;
//! use html_viewer_server::{BroadcastPauseChannel, MemorySnapshot, PreviewServer, Publisher};
//! use html_viewer_vfs::ContentStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> html_viewer_core::Result<()> {
//! let config = ViewerConfig::default();
//! let snapshot = Arc::new(MemorySnapshot::new());
//! let server = PreviewServer::start(
//!     &config,
//!     snapshot.clone(),
//!     Arc::new(BroadcastPauseChannel::default()),
//! )
//! .await?;
//!
//! let mut store = ContentStore::new();
//! store.put("index.html", "<h1>hello</h1>", None);
//!
//! let publisher = Publisher::new(snapshot, config.virtual_prefix());
//! publisher.publish(&store).await?;
//! println!("open {}__vfs__/index.html", server.base_url());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod agent;
pub mod error;
pub mod intercept;
pub mod pause;
pub mod publish;
pub mod server;
pub mod snapshot;

pub use error::ApiError;
pub use intercept::InterceptState;
pub use pause::BroadcastPauseChannel;
pub use publish::{PublishReport, Publisher};
pub use server::{PAUSE_EVENT, PreviewServer, router};
pub use snapshot::MemorySnapshot;
