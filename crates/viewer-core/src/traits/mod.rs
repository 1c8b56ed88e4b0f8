//! Collaborator traits for the viewer.
//!
//! These traits mark the seams between the preview subsystem and the world
//! around it: the storage behind the interception layer, the cross-context
//! pause channel, the navigating surface, and the dialogs the shell shows.
//!
//! # Module Structure
//!
//! - `snapshot` - Published snapshot storage trait
//! - `pause` - Pause/resume signal channel
//! - `surface` - Navigating surface driven by the session
//! - `prompt` - User confirmation dialogs

mod pause;
mod prompt;
mod snapshot;
mod surface;

pub use pause::{PAUSE_MESSAGE_TYPE, PauseChannel, PauseSignal};
pub use prompt::{HintResponse, Prompter, UnsavedChoice};
pub use snapshot::{CachedResource, SnapshotStorage};
pub use surface::Surface;
