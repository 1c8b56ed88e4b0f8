//! The preview session.
//!
//! One [`Session`] owns the content store, the preview state machine and the
//! navigation history, and drives its collaborators: the publisher in front
//! of the interception layer, the navigating surface, the pause channel and
//! the user dialogs.
//!
//! Modes:
//!
//! ```text
//!             navigate / run                  inspect
//!  Inactive ─────────────────► Site ◄──────────────────► FileInspect
//!     ▲                          │    navigate / run          │
//!     └───────── stop ───────────┴────────── stop ────────────┘
//! ```
//!
//! A failed action leaves the session exactly as it was. Every bundle
//! navigation publishes the store first and only then asks the surface to
//! load, so the load never races a half-written snapshot.

use crate::address::{AddressResolver, Target};
use crate::editor::TextBuffer;
use crate::fullscreen::{Corner, FullscreenGesture};
use crate::history::NavigationHistory;
use crate::progress::LoadProgress;
use bytes::Bytes;
use html_viewer_core::traits::{PauseChannel, Prompter, Surface, UnsavedChoice};
use html_viewer_core::{Error, Preferences, Result};
use html_viewer_server::Publisher;
use html_viewer_vfs::media::{PreviewKind, guess_media_type};
use html_viewer_vfs::{
    ArchiveIngestor, ContentStore, EntryPath, IngestOptions, IngestReport, ListedEntry,
    UploadBatch, ZipIngestor,
};
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};
use url::Url;

/// Banner shown when an external site seems to refuse being embedded.
pub const BLOCKED_EMBED_ADVISORY: &str = "This site may refuse to be embedded (X-Frame-Options / CSP). Open it in a browser tab instead.";

static BLOCKED_LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(chrome-error://|about:blank$|data:text/html,chromewebdata)")
        .expect("valid regex")
});

/// Link schemes that never navigate the surface.
const INERT_LINK_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:"];

/// Preview state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Nothing is being previewed
    #[default]
    Inactive,
    /// A site is loaded in the surface
    Site,
    /// A single file is shown by a built-in renderer
    FileInspect,
}

/// How a user action ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action took effect
    Completed,
    /// The user backed out at a prompt; nothing changed
    Cancelled,
}

/// What the combined run/pause control currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunButton {
    /// Starts a site preview
    Run,
    /// Pauses the running site
    Pause,
    /// Resumes the paused site
    Resume,
}

/// Controls the shell should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// Run/pause control state
    pub run_button: RunButton,
    /// Stop is available
    pub stop: bool,
    /// Fullscreen toggle is available
    pub fullscreen: bool,
    /// Back is enabled
    pub back: bool,
    /// Forward is enabled
    pub forward: bool,
}

/// The file shown in inspect mode.
#[derive(Debug, Clone)]
pub struct InspectedFile {
    /// Store path
    pub path: EntryPath,
    /// Renderer in use
    pub kind: PreviewKind,
    /// Media type the file is rendered with
    pub media_type: String,
    /// Stored bytes
    pub content: Bytes,
    /// Text buffer, for text files
    pub text: Option<TextBuffer>,
}

impl InspectedFile {
    /// Returns `true` if the text buffer holds unsaved edits.
    #[must_use]
    pub fn has_unsaved_edits(&self) -> bool {
        self.text.as_ref().is_some_and(TextBuffer::is_dirty)
    }
}

#[derive(Debug, Clone, Copy)]
enum HistoryUpdate {
    Push,
    Replace,
    Keep,
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    publisher: Publisher,
    resolver: AddressResolver,
    surface: Arc<dyn Surface>,
    pause: Arc<dyn PauseChannel>,
    prompter: Arc<dyn Prompter>,
    ingestor: Arc<dyn ArchiveIngestor>,
    preferences: Preferences,
    preferences_path: Option<PathBuf>,
}

impl std::fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("publisher", &self.publisher)
            .field("resolver", &self.resolver)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl SessionBuilder {
    /// Starts a builder with the required collaborators. Archives are
    /// expanded with [`ZipIngestor`] unless another ingestor is set.
    #[must_use]
    pub fn new(
        publisher: Publisher,
        resolver: AddressResolver,
        surface: Arc<dyn Surface>,
        pause: Arc<dyn PauseChannel>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            publisher,
            resolver,
            surface,
            pause,
            prompter,
            ingestor: Arc::new(ZipIngestor),
            preferences: Preferences::default(),
            preferences_path: None,
        }
    }

    /// Sets the archive ingestor.
    #[must_use]
    pub fn ingestor(mut self, ingestor: Arc<dyn ArchiveIngestor>) -> Self {
        self.ingestor = ingestor;
        self
    }

    /// Sets the loaded preferences.
    #[must_use]
    pub fn preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Where preference changes made by the session are saved.
    #[must_use]
    pub fn preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// Builds an inactive session over an empty store.
    #[must_use]
    pub fn build(self) -> Session {
        Session {
            store: ContentStore::new(),
            publisher: self.publisher,
            resolver: self.resolver,
            surface: self.surface,
            pause: self.pause,
            prompter: self.prompter,
            ingestor: self.ingestor,
            preferences: self.preferences,
            preferences_path: self.preferences_path,
            mode: Mode::Inactive,
            target: None,
            paused: false,
            fullscreen: FullscreenGesture::default(),
            history: NavigationHistory::new(),
            progress: LoadProgress::default(),
            inspected: None,
            advisory: None,
            address: String::new(),
            last_known: None,
            from_history: false,
        }
    }
}

/// The preview session.
pub struct Session {
    store: ContentStore,
    publisher: Publisher,
    resolver: AddressResolver,
    surface: Arc<dyn Surface>,
    pause: Arc<dyn PauseChannel>,
    prompter: Arc<dyn Prompter>,
    ingestor: Arc<dyn ArchiveIngestor>,
    preferences: Preferences,
    preferences_path: Option<PathBuf>,

    mode: Mode,
    target: Option<Target>,
    paused: bool,
    fullscreen: FullscreenGesture,
    history: NavigationHistory,
    progress: LoadProgress,
    inspected: Option<InspectedFile>,
    advisory: Option<&'static str>,
    address: String,
    // Last location the surface was seen at.
    last_known: Option<String>,
    // The pending load came from back/forward and must not be pushed.
    from_history: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("paused", &self.paused)
            .field("fullscreen", &self.fullscreen.is_active())
            .field("history", &self.history)
            .field("files", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Starts building a session.
    #[must_use]
    pub fn builder(
        publisher: Publisher,
        resolver: AddressResolver,
        surface: Arc<dyn Surface>,
        pause: Arc<dyn PauseChannel>,
        prompter: Arc<dyn Prompter>,
    ) -> SessionBuilder {
        SessionBuilder::new(publisher, resolver, surface, pause, prompter)
    }

    /// Adds an upload batch to the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Ingest` if the batch was an archive that cannot be
    /// read; the store is unchanged.
    pub async fn upload(
        &mut self,
        batch: UploadBatch,
        flatten_single_root: bool,
    ) -> Result<IngestReport> {
        let options = IngestOptions {
            flatten_single_root,
        };
        let report = self
            .store
            .ingest_batch(batch, options, &*self.ingestor)
            .await?;
        Ok(report)
    }

    /// Stored files in display order.
    #[must_use]
    pub fn list(&self) -> Vec<ListedEntry> {
        self.store.list()
    }

    /// Packs the whole store as a zip archive.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the store is empty.
    pub fn export_all(&self) -> Result<Vec<u8>> {
        Ok(self.store.export_archive()?)
    }

    /// Empties the store and the published snapshot and stops any preview.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the snapshot cannot be emptied.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.store.clear();
        self.reset();
        self.publisher.clear().await?;
        Ok(())
    }

    /// Resolves `raw` as typed into the address bar and loads it.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for a bundle path that is not stored and
    /// `Error::Capability` or `Error::Storage` if publishing fails. Nothing
    /// changes on error.
    pub async fn navigate(&mut self, raw: &str) -> Result<Outcome> {
        self.navigate_with(raw, HistoryUpdate::Push).await
    }

    /// Like [`navigate`](Self::navigate), but overwrites the current history
    /// entry instead of adding one.
    ///
    /// # Errors
    ///
    /// Same as [`navigate`](Self::navigate).
    pub async fn navigate_replacing(&mut self, raw: &str) -> Result<Outcome> {
        self.navigate_with(raw, HistoryUpdate::Replace).await
    }

    async fn navigate_with(&mut self, raw: &str, update: HistoryUpdate) -> Result<Outcome> {
        let target = self.resolver.parse(raw, |path| self.store.contains(path));
        if let Target::Bundle(path) = &target
            && !self.store.contains(path.as_str())
        {
            warn!(path = %path, "navigation target is not in the bundle");
            return Err(Error::NotFound {
                path: path.to_string(),
            });
        }

        if !self.resolve_unsaved("run the site preview").await? {
            return Ok(Outcome::Cancelled);
        }

        if let Target::Bundle(_) = &target {
            self.publisher.publish(&self.store).await?;
        }
        self.enter_site(target, update);
        Ok(Outcome::Completed)
    }

    /// The run/pause control: toggles pause on a running site, otherwise
    /// starts a preview of the address bar contents.
    ///
    /// # Errors
    ///
    /// Same as [`navigate`](Self::navigate) when a preview is started.
    pub async fn run(&mut self) -> Result<Outcome> {
        if self.mode == Mode::Site {
            self.set_paused(!self.paused);
            return Ok(Outcome::Completed);
        }
        let address = self.address.clone();
        self.navigate(&address).await
    }

    /// Pauses or resumes the running site. Returns `false` (and does
    /// nothing) outside site mode.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.mode != Mode::Site {
            debug!(paused, mode = ?self.mode, "pause ignored outside site preview");
            return false;
        }
        self.paused = paused;
        self.pause.send(paused);
        info!(paused, "site preview pause toggled");
        true
    }

    /// Steps back in history. Returns `false` if there is nowhere to go.
    ///
    /// # Errors
    ///
    /// Returns an error if republishing for a bundle location fails; the
    /// history cursor does not move then.
    pub async fn go_back(&mut self) -> Result<bool> {
        if self.mode != Mode::Site || !self.history.can_go_back() {
            return Ok(false);
        }
        let Some(index) = self.history.index() else {
            return Ok(false);
        };
        let location = self.history.entries()[index - 1].clone();
        self.prepare_revisit(&location).await?;
        self.history.go_back();
        self.revisit(&location);
        Ok(true)
    }

    /// Steps forward in history. Returns `false` if there is nowhere to go.
    ///
    /// # Errors
    ///
    /// Same as [`go_back`](Self::go_back).
    pub async fn go_forward(&mut self) -> Result<bool> {
        if self.mode != Mode::Site || !self.history.can_go_forward() {
            return Ok(false);
        }
        let Some(index) = self.history.index() else {
            return Ok(false);
        };
        let location = self.history.entries()[index + 1].clone();
        self.prepare_revisit(&location).await?;
        self.history.go_forward();
        self.revisit(&location);
        Ok(true)
    }

    /// Follows a link clicked in the loaded document.
    ///
    /// `href` is resolved against the current location. Fragment-only,
    /// `javascript:`, `mailto:`, `tel:` and blank links are ignored, as is
    /// anything that does not resolve to an `http(s)` URL. Returns `true`
    /// if the surface navigated.
    ///
    /// # Errors
    ///
    /// Returns an error if republishing for a bundle location fails.
    pub async fn follow_link(&mut self, href: &str) -> Result<bool> {
        let href = href.trim();
        if self.mode != Mode::Site
            || href.is_empty()
            || INERT_LINK_PREFIXES.iter().any(|p| href.starts_with(p))
        {
            return Ok(false);
        }

        let Some(base) = self
            .last_known
            .as_deref()
            .or_else(|| self.history.current())
            .and_then(|base| Url::parse(base).ok())
        else {
            return Ok(false);
        };
        let Ok(next) = base.join(href) else {
            debug!(href, "unresolvable link ignored");
            return Ok(false);
        };
        if !matches!(next.scheme(), "http" | "https") {
            return Ok(false);
        }

        let location = next.to_string();
        self.prepare_revisit(&location).await?;
        self.target = self.target_for(&location);
        self.advisory = None;
        self.load(&location, HistoryUpdate::Push);
        Ok(true)
    }

    /// Reacts to the surface finishing a load.
    pub fn on_surface_loaded(&mut self) {
        if let Some(user_agent) = self.preferences.custom_user_agent() {
            self.surface.apply_user_agent(user_agent);
        }
        self.progress.complete();
        let from_history = std::mem::take(&mut self.from_history);

        if self.mode != Mode::Site {
            return;
        }
        let Some(observed) = self.observed_location() else {
            return;
        };

        if looks_blocked(&observed) {
            let external = self.target.as_ref().is_some_and(Target::is_external);
            if external {
                warn!(location = %observed, "external site looks blocked from embedding");
            }
            self.advisory = external.then_some(BLOCKED_EMBED_ADVISORY);
        } else {
            self.advisory = None;
            self.adopt(&observed, !from_history);
        }

        if self.paused {
            self.pause.send(true);
        }
    }

    /// Checks whether the surface moved on its own (in-page navigation) and
    /// records the new location. Returns `true` on drift.
    pub fn poll_drift(&mut self) -> bool {
        if self.mode != Mode::Site {
            return false;
        }
        let Some(observed) = self.observed_location() else {
            return false;
        };
        if looks_blocked(&observed) || self.last_known.as_deref() == Some(observed.as_str()) {
            return false;
        }

        debug!(location = %observed, "surface location drifted");
        self.adopt(&observed, true);
        true
    }

    /// Advances the load progress indicator.
    pub fn progress_tick(&mut self) -> bool {
        self.progress.tick()
    }

    /// Shows a single stored file with its built-in renderer.
    ///
    /// Leaving a running site preview asks for confirmation first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the path is not stored and
    /// `Error::UnsupportedKind` if no renderer applies. Nothing changes on
    /// error.
    pub async fn inspect(&mut self, path: &str) -> Result<Outcome> {
        let key = EntryPath::new(path);
        if self.mode == Mode::FileInspect
            && self.inspected.as_ref().is_some_and(|f| f.path == key)
        {
            return Ok(Outcome::Completed);
        }

        let entry = self.store.require(key.as_str())?;
        let Some(kind) = entry.preview_kind() else {
            warn!(path = %key, "no preview renderer for file");
            return Err(Error::UnsupportedKind {
                path: key.into_inner(),
            });
        };
        let content = entry.content().clone();
        let media_type = entry.media_type().to_string();

        if self.mode == Mode::Site {
            let message = format!(
                "A site preview is running. Inspecting {key} will stop it. Continue?"
            );
            if !self.prompter.confirm(&message).await {
                return Ok(Outcome::Cancelled);
            }
            self.leave_site();
        } else if !self.resolve_unsaved("switch files").await? {
            return Ok(Outcome::Cancelled);
        }

        let text = (kind == PreviewKind::Text)
            .then(|| TextBuffer::new(String::from_utf8_lossy(&content).into_owned()));
        info!(path = %key, kind = kind.as_str(), "inspecting file");
        self.inspected = Some(InspectedFile {
            path: key,
            kind,
            media_type,
            content,
            text,
        });
        self.mode = Mode::FileInspect;
        Ok(Outcome::Completed)
    }

    /// Switches the inspected text file to editing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` unless a text file is inspected.
    pub fn begin_edit(&mut self) -> Result<()> {
        self.text_buffer()?.begin_edit();
        Ok(())
    }

    /// Replaces the text being edited.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` unless a text file is inspected.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.text_buffer()?.set_text(text);
        Ok(())
    }

    /// Drops unsaved edits and leaves editing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` unless a text file is inspected.
    pub fn cancel_edit(&mut self) -> Result<()> {
        self.text_buffer()?.cancel_edit();
        Ok(())
    }

    /// Writes the edited text back to the store. The media type is
    /// re-inferred from the extension; editing stays open.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` unless a text file is inspected.
    pub fn save_text(&mut self) -> Result<()> {
        let file = self.inspected.as_mut().ok_or_else(no_text_file)?;
        let buffer = file.text.as_mut().ok_or_else(no_text_file)?;
        let content = Bytes::from(buffer.commit().to_string());
        let media_type = guess_media_type(&file.path);

        self.store
            .put(file.path.as_str(), content.clone(), Some(media_type));
        file.content = content;
        file.media_type = media_type.to_string();
        info!(path = %file.path, "saved text file");
        Ok(())
    }

    /// Base name and stored bytes of the inspected file.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` when no file is inspected.
    pub fn download_current(&self) -> Result<(String, Bytes)> {
        let file = self
            .inspected
            .as_ref()
            .ok_or_else(|| Error::InvalidArgument("no file is being inspected".to_string()))?;
        let entry = self.store.require(file.path.as_str())?;
        Ok((file.path.file_name().to_string(), entry.content().clone()))
    }

    /// Stops whatever is being previewed.
    ///
    /// # Errors
    ///
    /// Returns an error only if saving pending edits was chosen and failed.
    pub async fn stop(&mut self) -> Result<Outcome> {
        if !self.resolve_unsaved("stop the preview").await? {
            return Ok(Outcome::Cancelled);
        }
        self.reset();
        Ok(Outcome::Completed)
    }

    /// Enters or leaves fullscreen. Returns the new fullscreen state.
    ///
    /// Entering shows the exit-gesture hint unless the user dismissed it for
    /// good; declining the hint leaves fullscreen off.
    pub async fn toggle_fullscreen(&mut self) -> bool {
        if self.mode == Mode::Inactive {
            return false;
        }
        if self.fullscreen.is_active() {
            self.fullscreen.exit();
            info!("left fullscreen");
            return false;
        }

        if !self.preferences.hide_fullscreen_hint {
            let response = self.prompter.fullscreen_hint().await;
            if response.dont_remind {
                self.dismiss_fullscreen_hint();
            }
            if !response.confirmed {
                return false;
            }
        }

        self.fullscreen.enter();
        info!("entered fullscreen");
        true
    }

    /// Registers a hot-corner tap. Returns `true` if it ended fullscreen.
    pub fn tap_corner(&mut self, corner: Corner) -> bool {
        if !self.fullscreen.tap_corner(corner) {
            return false;
        }
        self.fullscreen.exit();
        info!("left fullscreen by corner gesture");
        true
    }

    /// Replaces the address bar text without navigating.
    pub fn set_address(&mut self, text: impl Into<String>) {
        self.address = text.into();
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current site target.
    #[must_use]
    pub const fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Returns `true` while the site is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns `true` while fullscreen.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    /// The navigation history.
    #[must_use]
    pub const fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// The load progress indicator.
    #[must_use]
    pub const fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    /// The inspected file, in file mode.
    #[must_use]
    pub const fn inspected(&self) -> Option<&InspectedFile> {
        self.inspected.as_ref()
    }

    /// The embedding advisory, if one is showing.
    #[must_use]
    pub const fn advisory(&self) -> Option<&'static str> {
        self.advisory
    }

    /// Address bar text.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The content store.
    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Preferences in effect.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The address resolver.
    #[must_use]
    pub const fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Controls the shell should offer right now.
    #[must_use]
    pub fn affordances(&self) -> Affordances {
        let site = self.mode == Mode::Site;
        let run_button = match (site, self.paused) {
            (true, false) => RunButton::Pause,
            (true, true) => RunButton::Resume,
            (false, _) => RunButton::Run,
        };
        Affordances {
            run_button,
            stop: self.mode != Mode::Inactive,
            fullscreen: self.mode != Mode::Inactive,
            back: site && self.history.can_go_back(),
            forward: site && self.history.can_go_forward(),
        }
    }

    /// Runs the unsaved-edit guard. Returns `false` if the user cancelled.
    async fn resolve_unsaved(&mut self, action: &str) -> Result<bool> {
        let Some(file) = self
            .inspected
            .as_ref()
            .filter(|f| self.mode == Mode::FileInspect && f.has_unsaved_edits())
        else {
            return Ok(true);
        };

        let message = format!("{} has unsaved changes. Save them before you {action}?", file.path);
        match self.prompter.unsaved_changes(&message).await {
            UnsavedChoice::Save => {
                self.save_text()?;
                Ok(true)
            }
            UnsavedChoice::Discard => {
                self.cancel_edit()?;
                Ok(true)
            }
            UnsavedChoice::Cancel => {
                info!(action, "cancelled with unsaved changes");
                Ok(false)
            }
        }
    }

    fn enter_site(&mut self, target: Target, update: HistoryUpdate) {
        if self.mode != Mode::Site {
            info!(site = %target, "site preview started");
        }
        self.inspected = None;
        self.mode = Mode::Site;
        self.unpause();
        self.advisory = None;
        let location = self.resolver.location_of(&target);
        self.target = Some(target);
        self.load(&location, update);
    }

    async fn prepare_revisit(&self, location: &str) -> Result<()> {
        if self.resolver.bundle_path(location).is_some() {
            self.publisher.publish(&self.store).await?;
        }
        Ok(())
    }

    fn revisit(&mut self, location: &str) {
        self.target = self.target_for(location);
        self.advisory = None;
        self.from_history = true;
        self.load(location, HistoryUpdate::Keep);
    }

    fn load(&mut self, location: &str, update: HistoryUpdate) {
        self.address = self.resolver.display(location);
        match update {
            HistoryUpdate::Push => {
                self.history.push(location);
            }
            HistoryUpdate::Replace => self.history.replace_current(location),
            HistoryUpdate::Keep => {}
        }
        self.progress.start();
        info!(location, "loading");
        self.surface.navigate(&self.resolver.surface_url(location));
    }

    fn adopt(&mut self, location: &str, push: bool) {
        self.last_known = Some(location.to_string());
        self.address = self.resolver.display(location);
        if let Some(target) = self.target_for(location) {
            self.target = Some(target);
        }
        if push {
            self.history.push(location);
        }
    }

    fn observed_location(&self) -> Option<String> {
        self.surface
            .current_location()
            .filter(|l| !l.is_empty())
            .map(|l| self.resolver.canonical(&l))
    }

    fn target_for(&self, location: &str) -> Option<Target> {
        self.resolver.bundle_path(location).map_or_else(
            || {
                Url::parse(location)
                    .ok()
                    .filter(|u| matches!(u.scheme(), "http" | "https"))
                    .map(Target::External)
            },
            |path| Some(Target::Bundle(path)),
        )
    }

    fn unpause(&mut self) {
        if self.paused {
            self.paused = false;
            self.pause.send(false);
        }
    }

    fn leave_site(&mut self) {
        self.unpause();
        self.history.clear();
        self.target = None;
        self.advisory = None;
        self.last_known = None;
        self.from_history = false;
        self.progress.hide();
        self.surface.blank();
    }

    fn reset(&mut self) {
        self.leave_site();
        self.mode = Mode::Inactive;
        self.fullscreen.exit();
        self.inspected = None;
        info!("preview stopped");
    }

    fn text_buffer(&mut self) -> Result<&mut TextBuffer> {
        self.inspected
            .as_mut()
            .and_then(|f| f.text.as_mut())
            .ok_or_else(no_text_file)
    }

    fn dismiss_fullscreen_hint(&mut self) {
        self.preferences.hide_fullscreen_hint = true;
        if let Some(path) = &self.preferences_path
            && let Err(e) = self.preferences.save(path)
        {
            warn!(error = %e, "failed to save preferences");
        }
    }
}

fn no_text_file() -> Error {
    Error::InvalidArgument("no text file is open".to_string())
}

/// Returns `true` for locations that indicate the surface refused a load.
#[must_use]
pub fn looks_blocked(location: &str) -> bool {
    BLOCKED_LOCATION_REGEX.is_match(location)
}
