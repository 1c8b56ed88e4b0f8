//! Navigating surface trait.

/// The embedded viewing surface the session drives.
///
/// The surface may change location on its own (in-page navigation), so the
/// session only ever trusts `current_location` for drift detection.
pub trait Surface: Send + Sync {
    /// Starts loading `url`.
    fn navigate(&self, url: &str);

    /// The location the surface currently shows, if observable.
    fn current_location(&self) -> Option<String>;

    /// Unloads any document and shows an empty page.
    fn blank(&self);

    /// Overrides the identity the surface reports. Best effort; the runtime
    /// may refuse.
    fn apply_user_agent(&self, user_agent: &str);
}
