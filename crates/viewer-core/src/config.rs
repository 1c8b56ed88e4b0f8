//! Runtime configuration for the viewer.
//!
//! Controls where the interception server listens, the application base path
//! that the reserved virtual prefix hangs off, and the cadence of the session's
//! background observers.
//!
//! # Examples
//!
//! ```
//! use html_viewer_core::ViewerConfig;
//! use std::time::Duration;
//!
//! let config = ViewerConfig::default();
//! assert_eq!(config.virtual_prefix(), "/__vfs__/");
//!
//! let custom = ViewerConfig::builder()
//!     .base_path("/viewer/")
//!     .poll_interval(Duration::from_millis(300))
//!     .build();
//! assert_eq!(custom.virtual_prefix(), "/viewer/__vfs__/");
//! assert!(custom.validate().is_ok());
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Path segment reserved for bundle content.
pub const VIRTUAL_SEGMENT: &str = "__vfs__";

/// Path segment reserved for viewer control endpoints (pause stream, health).
pub const CONTROL_SEGMENT: &str = "__viewer__";

/// Runtime configuration for the preview server and session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Address the interception server binds to.
    ///
    /// Default: 127.0.0.1
    pub bind_addr: IpAddr,

    /// Port the interception server binds to; 0 picks an ephemeral port.
    ///
    /// Default: 0
    pub port: u16,

    /// Application base path. Must start and end with '/'.
    ///
    /// Default: "/"
    pub base_path: String,

    /// How often the session polls the surface for location drift.
    ///
    /// Default: 900ms
    pub poll_interval: Duration,

    /// Tick interval of the indeterminate load progress indicator.
    ///
    /// Default: 120ms
    pub progress_tick: Duration,

    /// Keep-alive interval of the pause control stream.
    ///
    /// Default: 15 seconds
    pub keep_alive: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_path: "/".to_string(),
            poll_interval: Duration::from_millis(900),
            progress_tick: Duration::from_millis(120),
            keep_alive: Duration::from_secs(15),
        }
    }
}

impl ViewerConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::new()
    }

    /// Socket address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Path prefix under which bundle content is served, e.g. `/__vfs__/`.
    #[must_use]
    pub fn virtual_prefix(&self) -> String {
        format!("{}{VIRTUAL_SEGMENT}/", self.base_path)
    }

    /// Path prefix of the control endpoints, e.g. `/__viewer__/`.
    #[must_use]
    pub fn control_prefix(&self) -> String {
        format!("{}{CONTROL_SEGMENT}/", self.base_path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base path does not start and end with '/'
    /// - The poll interval or progress tick is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_core::ViewerConfig;
    ///
    /// let mut invalid = ViewerConfig::default();
    /// invalid.base_path = "viewer".to_string();
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(format!(
                "Base path must start and end with '/': {}",
                self.base_path
            ));
        }

        if self.base_path.contains("//") {
            return Err(format!(
                "Base path must not contain empty segments: {}",
                self.base_path
            ));
        }

        if self.poll_interval.is_zero() {
            return Err("Poll interval must be greater than zero".to_string());
        }

        if self.progress_tick.is_zero() {
            return Err("Progress tick must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Builder for `ViewerConfig`.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfigBuilder {
    config: ViewerConfig,
}

impl ViewerConfigBuilder {
    /// Creates a builder seeded with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bind address.
    #[must_use]
    pub const fn bind_addr(mut self, addr: IpAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the application base path.
    ///
    /// A missing leading or trailing '/' is added.
    #[must_use]
    pub fn base_path(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.starts_with('/') {
            base.insert(0, '/');
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        self.config.base_path = base;
        self
    }

    /// Sets the drift poll interval.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Sets the progress tick interval.
    #[must_use]
    pub const fn progress_tick(mut self, tick: Duration) -> Self {
        self.config.progress_tick = tick;
        self
    }

    /// Sets the control stream keep-alive interval.
    #[must_use]
    pub const fn keep_alive(mut self, interval: Duration) -> Self {
        self.config.keep_alive = interval;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ViewerConfig {
        self.config
    }
}
