//! Indeterminate load progress.
//!
//! Values are basis points (1/100 of a percent). A load starts at 8%,
//! creeps towards 90% on every tick and jumps to 100% when the surface
//! reports the load finished.

const START: u16 = 800;
const CAP: u16 = 9000;
const MIN_STEP: u16 = 100;
const DONE: u16 = 10_000;

/// Load progress indicator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    value: u16,
    visible: bool,
    running: bool,
}

impl LoadProgress {
    /// Shows the bar at its starting value.
    pub const fn start(&mut self) {
        self.value = START;
        self.visible = true;
        self.running = true;
    }

    /// Advances by 6% of the remaining distance, at least 1%, up to 90%.
    /// Returns `false` when no load is in flight.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let step = (DONE.saturating_sub(self.value) * 6 / 100).max(MIN_STEP);
        self.value = self.value.saturating_add(step).min(CAP);
        true
    }

    /// Finishes the load.
    pub const fn complete(&mut self) {
        if self.visible {
            self.value = DONE;
        }
        self.running = false;
    }

    /// Hides the bar.
    pub const fn hide(&mut self) {
        self.value = 0;
        self.visible = false;
        self.running = false;
    }

    /// Progress in whole percent.
    #[must_use]
    pub fn percent(&self) -> u8 {
        u8::try_from(self.value / 100).unwrap_or(100)
    }

    /// Returns `true` while the bar is shown.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}
