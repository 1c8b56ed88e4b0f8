//! Fullscreen hot-corner exit gesture.

/// Taps on the screen corners that leave fullscreen.
pub const CORNER_TAPS_TO_EXIT: u8 = 4;

/// Screen corner hit areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Top-left
    TopLeft,
    /// Top-right
    TopRight,
    /// Bottom-left
    BottomLeft,
    /// Bottom-right
    BottomRight,
}

impl std::str::FromStr for Corner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tl" | "top-left" => Ok(Self::TopLeft),
            "tr" | "top-right" => Ok(Self::TopRight),
            "bl" | "bottom-left" => Ok(Self::BottomLeft),
            "br" | "bottom-right" => Ok(Self::BottomRight),
            _ => Err(format!("unknown corner: {s}")),
        }
    }
}

/// Counts corner taps within one fullscreen session.
///
/// Any corner counts, including the same one repeatedly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullscreenGesture {
    active: bool,
    taps: u8,
}

impl FullscreenGesture {
    /// Starts a fresh fullscreen session.
    pub const fn enter(&mut self) {
        self.active = true;
        self.taps = 0;
    }

    /// Leaves fullscreen.
    pub const fn exit(&mut self) {
        self.active = false;
        self.taps = 0;
    }

    /// Records a tap. Returns `true` when the tap completes the exit
    /// gesture; taps outside fullscreen are ignored.
    pub fn tap_corner(&mut self, corner: Corner) -> bool {
        if !self.active {
            return false;
        }
        self.taps = self.taps.saturating_add(1);
        tracing::debug!(?corner, taps = self.taps, "fullscreen corner tap");
        self.taps >= CORNER_TAPS_TO_EXIT
    }

    /// Returns `true` while fullscreen.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Taps counted in this fullscreen session.
    #[must_use]
    pub const fn taps(&self) -> u8 {
        self.taps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_taps_exit() {
        let mut gesture = FullscreenGesture::default();
        gesture.enter();
        assert!(!gesture.tap_corner(Corner::TopLeft));
        assert!(!gesture.tap_corner(Corner::TopLeft));
        assert!(!gesture.tap_corner(Corner::BottomRight));
        assert!(gesture.tap_corner(Corner::TopLeft));
    }

    #[test]
    fn test_counter_resets_on_entry() {
        let mut gesture = FullscreenGesture::default();
        gesture.enter();
        gesture.tap_corner(Corner::TopRight);
        gesture.tap_corner(Corner::TopRight);
        gesture.tap_corner(Corner::TopRight);
        gesture.exit();

        gesture.enter();
        assert_eq!(gesture.taps(), 0);
        assert!(!gesture.tap_corner(Corner::TopRight));
    }

    #[test]
    fn test_taps_ignored_when_inactive() {
        let mut gesture = FullscreenGesture::default();
        for _ in 0..CORNER_TAPS_TO_EXIT {
            assert!(!gesture.tap_corner(Corner::BottomLeft));
        }
        assert_eq!(gesture.taps(), 0);
    }

    #[test]
    fn test_corner_from_str() {
        assert_eq!("tl".parse::<Corner>(), Ok(Corner::TopLeft));
        assert_eq!("bottom-right".parse::<Corner>(), Ok(Corner::BottomRight));
        assert!("middle".parse::<Corner>().is_err());
    }
}
