/// Default width (logical pixels) at which the layout switches to wide mode.
pub const WIDE_BREAKPOINT: f64 = 900.0;

/// The two viewport-size regimes the header adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Mobile/tablet layout: the menu opens and closes as a whole.
    Compact,
    /// Desktop layout: sections expand and collapse individually.
    Wide,
}

impl ViewportMode {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            ViewportMode::Wide
        } else {
            ViewportMode::Compact
        }
    }
}

/// Tracks the current viewport mode and reports threshold crossings.
///
/// `update` returns the new mode only when the width actually crossed the
/// breakpoint, not on every resize tick.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    breakpoint: f64,
    mode: ViewportMode,
}

impl ViewportObserver {
    pub fn new(initial_width: f64) -> Self {
        Self::with_breakpoint(initial_width, WIDE_BREAKPOINT)
    }

    pub fn with_breakpoint(initial_width: f64, breakpoint: f64) -> Self {
        Self {
            breakpoint,
            mode: ViewportMode::from_width(initial_width, breakpoint),
        }
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn update(&mut self, width: f64) -> Option<ViewportMode> {
        let mode = ViewportMode::from_width(width, self.breakpoint);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_width_uses_inclusive_threshold() {
        assert_eq!(
            ViewportMode::from_width(900.0, WIDE_BREAKPOINT),
            ViewportMode::Wide
        );
        assert_eq!(
            ViewportMode::from_width(899.0, WIDE_BREAKPOINT),
            ViewportMode::Compact
        );
    }

    #[test]
    fn test_update_reports_only_crossings() {
        let mut observer = ViewportObserver::new(1200.0);
        assert_eq!(observer.mode(), ViewportMode::Wide);

        // Resizes on the same side of the threshold are silent
        assert_eq!(observer.update(1000.0), None);
        assert_eq!(observer.update(950.0), None);

        // Crossing fires exactly once
        assert_eq!(observer.update(600.0), Some(ViewportMode::Compact));
        assert_eq!(observer.update(500.0), None);

        assert_eq!(observer.update(1024.0), Some(ViewportMode::Wide));
    }

    #[test]
    fn test_custom_breakpoint() {
        let mut observer = ViewportObserver::with_breakpoint(500.0, 600.0);
        assert_eq!(observer.mode(), ViewportMode::Compact);
        assert_eq!(observer.update(600.0), Some(ViewportMode::Wide));
    }
}
