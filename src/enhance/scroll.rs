//! Scroll-driven page effects: sticky navbar styling, the back-to-top
//! button, hero parallax and anchor scrolling.

use crate::config::PageConfig;

/// Distance kept between an anchor target and the top of the viewport
pub const ANCHOR_OFFSET_PX: u32 = 80;

/// Hero background moves at half the scroll speed, upwards
pub const PARALLAX_RATE: f32 = -0.5;

/// Animation-frame flag: any number of scroll events, one handler run per frame
#[derive(Debug, Default, Clone)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    /// Returns true when this call scheduled a new frame
    pub fn request(&mut self) -> bool {
        if self.ticking {
            false
        } else {
            self.ticking = true;
            true
        }
    }

    /// Consume the scheduled frame, if any
    pub fn run_frame(&mut self) -> bool {
        std::mem::replace(&mut self.ticking, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollThresholds {
    pub navbar_px: u32,
    pub back_to_top_px: u32,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            navbar_px: 50,
            back_to_top_px: 300,
        }
    }
}

impl From<&PageConfig> for ScrollThresholds {
    fn from(page: &PageConfig) -> Self {
        Self {
            navbar_px: page.navbar_threshold_px,
            back_to_top_px: page.back_to_top_threshold_px,
        }
    }
}

/// What the page should look like at the current scroll position
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
    pub parallax_offset: i32,
}

impl ScrollState {
    pub fn at(scroll_y: u32, thresholds: ScrollThresholds) -> Self {
        Self {
            navbar_scrolled: scroll_y > thresholds.navbar_px,
            back_to_top_visible: scroll_y > thresholds.back_to_top_px,
            parallax_offset: parallax_offset(scroll_y),
        }
    }
}

/// Scroll listener with frame throttling
#[derive(Debug, Clone)]
pub struct ScrollEffects {
    thresholds: ScrollThresholds,
    frame: FrameThrottle,
    latest_y: u32,
    state: ScrollState,
}

impl ScrollEffects {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        Self {
            thresholds,
            frame: FrameThrottle::default(),
            latest_y: 0,
            state: ScrollState::at(0, thresholds),
        }
    }

    /// Record a scroll event; the state updates on the next frame
    pub fn on_scroll(&mut self, scroll_y: u32) {
        self.latest_y = scroll_y;
        self.frame.request();
    }

    /// Run the scheduled frame. Returns true if the visible state changed.
    pub fn on_frame(&mut self) -> bool {
        if !self.frame.run_frame() {
            return false;
        }
        let next = ScrollState::at(self.latest_y, self.thresholds);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn scroll_y(&self) -> u32 {
        self.latest_y
    }
}

pub fn parallax_offset(scroll_y: u32) -> i32 {
    (scroll_y as f32 * PARALLAX_RATE) as i32
}

/// Where to scroll so a section lands just below the navbar
pub fn anchor_scroll_target(section_top: u32) -> u32 {
    section_top.saturating_sub(ANCHOR_OFFSET_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_throttle_coalesces_events() {
        let mut frame = FrameThrottle::default();
        assert!(frame.request());
        assert!(!frame.request());
        assert!(frame.run_frame());
        assert!(!frame.run_frame());
        assert!(frame.request());
    }

    #[test]
    fn state_only_changes_on_frame() {
        let mut effects = ScrollEffects::new(ScrollThresholds::default());
        assert_eq!(effects.state(), ScrollState::default());

        effects.on_scroll(10);
        effects.on_scroll(120);
        assert!(!effects.state().navbar_scrolled);

        assert!(effects.on_frame());
        let state = effects.state();
        assert!(state.navbar_scrolled);
        assert!(!state.back_to_top_visible);
        assert_eq!(state.parallax_offset, -60);

        assert!(!effects.on_frame());
    }

    #[test]
    fn thresholds_are_exclusive() {
        let thresholds = ScrollThresholds::default();
        assert!(!ScrollState::at(50, thresholds).navbar_scrolled);
        assert!(ScrollState::at(51, thresholds).navbar_scrolled);
        assert!(!ScrollState::at(300, thresholds).back_to_top_visible);
        assert!(ScrollState::at(301, thresholds).back_to_top_visible);
    }

    #[test]
    fn anchor_target_clamps_at_top() {
        assert_eq!(anchor_scroll_target(500), 420);
        assert_eq!(anchor_scroll_target(40), 0);
    }
}
