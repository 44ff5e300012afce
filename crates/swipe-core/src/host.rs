#![forbid(unsafe_code)]

//! Capabilities the layout asks of its host view system.
//!
//! Every method has a no-op default so tests and headless hosts implement
//! only what they observe.

/// Host-side services consumed by a swipe panel.
pub trait Host {
    /// Schedule another frame; a settle in progress needs `tick` again.
    fn request_redraw(&mut self) {}

    /// Stop (or allow) ancestors from intercepting the pointer stream.
    fn disallow_intercept(&mut self, _disallow: bool) {}

    /// Show the surface as pressed or not.
    fn set_pressed(&mut self, _pressed: bool) {}

    /// A tap landed on a closed panel; the host forwards it as an item click.
    fn perform_item_click(&mut self) {}

    /// A closed panel was held long enough. Return `true` if handled.
    fn perform_item_long_click(&mut self) -> bool {
        false
    }
}

/// A host that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl Host for NoopHost {}

/// A host that records what was asked of it.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub redraws: usize,
    pub intercept: Vec<bool>,
    pub pressed: Vec<bool>,
    pub item_clicks: usize,
    pub long_clicks: usize,
}

impl Host for RecordingHost {
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn disallow_intercept(&mut self, disallow: bool) {
        self.intercept.push(disallow);
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.pressed.push(pressed);
    }

    fn perform_item_click(&mut self) {
        self.item_clicks += 1;
    }

    fn perform_item_long_click(&mut self) -> bool {
        self.long_clicks += 1;
        true
    }
}
