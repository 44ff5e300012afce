#![forbid(unsafe_code)]

//! Open-state registry for swipe panels recycled across list positions.
//!
//! Lists reuse a handful of panel instances for many positions, so the
//! truth about which rows are open lives here, keyed by position. Panels
//! are re-primed from it every time they are bound to a position.
//!
//! # Invariants
//!
//! 1. In [`Mode::Single`] at most one position is recorded open.
//! 2. Restoring a panel on bind never emits lifecycle events.
//! 3. Close requests only reach attached panels; positions without a live
//!    panel are handled by the next bind.
//!
//! # Failure Modes
//!
//! - A panel that is mutably borrowed elsewhere while the registry wants to
//!   close it is skipped; it is re-primed on its next bind.
//! - Dropped panels are pruned lazily.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::AHashSet;
use swipe_core::{Host, SwipeEvent, SwipeLayout, debug};

/// Shared handle to a panel owned by a list row.
pub type PanelHandle = Rc<RefCell<SwipeLayout>>;

/// How many rows may be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Opening a row closes the previous one.
    #[default]
    Single,
    Multiple,
}

/// A list host: a [`Host`] that can ask its list to rebind visible rows.
pub trait ListHost: Host {
    /// Recorded open state changed; rebind every visible row.
    fn notify_data_changed(&mut self);
}

#[derive(Debug)]
struct Shown {
    panel: Weak<RefCell<SwipeLayout>>,
    position: usize,
}

impl Shown {
    fn is(&self, panel: &PanelHandle) -> bool {
        std::ptr::eq(self.panel.as_ptr(), Rc::as_ptr(panel))
    }
}

/// Which positions are open, and which panels are attached to which
/// positions.
#[derive(Debug, Default)]
pub struct OpenStateRegistry {
    mode: Mode,
    open_position: Option<usize>,
    open_positions: AHashSet<usize>,
    shown: Vec<Shown>,
}

impl OpenStateRegistry {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode, forgetting all open state and attached panels.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.open_position = None;
        self.open_positions.clear();
        self.shown.clear();
    }

    // -----------------------------------------------------------------------
    // Binding
    // -----------------------------------------------------------------------

    /// Attach `panel` to `position` and restore its recorded state.
    ///
    /// The restore is a silent jump, so binding twice in a row changes
    /// nothing.
    pub fn bind(&mut self, panel: &PanelHandle, position: usize, host: &mut dyn Host) {
        self.prune();
        match self.shown.iter_mut().find(|s| s.is(panel)) {
            Some(shown) => shown.position = position,
            None => self.shown.push(Shown {
                panel: Rc::downgrade(panel),
                position,
            }),
        }

        let open = self.is_open(position);
        let Ok(mut layout) = panel.try_borrow_mut() else {
            debug!(position, "panel busy during bind");
            return;
        };
        let _ = if open {
            layout.open(false, false, host)
        } else {
            layout.close(false, false, host)
        };
    }

    /// Detach `panel`. Returns whether it was attached.
    pub fn remove_shown_layouts(&mut self, panel: &PanelHandle) -> bool {
        let before = self.shown.len();
        self.shown.retain(|s| !s.is(panel));
        self.shown.len() != before
    }

    /// Position `panel` is bound to, if attached.
    #[must_use]
    pub fn position_of(&self, panel: &PanelHandle) -> Option<usize> {
        self.shown
            .iter()
            .find(|s| s.is(panel) && s.panel.strong_count() > 0)
            .map(|s| s.position)
    }

    // -----------------------------------------------------------------------
    // Lifecycle routing
    // -----------------------------------------------------------------------

    /// Route the events a bound panel produced into the registry.
    ///
    /// In single mode a panel starting to open closes every other attached
    /// panel. `Open` records the position and `Close` clears it.
    pub fn observe(&mut self, panel: &PanelHandle, events: &[SwipeEvent], host: &mut dyn Host) {
        let Some(position) = self.position_of(panel) else {
            return;
        };
        for event in events {
            match event {
                SwipeEvent::StartOpen if self.mode == Mode::Single => {
                    self.close_all_except(panel, host);
                }
                SwipeEvent::Open => {
                    debug!(position, "row opened");
                    match self.mode {
                        Mode::Multiple => {
                            self.open_positions.insert(position);
                        }
                        Mode::Single => {
                            self.close_all_except(panel, host);
                            self.open_position = Some(position);
                        }
                    }
                }
                SwipeEvent::Close => {
                    debug!(position, "row closed");
                    match self.mode {
                        Mode::Multiple => {
                            self.open_positions.remove(&position);
                        }
                        Mode::Single => {
                            if self.open_position == Some(position) {
                                self.open_position = None;
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    // -----------------------------------------------------------------------
    // Programmatic control
    // -----------------------------------------------------------------------

    /// Record `position` open and ask the list to rebind.
    ///
    /// In single mode the previously open row is closed first if a panel is
    /// attached to it.
    pub fn open_item<H: ListHost>(&mut self, position: usize, host: &mut H) {
        match self.mode {
            Mode::Multiple => {
                self.open_positions.insert(position);
            }
            Mode::Single => {
                if let Some(previous) = self.open_position.replace(position)
                    && previous != position
                {
                    self.close_attached(previous, host);
                }
            }
        }
        debug!(position, mode = ?self.mode, "open item");
        host.notify_data_changed();
    }

    /// Record `position` closed and ask the list to rebind.
    pub fn close_item<H: ListHost>(&mut self, position: usize, host: &mut H) {
        match self.mode {
            Mode::Multiple => {
                self.open_positions.remove(&position);
            }
            Mode::Single => {
                if self.open_position == Some(position) {
                    self.open_position = None;
                }
            }
        }
        debug!(position, mode = ?self.mode, "close item");
        host.notify_data_changed();
    }

    /// Close every attached panel except `keep`.
    pub fn close_all_except(&mut self, keep: &PanelHandle, host: &mut dyn Host) {
        self.prune();
        for shown in &self.shown {
            if shown.is(keep) {
                continue;
            }
            close_shown(shown, host);
        }
    }

    /// Forget all open positions and close every attached panel.
    pub fn close_all_items(&mut self, host: &mut dyn Host) {
        self.open_position = None;
        self.open_positions.clear();
        self.prune();
        for shown in &self.shown {
            close_shown(shown, host);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Open positions, ascending.
    #[must_use]
    pub fn open_items(&self) -> Vec<usize> {
        match self.mode {
            Mode::Single => self.open_position.into_iter().collect(),
            Mode::Multiple => {
                let mut items: Vec<usize> = self.open_positions.iter().copied().collect();
                items.sort_unstable();
                items
            }
        }
    }

    /// Attached panels that are still alive.
    #[must_use]
    pub fn open_layouts(&self) -> Vec<PanelHandle> {
        self.shown.iter().filter_map(|s| s.panel.upgrade()).collect()
    }

    #[must_use]
    pub fn is_open(&self, position: usize) -> bool {
        match self.mode {
            Mode::Single => self.open_position == Some(position),
            Mode::Multiple => self.open_positions.contains(&position),
        }
    }

    fn close_attached(&mut self, position: usize, host: &mut dyn Host) {
        self.prune();
        for shown in self.shown.iter().filter(|s| s.position == position) {
            close_shown(shown, host);
        }
    }

    fn prune(&mut self) {
        self.shown.retain(|s| s.panel.strong_count() > 0);
    }
}

fn close_shown(shown: &Shown, host: &mut dyn Host) {
    let Some(panel) = shown.panel.upgrade() else {
        return;
    };
    match panel.try_borrow_mut() {
        Ok(mut layout) => {
            let _ = layout.close(true, true, host);
        }
        Err(_) => {
            debug!(position = shown.position, "panel busy during close");
        }
    }
}
