#![forbid(unsafe_code)]

//! The swipe-to-reveal panel.
//!
//! [`SwipeLayout`] owns one surface and up to four edge panels. The host
//! feeds it pointer events and redraw ticks; it answers with the events the
//! input produced and with the current rectangles to draw.
//!
//! # Position-change pipeline
//!
//! Every movement of the surface, whether from a drag, a settle tick or a
//! programmatic jump, runs the same steps in order:
//!
//! 1. place the surface,
//! 2. place the active panel for the show mode,
//! 3. refresh panel visibility (all hidden while closed),
//! 4. reveal events for registered children,
//! 5. lifecycle events.
//!
//! Steps 4 and 5 are skipped for non-notifying moves.
//!
//! # Invariants
//!
//! 1. `status()` is derived from the surface offset alone.
//! 2. The surface never leaves `[rest, rest ± drag_distance]` on the active
//!    axis and never leaves rest on the other axis.
//! 3. The active edge only changes while the panel is closed.
//!
//! # Failure Modes
//!
//! - With no registered edge every pointer event passes through and every
//!   programmatic open is a no-op.
//! - A pointer-down outside the surface and the visible panel is not
//!   captured.
//! - Pointer-downs and taps are reported unconsumed so the host can deliver
//!   them to the panel's own children. The exceptions are a down on a
//!   half-open panel and a tap that closes an open one.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::animation::Settle;
use crate::config::SwipeConfig;
use crate::edge::{Axis, DragEdge, EdgeSet, ShowMode};
use crate::error::SwipeError;
use crate::event::{PointerEvent, PointerKind};
use crate::geometry::{Geometry, Point, Rect, Sides, Size, Status};
use crate::gesture::{
    CapturedView, DragPhase, SwipeSession, TapTracker, candidate_edge, drag_angle, is_suitable,
};
use crate::host::Host;
use crate::lifecycle::LifecycleDispatcher;
use crate::release::{ReleasePolicy, SettleTarget};
use crate::reveal::{RevealDispatcher, RevealFrame};
use crate::swipe_event::{ListenerId, SwipeEvent};
use crate::tree::{ChildId, ParentRef, ViewTree};
use crate::{debug, warn};

/// A panel declared at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    /// Explicit edge, or `None` to take the next registered edge.
    pub edge: Option<DragEdge>,
    /// Measured size.
    pub size: Size,
}

impl PanelView {
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self { edge: None, size }
    }

    #[must_use]
    pub const fn anchored(edge: DragEdge, size: Size) -> Self {
        Self {
            edge: Some(edge),
            size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PanelSlot {
    size: Size,
    rect: Rect,
    visible: bool,
    enabled: bool,
}

/// Result of feeding one pointer event.
#[must_use]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dispatch {
    /// The layout used the event; the host should not deliver it elsewhere.
    pub consumed: bool,
    pub events: Vec<SwipeEvent>,
}

/// Handle for removing a swipe denier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DenierId(u32);

type Denier = Box<dyn Fn(&PointerEvent) -> bool>;

/// One swipe-to-reveal panel instance.
pub struct SwipeLayout {
    config: SwipeConfig,
    policy: ReleasePolicy,
    bounds: Size,
    padding: Sides,
    edges: EdgeSet,
    panels: [Option<PanelSlot>; 4],
    current_edge: Option<DragEdge>,
    drag_distance_override: Option<i32>,
    surface: Rect,
    phase: DragPhase,
    session: Option<SwipeSession>,
    settle: Option<Settle>,
    settle_notify: bool,
    taps: TapTracker,
    tree: ViewTree,
    reveal: RevealDispatcher,
    lifecycle: LifecycleDispatcher,
    deniers: Vec<(DenierId, Denier)>,
    next_denier: u32,
}

impl fmt::Debug for SwipeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeLayout")
            .field("edge", &self.current_edge)
            .field("status", &self.status())
            .field("phase", &self.phase)
            .field("surface", &self.surface)
            .field("deniers", &self.deniers.len())
            .finish()
    }
}

impl SwipeLayout {
    /// Build a panel of `size` with `padding`, one surface and `panels`.
    ///
    /// Anchored panels register their own edge. The remaining panels take
    /// the configured edges in order (Left, Right, Top, Bottom); their count
    /// must match exactly.
    pub fn new(
        config: SwipeConfig,
        size: Size,
        padding: Sides,
        panels: Vec<PanelView>,
    ) -> Result<Self, SwipeError> {
        if let Err(error) = config.validate() {
            warn!(%error, "rejected swipe configuration");
            return Err(error.into());
        }

        let mut slots: [Option<PanelSlot>; 4] = [None; 4];
        let mut edges = config.edges;
        let slot = |size| PanelSlot {
            size,
            rect: Rect::default(),
            visible: false,
            enabled: false,
        };

        for panel in &panels {
            if let Some(edge) = panel.edge {
                if slots[edge.index()].is_some() {
                    return Err(SwipeError::DuplicatePanelEdge(edge));
                }
                slots[edge.index()] = Some(slot(panel.size));
                edges |= edge.flag();
            }
        }
        let free: Vec<DragEdge> = edges
            .edges()
            .filter(|edge| slots[edge.index()].is_none())
            .collect();
        let unanchored: Vec<&PanelView> = panels.iter().filter(|p| p.edge.is_none()).collect();
        if free.len() != unanchored.len() {
            return Err(SwipeError::PanelCountMismatch {
                panels: panels.len(),
                edges: edges.len(),
            });
        }
        for (edge, panel) in free.into_iter().zip(unanchored) {
            slots[edge.index()] = Some(slot(panel.size));
        }

        let content = Rect::from_size(size).inner(padding);
        let mut layout = Self {
            policy: ReleasePolicy::from_config(&config),
            taps: TapTracker::new(
                config.multi_tap_timeout,
                config.long_press_threshold,
                config.tap_tolerance,
            ),
            config,
            bounds: size,
            padding,
            edges,
            panels: slots,
            current_edge: edges.edges().next(),
            drag_distance_override: None,
            surface: content,
            phase: DragPhase::Idle,
            session: None,
            settle: None,
            settle_notify: false,
            tree: ViewTree::new(),
            reveal: RevealDispatcher::new(),
            lifecycle: LifecycleDispatcher::new(),
            deniers: Vec::new(),
            next_denier: 0,
        };
        layout.snap(false);
        Ok(layout)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Open state derived from the surface offset.
    #[must_use]
    pub fn status(&self) -> Status {
        match self.geometry() {
            Some(geometry) => geometry.status_of(self.surface),
            None => Status::Close,
        }
    }

    /// Active edge, if any edge is registered.
    #[inline]
    #[must_use]
    pub fn drag_edge(&self) -> Option<DragEdge> {
        self.current_edge
    }

    /// Registered edges.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> EdgeSet {
        self.edges
    }

    /// Maximum travel for the active edge (0 without one).
    #[must_use]
    pub fn drag_distance(&self) -> i32 {
        self.current_edge.map_or(0, |edge| self.drag_distance_for(edge))
    }

    #[inline]
    #[must_use]
    pub fn surface_rect(&self) -> Rect {
        self.surface
    }

    /// Current rectangle of the panel on `edge`.
    #[must_use]
    pub fn panel_rect(&self, edge: DragEdge) -> Option<Rect> {
        self.panels[edge.index()].map(|slot| slot.rect)
    }

    #[must_use]
    pub fn is_panel_visible(&self, edge: DragEdge) -> bool {
        self.panels[edge.index()].is_some_and(|slot| slot.visible)
    }

    /// Whether the panel on `edge` accepts interaction (set once it opened).
    #[must_use]
    pub fn is_panel_enabled(&self, edge: DragEdge) -> bool {
        self.panels[edge.index()].is_some_and(|slot| slot.enabled)
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Container content box (bounds minus padding).
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::from_size(self.bounds).inner(self.padding)
    }

    /// Surface offset from rest.
    #[must_use]
    pub fn offset(&self) -> (i32, i32) {
        let content = self.content_rect();
        (self.surface.x - content.x, self.surface.y - content.y)
    }

    /// Geometry for the active edge.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        self.current_edge.and_then(|edge| self.geometry_for(edge))
    }

    fn geometry_for(&self, edge: DragEdge) -> Option<Geometry> {
        let slot = self.panels[edge.index()]?;
        Some(Geometry {
            content: self.content_rect(),
            show_mode: self.config.show_mode,
            edge,
            panel_size: slot.size,
            drag_distance: self.drag_distance_for(edge),
        })
    }

    fn drag_distance_for(&self, edge: DragEdge) -> i32 {
        let natural = self.panels[edge.index()].map_or(0, |slot| {
            slot.size.extent(edge.axis()) - self.config.edge_offset_px(edge)
        });
        self.drag_distance_override.unwrap_or(natural).max(0)
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Feed one pointer event.
    pub fn on_pointer(&mut self, event: &PointerEvent, host: &mut dyn Host) -> Dispatch {
        let mut events = Vec::new();
        let consumed = match event.kind {
            PointerKind::Down => self.on_down(event, host),
            PointerKind::Move => self.on_move(event, host, &mut events),
            PointerKind::Up { .. } | PointerKind::Cancel => {
                self.on_release(event, host, &mut events)
            }
        };
        Dispatch { consumed, events }
    }

    fn on_down(&mut self, event: &PointerEvent, host: &mut dyn Host) -> bool {
        self.session = None;
        if self.phase != DragPhase::Settling {
            self.phase = DragPhase::Idle;
        }
        if !self.config.swipe_enabled || self.current_edge.is_none() {
            return false;
        }
        let status = self.status();
        let on_surface = self.surface.contains(event.x as i32, event.y as i32);
        let closes_on_tap = self.config.click_to_close && status == Status::Open && on_surface;
        if !closes_on_tap && self.deniers.iter().any(|(_, deny)| deny(event)) {
            debug!("swipe denied at pointer-down");
            return false;
        }

        let captured = if on_surface {
            CapturedView::Surface
        } else if self.active_panel_hit(event.x as i32, event.y as i32) {
            CapturedView::Panel
        } else {
            return false;
        };

        if self.settle.take().is_some() {
            debug!(offset = ?self.offset(), "settle interrupted");
        }

        let raw = (event.raw_x, event.raw_y);
        self.session = Some(SwipeSession {
            pointer_id: event.pointer_id,
            start: raw,
            last: raw,
            captured,
            was_closed: status == Status::Close,
        });
        self.taps
            .on_down((event.x, event.y), event.time, status == Status::Close);

        // Until the movement classifies as a swipe, the stream still belongs
        // to the host. Only a half-open panel or a pending tap-to-close is
        // claimed up front.
        if status == Status::Middle {
            self.begin_drag(host);
            true
        } else {
            self.phase = DragPhase::Classifying;
            closes_on_tap
        }
    }

    fn on_move(
        &mut self,
        event: &PointerEvent,
        host: &mut dyn Host,
        out: &mut Vec<SwipeEvent>,
    ) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if session.pointer_id != event.pointer_id {
            return false;
        }
        let raw = (event.raw_x, event.raw_y);
        self.taps.on_move((event.x, event.y));

        match self.phase {
            DragPhase::Classifying => {
                if !self.classify(&session, raw) {
                    return false;
                }
                self.begin_drag(host);
                self.drag_to(raw, host, out);
                true
            }
            DragPhase::Dragging => {
                self.drag_to(raw, host, out);
                true
            }
            DragPhase::Idle | DragPhase::Settling => false,
        }
    }

    /// Decide whether the movement so far is a swipe.
    fn classify(&mut self, session: &SwipeSession, raw: (f32, f32)) -> bool {
        let (dx, dy) = session.total_delta(raw);
        let Some(angle) = drag_angle(dx, dy) else {
            return false;
        };
        let status = self.status();
        if status == Status::Close {
            let edges = self.edges;
            let enabled = self.config.enabled_edges;
            let candidate =
                candidate_edge(dx, dy, angle, |edge| edges.has(edge) && enabled.has(edge));
            let Some(edge) = candidate else {
                debug!(dx, dy, angle, "no swipe edge for movement");
                return false;
            };
            if self.current_edge != Some(edge) {
                self.switch_edge(edge);
            }
        }

        let Some(edge) = self.current_edge else {
            return false;
        };
        if status != Status::Middle && !self.config.is_edge_enabled(edge) {
            debug!(?edge, "swipe edge disabled");
            return false;
        }
        if !is_suitable(edge, status, dx, dy, angle, self.config.touch_slop) {
            debug!(?edge, ?status, dx, dy, angle, "movement rejected as swipe");
            return false;
        }
        debug!(?edge, ?status, angle, "swipe accepted");
        true
    }

    fn begin_drag(&mut self, host: &mut dyn Host) {
        self.phase = DragPhase::Dragging;
        self.taps.cancel();
        host.disallow_intercept(true);
        if self.config.pressed_state_emulation {
            host.set_pressed(true);
        }
        // Follow the finger from where it went down.
        if let Some(session) = self.session.as_mut() {
            session.last = session.start;
        }
    }

    fn drag_to(&mut self, raw: (f32, f32), host: &mut dyn Host, out: &mut Vec<SwipeEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let dx = (raw.0 - session.last.0).round() as i32;
        let dy = (raw.1 - session.last.1).round() as i32;
        if dx == 0 && dy == 0 {
            return;
        }
        session.last.0 += dx as f32;
        session.last.1 += dy as f32;
        let captured = session.captured;

        let Some(geometry) = self.geometry() else {
            return;
        };
        let origin = self.surface.origin();
        let target = match (captured, self.config.show_mode) {
            (CapturedView::Panel, ShowMode::PullOut) => {
                let panel = self.active_panel_rect().unwrap_or_default().origin();
                let moved = geometry.clamp_panel(Point::new(panel.x + dx, panel.y + dy));
                geometry.clamp_surface(Point::new(
                    origin.x + moved.x - panel.x,
                    origin.y + moved.y - panel.y,
                ))
            }
            _ => geometry.clamp_surface(Point::new(origin.x + dx, origin.y + dy)),
        };
        if self.place_surface(target, true, out) {
            host.request_redraw();
        }
    }

    fn on_release(
        &mut self,
        event: &PointerEvent,
        host: &mut dyn Host,
        out: &mut Vec<SwipeEvent>,
    ) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if session.pointer_id != event.pointer_id {
            return false;
        }
        self.session = None;

        match self.phase {
            DragPhase::Dragging => {
                let (velocity_x, velocity_y) = event.velocity();
                out.push(SwipeEvent::HandRelease {
                    velocity_x,
                    velocity_y,
                });
                host.disallow_intercept(false);
                if self.config.pressed_state_emulation {
                    host.set_pressed(false);
                }
                self.phase = DragPhase::Idle;
                if let Some(geometry) = self.geometry() {
                    let velocity = (velocity_x, velocity_y);
                    let target = match session.captured {
                        CapturedView::Surface => self.policy.resolve_surface(
                            &geometry,
                            self.surface,
                            velocity,
                            session.was_closed,
                        ),
                        CapturedView::Panel => {
                            self.policy.resolve_panel(&geometry, self.surface, velocity)
                        }
                    };
                    let fling = match geometry.edge.axis() {
                        Axis::Horizontal => velocity_x,
                        Axis::Vertical => velocity_y,
                    };
                    self.start_settle(target, fling, true, host);
                }
                true
            }
            DragPhase::Classifying => {
                self.phase = DragPhase::Idle;
                if matches!(event.kind, PointerKind::Cancel) {
                    self.taps.cancel();
                    return false;
                }
                let (velocity_x, velocity_y) = event.velocity();
                out.push(SwipeEvent::HandRelease {
                    velocity_x,
                    velocity_y,
                });
                let Some(tap) = self.taps.on_up((event.x, event.y), event.time) else {
                    return false;
                };
                let (x, y) = (event.x as i32, event.y as i32);
                let on_surface = !self.active_panel_hit(x, y);
                if tap.double {
                    out.push(SwipeEvent::DoubleTap { on_surface });
                }
                match self.status() {
                    Status::Close => {
                        host.perform_item_click();
                        false
                    }
                    _ if self.config.click_to_close && on_surface => {
                        out.extend(self.close(true, true, host));
                        true
                    }
                    _ => false,
                }
            }
            DragPhase::Idle | DragPhase::Settling => false,
        }
    }

    /// Poll the long-press timer; call from the host's tick.
    ///
    /// Returns whether the host handled a long press.
    pub fn check_long_press(&mut self, now: Instant, host: &mut dyn Host) -> bool {
        if self.taps.check_long_press(now) && self.status() == Status::Close {
            return host.perform_item_long_click();
        }
        false
    }

    // -----------------------------------------------------------------------
    // Settling
    // -----------------------------------------------------------------------

    fn start_settle(
        &mut self,
        target: SettleTarget,
        fling: f32,
        notify: bool,
        host: &mut dyn Host,
    ) {
        let Some(geometry) = self.geometry() else {
            return;
        };
        let axis = geometry.edge.axis();
        let rest = geometry.surface_rect(false).origin().along(axis);
        let open = geometry.surface_rect(true).origin().along(axis);
        let to = if target.is_open() { open } else { rest };
        let from = self.surface.origin().along(axis);
        if from == to {
            self.settle = None;
            self.phase = DragPhase::Idle;
            return;
        }
        debug!(?target, from, to, "settle started");
        self.settle = Some(Settle::new(
            from,
            to,
            (rest, open),
            target,
            self.config.settle_stiffness,
            fling,
        ));
        self.settle_notify = notify;
        self.phase = DragPhase::Settling;
        host.request_redraw();
    }

    /// Advance an in-flight settle by `dt`; call once per redraw.
    pub fn tick(&mut self, dt: Duration, host: &mut dyn Host) -> Vec<SwipeEvent> {
        let mut out = Vec::new();
        let Some(settle) = self.settle.as_mut() else {
            return out;
        };
        let step = settle.tick(dt);
        let Some(geometry) = self.geometry() else {
            self.settle = None;
            self.phase = DragPhase::Idle;
            return out;
        };
        let origin = match geometry.edge.axis() {
            Axis::Horizontal => Point::new(step.position, self.surface.y),
            Axis::Vertical => Point::new(self.surface.x, step.position),
        };
        let notify = self.settle_notify;
        self.place_surface(origin, notify, &mut out);
        if step.done {
            self.settle = None;
            self.phase = DragPhase::Idle;
            debug!(offset = ?self.offset(), "settle finished");
        } else {
            host.request_redraw();
        }
        out
    }

    /// Whether a settle is in flight.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    // -----------------------------------------------------------------------
    // Programmatic control
    // -----------------------------------------------------------------------

    /// Open toward the active edge.
    pub fn open(&mut self, smooth: bool, notify: bool, host: &mut dyn Host) -> Vec<SwipeEvent> {
        self.jump(SettleTarget::Open, smooth, notify, host)
    }

    /// Make `edge` active and open toward it.
    pub fn open_edge(
        &mut self,
        edge: DragEdge,
        smooth: bool,
        notify: bool,
        host: &mut dyn Host,
    ) -> Result<Vec<SwipeEvent>, SwipeError> {
        if !self.edges.has(edge) {
            return Err(SwipeError::EdgeNotRegistered(edge));
        }
        if self.current_edge != Some(edge) {
            self.settle = None;
            self.lifecycle.reset();
            self.surface = self.rest_rect();
            self.switch_edge(edge);
        }
        Ok(self.open(smooth, notify, host))
    }

    /// Close.
    pub fn close(&mut self, smooth: bool, notify: bool, host: &mut dyn Host) -> Vec<SwipeEvent> {
        self.jump(SettleTarget::Close, smooth, notify, host)
    }

    /// Open a closed panel or close an open one; a half-open panel is left
    /// alone.
    pub fn toggle(&mut self, smooth: bool, host: &mut dyn Host) -> Vec<SwipeEvent> {
        match self.status() {
            Status::Open => self.close(smooth, true, host),
            Status::Close => self.open(smooth, true, host),
            Status::Middle => Vec::new(),
        }
    }

    fn jump(
        &mut self,
        target: SettleTarget,
        smooth: bool,
        notify: bool,
        host: &mut dyn Host,
    ) -> Vec<SwipeEvent> {
        let mut out = Vec::new();
        let Some(geometry) = self.geometry() else {
            return out;
        };
        if smooth {
            self.start_settle(target, 0.0, notify, host);
            return out;
        }
        self.settle = None;
        if self.phase == DragPhase::Settling {
            self.phase = DragPhase::Idle;
        }
        let origin = geometry.surface_rect(target.is_open()).origin();
        if self.place_surface(origin, notify, &mut out) {
            host.request_redraw();
        }
        if !notify {
            self.lifecycle.reset();
        }
        out
    }

    // -----------------------------------------------------------------------
    // Position-change pipeline
    // -----------------------------------------------------------------------

    /// Move the surface and run the pipeline. Returns whether it moved.
    fn place_surface(&mut self, origin: Point, notify: bool, out: &mut Vec<SwipeEvent>) -> bool {
        if origin == self.surface.origin() {
            return false;
        }
        let before = self.surface.origin();
        self.surface = self.surface.with_origin(origin);
        self.layout_panels();
        if notify {
            self.notify_moved((origin.x - before.x, origin.y - before.y), out);
        }
        true
    }

    fn notify_moved(&mut self, delta: (i32, i32), out: &mut Vec<SwipeEvent>) {
        let Some(edge) = self.current_edge else {
            return;
        };
        let frame = RevealFrame {
            edge,
            show_mode: self.config.show_mode,
            content: self.content_rect(),
            surface: self.surface,
        };
        let tree = &self.tree;
        let panels = &self.panels;
        let surface = self.surface;
        self.reveal.dispatch(
            &frame,
            |child| {
                tree.rect_in_container(child, surface, |e| panels[e.index()].map(|s| s.rect))
            },
            out,
        );
        let status = self.status();
        self.lifecycle
            .dispatch(edge, status, self.offset(), delta, out);
    }

    /// Place every panel for the current surface and refresh visibility.
    fn layout_panels(&mut self) {
        let status = self.status();
        for edge in DragEdge::ALL {
            let Some(geometry) = self.geometry_for(edge) else {
                continue;
            };
            let active = self.current_edge == Some(edge);
            let surface = if active {
                self.surface
            } else {
                geometry.surface_rect(false)
            };
            if let Some(slot) = self.panels[edge.index()].as_mut() {
                slot.rect = geometry.panel_rect(surface);
                slot.visible = active && status != Status::Close;
                if active && status == Status::Open {
                    slot.enabled = true;
                }
            }
        }
    }

    /// Reposition without events: open stays open, anything else closes.
    fn snap(&mut self, open: bool) {
        self.settle = None;
        if self.phase == DragPhase::Settling {
            self.phase = DragPhase::Idle;
        }
        self.lifecycle.reset();
        self.surface = match self.geometry() {
            Some(geometry) => geometry.surface_rect(open),
            None => self.content_rect(),
        };
        self.layout_panels();
    }

    fn switch_edge(&mut self, edge: DragEdge) {
        debug!(from = ?self.current_edge, to = ?edge, "drag edge changed");
        self.current_edge = Some(edge);
        self.layout_panels();
    }

    fn rest_rect(&self) -> Rect {
        self.content_rect()
    }

    fn active_panel_rect(&self) -> Option<Rect> {
        self.current_edge.and_then(|edge| self.panel_rect(edge))
    }

    fn active_panel_hit(&self, x: i32, y: i32) -> bool {
        self.current_edge
            .and_then(|edge| self.panels[edge.index()])
            .is_some_and(|slot| slot.visible && slot.rect.contains(x, y))
    }

    // -----------------------------------------------------------------------
    // Runtime configuration
    // -----------------------------------------------------------------------

    pub fn set_show_mode(&mut self, mode: ShowMode) {
        let open = self.status() == Status::Open;
        self.config.show_mode = mode;
        self.snap(open);
    }

    pub fn set_edge_enabled(&mut self, edge: DragEdge, enabled: bool) {
        self.config.enabled_edges.set(edge.flag(), enabled);
    }

    /// Master switch. Disabling does not move the surface.
    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.config.swipe_enabled = enabled;
    }

    pub fn set_click_to_close(&mut self, enabled: bool) {
        self.config.click_to_close = enabled;
    }

    /// Replace the panel-derived drag distance with a fixed one.
    pub fn set_drag_distance(&mut self, distance: Option<i32>) {
        let open = self.status() == Status::Open;
        self.drag_distance_override = distance.map(|d| d.max(0));
        self.snap(open);
    }

    /// A panel was re-measured.
    pub fn set_panel_size(&mut self, edge: DragEdge, size: Size) -> Result<(), SwipeError> {
        let open = self.status() == Status::Open;
        let slot = self.panels[edge.index()]
            .as_mut()
            .ok_or(SwipeError::EdgeNotRegistered(edge))?;
        slot.size = size;
        self.snap(open);
        Ok(())
    }

    /// The container was re-measured.
    pub fn resize(&mut self, size: Size, padding: Sides) {
        let open = self.status() == Status::Open;
        self.bounds = size;
        self.padding = padding;
        self.snap(open);
    }

    /// Veto pointer streams at pointer-down.
    pub fn add_swipe_denier(&mut self, denier: impl Fn(&PointerEvent) -> bool + 'static) -> DenierId {
        let id = DenierId(self.next_denier);
        self.next_denier += 1;
        self.deniers.push((id, Box::new(denier)));
        id
    }

    pub fn remove_swipe_denier(&mut self, id: DenierId) -> bool {
        let before = self.deniers.len();
        self.deniers.retain(|(d, _)| *d != id);
        self.deniers.len() != before
    }

    pub fn clear_swipe_deniers(&mut self) {
        self.deniers.clear();
    }

    // -----------------------------------------------------------------------
    // Children and reveal listeners
    // -----------------------------------------------------------------------

    /// Register a child view under the surface, a panel, or another child.
    pub fn add_child(&mut self, id: ChildId, parent: ParentRef, frame: Rect) -> Result<(), SwipeError> {
        if let ParentRef::Panel(edge) = parent
            && self.panels[edge.index()].is_none()
        {
            return Err(SwipeError::EdgeNotRegistered(edge));
        }
        self.tree.insert(id, parent, frame)
    }

    pub fn set_child_frame(&mut self, id: ChildId, frame: Rect) -> Result<(), SwipeError> {
        self.tree.set_frame(id, frame)
    }

    /// Listen for reveal events of `child`.
    pub fn add_reveal_listener(&mut self, child: ChildId) -> Result<ListenerId, SwipeError> {
        if !self.tree.contains(child) {
            return Err(SwipeError::UnknownChild(child));
        }
        Ok(self.reveal.add_listener(child))
    }

    /// One listener for several children. Nothing is registered if any
    /// child is unknown.
    pub fn add_reveal_listener_to_many(
        &mut self,
        children: &[ChildId],
    ) -> Result<ListenerId, SwipeError> {
        if let Some(missing) = children.iter().find(|c| !self.tree.contains(**c)) {
            return Err(SwipeError::UnknownChild(*missing));
        }
        Ok(self.reveal.add_listener_to_many(children))
    }

    pub fn remove_reveal_listener(&mut self, child: ChildId, listener: ListenerId) -> bool {
        self.reveal.remove_listener(child, listener)
    }

    pub fn remove_all_reveal_listeners(&mut self, child: ChildId) -> usize {
        self.reveal.remove_all(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{NoopHost, RecordingHost};

    const FRAME: Duration = Duration::from_millis(16);

    fn right_layout() -> SwipeLayout {
        SwipeLayout::new(
            SwipeConfig::default(),
            Size::new(300, 60),
            Sides::default(),
            vec![PanelView::new(Size::new(100, 60))],
        )
        .unwrap()
    }

    fn drag(layout: &mut SwipeLayout, host: &mut dyn Host, path: &[(f32, f32)], v: f32) -> Vec<SwipeEvent> {
        let t = Instant::now();
        let mut events = Vec::new();
        let (x0, y0) = path[0];
        let _ = layout.on_pointer(&PointerEvent::down(x0, y0, t), host);
        for &(x, y) in &path[1..] {
            events.extend(layout.on_pointer(&PointerEvent::moved(x, y, t), host).events);
        }
        let &(xn, yn) = path.last().unwrap();
        events.extend(layout.on_pointer(&PointerEvent::up(xn, yn, v, 0.0, t), host).events);
        events
    }

    fn settle(layout: &mut SwipeLayout, host: &mut dyn Host) -> Vec<SwipeEvent> {
        let mut events = Vec::new();
        for _ in 0..200 {
            if !layout.is_settling() {
                break;
            }
            events.extend(layout.tick(FRAME, host));
        }
        events
    }

    #[test]
    fn construction_assigns_edges_in_order() {
        let config = SwipeConfig::default().with_edges(EdgeSet::LEFT | EdgeSet::RIGHT);
        let layout = SwipeLayout::new(
            config,
            Size::new(300, 60),
            Sides::default(),
            vec![PanelView::new(Size::new(80, 60)), PanelView::new(Size::new(120, 60))],
        )
        .unwrap();
        assert_eq!(layout.drag_edge(), Some(DragEdge::Left));
        assert_eq!(layout.drag_distance(), 80);
        assert_eq!(layout.panel_rect(DragEdge::Right), Some(Rect::new(300, 0, 120, 60)));
        assert_eq!(layout.panel_rect(DragEdge::Left), Some(Rect::new(-80, 0, 80, 60)));
        assert_eq!(layout.status(), Status::Close);
    }

    #[test]
    fn construction_errors() {
        let err = SwipeLayout::new(
            SwipeConfig::default(),
            Size::new(300, 60),
            Sides::default(),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, SwipeError::PanelCountMismatch { panels: 0, edges: 1 });

        let err = SwipeLayout::new(
            SwipeConfig::default(),
            Size::new(300, 60),
            Sides::default(),
            vec![
                PanelView::anchored(DragEdge::Left, Size::new(50, 60)),
                PanelView::anchored(DragEdge::Left, Size::new(50, 60)),
            ],
        )
        .unwrap_err();
        assert_eq!(err, SwipeError::DuplicatePanelEdge(DragEdge::Left));

        let err = SwipeLayout::new(
            SwipeConfig::default().with_density(-1.0),
            Size::new(300, 60),
            Sides::default(),
            vec![PanelView::new(Size::new(100, 60))],
        )
        .unwrap_err();
        assert!(matches!(err, SwipeError::InvalidConfig(_)));
    }

    #[test]
    fn anchored_panel_adds_its_edge() {
        let layout = SwipeLayout::new(
            SwipeConfig::default(),
            Size::new(300, 60),
            Sides::default(),
            vec![
                PanelView::new(Size::new(100, 60)),
                PanelView::anchored(DragEdge::Bottom, Size::new(300, 40)),
            ],
        )
        .unwrap();
        assert_eq!(layout.edges(), EdgeSet::RIGHT | EdgeSet::BOTTOM);
        assert_eq!(layout.panel_rect(DragEdge::Bottom), Some(Rect::new(0, 60, 300, 40)));
    }

    #[test]
    fn edge_offset_shortens_drag_distance() {
        let config = SwipeConfig::default()
            .with_density(2.0)
            .with_edge_offset(DragEdge::Right, 10.0);
        let layout = SwipeLayout::new(
            config,
            Size::new(300, 60),
            Sides::default(),
            vec![PanelView::new(Size::new(100, 60))],
        )
        .unwrap();
        assert_eq!(layout.drag_distance(), 80);
    }

    #[test]
    fn drag_and_settle_open() {
        let mut layout = right_layout();
        let mut host = RecordingHost::default();
        let events = drag(&mut layout, &mut host, &[(250.0, 30.0), (230.0, 30.0), (170.0, 30.0)], 0.0);
        assert_eq!(events[0], SwipeEvent::StartOpen);
        assert_eq!(layout.offset(), (-80, 0));
        assert!(events.contains(&SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 }));
        assert_eq!(layout.phase(), DragPhase::Settling);
        assert_eq!(host.intercept, vec![true, false]);

        let events = settle(&mut layout, &mut host);
        assert_eq!(events.iter().filter(|e| **e == SwipeEvent::Open).count(), 1);
        assert_eq!(layout.status(), Status::Open);
        assert_eq!(layout.phase(), DragPhase::Idle);
        assert!(layout.is_panel_visible(DragEdge::Right));
        assert!(layout.is_panel_enabled(DragEdge::Right));
        assert_eq!(layout.panel_rect(DragEdge::Right), Some(Rect::new(200, 0, 100, 60)));
    }

    #[test]
    fn movement_within_slop_is_not_a_swipe() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        let t = Instant::now();
        let _ = layout.on_pointer(&PointerEvent::down(200.0, 30.0, t), &mut host);
        let dispatch = layout.on_pointer(&PointerEvent::moved(195.0, 30.0, t), &mut host);
        assert!(!dispatch.consumed);
        assert_eq!(layout.phase(), DragPhase::Classifying);
        let dispatch = layout.on_pointer(&PointerEvent::moved(180.0, 30.0, t), &mut host);
        assert!(dispatch.consumed);
        assert_eq!(layout.phase(), DragPhase::Dragging);
        assert_eq!(layout.offset(), (-20, 0));
    }

    #[test]
    fn vertical_scroll_passes_through() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        let events = drag(&mut layout, &mut host, &[(200.0, 10.0), (195.0, 40.0), (190.0, 60.0)], 0.0);
        assert_eq!(events, vec![SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 }]);
        assert_eq!(layout.status(), Status::Close);
    }

    #[test]
    fn disabled_edge_and_master_switch_pass_through() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        layout.set_edge_enabled(DragEdge::Right, false);
        let events = drag(&mut layout, &mut host, &[(250.0, 30.0), (200.0, 30.0)], 0.0);
        assert!(events.iter().all(|e| !e.is_start() && !e.is_terminal()));
        assert_eq!(layout.status(), Status::Close);

        layout.set_edge_enabled(DragEdge::Right, true);
        layout.set_swipe_enabled(false);
        let t = Instant::now();
        assert!(!layout.on_pointer(&PointerEvent::down(250.0, 30.0, t), &mut host).consumed);
    }

    #[test]
    fn denier_vetoes_stream() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        let id = layout.add_swipe_denier(|ev| ev.x < 100.0);
        let events = drag(&mut layout, &mut host, &[(50.0, 30.0), (10.0, 30.0)], 0.0);
        assert!(events.is_empty());
        assert!(layout.remove_swipe_denier(id));
        let events = drag(&mut layout, &mut host, &[(50.0, 30.0), (10.0, 30.0)], 0.0);
        assert!(!events.is_empty());
    }

    #[test]
    fn tap_on_open_surface_closes() {
        let mut layout = right_layout();
        let mut host = RecordingHost::default();
        let _ = layout.open(false, false, &mut host);
        assert_eq!(layout.status(), Status::Open);
        let t = Instant::now();
        assert!(layout.on_pointer(&PointerEvent::down(50.0, 30.0, t), &mut host).consumed);
        let dispatch = layout.on_pointer(&PointerEvent::up(50.0, 30.0, 0.0, 0.0, t), &mut host);
        assert!(dispatch.consumed);
        let released = SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 };
        assert_eq!(dispatch.events.iter().filter(|e| **e == released).count(), 1);
        assert!(layout.is_settling());
        let events = settle(&mut layout, &mut host);
        assert_eq!(events.last(), Some(&SwipeEvent::Close));
        assert_eq!(host.item_clicks, 0);
    }

    #[test]
    fn tap_on_open_panel_reaches_host() {
        let mut layout = right_layout();
        let mut host = RecordingHost::default();
        let _ = layout.open(false, false, &mut host);
        assert_eq!(layout.panel_rect(DragEdge::Right), Some(Rect::new(200, 0, 100, 60)));
        let t = Instant::now();
        let down = layout.on_pointer(&PointerEvent::down(250.0, 30.0, t), &mut host);
        assert!(!down.consumed);
        let up = layout.on_pointer(&PointerEvent::up(250.0, 30.0, 0.0, 0.0, t), &mut host);
        assert!(!up.consumed);
        assert_eq!(up.events, vec![SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 }]);
        assert_eq!(layout.status(), Status::Open);
        assert!(!layout.is_settling());
    }

    #[test]
    fn tap_on_closed_panel_is_item_click() {
        let mut layout = right_layout();
        let mut host = RecordingHost::default();
        let t = Instant::now();
        let down = layout.on_pointer(&PointerEvent::down(50.0, 30.0, t), &mut host);
        assert!(!down.consumed);
        let up = layout.on_pointer(&PointerEvent::up(50.0, 30.0, 0.0, 0.0, t), &mut host);
        assert!(!up.consumed);
        assert_eq!(up.events, vec![SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 }]);
        assert_eq!(host.item_clicks, 1);
        let _ = layout.on_pointer(&PointerEvent::down(50.0, 30.0, t), &mut host);
        let dispatch = layout.on_pointer(&PointerEvent::up(50.0, 30.0, 0.0, 0.0, t), &mut host);
        assert_eq!(
            dispatch.events,
            vec![
                SwipeEvent::HandRelease { velocity_x: 0.0, velocity_y: 0.0 },
                SwipeEvent::DoubleTap { on_surface: true },
            ]
        );
    }

    #[test]
    fn long_press_on_closed_panel() {
        let mut layout = right_layout();
        let mut host = RecordingHost::default();
        let t = Instant::now();
        let _ = layout.on_pointer(&PointerEvent::down(50.0, 30.0, t), &mut host);
        assert!(!layout.check_long_press(t + Duration::from_millis(100), &mut host));
        assert!(layout.check_long_press(t + Duration::from_millis(600), &mut host));
        assert_eq!(host.long_clicks, 1);
        let _ = layout.on_pointer(&PointerEvent::up(50.0, 30.0, 0.0, 0.0, t), &mut host);
        assert_eq!(host.item_clicks, 0);
    }

    #[test]
    fn pointer_down_interrupts_settle() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        let _ = layout.open(true, true, &mut host);
        let _ = layout.tick(FRAME, &mut host);
        assert_eq!(layout.status(), Status::Middle);
        let frozen = layout.offset();

        let t = Instant::now();
        let _ = layout.on_pointer(&PointerEvent::down(100.0, 30.0, t), &mut host);
        assert_eq!(layout.phase(), DragPhase::Dragging);
        assert!(!layout.is_settling());
        assert!(layout.tick(FRAME, &mut host).is_empty());
        assert_eq!(layout.offset(), frozen);

        let dispatch = layout.on_pointer(&PointerEvent::moved(90.0, 30.0, t), &mut host);
        assert_eq!(layout.offset(), (frozen.0 - 10, 0));
        assert!(!dispatch.events.contains(&SwipeEvent::StartOpen));
    }

    #[test]
    fn non_notifying_jump_is_silent() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        assert!(layout.open(false, false, &mut host).is_empty());
        assert_eq!(layout.status(), Status::Open);
        assert!(layout.close(false, false, &mut host).is_empty());
        assert_eq!(layout.status(), Status::Close);
        assert!(!layout.is_panel_visible(DragEdge::Right));

        let events = layout.open(false, true, &mut host);
        assert_eq!(
            events,
            vec![
                SwipeEvent::StartOpen,
                SwipeEvent::Update { left: -100, top: 0 },
                SwipeEvent::Open,
            ]
        );
    }

    #[test]
    fn toggle_and_open_edge() {
        let config = SwipeConfig::default().with_edges(EdgeSet::LEFT | EdgeSet::RIGHT);
        let mut layout = SwipeLayout::new(
            config,
            Size::new(300, 60),
            Sides::default(),
            vec![PanelView::new(Size::new(80, 60)), PanelView::new(Size::new(120, 60))],
        )
        .unwrap();
        let mut host = NoopHost;
        let _ = layout.toggle(false, &mut host);
        assert_eq!(layout.offset(), (80, 0));
        let _ = layout.open_edge(DragEdge::Right, false, false, &mut host).unwrap();
        assert_eq!(layout.drag_edge(), Some(DragEdge::Right));
        assert_eq!(layout.offset(), (-120, 0));
        assert_eq!(
            layout.open_edge(DragEdge::Top, false, false, &mut host),
            Err(SwipeError::EdgeNotRegistered(DragEdge::Top))
        );
    }

    #[test]
    fn resize_keeps_open_state() {
        let mut layout = right_layout();
        let mut host = NoopHost;
        let _ = layout.open(false, false, &mut host);
        layout.resize(Size::new(400, 80), Sides::all(10));
        assert_eq!(layout.status(), Status::Open);
        assert_eq!(layout.surface_rect(), Rect::new(-90, 10, 380, 60));

        layout.set_drag_distance(Some(40));
        assert_eq!(layout.offset(), (-40, 0));
        layout.set_show_mode(ShowMode::LayDown);
        assert_eq!(layout.panel_rect(DragEdge::Right), Some(Rect::new(350, 10, 40, 60)));
    }

    #[test]
    fn unknown_children_are_rejected() {
        let mut layout = right_layout();
        assert_eq!(
            layout.add_reveal_listener(ChildId(1)),
            Err(SwipeError::UnknownChild(ChildId(1)))
        );
        layout
            .add_child(ChildId(1), ParentRef::Panel(DragEdge::Right), Rect::new(0, 0, 40, 60))
            .unwrap();
        assert_eq!(
            layout.add_child(ChildId(2), ParentRef::Panel(DragEdge::Left), Rect::default()),
            Err(SwipeError::EdgeNotRegistered(DragEdge::Left))
        );
        assert_eq!(
            layout.add_reveal_listener_to_many(&[ChildId(1), ChildId(5)]),
            Err(SwipeError::UnknownChild(ChildId(5)))
        );
        assert!(layout.add_reveal_listener(ChildId(1)).is_ok());
    }
}
