#![forbid(unsafe_code)]

//! Viewport navigation: drag-to-pan, wheel zoom, and zoom anchoring.
//!
//! A [`Navigator`] sits between a host's scrollable viewport and its zoom
//! state. It never computes layout; it only moves `scroll_left` and asks the
//! [`ZoomHost`] to change the zoom index.
//!
//! # Event flow
//!
//! ```text
//! pointer down ──► PanGesture::Pressed ──(|dx| > threshold)──► Dragging
//!        │                  │                                   │
//!        │                  └──────────── up / cancel / leave ──┴──► Idle
//!        │                                                 (drag arms click suppression)
//! wheel ─┼─► pan modifier held? ──► scroll_left += dx + dy
//!        └─► otherwise ──► ZoomHost::set_zoom_index(next, anchor)
//!
//! host re-lays out ──► finish_layout() ──► apply anchor once, or center once
//! ```
//!
//! # Invariants
//!
//! 1. Events are ignored until [`Navigator::attach`] has seen the viewport.
//! 2. `scroll_left` is always clamped to `[0, scroll_width - client_width]`.
//! 3. An anchor id is applied at most once.
//! 4. The selected node is centered at most once per navigator.
//!
//! # Example
//!
//! ```
//! use memline_core::anchor::ZoomAnchor;
//! use memline_core::event::WheelEvent;
//! use memline_widgets::navigator::{FinishOutcome, Navigator, ScrollViewport, ViewportId, ZoomHost};
//!
//! struct Track { left: f64, width: f64 }
//! impl ScrollViewport for Track {
//!     fn id(&self) -> ViewportId { ViewportId(1) }
//!     fn scroll_left(&self) -> f64 { self.left }
//!     fn set_scroll_left(&mut self, left: f64) { self.left = left; }
//!     fn scroll_width(&self) -> f64 { self.width }
//!     fn client_width(&self) -> f64 { 800.0 }
//! }
//!
//! #[derive(Default)]
//! struct Zoom { index: usize }
//! impl ZoomHost for Zoom {
//!     fn zoom_index(&self) -> usize { self.index }
//!     fn set_zoom_index(&mut self, next: usize, _anchor: Option<ZoomAnchor>) { self.index = next; }
//! }
//!
//! let mut track = Track { left: 400.0, width: 2000.0 };
//! let mut nav = Navigator::new(Zoom { index: 1 });
//! nav.attach(Some(&track));
//!
//! // Scroll up over x = 300: zoom in one level.
//! nav.handle_wheel(&mut track, WheelEvent::vertical(300.0, -120.0));
//! assert_eq!(nav.host().index, 2);
//!
//! // The host re-renders at the new zoom; the anchor keeps the date under x = 300.
//! track.width = 4000.0;
//! assert_eq!(nav.finish_layout(&mut track, None), FinishOutcome::Anchored(1100.0));
//! ```

use std::time::{Duration, Instant};

use memline_core::anchor::{AxisFrame, ZoomAnchor};
use memline_core::event::{Modifiers, PointerButton, PointerEvent, PointerEventKind, WheelEvent};
use memline_core::zoom::ZoomTable;

// ---------------------------------------------------------------------------
// Host seams
// ---------------------------------------------------------------------------

/// Stable identity of a viewport across renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportId(pub u64);

/// A horizontally scrollable element.
pub trait ScrollViewport {
    fn id(&self) -> ViewportId;
    fn scroll_left(&self) -> f64;
    fn set_scroll_left(&mut self, left: f64);
    /// Full width of the scrollable content.
    fn scroll_width(&self) -> f64;
    /// Visible width.
    fn client_width(&self) -> f64;

    /// Largest valid `scroll_left`.
    fn max_scroll_left(&self) -> f64 {
        (self.scroll_width() - self.client_width()).max(0.0)
    }

    /// The part of the content that scales with zoom.
    ///
    /// Defaults to the whole scroll width. Hosts rendering an axis with fixed
    /// pads return the current layout's frame so anchors ignore the pads.
    fn axis_frame(&self) -> AxisFrame {
        AxisFrame::full(self.scroll_width())
    }
}

/// Owner of the zoom index.
pub trait ZoomHost {
    fn zoom_index(&self) -> usize;

    /// Switch to `next`. When `anchor` is present the host must re-lay out
    /// and then call [`Navigator::finish_layout`] before handling more input.
    fn set_zoom_index(&mut self, next: usize, anchor: Option<ZoomAnchor>);

    /// Any pan or zoom interaction started.
    fn on_interact(&mut self) {}
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What an unmodified wheel gesture does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelMode {
    /// Wheel zooms; the pan modifier makes it pan.
    #[default]
    Zoom,
    /// Wheel pans; the pan modifier makes it zoom.
    Pan,
}

/// Navigator tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorConfig {
    /// Horizontal travel in pixels before a press becomes a drag (default: 3).
    pub drag_threshold: f64,
    /// How long clicks are suppressed after a drag (default: 160 ms).
    pub click_suppression: Duration,
    /// Modifier that swaps wheel zoom and wheel pan (default: Shift).
    pub pan_modifier: Modifiers,
    pub wheel_mode: WheelMode,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            click_suppression: Duration::from_millis(160),
            pan_modifier: Modifiers::SHIFT,
            wheel_mode: WheelMode::Zoom,
        }
    }
}

impl NavigatorConfig {
    #[must_use]
    pub fn with_threshold(mut self, px: f64) -> Self {
        self.drag_threshold = px;
        self
    }

    #[must_use]
    pub fn with_click_suppression(mut self, window: Duration) -> Self {
        self.click_suppression = window;
        self
    }

    #[must_use]
    pub fn with_pan_modifier(mut self, modifier: Modifiers) -> Self {
        self.pan_modifier = modifier;
        self
    }

    #[must_use]
    pub fn with_wheel_mode(mut self, mode: WheelMode) -> Self {
        self.wheel_mode = mode;
        self
    }
}

// ---------------------------------------------------------------------------
// PanGesture
// ---------------------------------------------------------------------------

/// Press/drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    /// Button down, not yet past the threshold.
    Pressed { origin_x: f64, start_left: f64 },
    /// Past the threshold; the release will not count as a click.
    Dragging { origin_x: f64, start_left: f64 },
}

/// Drag-to-pan state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGesture {
    state: PanState,
    threshold: f64,
}

impl PanGesture {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            state: PanState::Idle,
            threshold,
        }
    }

    #[must_use]
    pub fn state(&self) -> PanState {
        self.state
    }

    /// A button is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, PanState::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PanState::Dragging { .. })
    }

    /// Begin a gesture at pointer `x` with the viewport at `scroll_left`.
    pub fn press(&mut self, x: f64, scroll_left: f64) {
        self.state = PanState::Pressed {
            origin_x: x,
            start_left: scroll_left,
        };
    }

    /// Scroll offset for the pointer at `x`, or `None` when idle.
    ///
    /// Once the gesture turns into a drag it stays one until released.
    pub fn motion(&mut self, x: f64) -> Option<f64> {
        let (origin_x, start_left) = match self.state {
            PanState::Idle => return None,
            PanState::Pressed {
                origin_x,
                start_left,
            }
            | PanState::Dragging {
                origin_x,
                start_left,
            } => (origin_x, start_left),
        };
        let dx = x - origin_x;
        if dx.abs() > self.threshold {
            self.state = PanState::Dragging {
                origin_x,
                start_left,
            };
        }
        Some(start_left - dx)
    }

    /// End the gesture. Returns whether it was a drag.
    pub fn release(&mut self) -> bool {
        let was_drag = self.is_dragging();
        self.state = PanState::Idle;
        was_drag
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of [`Navigator::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// Same viewport as before; nothing changed.
    AlreadyAttached,
    /// No viewport yet; call again after the next render.
    Missing,
}

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavOutcome {
    /// Not attached to this viewport, or not an event the navigator uses.
    Ignored,
    /// Cursor or press state changed; scroll did not.
    Tracked,
    /// Scrolled to the contained offset.
    Panned(f64),
    /// The pointer gesture ended.
    Released { was_drag: bool },
    /// The host was asked to switch zoom levels.
    ZoomRequested {
        next: usize,
        anchor: Option<ZoomAnchor>,
    },
    /// Already at the end of the zoom table.
    AtLimit,
}

/// What [`Navigator::finish_layout`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinishOutcome {
    /// A pending anchor moved the viewport to this offset.
    Anchored(f64),
    /// The selected node was centered at this offset.
    Centered(f64),
    Unchanged,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Pan and zoom controller for one viewport.
#[derive(Debug)]
pub struct Navigator<H> {
    host: H,
    config: NavigatorConfig,
    zoom_table: ZoomTable,
    viewport: Option<ViewportId>,
    gesture: PanGesture,
    cursor_x: Option<f64>,
    suppress_until: Option<Instant>,
    pending: Option<ZoomAnchor>,
    next_anchor_id: u64,
    applied_anchor: Option<u64>,
    centered: bool,
}

impl<H: ZoomHost> Navigator<H> {
    /// Create a navigator with the default config and zoom table.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, NavigatorConfig::default())
    }

    #[must_use]
    pub fn with_config(host: H, config: NavigatorConfig) -> Self {
        Self {
            host,
            config,
            zoom_table: ZoomTable::standard(),
            viewport: None,
            gesture: PanGesture::new(config.drag_threshold),
            cursor_x: None,
            suppress_until: None,
            pending: None,
            next_anchor_id: 1,
            applied_anchor: None,
            centered: false,
        }
    }

    /// Use a custom zoom table. Must match the table the host lays out with;
    /// `memline::navigator_for` takes both from one `LayoutConfig`.
    #[must_use]
    pub fn with_zoom_table(mut self, table: ZoomTable) -> Self {
        self.zoom_table = table;
        self
    }

    pub fn zoom_table(&self) -> &ZoomTable {
        &self.zoom_table
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn gesture(&self) -> &PanGesture {
        &self.gesture
    }

    /// Last pointer x over the viewport, cleared when the pointer leaves.
    pub fn cursor_x(&self) -> Option<f64> {
        self.cursor_x
    }

    pub fn is_hovered(&self) -> bool {
        self.cursor_x.is_some()
    }

    /// Anchor waiting for the next [`finish_layout`](Self::finish_layout).
    pub fn pending_anchor(&self) -> Option<&ZoomAnchor> {
        self.pending.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    /// Start handling events for `viewport`.
    ///
    /// Idempotent per viewport id. A different viewport replaces the old one
    /// and resets gesture and cursor state.
    pub fn attach<V: ScrollViewport>(&mut self, viewport: Option<&V>) -> AttachOutcome {
        let Some(viewport) = viewport else {
            return AttachOutcome::Missing;
        };
        let id = viewport.id();
        if self.viewport == Some(id) {
            return AttachOutcome::AlreadyAttached;
        }
        memline_core::debug!(viewport = id.0, "navigator attached");
        self.viewport = Some(id);
        self.gesture.release();
        self.cursor_x = None;
        AttachOutcome::Attached
    }

    /// Stop handling events.
    pub fn detach(&mut self) {
        self.viewport = None;
        self.gesture.release();
        self.cursor_x = None;
    }

    fn accepts<V: ScrollViewport>(&self, viewport: &V) -> bool {
        self.viewport == Some(viewport.id())
    }

    fn clamp_scroll<V: ScrollViewport>(viewport: &V, left: f64) -> f64 {
        left.clamp(0.0, viewport.max_scroll_left())
    }

    fn scroll_to<V: ScrollViewport>(viewport: &mut V, left: f64) -> f64 {
        let left = Self::clamp_scroll(viewport, left);
        viewport.set_scroll_left(left);
        left
    }

    fn current_zoom(&self) -> usize {
        let index = i64::try_from(self.host.zoom_index()).unwrap_or(i64::MAX);
        self.zoom_table.clamp_index(index)
    }

    fn new_anchor(&mut self, scroll_left: f64, cursor_x: f64, frame: AxisFrame) -> Option<ZoomAnchor> {
        let id = self.next_anchor_id;
        self.next_anchor_id = self.next_anchor_id.wrapping_add(1);
        ZoomAnchor::capture(id, scroll_left, cursor_x, frame)
    }

    fn request_zoom(&mut self, next: usize, anchor: Option<ZoomAnchor>) -> NavOutcome {
        memline_core::debug!(
            next,
            anchor = ?anchor.map(|a| a.id),
            "zoom requested"
        );
        self.pending = anchor;
        self.host.set_zoom_index(next, anchor);
        NavOutcome::ZoomRequested { next, anchor }
    }

    fn track_cursor<V: ScrollViewport>(&mut self, viewport: &V, x: f64) {
        if x.is_finite() {
            self.cursor_x = Some(x.clamp(0.0, viewport.client_width().max(0.0)));
        }
    }

    fn end_gesture(&mut self, now: Instant) -> NavOutcome {
        let was_drag = self.gesture.release();
        if was_drag {
            self.suppress_until = now.checked_add(self.config.click_suppression);
        }
        NavOutcome::Released { was_drag }
    }

    /// Feed a pointer event from `viewport`.
    pub fn handle_pointer<V: ScrollViewport>(
        &mut self,
        viewport: &mut V,
        event: PointerEvent,
        now: Instant,
    ) -> NavOutcome {
        if !self.accepts(viewport) {
            return NavOutcome::Ignored;
        }
        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => {
                self.track_cursor(viewport, event.x);
                self.host.on_interact();
                self.gesture.press(event.x, viewport.scroll_left());
                NavOutcome::Tracked
            }
            PointerEventKind::Down(_) => NavOutcome::Ignored,
            PointerEventKind::Move => {
                self.track_cursor(viewport, event.x);
                match self.gesture.motion(event.x) {
                    Some(left) if left.is_finite() => {
                        NavOutcome::Panned(Self::scroll_to(viewport, left))
                    }
                    _ => NavOutcome::Tracked,
                }
            }
            PointerEventKind::Up(_) | PointerEventKind::Cancel => self.end_gesture(now),
            PointerEventKind::Leave => {
                self.cursor_x = None;
                self.end_gesture(now)
            }
        }
    }

    /// Whether a click at `now` follows a drag too closely to count.
    #[must_use]
    pub fn should_suppress_click(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Feed a wheel event from `viewport`.
    pub fn handle_wheel<V: ScrollViewport>(&mut self, viewport: &mut V, event: WheelEvent) -> NavOutcome {
        if !self.accepts(viewport) {
            return NavOutcome::Ignored;
        }
        self.host.on_interact();

        let modifier = self.config.pan_modifier;
        let modifier_held = !modifier.is_empty() && event.modifiers.contains(modifier);
        let pans = (self.config.wheel_mode == WheelMode::Pan) != modifier_held;

        if pans || event.delta_y == 0.0 {
            let delta = event.delta_x + event.delta_y;
            if !delta.is_finite() || delta == 0.0 {
                return NavOutcome::Tracked;
            }
            let left = Self::scroll_to(viewport, viewport.scroll_left() + delta);
            return NavOutcome::Panned(left);
        }
        if event.delta_y.is_nan() {
            return NavOutcome::Tracked;
        }

        let current = self.current_zoom();
        let step = if event.delta_y > 0.0 { -1 } else { 1 };
        let next = self.zoom_table.step(current, step);
        if next == current {
            memline_core::trace!(current, "wheel zoom at table end");
            return NavOutcome::AtLimit;
        }
        let anchor = self.new_anchor(viewport.scroll_left(), event.x, viewport.axis_frame());
        self.request_zoom(next, anchor)
    }

    /// Zoom by `delta` levels from a button or shortcut.
    ///
    /// The focal point is the hovered cursor, else `selected_center` (track
    /// x of the selected node), else the middle of the viewport.
    pub fn zoom_by<V: ScrollViewport>(
        &mut self,
        viewport: Option<&V>,
        delta: i64,
        selected_center: Option<f64>,
    ) -> NavOutcome {
        let current = self.current_zoom();
        let next = self.zoom_table.step(current, delta);
        let viewport = viewport.filter(|v| self.accepts(*v));

        let Some(viewport) = viewport.filter(|_| next != current) else {
            self.host.set_zoom_index(next, None);
            return if next == current {
                NavOutcome::AtLimit
            } else {
                NavOutcome::ZoomRequested { next, anchor: None }
            };
        };

        let scroll_left = viewport.scroll_left();
        let client = viewport.client_width().max(0.0);
        let cursor_x = self
            .cursor_x
            .or_else(|| {
                selected_center
                    .map(|c| (c - scroll_left).clamp(0.0, client))
                    .filter(|x| x.is_finite())
            })
            .unwrap_or(client / 2.0);
        let anchor = self.new_anchor(scroll_left, cursor_x, viewport.axis_frame());
        self.request_zoom(next, anchor)
    }

    /// Restore a specific anchor. Ids already applied are skipped.
    ///
    /// Returns the new offset, or `None` if nothing moved.
    pub fn apply_anchor<V: ScrollViewport>(&mut self, viewport: &mut V, anchor: ZoomAnchor) -> Option<f64> {
        if !self.accepts(viewport) || self.applied_anchor == Some(anchor.id) {
            return None;
        }
        self.applied_anchor = Some(anchor.id);
        let Some(target) = anchor.scroll_left_for(viewport.axis_frame()) else {
            memline_core::debug!(anchor = anchor.id, "anchor ignored: non-finite scroll target");
            return None;
        };
        let left = Self::scroll_to(viewport, target);
        memline_core::debug!(anchor = anchor.id, scroll_left = left, "anchor applied");
        Some(left)
    }

    /// Call after every render of the axis.
    ///
    /// Consumes the pending anchor if there is one. Otherwise, the first time
    /// a selection is known, centers it.
    pub fn finish_layout<V: ScrollViewport>(
        &mut self,
        viewport: &mut V,
        selected_center: Option<f64>,
    ) -> FinishOutcome {
        if !self.accepts(viewport) {
            return FinishOutcome::Unchanged;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "navigator.finish_layout",
            scroll_width = viewport.scroll_width(),
            pending = self.pending.is_some(),
        )
        .entered();

        if let Some(anchor) = self.pending.take()
            && self.applied_anchor != Some(anchor.id)
        {
            return match self.apply_anchor(viewport, anchor) {
                Some(left) => FinishOutcome::Anchored(left),
                None => FinishOutcome::Unchanged,
            };
        }

        if !self.centered
            && let Some(center) = selected_center.filter(|c| c.is_finite())
        {
            self.centered = true;
            let left = Self::scroll_to(viewport, center - viewport.client_width() / 2.0);
            return FinishOutcome::Centered(left);
        }
        FinishOutcome::Unchanged
    }
}
