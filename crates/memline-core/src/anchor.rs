#![forbid(unsafe_code)]

//! Zoom anchors: the focal point kept stable across a zoom change.
//!
//! A track is a fixed left pad, a scaled axis, and a fixed right pad. Only
//! the axis stretches when the zoom changes, so an anchor records the focal
//! position as a fraction of the axis ([`AxisFrame`]) rather than of the
//! whole scroll width. After re-layout, scrolling to
//! `origin + focus_ratio * extent - cursor_x` puts the same date back under
//! the same screen position.

/// The scaled part of a track: where the axis starts and how long it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    /// Track x of the first day of the range.
    pub origin: f64,
    /// Pixel length of the range at the current zoom.
    pub extent: f64,
}

impl AxisFrame {
    #[must_use]
    pub const fn new(origin: f64, extent: f64) -> Self {
        Self { origin, extent }
    }

    /// A frame covering the whole track, for content without fixed pads.
    #[must_use]
    pub const fn full(scroll_width: f64) -> Self {
        Self::new(0.0, scroll_width)
    }

    /// Fraction of the axis at track x `x`, clamped to `[0, 1]`.
    fn ratio_at(&self, x: f64) -> f64 {
        ((x - self.origin) / self.extent.max(1.0)).clamp(0.0, 1.0)
    }

    /// Track x at `ratio` along the axis.
    fn x_at(&self, ratio: f64) -> f64 {
        self.origin + ratio * self.extent.max(1.0)
    }
}

/// One-shot focal point for a zoom change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomAnchor {
    /// Identifies the anchor so it is applied at most once.
    pub id: u64,
    /// Focal position as a fraction of the axis, in `[0, 1]`.
    pub focus_ratio: f64,
    /// Focal position relative to the viewport's left edge.
    pub cursor_x: f64,
}

impl ZoomAnchor {
    /// Capture the anchor for `cursor_x` given the current scroll state.
    ///
    /// A cursor over a pad anchors the nearest end of the axis. Returns
    /// `None` when the inputs produce a non-finite ratio.
    #[must_use]
    pub fn capture(id: u64, scroll_left: f64, cursor_x: f64, frame: AxisFrame) -> Option<Self> {
        let focus_ratio = frame.ratio_at(scroll_left + cursor_x);
        (focus_ratio.is_finite() && cursor_x.is_finite()).then_some(Self {
            id,
            focus_ratio,
            cursor_x,
        })
    }

    /// Scroll offset restoring the focal point on the re-laid-out `frame`.
    ///
    /// Never negative; `None` if the result is not finite.
    #[must_use]
    pub fn scroll_left_for(&self, frame: AxisFrame) -> Option<f64> {
        let left = frame.x_at(self.focus_ratio) - self.cursor_x;
        left.is_finite().then(|| left.max(0.0))
    }
}
