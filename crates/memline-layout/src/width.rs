#![forbid(unsafe_code)]

//! Label width estimation.
//!
//! The placement engine only needs a conservative width per node, not a
//! pixel-exact one. The heuristic grows with title length and with every
//! optional part of the label (summary line, media preview, stack badge,
//! always-on labels at the finest zoom) and is clamped to [`WidthBounds`].
//! Hosts that can measure rendered labels may plug in their own estimator
//! through [`LayoutConfig::with_width_estimator`](crate::LayoutConfig::with_width_estimator).

use memline_core::zoom::ZoomLevel;
use unicode_width::UnicodeWidthStr;

use crate::group::EntryGroup;

/// Width of a label with a short title and nothing else.
pub const BASE_WIDTH: f64 = 190.0;
/// Titles up to this many display columns add nothing.
pub const TITLE_FREE_COLUMNS: usize = 18;
/// Pixels added per title column beyond [`TITLE_FREE_COLUMNS`].
pub const TITLE_PX_PER_COLUMN: f64 = 3.0;
/// Cap on the title contribution.
pub const TITLE_EXTRA_MAX: f64 = 90.0;
pub const SUMMARY_EXTRA: f64 = 40.0;
pub const MEDIA_EXTRA: f64 = 60.0;
pub const FULL_LABEL_EXTRA: f64 = 40.0;
pub const STACK_EXTRA: f64 = 24.0;

/// Signature of a custom width estimator.
pub type WidthEstimator = fn(&EntryGroup<'_>, &ZoomLevel) -> f64;

/// Clamp range for estimated widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for WidthBounds {
    fn default() -> Self {
        Self {
            min: 180.0,
            max: 340.0,
        }
    }
}

impl WidthBounds {
    /// Clamp `w` into the bounds. Non-finite input maps to `min`.
    #[must_use]
    pub fn clamp(&self, w: f64) -> f64 {
        if w.is_finite() {
            w.clamp(self.min, self.max.max(self.min))
        } else {
            self.min
        }
    }
}

/// Heuristic label width for `group` at `level`, before clamping.
#[must_use]
pub fn raw_node_width(group: &EntryGroup<'_>, level: &ZoomLevel) -> f64 {
    let rep = group.representative();
    let columns = rep.display_title().width();
    let title_extra = (columns.saturating_sub(TITLE_FREE_COLUMNS) as f64 * TITLE_PX_PER_COLUMN)
        .min(TITLE_EXTRA_MAX);

    let mut w = BASE_WIDTH + title_extra;
    if rep.has_summary() {
        w += SUMMARY_EXTRA;
    }
    if group.members().iter().any(|e| e.has_media()) {
        w += MEDIA_EXTRA;
    }
    if level.always_shows_labels {
        w += FULL_LABEL_EXTRA;
    }
    if group.is_stack() {
        w += STACK_EXTRA;
    }
    w
}

/// Estimated node width, clamped to `bounds`.
#[must_use]
pub fn estimate_node_width(group: &EntryGroup<'_>, level: &ZoomLevel, bounds: WidthBounds) -> f64 {
    bounds.clamp(raw_node_width(group, level))
}
