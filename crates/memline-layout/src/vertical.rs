#![forbid(unsafe_code)]

//! Narrow-viewport fallback: a plain date-ordered list.

use memline_core::entry::{Entry, sort_by_date};

/// Widest viewport (in pixels) that still gets the vertical list.
pub const NARROW_VIEWPORT_MAX: f64 = 879.0;

/// Which presentation a viewport width calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Horizontal axis with lanes.
    Axis,
    /// Single column, no grouping.
    Vertical,
}

impl LayoutMode {
    /// Classify a viewport width.
    #[inline]
    #[must_use]
    pub fn for_viewport_width(width: f64) -> Self {
        if width <= NARROW_VIEWPORT_MAX {
            Self::Vertical
        } else {
            Self::Axis
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Axis => "axis",
            Self::Vertical => "vertical",
        }
    }
}

/// One row of the vertical list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalItem<'a> {
    pub entry: &'a Entry,
    pub selected: bool,
}

/// Entries in date order with the selection marked.
#[must_use]
pub fn layout_vertical<'a>(entries: &'a [Entry], selected_id: Option<&str>) -> Vec<VerticalItem<'a>> {
    sort_by_date(entries)
        .into_iter()
        .map(|entry| VerticalItem {
            entry,
            selected: selected_id.is_some_and(|id| entry.id == *id),
        })
        .collect()
}
