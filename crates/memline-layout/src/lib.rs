#![forbid(unsafe_code)]

//! Axis layout for dated entries.
//!
//! This crate turns an ordered list of entries into renderable geometry:
//!
//! - [`ticks`] - calendar boundary marks, thinned to a minimum spacing
//! - [`group`] - same-day stacks at coarse zoom levels
//! - [`width`] - conservative label width estimates
//! - [`lanes`] - per-side lane allocation that keeps labels from overlapping
//! - [`vertical`] - the plain list used on narrow viewports
//!
//! [`layout_axis`] is the entry point. It is a pure function: the same
//! entries, zoom index, and selection always produce the same geometry, and
//! it never touches scroll state.
//!
//! ```
//! use memline_core::entry::Entry;
//! use memline_layout::layout_axis;
//!
//! let entries = vec![
//!     Entry::new("a", "2020-01-01", "New year"),
//!     Entry::new("b", "2020-01-01", "Same day"),
//!     Entry::new("c", "2020-06-15", "Summer"),
//! ];
//! let month = layout_axis(&entries, 2, None);
//! assert_eq!(month.nodes.len(), 2);
//! assert!(month.nodes[0].is_stack());
//!
//! let detail = layout_axis(&entries, 4, Some("c"));
//! assert_eq!(detail.nodes.len(), 3);
//! assert!(detail.nodes[2].selected);
//! ```

pub mod group;
pub mod lanes;
pub mod ticks;
pub mod vertical;
pub mod width;

use chrono::NaiveDate;
use memline_core::anchor::AxisFrame;
use memline_core::date::{DateRange, day_offset};
use memline_core::entry::{Entry, EntryId, sort_by_date};
use memline_core::geometry::Span;
use memline_core::zoom::{ZoomLevel, ZoomTable};

pub use group::{EntryGroup, GroupKind, group_entries};
pub use lanes::{LaneAllocator, Side};
pub use ticks::{Tick, generate_ticks};
pub use vertical::{LayoutMode, VerticalItem, layout_vertical};
pub use width::{WidthBounds, WidthEstimator, estimate_node_width};

/// Layout tunables.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Space before the first day of the range (default: 260).
    pub pad_left: f64,
    /// Space after the last day of the range (default: 260).
    pub pad_right: f64,
    /// The track is never narrower than this (default: 900).
    pub min_track_width: f64,
    /// Days added on both sides of the entry date range (default: 20).
    pub range_padding_days: i64,
    /// Clamp range for node widths.
    pub width_bounds: WidthBounds,
    /// Zoom levels to index into.
    pub zoom_table: ZoomTable,
    /// Replacement for the built-in width heuristic.
    pub width_estimator: Option<WidthEstimator>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pad_left: 260.0,
            pad_right: 260.0,
            min_track_width: 900.0,
            range_padding_days: 20,
            width_bounds: WidthBounds::default(),
            zoom_table: ZoomTable::standard(),
            width_estimator: None,
        }
    }
}

impl LayoutConfig {
    /// Set both horizontal paddings.
    #[must_use]
    pub fn with_padding(mut self, left: f64, right: f64) -> Self {
        self.pad_left = left;
        self.pad_right = right;
        self
    }

    /// Set the minimum track width.
    #[must_use]
    pub fn with_min_track_width(mut self, width: f64) -> Self {
        self.min_track_width = width;
        self
    }

    /// Set the date range padding.
    #[must_use]
    pub fn with_range_padding(mut self, days: i64) -> Self {
        self.range_padding_days = days;
        self
    }

    /// Set the width clamp range.
    #[must_use]
    pub fn with_width_bounds(mut self, bounds: WidthBounds) -> Self {
        self.width_bounds = bounds;
        self
    }

    /// Use a custom zoom table.
    #[must_use]
    pub fn with_zoom_table(mut self, table: ZoomTable) -> Self {
        self.zoom_table = table;
        self
    }

    /// Use measured widths instead of the heuristic.
    ///
    /// Non-finite or negative results fall back to the heuristic.
    #[must_use]
    pub fn with_width_estimator(mut self, estimator: WidthEstimator) -> Self {
        self.width_estimator = Some(estimator);
        self
    }

    fn node_width(&self, group: &EntryGroup<'_>, level: &ZoomLevel) -> f64 {
        let heuristic = || estimate_node_width(group, level, self.width_bounds);
        match self.width_estimator {
            Some(measure) => {
                let w = measure(group, level);
                if w.is_finite() && w >= 0.0 { w } else { heuristic() }
            }
            None => heuristic(),
        }
    }
}

/// Geometry for one entry or one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode<'a> {
    /// Center of the node, in track pixels.
    pub x: f64,
    pub side: Side,
    /// Stacking depth within the side, 0 nearest the axis line.
    pub lane: usize,
    /// Width used for collision checks.
    pub width: f64,
    /// Never empty; the first member positions the node.
    members: Vec<&'a Entry>,
    /// Whether any member is the selected entry.
    pub selected: bool,
    /// False when the positioning date was missing or unparseable.
    pub dated: bool,
}

impl<'a> PlacedNode<'a> {
    /// Entries shown by this node, in date order.
    #[must_use]
    pub fn members(&self) -> &[&'a Entry] {
        &self.members
    }

    #[must_use]
    pub fn kind(&self) -> GroupKind {
        if self.members.len() > 1 {
            GroupKind::Stack
        } else {
            GroupKind::Single
        }
    }

    #[must_use]
    pub fn is_stack(&self) -> bool {
        self.kind() == GroupKind::Stack
    }

    /// The entry that positions the node.
    #[must_use]
    pub fn primary(&self) -> &'a Entry {
        self.members[0]
    }

    /// Id of the primary entry; the node's identity for rendering.
    #[must_use]
    pub fn id(&self) -> &'a EntryId {
        &self.primary().id
    }

    /// Horizontal extent of the label box.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::centered(self.x, self.width)
    }

    /// Whether `id` is one of the members.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|e| e.id == *id)
    }
}

/// Everything a host needs to draw the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout<'a> {
    /// Clamped zoom index the layout was computed for.
    pub zoom_index: usize,
    pub level: &'static ZoomLevel,
    /// Padded date range; `None` when no entry has a usable date.
    pub range: Option<DateRange>,
    /// Left padding; x of the first day of the range.
    pub pad_left: f64,
    /// Full scrollable width of the track.
    pub track_width: f64,
    /// Collision gap used for lane placement.
    pub node_gap: f64,
    pub ticks: Vec<Tick>,
    /// Nodes in date order.
    pub nodes: Vec<PlacedNode<'a>>,
}

impl<'a> AxisLayout<'a> {
    /// True when there were no entries; hosts render an empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node holding the selected entry.
    #[must_use]
    pub fn selected_node(&self) -> Option<&PlacedNode<'a>> {
        self.nodes.iter().find(|n| n.selected)
    }

    /// Node holding the entry `id`.
    #[must_use]
    pub fn node_for(&self, id: &str) -> Option<&PlacedNode<'a>> {
        self.nodes.iter().find(|n| n.contains(id))
    }

    /// The scaled part of the track, for zoom anchoring.
    ///
    /// Starts at `pad_left` and spans the range at the layout's zoom. Without
    /// a range it spans a single day, as the track does.
    #[must_use]
    pub fn frame(&self) -> AxisFrame {
        let span_days = self.range.map_or(1, |r| r.span_days());
        AxisFrame::new(self.pad_left, span_days as f64 * self.level.pixels_per_day)
    }

    /// Track x of `date`, if the layout has a range.
    #[must_use]
    pub fn x_for_date(&self, date: NaiveDate) -> Option<f64> {
        let range = self.range?;
        Some(self.pad_left + self.level.days_to_px(day_offset(date, range.start)))
    }

    /// Number of lanes used on `side`.
    #[must_use]
    pub fn lane_count(&self, side: Side) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.side == side)
            .map(|n| n.lane + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Lay out `entries` at `zoom_index` with the default configuration.
#[must_use]
pub fn layout_axis<'a>(
    entries: &'a [Entry],
    zoom_index: usize,
    selected_id: Option<&str>,
) -> AxisLayout<'a> {
    layout_axis_with(&LayoutConfig::default(), entries, zoom_index, selected_id)
}

/// Lay out `entries` at `zoom_index` with `config`.
#[must_use]
pub fn layout_axis_with<'a>(
    config: &LayoutConfig,
    entries: &'a [Entry],
    zoom_index: usize,
    selected_id: Option<&str>,
) -> AxisLayout<'a> {
    let zoom_index = zoom_index.min(config.zoom_table.finest_index());
    let level = config.zoom_table.level_at(zoom_index);

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "axis_layout",
        entries = entries.len(),
        zoom = level.id,
    )
    .entered();

    let sorted = sort_by_date(entries);
    let range = DateRange::from_dates(sorted.iter().filter_map(|e| e.day()))
        .map(|r| r.padded(config.range_padding_days));
    let span_days = range.map_or(1, |r| r.span_days());
    let track_width = config
        .min_track_width
        .max(config.pad_left + level.days_to_px(span_days) + config.pad_right);

    let ticks = range
        .map(|r| generate_ticks(r, level, config.pad_left))
        .unwrap_or_default();

    let groups = group_entries(&sorted, level);
    let gap = level.node_gap();
    let mut lanes = LaneAllocator::new(gap);
    let mut nodes = Vec::with_capacity(groups.len());

    for (i, group) in groups.into_iter().enumerate() {
        let rep = group.representative();
        let day = rep.day();
        let x = match (day, range) {
            (Some(d), Some(r)) => config.pad_left + level.days_to_px(day_offset(d, r.start)),
            _ => {
                memline_core::debug!(id = %rep.id, date = ?rep.date, "entry has no usable date; pinned at range start");
                config.pad_left
            }
        };
        let width = config.node_width(&group, level);
        let (side, lane) = lanes.place(Span::centered(x, width), Side::alternating(i));
        let members = group.into_members();
        let selected = selected_id.is_some_and(|id| members.iter().any(|e| e.id == *id));
        nodes.push(PlacedNode {
            x,
            side,
            lane,
            width,
            members,
            selected,
            dated: day.is_some(),
        });
    }

    memline_core::trace!(
        nodes = nodes.len(),
        ticks = ticks.len(),
        track_width,
        "axis layout complete"
    );

    AxisLayout {
        zoom_index,
        level,
        range,
        pad_left: config.pad_left,
        track_width,
        node_gap: gap,
        ticks,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("c", "2020-06-15", "Summer"),
            Entry::new("a", "2020-01-01", "New year"),
            Entry::new("b", "2020-01-01", "Same day"),
        ]
    }

    #[test]
    fn empty_input_is_empty_layout() {
        let layout = layout_axis(&[], 1, None);
        assert!(layout.is_empty());
        assert!(layout.ticks.is_empty());
        assert_eq!(layout.range, None);
        assert_eq!(layout.track_width, 900.0);
    }

    #[test]
    fn single_entry_sits_on_its_date_in_lane_zero() {
        let entries = vec![Entry::new("a", "2020-01-01", "Only")];
        let layout = layout_axis(&entries, 4, Some("a"));
        assert_eq!(layout.nodes.len(), 1);
        let node = &layout.nodes[0];
        // 20 days of padding at 18 px/day
        assert_eq!(node.x, 260.0 + 360.0);
        assert_eq!((node.side, node.lane), (Side::Up, 0));
        assert!(node.selected);
        assert_eq!(layout.selected_node().map(|n| n.id().as_str()), Some("a"));
    }

    #[test]
    fn track_width_follows_range() {
        let entries = sample();
        // 2019-12-12 .. 2020-07-05 = 206 days
        let layout = layout_axis(&entries, 4, None);
        assert_eq!(layout.track_width, 260.0 + (206.0f64 * 18.0).round() + 260.0);
        let far = layout_axis(&entries, 0, None);
        assert_eq!(far.track_width, 900.0);
    }

    #[test]
    fn month_zoom_stacks_and_detail_does_not() {
        let entries = sample();
        let month = layout_axis(&entries, 2, Some("b"));
        assert_eq!(month.nodes.len(), 2);
        assert!(month.nodes[0].is_stack());
        assert!(month.nodes[0].selected);
        let ids: Vec<&str> = month.nodes[0].members().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let detail = layout_axis(&entries, 4, Some("b"));
        assert_eq!(detail.nodes.len(), 3);
        assert!(detail.nodes.iter().all(|n| !n.is_stack()));
        // Same x for the same-day pair, kept apart by side/lane.
        assert_eq!(detail.nodes[0].x, detail.nodes[1].x);
        assert_ne!(
            (detail.nodes[0].side, detail.nodes[0].lane),
            (detail.nodes[1].side, detail.nodes[1].lane)
        );
    }

    #[test]
    fn undated_entries_are_pinned_not_dropped() {
        let entries = vec![
            Entry::undated("u", "No date"),
            Entry::new("bad", "someday", "Bad date"),
            Entry::new("a", "2020-01-01", "Dated"),
        ];
        let layout = layout_axis(&entries, 2, None);
        assert_eq!(layout.nodes.len(), 3);
        let undated: Vec<&PlacedNode<'_>> = layout.nodes.iter().filter(|n| !n.dated).collect();
        assert_eq!(undated.len(), 2);
        assert!(undated.iter().all(|n| n.x == layout.pad_left));
        // The range only covers the parseable date.
        let range = layout.range.unwrap();
        assert_eq!(range.span_days(), 40);
    }

    #[test]
    fn all_undated_still_lays_out() {
        let entries = vec![Entry::undated("u1", "a"), Entry::undated("u2", "b")];
        let layout = layout_axis(&entries, 1, None);
        assert_eq!(layout.nodes.len(), 2);
        assert!(layout.ticks.is_empty());
        assert_eq!(layout.x_for_date(NaiveDate::MIN), None);
    }

    #[test]
    fn out_of_range_zoom_is_clamped() {
        let entries = sample();
        let layout = layout_axis(&entries, 99, None);
        assert_eq!(layout.zoom_index, 4);
        assert_eq!(layout.level.label, "Detail");
    }

    #[test]
    fn deterministic() {
        let entries = sample();
        assert_eq!(layout_axis(&entries, 3, Some("a")), layout_axis(&entries, 3, Some("a")));
    }

    #[test]
    fn custom_estimator_replaces_heuristic() {
        fn fixed(_: &EntryGroup<'_>, _: &ZoomLevel) -> f64 {
            42.0
        }
        fn broken(_: &EntryGroup<'_>, _: &ZoomLevel) -> f64 {
            f64::NAN
        }
        let entries = sample();
        let cfg = LayoutConfig::default().with_width_estimator(fixed);
        let layout = layout_axis_with(&cfg, &entries, 4, None);
        assert!(layout.nodes.iter().all(|n| n.width == 42.0));

        let cfg = LayoutConfig::default().with_width_estimator(broken);
        let layout = layout_axis_with(&cfg, &entries, 4, None);
        assert!(layout.nodes.iter().all(|n| n.width >= 180.0));
    }

    #[test]
    fn x_for_date_matches_nodes() {
        let entries = sample();
        let layout = layout_axis(&entries, 3, None);
        let d = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert_eq!(layout.x_for_date(d), Some(layout.nodes.last().unwrap().x));
    }

    #[test]
    fn frame_spans_range_not_pads() {
        let entries = sample();
        let detail = layout_axis(&entries, 4, None);
        assert_eq!(detail.frame(), AxisFrame::new(260.0, 206.0 * 18.0));

        // The minimum track width pads the right end; the axis keeps its scale.
        let far = layout_axis(&entries, 0, None);
        assert_eq!(far.track_width, 900.0);
        assert!((far.frame().extent - 206.0 * 0.2).abs() < 1e-9);

        assert_eq!(layout_axis(&[], 2, None).frame(), AxisFrame::new(260.0, 2.2));
    }
}
