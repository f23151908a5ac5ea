//! Property-based invariant tests for axis placement.
//!
//! 1. Nodes sharing a side and lane never come closer than the node gap.
//! 2. Kept ticks are at least the minimum tick gap apart and lie on the track.
//! 3. Every entry is shown by exactly one node, at every zoom level.
//! 4. The finest level shows one node per entry; grouping is idempotent.
//! 5. Zooming in never reduces the distance between two dated nodes.
//! 6. Undated entries sit at the left padding.
//! 7. At most one node is selected, and it holds the selected entry.
//! 8. Layout is deterministic.

use std::collections::HashMap;

use chrono::NaiveDate;
use memline_core::date::add_days;
use memline_core::entry::{Entry, sort_by_date};
use memline_core::zoom::ZoomTable;
use memline_layout::{AxisLayout, Side, group_entries, layout_axis};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct EntrySeed {
    day: Option<i64>,
    title_len: usize,
    summary: bool,
    media: bool,
}

fn seed_strategy() -> impl Strategy<Value = EntrySeed> {
    (
        prop_oneof![9 => (0i64..1500).prop_map(Some), 1 => Just(None)],
        0usize..80,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(day, title_len, summary, media)| EntrySeed {
            day,
            title_len,
            summary,
            media,
        })
}

fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(seed_strategy(), 0..60).prop_map(|seeds| {
        let epoch = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let id = format!("e{i}");
                let title = "t".repeat(s.title_len);
                let mut e = match s.day {
                    Some(n) => Entry::new(id, add_days(epoch, n).to_string(), title),
                    None => Entry::undated(id, title),
                };
                if s.summary {
                    e = e.with_summary("summary");
                }
                if s.media {
                    e = e.with_image("https://example.org/a.jpg");
                }
                e
            })
            .collect()
    })
}

fn zoom_strategy() -> impl Strategy<Value = usize> {
    0usize..ZoomTable::standard().len()
}

fn assert_lanes_clear(layout: &AxisLayout<'_>) -> Result<(), TestCaseError> {
    let mut last_end: HashMap<(Side, usize), f64> = HashMap::new();
    for node in &layout.nodes {
        let span = node.span();
        if let Some(&end) = last_end.get(&(node.side, node.lane)) {
            prop_assert!(
                span.start >= end + layout.node_gap,
                "lane {:?}/{} overlap: start {} < {} + {}",
                node.side,
                node.lane,
                span.start,
                end,
                layout.node_gap
            );
        }
        last_end.insert((node.side, node.lane), span.end);
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn same_lane_nodes_never_overlap(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        assert_lanes_clear(&layout)?;
    }

    #[test]
    fn ticks_are_thinned_and_on_track(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        let min_gap = layout.level.tick_min_gap();
        for pair in layout.ticks.windows(2) {
            prop_assert!(pair[1].x - pair[0].x >= min_gap);
        }
        for tick in &layout.ticks {
            prop_assert!(tick.x >= layout.pad_left);
            prop_assert!(tick.x <= layout.track_width);
        }
        prop_assert!(layout.track_width >= 900.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Grouping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_entry_shown_once(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        let mut seen: Vec<&str> = layout
            .nodes
            .iter()
            .flat_map(|n| n.members().iter().map(|e| e.id.as_str()))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn finest_level_has_no_stacks(entries in entries_strategy()) {
        let table = ZoomTable::standard();
        let layout = layout_axis(&entries, table.finest_index(), None);
        prop_assert_eq!(layout.nodes.len(), entries.len());
        for zoom in 0..table.finest_index() {
            prop_assert!(layout_axis(&entries, zoom, None).nodes.len() <= entries.len());
        }
    }

    #[test]
    fn grouping_is_idempotent(entries in entries_strategy(), zoom in zoom_strategy()) {
        let table = ZoomTable::standard();
        let level = table.level_at(zoom);
        let sorted = sort_by_date(&entries);
        let groups = group_entries(&sorted, level);
        prop_assert_eq!(&group_entries(&sorted, level), &groups);

        // Flattening the groups and grouping again changes nothing.
        let flat: Vec<&Entry> = groups.iter().flat_map(|g| g.members().iter().copied()).collect();
        prop_assert_eq!(&flat, &sorted);
        prop_assert_eq!(group_entries(&flat, level), groups);

        let finest = group_entries(&sorted, table.level_at(table.finest_index()));
        prop_assert_eq!(finest.len(), entries.len());
    }

    #[test]
    fn nodes_are_never_empty(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        for node in &layout.nodes {
            prop_assert!(!node.members().is_empty());
            prop_assert_eq!(node.primary().id.as_str(), node.members()[0].id.as_str());
        }
    }

    #[test]
    fn stack_members_share_a_day(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        for node in layout.nodes.iter().filter(|n| n.is_stack()) {
            let key = node.primary().date_key();
            prop_assert!(node.members().iter().all(|e| e.date_key() == key));
            prop_assert!(node.dated);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-8. Zoom monotonicity, undated entries, selection, determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_in_spreads_nodes(entries in entries_strategy(), zoom in 0usize..4) {
        let finest = ZoomTable::standard().finest_index();
        let coarse = layout_axis(&entries, zoom, None);
        let fine = layout_axis(&entries, finest, None);
        let dated: Vec<&Entry> = entries.iter().filter(|e| e.day().is_some()).collect();
        for pair in dated.windows(2) {
            let (a, b) = (pair[0].id.as_str(), pair[1].id.as_str());
            let dist = |l: &AxisLayout<'_>| {
                let xa = l.node_for(a).map(|n| n.x).unwrap_or_default();
                let xb = l.node_for(b).map(|n| n.x).unwrap_or_default();
                (xa - xb).abs()
            };
            // Each x is rounded to whole pixels.
            prop_assert!(dist(&fine) + 1.0 >= dist(&coarse));
        }
    }

    #[test]
    fn undated_nodes_are_pinned(entries in entries_strategy(), zoom in zoom_strategy()) {
        let layout = layout_axis(&entries, zoom, None);
        for node in layout.nodes.iter().filter(|n| !n.dated) {
            prop_assert_eq!(node.x, layout.pad_left);
            prop_assert!(!node.is_stack());
        }
    }

    #[test]
    fn selection_marks_one_node(entries in entries_strategy(), zoom in zoom_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!entries.is_empty());
        let target = entries[pick.index(entries.len())].id.as_str();
        let layout = layout_axis(&entries, zoom, Some(target));
        let selected: Vec<_> = layout.nodes.iter().filter(|n| n.selected).collect();
        prop_assert_eq!(selected.len(), 1);
        prop_assert!(selected[0].contains(target));
    }

    #[test]
    fn layout_is_deterministic(entries in entries_strategy(), zoom in zoom_strategy()) {
        prop_assert_eq!(layout_axis(&entries, zoom, Some("e0")), layout_axis(&entries, zoom, Some("e0")));
    }
}
