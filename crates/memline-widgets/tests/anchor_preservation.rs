//! Anchor preservation across zoom changes.
//!
//! The date under the cursor before a zoom must be under the same screen
//! position afterwards, within one pixel, whenever the viewport can scroll
//! far enough to put it there. Tracks carry fixed pads on both sides; only
//! the axis between them scales.

use memline_core::anchor::{AxisFrame, ZoomAnchor};
use memline_core::event::WheelEvent;
use memline_widgets::{FinishOutcome, NavOutcome, Navigator, ScrollViewport, ViewportId, ZoomHost};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A track of `pad + axis + pad` pixels.
struct Viewport {
    left: f64,
    pad: f64,
    axis: f64,
    client: f64,
}

impl ScrollViewport for Viewport {
    fn id(&self) -> ViewportId {
        ViewportId(7)
    }
    fn scroll_left(&self) -> f64 {
        self.left
    }
    fn set_scroll_left(&mut self, left: f64) {
        self.left = left;
    }
    fn scroll_width(&self) -> f64 {
        self.axis + 2.0 * self.pad
    }
    fn client_width(&self) -> f64 {
        self.client
    }
    fn axis_frame(&self) -> AxisFrame {
        AxisFrame::new(self.pad, self.axis)
    }
}

#[derive(Default)]
struct Host {
    index: usize,
    last_anchor: Option<ZoomAnchor>,
}

impl ZoomHost for Host {
    fn zoom_index(&self) -> usize {
        self.index
    }
    fn set_zoom_index(&mut self, next: usize, anchor: Option<ZoomAnchor>) {
        self.index = next;
        self.last_anchor = anchor;
    }
}

#[test]
fn wheel_zoom_keeps_cursor_date() {
    let mut vp = Viewport {
        left: 400.0,
        pad: 0.0,
        axis: 2000.0,
        client: 800.0,
    };
    let mut nav = Navigator::new(Host {
        index: 1,
        ..Host::default()
    });
    nav.attach(Some(&vp));

    let outcome = nav.handle_wheel(&mut vp, WheelEvent::vertical(300.0, -100.0));
    let NavOutcome::ZoomRequested {
        next,
        anchor: Some(anchor),
    } = outcome
    else {
        panic!("expected a zoom request, got {outcome:?}");
    };
    assert_eq!(next, 2);
    assert!((anchor.focus_ratio - 0.35).abs() < 1e-12);
    assert_eq!(anchor.cursor_x, 300.0);
    assert_eq!(nav.host().last_anchor, Some(anchor));

    vp.axis = 4000.0;
    assert_eq!(nav.finish_layout(&mut vp, Some(10.0)), FinishOutcome::Anchored(1100.0));
    assert_eq!(vp.left, 1100.0);
}

#[test]
fn padded_track_keeps_cursor_date() {
    // 260 px pads; the axis grows from 2584 to 8122 px.
    let mut vp = Viewport {
        left: 80.0,
        pad: 260.0,
        axis: 2584.0,
        client: 1000.0,
    };
    let mut nav = Navigator::new(Host {
        index: 1,
        ..Host::default()
    });
    nav.attach(Some(&vp));

    let focal = (vp.left + 300.0 - vp.pad) / vp.axis;
    nav.handle_wheel(&mut vp, WheelEvent::vertical(300.0, -1.0));
    vp.axis = 8122.0;
    nav.finish_layout(&mut vp, None);

    let screen_x = vp.pad + focal * vp.axis - vp.left;
    assert!((screen_x - 300.0).abs() <= 1.0, "focal date drifted to {screen_x}");
}

proptest! {
    #[test]
    fn focal_point_survives_zoom(
        pad in 0.0f64..400.0,
        axis in 500.0f64..20_000.0,
        client in 300.0f64..900.0,
        left_frac in 0.0f64..1.0,
        cursor_frac in 0.0f64..1.0,
        scale in 1.5f64..30.0,
    ) {
        let width = axis + 2.0 * pad;
        prop_assume!(width > client);
        let left = left_frac * (width - client);
        let cursor = cursor_frac * client;

        // Position of the cursor date along the axis; pads hold no dates.
        let focal = (left + cursor - pad) / axis;
        prop_assume!((0.0..=1.0).contains(&focal));

        let mut vp = Viewport { left, pad, axis, client };
        let mut nav = Navigator::new(Host { index: 1, ..Host::default() });
        nav.attach(Some(&vp));
        let outcome = nav.handle_wheel(&mut vp, WheelEvent::vertical(cursor, -1.0));
        let is_zoom = matches!(outcome, NavOutcome::ZoomRequested { next: 2, anchor: Some(_) });
        prop_assert!(is_zoom);

        vp.axis = axis * scale;
        let target = pad + focal * vp.axis - cursor;
        prop_assume!(target >= 0.0 && target <= vp.scroll_width() - client);

        nav.finish_layout(&mut vp, None);
        let focal_screen_x = pad + focal * vp.axis - vp.left;
        prop_assert!((focal_screen_x - cursor).abs() <= 1.0);
    }

    #[test]
    fn anchor_applies_once(axis in 1000.0f64..5000.0, cursor in 0.0f64..800.0) {
        let mut vp = Viewport { left: 100.0, pad: 260.0, axis, client: 800.0 };
        let mut nav = Navigator::new(Host { index: 2, ..Host::default() });
        nav.attach(Some(&vp));
        nav.handle_wheel(&mut vp, WheelEvent::vertical(cursor, 1.0));
        vp.axis = axis / 2.0;
        let first = nav.finish_layout(&mut vp, None);
        prop_assert!(matches!(first, FinishOutcome::Anchored(_)));
        vp.left = 3.0;
        prop_assert_eq!(nav.finish_layout(&mut vp, None), FinishOutcome::Unchanged);
        prop_assert_eq!(vp.left, 3.0);
    }
}
