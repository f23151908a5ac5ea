//! Property-based invariant tests for the temporal index and zoom table.
//!
//! 1. `add_days` and `day_offset` are inverses inside the calendar.
//! 2. `day_offset` is antisymmetric.
//! 3. Parsing a formatted day returns the same day.
//! 4. `pixels_per_day` strictly increases across the table.
//! 5. Zooming in never shrinks the pixel distance between two fixed dates.
//! 6. `clamp_index` always yields a valid index.
//! 7. Arbitrary strings never panic the parser.

use chrono::NaiveDate;
use memline_core::date::{DateRange, add_days, day_offset, parse_date};
use memline_core::zoom::ZoomTable;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 .. ~2100
    (0i64..73_000).prop_map(|n| add_days(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(), n))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Day arithmetic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_then_offset_is_identity(d in date_strategy(), n in -20_000i64..20_000) {
        let shifted = add_days(d, n);
        prop_assert_eq!(day_offset(shifted, d), n);
    }

    #[test]
    fn offset_is_antisymmetric(a in date_strategy(), b in date_strategy()) {
        prop_assert_eq!(day_offset(a, b), -day_offset(b, a));
    }

    #[test]
    fn parse_formatted_day(d in date_strategy()) {
        let s = d.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_date(&s), Ok(d));
    }

    #[test]
    fn range_contains_its_inputs(a in date_strategy(), b in date_strategy(), pad in 0i64..60) {
        let r = DateRange::from_dates([a, b]).unwrap().padded(pad);
        prop_assert!(r.contains(a) && r.contains(b));
        prop_assert!(r.span_days() >= 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-6. Zoom table
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn pixels_per_day_strictly_increases() {
    let table = ZoomTable::standard();
    let ppd: Vec<f64> = table.iter().map(|l| l.pixels_per_day).collect();
    assert!(ppd.windows(2).all(|w| w[1] > w[0]), "{ppd:?}");
}

proptest! {
    #[test]
    fn zooming_in_never_shrinks_distance(a in date_strategy(), b in date_strategy()) {
        let table = ZoomTable::standard();
        let days = day_offset(a, b).abs();
        let mut last = -1.0;
        for level in table.iter() {
            let px = level.days_to_px(days);
            prop_assert!(px >= last, "{} px at {} after {}", px, level.id, last);
            last = px;
        }
    }

    #[test]
    fn clamp_index_is_valid(i in any::<i64>()) {
        let table = ZoomTable::standard();
        prop_assert!(table.clamp_index(i) < table.len());
    }

    #[test]
    fn parser_never_panics(s in "\\PC{0,24}") {
        let _ = parse_date(&s);
    }
}
