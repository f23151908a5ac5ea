#![forbid(unsafe_code)]

//! Tick generation: calendar boundaries along the axis.
//!
//! Boundaries are enumerated for the padded date range at the zoom level's
//! granularity, mapped to pixels, then thinned greedily left to right so no
//! two kept ticks are closer than [`ZoomLevel::tick_min_gap`].

use chrono::{Datelike, NaiveDate};
use memline_core::date::{DateRange, day_offset};
use memline_core::zoom::{TickGranularity, ZoomLevel};

/// A labeled calendar boundary on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub date: NaiveDate,
    pub label: String,
    /// Pixel offset from the left edge of the track.
    pub x: f64,
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn year_label(d: NaiveDate) -> String {
    d.year().to_string()
}

fn month_label(d: NaiveDate) -> String {
    d.format("%b %Y").to_string()
}

fn day_label(d: NaiveDate) -> String {
    d.format("%-d %b").to_string()
}

/// Every boundary of `granularity` inside `range`, with its label.
///
/// `Day` granularity is sparse: only the 1st and 15th of each month.
#[must_use]
pub fn boundaries(range: DateRange, granularity: TickGranularity) -> Vec<(NaiveDate, String)> {
    let mut out = Vec::new();
    match granularity {
        TickGranularity::Year => {
            let mut year = range.start.year();
            if range.start.ordinal() != 1 {
                year += 1;
            }
            while let Some(d) = NaiveDate::from_ymd_opt(year, 1, 1) {
                if d > range.end {
                    break;
                }
                out.push((d, year_label(d)));
                year += 1;
            }
        }
        TickGranularity::Month => {
            let (mut y, mut m) = (range.start.year(), range.start.month());
            if range.start.day() != 1 {
                (y, m) = next_month(y, m);
            }
            while let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
                if d > range.end {
                    break;
                }
                out.push((d, month_label(d)));
                (y, m) = next_month(y, m);
            }
        }
        TickGranularity::Day => {
            let (mut y, mut m) = (range.start.year(), range.start.month());
            'months: loop {
                for day in [1, 15] {
                    let Some(d) = NaiveDate::from_ymd_opt(y, m, day) else {
                        break 'months;
                    };
                    if d > range.end {
                        break 'months;
                    }
                    if d >= range.start {
                        out.push((d, day_label(d)));
                    }
                }
                (y, m) = next_month(y, m);
            }
        }
    }
    out
}

/// Drop ticks closer than `min_gap` to the previously kept tick.
///
/// The first tick is always kept. Input must be ordered by `x`.
#[must_use]
pub fn thin_ticks<I>(ticks: I, min_gap: f64) -> Vec<Tick>
where
    I: IntoIterator<Item = Tick>,
{
    let mut last_x = f64::NEG_INFINITY;
    ticks
        .into_iter()
        .filter(|t| {
            if t.x - last_x < min_gap {
                return false;
            }
            last_x = t.x;
            true
        })
        .collect()
}

/// Ticks for `range` at `level`, positioned on a track with `pad_left`.
#[must_use]
pub fn generate_ticks(range: DateRange, level: &ZoomLevel, pad_left: f64) -> Vec<Tick> {
    let placed = boundaries(range, level.tick_granularity)
        .into_iter()
        .map(|(date, label)| Tick {
            x: pad_left + level.days_to_px(day_offset(date, range.start)),
            date,
            label,
        });
    thin_ticks(placed, level.tick_min_gap())
}
