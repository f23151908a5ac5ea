#![forbid(unsafe_code)]

//! Zoom table: the fixed, ordered set of axis resolutions.
//!
//! # Invariants
//!
//! 1. A table is non-empty.
//! 2. `pixels_per_day` strictly increases with the index (coarse → fine).
//! 3. The finest level never allows grouping, so every entry is individually
//!    reachable at maximum detail.
//! 4. Any index handed out by [`ZoomTable::clamp_index`] is valid.

use std::fmt;

/// Calendar boundary that ticks are generated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickGranularity {
    /// One tick per January 1st.
    Year,
    /// One tick per first-of-month.
    Month,
    /// Ticks on the 1st and 15th of each month.
    Day,
}

/// One row of the zoom table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    /// Stable identifier (`far`, `year`, ...).
    pub id: &'static str,
    /// Label shown in zoom controls.
    pub label: &'static str,
    /// Horizontal scale.
    pub pixels_per_day: f64,
    /// Which calendar boundaries get ticks.
    pub tick_granularity: TickGranularity,
    /// Whether same-day entries collapse into stacks at this level.
    pub allows_grouping: bool,
    /// Whether node labels are always rendered (affects width estimates).
    pub always_shows_labels: bool,
}

impl ZoomLevel {
    /// Minimum pixel distance between two kept ticks.
    ///
    /// Coarse levels need wider spacing because their labels are longer
    /// relative to the distance between boundaries.
    #[must_use]
    pub fn tick_min_gap(&self) -> f64 {
        if self.pixels_per_day < 1.0 {
            110.0
        } else if self.pixels_per_day < 3.0 {
            80.0
        } else {
            60.0
        }
    }

    /// Horizontal clearance required between two nodes in the same lane.
    #[must_use]
    pub fn node_gap(&self) -> f64 {
        if self.pixels_per_day < 1.0 {
            120.0
        } else if self.pixels_per_day < 3.0 {
            96.0
        } else if self.pixels_per_day < 8.0 {
            78.0
        } else {
            66.0
        }
    }

    /// Pixel distance covered by `days`, rounded to whole pixels.
    #[inline]
    #[must_use]
    pub fn days_to_px(&self, days: i64) -> f64 {
        (days as f64 * self.pixels_per_day).round()
    }
}

/// The levels used by the timeline browser.
pub const STANDARD_LEVELS: [ZoomLevel; 5] = [
    ZoomLevel {
        id: "far",
        label: "Far",
        pixels_per_day: 0.2,
        tick_granularity: TickGranularity::Year,
        allows_grouping: true,
        always_shows_labels: false,
    },
    ZoomLevel {
        id: "year",
        label: "Year",
        pixels_per_day: 0.7,
        tick_granularity: TickGranularity::Month,
        allows_grouping: true,
        always_shows_labels: false,
    },
    ZoomLevel {
        id: "month",
        label: "Month",
        pixels_per_day: 2.2,
        tick_granularity: TickGranularity::Month,
        allows_grouping: true,
        always_shows_labels: false,
    },
    ZoomLevel {
        id: "near",
        label: "Near",
        pixels_per_day: 7.5,
        tick_granularity: TickGranularity::Day,
        allows_grouping: true,
        always_shows_labels: false,
    },
    ZoomLevel {
        id: "close",
        label: "Detail",
        pixels_per_day: 18.0,
        tick_granularity: TickGranularity::Day,
        allows_grouping: false,
        always_shows_labels: true,
    },
];

/// Index a fresh viewport starts at (`Year`).
pub const DEFAULT_ZOOM_INDEX: usize = 1;

/// A custom table violated one of the module invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoomTableError {
    /// No levels at all.
    Empty,
    /// Level `index` is not finer than the level before it.
    NotIncreasing { index: usize },
    /// The finest level allows grouping.
    FinestGroups,
}

impl fmt::Display for ZoomTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "zoom table has no levels"),
            Self::NotIncreasing { index } => {
                write!(f, "zoom level {index} is not finer than level {}", index - 1)
            }
            Self::FinestGroups => write!(f, "finest zoom level must not group entries"),
        }
    }
}

impl std::error::Error for ZoomTableError {}

/// Ordered, immutable list of zoom levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTable {
    levels: &'static [ZoomLevel],
}

impl Default for ZoomTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ZoomTable {
    /// The five-level table (`Far` … `Detail`).
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            levels: &STANDARD_LEVELS,
        }
    }

    /// Build a table from custom levels, checking the invariants.
    pub fn new(levels: &'static [ZoomLevel]) -> Result<Self, ZoomTableError> {
        let Some(last) = levels.last() else {
            return Err(ZoomTableError::Empty);
        };
        // NaN never compares greater, so it is rejected here too.
        if let Some(index) = (1..levels.len())
            .find(|&i| !(levels[i].pixels_per_day > levels[i - 1].pixels_per_day))
        {
            return Err(ZoomTableError::NotIncreasing { index });
        }
        if last.allows_grouping {
            return Err(ZoomTableError::FinestGroups);
        }
        Ok(Self { levels })
    }

    /// Number of levels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the finest level.
    #[must_use]
    pub const fn finest_index(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Clamp any integer into a valid index.
    #[must_use]
    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.finest_index() as i64) as usize
    }

    /// Level at `index`, clamped.
    #[must_use]
    pub fn level_at(&self, index: usize) -> &'static ZoomLevel {
        &self.levels[index.min(self.finest_index())]
    }

    /// Move `delta` levels from `index` (positive = finer), clamped.
    #[must_use]
    pub fn step(&self, index: usize, delta: i64) -> usize {
        self.clamp_index((index as i64).saturating_add(delta))
    }

    /// Whether `index` (clamped) is the finest level.
    #[must_use]
    pub fn is_finest(&self, index: usize) -> bool {
        index >= self.finest_index()
    }

    /// Iterate levels from coarsest to finest.
    pub fn iter(&self) -> impl Iterator<Item = &'static ZoomLevel> {
        self.levels.iter()
    }
}
