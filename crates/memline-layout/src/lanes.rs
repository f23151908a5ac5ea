#![forbid(unsafe_code)]

//! Lane bookkeeping for collision-free placement.
//!
//! Each side of the axis keeps `last_right[lane]`, the right edge of the
//! node most recently placed in that lane. A node spanning `[x1, x2]` fits
//! lane `k` when `last_right[k] + gap <= x1`; the first fitting lane wins and
//! a new lane is opened when none fits.
//!
//! # Invariants
//!
//! 1. Within one side and lane, every node starts at least `gap` pixels after
//!    the right edge of the node placed there before it.
//! 2. Consequently `last_right[k]` only grows, so *all* nodes in a lane are
//!    pairwise separated, not just neighbours.
//! 3. The preferred side is used whenever its lane 0 fits; otherwise the
//!    node goes to the other side's first fitting lane.

use memline_core::geometry::Span;

/// Which half of the axis a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// The other half.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Side preferred for the `index`-th candidate: alternating, `Up` first.
    #[must_use]
    pub const fn alternating(index: usize) -> Self {
        if index % 2 == 0 { Self::Up } else { Self::Down }
    }

    /// CSS-friendly name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Per-side lane occupancy.
#[derive(Debug, Clone, Default)]
pub struct LaneAllocator {
    gap: f64,
    up: Vec<f64>,
    down: Vec<f64>,
}

impl LaneAllocator {
    /// Create an allocator requiring `gap` pixels between nodes in a lane.
    #[must_use]
    pub fn new(gap: f64) -> Self {
        Self {
            gap,
            up: Vec::new(),
            down: Vec::new(),
        }
    }

    /// Required clearance.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    fn lanes(&self, side: Side) -> &[f64] {
        match side {
            Side::Up => &self.up,
            Side::Down => &self.down,
        }
    }

    fn lanes_mut(&mut self, side: Side) -> &mut Vec<f64> {
        match side {
            Side::Up => &mut self.up,
            Side::Down => &mut self.down,
        }
    }

    fn fits(&self, last_right: f64, span: Span) -> bool {
        span.start >= last_right + self.gap
    }

    /// Whether lane 0 on `side` can take `span`.
    #[must_use]
    pub fn lane_zero_free(&self, side: Side, span: Span) -> bool {
        self.lanes(side)
            .first()
            .is_none_or(|&right| self.fits(right, span))
    }

    /// First lane on `side` that can take `span` (may be a new lane).
    #[must_use]
    pub fn find_lane(&self, side: Side, span: Span) -> usize {
        let lanes = self.lanes(side);
        lanes
            .iter()
            .position(|&right| self.fits(right, span))
            .unwrap_or(lanes.len())
    }

    /// Occupy `lane` on `side` with `span`.
    pub fn occupy(&mut self, side: Side, lane: usize, span: Span) {
        let lanes = self.lanes_mut(side);
        if lane < lanes.len() {
            lanes[lane] = span.end;
        } else {
            lanes.push(span.end);
        }
    }

    /// Place `span`, preferring `preferred`, and return where it went.
    pub fn place(&mut self, span: Span, preferred: Side) -> (Side, usize) {
        let side = if self.lane_zero_free(preferred, span) {
            preferred
        } else {
            preferred.opposite()
        };
        let lane = self.find_lane(side, span);
        self.occupy(side, lane, span);
        (side, lane)
    }

    /// Number of lanes opened on `side`.
    #[must_use]
    pub fn lane_count(&self, side: Side) -> usize {
        self.lanes(side).len()
    }
}
