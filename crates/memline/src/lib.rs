#![forbid(unsafe_code)]

//! memline public facade crate.
//!
//! Re-exports the common types from the internal crates and adds the few
//! entry points a host needs to drive a timeline axis:
//!
//! 1. [`layout_axis`] turns entries into ticks and placed nodes.
//! 2. [`navigator_for`] builds a [`Navigator`] sharing the layout's zoom
//!    table, and [`attach_navigator`] wires it to the scrollable viewport.
//! 3. [`open_stack_menu`] / [`close_stack_menu`] disclose stacked entries.
//!
//! ```
//! use memline::prelude::*;
//!
//! let entries = vec![
//!     Entry::new("a", "2020-01-01", "New year"),
//!     Entry::new("b", "2020-01-01", "Fireworks"),
//!     Entry::new("c", "2020-06-15", "Summer"),
//! ];
//! let layout = memline::layout_axis(&entries, 2, None);
//! let stack = &layout.nodes[0];
//! assert!(stack.is_stack());
//!
//! let mut menu = StackMenu::default();
//! memline::open_stack_menu(
//!     &mut menu,
//!     stack,
//!     Rect::new(100.0, 80.0, 200.0, 40.0),
//!     Size::new(1280.0, 720.0),
//!     |id| println!("picked {id}"),
//! );
//! assert_eq!(menu.items().len(), 2);
//! assert!(memline::close_stack_menu(&mut menu));
//! ```

use std::fmt;

use chrono::NaiveDate;

// --- Core re-exports -------------------------------------------------------

pub use memline_core::anchor::{AxisFrame, ZoomAnchor};
pub use memline_core::date::{DateParseError, DateParseErrorKind, DateRange, parse_date};
pub use memline_core::entry::{Entry, EntryId, Media, ThumbSize};
pub use memline_core::event::{
    Key, Modifiers, PointerButton, PointerEvent, PointerEventKind, WheelEvent,
};
pub use memline_core::geometry::{Point, Rect, Size, Span};
pub use memline_core::zoom::{
    DEFAULT_ZOOM_INDEX, STANDARD_LEVELS, TickGranularity, ZoomLevel, ZoomTable, ZoomTableError,
};

// --- Layout re-exports -----------------------------------------------------

pub use memline_layout::{
    AxisLayout, GroupKind, LayoutConfig, LayoutMode, PlacedNode, Side, Tick, VerticalItem,
    layout_axis, layout_axis_with, layout_vertical,
};

// --- Widget re-exports -----------------------------------------------------

pub use memline_widgets::{
    AttachOutcome, FinishOutcome, MenuOutcome, NavOutcome, Navigator, NavigatorConfig,
    ScrollViewport, StackMenu, StackMenuConfig, StackMenuItem, ViewportId, WheelMode, ZoomHost,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for memline APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An entry date could not be read.
    Date(DateParseError),
    /// A custom zoom table was rejected.
    ZoomTable(ZoomTableError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(err) => write!(f, "{err}"),
            Self::ZoomTable(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::ZoomTable(err) => Some(err),
        }
    }
}

impl From<DateParseError> for Error {
    fn from(err: DateParseError) -> Self {
        Self::Date(err)
    }
}

impl From<ZoomTableError> for Error {
    fn from(err: ZoomTableError) -> Self {
        Self::ZoomTable(err)
    }
}

/// Standard result type for memline APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Entry points ----------------------------------------------------------

/// Calendar day of `entry`, or why it has none.
///
/// Layout never fails on bad dates; hosts use this to surface them.
pub fn entry_day(entry: &Entry) -> Result<NaiveDate> {
    Ok(parse_date(entry.date_key())?)
}

/// Entries whose dates will not place on the axis, with the reason.
pub fn undated_entries(entries: &[Entry]) -> Vec<(&EntryId, Error)> {
    entries
        .iter()
        .filter_map(|e| entry_day(e).err().map(|err| (&e.id, err)))
        .collect()
}

/// Layout config using a custom zoom table.
pub fn layout_config_with_levels(levels: &'static [ZoomLevel]) -> Result<LayoutConfig> {
    let table = ZoomTable::new(levels)?;
    Ok(LayoutConfig::default().with_zoom_table(table))
}

/// Navigator stepping through the same zoom table `config` lays out with.
#[must_use]
pub fn navigator_for<H: ZoomHost>(host: H, config: &LayoutConfig) -> Navigator<H> {
    Navigator::new(host).with_zoom_table(config.zoom_table)
}

/// Start (or keep) handling input for `viewport`.
///
/// Safe to call on every render: the same viewport is attached once, and a
/// missing one is reported so the host can retry later.
pub fn attach_navigator<H, V>(navigator: &mut Navigator<H>, viewport: Option<&V>) -> AttachOutcome
where
    H: ZoomHost,
    V: ScrollViewport,
{
    navigator.attach(viewport)
}

/// Open the disclosure menu for `node`'s members below `anchor`.
///
/// Closes any open menu first. Returns the menu bounds.
pub fn open_stack_menu<F>(
    menu: &mut StackMenu,
    node: &PlacedNode<'_>,
    anchor: Rect,
    viewport: Size,
    on_pick: F,
) -> Option<Rect>
where
    F: FnMut(&EntryId) + 'static,
{
    menu.open(anchor, node.members(), viewport, on_pick)
}

/// Close the disclosure menu. Returns whether one was open.
pub fn close_stack_menu(menu: &mut StackMenu) -> bool {
    menu.close()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AxisFrame, AxisLayout, Entry, EntryId, Error, LayoutConfig, Navigator, PlacedNode, Point, Rect,
        Result, ScrollViewport, Side, Size, StackMenu, ZoomAnchor, ZoomHost,
    };

    pub use crate::{core, layout, widgets};
}

pub use memline_core as core;
pub use memline_layout as layout;
pub use memline_widgets as widgets;
