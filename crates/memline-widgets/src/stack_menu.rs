#![forbid(unsafe_code)]

//! Disclosure menu for stacked entries.
//!
//! When several entries share one axis position the host shows a single
//! stack node; activating it opens a [`StackMenu`] listing the members.
//! Only one menu is ever open: opening another closes the first.

use memline_core::entry::{Entry, EntryId};
use memline_core::event::Key;
use memline_core::geometry::{Point, Rect, Size};
use unicode_width::UnicodeWidthStr;

/// Menu geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackMenuConfig {
    /// Height of one row (default: 44).
    pub item_height: f64,
    /// Narrowest menu (default: 220).
    pub min_width: f64,
    /// Widest menu (default: 340).
    pub max_width: f64,
    /// Approximate pixels per title column (default: 7.5).
    pub column_width: f64,
    /// Inner padding around the rows (default: 6).
    pub padding: f64,
    /// Gap between the anchor's bottom edge and the menu (default: 8).
    pub offset_y: f64,
    /// Minimum distance from the viewport edge (default: 8).
    pub margin: f64,
}

impl Default for StackMenuConfig {
    fn default() -> Self {
        Self {
            item_height: 44.0,
            min_width: 220.0,
            max_width: 340.0,
            column_width: 7.5,
            padding: 6.0,
            offset_y: 8.0,
            margin: 8.0,
        }
    }
}

impl StackMenuConfig {
    #[must_use]
    pub fn with_item_height(mut self, height: f64) -> Self {
        self.item_height = height;
        self
    }

    #[must_use]
    pub fn with_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_width = min;
        self.max_width = max.max(min);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    fn menu_width(&self, members: &[&Entry]) -> f64 {
        let columns = members
            .iter()
            .map(|e| e.display_title().width().max(e.date_label().width()))
            .max()
            .unwrap_or(0);
        let w = columns as f64 * self.column_width + 2.0 * self.padding;
        w.clamp(self.min_width, self.max_width.max(self.min_width))
    }
}

/// One row of an open menu.
#[derive(Debug, Clone, PartialEq)]
pub struct StackMenuItem {
    pub id: EntryId,
    pub title: String,
    pub date_label: String,
    /// Row bounds in viewport coordinates.
    pub rect: Rect,
}

/// Result of feeding input to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// No menu open, or the input means nothing to it.
    Ignored,
    /// Input landed on the menu but not on a row.
    Inside,
    /// The highlight moved to this row.
    Highlighted(usize),
    /// A member was picked; the menu is closed.
    Picked(EntryId),
    /// Dismissed without a pick.
    Closed,
}

type PickHandler = Box<dyn FnMut(&EntryId)>;

struct OpenMenu {
    anchor: Rect,
    rect: Rect,
    items: Vec<StackMenuItem>,
    highlighted: usize,
    on_pick: PickHandler,
}

/// Single-slot popover listing the members of a stack.
pub struct StackMenu {
    config: StackMenuConfig,
    open: Option<OpenMenu>,
}

impl std::fmt::Debug for StackMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackMenu")
            .field("config", &self.config)
            .field("open", &self.open.as_ref().map(|m| m.items.len()))
            .finish()
    }
}

impl Default for StackMenu {
    fn default() -> Self {
        Self::new(StackMenuConfig::default())
    }
}

impl StackMenu {
    #[must_use]
    pub fn new(config: StackMenuConfig) -> Self {
        Self { config, open: None }
    }

    pub fn config(&self) -> &StackMenuConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Rows of the open menu; empty when closed.
    pub fn items(&self) -> &[StackMenuItem] {
        self.open.as_ref().map_or(&[], |m| m.items.as_slice())
    }

    /// Menu bounds in viewport coordinates.
    pub fn rect(&self) -> Option<Rect> {
        self.open.as_ref().map(|m| m.rect)
    }

    /// Bounds of the node the menu was opened from.
    pub fn anchor(&self) -> Option<Rect> {
        self.open.as_ref().map(|m| m.anchor)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.open.as_ref().map(|m| m.highlighted)
    }

    /// Open a menu for `members` below `anchor`, replacing any open menu.
    ///
    /// The menu is kept inside a viewport of `viewport` size. Returns its
    /// bounds, or `None` (and nothing open) when `members` is empty.
    pub fn open<F>(&mut self, anchor: Rect, members: &[&Entry], viewport: Size, on_pick: F) -> Option<Rect>
    where
        F: FnMut(&EntryId) + 'static,
    {
        self.close();
        if members.is_empty() {
            return None;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("stack_menu.open", members = members.len()).entered();

        let cfg = &self.config;
        let width = self.config.menu_width(members);
        let height = 2.0 * cfg.padding + members.len() as f64 * cfg.item_height;
        let raw = Rect::new(
            anchor.center_x() - width / 2.0,
            anchor.bottom() + cfg.offset_y,
            width,
            height,
        );
        let rect = raw.clamp_within(Rect::from_size(viewport), cfg.margin);

        let items = members
            .iter()
            .enumerate()
            .map(|(i, e)| StackMenuItem {
                id: e.id.clone(),
                title: e.display_title().to_string(),
                date_label: e.date_label(),
                rect: Rect::new(
                    rect.x + cfg.padding,
                    rect.y + cfg.padding + i as f64 * cfg.item_height,
                    rect.width - 2.0 * cfg.padding,
                    cfg.item_height,
                ),
            })
            .collect();

        memline_core::debug!(
            members = members.len(),
            x = rect.x,
            y = rect.y,
            "stack menu opened"
        );
        self.open = Some(OpenMenu {
            anchor,
            rect,
            items,
            highlighted: 0,
            on_pick: Box::new(on_pick),
        });
        Some(rect)
    }

    /// Close the menu. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.open.take().is_some();
        if was_open {
            memline_core::debug!("stack menu closed");
        }
        was_open
    }

    fn pick(&mut self, index: usize) -> MenuOutcome {
        let Some(mut menu) = self.open.take() else {
            return MenuOutcome::Ignored;
        };
        let Some(item) = menu.items.get(index) else {
            self.open = Some(menu);
            return MenuOutcome::Ignored;
        };
        let id = item.id.clone();
        memline_core::debug!(id = %id, "stack member picked");
        (menu.on_pick)(&id);
        MenuOutcome::Picked(id)
    }

    /// Handle a click at `point` (viewport coordinates).
    pub fn handle_click(&mut self, point: Point) -> MenuOutcome {
        let Some(menu) = &self.open else {
            return MenuOutcome::Ignored;
        };
        if !menu.rect.contains(point) {
            self.close();
            return MenuOutcome::Closed;
        }
        match menu.items.iter().position(|it| it.rect.contains(point)) {
            Some(index) => self.pick(index),
            None => MenuOutcome::Inside,
        }
    }

    /// Handle a key press while the menu is open.
    pub fn handle_key(&mut self, key: Key) -> MenuOutcome {
        let Some(menu) = &mut self.open else {
            return MenuOutcome::Ignored;
        };
        let last = menu.items.len().saturating_sub(1);
        match key {
            Key::Escape => {
                self.close();
                MenuOutcome::Closed
            }
            Key::Up => {
                menu.highlighted = menu.highlighted.saturating_sub(1);
                MenuOutcome::Highlighted(menu.highlighted)
            }
            Key::Down => {
                menu.highlighted = (menu.highlighted + 1).min(last);
                MenuOutcome::Highlighted(menu.highlighted)
            }
            Key::Enter | Key::Space => {
                let index = menu.highlighted;
                self.pick(index)
            }
            Key::Other => MenuOutcome::Ignored,
        }
    }
}
