#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Hosts translate their native pointer, wheel, and keyboard events into
//! these before handing them to the navigator or the stack menu.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport-relative pixels (`clientX - rect.left`)
//! - Wheel deltas keep the browser sign convention: positive `delta_y` is
//!   "scroll down"
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button (usually left).
    Primary,
    /// Middle button.
    Auxiliary,
    /// Secondary button (usually right).
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Pointer moved (with or without a button held).
    Move,
    /// Button released.
    Up(PointerButton),
    /// The platform cancelled the pointer stream.
    Cancel,
    /// Pointer left the viewport.
    Leave,
}

/// A pointer event relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A wheel event relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Pointer x at the time of the gesture.
    pub x: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Vertical wheel gesture at pointer `x`.
    #[must_use]
    pub const fn vertical(x: f64, delta_y: f64) -> Self {
        Self {
            x,
            delta_x: 0.0,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the horizontal delta.
    #[must_use]
    pub const fn with_delta_x(mut self, delta_x: f64) -> Self {
        self.delta_x = delta_x;
        self
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Up,
    Down,
    /// Anything else.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            _ => Self::Other,
        }
    }

    /// Whether this key activates a focused node or item.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_codes() {
        assert_eq!(PointerButton::from_dom(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_dom(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_dom(7), None);
    }

    #[test]
    fn dom_keys() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert!(Key::from_dom("Enter").is_activation());
        assert!(!Key::from_dom("a").is_activation());
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn builders() {
        let w = WheelEvent::vertical(10.0, -3.0)
            .with_delta_x(2.0)
            .with_modifiers(Modifiers::SHIFT);
        assert_eq!(w.delta_x, 2.0);
        assert!(w.modifiers.contains(Modifiers::SHIFT));
        let p = PointerEvent::new(PointerEventKind::Move, 4.0, 5.0);
        assert_eq!(p.position(), Point::new(4.0, 5.0));
    }
}
