#![forbid(unsafe_code)]

//! Interactive pieces of the timeline: viewport navigation and the stack
//! disclosure menu.

pub mod navigator;
pub mod stack_menu;

pub use navigator::{
    AttachOutcome, FinishOutcome, NavOutcome, Navigator, NavigatorConfig, PanGesture, PanState,
    ScrollViewport, ViewportId, WheelMode, ZoomHost,
};
pub use stack_menu::{MenuOutcome, StackMenu, StackMenuConfig, StackMenuItem};
