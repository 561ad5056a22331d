// src/ui/mod.rs
//! Widget definitions for the touch layer
//!
//! - Core geometry and touch types shared by every widget
//! - The two widget kinds (momentary button, toggle button)
//! - The closed [`Widget`] variant the registry stores
//! - Colors and the label renderer

pub mod components;
pub mod core;
pub mod styling;
pub mod widget;

// Re-export commonly used items
pub use components::{MomentaryButton, ToggleButton};
pub use core::{Bounds, MAX_LABEL_LEN, TouchPoint, WidgetError, WidgetHandle};
pub use styling::Palette;
pub use widget::{Fire, Widget};
