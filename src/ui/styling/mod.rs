//! Colors for widgets
//!
//! - [`colors`] - Color constants, the pressed-shade rule and the erase/label [`Palette`]

pub mod colors;

pub use colors::{
    BLACK, DEFAULT_TOGGLE_OFF, DEFAULT_TOGGLE_ON, GREEN, Palette, RED, WHITE, pressed_shade,
};
