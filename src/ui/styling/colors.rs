//! Color definitions for the widget layer
//!
//! All colors are RGB565, the native format of the small SPI panels this
//! crate targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

// ============================================================================
// Base Colors
// ============================================================================

/// Erase color and default label pen
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);

pub const RED: Rgb565 = Rgb565::new(31, 0, 0);

// ============================================================================
// Toggle Defaults
// ============================================================================

/// Toggle fill while on - moderate green
pub const DEFAULT_TOGGLE_ON: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);

/// Toggle fill while off - dark gray
pub const DEFAULT_TOGGLE_OFF: Rgb565 = Rgb565::new(10, 20, 10);

/// Default highlight for a pressed momentary button.
///
/// Darkens every channel by the same perceptual step, saturating at zero.
pub fn pressed_shade(base: Rgb565) -> Rgb565 {
    Rgb565::new(
        base.r().saturating_sub(4),
        base.g().saturating_sub(8),
        base.b().saturating_sub(4),
    )
}

// ============================================================================
// Palette
// ============================================================================

/// Registry-wide colors that are not owned by any single widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fill used when a widget is deleted
    pub background: Rgb565,
    /// Pen used for every widget label
    pub label: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: BLACK,
            label: BLACK,
        }
    }
}

impl Palette {
    pub fn new(background: Rgb565, label: Rgb565) -> Self {
        Self { background, label }
    }
}
