// src/ui/core.rs
//! Core geometry, touch and handle types for the widget layer

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use thiserror_no_std::Error;

/// Longest label a widget accepts, in bytes.
pub const MAX_LABEL_LEN: usize = 32;

/// Fixed-capacity label storage.
pub type Label = heapless::String<MAX_LABEL_LEN>;

/// Errors raised while constructing a widget
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    #[error("widget geometry must be positive, got {width}x{height}")]
    InvalidGeometry { width: i32, height: i32 },
    #[error("label is {len} bytes, at most {max} fit")]
    LabelTooLong { len: usize, max: usize },
}

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Widget rectangle in device pixels, origin top-left.
///
/// Width and height are always positive; the constructor rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, WidgetError> {
        if width <= 0 || height <= 0 {
            return Err(WidgetError::InvalidGeometry { width, height });
        }

        Ok(Self {
            x,
            y,
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Closed-interval hit test.
    ///
    /// Both edges are inclusive, so the right edge is `x + width` and the
    /// bottom edge is `y + height`: one pixel wider than the painted area.
    pub fn contains(&self, point: TouchPoint) -> bool {
        let px = point.x as i32;
        let py = point.y as i32;

        px >= self.x
            && px <= self.x + self.width as i32
            && py >= self.y
            && py <= self.y + self.height as i32
    }

    /// The painted area as an embedded-graphics rectangle.
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x, self.y),
            Size::new(self.width, self.height),
        )
    }

    pub fn center(&self) -> TouchPoint {
        let cx = self.x + (self.width / 2) as i32;
        let cy = self.y + (self.height / 2) as i32;
        TouchPoint::new(cx.max(0) as u16, cy.max(0) as u16)
    }
}

impl TryFrom<Rectangle> for Bounds {
    type Error = WidgetError;

    fn try_from(rect: Rectangle) -> Result<Self, Self::Error> {
        Bounds::new(
            rect.top_left.x,
            rect.top_left.y,
            rect.size.width.min(i32::MAX as u32) as i32,
            rect.size.height.min(i32::MAX as u32) as i32,
        )
    }
}

/// Build a label, rejecting text that does not fit.
pub(crate) fn make_label(text: &str) -> Result<Label, WidgetError> {
    let mut label = Label::new();
    label.push_str(text).map_err(|_| WidgetError::LabelTooLong {
        len: text.len(),
        max: MAX_LABEL_LEN,
    })?;
    Ok(label)
}

/// Identifies a live widget in a registry.
///
/// Handles are cheap to copy. A handle whose widget has been deleted stays
/// stale forever, even when its slot is reused by a newer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl WidgetHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}
