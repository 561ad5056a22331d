// src/ui/widget.rs
//! Closed set of widget kinds stored by the registry.
//!
//! [`Widget`] delegates every operation to the concrete button type, the same
//! way an enum wrapper routes calls without trait objects.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;

use crate::ui::components::{MomentaryButton, ToggleButton};
use crate::ui::core::{Bounds, TouchPoint};
use crate::ui::styling::Palette;

/// Which callback a press should trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fire {
    /// Momentary button pressed (or held with hold enabled)
    Pressed,
    /// Toggle flipped to the contained state
    Toggled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Momentary(MomentaryButton),
    Toggle(ToggleButton),
}

impl Widget {
    pub fn bounds(&self) -> Bounds {
        match self {
            Widget::Momentary(button) => button.bounds(),
            Widget::Toggle(toggle) => toggle.bounds(),
        }
    }

    pub fn hit_test(&self, point: TouchPoint) -> bool {
        match self {
            Widget::Momentary(button) => button.hit_test(point),
            Widget::Toggle(toggle) => toggle.hit_test(point),
        }
    }

    pub fn is_pressed(&self) -> bool {
        match self {
            Widget::Momentary(button) => button.is_pressed(),
            Widget::Toggle(toggle) => toggle.is_pressed(),
        }
    }

    /// `Some` only for toggles.
    pub fn is_toggled(&self) -> Option<bool> {
        match self {
            Widget::Momentary(_) => None,
            Widget::Toggle(toggle) => Some(toggle.is_toggled()),
        }
    }

    pub fn on_press<D>(&mut self, display: &mut D, palette: &Palette) -> Result<Option<Fire>, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            Widget::Momentary(button) => Ok(button
                .on_press(display, palette)?
                .then_some(Fire::Pressed)),
            Widget::Toggle(toggle) => Ok(toggle.on_press(display, palette)?.map(Fire::Toggled)),
        }
    }

    pub fn on_release<D>(&mut self, display: &mut D, palette: &Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            Widget::Momentary(button) => button.on_release(display, palette),
            Widget::Toggle(toggle) => {
                toggle.on_release();
                Ok(())
            }
        }
    }

    /// Draw the widget in its current state.
    pub fn render<D>(&self, display: &mut D, palette: &Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            Widget::Momentary(button) => button.render(display, palette, button.is_pressed()),
            Widget::Toggle(toggle) => toggle.render(display, palette),
        }
    }

    /// Paint the widget area with the background color.
    pub fn erase<D>(&self, display: &mut D, palette: &Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.bounds()
            .to_rectangle()
            .into_styled(PrimitiveStyle::with_fill(palette.background))
            .draw(display)
    }
}

impl From<MomentaryButton> for Widget {
    fn from(button: MomentaryButton) -> Self {
        Widget::Momentary(button)
    }
}

impl From<ToggleButton> for Widget {
    fn from(toggle: ToggleButton) -> Self {
        Widget::Toggle(toggle)
    }
}
