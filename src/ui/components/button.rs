// src/ui/components/button.rs
//! Momentary button: fires on press, optionally repeats while held

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::ui::components::text::draw_face;
use crate::ui::core::{Bounds, Label, TouchPoint, WidgetError, make_label};
use crate::ui::styling::{Palette, pressed_shade};

/// Momentary button
///
/// Shows its base color while released and a pressed highlight while a touch
/// sits inside it. The press callback fires once per continuous press, or on
/// every dispatch tick while held when hold is enabled.
///
/// # Examples
/// ```ignore
/// let greet = MomentaryButton::new(Bounds::new(10, 20, 100, 50)?, "Greet", GREEN)?
///     .with_pressed_color(WHITE);
/// let volume_up = MomentaryButton::new(Bounds::new(120, 20, 60, 50)?, "+", GREEN)?
///     .with_hold(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MomentaryButton {
    bounds: Bounds,
    label: Label,
    color: Rgb565,
    pressed_color: Rgb565,
    hold: bool,
    pressed_now: bool,
}

impl MomentaryButton {
    /// Create a released button. The pressed color defaults to a darker shade
    /// of `color`.
    pub fn new(bounds: Bounds, label: &str, color: Rgb565) -> Result<Self, WidgetError> {
        Ok(Self {
            bounds,
            label: make_label(label)?,
            color,
            pressed_color: pressed_shade(color),
            hold: false,
            pressed_now: false,
        })
    }

    /// Repeat the callback on every tick while the touch stays inside.
    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_pressed_color(mut self, color: Rgb565) -> Self {
        self.pressed_color = color;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pressed_color(&self) -> Rgb565 {
        self.pressed_color
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_now
    }

    pub fn hit_test(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Touch is inside the button on this tick.
    ///
    /// Returns `true` when the callback should fire: on the first tick of a
    /// press, or on every tick with hold enabled. Only firing ticks redraw.
    pub fn on_press<D>(&mut self, display: &mut D, palette: &Palette) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fire = self.hold || !self.pressed_now;
        self.pressed_now = true;

        if fire {
            self.render(display, palette, true)?;
        }
        Ok(fire)
    }

    /// Touch left the screen. Redraws only if the button was pressed.
    pub fn on_release<D>(&mut self, display: &mut D, palette: &Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.pressed_now {
            self.pressed_now = false;
            self.render(display, palette, false)?;
        }
        Ok(())
    }

    pub fn render<D>(&self, display: &mut D, palette: &Palette, pressed: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fill = if pressed {
            self.pressed_color
        } else {
            self.color
        };
        draw_face(display, &self.bounds, &self.label, fill, palette.label)
    }
}
