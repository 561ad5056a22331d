// src/ui/components/toggle.rs
//! Toggle button: flips a persistent on/off state on each fresh press

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::ui::components::text::draw_face;
use crate::ui::core::{Bounds, Label, TouchPoint, WidgetError, make_label};
use crate::ui::styling::{DEFAULT_TOGGLE_OFF, DEFAULT_TOGGLE_ON, Palette};

/// Toggle button
///
/// The fill shows the toggled state, never the touch state. Holding a finger
/// on the button flips it once; the next flip needs a release first.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleButton {
    bounds: Bounds,
    label: Label,
    on_color: Rgb565,
    off_color: Rgb565,
    toggled: bool,
    pressed_now: bool,
}

impl ToggleButton {
    pub fn new(bounds: Bounds, label: &str) -> Result<Self, WidgetError> {
        Ok(Self {
            bounds,
            label: make_label(label)?,
            on_color: DEFAULT_TOGGLE_ON,
            off_color: DEFAULT_TOGGLE_OFF,
            toggled: false,
            pressed_now: false,
        })
    }

    /// Starting state, shown as soon as the widget is created.
    pub fn with_initial(mut self, toggled: bool) -> Self {
        self.toggled = toggled;
        self
    }

    pub fn with_colors(mut self, on: Rgb565, off: Rgb565) -> Self {
        self.on_color = on;
        self.off_color = off;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_now
    }

    pub fn hit_test(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Touch is inside the toggle on this tick.
    ///
    /// On the press edge the state flips, the new color is drawn and the new
    /// state is returned for the callback. Held ticks return `None`.
    pub fn on_press<D>(
        &mut self,
        display: &mut D,
        palette: &Palette,
    ) -> Result<Option<bool>, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.pressed_now {
            return Ok(None);
        }

        self.pressed_now = true;
        self.toggled = !self.toggled;
        self.render(display, palette)?;
        Ok(Some(self.toggled))
    }

    /// Arms the next press edge. Never redraws.
    pub fn on_release(&mut self) {
        self.pressed_now = false;
    }

    pub fn render<D>(&self, display: &mut D, palette: &Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fill = if self.toggled {
            self.on_color
        } else {
            self.off_color
        };
        draw_face(display, &self.bounds, &self.label, fill, palette.label)
    }
}
