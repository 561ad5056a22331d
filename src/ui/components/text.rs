// src/ui/components/text.rs
//! Widget face rendering: a solid fill with a roughly centered label

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Baseline, Text};

use crate::ui::core::Bounds;

/// Advance per character used for centering. Matches `FONT_6X10`.
pub const GLYPH_WIDTH: i32 = 6;

/// Line height used for vertical centering.
pub const GLYPH_HEIGHT: i32 = 8;

/// Top-left corner of the label text inside `bounds`.
///
/// The estimate is coarse: every character counts as
/// [`GLYPH_WIDTH`] pixels and the result is nudged 4 pixels left. Labels wider
/// than the widget start left of it.
pub fn label_origin(bounds: &Bounds, label: &str) -> Point {
    let text_width = label.chars().count() as i32 * GLYPH_WIDTH;
    let x = bounds.x() + (bounds.width() as i32 - text_width).div_euclid(2) - 4;
    let y = bounds.y() + (bounds.height() as i32 - GLYPH_HEIGHT).div_euclid(2);
    Point::new(x, y)
}

/// Fill `bounds` with `fill` and draw `label` on top in `pen`.
pub fn draw_face<D>(
    display: &mut D,
    bounds: &Bounds,
    label: &str,
    fill: Rgb565,
    pen: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    bounds
        .to_rectangle()
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)?;

    if !label.is_empty() {
        let text_style = MonoTextStyle::new(&FONT_6X10, pen);
        Text::with_baseline(label, label_origin(bounds, label), text_style, Baseline::Top)
            .draw(display)?;
    }

    Ok(())
}
