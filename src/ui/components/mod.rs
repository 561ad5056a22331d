// src/ui/components/mod.rs
//! The two widget kinds and their shared face renderer

pub mod button;
pub mod text;
pub mod toggle;

pub use button::MomentaryButton;
pub use text::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_face, label_origin};
pub use toggle::ToggleButton;
