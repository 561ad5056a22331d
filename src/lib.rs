//! Touchscreen widget layer for small embedded displays.
//!
//! Callers declare rectangular momentary buttons and toggle buttons on a
//! [`WidgetRegistry`]; a [`Dispatcher`] samples a [`TouchInput`] at a fixed
//! cadence, hit-tests every live widget, drives the press/release state
//! machines and invokes the widget callbacks.
//!
//! The crate is `#![no_std]` with `extern crate alloc` so it runs on embedded
//! targets and on desktop hosts (for the simulator and tests). Rendering goes
//! through any `embedded-graphics` draw target with an `Rgb565` color space.

#![no_std]

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod framebuffer;
pub mod registry;
pub mod touch;
pub mod ui;

pub use config::{ConfigError, UiConfig};
pub use dispatch::{DispatchError, Dispatcher, StopSignal, TickReport};
pub use framebuffer::FrameBuffer;
pub use registry::{MomentaryCallback, ToggleCallback, WidgetRegistry};
pub use touch::TouchInput;
pub use ui::{Bounds, MomentaryButton, Palette, ToggleButton, TouchPoint, WidgetError, WidgetHandle};
