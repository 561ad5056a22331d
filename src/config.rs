//! Runtime configuration for the widget layer.
//!
//! The config is small enough to persist as a postcard blob next to other
//! device settings; colors are stored as raw RGB565 words.

use alloc::vec::Vec;

use embassy_time::Duration;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::ui::styling::Palette;

/// Sampling period of the reference design: responsive enough for a finger,
/// while leaving most of the CPU to other tasks.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("poll interval must be at least 1 ms")]
    ZeroPollInterval,
    #[error("config codec error: {0:?}")]
    Codec(postcard::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// Sleep between two touch samples
    pub poll_interval_ms: u32,
    /// Erase color for deleted widgets, raw RGB565
    pub background: u16,
    /// Label pen color, raw RGB565
    pub label_color: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            background: 0x0000,
            label_color: 0x0000,
        }
    }
}

impl UiConfig {
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background = RawU16::from(color).into_inner();
        self
    }

    pub fn with_label_color(mut self, color: Rgb565) -> Self {
        self.label_color = RawU16::from(color).into_inner();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    pub fn palette(&self) -> Palette {
        Palette::new(
            Rgb565::from(RawU16::new(self.background)),
            Rgb565::from(RawU16::new(self.label_color)),
        )
    }

    /// Decode and validate a stored config.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Codec)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Codec)
    }
}
