//! Shared doubles for the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tapui::{FrameBuffer, Palette, TouchInput, TouchPoint, WidgetRegistry};

pub type Ui = WidgetRegistry<NoopRawMutex, FrameBuffer>;

pub fn ui() -> Ui {
    WidgetRegistry::new(FrameBuffer::new(320, 240), Palette::default())
}

/// Plays back one touch sample per tick, then reports no touch forever.
pub struct ScriptedTouch {
    frames: VecDeque<Option<TouchPoint>>,
    current: Option<TouchPoint>,
}

impl ScriptedTouch {
    pub fn new(frames: impl IntoIterator<Item = Option<(u16, u16)>>) -> Self {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| frame.map(|(x, y)| TouchPoint::new(x, y)))
                .collect(),
            current: None,
        }
    }

    /// Finger held at one point for `ticks` samples.
    pub fn held(x: u16, y: u16, ticks: usize) -> Self {
        Self::new(std::iter::repeat_n(Some((x, y)), ticks))
    }

    pub fn push(&mut self, frame: Option<(u16, u16)>) {
        self.frames
            .push_back(frame.map(|(x, y)| TouchPoint::new(x, y)));
    }
}

impl TouchInput for ScriptedTouch {
    type Error = Infallible;

    async fn is_touching(&mut self) -> Result<bool, Infallible> {
        self.current = self.frames.pop_front().flatten();
        Ok(self.current.is_some())
    }

    async fn last_position(&mut self) -> Result<TouchPoint, Infallible> {
        Ok(self.current.unwrap_or(TouchPoint::new(0, 0)))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BusError;

/// Touch panel whose bus always fails.
pub struct BrokenTouch;

impl TouchInput for BrokenTouch {
    type Error = BusError;

    async fn is_touching(&mut self) -> Result<bool, BusError> {
        Err(BusError)
    }

    async fn last_position(&mut self) -> Result<TouchPoint, BusError> {
        Err(BusError)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PanelError;

/// Display that starts failing once `fail` is set.
pub struct FlakyDisplay {
    pub fail: bool,
}

impl OriginDimensions for FlakyDisplay {
    fn size(&self) -> Size {
        Size::new(320, 240)
    }
}

impl DrawTarget for FlakyDisplay {
    type Color = Rgb565;
    type Error = PanelError;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.fail { Err(PanelError) } else { Ok(()) }
    }
}
