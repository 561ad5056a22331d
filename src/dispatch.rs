//! Touch polling and event dispatch.
//!
//! Each tick samples the touch source once:
//! - touching: every live widget whose bounds contain the point runs its
//!   press transition, so overlapping widgets all fire,
//! - not touching: every live widget runs its release transition.
//!
//! A widget the finger slid off of stays pressed until the whole panel is
//! released.

use alloc::vec::Vec;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{error, info, trace};

use crate::config::{ConfigError, UiConfig};
use crate::registry::WidgetRegistry;
use crate::touch::TouchInput;
use crate::ui::core::{TouchPoint, WidgetHandle};

/// Raised by any task (or a widget callback) to end [`Dispatcher::run`].
pub type StopSignal<M> = Signal<M, ()>;

/// Failure of a single tick; the loop stops on the first one.
#[derive(Debug)]
pub enum DispatchError<DE, TE> {
    /// Drawing a widget failed
    Display(DE),
    /// Reading the touch panel failed
    Touch(TE),
}

/// What one tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Touch point, or `None` when the panel was not touched
    pub touch: Option<TouchPoint>,
    /// Widgets whose bounds contained the touch
    pub hits: usize,
}

pub struct Dispatcher<'r, M, D, T> {
    registry: &'r WidgetRegistry<M, D>,
    touch: T,
    poll_interval: Duration,
    /// Reused between ticks to avoid an allocation per sample
    snapshot: Vec<WidgetHandle>,
}

impl<'r, M, D, T> Dispatcher<'r, M, D, T>
where
    M: RawMutex,
    D: DrawTarget<Color = Rgb565>,
    T: TouchInput,
{
    pub fn new(
        registry: &'r WidgetRegistry<M, D>,
        touch: T,
        config: &UiConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry,
            touch,
            poll_interval: config.poll_interval(),
            snapshot: Vec::new(),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn touch_mut(&mut self) -> &mut T {
        &mut self.touch
    }

    /// Sample the touch source once and dispatch to the widgets live at the
    /// start of the tick.
    pub async fn tick(&mut self) -> Result<TickReport, DispatchError<D::Error, T::Error>> {
        let touching = self
            .touch
            .is_touching()
            .await
            .map_err(DispatchError::Touch)?;
        self.registry.snapshot_into(&mut self.snapshot);

        if !touching {
            for &handle in &self.snapshot {
                self.registry
                    .release(handle)
                    .map_err(DispatchError::Display)?;
            }
            return Ok(TickReport {
                touch: None,
                hits: 0,
            });
        }

        let point = self
            .touch
            .last_position()
            .await
            .map_err(DispatchError::Touch)?;

        let mut hits = 0;
        for &handle in &self.snapshot {
            if self
                .registry
                .press_if_hit(handle, point)
                .map_err(DispatchError::Display)?
            {
                hits += 1;
            }
        }

        trace!("Touch at ({}, {}) hit {} widget(s)", point.x, point.y, hits);
        Ok(TickReport {
            touch: Some(point),
            hits,
        })
    }

    /// Tick at the configured cadence until `stop` is signaled or a tick
    /// fails.
    pub async fn run<S>(
        &mut self,
        stop: &StopSignal<S>,
    ) -> Result<(), DispatchError<D::Error, T::Error>>
    where
        S: RawMutex,
        D::Error: core::fmt::Debug,
    {
        info!(
            "Touch dispatch started, polling every {} ms",
            self.poll_interval.as_millis()
        );

        loop {
            if let Err(e) = self.tick().await {
                error!("Touch dispatch stopped: {:?}", e);
                return Err(e);
            }

            match select(Timer::after(self.poll_interval), stop.wait()).await {
                Either::First(()) => {}
                Either::Second(()) => {
                    info!("Touch dispatch stopped on request");
                    return Ok(());
                }
            }
        }
    }
}
