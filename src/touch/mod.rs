//! Touch input sources for the dispatch loop
//!
//! The dispatcher only needs two questions answered per tick: is the panel
//! being touched, and where was the last touch. Hardware drivers, the desktop
//! simulator and test doubles all implement [`TouchInput`].

pub mod ft6336u;

pub use ft6336u::FT6336U;

use crate::ui::core::TouchPoint;

/// A polled touch panel.
#[allow(async_fn_in_trait)]
pub trait TouchInput {
    type Error: core::fmt::Debug;

    /// Whether a finger (or stylus) is on the panel right now.
    async fn is_touching(&mut self) -> Result<bool, Self::Error>;

    /// Most recent touch coordinate. Only meaningful after `is_touching`
    /// returned `true` on the same tick.
    async fn last_position(&mut self) -> Result<TouchPoint, Self::Error>;
}

impl<T: TouchInput> TouchInput for &mut T {
    type Error = T::Error;

    async fn is_touching(&mut self) -> Result<bool, Self::Error> {
        (**self).is_touching().await
    }

    async fn last_position(&mut self) -> Result<TouchPoint, Self::Error> {
        (**self).last_position().await
    }
}
