//! FT6336U capacitive touch controller as a [`TouchInput`].
//!
//! Only the registers the dispatch loop needs are wrapped: the touch count in
//! `TD_STATUS` and the coordinates of the first touch point. A second finger
//! is reported by the chip but ignored here.

use embedded_hal_async::i2c::I2c;
use log::debug;

use super::TouchInput;
use crate::ui::core::TouchPoint;

// =============================================================================
// I2C Address
// =============================================================================

/// FT6336U I2C address
pub const I2C_ADDR: u8 = 0x38;

// =============================================================================
// Register Addresses
// =============================================================================

// Device Mode Register
pub const ADDR_DEVICE_MODE: u8 = 0x00;

// Touch Status Register
pub const ADDR_TD_STATUS: u8 = 0x02;

// Touch Point 1 Registers (X high byte carries the event flag, Y high byte the ID)
pub const ADDR_TOUCH1_X: u8 = 0x03;
pub const ADDR_TOUCH1_Y: u8 = 0x05;

// System Information Registers
pub const ADDR_CHIP_ID: u8 = 0xA3;
pub const ADDR_G_MODE: u8 = 0xA4;

// =============================================================================
// Enums
// =============================================================================

/// Device operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceMode {
    /// Working mode (normal operation)
    Working = 0b000,
    /// Factory mode (calibration/testing)
    Factory = 0b100,
}

impl DeviceMode {
    /// Convert to register value
    pub fn to_register(self) -> u8 {
        (self as u8) << 4
    }
}

/// Gesture mode (interrupt trigger configuration)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GestureMode {
    /// Polling mode - no interrupts
    Polling = 0,
    /// Trigger mode - generate interrupts on touch events
    Trigger = 1,
}

// =============================================================================
// Driver Error Type
// =============================================================================

/// Errors that can occur during FT6336U operations
#[derive(Debug)]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Touch count register reported more points than the chip supports
    InvalidData,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::I2c(e)
    }
}

// =============================================================================
// Driver Implementation
// =============================================================================

/// FT6336U driver with an async I2C interface.
///
/// The reset and interrupt pins are left to the caller (on some boards they
/// sit behind a GPIO expander). The dispatch loop polls, so the interrupt line
/// is not required.
pub struct FT6336U<I2C> {
    i2c: I2C,
    /// Coordinate of the first touch point from the last touching scan
    last: TouchPoint,
}

impl<I2C> FT6336U<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            last: TouchPoint::new(0, 0),
        }
    }

    /// Put the controller in working mode with polling (no interrupts).
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_byte(ADDR_DEVICE_MODE, DeviceMode::Working.to_register())
            .await?;
        self.write_byte(ADDR_G_MODE, GestureMode::Polling as u8)
            .await?;

        let chip_id = self.read_chip_id().await?;
        debug!("FT6336U ready, chip id {:#04x}", chip_id);
        Ok(())
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // =========================================================================
    // Private I2C Helper Methods
    // =========================================================================

    async fn read_byte(&mut self, addr: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(I2C_ADDR, &[addr], &mut buf).await?;
        Ok(buf[0])
    }

    async fn write_byte(&mut self, addr: u8, data: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(I2C_ADDR, &[addr, data]).await?;
        Ok(())
    }

    /// Read a 12-bit coordinate starting at `addr` (high nibble first).
    async fn read_coordinate(&mut self, addr: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(I2C_ADDR, &[addr], &mut buf).await?;
        Ok((((buf[0] & 0x0F) as u16) << 8) | (buf[1] as u16))
    }

    // =========================================================================
    // Register Accessors
    // =========================================================================

    /// Number of detected touch points (0-2)
    pub async fn read_touch_number(&mut self) -> Result<u8, Error<I2C::Error>> {
        let val = self.read_byte(ADDR_TD_STATUS).await?;
        match val & 0x0F {
            n @ 0..=2 => Ok(n),
            _ => Err(Error::InvalidData),
        }
    }

    pub async fn read_touch1_x(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_coordinate(ADDR_TOUCH1_X).await
    }

    pub async fn read_touch1_y(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_coordinate(ADDR_TOUCH1_Y).await
    }

    pub async fn read_chip_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_CHIP_ID).await
    }
}

impl<I2C> TouchInput for FT6336U<I2C>
where
    I2C: I2c,
{
    type Error = Error<I2C::Error>;

    async fn is_touching(&mut self) -> Result<bool, Self::Error> {
        let touching = self.read_touch_number().await? > 0;
        if touching {
            let x = self.read_touch1_x().await?;
            let y = self.read_touch1_y().await?;
            self.last = TouchPoint::new(x, y);
        }
        Ok(touching)
    }

    async fn last_position(&mut self) -> Result<TouchPoint, Self::Error> {
        Ok(self.last)
    }
}
