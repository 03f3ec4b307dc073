//! # Compass Module
//!
//! HMC5883L magnetometer driver for the GY-273 breakout.
//!
//! This module handles:
//! - One-time sensor bring-up (averaging, gain, continuous mode)
//! - Reading the three axis register pairs over I2C
//! - Big-endian two's-complement decoding into signed samples
//! - Reassembling the device's X, Z, Y register order as (x, y, z)
//! - Degrading a faulted read to a zero sample instead of failing the cycle
//!
//! The driver is generic over [`embedded_hal::i2c::I2c`] so the production
//! `linux_embedded_hal::I2cdev` bus and the test double share one code path.

pub mod registers;

use embedded_hal::i2c::I2c;
use tracing::{debug, warn};

use crate::error::{Result, SensorRelayError};
use registers::*;

/// One decoded magnetometer sample
///
/// Transient value: produced and consumed within a single acquisition, only
/// persisted as part of a full reading. The zero sample doubles as the
/// degraded value when the compass is faulted or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MagnetometerSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Decode a raw unsigned 16-bit register pair into a signed sample
///
/// Values at or above 0x8000 wrap to their negative two's-complement
/// equivalent (`v - 0x10000`), so the output covers exactly
/// [-32768, 32767].
///
/// # Arguments
///
/// * `raw` - Unsigned 16-bit value, MSB register byte first
///
/// # Returns
///
/// * `i16` - Signed axis sample
pub fn decode_raw(raw: u16) -> i16 {
    raw as i16
}

/// HMC5883L driver
///
/// Owns its bus handle for the process lifetime. If [`configure`] fails the
/// caller is expected to drop the driver and substitute zero samples; the
/// driver itself never retries bring-up.
///
/// [`configure`]: Hmc5883l::configure
pub struct Hmc5883l<I2C> {
    /// I2C bus handle, exclusively owned
    i2c: I2C,
    /// 7-bit device address (0x1E on the GY-273)
    address: u8,
}

impl<I2C> std::fmt::Debug for Hmc5883l<I2C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hmc5883l")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl<I2C: I2c> Hmc5883l<I2C> {
    /// Create a driver over the given bus handle
    ///
    /// # Arguments
    ///
    /// * `i2c` - Exclusively owned I2C bus handle
    /// * `address` - 7-bit device address (see [`registers::COMPASS_I2C_ADDRESS`])
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Write the three control registers that bring the sensor up
    ///
    /// Sets 8-sample averaging at 15 Hz, gain 5, and continuous measurement
    /// mode. Must succeed before the first sample read; on failure the
    /// sensor is treated as unavailable for the rest of the process and no
    /// further bus traffic is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`SensorRelayError::CompassInit`] if any control write fails
    pub fn configure(&mut self) -> Result<()> {
        let setup = [
            (REG_CONFIG_A, CONFIG_A_AVG8_15HZ),
            (REG_CONFIG_B, CONFIG_B_GAIN_5),
            (REG_MODE, MODE_CONTINUOUS),
        ];

        for (register, value) in setup {
            self.i2c
                .write(self.address, &[register, value])
                .map_err(|e| {
                    SensorRelayError::CompassInit(format!(
                        "control register 0x{:02X} write failed: {:?}",
                        register, e
                    ))
                })?;
        }

        debug!("compass configured at address 0x{:02X}", self.address);
        Ok(())
    }

    /// Read one axis register pair and decode it
    ///
    /// Reads exactly 2 bytes starting at `register`, MSB first.
    ///
    /// # Arguments
    ///
    /// * `register` - MSB data register address for the axis
    ///
    /// # Returns
    ///
    /// * `Result<i16>` - Decoded signed sample
    ///
    /// # Errors
    ///
    /// Returns [`SensorRelayError::Bus`] if the transfer fails
    fn read_axis(&mut self, register: u8) -> Result<i16> {
        let mut buf = [0u8; AXIS_READ_LEN];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|e| {
                SensorRelayError::Bus(format!(
                    "axis register 0x{:02X} read failed: {:?}",
                    register, e
                ))
            })?;

        Ok(decode_raw(u16::from_be_bytes(buf)))
    }

    /// Read one complete sample
    ///
    /// Reads the axis registers in the device's native X, Z, Y order and
    /// returns them as (x, y, z). A transfer fault on any axis degrades the
    /// whole sample to (0, 0, 0); partial triples are never returned and
    /// the fault is reported via the log rather than the return value.
    pub fn read_sample(&mut self) -> MagnetometerSample {
        match self.try_read_sample() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("compass read failed, substituting zero sample: {}", e);
                MagnetometerSample::default()
            }
        }
    }

    fn try_read_sample(&mut self) -> Result<MagnetometerSample> {
        // Register order on the device is X, Z, Y
        let x = self.read_axis(REG_AXIS_X_MSB)?;
        let z = self.read_axis(REG_AXIS_Z_MSB)?;
        let y = self.read_axis(REG_AXIS_Y_MSB)?;

        Ok(MagnetometerSample { x, y, z })
    }
}
