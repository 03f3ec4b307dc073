//! Environment sensor seam: trait abstraction plus the BME280 production
//! implementation. The trait exists so the acquirer can be exercised with a
//! test double; the BME280 requires real hardware.

use bme280::i2c::BME280;
use linux_embedded_hal::{Delay, I2cdev};

#[cfg(test)]
use mockall::automock;

use crate::error::{Result, SensorRelayError};

/// Calibrated environmental readings for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvReading {
    /// Temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
    /// Barometric pressure in hectopascals
    pub pressure_hpa: f32,
}

/// Synchronous environment sensor interface
///
/// Assumed to succeed every cycle; a failure here has no fallback value and
/// propagates as [`SensorRelayError::Environment`].
#[cfg_attr(test, automock)]
pub trait EnvironmentSensor {
    /// Take one calibrated measurement
    fn read(&mut self) -> Result<EnvReading>;
}

/// BME280 environment sensor on the Linux I2C bus
///
/// Uses the sensor's primary address (0x76). The driver reports pressure in
/// pascals; readings are converted to hectopascals here so every consumer
/// sees one unit.
pub struct Bme280Sensor {
    driver: BME280<I2cdev>,
    delay: Delay,
}

impl std::fmt::Debug for Bme280Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bme280Sensor").finish_non_exhaustive()
    }
}

impl Bme280Sensor {
    /// Open the bus device and initialize the sensor
    ///
    /// # Arguments
    ///
    /// * `bus_device` - I2C character device path (e.g. "/dev/i2c-1")
    ///
    /// # Errors
    ///
    /// Returns [`SensorRelayError::Environment`] if the bus cannot be
    /// opened or the sensor does not respond to initialization
    pub fn open(bus_device: &str) -> Result<Self> {
        let i2c = I2cdev::new(bus_device).map_err(|e| {
            SensorRelayError::Environment(format!("failed to open {}: {:?}", bus_device, e))
        })?;

        let mut driver = BME280::new_primary(i2c);
        let mut delay = Delay {};
        driver
            .init(&mut delay)
            .map_err(|e| SensorRelayError::Environment(format!("BME280 init failed: {:?}", e)))?;

        Ok(Self { driver, delay })
    }
}

impl EnvironmentSensor for Bme280Sensor {
    fn read(&mut self) -> Result<EnvReading> {
        let measurements = self
            .driver
            .measure(&mut self.delay)
            .map_err(|e| SensorRelayError::Environment(format!("BME280 measure failed: {:?}", e)))?;

        Ok(EnvReading {
            temperature_c: measurements.temperature,
            humidity_pct: measurements.humidity,
            pressure_hpa: measurements.pressure / 100.0,
        })
    }
}
