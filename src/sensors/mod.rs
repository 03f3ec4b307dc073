//! # Sensors Module
//!
//! Composes one normalized reading per cycle from the environment sensor
//! and the compass, with per-source fault isolation.
//!
//! This module handles:
//! - The [`SensorReading`] record persisted and transmitted each cycle
//! - Polling the BME280 (fatal on failure, no fallback value exists)
//! - Polling the compass only when it initialized at startup, substituting
//!   a zero sample otherwise without touching the bus
//! - The per-reading progress line

pub mod environment;

use chrono::Local;
use embedded_hal::i2c::I2c;
use serde::Serialize;
use tracing::info;

use crate::compass::{Hmc5883l, MagnetometerSample};
use crate::error::Result;
use environment::EnvironmentSensor;

/// Wall-clock timestamp format used in the log and progress output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One normalized reading
///
/// Immutable once constructed and owned by the cycle that produced it.
/// Every field is always populated: compass fields are zero-filled when
/// the magnetometer is unavailable or faulted, so consumers never observe
/// a partial record. Field order matches the CSV header column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// Capture time, second resolution (see [`TIMESTAMP_FORMAT`])
    pub timestamp: String,

    /// Temperature in degrees Celsius
    pub temperature_c: f32,

    /// Relative humidity in percent
    pub humidity_pct: f32,

    /// Barometric pressure in hectopascals
    pub pressure_hpa: f32,

    /// Magnetometer X axis, raw signed sample
    pub compass_x: i16,

    /// Magnetometer Y axis, raw signed sample
    pub compass_y: i16,

    /// Magnetometer Z axis, raw signed sample
    pub compass_z: i16,
}

/// Produces one [`SensorReading`] per invocation
///
/// Owns both sensor handles for the process lifetime. The compass slot is
/// `None` when bring-up failed at startup; acquisition then substitutes
/// (0, 0, 0) without attempting a bus transaction.
pub struct ReadingAcquirer<E, I2C> {
    env: E,
    compass: Option<Hmc5883l<I2C>>,
}

impl<E, I2C> ReadingAcquirer<E, I2C>
where
    E: EnvironmentSensor,
    I2C: I2c,
{
    /// Create an acquirer from the two sensor paths
    ///
    /// # Arguments
    ///
    /// * `env` - Environment sensor (always expected to deliver)
    /// * `compass` - Compass driver, or `None` when initialization failed
    pub fn new(env: E, compass: Option<Hmc5883l<I2C>>) -> Self {
        Self { env, compass }
    }

    /// Whether the compass path is active this process lifetime
    pub fn compass_enabled(&self) -> bool {
        self.compass.is_some()
    }

    /// Produce one reading
    ///
    /// Environment faults propagate; compass faults are absorbed inside
    /// [`Hmc5883l::read_sample`] as a zero sample. No retries: each cycle
    /// is independent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SensorRelayError::Environment`] if the
    /// environment sensor fails
    pub fn acquire(&mut self) -> Result<SensorReading> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let env = self.env.read()?;

        let sample = match self.compass.as_mut() {
            Some(compass) => compass.read_sample(),
            None => MagnetometerSample::default(),
        };

        let reading = SensorReading {
            timestamp,
            temperature_c: env.temperature_c,
            humidity_pct: env.humidity_pct,
            pressure_hpa: env.pressure_hpa,
            compass_x: sample.x,
            compass_y: sample.y,
            compass_z: sample.z,
        };

        info!(
            "{}: Temp={:.2}C, Humidity={:.2}%, Pressure={:.2}hPa, Compass(X={}, Y={}, Z={})",
            reading.timestamp,
            reading.temperature_c,
            reading.humidity_pct,
            reading.pressure_hpa,
            reading.compass_x,
            reading.compass_y,
            reading.compass_z,
        );

        Ok(reading)
    }
}
