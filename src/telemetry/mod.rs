//! # Telemetry Module
//!
//! Wire message encoding for the radio link.
//!
//! Each reading is serialized as one self-describing UTF-8 JSON object with
//! a nested compass object, so the ground side needs no external schema.
//! [`decode`] is the exact inverse of [`encode`]; the six numeric fields
//! round-trip at full source precision.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sensors::SensorReading;

/// Compass axes as a nested wire object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompassVector {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// One telemetry frame as sent over the radio link
///
/// The capture timestamp is deliberately part of the frame: the link is
/// fire-and-forget, so the receiver cannot reconstruct capture times from
/// arrival times. Receivers that only want the measurements can ignore it;
/// the six numeric fields alone fully describe the reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    /// Capture time, same format as the log timestamp
    pub timestamp: String,

    /// Temperature in degrees Celsius
    pub temperature: f32,

    /// Relative humidity in percent
    pub humidity: f32,

    /// Barometric pressure in hectopascals
    pub pressure: f32,

    /// Raw signed magnetometer axes
    pub compass: CompassVector,
}

impl From<&SensorReading> for TelemetryFrame {
    fn from(reading: &SensorReading) -> Self {
        Self {
            timestamp: reading.timestamp.clone(),
            temperature: reading.temperature_c,
            humidity: reading.humidity_pct,
            pressure: reading.pressure_hpa,
            compass: CompassVector {
                x: reading.compass_x,
                y: reading.compass_y,
                z: reading.compass_z,
            },
        }
    }
}

/// Encode a reading into a wire frame
///
/// # Arguments
///
/// * `reading` - The reading to serialize
///
/// # Returns
///
/// * `Result<Vec<u8>>` - UTF-8 JSON bytes
///
/// # Errors
///
/// Returns [`crate::error::SensorRelayError::Encode`] if serialization fails
pub fn encode(reading: &SensorReading) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&TelemetryFrame::from(reading))?)
}

/// Decode a wire frame
///
/// # Arguments
///
/// * `bytes` - UTF-8 JSON bytes as produced by [`encode`]
///
/// # Returns
///
/// * `Result<TelemetryFrame>` - The reconstructed frame
///
/// # Errors
///
/// Returns [`crate::error::SensorRelayError::Encode`] if the bytes are not
/// a valid frame
pub fn decode(bytes: &[u8]) -> Result<TelemetryFrame> {
    Ok(serde_json::from_slice(bytes)?)
}
