//! # Error Types
//!
//! Custom error types for Sensor Relay using `thiserror`.
//!
//! Faults local to one sensor modality (`Bus`, `CompassInit`, `LinkWrite`)
//! are absorbed at their component boundary and surfaced through logging
//! only. Faults that would lose or corrupt a reading (`Environment`,
//! `Persistence`, `Io`, `Encode`) propagate and terminate the cycle.

use thiserror::Error;

/// Main error type for Sensor Relay
#[derive(Debug, Error)]
pub enum SensorRelayError {
    /// Compass bus transfer failures (absorbed as a zero sample)
    #[error("compass bus error: {0}")]
    Bus(String),

    /// Compass bring-up failure (disables the compass for the process lifetime)
    #[error("compass initialization failed: {0}")]
    CompassInit(String),

    /// Environment sensor failures (no fallback value, fatal)
    #[error("environment sensor error: {0}")]
    Environment(String),

    /// Serial device could not be opened at startup
    #[error("failed to open radio link: {0}")]
    LinkOpen(String),

    /// Serial write failure during a cycle (reported, transmission skipped)
    #[error("radio link write error: {0}")]
    LinkWrite(String),

    /// CSV log append failures
    #[error("log write error: {0}")]
    Persistence(#[from] csv::Error),

    /// Wire frame serialization errors
    #[error("telemetry encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Sensor Relay
pub type Result<T> = std::result::Result<T, SensorRelayError>;
