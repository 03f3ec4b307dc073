//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Device paths, baud rate, bus address and poll interval are fixed at
//! startup; there are no command-line flags. A missing configuration file
//! falls back to the built-in defaults, which match the original field
//! deployment (BME280 + GY-273 on I2C bus 1, Grove LoRa on /dev/ttyS0).

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub bus: BusConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub acquisition: AcquisitionConfig,
}

/// Serial radio link configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// I2C bus configuration for the onboard sensors
#[derive(Debug, Deserialize, Clone)]
pub struct BusConfig {
    #[serde(default = "default_bus_device")]
    pub device: String,

    #[serde(default = "default_compass_address")]
    pub compass_address: u8,
}

/// Reading log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: String,
}

/// Acquisition cycle configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AcquisitionConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyS0".to_string() }
fn default_baud_rate() -> u32 { 9600 }
fn default_timeout_ms() -> u64 { 1000 }

fn default_bus_device() -> String { "/dev/i2c-1".to_string() }
fn default_compass_address() -> u8 { 0x1E }

fn default_log_path() -> String { "sensor_data.csv".to_string() }

fn default_poll_interval_ms() -> u64 { 1000 }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            device: default_bus_device(),
            compass_address: default_compass_address(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { path: default_log_path() }
    }
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self { poll_interval_ms: default_poll_interval_ms() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            bus: BusConfig::default(),
            log: LogConfig::default(),
            acquisition: AcquisitionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("serial port cannot be empty")
            ));
        }

        // Standard UART rates the Grove LoRa module supports
        if ![1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200].contains(&self.serial.baud_rate) {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("baud_rate must be one of: 1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200")
            ));
        }

        if self.serial.timeout_ms == 0 || self.serial.timeout_ms > 10000 {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("timeout_ms must be between 1 and 10000")
            ));
        }

        if self.bus.device.is_empty() {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("bus device cannot be empty")
            ));
        }

        // 7-bit I2C addressing
        if self.bus.compass_address > 0x7F {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("compass_address must be a 7-bit address (0x00-0x7F)")
            ));
        }

        if self.log.path.is_empty() {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("log path cannot be empty")
            ));
        }

        if self.acquisition.poll_interval_ms == 0 || self.acquisition.poll_interval_ms > 60000 {
            return Err(crate::error::SensorRelayError::Config(
                toml::de::Error::custom("poll_interval_ms must be between 1 and 60000")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values_match_deployment() {
        let config = Config::default();
        assert_eq!(config.serial.port, "/dev/ttyS0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.timeout_ms, 1000);
        assert_eq!(config.bus.device, "/dev/i2c-1");
        assert_eq!(config.bus.compass_address, 0x1E);
        assert_eq!(config.log.path, "sensor_data.csv");
        assert_eq!(config.acquisition.poll_interval_ms, 1000);
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
port = "/dev/ttyAMA0"
baud_rate = 57600

[bus]
device = "/dev/i2c-0"

[log]
path = "readings.csv"

[acquisition]
poll_interval_ms = 500
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyAMA0");
        assert_eq!(config.serial.baud_rate, 57600);
        assert_eq!(config.bus.device, "/dev/i2c-0");
        assert_eq!(config.log.path, "readings.csv");
        assert_eq!(config.acquisition.poll_interval_ms, 500);
    }

    #[test]
    fn test_load_empty_file_yields_defaults() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyS0");
        assert_eq!(config.acquisition.poll_interval_ms, 1000);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Config::load("/nonexistent/path/to/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_serial_port() {
        let mut config = Config::default();
        config.serial.port = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = Config::default();
        config.serial.baud_rate = 420000; // Not a Grove LoRa rate
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_baud_rates() {
        for &baud in &[1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200] {
            let mut config = Config::default();
            config.serial.baud_rate = baud;
            assert!(config.validate().is_ok(), "Baud rate {} should be valid", baud);
        }
    }

    #[test]
    fn test_timeout_ms_zero() {
        let mut config = Config::default();
        config.serial.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_ms_too_high() {
        let mut config = Config::default();
        config.serial.timeout_ms = 10001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_bus_device() {
        let mut config = Config::default();
        config.bus.device = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compass_address_out_of_range() {
        let mut config = Config::default();
        config.bus.compass_address = 0x80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_path() {
        let mut config = Config::default();
        config.log.path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_zero() {
        let mut config = Config::default();
        config.acquisition.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_too_high() {
        let mut config = Config::default();
        config.acquisition.poll_interval_ms = 60001;
        assert!(config.validate().is_err());
    }
}
