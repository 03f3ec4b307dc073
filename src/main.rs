//! # Sensor Relay
//!
//! Log BME280 environment and HMC5883L compass readings and relay them
//! over a LoRa serial link.
//!
//! Once per poll interval the application acquires a reading from both
//! sensors, appends it to the CSV log, encodes it as a telemetry frame and
//! sends the frame over the radio.

use anyhow::Result;
use linux_embedded_hal::I2cdev;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use sensor_relay::compass::Hmc5883l;
use sensor_relay::config::Config;
use sensor_relay::logger::CsvLogger;
use sensor_relay::pipeline::run_cycle;
use sensor_relay::radio::LoraRadio;
use sensor_relay::sensors::environment::Bme280Sensor;
use sensor_relay::sensors::ReadingAcquirer;

/// Configuration file consulted at startup; defaults apply when absent
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of cycles between status log messages
const STATUS_INTERVAL_CYCLES: u64 = 60;

/// Main entry point for Sensor Relay
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (built-in defaults when no file exists)
///    - Open the serial link to the LoRa module (fatal on failure: there
///      is no telemetry path without a link)
///    - Initialize the BME280 (fatal on failure: no fallback value exists
///      for the primary sensor)
///    - Initialize the compass; on failure it stays disabled for the whole
///      run and readings carry zero compass fields
///    - Create the CSV log with its header if it does not exist yet
///
/// 2. **Main Loop**
///    - Acquire, log and transmit one reading per poll interval
///    - Log a status line every [`STATUS_INTERVAL_CYCLES`] cycles
///    - Handle Ctrl+C for graceful shutdown, observed at the loop boundary
///
/// # Errors
///
/// Returns error if:
/// - The serial device cannot be opened
/// - The BME280 does not respond
/// - A reading cannot be appended to the log
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Sensor Relay v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
        Config::load(DEFAULT_CONFIG_PATH)?
    } else {
        info!("No configuration file at {}, using defaults", DEFAULT_CONFIG_PATH);
        Config::default()
    };

    let mut radio = LoraRadio::open(&config.serial)?;

    let env_sensor = Bme280Sensor::open(&config.bus.device)?;
    info!("BME280 initialized on {}", config.bus.device);

    // A dead compass degrades to zero readings instead of aborting startup
    let compass = match I2cdev::new(&config.bus.device) {
        Ok(bus) => {
            let mut compass = Hmc5883l::new(bus, config.bus.compass_address);
            match compass.configure() {
                Ok(()) => {
                    info!("Compass initialized at address 0x{:02X}", config.bus.compass_address);
                    Some(compass)
                }
                Err(e) => {
                    warn!("Failed to initialize compass, readings will be zero: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!("Compass bus unavailable, readings will be zero: {:?}", e);
            None
        }
    };

    let mut acquirer = ReadingAcquirer::new(env_sensor, compass);

    let logger = CsvLogger::new(&config.log.path);
    logger.ensure_header()?;

    let mut cycle_interval = interval(Duration::from_millis(config.acquisition.poll_interval_ms));

    info!(
        "Logging data to {} every {}ms",
        config.log.path, config.acquisition.poll_interval_ms
    );
    info!("Press Ctrl+C to stop");

    let mut cycle_count: u64 = 0;
    let mut sent_count: u64 = 0;

    // Main acquisition loop
    loop {
        tokio::select! {
            // Run one cycle at each tick
            _ = cycle_interval.tick() => {
                if run_cycle(&mut acquirer, &logger, &mut radio).await? {
                    sent_count += 1;
                }
                cycle_count += 1;

                if cycle_count % STATUS_INTERVAL_CYCLES == 0 {
                    info!("Completed {} cycles, {} frames transmitted", cycle_count, sent_count);
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, data logging stopped.");
                info!("Total cycles: {}, frames transmitted: {}", cycle_count, sent_count);
                break;
            }
        }
    }

    Ok(())
}
