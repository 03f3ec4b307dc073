//! # Pipeline Module
//!
//! One acquisition cycle: acquire → append → encode → send.
//!
//! Ordering matters: the reading is durably logged before transmission is
//! attempted, so a dead radio link never costs a log row. Fatal faults
//! (environment sensor, persistence, encoding) propagate to the caller;
//! link faults are absorbed inside [`LoraRadio::send`].

use embedded_hal::i2c::I2c;

use crate::error::Result;
use crate::logger::CsvLogger;
use crate::radio::LoraRadio;
use crate::sensors::environment::EnvironmentSensor;
use crate::sensors::ReadingAcquirer;
use crate::telemetry;

/// Run one full cycle
///
/// # Arguments
///
/// * `acquirer` - Sensor sources
/// * `logger` - Durable reading log
/// * `radio` - Transmit link
///
/// # Returns
///
/// * `Result<bool>` - Whether the frame was transmitted this cycle
///
/// # Errors
///
/// Propagates environment sensor, persistence and encoding failures; a
/// failed transmission is not an error
pub async fn run_cycle<E, I2C>(
    acquirer: &mut ReadingAcquirer<E, I2C>,
    logger: &CsvLogger,
    radio: &mut LoraRadio,
) -> Result<bool>
where
    E: EnvironmentSensor,
    I2C: I2c,
{
    let reading = acquirer.acquire()?;
    logger.append(&reading)?;
    let frame = telemetry::encode(&reading)?;
    Ok(radio.send(&frame).await)
}
