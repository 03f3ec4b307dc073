//! # Radio Module
//!
//! Owns the serial link to the Grove LoRa module and pushes encoded frames
//! onto it.
//!
//! This module handles:
//! - Opening the serial device at a fixed baud rate with a bounded timeout
//! - Fire-and-forget transmission of telemetry frames
//! - Absorbing link faults so a failed send never ends the cycle
//!
//! Transmission carries no acknowledgment, retry, or backoff; the link is
//! half-duplex and unreliable by design. Hardening (acks, retransmission)
//! would be a separate layer on top of [`LoraRadio::send`], not folded into
//! it.

pub mod link;

use std::time::Duration;

use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use crate::config::SerialConfig;
use crate::error::{Result, SensorRelayError};
use link::{LinkIO, TokioSerialLink};

/// LoRa radio transmitter
///
/// Owns the serial link handle for the process lifetime. Construction only
/// succeeds with an open link; there is no telemetry path without one, so
/// the process must not reach the acquisition loop on failure.
pub struct LoraRadio {
    /// Serial link handle
    link: Box<dyn LinkIO>,
    /// Device path (e.g., /dev/ttyS0)
    device_path: String,
}

impl std::fmt::Debug for LoraRadio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoraRadio")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl LoraRadio {
    /// Open the configured serial device
    ///
    /// # Arguments
    ///
    /// * `config` - Serial port, baud rate and read timeout
    ///
    /// # Returns
    ///
    /// * `Result<LoraRadio>` - Connected radio or error
    ///
    /// # Errors
    ///
    /// Returns [`SensorRelayError::LinkOpen`] if the device cannot be
    /// opened; fatal to startup
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = tokio_serial::new(&config.port, config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open_native_async()
            .map_err(|e| {
                SensorRelayError::LinkOpen(format!("failed to open {}: {}", config.port, e))
            })?;

        info!(
            "Connected to LoRa module on {} at {} baud",
            config.port, config.baud_rate
        );

        Ok(Self {
            link: Box::new(TokioSerialLink::new(port)),
            device_path: config.port.clone(),
        })
    }

    /// Build a radio over an already-constructed link (test seam)
    #[cfg(test)]
    pub(crate) fn with_link(link: Box<dyn LinkIO>, device_path: &str) -> Self {
        Self {
            link,
            device_path: device_path.to_string(),
        }
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Transmit one frame, fire-and-forget
    ///
    /// A closed link or a write fault is reported and absorbed: the call
    /// never panics or returns an error, the frame is simply dropped and
    /// the pipeline carries on to the next cycle.
    ///
    /// # Arguments
    ///
    /// * `frame` - Complete encoded telemetry frame
    ///
    /// # Returns
    ///
    /// * `bool` - Whether the frame actually went out on the link
    pub async fn send(&mut self, frame: &[u8]) -> bool {
        if !self.link.is_open() {
            warn!("radio link {} is not open, dropping frame", self.device_path);
            return false;
        }

        match self.transmit(frame).await {
            Ok(()) => {
                debug!("sent telemetry frame ({} bytes)", frame.len());
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    async fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        self.link
            .write_all(frame)
            .await
            .map_err(|e| SensorRelayError::LinkWrite(format!("failed to write frame: {}", e)))?;

        self.link
            .flush()
            .await
            .map_err(|e| SensorRelayError::LinkWrite(format!("failed to flush link: {}", e)))?;

        Ok(())
    }
}
