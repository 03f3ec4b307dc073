//! # Sensor Relay Library
//!
//! Log BME280 environment and HMC5883L compass readings and relay them
//! over a LoRa serial link.
//!
//! This library provides the acquisition pipeline: decoding raw compass
//! registers, composing normalized readings with per-source fault
//! isolation, appending them to a durable CSV log, and transmitting them
//! as structured frames over a fire-and-forget radio link.

pub mod compass;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod radio;
pub mod sensors;
pub mod telemetry;
