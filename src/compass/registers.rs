//! # HMC5883L Register Map
//!
//! Register addresses and control values for the Honeywell HMC5883L
//! 3-axis magnetometer (GY-273 breakout).

/// Default 7-bit I2C address of the HMC5883L
pub const COMPASS_I2C_ADDRESS: u8 = 0x1E;

/// Configuration Register A (averaging and output rate)
pub const REG_CONFIG_A: u8 = 0x00;

/// Configuration Register B (gain)
pub const REG_CONFIG_B: u8 = 0x01;

/// Mode Register (measurement mode)
pub const REG_MODE: u8 = 0x02;

/// X-axis data output register, MSB first
pub const REG_AXIS_X_MSB: u8 = 0x03;

/// Z-axis data output register, MSB first
///
/// The device lays out its data registers in X, Z, Y order; Z sits between
/// X and Y in the register map.
pub const REG_AXIS_Z_MSB: u8 = 0x05;

/// Y-axis data output register, MSB first
pub const REG_AXIS_Y_MSB: u8 = 0x07;

/// Configuration Register A value: 8-sample averaging, 15 Hz output,
/// normal measurement
pub const CONFIG_A_AVG8_15HZ: u8 = 0x70;

/// Configuration Register B value: gain setting 5 (±4.7 gauss)
pub const CONFIG_B_GAIN_5: u8 = 0xA0;

/// Mode Register value: continuous measurement mode
pub const MODE_CONTINUOUS: u8 = 0x00;

/// Number of bytes per axis read (MSB + LSB)
pub const AXIS_READ_LEN: usize = 2;
