//! Platform-agnostic async driver for the ST LIS3DH 3-axis accelerometer.
//!
//! The driver does not own the I²C bus. Every operation borrows the bus for
//! its duration only, so the caller decides how bus access is shared with
//! other devices (e.g. behind an async mutex).
#![no_std]

pub mod asynci2c;
mod register;

pub use accelerometer;
pub use register::*;

/// Driver errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error
    Bus(E),

    /// `WHO_AM_I` did not match, no LIS3DH answered at the given address
    WrongAddress,

    /// Attempted to write to a read-only register
    WriteToReadOnly,
}

/// Sensor configuration applied by [`asynci2c::Lis3dh::new`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Operating mode (resolution)
    pub mode: Mode,

    /// Output data rate
    pub datarate: DataRate,

    pub enable_x_axis: bool,
    pub enable_y_axis: bool,
    pub enable_z_axis: bool,

    /// Output registers are not updated until both bytes of a sample were read
    pub block_data_update: bool,

    /// Enable the temperature sensor. Requires block data update.
    pub temp_en: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: Mode::HighResolution,
            datarate: DataRate::Hz_400,
            enable_x_axis: true,
            enable_y_axis: true,
            enable_z_axis: true,
            block_data_update: false,
            temp_en: false,
        }
    }
}
