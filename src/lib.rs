//! Driver for the HLW8110/HLW8112 family of single-phase energy-metering
//! chips.
//!
//! The chip sits behind a byte transport: anything implementing
//! [`embedded_io::Read`] + [`embedded_io::Write`] works, so the driver runs
//! unchanged against a host serial port (see `demos/serial.rs`) or an MCU
//! UART. `no-std` environments are supported through the `no_std` feature
//! flag.
//!
//! What it covers:
//! * the checksummed command/register frame protocol, including the
//!   write-enable/write-disable bracket around every register write,
//! * decoding raw register codes into fixed sub-unit quantities: milliamps,
//!   millivolts, milliwatts, watt-hours, centihertz, hundredths of power
//!   factor and of a degree of phase,
//! * calibration: reading the chip's conversion coefficients and computing
//!   gain/offset correction codes from reference measurements.
//!
//! The chip's UART runs fixed at 9600 baud, 8 data bits, even parity, 1 stop
//! bit.
//!
//! Readings are only meaningful once [`Hlw811x::read_coeff`] has populated
//! the conversion coefficients, and after a reset the chip needs
//! [`RESET_SETTLE_TIME`] before it answers again.

#![cfg_attr(feature = "no_std", no_std)]

pub mod device;
pub mod error;

mod calib;
mod frame;
mod registers;
mod scaling;
mod types;

pub use device::{Hlw811x, RESET_SETTLE_TIME};
pub use error::{Error, Result};
pub use registers::Register;
pub use types::{
    ActivePowerMode, BusInterface, Calibration, Channel, ChannelBMode, ChannelSet, Coefficients,
    DataUpdateFreq, EnergyCoefficients, LineFreq, Pga, PgaGain, PowerCoefficients, ResistorRatio,
    RmsCoefficients, RmsMode, ZeroCrossingMode,
};

#[cfg(test)]
mod mock_serial;
