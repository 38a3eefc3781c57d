//! Bus interface abstraction for the ADS1015 driver.

pub mod bus;
pub mod controller;
pub mod i2c;
pub mod twi;

/// Abstraction over the register access required by the driver.
///
/// Registers are 16 bits wide and travel MSB first.
pub trait Ads1015Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u16) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error>;
}
