//! I²C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Ads1015Interface;

/// I²C-based interface implementation for the ADS1015 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I²C bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I²C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Ads1015Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u16) -> core::result::Result<(), Self::Error> {
        let [msb, lsb] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, msb, lsb])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error> {
        let mut value = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(u16::from_be_bytes(value))
    }
}
