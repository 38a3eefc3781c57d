//! Two-wire master primitives.
//!
//! A transaction is `start`, an address byte, any number of data bytes, and
//! `stop`. A repeated `start` may appear mid-transaction to turn the bus
//! around. Every primitive returns only once the controller has finished it.

/// Data direction carried in the low bit of the address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// Master transmits.
    Write = 0,
    /// Master receives.
    Read = 1,
}

/// Acknowledge the master sends after a received byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// More bytes are wanted.
    Ack,
    /// This is the last byte of the transfer.
    Nack,
}

/// Builds the first byte of a transfer from a 7-bit address.
#[inline]
pub const fn address_byte(address: u8, direction: Direction) -> u8 {
    (address << 1) | direction as u8
}

/// Blocking master-side access to a two-wire bus.
pub trait BusPort {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Issues a start (or repeated start) condition.
    fn start(&mut self) -> core::result::Result<(), Self::Error>;

    /// Issues a stop condition.
    fn stop(&mut self) -> core::result::Result<(), Self::Error>;

    /// Shifts one address or data byte onto the bus.
    fn write_byte(&mut self, byte: u8) -> core::result::Result<(), Self::Error>;

    /// Clocks one byte off the bus, answering with `ack`.
    fn read_byte(&mut self, ack: Ack) -> core::result::Result<u8, Self::Error>;
}

impl<T: BusPort + ?Sized> BusPort for &mut T {
    type Error = T::Error;

    fn start(&mut self) -> core::result::Result<(), Self::Error> {
        T::start(self)
    }

    fn stop(&mut self) -> core::result::Result<(), Self::Error> {
        T::stop(self)
    }

    fn write_byte(&mut self, byte: u8) -> core::result::Result<(), Self::Error> {
        T::write_byte(self, byte)
    }

    fn read_byte(&mut self, ack: Ack) -> core::result::Result<u8, Self::Error> {
        T::read_byte(self, ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_byte_carries_direction_in_low_bit() {
        assert_eq!(address_byte(0x48, Direction::Write), 0x90);
        assert_eq!(address_byte(0x48, Direction::Read), 0x91);
        assert_eq!(address_byte(0x4B, Direction::Read), 0x97);
    }
}
