//! Hardware TWI master controller.
//!
//! Drives an AVR-style TWI peripheral (`TWCR`, `TWDR`, `TWBR`) through the
//! [`TwiRegisters`] access trait and implements [`BusPort`] on top of it.
//! Every primitive writes the control register and then spins on the status
//! flags. With [`SpinLimit::Unbounded`] a stalled bus hangs the caller, which
//! is the default.

use super::bus::{Ack, BusPort};
use crate::log::warn;

/// `TWCR.TWINT`: operation complete / clear flag.
pub const TWINT: u8 = 1 << 7;
/// `TWCR.TWEA`: acknowledge received bytes.
pub const TWEA: u8 = 1 << 6;
/// `TWCR.TWSTA`: generate start condition.
pub const TWSTA: u8 = 1 << 5;
/// `TWCR.TWSTO`: generate stop condition.
pub const TWSTO: u8 = 1 << 4;
/// `TWCR.TWEN`: peripheral enable.
pub const TWEN: u8 = 1 << 2;

/// Raw access to the TWI register block.
pub trait TwiRegisters {
    /// Reads `TWCR`.
    fn read_control(&mut self) -> u8;
    /// Writes `TWCR`.
    fn write_control(&mut self, value: u8);
    /// Reads `TWDR`.
    fn read_data(&mut self) -> u8;
    /// Writes `TWDR`.
    fn write_data(&mut self, value: u8);
    /// Writes `TWBR`.
    fn write_bit_rate(&mut self, value: u8);
}

/// How long a primitive may poll its completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinLimit {
    /// Poll forever.
    #[default]
    Unbounded,
    /// Give up after this many polls.
    Bounded(u32),
}

/// Errors produced by [`Twi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiError {
    /// A completion flag did not change within the configured [`SpinLimit`].
    Timeout,
}

/// Bit rate divisor for a given core clock and SCL frequency.
///
/// `TWBR = (F_CPU / F_SCL - 16) / 2` with a prescaler of one. Out-of-range
/// values fail at compile time when [`BitRate::TWBR`] is used.
pub struct BitRate<const F_CPU: u32, const F_SCL: u32>;

impl<const F_CPU: u32, const F_SCL: u32> BitRate<F_CPU, F_SCL> {
    /// Value to load into `TWBR`.
    pub const TWBR: u8 = {
        assert!(F_SCL > 0, "SCL frequency must be non-zero");
        assert!(F_CPU / F_SCL >= 16, "SCL frequency too high for F_CPU");
        let twbr = (F_CPU / F_SCL - 16) / 2;
        assert!(twbr <= u8::MAX as u32, "TWBR outside range");
        twbr as u8
    };
}

/// Blocking TWI master.
pub struct Twi<R> {
    regs: R,
    limit: SpinLimit,
}

impl<R> Twi<R>
where
    R: TwiRegisters,
{
    /// Wraps a register block; primitives spin without limit.
    pub const fn new(regs: R) -> Self {
        Self {
            regs,
            limit: SpinLimit::Unbounded,
        }
    }

    /// Wraps a register block with a bound on every completion wait.
    pub const fn with_spin_limit(regs: R, limit: SpinLimit) -> Self {
        Self { regs, limit }
    }

    /// Programs the SCL bit rate.
    pub fn init<const F_CPU: u32, const F_SCL: u32>(&mut self) {
        self.regs.write_bit_rate(BitRate::<F_CPU, F_SCL>::TWBR);
    }

    /// Consumes the controller and returns the register block.
    pub fn release(self) -> R {
        self.regs
    }

    fn wait_until(&mut self, done: impl Fn(u8) -> bool) -> Result<(), TwiError> {
        match self.limit {
            SpinLimit::Unbounded => loop {
                if done(self.regs.read_control()) {
                    return Ok(());
                }
                core::hint::spin_loop();
            },
            SpinLimit::Bounded(polls) => {
                for _ in 0..polls {
                    if done(self.regs.read_control()) {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                warn!("TWI wait timed out after {} polls", polls);
                Err(TwiError::Timeout)
            }
        }
    }

    fn wait_complete(&mut self) -> Result<(), TwiError> {
        self.wait_until(|control| control & TWINT != 0)
    }
}

impl<R> BusPort for Twi<R>
where
    R: TwiRegisters,
{
    type Error = TwiError;

    fn start(&mut self) -> Result<(), TwiError> {
        self.regs.write_control(TWINT | TWEN | TWSTA);
        self.wait_complete()
    }

    fn stop(&mut self) -> Result<(), TwiError> {
        self.regs.write_control(TWINT | TWEN | TWSTO);
        // TWSTO self-clears once the stop condition is on the bus.
        self.wait_until(|control| control & TWSTO == 0)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TwiError> {
        self.regs.write_data(byte);
        self.regs.write_control(TWINT | TWEN);
        self.wait_complete()
    }

    fn read_byte(&mut self, ack: Ack) -> Result<u8, TwiError> {
        let ea = match ack {
            Ack::Ack => TWEA,
            Ack::Nack => 0,
        };
        self.regs.write_control(TWINT | ea | TWEN);
        self.wait_complete()?;
        Ok(self.regs.read_data())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Access {
        Control(u8),
        Data(u8),
        BitRate(u8),
    }

    /// Register block that completes every operation instantly, or never.
    struct FakeRegisters {
        control: u8,
        incoming: u8,
        responsive: bool,
        log: Vec<Access>,
    }

    impl FakeRegisters {
        fn responsive(incoming: u8) -> Self {
            Self {
                control: 0,
                incoming,
                responsive: true,
                log: Vec::new(),
            }
        }

        fn stalled() -> Self {
            Self {
                responsive: false,
                ..Self::responsive(0)
            }
        }
    }

    impl TwiRegisters for FakeRegisters {
        fn read_control(&mut self) -> u8 {
            self.control
        }

        fn write_control(&mut self, value: u8) {
            self.log.push(Access::Control(value));
            // Writing a one to TWINT clears the flag.
            self.control = value & !TWINT;
            if self.responsive {
                self.control = (self.control | TWINT) & !TWSTO;
            }
        }

        fn read_data(&mut self) -> u8 {
            self.incoming
        }

        fn write_data(&mut self, value: u8) {
            self.log.push(Access::Data(value));
        }

        fn write_bit_rate(&mut self, value: u8) {
            self.log.push(Access::BitRate(value));
        }
    }

    #[test]
    fn init_programs_bit_rate_for_standard_mode() {
        let mut twi = Twi::new(FakeRegisters::responsive(0));
        twi.init::<16_000_000, 100_000>();
        assert_eq!(twi.release().log, [Access::BitRate(72)]);
    }

    #[test]
    fn primitives_write_control_sequences() {
        let mut twi = Twi::new(FakeRegisters::responsive(0x5A));

        twi.start().unwrap();
        twi.write_byte(0x90).unwrap();
        assert_eq!(twi.read_byte(Ack::Ack).unwrap(), 0x5A);
        assert_eq!(twi.read_byte(Ack::Nack).unwrap(), 0x5A);
        twi.stop().unwrap();

        assert_eq!(
            twi.release().log,
            [
                Access::Control(0xA4),
                Access::Data(0x90),
                Access::Control(0x84),
                Access::Control(0xC4),
                Access::Control(0x84),
                Access::Control(0x94),
            ]
        );
    }

    #[test]
    fn bounded_wait_times_out_on_stalled_bus() {
        let mut twi = Twi::with_spin_limit(FakeRegisters::stalled(), SpinLimit::Bounded(8));

        assert_eq!(twi.start(), Err(TwiError::Timeout));
        assert_eq!(twi.write_byte(0x90), Err(TwiError::Timeout));
        assert_eq!(twi.read_byte(Ack::Nack), Err(TwiError::Timeout));
        assert_eq!(twi.stop(), Err(TwiError::Timeout));
    }
}
