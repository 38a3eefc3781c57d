//! Register access built directly on two-wire master primitives.

use super::Ads1015Interface;
use super::bus::{Ack, BusPort, Direction, address_byte};

/// Register interface framing ADS1015 transactions over a [`BusPort`].
pub struct TwiInterface<BUS> {
    bus: BUS,
    address: u8,
}

impl<BUS> TwiInterface<BUS> {
    /// Creates a new interface talking to the device at the 7-bit `address`.
    pub const fn new(bus: BUS, address: u8) -> Self {
        Self { bus, address }
    }

    /// Returns the 7-bit device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped bus.
    pub fn bus_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    /// Consumes the interface and returns the owned bus.
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS> TwiInterface<BUS>
where
    BUS: BusPort,
{
    fn send_write(&mut self, register: u8, value: u16) -> core::result::Result<(), BUS::Error> {
        let [msb, lsb] = value.to_be_bytes();

        self.bus.start()?;
        self.bus.write_byte(address_byte(self.address, Direction::Write))?;
        self.bus.write_byte(register)?;
        self.bus.write_byte(msb)?;
        self.bus.write_byte(lsb)
    }

    fn send_read(&mut self, register: u8) -> core::result::Result<u16, BUS::Error> {
        self.bus.start()?;
        self.bus.write_byte(address_byte(self.address, Direction::Write))?;
        self.bus.write_byte(register)?;
        self.bus.start()?;
        self.bus.write_byte(address_byte(self.address, Direction::Read))?;
        let msb = self.bus.read_byte(Ack::Ack)?;
        let lsb = self.bus.read_byte(Ack::Nack)?;

        Ok(u16::from_be_bytes([msb, lsb]))
    }

    /// Issues the stop that closes every transaction, reporting the first
    /// error seen.
    fn finish<T>(
        &mut self,
        result: core::result::Result<T, BUS::Error>,
    ) -> core::result::Result<T, BUS::Error> {
        let stopped = self.bus.stop();
        let value = result?;
        stopped.map(|()| value)
    }
}

impl<BUS> Ads1015Interface for TwiInterface<BUS>
where
    BUS: BusPort,
{
    type Error = BUS::Error;

    fn write_register(&mut self, register: u8, value: u16) -> core::result::Result<(), Self::Error> {
        let result = self.send_write(register, value);
        self.finish(result)
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error> {
        let result = self.send_read(register);
        self.finish(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    /// One primitive observed on the bus.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Event {
        Start,
        Stop,
        Write(u8),
        Read(Ack),
    }

    /// Simulated ADS1015 that decodes primitives into register accesses.
    ///
    /// Registers behave as plain storage, except that `CONFIG` always reads
    /// back with OS set: conversions finish instantly. `config_readback`
    /// overrides the next `CONFIG` read.
    pub(crate) struct FakeAds1015 {
        pub(crate) address: u8,
        pub(crate) registers: [u16; 4],
        pub(crate) events: Vec<Event>,
        pub(crate) config_readback: Option<u16>,
        pointer: u8,
        reading: bool,
        expect_address: bool,
        write_index: usize,
        pending: [u8; 2],
        read_index: usize,
        read_word: u16,
    }

    impl FakeAds1015 {
        pub(crate) fn new(address: u8) -> Self {
            Self {
                address,
                registers: [0x0000, 0x8583, 0x8000, 0x7FFF],
                events: Vec::new(),
                config_readback: None,
                pointer: 0,
                reading: false,
                expect_address: false,
                write_index: 0,
                pending: [0; 2],
                read_index: 0,
                read_word: 0,
            }
        }

        /// Register writes observed so far as `(pointer, value)` pairs.
        pub(crate) fn register_writes(&self) -> Vec<(u8, u16)> {
            let mut writes = Vec::new();
            let mut frame: Vec<u8> = Vec::new();
            for event in &self.events {
                match *event {
                    Event::Start => frame.clear(),
                    Event::Write(byte) => frame.push(byte),
                    Event::Stop => {
                        if frame.len() == 4 && frame[0] & 1 == 0 {
                            writes.push((frame[1], u16::from_be_bytes([frame[2], frame[3]])));
                        }
                        frame.clear();
                    }
                    Event::Read(_) => frame.clear(),
                }
            }
            writes
        }
    }

    impl BusPort for FakeAds1015 {
        type Error = Infallible;

        fn start(&mut self) -> Result<(), Infallible> {
            self.events.push(Event::Start);
            self.expect_address = true;
            self.write_index = 0;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Infallible> {
            self.events.push(Event::Stop);
            if !self.reading && self.write_index == 3 {
                self.registers[usize::from(self.pointer & 0b11)] =
                    u16::from_be_bytes(self.pending);
            }
            self.reading = false;
            Ok(())
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), Infallible> {
            self.events.push(Event::Write(byte));
            if self.expect_address {
                assert_eq!(byte >> 1, self.address, "addressed the wrong device");
                self.expect_address = false;
                self.reading = byte & 1 == 1;
                if self.reading {
                    let index = usize::from(self.pointer & 0b11);
                    self.read_word = if index == 0b01 {
                        self.config_readback
                            .take()
                            .unwrap_or(self.registers[index] | 0x8000)
                    } else {
                        self.registers[index]
                    };
                    self.read_index = 0;
                }
                return Ok(());
            }

            assert!(!self.reading, "write during read phase");
            match self.write_index {
                0 => self.pointer = byte,
                1 | 2 => self.pending[self.write_index - 1] = byte,
                _ => panic!("too many data bytes"),
            }
            self.write_index += 1;
            Ok(())
        }

        fn read_byte(&mut self, ack: Ack) -> Result<u8, Infallible> {
            self.events.push(Event::Read(ack));
            assert!(self.reading, "read without a read-direction address");
            let byte = self.read_word.to_be_bytes()[self.read_index];
            self.read_index += 1;
            Ok(byte)
        }
    }

    #[test]
    fn write_register_frames_pointer_and_big_endian_value() {
        let mut interface = TwiInterface::new(FakeAds1015::new(0x48), 0x48);

        interface.write_register(0b01, 0x1234).unwrap();

        let fake = interface.release();
        assert_eq!(
            fake.events,
            [
                Event::Start,
                Event::Write(0x90),
                Event::Write(0x01),
                Event::Write(0x12),
                Event::Write(0x34),
                Event::Stop,
            ]
        );
        assert_eq!(fake.registers[1], 0x1234);
    }

    #[test]
    fn read_register_uses_repeated_start_and_nacks_last_byte() {
        let mut fake = FakeAds1015::new(0x49);
        fake.registers[0] = 0xABC0;
        let mut interface = TwiInterface::new(fake, 0x49);

        assert_eq!(interface.read_register(0b00).unwrap(), 0xABC0);
        assert_eq!(
            interface.release().events,
            [
                Event::Start,
                Event::Write(0x92),
                Event::Write(0x00),
                Event::Start,
                Event::Write(0x93),
                Event::Read(Ack::Ack),
                Event::Read(Ack::Nack),
                Event::Stop,
            ]
        );
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nacked;

    /// Bus whose `fail_at`-th byte exchange (writes and reads, counted from
    /// zero) is not acknowledged.
    struct FlakyBus {
        events: Vec<Event>,
        exchanges: usize,
        fail_at: usize,
    }

    impl FlakyBus {
        fn new(fail_at: usize) -> Self {
            Self {
                events: Vec::new(),
                exchanges: 0,
                fail_at,
            }
        }

        fn exchange(&mut self, event: Event) -> Result<(), Nacked> {
            self.events.push(event);
            self.exchanges += 1;
            if self.exchanges - 1 == self.fail_at {
                Err(Nacked)
            } else {
                Ok(())
            }
        }
    }

    impl BusPort for FlakyBus {
        type Error = Nacked;

        fn start(&mut self) -> Result<(), Nacked> {
            self.events.push(Event::Start);
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Nacked> {
            self.events.push(Event::Stop);
            Ok(())
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), Nacked> {
            self.exchange(Event::Write(byte))
        }

        fn read_byte(&mut self, ack: Ack) -> Result<u8, Nacked> {
            self.exchange(Event::Read(ack)).map(|()| 0)
        }
    }

    #[test]
    fn failed_write_still_releases_the_bus() {
        for fail_at in 0..4 {
            let mut interface = TwiInterface::new(FlakyBus::new(fail_at), 0x48);

            assert_eq!(interface.write_register(0b01, 0x1234), Err(Nacked));

            let events = interface.release().events;
            assert_eq!(events.len(), fail_at + 3, "failing exchange {fail_at}");
            assert_eq!(events.last(), Some(&Event::Stop));
        }
    }

    #[test]
    fn failed_read_still_releases_the_bus() {
        // Exchanges: address+W, pointer, address+R, MSB, LSB.
        for fail_at in 0..5 {
            let mut interface = TwiInterface::new(FlakyBus::new(fail_at), 0x48);

            assert_eq!(interface.read_register(0b00), Err(Nacked));

            let events = interface.release().events;
            assert_eq!(events.last(), Some(&Event::Stop), "failing exchange {fail_at}");
            assert_eq!(events.iter().filter(|e| **e == Event::Stop).count(), 1);
        }
    }

    #[test]
    fn every_register_round_trips() {
        let mut interface = TwiInterface::new(FakeAds1015::new(0x48), 0x48);

        for (register, value) in [(0b00, 0x7FF0), (0b01, 0xC283), (0b10, 0x0000), (0b11, 0xFFFF)] {
            interface.write_register(register, value).unwrap();
            assert_eq!(interface.read_register(register).unwrap(), value);
        }
    }
}
