//! Producer and interrupt halves of the UART transmitter.

use core::ffi::CStr;
use core::fmt;

use super::queue::{Consumer, Producer};
use super::{BaudDivisor, SerialPort};
use crate::log::trace;

/// Application side of the transmitter.
pub struct Transmitter<'a, S, const N: usize> {
    producer: Producer<'a, N>,
    port: S,
}

impl<'a, S, const N: usize> Transmitter<'a, S, N>
where
    S: SerialPort,
{
    /// Creates a transmitter feeding `producer` and kicking `port`.
    pub fn new(producer: Producer<'a, N>, port: S) -> Self {
        Self { producer, port }
    }

    /// Configures an 8-N-1 frame at `BAUD` and turns the transmitter on.
    pub fn init<const F_CPU: u32, const BAUD: u32>(&mut self) {
        let divisor = BaudDivisor::<F_CPU, BAUD>::UBRR;
        trace!("UART divisor {}", divisor);
        self.port.set_frame_8n1();
        self.port.set_baud_divisor(divisor);
        self.port.enable_transmitter();
    }

    /// Queues one byte, spinning while the queue is full.
    pub fn put_byte(&mut self, byte: u8) {
        self.producer.enqueue(byte);
        self.port.enable_tx_empty_interrupt();
    }

    /// Queues every byte of `bytes`.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_byte(byte);
        }
    }

    /// Queues a string.
    pub fn put_str(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Queues a NUL-terminated string up to, not including, the terminator.
    pub fn put_c_str(&mut self, s: &CStr) {
        self.put_bytes(s.to_bytes());
    }

    /// Consumes the transmitter and returns its parts.
    pub fn release(self) -> (Producer<'a, N>, S) {
        (self.producer, self.port)
    }
}

impl<S, const N: usize> fmt::Write for Transmitter<'_, S, N>
where
    S: SerialPort,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

/// Interrupt side of the transmitter.
pub struct TxDrain<'a, S, const N: usize> {
    consumer: Consumer<'a, N>,
    port: S,
}

impl<'a, S, const N: usize> TxDrain<'a, S, N>
where
    S: SerialPort,
{
    /// Creates a drain moving bytes from `consumer` into `port`.
    pub fn new(consumer: Consumer<'a, N>, port: S) -> Self {
        Self { consumer, port }
    }

    /// Handles the "data register empty" interrupt.
    ///
    /// Sends the next queued byte, or masks the interrupt once the queue has
    /// run dry. The next [`Transmitter::put_byte`] unmasks it again.
    pub fn on_data_register_empty(&mut self) {
        match self.consumer.dequeue() {
            Some(byte) => self.port.write_data(byte),
            None => self.port.disable_tx_empty_interrupt(),
        }
    }

    /// Consumes the drain and returns its parts.
    pub fn release(self) -> (Consumer<'a, N>, S) {
        (self.consumer, self.port)
    }
}
