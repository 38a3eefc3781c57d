//! Interrupt-driven, transmit-only UART.
//!
//! Application code pushes bytes through a [`Transmitter`]; the
//! "data register empty" interrupt handler calls
//! [`TxDrain::on_data_register_empty`] to move them to the hardware one at a
//! time.

pub mod queue;
pub mod tx;

pub use self::queue::{Consumer, Producer, TxQueue};
pub use self::tx::{Transmitter, TxDrain};

/// Raw access to the transmit side of a UART peripheral.
///
/// The producer and interrupt halves each own one implementation; on real
/// hardware both usually point at the same register block.
pub trait SerialPort {
    /// Selects 8 data bits, no parity, one stop bit.
    fn set_frame_8n1(&mut self);

    /// Loads the baud rate divisor (`UBRR`).
    fn set_baud_divisor(&mut self, divisor: u16);

    /// Turns the transmitter on.
    fn enable_transmitter(&mut self);

    /// Enables the "data register empty" interrupt.
    fn enable_tx_empty_interrupt(&mut self);

    /// Disables the "data register empty" interrupt.
    fn disable_tx_empty_interrupt(&mut self);

    /// Writes the data register, starting transmission of `byte`.
    fn write_data(&mut self, byte: u8);
}

/// Baud rate divisor for a given core clock in normal-speed mode.
///
/// `UBRR = (F_CPU + 8 * BAUD) / (16 * BAUD) - 1`, rounded to nearest. Values
/// that do not fit the 12-bit register fail at compile time.
pub struct BaudDivisor<const F_CPU: u32, const BAUD: u32>;

impl<const F_CPU: u32, const BAUD: u32> BaudDivisor<F_CPU, BAUD> {
    /// Value to load into `UBRR`.
    pub const UBRR: u16 = {
        assert!(BAUD > 0, "baud rate must be non-zero");
        assert!(F_CPU + BAUD * 8 >= 16 * BAUD, "baud rate too high for F_CPU");
        let ubrr = (F_CPU + BAUD * 8) / (16 * BAUD) - 1;
        assert!(ubrr <= 0x0FFF, "UBRR outside range");
        ubrr as u16
    };
}
