//! Register map definitions for the ADS1015 ADC.

use crate::config::Config;

/// Pointer value of the `CONVERSION` register.
pub const REG_CONVERSION: u8 = 0b00;
/// Pointer value of the `CONFIG` register.
pub const REG_CONFIG: u8 = 0b01;
/// Pointer value of the `LO_THRESH` register.
pub const REG_LO_THRESH: u8 = 0b10;
/// Pointer value of the `HI_THRESH` register.
pub const REG_HI_THRESH: u8 = 0b11;

/// `CONFIG` value after power-on reset.
pub const DEFAULT_CONFIG: u16 = 0x8583;
/// Mask of the operational status / single-shot start bit (`CONFIG.OS`).
pub const CONFIG_OS: u16 = 1 << 15;

/// `HI_THRESH` value that turns ALERT/RDY into a conversion-ready signal.
pub const READY_HI_THRESHOLD: u16 = 0xFFFF;
/// `LO_THRESH` value that turns ALERT/RDY into a conversion-ready signal.
pub const READY_LO_THRESHOLD: u16 = 0x0000;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Pointer byte selecting the register.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

impl Register for Config {
    type Raw = u16;
    const ADDRESS: u8 = REG_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(DEFAULT_CONFIG);
}

/// Right-aligns a left-justified 12-bit conversion result.
///
/// The register holds D11..D0 followed by four zero bits. Division keeps the
/// sign for negative samples without depending on shift semantics.
#[inline]
pub const fn raw_sample(register: u16) -> i16 {
    (register as i16) / 16
}
