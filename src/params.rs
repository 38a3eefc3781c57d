//! Strongly typed parameter enumerations for the ADS1015 driver.
//!
//! These enums map directly to datasheet field encodings of the `CONFIG`
//! register and are used by [`Config`](crate::config::Config) and the
//! high-level driver setters. Prefer them over raw integers to keep
//! configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use ads1015::params::{Channel, DataRate, Gain};
//!
//! let channel = Channel::SingleA0;
//! let gain = Gain::V1_024;
//! assert_eq!(gain.full_scale_mv(), 1_024);
//! assert_eq!(DataRate::Sps1600.sps(), 1_600);
//! let _ = channel;
//! ```

use modular_bitfield::prelude::Specifier;

/// 7-bit bus address selected by the `ADDR` pin strap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// `ADDR` tied to ground.
    #[default]
    Gnd = 0b100_1000,
    /// `ADDR` tied to VDD.
    Vdd = 0b100_1001,
    /// `ADDR` tied to SDA.
    Sda = 0b100_1010,
    /// `ADDR` tied to SCL.
    Scl = 0b100_1011,
}

impl Address {
    /// Returns the 7-bit address value.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Input multiplexer selections encoded in `CONFIG.MUX[14:12]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Channel {
    /// AINP = AIN0, AINN = AIN1 (default).
    DiffA0A1 = 0b000,
    /// AINP = AIN0, AINN = AIN3.
    DiffA0A3 = 0b001,
    /// AINP = AIN1, AINN = AIN3.
    DiffA1A3 = 0b010,
    /// AINP = AIN2, AINN = AIN3.
    DiffA2A3 = 0b011,
    /// AIN0 against ground.
    SingleA0 = 0b100,
    /// AIN1 against ground.
    SingleA1 = 0b101,
    /// AIN2 against ground.
    SingleA2 = 0b110,
    /// AIN3 against ground.
    SingleA3 = 0b111,
}

/// Programmable gain amplifier ranges encoded in `CONFIG.PGA[11:9]`.
///
/// Each variant names the full-scale range; a smaller range resolves smaller
/// voltages at the cost of headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Gain {
    /// ±6.144 V.
    V6_144 = 0b000,
    /// ±4.096 V.
    V4_096 = 0b001,
    /// ±2.048 V (default).
    V2_048 = 0b010,
    /// ±1.024 V.
    V1_024 = 0b011,
    /// ±0.512 V.
    V0_512 = 0b100,
    /// ±0.256 V.
    V0_256 = 0b101,
    /// ±0.256 V, alternate encoding.
    V0_256Alt6 = 0b110,
    /// ±0.256 V, alternate encoding.
    V0_256Alt7 = 0b111,
}

impl Gain {
    /// Folds alternate encodings onto the range they select.
    pub const fn canonical(self) -> Self {
        match self {
            Self::V0_256Alt6 | Self::V0_256Alt7 => Self::V0_256,
            other => other,
        }
    }

    /// Returns the full-scale range in millivolts.
    pub const fn full_scale_mv(self) -> u16 {
        match self.canonical() {
            Self::V6_144 => 6_144,
            Self::V4_096 => 4_096,
            Self::V2_048 => 2_048,
            Self::V1_024 => 1_024,
            Self::V0_512 => 512,
            Self::V0_256 | Self::V0_256Alt6 | Self::V0_256Alt7 => 256,
        }
    }

    /// Returns the raw 3-bit selector.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Operating mode bit (`CONFIG.MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Mode {
    /// Continuous conversion.
    Continuous = 0,
    /// Single-shot conversion, power-down between conversions (default).
    SingleShot = 1,
}

/// Data rate selections encoded in `CONFIG.DR[7:5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DataRate {
    /// 128 samples per second.
    Sps128 = 0b000,
    /// 250 samples per second.
    Sps250 = 0b001,
    /// 490 samples per second.
    Sps490 = 0b010,
    /// 920 samples per second.
    Sps920 = 0b011,
    /// 1600 samples per second (default).
    Sps1600 = 0b100,
    /// 2400 samples per second.
    Sps2400 = 0b101,
    /// 3300 samples per second.
    Sps3300 = 0b110,
    /// 3300 samples per second, alternate encoding.
    Sps3300Alt = 0b111,
}

impl DataRate {
    /// Returns the nominal rate in samples per second.
    pub const fn sps(self) -> u16 {
        match self {
            Self::Sps128 => 128,
            Self::Sps250 => 250,
            Self::Sps490 => 490,
            Self::Sps920 => 920,
            Self::Sps1600 => 1_600,
            Self::Sps2400 => 2_400,
            Self::Sps3300 | Self::Sps3300Alt => 3_300,
        }
    }
}

/// Comparator mode bit (`CONFIG.COMP_MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ComparatorMode {
    /// Traditional hysteresis comparator (default).
    Traditional = 0,
    /// Window comparator.
    Window = 1,
}

/// Polarity of the ALERT/RDY pin (`CONFIG.COMP_POL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ComparatorPolarity {
    /// Active low (default).
    ActiveLow = 0,
    /// Active high.
    ActiveHigh = 1,
}

/// Comparator queue length encoded in `CONFIG.COMP_QUE[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ComparatorQueue {
    /// Assert after one conversion.
    One = 0b00,
    /// Assert after two conversions.
    Two = 0b01,
    /// Assert after four conversions.
    Four = 0b10,
    /// Comparator disabled, pin high impedance (default).
    Disabled = 0b11,
}
