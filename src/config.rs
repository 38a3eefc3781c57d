//! Configuration primitives for the ADS1015 driver.
//!
//! [`Config`] is a bit-exact mirror of the 16-bit `CONFIG` register. The driver
//! keeps one cached copy and only pushes it to the device on explicit writes.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    Channel,
    ComparatorMode,
    ComparatorPolarity,
    ComparatorQueue,
    DataRate,
    Gain,
    Mode,
};
use crate::registers::DEFAULT_CONFIG;

/// Bitfield representation of the `CONFIG` register (pointer `0b01`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // Comparator queue and disable (bits 1:0).
    pub comp_queue: ComparatorQueue,
    // Latching comparator (bit 2).
    pub comp_latch: bool,
    // ALERT/RDY polarity (bit 3).
    pub comp_polarity: ComparatorPolarity,
    // Comparator mode (bit 4).
    pub comp_mode: ComparatorMode,
    // Data rate (bits 7:5).
    pub data_rate: DataRate,
    // Operating mode (bit 8).
    pub mode: Mode,
    // Programmable gain amplifier (bits 11:9).
    pub gain: Gain,
    // Input multiplexer (bits 14:12).
    pub channel: Channel,
    // Operational status on read, start single conversion on write (bit 15).
    pub os: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(DEFAULT_CONFIG)
    }
}

impl From<u16> for Config {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Config> for u16 {
    fn from(value: Config) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Config {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Config({=u16:#x})", u16::from(*self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes the power-on word field by field against the datasheet.
    #[test]
    fn default_layout_matches_datasheet() {
        let config = Config::default();
        assert!(config.os());
        assert_eq!(config.channel(), Channel::DiffA0A1);
        assert_eq!(config.gain(), Gain::V2_048);
        assert_eq!(config.mode(), Mode::SingleShot);
        assert_eq!(config.data_rate(), DataRate::Sps1600);
        assert_eq!(config.comp_mode(), ComparatorMode::Traditional);
        assert_eq!(config.comp_polarity(), ComparatorPolarity::ActiveLow);
        assert!(!config.comp_latch());
        assert_eq!(config.comp_queue(), ComparatorQueue::Disabled);
        assert_eq!(u16::from(config), 0x8583);
    }

    #[test]
    fn fields_land_on_their_bit_spans() {
        let config = Config::from(0)
            .with_channel(Channel::SingleA3)
            .with_gain(Gain::V0_256)
            .with_data_rate(DataRate::Sps3300)
            .with_comp_polarity(ComparatorPolarity::ActiveHigh);

        assert_eq!(u16::from(config), 0b0_111_101_0_110_0_1_0_00);
    }

    /// Every bit pattern is a legal register word and decodes without panicking.
    #[test]
    fn all_ones_word_decodes() {
        let config = Config::from(0xFFFF);
        assert!(config.os());
        assert_eq!(config.channel(), Channel::SingleA3);
        assert_eq!(config.gain(), Gain::V0_256Alt7);
        assert_eq!(config.mode(), Mode::SingleShot);
        assert_eq!(config.data_rate(), DataRate::Sps3300Alt);
        assert_eq!(config.comp_mode(), ComparatorMode::Window);
        assert_eq!(config.comp_polarity(), ComparatorPolarity::ActiveHigh);
        assert!(config.comp_latch());
        assert_eq!(config.comp_queue(), ComparatorQueue::Disabled);

        assert_eq!(Config::from(0x85E3).data_rate(), DataRate::Sps3300Alt);
        assert_eq!(Config::from(0x8D83).gain(), Gain::V0_256Alt6);
    }
}
