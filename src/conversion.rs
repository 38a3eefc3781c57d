//! Conversion of right-aligned samples into millivolts.
//!
//! One LSB of the ADS1015 is 1 mV at the ±2.048 V range, so every range is a
//! fixed ratio of the raw sample: ×3, ×2, ×1, ÷2, ÷4 and ÷8.

use crate::params::Gain;

/// Scales a sample to millivolts using only shifts and one multiply.
///
/// The high-gain ranges divide with an arithmetic right shift, so results
/// round towards negative infinity and lose up to three bits. This is an
/// accepted approximation; use [`to_millivolts_f32`] for exact values.
#[inline]
pub const fn to_millivolts(sample: i16, gain: Gain) -> i16 {
    let selector = gain.canonical().bits() as i8;
    if selector == 0 {
        return sample * 3;
    }

    let shift = 2 - selector;
    if shift > 0 {
        sample << shift
    } else {
        sample >> -shift
    }
}

/// Scales a sample to millivolts with exact ratios.
#[inline]
pub fn to_millivolts_f32(sample: i16, gain: Gain) -> f32 {
    let value = f32::from(sample);
    match gain.canonical() {
        Gain::V6_144 => value * 3.0,
        Gain::V4_096 => value * 2.0,
        Gain::V2_048 => value,
        Gain::V1_024 => value / 2.0,
        Gain::V0_512 => value / 4.0,
        Gain::V0_256 | Gain::V0_256Alt6 | Gain::V0_256Alt7 => value / 8.0,
    }
}
