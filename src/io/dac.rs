use crate::config::{DC_BIAS, OUTPUT_MAX};

/// One output sample pair, offset-binary: [`DC_BIAS`] is silence and every
/// value lies in `0..=OUTPUT_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StereoFrame {
    pub left: u16,
    pub right: u16,
}

impl StereoFrame {
    pub const SILENT: Self = Self {
        left: DC_BIAS as u16,
        right: DC_BIAS as u16,
    };

    /// Bias and clamp signed channel sums into the output range.
    pub fn from_mix(left: i32, right: i32) -> Self {
        Self {
            left: to_output(left),
            right: to_output(right),
        }
    }

    /// `[left, right]` rescaled to `-1.0..=1.0` for float audio hosts.
    pub fn to_f32(self) -> [f32; 2] {
        let scale = DC_BIAS as f32;
        [
            (f32::from(self.left) - scale) / scale,
            (f32::from(self.right) - scale) / scale,
        ]
    }

    /// Command words for a dual-channel 12-bit SPI DAC, left on A.
    pub fn dac_words(self) -> [DacWord; 2] {
        [DacWord::channel_a(self.left), DacWord::channel_b(self.right)]
    }
}

impl Default for StereoFrame {
    fn default() -> Self {
        Self::SILENT
    }
}

fn to_output(mix: i32) -> u16 {
    mix.saturating_add(DC_BIAS).clamp(0, i32::from(OUTPUT_MAX)) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DacChannel {
    A,
    B,
}

/// 16-bit DAC command: four config bits (channel, buffered, 1x gain,
/// active) over twelve data bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DacWord(u16);

impl DacWord {
    const CONFIG_A: u16 = 0b0011 << 12;
    const CONFIG_B: u16 = 0b1011 << 12;
    const DATA_MASK: u16 = 0x0fff;
    const CHANNEL_BIT: u16 = 1 << 15;

    pub const fn channel_a(sample: u16) -> Self {
        Self(Self::CONFIG_A | (sample & Self::DATA_MASK))
    }

    pub const fn channel_b(sample: u16) -> Self {
        Self(Self::CONFIG_B | (sample & Self::DATA_MASK))
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn data(self) -> u16 {
        self.0 & Self::DATA_MASK
    }

    pub const fn channel(self) -> DacChannel {
        if self.0 & Self::CHANNEL_BIT == 0 {
            DacChannel::A
        } else {
            DacChannel::B
        }
    }
}
