//! Distortion mode selection.

use core::fmt;
use core::str::FromStr;

/// The transfer function applied to the driven signal.
///
/// Indices are stable (`0..=7`) and match the host-facing mode parameter.
///
/// The three soft-clip variants share one arctangent curve; they are kept as
/// separate selections so stored mode indices stay meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DistortionMode {
    /// `|x·g|` - octave-up fuzz character.
    FullWaveRectify = 0,
    /// `max(x·g, 0)` - drops the negative half-cycle.
    HalfWaveRectify = 1,
    /// Clamp to ±0.99 - flat-topped, odd harmonics.
    #[default]
    HardClip = 2,
    /// Arctangent soft clip.
    SoftClip1 = 3,
    /// Arctangent soft clip (same curve as [`SoftClip1`](Self::SoftClip1)).
    SoftClip2 = 4,
    /// Arctangent soft clip (same curve as [`SoftClip1`](Self::SoftClip1)).
    SoftClip3 = 5,
    /// Asymmetric tanh saturation with a rippled negative half.
    Saturate = 6,
    /// Amplitude quantization driven by the raw drive value.
    BitCrush = 7,
}

impl DistortionMode {
    /// Number of modes.
    pub const COUNT: usize = 8;

    /// Every mode in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::FullWaveRectify,
        Self::HalfWaveRectify,
        Self::HardClip,
        Self::SoftClip1,
        Self::SoftClip2,
        Self::SoftClip3,
        Self::Saturate,
        Self::BitCrush,
    ];

    /// Mode for a stable index, `None` when out of range.
    ///
    /// ```rust
    /// use grit_shaper::DistortionMode;
    ///
    /// assert_eq!(DistortionMode::from_index(7), Some(DistortionMode::BitCrush));
    /// assert_eq!(DistortionMode::from_index(8), None);
    /// ```
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Stable index of this mode.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullWaveRectify => "Full Wave Rectification",
            Self::HalfWaveRectify => "Half Wave Rectification",
            Self::HardClip => "Hard Clipping",
            Self::SoftClip1 => "Soft Clipping 1",
            Self::SoftClip2 => "Soft Clipping 2",
            Self::SoftClip3 => "Soft Clipping 3",
            Self::Saturate => "Saturation",
            Self::BitCrush => "Bit Reduction",
        }
    }

    /// Snake-case identifier used in settings files and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::FullWaveRectify => "full_wave",
            Self::HalfWaveRectify => "half_wave",
            Self::HardClip => "hard_clip",
            Self::SoftClip1 => "soft_clip1",
            Self::SoftClip2 => "soft_clip2",
            Self::SoftClip3 => "soft_clip3",
            Self::Saturate => "saturate",
            Self::BitCrush => "bit_crush",
        }
    }

    /// Look up a mode by identifier (case-insensitive, `-` accepted for `_`).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| {
            let known = mode.id().as_bytes();
            let given = id.as_bytes();
            known.len() == given.len()
                && known.iter().zip(given).all(|(&k, &g)| {
                    let g = if g == b'-' { b'_' } else { g.to_ascii_lowercase() };
                    k == g
                })
        })
    }
}

impl fmt::Display for DistortionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no [`DistortionMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseModeError;

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown distortion mode (expected an index 0-7 or an id such as \"hard_clip\")")
    }
}

impl core::error::Error for ParseModeError {}

impl FromStr for DistortionMode {
    type Err = ParseModeError;

    /// Accepts either a mode id (`"saturate"`) or an index (`"6"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index).ok_or(ParseModeError);
        }
        Self::from_id(s).ok_or(ParseModeError)
    }
}

impl TryFrom<u8> for DistortionMode {
    type Error = ParseModeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize).ok_or(ParseModeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_stable() {
        for (i, mode) in DistortionMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(DistortionMode::from_index(i), Some(*mode));
        }
        assert_eq!(DistortionMode::HardClip as u8, 2);
    }

    #[test]
    fn default_is_hard_clip() {
        assert_eq!(DistortionMode::default(), DistortionMode::HardClip);
    }

    #[test]
    fn parse_by_id_and_index() {
        assert_eq!("saturate".parse(), Ok(DistortionMode::Saturate));
        assert_eq!("Bit-Crush".parse(), Ok(DistortionMode::BitCrush));
        assert_eq!(" 3 ".parse(), Ok(DistortionMode::SoftClip1));
        assert_eq!("8".parse::<DistortionMode>(), Err(ParseModeError));
        assert_eq!("fuzz".parse::<DistortionMode>(), Err(ParseModeError));
    }

    #[test]
    fn ids_round_trip() {
        for mode in DistortionMode::ALL {
            assert_eq!(DistortionMode::from_id(mode.id()), Some(mode));
        }
    }

    #[test]
    fn try_from_u8() {
        assert_eq!(DistortionMode::try_from(0u8), Ok(DistortionMode::FullWaveRectify));
        assert!(DistortionMode::try_from(200u8).is_err());
    }
}
