//! Static transfer functions for each [`DistortionMode`].
//!
//! Each function maps one already-driven sample to its shaped value, except
//! [`bit_crush`], which quantizes the undriven input on a grid set by the raw
//! drive value. [`shape`] dispatches on the mode with a plain `match`.
//!
//! | Mode | wet |
//! |------|-----|
//! | FullWaveRectify | `abs(x·g)` |
//! | HalfWaveRectify | `max(x·g, 0)` |
//! | HardClip | `clamp(x·g, -0.99, 0.99)` |
//! | SoftClip1/2/3 | `(2/π)·atan(x·g)` |
//! | Saturate | `x·g ≥ 0`: `tanh(x·g)`, else `tanh(sinh(x·g)) - 0.2·(x·g)·sin(π·x·g)` |
//! | BitCrush | `round(levels·x) / levels`, `levels = trunc(28 - drive_db)` |
//!
//! Non-finite input samples are not sanitized. The bounded curves map them
//! to their asymptotes; rectifiers and BitCrush pass them through as
//! infinities or NaN.

use core::f32::consts::{FRAC_2_PI, PI};
use libm::{atanf, roundf, sinf, sinhf, tanhf, truncf};

use crate::DistortionMode;

/// Hard-clip ceiling.
pub const HARD_CLIP_CEILING: f32 = 0.99;

/// Quantization level count at 0 dB drive.
pub const BIT_CRUSH_BASE_LEVELS: f32 = 28.0;

/// Smallest level magnitude BitCrush will divide by.
pub const BIT_CRUSH_MIN_LEVELS: f32 = 1.0;

/// Shape one sample.
///
/// # Arguments
/// * `mode` - Transfer function
/// * `input` - Dry input sample
/// * `gain` - Linear drive gain (`db_to_linear(drive_db)`)
/// * `drive_db` - Drive in decibels; only BitCrush reads it
#[inline]
pub fn shape(mode: DistortionMode, input: f32, gain: f32, drive_db: f32) -> f32 {
    match mode {
        DistortionMode::FullWaveRectify => full_wave_rectify(input * gain),
        DistortionMode::HalfWaveRectify => half_wave_rectify(input * gain),
        DistortionMode::HardClip => hard_clip(input * gain),
        DistortionMode::SoftClip1 | DistortionMode::SoftClip2 | DistortionMode::SoftClip3 => {
            soft_clip(input * gain)
        }
        DistortionMode::Saturate => saturate(input * gain),
        DistortionMode::BitCrush => bit_crush(input, bit_crush_levels(drive_db)),
    }
}

/// `|x|`.
#[inline]
pub fn full_wave_rectify(x: f32) -> f32 {
    x.abs()
}

/// `max(x, 0)`.
#[inline]
pub fn half_wave_rectify(x: f32) -> f32 {
    if x < 0.0 { 0.0 } else { x }
}

/// Clamp to ±[`HARD_CLIP_CEILING`].
#[inline]
pub fn hard_clip(x: f32) -> f32 {
    x.clamp(-HARD_CLIP_CEILING, HARD_CLIP_CEILING)
}

/// `(2/π)·atan(x)`: odd, monotonic, bounded in (-1, 1).
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    FRAC_2_PI * atanf(x)
}

/// Asymmetric saturation.
///
/// The positive half is a plain `tanh`. The negative half folds `sinh`
/// through `tanh` and adds a `0.2·x·sin(πx)` ripple, so it is not bounded
/// by ±1 at high drive.
#[inline]
pub fn saturate(x: f32) -> f32 {
    if x >= 0.0 {
        tanhf(x)
    } else {
        tanhf(sinhf(x)) - 0.2 * x * sinf(PI * x)
    }
}

/// Quantization level count for a drive value in decibels.
///
/// `trunc(28 - drive_db)`, held at least [`BIT_CRUSH_MIN_LEVELS`] away
/// from zero so the division in [`bit_crush`] cannot blow up. A non-finite
/// drive falls back to [`BIT_CRUSH_BASE_LEVELS`].
///
/// ```rust
/// use grit_shaper::transfer::bit_crush_levels;
///
/// assert_eq!(bit_crush_levels(0.0), 28.0);
/// assert_eq!(bit_crush_levels(12.5), 15.0);
/// assert_eq!(bit_crush_levels(28.0), 1.0);
/// ```
#[inline]
pub fn bit_crush_levels(drive_db: f32) -> f32 {
    let levels = truncf(BIT_CRUSH_BASE_LEVELS - drive_db);
    if !levels.is_finite() {
        BIT_CRUSH_BASE_LEVELS
    } else if levels.abs() < BIT_CRUSH_MIN_LEVELS {
        BIT_CRUSH_MIN_LEVELS.copysign(levels)
    } else {
        levels
    }
}

/// `round(levels·x) / levels`: snaps `x` to a grid of spacing `1/levels`.
#[inline]
pub fn bit_crush(x: f32, levels: f32) -> f32 {
    roundf(levels * x) / levels
}
