//! One-pole lowpass filter for the tone control.
//!
//! Topology-preserving transform (trapezoidal) one-pole:
//!
//! ```text
//! g = tan(π * fc / fs)
//! G = g / (1 + g)
//! v = (x - s) * G
//! y = v + s
//! s = y + v
//! ```
//!
//! 6 dB/octave rolloff, unity gain at DC, zero latency. Unlike the
//! impulse-invariant form (`coeff = exp(-2π fc / fs)`), the bilinear mapping
//! keeps the response exact at the cutoff and becomes a plain passthrough when
//! the cutoff reaches Nyquist.
//!
//! # Usage
//!
//! ```rust
//! use grit_core::OnePole;
//!
//! let mut lp = OnePole::new(48000.0, 4000.0);
//! let filtered = lp.process(1.0);
//! assert!(filtered < 1.0);
//! ```
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

use crate::flush_denormal;

/// Lowest cutoff the filter accepts, in Hz.
pub const MIN_CUTOFF_HZ: f32 = 1.0;

/// One-pole (6 dB/oct) TPT lowpass filter.
///
/// # Invariants
///
/// - `big_g` is always in (0, 1], so the filter is stable for every cutoff
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
/// - an invalid sample rate leaves the previous coefficient in place
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    big_g: f32,
    sample_rate: f32,
    cutoff: f32,
}

impl OnePole {
    /// Create a new one-pole lowpass.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `cutoff_hz` - Cutoff (−3 dB point) in Hz, clamped to
    ///   [`MIN_CUTOFF_HZ`]..=Nyquist
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            big_g: 1.0,
            sample_rate: 44100.0,
            cutoff: cutoff_hz,
        };
        filter.set_sample_rate(sample_rate);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Set the cutoff frequency in Hz.
    ///
    /// Effective from the next sample; the coefficient is not smoothed.
    /// Non-finite values are ignored.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if !cutoff_hz.is_finite() {
            return;
        }
        self.cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, self.nyquist().max(MIN_CUTOFF_HZ));
        self.update_coefficient();
    }

    /// Cutoff frequency in Hz after clamping.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Update the sample rate and recompute the coefficient.
    ///
    /// Non-finite or non-positive rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return;
        }
        self.sample_rate = sample_rate;
        self.cutoff = self.cutoff.clamp(MIN_CUTOFF_HZ, self.nyquist().max(MIN_CUTOFF_HZ));
        self.update_coefficient();
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let v = (input - self.state) * self.big_g;
        let output = v + self.state;
        self.state = flush_denormal(output + v);
        output
    }

    /// Filter a slice in place.
    pub fn process_slice(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the integrator state.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }

    fn update_coefficient(&mut self) {
        let g = tanf(PI * self.cutoff / self.sample_rate);
        // tan blows up (or wraps negative) as the cutoff reaches Nyquist
        self.big_g = if g.is_finite() && g > 0.0 {
            (g / (1.0 + g)).min(1.0)
        } else {
            1.0
        };
    }
}
