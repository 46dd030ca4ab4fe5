//! Post-distortion tone stage: one [`OnePole`] lowpass per channel.

use alloc::vec::Vec;

use grit_core::{MIN_CUTOFF_HZ, OnePole};

use crate::engine::DEFAULT_SAMPLE_RATE;

/// Highest tone cutoff, in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;

/// Default tone cutoff, in Hz.
pub const DEFAULT_CUTOFF_HZ: f32 = MAX_CUTOFF_HZ;

/// Per-channel lowpass applied after the waveshaper.
///
/// The cutoff is not smoothed; a new value takes effect from the next
/// sample. [`prepare`](Self::prepare) is the only call that allocates.
#[derive(Debug, Clone)]
pub struct ToneStage {
    filters: Vec<OnePole>,
    cutoff: f32,
    sample_rate: f32,
}

impl Default for ToneStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneStage {
    /// Create an unprepared stage (zero channels, 20 kHz cutoff).
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            cutoff: DEFAULT_CUTOFF_HZ,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Size the stage for `channels` and clear filter state.
    ///
    /// An invalid sample rate keeps the previous one; the channel count is
    /// still applied.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize) {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
        }
        let (sample_rate, cutoff) = (self.sample_rate, self.cutoff);
        self.filters
            .resize_with(channels, || OnePole::new(sample_rate, cutoff));
        for filter in &mut self.filters {
            filter.set_sample_rate(sample_rate);
            filter.set_cutoff(cutoff);
            filter.reset();
        }
    }

    /// Set the cutoff in Hz, clamped to \[1, 20000\] and to Nyquist.
    ///
    /// Non-finite values are ignored.
    pub fn set_cutoff(&mut self, hz: f32) {
        if !hz.is_finite() {
            return;
        }
        let hz = hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        if hz == self.cutoff {
            return;
        }
        self.cutoff = hz;
        for filter in &mut self.filters {
            filter.set_cutoff(hz);
        }
    }

    /// Requested cutoff in Hz (before the Nyquist clamp).
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Number of prepared channels.
    pub fn channels(&self) -> usize {
        self.filters.len()
    }

    /// Filter one sample on `channel`. Unprepared channels pass through.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, input: f32) -> f32 {
        match self.filters.get_mut(channel) {
            Some(filter) => filter.process(input),
            None => input,
        }
    }

    /// Filter planar channels in place. Unprepared channels pass through.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) {
        for (filter, channel) in self.filters.iter_mut().zip(channels.iter_mut()) {
            filter.process_slice(channel);
        }
    }

    /// Filter an interleaved buffer in place. Unprepared channels pass
    /// through; a trailing partial frame is left untouched.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], channels: usize) {
        if channels == 0 || self.filters.is_empty() {
            return;
        }
        for frame in buffer.chunks_exact_mut(channels) {
            for (filter, sample) in self.filters.iter_mut().zip(frame.iter_mut()) {
                *sample = filter.process(*sample);
            }
        }
    }

    /// Clear filter state.
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }
}
