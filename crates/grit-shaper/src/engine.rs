//! Per-sample waveshaping engine with smoothed drive, mix and output trim.
//!
//! The engine owns three [`ParameterRamp`]s and the active
//! [`DistortionMode`]. Every sample position advances each ramp exactly once,
//! whatever the mode and however many channels share the position, so all
//! channels see the same gain trajectory.
//!
//! ```text
//! input ─┬─ shape(mode, x · drive) ── wet ─┐
//!        └──────────────────────── dry ─── mix ── × trim ── output
//! ```

use grit_core::{Effect, ParameterRamp, db_to_linear, wet_dry_mix};

use crate::DistortionMode;
use crate::transfer::shape;

/// Ramp time shared by drive, mix and trim, in seconds.
pub const RAMP_TIME_SECONDS: f32 = 0.02;

/// Drive range in dB.
pub const DRIVE_MIN_DB: f32 = 0.0;
/// Drive range in dB.
pub const DRIVE_MAX_DB: f32 = 24.0;
/// Default drive in dB.
pub const DEFAULT_DRIVE_DB: f32 = 0.0;

/// Default dry/wet mix (fully wet).
pub const DEFAULT_MIX: f32 = 1.0;

/// Output trim range in dB.
pub const TRIM_MIN_DB: f32 = -24.0;
/// Output trim range in dB.
pub const TRIM_MAX_DB: f32 = 24.0;
/// Default output trim in dB.
pub const DEFAULT_TRIM_DB: f32 = 0.0;

/// Sample rate assumed until [`WaveshaperEngine::prepare`] is called.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Ramp values for one sample position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Drive in dB (BitCrush reads this directly).
    pub drive_db: f32,
    /// Drive as a linear multiplier.
    pub gain: f32,
    /// Dry/wet blend in \[0, 1\].
    pub mix: f32,
    /// Output trim as a linear multiplier.
    pub trim: f32,
}

/// Caches a dB to linear conversion while the dB value holds still.
#[derive(Debug, Clone, Copy)]
struct DbToLinear {
    db: f32,
    linear: f32,
}

impl DbToLinear {
    fn new(db: f32) -> Self {
        Self {
            db,
            linear: db_to_linear(db),
        }
    }

    #[inline]
    fn convert(&mut self, db: f32) -> f32 {
        if db != self.db {
            self.db = db;
            self.linear = db_to_linear(db);
        }
        self.linear
    }
}

/// Waveshaping distortion engine.
///
/// ## Parameters
///
/// | Parameter | Range | Default |
/// |-----------|-------|---------|
/// | Mode | 8 choices | HardClip |
/// | Drive | 0 to 24 dB | 0 dB |
/// | Mix | 0 to 1 | 1 |
/// | Output trim | -24 to 24 dB | 0 dB |
///
/// A fresh engine ramps over 20 ms at 44.1 kHz; [`prepare`](Self::prepare)
/// re-derives the ramp length for the host's sample rate.
///
/// # Example
///
/// ```rust
/// use grit_shaper::{DistortionMode, WaveshaperEngine};
///
/// let mut engine = WaveshaperEngine::new();
/// engine.prepare(48000.0, 256);
/// engine.set_mode(DistortionMode::SoftClip1);
/// engine.set_drive_db(12.0);
///
/// let mut left = [0.25f32; 256];
/// let mut right = [0.25f32; 256];
/// engine.process_planar(&mut [&mut left, &mut right]);
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct WaveshaperEngine {
    drive_db: ParameterRamp,
    mix: ParameterRamp,
    trim_db: ParameterRamp,
    mode: DistortionMode,
    sample_rate: f32,
    max_block_size: usize,
    drive_gain: DbToLinear,
    trim_gain: DbToLinear,
}

impl Default for WaveshaperEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveshaperEngine {
    /// Create an engine at default parameters, HardClip mode.
    pub fn new() -> Self {
        Self {
            drive_db: ParameterRamp::with_config(
                DEFAULT_DRIVE_DB,
                DEFAULT_SAMPLE_RATE,
                RAMP_TIME_SECONDS,
            ),
            mix: ParameterRamp::with_config(DEFAULT_MIX, DEFAULT_SAMPLE_RATE, RAMP_TIME_SECONDS),
            trim_db: ParameterRamp::with_config(
                DEFAULT_TRIM_DB,
                DEFAULT_SAMPLE_RATE,
                RAMP_TIME_SECONDS,
            ),
            mode: DistortionMode::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: 0,
            drive_gain: DbToLinear::new(DEFAULT_DRIVE_DB),
            trim_gain: DbToLinear::new(DEFAULT_TRIM_DB),
        }
    }

    /// Configure for a sample rate and host block size.
    ///
    /// Re-derives all three ramp lengths and snaps every ramp to its target.
    /// A non-finite or non-positive sample rate leaves the engine untouched.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            #[cfg(feature = "tracing")]
            tracing::warn!(sample_rate, "ignoring invalid sample rate");
            return;
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.drive_db.reset(sample_rate, RAMP_TIME_SECONDS);
        self.mix.reset(sample_rate, RAMP_TIME_SECONDS);
        self.trim_db.reset(sample_rate, RAMP_TIME_SECONDS);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            ramp_steps = self.drive_db.ramp_length(),
            "waveshaper prepared"
        );
    }

    /// Select the transfer function, effective from the next sample.
    pub fn set_mode(&mut self, mode: DistortionMode) {
        self.mode = mode;
    }

    /// Select the transfer function by index. Out-of-range indices are
    /// ignored and return `false`.
    pub fn set_mode_index(&mut self, index: usize) -> bool {
        match DistortionMode::from_index(index) {
            Some(mode) => {
                self.mode = mode;
                true
            }
            None => false,
        }
    }

    /// Active transfer function.
    pub fn mode(&self) -> DistortionMode {
        self.mode
    }

    /// Set the drive target in dB, clamped to \[0, 24\].
    pub fn set_drive_db(&mut self, db: f32) {
        if db.is_finite() {
            self.drive_db.set_target(db.clamp(DRIVE_MIN_DB, DRIVE_MAX_DB));
        }
    }

    /// Drive target in dB.
    pub fn drive_db(&self) -> f32 {
        self.drive_db.target()
    }

    /// Set the dry/wet target, clamped to \[0, 1\].
    pub fn set_mix(&mut self, mix: f32) {
        if mix.is_finite() {
            self.mix.set_target(mix.clamp(0.0, 1.0));
        }
    }

    /// Dry/wet target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    /// Set the output trim target in dB, clamped to \[-24, 24\].
    pub fn set_output_trim_db(&mut self, db: f32) {
        if db.is_finite() {
            self.trim_db.set_target(db.clamp(TRIM_MIN_DB, TRIM_MAX_DB));
        }
    }

    /// Output trim target in dB.
    pub fn output_trim_db(&self) -> f32 {
        self.trim_db.target()
    }

    /// Sample rate of the last successful [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size given to the last successful [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Whether any of the three ramps is still moving.
    pub fn is_smoothing(&self) -> bool {
        self.drive_db.is_smoothing() || self.mix.is_smoothing() || self.trim_db.is_smoothing()
    }

    /// Ramp length in samples at the current sample rate.
    pub fn ramp_length(&self) -> u32 {
        self.drive_db.ramp_length()
    }

    /// Advance every ramp one step and return the values for this position.
    #[inline]
    pub fn next_frame_params(&mut self) -> FrameParams {
        let drive_db = self.drive_db.next_value();
        let mix = self.mix.next_value();
        let trim_db = self.trim_db.next_value();
        FrameParams {
            drive_db,
            gain: self.drive_gain.convert(drive_db),
            mix,
            trim: self.trim_gain.convert(trim_db),
        }
    }

    /// Shape one sample with already-advanced frame values.
    #[inline]
    pub fn render(&self, frame: FrameParams, input: f32) -> f32 {
        let wet = shape(self.mode, input, frame.gain, frame.drive_db);
        wet_dry_mix(input, wet, frame.mix) * frame.trim
    }

    /// Process one mono sample, advancing every ramp once.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let frame = self.next_frame_params();
        self.render(frame, input)
    }

    /// Process planar channels in place.
    ///
    /// Ramps advance once per sample index. Channels of unequal length are
    /// processed up to the shortest one; an empty channel list or a zero
    /// length leaves the ramps where they are.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) {
        let frames = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        for i in 0..frames {
            let frame = self.next_frame_params();
            for ch in channels.iter_mut() {
                ch[i] = self.render(frame, ch[i]);
            }
        }
    }

    /// Process an interleaved buffer in place.
    ///
    /// A trailing partial frame is left untouched. Zero channels is a no-op.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for frame_samples in buffer.chunks_exact_mut(channels) {
            let frame = self.next_frame_params();
            for sample in frame_samples.iter_mut() {
                *sample = self.render(frame, *sample);
            }
        }
    }

    /// Snap every ramp to its target. Mode and sample rate are kept.
    pub fn reset(&mut self) {
        for ramp in [&mut self.drive_db, &mut self.mix, &mut self.trim_db] {
            let target = ramp.target();
            ramp.set_current_and_target(target);
        }
    }
}

impl Effect for WaveshaperEngine {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_sample(input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.prepare(sample_rate, self.max_block_size);
    }

    fn reset(&mut self) {
        WaveshaperEngine::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer;

    fn engine_at(sample_rate: f32) -> WaveshaperEngine {
        let mut engine = WaveshaperEngine::new();
        engine.prepare(sample_rate, 512);
        engine
    }

    #[test]
    fn defaults() {
        let engine = WaveshaperEngine::new();
        assert_eq!(engine.mode(), DistortionMode::HardClip);
        assert_eq!(engine.drive_db(), 0.0);
        assert_eq!(engine.mix(), 1.0);
        assert_eq!(engine.output_trim_db(), 0.0);
        assert_eq!(engine.ramp_length(), 882);
        assert!(!engine.is_smoothing());
    }

    #[test]
    fn ramp_length_follows_sample_rate() {
        let engine = engine_at(48000.0);
        assert_eq!(engine.ramp_length(), 960);
        assert_eq!(engine.sample_rate(), 48000.0);
        assert_eq!(engine.max_block_size(), 512);
    }

    #[test]
    fn invalid_sample_rate_is_ignored() {
        let mut engine = engine_at(48000.0);
        engine.prepare(0.0, 64);
        engine.prepare(f32::NAN, 64);
        engine.prepare(-44100.0, 64);
        assert_eq!(engine.sample_rate(), 48000.0);
        assert_eq!(engine.max_block_size(), 512);
        assert_eq!(engine.ramp_length(), 960);
    }

    #[test]
    fn setters_clamp_and_ignore_non_finite() {
        let mut engine = engine_at(44100.0);
        engine.set_drive_db(40.0);
        assert_eq!(engine.drive_db(), 24.0);
        engine.set_drive_db(-3.0);
        assert_eq!(engine.drive_db(), 0.0);
        engine.set_drive_db(f32::NAN);
        assert_eq!(engine.drive_db(), 0.0);

        engine.set_mix(1.5);
        assert_eq!(engine.mix(), 1.0);
        engine.set_mix(f32::INFINITY);
        assert_eq!(engine.mix(), 1.0);

        engine.set_output_trim_db(-30.0);
        assert_eq!(engine.output_trim_db(), -24.0);
        engine.set_output_trim_db(f32::NEG_INFINITY);
        assert_eq!(engine.output_trim_db(), -24.0);
    }

    #[test]
    fn mode_index_out_of_range_is_ignored() {
        let mut engine = WaveshaperEngine::new();
        assert!(engine.set_mode_index(6));
        assert_eq!(engine.mode(), DistortionMode::Saturate);
        assert!(!engine.set_mode_index(8));
        assert_eq!(engine.mode(), DistortionMode::Saturate);
    }

    #[test]
    fn fully_dry_is_identity() {
        for mode in DistortionMode::ALL {
            let mut engine = engine_at(44100.0);
            engine.set_mode(mode);
            engine.set_mix(0.0);
            engine.set_drive_db(18.0);
            engine.reset();
            for x in [-1.0f32, -0.3, 0.0, 0.01, 0.5, 0.99] {
                assert_eq!(engine.process_sample(x), x, "{mode}");
            }
        }
    }

    #[test]
    fn fully_wet_unity_drive_matches_transfer() {
        for mode in DistortionMode::ALL {
            let mut engine = engine_at(44100.0);
            engine.set_mode(mode);
            for x in [-0.8f32, -0.2, 0.0, 0.35, 0.9] {
                let expected = transfer::shape(mode, x, 1.0, 0.0);
                assert!((engine.process_sample(x) - expected).abs() < 1e-6, "{mode}");
            }
        }
    }

    #[test]
    fn trim_applies_after_mix() {
        let mut engine = engine_at(44100.0);
        engine.set_mix(0.0);
        engine.set_output_trim_db(6.0);
        engine.reset();
        let y = engine.process_sample(0.25);
        assert!((y - 0.25 * db_to_linear(6.0)).abs() < 1e-6);
    }

    #[test]
    fn ramps_advance_once_per_sample_in_every_mode() {
        for mode in DistortionMode::ALL {
            let mut engine = engine_at(44100.0);
            engine.set_mode(mode);
            engine.set_drive_db(12.0);
            for _ in 0..881 {
                engine.process_sample(0.1);
            }
            assert!(engine.is_smoothing(), "{mode}");
            engine.process_sample(0.1);
            assert!(!engine.is_smoothing(), "{mode}");
        }
    }

    #[test]
    fn empty_buffers_do_not_advance_ramps() {
        let mut engine = engine_at(44100.0);
        engine.set_drive_db(12.0);

        engine.process_planar(&mut []);
        let mut empty: [f32; 0] = [];
        engine.process_planar(&mut [&mut empty]);
        let mut buffer = [0.5f32; 8];
        engine.process_interleaved(&mut buffer, 0);
        engine.process_interleaved(&mut [], 2);

        assert_eq!(buffer, [0.5; 8]);
        let first = engine.next_frame_params();
        assert!((first.drive_db - 12.0 / 882.0).abs() < 1e-6);
    }

    #[test]
    fn interleaved_partial_frame_untouched() {
        let mut engine = engine_at(44100.0);
        engine.set_drive_db(24.0);
        engine.reset();
        let mut buffer = [0.5f32; 5];
        engine.process_interleaved(&mut buffer, 2);
        assert_eq!(buffer[0], 0.99);
        assert_eq!(buffer[3], 0.99);
        assert_eq!(buffer[4], 0.5);
    }

    #[test]
    fn reset_snaps_to_targets() {
        let mut engine = engine_at(44100.0);
        engine.set_drive_db(6.0);
        engine.set_mix(0.5);
        assert!(engine.is_smoothing());
        engine.reset();
        assert!(!engine.is_smoothing());
        let frame = engine.next_frame_params();
        assert_eq!(frame.drive_db, 6.0);
        assert_eq!(frame.mix, 0.5);
    }

    #[test]
    fn effect_trait_matches_inherent() {
        let mut a = engine_at(44100.0);
        let mut b = engine_at(44100.0);
        a.set_drive_db(9.0);
        b.set_drive_db(9.0);
        let effect: &mut dyn Effect = &mut b;
        for i in 0..64 {
            let x = (i as f32 * 0.1).sin() * 0.8;
            assert_eq!(a.process_sample(x), effect.process(x));
        }
    }
}
