//! The complete distortion signal path: control block, engine, tone stage.

use alloc::sync::Arc;

use grit_core::{Effect, ParamDescriptor, ParameterInfo};

use crate::engine::{DEFAULT_SAMPLE_RATE, WaveshaperEngine};
use crate::params::{PARAM_COUNT, PARAMS, ShaperParams};
use crate::tone::ToneStage;

/// Host processing configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the host will pass.
    pub max_block_size: usize,
    /// Channel count.
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Create a spec.
    pub const fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, 512, 2)
    }
}

/// Waveshaper plus tone stage, driven by a shared [`ShaperParams`].
///
/// The audio thread owns the processor. Each block call first pulls the
/// current values out of the shared parameters (one relaxed load per field),
/// then runs the engine and the tone lowpass over the buffer in place.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use grit_shaper::{DistortionMode, DistortionProcessor, ProcessSpec, ShaperParams};
///
/// let params = Arc::new(ShaperParams::new());
/// let mut processor = DistortionProcessor::with_params(Arc::clone(&params));
/// processor.prepare(&ProcessSpec::new(48000.0, 128, 2));
///
/// params.set_mode(DistortionMode::SoftClip2);
/// params.set_drive_db(6.0);
///
/// let mut buffer = vec![0.1f32; 256]; // 128 stereo frames
/// processor.process_interleaved(&mut buffer, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistortionProcessor {
    engine: WaveshaperEngine,
    tone: ToneStage,
    params: Arc<ShaperParams>,
    spec: ProcessSpec,
}

impl Default for DistortionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DistortionProcessor {
    /// Create a processor with its own parameter block.
    pub fn new() -> Self {
        Self::with_params(Arc::new(ShaperParams::new()))
    }

    /// Create a processor reading from a shared parameter block.
    pub fn with_params(params: Arc<ShaperParams>) -> Self {
        Self {
            engine: WaveshaperEngine::new(),
            tone: ToneStage::new(),
            params,
            spec: ProcessSpec::default(),
        }
    }

    /// Shared parameter block.
    pub fn params(&self) -> &Arc<ShaperParams> {
        &self.params
    }

    /// The waveshaper engine.
    pub fn engine(&self) -> &WaveshaperEngine {
        &self.engine
    }

    /// The tone stage.
    pub fn tone(&self) -> &ToneStage {
        &self.tone
    }

    /// Last accepted processing spec.
    pub fn spec(&self) -> ProcessSpec {
        self.spec
    }

    /// Prepare for playback. Allocates the per-channel tone filters.
    ///
    /// Parameters are synced before the ramps are reset, so playback starts
    /// at the current values instead of ramping from the defaults. A
    /// non-finite or non-positive sample rate is ignored.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        if !(spec.sample_rate.is_finite() && spec.sample_rate > 0.0) {
            #[cfg(feature = "tracing")]
            tracing::warn!(sample_rate = spec.sample_rate, "ignoring invalid process spec");
            return;
        }

        self.spec = *spec;
        self.sync_params();
        self.engine.prepare(spec.sample_rate, spec.max_block_size);
        self.tone.prepare(spec.sample_rate, spec.num_channels);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            channels = spec.num_channels,
            mode = self.engine.mode().id(),
            "distortion processor prepared"
        );
    }

    /// Pull the shared parameter values into the engine and tone stage.
    pub fn sync_params(&mut self) {
        let snapshot = self.params.snapshot();
        self.engine.set_mode(snapshot.mode);
        self.engine.set_drive_db(snapshot.drive_db);
        self.engine.set_mix(snapshot.mix);
        self.engine.set_output_trim_db(snapshot.output_db);
        self.tone.set_cutoff(snapshot.tone_hz);
    }

    /// Process planar channels in place.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) {
        self.sync_params();
        self.engine.process_planar(channels);
        self.tone.process_planar(channels);
    }

    /// Process an interleaved buffer in place.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], channels: usize) {
        self.sync_params();
        self.engine.process_interleaved(buffer, channels);
        self.tone.process_interleaved(buffer, channels);
    }

    /// Snap ramps to their targets and clear filter state.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.tone.reset();
    }
}

impl ParameterInfo for DistortionProcessor {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }
}

/// Mono view: the engine followed by the first tone channel.
///
/// `process` does not read the shared parameters; the block methods sync
/// them once per call.
impl Effect for DistortionProcessor {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let shaped = self.engine.process_sample(input);
        self.tone.process_sample(0, shaped)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        self.sync_params();
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process(*x);
        }
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        self.sync_params();
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let spec = ProcessSpec {
            sample_rate,
            ..self.spec
        };
        self.prepare(&spec);
    }

    fn reset(&mut self) {
        DistortionProcessor::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DistortionMode;
    use crate::params::{DRIVE, MODE, TONE};

    fn prepared(channels: usize) -> DistortionProcessor {
        let mut processor = DistortionProcessor::new();
        processor.prepare(&ProcessSpec::new(44100.0, 256, channels));
        processor
    }

    #[test]
    fn prepare_starts_at_current_params() {
        let mut processor = DistortionProcessor::new();
        processor.params().set_drive_db(12.0);
        processor.prepare(&ProcessSpec::new(44100.0, 256, 1));
        assert_eq!(processor.engine().drive_db(), 12.0);
        assert!(!processor.engine().is_smoothing());
        assert_eq!(processor.tone().channels(), 1);
    }

    #[test]
    fn invalid_spec_is_ignored() {
        let mut processor = prepared(2);
        processor.prepare(&ProcessSpec::new(f32::NAN, 64, 1));
        assert_eq!(processor.spec(), ProcessSpec::new(44100.0, 256, 2));
        assert_eq!(processor.tone().channels(), 2);
    }

    #[test]
    fn block_call_picks_up_shared_params() {
        let mut processor = prepared(1);
        processor.params().set_mode(DistortionMode::BitCrush);
        processor.params().set_tone_hz(500.0);
        let mut buffer = [0.0f32; 16];
        processor.process_interleaved(&mut buffer, 1);
        assert_eq!(processor.engine().mode(), DistortionMode::BitCrush);
        assert_eq!(processor.tone().cutoff(), 500.0);
    }

    #[test]
    fn parameter_info_reads_and_writes_shared_block() {
        let mut processor = prepared(2);
        assert_eq!(processor.param_count(), 5);
        assert_eq!(processor.find_param("grit_tone"), Some(TONE));
        assert_eq!(processor.find_param("drive"), Some(DRIVE));
        assert!(processor.param_info(5).is_none());

        processor.set_param(DRIVE, 30.0);
        assert_eq!(processor.get_param(DRIVE), 24.0);
        assert_eq!(processor.params().drive_db(), 24.0);

        processor.set_param(MODE, 6.0);
        assert_eq!(processor.params().mode(), DistortionMode::Saturate);
    }

    #[test]
    fn planar_and_interleaved_agree() {
        let mut planar = prepared(2);
        let mut interleaved = prepared(2);
        for p in [&planar, &interleaved] {
            p.params().set_mode(DistortionMode::Saturate);
            p.params().set_drive_db(9.0);
            p.params().set_mix(0.7);
            p.params().set_tone_hz(4000.0);
        }

        let mut left: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.05).sin() * 0.6);
        let mut right: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.09).cos() * 0.4);
        let mut frames = [0.0f32; 256];
        for i in 0..128 {
            frames[2 * i] = left[i];
            frames[2 * i + 1] = right[i];
        }

        planar.process_planar(&mut [&mut left, &mut right]);
        interleaved.process_interleaved(&mut frames, 2);

        for i in 0..128 {
            assert_eq!(left[i], frames[2 * i]);
            assert_eq!(right[i], frames[2 * i + 1]);
        }
    }

    #[test]
    fn effect_block_matches_interleaved_mono() {
        let mut a = prepared(1);
        let mut b = prepared(1);
        a.params().set_drive_db(6.0);
        b.params().set_drive_db(6.0);

        let input: [f32; 64] = core::array::from_fn(|i| (i as f32 * 0.2).sin());
        let mut out = [0.0f32; 64];
        a.process_block(&input, &mut out);

        let mut mono = input;
        b.process_interleaved(&mut mono, 1);
        assert_eq!(out, mono);
    }

    #[test]
    fn reset_clears_tone_state() {
        let mut processor = prepared(1);
        processor.params().set_tone_hz(100.0);
        let mut buffer = [0.5f32; 64];
        processor.process_interleaved(&mut buffer, 1);
        processor.reset();
        let mut silent = [0.0f32; 1];
        processor.process_interleaved(&mut silent, 1);
        assert_eq!(silent[0], 0.0);
    }
}
