//! Mono processing trait shared by the engine, the tone filter and the
//! complete processor.
//!
//! ## Design Decisions
//!
//! - **Mono per-sample core**: a single `f32` in and out. Multichannel
//!   processing lives on the concrete types, because parameter ramps must
//!   advance once per sample position rather than once per channel.
//! - **Object-safe**: `dyn Effect` works, but the waveshaper types are
//!   normally used through static dispatch.
//! - **No allocations**: every method is callable from an audio callback.

/// Core trait for mono audio processors.
///
/// # Example
///
/// ```rust
/// use grit_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut block = [1.0, -1.0];
/// gain.process_block_inplace(&mut block);
/// assert_eq!(block, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample, advancing any internal state by one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// # Panics
    /// Debug builds assert that `input.len() == output.len()`; release
    /// builds process the shorter of the two.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate, recomputing rate-dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without changing parameters.
    fn reset(&mut self);
}

impl Effect for crate::OnePole {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        crate::OnePole::process(self, input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        crate::OnePole::set_sample_rate(self, sample_rate);
    }

    fn reset(&mut self) {
        crate::OnePole::reset(self);
    }
}
