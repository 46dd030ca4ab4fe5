//! Parameter ramps for click-free parameter changes.
//!
//! Writing a new gain or mix value straight into the signal path produces an
//! audible step. [`ParameterRamp`] walks from the current value to a new
//! target over a fixed number of samples derived from the sample rate and a
//! ramp time (20 ms for the waveshaper parameters).
//!
//! ## Ramp Styles
//!
//! - **Linear**: constant increment per sample, reaches the target after
//!   exactly `round(duration * sample_rate)` steps
//! - **Multiplicative**: constant ratio per sample (exponential in the value
//!   domain), for strictly positive quantities such as linear gains
//!
//! ## Usage
//!
//! ```rust
//! use grit_core::ParameterRamp;
//!
//! let mut drive = ParameterRamp::new(0.0);
//! drive.reset(44100.0, 0.02); // 882 steps
//!
//! drive.set_target(12.0);
//! for _ in 0..882 {
//!     let _db = drive.next_value();
//! }
//! assert_eq!(drive.current(), 12.0);
//! assert!(!drive.is_smoothing());
//! ```

use libm::{expf, logf, powf, round};

/// How a [`ParameterRamp`] steps towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampStyle {
    /// Constant increment per sample.
    #[default]
    Linear,
    /// Constant ratio per sample.
    ///
    /// Only meaningful when both endpoints are strictly positive; any other
    /// retarget falls back to linear stepping for that ramp.
    Multiplicative,
}

/// Per-sample step of the ramp in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Add(f32),
    Mul(f32),
}

/// A smoothed scalar that ramps to new targets over a fixed number of steps.
///
/// # Invariants
///
/// - When `remaining_steps() == 0`, `current() == target()` exactly
/// - The final step of every ramp lands on the target (no residual drift)
/// - Once settled, [`next_value`](Self::next_value) returns the target with
///   no overshoot or oscillation
///
/// The ramp does not clamp: callers hand it values already constrained to
/// the parameter's domain.
#[derive(Debug, Clone)]
pub struct ParameterRamp {
    current: f32,
    target: f32,
    origin: f32,
    step: Step,
    remaining: u32,
    ramp_steps: u32,
    style: RampStyle,
}

impl ParameterRamp {
    /// Create a linear ramp resting at `initial`.
    ///
    /// The ramp length is zero (instant changes) until [`reset`](Self::reset)
    /// establishes a sample rate.
    pub fn new(initial: f32) -> Self {
        Self::with_style(initial, RampStyle::Linear)
    }

    /// Create a ramp with the given stepping style resting at `initial`.
    pub fn with_style(initial: f32, style: RampStyle) -> Self {
        Self {
            current: initial,
            target: initial,
            origin: initial,
            step: Step::Add(0.0),
            remaining: 0,
            ramp_steps: 0,
            style,
        }
    }

    /// Create a linear ramp and derive its length in one go.
    ///
    /// # Arguments
    /// * `initial` - Starting (and target) value
    /// * `sample_rate` - Sample rate in Hz
    /// * `duration_seconds` - Ramp time in seconds
    pub fn with_config(initial: f32, sample_rate: f32, duration_seconds: f32) -> Self {
        let mut ramp = Self::new(initial);
        ramp.reset(sample_rate, duration_seconds);
        ramp
    }

    /// Re-derive the ramp length and snap to the last requested target.
    ///
    /// The length becomes `round(duration_seconds * sample_rate)` steps. A
    /// non-finite or non-positive sample rate or duration gives a zero-length
    /// ramp, so later retargets take effect immediately.
    pub fn reset(&mut self, sample_rate: f32, duration_seconds: f32) {
        let steps = round(f64::from(duration_seconds) * f64::from(sample_rate));
        self.ramp_steps = if steps.is_finite() && steps > 0.0 {
            steps.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        self.set_current_and_target(self.target);
    }

    /// Request a new target value.
    ///
    /// The current value is left where it is; subsequent calls to
    /// [`next_value`](Self::next_value) walk towards the target.
    ///
    /// - Non-finite values are ignored
    /// - Re-requesting the existing target does not restart the ramp
    /// - Requesting the current value ends the ramp on the spot
    pub fn set_target(&mut self, value: f32) {
        if !value.is_finite() || value == self.target {
            return;
        }
        if self.ramp_steps == 0 || value == self.current {
            self.set_current_and_target(value);
            return;
        }

        self.target = value;
        self.origin = self.current;
        self.remaining = self.ramp_steps;
        self.step = self.step_towards_target();
    }

    /// Jump to `value` immediately, cancelling any ramp in flight.
    pub fn set_current_and_target(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.origin = value;
        self.step = Step::Add(0.0);
        self.remaining = 0;
    }

    /// Advance one step and return the new current value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.remaining == 0 {
            return self.target;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.current = self.target;
        } else {
            match self.step {
                Step::Add(delta) => self.current = self.origin + delta * self.elapsed() as f32,
                Step::Mul(ratio) => self.current = self.bounded(self.current * ratio),
            }
        }
        self.current
    }

    /// Advance `steps` samples at once.
    ///
    /// Linear ramps land exactly where the same number of
    /// [`next_value`](Self::next_value) calls would; multiplicative ramps
    /// agree up to rounding. Skipping past the end lands on the target.
    pub fn skip(&mut self, steps: u32) -> f32 {
        if steps == 0 {
            return self.current;
        }
        if steps >= self.remaining {
            self.set_current_and_target(self.target);
            return self.current;
        }

        self.remaining -= steps;
        match self.step {
            Step::Add(delta) => self.current = self.origin + delta * self.elapsed() as f32,
            Step::Mul(ratio) => self.current = self.bounded(self.current * powf(ratio, steps as f32)),
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Value the ramp is heading towards.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a ramp is still in flight.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.remaining > 0
    }

    /// Steps left before the target is reached.
    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining
    }

    /// Length of a full ramp in steps, as derived by the last reset.
    #[inline]
    pub fn ramp_length(&self) -> u32 {
        self.ramp_steps
    }

    /// Stepping style.
    pub fn style(&self) -> RampStyle {
        self.style
    }

    fn elapsed(&self) -> u32 {
        self.ramp_steps - self.remaining
    }

    /// Keep accumulated rounding from carrying a geometric ramp past its target.
    fn bounded(&self, value: f32) -> f32 {
        if (self.target - self.origin) * (value - self.target) > 0.0 {
            self.target
        } else {
            value
        }
    }

    fn step_towards_target(&self) -> Step {
        let n = self.remaining as f32;
        match self.style {
            RampStyle::Multiplicative if self.current > 0.0 && self.target > 0.0 => {
                Step::Mul(expf((logf(self.target) - logf(self.current)) / n))
            }
            _ => Step::Add((self.target - self.current) / n),
        }
    }
}

impl Default for ParameterRamp {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_length_from_sample_rate() {
        let ramp = ParameterRamp::with_config(0.0, 44100.0, 0.02);
        assert_eq!(ramp.ramp_length(), 882);

        let ramp = ParameterRamp::with_config(0.0, 48000.0, 0.02);
        assert_eq!(ramp.ramp_length(), 960);
    }

    #[test]
    fn linear_ramp_reaches_target_exactly() {
        let mut ramp = ParameterRamp::with_config(0.0, 48000.0, 0.01);
        ramp.set_target(1.0);

        for _ in 0..480 {
            ramp.next_value();
        }

        assert_eq!(ramp.current(), 1.0);
        assert_eq!(ramp.remaining_steps(), 0);
        assert!(!ramp.is_smoothing());
    }

    #[test]
    fn linear_ramp_constant_rate() {
        let mut ramp = ParameterRamp::with_config(0.0, 48000.0, 0.01);
        ramp.set_target(1.0);

        for _ in 0..240 {
            ramp.next_value();
        }

        assert!(
            (ramp.current() - 0.5).abs() < 1e-4,
            "should be halfway, got {}",
            ramp.current()
        );
    }

    #[test]
    fn set_target_does_not_move_current() {
        let mut ramp = ParameterRamp::with_config(0.25, 48000.0, 0.02);
        ramp.set_target(0.75);
        assert_eq!(ramp.current(), 0.25);
        assert_eq!(ramp.target(), 0.75);
    }

    #[test]
    fn settled_ramp_holds_target() {
        let mut ramp = ParameterRamp::with_config(0.0, 1000.0, 0.01);
        ramp.set_target(-3.0);
        for _ in 0..10 {
            ramp.next_value();
        }
        for _ in 0..100 {
            assert_eq!(ramp.next_value(), -3.0);
        }
    }

    #[test]
    fn retarget_to_current_stops_ramp() {
        let mut ramp = ParameterRamp::with_config(0.0, 1000.0, 0.1);
        ramp.set_target(10.0);
        for _ in 0..30 {
            ramp.next_value();
        }
        let here = ramp.current();
        ramp.set_target(here);

        assert!(!ramp.is_smoothing());
        for _ in 0..200 {
            assert_eq!(ramp.next_value(), here);
        }
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut ramp = ParameterRamp::with_config(0.0, 1000.0, 0.1);
        ramp.set_target(1.0);
        for _ in 0..40 {
            ramp.next_value();
        }
        let remaining = ramp.remaining_steps();
        ramp.set_target(1.0);
        assert_eq!(ramp.remaining_steps(), remaining);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut ramp = ParameterRamp::with_config(0.5, 48000.0, 0.02);
        ramp.set_target(f32::NAN);
        ramp.set_target(f32::INFINITY);
        assert_eq!(ramp.target(), 0.5);
        assert!(!ramp.is_smoothing());
    }

    #[test]
    fn unprepared_ramp_is_instant() {
        let mut ramp = ParameterRamp::new(0.0);
        ramp.set_target(6.0);
        assert_eq!(ramp.current(), 6.0);
        assert_eq!(ramp.next_value(), 6.0);
    }

    #[test]
    fn invalid_sample_rate_gives_instant_ramp() {
        for sr in [0.0, -44100.0, f32::NAN, f32::INFINITY] {
            let mut ramp = ParameterRamp::with_config(0.0, sr, 0.02);
            assert_eq!(ramp.ramp_length(), 0);
            ramp.set_target(1.0);
            assert_eq!(ramp.next_value(), 1.0);
        }
    }

    #[test]
    fn reset_snaps_to_last_target() {
        let mut ramp = ParameterRamp::with_config(0.0, 48000.0, 0.02);
        ramp.set_target(0.8);
        ramp.next_value();
        ramp.reset(96000.0, 0.02);

        assert_eq!(ramp.current(), 0.8);
        assert!(!ramp.is_smoothing());
        assert_eq!(ramp.ramp_length(), 1920);
    }

    #[test]
    fn multiplicative_ramp_is_geometric() {
        let mut ramp = ParameterRamp::with_style(1.0, RampStyle::Multiplicative);
        ramp.reset(1000.0, 0.01); // 10 steps
        ramp.set_target(1024.0);

        // Ratio 2 per step
        assert!((ramp.next_value() - 2.0).abs() < 1e-4);
        assert!((ramp.next_value() - 4.0).abs() < 1e-3);
        for _ in 0..8 {
            ramp.next_value();
        }
        assert_eq!(ramp.current(), 1024.0);
    }

    #[test]
    fn multiplicative_falls_back_to_linear_through_zero() {
        let mut ramp = ParameterRamp::with_style(1.0, RampStyle::Multiplicative);
        ramp.reset(1000.0, 0.01);
        ramp.set_target(-1.0);

        assert!((ramp.next_value() - 0.8).abs() < 1e-6);
        for _ in 0..9 {
            ramp.next_value();
        }
        assert_eq!(ramp.current(), -1.0);
    }

    #[test]
    fn skip_matches_stepping() {
        let mut stepped = ParameterRamp::with_config(0.0, 1000.0, 0.1);
        let mut skipped = stepped.clone();
        stepped.set_target(5.0);
        skipped.set_target(5.0);

        for _ in 0..37 {
            stepped.next_value();
        }
        skipped.skip(37);

        assert_eq!(stepped.current(), skipped.current());
        assert_eq!(stepped.remaining_steps(), skipped.remaining_steps());

        assert_eq!(skipped.skip(1000), 5.0);
        assert!(!skipped.is_smoothing());
    }
}
