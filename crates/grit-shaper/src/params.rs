//! Shared control parameters and the five-parameter descriptor table.
//!
//! [`ShaperParams`] is the lock-free hand-off between a control thread (UI,
//! host automation, CLI) and the audio thread. Each field is an independent
//! atomic written and read with relaxed ordering; the audio thread picks the
//! values up once per buffer. Setters clamp to the table ranges and ignore
//! non-finite input, so the audio thread never sees an out-of-range target.

use core::sync::atomic::{AtomicU8, Ordering};

use grit_core::{AtomicF32, ParamDescriptor, ParamId};

use crate::DistortionMode;
use crate::engine::{
    DEFAULT_DRIVE_DB, DEFAULT_MIX, DEFAULT_TRIM_DB, DRIVE_MAX_DB, DRIVE_MIN_DB, TRIM_MAX_DB,
    TRIM_MIN_DB,
};
use crate::tone::{DEFAULT_CUTOFF_HZ, MAX_CUTOFF_HZ};

/// Index of the mode selector.
pub const MODE: usize = 0;
/// Index of drive.
pub const DRIVE: usize = 1;
/// Index of mix.
pub const MIX: usize = 2;
/// Index of tone.
pub const TONE: usize = 3;
/// Index of output trim.
pub const OUTPUT: usize = 4;

/// Number of parameters.
pub const PARAM_COUNT: usize = 5;

/// Descriptor table in host layout order.
///
/// Index order and ids follow the host layout, but the mode default is
/// HardClip, the engine's own default, rather than the host's index 0
/// (FullWaveRectify). A fresh [`ShaperParams`], a bare
/// [`WaveshaperEngine`](crate::WaveshaperEngine) and a processor built from
/// either therefore all start in the same mode.
pub static PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::choice(
        "Mode",
        "Mode",
        DistortionMode::COUNT as u32,
        DistortionMode::HardClip as u32,
    )
    .with_id(ParamId(0), "grit_mode"),
    ParamDescriptor::gain_db("Drive", "Drive", DRIVE_MIN_DB, DRIVE_MAX_DB, DEFAULT_DRIVE_DB)
        .with_id(ParamId(1), "grit_drive"),
    ParamDescriptor::mix(DEFAULT_MIX).with_id(ParamId(2), "grit_mix"),
    ParamDescriptor::frequency_hz(
        "Tone",
        "Tone",
        grit_core::MIN_CUTOFF_HZ,
        MAX_CUTOFF_HZ,
        DEFAULT_CUTOFF_HZ,
    )
    .with_id(ParamId(3), "grit_tone"),
    ParamDescriptor::gain_db("Output", "Out", TRIM_MIN_DB, TRIM_MAX_DB, DEFAULT_TRIM_DB)
        .with_id(ParamId(4), "grit_output"),
];

/// Plain copy of every parameter, read in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Transfer function.
    pub mode: DistortionMode,
    /// Drive in dB.
    pub drive_db: f32,
    /// Dry/wet blend.
    pub mix: f32,
    /// Tone cutoff in Hz.
    pub tone_hz: f32,
    /// Output trim in dB.
    pub output_db: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            mode: DistortionMode::default(),
            drive_db: DEFAULT_DRIVE_DB,
            mix: DEFAULT_MIX,
            tone_hz: DEFAULT_CUTOFF_HZ,
            output_db: DEFAULT_TRIM_DB,
        }
    }
}

/// Lock-free parameter block shared between control and audio threads.
///
/// Typically wrapped in an `Arc` and handed to both sides:
///
/// ```rust
/// use std::sync::Arc;
/// use grit_shaper::{DistortionMode, ShaperParams};
///
/// let params = Arc::new(ShaperParams::new());
/// let ui = Arc::clone(&params);
/// std::thread::spawn(move || {
///     ui.set_mode(DistortionMode::Saturate);
///     ui.set_drive_db(30.0); // clamped to 24
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(params.mode(), DistortionMode::Saturate);
/// assert_eq!(params.drive_db(), 24.0);
/// ```
#[derive(Debug)]
pub struct ShaperParams {
    mode: AtomicU8,
    drive_db: AtomicF32,
    mix: AtomicF32,
    tone_hz: AtomicF32,
    output_db: AtomicF32,
}

impl Default for ShaperParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaperParams {
    /// Create a block holding the table defaults.
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(DistortionMode::HardClip as u8),
            drive_db: AtomicF32::new(DEFAULT_DRIVE_DB),
            mix: AtomicF32::new(DEFAULT_MIX),
            tone_hz: AtomicF32::new(DEFAULT_CUTOFF_HZ),
            output_db: AtomicF32::new(DEFAULT_TRIM_DB),
        }
    }

    /// Active mode.
    pub fn mode(&self) -> DistortionMode {
        DistortionMode::from_index(usize::from(self.mode.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    /// Select a mode.
    pub fn set_mode(&self, mode: DistortionMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    /// Select a mode by index; returns `false` (and changes nothing) when
    /// the index is out of range.
    pub fn set_mode_index(&self, index: usize) -> bool {
        match DistortionMode::from_index(index) {
            Some(mode) => {
                self.set_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Drive target in dB.
    pub fn drive_db(&self) -> f32 {
        self.drive_db.load()
    }

    /// Set drive in dB, clamped to \[0, 24\].
    pub fn set_drive_db(&self, db: f32) {
        Self::store_clamped(&self.drive_db, DRIVE, db);
    }

    /// Dry/wet target.
    pub fn mix(&self) -> f32 {
        self.mix.load()
    }

    /// Set the dry/wet blend, clamped to \[0, 1\].
    pub fn set_mix(&self, mix: f32) {
        Self::store_clamped(&self.mix, MIX, mix);
    }

    /// Tone cutoff in Hz.
    pub fn tone_hz(&self) -> f32 {
        self.tone_hz.load()
    }

    /// Set the tone cutoff in Hz, clamped to \[1, 20000\].
    pub fn set_tone_hz(&self, hz: f32) {
        Self::store_clamped(&self.tone_hz, TONE, hz);
    }

    /// Output trim in dB.
    pub fn output_db(&self) -> f32 {
        self.output_db.load()
    }

    /// Set output trim in dB, clamped to \[-24, 24\].
    pub fn set_output_db(&self, db: f32) {
        Self::store_clamped(&self.output_db, OUTPUT, db);
    }

    /// Read a parameter by table index. The mode reads as its index.
    /// Unknown indices read as 0.0.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            MODE => self.mode().index() as f32,
            DRIVE => self.drive_db(),
            MIX => self.mix(),
            TONE => self.tone_hz(),
            OUTPUT => self.output_db(),
            _ => 0.0,
        }
    }

    /// Write a parameter by table index. The mode value is rounded to the
    /// nearest index. Unknown indices and non-finite values are ignored.
    pub fn set(&self, index: usize, value: f32) {
        match index {
            MODE => {
                if value.is_finite() {
                    let index = PARAMS[MODE].clamp(value) as usize;
                    self.set_mode_index(index);
                }
            }
            DRIVE => self.set_drive_db(value),
            MIX => self.set_mix(value),
            TONE => self.set_tone_hz(value),
            OUTPUT => self.set_output_db(value),
            _ => {}
        }
    }

    /// Copy every field.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            mode: self.mode(),
            drive_db: self.drive_db(),
            mix: self.mix(),
            tone_hz: self.tone_hz(),
            output_db: self.output_db(),
        }
    }

    /// Store every field of a snapshot (clamped like the setters).
    pub fn load_snapshot(&self, snapshot: &ParamSnapshot) {
        self.set_mode(snapshot.mode);
        self.set_drive_db(snapshot.drive_db);
        self.set_mix(snapshot.mix);
        self.set_tone_hz(snapshot.tone_hz);
        self.set_output_db(snapshot.output_db);
    }

    fn store_clamped(slot: &AtomicF32, index: usize, value: f32) {
        if value.is_finite() {
            slot.store(PARAMS[index].clamp(value));
        }
    }
}
