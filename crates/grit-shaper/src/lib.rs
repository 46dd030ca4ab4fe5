//! Grit Shaper - waveshaping distortion engine
//!
//! A per-sample nonlinear signal path with click-free drive, mix and output
//! trim, followed by a tone lowpass. Built for hard-real-time audio
//! callbacks: once prepared, processing never allocates, locks or panics.
//!
//! # Signal Flow
//!
//! ```text
//! ShaperParams (control thread, atomics)
//!        │  sync once per block
//!        ▼
//! input ─► WaveshaperEngine ─► ToneStage ─► output
//!          drive → shape → mix → trim    one-pole LP per channel
//! ```
//!
//! # Modes
//!
//! | Index | Mode | Character |
//! |-------|------|-----------|
//! | 0 | Full Wave Rectification | octave-up, all positive |
//! | 1 | Half Wave Rectification | negative half removed |
//! | 2 | Hard Clipping | flat top at ±0.99 |
//! | 3–5 | Soft Clipping 1/2/3 | arctangent saturation |
//! | 6 | Saturation | asymmetric tanh / sinh fold |
//! | 7 | Bit Reduction | amplitude quantization |
//!
//! # Example
//!
//! ```rust
//! use grit_shaper::{DistortionMode, WaveshaperEngine};
//!
//! let mut engine = WaveshaperEngine::new();
//! engine.prepare(44100.0, 512);
//! engine.set_mode(DistortionMode::HardClip);
//! engine.set_drive_db(12.0);
//!
//! let mut out = 0.0;
//! for _ in 0..882 {
//!     out = engine.process_sample(0.5);
//! }
//! assert_eq!(out, 0.99);
//! ```
//!
//! # Features
//!
//! - `std` (default): standard library support
//! - `tracing`: `debug`/`warn` events from `prepare` (never from processing)

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod engine;
pub mod mode;
pub mod params;
pub mod processor;
pub mod tone;
pub mod transfer;

pub use engine::{FrameParams, RAMP_TIME_SECONDS, WaveshaperEngine};
pub use mode::{DistortionMode, ParseModeError};
pub use params::{PARAMS, ParamSnapshot, ShaperParams};
pub use processor::{DistortionProcessor, ProcessSpec};
pub use tone::ToneStage;
