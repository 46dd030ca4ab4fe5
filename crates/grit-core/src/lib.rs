//! Grit Core - DSP primitives for the grit distortion engine
//!
//! The building blocks here are shared by the waveshaper engine, its tone
//! stage and the control path. Everything is designed for hard-real-time
//! audio callbacks: no allocation, no locking, no panics in processing.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! - [`ParameterRamp`] - Fixed-length linear or multiplicative ramps with
//!   exact arrival at the target
//!
//! ## Filters
//!
//! - [`OnePole`] - TPT one-pole lowpass for tone control
//!
//! ## Control Path
//!
//! - [`AtomicF32`] - Lock-free float for control-thread → audio-thread hand-off
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Parameter introspection
//!
//! ## Processing
//!
//! - [`Effect`] - Object-safe mono processing trait
//!
//! ## Utilities
//!
//! - [`db_to_linear`], [`linear_to_db`], [`wet_dry_mix`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! grit-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod atomic;
pub mod effect;
pub mod math;
pub mod one_pole;
pub mod param_info;
pub mod ramp;

pub use atomic::AtomicF32;
pub use effect::Effect;
pub use math::{db_to_linear, flush_denormal, linear_to_db, wet_dry_mix};
pub use one_pole::{MIN_CUTOFF_HZ, OnePole};
pub use param_info::{
    ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParamValueDisplay, ParameterInfo,
};
pub use ramp::{ParameterRamp, RampStyle};
