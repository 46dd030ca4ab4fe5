//! Render settings for the grit distortion engine.
//!
//! A single TOML file describes one offline render: the distortion mode,
//! the four continuous parameters and the processing block size. Settings
//! are validated against the processor's own descriptor table and applied
//! to a shared [`ShaperParams`](grit_shaper::ShaperParams) block.
//!
//! # Example
//!
//! ```rust,no_run
//! use grit_config::RenderSettings;
//! use grit_shaper::ShaperParams;
//!
//! let settings = RenderSettings::load("crunch.toml").unwrap();
//! settings.validate().unwrap();
//!
//! let params = ShaperParams::new();
//! settings.apply(&params);
//! ```

mod error;
mod settings;

/// Range validation against the processor's parameter table.
pub mod validation;

pub use error::ConfigError;
pub use settings::{DEFAULT_BLOCK_SIZE, RenderSettings, parse_mode};
pub use validation::{ValidationError, ValidationResult};
