//! Range validation for render settings.
//!
//! Ranges come from the processor's descriptor table, so a settings file is
//! accepted exactly when every value lies inside what the engine supports.

use grit_core::ParamDescriptor;
use thiserror::Error;

/// Largest block size accepted for offline rendering.
pub const MAX_BLOCK_SIZE: usize = 1 << 16;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite parameter value.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Block size outside `1..=MAX_BLOCK_SIZE`.
    #[error("block size {0} out of range [1, 65536]")]
    BlockSize(usize),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one value against a descriptor.
///
/// ```rust
/// use grit_config::validation::{ValidationError, validate_param};
/// use grit_shaper::params::{DRIVE, PARAMS};
///
/// assert!(validate_param(&PARAMS[DRIVE], "drive_db", 12.0).is_ok());
/// assert!(matches!(
///     validate_param(&PARAMS[DRIVE], "drive_db", 30.0),
///     Err(ValidationError::OutOfRange { .. })
/// ));
/// ```
pub fn validate_param(desc: &ParamDescriptor, param: &str, value: f32) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: param.to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Check the render block size.
pub fn validate_block_size(block_size: usize) -> ValidationResult<()> {
    if (1..=MAX_BLOCK_SIZE).contains(&block_size) {
        Ok(())
    } else {
        Err(ValidationError::BlockSize(block_size))
    }
}

/// Fold collected errors: none is `Ok`, one is returned as is, several are
/// wrapped in [`ValidationError::Multiple`].
pub fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
