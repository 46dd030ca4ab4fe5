//! Lock-free `f32` cell for control-thread → audio-thread parameter hand-off.
//!
//! The value is bit-cast into an [`AtomicU32`]. Every access uses relaxed
//! ordering: each parameter is an independent scalar, a reader only needs
//! to see *some* recent value, and a one-buffer-old value is acceptable.
//! A load can never observe a torn float.

use core::sync::atomic::{AtomicU32, Ordering};

/// An `f32` that can be shared between threads without locking.
///
/// # Example
///
/// ```rust
/// use grit_core::AtomicF32;
///
/// let drive = AtomicF32::new(0.0);
/// drive.store(12.0);
/// assert_eq!(drive.load(), 12.0);
/// ```
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a cell holding `value`.
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Replace the current value.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}
