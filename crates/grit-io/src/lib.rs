//! WAV file I/O for the grit distortion engine.
//!
//! Samples are exchanged as interleaved `f32` in \[-1.0, 1.0\], channel
//! count preserved, so a file can be fed straight into
//! `DistortionProcessor::process_interleaved`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grit_io::{read_wav, write_wav};
//!
//! let (mut samples, spec) = read_wav("input.wav")?;
//! processor.process_interleaved(&mut samples, spec.channels as usize);
//! write_wav("output.wav", &samples, spec)?;
//! ```

mod wav;

pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
