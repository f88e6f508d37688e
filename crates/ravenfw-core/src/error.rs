//! Error types for ravenfw-core
//!
//! Register accesses and the flash transfer itself cannot fail; the only
//! errors are precondition checks at the safe API surface and failures of
//! the output sink.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Transfer length does not fit in the provided word buffer
    BufferTooSmall {
        /// Requested transfer length in bytes
        len: usize,
        /// Buffer capacity in bytes
        capacity: usize,
    },
    /// Worker image does not match the size of the relocation scratch region
    ImageSizeMismatch {
        /// Image size in words
        image: usize,
        /// Scratch size in words
        scratch: usize,
    },
    /// Read latency does not fit in the 4-bit latency field
    InvalidLatency(u8),
    /// Writing to the serial sink failed
    IoError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { len, capacity } => write!(
                f,
                "transfer of {} bytes does not fit in a {} byte buffer",
                len, capacity
            ),
            Self::ImageSizeMismatch { image, scratch } => write!(
                f,
                "worker image is {} words but scratch region holds {}",
                image, scratch
            ),
            Self::InvalidLatency(v) => write!(f, "latency {} out of range 0..=15", v),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
