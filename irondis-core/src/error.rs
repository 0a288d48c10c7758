//! Error types for IronDIS codec operations.

use thiserror::Error;

/// Error raised while marshalling or unmarshalling a record.
///
/// A missing cursor is not an error: encode/decode with no cursor bound are
/// silent no-ops.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A read needed more bytes than the source had left.
    #[error("insufficient data: required {required} bytes, available {available} bytes")]
    InsufficientData {
        /// Bytes the read needed.
        required: usize,
        /// Bytes that were left in the source.
        available: usize,
    },

    /// A write did not fit in a fixed-capacity destination.
    #[error("capacity exceeded: required {required} bytes, available {available} bytes")]
    CapacityExceeded {
        /// Bytes the write needed.
        required: usize,
        /// Bytes that were left in the destination.
        available: usize,
    },

    /// The underlying stream reported a fault.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Creates an insufficient data error.
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Creates a capacity exceeded error.
    pub fn capacity_exceeded(required: usize, available: usize) -> Self {
        Self::CapacityExceeded {
            required,
            available,
        }
    }

    /// Returns true if the source ran out of bytes.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Returns true if the underlying stream failed.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type alias for IronDIS codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
