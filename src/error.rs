//! Error types reported at the API boundary.
//!
//! Inside a traversal every failure collapses into the buffer's sticky flag.
//! These types only appear once a traversal has finished, or where a value
//! converts from a foreign representation.

use snafu::Snafu;

use crate::buffer::Mode;

/// A traversal finished with the buffer's failure flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PackError {
    /// Encoding failed; no bytes were produced.
    #[snafu(display("encoding failed after writing {written} bytes"))]
    Encode {
        /// Bytes accumulated before the traversal returned.
        written: usize,
    },

    /// The input was malformed or truncated.
    #[snafu(display("malformed or truncated input: stopped at byte {position} of {len}"))]
    Decode {
        /// Cursor position when the traversal returned.
        position: usize,
        /// Total input length.
        len: usize,
    },
}

impl PackError {
    /// The direction that failed.
    pub fn mode(&self) -> Mode {
        match self {
            PackError::Encode { .. } => Mode::Writing,
            PackError::Decode { .. } => Mode::Reading,
        }
    }
}

/// Failure reported by a [`BinaryMarshal`](crate::BinaryMarshal) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MarshalError {
    /// Payload had the wrong length.
    #[snafu(display("invalid length: expected {expected} bytes, got {actual}"))]
    InvalidLength {
        /// Bytes expected.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },

    /// Payload decoded to a value outside the type's range.
    #[snafu(display("invalid data: {message}"))]
    InvalidData {
        /// Error description.
        message: &'static str,
    },
}

/// Failure parsing a [`Uuid`](crate::Uuid) from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum UuidError {
    /// Not URL-safe base64.
    #[snafu(display("invalid uuid encoding: {source}"))]
    Base64 {
        /// Underlying decode error.
        source: base64::DecodeError,
    },

    /// Decoded to something other than 16 bytes.
    #[snafu(display("invalid uuid size: {len} bytes"))]
    InvalidSize {
        /// Decoded length.
        len: usize,
    },
}

/// Result type for pack operations.
pub type Result<T, E = PackError> = core::result::Result<T, E>;
