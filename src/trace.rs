//! Codec call tracing.
//!
//! A traversal is correct only if the Nth codec call while writing matches
//! the Nth codec call while reading. Nothing in the type system enforces
//! this, so a buffer can record the leaf calls it sees and
//! [`check_symmetry`] compares both directions.

use core::fmt;

use crate::buffer::Buffer;

/// Leaf codec families as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// Fixed-width big-endian integer or float.
    Fixed,
    /// Unsigned LEB128 varint.
    Uvarint,
    /// Zigzag-mapped signed varint.
    Varint,
    /// Single byte (bytes and bools).
    Byte,
    /// Raw run of bytes with an externally known length.
    Raw,
    /// Zero-terminated run of bytes.
    Terminated,
}

/// One recorded codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecCall {
    /// Which codec ran.
    pub kind: CodecKind,
    /// Bytes written or consumed.
    pub bytes: usize,
}

/// Where the write and read traces of a traversal diverged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asymmetry {
    /// Encoding itself failed.
    EncodeFailed,
    /// Decoding the freshly encoded bytes failed.
    DecodeFailed {
        /// Calls recorded while writing.
        written: Vec<CodecCall>,
        /// Calls recorded while reading.
        read: Vec<CodecCall>,
    },
    /// The Nth call differed.
    Mismatch {
        /// Index of the first differing call.
        index: usize,
        /// Call made while writing, if any.
        written: Option<CodecCall>,
        /// Call made while reading, if any.
        read: Option<CodecCall>,
    },
    /// Reading stopped before consuming everything that was written.
    TrailingBytes {
        /// Unread byte count.
        remaining: usize,
    },
}

impl fmt::Display for Asymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asymmetry::EncodeFailed => f.write_str("encoding failed"),
            Asymmetry::DecodeFailed { written, read } => write!(
                f,
                "decoding failed after {} of {} calls",
                read.len(),
                written.len()
            ),
            Asymmetry::Mismatch {
                index,
                written,
                read,
            } => write!(
                f,
                "call {index} differs: wrote {written:?}, read {read:?}"
            ),
            Asymmetry::TrailingBytes { remaining } => {
                write!(f, "{remaining} bytes left unread")
            }
        }
    }
}

impl std::error::Error for Asymmetry {}

/// Encode `obj` with `f`, decode the result into a fresh `T` with `f`, and
/// compare the recorded call sequences.
///
/// # Example
///
/// ```
/// use vpack::{Buffer, check_symmetry, primitives, composite};
///
/// #[derive(Default)]
/// struct Point { x: i64, label: String }
///
/// fn pack_point(p: &mut Point, buf: &mut Buffer<'_>) {
///     primitives::vint64(&mut p.x, buf);
///     composite::string(&mut p.label, buf);
/// }
///
/// let mut p = Point { x: -3, label: "origin".into() };
/// assert!(check_symmetry(&mut p, pack_point).is_ok());
/// ```
pub fn check_symmetry<T, F>(obj: &mut T, f: F) -> Result<(), Asymmetry>
where
    T: Default,
    F: Fn(&mut T, &mut Buffer<'_>),
{
    let mut writer = Buffer::writer();
    writer.enable_trace();
    f(obj, &mut writer);
    if writer.has_failed() {
        return Err(Asymmetry::EncodeFailed);
    }
    let written = writer.take_trace();
    let bytes = writer.into_bytes();

    let mut copy = T::default();
    let mut reader = Buffer::reader(&bytes);
    reader.enable_trace();
    f(&mut copy, &mut reader);
    let read = reader.take_trace();
    if reader.has_failed() {
        return Err(Asymmetry::DecodeFailed { written, read });
    }

    let longest = written.len().max(read.len());
    for index in 0..longest {
        let (w, r) = (written.get(index).copied(), read.get(index).copied());
        if w != r {
            return Err(Asymmetry::Mismatch {
                index,
                written: w,
                read: r,
            });
        }
    }

    if !reader.is_exhausted() {
        return Err(Asymmetry::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(())
}
