//! Entry points: build a buffer, run a traversal, report the outcome.

use crate::buffer::Buffer;
use crate::error::{DecodeSnafu, EncodeSnafu, PackError};
use crate::pack::Pack;

/// Serialize `obj` with traversal `f`.
///
/// Fails, producing no bytes, if any codec failed along the way.
///
/// ```
/// use vpack::primitives;
///
/// let mut n = -1i64;
/// assert_eq!(vpack::to_bytes(&mut n, primitives::vint64).unwrap(), [0x01]);
/// ```
pub fn to_bytes<T, F>(obj: &mut T, f: F) -> Result<Vec<u8>, PackError>
where
    T: ?Sized,
    F: FnOnce(&mut T, &mut Buffer<'_>),
{
    let mut buf = Buffer::writer();
    f(obj, &mut buf);
    if buf.has_failed() {
        let written = buf.as_bytes().len();
        tracing::debug!(written, "encode failed");
        return EncodeSnafu { written }.fail();
    }
    Ok(buf.into_bytes())
}

/// Deserialize a fresh `T` from `data` with traversal `f`.
///
/// Trailing bytes after the traversal are not an error.
pub fn from_bytes<T, F>(data: &[u8], f: F) -> Result<T, PackError>
where
    T: Default,
    F: FnOnce(&mut T, &mut Buffer<'_>),
{
    let mut obj = T::default();
    let mut buf = Buffer::reader(data);
    f(&mut obj, &mut buf);
    if buf.has_failed() {
        let (position, len) = (buf.position(), data.len());
        tracing::debug!(position, len, "decode failed");
        return DecodeSnafu { position, len }.fail();
    }
    Ok(obj)
}

/// Deserialize into caller-owned storage. Returns `false` on malformed or
/// truncated input, in which case `obj` may be partially overwritten.
pub fn from_bytes_into<T, F>(data: &[u8], obj: &mut T, f: F) -> bool
where
    T: ?Sized,
    F: FnOnce(&mut T, &mut Buffer<'_>),
{
    let mut buf = Buffer::reader(data);
    f(obj, &mut buf);
    if buf.has_failed() {
        tracing::debug!(position = buf.position(), len = data.len(), "decode into failed");
        return false;
    }
    true
}

/// Serialize with the type's [`Pack`] implementation.
pub fn encode<T: Pack + ?Sized>(obj: &mut T) -> Result<Vec<u8>, PackError> {
    to_bytes(obj, T::pack)
}

/// Deserialize with the type's [`Pack`] implementation.
pub fn decode<T: Pack + Default>(data: &[u8]) -> Result<T, PackError> {
    from_bytes(data, T::pack)
}
