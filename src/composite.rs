//! Composite codecs built from the primitives.
//!
//! Lengths and counts are unsigned varints. A byte length larger than the
//! unread input fails the buffer before anything is allocated. Element
//! counts only bound the up-front reservation, since an element may encode
//! to zero bytes.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use crate::buffer::Buffer;
use crate::primitives::uint;
use crate::trace::CodecKind;

// Take `size` bytes, or fail and skip to the end without allocating.
fn take<'a>(buf: &mut Buffer<'a>, size: usize) -> Option<Cow<'a, [u8]>> {
    if size > buf.remaining() {
        buf.read_bytes(buf.remaining());
        buf.fail();
        return None;
    }
    Some(buf.read_bytes(size))
}

// Reservation for `count` decoded items, never more than the input could
// hold at one byte per item.
fn reserve_hint(count: usize, buf: &Buffer<'_>) -> usize {
    count.min(buf.remaining())
}

/// A string as `[uvarint len][utf-8 bytes]`.
///
/// The decoded string is a fresh copy; it never borrows the input. Invalid
/// UTF-8 fails the buffer.
pub fn string(s: &mut String, buf: &mut Buffer<'_>) {
    let mut size = s.len();
    uint(&mut size, buf);
    buf.traced(CodecKind::Raw, |buf| {
        if buf.is_writing() {
            buf.ensure_space(size).copy_from_slice(s.as_bytes());
            return;
        }
        let decoded = take(buf, size).and_then(|raw| String::from_utf8(raw.into_owned()).ok());
        match decoded {
            Some(v) => *s = v,
            None => {
                s.clear();
                buf.fail();
            }
        }
    })
}

/// A string as its bytes followed by a single `0x00`, with no length.
///
/// Unlike [`string`], the encoding sorts like the string itself, so it works
/// as a prefix-iterable key in an ordered store. The first zero byte always
/// ends the value: a string with an embedded `'\0'` decodes truncated at it.
/// Input that ends before a terminator fails the buffer.
pub fn string_z(s: &mut String, buf: &mut Buffer<'_>) {
    buf.traced(CodecKind::Terminated, |buf| {
        if buf.is_writing() {
            buf.write_bytes(s.as_bytes());
            buf.write_bytes(&[0]);
            return;
        }
        let raw = buf.read_until_zero();
        match std::str::from_utf8(raw) {
            Ok(v) => *s = v.to_owned(),
            Err(_) => {
                s.clear();
                buf.fail();
            }
        }
    })
}

/// A byte vector as `[uvarint len][bytes]`. Decoding copies.
pub fn bytes(b: &mut Vec<u8>, buf: &mut Buffer<'_>) {
    let mut size = b.len();
    uint(&mut size, buf);
    buf.traced(CodecKind::Raw, |buf| {
        if buf.is_writing() {
            buf.ensure_space(size).copy_from_slice(b);
            return;
        }
        match take(buf, size) {
            Some(raw) => *b = raw.into_owned(),
            None => b.clear(),
        }
    })
}

/// A fixed-size byte array as exactly `N` raw bytes, no length.
pub fn byte_array<const N: usize>(arr: &mut [u8; N], buf: &mut Buffer<'_>) {
    buf.traced(CodecKind::Raw, |buf| {
        if buf.is_writing() {
            buf.write_bytes(arr);
            return;
        }
        arr.copy_from_slice(&buf.read_bytes(N));
    })
}

/// A sequence as `[uvarint count][item]*`, each item packed by `f`.
///
/// Reading replaces the contents with up to `count` items, each starting
/// from its default and filled by `f`. Decoding stops at the first failed
/// item. Empty input and an empty vector both encode as count 0.
///
/// ```
/// use vpack::{Buffer, composite, primitives};
///
/// let mut list = vec![1i64, -2, 300];
/// let bytes = vpack::to_bytes(&mut list, |l, buf| composite::slice(l, primitives::vint64, buf)).unwrap();
/// assert_eq!(bytes, [3, 2, 3, 0xd8, 0x04]);
///
/// let back: Vec<i64> =
///     vpack::from_bytes(&bytes, |l, buf| composite::slice(l, primitives::vint64, buf)).unwrap();
/// assert_eq!(back, list);
/// ```
pub fn slice<T, F>(list: &mut Vec<T>, mut f: F, buf: &mut Buffer<'_>)
where
    T: Default,
    F: FnMut(&mut T, &mut Buffer<'_>),
{
    let mut size = list.len();
    uint(&mut size, buf);
    if buf.is_writing() {
        for item in list.iter_mut() {
            f(item, buf);
        }
        return;
    }
    list.clear();
    list.reserve(reserve_hint(size, buf));
    for _ in 0..size {
        let mut item = T::default();
        f(&mut item, buf);
        if buf.has_failed() {
            break;
        }
        list.push(item);
    }
}

/// A hash map as `[uvarint count]([key][value])*`.
///
/// Pairs are written in the map's iteration order, which is unspecified:
/// two encodings of equal maps may differ byte-wise. Use [`btree_map`] when
/// the bytes must be canonical. On read the map is cleared first and a
/// repeated key keeps its last value.
pub fn map<K, V, S, FK, FV>(m: &mut HashMap<K, V, S>, mut key_fn: FK, mut val_fn: FV, buf: &mut Buffer<'_>)
where
    K: Eq + Hash + Clone + Default,
    V: Default,
    S: BuildHasher,
    FK: FnMut(&mut K, &mut Buffer<'_>),
    FV: FnMut(&mut V, &mut Buffer<'_>),
{
    let mut size = m.len();
    uint(&mut size, buf);
    if buf.is_writing() {
        for (key, val) in m.iter_mut() {
            let mut key = key.clone();
            key_fn(&mut key, buf);
            val_fn(val, buf);
        }
        return;
    }
    m.clear();
    m.reserve(reserve_hint(size, buf));
    for _ in 0..size {
        let mut key = K::default();
        let mut val = V::default();
        key_fn(&mut key, buf);
        val_fn(&mut val, buf);
        if buf.has_failed() {
            break;
        }
        m.insert(key, val);
    }
}

/// A B-tree map with the same layout as [`map`], written in ascending key
/// order so equal maps always produce equal bytes.
pub fn btree_map<K, V, FK, FV>(m: &mut BTreeMap<K, V>, mut key_fn: FK, mut val_fn: FV, buf: &mut Buffer<'_>)
where
    K: Ord + Clone + Default,
    V: Default,
    FK: FnMut(&mut K, &mut Buffer<'_>),
    FV: FnMut(&mut V, &mut Buffer<'_>),
{
    let mut size = m.len();
    uint(&mut size, buf);
    if buf.is_writing() {
        for (key, val) in m.iter_mut() {
            let mut key = key.clone();
            key_fn(&mut key, buf);
            val_fn(val, buf);
        }
        return;
    }
    m.clear();
    for _ in 0..size {
        let mut key = K::default();
        let mut val = V::default();
        key_fn(&mut key, buf);
        val_fn(&mut val, buf);
        if buf.has_failed() {
            break;
        }
        m.insert(key, val);
    }
}

/// A type that converts itself to and from an opaque byte payload.
pub trait BinaryMarshal {
    /// Error reported by either direction.
    type Error: Display;

    /// Produce the payload.
    fn marshal_binary(&self) -> Result<Vec<u8>, Self::Error>;

    /// Replace `self` with the value the payload describes.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// A [`BinaryMarshal`] value as a length-prefixed payload.
///
/// A marshal error fails the buffer and writes nothing. An unmarshal error
/// fails the buffer.
pub fn binary<T: BinaryMarshal>(value: &mut T, buf: &mut Buffer<'_>) {
    if buf.is_writing() {
        match value.marshal_binary() {
            Ok(mut data) => bytes(&mut data, buf),
            Err(err) => {
                tracing::debug!(%err, "binary marshal failed");
                buf.fail();
            }
        }
        return;
    }
    let mut data = Vec::new();
    bytes(&mut data, buf);
    if buf.has_failed() {
        return;
    }
    if let Err(err) = value.unmarshal_binary(&data) {
        tracing::debug!(%err, "binary unmarshal failed");
        buf.fail();
    }
}
