//! LEB128 variable-length integers.
//!
//! Seven data bits per byte, least significant group first, high bit set on
//! every byte but the last. Signed values are zigzag-mapped first so small
//! negative numbers stay short.

use crate::buffer::Buffer;
use crate::trace::CodecKind;

/// Longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Map a signed value onto an unsigned one: 0, -1, 1, -2, ... become
/// 0, 1, 2, 3, ...
#[inline]
pub const fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub const fn zigzag_decode(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Number of bytes `value` occupies as an unsigned varint.
pub const fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

fn write_uvarint(buf: &mut Buffer<'_>, mut value: u64) {
    let mut scratch = [0u8; MAX_VARINT_LEN];
    let mut i = 0;
    while value >= 0x80 {
        scratch[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    scratch[i] = value as u8;
    buf.write_bytes(&scratch[..=i]);
}

// None on a missing terminator or a value wider than 64 bits.
fn read_uvarint(buf: &mut Buffer<'_>) -> Option<u64> {
    let mut result = 0u64;
    let mut shift = 0u32;
    for i in 0..MAX_VARINT_LEN {
        let b = buf.read_byte()?;
        if b < 0x80 {
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return None;
            }
            return Some(result | ((b as u64) << shift));
        }
        result |= ((b & 0x7f) as u64) << shift;
        shift += 7;
    }
    None
}

/// `u64` as an unsigned varint.
pub fn vuint64(n: &mut u64, buf: &mut Buffer<'_>) {
    buf.traced(CodecKind::Uvarint, |buf| {
        if buf.is_writing() {
            write_uvarint(buf, *n);
            return;
        }
        match read_uvarint(buf) {
            Some(v) => *n = v,
            None => {
                *n = 0;
                buf.fail();
            }
        }
    })
}

/// `i64` as a zigzag varint.
pub fn vint64(n: &mut i64, buf: &mut Buffer<'_>) {
    buf.traced(CodecKind::Varint, |buf| {
        if buf.is_writing() {
            write_uvarint(buf, zigzag_encode(*n));
            return;
        }
        match read_uvarint(buf) {
            Some(v) => *n = zigzag_decode(v),
            None => {
                *n = 0;
                buf.fail();
            }
        }
    })
}

/// `usize` as an unsigned varint (64 bits on the wire).
pub fn uint(n: &mut usize, buf: &mut Buffer<'_>) {
    let mut wide = *n as u64;
    vuint64(&mut wide, buf);
    match usize::try_from(wide) {
        Ok(v) => *n = v,
        Err(_) => {
            *n = 0;
            buf.fail();
        }
    }
}

/// `isize` as a zigzag varint (64 bits on the wire).
pub fn int(n: &mut isize, buf: &mut Buffer<'_>) {
    let mut wide = *n as i64;
    vint64(&mut wide, buf);
    match isize::try_from(wide) {
        Ok(v) => *n = v,
        Err(_) => {
            *n = 0;
            buf.fail();
        }
    }
}
