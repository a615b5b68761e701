//! Fixed-width big-endian codecs.
//!
//! Big-endian keeps byte order equal to numeric order for unsigned values,
//! so these are the codecs to use for keys in an ordered store.

use zerocopy::byteorder::big_endian::{U16, U32, U64};
use zerocopy::{FromBytes, IntoBytes};

use crate::buffer::Buffer;
use crate::trace::CodecKind;

// Each codec reads exactly the width it writes.
macro_rules! fixed_unsigned {
    ($($(#[$doc:meta])* $name:ident: $ty:ty => $wire:ty;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(n: &mut $ty, buf: &mut Buffer<'_>) {
                const SIZE: usize = core::mem::size_of::<$wire>();
                buf.traced(CodecKind::Fixed, |buf| {
                    if buf.is_writing() {
                        buf.write_bytes(<$wire>::new(*n).as_bytes());
                        return;
                    }
                    let bytes = buf.read_bytes(SIZE);
                    match <$wire>::read_from_bytes(&bytes) {
                        Ok(value) => *n = value.get(),
                        Err(_) => {
                            *n = 0;
                            buf.fail();
                        }
                    }
                })
            }
        )+
    };
}

fixed_unsigned! {
    /// `u64` as 8 big-endian bytes.
    fixed_u64: u64 => U64;
    /// `u32` as 4 big-endian bytes.
    fixed_u32: u32 => U32;
    /// `u16` as 2 big-endian bytes.
    fixed_u16: u16 => U16;
}

macro_rules! fixed_reinterpret {
    ($($(#[$doc:meta])* $name:ident: $ty:ty => $via:ident($unsigned:ty);)+) => {
        $(
            $(#[$doc])*
            pub fn $name(n: &mut $ty, buf: &mut Buffer<'_>) {
                let mut u = *n as $unsigned;
                $via(&mut u, buf);
                *n = u as $ty;
            }
        )+
    };
}

fixed_reinterpret! {
    /// `i64` as 8 big-endian two's-complement bytes.
    fixed_i64: i64 => fixed_u64(u64);
    /// `i32` as 4 big-endian two's-complement bytes.
    fixed_i32: i32 => fixed_u32(u32);
    /// `i16` as 2 big-endian two's-complement bytes.
    fixed_i16: i16 => fixed_u16(u16);
}

/// `isize` as 8 big-endian bytes, regardless of platform width.
pub fn fixed_int(n: &mut isize, buf: &mut Buffer<'_>) {
    let mut wide = *n as i64;
    fixed_i64(&mut wide, buf);
    match isize::try_from(wide) {
        Ok(v) => *n = v,
        Err(_) => {
            *n = 0;
            buf.fail();
        }
    }
}

/// `f64` as its IEEE-754 bit pattern in 8 big-endian bytes.
pub fn float64(n: &mut f64, buf: &mut Buffer<'_>) {
    let mut bits = n.to_bits();
    fixed_u64(&mut bits, buf);
    *n = f64::from_bits(bits);
}

/// `f32` as its IEEE-754 bit pattern in 4 big-endian bytes.
pub fn float32(n: &mut f32, buf: &mut Buffer<'_>) {
    let mut bits = n.to_bits();
    fixed_u32(&mut bits, buf);
    *n = f32::from_bits(bits);
}
