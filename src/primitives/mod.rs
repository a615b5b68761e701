//! Primitive codecs.
//!
//! Every codec has the shape `codec(&mut value, &mut Buffer)`: when writing
//! it appends the value's bytes, when reading it consumes bytes and assigns
//! through the reference. On a short or malformed input the buffer fails and
//! the value is set to zero.

mod fixed;
mod varint;

pub use fixed::{fixed_i16, fixed_i32, fixed_i64, fixed_int, fixed_u16, fixed_u32, fixed_u64, float32, float64};
pub use varint::{MAX_VARINT_LEN, int, uint, uvarint_len, vint64, vuint64, zigzag_decode, zigzag_encode};

use crate::buffer::Buffer;
use crate::trace::CodecKind;

/// A single byte.
pub fn byte(b: &mut u8, buf: &mut Buffer<'_>) {
    buf.traced(CodecKind::Byte, |buf| {
        if buf.is_writing() {
            buf.write_bytes(&[*b]);
            return;
        }
        match buf.read_byte() {
            Some(v) => *b = v,
            None => {
                *b = 0;
                buf.fail();
            }
        }
    })
}

/// A bool as `0x00` or `0x01`. Any nonzero byte reads as `true`.
pub fn boolean(b: &mut bool, buf: &mut Buffer<'_>) {
    let mut bt = u8::from(*b);
    byte(&mut bt, buf);
    *b = bt != 0;
}

/// A `char` as a zigzag varint of its scalar value.
///
/// Values that are not Unicode scalar values fail the buffer and decode to
/// `'\0'`.
pub fn rune(r: &mut char, buf: &mut Buffer<'_>) {
    let mut n = i64::from(u32::from(*r));
    vint64(&mut n, buf);
    if buf.is_reading() {
        match u32::try_from(n).ok().and_then(char::from_u32) {
            Some(c) => *r = c,
            None => {
                *r = '\0';
                buf.fail();
            }
        }
    }
}

/// Conversion between a type and the integer it is stored as.
///
/// Implement this for fieldless enums to pack them with [`int_enum`].
///
/// ```
/// use vpack::primitives::IntEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Default)]
/// enum Color { #[default] Red = 1, Green = 2 }
///
/// impl IntEnum for Color {
///     fn to_i64(&self) -> i64 { *self as i64 }
///     fn from_i64(n: i64) -> Option<Self> {
///         match n {
///             1 => Some(Color::Red),
///             2 => Some(Color::Green),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait IntEnum: Sized {
    /// Integer stored on the wire.
    fn to_i64(&self) -> i64;

    /// Value for a stored integer, `None` if it names nothing.
    fn from_i64(n: i64) -> Option<Self>;
}

macro_rules! impl_int_enum {
    ($($ty:ty),+) => {
        $(
            impl IntEnum for $ty {
                #[inline]
                fn to_i64(&self) -> i64 {
                    *self as i64
                }

                #[inline]
                fn from_i64(n: i64) -> Option<Self> {
                    <$ty>::try_from(n).ok()
                }
            }
        )+
    };
}

impl_int_enum!(i8, i16, i32, i64, isize);

/// An integer-backed value as a zigzag varint. Unknown discriminants fail
/// the buffer and leave the value untouched.
pub fn int_enum<T: IntEnum>(value: &mut T, buf: &mut Buffer<'_>) {
    let mut n = value.to_i64();
    vint64(&mut n, buf);
    if buf.is_reading() {
        match T::from_i64(n) {
            Some(v) => *value = v,
            None => buf.fail(),
        }
    }
}

/// Pack the highest version this code understands and return the version
/// found.
///
/// Writing stores `max` and returns it. Reading returns the stored version
/// and fails the buffer when it is newer than `max`, so data written by a
/// later schema is never misread.
///
/// ```
/// use vpack::{Buffer, composite, primitives};
///
/// #[derive(Default)]
/// struct Note { title: String, pinned: bool }
///
/// fn pack_note(note: &mut Note, buf: &mut Buffer<'_>) {
///     let v = primitives::version(2, buf);
///     composite::string(&mut note.title, buf);
///     if v >= 2 {
///         primitives::boolean(&mut note.pinned, buf);
///     }
/// }
///
/// let mut note = Note { title: "todo".into(), pinned: true };
/// let bytes = vpack::to_bytes(&mut note, pack_note).unwrap();
/// let back: Note = vpack::from_bytes(&bytes, pack_note).unwrap();
/// assert!(back.pinned);
/// ```
pub fn version(max: i64, buf: &mut Buffer<'_>) -> i64 {
    let mut v = max;
    vint64(&mut v, buf);
    if v > max {
        tracing::trace!(found = v, max, "stored version is newer than supported");
        buf.fail();
    }
    v
}
