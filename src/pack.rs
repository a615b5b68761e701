//! Default traversal per type.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use chrono::{DateTime, Utc};

use crate::buffer::Buffer;
use crate::composite::{btree_map, byte_array, map, slice, string};
use crate::primitives::{boolean, byte, float32, float64, int, rune, uint, vint64, vuint64};
use crate::time::time;
use crate::uuid::{Uuid, uuid};

/// A type with a default traversal function.
///
/// Implemented for primitives, strings, vectors, maps, [`Uuid`] and
/// `DateTime<Utc>`. Structs get it from `#[derive(Pack)]`, which packs
/// fields in declaration order.
///
/// # Example
///
/// ```
/// use vpack::{Buffer, Pack, primitives};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Version { major: u64, minor: u64, key: u64 }
///
/// impl Pack for Version {
///     fn pack(&mut self, buf: &mut Buffer<'_>) {
///         self.major.pack(buf);
///         self.minor.pack(buf);
///         primitives::fixed_u64(&mut self.key, buf);
///     }
/// }
///
/// let mut v = Version { major: 1, minor: 2, key: 3 };
/// let bytes = vpack::encode(&mut v).unwrap();
/// assert_eq!(bytes.len(), 10);
/// assert_eq!(vpack::decode::<Version>(&bytes).unwrap(), v);
/// ```
pub trait Pack {
    /// Write `self` into, or read `self` from, `buf` depending on its mode.
    fn pack(&mut self, buf: &mut Buffer<'_>);
}

macro_rules! pack_with {
    ($($ty:ty => $codec:path),+ $(,)?) => {
        $(
            impl Pack for $ty {
                #[inline]
                fn pack(&mut self, buf: &mut Buffer<'_>) {
                    $codec(self, buf)
                }
            }
        )+
    };
}

pack_with! {
    u8 => byte,
    bool => boolean,
    char => rune,
    u64 => vuint64,
    i64 => vint64,
    usize => uint,
    isize => int,
    f32 => float32,
    f64 => float64,
    String => string,
    Uuid => uuid,
    DateTime<Utc> => time,
}

// Narrow integers travel as 64-bit varints; values that do not fit fail.
macro_rules! pack_narrow {
    ($($ty:ty => $codec:ident($wide:ty)),+ $(,)?) => {
        $(
            impl Pack for $ty {
                fn pack(&mut self, buf: &mut Buffer<'_>) {
                    let mut wide = <$wide>::from(*self);
                    $codec(&mut wide, buf);
                    match <$ty>::try_from(wide) {
                        Ok(v) => *self = v,
                        Err(_) => {
                            *self = 0;
                            buf.fail();
                        }
                    }
                }
            }
        )+
    };
}

pack_narrow! {
    u16 => vuint64(u64),
    u32 => vuint64(u64),
    i8 => vint64(i64),
    i16 => vint64(i64),
    i32 => vint64(i64),
}

impl<T: Pack + Default> Pack for Vec<T> {
    fn pack(&mut self, buf: &mut Buffer<'_>) {
        slice(self, T::pack, buf);
    }
}

impl<K, V, S> Pack for HashMap<K, V, S>
where
    K: Pack + Eq + Hash + Clone + Default,
    V: Pack + Default,
    S: BuildHasher,
{
    fn pack(&mut self, buf: &mut Buffer<'_>) {
        map(self, K::pack, V::pack, buf);
    }
}

impl<K, V> Pack for BTreeMap<K, V>
where
    K: Pack + Ord + Clone + Default,
    V: Pack + Default,
{
    fn pack(&mut self, buf: &mut Buffer<'_>) {
        btree_map(self, K::pack, V::pack, buf);
    }
}

impl<const N: usize> Pack for [u8; N] {
    fn pack(&mut self, buf: &mut Buffer<'_>) {
        byte_array(self, buf);
    }
}

impl<T: Pack + ?Sized> Pack for Box<T> {
    fn pack(&mut self, buf: &mut Buffer<'_>) {
        (**self).pack(buf);
    }
}
