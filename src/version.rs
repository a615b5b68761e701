//! Version dispatch for schema evolution.
//!
//! A versioned type keeps one traversal function per historical schema.
//! Writing always uses the newest; reading picks whichever the stored tag
//! names. Old functions must keep reading exactly the fields their schema
//! had, in the same order: a field that has since been removed is read into
//! a local, and any migration happens after the reads.
//!
//! ```
//! use vpack::{Buffer, PackFn, primitives, composite, versioned};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Item { unit: i64, price: i64, name: String }
//!
//! // v1 stored `energy` where v2 stores `price`.
//! fn item_v1(item: &mut Item, buf: &mut Buffer<'_>) {
//!     let mut energy = 0i64;
//!     primitives::vint64(&mut item.unit, buf);
//!     primitives::vint64(&mut energy, buf);
//!     composite::string(&mut item.name, buf);
//!     item.price = energy * item.unit;
//! }
//!
//! fn item_v2(item: &mut Item, buf: &mut Buffer<'_>) {
//!     primitives::vint64(&mut item.unit, buf);
//!     primitives::vint64(&mut item.price, buf);
//!     composite::string(&mut item.name, buf);
//! }
//!
//! const ITEM_VERSIONS: &[PackFn<Item>] = &[item_v1, item_v2];
//!
//! fn pack_item(item: &mut Item, buf: &mut Buffer<'_>) {
//!     versioned(item, buf, ITEM_VERSIONS);
//! }
//!
//! // Bytes as the v1 code base wrote them: tag 1, unit 3, energy 7, name "x".
//! let mut writer = Buffer::writer();
//! let (mut tag, mut unit, mut energy) = (1i64, 3i64, 7i64);
//! let mut name = String::from("x");
//! primitives::vint64(&mut tag, &mut writer);
//! primitives::vint64(&mut unit, &mut writer);
//! primitives::vint64(&mut energy, &mut writer);
//! composite::string(&mut name, &mut writer);
//! let old = writer.into_bytes();
//!
//! let item: Item = vpack::from_bytes(&old, pack_item).unwrap();
//! assert_eq!(item.price, 21);
//! ```

use crate::buffer::Buffer;
use crate::primitives::vint64;

/// A traversal function stored by value, as in a version list.
pub type PackFn<T> = fn(&mut T, &mut Buffer<'_>);

/// Pack `item` with one of `versions`, preceded by the version tag.
///
/// Writing stores `versions.len()` as a zigzag varint and runs the last
/// function. Reading runs `versions[tag - 1]`; a tag outside `1..=len`
/// fails the buffer and nothing more is read.
pub fn versioned<T>(item: &mut T, buf: &mut Buffer<'_>, versions: &[PackFn<T>]) {
    debug_assert!(!versions.is_empty(), "versioned called with no versions");
    let latest = versions.len() as i64;
    let mut tag = latest;
    vint64(&mut tag, buf);

    let selected = usize::try_from(tag)
        .ok()
        .and_then(|tag| tag.checked_sub(1))
        .and_then(|index| versions.get(index));
    match selected {
        Some(f) => f(item, buf),
        None => {
            tracing::trace!(tag, latest, "version tag out of range");
            buf.fail();
        }
    }
}
