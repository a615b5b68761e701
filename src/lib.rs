//! Bidirectional binary packing.
//!
//! One traversal function per type serves as both encoder and decoder. It
//! lists the type's fields in order, calling a codec for each; the
//! [`Buffer`] it is handed decides whether those codecs write or read.
//! Because the same code runs both ways, fields are always read back in the
//! order they were written.
//!
//! # Example
//!
//! ```
//! use vpack::{Buffer, composite, primitives};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Entry {
//!     id: i64,
//!     key: String,
//!     tags: Vec<String>,
//!     done: bool,
//! }
//!
//! fn pack_entry(e: &mut Entry, buf: &mut Buffer<'_>) {
//!     primitives::vint64(&mut e.id, buf);
//!     composite::string_z(&mut e.key, buf);
//!     composite::slice(&mut e.tags, composite::string, buf);
//!     primitives::boolean(&mut e.done, buf);
//! }
//!
//! let mut entry = Entry {
//!     id: 42,
//!     key: "inbox".into(),
//!     tags: vec!["a".into(), "b".into()],
//!     done: true,
//! };
//! let bytes = vpack::to_bytes(&mut entry, pack_entry).unwrap();
//! let back: Entry = vpack::from_bytes(&bytes, pack_entry).unwrap();
//! assert_eq!(back, entry);
//!
//! // Any truncation is reported, never silently decoded.
//! assert!(vpack::from_bytes::<Entry, _>(&bytes[..bytes.len() - 1], pack_entry).is_err());
//! ```
//!
//! # Errors
//!
//! Codecs never panic on bad input. They set a sticky failure flag on the
//! buffer and carry on with zero values; [`to_bytes`], [`from_bytes`] and
//! [`from_bytes_into`] turn the flag into a result.
//!
//! # Versioning
//!
//! See [`versioned`] for evolving a type's layout while still reading old
//! data, and [`primitives::version`] for a simpler guard.

#![warn(missing_docs)]

extern crate self as vpack;

mod buffer;
pub mod composite;
mod entry;
mod error;
mod pack;
pub mod primitives;
pub mod time;
mod trace;
mod uuid;
mod version;

#[cfg(test)]
mod tests;

pub use buffer::{Buffer, DEFAULT_CAPACITY, Mode};
pub use composite::BinaryMarshal;
pub use entry::{decode, encode, from_bytes, from_bytes_into, to_bytes};
pub use error::{MarshalError, PackError, Result, UuidError};
pub use pack::Pack;
pub use trace::{Asymmetry, CodecCall, CodecKind, check_symmetry};
pub use uuid::{UUID_SIZE, Uuid, uuid};
pub use version::{PackFn, versioned};

/// Derive [`Pack`] for a struct, packing fields in declaration order.
///
/// `#[vpack(with = "path")]` packs a field with a codec function instead of
/// its own `Pack` impl; `#[vpack(skip)]` leaves a field out.
///
/// ```
/// use vpack::Pack;
/// use chrono::{DateTime, Utc};
///
/// #[derive(Pack, Debug, Default, PartialEq)]
/// struct Event {
///     #[vpack(with = "vpack::composite::string_z")]
///     name: String,
///     #[vpack(with = "vpack::time::unix_time")]
///     at: DateTime<Utc>,
///     #[vpack(skip)]
///     cached: Option<u32>,
/// }
///
/// let mut ev = Event { name: "boot".into(), at: DateTime::from_timestamp(60, 0).unwrap(), cached: None };
/// let bytes = vpack::encode(&mut ev).unwrap();
/// assert_eq!(vpack::decode::<Event>(&bytes).unwrap(), ev);
/// ```
#[cfg(feature = "derive")]
pub use vpack_macros::Pack;
