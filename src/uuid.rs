//! A 16-byte identifier, packed as its raw bytes.

use core::fmt;
use core::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use snafu::ResultExt;

use crate::buffer::Buffer;
use crate::composite::byte_array;
use crate::error::{Base64Snafu, InvalidSizeSnafu, UuidError};

/// Size of a [`Uuid`] in bytes.
pub const UUID_SIZE: usize = 16;

/// Opaque 16-byte identifier.
///
/// The textual form is URL-safe base64 without padding (22 characters).
/// Equality and ordering are byte-wise.
///
/// ```
/// use vpack::Uuid;
///
/// let id = Uuid::from_bytes([7; 16]);
/// let text = id.to_string();
/// assert_eq!(text, "BwcHBwcHBwcHBwcHBwcHBw");
/// assert_eq!(text.parse::<Uuid>().unwrap(), id);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid([u8; UUID_SIZE]);

impl Uuid {
    /// The all-zero value.
    pub const fn nil() -> Self {
        Uuid([0; UUID_SIZE])
    }

    /// Wrap raw bytes.
    pub const fn from_bytes(bytes: [u8; UUID_SIZE]) -> Self {
        Uuid(bytes)
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; UUID_SIZE] {
        &self.0
    }

    /// True for the all-zero value.
    pub fn is_nil(&self) -> bool {
        self.0 == [0; UUID_SIZE]
    }
}

impl From<[u8; UUID_SIZE]> for Uuid {
    fn from(bytes: [u8; UUID_SIZE]) -> Self {
        Uuid(bytes)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&URL_SAFE_NO_PAD.encode(self.0))
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({self})")
    }
}

impl FromStr for Uuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, UuidError> {
        let raw = URL_SAFE_NO_PAD.decode(s).context(Base64Snafu)?;
        let bytes: [u8; UUID_SIZE] = raw
            .as_slice()
            .try_into()
            .map_err(|_| InvalidSizeSnafu { len: raw.len() }.build())?;
        Ok(Uuid(bytes))
    }
}

/// Pack a [`Uuid`] as exactly 16 raw bytes.
pub fn uuid(id: &mut Uuid, buf: &mut Buffer<'_>) {
    byte_array(&mut id.0, buf);
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::{Serialize, Serializer};

    use super::Uuid;

    impl Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    // `null` and `""` both mean the nil value.
    impl<'de> Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(Uuid::nil()),
                Some(s) if s.is_empty() => Ok(Uuid::nil()),
                Some(s) => s.parse().map_err(de::Error::custom),
            }
        }
    }
}
