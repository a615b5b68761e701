//! Timestamp codecs for `chrono::DateTime<Utc>`.
//!
//! Only the instant survives a round trip. The `unix_*` codecs also drop
//! precision below their resolution; [`time`] keeps nanoseconds.

use chrono::{DateTime, Utc};
use zerocopy::byteorder::big_endian::{I64, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::buffer::Buffer;
use crate::composite::{BinaryMarshal, binary};
use crate::error::{InvalidDataSnafu, InvalidLengthSnafu, MarshalError};
use crate::primitives::{fixed_i64, vint64};

/// Length of the [`BinaryMarshal`] payload of a `DateTime<Utc>`.
pub const TIME_BINARY_LEN: usize = core::mem::size_of::<WireTime>();

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct WireTime {
    seconds: I64,
    nanos: U32,
}

impl BinaryMarshal for DateTime<Utc> {
    type Error = MarshalError;

    fn marshal_binary(&self) -> Result<Vec<u8>, MarshalError> {
        let wire = WireTime {
            seconds: I64::new(self.timestamp()),
            nanos: U32::new(self.timestamp_subsec_nanos()),
        };
        Ok(wire.as_bytes().to_vec())
    }

    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), MarshalError> {
        let Ok(wire) = WireTime::read_from_bytes(data) else {
            return InvalidLengthSnafu {
                expected: TIME_BINARY_LEN,
                actual: data.len(),
            }
            .fail();
        };
        *self = DateTime::from_timestamp(wire.seconds.get(), wire.nanos.get()).ok_or_else(|| {
            InvalidDataSnafu {
                message: "timestamp out of range",
            }
            .build()
        })?;
        Ok(())
    }
}

fn assign(t: &mut DateTime<Utc>, decoded: Option<DateTime<Utc>>, buf: &mut Buffer<'_>) {
    match decoded {
        Some(v) => *t = v,
        None => {
            *t = DateTime::default();
            buf.fail();
        }
    }
}

// Shared body of the four unix codecs: pick the integer, pack it, rebuild.
fn unix_codec(
    t: &mut DateTime<Utc>,
    buf: &mut Buffer<'_>,
    to_int: fn(&DateTime<Utc>) -> i64,
    codec: fn(&mut i64, &mut Buffer<'_>),
    from_int: fn(i64) -> Option<DateTime<Utc>>,
) {
    let mut n = if buf.is_writing() { to_int(t) } else { 0 };
    codec(&mut n, buf);
    if buf.is_reading() {
        assign(t, from_int(n), buf);
    }
}

fn from_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Whole seconds since the epoch as a zigzag varint.
///
/// A present-day timestamp takes 5 bytes. Sub-second precision is dropped.
pub fn unix_time(t: &mut DateTime<Utc>, buf: &mut Buffer<'_>) {
    unix_codec(t, buf, DateTime::timestamp, vint64, from_seconds);
}

/// Whole seconds since the epoch as 8 big-endian bytes, so encoded keys
/// iterate in time order (for instants after the epoch).
pub fn unix_time_key(t: &mut DateTime<Utc>, buf: &mut Buffer<'_>) {
    unix_codec(t, buf, DateTime::timestamp, fixed_i64, from_seconds);
}

/// Milliseconds since the epoch as a zigzag varint.
pub fn unix_time_milli(t: &mut DateTime<Utc>, buf: &mut Buffer<'_>) {
    unix_codec(t, buf, DateTime::timestamp_millis, vint64, DateTime::from_timestamp_millis);
}

/// Milliseconds since the epoch as 8 big-endian bytes.
pub fn unix_time_milli_key(t: &mut DateTime<Utc>, buf: &mut Buffer<'_>) {
    unix_codec(t, buf, DateTime::timestamp_millis, fixed_i64, DateTime::from_timestamp_millis);
}

/// The full instant, nanoseconds included, through [`BinaryMarshal`].
pub fn time(t: &mut DateTime<Utc>, buf: &mut Buffer<'_>) {
    binary(t, buf);
}
