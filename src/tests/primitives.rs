use crate::primitives::{
    self, IntEnum, boolean, byte, fixed_i16, fixed_i32, fixed_i64, fixed_int, fixed_u16, fixed_u32, fixed_u64,
    float32, float64, int, int_enum, rune, uint, uvarint_len, vint64, vuint64, zigzag_decode, zigzag_encode,
};
use crate::{Buffer, PackError, from_bytes, to_bytes};

fn roundtrip<T, F>(mut value: T, f: F) -> (Vec<u8>, T)
where
    T: Default,
    F: Fn(&mut T, &mut Buffer<'_>) + Copy,
{
    let bytes = to_bytes(&mut value, f).unwrap();
    let decoded = from_bytes(&bytes, f).unwrap();
    (bytes, decoded)
}

// =============================================================================
// Varint
// =============================================================================

#[test]
fn test_uvarint_known_encodings() {
    let cases: &[(u64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x01]),
        (300, &[0xac, 0x02]),
        (16383, &[0xff, 0x7f]),
        (16384, &[0x80, 0x80, 0x01]),
    ];
    for &(value, expected) in cases {
        let (bytes, decoded) = roundtrip(value, vuint64);
        assert_eq!(bytes, expected, "encoding of {value}");
        assert_eq!(decoded, value);
    }
}

#[test]
fn test_uvarint_max_is_ten_bytes() {
    let (bytes, decoded) = roundtrip(u64::MAX, vuint64);
    assert_eq!(bytes.len(), 10);
    assert_eq!(bytes[9], 0x01);
    assert_eq!(decoded, u64::MAX);
}

#[test]
fn test_uvarint_lengths_are_minimal() {
    for shift in 0..64 {
        let value = 1u64 << shift;
        let (bytes, _) = roundtrip(value, vuint64);
        assert_eq!(bytes.len(), uvarint_len(value), "value {value}");
        assert_eq!(bytes.len(), shift / 7 + 1, "value {value}");
        assert_eq!(bytes.last().copied().unwrap_or(0) & 0x80, 0);
    }
}

#[test]
fn test_varint_signed_boundaries() {
    let cases: &[(i64, &[u8])] = &[
        (0, &[0x00]),
        (-1, &[0x01]),
        (1, &[0x02]),
        (-64, &[0x7f]),
        (64, &[0x80, 0x01]),
    ];
    for &(value, expected) in cases {
        let (bytes, decoded) = roundtrip(value, vint64);
        assert_eq!(bytes, expected, "encoding of {value}");
        assert_eq!(decoded, value);
    }
    for value in [i64::MIN, i64::MAX, i64::MIN + 1, i64::MAX - 1] {
        let (bytes, decoded) = roundtrip(value, vint64);
        assert_eq!(bytes.len(), 10);
        assert_eq!(decoded, value);
    }
}

#[test]
fn test_zigzag_mapping() {
    assert_eq!(zigzag_encode(0), 0);
    assert_eq!(zigzag_encode(-1), 1);
    assert_eq!(zigzag_encode(1), 2);
    assert_eq!(zigzag_encode(-2), 3);
    assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
    assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
    assert_eq!(zigzag_decode(u64::MAX), i64::MIN);
}

#[test]
fn test_uvarint_missing_terminator_fails() {
    let err = from_bytes::<u64, _>(&[0x80, 0x80], vuint64).unwrap_err();
    assert_eq!(err, PackError::Decode { position: 2, len: 2 });
}

#[test]
fn test_uvarint_empty_input_fails() {
    assert!(from_bytes::<u64, _>(&[], vuint64).is_err());
    assert!(from_bytes::<i64, _>(&[], vint64).is_err());
}

#[test]
fn test_uvarint_overflow_fails() {
    // Eleven bytes.
    let too_long = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
    assert!(from_bytes::<u64, _>(&too_long, vuint64).is_err());

    // Ten bytes, but the last carries more than the one remaining bit.
    let wide = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
    assert!(from_bytes::<u64, _>(&wide, vuint64).is_err());
}

#[test]
fn test_uint_and_int_roundtrip() {
    assert_eq!(roundtrip(usize::MAX, uint).1, usize::MAX);
    assert_eq!(roundtrip(isize::MIN, int).1, isize::MIN);
    assert_eq!(roundtrip(-5isize, int).0, [0x09]);
}

// =============================================================================
// Fixed width
// =============================================================================

#[test]
fn test_fixed_u64_is_big_endian() {
    let (bytes, decoded) = roundtrip(0x0102_0304_0506_0708u64, fixed_u64);
    assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(decoded, 0x0102_0304_0506_0708);
}

// The 32- and 16-bit codecs must read the width they write.
#[test]
fn test_fixed_u32_reads_four_bytes() {
    let (bytes, decoded) = roundtrip(0xdead_beefu32, fixed_u32);
    assert_eq!(bytes, [0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(decoded, 0xdead_beef);

    let mut buf = Buffer::reader(&[0, 0, 1, 0, 0xaa]);
    let mut n = 0u32;
    fixed_u32(&mut n, &mut buf);
    assert_eq!(n, 256);
    assert_eq!(buf.position(), 4);
}

#[test]
fn test_fixed_u16_reads_two_bytes() {
    let (bytes, decoded) = roundtrip(0xbeefu16, fixed_u16);
    assert_eq!(bytes, [0xbe, 0xef]);
    assert_eq!(decoded, 0xbeef);

    let mut buf = Buffer::reader(&[1, 2, 3]);
    let mut n = 0u16;
    fixed_u16(&mut n, &mut buf);
    assert_eq!(n, 0x0102);
    assert_eq!(buf.position(), 2);
}

#[test]
fn test_fixed_consecutive_fields_stay_aligned() {
    #[derive(Default, Debug, PartialEq)]
    struct Key {
        a: u32,
        b: u16,
        c: u64,
    }
    fn pack(k: &mut Key, buf: &mut Buffer<'_>) {
        fixed_u32(&mut k.a, buf);
        fixed_u16(&mut k.b, buf);
        fixed_u64(&mut k.c, buf);
    }
    let (bytes, decoded) = roundtrip(Key { a: 7, b: 9, c: 11 }, pack);
    assert_eq!(bytes.len(), 14);
    assert_eq!(decoded, Key { a: 7, b: 9, c: 11 });
}

#[test]
fn test_fixed_signed_reinterpretation() {
    assert_eq!(roundtrip(-1i64, fixed_i64).0, [0xff; 8]);
    assert_eq!(roundtrip(-2i32, fixed_i32), (vec![0xff, 0xff, 0xff, 0xfe], -2));
    assert_eq!(roundtrip(i16::MIN, fixed_i16), (vec![0x80, 0x00], i16::MIN));
    assert_eq!(roundtrip(-3isize, fixed_int).1, -3);
}

#[test]
fn test_fixed_unsigned_sorts_like_numbers() {
    let mut encoded: Vec<Vec<u8>> = [5u64, 256, 1, 70_000, 0]
        .into_iter()
        .map(|mut n| to_bytes(&mut n, fixed_u64).unwrap())
        .collect();
    encoded.sort();
    let decoded: Vec<u64> = encoded.iter().map(|b| from_bytes(b, fixed_u64).unwrap()).collect();
    assert_eq!(decoded, [0, 1, 5, 256, 70_000]);
}

#[test]
fn test_fixed_truncated_fails() {
    assert!(from_bytes::<u64, _>(&[0; 7], fixed_u64).is_err());
    assert!(from_bytes::<u32, _>(&[0; 3], fixed_u32).is_err());
    assert!(from_bytes::<u16, _>(&[0; 1], fixed_u16).is_err());
}

#[test]
fn test_floats_roundtrip_bit_exact() {
    for value in [0.0f64, -0.0, 1.5, f64::MAX, f64::MIN_POSITIVE, f64::INFINITY] {
        let (bytes, decoded) = roundtrip(value, float64);
        assert_eq!(bytes, value.to_bits().to_be_bytes());
        assert_eq!(decoded.to_bits(), value.to_bits());
    }
    let (_, nan) = roundtrip(f64::NAN, float64);
    assert!(nan.is_nan());
    assert_eq!(roundtrip(2.5f32, float32), (vec![0x40, 0x20, 0, 0], 2.5));
}

// =============================================================================
// Byte, bool, rune, enums
// =============================================================================

#[test]
fn test_byte_and_bool() {
    assert_eq!(roundtrip(0xabu8, byte), (vec![0xab], 0xab));
    assert_eq!(roundtrip(true, boolean), (vec![1], true));
    assert_eq!(roundtrip(false, boolean), (vec![0], false));
    assert!(from_bytes::<bool, _>(&[0x7f], boolean).unwrap());
    assert!(from_bytes::<u8, _>(&[], byte).is_err());
}

#[test]
fn test_rune_roundtrip() {
    for c in ['a', '\0', 'é', '🦀', char::MAX] {
        assert_eq!(roundtrip(c, rune).1, c);
    }
    assert_eq!(roundtrip('a', rune).0, [0xc2, 0x01]);
}

#[test]
fn test_rune_rejects_surrogates_and_negatives() {
    for mut n in [0xd800i64, -1, 0x11_0000] {
        let bytes = to_bytes(&mut n, vint64).unwrap();
        assert!(from_bytes::<char, _>(&bytes, rune).is_err(), "{n}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Level {
    #[default]
    Low = 1,
    High = 5,
}

impl IntEnum for Level {
    fn to_i64(&self) -> i64 {
        *self as i64
    }

    fn from_i64(n: i64) -> Option<Self> {
        match n {
            1 => Some(Level::Low),
            5 => Some(Level::High),
            _ => None,
        }
    }
}

#[test]
fn test_int_enum_roundtrip() {
    let (bytes, decoded) = roundtrip(Level::High, int_enum);
    assert_eq!(bytes, [10]);
    assert_eq!(decoded, Level::High);
}

#[test]
fn test_int_enum_unknown_discriminant_fails() {
    let mut n = 3i64;
    let bytes = to_bytes(&mut n, vint64).unwrap();
    assert!(from_bytes::<Level, _>(&bytes, int_enum).is_err());
}

#[test]
fn test_int_enum_builtin_integers() {
    assert_eq!(roundtrip(-7i32, int_enum::<i32>).1, -7);
    let mut big = i64::from(i32::MAX) + 1;
    let bytes = to_bytes(&mut big, vint64).unwrap();
    assert!(from_bytes::<i32, _>(&bytes, int_enum::<i32>).is_err());
}

// =============================================================================
// Version guard
// =============================================================================

#[test]
fn test_version_guard_writes_max() {
    let mut buf = Buffer::writer();
    assert_eq!(primitives::version(3, &mut buf), 3);
    assert_eq!(buf.into_bytes(), [6]);
}

#[test]
fn test_version_guard_accepts_older() {
    let mut buf = Buffer::reader(&[2]);
    assert_eq!(primitives::version(3, &mut buf), 1);
    assert!(!buf.has_failed());
}

#[test]
fn test_version_guard_rejects_newer() {
    let mut buf = Buffer::reader(&[8]);
    assert_eq!(primitives::version(3, &mut buf), 4);
    assert!(buf.has_failed());
}
