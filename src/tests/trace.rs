use crate::composite::{slice, string, string_z};
use crate::primitives::{boolean, vint64};
use crate::trace::{Asymmetry, CodecCall, CodecKind};
use crate::{Buffer, check_symmetry};

#[derive(Default)]
struct Row {
    id: i64,
    name: String,
    tags: Vec<String>,
    live: bool,
}

fn pack_row(row: &mut Row, buf: &mut Buffer<'_>) {
    vint64(&mut row.id, buf);
    string_z(&mut row.name, buf);
    slice(&mut row.tags, string, buf);
    boolean(&mut row.live, buf);
}

// Leaves an untraced byte behind that the read side never consumes.
fn lopsided(row: &mut Row, buf: &mut Buffer<'_>) {
    vint64(&mut row.id, buf);
    buf.write_bytes(&[0]);
}

// Reads a bool where a varint was written.
fn mismatched(row: &mut Row, buf: &mut Buffer<'_>) {
    if buf.is_writing() {
        vint64(&mut row.id, buf);
    } else {
        boolean(&mut row.live, buf);
    }
}

fn sample() -> Row {
    Row {
        id: -42,
        name: "row".into(),
        tags: vec!["a".into(), "bc".into()],
        live: true,
    }
}

#[test]
fn test_symmetric_traversal_passes() {
    assert_eq!(check_symmetry(&mut sample(), pack_row), Ok(()));
}

#[test]
fn test_trace_records_leaf_calls() {
    let mut buf = Buffer::writer();
    buf.enable_trace();
    pack_row(&mut sample(), &mut buf);
    let calls = buf.take_trace();
    let kinds: Vec<CodecKind> = calls.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [
            CodecKind::Varint,
            CodecKind::Terminated,
            CodecKind::Uvarint,
            CodecKind::Uvarint,
            CodecKind::Raw,
            CodecKind::Uvarint,
            CodecKind::Raw,
            CodecKind::Byte,
        ]
    );
    assert_eq!(calls[1], CodecCall { kind: CodecKind::Terminated, bytes: 4 });
}

#[test]
fn test_trailing_bytes_detected() {
    let err = check_symmetry(&mut sample(), lopsided).unwrap_err();
    assert_eq!(err, Asymmetry::TrailingBytes { remaining: 1 });
}

#[test]
fn test_mismatch_detected() {
    let err = check_symmetry(&mut sample(), mismatched).unwrap_err();
    match err {
        Asymmetry::Mismatch { index, written, read } => {
            assert_eq!(index, 0);
            assert_eq!(written.map(|c| c.kind), Some(CodecKind::Varint));
            assert_eq!(read.map(|c| c.kind), Some(CodecKind::Byte));
        }
        other => panic!("expected mismatch, got {other}"),
    }
}

#[test]
fn test_encode_failure_reported() {
    let err = check_symmetry(&mut sample(), |row: &mut Row, buf: &mut Buffer<'_>| {
        vint64(&mut row.id, buf);
        buf.fail();
    });
    assert_eq!(err, Err(Asymmetry::EncodeFailed));
}
