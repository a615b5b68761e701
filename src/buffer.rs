//! The mode-tagged byte buffer threaded through every traversal.

use std::borrow::Cow;

use crate::trace::{CodecCall, CodecKind};

/// Initial capacity of a writing buffer.
pub const DEFAULT_CAPACITY: usize = 64;

/// Direction of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Codecs append the value's bytes.
    Writing,
    /// Codecs consume bytes and assign through the value reference.
    Reading,
}

#[derive(Debug)]
enum Data<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a [u8]),
}

/// Byte buffer that a traversal either writes into or reads from.
///
/// A writing buffer owns its bytes. A reading buffer borrows the caller's
/// bytes for its whole lifetime and never mutates them.
///
/// Failure is sticky: once [`fail`](Self::fail) has been called, by a codec
/// that ran out of input or found something malformed, the flag stays set.
/// Reads keep returning zero or padded values and writes keep appending, so
/// traversal code never has to branch on it. The entry points inspect the
/// flag once the traversal returns.
///
/// # Example
///
/// ```
/// use vpack::{Buffer, primitives};
///
/// let mut writer = Buffer::writer();
/// let mut n = 300u64;
/// primitives::vuint64(&mut n, &mut writer);
/// let bytes = writer.into_bytes();
/// assert_eq!(bytes, [0xac, 0x02]);
///
/// let mut reader = Buffer::reader(&bytes);
/// let mut m = 0u64;
/// primitives::vuint64(&mut m, &mut reader);
/// assert_eq!(m, 300);
/// assert!(reader.is_exhausted());
/// ```
#[derive(Debug)]
pub struct Buffer<'a> {
    data: Data<'a>,
    pos: usize,
    failed: bool,
    trace: Option<Vec<CodecCall>>,
}

impl Buffer<'static> {
    /// Create a buffer for serializing into.
    pub fn writer() -> Self {
        Self::writer_with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a writing buffer with a specific initial capacity.
    pub fn writer_with_capacity(capacity: usize) -> Self {
        Self {
            data: Data::Owned(Vec::with_capacity(capacity)),
            pos: 0,
            failed: false,
            trace: None,
        }
    }
}

impl<'a> Buffer<'a> {
    /// Create a buffer for deserializing from `data`. The caller keeps
    /// ownership.
    pub fn reader(data: &'a [u8]) -> Self {
        Self {
            data: Data::Borrowed(data),
            pos: 0,
            failed: false,
            trace: None,
        }
    }

    /// Current direction.
    #[inline]
    pub fn mode(&self) -> Mode {
        match self.data {
            Data::Owned(_) => Mode::Writing,
            Data::Borrowed(_) => Mode::Reading,
        }
    }

    /// True when serializing.
    #[inline]
    pub fn is_writing(&self) -> bool {
        matches!(self.data, Data::Owned(_))
    }

    /// True when deserializing.
    #[inline]
    pub fn is_reading(&self) -> bool {
        matches!(self.data, Data::Borrowed(_))
    }

    /// Mark the traversal as failed. Cannot be undone.
    #[inline]
    pub fn fail(&mut self) {
        self.failed = true;
    }

    /// True once any codec has failed.
    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Read cursor. Always 0 while writing.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read. Always 0 while writing.
    #[inline]
    pub fn remaining(&self) -> usize {
        match self.data {
            Data::Owned(_) => 0,
            Data::Borrowed(data) => data.len() - self.pos,
        }
    }

    /// True when the cursor has reached the end of the input.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes written so far, or the whole input when reading.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            Data::Owned(data) => data,
            Data::Borrowed(data) => data,
        }
    }

    /// Consume the buffer and return the written bytes.
    ///
    /// A reading buffer returns a copy of the unread tail.
    pub fn into_bytes(self) -> Vec<u8> {
        match self.data {
            Data::Owned(data) => data,
            Data::Borrowed(data) => data[self.pos..].to_vec(),
        }
    }

    /// Grow the written data by `n` zeroed bytes and return them for the
    /// caller to fill in place. Returns an empty slice when reading.
    pub fn ensure_space(&mut self, n: usize) -> &mut [u8] {
        match &mut self.data {
            Data::Owned(data) => {
                let start = data.len();
                data.resize(start + n, 0);
                &mut data[start..]
            }
            Data::Borrowed(_) => &mut [],
        }
    }

    /// Append bytes. Ignored when reading.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if let Data::Owned(data) = &mut self.data {
            data.extend_from_slice(bytes);
        }
    }

    /// Next byte, advancing the cursor. `None` at the end of input or when
    /// writing; the failure flag is left to the caller.
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        match self.data {
            Data::Borrowed(data) => {
                let byte = *data.get(self.pos)?;
                self.pos += 1;
                Some(byte)
            }
            Data::Owned(_) => None,
        }
    }

    /// Next `n` bytes, advancing the cursor.
    ///
    /// The happy path borrows from the input. When fewer than `n` bytes
    /// remain the buffer fails, the cursor moves to the end, and the result
    /// is the remaining bytes padded with zeros up to `n`. That padding is
    /// never valid data.
    pub fn read_bytes(&mut self, n: usize) -> Cow<'a, [u8]> {
        let data = match self.data {
            Data::Borrowed(data) => data,
            Data::Owned(_) => {
                self.failed = true;
                return Cow::Owned(vec![0; n]);
            }
        };
        let available = data.len() - self.pos;
        if n > available {
            let mut padded = vec![0; n];
            padded[..available].copy_from_slice(&data[self.pos..]);
            self.pos = data.len();
            self.failed = true;
            return Cow::Owned(padded);
        }
        let start = self.pos;
        self.pos += n;
        Cow::Borrowed(&data[start..self.pos])
    }

    /// Scan forward to the next zero byte, returning the bytes before it and
    /// moving the cursor past it. Without a terminator the rest of the input
    /// is returned, the cursor moves to the end, and the buffer fails.
    pub(crate) fn read_until_zero(&mut self) -> &'a [u8] {
        let data = match self.data {
            Data::Borrowed(data) => data,
            Data::Owned(_) => {
                self.failed = true;
                return &[];
            }
        };
        let rest = &data[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(end) => {
                self.pos += end + 1;
                &rest[..end]
            }
            None => {
                self.pos = data.len();
                self.failed = true;
                rest
            }
        }
    }

    /// Start recording one [`CodecCall`] per leaf codec invocation.
    pub fn enable_trace(&mut self) {
        self.trace.get_or_insert_with(Vec::new);
    }

    /// Take the recorded calls, leaving tracing enabled with an empty log.
    pub fn take_trace(&mut self) -> Vec<CodecCall> {
        self.trace.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Run a leaf codec, recording its kind and byte count when tracing.
    #[inline]
    pub(crate) fn traced<R>(&mut self, kind: CodecKind, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.trace.is_none() {
            return f(self);
        }
        let before = self.cursor();
        let out = f(self);
        let bytes = self.cursor() - before;
        if let Some(trace) = self.trace.as_mut() {
            trace.push(CodecCall { kind, bytes });
        }
        out
    }

    // Bytes written when writing, bytes consumed when reading.
    fn cursor(&self) -> usize {
        match &self.data {
            Data::Owned(data) => data.len(),
            Data::Borrowed(_) => self.pos,
        }
    }
}

impl Default for Buffer<'static> {
    fn default() -> Self {
        Self::writer()
    }
}
