// Sequential reader over an in-memory tokenized program.
//
// GW-BASIC saves are small (64 KiB address space), so the whole file is
// held in memory and read through a position-tracking cursor.  Reads past
// the end of the buffer never fail: integer reads yield 0 and fixed-size
// array reads are zero-padded, matching how the interpreter's own loader
// tolerates short files.  A sticky `truncated` flag records that any such
// clamped read happened.

/// Position-tracking reader over a byte buffer.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    src: &'a [u8],
    idx: usize,
    truncated: bool,
}

impl<'a> ByteCursor<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            idx: 0,
            truncated: false,
        }
    }

    /// Current read position (never exceeds the buffer length).
    #[inline]
    pub fn position(&self) -> usize {
        self.idx
    }

    /// True once the cursor has consumed the whole buffer.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.idx >= self.src.len()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.src.len() - self.idx
    }

    /// True if any read so far was clamped at the end of the buffer.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Rewind to the start of the buffer.  The `truncated` flag is kept.
    pub fn reset(&mut self) {
        self.idx = 0;
    }

    /// Advance without reading.  Clamps at the end of the buffer.
    pub fn skip(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.src.len());
    }

    /// Non-consuming test of the next byte.
    #[inline]
    pub fn peek(&self, val: u8) -> bool {
        self.src.get(self.idx) == Some(&val)
    }

    /// Non-consuming test of the next two bytes.
    #[inline]
    pub fn peek2(&self, v1: u8, v2: u8) -> bool {
        self.remaining() >= 2 && self.src[self.idx] == v1 && self.src[self.idx + 1] == v2
    }

    /// Read one byte; 0 past the end.
    #[inline]
    pub fn read_u8(&mut self) -> u8 {
        match self.src.get(self.idx) {
            Some(&b) => {
                self.idx += 1;
                b
            }
            None => {
                self.truncated = true;
                0
            }
        }
    }

    /// Read a little-endian u16; 0 if fewer than two bytes remain.
    #[inline]
    pub fn read_u16(&mut self) -> u16 {
        if self.remaining() < 2 {
            self.truncated = true;
            return 0;
        }
        let b0 = self.src[self.idx];
        let b1 = self.src[self.idx + 1];
        self.idx += 2;
        u16::from(b0) | (u16::from(b1) << 8)
    }

    /// Read a little-endian i16 (same bytes as `read_u16`, reinterpreted).
    #[inline]
    pub fn read_i16(&mut self) -> i16 {
        self.read_u16() as i16
    }

    /// Read a fixed-size array, zero-padding past the end of the buffer.
    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        let avail = self.remaining().min(N);
        out[..avail].copy_from_slice(&self.src[self.idx..self.idx + avail]);
        self.idx += avail;
        if avail < N {
            self.truncated = true;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
