// Cipher for "protected" saves (SAVE "file",P).
//
// The scheme was published in The Cryptogram computer supplement #19
// (American Cryptogram Association, Summer 1994) and is also implemented
// by PC-BASIC.  Two fixed keys of coprime lengths 13 and 11 cycle
// independently over the byte stream; per byte, a reversed 11-index is
// subtracted, both key bytes are XORed in, and a reversed 13-index is
// added ("reversed" meaning the 11-index counts 11 down to 1 as the
// position counts 0 up to 10).
//
// The marker byte at offset 0 is never part of the stream: callers run
// the cipher over everything after it.

pub const KEY13: [u8; 13] = [
    0xA9, 0x84, 0x8D, 0xCD, 0x75, 0x83, 0x43, 0x63, 0x24, 0x83, 0x19, 0xF7, 0x9A,
];
pub const KEY11: [u8; 11] = [
    0x1E, 0x1D, 0xC4, 0x77, 0x26, 0x97, 0xE0, 0x74, 0x59, 0x88, 0x7C,
];

/// Per-stream cipher state: two cyclic key indices.
///
/// One value deciphers (or enciphers) exactly one byte stream, strictly
/// in order; the indices wrap at 11 and 13 independently, never as one
/// combined modulus.
#[derive(Debug, Clone, Default)]
pub struct CipherState {
    idx11: usize,
    idx13: usize,
}

impl CipherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decipher one byte and advance.
    #[inline]
    pub fn unprotect_byte(&mut self, b: u8) -> u8 {
        let mut ans = b.wrapping_sub(11 - self.idx11 as u8);
        ans ^= KEY11[self.idx11] ^ KEY13[self.idx13];
        ans = ans.wrapping_add(13 - self.idx13 as u8);
        self.advance();
        ans
    }

    /// Encipher one byte and advance.  Exact inverse of `unprotect_byte`
    /// at the same stream position.
    #[inline]
    pub fn protect_byte(&mut self, b: u8) -> u8 {
        let mut ans = b.wrapping_sub(13 - self.idx13 as u8);
        ans ^= KEY11[self.idx11] ^ KEY13[self.idx13];
        ans = ans.wrapping_add(11 - self.idx11 as u8);
        self.advance();
        ans
    }

    #[inline]
    fn advance(&mut self) {
        self.idx11 = (self.idx11 + 1) % 11;
        self.idx13 = (self.idx13 + 1) % 13;
    }
}

/// Decipher a whole body in place (everything after the marker byte).
pub fn unprotect_in_place(body: &mut [u8]) {
    let mut state = CipherState::new();
    for b in body.iter_mut() {
        *b = state.unprotect_byte(*b);
    }
}

/// Encipher a whole body in place (everything after the marker byte).
pub fn protect_in_place(body: &mut [u8]) {
    let mut state = CipherState::new();
    for b in body.iter_mut() {
        *b = state.protect_byte(*b);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
