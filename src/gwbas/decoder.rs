// Whole-file decoding: marker detection, cipher reversal, and the line walk.
//
// A tokenized file is one marker byte followed by a chain of line records:
//
//   [next-line address: u16] [line number: u16] [tokens...] [0x00]
//
// The address field is a leftover in-memory pointer from the original
// interpreter and means nothing on disk.  Only its zero test matters: a
// zero address is the end-of-program sentinel, and the walk otherwise
// advances by the bytes the tokenizer actually consumed.
//
// Malformed input never aborts a decode that got past the marker.  Unknown
// opcodes render as placeholders, truncated payloads read as zero, and a
// file that ends mid-line yields whatever lines were completed, with the
// degradations tallied in `DecodeStats`.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use log::debug;
use thiserror::Error;

use super::cipher;
use super::cursor::ByteCursor;
use super::opcodes;
use super::token::Token;
use super::tokenizer::LineTokenizer;

/// First byte of a plain tokenized file.
pub const PLAIN_MARKER: u8 = 0xFF;
/// First byte of a protected (ciphered) tokenized file.
pub const PROTECTED_MARKER: u8 = 0xFE;

/// What the marker byte said about the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Plain,
    Protected,
}

impl FileKind {
    /// Classify a buffer by its marker byte.
    pub fn detect(data: &[u8]) -> Result<Self, DecodeError> {
        match data.first() {
            None => Err(DecodeError::Empty),
            Some(&PLAIN_MARKER) => Ok(FileKind::Plain),
            Some(&PROTECTED_MARKER) => Ok(FileKind::Protected),
            Some(&found) => Err(DecodeError::BadMarker { found }),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Plain => f.write_str("plain"),
            FileKind::Protected => f.write_str("protected"),
        }
    }
}

/// Reasons a buffer cannot be decoded at all.  Everything after the marker
/// degrades per-token instead of erroring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty input: not a tokenized BASIC file")]
    Empty,
    #[error("not a tokenized BASIC file (first byte {found:#04X}, expected 0xFF or 0xFE)")]
    BadMarker { found: u8 },
}

/// Degradations encountered while decoding one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Opcodes with no table entry, rendered as `<OP:N>`.
    pub unknown_opcodes: usize,
    /// Whether any read was clamped at the end of the buffer.
    pub truncated: bool,
}

/// The decoded program: one rendered string per source line, in file order.
#[derive(Debug, Clone)]
pub struct Listing {
    kind: FileKind,
    lines: Vec<String>,
    stats: DecodeStats,
}

impl Listing {
    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Decode a complete tokenized file into source lines.
///
/// Fails only on an empty buffer or an unrecognized marker byte.  Anything
/// after that produces a listing, possibly with placeholder tokens and a
/// nonzero [`DecodeStats`].
pub fn decode(data: &[u8]) -> Result<Listing, DecodeError> {
    let kind = FileKind::detect(data)?;
    let body: Cow<'_, [u8]> = match kind {
        FileKind::Plain => Cow::Borrowed(&data[1..]),
        FileKind::Protected => {
            debug!("reversing protection cipher over {} bytes", data.len() - 1);
            let mut copy = data[1..].to_vec();
            cipher::unprotect_in_place(&mut copy);
            Cow::Owned(copy)
        }
    };

    let mut cursor = ByteCursor::new(&body);
    let mut lines = Vec::new();
    let mut stats = DecodeStats::default();
    loop {
        // The address is only an end sentinel, never a jump target.
        if cursor.read_u16() == 0 {
            break;
        }
        let number = cursor.read_u16();
        let mut text = format!("{number} ");
        for token in LineTokenizer::new(&mut cursor) {
            if let Token::Keyword(op) = &token {
                if opcodes::keyword(*op).is_none() {
                    stats.unknown_opcodes += 1;
                    debug!("line {number}: unrecognized opcode {op:#06X}");
                }
            }
            let _ = write!(text, "{token}");
        }
        lines.push(text);
    }
    stats.truncated = cursor.truncated();

    debug!(
        "decoded {} {} line(s), {} unknown opcode(s)",
        lines.len(),
        kind,
        stats.unknown_opcodes
    );
    Ok(Listing { kind, lines, stats })
}

/// Return a plain-marked copy of `data`, reversing the cipher when the
/// marker says the file is protected.  A plain file copies through as is.
pub fn unprotect(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let kind = FileKind::detect(data)?;
    let mut copy = data.to_vec();
    if kind == FileKind::Protected {
        copy[0] = PLAIN_MARKER;
        cipher::unprotect_in_place(&mut copy[1..]);
    }
    Ok(copy)
}

/// Inverse of [`unprotect`]: apply the cipher to a plain file and mark it
/// protected.  An already protected file copies through as is.
pub fn protect(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let kind = FileKind::detect(data)?;
    let mut copy = data.to_vec();
    if kind == FileKind::Plain {
        copy[0] = PROTECTED_MARKER;
        cipher::protect_in_place(&mut copy[1..]);
    }
    Ok(copy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // 10 PRINT "HI"
    // 20 END
    const TWO_LINES: &[u8] = &[
        0xFF, // marker
        0x34, 0x12, 0x0A, 0x00, 0x91, 0x20, 0x22, b'H', b'I', 0x22, 0x00,
        0x40, 0x12, 0x14, 0x00, 0x81, 0x00,
        0x00, 0x00, // end of program
    ];

    #[test]
    fn decodes_a_two_line_program() {
        let listing = decode(TWO_LINES).unwrap();
        assert_eq!(listing.kind(), FileKind::Plain);
        assert_eq!(listing.lines(), ["10 PRINT \"HI\"", "20 END"]);
        assert_eq!(listing.stats(), DecodeStats::default());
    }

    #[test]
    fn protected_copy_decodes_to_the_same_listing() {
        let protected = protect(TWO_LINES).unwrap();
        assert_eq!(protected[0], PROTECTED_MARKER);
        assert_ne!(&protected[1..], &TWO_LINES[1..]);

        let listing = decode(&protected).unwrap();
        assert_eq!(listing.kind(), FileKind::Protected);
        assert_eq!(listing.lines(), ["10 PRINT \"HI\"", "20 END"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(decode(&[]).unwrap_err(), DecodeError::Empty);
        assert_eq!(
            DecodeError::Empty.to_string(),
            "empty input: not a tokenized BASIC file"
        );
    }

    #[test]
    fn unknown_marker_is_rejected() {
        let err = decode(b"*not a BAS file").unwrap_err();
        assert_eq!(err, DecodeError::BadMarker { found: b'*' });
        assert_eq!(
            err.to_string(),
            "not a tokenized BASIC file (first byte 0x2A, expected 0xFF or 0xFE)"
        );
    }

    #[test]
    fn marker_alone_yields_an_empty_listing() {
        let listing = decode(&[0xFF]).unwrap();
        assert!(listing.is_empty());
        // The end sentinel itself was missing.
        assert!(listing.stats().truncated);
    }

    #[test]
    fn well_formed_empty_program_is_not_truncated() {
        let listing = decode(&[0xFF, 0x00, 0x00]).unwrap();
        assert!(listing.is_empty());
        assert!(!listing.stats().truncated);
    }

    #[test]
    fn file_cut_mid_line_yields_the_partial_line() {
        // TWO_LINES cut inside the string literal of line 10.
        let listing = decode(&TWO_LINES[..9]).unwrap();
        assert_eq!(listing.lines(), ["10 PRINT \"H"]);
        assert!(listing.stats().truncated);
    }

    #[test]
    fn unknown_opcodes_are_counted_not_fatal() {
        let data: &[u8] = &[
            0xFF, 0x34, 0x12, 0x0A, 0x00, 0x9A, 0xFD, 0x87, 0x00, 0x00, 0x00,
        ];
        let listing = decode(data).unwrap();
        assert_eq!(listing.lines(), ["10 <OP:154><OP:64903>"]);
        assert_eq!(listing.stats().unknown_opcodes, 2);
    }

    #[test]
    fn detect_classifies_markers() {
        assert_eq!(FileKind::detect(&[0xFF]), Ok(FileKind::Plain));
        assert_eq!(FileKind::detect(&[0xFE]), Ok(FileKind::Protected));
        assert_eq!(FileKind::detect(&[]), Err(DecodeError::Empty));
        assert_eq!(
            FileKind::detect(&[0x00]),
            Err(DecodeError::BadMarker { found: 0x00 })
        );
    }

    #[test]
    fn protect_then_unprotect_is_identity() {
        let protected = protect(TWO_LINES).unwrap();
        assert_eq!(unprotect(&protected).unwrap(), TWO_LINES);
    }

    #[test]
    fn unprotect_of_a_plain_file_is_a_copy() {
        assert_eq!(unprotect(TWO_LINES).unwrap(), TWO_LINES);
    }

    #[test]
    fn protect_of_a_protected_file_is_a_copy() {
        let protected = protect(TWO_LINES).unwrap();
        assert_eq!(protect(&protected).unwrap(), protected);
    }

    #[test]
    fn listing_accessors() {
        let listing = decode(TWO_LINES).unwrap();
        assert_eq!(listing.len(), 2);
        assert!(!listing.is_empty());
        assert_eq!(
            listing.into_lines(),
            vec!["10 PRINT \"HI\"".to_string(), "20 END".to_string()]
        );
    }
}
