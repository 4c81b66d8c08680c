// File-level helpers around the in-memory decoder.
//
// The tokenized format tops out at the original interpreter's 64 KiB data
// segment, so every helper reads the whole file into memory and hands it to
// `gwbas::decode` / `gwbas::unprotect`.  Errors carry the offending path so
// the CLI can print them as is.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::gwbas::{self, DecodeError, FileKind, Listing, PROTECTED_MARKER};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations, tagged with the path involved.
#[derive(Debug, Error)]
pub enum FileError {
    /// I/O error (file open, read, write).
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file content was not decodable at all.
    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl FileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    fn decode(path: &Path, source: DecodeError) -> Self {
        Self::Decode { path: path.to_path_buf(), source }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Summary returned by `inspect_file()`.
#[derive(Debug, Clone)]
pub struct FileStats {
    /// File size in bytes, marker included.
    pub size: u64,
    /// Plain or protected.
    pub kind: FileKind,
    /// Number of decoded source lines.
    pub lines: usize,
    /// Opcodes that had no table entry.
    pub unknown_opcodes: usize,
    /// Whether any read was clamped at end of file.
    pub truncated: bool,
}

/// Summary returned by `unprotect_file()`.
#[derive(Debug, Clone)]
pub struct UnprotectStats {
    /// Output size in bytes (the cipher is one to one).
    pub size: u64,
    /// False when the input was already plain.
    pub was_protected: bool,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Read a program file into memory, tagging I/O errors with the path.
pub fn read_program(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|e| FileError::io(path, e))
}

/// Read and decode one file into a [`Listing`].
pub fn decode_file(path: &Path) -> Result<Listing, FileError> {
    let data = read_program(path)?;
    gwbas::decode(&data).map_err(|e| FileError::decode(path, e))
}

/// Decode one file and report its vitals without keeping the listing.
pub fn inspect_file(path: &Path) -> Result<FileStats, FileError> {
    let data = read_program(path)?;
    let listing = gwbas::decode(&data).map_err(|e| FileError::decode(path, e))?;
    let stats = listing.stats();
    Ok(FileStats {
        size: data.len() as u64,
        kind: listing.kind(),
        lines: listing.len(),
        unknown_opcodes: stats.unknown_opcodes,
        truncated: stats.truncated,
    })
}

/// Remove the protection cipher from `input`, writing a plain-marked copy
/// to `output`.  A plain input is copied through unchanged.
pub fn unprotect_file(input: &Path, output: &Path) -> Result<UnprotectStats, FileError> {
    let data = read_program(input)?;
    let plain = gwbas::unprotect(&data).map_err(|e| FileError::decode(input, e))?;
    let was_protected = data.first() == Some(&PROTECTED_MARKER);
    fs::write(output, &plain).map_err(|e| FileError::io(output, e))?;
    Ok(UnprotectStats {
        size: plain.len() as u64,
        was_protected,
    })
}

/// Write a listing's lines to `w`, one per line.
pub fn write_listing(w: &mut impl Write, listing: &Listing) -> io::Result<()> {
    for line in listing.lines() {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
