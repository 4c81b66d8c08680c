// Tokenized GW-BASIC/BASICA file format.
//
// This module turns the binary .BAS save format back into source text,
// including files saved with the ",P" protection cipher.
//
// # Modules
//
// - `cursor`    — Clamped sequential reader over the raw bytes
// - `mbf`       — Microsoft Binary Format float decoding and rendering
// - `cipher`    — Keyed byte transform for protected files
// - `opcodes`   — Static opcode-to-keyword table
// - `token`     — Decoded token values and their textual rendering
// - `tokenizer` — Per-line token scanner
// - `decoder`   — Whole-file driver producing a `Listing`

pub mod cipher;
pub mod cursor;
pub mod decoder;
pub mod mbf;
pub mod opcodes;
pub mod token;
pub mod tokenizer;

// Re-export key types for convenience.
pub use cursor::ByteCursor;
pub use decoder::{
    DecodeError, DecodeStats, FileKind, Listing, PLAIN_MARKER, PROTECTED_MARKER, decode, protect,
    unprotect,
};
pub use token::Token;
pub use tokenizer::LineTokenizer;
