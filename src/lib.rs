//! Gwcat: decoder for tokenized GW-BASIC/BASICA .BAS program files.
//!
//! The crate provides:
//! - The tokenized-format decoder, cipher included (`gwbas`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use gwcat::gwbas;
//!
//! // 10 PRINT "HI" / 20 END, as saved by the interpreter.
//! let data: &[u8] = &[
//!     0xFF, 0x34, 0x12, 0x0A, 0x00, 0x91, 0x20, 0x22, b'H', b'I', 0x22, 0x00,
//!     0x40, 0x12, 0x14, 0x00, 0x81, 0x00, 0x00, 0x00,
//! ];
//!
//! let listing = gwbas::decode(data).unwrap();
//! assert_eq!(listing.lines(), ["10 PRINT \"HI\"", "20 END"]);
//! ```

pub mod gwbas;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
