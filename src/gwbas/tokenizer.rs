// Token scanner for one program line.
//
// Reads bytes off a `ByteCursor` and yields `Token`s until it consumes the
// 0x00 terminator or runs out of input, whichever comes first.  Dispatch is
// on the leading byte: printable ASCII passes through, reserved prefixes
// introduce fixed-width numeric payloads, 0xFD..0xFF escape into the
// two-byte opcode tier, and everything else is looked up as a one-byte
// opcode.
//
// Two regions suspend dispatch entirely.  A double quote starts a string
// that is copied verbatim (both quotes included) through the closing quote,
// stopping early at the terminator if the string is unterminated.  The
// apostrophe opcode 0xD9 starts a comment: the keyword is yielded, then the
// rest of the line is copied verbatim in a single run.  Neither region is
// ever re-tokenized, so interpreter bytes inside them stay untouched.
//
// Three byte patterns are artifacts of how the original interpreter stored
// certain statements and are rewritten to the text a user actually typed:
//
//   3A A1     ":ELSE"  -> "ELSE"
//   3A 8F D9  ":REM'"  -> "'"
//   B1 E9     "WHILE+" -> "WHILE"
//
// The lookahead runs only at dispatch level, so the same byte pairs inside
// strings or comments are left alone.

use super::cursor::ByteCursor;
use super::mbf;
use super::opcodes::{self, ESCAPE_BASE};
use super::token::Token;

const QUOTE: u8 = 0x22;
const COLON: u8 = 0x3A;
const REM: u8 = 0x8F;
const APOSTROPHE: u8 = 0xD9;
const ELSE: u8 = 0xA1;
const WHILE: u8 = 0xB1;
const PLUS: u8 = 0xE9;

/// Iterator over the tokens of a single line.
///
/// Borrows the cursor for the duration of the line; the cursor is left
/// positioned just past the terminator, ready for the next line header.
pub struct LineTokenizer<'c, 'a> {
    cur: &'c mut ByteCursor<'a>,
    in_comment: bool,
    done: bool,
}

impl<'c, 'a> LineTokenizer<'c, 'a> {
    pub fn new(cur: &'c mut ByteCursor<'a>) -> Self {
        Self { cur, in_comment: false, done: false }
    }

    /// Copy bytes up to (not including) the terminator or end of input.
    fn take_remainder(&mut self) -> String {
        let mut text = String::new();
        while !self.cur.at_end() && !self.cur.peek(0x00) {
            text.push(char::from(self.cur.read_u8()));
        }
        text
    }

    /// Copy a quoted string, opening quote already consumed.  Includes the
    /// closing quote when present; an unterminated string stops just short
    /// of the terminator so the line still ends normally.
    fn take_string(&mut self) -> String {
        let mut text = String::from('"');
        while !self.cur.at_end() && !self.cur.peek(0x00) {
            let b = self.cur.read_u8();
            text.push(char::from(b));
            if b == QUOTE {
                break;
            }
        }
        text
    }
}

impl Iterator for LineTokenizer<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        if self.in_comment {
            self.in_comment = false;
            let text = self.take_remainder();
            if !text.is_empty() {
                return Some(Token::Text(text));
            }
        }
        loop {
            if self.cur.at_end() {
                self.done = true;
                return Some(Token::EndOfLine);
            }
            let b = self.cur.read_u8();
            let token = match b {
                0x00 => {
                    self.done = true;
                    Token::EndOfLine
                }
                QUOTE => Token::Text(self.take_string()),
                COLON if self.cur.peek2(REM, APOSTROPHE) => {
                    self.cur.skip(1);
                    continue;
                }
                COLON if self.cur.peek(ELSE) => continue,
                0x20..=0x7E => Token::Literal(b),
                0x0B => Token::Octal(self.cur.read_u16()),
                0x0C => Token::Hex(self.cur.read_u16()),
                0x0E => Token::Int(i32::from(self.cur.read_u16())),
                0x0F => Token::Int(i32::from(self.cur.read_u8())),
                0x1C => Token::Int(i32::from(self.cur.read_i16())),
                0x1D => Token::Float(mbf::decode_f32(self.cur.read_array())),
                0x1F => Token::Float(mbf::decode_f64(self.cur.read_array())),
                APOSTROPHE => {
                    self.in_comment = true;
                    Token::Keyword(u16::from(b))
                }
                WHILE => {
                    if self.cur.peek(PLUS) {
                        self.cur.skip(1);
                    }
                    Token::Keyword(u16::from(b))
                }
                ESCAPE_BASE..=0xFF => {
                    Token::Keyword(opcodes::fold_escape(b, self.cur.read_u8()))
                }
                _ => Token::Keyword(u16::from(b)),
            };
            return Some(token);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
