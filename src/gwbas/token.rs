// Decoded token values and their textual rendering.
//
// A tokenized line decomposes into a flat sequence of these variants; the
// original source line is the concatenation of their `Display` output.
// Rendering is where opcode lookups become total: a `Keyword` whose value
// has no table entry prints as the `<OP:N>` placeholder instead of failing.

use std::fmt;

use super::{mbf, opcodes};

/// One decoded element of a program line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A table opcode, single-byte or folded two-byte.
    Keyword(u16),
    /// A printable ASCII byte passed through untokenized.
    Literal(u8),
    /// A decimal integer constant.
    Int(i32),
    /// An octal constant, stored as the raw 16-bit pattern.
    Octal(u16),
    /// A hex constant, stored as the raw 16-bit pattern.
    Hex(u16),
    /// A float constant already converted from the legacy layout.
    Float(f64),
    /// A verbatim byte run: quoted string (quotes included) or comment body.
    Text(String),
    /// The line terminator.  Renders as nothing.
    EndOfLine,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(op) => match opcodes::keyword(*op) {
                Some(kw) => f.write_str(kw),
                None => write!(f, "<OP:{op}>"),
            },
            Token::Literal(b) => write!(f, "{}", char::from(*b)),
            Token::Int(v) => write!(f, "{v}"),
            Token::Octal(v) => write!(f, "&O{v:o}"),
            Token::Hex(v) => write!(f, "&H{v:X}"),
            Token::Float(v) => f.write_str(&mbf::format_float(*v)),
            Token::Text(s) => f.write_str(s),
            Token::EndOfLine => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_render_from_the_table() {
        assert_eq!(Token::Keyword(0x91).to_string(), "PRINT");
        assert_eq!(Token::Keyword(0xFF81).to_string(), "LEFT$");
        assert_eq!(Token::Keyword(0x1B).to_string(), "10");
    }

    #[test]
    fn unknown_opcodes_render_as_decimal_placeholders() {
        assert_eq!(Token::Keyword(0x9A).to_string(), "<OP:154>");
        assert_eq!(Token::Keyword(0xFD87).to_string(), "<OP:64903>");
    }

    #[test]
    fn integer_renderings() {
        assert_eq!(Token::Int(100).to_string(), "100");
        assert_eq!(Token::Int(-2).to_string(), "-2");
        assert_eq!(Token::Octal(0o177).to_string(), "&O177");
        assert_eq!(Token::Octal(0xFFFF).to_string(), "&O177777");
        assert_eq!(Token::Hex(0xABCD).to_string(), "&HABCD");
        assert_eq!(Token::Hex(0xFFFF).to_string(), "&HFFFF");
    }

    #[test]
    fn float_rendering_goes_through_the_shared_formatter() {
        assert_eq!(Token::Float(1.0).to_string(), "1");
        assert_eq!(Token::Float(16.25).to_string(), "16.25");
        assert_eq!(Token::Float(0.0).to_string(), "0");
    }

    #[test]
    fn text_and_literal_pass_through() {
        assert_eq!(Token::Text("\"HI\"".into()).to_string(), "\"HI\"");
        assert_eq!(Token::Literal(b'A').to_string(), "A");
        assert_eq!(Token::Literal(b':').to_string(), ":");
    }

    #[test]
    fn end_of_line_renders_empty() {
        assert_eq!(Token::EndOfLine.to_string(), "");
    }
}
