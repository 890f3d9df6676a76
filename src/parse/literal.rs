//! Decoding of quoted literal tokens.
//!
//! [`unquote`] is the fallible decoder for arbitrary text. [`decode_string_lit`]
//! is what the import scanner uses: the header frontend rejects malformed
//! import paths as syntax errors before handing them over, so a failure there
//! is a bug in the parser stage and panics instead of returning an error.

use crate::parse::common::{BasicLit, LitKind};
use std::str::Chars;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnquoteError {
    #[error("literal is too short to be quoted")]
    TooShort,
    #[error("literal does not start and end with the same quote")]
    MismatchedQuotes,
    #[error("unsupported quote character {0:?}")]
    UnknownQuote(char),
    #[error("newline in quoted literal")]
    Newline,
    #[error("unescaped quote inside literal")]
    UnescapedQuote,
    #[error("backquote inside raw string")]
    BackquoteInRaw,
    #[error("invalid escape sequence \\{0}")]
    InvalidEscape(char),
    #[error("truncated escape sequence")]
    TruncatedEscape,
    #[error("escape value {0:#x} is not a valid code point")]
    InvalidCodePoint(u32),
    #[error("octal escape value {0} is greater than 255")]
    OctalOutOfRange(u32),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("character literal must hold exactly one character")]
    CharLength,
}

/// Decode a string literal token from an import declaration.
///
/// # Panics
///
/// Panics if `lit` is not a string literal or its escapes are malformed.
pub fn decode_string_lit(lit: &BasicLit) -> String {
    if lit.kind != LitKind::String {
        panic!(
            "import path at {:?} must be a string literal, found {:?} token {}",
            lit.pos, lit.kind, lit.value
        );
    }
    match unquote(&lit.value) {
        Ok(value) => value,
        Err(err) => panic!("malformed string literal {} at {:?}: {err}", lit.value, lit.pos),
    }
}

/// Interpret a Go quoted literal (`"..."`, `` `...` `` or `'.'`) and return its value.
pub fn unquote(lit: &str) -> Result<String, UnquoteError> {
    let mut chars = lit.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return Err(UnquoteError::TooShort);
    };
    if open != close {
        return Err(UnquoteError::MismatchedQuotes);
    }
    let body = chars.as_str();

    match open {
        '`' => {
            if body.contains('`') {
                return Err(UnquoteError::BackquoteInRaw);
            }
            Ok(body.replace('\r', ""))
        }
        '"' | '\'' => {
            if body.contains('\n') {
                return Err(UnquoteError::Newline);
            }
            let value = unescape(body, open)?;
            if open == '\'' && value.chars().count() != 1 {
                return Err(UnquoteError::CharLength);
            }
            Ok(value)
        }
        other => Err(UnquoteError::UnknownQuote(other)),
    }
}

fn unescape(body: &str, quote: char) -> Result<String, UnquoteError> {
    // Fast path: nothing to decode
    if !body.contains('\\') && !body.contains(quote) {
        return Ok(body.to_string());
    }

    // Byte escapes in a string literal produce raw bytes; in a character
    // literal they name a code point.
    let in_string = quote == '"';
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c == quote {
            return Err(UnquoteError::UnescapedQuote);
        }
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }
        let esc = chars.next().ok_or(UnquoteError::TruncatedEscape)?;
        match esc {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '\'' | '"' => {
                if esc != quote {
                    return Err(UnquoteError::InvalidEscape(esc));
                }
                out.push(esc as u8);
            }
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(8))
                        .ok_or(UnquoteError::TruncatedEscape)?;
                    value = value * 8 + digit;
                }
                if value > 255 {
                    return Err(UnquoteError::OctalOutOfRange(value));
                }
                push_byte(&mut out, value as u8, in_string);
            }
            'x' => {
                let value = take_hex(&mut chars, 2)?;
                push_byte(&mut out, value as u8, in_string);
            }
            'u' | 'U' => {
                let width = if esc == 'u' { 4 } else { 8 };
                let value = take_hex(&mut chars, width)?;
                let decoded = char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint(value))?;
                push_char(&mut out, decoded);
            }
            other => return Err(UnquoteError::InvalidEscape(other)),
        }
    }

    String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)
}

fn take_hex(chars: &mut Chars<'_>, width: usize) -> Result<u32, UnquoteError> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or(UnquoteError::TruncatedEscape)?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn push_byte(out: &mut Vec<u8>, byte: u8, in_string: bool) {
    if in_string {
        out.push(byte);
    } else {
        push_char(out, char::from(byte));
    }
}
