//! Shared lexical helpers.
//!
//! The number grammar here is used twice: anchored to the whole trimmed
//! string when parsing plain property values, and as a prefix scanner inside
//! `@Serialized:` expressions. Escape handling for `~` terminators and quoted
//! strings also lives here so the record scanner and the expression engine
//! agree on it.

use crate::error::{Error, Result};
use crate::value::Number;

/// A number token recognized at the start of some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberToken {
    /// Byte length of the lexeme.
    pub len: usize,
    /// Carries a fractional part or exponent.
    pub float: bool,
    /// `0x`/`0X` hex literal (always an integer).
    pub hex: bool,
}

/// Scans for a number literal at the start of `input`.
///
/// Grammar: optional `+`/`-` sign, then either `0x`/`0X` hex digits or a
/// decimal literal (`0` or non-zero-leading digits, optional `.digits`
/// fraction, optional `e`/`E` exponent). Returns `Ok(None)` when `input`
/// does not start with a number at all; a token that starts like a number
/// but is malformed (hex with no digits, leading zero followed by a digit)
/// is a lexical error.
pub(crate) fn scan_number(input: &str) -> Result<Option<NumberToken>> {
    let bytes = input.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    if !matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
        return Ok(None);
    }

    // Hex literal
    if bytes[i] == b'0' && matches!(bytes.get(i + 1), Some(b'x') | Some(b'X')) {
        i += 2;
        let digits_start = i;
        while matches!(bytes.get(i), Some(b) if b.is_ascii_hexdigit()) {
            i += 1;
        }
        if i == digits_start {
            return Err(Error::lexical("hex literal with no digits"));
        }
        return Ok(Some(NumberToken {
            len: i,
            float: false,
            hex: true,
        }));
    }

    // Integer part: '0' or non-zero-leading digits
    if bytes[i] == b'0' {
        i += 1;
        if matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            return Err(Error::lexical("decimal literal with leading zero"));
        }
    } else {
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            i += 1;
        }
    }

    let mut float = false;

    // Fractional part, only if '.' is followed by a digit
    if bytes.get(i) == Some(&b'.') && matches!(bytes.get(i + 1), Some(b) if b.is_ascii_digit()) {
        float = true;
        i += 2;
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            i += 1;
        }
    }

    // Exponent, only if the full `e[+-]digits` form is present
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        if matches!(bytes.get(j), Some(b) if b.is_ascii_digit()) {
            float = true;
            i = j;
            while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
                i += 1;
            }
        }
    }

    Ok(Some(NumberToken {
        len: i,
        float,
        hex: false,
    }))
}

/// Converts a lexeme recognized by [`scan_number`] into a [`Number`].
///
/// Decimal integers outside the `i64` range fall back to `f64`; hex
/// literals out of range are a lexical error.
pub(crate) fn convert_number(lexeme: &str, token: NumberToken) -> Result<Number> {
    if token.hex {
        let unsigned = lexeme.trim_start_matches(['+', '-']);
        let digits = &unsigned[2..];
        let magnitude = i64::from_str_radix(digits, 16)
            .map_err(|_| Error::lexical(format!("hex literal out of range: {}", lexeme)))?;
        let value = if lexeme.starts_with('-') {
            -magnitude
        } else {
            magnitude
        };
        return Ok(Number::Integer(value));
    }

    if token.float {
        return lexeme
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| Error::lexical(format!("invalid float literal: {}", lexeme)));
    }

    match lexeme.parse::<i64>() {
        Ok(i) => Ok(Number::Integer(i)),
        // Out of i64 range; the decimal grammar guarantees f64 accepts it.
        Err(_) => lexeme
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| Error::lexical(format!("invalid integer literal: {}", lexeme))),
    }
}

/// Parses a whole trimmed string as a number, or returns `None`.
///
/// This is the lenient "integer or floating-point primitive" used for plain
/// property values: anything malformed or only partially numeric falls back
/// to `None` (and the caller keeps the text as a string).
pub(crate) fn str_to_number(s: &str) -> Option<Number> {
    match scan_number(s) {
        Ok(Some(token)) if token.len == s.len() => convert_number(s, token).ok(),
        _ => None,
    }
}

/// Finds the byte index of the first `needle` in `s` that is not immediately
/// preceded by a backslash.
pub(crate) fn find_unescaped(s: &str, needle: char) -> Option<usize> {
    let mut prev: Option<char> = None;
    for (i, ch) in s.char_indices() {
        if ch == needle && prev != Some('\\') {
            return Some(i);
        }
        prev = Some(ch);
    }
    None
}

/// Unescapes `\~` inside a multiline chunk. No other escapes apply there.
pub(crate) fn unescape_tilde(s: &str) -> String {
    s.replace("\\~", "~")
}

/// Unescapes a quoted-string span: `\"`, `\t` and `\n`, in that order.
pub(crate) fn unescape_string(s: &str) -> String {
    s.replace("\\\"", "\"").replace("\\t", "\t").replace("\\n", "\n")
}
