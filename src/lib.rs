//! # framsreader
//!
//! A reader for the Framsticks parameter file format: line-oriented records
//! of `key:value` properties with an embedded, denser `@Serialized:`
//! sub-grammar for arbitrary nested data structures.
//!
//! ## The format
//!
//! ```text
//! ClassName:                 # opens an object
//! key:literal-value          # scalar: hex/int/float, or the text itself
//! key:@Serialized:<expr>     # embedded object-graph expression
//! key:~                      # opens a multiline string
//! ...raw line(s)...
//! ...final~                  # unescaped '~' terminates the capture
//!                            # blank line closes the current object
//! # comment line             # ignored outside multiline capture
//! ```
//!
//! The `@Serialized:` expression grammar supports `null`, signed hex and
//! decimal numbers, `"quoted strings"` (with `\"`, `\t`, `\n` escapes),
//! `[lists]`, `{"maps":...}` and `^N` back-references that alias composites
//! by construction order.
//!
//! ## Quick start
//!
//! ```rust
//! use framsreader::from_str;
//!
//! let input = "Genotype:\nname:standard\nenergy:1.5\ndata:@Serialized:[1,2,3]\n";
//! let doc = from_str(input).unwrap();
//!
//! let obj = &doc[0];
//! assert_eq!(obj.class(), "Genotype");
//! assert_eq!(obj.get("energy").and_then(|v| v.as_f64()), Some(1.5));
//! assert_eq!(obj.get("data").unwrap().to_string(), "[1,2,3]");
//! ```
//!
//! ## Object graphs
//!
//! Every list or map in an expression is registered in a per-expression
//! reference table the moment it opens; `^N` resolves to the N-th entry and
//! contributes the *same* value, so shared substructure survives parsing:
//!
//! ```rust
//! use framsreader::deserialize;
//!
//! let value = deserialize(r#"[{"a":1},^1]"#).unwrap();
//! let items = value.as_list().unwrap().borrow();
//! assert!(items[0].ptr_eq(&items[1]));
//! ```
//!
//! ## Error reporting
//!
//! Parsing is all-or-nothing. Any failure aborts the whole parse, and errors
//! raised on a property line carry the 0-based line number plus the raw line
//! text; see [`Error`].
//!
//! ## Interop
//!
//! [`Value`], [`Object`] and [`Document`] implement [`serde::Serialize`], so
//! a parsed document can be re-encoded with any serde format crate (cyclic
//! reference graphs excepted).

pub mod de;
pub mod document;
pub mod error;
mod lex;
pub mod map;
mod scan;
pub mod value;

pub use de::{deserialize, parse_property};
pub use document::{Document, Object};
pub use error::{Error, Result};
pub use map::ValueMap;
pub use value::{Number, Value};

use std::io;
use std::path::Path;

/// Parses a full in-memory text buffer into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use framsreader::from_str;
///
/// let doc = from_str("org:\nname:alice\n").unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
///
/// # Errors
///
/// Returns an error when any line fails to parse; the error carries the
/// 0-based line number and the raw line text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    scan::scan(s)
}

/// Parses a byte buffer into a [`Document`].
///
/// # Errors
///
/// Returns an error when the bytes are not valid UTF-8 or the text fails to
/// parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::lexical(e.to_string()))?;
    from_str(s)
}

/// Reads a [`Document`] from an I/O stream.
///
/// The input is read to the end before parsing starts; this reader does not
/// parse incrementally.
///
/// # Examples
///
/// ```rust
/// use framsreader::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"org:\nname:alice\n")).unwrap();
/// assert_eq!(doc[0].class(), "org");
/// ```
///
/// # Errors
///
/// Returns an error when reading fails or the text fails to parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Document> {
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(&string)
}

/// Reads and parses the file at `path` into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, or a parse error when
/// its contents are malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(e.to_string()))?;
    from_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_and_from_slice_agree() {
        let text = "org:\nname:alice\nenergy:1.5\n";
        let a = from_str(text).unwrap();
        let b = from_slice(text.as_bytes()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_reader() {
        let doc = from_reader(std::io::Cursor::new(b"org:\nx:1\n")).unwrap();
        assert_eq!(doc[0].get("x").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = from_file("/definitely/not/here.gen").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "a:\nm:@Serialized:{\"k\":[1,2],\"l\":null}\n\nb:\nx:0x10\n";
        let first = from_str(text).unwrap();
        let second = from_str(text).unwrap();
        assert_eq!(first, second);
    }
}
