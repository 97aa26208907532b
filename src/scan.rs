//! The record scanner: the outer, line-oriented half of the reader.
//!
//! The scanner splits input on line feeds and walks it with two pieces of
//! state: the currently open object (if any) and the multiline-string
//! capture (if active). Per line:
//!
//! - during multiline capture, everything up to the first unescaped `~`
//!   belongs to the value (a line with no terminator is captured whole,
//!   newline included, comments and blank lines included);
//! - `#` at the first column starts a comment;
//! - with no object open, a line containing `:` opens one, with everything
//!   before the first `:` as its class;
//! - with an object open, a blank line closes it, `key:~` starts multiline
//!   capture, and any other `key:value` line stores a property, delegating
//!   the value to [`parse_property`](crate::parse_property).
//!
//! Any error is annotated with the 0-based line number and raw line text
//! before it surfaces. The parse is all-or-nothing: a failing line aborts
//! the whole document.

use crate::de;
use crate::document::{Document, Object};
use crate::error::{Error, Result};
use crate::lex;

/// Multiline capture state: the property key and the accumulated value.
struct Multiline {
    key: String,
    value: String,
}

/// Scans a full text buffer into a [`Document`].
pub(crate) fn scan(input: &str) -> Result<Document> {
    let mut document = Document::new();
    let mut open = false;
    let mut multiline: Option<Multiline> = None;

    for (line_num, line) in input.split('\n').enumerate() {
        scan_line(line, &mut document, &mut open, &mut multiline)
            .map_err(|e| e.at_line(line_num, line))?;
    }

    if multiline.is_some() {
        return Err(Error::multiline("unterminated multiline value at end of input"));
    }
    Ok(document)
}

fn scan_line(
    line: &str,
    document: &mut Document,
    open: &mut bool,
    multiline: &mut Option<Multiline>,
) -> Result<()> {
    if let Some(mut state) = multiline.take() {
        let (chunk, terminated) = match lex::find_unescaped(line, '~') {
            Some(end) => {
                if !line[end + 1..].trim().is_empty() {
                    return Err(Error::multiline("trailing content after the closing '~'"));
                }
                (line[..end].to_string(), true)
            }
            None => (format!("{}\n", line), false),
        };
        state.value.push_str(&lex::unescape_tilde(&chunk));

        if terminated {
            if let Some(object) = document.last_mut() {
                object.insert(state.key, crate::Value::String(state.value));
            }
        } else {
            *multiline = Some(state);
        }
        return Ok(());
    }

    // Comments only apply outside multiline capture, and only at column 0.
    if line.starts_with('#') {
        return Ok(());
    }

    let trimmed = line.trim();

    if *open {
        if trimmed.is_empty() {
            *open = false;
            return Ok(());
        }
    } else {
        if let Some((class, _suffix)) = trimmed.split_once(':') {
            // Anything after the header's ':' is currently ignored.
            document.push(Object::new(class));
            *open = true;
        }
        return Ok(());
    }

    let (key, raw_value) = trimmed
        .split_once(':')
        .ok_or_else(|| Error::structural("property line without ':'"))?;

    if raw_value.trim() == "~" {
        *multiline = Some(Multiline {
            key: key.to_string(),
            value: String::new(),
        });
    } else {
        let value = de::parse_property(raw_value)?;
        if let Some(object) = document.last_mut() {
            object.insert(key.to_string(), value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_basic_object() {
        let doc = scan("Genotype:\nname:\"foo\"\nnum:42\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].class(), "Genotype");
        assert_eq!(doc[0].get("name").and_then(Value::as_str), Some("\"foo\""));
        assert_eq!(doc[0].get("num").and_then(Value::as_i64), Some(42));
    }

    #[test]
    fn test_blank_line_closes_object() {
        let doc = scan("a:\nx:1\n\ny:2\n").unwrap();
        // "y:2" lands after the blank line, so it opens a new object of
        // class "y" rather than adding a property to "a".
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].class(), "a");
        assert!(doc[0].get("y").is_none());
        assert_eq!(doc[1].class(), "y");
    }

    #[test]
    fn test_comment_lines_skipped() {
        let doc = scan("# header comment\na:\n# inner\nx:1\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].get("x").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_multiline_value() {
        let doc = scan("a:\ninfo:~\nline one\nline two~\n\n").unwrap();
        assert_eq!(
            doc[0].get("info").and_then(Value::as_str),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_multiline_captures_comments_and_blanks() {
        let doc = scan("a:\ninfo:~\n# not a comment\n\nend~\n").unwrap();
        assert_eq!(
            doc[0].get("info").and_then(Value::as_str),
            Some("# not a comment\n\nend")
        );
    }

    #[test]
    fn test_multiline_escaped_tilde() {
        let doc = scan("a:\ninfo:~\napprox \\~1\\~~\n").unwrap();
        assert_eq!(doc[0].get("info").and_then(Value::as_str), Some("approx ~1~"));
    }

    #[test]
    fn test_multiline_trailing_content_rejected() {
        let err = scan("a:\ninfo:~\nvalue~ extra\n").unwrap_err();
        match err {
            Error::Line { line, source, .. } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, Error::Multiline(_)));
            }
            other => panic!("expected line context, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_multiline_rejected() {
        let err = scan("a:\ninfo:~\nno terminator\n").unwrap_err();
        assert!(matches!(err, Error::Multiline(_)));
    }

    #[test]
    fn test_property_line_without_colon_rejected() {
        let err = scan("a:\nnot a property\n").unwrap_err();
        match err {
            Error::Line { line, ref text, .. } => {
                assert_eq!(line, 1);
                assert_eq!(text, "not a property");
            }
            other => panic!("expected line context, got {:?}", other),
        }
    }

    #[test]
    fn test_line_without_colon_outside_object_ignored() {
        let doc = scan("stray text\na:\nx:1\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].class(), "a");
    }

    #[test]
    fn test_end_of_input_closes_object() {
        let doc = scan("a:\nx:1").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].get("x").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_serialized_error_carries_line_context() {
        let err = scan("a:\nval:@Serialized:[1,2,\n").unwrap_err();
        match err {
            Error::Line { line, source, .. } => {
                assert_eq!(line, 1);
                assert!(matches!(*source, Error::Structural(_)));
            }
            other => panic!("expected line context, got {:?}", other),
        }
    }
}
