//! The `@Serialized:` expression engine and the property-value parser.
//!
//! ## Overview
//!
//! [`deserialize`] consumes one single-line expression left-to-right and
//! produces one materialized [`Value`]. Instead of recursive descent it keeps
//! two explicit structures:
//!
//! - a **container stack** of the currently open lists/maps, innermost last;
//! - a flat **reference table** holding every composite in construction
//!   order, which is what `^N` back-reference tokens resolve against.
//!
//! A composite is registered the moment it is *opened*, so the table's order
//! is unambiguous and independent of nesting depth. A resolved reference
//! contributes the same shared value to its container (aliasing, not
//! copying) and is not re-registered.
//!
//! Both structures live only for the duration of one call; nothing persists
//! across expressions.
//!
//! ## Usage
//!
//! ```rust
//! use framsreader::deserialize;
//!
//! let value = deserialize(r#"{"x":1,"y":[2,3]}"#).unwrap();
//! let map = value.as_map().unwrap().borrow();
//! assert_eq!(map.get("x").and_then(|v| v.as_i64()), Some(1));
//! ```
//!
//! Back-references alias the composite registered at the given index:
//!
//! ```rust
//! use framsreader::deserialize;
//!
//! // Index 0 is the outer list itself; the map is registered at index 1.
//! let value = deserialize(r#"[{"a":1},^1]"#).unwrap();
//! let items = value.as_list().unwrap().borrow();
//! assert!(items[0].ptr_eq(&items[1]));
//! ```

use crate::error::{Error, Result};
use crate::lex;
use crate::value::Value;
use crate::ValueMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A byte cursor over one expression.
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.position += bytes;
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }
}

/// An open composite on the container stack.
enum Container {
    List(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<ValueMap>>),
}

/// Parses one raw property-value string into a [`Value`].
///
/// Values prefixed with `@Serialized:` are handed to [`deserialize`];
/// everything else is tried as a number literal (hex or decimal, the same
/// grammar the expression engine uses, anchored to the whole trimmed
/// string) and falls back to the trimmed text as a plain string.
///
/// # Examples
///
/// ```rust
/// use framsreader::{parse_property, Value};
///
/// assert_eq!(parse_property("0x1A").unwrap().as_i64(), Some(26));
/// assert_eq!(parse_property("1.5e2").unwrap().as_f64(), Some(150.0));
/// assert_eq!(parse_property("007").unwrap().as_str(), Some("007"));
/// assert!(parse_property("@Serialized:[1,2,3]").unwrap().is_list());
/// ```
///
/// # Errors
///
/// Only the `@Serialized:` branch can fail; plain values always produce a
/// number or a string.
pub fn parse_property(raw: &str) -> Result<Value> {
    if let Some(expression) = raw.strip_prefix("@Serialized:") {
        return deserialize(expression);
    }
    let trimmed = raw.trim();
    Ok(match lex::str_to_number(trimmed) {
        Some(n) => Value::Number(n),
        None => Value::String(trimmed.to_string()),
    })
}

/// Deserializes one `@Serialized:` expression into a [`Value`].
///
/// The whole expression must be consumed; trailing content after the
/// top-level value is a syntax error, as is any unterminated container.
///
/// # Examples
///
/// ```rust
/// use framsreader::{deserialize, Value};
///
/// assert_eq!(deserialize("null").unwrap(), Value::Null);
/// assert_eq!(deserialize("\"a\\tb\"").unwrap().as_str(), Some("a\tb"));
///
/// let list = deserialize("[1,2,3]").unwrap();
/// let items = list.as_list().unwrap().borrow();
/// assert_eq!(items.len(), 3);
/// ```
///
/// # Errors
///
/// - [`Error::EmptyValue`] for an empty or all-whitespace expression
/// - [`Error::Lexical`] for malformed number, string, or reference tokens
/// - [`Error::Structural`] for delimiter and comma violations
/// - [`Error::Reference`] for a `^N` index with no registered composite
/// - [`Error::Unsupported`] for `<...>` markers, custom object tokens, and
///   non-string map keys
pub fn deserialize(expression: &str) -> Result<Value> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyValue);
    }
    if trimmed == "null" {
        return Ok(Value::Null);
    }

    let mut cursor = Cursor::new(trimmed);
    let mut stack: Vec<Container> = Vec::new();
    let mut references: Vec<Value> = Vec::new();
    let mut main: Option<Value> = None;
    let mut expect_map_value = false;
    let mut pending_key: Option<String> = None;
    let mut opened_lists: usize = 0;
    let mut opened_maps: usize = 0;

    while !cursor.at_end() {
        let mut from_reference = false;

        if main.is_some() && stack.is_empty() {
            return Err(Error::structural("trailing content after top-level value"));
        }

        if expect_map_value {
            if cursor.peek() == Some(':') {
                cursor.bump();
                cursor.skip_whitespace();
            } else {
                return Err(Error::structural("expected ':' between map key and value"));
            }
        }

        if cursor.peek() == Some(',') {
            let legal = match stack.last() {
                Some(Container::List(_)) => true,
                Some(Container::Map(map)) => !expect_map_value && !map.borrow().is_empty(),
                None => false,
            };
            if !legal {
                return Err(Error::structural("',' not allowed here"));
            }
            cursor.bump();
            cursor.skip_whitespace();
        }

        // Input exhausted right after a separator: let the unterminated
        // container checks below report it.
        if cursor.at_end() {
            break;
        }

        match cursor.peek() {
            Some(']') => match stack.last() {
                Some(Container::List(_)) => {
                    stack.pop();
                    opened_lists -= 1;
                    cursor.bump();
                    cursor.skip_whitespace();
                    continue;
                }
                _ => return Err(Error::structural("']' does not close an open list")),
            },
            Some('}') => match stack.last() {
                Some(Container::Map(_)) => {
                    if expect_map_value || pending_key.is_some() {
                        return Err(Error::structural("map key with no value"));
                    }
                    stack.pop();
                    opened_maps -= 1;
                    cursor.bump();
                    cursor.skip_whitespace();
                    continue;
                }
                _ => return Err(Error::structural("'}' does not close an open map")),
            },
            _ => {}
        }

        let current = if cursor.rest().starts_with("null") {
            cursor.advance(4);
            Value::Null
        } else if cursor.peek() == Some('[') {
            cursor.bump();
            opened_lists += 1;
            Value::list(Vec::new())
        } else if cursor.peek() == Some('{') {
            cursor.bump();
            opened_maps += 1;
            Value::map(ValueMap::new())
        } else if cursor.peek() == Some('"') {
            Value::String(extract_string(&mut cursor)?)
        } else if let Some(token) = lex::scan_number(cursor.rest())? {
            let lexeme = &cursor.rest()[..token.len];
            let number = lex::convert_number(lexeme, token)?;
            cursor.advance(token.len);
            Value::Number(number)
        } else if cursor.peek() == Some('^') {
            let index = extract_reference(&mut cursor)?;
            if index >= references.len() {
                return Err(Error::reference(index, references.len()));
            }
            from_reference = true;
            references[index].clone()
        } else if cursor.peek() == Some('<') {
            return Err(Error::unsupported(
                "non-serializable object markers (<...>) are not implemented",
            ));
        } else if cursor.peek() == Some(',') {
            return Err(Error::structural("',' not allowed here"));
        } else {
            return Err(Error::unsupported(
                "custom object notation is not implemented",
            ));
        };

        match stack.last() {
            Some(Container::List(list)) => list.borrow_mut().push(current.clone()),
            Some(Container::Map(map)) => {
                if expect_map_value {
                    // pending_key is always set when expect_map_value is.
                    if let Some(key) = pending_key.take() {
                        map.borrow_mut().insert(key, current.clone());
                    }
                    expect_map_value = false;
                } else {
                    match &current {
                        Value::String(s) => {
                            pending_key = Some(s.clone());
                            expect_map_value = true;
                        }
                        _ => return Err(Error::unsupported("non-string map keys")),
                    }
                }
            }
            None => {}
        }

        if !from_reference {
            match &current {
                Value::List(list) => {
                    references.push(current.clone());
                    stack.push(Container::List(Rc::clone(list)));
                }
                Value::Map(map) => {
                    references.push(current.clone());
                    stack.push(Container::Map(Rc::clone(map)));
                }
                _ => {}
            }
        }

        if main.is_none() {
            main = Some(current);
        }
        cursor.skip_whitespace();
    }

    if opened_lists != 0 {
        return Err(Error::structural("unterminated list"));
    }
    if opened_maps != 0 {
        return Err(Error::structural("unterminated map"));
    }
    main.ok_or_else(|| Error::structural("expression produced no value"))
}

/// Extracts a quoted string token. The cursor sits on the opening `"`.
fn extract_string(cursor: &mut Cursor<'_>) -> Result<String> {
    cursor.bump();
    let span = cursor.rest();
    match lex::find_unescaped(span, '"') {
        Some(end) => {
            let raw = &span[..end];
            cursor.advance(end + 1);
            Ok(lex::unescape_string(raw))
        }
        None => Err(Error::lexical("unterminated string literal")),
    }
}

/// Extracts a `^N` back-reference index. The cursor sits on the `^`.
fn extract_reference(cursor: &mut Cursor<'_>) -> Result<usize> {
    cursor.bump();
    cursor.skip_whitespace();

    let bytes = cursor.rest().as_bytes();
    let mut len = 0;
    while matches!(bytes.get(len), Some(b) if b.is_ascii_digit()) {
        len += 1;
    }
    if len == 0 {
        return Err(Error::lexical("back-reference with no index"));
    }
    if bytes[0] == b'0' && len > 1 {
        return Err(Error::lexical("back-reference index with leading zero"));
    }

    let digits = &cursor.rest()[..len];
    let index = digits
        .parse::<usize>()
        .map_err(|_| Error::lexical(format!("back-reference index out of range: ^{}", digits)))?;
    cursor.advance(len);
    Ok(index)
}
