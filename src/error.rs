//! Error types for Framsticks file parsing.
//!
//! This module provides the error taxonomy shared by the record scanner and
//! the `@Serialized:` expression engine.
//!
//! ## Error Categories
//!
//! - **Lexical**: malformed number, string, or reference token
//! - **Structural**: mismatched or missing delimiter, illegal comma, missing
//!   `:` in a map entry, unterminated container
//! - **Reference**: `^N` back-reference index out of range
//! - **Unsupported**: recognized-but-unimplemented production (`<...>`
//!   markers, custom object tokens, non-string map keys)
//! - **Multiline**: unterminated or malformed `~` multiline value
//! - **EmptyValue**: empty `@Serialized:` payload
//! - **Io**: file reading failures
//!
//! ## Line Context
//!
//! Any error raised while scanning a property line is wrapped in
//! [`Error::Line`], carrying the 0-based line number and the raw line text.
//!
//! ## Examples
//!
//! ```rust
//! use framsreader::{deserialize, Error};
//!
//! let result = deserialize("[1,2,");
//! assert!(matches!(result, Err(Error::Structural(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading a Framsticks
/// file or a single `@Serialized:` expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading a source file
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed number, string, or reference token
    #[error("malformed token: {0}")]
    Lexical(String),

    /// Mismatched delimiter, illegal comma, or other grammar violation
    #[error("syntax error: {0}")]
    Structural(String),

    /// Back-reference index with no registered value
    #[error("back-reference ^{index} out of range ({registered} values registered)")]
    Reference { index: usize, registered: usize },

    /// Recognized but unimplemented production
    #[error("not supported: {0}")]
    Unsupported(String),

    /// Unterminated or malformed multiline value
    #[error("multiline value error: {0}")]
    Multiline(String),

    /// Empty `@Serialized:` payload
    #[error("empty value for \"@Serialized\" not allowed")]
    EmptyValue,

    /// An inner error annotated with the source line it occurred on.
    ///
    /// Line numbers are 0-based, matching source order; `text` is the raw,
    /// untrimmed line.
    #[error("parsing error in line {line}: {source}\n{text}")]
    Line {
        line: usize,
        text: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a lexical error for a malformed token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use framsreader::Error;
    ///
    /// let err = Error::lexical("hex literal with no digits");
    /// assert!(err.to_string().contains("malformed token"));
    /// ```
    pub fn lexical<T: fmt::Display>(msg: T) -> Self {
        Error::Lexical(msg.to_string())
    }

    /// Creates a structural error for a grammar violation.
    pub fn structural<T: fmt::Display>(msg: T) -> Self {
        Error::Structural(msg.to_string())
    }

    /// Creates an out-of-range back-reference error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use framsreader::Error;
    ///
    /// let err = Error::reference(5, 0);
    /// assert!(err.to_string().contains("^5"));
    /// ```
    pub fn reference(index: usize, registered: usize) -> Self {
        Error::Reference { index, registered }
    }

    /// Creates an error for a recognized but unimplemented production.
    pub fn unsupported<T: fmt::Display>(msg: T) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates a multiline-capture error.
    pub fn multiline<T: fmt::Display>(msg: T) -> Self {
        Error::Multiline(msg.to_string())
    }

    /// Creates an I/O error for file reading failures.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    /// Annotates this error with the 0-based line number and raw text of the
    /// line it occurred on.
    ///
    /// Errors already carrying line context are returned unchanged, so the
    /// innermost annotation wins.
    #[must_use]
    pub fn at_line(self, line: usize, text: &str) -> Self {
        match self {
            Error::Line { .. } => self,
            other => Error::Line {
                line,
                text: text.to_string(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
