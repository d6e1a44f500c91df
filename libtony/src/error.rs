//! Error types for Tony parsing.
//!
//! Malformed input never aborts a parse. Each problem the parser recovers
//! from is recorded as a [`Diagnostic`] on the returned document; the
//! strict entry points turn the first one into a [`ParseError`].

use std::fmt;

use thiserror::Error;

use crate::span::{LineIndex, Span};

/// Result type for strict Tony parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages. `line` and `col` are
    /// zero-based and printed one-based.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => format!(" at {}:{}", line + 1, col + 1),
        }
    }
}

/// What went wrong at a recovered error site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// A character that starts no token where it appears.
    UnexpectedCharacter,
    /// A backslash not followed by a recognized escape.
    BadEscape,
    /// A token that cannot start or continue anything here.
    UnexpectedToken,
    /// A bracket, brace or parenthesis closed implicitly.
    UnclosedDelimiter,
    /// A quoted string or opaque body cut off by end of input.
    UnterminatedString,
    MissingColon,
    MissingComma,
    MissingTagName,
    /// A container or block literal used as a map key.
    InvalidKey,
    /// Text after `|` on the header line of a block literal.
    BlockLiteralHeader,
}

impl SyntaxErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedCharacter => "Unexpected character",
            SyntaxErrorKind::BadEscape => "Bad escaped character",
            SyntaxErrorKind::UnexpectedToken => "Unexpected token",
            SyntaxErrorKind::UnclosedDelimiter => "Unclosed delimiter",
            SyntaxErrorKind::UnterminatedString => "Unterminated string",
            SyntaxErrorKind::MissingColon => "Expected colon after key",
            SyntaxErrorKind::MissingComma => "Expected comma",
            SyntaxErrorKind::MissingTagName => "Expected tag name",
            SyntaxErrorKind::InvalidKey => "Invalid key",
            SyntaxErrorKind::BlockLiteralHeader => "Unexpected text after block literal indicator",
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A recovered syntax error and the bytes it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Zero-based line and column of the start of the span.
    pub fn location(&self, source: &str, index: &LineIndex) -> (usize, usize) {
        index.location(source, self.span.start)
    }

    /// Convert into a located error.
    pub fn to_error(&self, source: &str, ctx: &ParseContext) -> ParseError {
        let (line, col) = self.location(source, &LineIndex::new(source));
        ParseError::from_kind(self.kind, ctx.loc_suffix(line, col))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at bytes {}", self.kind, self.span)
    }
}

/// Error type for strict Tony parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected character{0}")]
    UnexpectedCharacter(String),

    #[error("Bad escaped character{0}")]
    BadEscape(String),

    #[error("Unexpected token{0}")]
    UnexpectedToken(String),

    #[error("Unclosed delimiter{0}")]
    UnclosedDelimiter(String),

    #[error("Unterminated string{0}")]
    UnterminatedString(String),

    /// Expected colon after key.
    #[error("Expected colon after key{0}")]
    MissingColon(String),

    #[error("Expected comma{0}")]
    MissingComma(String),

    #[error("Expected tag name{0}")]
    MissingTagName(String),

    /// Container or block literal in key position.
    #[error("Invalid key{0}")]
    InvalidKey(String),

    #[error("Unexpected text after block literal indicator{0}")]
    BlockLiteralHeader(String),
}

impl ParseError {
    /// Build the error for `kind` with a preformatted location suffix.
    pub fn from_kind(kind: SyntaxErrorKind, suffix: String) -> Self {
        match kind {
            SyntaxErrorKind::UnexpectedCharacter => ParseError::UnexpectedCharacter(suffix),
            SyntaxErrorKind::BadEscape => ParseError::BadEscape(suffix),
            SyntaxErrorKind::UnexpectedToken => ParseError::UnexpectedToken(suffix),
            SyntaxErrorKind::UnclosedDelimiter => ParseError::UnclosedDelimiter(suffix),
            SyntaxErrorKind::UnterminatedString => ParseError::UnterminatedString(suffix),
            SyntaxErrorKind::MissingColon => ParseError::MissingColon(suffix),
            SyntaxErrorKind::MissingComma => ParseError::MissingComma(suffix),
            SyntaxErrorKind::MissingTagName => ParseError::MissingTagName(suffix),
            SyntaxErrorKind::InvalidKey => ParseError::InvalidKey(suffix),
            SyntaxErrorKind::BlockLiteralHeader => ParseError::BlockLiteralHeader(suffix),
        }
    }

    pub fn kind(&self) -> SyntaxErrorKind {
        match self {
            ParseError::UnexpectedCharacter(_) => SyntaxErrorKind::UnexpectedCharacter,
            ParseError::BadEscape(_) => SyntaxErrorKind::BadEscape,
            ParseError::UnexpectedToken(_) => SyntaxErrorKind::UnexpectedToken,
            ParseError::UnclosedDelimiter(_) => SyntaxErrorKind::UnclosedDelimiter,
            ParseError::UnterminatedString(_) => SyntaxErrorKind::UnterminatedString,
            ParseError::MissingColon(_) => SyntaxErrorKind::MissingColon,
            ParseError::MissingComma(_) => SyntaxErrorKind::MissingComma,
            ParseError::MissingTagName(_) => SyntaxErrorKind::MissingTagName,
            ParseError::InvalidKey(_) => SyntaxErrorKind::InvalidKey,
            ParseError::BlockLiteralHeader(_) => SyntaxErrorKind::BlockLiteralHeader,
        }
    }

    /// Add location information to an error.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        ParseError::from_kind(self.kind(), ctx.loc_suffix(line, col))
    }
}
