//! Tony lexer and parser.
//!
//! Tony is a compact data-interchange language in the JSON/YAML family. It
//! adds typed tags (`!name(args)`), string interpolation (`$[...]`), node
//! replacement (`.[...]`), literal block scalars (`|`) and multi-document
//! streams separated by `---`.
//!
//! This crate turns source text into a lossless concrete syntax tree: every
//! byte of the input, comments and whitespace included, belongs to exactly
//! one leaf. Parsing never fails on malformed input; problems are marked in
//! the tree and listed as diagnostics.
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: a stateless function from `(source, offset, mode)` to the
//!    next token. Bare words are scanned maximally and then classified as
//!    numbers, keywords, separators or literals.
//!
//! 2. **Lexer**: a cursor over the scanner with lookahead and checkpoints.
//!
//! 3. **Grammar driver**: recursive descent that picks the lexical mode for
//!    every token it reads and assembles the CST, recovering locally from
//!    errors.

mod chars;
mod encode;
mod error;
mod lexer;
mod options;
mod parser;
mod scanner;
mod span;
mod syntax;
mod token;
mod tree;

pub use encode::{display_name, encode, encode_node, Format};
pub use error::{Diagnostic, ParseContext, ParseError, Result, SyntaxErrorKind};
pub use lexer::{Checkpoint, Lexer};
pub use options::ParseOptions;
pub use parser::can_start_value;
pub use scanner::{scan, Mode};
pub use span::{LineIndex, Span};
pub use syntax::{NodeKind, Symbol};
pub use token::{Token, TokenKind};
pub use tree::{Document, Interior, Leaves, Node};

/// Parse a Tony document, failing on the first syntax error.
///
/// # Example
///
/// ```
/// use libtony::parse;
///
/// let doc = parse("{a: 1}").unwrap();
/// assert_eq!(doc.items().count(), 1);
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_filename(input, None)
}

/// Parse a Tony document with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Document> {
    let mut options = ParseOptions::new();
    options.filename = filename.map(String::from);
    let document = parser::parse_source(input, &options);
    match document.errors(input).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(document),
    }
}

/// Parse a Tony document, always returning a tree.
///
/// Malformed regions are flagged in the tree and listed in
/// [`Document::diagnostics`].
pub fn parse_document(input: &str) -> Document {
    parser::parse_source(input, &ParseOptions::default())
}

/// Parse with a deadline, a cancel flag or a filename.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Document {
    parser::parse_source(input, options)
}
