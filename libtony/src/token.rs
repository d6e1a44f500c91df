//! Tokens produced by the scanner.

use crate::span::Span;

/// Every terminal the scanner can produce, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// End of input. The only token with an empty span.
    End,
    Comment,
    /// `---`
    DocumentSeparator,
    Whitespace,
    Newline,
    LBrace,
    RBrace,
    Comma,
    Colon,
    LBracket,
    RBracket,
    Bang,
    TagName,
    Dot,
    LParen,
    RParen,
    DoubleQuote,
    /// Plain run inside `"..."`.
    DoubleQuotedContent,
    SingleQuote,
    /// Plain run inside `'...'`.
    SingleQuotedContent,
    StringEscape,
    Pipe,
    /// One physical line of a block literal body, indentation included.
    BlockLine,
    DollarBracket,
    /// Body of an interpolation or node replacement.
    OpaqueContent,
    DotBracket,
    Literal,
    Float,
    Integer,
    Hex,
    Octal,
    True,
    False,
    Null,
    /// A character that starts no token in the current mode.
    Error,
}

impl TokenKind {
    /// All token kinds in catalog order.
    pub const ALL: [TokenKind; 35] = [
        TokenKind::End,
        TokenKind::Comment,
        TokenKind::DocumentSeparator,
        TokenKind::Whitespace,
        TokenKind::Newline,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Bang,
        TokenKind::TagName,
        TokenKind::Dot,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::DoubleQuote,
        TokenKind::DoubleQuotedContent,
        TokenKind::SingleQuote,
        TokenKind::SingleQuotedContent,
        TokenKind::StringEscape,
        TokenKind::Pipe,
        TokenKind::BlockLine,
        TokenKind::DollarBracket,
        TokenKind::OpaqueContent,
        TokenKind::DotBracket,
        TokenKind::Literal,
        TokenKind::Float,
        TokenKind::Integer,
        TokenKind::Hex,
        TokenKind::Octal,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Error,
    ];

    /// Stable catalog name. Punctuation is named by its own text.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::End => "end",
            TokenKind::Comment => "comment",
            TokenKind::DocumentSeparator => "---",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Bang => "!",
            TokenKind::TagName => "tag_name",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::DoubleQuote => "\"",
            TokenKind::DoubleQuotedContent => "double_quoted_content",
            TokenKind::SingleQuote => "'",
            TokenKind::SingleQuotedContent => "single_quoted_content",
            TokenKind::StringEscape => "string_escape",
            TokenKind::Pipe => "|",
            TokenKind::BlockLine => "block_line",
            TokenKind::DollarBracket => "$[",
            TokenKind::OpaqueContent => "opaque_content",
            TokenKind::DotBracket => ".[",
            TokenKind::Literal => "literal",
            TokenKind::Float => "float",
            TokenKind::Integer => "integer",
            TokenKind::Hex => "hex",
            TokenKind::Octal => "octal",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Error => "error",
        }
    }

    /// Visible tokens show up in the tree consumers query against.
    pub fn is_visible(self) -> bool {
        !matches!(
            self,
            TokenKind::End
                | TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::TagName
                | TokenKind::DoubleQuotedContent
                | TokenKind::SingleQuotedContent
                | TokenKind::BlockLine
                | TokenKind::OpaqueContent
                | TokenKind::Float
                | TokenKind::Integer
                | TokenKind::Hex
                | TokenKind::Octal
                | TokenKind::Error
        )
    }

    /// Named tokens are visible leaves with a kind name of their own
    /// rather than their literal text. Comments are visible but unnamed,
    /// so they stay out of S-expressions.
    pub fn is_named(self) -> bool {
        matches!(
            self,
            TokenKind::End
                | TokenKind::StringEscape
                | TokenKind::Literal
                | TokenKind::Null
        )
    }

    /// Extras may appear between any two grammar tokens.
    pub fn is_extra(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
        )
    }

    pub fn is_number(self) -> bool {
        matches!(
            self,
            TokenKind::Float | TokenKind::Integer | TokenKind::Hex | TokenKind::Octal
        )
    }

    /// Closers that end a bracketed construct.
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen
        )
    }
}

/// A scanned token: a kind and the bytes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Set on lexical errors and on block lines that break the header rule.
    pub has_error: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            has_error: kind == TokenKind::Error,
        }
    }

    /// A token covering bytes that break a lexical rule.
    pub fn erroneous(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            has_error: true,
        }
    }

    /// The source text this token covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }
}
