//! Phase 1: Scanner
//!
//! `scan` reads exactly one token starting at a byte offset. It keeps no
//! state between calls: the parser owns the cursor and picks the lexical
//! mode for every call, so any offset can be rescanned under any mode.
//!
//! Whitespace, newlines and comments are recognized in every mode and are
//! returned like any other token. Bare words are scanned maximally first
//! and classified afterwards, so `1e5x` is one literal and `---abc` is not
//! a separator.

use crate::chars;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Which token rules apply at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Between top-level items. A bare `---` is always a separator.
    TopLevel,
    /// Inside containers, tags and map entries. A bare `---` separates
    /// only at column 0.
    Value,
    DoubleQuoted,
    SingleQuoted,
    /// Body of `$[...]` or `.[...]`. The first `]` closes it.
    Opaque,
    /// Lines following a `|` that sits on a line indented by `indent`.
    /// Inside a container, `closer` is the closer of the innermost one; a
    /// body line stops before it or before a comma.
    BlockLiteral {
        indent: usize,
        closer: Option<TokenKind>,
    },
    /// Right after `!` or after a `.` between tag-name segments.
    TagName,
}

/// Scan one token at `cursor`, returning it with the offset just past it.
///
/// Never fails. Every token except end-of-input covers at least one code
/// point.
pub fn scan(source: &str, cursor: usize, mode: Mode) -> (Token, usize) {
    let token = scan_token(source, cursor, mode);
    (token, token.span.end)
}

fn scan_token(source: &str, cursor: usize, mode: Mode) -> Token {
    let mut rest = source[cursor..].chars();
    let Some(c) = rest.next() else {
        return Token::new(TokenKind::End, Span::empty(cursor));
    };
    let next = rest.next();
    match mode {
        Mode::TopLevel | Mode::Value => scan_value(source, cursor, c, next, mode),
        Mode::DoubleQuoted => scan_quoted(source, cursor, c, next, '"'),
        Mode::SingleQuoted => scan_quoted(source, cursor, c, next, '\''),
        Mode::Opaque => scan_opaque(source, cursor, c),
        Mode::BlockLiteral { indent, closer } => {
            scan_block(source, cursor, c, next, indent, closer)
        }
        Mode::TagName => scan_tag(source, cursor, c, next),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn token(kind: TokenKind, start: usize, end: usize) -> Token {
    Token::new(kind, Span::new(start, end))
}

fn single(kind: TokenKind, start: usize, c: char) -> Token {
    token(kind, start, start + c.len_utf8())
}

/// Offset of the first character at or after `from` that fails `keep`.
fn run_while(source: &str, from: usize, keep: impl Fn(char) -> bool) -> usize {
    source[from..]
        .char_indices()
        .find(|&(_, c)| !keep(c))
        .map(|(i, _)| from + i)
        .unwrap_or(source.len())
}

/// Offset of the `\n` ending the line containing `from`, or end of input.
fn line_end(source: &str, from: usize) -> usize {
    source[from..]
        .find('\n')
        .map(|i| from + i)
        .unwrap_or(source.len())
}

/// True when `offset` is the first byte of a line.
pub fn at_line_start(source: &str, offset: usize) -> bool {
    offset == 0 || source.as_bytes().get(offset - 1) == Some(&b'\n')
}

/// Indentation (in blank characters) of the line containing `offset`.
pub fn line_indent(source: &str, offset: usize) -> usize {
    let start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[start..]
        .chars()
        .take_while(|&c| chars::is_blank(c))
        .count()
}

/// Where a comment starting at `start` ends. Comments run to the end of
/// the line, but inside quoted and opaque bodies they also stop before
/// whatever would close or interrupt the body.
fn comment_end(source: &str, start: usize, mode: Mode) -> usize {
    let body = &source[start..];
    for (i, c) in body.char_indices().skip(1) {
        let stop = match mode {
            Mode::DoubleQuoted => c == '"' || c == '\\' || body[i..].starts_with("$["),
            Mode::SingleQuoted => c == '\'' || c == '\\',
            Mode::Opaque => c == ']',
            _ => false,
        };
        if c == '\n' || stop {
            return start + i;
        }
    }
    source.len()
}

/// Whitespace, newline and comment tokens, shared by every mode.
fn scan_extra(source: &str, cursor: usize, c: char, mode: Mode) -> Option<Token> {
    match c {
        '\n' => Some(single(TokenKind::Newline, cursor, c)),
        '#' => Some(token(
            TokenKind::Comment,
            cursor,
            comment_end(source, cursor, mode),
        )),
        c if chars::is_blank(c) => Some(token(
            TokenKind::Whitespace,
            cursor,
            run_while(source, cursor, chars::is_blank),
        )),
        _ => None,
    }
}

// ============================================================================
// Value and top level
// ============================================================================

fn scan_value(source: &str, cursor: usize, c: char, next: Option<char>, mode: Mode) -> Token {
    if let Some(extra) = scan_extra(source, cursor, c, mode) {
        return extra;
    }
    let kind = match c {
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        '!' => TokenKind::Bang,
        '"' => TokenKind::DoubleQuote,
        '\'' => TokenKind::SingleQuote,
        '|' => return scan_pipe(source, cursor, next),
        '$' if next == Some('[') => return token(TokenKind::DollarBracket, cursor, cursor + 2),
        '.' if next == Some('[') => return token(TokenKind::DotBracket, cursor, cursor + 2),
        c if chars::is_word_start(c) => return scan_word(source, cursor, mode),
        _ => TokenKind::Error,
    };
    single(kind, cursor, c)
}

/// `|`, or `|-`/`|+` when the indicator is followed by a blank, a
/// newline, a comment or end of input.
fn scan_pipe(source: &str, cursor: usize, next: Option<char>) -> Token {
    if let Some('-' | '+') = next {
        let after = source[cursor + 2..].chars().next();
        if after.map_or(true, |c| chars::is_blank(c) || c == '\n' || c == '#') {
            return token(TokenKind::Pipe, cursor, cursor + 2);
        }
    }
    token(TokenKind::Pipe, cursor, cursor + 1)
}

fn scan_word(source: &str, cursor: usize, mode: Mode) -> Token {
    let end = run_while(source, cursor, chars::is_word_continue);
    let kind = classify_word(&source[cursor..end], mode, at_line_start(source, cursor));
    token(kind, cursor, end)
}

/// Classify a maximal bare word.
pub fn classify_word(word: &str, mode: Mode, line_start: bool) -> TokenKind {
    match word {
        "---" if mode == Mode::TopLevel || line_start => TokenKind::DocumentSeparator,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ => classify_number(word).unwrap_or(TokenKind::Literal),
    }
}

/// Match the whole word against the four number forms, allowing one
/// leading `-`.
pub fn classify_number(word: &str) -> Option<TokenKind> {
    let body = word.strip_prefix('-').unwrap_or(word);
    let bytes = body.as_bytes();

    if let Some(digits) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        return (!digits.is_empty() && digits.chars().all(chars::is_hex_digit))
            .then_some(TokenKind::Hex);
    }
    if let Some(digits) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        return (!digits.is_empty() && digits.chars().all(chars::is_octal_digit))
            .then_some(TokenKind::Octal);
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = digits(0);
    if i == 0 {
        return None;
    }
    let mut float = false;
    if bytes.get(i) == Some(&b'.') {
        let frac = digits(i + 1);
        if frac == 0 {
            return None;
        }
        i += 1 + frac;
        float = true;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp = digits(i);
        if exp == 0 {
            return None;
        }
        i += exp;
        float = true;
    }
    if i != bytes.len() {
        return None;
    }
    Some(if float {
        TokenKind::Float
    } else {
        TokenKind::Integer
    })
}

// ============================================================================
// Quoted bodies
// ============================================================================

fn scan_quoted(source: &str, cursor: usize, c: char, next: Option<char>, quote: char) -> Token {
    let double = quote == '"';
    let mode = if double {
        Mode::DoubleQuoted
    } else {
        Mode::SingleQuoted
    };
    if let Some(extra) = scan_extra(source, cursor, c, mode) {
        return extra;
    }
    if c == quote {
        let kind = if double {
            TokenKind::DoubleQuote
        } else {
            TokenKind::SingleQuote
        };
        return single(kind, cursor, c);
    }
    if c == '\\' {
        return scan_escape(source, cursor, next);
    }
    if double && c == '$' && next == Some('[') {
        return token(TokenKind::DollarBracket, cursor, cursor + 2);
    }
    if chars::is_control(c) {
        return single(TokenKind::Error, cursor, c);
    }

    let end = source[cursor..]
        .char_indices()
        .find(|&(i, ch)| {
            ch == quote
                || ch == '\\'
                || ch == '\n'
                || chars::is_control(ch)
                || (double && source[cursor + i..].starts_with("$["))
        })
        .map(|(i, _)| cursor + i)
        .unwrap_or(source.len());
    let kind = if double {
        TokenKind::DoubleQuotedContent
    } else {
        TokenKind::SingleQuotedContent
    };
    token(kind, cursor, end)
}

/// `\"`, `\'`, `\\`, `\b`, `\f`, `\n`, `\r`, `\t` or `\uXXXX`. Anything else
/// leaves the backslash alone as a one-byte error token.
fn scan_escape(source: &str, cursor: usize, next: Option<char>) -> Token {
    match next {
        Some('"' | '\'' | '\\' | 'b' | 'f' | 'n' | 'r' | 't') => {
            token(TokenKind::StringEscape, cursor, cursor + 2)
        }
        Some('u') => {
            let hex = source[cursor + 2..]
                .chars()
                .take(4)
                .take_while(|&c| chars::is_hex_digit(c))
                .count();
            if hex == 4 {
                token(TokenKind::StringEscape, cursor, cursor + 6)
            } else {
                token(TokenKind::Error, cursor, cursor + 1)
            }
        }
        _ => token(TokenKind::Error, cursor, cursor + 1),
    }
}

// ============================================================================
// Opaque bodies, tags and block literals
// ============================================================================

fn scan_opaque(source: &str, cursor: usize, c: char) -> Token {
    if let Some(extra) = scan_extra(source, cursor, c, Mode::Opaque) {
        return extra;
    }
    if c == ']' {
        return single(TokenKind::RBracket, cursor, c);
    }
    if chars::is_control(c) {
        return single(TokenKind::Error, cursor, c);
    }
    let end = run_while(source, cursor, |ch| {
        ch != ']' && ch != '\n' && !chars::is_control(ch)
    });
    token(TokenKind::OpaqueContent, cursor, end)
}

fn scan_tag(source: &str, cursor: usize, c: char, next: Option<char>) -> Token {
    match c {
        '.' | '$' if next == Some('[') => scan_value(source, cursor, c, next, Mode::Value),
        '.' => single(TokenKind::Dot, cursor, c),
        '(' => single(TokenKind::LParen, cursor, c),
        c if chars::is_tag_name_char(c) => token(
            TokenKind::TagName,
            cursor,
            run_while(source, cursor, chars::is_tag_name_char),
        ),
        _ => scan_value(source, cursor, c, next, Mode::Value),
    }
}

/// Block literal lines.
///
/// On the header line (after the `|`) only blanks and a comment are
/// expected. A closer or comma ends the (empty) block; anything else is
/// swallowed up to the end of the line as an error-flagged block line.
///
/// At the start of a line, a blank line comes back as whitespace, a line
/// indented deeper than `indent` is a block line, and anything else is
/// scanned as a value so the parser can see the block has ended. Inside a
/// container a line also stops before the enclosing closer or a comma.
fn scan_block(
    source: &str,
    cursor: usize,
    c: char,
    next: Option<char>,
    indent: usize,
    closer: Option<TokenKind>,
) -> Token {
    if c == '\n' {
        return single(TokenKind::Newline, cursor, c);
    }
    let stop = closer.and_then(closer_char);
    let ends_line = |ch: char| ch == '\n' || (stop.is_some() && (Some(ch) == stop || ch == ','));
    let end = run_while(source, cursor, |ch| !ends_line(ch));

    if !at_line_start(source, cursor) {
        return match c {
            '#' => token(
                TokenKind::Comment,
                cursor,
                comment_end(source, cursor, Mode::Value),
            ),
            c if chars::is_blank(c) => token(
                TokenKind::Whitespace,
                cursor,
                run_while(source, cursor, chars::is_blank),
            ),
            '}' | ']' | ')' | ',' => scan_value(source, cursor, c, next, Mode::Value),
            _ => Token::erroneous(TokenKind::BlockLine, Span::new(cursor, end)),
        };
    }

    let line = &source[cursor..line_end(source, cursor)];
    let content = line.trim_start_matches(chars::is_blank);
    if content.is_empty() {
        return token(TokenKind::Whitespace, cursor, cursor + line.len());
    }
    let depth = line[..line.len() - content.len()].chars().count();
    let closes = content.starts_with(|ch| matches!(ch, '}' | ']' | ')') || ends_line(ch));
    if depth > indent && !closes {
        return token(TokenKind::BlockLine, cursor, end);
    }
    scan_value(source, cursor, c, next, Mode::Value)
}

fn closer_char(kind: TokenKind) -> Option<char> {
    match kind {
        TokenKind::RBrace => Some('}'),
        TokenKind::RBracket => Some(']'),
        TokenKind::RParen => Some(')'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str, mode: Mode) -> Vec<(TokenKind, &str)> {
        let mut out = Vec::new();
        let mut cursor = 0;
        loop {
            let (tok, next) = scan(source, cursor, mode);
            if tok.kind == TokenKind::End {
                break;
            }
            assert!(next > cursor, "no progress at {}", cursor);
            out.push((tok.kind, tok.text(source)));
            cursor = next;
        }
        out
    }

    fn kinds(source: &str, mode: Mode) -> Vec<TokenKind> {
        scan_all(source, mode).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_longest_match_literal() {
        assert_eq!(scan_all("1e5x", Mode::Value), vec![(TokenKind::Literal, "1e5x")]);
        assert_eq!(scan_all("1e5", Mode::Value), vec![(TokenKind::Float, "1e5")]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(classify_number("42"), Some(TokenKind::Integer));
        assert_eq!(classify_number("-42"), Some(TokenKind::Integer));
        assert_eq!(classify_number("3.14"), Some(TokenKind::Float));
        assert_eq!(classify_number("1.5E-3"), Some(TokenKind::Float));
        assert_eq!(classify_number("2e+10"), Some(TokenKind::Float));
        assert_eq!(classify_number("0x1F"), Some(TokenKind::Hex));
        assert_eq!(classify_number("-0XaB"), Some(TokenKind::Hex));
        assert_eq!(classify_number("0o17"), Some(TokenKind::Octal));
        assert_eq!(classify_number("0o18"), None);
        assert_eq!(classify_number("0x"), None);
        assert_eq!(classify_number("1."), None);
        assert_eq!(classify_number(".5"), None);
        assert_eq!(classify_number("1e"), None);
        assert_eq!(classify_number("--5"), None);
        assert_eq!(classify_number("-"), None);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false null nully", Mode::Value),
            vec![
                TokenKind::True,
                TokenKind::Whitespace,
                TokenKind::False,
                TokenKind::Whitespace,
                TokenKind::Null,
                TokenKind::Whitespace,
                TokenKind::Literal,
            ]
        );
    }

    #[test]
    fn test_separator_disambiguation() {
        assert_eq!(scan_all("---abc", Mode::TopLevel), vec![(TokenKind::Literal, "---abc")]);
        assert_eq!(
            scan_all("---\n", Mode::TopLevel),
            vec![(TokenKind::DocumentSeparator, "---"), (TokenKind::Newline, "\n")]
        );
        assert_eq!(kinds("--x", Mode::TopLevel), vec![TokenKind::Literal]);
    }

    #[test]
    fn test_separator_inside_values() {
        let (tok, _) = scan("[ ---", 2, Mode::Value);
        assert_eq!(tok.kind, TokenKind::Literal);
        let (tok, _) = scan("[\n---", 2, Mode::Value);
        assert_eq!(tok.kind, TokenKind::DocumentSeparator);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{a:[1,2]}", Mode::Value),
            vec![
                TokenKind::LBrace,
                TokenKind::Literal,
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::Integer,
                TokenKind::Comma,
                TokenKind::Integer,
                TokenKind::RBracket,
                TokenKind::RBrace,
            ]
        );
        assert_eq!(
            kinds("$[x] .[y]", Mode::Value),
            vec![
                TokenKind::DollarBracket,
                TokenKind::Literal,
                TokenKind::RBracket,
                TokenKind::Whitespace,
                TokenKind::DotBracket,
                TokenKind::Literal,
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn test_word_continuation() {
        assert_eq!(scan_all("it's", Mode::Value), vec![(TokenKind::Literal, "it's")]);
        assert_eq!(
            scan_all("wow!", Mode::Value),
            vec![(TokenKind::Literal, "wow!")]
        );
        assert_eq!(
            kinds("a#b", Mode::Value),
            vec![TokenKind::Literal, TokenKind::Comment]
        );
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(
            scan_all("# hi ] \"\nx", Mode::Value),
            vec![
                (TokenKind::Comment, "# hi ] \""),
                (TokenKind::Newline, "\n"),
                (TokenKind::Literal, "x"),
            ]
        );
    }

    #[test]
    fn test_comment_inside_bodies() {
        assert_eq!(
            scan_all("#x\"", Mode::DoubleQuoted),
            vec![(TokenKind::Comment, "#x"), (TokenKind::DoubleQuote, "\"")]
        );
        assert_eq!(
            scan_all("#x$[", Mode::DoubleQuoted),
            vec![(TokenKind::Comment, "#x"), (TokenKind::DollarBracket, "$[")]
        );
        assert_eq!(
            scan_all("#a]", Mode::Opaque),
            vec![(TokenKind::Comment, "#a"), (TokenKind::RBracket, "]")]
        );
    }

    #[test]
    fn test_unexpected_characters() {
        let toks = scan_all("\u{0}\u{a0}x", Mode::Value);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Error, "\u{0}"),
                (TokenKind::Error, "\u{a0}"),
                (TokenKind::Literal, "x"),
            ]
        );
        let (tok, _) = scan("\u{0}", 0, Mode::Value);
        assert!(tok.has_error);
    }

    #[test]
    fn test_double_quoted_body() {
        assert_eq!(
            scan_all("a b\\n$[x]c\"", Mode::DoubleQuoted),
            vec![
                (TokenKind::DoubleQuotedContent, "a b"),
                (TokenKind::StringEscape, "\\n"),
                (TokenKind::DollarBracket, "$["),
                (TokenKind::DoubleQuotedContent, "x]c"),
                (TokenKind::DoubleQuote, "\""),
            ]
        );
    }

    #[test]
    fn test_single_quoted_body() {
        assert_eq!(
            scan_all("a$[b\"'", Mode::SingleQuoted),
            vec![
                (TokenKind::SingleQuotedContent, "a$[b\""),
                (TokenKind::SingleQuote, "'"),
            ]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            scan_all("\\u00e9\\u12\\q", Mode::DoubleQuoted),
            vec![
                (TokenKind::StringEscape, "\\u00e9"),
                (TokenKind::Error, "\\"),
                (TokenKind::DoubleQuotedContent, "u12"),
                (TokenKind::Error, "\\"),
                (TokenKind::DoubleQuotedContent, "q"),
            ]
        );
        assert_eq!(
            kinds("\\\"\\'\\\\\\b\\f\\r\\t", Mode::SingleQuoted),
            vec![TokenKind::StringEscape; 7]
        );
    }

    #[test]
    fn test_strings_span_lines() {
        assert_eq!(
            kinds("a\nb'", Mode::SingleQuoted),
            vec![
                TokenKind::SingleQuotedContent,
                TokenKind::Newline,
                TokenKind::SingleQuotedContent,
                TokenKind::SingleQuote,
            ]
        );
    }

    #[test]
    fn test_opaque_no_nesting() {
        assert_eq!(
            scan_all("a[b]c]", Mode::Opaque),
            vec![
                (TokenKind::OpaqueContent, "a[b"),
                (TokenKind::RBracket, "]"),
                (TokenKind::OpaqueContent, "c"),
                (TokenKind::RBracket, "]"),
            ]
        );
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(
            scan_all("a.b(", Mode::TagName),
            vec![
                (TokenKind::TagName, "a"),
                (TokenKind::Dot, "."),
                (TokenKind::TagName, "b"),
                (TokenKind::LParen, "("),
            ]
        );
        let (tok, _) = scan("!b", 0, Mode::TagName);
        assert_eq!(tok.kind, TokenKind::Bang);
        let (tok, _) = scan(".[x]", 0, Mode::TagName);
        assert_eq!(tok.kind, TokenKind::DotBracket);
    }

    #[test]
    fn test_pipe_chomping() {
        assert_eq!(scan_all("|-", Mode::Value), vec![(TokenKind::Pipe, "|-")]);
        assert_eq!(
            scan_all("|+ #c", Mode::Value)[0],
            (TokenKind::Pipe, "|+")
        );
        assert_eq!(
            scan_all("|-x", Mode::Value),
            vec![(TokenKind::Pipe, "|"), (TokenKind::Literal, "-x")]
        );
    }

    #[test]
    fn test_block_lines() {
        let src = "a: |\n  one\n\n  two\nb";
        let mode = Mode::BlockLiteral { indent: 0, closer: None };
        let start = src.find('|').map(|i| i + 1).unwrap_or_default();
        let mut cursor = start;
        let mut got = Vec::new();
        for _ in 0..6 {
            let (tok, next) = scan(src, cursor, mode);
            got.push((tok.kind, tok.text(src)));
            cursor = next;
        }
        assert_eq!(
            got,
            vec![
                (TokenKind::Newline, "\n"),
                (TokenKind::BlockLine, "  one"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Newline, "\n"),
                (TokenKind::BlockLine, "  two"),
                (TokenKind::Newline, "\n"),
            ]
        );
        let (tok, _) = scan(src, cursor, mode);
        assert_eq!(tok.kind, TokenKind::Literal);
    }

    #[test]
    fn test_block_header_junk() {
        let (tok, _) = scan("| junk\n", 2, Mode::BlockLiteral { indent: 0, closer: None });
        assert_eq!(tok.kind, TokenKind::BlockLine);
        assert!(tok.has_error);
        assert_eq!(tok.span, Span::new(2, 6));
    }

    #[test]
    fn test_block_stops_at_closer() {
        let (tok, _) = scan("  }", 0, Mode::BlockLiteral { indent: 0, closer: None });
        assert_eq!(tok.kind, TokenKind::Whitespace);
        let (tok, _) = scan("   \n", 0, Mode::BlockLiteral { indent: 4, closer: None });
        assert_eq!((tok.kind, tok.span), (TokenKind::Whitespace, Span::new(0, 3)));
    }

    #[test]
    fn test_block_line_stops_at_enclosing_closer() {
        let mode = Mode::BlockLiteral {
            indent: 0,
            closer: Some(TokenKind::RBrace),
        };
        let src = "  hello\n  world}";
        let (tok, _) = scan(src, 8, mode);
        assert_eq!((tok.kind, tok.text(src)), (TokenKind::BlockLine, "  world"));
        let (tok, _) = scan(src, 15, mode);
        assert_eq!(tok.kind, TokenKind::RBrace);

        let mode = Mode::BlockLiteral {
            indent: 0,
            closer: Some(TokenKind::RBracket),
        };
        assert_eq!(
            scan_all("  a}b, 2]", mode),
            vec![
                (TokenKind::BlockLine, "  a}b"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::BlockLine, "2"),
                (TokenKind::RBracket, "]"),
            ]
        );
    }

    #[test]
    fn test_block_line_at_top_level_runs_to_end_of_line() {
        let mode = Mode::BlockLiteral { indent: 0, closer: None };
        assert_eq!(scan_all("  a, b}", mode), vec![(TokenKind::BlockLine, "  a, b}")]);
    }

    #[test]
    fn test_line_indent() {
        assert_eq!(line_indent("x\n   a: |", 8), 3);
        assert_eq!(line_indent("|", 0), 0);
        assert!(at_line_start("a\nb", 2));
        assert!(!at_line_start("a\nb", 1));
    }

    #[test]
    fn test_end_of_input() {
        let (tok, next) = scan("ab", 2, Mode::Value);
        assert_eq!(tok.kind, TokenKind::End);
        assert_eq!(next, 2);
        assert!(tok.span.is_empty());
    }
}
