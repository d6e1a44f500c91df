//! Phase 3: Grammar driver
//!
//! A hand-written recursive descent parser over the scanner. Each
//! production asks the lexer for the next token under the mode it needs,
//! so the lexical mode lives in the call stack and nowhere else.
//!
//! Recovery is local. A construct that cannot complete is closed at the
//! nearest synchronizing token (end of input, a `---` at column 0, or a
//! closer belonging to an enclosing construct) and flagged malformed. A
//! token that fits nowhere is wrapped in its own `ERROR` node. Either way
//! a diagnostic is recorded and parsing continues, so every byte read ends
//! up in the tree.

use tracing::{debug, trace};

use crate::error::{Diagnostic, SyntaxErrorKind};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::scanner::{self, Mode};
use crate::span::Span;
use crate::syntax::NodeKind;
use crate::token::{Token, TokenKind};
use crate::tree::{Document, Interior, Node};

/// What the driver expects next. Reported in trace and recovery events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    TopLevelItem,
    Value,
    MapEntryKey,
    MapEntryColon,
    MapEntryValue,
    ArrayElement,
    TagContinuation,
    StringBody,
    Closed,
}

/// Parse a whole source text. Never fails.
pub fn parse_source(source: &str, options: &ParseOptions) -> Document {
    Parser::new(source, options).source_file()
}

/// Can a token of this kind begin a value (or a map key)?
pub fn can_start_value(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LBrace
            | TokenKind::LBracket
            | TokenKind::DoubleQuote
            | TokenKind::SingleQuote
            | TokenKind::Pipe
            | TokenKind::DollarBracket
            | TokenKind::DotBracket
            | TokenKind::Bang
            | TokenKind::Literal
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
    ) || kind.is_number()
}

struct Parser<'s, 'o> {
    lexer: Lexer<'s>,
    options: &'o ParseOptions,
    diagnostics: Vec<Diagnostic>,
    /// Closers of the bracketed constructs currently open, innermost last.
    closers: Vec<TokenKind>,
    expect: Expect,
}

impl<'s, 'o> Parser<'s, 'o> {
    fn new(source: &'s str, options: &'o ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            options,
            diagnostics: Vec::new(),
            closers: Vec::new(),
            expect: Expect::TopLevelItem,
        }
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn bump(&mut self, mode: Mode) -> Token {
        self.lexer.bump(mode)
    }

    fn leaf(&mut self, mode: Mode) -> Node {
        Node::Leaf(self.lexer.bump(mode))
    }

    fn error(&mut self, kind: SyntaxErrorKind, span: Span) {
        debug!(
            ?kind,
            start = span.start,
            end = span.end,
            expect = ?self.expect,
            "recovered syntax error"
        );
        self.diagnostics.push(Diagnostic::new(kind, span));
    }

    /// Consume extras into `children`.
    fn extras(&mut self, mode: Mode, children: &mut Vec<Node>) {
        while self.lexer.peek(mode).kind.is_extra() {
            children.push(self.leaf(mode));
        }
    }

    /// Skip extras, then run `accept` on the next significant token. If it
    /// declines, rewind so the extras are left for the enclosing node.
    fn lookahead(&mut self, accept: impl Fn(TokenKind) -> bool) -> Option<Vec<Node>> {
        let checkpoint = self.lexer.checkpoint();
        let mut extras = Vec::new();
        self.extras(Mode::Value, &mut extras);
        if accept(self.lexer.peek(Mode::Value).kind) {
            Some(extras)
        } else {
            self.lexer.restore(checkpoint);
            None
        }
    }

    /// Does this token end the construct being parsed without belonging
    /// to it?
    fn synchronizes(&self, token: &Token) -> bool {
        match token.kind {
            TokenKind::End | TokenKind::DocumentSeparator => true,
            kind if kind.is_closer() => self.closers.contains(&kind),
            _ => false,
        }
    }

    /// Wrap one token that fits nowhere in an `ERROR` node.
    fn stray(&mut self, mode: Mode) -> Node {
        let token = self.bump(mode);
        let kind = if token.kind != TokenKind::Error {
            SyntaxErrorKind::UnexpectedToken
        } else if token.text(self.lexer.source()).starts_with('\\') {
            SyntaxErrorKind::BadEscape
        } else {
            SyntaxErrorKind::UnexpectedCharacter
        };
        self.error(kind, token.span);
        Node::Interior(Interior::new(
            NodeKind::Error,
            vec![Node::Leaf(token)],
            false,
            token.span.start,
        ))
    }

    fn wrap(&mut self, kind: NodeKind, mode: Mode) -> Node {
        let token = self.bump(mode);
        Node::Interior(Interior::new(
            kind,
            vec![Node::Leaf(token)],
            false,
            token.span.start,
        ))
    }

    // ========================================================================
    // Documents
    // ========================================================================

    fn source_file(mut self) -> Document {
        trace!("enter source_file");
        let mut children = Vec::new();
        let mut cancelled = false;
        loop {
            self.expect = Expect::TopLevelItem;
            self.extras(Mode::TopLevel, &mut children);
            let token = self.lexer.peek(Mode::TopLevel);
            if token.kind == TokenKind::End {
                break;
            }
            if self.options.should_stop() {
                debug!(offset = token.span.start, "parse cancelled");
                cancelled = true;
                break;
            }
            let item = match token.kind {
                TokenKind::DocumentSeparator => {
                    self.wrap(NodeKind::DocumentSeparator, Mode::TopLevel)
                }
                kind if can_start_value(kind) => self.value(Mode::TopLevel),
                _ => self.stray(Mode::TopLevel),
            };
            children.push(item);
        }
        self.expect = Expect::Closed;

        let root = Interior::new(NodeKind::SourceFile, children, false, 0);
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by_key(|d| d.span.start);
        Document::new(root, diagnostics, cancelled, self.options.filename.clone())
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Parse a value whose first token is scanned under `mode`. The caller
    /// has checked that the token can start a value.
    fn value(&mut self, mode: Mode) -> Node {
        let token = self.lexer.peek(mode);
        trace!(
            offset = token.span.start,
            kind = ?token.kind,
            expect = ?self.expect,
            "enter value"
        );
        match token.kind {
            TokenKind::Bang => self.tagged_value(mode),
            TokenKind::LBrace => self.map(mode),
            TokenKind::LBracket => self.array(mode),
            TokenKind::DoubleQuote | TokenKind::SingleQuote => self.string(mode),
            TokenKind::Pipe => self.block_literal(mode),
            TokenKind::DollarBracket => self.opaque(NodeKind::Interpolation, mode),
            TokenKind::DotBracket => self.opaque(NodeKind::NodeReplacement, mode),
            TokenKind::True | TokenKind::False => self.wrap(NodeKind::Boolean, mode),
            TokenKind::Literal | TokenKind::Null => self.leaf(mode),
            kind if kind.is_number() => self.wrap(NodeKind::Number, mode),
            _ => self.stray(mode),
        }
    }

    /// `Tag Value?`. Further tags nest as inner tagged values.
    fn tagged_value(&mut self, mode: Mode) -> Node {
        let start = self.lexer.offset();
        let mut children = vec![self.tag(mode)];
        self.expect = Expect::Value;
        if let Some(mut extras) = self.lookahead(can_start_value) {
            children.append(&mut extras);
            children.push(self.value(Mode::Value));
        }
        Node::Interior(Interior::new(
            NodeKind::TaggedValue,
            children,
            false,
            start,
        ))
    }

    /// `'!' name ('.' name)* ('(' args ')')?` with every part adjacent.
    fn tag(&mut self, mode: Mode) -> Node {
        self.expect = Expect::TagContinuation;
        let start = self.lexer.offset();
        let mut children = vec![self.leaf(mode)];
        let mut malformed = false;
        loop {
            let name = self.lexer.peek(Mode::TagName);
            if name.kind != TokenKind::TagName {
                self.error(SyntaxErrorKind::MissingTagName, Span::empty(name.span.start));
                malformed = true;
                break;
            }
            children.push(self.leaf(Mode::TagName));
            match self.lexer.peek(Mode::TagName).kind {
                TokenKind::Dot => children.push(self.leaf(Mode::TagName)),
                TokenKind::LParen => {
                    children.push(self.leaf(Mode::TagName));
                    malformed |= self.sequence(
                        TokenKind::RParen,
                        Expect::ArrayElement,
                        &mut children,
                        Self::element,
                    );
                    break;
                }
                _ => break,
            }
        }
        Node::Interior(Interior::new(NodeKind::Tag, children, malformed, start))
    }

    fn element(&mut self) -> Node {
        self.value(Mode::Value)
    }

    fn array(&mut self, mode: Mode) -> Node {
        let start = self.lexer.offset();
        let mut children = vec![self.leaf(mode)];
        let malformed = self.sequence(
            TokenKind::RBracket,
            Expect::ArrayElement,
            &mut children,
            Self::element,
        );
        Node::Interior(Interior::new(
            NodeKind::BracketedArray,
            children,
            malformed,
            start,
        ))
    }

    fn map(&mut self, mode: Mode) -> Node {
        let start = self.lexer.offset();
        let mut children = vec![self.leaf(mode)];
        let malformed = self.sequence(
            TokenKind::RBrace,
            Expect::MapEntryKey,
            &mut children,
            Self::map_entry,
        );
        Node::Interior(Interior::new(
            NodeKind::BracketedMap,
            children,
            malformed,
            start,
        ))
    }

    /// Comma-separated items up to `closer`. The opener is already the
    /// last entry of `children`. Returns true if the closer never came.
    fn sequence(
        &mut self,
        closer: TokenKind,
        expect: Expect,
        children: &mut Vec<Node>,
        item: fn(&mut Self) -> Node,
    ) -> bool {
        let opener = children.last().map(Node::span).unwrap_or_default();
        self.closers.push(closer);
        let mut need_comma = false;
        let malformed = loop {
            self.expect = expect;
            self.extras(Mode::Value, children);
            let token = self.lexer.peek(Mode::Value);
            if token.kind == closer {
                children.push(self.leaf(Mode::Value));
                break false;
            }
            if self.synchronizes(&token) {
                self.error(SyntaxErrorKind::UnclosedDelimiter, opener);
                break true;
            }
            match token.kind {
                TokenKind::Comma if need_comma => {
                    children.push(self.leaf(Mode::Value));
                    need_comma = false;
                }
                kind if can_start_value(kind) => {
                    if need_comma {
                        self.error(SyntaxErrorKind::MissingComma, Span::empty(token.span.start));
                    }
                    children.push(item(self));
                    need_comma = true;
                }
                _ => children.push(self.stray(Mode::Value)),
            }
        };
        self.closers.pop();
        malformed
    }

    // ========================================================================
    // Map entries and keys
    // ========================================================================

    /// `Key ':' Value?`. Without the colon the key is wrapped in `ERROR`.
    fn map_entry(&mut self) -> Node {
        let start = self.lexer.offset();
        let key = self.key();
        let key_end = key.span().end;
        let mut children = vec![key];

        self.expect = Expect::MapEntryColon;
        let Some(mut extras) = self.lookahead(|kind| kind == TokenKind::Colon) else {
            self.error(SyntaxErrorKind::MissingColon, Span::empty(key_end));
            return Node::Interior(Interior::new(NodeKind::Error, children, true, start));
        };
        children.append(&mut extras);
        children.push(self.leaf(Mode::Value));

        self.expect = Expect::MapEntryValue;
        if let Some(mut extras) = self.lookahead(can_start_value) {
            children.append(&mut extras);
            children.push(self.value(Mode::Value));
        }
        Node::Interior(Interior::new(NodeKind::MapEntry, children, false, start))
    }

    fn key(&mut self) -> Node {
        self.expect = Expect::MapEntryKey;
        match self.lexer.peek(Mode::Value).kind {
            TokenKind::Bang => self.tagged_key(),
            TokenKind::LBrace | TokenKind::LBracket | TokenKind::Pipe => {
                let inner = self.value(Mode::Value);
                self.error(SyntaxErrorKind::InvalidKey, inner.span());
                let at = inner.span().start;
                Node::Interior(Interior::new(NodeKind::Error, vec![inner], false, at))
            }
            _ => self.value(Mode::Value),
        }
    }

    /// `Tag Key?`, nesting like tagged values.
    fn tagged_key(&mut self) -> Node {
        let start = self.lexer.offset();
        let mut children = vec![self.tag(Mode::Value)];
        if let Some(mut extras) = self.lookahead(can_start_value) {
            children.append(&mut extras);
            children.push(self.key());
        }
        Node::Interior(Interior::new(NodeKind::TaggedKey, children, false, start))
    }

    // ========================================================================
    // Strings, opaque bodies, block literals
    // ========================================================================

    /// A quoted string. Only the matching quote or end of input ends it.
    fn string(&mut self, mode: Mode) -> Node {
        self.expect = Expect::StringBody;
        let open = self.bump(mode);
        let (body, quote) = if open.kind == TokenKind::DoubleQuote {
            (Mode::DoubleQuoted, TokenKind::DoubleQuote)
        } else {
            (Mode::SingleQuoted, TokenKind::SingleQuote)
        };
        let mut children = vec![Node::Leaf(open)];
        let mut malformed = false;
        loop {
            let token = self.lexer.peek(body);
            match token.kind {
                kind if kind == quote => {
                    children.push(self.leaf(body));
                    break;
                }
                TokenKind::End => {
                    self.error(
                        SyntaxErrorKind::UnterminatedString,
                        open.span.merge(token.span),
                    );
                    malformed = true;
                    break;
                }
                TokenKind::DollarBracket => {
                    children.push(self.opaque(NodeKind::Interpolation, body));
                }
                TokenKind::Error => children.push(self.stray(body)),
                _ => children.push(self.leaf(body)),
            }
        }
        Node::Interior(Interior::new(
            NodeKind::String,
            children,
            malformed,
            open.span.start,
        ))
    }

    /// `$[...]` or `.[...]`. The first `]` closes the body.
    fn opaque(&mut self, kind: NodeKind, mode: Mode) -> Node {
        let open = self.bump(mode);
        let mut children = vec![Node::Leaf(open)];
        let mut malformed = false;
        loop {
            let token = self.lexer.peek(Mode::Opaque);
            match token.kind {
                TokenKind::RBracket => {
                    children.push(self.leaf(Mode::Opaque));
                    break;
                }
                TokenKind::End => {
                    self.error(
                        SyntaxErrorKind::UnterminatedString,
                        open.span.merge(token.span),
                    );
                    malformed = true;
                    break;
                }
                TokenKind::Error => children.push(self.stray(Mode::Opaque)),
                _ => children.push(self.leaf(Mode::Opaque)),
            }
        }
        Node::Interior(Interior::new(kind, children, malformed, open.span.start))
    }

    /// `|` followed by every line indented deeper than the line holding it.
    ///
    /// Blank lines are held back until a deeper line follows them, so
    /// trailing blank lines stay with whatever comes after the block.
    fn block_literal(&mut self, mode: Mode) -> Node {
        let source = self.lexer.source();
        let pipe = self.bump(mode);
        let indent = scanner::line_indent(source, pipe.span.start);
        let body = Mode::BlockLiteral {
            indent,
            closer: self.closers.last().copied(),
        };
        let mut children = vec![Node::Leaf(pipe)];

        let mut pending: Vec<Token> = Vec::new();
        let mut checkpoint = self.lexer.checkpoint();
        loop {
            let token = self.lexer.peek(body);
            let line_start = scanner::at_line_start(source, token.span.start);
            let ends_line = source[token.span.end..].starts_with('\n')
                || token.span.end == source.len();
            let commits = match token.kind {
                TokenKind::BlockLine => true,
                TokenKind::Whitespace | TokenKind::Comment if !line_start => true,
                TokenKind::Newline => false,
                TokenKind::Whitespace if ends_line => false,
                _ => break,
            };
            if pending.is_empty() {
                checkpoint = self.lexer.checkpoint();
            }
            pending.push(self.bump(body));
            if commits {
                if token.has_error {
                    self.error(SyntaxErrorKind::BlockLiteralHeader, token.span);
                }
                children.extend(pending.drain(..).map(Node::Leaf));
            }
        }
        if !pending.is_empty() {
            trace!(
                offset = pending[0].span.start,
                count = pending.len(),
                "block literal leaves trailing blank lines"
            );
            self.lexer.restore(checkpoint);
        }
        Node::Interior(Interior::new(
            NodeKind::BlockLiteral,
            children,
            false,
            pipe.span.start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, Format};

    fn parse(source: &str) -> Document {
        parse_source(source, &ParseOptions::default())
    }

    fn sexp(source: &str) -> String {
        encode(&parse(source), source, Format::SExpression)
    }

    fn kinds(source: &str) -> Vec<SyntaxErrorKind> {
        parse(source).diagnostics().iter().map(|d| d.kind).collect()
    }

    fn first_item(doc: &Document) -> &Node {
        doc.items().next().expect("an item")
    }

    #[test]
    fn test_empty_source() {
        let doc = parse("");
        assert_eq!(doc.items().count(), 0);
        assert!(!doc.has_errors());
        assert_eq!(sexp("  # only a comment\n"), "(source_file)");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            sexp("1 -2.5 0x1f 0o7 true false null word"),
            "(source_file (number) (number) (number) (number) (boolean) (boolean) (null) (literal))"
        );
    }

    #[test]
    fn test_longest_match_literal() {
        let doc = parse("1e5x");
        let item = first_item(&doc);
        assert_eq!(item.name(), "literal");
        assert_eq!(item.span(), Span::new(0, 4));
    }

    #[test]
    fn test_separator_vs_literal() {
        assert_eq!(sexp("---abc"), "(source_file (literal))");
        assert_eq!(sexp("---\n"), "(source_file (document_separator))");
        assert_eq!(
            sexp("a\n---\nb"),
            "(source_file (literal) (document_separator) (literal))"
        );
    }

    #[test]
    fn test_nested_tags() {
        let doc = parse("!a!b 1");
        let outer = first_item(&doc);
        assert_eq!(outer.kind(), Some(NodeKind::TaggedValue));
        let tag = &outer.children()[0];
        assert_eq!(tag.kind(), Some(NodeKind::Tag));
        assert_eq!(tag.text("!a!b 1"), "!a");
        let inner = outer.children().last().expect("inner value");
        assert_eq!(inner.kind(), Some(NodeKind::TaggedValue));
        assert_eq!(inner.children()[0].text("!a!b 1"), "!b");
        let number = inner.children().last().expect("number");
        assert_eq!(number.kind(), Some(NodeKind::Number));
        assert_eq!(number.text("!a!b 1"), "1");
        assert!(!doc.has_errors());
    }

    #[test]
    fn test_map_trailing_comma() {
        let doc = parse("{a: 1, b: 2,}");
        let map = first_item(&doc);
        assert_eq!(map.kind(), Some(NodeKind::BracketedMap));
        let entries: Vec<_> = map.named_children().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.kind() == Some(NodeKind::MapEntry)));
        assert!(!map.has_error());
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn test_unterminated_string() {
        let doc = parse("\"abc");
        let string = first_item(&doc);
        assert_eq!(string.kind(), Some(NodeKind::String));
        assert!(string.has_error());
        assert!(string.is_malformed());
        assert_eq!(string.span(), Span::new(0, 4));
        assert_eq!(doc.text("\"abc"), "\"abc");
        assert_eq!(kinds("\"abc"), vec![SyntaxErrorKind::UnterminatedString]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            sexp(r#"["a\n$[x]b", 'c\'d']"#),
            "(source_file (bracketed_array (string (string_escape) (interpolation)) (string (string_escape))))"
        );
        assert_eq!(sexp("'$[x]'"), "(source_file (string))");
    }

    #[test]
    fn test_bad_escape() {
        let src = r#""a\qb""#;
        let doc = parse(src);
        assert_eq!(kinds(src), vec![SyntaxErrorKind::BadEscape]);
        assert_eq!(sexp(src), "(source_file (string (ERROR)))");
        assert_eq!(doc.diagnostics()[0].span, Span::new(2, 3));
    }

    #[test]
    fn test_tag_forms() {
        assert_eq!(
            sexp("!a.b.c(1, x) {k: v}"),
            "(source_file (tagged_value (tag (number) (literal)) (bracketed_map (map_entry (literal) (literal)))))"
        );
        assert_eq!(sexp("!t"), "(source_file (tagged_value (tag)))");
        let src = "{!k \"key\": 1}";
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_map (map_entry (tagged_key (tag) (string)) (number))))"
        );
    }

    #[test]
    fn test_missing_tag_name() {
        assert_eq!(kinds("! x"), vec![SyntaxErrorKind::MissingTagName]);
        assert_eq!(kinds("!a. x"), vec![SyntaxErrorKind::MissingTagName]);
    }

    #[test]
    fn test_value_less_entry() {
        let src = "{a:, b: }";
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_map (map_entry (literal)) (map_entry (literal))))"
        );
        assert!(!parse(src).has_errors());
    }

    #[test]
    fn test_missing_colon() {
        let src = "{a 1}";
        assert_eq!(
            kinds(src),
            vec![
                SyntaxErrorKind::MissingColon,
                SyntaxErrorKind::MissingComma,
                SyntaxErrorKind::MissingColon,
            ]
        );
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_map (ERROR (literal)) (ERROR (number))))"
        );
    }

    #[test]
    fn test_missing_comma() {
        let src = "[1 2]";
        assert_eq!(kinds(src), vec![SyntaxErrorKind::MissingComma]);
        assert_eq!(sexp(src), "(source_file (bracketed_array (number) (number)))");
    }

    #[test]
    fn test_double_comma() {
        assert_eq!(kinds("[1,,2]"), vec![SyntaxErrorKind::UnexpectedToken]);
        assert_eq!(kinds("[,]"), vec![SyntaxErrorKind::UnexpectedToken]);
    }

    #[test]
    fn test_invalid_key() {
        let src = "{[1]: 2}";
        assert_eq!(kinds(src), vec![SyntaxErrorKind::InvalidKey]);
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_map (map_entry (ERROR (bracketed_array (number))) (number))))"
        );
    }

    #[test]
    fn test_unclosed_at_end() {
        let src = "{a: [1, 2";
        let doc = parse(src);
        assert_eq!(
            kinds(src),
            vec![SyntaxErrorKind::UnclosedDelimiter, SyntaxErrorKind::UnclosedDelimiter]
        );
        let map = first_item(&doc);
        assert!(map.is_malformed());
        assert_eq!(map.span(), Span::new(0, src.len()));
        assert_eq!(doc.text(src), src);
    }

    #[test]
    fn test_enclosing_closer_synchronizes() {
        let src = "[{a: 1]";
        let doc = parse(src);
        let array = first_item(&doc);
        assert!(!array.is_malformed());
        assert!(array.has_error());
        let map = array.named_children().next().expect("map");
        assert!(map.is_malformed());
        assert_eq!(kinds(src), vec![SyntaxErrorKind::UnclosedDelimiter]);
    }

    #[test]
    fn test_unmatched_closer() {
        let src = "1 ] 2";
        assert_eq!(sexp(src), "(source_file (number) (ERROR) (number))");
        assert_eq!(kinds(src), vec![SyntaxErrorKind::UnexpectedToken]);
    }

    #[test]
    fn test_separator_synchronizes_containers() {
        let src = "[1,\n---\n2]";
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_array (number) (MISSING \"]\")) (document_separator) (number) (ERROR))"
        );
        let src = "[1, ---]";
        assert_eq!(sexp(src), "(source_file (bracketed_array (number) (literal)))");
    }

    #[test]
    fn test_block_literal() {
        let src = "{text: |\n  one\n\n  two\n\n}";
        let doc = parse(src);
        assert!(!doc.has_errors(), "{:?}", doc.diagnostics());
        let entry = first_item(&doc).named_children().next().expect("entry");
        let block = entry.children().last().expect("block");
        assert_eq!(block.kind(), Some(NodeKind::BlockLiteral));
        assert_eq!(block.text(src), "|\n  one\n\n  two");
        assert_eq!(doc.text(src), src);
    }

    #[test]
    fn test_block_literal_header() {
        let src = "|- # keep\n  x\ny";
        assert_eq!(sexp(src), "(source_file (block_literal) (literal))");
        let src = "| junk\n  x";
        assert_eq!(kinds(src), vec![SyntaxErrorKind::BlockLiteralHeader]);
        assert_eq!(
            sexp("{a: |, b: |}"),
            "(source_file (bracketed_map (map_entry (literal) (block_literal)) (map_entry (literal) (block_literal))))"
        );
    }

    #[test]
    fn test_block_literal_closed_on_last_line() {
        let src = "{text: |\n  hello\n  world}";
        let doc = parse(src);
        assert!(doc.diagnostics().is_empty(), "{:?}", doc.diagnostics());
        assert_eq!(
            sexp(src),
            "(source_file (bracketed_map (map_entry (literal) (block_literal))))"
        );
        let entry = first_item(&doc).named_children().next().expect("entry");
        let block = entry.children().last().expect("block");
        assert_eq!(block.text(src), "|\n  hello\n  world");

        assert_eq!(
            sexp("[|\n  a, 2]"),
            "(source_file (bracketed_array (block_literal) (number)))"
        );
        assert!(kinds("[|\n  a, 2]").is_empty());
        assert_eq!(
            sexp("!t(|\n  x)"),
            "(source_file (tagged_value (tag (block_literal))))"
        );
        assert!(kinds("!t(|\n  x)").is_empty());
    }

    #[test]
    fn test_node_replacement_and_interpolation() {
        assert_eq!(
            sexp("[.[a.b], $[x]]"),
            "(source_file (bracketed_array (node_replacement) (interpolation)))"
        );
        assert_eq!(kinds("$[abc"), vec![SyntaxErrorKind::UnterminatedString]);
    }

    #[test]
    fn test_unexpected_character() {
        let src = "[1, \u{1}]";
        assert_eq!(kinds(src), vec![SyntaxErrorKind::UnexpectedCharacter]);
    }

    #[test]
    fn test_top_level_stray_colon() {
        assert_eq!(sexp("a: 1"), "(source_file (literal) (ERROR) (number))");
    }

    #[test]
    fn test_cancelled_before_first_item() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(true));
        let opts = ParseOptions::new().cancel_flag(flag);
        let doc = parse_source("# c\n[1]", &opts);
        assert!(doc.is_cancelled());
        assert_eq!(doc.items().count(), 0);
        assert_eq!(doc.text("# c\n[1]"), "# c\n");
    }

    #[test]
    fn test_round_trip_on_garbage() {
        let cases = [
            "{[(", "}}]]))", "!!!", "\"\\", "'", "|\n|\n", "{a:b:c}", "$[", ".[", "!a(", "\u{0}---",
        ];
        for src in cases {
            let doc = parse(src);
            assert_eq!(doc.text(src), src, "{:?}", src);
        }
    }
}
