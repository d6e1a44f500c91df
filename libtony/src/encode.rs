//! Render a parsed document as text.
//!
//! The S-expression form follows the tree-sitter convention: only named,
//! visible nodes appear, and a construct that was closed implicitly shows
//! the closer it was missing as `(MISSING "]")`. The outline and token
//! forms show everything, extras included.

use std::fmt::Write;

use crate::syntax::{NodeKind, Symbol};
use crate::token::TokenKind;
use crate::tree::{Document, Node};

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `(source_file (bracketed_map (map_entry (literal) (number))))`
    SExpression,
    /// Every node on its own line, indented by depth, with byte spans.
    Outline,
    /// One leaf token per line.
    Tokens,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Format> {
        match name {
            "sexp" | "s-expression" => Some(Format::SExpression),
            "outline" => Some(Format::Outline),
            "tokens" => Some(Format::Tokens),
            _ => None,
        }
    }
}

/// Encode a document in the specified format.
pub fn encode(document: &Document, source: &str, format: Format) -> String {
    encode_node(document.root(), source, format)
}

/// Encode any subtree in the specified format.
pub fn encode_node(node: &Node, source: &str, format: Format) -> String {
    let mut out = String::new();
    match format {
        Format::SExpression => write_sexp(node, &mut out),
        Format::Outline => write_outline(node, source, &mut out),
        Format::Tokens => write_tokens(node, source, &mut out),
    }
    out
}

/// Anonymous visible symbols print quoted, like tree-sitter does.
pub fn display_name(symbol: Symbol) -> String {
    if symbol.is_visible() && !symbol.is_named() {
        format!("{:?}", symbol.name())
    } else {
        symbol.name().to_string()
    }
}

// =============================================================================
// S-expression
// =============================================================================

fn write_sexp(node: &Node, out: &mut String) {
    out.push('(');
    out.push_str(node.name());
    for child in node.named_children() {
        out.push(' ');
        write_sexp(child, out);
    }
    if let Some(closer) = missing_closer(node) {
        let _ = write!(out, " (MISSING {:?})", closer.name());
    }
    out.push(')');
}

/// The closer an implicitly closed construct never got.
fn missing_closer(node: &Node) -> Option<TokenKind> {
    let Node::Interior(interior) = node else {
        return None;
    };
    if !interior.malformed {
        return None;
    }
    let mut leaves = interior.children.iter().filter_map(Node::token);
    let expected = match interior.kind {
        NodeKind::Tag => leaves
            .any(|t| t.kind == TokenKind::LParen)
            .then_some(TokenKind::RParen)?,
        _ => match leaves.next()?.kind {
            TokenKind::LBrace => TokenKind::RBrace,
            TokenKind::LBracket | TokenKind::DollarBracket | TokenKind::DotBracket => {
                TokenKind::RBracket
            }
            TokenKind::DoubleQuote => TokenKind::DoubleQuote,
            TokenKind::SingleQuote => TokenKind::SingleQuote,
            _ => return None,
        },
    };
    let last = interior.children.iter().rev().find(|c| !c.is_extra());
    match last.and_then(Node::token) {
        Some(t) if t.kind == expected && interior.children.len() > 1 => None,
        _ => Some(expected),
    }
}

// =============================================================================
// Outline and tokens
// =============================================================================

fn write_outline(node: &Node, source: &str, out: &mut String) {
    for (depth, node) in node.preorder() {
        let span = node.span();
        let _ = write!(
            out,
            "{}{} [{}..{}]",
            "  ".repeat(depth),
            display_name(node.symbol()),
            span.start,
            span.end
        );
        if node.token().is_some() {
            let _ = write!(out, " {:?}", node.text(source));
        }
        if node.is_malformed() {
            out.push_str(" (malformed)");
        } else if node.is_error() {
            out.push_str(" (error)");
        }
        out.push('\n');
    }
}

fn write_tokens(node: &Node, source: &str, out: &mut String) {
    for token in node.leaves() {
        let _ = write!(
            out,
            "{} {}..{} {:?}",
            display_name(Symbol::Token(token.kind)),
            token.span.start,
            token.span.end,
            token.text(source)
        );
        if token.has_error {
            out.push_str(" (error)");
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    fn render(source: &str, format: Format) -> String {
        encode(&parse_document(source), source, format)
    }

    #[test]
    fn test_sexp() {
        assert_eq!(
            render("{a: [1, \"x\"]} # c", Format::SExpression),
            "(source_file (bracketed_map (map_entry (literal) (bracketed_array (number) (string)))))"
        );
    }

    #[test]
    fn test_sexp_missing_closers() {
        assert_eq!(
            render("[1", Format::SExpression),
            "(source_file (bracketed_array (number) (MISSING \"]\")))"
        );
        assert_eq!(
            render("'ab", Format::SExpression),
            "(source_file (string (MISSING \"'\")))"
        );
        assert_eq!(
            render("!t(1", Format::SExpression),
            "(source_file (tagged_value (tag (number) (MISSING \")\"))))"
        );
        assert_eq!(
            render("{a: 1\n", Format::SExpression),
            "(source_file (bracketed_map (map_entry (literal) (number)) (MISSING \"}\")))"
        );
    }

    #[test]
    fn test_outline() {
        let out = render("[x]", Format::Outline);
        assert_eq!(
            out,
            "source_file [0..3]\n  bracketed_array [0..3]\n    \"[\" [0..1] \"[\"\n    literal [1..2] \"x\"\n    \"]\" [2..3] \"]\"\n"
        );
        let out = render("[", Format::Outline);
        assert!(out.contains("bracketed_array [0..1] (malformed)"));
    }

    #[test]
    fn test_tokens() {
        let out = render("a #b\n\u{1}", Format::Tokens);
        assert_eq!(
            out,
            "literal 0..1 \"a\"\nwhitespace 1..2 \" \"\n\"comment\" 2..4 \"#b\"\nnewline 4..5 \"\\n\"\nerror 5..6 \"\\u{1}\" (error)\n"
        );
    }

    #[test]
    fn test_format_names() {
        assert_eq!(Format::from_name("sexp"), Some(Format::SExpression));
        assert_eq!(Format::from_name("outline"), Some(Format::Outline));
        assert_eq!(Format::from_name("tokens"), Some(Format::Tokens));
        assert_eq!(Format::from_name("json"), None);
    }
}
