//! The concrete syntax tree.
//!
//! Every byte of the parsed input belongs to exactly one leaf, and leaves
//! appear in source order, so concatenating leaf text rebuilds the input.

use crate::error::{Diagnostic, ParseContext, ParseError};
use crate::span::Span;
use crate::syntax::{NodeKind, Symbol};
use crate::token::{Token, TokenKind};

/// A CST element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Token),
    Interior(Interior),
}

/// A node with a kind and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interior {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
    /// The construct itself was closed early or is missing a part.
    pub malformed: bool,
    has_error: bool,
}

impl Interior {
    /// Build a node over `children`. A childless node sits empty at `at`.
    pub fn new(kind: NodeKind, children: Vec<Node>, malformed: bool, at: usize) -> Self {
        let span = children
            .iter()
            .map(Node::span)
            .reduce(Span::merge)
            .unwrap_or(Span::empty(at));
        let has_error =
            malformed || kind == NodeKind::Error || children.iter().any(Node::has_error);
        Self {
            kind,
            span,
            children,
            malformed,
            has_error,
        }
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

impl Node {
    pub fn symbol(&self) -> Symbol {
        match self {
            Node::Leaf(token) => Symbol::Token(token.kind),
            Node::Interior(node) => Symbol::Node(node.kind),
        }
    }

    /// Catalog name of this node's kind.
    pub fn name(&self) -> &'static str {
        self.symbol().name()
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Leaf(token) => token.span,
            Node::Interior(node) => node.span,
        }
    }

    /// The interior kind, or `None` for a leaf.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Node::Leaf(_) => None,
            Node::Interior(node) => Some(node.kind),
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Leaf(token) => Some(token),
            Node::Interior(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Interior(node) => &node.children,
        }
    }

    pub fn is_named(&self) -> bool {
        self.symbol().is_named()
    }

    pub fn is_visible(&self) -> bool {
        self.symbol().is_visible()
    }

    /// Whitespace, newline or comment leaf.
    pub fn is_extra(&self) -> bool {
        matches!(self, Node::Leaf(t) if t.kind.is_extra())
    }

    /// Children that are visible and named, the ones an S-expression shows.
    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children()
            .iter()
            .filter(|c| c.is_named() && c.is_visible())
    }

    /// True if this node or anything under it is erroneous.
    pub fn has_error(&self) -> bool {
        match self {
            Node::Leaf(token) => token.has_error,
            Node::Interior(node) => node.has_error,
        }
    }

    /// An `ERROR` node or a lexical error leaf.
    pub fn is_error(&self) -> bool {
        match self {
            Node::Leaf(token) => token.kind == TokenKind::Error,
            Node::Interior(node) => node.kind == NodeKind::Error,
        }
    }

    /// Closed early or missing a required part.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Node::Interior(node) if node.malformed)
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span().slice(source)
    }

    /// Leaf tokens in tree order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![std::slice::from_ref(self)],
        }
    }

    /// Every node in preorder together with its depth below `self`.
    pub fn preorder(&self) -> Vec<(usize, &Node)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.children().iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}

/// Iterator over the leaves of a subtree.
pub struct Leaves<'a> {
    stack: Vec<&'a [Node]>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        while let Some(nodes) = self.stack.pop() {
            let Some((first, rest)) = nodes.split_first() else {
                continue;
            };
            self.stack.push(rest);
            match first {
                Node::Leaf(token) => return Some(token),
                Node::Interior(node) => self.stack.push(&node.children),
            }
        }
        None
    }
}

/// The result of parsing one source text.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    diagnostics: Vec<Diagnostic>,
    cancelled: bool,
    filename: Option<String>,
}

impl Document {
    pub(crate) fn new(
        root: Interior,
        diagnostics: Vec<Diagnostic>,
        cancelled: bool,
        filename: Option<String>,
    ) -> Self {
        Self {
            root: Node::Interior(root),
            diagnostics,
            cancelled,
            filename,
        }
    }

    /// The filename given in the parse options, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The `source_file` node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Top-level separators, values and error regions, without extras.
    pub fn items(&self) -> impl Iterator<Item = &Node> {
        self.root.children().iter().filter(|c| !c.is_extra())
    }

    /// Recovered errors in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.root.has_error()
    }

    /// Every diagnostic as a located error, in source order.
    pub fn errors(&self, source: &str) -> Vec<ParseError> {
        let ctx = ParseContext::new(self.filename());
        self.diagnostics
            .iter()
            .map(|d| d.to_error(source, &ctx))
            .collect()
    }

    /// The parse stopped early on a deadline or cancel signal. The tree
    /// covers only the items finished before that.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn leaves(&self) -> Leaves<'_> {
        self.root.leaves()
    }

    /// Rebuild the covered source text from the leaves.
    pub fn text(&self, source: &str) -> String {
        self.leaves().map(|t| t.text(source)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: TokenKind, start: usize, end: usize) -> Node {
        Node::Leaf(Token::new(kind, Span::new(start, end)))
    }

    #[test]
    fn test_interior_span_and_flags() {
        let node = Interior::new(
            NodeKind::BracketedArray,
            vec![
                leaf(TokenKind::LBracket, 0, 1),
                leaf(TokenKind::Error, 1, 2),
                leaf(TokenKind::RBracket, 2, 3),
            ],
            false,
            0,
        );
        assert_eq!(node.span, Span::new(0, 3));
        assert!(node.has_error());
        assert!(!node.malformed);

        let empty = Interior::new(NodeKind::SourceFile, Vec::new(), false, 7);
        assert_eq!(empty.span, Span::empty(7));
        assert!(!empty.has_error());
    }

    #[test]
    fn test_leaves_in_order() {
        let inner = Interior::new(
            NodeKind::Number,
            vec![leaf(TokenKind::Integer, 1, 2)],
            false,
            1,
        );
        let outer = Node::Interior(Interior::new(
            NodeKind::BracketedArray,
            vec![
                leaf(TokenKind::LBracket, 0, 1),
                Node::Interior(inner),
                leaf(TokenKind::RBracket, 2, 3),
            ],
            false,
            0,
        ));
        let starts: Vec<_> = outer.leaves().map(|t| t.span.start).collect();
        assert_eq!(starts, vec![0, 1, 2]);
        let depths: Vec<_> = outer.preorder().iter().map(|(d, n)| (*d, n.name())).collect();
        assert_eq!(
            depths,
            vec![
                (0, "bracketed_array"),
                (1, "["),
                (1, "number"),
                (2, "integer"),
                (1, "]"),
            ]
        );
        assert_eq!(outer.named_children().count(), 1);
    }
}
