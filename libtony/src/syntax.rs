//! Node kinds and the symbol catalog.
//!
//! The catalog lists every terminal and non-terminal in a fixed order.
//! Ids and names are part of the public surface: highlighters and queries
//! written against these names must keep working, so entries are only
//! ever appended.

use std::fmt;

use crate::token::TokenKind;

/// Interior node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    SourceFile,
    DocumentSeparator,
    BracketedMap,
    MapEntry,
    BracketedArray,
    Tag,
    TaggedValue,
    TaggedKey,
    String,
    BlockLiteral,
    Interpolation,
    NodeReplacement,
    Number,
    Boolean,
    /// A region the parser could not fit into the grammar.
    Error,
}

impl NodeKind {
    pub const ALL: [NodeKind; 15] = [
        NodeKind::SourceFile,
        NodeKind::DocumentSeparator,
        NodeKind::BracketedMap,
        NodeKind::MapEntry,
        NodeKind::BracketedArray,
        NodeKind::Tag,
        NodeKind::TaggedValue,
        NodeKind::TaggedKey,
        NodeKind::String,
        NodeKind::BlockLiteral,
        NodeKind::Interpolation,
        NodeKind::NodeReplacement,
        NodeKind::Number,
        NodeKind::Boolean,
        NodeKind::Error,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::DocumentSeparator => "document_separator",
            NodeKind::BracketedMap => "bracketed_map",
            NodeKind::MapEntry => "map_entry",
            NodeKind::BracketedArray => "bracketed_array",
            NodeKind::Tag => "tag",
            NodeKind::TaggedValue => "tagged_value",
            NodeKind::TaggedKey => "tagged_key",
            NodeKind::String => "string",
            NodeKind::BlockLiteral => "block_literal",
            NodeKind::Interpolation => "interpolation",
            NodeKind::NodeReplacement => "node_replacement",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Error => "ERROR",
        }
    }
}

/// One entry of the catalog: a terminal or a non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Token(TokenKind),
    Node(NodeKind),
}

impl Symbol {
    /// Number of catalog entries.
    pub const COUNT: usize = TokenKind::ALL.len() + NodeKind::ALL.len();

    /// Iterate the whole catalog in id order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        TokenKind::ALL
            .into_iter()
            .map(Symbol::Token)
            .chain(NodeKind::ALL.into_iter().map(Symbol::Node))
    }

    /// Stable numeric id. Terminals come first.
    pub fn id(self) -> u16 {
        let index = match self {
            Symbol::Token(kind) => TokenKind::ALL.iter().position(|k| *k == kind),
            Symbol::Node(kind) => NodeKind::ALL
                .iter()
                .position(|k| *k == kind)
                .map(|i| i + TokenKind::ALL.len()),
        };
        // Both ALL tables are exhaustive.
        index.unwrap_or_default() as u16
    }

    pub fn from_id(id: u16) -> Option<Symbol> {
        let id = id as usize;
        if id < TokenKind::ALL.len() {
            Some(Symbol::Token(TokenKind::ALL[id]))
        } else {
            NodeKind::ALL
                .get(id - TokenKind::ALL.len())
                .copied()
                .map(Symbol::Node)
        }
    }

    pub fn from_name(name: &str) -> Option<Symbol> {
        Symbol::all().find(|s| s.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Token(kind) => kind.name(),
            Symbol::Node(kind) => kind.name(),
        }
    }

    /// Named symbols appear in S-expressions.
    pub fn is_named(self) -> bool {
        match self {
            Symbol::Token(kind) => kind.is_named(),
            Symbol::Node(_) => true,
        }
    }

    pub fn is_visible(self) -> bool {
        match self {
            Symbol::Token(kind) => kind.is_visible(),
            Symbol::Node(_) => true,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Symbol::Token(_))
    }
}

impl From<TokenKind> for Symbol {
    fn from(kind: TokenKind) -> Self {
        Symbol::Token(kind)
    }
}

impl From<NodeKind> for Symbol {
    fn from(kind: NodeKind) -> Self {
        Symbol::Node(kind)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
