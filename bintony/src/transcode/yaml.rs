//! YAML rendering of a Tony syntax tree.
//!
//! Every node becomes a mapping:
//!   - `kind`      the symbol name (`map_entry`, `"{"`, `comment`, ...)
//!   - `span`      `[start, end]` byte offsets
//!   - `text`      source text, leaves only
//!   - `children`  child nodes, interior nodes only
//!   - `error`     present and true on ERROR nodes and lexical error tokens
//!   - `malformed` present and true on nodes missing a closer
//!
//! The document wraps the root with its diagnostics, each carrying the
//! message, the 1-based line and column, and the byte span.

use libtony::{Document, LineIndex, Node};
use serde_yaml::{Mapping, Value};

/// Encode a parsed document as a YAML string.
pub fn encode(document: &Document, source: &str) -> Result<String, String> {
    let yaml_value = document_to_yaml(document, source);
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn document_to_yaml(document: &Document, source: &str) -> Value {
    let mut map = Mapping::new();
    if let Some(name) = document.filename() {
        map.insert(key("filename"), Value::String(name.to_string()));
    }
    if document.is_cancelled() {
        map.insert(key("cancelled"), Value::Bool(true));
    }
    map.insert(key("root"), node_to_yaml(document.root(), source));

    let index = LineIndex::new(source);
    let diagnostics: Vec<Value> = document
        .diagnostics()
        .iter()
        .map(|diagnostic| {
            let (line, col) = diagnostic.location(source, &index);
            let mut entry = Mapping::new();
            entry.insert(key("message"), Value::String(diagnostic.kind.message().to_string()));
            entry.insert(key("line"), Value::from(line as u64 + 1));
            entry.insert(key("column"), Value::from(col as u64 + 1));
            entry.insert(key("span"), span_to_yaml(diagnostic.span.start, diagnostic.span.end));
            Value::Mapping(entry)
        })
        .collect();
    map.insert(key("diagnostics"), Value::Sequence(diagnostics));
    Value::Mapping(map)
}

fn node_to_yaml(node: &Node, source: &str) -> Value {
    let mut map = Mapping::new();
    let span = node.span();
    map.insert(key("kind"), Value::String(node.name().to_string()));
    map.insert(key("span"), span_to_yaml(span.start, span.end));
    match node {
        Node::Leaf(token) => {
            map.insert(key("text"), Value::String(token.text(source).to_string()));
        }
        Node::Interior(interior) => {
            let children: Vec<Value> = interior
                .children
                .iter()
                .map(|child| node_to_yaml(child, source))
                .collect();
            map.insert(key("children"), Value::Sequence(children));
        }
    }
    if node.is_error() || matches!(node, Node::Leaf(token) if token.has_error) {
        map.insert(key("error"), Value::Bool(true));
    }
    if node.is_malformed() {
        map.insert(key("malformed"), Value::Bool(true));
    }
    Value::Mapping(map)
}

fn span_to_yaml(start: usize, end: usize) -> Value {
    Value::Sequence(vec![Value::from(start as u64), Value::from(end as u64)])
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}
