//! CBOR rendering of a Tony syntax tree.
//!
//! The tree is written with the same shape as the YAML rendering: every
//! node is a map with text keys `kind`, `span`, then `text` (leaves) or
//! `children` (interior nodes), then the `error` and `malformed` flags when
//! set. The document map holds `filename`, `cancelled`, `root` and
//! `diagnostics`.
//!
//! Encoding choices:
//!   - Text strings, arrays and maps are always determinate length
//!   - Unsigned integers use the smallest encoding that fits
//!   - Booleans are simple values 20/21
//!
//! Diagnostic notation is rendered from the CBOR bytes, not from the tree,
//! so it shows what was actually written.

use ciborium::value::Value as CborValue;
use libtony::{Document, LineIndex, Node};
use std::fmt::Write as FmtWrite;

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;

// ---------------------------------------------------------------------------
// Encode (CST -> CBOR)
// ---------------------------------------------------------------------------

/// Encode a parsed document as CBOR bytes.
pub fn encode(document: &Document, source: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    write_document(&mut buf, document, source);
    buf
}

fn write_document(buf: &mut Vec<u8>, document: &Document, source: &str) {
    let mut fields = 2;
    if document.filename().is_some() {
        fields += 1;
    }
    if document.is_cancelled() {
        fields += 1;
    }
    write_type_and_length(buf, MAJOR_MAP, fields);
    if let Some(name) = document.filename() {
        write_text(buf, "filename");
        write_text(buf, name);
    }
    if document.is_cancelled() {
        write_text(buf, "cancelled");
        write_bool(buf, true);
    }
    write_text(buf, "root");
    write_node(buf, document.root(), source);

    let index = LineIndex::new(source);
    write_text(buf, "diagnostics");
    write_type_and_length(buf, MAJOR_ARRAY, document.diagnostics().len() as u64);
    for diagnostic in document.diagnostics() {
        let (line, col) = diagnostic.location(source, &index);
        write_type_and_length(buf, MAJOR_MAP, 4);
        write_text(buf, "message");
        write_text(buf, diagnostic.kind.message());
        write_text(buf, "line");
        write_type_and_length(buf, MAJOR_UNSIGNED, line as u64 + 1);
        write_text(buf, "column");
        write_type_and_length(buf, MAJOR_UNSIGNED, col as u64 + 1);
        write_text(buf, "span");
        write_span(buf, diagnostic.span.start, diagnostic.span.end);
    }
}

fn write_node(buf: &mut Vec<u8>, node: &Node, source: &str) {
    let error = node.is_error() || matches!(node, Node::Leaf(token) if token.has_error);
    let malformed = node.is_malformed();
    let fields = 3 + u64::from(error) + u64::from(malformed);
    write_type_and_length(buf, MAJOR_MAP, fields);

    write_text(buf, "kind");
    write_text(buf, node.name());
    write_text(buf, "span");
    let span = node.span();
    write_span(buf, span.start, span.end);
    match node {
        Node::Leaf(token) => {
            write_text(buf, "text");
            write_text(buf, token.text(source));
        }
        Node::Interior(interior) => {
            write_text(buf, "children");
            write_type_and_length(buf, MAJOR_ARRAY, interior.children.len() as u64);
            for child in &interior.children {
                write_node(buf, child, source);
            }
        }
    }
    if error {
        write_text(buf, "error");
        write_bool(buf, true);
    }
    if malformed {
        write_text(buf, "malformed");
        write_bool(buf, true);
    }
}

fn write_span(buf: &mut Vec<u8>, start: usize, end: usize) {
    write_type_and_length(buf, MAJOR_ARRAY, 2);
    write_type_and_length(buf, MAJOR_UNSIGNED, start as u64);
    write_type_and_length(buf, MAJOR_UNSIGNED, end as u64);
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_type_and_length(buf, MAJOR_TEXT, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn write_bool(buf: &mut Vec<u8>, b: bool) {
    buf.push(if b { 0xf5 } else { 0xf4 });
}

/// Write a CBOR major type + length/value argument.
///
/// CBOR encodes the major type in the high 3 bits and uses the low 5 bits
/// plus optional following bytes for the argument:
///   0-23:    argument in the low 5 bits (1 byte total)
///   24:      1-byte argument follows
///   25:      2-byte argument follows
///   26:      4-byte argument follows
///   27:      8-byte argument follows
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, val: u64) {
    let high = major << 5;
    match val {
        0..=23 => {
            buf.push(high | val as u8);
        }
        24..=0xff => {
            buf.push(high | 24);
            buf.push(val as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(val as u16).to_be_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&val.to_be_bytes());
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (CBOR -> human-readable text, RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes written by [`encode`] as diagnostic notation.
///
/// Only the items the tree encoding produces are accepted: maps, arrays,
/// text, unsigned integers and booleans. Spans print inline, maps one entry
/// per line.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0)?;
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) -> Result<(), String> {
    match val {
        CborValue::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        CborValue::Integer(i) => {
            let n = u64::try_from(*i).map_err(|_| "negative integer in tree encoding")?;
            let _ = write!(out, "{}", n);
        }
        CborValue::Text(s) => diag_text(out, s),
        CborValue::Array(items) => diag_array(out, items, indent)?,
        CborValue::Map(pairs) => diag_map(out, pairs, indent)?,
        other => return Err(format!("unexpected CBOR item in tree encoding: {:?}", other)),
    }
    Ok(())
}

fn diag_text(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Spans are the only arrays of integers; they stay on one line. Child and
/// diagnostic lists get a line per item.
fn diag_array(out: &mut String, items: &[CborValue], indent: usize) -> Result<(), String> {
    if items.is_empty() {
        out.push_str("[]");
        return Ok(());
    }
    if items.iter().all(|item| matches!(item, CborValue::Integer(_))) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            diag_value(out, item, indent)?;
        }
        out.push(']');
        return Ok(());
    }
    out.push_str("[\n");
    for (i, item) in items.iter().enumerate() {
        push_indent(out, indent + 2);
        diag_value(out, item, indent + 2)?;
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push(']');
    Ok(())
}

fn diag_map(out: &mut String, pairs: &[(CborValue, CborValue)], indent: usize) -> Result<(), String> {
    if pairs.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    for (i, (key, value)) in pairs.iter().enumerate() {
        push_indent(out, indent + 2);
        match key {
            CborValue::Text(name) => diag_text(out, name),
            other => return Err(format!("non-text map key in tree encoding: {:?}", other)),
        }
        out.push_str(": ");
        diag_value(out, value, indent + 2)?;
        if i + 1 < pairs.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push('}');
    Ok(())
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}
