//! TOML rendering of the symbol catalog.
//!
//! One `[[symbol]]` table per terminal and non-terminal, in id order:
//!
//! ```toml
//! [[symbol]]
//! id = 5
//! name = "{"
//! terminal = true
//! named = false
//! visible = true
//! ```

use libtony::Symbol;
use toml_edit::{value, ArrayOfTables, DocumentMut, Item, Table};

/// Encode the symbol catalog as a TOML document.
pub fn encode_symbols() -> String {
    let mut symbols = ArrayOfTables::new();
    for symbol in Symbol::all() {
        symbols.push(symbol_to_table(symbol));
    }
    let mut doc = DocumentMut::new();
    doc.insert("symbol", Item::ArrayOfTables(symbols));
    doc.to_string()
}

fn symbol_to_table(symbol: Symbol) -> Table {
    let mut table = Table::new();
    table.insert("id", value(i64::from(symbol.id())));
    table.insert("name", value(symbol.name()));
    table.insert("terminal", value(symbol.is_terminal()));
    table.insert("named", value(symbol.is_named()));
    table.insert("visible", value(symbol.is_visible()));
    table
}
