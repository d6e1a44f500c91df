//! Phase 2: Token cursor
//!
//! The parser reads tokens through a `Lexer`, which owns nothing but the
//! source and a byte offset. Lookahead is a plain rescan under whatever
//! mode the parser needs, and backtracking is restoring a saved offset.

use crate::scanner::{self, Mode};
use crate::token::{Token, TokenKind};

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

pub struct Lexer<'s> {
    source: &'s str,
    cursor: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source, cursor: 0 }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Scan the next token under `mode` without consuming it.
    pub fn peek(&self, mode: Mode) -> Token {
        scanner::scan(self.source, self.cursor, mode).0
    }

    /// Scan and consume the next token under `mode`.
    ///
    /// # Panics
    ///
    /// Panics if the scanner returns a non-final token that does not
    /// advance the cursor. That is a scanner bug, never an input error.
    pub fn bump(&mut self, mode: Mode) -> Token {
        let (token, next) = scanner::scan(self.source, self.cursor, mode);
        if token.kind != TokenKind::End {
            assert!(
                next > self.cursor,
                "scanner failed to advance at byte {} in {:?} mode",
                self.cursor,
                mode
            );
        }
        self.cursor = next;
        token
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.0;
    }
}
