//! Character classes used by the scanner.
//!
//! These are pure predicates over a single code point. The scanner decides
//! where a bare word starts and stops with them; nothing here looks at more
//! than one character.

/// Horizontal whitespace scanned into a single whitespace token.
/// `\n` is scanned separately as a newline token.
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// ASCII punctuation allowed to start a bare word.
fn is_word_punct(c: char) -> bool {
    matches!(
        c,
        '$' | '%'
            | '&'
            | '*'
            | '+'
            | '-'
            | '.'
            | '/'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '\\'
            | '^'
            | '_'
            | '`'
            | '~'
    )
}

/// Non-ASCII characters join words unless they are whitespace or control.
fn is_word_unicode(c: char) -> bool {
    !c.is_ascii() && !c.is_whitespace() && !c.is_control()
}

/// Can `c` start a bare word?
pub fn is_word_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_word_punct(c) || is_word_unicode(c)
}

/// Can `c` continue a bare word once one has started?
///
/// Continuation is wider than start: `!` and both quote characters may
/// appear inside a word (`it's`, `wow!`) but cannot open one.
pub fn is_word_continue(c: char) -> bool {
    is_word_start(c) || matches!(c, '!' | '\'' | '"')
}

/// Characters of a single tag-name segment. `.` separates segments and
/// `!` starts the next tag, so neither belongs to a name.
pub fn is_tag_name_char(c: char) -> bool {
    c != '.' && is_word_start(c)
}

/// Control characters other than tab, carriage return and newline.
/// Inside quoted and opaque bodies these are the only unexpected characters.
pub fn is_control(c: char) -> bool {
    c.is_control() && !is_blank(c) && c != '\n'
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}
