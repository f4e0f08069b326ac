//! Character classification for the Jot lexer.
//!
//! Jot identifiers are ASCII-only (`[A-Za-z_][A-Za-z0-9_]*`, §4.2), so this
//! module is deliberately narrower than a general-purpose Unicode-aware
//! lexer's character tables.

/// Checks if a character can start an identifier: `[A-Za-z_]`.
///
/// ```
/// use jotc_lex::unicode::is_ident_start;
///
/// assert!(is_ident_start('a'));
/// assert!(is_ident_start('_'));
/// assert!(!is_ident_start('1'));
/// assert!(!is_ident_start('+'));
/// ```
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Checks if a character can continue an identifier: `[A-Za-z0-9_]`.
///
/// ```
/// use jotc_lex::unicode::is_ident_continue;
///
/// assert!(is_ident_continue('a'));
/// assert!(is_ident_continue('1'));
/// assert!(is_ident_continue('_'));
/// assert!(!is_ident_continue('+'));
/// ```
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
