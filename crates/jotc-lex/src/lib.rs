//! jotc-lex - the Jot lexer.
//!
//! Turns source text into a stream of [`Token`]s (§4.2). The lexer is a
//! single left-to-right pass with at most one character of lookahead; it
//! never backtracks and never consults the parser. Unrecognized bytes
//! produce a [`TokenKind::Invalid`] token and lexing continues rather than
//! aborting, so a single stray character does not hide every later
//! diagnostic in the file.
//!
//! - [`cursor`]: the character-level `Cursor` used to walk the source text.
//! - [`token`]: `TokenKind` and `Token`, the lexer's output vocabulary.
//! - [`unicode`]: identifier character classification.
//! - [`lexer`]: the `Lexer` itself, split by token family.
//!
//! Jot has no comment syntax and no escape sequences in its string/char
//! literals (§4.2); there is accordingly no comment-skipping or
//! escape-decoding logic anywhere in this crate.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
