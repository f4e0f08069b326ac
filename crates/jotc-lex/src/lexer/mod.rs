//! Lexer module.
//!
//! The lexer implementation is split by token family, mirroring the shape
//! of the grammar in spec §4.2:
//! - `core` - main `Lexer` struct and character dispatch
//! - `identifier` - identifiers, keywords, and primitive-type names
//! - `number` - integer and float literals
//! - `string` - string and character literals
//! - `operator` - operators and punctuation, including multi-char lookahead

mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::Lexer;
