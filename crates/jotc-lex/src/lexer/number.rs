//! Number literal lexing.
//!
//! Jot numbers are decimal-only: an integer is a run of digits; a `.`
//! followed by a digit upgrades the token to a float (§4.2). The token
//! carries the raw digit text; parsing it into a numeric value happens
//! downstream, in the parser.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or float literal.
    pub fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut kind = TokenKind::Integer;
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            kind = TokenKind::Float;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start).to_string();
        self.variable(kind, text)
    }
}
