//! Identifier, keyword, and primitive-type-name lexing.

use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::unicode::is_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, keyword, or primitive-type name.
    ///
    /// Reads `[A-Za-z_][A-Za-z0-9_]*`, then checks the fixed keyword/type
    /// mapping (§4.2); anything not in that mapping is `TokenKind::Ident`.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start).to_string();

        match keyword_from_ident(&text) {
            Some(kind) => self.fixed(kind),
            None => self.variable(TokenKind::Ident, text),
        }
    }
}
