//! String and character literal lexing.
//!
//! Jot literals have no escape-sequence processing (§4.2): the content
//! between quotes is retained verbatim. A string may span multiple lines;
//! only running off the end of input makes it unterminated.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal: `"..."`.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote

        let content_start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '"' {
            self.cursor.advance();
        }

        if self.cursor.is_at_end() {
            self.report_error("unterminated string literal".to_string());
            let text = self.cursor.slice_from(content_start).to_string();
            return self.variable(TokenKind::Invalid, text);
        }

        let content = self.cursor.slice_from(content_start).to_string();
        self.cursor.advance(); // closing quote
        self.variable(TokenKind::String, content)
    }

    /// Lexes a character literal: `'c'`.
    pub fn lex_char(&mut self) -> Token {
        self.cursor.advance(); // opening quote

        if self.cursor.is_at_end() {
            self.report_error("unterminated character literal".to_string());
            return self.variable(TokenKind::Invalid, "");
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        if self.cursor.current_char() != '\'' {
            self.report_error("unterminated character literal".to_string());
            return self.variable(TokenKind::Invalid, c.to_string());
        }
        self.cursor.advance(); // closing quote

        self.variable(TokenKind::Character, c.to_string())
    }
}
