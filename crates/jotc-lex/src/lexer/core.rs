//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct and its dispatch logic.

use jotc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::unicode::is_ident_start;

/// Lexer for the Jot programming language.
///
/// Transforms source text into a stream of [`Token`]s. Whitespace is
/// skipped; Jot has no comment syntax (§4.2).
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub handler: &'a mut Handler,

    /// Starting byte offset of the current token.
    pub token_start: usize,

    /// Line number where the current token starts (1-based).
    token_start_line: u32,

    /// Column number where the current token starts (1-based).
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source code.
    ///
    /// Skips whitespace, then dispatches on the current character. Returns
    /// `Token { kind: TokenKind::Eof, .. }` once, and again on every
    /// subsequent call past the end of input.
    pub fn next_token(&mut self) -> Token {
        self.cursor.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.fixed(TokenKind::Eof);
        }

        match self.cursor.current_char() {
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '{' => self.single(TokenKind::OpenBrace),
            '}' => self.single(TokenKind::CloseBrace),
            '[' => self.single(TokenKind::OpenBracket),
            ']' => self.single(TokenKind::CloseBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),

            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equal(),
            '!' => self.lex_bang(),
            '<' => self.lex_smaller(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '~' => self.single(TokenKind::Tilde),
            ':' => self.lex_colon(),
            '.' => self.lex_dot(),

            '"' => self.lex_string(),
            '\'' => self.lex_char(),

            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),

            c => {
                self.cursor.advance();
                self.report_error(format!("unexpected character '{c}'"));
                self.variable(TokenKind::Invalid, c.to_string())
            }
        }
    }

    /// Builds a fixed-spelling token spanning from `token_start` to the
    /// cursor's current position.
    pub(crate) fn fixed(&self, kind: TokenKind) -> Token {
        Token::fixed(kind, self.span())
    }

    /// Builds a token carrying the given literal text.
    pub(crate) fn variable(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        Token::new(kind, text, self.span())
    }

    /// Advances one character and builds a fixed single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.fixed(kind)
    }

    fn span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Reports a lexical error at the current token's span.
    pub fn report_error(&mut self, message: String) {
        let span = self.span();
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
