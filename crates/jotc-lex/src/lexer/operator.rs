//! Operator and punctuation lexing.
//!
//! Every operator here is resolved with at most one character of lookahead
//! (§4.2): `== != >= <= += -= *= /= %= >> << ++ -- :: -> .. && ||`, falling
//! back to the single-character spelling otherwise.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `+`, `++`, `+=`
    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('+') {
            self.fixed(TokenKind::PlusPlus)
        } else if self.cursor.match_char('=') {
            self.fixed(TokenKind::PlusEqual)
        } else {
            self.fixed(TokenKind::Plus)
        }
    }

    /// `-`, `--`, `-=`, `->`
    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            self.fixed(TokenKind::MinusMinus)
        } else if self.cursor.match_char('=') {
            self.fixed(TokenKind::MinusEqual)
        } else if self.cursor.match_char('>') {
            self.fixed(TokenKind::RightArrow)
        } else {
            self.fixed(TokenKind::Minus)
        }
    }

    /// `*`, `*=`
    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::StarEqual)
        } else {
            self.fixed(TokenKind::Star)
        }
    }

    /// `/`, `/=`
    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::SlashEqual)
        } else {
            self.fixed(TokenKind::Slash)
        }
    }

    /// `%`, `%=`
    pub fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::PercentEqual)
        } else {
            self.fixed(TokenKind::Percent)
        }
    }

    /// `=`, `==`
    pub fn lex_equal(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::EqualEqual)
        } else {
            self.fixed(TokenKind::Equal)
        }
    }

    /// `!`, `!=`
    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::BangEqual)
        } else {
            self.fixed(TokenKind::Bang)
        }
    }

    /// `<`, `<=`, `<<`
    pub fn lex_smaller(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::SmallerEqual)
        } else if self.cursor.match_char('<') {
            self.fixed(TokenKind::LeftShift)
        } else {
            self.fixed(TokenKind::Smaller)
        }
    }

    /// `>`, `>=`, `>>`
    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.fixed(TokenKind::GreaterEqual)
        } else if self.cursor.match_char('>') {
            self.fixed(TokenKind::RightShift)
        } else {
            self.fixed(TokenKind::Greater)
        }
    }

    /// `&`, `&&`
    pub fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            self.fixed(TokenKind::AmpersandAmpersand)
        } else {
            self.fixed(TokenKind::Ampersand)
        }
    }

    /// `|`, `||`
    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            self.fixed(TokenKind::PipePipe)
        } else {
            self.fixed(TokenKind::Pipe)
        }
    }

    /// `:`, `::`
    pub fn lex_colon(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char(':') {
            self.fixed(TokenKind::ColonColon)
        } else {
            self.fixed(TokenKind::Colon)
        }
    }

    /// `.`, `..`
    pub fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('.') {
            self.fixed(TokenKind::DotDot)
        } else {
            self.fixed(TokenKind::Dot)
        }
    }
}
