//! Edge case tests for jotc-lex.

#[cfg(test)]
mod tests {
    use crate::token::{Token, TokenKind};
    use crate::Lexer;
    use jotc_util::Handler;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).into_iter().map(|t| t.kind).collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn test_edge_single_char_ident() {
        let t = lex_all("x");
        assert_eq!(t[0].kind, TokenKind::Ident);
        assert_eq!(t[0].text, "x");
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("var {} = 1;", name));
        assert!(t.iter().any(|tok| tok.kind == TokenKind::Ident && tok.text == name));
    }

    #[test]
    fn test_edge_keywords_not_idents() {
        let t = lex_all("fun var if");
        assert_eq!(t[0].kind, TokenKind::Fun);
        assert_eq!(t[1].kind, TokenKind::Var);
    }

    #[test]
    fn test_edge_numbers_are_decimal_only() {
        // Jot has no hex, binary, or octal literal prefixes; a leading
        // `0` followed by a digit is just another decimal integer.
        assert_eq!(kinds("0 007 42"), vec![TokenKind::Integer, TokenKind::Integer, TokenKind::Integer]);
    }

    #[test]
    fn test_edge_empty_string() {
        let t = lex_all("\"\"");
        assert_eq!(t[0].kind, TokenKind::String);
        assert_eq!(t[0].text, "");
    }

    #[test]
    fn test_edge_all_operators() {
        let ks = kinds("+ - * / % == != < > <= >= && || !");
        assert!(ks.contains(&TokenKind::Plus));
        assert!(ks.contains(&TokenKind::EqualEqual));
        assert!(ks.contains(&TokenKind::AmpersandAmpersand));
        assert!(ks.contains(&TokenKind::PipePipe));
    }

    #[test]
    fn test_edge_all_delimiters() {
        let ks = kinds("( ) { } [ ] , ; : . ->");
        assert!(ks.contains(&TokenKind::OpenParen));
        assert!(ks.contains(&TokenKind::RightArrow));
    }

    #[test]
    fn test_edge_nested_delimiters() {
        let ks = kinds("((()))");
        assert_eq!(ks.iter().filter(|k| **k == TokenKind::OpenParen).count(), 3);
    }

    #[test]
    fn test_edge_case_sensitivity() {
        let t = lex_all("Fun fun");
        assert_eq!(t[0].kind, TokenKind::Ident);
        assert_eq!(t[0].text, "Fun");
        assert_eq!(t[1].kind, TokenKind::Fun);
    }

    #[test]
    fn test_edge_bools() {
        let t = lex_all("true false");
        assert_eq!(t[0].kind, TokenKind::True);
        assert_eq!(t[1].kind, TokenKind::False);
    }

    #[test]
    fn test_edge_null() {
        assert_eq!(kinds("null"), vec![TokenKind::Null]);
    }

    #[test]
    fn test_edge_tilde() {
        assert!(kinds("~").contains(&TokenKind::Tilde));
    }

    #[test]
    fn test_edge_no_exponent_notation() {
        // Jot numbers have no scientific-notation suffix; `1e10` lexes as
        // the identifier "e10" immediately following the integer "1".
        let t = lex_all("1e10");
        assert_eq!(t[0].kind, TokenKind::Integer);
        assert_eq!(t[0].text, "1");
        assert_eq!(t[1].kind, TokenKind::Ident);
        assert_eq!(t[1].text, "e10");
    }

    #[test]
    fn test_edge_max_u64_digits() {
        let t = lex_all("18446744073709551615");
        assert_eq!(t[0].kind, TokenKind::Integer);
        assert_eq!(t[0].text, "18446744073709551615");
    }

    #[test]
    fn test_edge_all_keywords() {
        let ks = kinds("fun var if else switch while for return struct enum break continue");
        assert!(ks.contains(&TokenKind::Fun));
        assert!(ks.contains(&TokenKind::Struct));
        assert!(ks.contains(&TokenKind::Enum));
    }

    #[test]
    fn test_edge_all_primitive_type_names() {
        let ks = kinds("int1 int8 int16 int32 int64 uint8 uint16 uint32 uint64 float32 float64 bool char uchar void");
        assert_eq!(ks.len(), 15);
        assert!(ks.iter().all(|k| *k != TokenKind::Ident));
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_err_no_comments() {
        // `/` never introduces a comment; every `/` is a Slash/SlashEqual.
        assert_eq!(kinds("1 / 2"), vec![TokenKind::Integer, TokenKind::Slash, TokenKind::Integer]);
    }

    #[test]
    fn test_err_unterminated_string() {
        let mut h = Handler::new();
        let t = Lexer::new("\"unterminated", &mut h).next_token();
        assert_eq!(t.kind, TokenKind::Invalid);
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_unterminated_char() {
        let mut h = Handler::new();
        let t = Lexer::new("'x", &mut h).next_token();
        assert_eq!(t.kind, TokenKind::Invalid);
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_invalid_chars() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("@#$%", &mut h);
        loop {
            let t = lex.next_token();
            if t.is_eof() {
                break;
            }
        }
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_mixed_valid_invalid() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("var x = # 1;", &mut h);
        let mut saw_integer = false;
        loop {
            let t = lex.next_token();
            if t.is_eof() {
                break;
            }
            if t.kind == TokenKind::Integer {
                saw_integer = true;
            }
        }
        assert!(h.has_errors());
        assert!(saw_integer, "lexing must recover and continue past the invalid byte");
    }

    #[test]
    fn test_edge_consecutive_plus() {
        // "+++" greedily lexes as "++" then "+", not three separate "+".
        assert_eq!(kinds("+++"), vec![TokenKind::PlusPlus, TokenKind::Plus]);
    }

    #[test]
    fn test_edge_whitespace_variations() {
        let t = lex_all("var\tx\n=\n1");
        let ks: Vec<_> = t.iter().map(|tok| tok.kind).collect();
        assert!(ks.contains(&TokenKind::Var));
        assert!(ks.contains(&TokenKind::Integer));
    }

    #[test]
    fn test_edge_no_escape_sequences_in_strings() {
        let t = lex_all(r#""a\"b""#);
        // No escape processing: the literal backslash ends the lexeme
        // before the following quote, which closes the string early.
        assert_eq!(t[0].kind, TokenKind::String);
        assert_eq!(t[0].text, "a\\");
    }
}
