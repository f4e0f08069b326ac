//! Statement parsing (spec §4.4 "Statements").

use jotc_lex::TokenKind;
use jotc_util::{DiagnosticCode, Span, Symbol};

use crate::ast::{ExprKind, IfBranch, Stmt, SwitchCase};
use crate::{AstScope, PResult, Parser};

impl<'ctx> Parser<'ctx> {
    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Var => self.parse_field_declaration(false),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Defer => self.parse_defer_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::OpenBrace => self.parse_block_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Shared by block statements and function bodies; the latter needs
    /// the raw statement list to append an implicit `return` before
    /// wrapping it in a `Block`.
    pub(crate) fn parse_block_contents(&mut self) -> PResult<(Vec<Stmt>, Span)> {
        let open = self.expect(TokenKind::OpenBrace, "`{` at the start of a block")?.span;
        let mut statements = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::CloseBrace) {
            statements.push(self.parse_statement()?);
        }
        let close = self.expect(TokenKind::CloseBrace, "`}` at the end of a block")?.span;
        Ok((statements, Span::new(open.start, close.end, open.line, open.column)))
    }

    fn parse_block_statement(&mut self) -> PResult<Stmt> {
        let (statements, span) = self.parse_block_contents()?;
        Ok(Stmt::Block(statements, span))
    }

    fn parse_return_statement(&mut self) -> PResult<Stmt> {
        let span = self.expect(TokenKind::Return, "`return`")?.span;
        if self.match_token(TokenKind::Semicolon) {
            return Ok(Stmt::Return { value: None, span });
        }
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "`;` after return statement")?;
        Ok(Stmt::Return { value: Some(value), span })
    }

    /// `defer` must wrap a call expression (spec §4.4 invariant).
    fn parse_defer_statement(&mut self) -> PResult<Stmt> {
        let span = self.expect(TokenKind::Defer, "`defer`")?.span;
        let call = self.parse_expression()?;
        if !matches!(call.kind, ExprKind::Call { .. }) {
            return Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                "defer keyword expects a call expression",
            ));
        }
        self.expect(TokenKind::Semicolon, "`;` after defer statement")?;
        Ok(Stmt::Defer { call, span })
    }

    fn parse_break_statement(&mut self) -> PResult<Stmt> {
        let span = self.expect(TokenKind::Break, "`break`")?.span;
        self.check_in_breakable_loop(span, "break")?;
        let levels = self.parse_optional_loop_levels(span, "break")?;
        self.expect(TokenKind::Semicolon, "`;` after break statement")?;
        Ok(Stmt::Break { levels, span })
    }

    fn parse_continue_statement(&mut self) -> PResult<Stmt> {
        let span = self.expect(TokenKind::Continue, "`continue`")?.span;
        self.check_in_breakable_loop(span, "continue")?;
        let levels = self.parse_optional_loop_levels(span, "continue")?;
        self.expect(TokenKind::Semicolon, "`;` after continue statement")?;
        Ok(Stmt::Continue { levels, span })
    }

    fn check_in_breakable_loop(&self, span: Span, what: &str) -> PResult<()> {
        if self.scope != AstScope::Conditional || *self.loop_levels.last().unwrap() == 0 {
            return Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("{what} keyword can only be used inside at least one loop"),
            ));
        }
        Ok(())
    }

    /// `break;`/`continue;` default to level 1 (`None`); an explicit
    /// integer-literal count must be `1..=` the current loop nesting depth.
    fn parse_optional_loop_levels(&mut self, span: Span, what: &str) -> PResult<Option<u32>> {
        if self.check(TokenKind::Semicolon) {
            return Ok(None);
        }
        let value = self.parse_expression()?;
        let text = match &value.kind {
            ExprKind::Number(text) => text,
            _ => {
                return Err(self.fatal(
                    span,
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    format!("{what} levels must be a number"),
                ));
            }
        };
        if text.contains('.') {
            return Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("{what} levels must be an integer, not a float"),
            ));
        }
        let levels: u32 = text.parse().map_err(|_| {
            self.fatal(span, DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN, format!("invalid integer '{text}'"))
        })?;
        if levels < 1 {
            return Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("{what} levels must be at least 1"),
            ));
        }
        let top = *self.loop_levels.last().unwrap();
        if levels > top {
            return Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("{what} levels can't exceed the current loop nesting depth ({top})"),
            ));
        }
        Ok(Some(levels))
    }

    /// `if cond stmt (else if cond stmt)* (else stmt)?`. The trailing
    /// `else` is carried in its own `else_body` field rather than the
    /// original's synthetic always-true condition branch - see DESIGN.md.
    fn parse_if_statement(&mut self) -> PResult<Stmt> {
        let parent_scope = self.scope;
        self.scope = AstScope::Conditional;
        self.expect(TokenKind::If, "`if`")?;

        let condition = self.parse_expression()?;
        let body = Box::new(self.parse_statement()?);
        let mut branches = vec![IfBranch { condition, body }];

        let mut has_else = false;
        let mut else_body = None;
        while self.match_token(TokenKind::Else) {
            if self.match_token(TokenKind::If) {
                let condition = self.parse_expression()?;
                let body = Box::new(self.parse_statement()?);
                branches.push(IfBranch { condition, body });
                continue;
            }
            if has_else {
                self.scope = parent_scope;
                return Err(self.fatal(
                    self.previous().span,
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    "an else branch was already declared for this if statement",
                ));
            }
            else_body = Some(Box::new(self.parse_statement()?));
            has_else = true;
        }

        self.scope = parent_scope;
        Ok(Stmt::If { branches, has_else, else_body })
    }

    /// `for { body }` (forever), `for (name:)? start..end(:step)? body`
    /// (range), or `for (name:)? collection body` (each); `it` is the
    /// default element name (spec §4.4 "For").
    fn parse_for_statement(&mut self) -> PResult<Stmt> {
        let parent_scope = self.scope;
        self.scope = AstScope::Conditional;
        self.expect(TokenKind::For, "`for`")?;

        if self.check(TokenKind::OpenBrace) {
            *self.loop_levels.last_mut().unwrap() += 1;
            let body = Box::new(self.parse_statement()?);
            *self.loop_levels.last_mut().unwrap() -= 1;
            self.scope = parent_scope;
            return Ok(Stmt::Forever { body });
        }

        let mut element_name = Symbol::intern("it");
        let mut expr = self.parse_expression()?;
        if self.check(TokenKind::Colon) {
            let ExprKind::Literal(name) = expr.kind else {
                self.scope = parent_scope;
                return Err(self.fatal(
                    self.current_span(),
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    "the optional named loop variable must be an identifier",
                ));
            };
            element_name = name;
            self.advance(); // `:`
            expr = self.parse_expression()?;
        }

        if self.match_token(TokenKind::DotDot) {
            let end = self.parse_expression()?;
            let step = if self.match_token(TokenKind::Colon) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            *self.loop_levels.last_mut().unwrap() += 1;
            let body = Box::new(self.parse_statement()?);
            *self.loop_levels.last_mut().unwrap() -= 1;
            self.scope = parent_scope;
            return Ok(Stmt::ForRange { element_name, start: expr, end, step, body });
        }

        *self.loop_levels.last_mut().unwrap() += 1;
        let body = Box::new(self.parse_statement()?);
        *self.loop_levels.last_mut().unwrap() -= 1;
        self.scope = parent_scope;
        Ok(Stmt::ForEach { element_name, collection: expr, body })
    }

    fn parse_while_statement(&mut self) -> PResult<Stmt> {
        let parent_scope = self.scope;
        self.scope = AstScope::Conditional;
        self.expect(TokenKind::While, "`while`")?;
        let condition = self.parse_expression()?;
        *self.loop_levels.last_mut().unwrap() += 1;
        let body = Box::new(self.parse_statement()?);
        *self.loop_levels.last_mut().unwrap() -= 1;
        self.scope = parent_scope;
        Ok(Stmt::While { condition, body })
    }

    /// `switch value { v1, v2 -> stmt ... else -> stmt }`; at most one
    /// `else` default branch.
    fn parse_switch_statement(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::Switch, "`switch`")?;
        let argument = self.parse_expression()?;
        self.expect(TokenKind::OpenBrace, "`{` after switch value")?;

        let mut cases = Vec::new();
        let mut default = None;
        while !self.is_at_end() && !self.check(TokenKind::CloseBrace) {
            if self.match_token(TokenKind::Else) {
                if default.is_some() {
                    return Err(self.fatal(
                        self.previous().span,
                        DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                        "switch statement can't have more than one default branch",
                    ));
                }
                self.expect(TokenKind::RightArrow, "`->` after `else` in a switch default branch")?;
                default = Some(Box::new(self.parse_statement()?));
                continue;
            }

            let mut values = Vec::new();
            while !self.is_at_end() && !self.check(TokenKind::RightArrow) {
                values.push(self.parse_expression()?);
                self.match_token(TokenKind::Comma);
            }
            self.expect(TokenKind::RightArrow, "`->` after switch case values")?;
            let body = Box::new(self.parse_statement()?);
            cases.push(SwitchCase { values, body });
        }
        self.expect(TokenKind::CloseBrace, "`}` after switch statement")?;
        Ok(Stmt::Switch { argument, cases, default })
    }

    fn parse_expression_statement(&mut self) -> PResult<Stmt> {
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "`;` after expression statement")?;
        Ok(Stmt::ExpressionStatement(expression))
    }
}
