//! Expression parsing: a hand-written precedence ladder, one tier per
//! function, from assignment (lowest) down to primary (highest) (spec
//! §4.4 "Expressions").

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jotc_lex::TokenKind;
use jotc_util::{DiagnosticCode, Span, Symbol};

use crate::ast::{BinaryOp, ComparisonOp, ExprKind, ExprNode, Fixity, IfBranch, LogicalOp, PostfixOp, PrefixOp, ShiftOp, Stmt};
use crate::types::{NumberKind, Type};
use crate::{PResult, Parser};

impl<'ctx> Parser<'ctx> {
    pub(crate) fn parse_expression(&mut self) -> PResult<ExprNode> {
        self.parse_assignment_expression()
    }

    /// `target (= | += | -= | ...) value`; compound forms desugar to
    /// `target = target OP value` (spec §4.4 "Assignment").
    fn parse_assignment_expression(&mut self) -> PResult<ExprNode> {
        let target = self.parse_logical_or_expression()?;
        if !self.peek_kind().is_assignment_operator() {
            return Ok(target);
        }
        let op_tok = self.advance();
        if op_tok.kind == TokenKind::Equal {
            let value = self.parse_assignment_expression()?;
            return Ok(ExprNode::new(
                ExprKind::Assign { target: Box::new(target), value: Box::new(value) },
                op_tok.span,
            ));
        }
        let base_op = op_tok
            .kind
            .underlying_binary_operator()
            .expect("assignment operator always has an underlying binary operator");
        let left_copy = self.duplicate_expr(&target, op_tok.span)?;
        let right = self.parse_assignment_expression()?;
        let value = ExprNode::new(
            ExprKind::Binary { left: Box::new(left_copy), op: binary_op_from_token(base_op), right: Box::new(right) },
            op_tok.span,
        );
        Ok(ExprNode::new(ExprKind::Assign { target: Box::new(target), value: Box::new(value) }, op_tok.span))
    }

    /// Note: both `&&` and `||`'s right-hand operand is parsed at the
    /// equality tier, not recursed back into the logical tiers - matching
    /// the grammar exactly lets the surrounding `while` loop alone handle
    /// chains like `a && b && c` left-associatively.
    fn parse_logical_or_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_logical_and_expression()?;
        while self.check(TokenKind::PipePipe) {
            let tok = self.advance();
            let right = self.parse_equality_expression()?;
            expr = ExprNode::new(ExprKind::Logical { left: Box::new(expr), op: LogicalOp::Or, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_logical_and_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_equality_expression()?;
        while self.check(TokenKind::AmpersandAmpersand) {
            let tok = self.advance();
            let right = self.parse_equality_expression()?;
            expr = ExprNode::new(ExprKind::Logical { left: Box::new(expr), op: LogicalOp::And, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_equality_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_comparison_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqualEqual => ComparisonOp::Equal,
                TokenKind::BangEqual => ComparisonOp::NotEqual,
                _ => break,
            };
            let tok = self.advance();
            let right = self.parse_comparison_expression()?;
            expr = ExprNode::new(ExprKind::Comparison { left: Box::new(expr), op, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_comparison_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_shift_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Greater => ComparisonOp::Greater,
                TokenKind::GreaterEqual => ComparisonOp::GreaterEqual,
                TokenKind::Smaller => ComparisonOp::Less,
                TokenKind::SmallerEqual => ComparisonOp::LessEqual,
                _ => break,
            };
            let tok = self.advance();
            let right = self.parse_shift_expression()?;
            expr = ExprNode::new(ExprKind::Comparison { left: Box::new(expr), op, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_shift_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_term_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::RightShift => ShiftOp::Right,
                TokenKind::LeftShift => ShiftOp::Left,
                _ => break,
            };
            let tok = self.advance();
            let right = self.parse_term_expression()?;
            expr = ExprNode::new(ExprKind::Shift { left: Box::new(expr), op, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_term_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_factor_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let tok = self.advance();
            let right = self.parse_factor_expression()?;
            expr = ExprNode::new(ExprKind::Binary { left: Box::new(expr), op, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    fn parse_factor_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_enum_access_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let tok = self.advance();
            let right = self.parse_enum_access_expression()?;
            expr = ExprNode::new(ExprKind::Binary { left: Box::new(expr), op, right: Box::new(right) }, tok.span);
        }
        Ok(expr)
    }

    /// `EnumName::element` (spec §4.5 "EnumAccess"). Only recognized
    /// immediately after a bare identifier that names a registered enum.
    fn parse_enum_access_expression(&mut self) -> PResult<ExprNode> {
        let expr = self.parse_infix_call_expression()?;
        if !self.check(TokenKind::ColonColon) {
            return Ok(expr);
        }
        let ExprKind::Literal(name) = &expr.kind else {
            let span = self.current_span();
            return Err(self.fatal(span, DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN, "expected an enum name before `::`"));
        };
        let name = *name;
        let Some(enum_ty) = self.ctx.enumerations.get(&name).cloned() else {
            return Err(self.fatal(
                expr.span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("no enum declaration named '{name}'"),
            ));
        };
        self.advance(); // `::`
        let (element, elem_span) = self.expect_ident()?;
        let Some(&index) = enum_ty.values.get(&element) else {
            return Err(self.fatal(
                elem_span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                format!("enum '{name}' has no element named '{element}'"),
            ));
        };
        Ok(ExprNode::new(ExprKind::EnumAccess { enum_name: name, element_name: element, index }, elem_span))
    }

    /// `name arg` where `name` was declared `infix fun name(a, b)`;
    /// right-associative, matching the recursive-call grammar.
    fn parse_infix_call_expression(&mut self) -> PResult<ExprNode> {
        let expr = self.parse_prefix_expression()?;
        if let Some(name) = self.peek_fixity_ident(Fixity::Infix) {
            let tok = self.advance();
            let callee = ExprNode::new(ExprKind::Literal(name), tok.span);
            let right = self.parse_infix_call_expression()?;
            return Ok(ExprNode::new(
                ExprKind::Call { callee: Box::new(callee), args: vec![expr, right], generic_args: None },
                tok.span,
            ));
        }
        Ok(expr)
    }

    /// `- ! ~ * &` and `++ -- ` as prefix operators; the increment/decrement
    /// forms additionally require their operand to be a variable, index, or
    /// field-access expression (spec §4.4 "PrefixUnary").
    fn parse_prefix_expression(&mut self) -> PResult<ExprNode> {
        match self.peek_kind() {
            TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde | TokenKind::Star | TokenKind::Ampersand => {
                let tok = self.advance();
                let operand = self.parse_prefix_expression()?;
                let op = match tok.kind {
                    TokenKind::Minus => PrefixOp::Negate,
                    TokenKind::Bang => PrefixOp::Not,
                    TokenKind::Tilde => PrefixOp::BitNot,
                    TokenKind::Star => PrefixOp::Deref,
                    TokenKind::Ampersand => PrefixOp::AddressOf,
                    _ => unreachable!(),
                };
                Ok(ExprNode::new(ExprKind::PrefixUnary { op, operand: Box::new(operand) }, tok.span))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let tok = self.advance();
                let operand = self.parse_prefix_expression()?;
                self.require_lvalue_shape(&operand, tok.span)?;
                let op = if tok.kind == TokenKind::PlusPlus { PrefixOp::Increment } else { PrefixOp::Decrement };
                Ok(ExprNode::new(ExprKind::PrefixUnary { op, operand: Box::new(operand) }, tok.span))
            }
            _ => self.parse_prefix_call_expression(),
        }
    }

    /// `name arg` where `name` was declared `prefix fun name(a)`.
    fn parse_prefix_call_expression(&mut self) -> PResult<ExprNode> {
        if let Some(name) = self.peek_fixity_ident(Fixity::Prefix) {
            let tok = self.advance();
            let callee = ExprNode::new(ExprKind::Literal(name), tok.span);
            let arg = self.parse_prefix_expression()?;
            return Ok(ExprNode::new(
                ExprKind::Call { callee: Box::new(callee), args: vec![arg], generic_args: None },
                tok.span,
            ));
        }
        self.parse_postfix_increment_or_decrement()
    }

    fn parse_postfix_increment_or_decrement(&mut self) -> PResult<ExprNode> {
        let expr = self.parse_call_or_access_expression()?;
        if matches!(self.peek_kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let tok = self.advance();
            self.require_lvalue_shape(&expr, tok.span)?;
            let op = if tok.kind == TokenKind::PlusPlus { PostfixOp::Increment } else { PostfixOp::Decrement };
            return Ok(ExprNode::new(ExprKind::PostfixUnary { op, operand: Box::new(expr) }, tok.span));
        }
        Ok(expr)
    }

    fn require_lvalue_shape(&self, expr: &ExprNode, span: Span) -> PResult<()> {
        if matches!(expr.kind, ExprKind::Literal(_) | ExprKind::Index { .. } | ExprKind::Dot { .. }) {
            Ok(())
        } else {
            Err(self.fatal(
                span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                "`++`/`--` expect a variable, index, or field-access expression",
            ))
        }
    }

    /// The postfix chain: `.field`, `(args)` (with an optional trailing
    /// lambda argument), and `[index]`, any number of times in any order.
    fn parse_call_or_access_expression(&mut self) -> PResult<ExprNode> {
        let mut expr = self.parse_enum_attribute_expression()?;
        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    let dot = self.advance();
                    let (field_name, _) = self.expect_ident()?;
                    expr = ExprNode::new(
                        ExprKind::Dot {
                            callee: Box::new(expr),
                            field_name,
                            field_index: Cell::new(0),
                            is_constant_field: Cell::new(false),
                        },
                        dot.span,
                    );
                }
                TokenKind::OpenParen => {
                    let open = self.advance();
                    let mut args = Vec::new();
                    while !self.is_at_end() && !self.check(TokenKind::CloseParen) {
                        args.push(self.parse_expression()?);
                        self.match_token(TokenKind::Comma);
                    }
                    self.expect(TokenKind::CloseParen, "`)` at the end of a call expression")?;
                    if self.check(TokenKind::OpenBrace) {
                        args.push(self.parse_lambda_expression()?);
                    }
                    expr = ExprNode::new(
                        ExprKind::Call { callee: Box::new(expr), args, generic_args: None },
                        open.span,
                    );
                }
                TokenKind::OpenBracket => {
                    let open = self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::CloseBracket, "`]` after index value")?;
                    expr = ExprNode::new(ExprKind::Index { callee: Box::new(expr), index: Box::new(index) }, open.span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// `EnumName.count`, the sole supported enum attribute: the number of
    /// declared elements, synthesized as an `Int64` literal.
    fn parse_enum_attribute_expression(&mut self) -> PResult<ExprNode> {
        let expr = self.parse_postfix_call_expression()?;
        if self.check(TokenKind::Dot) {
            if let ExprKind::Literal(name) = &expr.kind {
                let name = *name;
                if let Some(enum_ty) = self.ctx.enumerations.get(&name).cloned() {
                    self.advance(); // `.`
                    let (attr, attr_span) = self.expect_ident()?;
                    if attr.as_str() == "count" {
                        let count = enum_ty.values.len();
                        return Ok(ExprNode::with_type(
                            ExprKind::Number(count.to_string()),
                            Rc::new(Type::Number(NumberKind::Int64)),
                            attr_span,
                        ));
                    }
                    return Err(self.fatal(
                        attr_span,
                        DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                        format!("unsupported attribute '{attr}' for enum type"),
                    ));
                }
            }
        }
        Ok(expr)
    }

    /// `name arg` where `name` was declared `postfix fun name(a)`.
    fn parse_postfix_call_expression(&mut self) -> PResult<ExprNode> {
        let expr = self.parse_initializer_expression()?;
        if let Some(name) = self.peek_fixity_ident(Fixity::Postfix) {
            let tok = self.advance();
            let callee = ExprNode::new(ExprKind::Literal(name), tok.span);
            return Ok(ExprNode::new(
                ExprKind::Call { callee: Box::new(callee), args: vec![expr], generic_args: None },
                tok.span,
            ));
        }
        Ok(expr)
    }

    /// `StructName { args }`; gated on a two-token lookahead so a plain
    /// identifier that merely happens to precede a block is never confused
    /// with an initializer.
    fn parse_initializer_expression(&mut self) -> PResult<ExprNode> {
        if self.check(TokenKind::Ident) && self.peek_at(1).kind == TokenKind::OpenBrace {
            let name = Symbol::intern(&self.peek().text);
            if self.ctx.is_struct(name) {
                let tok = self.advance();
                self.advance(); // `{`
                let mut args = Vec::new();
                while !self.is_at_end() && !self.check(TokenKind::CloseBrace) {
                    args.push(self.parse_expression()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::CloseBrace, "`}` at the end of an initializer expression")?;
                return Ok(ExprNode::new(ExprKind::InitializeExpr { struct_name: name, args }, tok.span));
            }
        }
        self.parse_function_call_with_lambda_argument()
    }

    /// `normal_fn { ... }` sugar: a normal-fixity function called with a
    /// single trailing lambda argument and no parentheses.
    fn parse_function_call_with_lambda_argument(&mut self) -> PResult<ExprNode> {
        if self.check(TokenKind::Ident) && self.peek_at(1).kind == TokenKind::OpenBrace {
            if let Some(name) = self.peek_fixity_ident(Fixity::Normal) {
                let tok = self.advance();
                let callee = ExprNode::new(ExprKind::Literal(name), tok.span);
                let lambda = self.parse_lambda_expression()?;
                return Ok(ExprNode::new(
                    ExprKind::Call { callee: Box::new(callee), args: vec![lambda], generic_args: None },
                    tok.span,
                ));
            }
        }
        self.parse_primary_expression()
    }

    fn parse_primary_expression(&mut self) -> PResult<ExprNode> {
        match self.peek_kind() {
            TokenKind::Integer | TokenKind::Float => self.parse_number_expression(),
            TokenKind::Character => {
                let tok = self.advance();
                Ok(ExprNode::new(ExprKind::Character(tok.text.chars().next().unwrap_or('\0')), tok.span))
            }
            TokenKind::String => {
                let tok = self.advance();
                Ok(ExprNode::new(ExprKind::String(tok.text), tok.span))
            }
            TokenKind::True | TokenKind::False => {
                let tok = self.advance();
                Ok(ExprNode::new(ExprKind::Bool(tok.kind == TokenKind::True), tok.span))
            }
            TokenKind::Null => {
                let tok = self.advance();
                Ok(ExprNode::new(ExprKind::Null { base_type: RefCell::new(Rc::new(Type::Null)) }, tok.span))
            }
            TokenKind::Ident => self.parse_literal_expression(),
            TokenKind::OpenParen => self.parse_group_expression(),
            TokenKind::OpenBracket => self.parse_array_expression(),
            TokenKind::OpenBrace => self.parse_lambda_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Switch => self.parse_switch_expression(),
            TokenKind::Cast => self.parse_cast_expression(),
            TokenKind::TypeSize => self.parse_type_size_expression(),
            TokenKind::ValueSize => self.parse_value_size_expression(),
            _ => {
                let span = self.current_span();
                Err(self.fatal(span, DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN, "unexpected or unsupported expression"))
            }
        }
    }

    /// Raw digit text, unvalidated; the checker parses it against the
    /// target `NumberKind` (spec §4.5 "Number").
    fn parse_number_expression(&mut self) -> PResult<ExprNode> {
        let tok = self.advance();
        Ok(ExprNode::new(ExprKind::Number(tok.text), tok.span))
    }

    fn parse_literal_expression(&mut self) -> PResult<ExprNode> {
        let tok = self.expect(TokenKind::Ident, "an identifier")?;
        Ok(ExprNode::new(ExprKind::Literal(Symbol::intern(&tok.text)), tok.span))
    }

    fn parse_group_expression(&mut self) -> PResult<ExprNode> {
        let open = self.advance(); // `(`
        let inner = self.parse_expression()?;
        self.expect(TokenKind::CloseParen, "`)` at the end of a group expression")?;
        Ok(ExprNode::new(ExprKind::Group(Box::new(inner)), open.span))
    }

    fn parse_array_expression(&mut self) -> PResult<ExprNode> {
        let open = self.advance(); // `[`
        let mut values = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::CloseBracket) {
            values.push(self.parse_expression()?);
            self.match_token(TokenKind::Comma);
        }
        self.expect(TokenKind::CloseBracket, "`]` at the end of an array expression")?;
        Ok(ExprNode::new(ExprKind::Array { values, is_constant_cache: Cell::new(None) }, open.span))
    }

    /// `{ ((params) Type ->)? statements }`; a void-returning lambda with no
    /// trailing `return` gets one appended, mirroring function bodies.
    fn parse_lambda_expression(&mut self) -> PResult<ExprNode> {
        let open = self.expect(TokenKind::OpenBrace, "`{` at the start of a lambda expression")?;
        let mut params = Vec::new();
        let mut return_type = Rc::new(Type::Void);
        if self.match_token(TokenKind::OpenParen) {
            while !self.is_at_end() && !self.check(TokenKind::CloseParen) {
                params.push(self.parse_parameter()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::CloseParen, "`)` after lambda parameters")?;
            return_type = self.parse_type()?;
            self.expect(TokenKind::RightArrow, "`->` after lambda return type")?;
        }

        self.loop_levels.push(0);
        let mut statements = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::CloseBrace) {
            statements.push(self.parse_statement()?);
        }
        self.loop_levels.pop();
        let close = self.expect(TokenKind::CloseBrace, "`}` at the end of a lambda expression")?;

        if matches!(*return_type, Type::Void) && !matches!(statements.last(), Some(Stmt::Return { .. })) {
            statements.push(Stmt::Return { value: None, span: close.span });
        }
        let span = Span::new(open.span.start, close.span.end, open.span.line, open.span.column);
        let body = Box::new(Stmt::Block(statements, span));
        Ok(ExprNode::new(ExprKind::Lambda { params, captures: Vec::new(), return_type, body }, open.span))
    }

    /// `if cond then else alt` - a ternary, unlike the `if` *statement*'s
    /// else-if chain (spec §4.5 "IfExpr").
    fn parse_if_expression(&mut self) -> PResult<ExprNode> {
        let if_tok = self.advance();
        let condition = self.parse_expression()?;
        let then_value = self.parse_expression()?;
        self.expect(TokenKind::Else, "`else` after an if-expression's then value")?;
        let else_value = self.parse_expression()?;
        let branches = vec![IfBranch { condition, body: Box::new(then_value) }];
        Ok(ExprNode::new(ExprKind::IfExpr { branches, else_branch: Box::new(else_value) }, if_tok.span))
    }

    /// `switch value { v1, v2 -> expr; ... else -> expr; }`; requires at
    /// least one case and exactly one default (spec §4.5 "SwitchExpr").
    fn parse_switch_expression(&mut self) -> PResult<ExprNode> {
        let keyword = self.advance();
        let argument = self.parse_expression()?;
        self.expect(TokenKind::OpenBrace, "`{` after switch value")?;

        let mut cases = Vec::new();
        let mut default = None;
        while !self.is_at_end() && !self.check(TokenKind::CloseBrace) {
            if self.check(TokenKind::Else) {
                if default.is_some() {
                    return Err(self.fatal(
                        keyword.span,
                        DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                        "switch expression can't have more than one default branch",
                    ));
                }
                self.advance(); // `else`
                self.expect(TokenKind::RightArrow, "`->` after `else` in a switch expression default branch")?;
                let value = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, "`;` after switch expression case value")?;
                default = Some(value);
                continue;
            }

            let mut values = Vec::new();
            loop {
                let case_expr = self.parse_expression()?;
                if !matches!(case_expr.kind, ExprKind::Number(_) | ExprKind::EnumAccess { .. }) {
                    return Err(self.fatal(
                        keyword.span,
                        DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                        "switch expression case must be an integer or enum element",
                    ));
                }
                values.push(case_expr);
                if self.match_token(TokenKind::Comma) {
                    continue;
                }
                break;
            }
            self.expect(TokenKind::RightArrow, "`->` after switch expression case values")?;
            let value = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, "`;` after switch expression case value")?;
            cases.push((values, value));
        }
        self.expect(TokenKind::CloseBrace, "`}` after switch expression")?;

        let Some(default) = default else {
            return Err(self.fatal(
                keyword.span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                "switch expression must have a default case",
            ));
        };
        if cases.is_empty() {
            return Err(self.fatal(
                keyword.span,
                DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                "switch expression must have at least one case and a default case",
            ));
        }
        Ok(ExprNode::new(
            ExprKind::SwitchExpr { argument: Box::new(argument), cases, default: Box::new(default) },
            keyword.span,
        ))
    }

    fn parse_cast_expression(&mut self) -> PResult<ExprNode> {
        let tok = self.advance(); // `cast`
        self.expect(TokenKind::OpenParen, "`(` after `cast`")?;
        let target_type = self.parse_type()?;
        self.expect(TokenKind::CloseParen, "`)` after cast type")?;
        let expr = self.parse_expression()?;
        Ok(ExprNode::new(ExprKind::Cast { expr: Box::new(expr), target_type }, tok.span))
    }

    fn parse_type_size_expression(&mut self) -> PResult<ExprNode> {
        let tok = self.advance(); // `type_size`
        self.expect(TokenKind::OpenParen, "`(` after `type_size`")?;
        let target_type = self.parse_type()?;
        self.expect(TokenKind::CloseParen, "`)` after type_size type")?;
        Ok(ExprNode::new(ExprKind::TypeSize { target_type }, tok.span))
    }

    fn parse_value_size_expression(&mut self) -> PResult<ExprNode> {
        let tok = self.advance(); // `value_size`
        self.expect(TokenKind::OpenParen, "`(` after `value_size`")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::CloseParen, "`)` after value_size expression")?;
        Ok(ExprNode::new(ExprKind::ValueSize { expr: Box::new(value) }, tok.span))
    }

    /// If the current token is an identifier registered with `fixity`,
    /// returns its interned name without consuming it.
    fn peek_fixity_ident(&self, fixity: Fixity) -> Option<Symbol> {
        if !self.check(TokenKind::Ident) {
            return None;
        }
        let name = Symbol::intern(&self.peek().text);
        (self.ctx.lookup_function_fixity(name) == Some(fixity)).then_some(name)
    }

    /// Structurally duplicates `expr` so a compound assignment can use the
    /// same value as both the read operand and the assignment target.
    /// `Lambda` can't be duplicated (its body is a `Stmt`, not `Clone`) and
    /// is rejected - compound-assigning to a lambda is meaningless anyway.
    fn duplicate_expr(&self, expr: &ExprNode, span: Span) -> PResult<ExprNode> {
        let kind = match &expr.kind {
            ExprKind::Literal(sym) => ExprKind::Literal(*sym),
            ExprKind::Number(text) => ExprKind::Number(text.clone()),
            ExprKind::String(text) => ExprKind::String(text.clone()),
            ExprKind::Character(c) => ExprKind::Character(*c),
            ExprKind::Bool(b) => ExprKind::Bool(*b),
            ExprKind::Null { .. } => ExprKind::Null { base_type: RefCell::new(Rc::new(Type::Null)) },
            ExprKind::Group(inner) => ExprKind::Group(Box::new(self.duplicate_expr(inner, span)?)),
            ExprKind::PrefixUnary { op, operand } => {
                ExprKind::PrefixUnary { op: *op, operand: Box::new(self.duplicate_expr(operand, span)?) }
            }
            ExprKind::PostfixUnary { op, operand } => {
                ExprKind::PostfixUnary { op: *op, operand: Box::new(self.duplicate_expr(operand, span)?) }
            }
            ExprKind::Binary { left, op, right } => ExprKind::Binary {
                left: Box::new(self.duplicate_expr(left, span)?),
                op: *op,
                right: Box::new(self.duplicate_expr(right, span)?),
            },
            ExprKind::Shift { left, op, right } => ExprKind::Shift {
                left: Box::new(self.duplicate_expr(left, span)?),
                op: *op,
                right: Box::new(self.duplicate_expr(right, span)?),
            },
            ExprKind::Comparison { left, op, right } => ExprKind::Comparison {
                left: Box::new(self.duplicate_expr(left, span)?),
                op: *op,
                right: Box::new(self.duplicate_expr(right, span)?),
            },
            ExprKind::Logical { left, op, right } => ExprKind::Logical {
                left: Box::new(self.duplicate_expr(left, span)?),
                op: *op,
                right: Box::new(self.duplicate_expr(right, span)?),
            },
            ExprKind::Call { callee, args, generic_args } => ExprKind::Call {
                callee: Box::new(self.duplicate_expr(callee, span)?),
                args: args.iter().map(|a| self.duplicate_expr(a, span)).collect::<PResult<_>>()?,
                generic_args: generic_args.clone(),
            },
            ExprKind::Index { callee, index } => ExprKind::Index {
                callee: Box::new(self.duplicate_expr(callee, span)?),
                index: Box::new(self.duplicate_expr(index, span)?),
            },
            ExprKind::Dot { callee, field_name, .. } => ExprKind::Dot {
                callee: Box::new(self.duplicate_expr(callee, span)?),
                field_name: *field_name,
                field_index: Cell::new(0),
                is_constant_field: Cell::new(false),
            },
            ExprKind::Cast { expr: inner, target_type } => {
                ExprKind::Cast { expr: Box::new(self.duplicate_expr(inner, span)?), target_type: target_type.clone() }
            }
            ExprKind::TypeSize { target_type } => ExprKind::TypeSize { target_type: target_type.clone() },
            ExprKind::ValueSize { expr: inner } => {
                ExprKind::ValueSize { expr: Box::new(self.duplicate_expr(inner, span)?) }
            }
            ExprKind::EnumAccess { enum_name, element_name, index } => {
                ExprKind::EnumAccess { enum_name: *enum_name, element_name: *element_name, index: *index }
            }
            ExprKind::Array { values, .. } => ExprKind::Array {
                values: values.iter().map(|v| self.duplicate_expr(v, span)).collect::<PResult<_>>()?,
                is_constant_cache: Cell::new(None),
            },
            ExprKind::InitializeExpr { struct_name, args } => ExprKind::InitializeExpr {
                struct_name: *struct_name,
                args: args.iter().map(|a| self.duplicate_expr(a, span)).collect::<PResult<_>>()?,
            },
            ExprKind::Assign { target, value } => ExprKind::Assign {
                target: Box::new(self.duplicate_expr(target, span)?),
                value: Box::new(self.duplicate_expr(value, span)?),
            },
            ExprKind::IfExpr { branches, else_branch } => ExprKind::IfExpr {
                branches: branches
                    .iter()
                    .map(|b| {
                        Ok(IfBranch {
                            condition: self.duplicate_expr(&b.condition, span)?,
                            body: Box::new(self.duplicate_expr(&b.body, span)?),
                        })
                    })
                    .collect::<PResult<_>>()?,
                else_branch: Box::new(self.duplicate_expr(else_branch, span)?),
            },
            ExprKind::SwitchExpr { argument, cases, default } => ExprKind::SwitchExpr {
                argument: Box::new(self.duplicate_expr(argument, span)?),
                cases: cases
                    .iter()
                    .map(|(values, body)| {
                        Ok((
                            values.iter().map(|v| self.duplicate_expr(v, span)).collect::<PResult<_>>()?,
                            self.duplicate_expr(body, span)?,
                        ))
                    })
                    .collect::<PResult<_>>()?,
                default: Box::new(self.duplicate_expr(default, span)?),
            },
            ExprKind::Lambda { .. } => {
                return Err(self.fatal(
                    span,
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    "a lambda expression can't be the target of a compound assignment",
                ));
            }
        };
        Ok(ExprNode::new(kind, expr.span))
    }
}

fn binary_op_from_token(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => unreachable!("compound assignment operator must underlie one of + - * / %"),
    }
}
