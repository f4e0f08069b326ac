//! The type checker itself (spec §4.5): a recursive-descent walk over a
//! [`CompilationUnit`], mutating each [`ExprNode`]'s type slot (and a few
//! other in-place cells the parser left for us - `Dot::field_index`,
//! `Null::base_type`) in place.
//!
//! A fatal diagnostic returns [`Type::None`] (or, for statements, just
//! stops contributing further information) rather than aborting the whole
//! walk - siblings still get checked, so one bad declaration doesn't
//! swallow every other diagnostic in the file. `Type::None` also acts as
//! a poison value: once a sub-expression is poisoned, its parent suppresses
//! its own mismatch diagnostic rather than cascading (see [`is_poisoned`]).

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use jotc_par::ast::{ExprKind, ExprNode, IfBranch, Param, PrefixOp, Prototype, Stmt, SwitchCase};
use jotc_par::types::{castable, EnumType, NumberKind, Type};
use jotc_par::Context;
use jotc_util::{DiagnosticCode, Span, Symbol};

use crate::scope::Scope;

/// Walks a compilation unit, binding names to `Rc<Type>` in a lexical
/// [`Scope`] and resolving every expression's type against `ctx`'s
/// struct/enum/function tables.
pub struct Checker<'ctx> {
    ctx: &'ctx mut Context,
    scope: Scope<Rc<Type>>,
    /// Return type of the innermost enclosing function or lambda.
    return_type_stack: Vec<Rc<Type>>,
}

impl<'ctx> Checker<'ctx> {
    pub fn new(ctx: &'ctx mut Context) -> Self {
        Self { ctx, scope: Scope::new(), return_type_stack: Vec::new() }
    }

    pub fn check_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.check_statement(stmt);
        }
    }

    fn check_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(statements, _) => {
                self.scope.enter();
                self.check_statements(statements);
                self.scope.exit();
            }
            Stmt::FieldDeclaration { name, ty, initializer, is_global, span } => {
                self.check_field_declaration(*name, ty, initializer.as_ref(), *is_global, *span);
            }
            Stmt::FunctionPrototype(proto) | Stmt::IntrinsicPrototype(proto) => {
                self.check_function_prototype(proto);
            }
            Stmt::FunctionDeclaration { prototype, body } => {
                self.check_function_declaration(prototype, body);
            }
            // Registration into `ctx.structures` already happened in the
            // parser; there's nothing left to resolve here.
            Stmt::StructDeclaration(_) => {}
            Stmt::EnumDeclaration(enum_ty) => self.check_enum_declaration(enum_ty),
            Stmt::If { branches, else_body, .. } => self.check_if(branches, else_body),
            Stmt::ForRange { element_name, start, end, step, body } => {
                self.check_for_range(*element_name, start, end, step.as_ref(), body);
            }
            Stmt::ForEach { element_name, collection, body } => {
                self.check_for_each(*element_name, collection, body);
            }
            Stmt::Forever { body } => {
                self.scope.enter();
                self.check_statement(body);
                self.scope.exit();
            }
            Stmt::While { condition, body } => {
                let ty = self.check_expr(condition);
                self.require_number(condition, &ty, "while condition");
                self.scope.enter();
                self.check_statement(body);
                self.scope.exit();
            }
            Stmt::Switch { argument, cases, default } => {
                self.check_switch_statement(argument, cases, default.as_deref());
            }
            Stmt::Return { value, span } => self.check_return(value.as_ref(), *span),
            Stmt::Defer { call, .. } => {
                self.check_expr(call);
            }
            Stmt::Break { levels, span } => {
                if *levels == Some(1) {
                    self.emit_warning(
                        *span,
                        DiagnosticCode::W_REDUNDANT_LOOP_DEPTH,
                        "explicit level 1 is the same as a bare 'break;'",
                    );
                }
            }
            Stmt::Continue { levels, span } => {
                if *levels == Some(1) {
                    self.emit_warning(
                        *span,
                        DiagnosticCode::W_REDUNDANT_LOOP_DEPTH,
                        "explicit level 1 is the same as a bare 'continue;'",
                    );
                }
            }
            Stmt::ExpressionStatement(expr) => {
                self.check_expr(expr);
            }
        }
    }

    // -- declarations ---------------------------------------------------------

    fn check_field_declaration(
        &mut self,
        name: Symbol,
        ty: &Option<Rc<Type>>,
        initializer: Option<&ExprNode>,
        is_global: bool,
        span: Span,
    ) {
        let resolved = match (ty, initializer) {
            (Some(declared), Some(init)) => {
                self.check_assignable(init, declared, init.span, &format!("initializer for '{name}'"));
                declared.clone()
            }
            (Some(declared), None) => declared.clone(),
            (None, Some(init)) => self.check_expr(init),
            (None, None) => {
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("variable '{name}' needs either a type or an initializer"),
                );
                Rc::new(Type::None)
            }
        };

        if is_global {
            if let Some(init) = initializer {
                if !init.is_constant() {
                    self.fatal(
                        init.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        "global variable initializer must be a constant expression",
                    );
                }
            }
        }

        if !self.scope.define(name, resolved) {
            self.fatal(
                span,
                DiagnosticCode::E_SEMANTIC_DUPLICATE_DEF,
                format!("'{name}' is already defined in this scope"),
            );
        }
    }

    fn check_function_prototype(&mut self, prototype: &Prototype) {
        let fn_ty = function_type_of(prototype);
        if !self.scope.define(prototype.name, fn_ty) {
            self.fatal(
                prototype.span,
                DiagnosticCode::E_SEMANTIC_DUPLICATE_DEF,
                format!("'{}' is already defined", prototype.name),
            );
        }
    }

    /// `ctx.define_function` already ran at parse time (the parser's own
    /// expression grammar needs fixity info immediately); the checker only
    /// has to make the function's full type resolvable through `scope`, so
    /// `Literal` lookups cover both variables and function references.
    fn check_function_declaration(&mut self, prototype: &Prototype, body: &Stmt) {
        let fn_ty = function_type_of(prototype);
        if !self.scope.define(prototype.name, fn_ty) {
            self.fatal(
                prototype.span,
                DiagnosticCode::E_SEMANTIC_DUPLICATE_DEF,
                format!("function '{}' is already defined", prototype.name),
            );
        }

        self.return_type_stack.push(prototype.return_type.clone());
        self.scope.enter();
        self.define_params(&prototype.params);
        self.check_statement(body);
        self.scope.exit();
        self.return_type_stack.pop();
    }

    /// `int1` holds exactly two values, so an `int1`-underlying enum can
    /// never name a third element.
    fn check_enum_declaration(&mut self, enum_ty: &Rc<EnumType>) {
        if enum_ty.underlying == NumberKind::Int1 && enum_ty.values.len() > 2 {
            self.fatal(
                Span::DUMMY,
                DiagnosticCode::E_SEMANTIC_ENUM_INT1_OVERFLOW,
                format!(
                    "enum '{}' has an int1 underlying type but declares {} elements; int1 permits at most two",
                    enum_ty.name,
                    enum_ty.values.len()
                ),
            );
        }
    }

    fn define_params(&mut self, params: &[Param]) {
        for param in params {
            if !self.scope.define(param.name, param.ty.clone()) {
                self.fatal(
                    param.span,
                    DiagnosticCode::E_SEMANTIC_DUPLICATE_DEF,
                    format!("duplicate parameter '{}'", param.name),
                );
            }
        }
    }

    // -- control flow -----------------------------------------------------------

    fn check_if(&mut self, branches: &[IfBranch<Box<Stmt>>], else_body: &Option<Box<Stmt>>) {
        for branch in branches {
            let cond_ty = self.check_expr(&branch.condition);
            self.require_number(&branch.condition, &cond_ty, "if condition");
            self.scope.enter();
            self.check_statement(&branch.body);
            self.scope.exit();
        }
        if let Some(body) = else_body {
            self.scope.enter();
            self.check_statement(body);
            self.scope.exit();
        }
    }

    fn check_for_range(
        &mut self,
        element_name: Symbol,
        start: &ExprNode,
        end: &ExprNode,
        step: Option<&ExprNode>,
        body: &Stmt,
    ) {
        let start_ty = self.check_expr(start);
        let end_ty = self.check_expr(end);
        if !matches!(start_ty.as_ref(), Type::Number(_)) {
            self.fatal(start.span, DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH, "for-range start must be a number");
        } else if !is_poisoned(&end_ty) && end_ty != start_ty {
            self.fatal(
                end.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("for-range end type {end_ty} does not match start type {start_ty}"),
            );
        }
        if let Some(step_expr) = step {
            let step_ty = self.check_expr(step_expr);
            if !is_poisoned(&step_ty) && step_ty != start_ty {
                self.fatal(
                    step_expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("for-range step type {step_ty} does not match start type {start_ty}"),
                );
            }
        }
        self.scope.enter();
        self.scope.define(element_name, start_ty);
        self.check_statement(body);
        self.scope.exit();
    }

    /// The collection must type-check to `Array(T, _)` or `Pointer(T)`; any
    /// other type is a fatal "for-each requires an array or pointer" (a
    /// resolved Open Question - see DESIGN.md).
    fn check_for_each(&mut self, element_name: Symbol, collection: &ExprNode, body: &Stmt) {
        let collection_ty = self.check_expr(collection);
        let element_ty = match collection_ty.as_ref() {
            Type::Array(element, _) => element.clone(),
            Type::Pointer(base) => base.clone(),
            Type::None => Rc::new(Type::None),
            _ => {
                self.fatal(
                    collection.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    "for-each requires an array or pointer",
                );
                Rc::new(Type::None)
            }
        };
        self.scope.enter();
        self.scope.define(element_name, element_ty);
        self.check_statement(body);
        self.scope.exit();
    }

    fn check_switch_statement(&mut self, argument: &ExprNode, cases: &[SwitchCase], default: Option<&Stmt>) {
        let arg_ty = self.check_expr(argument);
        self.require_switch_argument(argument, &arg_ty);

        let mut seen = HashSet::new();
        for case in cases {
            for value in &case.values {
                self.check_switch_case_value(value, &arg_ty, &mut seen);
            }
            self.scope.enter();
            self.check_statement(&case.body);
            self.scope.exit();
        }
        if let Some(default) = default {
            self.scope.enter();
            self.check_statement(default);
            self.scope.exit();
        }
    }

    /// Every case RHS and the default branch must share one type, which
    /// becomes the switch expression's own type. A missing default is a
    /// parse-time error here (`ExprKind::SwitchExpr::default` is mandatory
    /// in the AST), so `E_SEMANTIC_SWITCH_NO_DEFAULT` never fires from this
    /// function - see DESIGN.md.
    fn check_switch_expr(
        &mut self,
        argument: &ExprNode,
        cases: &[(Vec<ExprNode>, ExprNode)],
        default: &ExprNode,
    ) -> Rc<Type> {
        let arg_ty = self.check_expr(argument);
        self.require_switch_argument(argument, &arg_ty);

        let mut seen = HashSet::new();
        let mut result: Option<Rc<Type>> = None;
        for (values, body) in cases {
            for value in values {
                self.check_switch_case_value(value, &arg_ty, &mut seen);
            }
            let body_ty = self.check_expr(body);
            result = Some(self.unify_branch(body, body_ty, result));
        }
        let default_ty = self.check_expr(default);
        match result {
            Some(prev) => self.unify_branch(default, default_ty, Some(prev)),
            None => default_ty,
        }
    }

    fn unify_branch(&mut self, body: &ExprNode, body_ty: Rc<Type>, acc: Option<Rc<Type>>) -> Rc<Type> {
        match acc {
            None => body_ty,
            Some(prev) => {
                if !is_poisoned(&prev) && !is_poisoned(&body_ty) && prev != body_ty {
                    self.fatal(
                        body.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("switch branches must share one type, found {prev} and {body_ty}"),
                    );
                }
                prev
            }
        }
    }

    fn require_switch_argument(&mut self, argument: &ExprNode, ty: &Rc<Type>) {
        let ok = matches!(ty.as_ref(), Type::Number(k) if k.is_integer()) || matches!(ty.as_ref(), Type::EnumElement { .. });
        if !ok && !is_poisoned(ty) {
            self.fatal(
                argument.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("switch argument must be an integer or enum value, found {ty}"),
            );
        }
    }

    fn check_switch_case_value(&mut self, value: &ExprNode, arg_ty: &Rc<Type>, seen: &mut HashSet<i64>) {
        if !matches!(value.kind, ExprKind::Number(_) | ExprKind::EnumAccess { .. }) {
            self.fatal(
                value.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "switch case value must be a number or enum element",
            );
            return;
        }
        let value_ty = self.check_expr(value);
        if !is_poisoned(&value_ty) && !is_poisoned(arg_ty) && &value_ty != arg_ty {
            self.fatal(
                value.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("switch case type {value_ty} does not match argument type {arg_ty}"),
            );
        }
        if let Some(key) = case_value_key(value) {
            if !seen.insert(key) {
                self.fatal(value.span, DiagnosticCode::E_SEMANTIC_DUPLICATE_CASE, "duplicate switch case value");
            }
        }
    }

    fn check_return(&mut self, value: Option<&ExprNode>, span: Span) {
        let ret_ty = self.return_type_stack.last().cloned().unwrap_or_else(|| Rc::new(Type::Void));
        match (ret_ty.as_ref(), value) {
            (Type::Void, None) => {}
            (Type::Void, Some(expr)) => {
                self.check_expr(expr);
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    "a function returning void must use a bare 'return;'",
                );
            }
            (_, None) => {
                self.fatal(span, DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH, "non-void function must return a value");
            }
            (_, Some(expr)) => {
                self.check_assignable(expr, &ret_ty, expr.span, "return value");
            }
        }
    }

    // -- expressions --------------------------------------------------------

    fn check_expr(&mut self, expr: &ExprNode) -> Rc<Type> {
        let ty = match &expr.kind {
            ExprKind::Number(text) => self.check_number(expr, text),
            ExprKind::String(_) => Rc::new(Type::Pointer(Rc::new(Type::Number(NumberKind::Int8)))),
            ExprKind::Character(_) => Rc::new(Type::Number(NumberKind::Int8)),
            ExprKind::Bool(_) => Rc::new(Type::Number(NumberKind::Int1)),
            ExprKind::Null { .. } => Rc::new(Type::Null),
            ExprKind::Literal(name) => self.check_literal(expr, *name),
            ExprKind::Group(inner) => self.check_expr(inner),
            ExprKind::Assign { target, value } => self.check_assign(target, value),
            ExprKind::Binary { left, right, .. } => self.check_binary(expr.span, left, right),
            ExprKind::Shift { left, right, .. } => self.check_shift(expr.span, left, right),
            ExprKind::Comparison { left, right, .. } => self.check_comparison(expr.span, left, right),
            ExprKind::Logical { left, right, .. } => self.check_logical(left, right),
            ExprKind::PrefixUnary { op, operand } => self.check_prefix_unary(expr, *op, operand),
            ExprKind::PostfixUnary { operand, .. } => self.check_postfix_unary(expr, operand),
            ExprKind::Call { callee, args, .. } => self.check_call(expr, callee, args),
            ExprKind::InitializeExpr { struct_name, args } => self.check_initialize(expr, *struct_name, args),
            ExprKind::Lambda { params, return_type, body, .. } => self.check_lambda(params, return_type, body),
            ExprKind::Dot { callee, field_name, field_index, is_constant_field } => {
                self.check_dot(expr, callee, *field_name, field_index, is_constant_field)
            }
            ExprKind::Cast { expr: inner, target_type } => self.check_cast(expr, inner, target_type),
            ExprKind::TypeSize { .. } => Rc::new(Type::Number(NumberKind::Int64)),
            ExprKind::ValueSize { expr: inner } => {
                self.check_expr(inner);
                Rc::new(Type::Number(NumberKind::Int64))
            }
            ExprKind::Index { callee, index } => self.check_index(expr, callee, index),
            ExprKind::EnumAccess { enum_name, .. } => self.check_enum_access(*enum_name),
            ExprKind::Array { values, .. } => self.check_array(values),
            ExprKind::IfExpr { branches, else_branch } => self.check_if_expr(branches, else_branch),
            ExprKind::SwitchExpr { argument, cases, default } => self.check_switch_expr(argument, cases, default),
        };
        expr.set_type(ty.clone());
        ty
    }

    /// A bare number literal with no surrounding context defaults to
    /// `int32`/`float64`; [`Checker::check_expr_as`] overrides the kind when
    /// one is already known (an expected assignment/argument type, or a
    /// sibling operand) - see DESIGN.md.
    fn check_number(&mut self, expr: &ExprNode, text: &str) -> Rc<Type> {
        let default_kind = if text.contains('.') { NumberKind::Float64 } else { NumberKind::Int32 };
        self.check_number_as(expr, text, default_kind)
    }

    fn check_number_as(&mut self, expr: &ExprNode, text: &str, kind: NumberKind) -> Rc<Type> {
        if kind.is_floating_point() {
            if text.parse::<f64>().is_err() {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("invalid floating-point literal '{text}'"),
                );
                return Rc::new(Type::None);
            }
            return Rc::new(Type::Number(kind));
        }
        if text.contains('.') {
            self.fatal(
                expr.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("'{text}' is a floating-point literal but {kind} is an integer type"),
            );
            return Rc::new(Type::None);
        }
        match text.parse::<i128>() {
            Ok(value) if fits_in_kind(value, kind) => Rc::new(Type::Number(kind)),
            Ok(value) => {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("integer literal '{value}' does not fit in {kind}"),
                );
                Rc::new(Type::None)
            }
            Err(_) => {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("invalid integer literal '{text}'"),
                );
                Rc::new(Type::None)
            }
        }
    }

    /// Checks `expr` the same as [`Checker::check_expr`], except a bare
    /// number literal adopts `expected`'s kind instead of the int32/float64
    /// default - lets `var x: int8 = 1;` and `x << 1` (shift amount against
    /// `x`'s kind) type-check without a separate literal-widening pass.
    fn check_expr_as(&mut self, expr: &ExprNode, expected: &Rc<Type>) -> Rc<Type> {
        if let (ExprKind::Number(text), Type::Number(kind)) = (&expr.kind, expected.as_ref()) {
            let ty = self.check_number_as(expr, text, *kind);
            expr.set_type(ty.clone());
            return ty;
        }
        // An empty array literal has no element to unify against; let it
        // adopt the expected array type outright rather than clashing with
        // the `Type::None` placeholder `check_array` gives it on its own.
        if let (ExprKind::Array { values, .. }, Type::Array(_, _)) = (&expr.kind, expected.as_ref()) {
            if values.is_empty() {
                expr.set_type(expected.clone());
                return expected.clone();
            }
        }
        self.check_expr(expr)
    }

    /// Type-checks a binary/shift/comparison operand pair, letting a bare
    /// number literal on either side adopt the other (non-literal) side's
    /// kind before the equal-kind check runs.
    fn check_operand_pair(&mut self, left: &ExprNode, right: &ExprNode) -> (Rc<Type>, Rc<Type>) {
        let left_is_literal = matches!(left.kind, ExprKind::Number(_));
        let right_is_literal = matches!(right.kind, ExprKind::Number(_));
        if left_is_literal && !right_is_literal {
            let rty = self.check_expr(right);
            let lty = self.check_expr_as(left, &rty);
            (lty, rty)
        } else if right_is_literal && !left_is_literal {
            let lty = self.check_expr(left);
            let rty = self.check_expr_as(right, &lty);
            (lty, rty)
        } else {
            (self.check_expr(left), self.check_expr(right))
        }
    }

    fn check_literal(&mut self, expr: &ExprNode, name: Symbol) -> Rc<Type> {
        match self.scope.lookup(name) {
            Some(ty) => ty.clone(),
            None => {
                self.fatal(expr.span, DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR, format!("undefined name '{name}'"));
                Rc::new(Type::None)
            }
        }
    }

    fn check_assign(&mut self, target: &ExprNode, value: &ExprNode) -> Rc<Type> {
        let lvalue_ok = matches!(target.kind, ExprKind::Literal(_) | ExprKind::Index { .. } | ExprKind::Dot { .. })
            || matches!(&target.kind, ExprKind::PrefixUnary { op: PrefixOp::Deref, .. });
        if !lvalue_ok {
            self.fatal(
                target.span,
                DiagnosticCode::E_SEMANTIC_NOT_ASSIGNABLE,
                "left side of an assignment must be a variable, index, field access, or dereference",
            );
        }
        if let ExprKind::Index { callee, .. } = &target.kind {
            if matches!(callee.kind, ExprKind::String(_)) {
                self.fatal(
                    target.span,
                    DiagnosticCode::E_SEMANTIC_NOT_ASSIGNABLE,
                    "a string literal is readonly and cannot be indexed for assignment",
                );
            }
        }

        let target_ty = self.check_expr(target);
        if !is_poisoned(&target_ty) {
            self.check_assignable(value, &target_ty, value.span, "assignment");
        } else {
            self.check_expr(value);
        }
        target_ty
    }

    fn check_binary(&mut self, span: Span, left: &ExprNode, right: &ExprNode) -> Rc<Type> {
        let (lty, rty) = self.check_operand_pair(left, right);
        if is_poisoned(&lty) || is_poisoned(&rty) {
            return Rc::new(Type::None);
        }
        match (lty.as_ref(), rty.as_ref()) {
            (Type::Number(a), Type::Number(b)) if a == b => lty.clone(),
            _ => {
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("binary operator requires two numbers of the same kind, found {lty} and {rty}"),
                );
                Rc::new(Type::None)
            }
        }
    }

    /// Result follows the *left* operand's kind, not `Int1` - a deliberate
    /// redesign from the distilled spec's literal wording; see DESIGN.md.
    fn check_shift(&mut self, span: Span, left: &ExprNode, right: &ExprNode) -> Rc<Type> {
        let (lty, rty) = self.check_operand_pair(left, right);
        if is_poisoned(&lty) || is_poisoned(&rty) {
            return Rc::new(Type::None);
        }
        match (lty.as_ref(), rty.as_ref()) {
            (Type::Number(a), Type::Number(b)) if a.is_integer() && b.is_integer() && a == b => lty.clone(),
            _ => {
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("shift requires two integers of the same kind, found {lty} and {rty}"),
                );
                Rc::new(Type::None)
            }
        }
    }

    fn check_comparison(&mut self, span: Span, left: &ExprNode, right: &ExprNode) -> Rc<Type> {
        let (lty, rty) = self.check_operand_pair(left, right);
        let ok = match (lty.as_ref(), rty.as_ref()) {
            (Type::Number(a), Type::Number(b)) => a == b,
            (Type::Pointer(a), Type::Pointer(b)) => a == b,
            (Type::EnumElement { enum_name: a, .. }, Type::EnumElement { enum_name: b, .. }) => a == b,
            (Type::Pointer(_), Type::Null) => {
                self.set_null_base(right, &lty);
                true
            }
            (Type::Null, Type::Pointer(_)) => {
                self.set_null_base(left, &rty);
                true
            }
            (Type::Null, Type::Null) => true,
            (Type::None, _) | (_, Type::None) => true,
            _ => false,
        };
        if !ok {
            self.fatal(span, DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH, format!("cannot compare {lty} and {rty}"));
        }
        Rc::new(Type::Number(NumberKind::Int1))
    }

    fn check_logical(&mut self, left: &ExprNode, right: &ExprNode) -> Rc<Type> {
        let lty = self.check_expr(left);
        let rty = self.check_expr(right);
        if !is_poisoned(&lty) && !matches!(lty.as_ref(), Type::Number(_)) {
            self.fatal(
                left.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("logical operand must be a number, found {lty}"),
            );
        }
        if !is_poisoned(&rty) && !matches!(rty.as_ref(), Type::Number(_)) {
            self.fatal(
                right.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("logical operand must be a number, found {rty}"),
            );
        }
        Rc::new(Type::Number(NumberKind::Int1))
    }

    fn check_prefix_unary(&mut self, expr: &ExprNode, op: PrefixOp, operand: &ExprNode) -> Rc<Type> {
        let oty = self.check_expr(operand);
        if is_poisoned(&oty) {
            return Rc::new(Type::None);
        }
        match op {
            PrefixOp::Negate | PrefixOp::Increment | PrefixOp::Decrement => {
                if !matches!(oty.as_ref(), Type::Number(_)) {
                    self.fatal(
                        expr.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("this operator requires a number, found {oty}"),
                    );
                    return Rc::new(Type::None);
                }
                oty
            }
            PrefixOp::Not => {
                if !matches!(oty.as_ref(), Type::Number(_)) {
                    self.fatal(
                        expr.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("unary '!' requires a number, found {oty}"),
                    );
                }
                Rc::new(Type::Number(NumberKind::Int1))
            }
            PrefixOp::BitNot => {
                if !matches!(oty.as_ref(), Type::Number(k) if k.is_integer()) {
                    self.fatal(
                        expr.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("unary '~' requires an integer, found {oty}"),
                    );
                    return Rc::new(Type::None);
                }
                oty
            }
            PrefixOp::Deref => match oty.as_ref() {
                Type::Pointer(base) => base.clone(),
                _ => {
                    self.fatal(
                        expr.span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("unary '*' requires a pointer, found {oty}"),
                    );
                    Rc::new(Type::None)
                }
            },
            PrefixOp::AddressOf => Rc::new(Type::Pointer(oty)),
        }
    }

    fn check_postfix_unary(&mut self, expr: &ExprNode, operand: &ExprNode) -> Rc<Type> {
        let oty = self.check_expr(operand);
        if is_poisoned(&oty) {
            return Rc::new(Type::None);
        }
        if !matches!(oty.as_ref(), Type::Number(_)) {
            self.fatal(
                expr.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("'++'/'--' requires a number, found {oty}"),
            );
            return Rc::new(Type::None);
        }
        oty
    }

    fn check_call(&mut self, expr: &ExprNode, callee: &ExprNode, args: &[ExprNode]) -> Rc<Type> {
        let callee_ty = self.check_expr(callee);
        let Type::Function { params, ret, has_varargs, varargs_element } = callee_ty.as_ref() else {
            if !is_poisoned(&callee_ty) {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("cannot call a value of type {callee_ty}"),
                );
            }
            for arg in args {
                self.check_expr(arg);
            }
            return Rc::new(Type::None);
        };
        let params = params.clone();
        let ret = ret.clone();
        let has_varargs = *has_varargs;
        let varargs_element = varargs_element.clone();
        self.check_arguments(expr.span, args, &params, has_varargs, varargs_element.as_ref());
        ret
    }

    fn check_initialize(&mut self, expr: &ExprNode, struct_name: Symbol, args: &[ExprNode]) -> Rc<Type> {
        let struct_ty = self
            .ctx
            .structures
            .get(&struct_name)
            .cloned()
            .expect("parser only emits InitializeExpr for names already registered as structs");
        let field_types: Vec<Rc<Type>> = struct_ty.fields.iter().map(|(_, ty)| ty.clone()).collect();
        self.check_arguments(expr.span, args, &field_types, false, None);
        Rc::new(Type::Struct(struct_ty))
    }

    fn check_lambda(&mut self, params: &[Param], return_type: &Rc<Type>, body: &Stmt) -> Rc<Type> {
        let fn_ty = Rc::new(Type::Function {
            params: params.iter().map(|p| p.ty.clone()).collect(),
            ret: return_type.clone(),
            has_varargs: false,
            varargs_element: None,
        });
        self.return_type_stack.push(return_type.clone());
        self.scope.enter();
        self.define_params(params);
        self.check_statement(body);
        self.scope.exit();
        self.return_type_stack.pop();
        Rc::new(Type::Pointer(fn_ty))
    }

    fn check_dot(
        &mut self,
        expr: &ExprNode,
        callee: &ExprNode,
        field_name: Symbol,
        field_index: &Cell<usize>,
        is_constant_field: &Cell<bool>,
    ) -> Rc<Type> {
        let callee_ty = self.check_expr(callee);
        let struct_ty = match callee_ty.as_ref() {
            Type::Struct(s) => Some(s.clone()),
            Type::Pointer(base) => match base.as_ref() {
                Type::Struct(s) => Some(s.clone()),
                _ => None,
            },
            _ => None,
        };
        let Some(struct_ty) = struct_ty else {
            if !is_poisoned(&callee_ty) {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("field access requires a struct or pointer to struct, found {callee_ty}"),
                );
            }
            return Rc::new(Type::None);
        };
        match struct_ty.field_index.get(&field_name) {
            Some(&index) => {
                field_index.set(index);
                let field_ty = struct_ty.fields[index].1.clone();
                is_constant_field.set(matches!(field_ty.as_ref(), Type::Number(_) | Type::EnumElement { .. }));
                field_ty
            }
            None => {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("struct '{}' has no field named '{field_name}'", struct_ty.name),
                );
                Rc::new(Type::None)
            }
        }
    }

    fn check_cast(&mut self, expr: &ExprNode, inner: &ExprNode, target_type: &Rc<Type>) -> Rc<Type> {
        let inner_ty = self.check_expr(inner);
        if is_poisoned(&inner_ty) {
            return target_type.clone();
        }
        if inner_ty.as_ref() == target_type.as_ref() {
            self.emit_warning(
                expr.span,
                DiagnosticCode::W_REDUNDANT_CAST,
                format!("cast to the same type {target_type} is redundant"),
            );
        } else if !castable(&inner_ty, target_type) {
            self.fatal(
                expr.span,
                DiagnosticCode::E_SEMANTIC_INVALID_CAST,
                format!("cannot cast {inner_ty} to {target_type}"),
            );
        }
        target_type.clone()
    }

    fn check_index(&mut self, expr: &ExprNode, callee: &ExprNode, index: &ExprNode) -> Rc<Type> {
        let callee_ty = self.check_expr(callee);
        let index_ty = self.check_expr(index);
        if !is_poisoned(&index_ty) && !matches!(index_ty.as_ref(), Type::Number(_)) {
            self.fatal(
                index.span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("index must be a number, found {index_ty}"),
            );
        }
        match callee_ty.as_ref() {
            Type::Array(element, _) => element.clone(),
            Type::Pointer(base) => base.clone(),
            Type::None => Rc::new(Type::None),
            _ => {
                self.fatal(
                    expr.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("cannot index into {callee_ty}"),
                );
                Rc::new(Type::None)
            }
        }
    }

    fn check_enum_access(&self, enum_name: Symbol) -> Rc<Type> {
        let underlying = self.ctx.enumerations.get(&enum_name).map_or(NumberKind::Int32, |e| e.underlying);
        Rc::new(Type::EnumElement { enum_name, underlying })
    }

    /// All elements must share one type; the result carries it as the
    /// array's element type. An empty array keeps the `None` placeholder -
    /// there is nothing to unify against.
    fn check_array(&mut self, values: &[ExprNode]) -> Rc<Type> {
        if values.is_empty() {
            return Rc::new(Type::Array(Rc::new(Type::None), 0));
        }
        let first_ty = self.check_expr(&values[0]);
        for value in &values[1..] {
            let ty = self.check_expr(value);
            if !is_poisoned(&first_ty) && !is_poisoned(&ty) && ty != first_ty {
                self.fatal(
                    value.span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("array elements must share one type, found {first_ty} and {ty}"),
                );
            }
        }
        Rc::new(Type::Array(first_ty, values.len() as u64))
    }

    fn check_if_expr(&mut self, branches: &[IfBranch<Box<ExprNode>>], else_branch: &ExprNode) -> Rc<Type> {
        let mut result: Option<Rc<Type>> = None;
        for branch in branches {
            let cond_ty = self.check_expr(&branch.condition);
            self.require_number(&branch.condition, &cond_ty, "if-expression condition");
            let body_ty = self.check_expr(&branch.body);
            result = Some(self.unify_branch(&branch.body, body_ty, result));
        }
        let else_ty = self.check_expr(else_branch);
        match result {
            Some(prev) => self.unify_branch(else_branch, else_ty, Some(prev)),
            None => else_ty,
        }
    }

    // -- shared helpers -----------------------------------------------------

    fn check_arguments(
        &mut self,
        span: Span,
        args: &[ExprNode],
        params: &[Rc<Type>],
        has_varargs: bool,
        varargs_element: Option<&Rc<Type>>,
    ) {
        if has_varargs {
            if args.len() < params.len() {
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!("expected at least {} arguments, found {}", params.len(), args.len()),
                );
            }
        } else if args.len() != params.len() {
            self.fatal(
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("expected {} arguments, found {}", params.len(), args.len()),
            );
        }

        for (i, arg) in args.iter().enumerate() {
            if let Some(param_ty) = params.get(i) {
                self.check_assignable(arg, param_ty, arg.span, &format!("argument {}", i + 1));
            } else if let Some(element_ty) = varargs_element {
                self.check_assignable(arg, element_ty, arg.span, &format!("vararg {}", i + 1));
            } else {
                self.check_expr(arg);
            }
        }
    }

    /// Checks `expr` against `expected`, applying Null-to-Pointer inference
    /// (fixing `Null::base_type` to `expected`) when `expected` is a
    /// pointer. Emits a diagnostic on mismatch; a poisoned actual type is
    /// assumed already reported and silently accepted.
    fn check_assignable(&mut self, expr: &ExprNode, expected: &Rc<Type>, span: Span, what: &str) {
        let actual = self.check_expr_as(expr, expected);
        if is_poisoned(&actual) {
            return;
        }
        if matches!(actual.as_ref(), Type::Null) {
            if matches!(expected.as_ref(), Type::Pointer(_)) {
                self.set_null_base(expr, expected);
            } else {
                self.fatal(
                    span,
                    DiagnosticCode::E_SEMANTIC_NULL_NOT_POINTER,
                    format!("{what} expects {expected}, found null"),
                );
            }
            return;
        }
        if &actual != expected {
            self.fatal(
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("{what} expected {expected}, found {actual}"),
            );
        }
    }

    fn set_null_base(&self, expr: &ExprNode, target: &Rc<Type>) {
        if let ExprKind::Null { base_type } = &expr.kind {
            *base_type.borrow_mut() = target.clone();
        }
        expr.set_type(target.clone());
    }

    fn require_number(&mut self, expr: &ExprNode, ty: &Rc<Type>, what: &str) {
        if !is_poisoned(ty) && !matches!(ty.as_ref(), Type::Number(_)) {
            self.fatal(expr.span, DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH, format!("{what} must be a number, found {ty}"));
        }
    }

    fn fatal(&self, span: Span, code: DiagnosticCode, message: impl Into<String>) {
        self.ctx.handler.build_error(span, message).code(code).emit(&self.ctx.handler);
    }

    fn emit_warning(&self, span: Span, code: DiagnosticCode, message: impl Into<String>) {
        if self.ctx.options.warnings_as_errors {
            self.ctx.handler.build_error(span, message).code(code).emit(&self.ctx.handler);
        } else if self.ctx.options.warnings {
            self.ctx.handler.build_warning(span, message).code(code).emit(&self.ctx.handler);
        }
    }
}

fn function_type_of(prototype: &Prototype) -> Rc<Type> {
    Rc::new(Type::Function {
        params: prototype.params.iter().map(|p| p.ty.clone()).collect(),
        ret: prototype.return_type.clone(),
        has_varargs: prototype.varargs.is_some(),
        varargs_element: prototype.varargs.as_ref().and_then(|v| v.element_type.clone()),
    })
}

fn case_value_key(expr: &ExprNode) -> Option<i64> {
    match &expr.kind {
        ExprKind::Number(text) => text.parse::<i64>().ok(),
        ExprKind::EnumAccess { index, .. } => Some(*index),
        _ => None,
    }
}

fn is_poisoned(ty: &Rc<Type>) -> bool {
    matches!(ty.as_ref(), Type::None)
}

/// Range check for a parsed integer literal against its target `NumberKind`.
/// `Int1` is treated as a strict 0/1 flag rather than a signed one-bit range.
fn fits_in_kind(value: i128, kind: NumberKind) -> bool {
    if kind == NumberKind::Int1 {
        return value == 0 || value == 1;
    }
    let bits = kind.bit_width();
    if kind.is_unsigned() {
        value >= 0 && value < (1i128 << bits)
    } else {
        let half = 1i128 << (bits - 1);
        value >= -half && value < half
    }
}
