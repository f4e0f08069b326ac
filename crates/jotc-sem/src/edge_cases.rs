//! Edge case tests for jotc-sem

#[cfg(test)]
mod tests {
    use jotc_par::{parse_str, CompileOptions, Context};
    use jotc_util::Symbol;

    use crate::check_compilation_unit;
    use crate::scope::Scope;

    fn check(source: &str) -> Context {
        let mut ctx = Context::new(CompileOptions::default());
        let unit = parse_str(&mut ctx, "edge.jot", source);
        check_compilation_unit(&mut ctx, &unit);
        ctx
    }

    // ==================== SCOPE TESTS ====================

    /// EDGE CASE: a fresh scope resolves nothing
    #[test]
    fn test_edge_new_scope_is_empty() {
        let scope: Scope<i32> = Scope::new();
        assert!(scope.lookup(Symbol::intern("nonexistent")).is_none());
    }

    /// EDGE CASE: entering and exiting without defining anything is a no-op
    #[test]
    fn test_edge_enter_exit_scope() {
        let mut scope: Scope<i32> = Scope::new();
        scope.enter();
        scope.exit();
        assert!(scope.lookup(Symbol::intern("x")).is_none());
    }

    /// EDGE CASE: a binding placed three scopes deep does not survive exiting all of them
    #[test]
    fn test_edge_nested_scopes_unwind() {
        let mut scope: Scope<i32> = Scope::new();
        scope.enter();
        scope.enter();
        scope.enter();
        scope.define(Symbol::intern("x"), 1);
        assert!(scope.lookup(Symbol::intern("x")).is_some());
        scope.exit();
        scope.exit();
        scope.exit();
        assert!(scope.lookup(Symbol::intern("x")).is_none());
    }

    /// EDGE CASE: exiting past the root scope is a no-op, not a panic
    #[test]
    fn test_edge_exit_past_root() {
        let mut scope: Scope<i32> = Scope::new();
        let root = scope.current_id();
        scope.exit();
        scope.exit();
        assert_eq!(scope.current_id(), root);
    }

    /// EDGE CASE: redefining in the same scope fails without disturbing the existing binding
    #[test]
    fn test_edge_duplicate_define_keeps_original() {
        let mut scope: Scope<i32> = Scope::new();
        let x = Symbol::intern("x");
        assert!(scope.define(x, 1));
        assert!(!scope.define(x, 2));
        assert_eq!(scope.lookup(x), Some(&1));
    }

    // ==================== CHECKER EDGE CASES ====================

    /// EDGE CASE: empty compilation unit checks cleanly
    #[test]
    fn test_edge_empty_unit() {
        let ctx = check("");
        assert!(!ctx.handler.has_errors());
    }

    /// EDGE CASE: deeply nested blocks don't overflow the scope stack
    #[test]
    fn test_edge_deeply_nested_blocks() {
        let mut source = String::from("fun f() void {");
        for _ in 0..100 {
            source.push('{');
        }
        for _ in 0..100 {
            source.push('}');
        }
        source.push('}');
        let ctx = check(&source);
        assert!(!ctx.handler.has_errors());
    }

    /// EDGE CASE: an empty array literal has no element type to unify against
    #[test]
    fn test_edge_empty_array_literal() {
        let ctx = check("fun f() void { var xs: [0]int32 = []; }");
        assert!(!ctx.handler.has_errors());
    }

    /// EDGE CASE: a literal at the exact boundary of int32 is accepted
    #[test]
    fn test_edge_int32_boundary_value_accepted() {
        let ctx = check("fun f() int32 { return 2147483647; }");
        assert!(!ctx.handler.has_errors());
    }

    /// ERROR CASE: a literal one past the int32 boundary is fatal when nothing
    /// widens it (no declared type or wider expected context in scope)
    #[test]
    fn test_err_int32_overflow_literal() {
        let ctx = check("fun f() void { var x = 2147483648; }");
        assert!(ctx.handler.has_errors());
    }

    /// EDGE CASE: a literal narrows to an 8-bit field when the declared type says so
    #[test]
    fn test_edge_literal_narrows_to_declared_kind() {
        let ctx = check("fun f() void { var x: int8 = 127; }");
        assert!(!ctx.handler.has_errors());
    }

    /// ERROR CASE: a literal that doesn't fit the declared 8-bit kind is fatal
    #[test]
    fn test_err_literal_does_not_fit_declared_kind() {
        let ctx = check("fun f() void { var x: int8 = 200; }");
        assert!(ctx.handler.has_errors());
    }

    /// EDGE CASE: shifting a narrow integer by a bare literal infers the literal's kind
    #[test]
    fn test_edge_shift_amount_infers_left_operand_kind() {
        let ctx = check("fun f() int16 { var x: int16 = 4; return x << 2; }");
        assert!(!ctx.handler.has_errors());
    }

    /// ERROR CASE: one bad statement does not suppress diagnostics in siblings
    #[test]
    fn test_err_poison_does_not_cascade_to_siblings() {
        let ctx = check("fun f() void { var a = missing_one; var b = missing_two; }");
        assert_eq!(ctx.handler.error_count(), 2);
    }

    /// EDGE CASE: an if-expression with no diverging branch unifies on the else arm
    #[test]
    fn test_edge_if_expr_unifies_with_else() {
        let ctx = check("fun f(flag int1) int32 { return if flag 1 else 2; }");
        assert!(!ctx.handler.has_errors());
    }

    /// ERROR CASE: an if-expression whose branches disagree in type is fatal
    #[test]
    fn test_err_if_expr_branch_mismatch() {
        let ctx = check("fun f(flag int1) int32 { return if flag 1 else 1.5; }");
        assert!(ctx.handler.has_errors());
    }

    /// EDGE CASE: recursive function calls resolve through the checker's own scope
    #[test]
    fn test_edge_recursive_call_resolves() {
        let ctx = check("fun fact(n int32) int32 { return if n == 0 1 else n * fact(n - 1); }");
        assert!(!ctx.handler.has_errors());
    }
}
