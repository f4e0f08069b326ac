//! Edge case tests for jotc-par

#[cfg(test)]
mod tests {
    use crate::ast::Stmt;
    use crate::context::{CompileOptions, Context};
    use crate::{parse_str, CompilationUnit};
    use jotc_util::Handler;

    fn parse_source(source: &str) -> (CompilationUnit, Context) {
        let mut ctx = Context::new(CompileOptions::default());
        let unit = parse_str(&mut ctx, "edge.jot", source);
        (unit, ctx)
    }

    fn has_errors(handler: &Handler) -> bool {
        handler.has_errors()
    }

    // ==================== EDGE CASES ====================

    /// EDGE CASE: Empty source
    #[test]
    fn test_edge_empty_source() {
        let (unit, ctx) = parse_source("");
        assert!(unit.statements.is_empty());
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Whitespace only
    #[test]
    fn test_edge_whitespace_only() {
        let (unit, ctx) = parse_source("   \n\t  \n  ");
        assert!(unit.statements.is_empty());
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Single function
    #[test]
    fn test_edge_single_function() {
        let (unit, ctx) = parse_source("fun main() { }");
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Empty function body gets an implicit return
    #[test]
    fn test_edge_empty_function_body() {
        let (unit, ctx) = parse_source("fun empty() { }");
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
        match &unit.statements[0] {
            Stmt::FunctionDeclaration { body, .. } => match body.as_ref() {
                Stmt::Block(stmts, _) => {
                    assert_eq!(stmts.len(), 1);
                    assert!(matches!(stmts[0], Stmt::Return { value: None, .. }));
                }
                _ => panic!("expected a block body"),
            },
            _ => panic!("expected a function declaration"),
        }
    }

    /// EDGE CASE: Function with no parameters
    #[test]
    fn test_edge_no_params() {
        let (_unit, ctx) = parse_source("fun no_params() { var x = 1; }");
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Function with a single parameter
    #[test]
    fn test_edge_single_param() {
        let (_unit, ctx) = parse_source("fun one(x int32) { }");
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Deeply nested blocks
    #[test]
    fn test_edge_nested_blocks() {
        let source = "fun main() { {{{{ var x = 1; }}}} }";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Multiple statements
    #[test]
    fn test_edge_multiple_stmts() {
        let source = "fun main() { var a = 1; var b = 2; var c = 3; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: If without else
    #[test]
    fn test_edge_if_no_else() {
        let source = "fun main() { if true { var x = 1; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: If with else
    #[test]
    fn test_edge_if_else() {
        let source = "fun main() { if true { var x = 1; } else { var y = 2; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Else-if chain
    #[test]
    fn test_edge_else_if_chain() {
        let source = "fun main() { if 1 == 1 { } else if 1 == 2 { } else { } }";
        let (unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
        match &unit.statements[0] {
            Stmt::FunctionDeclaration { body, .. } => match body.as_ref() {
                Stmt::Block(stmts, _) => match &stmts[0] {
                    Stmt::If { branches, has_else, else_body } => {
                        assert_eq!(branches.len(), 2);
                        assert!(has_else);
                        assert!(else_body.is_some());
                    }
                    _ => panic!("expected an if statement"),
                },
                _ => panic!("expected a block body"),
            },
            _ => panic!("expected a function declaration"),
        }
    }

    /// ERROR CASE: A second `else` branch is rejected
    #[test]
    fn test_err_duplicate_else() {
        let source = "fun main() { if true { } else { } else { } }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: While loop
    #[test]
    fn test_edge_while_loop() {
        let source = "fun main() { while true { var x = 1; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Forever loop with break
    #[test]
    fn test_edge_forever_loop_break() {
        let source = "fun main() { for { break; } }";
        let (unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
        match &unit.statements[0] {
            Stmt::FunctionDeclaration { body, .. } => match body.as_ref() {
                Stmt::Block(stmts, _) => assert!(matches!(stmts[0], Stmt::Forever { .. })),
                _ => panic!("expected a block body"),
            },
            _ => panic!("expected a function declaration"),
        }
    }

    /// EDGE CASE: Range-based for loop
    #[test]
    fn test_edge_for_range() {
        let source = "fun main() { for i: 0..10 { var x = i; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Range-based for loop with a step
    #[test]
    fn test_edge_for_range_step() {
        let source = "fun main() { for i: 0..10:2 { var x = i; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Collection for-each loop, default element name `it`
    #[test]
    fn test_edge_for_each() {
        let source = "fun main() { var xs = [1, 2, 3]; for xs { var y = it; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: break outside of any loop
    #[test]
    fn test_err_break_outside_loop() {
        let source = "fun main() { break; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: continue levels exceeding the current nesting depth
    #[test]
    fn test_err_continue_levels_too_deep() {
        let source = "fun main() { for { continue 2; } }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: continue with an explicit level inside nested loops
    #[test]
    fn test_edge_continue_levels() {
        let source = "fun main() { for { for { continue 2; } } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Return statement with a value
    #[test]
    fn test_edge_return() {
        let source = "fun main() int32 { return 42; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Return without a value
    #[test]
    fn test_edge_return_unit() {
        let source = "fun main() { return; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: defer wraps a call expression
    #[test]
    fn test_edge_defer_call() {
        let source = "fun main() { defer close(); }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: defer on a non-call expression is rejected
    #[test]
    fn test_err_defer_non_call() {
        let source = "fun main() { defer 1 + 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Binary expressions respect precedence
    #[test]
    fn test_edge_binary_exprs() {
        let source = "fun main() { var x = 1 + 2 * 3 - 4 / 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Comparison operators
    #[test]
    fn test_edge_comparisons() {
        let source = "fun main() { var x = 1 == 2; var y = 1 != 2; var z = 1 < 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Logical operators
    #[test]
    fn test_edge_logical_ops() {
        let source = "fun main() { var x = true && false; var y = true || false; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Unary operators
    #[test]
    fn test_edge_unary_ops() {
        let source = "fun main() { var x = -5; var y = !true; var z = ~1; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Prefix/postfix increment on a variable
    #[test]
    fn test_edge_increment_decrement() {
        let source = "fun main() { var x = 1; ++x; x--; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: Increment on a non-lvalue is rejected
    #[test]
    fn test_err_increment_non_lvalue() {
        let source = "fun main() { ++1; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Compound assignment desugars to a binary expression
    #[test]
    fn test_edge_compound_assignment() {
        let source = "fun main() { var x = 1; x += 2; x *= 3; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Struct definition
    #[test]
    fn test_edge_struct_def() {
        let source = "struct Point { x int32; y int32; }";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
        assert!(matches!(unit.statements[0], Stmt::StructDeclaration(_)));
    }

    /// EDGE CASE: Empty struct
    #[test]
    fn test_edge_empty_struct() {
        let source = "struct Empty { }";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Self-referential struct field (linked-list node)
    #[test]
    fn test_edge_self_referential_struct() {
        let source = "struct Node { value int32; next *Node; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Packed struct
    #[test]
    fn test_edge_packed_struct() {
        let source = "packed struct Flags { bits int8; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: Duplicate field name in a struct
    #[test]
    fn test_err_duplicate_struct_field() {
        let source = "struct Point { x int32; x int32; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Enum definition with implicit values
    #[test]
    fn test_edge_enum_def() {
        let source = "enum Color { Red, Green, Blue }";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Enum with an explicit underlying type and explicit values
    #[test]
    fn test_edge_enum_explicit_values() {
        let source = "enum Status : int8 { Ok = 0, Failed = 1 }";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: Mixing implicit and explicit enum values is rejected
    #[test]
    fn test_err_enum_mixed_values() {
        let source = "enum Bad { A = 1, B }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Duplicate explicit enum value
    #[test]
    fn test_err_enum_duplicate_value() {
        let source = "enum Bad { A = 1, B = 1 }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Enum element access and attribute
    #[test]
    fn test_edge_enum_access_and_count() {
        let source = "enum Color { Red, Green, Blue } fun main() { var c = Color::Red; var n = Color.count; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: switch statement with a default branch
    #[test]
    fn test_edge_switch_statement() {
        let source = "fun main() { switch 1 { 0 -> { } else -> { } } }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: switch statement with two default branches
    #[test]
    fn test_err_switch_duplicate_default() {
        let source = "fun main() { switch 1 { else -> { } else -> { } } }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: switch expression used as a value
    #[test]
    fn test_edge_switch_expression() {
        let source = "fun main() int32 { return switch 1 { 0 -> 10; else -> 20; }; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: switch expression without a default case
    #[test]
    fn test_err_switch_expression_no_default() {
        let source = "fun main() int32 { return switch 1 { 0 -> 10; }; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: if-expression ternary form
    #[test]
    fn test_edge_if_expression() {
        let source = "fun main() int32 { return if true 1 else 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Function call
    #[test]
    fn test_edge_fn_call() {
        let source = "fun main() { foo(); bar(1, 2); }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Nested function calls
    #[test]
    fn test_edge_nested_fn_calls() {
        let source = "fun main() { foo(bar(baz(1))); }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Struct initializer expression
    #[test]
    fn test_edge_struct_initializer() {
        let source = "struct Point { x int32; y int32; } fun main() { var p = Point { 1, 2 }; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Field access and indexing chained together
    #[test]
    fn test_edge_dot_and_index_chain() {
        let source = "struct Pair { first int32; second int32; } fun main() { var xs = [1]; var p = Pair { 1, 2 }; var a = p.first; var b = xs[0]; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: All literal kinds
    #[test]
    fn test_edge_all_literals() {
        let source =
            "fun main() { var a = 42; var b = 3.14; var c = \"hello\"; var d = true; var e = 'x'; var f = null; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: cast, type_size, and value_size expressions
    #[test]
    fn test_edge_cast_and_size_expressions() {
        let source = "fun main() { var x = cast(int64) 1; var s = type_size(int32); var v = value_size(x); }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Prefix-fixity function declaration and use
    #[test]
    fn test_edge_prefix_function() {
        let source = "prefix fun negate(x int32) int32 { return -x; } fun main() { var y = negate 5; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Infix-fixity function declaration and use
    #[test]
    fn test_edge_infix_function() {
        let source = "infix fun max(a int32, b int32) int32 { return if a > b a else b; } fun main() { var y = 1 max 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: Infix function declared with the wrong arity
    #[test]
    fn test_err_infix_wrong_arity() {
        let source = "infix fun bad(a int32) int32 { return a; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: extern function prototype
    #[test]
    fn test_edge_extern_prototype() {
        let source = "extern fun puts(message *int8) int32;";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
        assert!(matches!(unit.statements[0], Stmt::FunctionPrototype(_)));
    }

    /// EDGE CASE: extern function with untyped varargs
    #[test]
    fn test_edge_extern_varargs() {
        let source = "extern fun printf(format *int8, varargs Any) int32;";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// ERROR CASE: varargs must be the last parameter
    #[test]
    fn test_err_varargs_not_last() {
        let source = "extern fun bad(varargs Any, extra int32) int32;";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Lambda expression passed as a trailing call argument
    #[test]
    fn test_edge_lambda_trailing_argument() {
        let source = "fun main() { var result = apply(1) { (x int32) int32 -> return x + 1; }; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Global field declaration without an explicit type
    #[test]
    fn test_edge_global_inferred_type() {
        let source = "var counter = 0;";
        let (unit, ctx) = parse_source(source);
        assert_eq!(unit.statements.len(), 1);
        assert!(!has_errors(&ctx.handler));
        match &unit.statements[0] {
            Stmt::FieldDeclaration { ty, is_global, .. } => {
                assert!(ty.is_none());
                assert!(is_global);
            }
            _ => panic!("expected a field declaration"),
        }
    }

    /// EDGE CASE: Fixed-size array type
    #[test]
    fn test_edge_fixed_size_array_type() {
        let source = "fun main() { var xs: [4]int32; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Function pointer type
    #[test]
    fn test_edge_function_pointer_type() {
        let source = "fun main() { var callback: (int32) int32; }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    // ==================== ERROR CASES ====================

    /// ERROR CASE: Missing semicolon
    #[test]
    fn test_err_missing_semicolon() {
        let source = "fun main() { var x = 1 var y = 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Missing closing brace
    #[test]
    fn test_err_missing_closing_brace() {
        let source = "fun main() { var x = 1;";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Missing opening brace
    #[test]
    fn test_err_missing_opening_brace() {
        let source = "fun main() var x = 1; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Invalid token in function body
    #[test]
    fn test_err_invalid_token() {
        let source = "fun main() { @#$ }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Incomplete if statement
    #[test]
    fn test_err_incomplete_if() {
        let source = "fun main() { if true }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Incomplete while loop
    #[test]
    fn test_err_incomplete_while() {
        let source = "fun main() { while true }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Incomplete switch
    #[test]
    fn test_err_incomplete_switch() {
        let source = "fun main() { switch x { }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Incomplete struct
    #[test]
    fn test_err_incomplete_struct() {
        let source = "struct Point { x int32";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Incomplete enum
    #[test]
    fn test_err_incomplete_enum() {
        let source = "enum Color { Red";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Invalid function signature
    #[test]
    fn test_err_invalid_fn_sig() {
        let source = "fun main( { }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Missing function body
    #[test]
    fn test_err_missing_fn_body() {
        let source = "fun main()";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Invalid type annotation
    #[test]
    fn test_err_invalid_type() {
        let source = "fun main() { var x @invalid = 1; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Unbalanced parentheses
    #[test]
    fn test_err_unbalanced_parens() {
        let source = "fun main() { foo((1, 2); }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Unbalanced brackets
    #[test]
    fn test_err_unbalanced_brackets() {
        let source = "fun main() { var x = [1, 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Unterminated string in code
    #[test]
    fn test_err_unterminated_string_in_code() {
        let source = "fun main() { var x = \"unterminated; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Invalid operator
    #[test]
    fn test_err_invalid_operator() {
        let source = "fun main() { var x = 1 @ 2; }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// ERROR CASE: Missing condition in if
    #[test]
    fn test_err_missing_if_cond() {
        let source = "fun main() { if { } }";
        let (_unit, ctx) = parse_source(source);
        assert!(has_errors(&ctx.handler));
    }

    /// EDGE CASE: Comments in code
    #[test]
    fn test_edge_comments() {
        let source = "fun main() { // comment\nvar x = 1; /* block */ }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }

    /// EDGE CASE: Complex expression
    #[test]
    fn test_edge_complex_expr() {
        let source = "fun main() { var x = (1 + 2) * (3 - 4) / (5 % 6); }";
        let (_unit, ctx) = parse_source(source);
        assert!(!has_errors(&ctx.handler));
    }
}
