//! Diagnostic message tests (spec §8: "exactly one diagnostic whose
//! message contains the quoted substring"), one per error-taxonomy
//! category from spec §7, driven through the `jotc` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn jotc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jotc"))
}

fn check_stderr(content: &str, expected_substring: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.jot");
    std::fs::write(&path, content).unwrap();
    jotc()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(expected_substring));
}

#[test]
fn unresolved_name_diagnostic() {
    check_stderr("fun main() void { var x = nonexistent_identifier; }", "undefined name");
}

#[test]
fn type_mismatch_diagnostic() {
    check_stderr("fun main() void { var x: int32 = 1.5; }", "floating-point literal");
}

#[test]
fn invalid_cast_diagnostic() {
    check_stderr(
        r#"
        struct Point { x int32; }
        fun main() void {
            var p: Point = Point { 1 };
            var n: int32 = cast(int32) p;
        }
        "#,
        "cannot cast",
    );
}

#[test]
fn lvalue_rule_violation_diagnostic() {
    check_stderr("fun main() void { 1 = 2; }", "must be a variable");
}

#[test]
fn duplicate_switch_case_value_diagnostic() {
    check_stderr(
        r#"
        fun main() void {
            switch 1 {
                1 -> {}
                1 -> {}
                else -> {}
            }
        }
        "#,
        "duplicate switch case",
    );
}

#[test]
fn redefinition_in_the_same_scope_diagnostic() {
    check_stderr("fun main() void { var x: int32 = 1; var x: int32 = 2; }", "already");
}

#[test]
fn call_arity_mismatch_diagnostic() {
    check_stderr(
        "fun add(a int32, b int32) int32 { return a + b; } fun main() void { var x = add(1); }",
        "expected 2 arguments",
    );
}

#[test]
fn out_of_range_numeric_literal_diagnostic() {
    check_stderr("fun main() void { var x: int8 = 200; }", "does not fit");
}
