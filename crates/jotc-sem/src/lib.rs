//! jotc-sem — the Jot type checker (spec §4.5).
//!
//! Walks a [`jotc_par::CompilationUnit`] depth-first, mutating its `ExprNode`
//! tree in place exactly as the parser built it: no separate HIR is built
//! (spec §3.3/§6.3 — the backend contract is "every expression has a
//! resolved non-`None` type" on the *same* tree). The checker owns:
//!
//! - [`scope::Scope`]: a lexically nested name → `Rc<Type>` table.
//! - [`analysis::Checker`]: the recursive walk itself, plus the
//!   parameter/argument matching helper shared by `Call` and
//!   `InitializeExpr`.
//!
//! A fatal condition records a diagnostic and returns a poisoned
//! (`Type::None`/`Type::Void`) sentinel rather than unwinding the whole
//! pass — siblings keep getting checked, so one bad statement doesn't
//! suppress every other diagnostic in the file (spec §9, a deliberate
//! relaxation of the parser's all-or-nothing failure model; see
//! DESIGN.md).

pub mod analysis;
pub mod scope;

#[cfg(test)]
mod edge_cases;

pub use analysis::Checker;

use jotc_par::{CompilationUnit, Context};

/// Type-checks `unit` against `ctx`'s struct/enum/function tables,
/// accumulating diagnostics into `ctx.handler`. Returns `true` if checking
/// completed without a fatal diagnostic (mirrors `Handler::has_errors()`
/// negated, for callers that don't want to poke the handler directly).
pub fn check_compilation_unit(ctx: &mut Context, unit: &CompilationUnit) -> bool {
    let errors_before = ctx.handler.error_count();
    let mut checker = Checker::new(ctx);
    checker.check_statements(&unit.statements);
    ctx.handler.error_count() == errors_before
}
