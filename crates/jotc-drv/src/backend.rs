//! Backend seam (spec §6.4): LLVM-IR code generation is out of scope for
//! this repo — only the boundary the driver hands a checked
//! [`CompilationUnit`] across is specified.

use std::path::Path;

use jotc_par::{CompilationUnit, Context};

/// Consumes a fully type-checked compilation unit and writes emitted IR to
/// `out`. Implementations live outside this repo; only [`NullBackend`] ships
/// here, to exercise the driver's `compile`-mode wiring without an LLVM
/// dependency.
pub trait Backend {
    fn emit(&self, unit: &CompilationUnit, ctx: &Context, out: &Path) -> anyhow::Result<()>;
}

/// A backend that writes a placeholder module instead of real IR. Used by
/// driver tests to confirm `compile` mode's file I/O and exit-code plumbing
/// without requiring a real code generator to be registered.
pub struct NullBackend;

impl Backend for NullBackend {
    fn emit(&self, unit: &CompilationUnit, _ctx: &Context, out: &Path) -> anyhow::Result<()> {
        use std::fmt::Write as _;

        let mut module = String::from("; jotc NullBackend placeholder module\n");
        let _ = writeln!(module, "; {} top-level statement(s)", unit.statements.len());
        std::fs::write(out, module)
            .map_err(|e| anyhow::anyhow!("failed to write output file '{}': {e}", out.display()))
    }
}
