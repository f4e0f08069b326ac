//! jotc-drv — the Jot compiler driver (spec §6).
//!
//! Owns the three things outside the pure front-end: command-line parsing
//! (`clap`), source file I/O, and orchestration of `jotc-lex` → `jotc-par` →
//! `jotc-sem` followed by an optional [`Backend`] hand-off (§6.4 — code
//! generation itself is out of scope; only the trait boundary is defined
//! here).
//!
//! Errors split the way the front-end's own `Handler`/`Result` split does:
//! a [`DriverError`] is a hard failure outside the source being compiled
//! (bad CLI invocation, unreadable file, no backend registered) and aborts
//! before any diagnostic is even attempted. Diagnostics *about* the source
//! (type errors, unresolved names, …) never become a `DriverError` — they
//! accumulate in `Context::handler` and are reported on the way out, with
//! their presence reflected only in the returned exit code.

pub mod backend;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use jotc_par::{parse_str, CompileOptions, Context};
use jotc_sem::check_compilation_unit;

pub use backend::{Backend, NullBackend};

/// Exit code for a clean compile/check with no error diagnostics.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the front-end recorded at least one error diagnostic
/// (includes warnings promoted to errors by `-werr`).
pub const EXIT_DIAGNOSTICS: i32 = 1;

/// Which pipeline stage to run (spec §6.1's `mode` positional).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Run the full pipeline and hand the checked unit to the registered
    /// [`Backend`].
    Compile,
    /// Run the front-end only (lex, parse, type-check) and report
    /// diagnostics — no backend is consulted.
    Check,
    /// Print usage and exit; ignores `source` and every flag.
    Help,
}

/// `jotc <compile|check|help> <source.jot> [-o OUTPUT] [-w] [-werr]`
/// (spec §6.1, unchanged contract surface).
#[derive(Parser, Debug)]
#[command(name = "jotc", version, about = "The Jot compiler front-end")]
pub struct Cli {
    /// compile | check | help
    pub mode: Mode,

    /// Source file to process. Required for `compile` and `check`; ignored
    /// for `help`.
    pub source: Option<PathBuf>,

    /// Output path for emitted IR.
    #[arg(short = 'o', default_value = "output.ll")]
    pub output: PathBuf,

    /// Enable warning reports.
    #[arg(short = 'w')]
    pub warnings: bool,

    /// Enable warnings and treat them as errors. Implies `-w`.
    #[arg(long = "werr")]
    pub warnings_as_errors: bool,
}

/// Hard failures outside the source being compiled (spec §7: kept distinct
/// from the soft diagnostic accumulation in `Handler`).
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("a source file is required for `{mode}` mode")]
    MissingSource { mode: &'static str },

    #[error("cannot read source file '{path}'")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no backend configured for `compile` mode")]
    NoBackendConfigured,

    #[error("backend failed to emit output")]
    Backend(#[source] anyhow::Error),
}

/// Runs one compiler invocation end to end and returns the process exit
/// code. `backend` is consulted only in `Mode::Compile`, and only once the
/// front-end produced zero error diagnostics; the shipped `jotc` binary
/// passes `None` since no real code generator lives in this repo (§6.4).
pub fn run(cli: &Cli, backend: Option<&dyn Backend>) -> Result<i32, DriverError> {
    if cli.mode == Mode::Help {
        Cli::command().print_long_help().ok();
        println!();
        return Ok(EXIT_SUCCESS);
    }

    let mode_name = match cli.mode {
        Mode::Compile => "compile",
        Mode::Check => "check",
        Mode::Help => unreachable!("handled above"),
    };
    let source = cli.source.as_ref().ok_or(DriverError::MissingSource { mode: mode_name })?;

    log::debug!("reading source file {}", source.display());
    let content = std::fs::read_to_string(source)
        .map_err(|e| DriverError::ReadSource { path: source.clone(), source: e })?;

    let options = CompileOptions {
        warnings: cli.warnings || cli.warnings_as_errors,
        warnings_as_errors: cli.warnings_as_errors,
    };
    let mut ctx = Context::new(options);
    let path = source.to_string_lossy().into_owned();

    log::debug!("lexing and parsing {path}");
    let unit = parse_str(&mut ctx, &path, &content);
    log::trace!("parsed {} top-level statement(s)", unit.statements.len());

    log::debug!("type-checking {path}");
    check_compilation_unit(&mut ctx, &unit);
    log::trace!(
        "type-check produced {} error(s), {} warning(s)",
        ctx.handler.error_count(),
        ctx.handler.warning_count()
    );

    if cli.mode == Mode::Compile && !ctx.handler.has_errors() {
        match backend {
            Some(backend) => {
                log::debug!("emitting via backend to {}", cli.output.display());
                backend.emit(&unit, &ctx, &cli.output).map_err(DriverError::Backend)?;
            }
            None => return Err(DriverError::NoBackendConfigured),
        }
    }

    report_diagnostics(&ctx, source);

    Ok(if ctx.handler.has_errors() { EXIT_DIAGNOSTICS } else { EXIT_SUCCESS })
}

/// Prints every accumulated diagnostic to stderr as
/// `path:line:col: level[code]: message` (spec §1: rendering detail — caret
/// art — is explicitly out of scope; this line format is the driver's own
/// presentation choice for the underlying diagnostic model).
fn report_diagnostics(ctx: &Context, source: &std::path::Path) {
    for diag in ctx.handler.diagnostics() {
        let code = diag.code.map(|c| format!("[{}] ", c.as_str())).unwrap_or_default();
        eprintln!(
            "{}:{}:{}: {} {}{}",
            source.display(),
            diag.span.line,
            diag.span.column,
            diag.level,
            code,
            diag.message
        );
    }
}
