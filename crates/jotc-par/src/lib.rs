//! jotc-par - the Jot parser (§4.4).
//!
//! Consumes the token stream produced by [`jotc_lex`] and builds a
//! [`ast::CompilationUnit`]: one flat list of top-level statements, with
//! `import`/`load` directives expanded inline by recursively parsing the
//! referenced file and splicing its statements into the importer's list.
//!
//! The parser is a hand-written recursive-descent / precedence-climbing
//! parser, split by concern:
//!
//! - [`context`]: process-wide state threaded through parsing (source
//!   registry, struct/enum/function tables) and carried on into the type
//!   checker.
//! - [`types`]: the `Type`/`StructType`/`EnumType` model produced by
//!   `parse_type` and consumed by every later phase.
//! - [`ast`]: the statement/expression tree itself.
//! - `items`: top-level declarations, `parse_type`, and import/load
//!   expansion.
//! - `stmt`: statement forms.
//! - `expr`: the expression precedence ladder.
//!
//! A malformed file is more often unrecoverable than worth limping past
//! (§4.4's documented redesign: no panic-mode recovery). Parsing a file
//! aborts at the first fatal error via [`ParseAbort`], propagated with `?`;
//! [`Parser::parse_compilation_unit`] catches the abort at the top and
//! returns whatever statements were accumulated so far, with the triggering
//! diagnostic (and any already emitted) left in the [`Context`]'s handler
//! for the driver to report.

pub mod ast;
pub mod context;
pub mod types;

mod expr;
mod items;
mod stmt;

#[cfg(test)]
mod edge_cases;

use std::path::{Path, PathBuf};

use jotc_lex::{Lexer, Token, TokenKind};
use jotc_util::{DiagnosticCode, Span, Symbol};

pub use ast::CompilationUnit;
pub use context::{CompileOptions, Context, SourceManager};

/// Sentinel unwound via `?` when a file cannot be parsed any further
/// (§4.4's "abort the current file's parse" redesign). Carries no data: the
/// diagnostic explaining *why* has already been emitted into the handler by
/// the time this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseAbort;

pub type PResult<T> = Result<T, ParseAbort>;

/// Which construct is currently being parsed, for `break`/`continue`
/// validation (§4.4: both require being lexically nested inside an
/// if/for/while, not merely inside a loop that happens to be further out).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AstScope {
    Function,
    Conditional,
}

/// Parses `path` and every file it transitively `import`s/`load`s, merging
/// all of their top-level statements into one [`CompilationUnit`].
///
/// This is the crate's main entry point: used by the driver for the
/// initial file and recursively by the parser itself for `import`/`load`.
pub fn parse_file(ctx: &mut Context, path: &str) -> PResult<CompilationUnit> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ctx.handler
            .build_error(Span::DUMMY, format!("cannot read source file '{path}': {e}"))
            .code(DiagnosticCode::E_PARSER_MISSING_PATH)
            .emit(&ctx.handler);
        ParseAbort
    })?;
    Ok(parse_str(ctx, path, &content))
}

/// Parses `content` as if it were read from `path`, without touching the
/// filesystem. Used for the top-level file once its text is already in
/// hand, and by tests. Never fails outright: a fatal error inside the file
/// truncates its statement list rather than propagating, mirroring
/// [`Parser::parse_compilation_unit`].
pub fn parse_str(ctx: &mut Context, path: &str, content: &str) -> CompilationUnit {
    ctx.sources.register(path, content.to_string());
    let tokens = tokenize(ctx, content);
    let dir = Path::new(path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut parser = Parser::new(ctx, tokens, dir);
    parser.parse_compilation_unit()
}

fn tokenize(ctx: &mut Context, content: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(content, &mut ctx.handler);
    let mut tokens: Vec<Token> = (&mut lexer).collect();
    tokens.push(lexer.next_token());
    tokens
}

/// Recursive-descent parser state for a single file. A fresh `Parser` is
/// created for every file `import`/`load` pulls in, each borrowing the same
/// [`Context`] so struct/enum/function definitions accumulate globally.
pub struct Parser<'ctx> {
    pub(crate) ctx: &'ctx mut Context,
    tokens: Vec<Token>,
    pos: usize,
    /// Directory `load` paths are resolved relative to (the directory of
    /// the file currently being parsed, not the top-level invocation).
    pub(crate) file_dir: PathBuf,
    /// Name of the struct whose field list is currently being parsed, so
    /// self-referential fields (`struct Node { next *Node; }`) can be
    /// recognized before `Node` itself is registered.
    pub(crate) current_struct_name: Option<Symbol>,
    /// Count of `Type::None` placeholders handed out for the
    /// currently-parsing struct's self-referential fields, patched once the
    /// struct's own `Rc<StructType>` exists.
    pub(crate) current_struct_unknown_fields: usize,
    pub(crate) scope: AstScope,
    /// One entry per currently-open function/lambda body; its top counts
    /// the loop nesting depth within that body (incremented/decremented
    /// around each for/while/forever, not pushed per loop).
    pub(crate) loop_levels: Vec<u32>,
}

impl<'ctx> Parser<'ctx> {
    fn new(ctx: &'ctx mut Context, tokens: Vec<Token>, file_dir: PathBuf) -> Self {
        Self {
            ctx,
            tokens,
            pos: 0,
            file_dir,
            current_struct_name: None,
            current_struct_unknown_fields: 0,
            scope: AstScope::Function,
            loop_levels: vec![0],
        }
    }

    // -- token stream primitives --------------------------------------------

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn previous(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1)].clone()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// True if the current token is an ordinary identifier spelled exactly
    /// `text` - used for contextual keywords like `packed` that the lexer
    /// does not tokenize specially.
    pub(crate) fn check_ident(&self, text: &str) -> bool {
        self.peek_kind() == TokenKind::Ident && self.peek().text == text
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(self.fatal(
                found.span,
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected {what}, found '{}'", found.text),
            ))
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn expect_ident(&mut self) -> PResult<(Symbol, Span)> {
        let tok = self.expect(TokenKind::Ident, "an identifier")?;
        Ok((Symbol::intern(&tok.text), tok.span))
    }

    pub(crate) fn fatal(
        &self,
        span: Span,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) -> ParseAbort {
        self.ctx
            .handler
            .build_error(span, message)
            .code(code)
            .emit(&self.ctx.handler);
        ParseAbort
    }

    // -- top-level entry -----------------------------------------------------

    /// Parses every import/load directive and top-level declaration in the
    /// file, stopping early (and returning what was accumulated so far) on
    /// the first `ParseAbort`.
    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let mut unit = CompilationUnit::default();
        while !self.is_at_end() {
            let result = if self.check(TokenKind::Import) {
                self.parse_import_declaration()
            } else if self.check(TokenKind::Load) {
                self.parse_load_declaration()
            } else {
                self.parse_top_level_declaration().map(|s| vec![s])
            };
            match result {
                Ok(mut stmts) => unit.statements.append(&mut stmts),
                Err(ParseAbort) => break,
            }
        }
        unit
    }
}
