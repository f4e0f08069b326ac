//! jotc-util - core utilities shared by every stage of the Jot front end.
//!
//! This crate has no dependency on any other `jotc-*` crate. It provides:
//!
//! - [`span`]: source locations (`Span`, `FileId`) and the `SourceMap` that
//!   resolves them back to line/column text for diagnostics.
//! - [`symbol`]: string interning (`Symbol`) with stable indices for Jot's
//!   keywords and primitive type names.
//! - [`diagnostic`]: the `Diagnostic`/`Handler`/`DiagnosticBuilder` machinery
//!   used to accumulate errors and warnings as the pipeline runs.
//! - [`index_vec`]: a typed-index `Vec` wrapper for arenas keyed by a
//!   newtype index rather than a raw `usize`.
//! - [`error`]: `thiserror`-based error enums for this crate's own fallible
//!   operations, as opposed to [`diagnostic`], which models errors found in
//!   the *compiled program*, not in the compiler's own plumbing.
//!
//! `jotc` compiles one translation unit per process invocation and never
//! fans work out across threads, so the interior-mutable types in this
//! crate favor a plain `Mutex`/`RefCell` over lock-free structures.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

/// Define a newtype index backed by `u32` and implementing [`Idx`].
///
/// ```
/// jotc_util::define_idx!(ExprId);
///
/// let mut exprs: jotc_util::IndexVec<ExprId, i32> = jotc_util::IndexVec::new();
/// let id = exprs.push(42);
/// assert_eq!(exprs[id], 42);
/// ```
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
