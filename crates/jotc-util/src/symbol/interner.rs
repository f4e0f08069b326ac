//! String interner backing [`Symbol`].
//!
//! The front-end compiles one translation unit per process invocation and
//! does not fan work out across threads (see the crate root docs), so the
//! interner is a `Mutex`-guarded hash map rather than a lock-free concurrent
//! structure. Strings are leaked to obtain `'static` references, which is
//! fine for a short-lived compiler process.

use rustc_hash::FxHashMap;
use std::sync::{LazyLock, Mutex};

use super::{InternerStats, Symbol};

/// Number of symbols reserved for known keywords and primitive type names.
///
/// Symbols with index `< RESERVED_SYMBOLS_END` are known at compile time and
/// pre-interned by [`StringTable::initialize_known_symbols`], so they have
/// stable indices across runs.
const RESERVED_SYMBOLS_END: u32 = 64;

struct Tables {
    forward: FxHashMap<Box<str>, u32>,
    reverse: Vec<&'static str>,
    hits: usize,
    misses: usize,
}

/// The process-wide string table.
pub struct StringTable {
    tables: Mutex<Tables>,
}

/// Global string table instance, initialized on first use.
///
/// All Jot keywords and primitive type names are pre-interned during
/// initialization so they have stable, predictable indices.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

impl StringTable {
    fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                forward: FxHashMap::default(),
                reverse: Vec::with_capacity(RESERVED_SYMBOLS_END as usize),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Pre-intern the fixed set of keyword and primitive-type symbols so
    /// they get the same index every run, matching the `KW_*`/`TY_*`
    /// constants declared in [`super`].
    fn initialize_known_symbols(&self) {
        let mut tables = self.tables.lock().unwrap();
        for symbol in super::KNOWN_SYMBOLS {
            let idx = tables.reverse.len() as u32;
            debug_assert!(
                idx < RESERVED_SYMBOLS_END,
                "more known symbols than RESERVED_SYMBOLS_END reserves"
            );
            let interned: &'static str = Box::leak((*symbol).to_string().into_boxed_str());
            tables.reverse.push(interned);
            tables.forward.insert(interned.into(), idx);
        }
    }

    /// Intern a string, returning its symbol. Interning the same string
    /// twice returns the same `Symbol`.
    pub fn intern(&self, string: &str) -> Symbol {
        let mut tables = self.tables.lock().unwrap();
        if let Some(&idx) = tables.forward.get(string) {
            tables.hits += 1;
            return Symbol { index: idx };
        }
        tables.misses += 1;
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = tables.reverse.len() as u32;
        tables.reverse.push(interned);
        tables.forward.insert(interned.into(), idx);
        Symbol { index: idx }
    }

    /// Resolve a symbol back to its string.
    ///
    /// Returns `None` only for a `Symbol` built with an out-of-bounds index
    /// that was never produced by [`StringTable::intern`].
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        let tables = self.tables.lock().unwrap();
        tables.reverse.get(symbol.index as usize).copied()
    }

    /// Snapshot interner statistics, useful in tests and `--verbose` output.
    pub fn stats(&self) -> InternerStats {
        let tables = self.tables.lock().unwrap();
        InternerStats {
            count: tables.reverse.len(),
            capacity: tables.forward.capacity(),
            collisions: 0,
            hits: tables.hits,
            misses: tables.misses,
        }
    }

    #[cfg(test)]
    pub(crate) fn reset_stats(&self) {
        let mut tables = self.tables.lock().unwrap();
        tables.hits = 0;
        tables.misses = 0;
    }
}
