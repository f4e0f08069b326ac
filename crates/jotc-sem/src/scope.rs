//! Lexically scoped symbol table (spec §3.5): name → opaque bound value,
//! scopes parent-chained exactly like the teacher's `ScopeTree`/`Rib`, but
//! genericized over the bound value instead of a fixed `DefId` — the type
//! checker binds `Rc<Type>`, and Jot has no separate definition-id space.

use std::collections::HashMap;

use jotc_util::{Idx, IndexVec, Symbol};

/// Scope ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        ScopeId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Rib<V> {
    bindings: HashMap<Symbol, V>,
    parent: Option<ScopeId>,
}

/// A lexically nested symbol table, bound over `V` (spec §3.5).
///
/// `define`/`lookup`/`update` operate on `current`; `enter`/`exit` push and
/// pop scopes. Popped scopes stay in the arena (never actually freed) so
/// that `ScopeId`s handed out earlier remain valid — only `current` moves.
pub struct Scope<V> {
    ribs: IndexVec<ScopeId, Rib<V>>,
    current: ScopeId,
}

impl<V> Scope<V> {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib { bindings: HashMap::new(), parent: None });
        Self { ribs, current: root }
    }

    pub fn current_id(&self) -> ScopeId {
        self.current
    }

    /// Opens a new scope chained to the current one and makes it current.
    pub fn enter(&mut self) -> ScopeId {
        let id = self.ribs.push(Rib { bindings: HashMap::new(), parent: Some(self.current) });
        self.current = id;
        id
    }

    /// Returns to the parent of the current scope. A no-op at the root.
    pub fn exit(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Binds `name` to `value` in the current scope. Fails without
    /// overwriting if `name` is already bound in this same scope (spec
    /// §3.5: "fails without overwrite if the name exists in the current
    /// scope") — shadowing a parent binding is fine, redefining within one
    /// scope is not.
    pub fn define(&mut self, name: Symbol, value: V) -> bool {
        let rib = &mut self.ribs[self.current];
        if rib.bindings.contains_key(&name) {
            return false;
        }
        rib.bindings.insert(name, value);
        true
    }

    /// Walks from the current scope up through parents, returning the
    /// nearest binding.
    pub fn lookup(&self, name: Symbol) -> Option<&V> {
        let mut id = self.current;
        loop {
            let rib = &self.ribs[id];
            if let Some(value) = rib.bindings.get(&name) {
                return Some(value);
            }
            id = rib.parent?;
        }
    }

    /// Mutates the nearest binding for `name`, walking from the current
    /// scope up through parents. Returns `false` if `name` is unbound
    /// anywhere in the chain.
    pub fn update(&mut self, name: Symbol, value: V) -> bool {
        let mut id = self.current;
        loop {
            if self.ribs[id].bindings.contains_key(&name) {
                self.ribs[id].bindings.insert(name, value);
                return true;
            }
            match self.ribs[id].parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// True if `name` is bound in the current scope specifically (not a
    /// parent) — used for same-scope redefinition checks.
    pub fn is_bound_in_current_scope(&self, name: Symbol) -> bool {
        self.ribs[self.current].bindings.contains_key(&name)
    }
}

impl<V> Default for Scope<V> {
    fn default() -> Self {
        Self::new()
    }
}
