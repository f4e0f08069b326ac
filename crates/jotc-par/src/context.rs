//! Process-wide compilation state (spec §3.6) plus the source-path
//! registry that backs import/load expansion (spec §4.1).

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use jotc_util::span::{FileId, SourceMap};
use jotc_util::{Handler, Symbol};

use crate::ast::Fixity;
use crate::types::{EnumType, StructType, Type};

/// CLI-derived options that affect compilation behavior (spec §6.1).
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    pub warnings: bool,
    pub warnings_as_errors: bool,
}

/// Registers source paths and hands back monotonically increasing ids,
/// wrapping [`SourceMap`] (spec §4.1: "Paths compared by raw-string
/// equality", "emits no diagnostics").
#[derive(Default)]
pub struct SourceManager {
    map: SourceMap,
    paths: HashMap<String, FileId>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` with `content`, idempotently: a path already
    /// registered returns its existing id without adding a duplicate entry.
    pub fn register(&mut self, path: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let path = path.into();
        if let Some(&id) = self.paths.get(&path) {
            return id;
        }
        let id = self.map.add_file(path.clone(), content);
        self.paths.insert(path, id);
        id
    }

    pub fn is_registered(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn path_of(&self, id: FileId) -> Option<String> {
        self.map.get(id).map(|file| file.name().to_string())
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.map
    }
}

/// Process-wide per-compilation state (spec §3.6): created once at the
/// start of compilation and lives for its entire duration.
pub struct Context {
    pub options: CompileOptions,
    pub handler: Handler,
    pub sources: SourceManager,
    pub structures: HashMap<Symbol, Rc<StructType>>,
    pub enumerations: HashMap<Symbol, Rc<EnumType>>,
    pub functions: HashMap<Symbol, Fixity>,
    pub type_aliases: HashMap<Symbol, Rc<Type>>,
}

impl Context {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            handler: Handler::new(),
            sources: SourceManager::new(),
            structures: HashMap::new(),
            enumerations: HashMap::new(),
            functions: HashMap::new(),
            type_aliases: HashMap::new(),
        }
    }

    /// Registers a struct type. Returns `false` (without overwriting) if
    /// the name is already taken by a struct or enum (spec §4.4: "Duplicate
    /// struct names ... are fatal").
    pub fn define_struct(&mut self, ty: Rc<StructType>) -> bool {
        if self.structures.contains_key(&ty.name) || self.enumerations.contains_key(&ty.name) {
            return false;
        }
        self.structures.insert(ty.name, ty);
        true
    }

    pub fn define_enum(&mut self, ty: Rc<EnumType>) -> bool {
        if self.structures.contains_key(&ty.name) || self.enumerations.contains_key(&ty.name) {
            return false;
        }
        self.enumerations.insert(ty.name, ty);
        true
    }

    pub fn define_function(&mut self, name: Symbol, fixity: Fixity) {
        self.functions.insert(name, fixity);
    }

    pub fn lookup_function_fixity(&self, name: Symbol) -> Option<Fixity> {
        self.functions.get(&name).copied()
    }

    /// Resolves an identifier naming a struct, enum, or type alias to its
    /// `Type` (spec §4.3's "Primitive/alias table"; primitive spellings
    /// themselves are resolved by the lexer's keyword mapping, not here).
    pub fn resolve_type_name(&self, name: Symbol) -> Option<Rc<Type>> {
        if let Some(s) = self.structures.get(&name) {
            return Some(Rc::new(Type::Struct(s.clone())));
        }
        if let Some(e) = self.enumerations.get(&name) {
            return Some(Rc::new(Type::Enum(e.clone())));
        }
        self.type_aliases.get(&name).cloned()
    }

    pub fn is_struct(&self, name: Symbol) -> bool {
        self.structures.contains_key(&name)
    }

    pub fn is_enum(&self, name: Symbol) -> bool {
        self.enumerations.contains_key(&name)
    }
}
