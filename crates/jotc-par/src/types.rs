//! Jot's type system — the closed `Type` variant family (spec §3.2/§4.3).
//!
//! The front end is single-threaded (spec §5), so shared types use `Rc`
//! rather than `Arc`: no atomics are needed to hand the same `Rc<Type>` to
//! a struct's fields, a function's parameters, and every expression typed
//! with it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use jotc_util::Symbol;

/// A primitive numeric kind: the leaves of every arithmetic type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int1,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl NumberKind {
    /// True for every kind except the two floating-point kinds.
    pub fn is_integer(self) -> bool {
        !matches!(self, NumberKind::Float32 | NumberKind::Float64)
    }

    pub fn is_floating_point(self) -> bool {
        !self.is_integer()
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            NumberKind::UInt8 | NumberKind::UInt16 | NumberKind::UInt32 | NumberKind::UInt64
        )
    }

    /// Width in bits, used for the numeric-limit diagnostic (§7).
    pub fn bit_width(self) -> u32 {
        match self {
            NumberKind::Int1 => 1,
            NumberKind::Int8 | NumberKind::UInt8 => 8,
            NumberKind::Int16 | NumberKind::UInt16 => 16,
            NumberKind::Int32 | NumberKind::UInt32 | NumberKind::Float32 => 32,
            NumberKind::Int64 | NumberKind::UInt64 | NumberKind::Float64 => 64,
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            NumberKind::Int1 => "int1",
            NumberKind::Int8 => "int8",
            NumberKind::Int16 => "int16",
            NumberKind::Int32 => "int32",
            NumberKind::Int64 => "int64",
            NumberKind::UInt8 => "uint8",
            NumberKind::UInt16 => "uint16",
            NumberKind::UInt32 => "uint32",
            NumberKind::UInt64 => "uint64",
            NumberKind::Float32 => "float32",
            NumberKind::Float64 => "float64",
        };
        f.write_str(spelling)
    }
}

/// A declared `struct` type: ordered fields plus a name-to-index map for
/// `Dot` resolution (spec §3.2/§4.5 "Dot").
#[derive(Clone, Debug)]
pub struct StructType {
    pub name: Symbol,
    pub fields: Vec<(Symbol, Rc<Type>)>,
    pub field_index: HashMap<Symbol, usize>,
    pub is_packed: bool,
    pub is_generic: bool,
    pub generic_params: Vec<Symbol>,
}

impl StructType {
    pub fn new(name: Symbol, is_packed: bool, generic_params: Vec<Symbol>) -> Self {
        Self {
            name,
            fields: Vec::new(),
            field_index: HashMap::new(),
            is_packed,
            is_generic: !generic_params.is_empty(),
            generic_params,
        }
    }

    /// Appends a field, recording its position in `field_index`.
    ///
    /// # Panics
    /// Panics on a duplicate field name; the parser rejects duplicates
    /// before this would ever fire (spec §4.4 "Struct declarations").
    pub fn push_field(&mut self, name: Symbol, ty: Rc<Type>) {
        let index = self.fields.len();
        assert!(self.field_index.insert(name, index).is_none(), "duplicate field `{name}`");
        self.fields.push((name, ty));
    }

    pub fn field_type(&self, name: Symbol) -> Option<&Rc<Type>> {
        self.field_index.get(&name).map(|&i| &self.fields[i].1)
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        // Jot structs are nominal (§3.2): a duplicate struct/enum name is
        // already rejected at declaration time (`Context::define_struct`),
        // so two `StructType`s sharing a name are always the same
        // declaration. Keying on the name (like `EnumType::eq` just below)
        // rather than the printed field list keeps this comparison correct
        // for self-referencing structs, whose field list can legitimately
        // differ between two `Rc<StructType>` handles that still name the
        // same declared struct - see DESIGN.md.
        self.name == other.name
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {} {{ ", self.name)?;
        for (name, ty) in &self.fields {
            write!(f, "{name}: {ty}; ")?;
        }
        write!(f, "}}")
    }
}

/// A declared `enum` type: ordered name-to-value mapping plus the
/// underlying integer representation (spec §3.2).
#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: Symbol,
    pub values: IndexMap<Symbol, i64>,
    pub underlying: NumberKind,
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Jot's closed type family (spec §3.2).
#[derive(Clone, Debug)]
pub enum Type {
    Number(NumberKind),
    Pointer(Rc<Type>),
    Array(Rc<Type>, u64),
    Function {
        params: Vec<Rc<Type>>,
        ret: Rc<Type>,
        has_varargs: bool,
        varargs_element: Option<Rc<Type>>,
    },
    Struct(Rc<StructType>),
    GenericStruct {
        underlying: Rc<StructType>,
        args: Vec<Rc<Type>>,
    },
    GenericParameter(Symbol),
    Enum(Rc<EnumType>),
    EnumElement {
        enum_name: Symbol,
        underlying: NumberKind,
    },
    /// Placeholder for unresolved or self-referential types during parsing
    /// (spec §4.4 "Struct declarations", pointer-to-`Self` patching).
    None,
    Void,
    /// The type of the `null` literal before the checker infers its base
    /// pointer type (spec §4.5 "Null").
    Null,
}

impl Type {
    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Type::Number(_))
    }

    /// The base type of a `Pointer`, or `None` for every other variant.
    pub fn pointee(&self) -> Option<&Rc<Type>> {
        match self {
            Type::Pointer(base) => Some(base),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        use Type::*;
        match (self, other) {
            (Number(a), Number(b)) => a == b,
            (Pointer(a), Pointer(b)) => a == b,
            (Array(a, sa), Array(b, sb)) => sa == sb && a == b,
            (
                Function { params: pa, ret: ra, .. },
                Function { params: pb, ret: rb, .. },
            ) => pa.len() == pb.len() && pa.iter().zip(pb).all(|(x, y)| x == y) && ra == rb,
            (Struct(a), Struct(b)) => a == b,
            (
                GenericStruct { underlying: ua, args: aa },
                GenericStruct { underlying: ub, args: ab },
            ) => ua == ub && aa.len() == ab.len() && aa.iter().zip(ab).all(|(x, y)| x == y),
            (GenericParameter(a), GenericParameter(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            (EnumElement { enum_name: a, .. }, EnumElement { enum_name: b, .. }) => a == b,
            (None, None) | (Void, Void) | (Null, Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number(kind) => write!(f, "{kind}"),
            Type::Pointer(base) => write!(f, "{base}*"),
            Type::Array(element, size) => write!(f, "{element}[{size}]"),
            Type::Function { params, ret, has_varargs, .. } => {
                write!(f, "fun(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                if *has_varargs {
                    if !params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "varargs")?;
                }
                write!(f, ") {ret}")
            }
            Type::Struct(s) => write!(f, "{s}"),
            Type::GenericStruct { underlying, args } => {
                write!(f, "{}<", underlying.name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ">")
            }
            Type::GenericParameter(name) => write!(f, "{name}"),
            Type::Enum(e) => write!(f, "enum {}", e.name),
            Type::EnumElement { enum_name, .. } => write!(f, "{enum_name}Element"),
            Type::None => write!(f, "<none>"),
            Type::Void => write!(f, "void"),
            Type::Null => write!(f, "null"),
        }
    }
}

/// Is `from` castable to `to` (spec §4.3)?
///
/// Cast-compatibility is a one-way relation distinct from equality: an
/// equal pair is always castable (a permitted no-op), but castable pairs
/// are frequently unequal.
pub fn castable(from: &Type, to: &Type) -> bool {
    use Type::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Void, _) | (_, Void) => false,
        (None, _) | (_, None) => false,
        (Enum(_), _) | (_, Enum(_)) => false,
        (EnumElement { .. }, _) | (_, EnumElement { .. }) => false,
        (Function { .. }, _) | (_, Function { .. }) => false,
        (Number(_), Number(_)) => true,
        (Pointer(a), Pointer(b)) => is_void_pointee(a) || is_void_pointee(b),
        (Array(element, _), Pointer(base)) => element == base,
        _ => false,
    }
}

fn is_void_pointee(ty: &Type) -> bool {
    matches!(ty, Type::Void)
}
