//! Per-reference type descriptors.
//!
//! A [`VarType`] describes one use of a type: a method argument, a struct
//! field, a list element. Compound declarations (structs, enums) get a
//! [`crate::schema::Type`] record of their own; a `VarType` only ever points
//! at those through a [`TypeRef`].

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Serialize, Serializer};

use crate::schema::Type;

/// Canonical basic (primitive) kinds.
///
/// These mirror Go's predeclared numeric and boolean types; `string` is not
/// here because it surfaces as [`VarKind::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Bool,
    Byte,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl BasicKind {
    /// Look up a basic kind by its Go type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => BasicKind::Bool,
            "byte" => BasicKind::Byte,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            _ => return None,
        })
    }

    /// The canonical IR expression for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Byte => "byte",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning reference to a declared [`Type`].
///
/// Ownership of every declaration lives in `Schema.types`; keeping this
/// handle weak is what lets self-referential structs drop cleanly.
#[derive(Clone)]
pub struct TypeRef {
    /// Canonical name of the referenced declaration.
    pub name: String,
    decl: Weak<Type>,
}

impl TypeRef {
    /// Create a reference to a registered declaration.
    pub fn new(name: impl Into<String>, decl: &Rc<Type>) -> Self {
        Self {
            name: name.into(),
            decl: Rc::downgrade(decl),
        }
    }

    /// The referenced declaration, if the schema still owns it.
    pub fn decl(&self) -> Option<Rc<Type>> {
        self.decl.upgrade()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name)
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// List payload: the element descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    pub elem: VarRef,
}

/// Map payload: the reduced key kind plus the value descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: MapKey,
    pub value: VarRef,
}

/// What a map key reduced to.
///
/// String-like kinds (string, timestamp, enum) all collapse to `String`;
/// anything that is neither basic nor string-like is rejected by the
/// translator before a `MapType` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKey {
    Basic(BasicKind),
    String,
}

/// The closed IR alphabet.
#[derive(Debug, Clone, PartialEq)]
pub enum VarKind {
    /// Claimed but not yet produced. Only observable while a translation is
    /// in flight; a finished schema never contains one.
    Unresolved,
    Basic(BasicKind),
    String,
    Timestamp,
    List(ListType),
    Map(MapType),
    Any,
    /// Reference to a declared struct.
    Struct(TypeRef),
    /// Reference to a declared enum. The JSON surface of an enum value is a
    /// string; the declaration's `elem` keeps the storage primitive.
    Enum(TypeRef),
}

/// One type reference: a canonical expression string plus its kind.
///
/// The expression is what `Display`, equality, and serialization go through,
/// so two descriptors are equal exactly when they print the same.
#[derive(Debug, Clone)]
pub struct VarType {
    pub expr: String,
    pub kind: VarKind,
}

impl VarType {
    pub fn new(expr: impl Into<String>, kind: VarKind) -> Self {
        Self {
            expr: expr.into(),
            kind,
        }
    }

    pub fn basic(kind: BasicKind) -> Self {
        Self::new(kind.as_str(), VarKind::Basic(kind))
    }

    pub fn string() -> Self {
        Self::new("string", VarKind::String)
    }

    pub fn timestamp() -> Self {
        Self::new("timestamp", VarKind::Timestamp)
    }

    pub fn any() -> Self {
        Self::new("any", VarKind::Any)
    }

    /// A list of `elem`, with the expression derived from the element's.
    pub fn list(elem: VarRef) -> Self {
        Self::new(
            format!("[]{}", elem.expr()),
            VarKind::List(ListType { elem }),
        )
    }

    /// A map whose key already reduced to `key`. The expression records the
    /// key as it was written (`map<Status,User>`), not its reduction.
    pub fn map(key_expr: &str, key: MapKey, value: VarRef) -> Self {
        Self::new(
            format!("map<{},{}>", key_expr, value.expr()),
            VarKind::Map(MapType { key, value }),
        )
    }

    pub fn struct_ref(name: impl Into<String>, decl: &Rc<Type>) -> Self {
        let name = name.into();
        let type_ref = TypeRef::new(&name, decl);
        Self::new(name, VarKind::Struct(type_ref))
    }

    pub fn enum_ref(name: impl Into<String>, decl: &Rc<Type>) -> Self {
        let name = name.into();
        let type_ref = TypeRef::new(&name, decl);
        Self::new(name, VarKind::Enum(type_ref))
    }

    /// Map a Go basic type name to its IR descriptor. `string` surfaces as
    /// [`VarKind::String`]; unknown names are the caller's error to raise.
    pub fn from_basic_name(name: &str) -> Option<Self> {
        if name == "string" {
            return Some(Self::string());
        }
        BasicKind::from_name(name).map(Self::basic)
    }
}

impl PartialEq for VarType {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Shared, pointer-stable handle to a [`VarType`].
///
/// The translator hands the same handle to every reference of a host type
/// within one parse; on cyclic graphs the contents are filled in after the
/// handle has already been embedded elsewhere.
#[derive(Clone)]
pub struct VarRef(Rc<RefCell<VarType>>);

impl VarRef {
    pub fn new(var: VarType) -> Self {
        Self(Rc::new(RefCell::new(var)))
    }

    /// A claimed-but-empty descriptor carrying only a provisional expression.
    pub fn unresolved(expr: impl Into<String>) -> Self {
        Self::new(VarType::new(expr, VarKind::Unresolved))
    }

    pub fn borrow(&self) -> Ref<'_, VarType> {
        self.0.borrow()
    }

    pub fn expr(&self) -> String {
        self.0.borrow().expr.clone()
    }

    /// Whether the contents have been produced yet.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.0.borrow().kind, VarKind::Unresolved)
    }

    /// Overwrite the contents in place. Every holder of this handle sees the
    /// new value.
    pub fn fill(&self, var: VarType) {
        *self.0.borrow_mut() = var;
    }

    /// Copy another descriptor's contents into this handle. The two handles
    /// must be distinct.
    pub fn fill_from(&self, other: &VarRef) {
        let var = other.0.borrow().clone();
        *self.0.borrow_mut() = var;
    }

    pub fn ptr_eq(a: &VarRef, b: &VarRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// The referenced struct declaration, when this descriptor is a
    /// [`VarKind::Struct`] whose declaration is still owned by the schema.
    pub fn struct_decl(&self) -> Option<Rc<Type>> {
        match &self.0.borrow().kind {
            VarKind::Struct(type_ref) => type_ref.decl(),
            _ => None,
        }
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.borrow().expr)
    }
}

// Shallow on purpose: a derived Debug would chase reference cycles.
impl fmt::Debug for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarRef({})", self.0.borrow().expr)
    }
}

impl PartialEq for VarRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.borrow().expr == other.0.borrow().expr
    }
}

impl Serialize for VarRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.borrow().expr)
    }
}
