//! Object model of the Go type graph consumed by the translator.
//!
//! This is the upstream boundary: a loader (or a test fixture) resolves Go
//! source into these objects, and the translator only ever reads them. The
//! model carries exactly what translation needs - kind discrimination, the
//! underlying type of a named type, element/key accessors, method signatures
//! rendered as strings, package identity, and struct fields with their raw
//! tags - and nothing else.
//!
//! Types are shared through [`Rc`]; graph cycles (self-referencing structs,
//! mutual recursion) are closed by binding a named type's underlying after
//! its uses have been constructed. The translator keys its memo on object
//! identity via [`type_key`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// A Go package: identity plus the slice of surface syntax the enum
/// extractor walks.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub path: String,
    decls: RefCell<Vec<TypeDecl>>,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            path: path.into(),
            decls: RefCell::new(Vec::new()),
        })
    }

    /// Record a surface `type` declaration from the package's syntax.
    pub fn push_decl(&self, decl: TypeDecl) {
        self.decls.borrow_mut().push(decl);
    }

    pub fn decls(&self) -> Ref<'_, Vec<TypeDecl>> {
        self.decls.borrow()
    }
}

/// A surface `type` declaration: its name, right-hand-side expression text,
/// and leading comment lines (with the `//` markers kept).
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub rhs: String,
    pub doc: Vec<String>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rhs: rhs.into(),
            doc: Vec::new(),
        }
    }

    pub fn with_doc<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doc = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// A method in a named type's method set, with its signature rendered the
/// way Go's type-checker prints it, e.g.
/// `func (pkg.Locale).MarshalText() ([]byte, error)`.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub signature: String,
}

/// One Go type object.
#[derive(Debug)]
pub enum Type {
    Named(Named),
    Basic(Basic),
    Struct(StructType),
    Slice(Slice),
    Array(Array),
    Map(Map),
    Pointer(Pointer),
    Interface(Interface),
}

impl Type {
    pub fn basic(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Type::Basic(Basic { name: name.into() }))
    }

    /// A defined (named) type. The underlying type is bound separately so
    /// cyclic graphs can be closed after construction.
    pub fn named(name: impl Into<String>, pkg: Option<&Rc<Package>>) -> Rc<Self> {
        Rc::new(Type::Named(Named {
            name: name.into(),
            pkg: pkg.cloned(),
            underlying: RefCell::new(None),
            methods: RefCell::new(Vec::new()),
            alias: false,
        }))
    }

    /// A type alias (`type A = B`).
    pub fn alias(name: impl Into<String>, pkg: Option<&Rc<Package>>) -> Rc<Self> {
        Rc::new(Type::Named(Named {
            name: name.into(),
            pkg: pkg.cloned(),
            underlying: RefCell::new(None),
            methods: RefCell::new(Vec::new()),
            alias: true,
        }))
    }

    pub fn struct_of(fields: Vec<Field>) -> Rc<Self> {
        Rc::new(Type::Struct(StructType { fields }))
    }

    pub fn slice(elem: &Rc<Type>) -> Rc<Self> {
        Rc::new(Type::Slice(Slice { elem: elem.clone() }))
    }

    pub fn array(elem: &Rc<Type>, len: u64) -> Rc<Self> {
        Rc::new(Type::Array(Array {
            elem: elem.clone(),
            len,
        }))
    }

    pub fn map(key: &Rc<Type>, value: &Rc<Type>) -> Rc<Self> {
        Rc::new(Type::Map(Map {
            key: key.clone(),
            value: value.clone(),
        }))
    }

    pub fn pointer(elem: &Rc<Type>) -> Rc<Self> {
        Rc::new(Type::Pointer(Pointer { elem: elem.clone() }))
    }

    pub fn interface() -> Rc<Self> {
        Rc::new(Type::Interface(Interface {}))
    }

    pub fn as_named(&self) -> Option<&Named> {
        match self {
            Type::Named(named) => Some(named),
            _ => None,
        }
    }

    pub fn as_basic(&self) -> Option<&Basic> {
        match self {
            Type::Basic(basic) => Some(basic),
            _ => None,
        }
    }

    /// Short kind tag for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Named(_) => "named",
            Type::Basic(_) => "basic",
            Type::Struct(_) => "struct",
            Type::Slice(_) => "slice",
            Type::Array(_) => "array",
            Type::Map(_) => "map",
            Type::Pointer(_) => "pointer",
            Type::Interface(_) => "interface",
        }
    }

    /// The fully qualified Go expression for this type, e.g.
    /// `[]*github.com/acme/proto.User`.
    pub fn qualified(&self) -> String {
        match self {
            Type::Named(named) => match &named.pkg {
                Some(pkg) => format!("{}.{}", pkg.path, named.name),
                None => named.name.clone(),
            },
            Type::Basic(basic) => basic.name.clone(),
            Type::Struct(_) => "struct{...}".to_string(),
            Type::Slice(slice) => format!("[]{}", slice.elem.qualified()),
            Type::Array(array) => format!("[{}]{}", array.len, array.elem.qualified()),
            Type::Map(map) => format!("map[{}]{}", map.key.qualified(), map.value.qualified()),
            Type::Pointer(ptr) => format!("*{}", ptr.elem.qualified()),
            Type::Interface(_) => "interface{}".to_string(),
        }
    }
}

/// Memo key: object identity of a type in the graph.
pub fn type_key(ty: &Rc<Type>) -> usize {
    Rc::as_ptr(ty) as usize
}

/// The underlying type: what a named type was defined as, or the type
/// itself for everything else (Go semantics).
pub fn underlying(ty: &Rc<Type>) -> Rc<Type> {
    match &**ty {
        Type::Named(named) => named.underlying(),
        _ => ty.clone(),
    }
}

/// A defined type: name, defining package, late-bound underlying type, and
/// method set (including methods reachable via pointer receiver).
#[derive(Debug)]
pub struct Named {
    name: String,
    pkg: Option<Rc<Package>>,
    underlying: RefCell<Option<Rc<Type>>>,
    methods: RefCell<Vec<Method>>,
    alias: bool,
}

impl Named {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pkg(&self) -> Option<&Rc<Package>> {
        self.pkg.as_ref()
    }

    pub fn is_alias(&self) -> bool {
        self.alias
    }

    /// Bind the underlying type. Done after construction so that the
    /// underlying may (transitively) reference this named type.
    pub fn set_underlying(&self, underlying: &Rc<Type>) {
        *self.underlying.borrow_mut() = Some(underlying.clone());
    }

    pub fn underlying(&self) -> Rc<Type> {
        self.underlying
            .borrow()
            .clone()
            .expect("named type has no underlying; bind it during graph construction")
    }

    pub fn add_method(&self, name: impl Into<String>, signature: impl Into<String>) {
        self.methods.borrow_mut().push(Method {
            name: name.into(),
            signature: signature.into(),
        });
    }

    /// Look up a method in the type's method set.
    pub fn method(&self, name: &str) -> Option<Method> {
        self.methods
            .borrow()
            .iter()
            .find(|m| m.name == name)
            .cloned()
    }
}

/// A predeclared basic type, identified by its Go name (`int64`, `string`).
#[derive(Debug)]
pub struct Basic {
    name: String,
}

impl Basic {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A struct type with its fields in declaration order.
#[derive(Debug)]
pub struct StructType {
    fields: Vec<Field>,
}

impl StructType {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// One struct field with its raw tag.
#[derive(Debug)]
pub struct Field {
    name: String,
    ty: Rc<Type>,
    tag: String,
    embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: &Rc<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.clone(),
            tag: String::new(),
            embedded: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Rc<Type> {
        &self.ty
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Exported-ness, the way Go derives it: the name starts uppercase.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

#[derive(Debug)]
pub struct Slice {
    elem: Rc<Type>,
}

impl Slice {
    pub fn elem(&self) -> &Rc<Type> {
        &self.elem
    }
}

#[derive(Debug)]
pub struct Array {
    elem: Rc<Type>,
    len: u64,
}

impl Array {
    pub fn elem(&self) -> &Rc<Type> {
        &self.elem
    }
}

#[derive(Debug)]
pub struct Map {
    key: Rc<Type>,
    value: Rc<Type>,
}

impl Map {
    pub fn key(&self) -> &Rc<Type> {
        &self.key
    }

    pub fn value(&self) -> &Rc<Type> {
        &self.value
    }
}

#[derive(Debug)]
pub struct Pointer {
    elem: Rc<Type>,
}

impl Pointer {
    pub fn elem(&self) -> &Rc<Type> {
        &self.elem
    }
}

/// An interface type. Method sets are irrelevant to translation; every
/// interface encodes as `any`.
#[derive(Debug)]
pub struct Interface {}
