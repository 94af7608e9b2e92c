//! The schema document: declared types, services, and methods.
//!
//! A [`Schema`] is assembled across one parse and then handed to downstream
//! generators, which rely on the type list being ordered and free of
//! duplicate names.

use std::rc::Rc;

use serde::{Serialize, Serializer};

use crate::types::VarRef;

/// Kind of a declared compound type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Struct,
    Enum,
}

/// A declared compound type: a struct with fields, or an enum with variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Type {
    pub kind: TypeKind,
    pub name: String,
    /// Struct fields, or enum variants.
    pub fields: Vec<TypeField>,
    /// Enum storage kind; absent for structs.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub elem: Option<VarRef>,
}

impl Type {
    /// A struct declaration with the given fields.
    pub fn struct_type(name: impl Into<String>, fields: Vec<TypeField>) -> Self {
        Self {
            kind: TypeKind::Struct,
            name: name.into(),
            fields,
            elem: None,
        }
    }

    /// An enum declaration with the given storage descriptor and variants.
    pub fn enum_type(name: impl Into<String>, elem: VarRef, fields: Vec<TypeField>) -> Self {
        Self {
            kind: TypeKind::Enum,
            name: name.into(),
            fields,
            elem: Some(elem),
        }
    }
}

/// A named member of a declaration: a struct field or an enum variant.
///
/// Struct fields carry a type descriptor; enum variants carry a literal
/// value string instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeField {
    /// The serialization key (struct) or variant name (enum).
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub typ: Option<VarRef>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<MetaEntry>,
}

impl TypeField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: None,
            optional: false,
            value: None,
            meta: Vec::new(),
        }
    }

    pub fn with_type(mut self, typ: VarRef) -> Self {
        self.typ = Some(typ);
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append a meta pair. Generators consume these verbatim, in order.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.push(MetaEntry {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// One key/value meta pair, serialized as a single-entry object.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
}

impl Serialize for MetaEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// A service contract: a named interface with methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }
}

/// A single method with its request and response arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub inputs: Vec<MethodArgument>,
    pub outputs: Vec<MethodArgument>,
}

/// One named method argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: VarRef,
    pub optional: bool,
}

/// The schema document assembled by one parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub schema_name: String,
    pub schema_version: String,
    pub services: Vec<Service>,
    /// Declared types, in the order the translator completed them.
    pub types: Vec<Rc<Type>>,
}

impl Schema {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            schema_name: name.into(),
            schema_version: version.into(),
            services: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Look up a declared type by canonical name.
    pub fn get_type(&self, name: &str) -> Option<&Rc<Type>> {
        self.types.iter().find(|t| t.name == name)
    }

    /// The service with the given name, created on first use.
    pub fn service_mut(&mut self, name: &str) -> &mut Service {
        let idx = match self.services.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.services.push(Service::new(name));
                self.services.len() - 1
            }
        };
        &mut self.services[idx]
    }

    /// Emit the schema document as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
