//! Struct flattening.
//!
//! Walks struct fields in declaration order, skips unexported ones, applies
//! `json:"..."` tag overrides, promotes embedded and `,inline` fields, and
//! registers the resulting declaration on the schema. Field collisions from
//! promotion follow Go's JSON marshaler: the last write wins and lands at
//! the tail.

use std::rc::Rc;

use tracing::debug;

use ridl_schema::{Type as IrType, TypeField, VarRef, VarType};

use crate::error::Result;
use crate::go;
use crate::parser::json_tag::{self, JsonTag};
use crate::parser::Parser;

impl Parser {
    /// Flatten a struct host type into a declaration named `name`, register
    /// it, and return a reference to it.
    pub(crate) fn parse_struct(&mut self, name: &str, st: &go::StructType) -> Result<VarRef> {
        let mut fields: Vec<TypeField> = Vec::new();

        for field in st.fields() {
            if !field.is_exported() {
                continue;
            }

            let tag = json_tag::parse(field.tag())
                .map_err(|e| e.in_field(name, field.name()))?
                .unwrap_or_default();
            if tag.ignored() {
                continue;
            }

            if field.is_embedded() || tag.inline {
                let promoted = self
                    .parse(None, field.ty())
                    .map_err(|e| e.in_field(name, field.name()))?;
                // Splice the referenced struct's fields in; promoted
                // non-struct fields contribute nothing at this level.
                if let Some(decl) = promoted.struct_decl() {
                    for inner in &decl.fields {
                        append_or_override(&mut fields, inner.clone());
                    }
                }
                continue;
            }

            let parsed = self.parse_struct_field(name, field, &tag)?;
            append_or_override(&mut fields, parsed);
        }

        let decl = Rc::new(IrType::struct_type(name, fields));
        self.schema.types.push(decl.clone());
        debug!(name = %name, "registered struct type");

        Ok(VarRef::new(VarType::struct_ref(name, &decl)))
    }

    fn parse_struct_field(
        &mut self,
        struct_name: &str,
        field: &go::Field,
        tag: &JsonTag,
    ) -> Result<TypeField> {
        let go_field_name = field.name();
        let json_name = if tag.name.is_empty() {
            go_field_name
        } else {
            &tag.name
        };

        let mut optional = tag.omitempty;
        let mut go_field_type = self.go_type_name(field.ty());
        if tag.omitempty {
            // Nullability hint for downstream generators, not a change to
            // the type itself.
            go_field_type = format!("*{go_field_type}");
        }
        let go_field_import = self.go_type_import(field.ty());

        if tag.is_string {
            // `json:",string"` forces the wire shape to a string no matter
            // what the field's type says.
            if !is_string_host(field.ty()) {
                optional = true;
            }
            let mut parsed = TypeField::new(json_name)
                .with_type(VarRef::new(VarType::string()))
                .with_optional(optional)
                .with_meta("go.field.name", go_field_name)
                .with_meta("go.field.type", &go_field_type);
            if let Some(import) = &go_field_import {
                parsed = parsed.with_meta("go.type.import", import);
            }
            return Ok(parsed.with_meta("go.tag.json", &tag.value));
        }

        let underlying = go::underlying(field.ty());
        if matches!(&*underlying, go::Type::Pointer(_)) {
            optional = true;
        }

        // Anonymous struct literals need a stable synthesized name:
        //   type Something struct {
        //       Address struct { City string }
        //   }
        // declares SomethingAnonymousAddress.
        let parent = if matches!(&*underlying, go::Type::Struct(_)) {
            format!("{struct_name}Anonymous{go_field_name}")
        } else {
            struct_name.to_string()
        };

        let var = self
            .parse(Some(&parent), field.ty())
            .map_err(|e| e.in_field(struct_name, go_field_name))?;

        let mut parsed = TypeField::new(json_name)
            .with_type(var)
            .with_optional(optional)
            .with_meta("go.field.name", go_field_name)
            .with_meta("go.field.type", &go_field_type);
        if let Some(import) = &go_field_import {
            parsed = parsed.with_meta("go.type.import", import);
        }
        if !tag.value.is_empty() {
            parsed = parsed.with_meta("go.tag.json", &tag.value);
        }
        Ok(parsed)
    }
}

/// Append `new` to `fields`, removing any earlier field of the same name.
/// This is how Go's JSON marshaler shadows embedded fields behind the
/// scenes: the overriding field wins and appears at the tail.
fn append_or_override(fields: &mut Vec<TypeField>, new: TypeField) {
    fields.retain(|f| f.name != new.name);
    fields.push(new);
}

fn is_string_host(ty: &Rc<go::Type>) -> bool {
    let underlying = go::underlying(ty);
    underlying.as_basic().is_some_and(|b| b.name() == "string")
}
