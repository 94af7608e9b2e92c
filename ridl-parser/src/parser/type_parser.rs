//! The recursive, memoized walker over the host type graph.
//!
//! Every translation funnels through [`Parser::parse`], which claims a cache
//! slot before dispatching on the host kind. The claim is what terminates
//! cycles: a recursive call that reaches an already-claimed type gets the
//! claimed handle back immediately and the contents arrive once the outer
//! call completes.

use std::rc::Rc;

use tracing::trace;

use ridl_schema::{MapKey, VarKind, VarRef, VarType};

use crate::error::{ParseError, Result};
use crate::go;
use crate::parser::{enum_parser, marshaler, Parser};

impl Parser {
    /// Translate a host type. `parent` is an optional name used for
    /// anonymous-struct synthesis and provisional cache expressions; it
    /// never overrides the name of a defined type.
    pub(crate) fn parse(&mut self, parent: Option<&str>, ty: &Rc<go::Type>) -> Result<VarRef> {
        let key = go::type_key(ty);
        if let Some(parsed) = self.parsed_types.get(&key) {
            trace!(expr = %parsed.expr(), "parsed-type cache hit");
            return Ok(parsed.clone());
        }

        // Claim the cache slot up front. Recursive calls that reach this
        // type again (self-referencing structs, linked lists, graphs,
        // circular dependencies) return this same handle early; the actual
        // contents land below.
        let claimed = VarRef::unresolved(parent.unwrap_or_default());
        self.parsed_types.insert(key, claimed.clone());

        let result = self.dispatch(parent, ty)?;

        if VarRef::ptr_eq(&result, &claimed) {
            return Ok(claimed);
        }
        if result.is_resolved() {
            // Fill the claimed handle so every observer of the claim sees
            // the final value, and keep handing it out for this type.
            claimed.fill_from(&result);
            Ok(claimed)
        } else {
            // The dispatch passed through to a record that is still being
            // built further up the stack (a cycle through a pointer or
            // named wrapper). Alias this type to it; both resolve together
            // when the cycle's root completes.
            self.parsed_types.insert(key, result.clone());
            Ok(result)
        }
    }

    fn dispatch(&mut self, parent: Option<&str>, ty: &Rc<go::Type>) -> Result<VarRef> {
        match &**ty {
            go::Type::Named(named) => self.parse_named(parent, named, ty),
            go::Type::Basic(basic) => self.parse_basic(basic),
            go::Type::Struct(st) => self.parse_struct(parent.unwrap_or_default(), st),
            go::Type::Slice(slice) => self.parse_slice(parent, slice),
            go::Type::Interface(_) => Ok(VarRef::new(VarType::any())),
            go::Type::Map(map) => self.parse_map(parent, map),
            go::Type::Pointer(ptr) => {
                let parent_name = match parent {
                    Some(name) => name.to_string(),
                    None => self.go_type_name(ty),
                };
                self.parse(Some(&parent_name), ptr.elem())
            }
            go::Type::Array(_) => Err(ParseError::unsupported(ty.qualified(), ty.kind_name())),
        }
    }

    fn parse_named(
        &mut self,
        _parent: Option<&str>,
        named: &go::Named,
        ty: &Rc<go::Type>,
    ) -> Result<VarRef> {
        let type_name = self.go_type_name(ty);

        // Aliases are transparent: walk what they stand for.
        if named.is_alias() {
            return self.parse(Some(&type_name), &named.underlying());
        }

        if let Some(pkg) = named.pkg() {
            if pkg.path == "time" && named.name() == "Time" {
                return Ok(VarRef::new(VarType::timestamp()));
            }
        }

        if let Some(decl) = self.parsed_enums.get(&ty.qualified()).cloned() {
            return Ok(VarRef::new(VarType::enum_ref(&decl.name, &decl)));
        }
        if enum_parser::is_enum_sentinel(named) {
            return self.parse_enum(named, ty);
        }

        // A TextMarshaler pair means the wire shape is a string, whatever
        // the underlying type says.
        if marshaler::is_text_marshaler(named) {
            return Ok(VarRef::new(VarType::string()));
        }

        let underlying = named.underlying();
        match &*underlying {
            go::Type::Pointer(ptr) => {
                // Named pointer (`type NamedPtr *Obj`): walk the element
                // under the underlying's name.
                let name = self.go_type_name(&underlying);
                self.parse(Some(&name), ptr.elem())
            }
            go::Type::Slice(slice) => {
                let elem = go::underlying(slice.elem());
                self.parse_named_sequence(named, &underlying, elem)
            }
            go::Type::Array(array) => {
                let elem = go::underlying(array.elem());
                self.parse_named_sequence(named, &underlying, elem)
            }
            _ => {
                if marshaler::is_json_marshaler(named) {
                    return Ok(VarRef::new(VarType::any()));
                }
                self.parse(Some(&type_name), &underlying)
            }
        }
    }

    /// Named slice or array (`type NamedSlice []Obj`).
    fn parse_named_sequence(
        &mut self,
        named: &go::Named,
        underlying: &Rc<go::Type>,
        elem: Rc<go::Type>,
    ) -> Result<VarRef> {
        // A json.Marshaler pair makes the element shape opaque: []any.
        if marshaler::is_json_marshaler(named) {
            return Ok(VarRef::new(VarType::list(VarRef::new(VarType::any()))));
        }

        // A basic element type gets encoded directly.
        if let Some(basic) = elem.as_basic() {
            let elem_var = self.parse_basic(basic)?;
            return Ok(VarRef::new(VarType::list(elem_var)));
        }

        // Otherwise walk the underlying sequence, attributing the
        // containing name as parent.
        let name = self.go_type_name(underlying);
        self.parse(Some(&name), underlying)
    }

    pub(super) fn parse_basic(&self, basic: &go::Basic) -> Result<VarRef> {
        VarType::from_basic_name(basic.name())
            .map(VarRef::new)
            .ok_or_else(|| ParseError::unsupported(basic.name(), "basic"))
    }

    fn parse_slice(&mut self, parent: Option<&str>, slice: &go::Slice) -> Result<VarRef> {
        let elem = self.parse(parent, slice.elem())?;
        Ok(VarRef::new(VarType::list(elem)))
    }

    fn parse_map(&mut self, parent: Option<&str>, map: &go::Map) -> Result<VarRef> {
        let key = self.parse(parent, map.key())?;
        let value = self.parse(parent, map.value())?;

        let key_kind = {
            let borrowed = key.borrow();
            match &borrowed.kind {
                VarKind::Basic(kind) => MapKey::Basic(*kind),
                // String-like kinds all key as strings on the wire.
                VarKind::String | VarKind::Timestamp | VarKind::Enum(_) => MapKey::String,
                _ => {
                    return Err(ParseError::InvalidMapKey {
                        key: borrowed.expr.clone(),
                    })
                }
            }
        };

        let key_expr = key.expr();
        Ok(VarRef::new(VarType::map(&key_expr, key_kind, value)))
    }
}
