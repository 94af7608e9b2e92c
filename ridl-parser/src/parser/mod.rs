//! The type translator.
//!
//! [`Parser`] owns everything one parse needs: the schema under construction,
//! the root package (whose path anchors name canonicalization and whose
//! syntax feeds the enum extractor), the identity-keyed cache of translated
//! types, and the registry of extracted enums. All state lives for exactly
//! one parse; translation is strictly sequential, which is what makes the
//! cache-claim protocol in [`type_parser`] terminate cycles.

mod enum_parser;
mod json_tag;
mod marshaler;
mod naming;
mod struct_parser;
mod type_parser;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use ridl_schema::{Method, MethodArgument, Schema, Type as IrType, VarRef};

use crate::error::Result;
use crate::go;

pub use json_tag::JsonTag;

/// Translates host types from one Go package into a [`Schema`].
pub struct Parser {
    pub(crate) schema: Schema,
    pub(crate) pkg: Rc<go::Package>,
    /// Identity-keyed cache of every host type seen this parse. Values are
    /// pointer-stable; cyclic references resolve through them.
    pub(crate) parsed_types: HashMap<usize, VarRef>,
    /// Extracted enums by the sentinel instance's qualified string, so two
    /// distinct host objects that print alike share one declaration.
    pub(crate) parsed_enums: HashMap<String, Rc<IrType>>,
}

impl Parser {
    /// Create a parser rooted at the package whose contracts are being
    /// translated.
    pub fn new(pkg: Rc<go::Package>) -> Self {
        Self {
            schema: Schema::default(),
            pkg,
            parsed_types: HashMap::new(),
            parsed_enums: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Hand the finished schema to downstream generators, dropping all
    /// parse-scoped state.
    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// Translate one host type, appending any newly declared compound types
    /// to the schema.
    pub fn parse_type(&mut self, ty: &Rc<go::Type>) -> Result<VarRef> {
        self.parse(None, ty)
    }

    /// Record one service method from the collector: ordered
    /// `(name, host type)` pairs for request arguments and result values
    /// (minus the context carrier and the trailing error, which the
    /// collector already dropped).
    pub fn parse_method(
        &mut self,
        service: &str,
        method: &str,
        inputs: &[(&str, Rc<go::Type>)],
        outputs: &[(&str, Rc<go::Type>)],
    ) -> Result<()> {
        let inputs = self.parse_arguments(method, "input", inputs)?;
        let outputs = self.parse_arguments(method, "output", outputs)?;

        self.schema.service_mut(service).methods.push(Method {
            name: method.to_string(),
            inputs,
            outputs,
        });
        debug!(service = %service, method = %method, "collected method");
        Ok(())
    }

    fn parse_arguments(
        &mut self,
        method: &str,
        direction: &str,
        args: &[(&str, Rc<go::Type>)],
    ) -> Result<Vec<MethodArgument>> {
        args.iter()
            .map(|(name, ty)| {
                let typ = self
                    .parse(None, ty)
                    .map_err(|e| e.context(format!("method {method} {direction} {name}")))?;
                Ok(MethodArgument {
                    name: (*name).to_string(),
                    typ,
                    optional: false,
                })
            })
            .collect()
    }

    /// Canonical short name of a host type, relative to the root package.
    pub(crate) fn go_type_name(&self, ty: &Rc<go::Type>) -> String {
        naming::type_name(&ty.qualified(), &self.pkg.path)
    }

    /// Import path worth recording for a host type, if any.
    pub(crate) fn go_type_import(&self, ty: &Rc<go::Type>) -> Option<String> {
        naming::type_import(&ty.qualified(), &self.pkg.path)
    }
}
