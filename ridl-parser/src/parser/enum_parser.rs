//! Sentinel-enum recognition and comment-driven variant extraction.
//!
//! Go has no native enums. The contract package ships a parametric `Enum`
//! sentinel, and the values live in the doc comment of the declaration that
//! uses it:
//!
//! ```go
//! // approved
//! // pending = 10
//! // closed
//! type Status = ridl.Enum[status, int]
//! ```
//!
//! A bare name takes its comment-line index as the implicit ordinal.

use std::rc::Rc;

use tracing::debug;

use ridl_schema::{Type as IrType, TypeField, VarRef, VarType};

use crate::error::{ParseError, Result};
use crate::go;
use crate::parser::Parser;

/// Import path of the Go companion library that defines the sentinel.
pub(crate) const SENTINEL_PKG: &str = "github.com/ridl-dev/ridl";

/// Whether a named type is an instantiation of the enum sentinel.
pub(crate) fn is_enum_sentinel(named: &go::Named) -> bool {
    named.pkg().is_some_and(|p| p.path == SENTINEL_PKG)
        && named.name().starts_with("Enum[")
        && named.name().ends_with(']')
}

impl Parser {
    /// Materialize an enum declaration from a sentinel instance: resolve the
    /// storage primitive, find the declaring syntax, and turn its doc block
    /// into variants.
    pub(crate) fn parse_enum(&mut self, named: &go::Named, ty: &Rc<go::Type>) -> Result<VarRef> {
        let instance = named.name();

        let underlying = named.underlying();
        let elem = match underlying.as_basic() {
            Some(basic) => self
                .parse_basic(basic)
                .map_err(|e| e.context("parsing enum storage type"))?,
            None => {
                return Err(ParseError::malformed_enum(
                    instance,
                    format!("storage type {} is not a basic type", underlying.qualified()),
                ))
            }
        };

        let decl = find_declaration(&self.pkg, instance).ok_or_else(|| {
            ParseError::malformed_enum(
                instance,
                format!("no matching enum declaration in package {}", self.pkg.path),
            )
        })?;
        if decl.doc.is_empty() {
            return Err(ParseError::malformed_enum(
                &decl.name,
                "declaration has no documentation block",
            ));
        }

        let mut variants = Vec::with_capacity(decl.doc.len());
        for (ordinal, line) in decl.doc.iter().enumerate() {
            let text = line.strip_prefix("//").unwrap_or(line);
            let (name, value) = match text.split_once('=') {
                Some((name, value)) => (name.trim(), value.trim().to_string()),
                None => (text.trim(), ordinal.to_string()),
            };
            variants.push(TypeField::new(name).with_value(value));
        }

        let enum_decl = Rc::new(IrType::enum_type(&decl.name, elem, variants));
        self.schema.types.push(enum_decl.clone());
        self.parsed_enums.insert(ty.qualified(), enum_decl.clone());
        debug!(name = %decl.name, variants = enum_decl.fields.len(), "extracted enum type");

        Ok(VarRef::new(VarType::enum_ref(&decl.name, &enum_decl)))
    }
}

/// The surface declaration whose right-hand side is the sentinel. When
/// several exist, the one whose bracket arguments match the instance wins;
/// otherwise the first sentinel declaration is taken.
fn find_declaration(pkg: &go::Package, instance: &str) -> Option<go::TypeDecl> {
    let want = bracket_args(instance);
    let decls = pkg.decls();
    let candidates: Vec<&go::TypeDecl> = decls
        .iter()
        .filter(|d| references_sentinel(&d.rhs))
        .collect();

    candidates
        .iter()
        .find(|d| bracket_args(&d.rhs) == want)
        .or_else(|| candidates.first())
        .map(|d| (*d).clone())
}

fn references_sentinel(rhs: &str) -> bool {
    let rhs = rhs.trim();
    rhs.ends_with(']')
        && rhs
            .split_once('[')
            .is_some_and(|(head, _)| head == "Enum" || head.ends_with(".Enum"))
}

/// Bracket arguments reduced to base names:
/// `Enum[github.com/acme/proto.status, int]` and `ridl.Enum[status, int]`
/// both yield `["status", "int"]`.
fn bracket_args(expr: &str) -> Vec<String> {
    let Some(start) = expr.find('[') else {
        return Vec::new();
    };
    let Some(end) = expr.rfind(']') else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    expr[start + 1..end]
        .split(',')
        .map(|arg| {
            let arg = arg.trim();
            let arg = arg.rsplit('/').next().unwrap_or(arg);
            let arg = arg.rsplit('.').next().unwrap_or(arg);
            arg.to_string()
        })
        .collect()
}
