//! # ridl-parser
//!
//! Translates a type-checked Go package's service contracts into the
//! language-neutral schema IR defined by [`ridl_schema`].
//!
//! The input is an already-resolved type graph (the [`go`] module's object
//! model, populated by a loader) and the output is a flat
//! [`ridl_schema::Schema`] document listing services, methods, and every
//! named type reachable from a method signature.
//!
//! The heart of the crate is the recursive, memoized type walker on
//! [`Parser`]. It terminates on cyclic type graphs, emulates Go's JSON
//! marshaling rules (embedded-field promotion, `json:"..."` tag options,
//! `encoding.TextMarshaler` and `json.Marshaler` detection) without
//! marshaling anything, and normalizes Go's many string-ish and any-ish
//! spellings into a small IR alphabet.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use ridl_parser::{go, Parser};
//!
//! let pkg = go::Package::new("proto", "github.com/acme/proto");
//! let user = go::Type::named("User", Some(&pkg));
//! user.as_named().unwrap().set_underlying(&go::Type::struct_of(vec![
//!     go::Field::new("ID", &go::Type::basic("int64")),
//! ]));
//!
//! let mut parser = Parser::new(pkg);
//! parser.parse_method("UserService", "GetUser", &[("id", go::Type::basic("int64"))], &[("user", user)])?;
//! println!("{}", parser.into_schema().to_json()?);
//! ```
//!
//! The parser is a pure function from type graph to schema: no I/O, no
//! retained state across parses, and strictly sequential execution (the
//! memo-claim protocol that terminates cycles depends on it).

pub mod error;
pub mod go;
pub mod parser;

pub use error::{ParseError, Result};
pub use parser::Parser;
