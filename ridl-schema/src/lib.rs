//! # ridl-schema
//!
//! Language-neutral schema IR for Go service contracts.
//!
//! This crate defines the intermediate representation produced by the
//! `ridl-parser` crate and consumed by code generators: a flat [`Schema`]
//! document listing services, methods, and every named type reachable from a
//! method signature, with each type reduced to a small IR alphabet
//! ([`VarKind`]).
//!
//! The IR is deliberately dumb. It carries no behavior beyond construction
//! helpers and JSON emission; all translation logic lives in the parser.
//!
//! ## Cyclic type graphs
//!
//! Go types can reference themselves (`type Node struct { Next *Node }`), so
//! per-reference descriptors are handed out as [`VarRef`] - a shared,
//! pointer-stable handle whose contents may be filled in after the handle has
//! already been embedded in another descriptor. Cross-type references
//! ([`TypeRef`]) are non-owning; every [`Type`] declaration is owned by the
//! [`Schema`]'s ordered type list.
//!
//! ## Serialization
//!
//! The schema document serializes to JSON with camelCase keys. A [`VarRef`]
//! serializes as its canonical expression string (`"[]User"`,
//! `"map<string,Status>"`), which is also what `Display`, `Debug`, and
//! equality go through - this keeps cyclic graphs printable.

pub mod schema;
pub mod types;

pub use schema::{MetaEntry, Method, MethodArgument, Schema, Service, Type, TypeField, TypeKind};
pub use types::{BasicKind, ListType, MapKey, MapType, TypeRef, VarKind, VarRef, VarType};
