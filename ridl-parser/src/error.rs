//! Error types for translation failures.
//!
//! Every error bubbles to the top of a translation wrapped with the context
//! that names the offending field or method argument; nothing is retried and
//! no partial schema is emitted on failure.

use thiserror::Error;

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Main error type for the type translator.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The walker saw a host kind it cannot encode.
    #[error("unsupported type {type_name} ({kind})")]
    UnsupportedType { type_name: String, kind: &'static str },

    /// A map key type did not reduce to a basic or string-like kind.
    #[error("map key type {key} does not reduce to a basic or string-like kind")]
    InvalidMapKey { key: String },

    /// A sentinel enum lacked a parseable documentation block or a primitive
    /// underlying type.
    #[error("malformed enum {name}: {reason}")]
    MalformedEnum { name: String, reason: String },

    /// A `json:"..."` struct tag was present but syntactically malformed.
    #[error("malformed json struct tag {tag:?}")]
    TagParse { tag: String },

    /// Failure while translating a struct field.
    #[error("type {type_name} field {field}: {source}")]
    Field {
        type_name: String,
        field: String,
        #[source]
        source: Box<ParseError>,
    },

    /// Failure with a free-form context, e.g. a method argument.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Create an unsupported-type error.
    pub fn unsupported(type_name: impl Into<String>, kind: &'static str) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            kind,
        }
    }

    /// Create a malformed-enum error.
    pub fn malformed_enum(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEnum {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with the struct field it occurred in.
    pub fn in_field(self, type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field {
            type_name: type_name.into(),
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with a free-form context.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
