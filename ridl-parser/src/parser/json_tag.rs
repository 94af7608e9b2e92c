//! `json:"..."` struct tag recognizer.
//!
//! Only the first `json` key in a raw tag is consulted. Its value is a name
//! followed by zero or more comma-prefixed options; `omitempty`, `string`,
//! and `inline` are recognized and anything else is ignored. A bare `-` name
//! drops the field from the schema entirely.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, Result};

// Given `db:"id,omitempty,pk" json:"id,string"` this captures:
//   [1]: id
//   [2]: ,string
static JSON_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s?json:"([^,"]*)(,[^"]*)?""#).expect("static regex"));

/// The recognized options of one `json:"..."` tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonTag {
    /// Alternate serialization key; `-` ignores the field.
    pub name: String,
    /// The literal tag value (`id,string`), recorded in field meta.
    pub value: String,
    /// `,string` - force the wire shape to a string.
    pub is_string: bool,
    /// `,omitempty` - the field is optional.
    pub omitempty: bool,
    /// `,inline` - promote the field's struct fields into the parent.
    pub inline: bool,
}

impl JsonTag {
    /// Whether the tag drops the field from the schema.
    pub fn ignored(&self) -> bool {
        self.name == "-"
    }
}

/// Extract the `json` tag from a raw struct tag string. Returns `Ok(None)`
/// when no `json` key is present, and an error when one is present but
/// malformed.
pub(crate) fn parse(raw: &str) -> Result<Option<JsonTag>> {
    if !raw.contains(r#"json:""#) {
        return Ok(None);
    }

    let caps = JSON_TAG
        .captures(raw)
        .ok_or_else(|| ParseError::TagParse {
            tag: raw.to_string(),
        })?;

    let name = caps.get(1).map_or("", |m| m.as_str());
    let options = caps.get(2).map_or("", |m| m.as_str());

    Ok(Some(JsonTag {
        name: name.to_string(),
        value: format!("{name}{options}"),
        is_string: options.split(',').any(|opt| opt == "string"),
        omitempty: options.split(',').any(|opt| opt == "omitempty"),
        inline: options.split(',').any(|opt| opt == "inline"),
    }))
}
