//! Marshaler capability probe.
//!
//! A named type that implements `encoding.TextMarshaler`/`TextUnmarshaler`
//! serializes as a string; one that implements
//! `json.Marshaler`/`json.Unmarshaler` has an opaque wire shape. Detection
//! works on the signature strings in the type's method set (which includes
//! methods reachable via pointer receiver), matched strictly by shape so a
//! same-named method with the wrong signature never counts.
//!
//! A partial pair (one half present, the other missing or misshapen) is
//! treated as "not a marshaler" rather than an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::go;

static TEXT_MARSHAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func \((.+)\)\.MarshalText\(\) \((.+ )?\[\]byte, ([a-z]+ )?error\)$")
        .expect("static regex")
});

static TEXT_UNMARSHAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func \((.+)\)\.UnmarshalText\((.+ )?\[\]byte\) \(?(.+ )?error\)?$")
        .expect("static regex")
});

static JSON_MARSHAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func \((.+)\)\.MarshalJSON\(\) \((.+ )?\[\]byte, ([a-z]+ )?error\)$")
        .expect("static regex")
});

static JSON_UNMARSHAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func \((.+)\)\.UnmarshalJSON\((.+ )?\[\]byte\) \(?(.+ )?error\)?$")
        .expect("static regex")
});

/// Whether the type offers the `encoding.TextMarshaler` pair.
pub(crate) fn is_text_marshaler(named: &go::Named) -> bool {
    has_pair(named, ("MarshalText", &TEXT_MARSHAL), ("UnmarshalText", &TEXT_UNMARSHAL))
}

/// Whether the type offers the `json.Marshaler` pair.
pub(crate) fn is_json_marshaler(named: &go::Named) -> bool {
    has_pair(named, ("MarshalJSON", &JSON_MARSHAL), ("UnmarshalJSON", &JSON_UNMARSHAL))
}

fn has_pair(
    named: &go::Named,
    marshal: (&str, &Regex),
    unmarshal: (&str, &Regex),
) -> bool {
    let has_marshal = method_matches(named, marshal.0, marshal.1);
    let has_unmarshal = method_matches(named, unmarshal.0, unmarshal.1);

    if has_marshal != has_unmarshal {
        let missing = if has_marshal { unmarshal.0 } else { marshal.0 };
        warn!(
            type_name = %named.name(),
            missing = %missing,
            "partial marshaler implementation ignored"
        );
    }

    has_marshal && has_unmarshal
}

fn method_matches(named: &go::Named, name: &str, shape: &Regex) -> bool {
    named
        .method(name)
        .is_some_and(|m| shape.is_match(&m.signature))
}
