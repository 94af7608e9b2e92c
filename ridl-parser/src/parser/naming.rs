//! Canonical names and import paths for IR emission.
//!
//! Go's type-checker prints fully qualified expressions
//! (`[]*github.com/acme/proto.User`). Generators want short, stable names
//! with the pointer/slice/array shape tokens intact, so the canonicalizer
//! splits the leading non-letter tokens off, strips the schema's own package
//! (and the placeholder package command-line toolchains assign), reduces the
//! rest to its last path segment, and reattaches the prefix.

/// Placeholder package name the Go toolchain assigns in file mode.
const CMDLINE_PKG: &str = "command-line-arguments";

/// Byte offset of the first letter, or 0 when there is none.
fn first_letter(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Canonical short name for a qualified type expression.
///
/// `[]*github.com/acme/proto.User` becomes `[]*User` when `root_pkg` is the
/// proto package, and `[]*proto.User` otherwise.
pub(crate) fn type_name(qualified: &str, root_pkg: &str) -> String {
    let (prefix, mut name) = qualified.split_at(first_letter(qualified));

    if let Some(stripped) = name.strip_prefix(root_pkg) {
        if let Some(stripped) = stripped.strip_prefix('.') {
            name = stripped;
        }
    }
    if let Some(stripped) = name.strip_prefix(CMDLINE_PKG) {
        if let Some(stripped) = stripped.strip_prefix('.') {
            name = stripped;
        }
    }

    // Reduce to the last path segment (`pkg.Typ` survives, the path goes).
    if let Some(slash) = name.rfind('/') {
        name = &name[slash + 1..];
    }

    if name == "invalid type" {
        name = "invalidType";
    }

    format!("{prefix}{name}")
}

/// Import path of the package defining the type, when one is worth
/// recording. The schema's own package, the toolchain placeholder, and
/// `time` yield nothing.
pub(crate) fn type_import(qualified: &str, root_pkg: &str) -> Option<String> {
    let name = &qualified[first_letter(qualified)..];

    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }

    let path = &name[..dot];
    match path {
        _ if path == root_pkg => None,
        CMDLINE_PKG | "time" => None,
        _ => Some(path.to_string()),
    }
}
