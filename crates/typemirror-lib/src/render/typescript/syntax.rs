//! TypeScript spelling of names, literals and type references.

use std::fmt::{self, Write};

use typemirror_core::{Literal, PrimitiveKind};

use crate::render::TypeRef;

/// Whether `name` can be written as a bare TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Property or enum member name, quoted when it is not an identifier.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// JSON string literal, which is also a valid TypeScript string literal.
pub(super) fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

pub(super) fn literal(value: &Literal) -> String {
    match value {
        Literal::String(s) => quote(s),
        Literal::Int(v) => v.to_string(),
        Literal::UInt(v) => v.to_string(),
        Literal::Float(v) => v.to_string(),
    }
}

fn primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Bool => "boolean",
        PrimitiveKind::Int | PrimitiveKind::UInt | PrimitiveKind::Float => "number",
        PrimitiveKind::String | PrimitiveKind::DateTime => "string",
        PrimitiveKind::Any => "any",
    }
}

/// TypeScript text for a resolved field type.
pub fn type_text(ty: &TypeRef<'_>) -> String {
    match ty {
        TypeRef::Declared(name) | TypeRef::Opaque(name) => name.to_string(),
        TypeRef::Primitive(kind) => primitive(*kind).to_string(),
        TypeRef::Sequence(element) => {
            let inner = type_text(element);
            if needs_parens(element) {
                format!("({inner})[]")
            } else {
                format!("{inner}[]")
            }
        }
        TypeRef::Map { key, value } => {
            let value = type_text(value);
            match key.as_ref() {
                // Only enumerations reach here as declared keys.
                TypeRef::Declared(name) => format!("Record<{name}, {value}>"),
                TypeRef::Primitive(kind) if kind.is_numeric() => {
                    format!("{{ [key: number]: {value} }}")
                }
                _ => format!("{{ [key: string]: {value} }}"),
            }
        }
    }
}

/// Whether `ty` must be wrapped before `[]` binds to it.
///
/// Index signatures always are. Custom text is when it may hold a union,
/// an intersection or a function type.
fn needs_parens(ty: &TypeRef<'_>) -> bool {
    match ty {
        TypeRef::Map { key, .. } => !matches!(key.as_ref(), TypeRef::Declared(_)),
        TypeRef::Opaque(text) => text.contains(['|', '&']) || text.contains(char::is_whitespace),
        _ => false,
    }
}

/// Write `text` as a JSDoc block at `indent`.
pub(super) fn write_doc(out: &mut String, indent: &str, text: &str) -> fmt::Result {
    let text = text.trim().replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

    match lines.as_slice() {
        [] => Ok(()),
        [line] => writeln!(out, "{indent}/** {line} */"),
        _ => {
            writeln!(out, "{indent}/**")?;
            for line in &lines {
                if line.is_empty() {
                    writeln!(out, "{indent} *")?;
                } else {
                    writeln!(out, "{indent} * {line}")?;
                }
            }
            writeln!(out, "{indent} */")
        }
    }
}
