//! Field classification: one struct member to one [`FieldDescriptor`].

use typemirror_core::utils::capitalize;
use typemirror_core::{Member, Shape, TypeId, TypeSet};

use super::decl::FieldDescriptor;

/// Classify `member` of the declaration named `enclosing`.
///
/// Pure: reads `types` only to find the member type's own name.
pub fn classify(types: &TypeSet, member: &Member, enclosing: &str) -> FieldDescriptor {
    let name = member
        .attrs
        .rename
        .clone()
        .unwrap_or_else(|| member.name.clone());

    let contextual_name = match target_name(types, member.ty) {
        Some(own) => own.to_string(),
        None => format!("{}{}", capitalize(&member.name), enclosing),
    };

    FieldDescriptor {
        name,
        ty: member.ty,
        contextual_name,
        omitted: member.attrs.skip,
        anonymous: member.embedded,
        optional: member.attrs.optional,
        doc: member.doc.clone(),
        indent: String::new(),
    }
}

/// Name of the type a member ultimately holds, looking through pointers,
/// sequences and map values.
fn target_name(types: &TypeSet, mut ty: TypeId) -> Option<&str> {
    loop {
        let desc = types.try_get(ty)?;
        if let Some(name) = desc.name.as_deref() {
            return Some(name);
        }
        ty = match desc.shape {
            Shape::Pointer(inner) | Shape::Sequence(inner) => inner,
            Shape::Map { value, .. } => value,
            Shape::Aggregate(_) | Shape::Primitive(_) => return None,
        };
    }
}
