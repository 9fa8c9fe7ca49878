//! Type graph walker.
//!
//! Each visited type is first classified into a [`Step`] (first match wins),
//! then the step drives registration. Recursion either removes one level of
//! indirection, moves into element shapes, or reaches an aggregate whose
//! re-entry is stopped by the registry's seen-map.

use log::trace;
use typemirror_core::{PrimitiveKind, Shape, TypeId};

use super::Registry;

/// What the walker does with one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Pointer: continue with the pointee under the same contextual name.
    Deref(TypeId),
    /// Struct shape: register under its own name, or the contextual one.
    Aggregate { ty: TypeId, name: String },
    /// Only the element is visited; the sequence is never declared.
    Sequence(TypeId),
    /// Value then key are visited; the map is never declared.
    Map { key: TypeId, value: TypeId },
    /// Named primitive with a non-empty constant set.
    Enumeration(TypeId),
    /// No declaration needed.
    Inline(Inline),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    /// User-designated type, rendered as the given text.
    Opaque(String),
    Primitive(PrimitiveKind),
}

impl Registry {
    /// Classify `ty` for the walker.
    ///
    /// # Panics
    /// Panics if `ty` is not part of this registry's type set.
    pub fn step(&self, ty: TypeId, contextual_name: &str) -> Step {
        let desc = self.types.get(ty);

        // Only named types can be custom, and pointers never are.
        if let Some(text) = self.custom_type(ty) {
            return Step::Inline(Inline::Opaque(text.to_string()));
        }

        match &desc.shape {
            Shape::Pointer(inner) => Step::Deref(*inner),
            Shape::Aggregate(_) => Step::Aggregate {
                ty,
                name: desc
                    .name
                    .clone()
                    .unwrap_or_else(|| contextual_name.to_string()),
            },
            Shape::Sequence(element) => Step::Sequence(*element),
            Shape::Map { key, value } => Step::Map {
                key: *key,
                value: *value,
            },
            Shape::Primitive(kind) => {
                if desc.is_named()
                    && kind.can_enumerate()
                    && !self.enums.constants(&self.types, ty).is_empty()
                {
                    Step::Enumeration(ty)
                } else {
                    Step::Inline(Inline::Primitive(*kind))
                }
            }
        }
    }

    /// Discover everything reachable from `ty` and register what needs a
    /// declaration.
    ///
    /// `namespace`, when given, replaces the origin package of aggregates
    /// registered along the way.
    ///
    /// `ty` must belong to this registry's type set; public entry points
    /// check that before walking.
    pub(crate) fn visit(&mut self, ty: TypeId, contextual_name: &str, namespace: Option<&str>) {
        match self.step(ty, contextual_name) {
            Step::Deref(inner) => self.visit(inner, contextual_name, namespace),
            Step::Aggregate { ty, name } => {
                self.aggregate(ty, name, namespace);
            }
            Step::Sequence(element) => self.visit(element, contextual_name, namespace),
            Step::Map { key, value } => {
                self.visit(value, contextual_name, namespace);
                self.visit(key, contextual_name, namespace);
            }
            Step::Enumeration(ty) => {
                self.enumeration(ty, None, None);
            }
            Step::Inline(inline) => trace!("{ty} inlined as {inline:?}"),
        }
    }

    pub(crate) fn custom_type(&self, ty: TypeId) -> Option<&str> {
        let qualified = self.types.qualified_name(ty)?;
        self.config.custom_types.get(&qualified).map(String::as_str)
    }
}
