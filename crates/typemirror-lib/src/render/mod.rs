//! Output assembly: turning the ordered declaration list into text.
//!
//! The registry hands an [`OutputAssembler`] a [`RenderContext`] holding the
//! declarations, the namespace label, the file header and a way to resolve
//! field types into language-neutral [`TypeRef`]s. [`TypeScript`] is the
//! default assembler.

pub mod typescript;

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use typemirror_core::{PrimitiveKind, Shape, TypeId, TypeSet};

use crate::registry::Declaration;

pub use typescript::TypeScript;

/// Indentation unit used when an assembler does not pick its own.
pub const DEFAULT_INDENT: &str = "    ";

/// Renders a declaration list.
pub trait OutputAssembler: Send {
    /// One level of indentation, applied by the registry before assembly.
    fn indent_unit(&self) -> &str {
        DEFAULT_INDENT
    }

    fn assemble(&self, cx: &RenderContext<'_>, out: &mut String) -> fmt::Result;
}

/// Field type as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef<'r> {
    /// A declaration in this output, by name.
    Declared(&'r str),
    Sequence(Box<TypeRef<'r>>),
    Map {
        key: Box<TypeRef<'r>>,
        value: Box<TypeRef<'r>>,
    },
    Primitive(PrimitiveKind),
    /// User-designated text, emitted verbatim.
    Opaque(&'r str),
}

/// Everything an assembler needs, borrowed from the registry.
pub struct RenderContext<'r> {
    declarations: Vec<&'r Declaration>,
    namespace: Option<&'r str>,
    header: &'r str,
    types: &'r TypeSet,
    /// Declared type identity -> declaration
    names: HashMap<TypeId, &'r Declaration>,
    custom_types: &'r IndexMap<String, String>,
}

impl<'r> RenderContext<'r> {
    pub(crate) fn new(
        declarations: Vec<&'r Declaration>,
        namespace: Option<&'r str>,
        header: &'r str,
        types: &'r TypeSet,
        names: HashMap<TypeId, &'r Declaration>,
        custom_types: &'r IndexMap<String, String>,
    ) -> Self {
        Self {
            declarations,
            namespace,
            header,
            types,
            names,
            custom_types,
        }
    }

    /// Declarations in output order.
    pub fn declarations(&self) -> &[&'r Declaration] {
        &self.declarations
    }

    pub fn namespace(&self) -> Option<&'r str> {
        self.namespace
    }

    pub fn header(&self) -> &'r str {
        self.header
    }

    pub fn types(&self) -> &'r TypeSet {
        self.types
    }

    /// Resolve a field type.
    ///
    /// Pointers resolve to their pointee. Aggregates that were never declared
    /// resolve to `any`.
    pub fn resolve(&self, ty: TypeId) -> TypeRef<'r> {
        let types = self.types;
        let custom_types = self.custom_types;

        let ty = types.strip(ty);
        let Some(desc) = types.try_get(ty) else {
            return TypeRef::Primitive(PrimitiveKind::Any);
        };

        if let Some(text) = desc
            .qualified_name()
            .and_then(|qualified| custom_types.get(&qualified))
        {
            return TypeRef::Opaque(text);
        }
        if let Some(decl) = self.names.get(&ty) {
            return TypeRef::Declared(decl.name.as_str());
        }

        match &desc.shape {
            Shape::Sequence(element) => TypeRef::Sequence(Box::new(self.resolve(*element))),
            Shape::Map { key, value } => TypeRef::Map {
                key: Box::new(self.resolve_key(*key)),
                value: Box::new(self.resolve(*value)),
            },
            Shape::Primitive(kind) => TypeRef::Primitive(*kind),
            Shape::Aggregate(_) | Shape::Pointer(_) => TypeRef::Primitive(PrimitiveKind::Any),
        }
    }

    /// Resolve a map key. Declared aggregates cannot key a `Record`, so they
    /// fall back to string keys.
    fn resolve_key(&self, ty: TypeId) -> TypeRef<'r> {
        match self.resolve(ty) {
            TypeRef::Declared(_) if !self.declares_enumeration(ty) => {
                TypeRef::Primitive(PrimitiveKind::String)
            }
            key => key,
        }
    }

    fn declares_enumeration(&self, ty: TypeId) -> bool {
        self.names
            .get(&self.types.strip(ty))
            .is_some_and(|decl| decl.is_enumeration())
    }
}
