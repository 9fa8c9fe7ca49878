//! Collaborators the registry consults while discovering types.
//!
//! - [`EnumSource`] decides whether a named primitive carries a closed set of
//!   constants, and supplies them in declaration order.
//! - [`DocSource`] supplies documentation text for named types.
//!
//! The defaults read what the type set already carries. Closures work for
//! both, which keeps one-off overrides short:
//!
//! ```
//! use typemirror_core::{Constant, TypeId, TypeSet};
//! use typemirror_lib::Registry;
//!
//! let registry = Registry::default().enum_source(|_: &TypeSet, _: TypeId| {
//!     vec![Constant::new("Only", "only")]
//! });
//! # drop(registry);
//! ```

use typemirror_core::{Constant, TypeId, TypeSet};

pub trait EnumSource: Send {
    /// Constants of the named primitive `ty`, in declaration order.
    ///
    /// An empty list means `ty` is not an enumeration.
    fn constants(&self, types: &TypeSet, ty: TypeId) -> Vec<Constant>;
}

pub trait DocSource: Send {
    /// Documentation for the named type `ty`.
    fn type_doc(&self, types: &TypeSet, ty: TypeId) -> Option<String>;
}

/// Constants attached to the type description.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredConstants;

impl EnumSource for DeclaredConstants {
    fn constants(&self, types: &TypeSet, ty: TypeId) -> Vec<Constant> {
        types
            .try_get(ty)
            .map(|desc| desc.constants.clone())
            .unwrap_or_default()
    }
}

/// Documentation attached to the type description.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredDocs;

impl DocSource for DeclaredDocs {
    fn type_doc(&self, types: &TypeSet, ty: TypeId) -> Option<String> {
        types.try_get(ty).and_then(|desc| desc.doc.clone())
    }
}

impl<F> EnumSource for F
where
    F: Fn(&TypeSet, TypeId) -> Vec<Constant> + Send,
{
    fn constants(&self, types: &TypeSet, ty: TypeId) -> Vec<Constant> {
        self(types, ty)
    }
}

impl<F> DocSource for F
where
    F: Fn(&TypeSet, TypeId) -> Option<String> + Send,
{
    fn type_doc(&self, types: &TypeSet, ty: TypeId) -> Option<String> {
        self(types, ty)
    }
}
