//! Typemirror: discover a type graph and emit TypeScript declarations for it.
//!
//! # Example
//!
//! ```
//! use typemirror_lib::Registry;
//! use typemirror_core::{Describe, TypeId, TypeSet};
//!
//! struct Address;
//!
//! impl Describe for Address {
//!     fn describe(types: &mut TypeSet) -> TypeId {
//!         types.build_struct::<Self>("models", "Address", |b| {
//!             b.field::<String>("City");
//!         })
//!     }
//! }
//!
//! let mut registry = Registry::default();
//! registry.add::<Address>().expect("named root");
//! let ts = registry.render_to_string().expect("render");
//! assert!(ts.contains("export interface Address {"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod registry;
pub mod render;
pub mod schema;

use std::path::PathBuf;

use typemirror_core::TypeId;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use registry::{
    Config, DeclId, DeclKind, Declaration, EnumMember, FieldDescriptor, Origin, Registry,
};
pub use render::{OutputAssembler, RenderContext, TypeRef, TypeScript};
pub use schema::{Schema, SourceId, SourceMap};

/// Errors surfaced by registration, rendering and file generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Type id does not belong to the registry's type set.
    #[error("type {0} is not part of this type set")]
    UnknownType(TypeId),

    /// Root type has no name of its own and no display name was given.
    #[error("type {0} has no name, a display name is required")]
    UnnamedType(TypeId),

    #[error("failed to format output")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("schema has {} errors", .0.error_count())]
    Schema(Diagnostics),
}

/// Result type for registry and schema operations.
pub type Result<T> = std::result::Result<T, Error>;
