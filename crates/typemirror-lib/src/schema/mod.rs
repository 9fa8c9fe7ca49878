//! Schema notation: a textual way to describe a type graph at runtime.
//!
//! ```text
//! package models
//!
//! /// A postal address.
//! struct Address {
//!     City: string
//!     Zip: string @optional
//! }
//!
//! enum Status: string {
//!     Active = "active"
//! }
//! ```
//!
//! Sources are lexed and parsed independently, then loaded together into one
//! [`TypeSet`]. All problems end up in [`Schema::diagnostics`]; a schema with
//! errors refuses to build a [`Registry`].

pub mod ast;
mod lexer;
mod loader;
mod parser;
mod source_map;


use log::debug;
use typemirror_core::TypeSet;

pub use lexer::{Token, TokenKind, lex};
pub use loader::{Root, RootKind};
pub use parser::{ParseResult, parse};
pub use source_map::{Source, SourceId, SourceKind, SourceMap};

use crate::diagnostics::Diagnostics;
use crate::registry::{Config, Registry};
use crate::{Error, Result};

use ast::SchemaFile;

/// A loaded schema: sources, their syntax trees and the resulting types.
#[derive(Debug)]
pub struct Schema {
    sources: SourceMap,
    files: Vec<SchemaFile>,
    types: TypeSet,
    roots: Vec<Root>,
    diagnostics: Diagnostics,
}

impl Schema {
    /// Parse and load every source in `sources`.
    pub fn load(sources: SourceMap) -> Self {
        let mut diagnostics = Diagnostics::new();
        let files: Vec<SchemaFile> = sources
            .iter()
            .map(|source| {
                let result = parser::parse(source.id, source.content);
                diagnostics.extend(result.diagnostics);
                result.file
            })
            .collect();

        let loaded = loader::load(&files, &mut diagnostics);
        debug!(
            "loaded {} sources: {} types, {} roots, {} diagnostics",
            sources.len(),
            loaded.types.len(),
            loaded.roots.len(),
            diagnostics.len()
        );

        Self {
            sources,
            files,
            types: loaded.types,
            roots: loaded.roots,
            diagnostics,
        }
    }

    /// Load a single inline source.
    pub fn parse_str(text: &str) -> Self {
        Self::load(SourceMap::inline(text))
    }

    /// No errors were reported. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn files(&self) -> &[SchemaFile] {
        &self.files
    }

    pub fn types(&self) -> &TypeSet {
        &self.types
    }

    /// Struct and enum definitions, in file order.
    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Roots called `name`, matched against the bare or the qualified name.
    pub fn roots_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Root> + 'a {
        self.roots.iter().filter(move |root| {
            let desc = self.types.get(root.ty);
            desc.name.as_deref() == Some(name)
                || desc.qualified_name().as_deref() == Some(name)
        })
    }

    /// Registry with every root registered.
    pub fn registry(&self, config: Config) -> Result<Registry> {
        self.registry_for(config, &self.roots)
    }

    /// Registry with only `roots` registered, in the given order.
    ///
    /// Roots mapped to custom TypeScript text are left undeclared.
    pub fn registry_for(&self, config: Config, roots: &[Root]) -> Result<Registry> {
        if !self.is_valid() {
            return Err(Error::Schema(self.diagnostics.filtered()));
        }

        let mut registry = Registry::with_config(self.types.clone(), config);
        for root in roots {
            if registry.custom_type(root.ty).is_some() {
                debug!("root {} is a custom type", root.ty);
                continue;
            }
            match root.kind {
                RootKind::Struct => registry.add_type(root.ty, None)?,
                RootKind::Enum => registry.add_enumeration(root.ty, None, None)?,
            };
        }
        Ok(registry)
    }
}
