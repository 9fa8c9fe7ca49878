//! Type registry: deduplicated, discovery-ordered declarations.
//!
//! A [`Registry`] owns a [`TypeSet`] and turns the types reachable from its
//! roots into [`Declaration`]s:
//!
//! - at most one declaration per type identity (pointers stripped);
//! - a declaration is entered into the seen-map before its fields are walked,
//!   which is what makes cyclic type graphs terminate;
//! - a declaration is appended to the output after its fields, so referenced
//!   types come before the types referencing them.
//!
//! Every generation run starts from a fresh registry. Nothing is ever removed.

mod classify;
mod config;
mod decl;
mod sources;
mod walk;

#[cfg(test)]
mod classify_tests;
#[cfg(test)]
mod registry_tests;

use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::{debug, info, trace};
use typemirror_core::{Describe, TypeId, TypeSet};

use crate::render::{OutputAssembler, RenderContext, TypeScript};
use crate::{Error, Result};

pub use classify::classify;
pub use config::{Config, DEFAULT_HEADER};
pub use decl::{DeclId, DeclKind, Declaration, EnumMember, FieldDescriptor, Origin};
pub use sources::{DeclaredConstants, DeclaredDocs, DocSource, EnumSource};
pub use walk::{Inline, Step};

pub struct Registry {
    pub(crate) types: TypeSet,
    pub(crate) config: Config,
    pub(crate) enums: Box<dyn EnumSource>,
    docs: Box<dyn DocSource>,
    assembler: Box<dyn OutputAssembler>,

    /// Declaration arena, indexed by `DeclId`
    decls: Vec<Declaration>,
    /// Type identity -> declaration
    seen: HashMap<TypeId, DeclId>,
    /// Output order
    order: Vec<DeclId>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(TypeSet::new())
    }
}

impl Registry {
    pub fn new(types: TypeSet) -> Self {
        Self::with_config(types, Config::default())
    }

    pub fn with_config(types: TypeSet, config: Config) -> Self {
        Self {
            types,
            config,
            enums: Box::new(DeclaredConstants),
            docs: Box::new(DeclaredDocs),
            assembler: Box::new(TypeScript::default()),
            decls: Vec::new(),
            seen: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Replace the enumeration detector.
    pub fn enum_source(mut self, source: impl EnumSource + 'static) -> Self {
        self.enums = Box::new(source);
        self
    }

    /// Replace the documentation lookup.
    pub fn doc_source(mut self, source: impl DocSource + 'static) -> Self {
        self.docs = Box::new(source);
        self
    }

    /// Replace the output assembler used by [`render`](Self::render).
    pub fn assembler(mut self, assembler: impl OutputAssembler + 'static) -> Self {
        self.assembler = Box::new(assembler);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.config.namespace = namespace.filter(|ns| !ns.is_empty());
    }

    pub fn types(&self) -> &TypeSet {
        &self.types
    }

    /// The type set, for describing more types before adding them.
    pub fn types_mut(&mut self) -> &mut TypeSet {
        &mut self.types
    }

    /// Register the Rust type `T` as a root.
    pub fn add<T: Describe + ?Sized>(&mut self) -> Result<&Declaration> {
        let ty = self.types.of::<T>();
        self.add_type(ty, None)
    }

    /// Register the Rust type `T` as a root declared under `name`.
    pub fn add_named<T: Describe + ?Sized>(&mut self, name: &str) -> Result<&Declaration> {
        let ty = self.types.of::<T>();
        self.add_type(ty, Some(name))
    }

    /// Register the type of `value` as a root.
    pub fn add_value<T: Describe>(&mut self, _value: &T) -> Result<&Declaration> {
        self.add::<T>()
    }

    /// Register `ty` as a root.
    ///
    /// Pointers are stripped first. The root is declared as an aggregate
    /// whatever its shape; only struct shapes contribute fields. A root that
    /// was already declared is returned unchanged.
    pub fn add_type(&mut self, ty: TypeId, name: Option<&str>) -> Result<&Declaration> {
        let ty = self.checked_strip(ty)?;
        if let Some(&id) = self.seen.get(&ty) {
            return Ok(&self.decls[id.index()]);
        }
        let name = self.root_name(ty, name)?;
        let id = self.aggregate(ty, name, None);
        Ok(&self.decls[id.index()])
    }

    /// Register `ty` as an enumeration root, without checking its shape.
    ///
    /// `namespace` replaces the origin package shown for the declaration.
    pub fn add_enumeration(
        &mut self,
        ty: TypeId,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<&Declaration> {
        let ty = self.checked_strip(ty)?;
        if let Some(&id) = self.seen.get(&ty) {
            return Ok(&self.decls[id.index()]);
        }
        let name = self.root_name(ty, name)?;
        let id = self.enumeration(ty, Some(&name), namespace);
        Ok(&self.decls[id.index()])
    }

    /// [`add_enumeration`](Self::add_enumeration) for the Rust type `T`.
    pub fn add_enumeration_of<T: Describe + ?Sized>(
        &mut self,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<&Declaration> {
        let ty = self.types.of::<T>();
        self.add_enumeration(ty, name, namespace)
    }

    /// Register an aggregate declaration for `ty`, already stripped of
    /// pointers.
    ///
    /// Idempotent per identity: a type already declared (as anything) is
    /// returned as is. `override_name` replaces the type's own name.
    pub fn register_aggregate(
        &mut self,
        ty: TypeId,
        override_name: Option<&str>,
    ) -> Result<&Declaration> {
        self.check(ty)?;
        if let Some(&id) = self.seen.get(&ty) {
            return Ok(&self.decls[id.index()]);
        }
        let name = self.root_name(ty, override_name)?;
        let id = self.aggregate(ty, name, None);
        Ok(&self.decls[id.index()])
    }

    /// Register an enumeration declaration for the named primitive `ty`.
    ///
    /// Members come from the registry's [`EnumSource`], in declaration order.
    pub fn register_enumeration(
        &mut self,
        ty: TypeId,
        override_name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<&Declaration> {
        self.check(ty)?;
        if let Some(&id) = self.seen.get(&ty) {
            return Ok(&self.decls[id.index()]);
        }
        let name = self.root_name(ty, override_name)?;
        let id = self.enumeration(ty, Some(&name), namespace);
        Ok(&self.decls[id.index()])
    }

    /// Declarations in output order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.order.iter().map(|id| &self.decls[id.index()])
    }

    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// Declaration registered for `ty` (pointers stripped), if any.
    pub fn lookup(&self, ty: TypeId) -> Option<&Declaration> {
        let ty = self.types.strip(ty);
        self.seen.get(&ty).map(|id| &self.decls[id.index()])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Assign indentation to every declaration, field and enum member.
    ///
    /// Declarations sit one unit deep inside a namespace and at column zero
    /// otherwise; their fields and members sit one unit deeper.
    pub fn finish(&mut self) {
        let namespaced = self.config.namespace.is_some();
        assign_indents(&mut self.decls, namespaced, self.assembler.indent_unit());
    }

    /// Finish, render with the registry's assembler and write to `w`.
    pub fn render<W: io::Write + ?Sized>(&mut self, w: &mut W) -> Result<()> {
        let text = self.render_to_string()?;
        w.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Finish and render with `assembler` instead of the registry's own.
    pub fn render_with<W: io::Write + ?Sized>(
        &mut self,
        assembler: &dyn OutputAssembler,
        w: &mut W,
    ) -> Result<()> {
        let namespaced = self.config.namespace.is_some();
        assign_indents(&mut self.decls, namespaced, assembler.indent_unit());

        let mut out = String::new();
        assembler.assemble(&self.context(), &mut out)?;
        w.write_all(out.as_bytes())?;
        Ok(())
    }

    pub fn render_to_string(&mut self) -> Result<String> {
        self.finish();
        let mut out = String::new();
        self.assembler.assemble(&self.context(), &mut out)?;
        Ok(out)
    }

    /// Render into the file at `path`, creating or truncating it.
    pub fn generate_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.render_to_string()?;
        std::fs::write(path, text).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "generated {} declarations into {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// [`generate_file`](Self::generate_file), exiting the process with
    /// status 1 on failure.
    pub fn must_generate_file(&mut self, path: impl AsRef<Path>) {
        if let Err(err) = self.generate_file(path) {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }

    pub(crate) fn aggregate(
        &mut self,
        ty: TypeId,
        name: String,
        namespace: Option<&str>,
    ) -> DeclId {
        if let Some(&id) = self.seen.get(&ty) {
            trace!("{ty} already declared");
            return id;
        }

        let origin = self.origin(ty, &name, namespace);
        let mut decl = Declaration::aggregate(name.clone(), origin, ty);
        decl.doc = self.docs.type_doc(&self.types, ty);
        let id = self.insert(decl);

        // Cloned: walking members needs `&mut self`.
        let members = self.types.get(ty).members().to_vec();
        let mut fields = Vec::with_capacity(members.len());
        let mut inherited = Vec::new();

        for member in &members {
            let field = classify(&self.types, member, &name);
            if field.omitted {
                continue;
            }

            if field.anonymous {
                let target = self.types.strip(field.ty);
                if self.types.get(target).is_aggregate() {
                    let base = self.embedded(target, &field, namespace);
                    inherited.push(base);
                    continue;
                }
            }

            self.visit(field.ty, &field.contextual_name, namespace);
            fields.push(field);
        }

        let decl = &mut self.decls[id.index()];
        decl.kind = DeclKind::Aggregate { fields, inherited };
        debug!("declared interface {} ({})", decl.name, decl.origin.qualified());

        self.order.push(id);
        id
    }

    pub(crate) fn enumeration(
        &mut self,
        ty: TypeId,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> DeclId {
        if let Some(&id) = self.seen.get(&ty) {
            trace!("{ty} already declared");
            return id;
        }

        let desc = self.types.get(ty);
        let name = name
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| desc.name.clone())
            .unwrap_or_default();

        let members = self
            .enums
            .constants(&self.types, ty)
            .into_iter()
            .map(|constant| EnumMember {
                name: constant.name,
                value: constant.value,
                comment: constant.comment,
                indent: String::new(),
            })
            .collect();

        let origin = self.origin(ty, &name, namespace);
        let mut decl = Declaration::enumeration(name, origin, ty, members);
        decl.doc = self.docs.type_doc(&self.types, ty);
        debug!(
            "declared enum {} with {} members",
            decl.name,
            decl.members().len()
        );

        let id = self.insert(decl);
        self.order.push(id);
        id
    }

    /// Name recorded in the `extends` list for an embedded aggregate.
    fn embedded(
        &mut self,
        target: TypeId,
        field: &FieldDescriptor,
        namespace: Option<&str>,
    ) -> String {
        let own = self.types.get(target).name.clone();
        if !self.config.register_embedded || self.custom_type(target).is_some() {
            return own.unwrap_or_else(|| field.name.clone());
        }

        let name = own.unwrap_or_else(|| field.contextual_name.clone());
        let id = self.aggregate(target, name, namespace);
        self.decls[id.index()].name.clone()
    }

    fn insert(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.seen.insert(decl.ty, id);
        self.decls.push(decl);
        id
    }

    fn origin(&self, ty: TypeId, name: &str, namespace: Option<&str>) -> Origin {
        let desc = self.types.get(ty);
        let package = match namespace {
            Some(ns) => ns.to_string(),
            None => desc.package.clone(),
        };
        let type_name = desc.name.clone().unwrap_or_else(|| name.to_string());
        Origin::new(package, type_name)
    }

    fn check(&self, ty: TypeId) -> Result<()> {
        if self.types.contains(ty) {
            Ok(())
        } else {
            Err(Error::UnknownType(ty))
        }
    }

    fn checked_strip(&self, ty: TypeId) -> Result<TypeId> {
        self.check(ty)?;
        Ok(self.types.strip(ty))
    }

    fn root_name(&self, ty: TypeId, name: Option<&str>) -> Result<String> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => Ok(name.to_string()),
            None => self.types.get(ty).name.clone().ok_or(Error::UnnamedType(ty)),
        }
    }

    fn context(&self) -> RenderContext<'_> {
        let declarations = self.declarations().collect();
        let names = self
            .seen
            .iter()
            .map(|(&ty, id)| (ty, &self.decls[id.index()]))
            .collect();
        RenderContext::new(
            declarations,
            self.config.get_namespace(),
            self.config.get_header(),
            &self.types,
            names,
            &self.config.custom_types,
        )
    }
}

fn assign_indents(decls: &mut [Declaration], namespaced: bool, unit: &str) {
    let decl_indent = if namespaced { unit } else { "" };
    let inner_indent = format!("{decl_indent}{unit}");

    for decl in decls {
        decl.indent = decl_indent.to_string();
        match &mut decl.kind {
            DeclKind::Aggregate { fields, .. } => {
                for field in fields {
                    field.indent = inner_indent.clone();
                }
            }
            DeclKind::Enumeration { members } => {
                for member in members {
                    member.indent = inner_indent.clone();
                }
            }
        }
    }
}
