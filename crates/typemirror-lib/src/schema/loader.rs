//! Builds a [`TypeSet`] from parsed schema files.
//!
//! Loading runs in two passes so definitions may refer to each other in any
//! order, across files:
//!
//! 1. Declare every struct, enum and alias under its `(package, name)` key.
//! 2. Resolve member types, enum constants and transparent aliases.
//!
//! Unqualified references resolve in the referring file's package first, then
//! to the unique definition of that name in any package.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::trace;
use typemirror_core::{Constant, Member, PrimitiveKind, TypeId, TypeSet};

use super::SourceId;
use super::ast::{
    AliasDef, AttrKind, EnumDef, Item, MemberDef, Name, SchemaFile, Span, StructDef, TypeExpr,
    TypeExprKind,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// A definition the registry starts discovery from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Root {
    pub ty: TypeId,
    pub kind: RootKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    Struct,
    Enum,
}

pub(crate) struct Loaded {
    pub types: TypeSet,
    pub roots: Vec<Root>,
}

pub(crate) fn load(files: &[SchemaFile], diagnostics: &mut Diagnostics) -> Loaded {
    let mut loader = Loader {
        types: TypeSet::new(),
        defs: IndexMap::new(),
        aliases: Vec::new(),
        duplicates: HashSet::new(),
        roots: Vec::new(),
        diagnostics,
    };
    loader.declare(files);
    loader.resolve(files);
    Loaded {
        types: loader.types,
        roots: loader.roots,
    }
}

type DefKey = (String, String);

#[derive(Clone, Debug)]
struct Definition {
    source: SourceId,
    span: Span,
    target: Target,
}

#[derive(Clone, Copy, Debug)]
enum Target {
    Type(TypeId),
    /// Index into `Loader::aliases`.
    Alias(usize),
}

#[derive(Debug)]
struct AliasSlot {
    package: String,
    source: SourceId,
    name: Name,
    target: TypeExpr,
    state: AliasState,
}

#[derive(Clone, Copy, Debug)]
enum AliasState {
    Pending,
    Resolving,
    Resolved(Option<TypeId>),
}

struct Loader<'d> {
    types: TypeSet,
    defs: IndexMap<DefKey, Definition>,
    aliases: Vec<AliasSlot>,
    /// `(file, item)` positions shadowed by an earlier definition.
    duplicates: HashSet<(usize, usize)>,
    roots: Vec<Root>,
    diagnostics: &'d mut Diagnostics,
}

impl Loader<'_> {
    fn declare(&mut self, files: &[SchemaFile]) {
        for (file_idx, file) in files.iter().enumerate() {
            let package = file.package_path();
            for (item_idx, item) in file.items.iter().enumerate() {
                let name = item.name();
                let key = (package.to_string(), name.text.clone());

                if let Some(first) = self.defs.get(&key) {
                    let (first_source, first_span) = (first.source, first.span.clone());
                    self.diagnostics
                        .report(
                            file.source,
                            DiagnosticKind::DuplicateDefinition,
                            name.span.clone(),
                        )
                        .message(&name.text)
                        .related_to(first_source, "first defined here", first_span)
                        .emit();
                    self.duplicates.insert((file_idx, item_idx));
                    continue;
                }

                let target = match item {
                    Item::Struct(def) => {
                        Target::Type(self.types.declare_struct(package, &def.name.text))
                    }
                    Item::Enum(def) => {
                        let kind = self.enum_base(file.source, def);
                        Target::Type(self.types.named_primitive(package, &def.name.text, kind))
                    }
                    Item::Alias(def) => self.declare_alias(package, file.source, def),
                };
                self.defs.insert(
                    key,
                    Definition {
                        source: file.source,
                        span: name.span.clone(),
                        target,
                    },
                );
            }
        }
    }

    /// Base kind of an enum; reports and falls back to `any` when invalid.
    fn enum_base(&mut self, source: SourceId, def: &EnumDef) -> PrimitiveKind {
        match PrimitiveKind::from_keyword(&def.base.text) {
            Some(kind) if kind.can_enumerate() => kind,
            found => {
                self.diagnostics
                    .report(source, DiagnosticKind::InvalidEnumBase, def.base.span.clone())
                    .message(&def.base.text)
                    .emit();
                found.unwrap_or(PrimitiveKind::Any)
            }
        }
    }

    fn declare_alias(&mut self, package: &str, source: SourceId, def: &AliasDef) -> Target {
        // Aliases of a scalar are named types of their own; everything else
        // is transparent.
        if let TypeExprKind::Primitive(kind) = def.target.kind {
            return Target::Type(self.types.named_primitive(package, &def.name.text, kind));
        }
        self.aliases.push(AliasSlot {
            package: package.to_string(),
            source,
            name: def.name.clone(),
            target: def.target.clone(),
            state: AliasState::Pending,
        });
        Target::Alias(self.aliases.len() - 1)
    }

    fn resolve(&mut self, files: &[SchemaFile]) {
        for (file_idx, file) in files.iter().enumerate() {
            let package = file.package_path();
            for (item_idx, item) in file.items.iter().enumerate() {
                if self.duplicates.contains(&(file_idx, item_idx)) {
                    continue;
                }
                let key = (package.to_string(), item.name().text.clone());
                let Some(target) = self.defs.get(&key).map(|d| d.target) else {
                    continue;
                };
                match (item, target) {
                    (Item::Struct(def), Target::Type(ty)) => {
                        self.resolve_struct(package, file.source, def, ty)
                    }
                    (Item::Enum(def), Target::Type(ty)) => {
                        self.resolve_enum(file.source, def, ty)
                    }
                    (Item::Alias(def), Target::Type(ty)) => {
                        if let Some(doc) = &def.doc {
                            self.types.set_doc(ty, doc.as_str());
                        }
                    }
                    (Item::Alias(_), Target::Alias(idx)) => {
                        self.resolve_alias(idx);
                    }
                    _ => {}
                }
            }
        }
    }

    fn resolve_struct(&mut self, package: &str, source: SourceId, def: &StructDef, ty: TypeId) {
        let members = self.members(package, source, &def.members);
        self.types.set_members(ty, members);
        if let Some(doc) = &def.doc {
            self.types.set_doc(ty, doc.as_str());
        }
        trace!("resolved struct {}", def.name.text);
        self.roots.push(Root {
            ty,
            kind: RootKind::Struct,
        });
    }

    fn resolve_enum(&mut self, source: SourceId, def: &EnumDef, ty: TypeId) {
        if let Some(doc) = &def.doc {
            self.types.set_doc(ty, doc.as_str());
        }
        let kind = self.types.get(ty).primitive().unwrap_or(PrimitiveKind::Any);
        if !kind.can_enumerate() {
            return;
        }

        let mut seen: HashMap<&str, Span> = HashMap::new();
        let mut count = 0;
        for variant in &def.variants {
            if let Some(first) = seen.get(variant.name.text.as_str()) {
                self.diagnostics
                    .report(source, DiagnosticKind::DuplicateMember, variant.name.span.clone())
                    .message(&variant.name.text)
                    .related_to(source, "first defined here", first.clone())
                    .emit();
                continue;
            }
            seen.insert(&variant.name.text, variant.name.span.clone());

            if !variant.value.value.fits(kind) {
                self.diagnostics
                    .report(source, DiagnosticKind::LiteralKindMismatch, variant.value.span.clone())
                    .message(format!("expected {}", kind.keyword()))
                    .emit();
                continue;
            }

            let mut constant = Constant::new(&variant.name.text, variant.value.value.clone());
            constant.comment = variant.doc.clone();
            self.types.add_constant(ty, constant);
            count += 1;
        }

        if def.variants.is_empty() {
            self.diagnostics
                .report(source, DiagnosticKind::EmptyEnum, def.name.span.clone())
                .emit();
            return;
        }
        if count > 0 {
            self.roots.push(Root {
                ty,
                kind: RootKind::Enum,
            });
        }
    }

    fn members(&mut self, package: &str, source: SourceId, defs: &[MemberDef]) -> Vec<Member> {
        let mut seen: HashMap<&str, Span> = HashMap::new();
        let mut members = Vec::with_capacity(defs.len());

        for def in defs {
            if let Some(first) = seen.get(def.name.text.as_str()) {
                self.diagnostics
                    .report(source, DiagnosticKind::DuplicateMember, def.name.span.clone())
                    .message(&def.name.text)
                    .related_to(source, "first defined here", first.clone())
                    .emit();
                continue;
            }
            seen.insert(&def.name.text, def.name.span.clone());

            let Some(ty) = self.resolve_type(package, source, &def.ty) else {
                continue;
            };
            let mut member = if def.embedded {
                Member::embedded(&def.name.text, ty)
            } else {
                Member::new(&def.name.text, ty)
            };
            for attr in &def.attrs {
                match &attr.kind {
                    AttrKind::Skip => member.skip(),
                    AttrKind::Optional => member.optional(),
                    AttrKind::Rename(name) => member.rename(name),
                };
            }
            if let Some(doc) = &def.doc {
                member.doc(doc.as_str());
            }
            members.push(member);
        }

        members
    }

    fn resolve_type(&mut self, package: &str, source: SourceId, expr: &TypeExpr) -> Option<TypeId> {
        match &expr.kind {
            TypeExprKind::Primitive(kind) => Some(self.types.primitive(*kind)),
            TypeExprKind::Ref {
                package: qualifier,
                name,
            } => self.resolve_ref(package, source, qualifier.as_deref(), name, &expr.span),
            TypeExprKind::Pointer(inner) => {
                let inner = self.resolve_type(package, source, inner)?;
                Some(self.types.pointer(inner))
            }
            TypeExprKind::Sequence(element) => {
                let element = self.resolve_type(package, source, element)?;
                Some(self.types.sequence(element))
            }
            TypeExprKind::Map { key, value } => {
                // Resolve both sides so each reports its own errors.
                let key = self.resolve_type(package, source, key);
                let value = self.resolve_type(package, source, value);
                Some(self.types.map(key?, value?))
            }
            TypeExprKind::Struct(defs) => {
                let members = self.members(package, source, defs);
                Some(self.types.anonymous_struct(members))
            }
            TypeExprKind::Error => None,
        }
    }

    fn resolve_ref(
        &mut self,
        package: &str,
        source: SourceId,
        qualifier: Option<&str>,
        name: &str,
        span: &Span,
    ) -> Option<TypeId> {
        let candidates: Vec<Definition> = match qualifier {
            Some(q) => self
                .defs
                .iter()
                .filter(|((pkg, n), _)| n == name && (pkg == q || last_segment(pkg) == q))
                .map(|(_, def)| def.clone())
                .collect(),
            None => match self.defs.get(&(package.to_string(), name.to_string())) {
                Some(def) => vec![def.clone()],
                None => self
                    .defs
                    .iter()
                    .filter(|((_, n), _)| n == name)
                    .map(|(_, def)| def.clone())
                    .collect(),
            },
        };

        let written = match qualifier {
            Some(q) => format!("{q}.{name}"),
            None => name.to_string(),
        };

        match candidates.as_slice() {
            [] => {
                self.diagnostics
                    .report(source, DiagnosticKind::UndefinedReference, span.clone())
                    .message(written)
                    .emit();
                None
            }
            [def] => match def.target {
                Target::Type(ty) => Some(ty),
                Target::Alias(idx) => self.resolve_alias(idx),
            },
            _ => {
                let mut diag = self
                    .diagnostics
                    .report(source, DiagnosticKind::AmbiguousReference, span.clone())
                    .message(written);
                for def in &candidates {
                    diag = diag.related_to(def.source, "candidate defined here", def.span.clone());
                }
                diag.emit();
                None
            }
        }
    }

    fn resolve_alias(&mut self, idx: usize) -> Option<TypeId> {
        let slot = &mut self.aliases[idx];
        match slot.state {
            AliasState::Resolved(ty) => ty,
            AliasState::Resolving => {
                let (source, name) = (slot.source, slot.name.clone());
                self.diagnostics
                    .report(source, DiagnosticKind::AliasCycle, name.span)
                    .message(&name.text)
                    .emit();
                None
            }
            AliasState::Pending => {
                slot.state = AliasState::Resolving;
                let (package, source, target) =
                    (slot.package.clone(), slot.source, slot.target.clone());
                let ty = self.resolve_type(&package, source, &target);
                self.aliases[idx].state = AliasState::Resolved(ty);
                ty
            }
        }
    }
}

/// Last segment of a package path: `models` for `example.com/app/models`.
fn last_segment(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '.')
        .next()
        .unwrap_or(path)
}
