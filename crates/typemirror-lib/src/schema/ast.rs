//! Syntax tree of one schema source.
//!
//! Every node keeps the byte span it was parsed from so the loader can point
//! diagnostics at it. Parse errors leave [`TypeExprKind::Error`] holes
//! instead of dropping the enclosing item.

use std::ops::Range;

use typemirror_core::{Literal, PrimitiveKind};

use super::SourceId;

pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFile {
    pub source: SourceId,
    pub package: Option<PackageDecl>,
    pub items: Vec<Item>,
}

impl SchemaFile {
    /// Declared package path, empty when the file has no `package` header.
    pub fn package_path(&self) -> &str {
        self.package.as_ref().map_or("", |p| p.path.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub path: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Struct(StructDef),
    Enum(EnumDef),
    Alias(AliasDef),
}

impl Item {
    pub fn name(&self) -> &Name {
        match self {
            Item::Struct(def) => &def.name,
            Item::Enum(def) => &def.name,
            Item::Alias(def) => &def.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: Name,
    pub doc: Option<String>,
    pub members: Vec<MemberDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    /// For embedded members, the embedded type's own name.
    pub name: Name,
    pub ty: TypeExpr,
    pub embedded: bool,
    pub attrs: Vec<Attr>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
    Skip,
    Optional,
    Rename(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub kind: AttrKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: Name,
    pub doc: Option<String>,
    /// Base type keyword as written; validated by the loader.
    pub base: Name,
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub name: Name,
    pub value: LiteralExpr,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasDef {
    pub name: Name,
    pub doc: Option<String>,
    pub target: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    Primitive(PrimitiveKind),
    /// `Name` or `pkg.Name`.
    Ref {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Sequence(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// Inline `struct { ... }`.
    Struct(Vec<MemberDef>),
    /// Placeholder left by a parse error.
    Error,
}

impl TypeExpr {
    pub fn error(span: Span) -> Self {
        Self {
            kind: TypeExprKind::Error,
            span,
        }
    }

    /// Name of the referenced type, looking through pointers.
    pub fn referenced_name(&self) -> Option<&str> {
        match &self.kind {
            TypeExprKind::Ref { name, .. } => Some(name),
            TypeExprKind::Pointer(inner) => inner.referenced_name(),
            _ => None,
        }
    }
}
