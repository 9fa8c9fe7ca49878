//! Declarations: the units the registry emits.

use serde::Serialize;
use typemirror_core::utils::qualify;
use typemirror_core::{Literal, TypeId};

/// Handle to a declaration inside a [`Registry`](super::Registry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub(crate) u32);

impl DeclId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a declaration came from: the package path and original type name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub package: String,
    pub type_name: String,
}

impl Origin {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
        }
    }

    /// `package.TypeName`, or `TypeName` when the package is empty.
    pub fn qualified(&self) -> String {
        qualify(&self.package, &self.type_name)
    }
}

/// One member of an aggregate declaration, as classified.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Display name (rename applied).
    pub name: String,
    pub ty: TypeId,
    /// Name the walker uses when the target type has none of its own.
    pub contextual_name: String,
    pub omitted: bool,
    pub anonymous: bool,
    pub optional: bool,
    pub doc: Option<String>,
    pub indent: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: Literal,
    pub comment: Option<String>,
    pub indent: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    Aggregate {
        fields: Vec<FieldDescriptor>,
        /// Names of embedded types, rendered as `extends`.
        inherited: Vec<String>,
    },
    Enumeration {
        members: Vec<EnumMember>,
    },
}

/// One emitted type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub origin: Origin,
    /// Identity this declaration was registered for.
    pub ty: TypeId,
    pub doc: Option<String>,
    pub kind: DeclKind,
    pub indent: String,
}

impl Declaration {
    pub(crate) fn aggregate(name: String, origin: Origin, ty: TypeId) -> Self {
        Self {
            name,
            origin,
            ty,
            doc: None,
            kind: DeclKind::Aggregate {
                fields: Vec::new(),
                inherited: Vec::new(),
            },
            indent: String::new(),
        }
    }

    pub(crate) fn enumeration(
        name: String,
        origin: Origin,
        ty: TypeId,
        members: Vec<EnumMember>,
    ) -> Self {
        Self {
            name,
            origin,
            ty,
            doc: None,
            kind: DeclKind::Enumeration { members },
            indent: String::new(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, DeclKind::Aggregate { .. })
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, DeclKind::Enumeration { .. })
    }

    /// Fields of an aggregate; empty for enumerations.
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            DeclKind::Aggregate { fields, .. } => fields,
            DeclKind::Enumeration { .. } => &[],
        }
    }

    pub fn inherited(&self) -> &[String] {
        match &self.kind {
            DeclKind::Aggregate { inherited, .. } => inherited,
            DeclKind::Enumeration { .. } => &[],
        }
    }

    /// Members of an enumeration; empty for aggregates.
    pub fn members(&self) -> &[EnumMember] {
        match &self.kind {
            DeclKind::Enumeration { members } => members,
            DeclKind::Aggregate { .. } => &[],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DeclKind::Aggregate { .. } => "interface",
            DeclKind::Enumeration { .. } => "enum",
        }
    }
}
