//! Type descriptions and the arena that owns them.
//!
//! # Identity
//!
//! Every description lives in a [`TypeSet`] and is referenced by [`TypeId`].
//!
//! - Named types (structs, named primitives) are keyed by `(package, name)`.
//! - Unnamed shapes (pointers, sequences, maps, anonymous structs, plain
//!   primitives) are interned structurally: describing `[Person]` twice yields
//!   the same id.
//!
//! After stripping pointer indirection with [`TypeSet::strip`], two references
//! denote the same type exactly when their ids are equal.
//!
//! # Shapes
//!
//! [`Shape`] is the closed set of structural forms the registry understands.
//! Whether a primitive is *named* is not part of the shape; it is the presence
//! of [`TypeDesc::name`].

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::utils::qualify;

/// Handle to a description inside a [`TypeSet`].
///
/// Ids are only meaningful for the set that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(u32);

impl TypeId {
    /// Raw index for debugging and serialization.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Built-in scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    Int,
    UInt,
    Float,
    String,
    /// Date/time values. Always opaque, never a declaration.
    DateTime,
    /// Untyped value.
    Any,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int,
        PrimitiveKind::UInt,
        PrimitiveKind::Float,
        PrimitiveKind::String,
        PrimitiveKind::DateTime,
        PrimitiveKind::Any,
    ];

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int | PrimitiveKind::UInt | PrimitiveKind::Float
        )
    }

    /// Whether a named type of this kind may carry an enumerated constant set.
    pub fn can_enumerate(self) -> bool {
        self.is_numeric() || self == PrimitiveKind::String
    }

    /// Keyword used by the schema notation.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::UInt => "uint",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::DateTime => "time",
            PrimitiveKind::Any => "any",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// Per-member annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemberAttrs {
    /// Display name replacing the declared member name.
    pub rename: Option<String>,
    /// Member contributes nothing to the output.
    pub skip: bool,
    /// Member may be absent (`name?: T`).
    pub optional: bool,
}

/// One member of an aggregate, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: String,
    pub ty: TypeId,
    /// Embedded without a field name of its own.
    pub embedded: bool,
    pub attrs: MemberAttrs,
    pub doc: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
            attrs: MemberAttrs::default(),
            doc: None,
        }
    }

    /// An embedded member. By convention its name is the embedded type's name.
    pub fn embedded(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty)
        }
    }

    pub fn with_attrs(mut self, attrs: MemberAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.attrs.rename = Some(name.into());
        self
    }

    pub fn skip(&mut self) -> &mut Self {
        self.attrs.skip = true;
        self
    }

    pub fn optional(&mut self) -> &mut Self {
        self.attrs.optional = true;
        self
    }

    pub fn doc(&mut self, doc: impl Into<String>) -> &mut Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Structural form of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One level of indirection.
    Pointer(TypeId),
    /// Struct-like composite with ordered members.
    Aggregate(Vec<Member>),
    /// Array, slice, list or set.
    Sequence(TypeId),
    /// Map or dictionary.
    Map { key: TypeId, value: TypeId },
    Primitive(PrimitiveKind),
}

/// Literal value of an enumerated constant.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Literal {
    /// Whether this literal can inhabit a primitive of `kind`.
    pub fn fits(&self, kind: PrimitiveKind) -> bool {
        match self {
            Literal::String(_) => kind == PrimitiveKind::String,
            Literal::Int(v) => match kind {
                PrimitiveKind::Int | PrimitiveKind::Float => true,
                PrimitiveKind::UInt => *v >= 0,
                _ => false,
            },
            Literal::UInt(_) => kind.is_numeric(),
            Literal::Float(_) => kind == PrimitiveKind::Float,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::UInt(value.into())
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::UInt(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

/// Named constant attached to a named primitive type.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub name: String,
    pub value: Literal,
    pub comment: Option<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Description of one type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDesc {
    /// Declared name; `None` for unnamed shapes.
    pub name: Option<String>,
    /// Originating package path; empty for built-ins and unnamed shapes.
    pub package: String,
    pub shape: Shape,
    pub doc: Option<String>,
    /// Enumerated constants, in declaration order.
    pub constants: Vec<Constant>,
}

impl TypeDesc {
    fn unnamed(shape: Shape) -> Self {
        Self {
            name: None,
            package: String::new(),
            shape,
            doc: None,
            constants: Vec::new(),
        }
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// `package.Name`, or `Name` when the package is empty.
    pub fn qualified_name(&self) -> Option<String> {
        self.name.as_deref().map(|name| qualify(&self.package, name))
    }

    /// Members of an aggregate; empty for every other shape.
    pub fn members(&self) -> &[Member] {
        match &self.shape {
            Shape::Aggregate(members) => members,
            _ => &[],
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self.shape {
            Shape::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.shape, Shape::Aggregate(_))
    }
}

/// Arena of type descriptions.
///
/// Pre-populated with the plain primitives, reachable through the associated
/// constants ([`TypeSet::STRING`], ...).
#[derive(Clone, Debug)]
pub struct TypeSet {
    descs: Vec<TypeDesc>,
    /// Unnamed shapes, for structural interning.
    structural: HashMap<Shape, TypeId>,
    /// Named types by `(package, name)`, in declaration order.
    named: IndexMap<(String, String), TypeId>,
    /// Rust types bound through `Describe`.
    pub(crate) native: HashMap<std::any::TypeId, TypeId>,
}

impl TypeSet {
    pub const BOOL: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const UINT: TypeId = TypeId(2);
    pub const FLOAT: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const DATE_TIME: TypeId = TypeId(5);
    pub const ANY: TypeId = TypeId(6);

    pub fn new() -> Self {
        let mut set = Self {
            descs: Vec::new(),
            structural: HashMap::new(),
            named: IndexMap::new(),
            native: HashMap::new(),
        };
        // Order must match the associated constants above.
        for kind in PrimitiveKind::ALL {
            set.intern(Shape::Primitive(kind));
        }
        set
    }

    fn push(&mut self, desc: TypeDesc) -> TypeId {
        let id = TypeId(self.descs.len() as u32);
        self.descs.push(desc);
        id
    }

    fn intern(&mut self, shape: Shape) -> TypeId {
        if let Some(&id) = self.structural.get(&shape) {
            return id;
        }
        let id = self.push(TypeDesc::unnamed(shape.clone()));
        self.structural.insert(shape, id);
        id
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        self.intern(Shape::Primitive(kind))
    }

    pub fn pointer(&mut self, to: TypeId) -> TypeId {
        self.intern(Shape::Pointer(to))
    }

    pub fn sequence(&mut self, element: TypeId) -> TypeId {
        self.intern(Shape::Sequence(element))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(Shape::Map { key, value })
    }

    /// Unnamed struct. Identical member lists share one id.
    pub fn anonymous_struct(&mut self, members: Vec<Member>) -> TypeId {
        self.intern(Shape::Aggregate(members))
    }

    /// Declare a named struct with no members yet.
    ///
    /// Idempotent per `(package, name)`: a second call returns the first id
    /// untouched. Fill the members with [`set_members`](Self::set_members);
    /// declaring first is what allows members to refer back to the struct.
    pub fn declare_struct(&mut self, package: &str, name: &str) -> TypeId {
        self.declare_named(package, name, Shape::Aggregate(Vec::new()))
    }

    /// Declare a named primitive (an alias of a scalar kind).
    ///
    /// Idempotent per `(package, name)`, like [`declare_struct`](Self::declare_struct).
    pub fn named_primitive(&mut self, package: &str, name: &str, kind: PrimitiveKind) -> TypeId {
        self.declare_named(package, name, Shape::Primitive(kind))
    }

    fn declare_named(&mut self, package: &str, name: &str, shape: Shape) -> TypeId {
        let key = (package.to_string(), name.to_string());
        if let Some(&id) = self.named.get(&key) {
            return id;
        }
        let id = self.push(TypeDesc {
            name: Some(name.to_string()),
            package: package.to_string(),
            ..TypeDesc::unnamed(shape)
        });
        self.named.insert(key, id);
        id
    }

    /// Replace the members of a named struct.
    ///
    /// Has no effect on unnamed or non-aggregate types: those are interned by
    /// shape and must not change after creation.
    pub fn set_members(&mut self, id: TypeId, members: Vec<Member>) {
        let desc = &mut self.descs[id.index()];
        if desc.name.is_none() {
            return;
        }
        if let Shape::Aggregate(slot) = &mut desc.shape {
            *slot = members;
        }
    }

    /// Attach documentation to a named type.
    pub fn set_doc(&mut self, id: TypeId, doc: impl Into<String>) {
        let desc = &mut self.descs[id.index()];
        if desc.name.is_some() {
            desc.doc = Some(doc.into());
        }
    }

    /// Attach an enumerated constant to a named primitive.
    pub fn add_constant(&mut self, id: TypeId, constant: Constant) {
        let desc = &mut self.descs[id.index()];
        if desc.name.is_some() && desc.primitive().is_some() {
            desc.constants.push(constant);
        }
    }

    /// Get a description by id.
    ///
    /// # Panics
    /// Panics if the id was not created by this set.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeDesc {
        &self.descs[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeDesc> {
        self.descs.get(id.index())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.descs.len()
    }

    /// Follow pointer indirection down to the pointee.
    pub fn strip(&self, mut id: TypeId) -> TypeId {
        while let Some(Shape::Pointer(inner)) = self.try_get(id).map(|d| &d.shape) {
            id = *inner;
        }
        id
    }

    pub fn lookup(&self, package: &str, name: &str) -> Option<TypeId> {
        self.named
            .get(&(package.to_string(), name.to_string()))
            .copied()
    }

    /// All named types called `name`, across packages, in declaration order.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = TypeId> + 'a {
        self.named
            .iter()
            .filter(move |((_, n), _)| n == name)
            .map(|(_, &id)| id)
    }

    /// Named types in declaration order.
    pub fn named(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.named.values().copied()
    }

    pub fn qualified_name(&self, id: TypeId) -> Option<String> {
        self.try_get(id).and_then(TypeDesc::qualified_name)
    }

    pub fn len(&self) -> usize {
        self.descs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDesc)> {
        self.descs
            .iter()
            .enumerate()
            .map(|(i, desc)| (TypeId(i as u32), desc))
    }
}

impl Default for TypeSet {
    fn default() -> Self {
        Self::new()
    }
}
