//! Static type descriptions through the [`Describe`] trait.
//!
//! Std scalars, strings, collections and smart pointers are described here.
//! User structs implement `Describe` with [`TypeSet::build_struct`]:
//!
//! ```
//! use typemirror_core::{Describe, TypeId, TypeSet};
//!
//! struct Node {
//!     children: Vec<Node>,
//! }
//!
//! impl Describe for Node {
//!     fn describe(types: &mut TypeSet) -> TypeId {
//!         types.build_struct::<Self>("tree", "Node", |b| {
//!             b.field::<Vec<Node>>("Children");
//!         })
//!     }
//! }
//!
//! let mut types = TypeSet::new();
//! let node = types.of::<Node>();
//! assert_eq!(types.of::<Node>(), node);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::types::{Member, PrimitiveKind, TypeId, TypeSet};

/// A Rust type that can describe itself into a [`TypeSet`].
pub trait Describe: 'static {
    /// Add this type's description (and whatever it references) to `types`.
    ///
    /// Call [`TypeSet::of`] rather than this directly: `of` caches the result
    /// per Rust type.
    fn describe(types: &mut TypeSet) -> TypeId;
}

impl TypeSet {
    /// Id for a Rust type, describing it on first use.
    pub fn of<T: Describe + ?Sized>(&mut self) -> TypeId {
        let key = std::any::TypeId::of::<T>();
        if let Some(&id) = self.native.get(&key) {
            return id;
        }
        let id = T::describe(self);
        self.native.insert(key, id);
        id
    }

    /// Bind a Rust type to an existing id, so later `of::<T>()` calls return it.
    pub fn bind<T: ?Sized + 'static>(&mut self, id: TypeId) {
        self.native.insert(std::any::TypeId::of::<T>(), id);
    }

    /// Declare, bind and populate a named struct for `T`.
    ///
    /// `T` is bound before `build` runs, so members may refer back to `T`
    /// (directly or through other types) without recursing forever.
    pub fn build_struct<T: ?Sized + 'static>(
        &mut self,
        package: &str,
        name: &str,
        build: impl FnOnce(&mut StructBuilder<'_>),
    ) -> TypeId {
        let id = self.declare_struct(package, name);
        self.bind::<T>(id);

        let mut builder = StructBuilder {
            types: &mut *self,
            members: Vec::new(),
        };
        build(&mut builder);
        let members = builder.members;

        self.set_members(id, members);
        id
    }
}

/// Collects members for [`TypeSet::build_struct`].
pub struct StructBuilder<'t> {
    types: &'t mut TypeSet,
    members: Vec<Member>,
}

impl StructBuilder<'_> {
    /// Add a named field of Rust type `T`.
    pub fn field<T: Describe + ?Sized>(&mut self, name: &str) -> &mut Member {
        let ty = self.types.of::<T>();
        self.push(Member::new(name, ty))
    }

    /// Add a named field of an already described type.
    pub fn field_of(&mut self, name: &str, ty: TypeId) -> &mut Member {
        self.push(Member::new(name, ty))
    }

    /// Embed `T` without a field name.
    pub fn embed<T: Describe + ?Sized>(&mut self) -> &mut Member {
        let ty = self.types.of::<T>();
        let target = self.types.strip(ty);
        let name = self.types.get(target).name.clone().unwrap_or_default();
        self.push(Member::embedded(name, ty))
    }

    /// The set being populated, for describing ad-hoc shapes.
    pub fn types(&mut self) -> &mut TypeSet {
        self.types
    }

    fn push(&mut self, member: Member) -> &mut Member {
        self.members.push(member);
        let last = self.members.len() - 1;
        &mut self.members[last]
    }
}

macro_rules! describe_primitive {
    ($($kind:ident => $($ty:ty),+;)*) => {
        $($(
            impl Describe for $ty {
                fn describe(types: &mut TypeSet) -> TypeId {
                    types.primitive(PrimitiveKind::$kind)
                }
            }
        )+)*
    };
}

describe_primitive! {
    Bool => bool;
    Int => i8, i16, i32, i64, i128, isize;
    UInt => u8, u16, u32, u64, u128, usize;
    Float => f32, f64;
    String => char, str, String;
    DateTime => SystemTime;
    Any => ();
}

macro_rules! describe_sequence {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe(types: &mut TypeSet) -> TypeId {
                    let element = types.of::<T>();
                    types.sequence(element)
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, BTreeSet);

impl<T: Describe> Describe for [T] {
    fn describe(types: &mut TypeSet) -> TypeId {
        let element = types.of::<T>();
        types.sequence(element)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(types: &mut TypeSet) -> TypeId {
        let element = types.of::<T>();
        types.sequence(element)
    }
}

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe(types: &mut TypeSet) -> TypeId {
        let element = types.of::<T>();
        types.sequence(element)
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for HashMap<K, V, S> {
    fn describe(types: &mut TypeSet) -> TypeId {
        let key = types.of::<K>();
        let value = types.of::<V>();
        types.map(key, value)
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for IndexMap<K, V, S> {
    fn describe(types: &mut TypeSet) -> TypeId {
        let key = types.of::<K>();
        let value = types.of::<V>();
        types.map(key, value)
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(types: &mut TypeSet) -> TypeId {
        let key = types.of::<K>();
        let value = types.of::<V>();
        types.map(key, value)
    }
}

macro_rules! describe_pointer {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty<T> {
                fn describe(types: &mut TypeSet) -> TypeId {
                    let pointee = types.of::<T>();
                    types.pointer(pointee)
                }
            }
        )*
    };
}

describe_pointer!(Box, Rc, Arc);

impl<T: Describe> Describe for Option<T> {
    fn describe(types: &mut TypeSet) -> TypeId {
        let pointee = types.of::<T>();
        types.pointer(pointee)
    }
}
