use std::collections::HashMap;
use std::time::SystemTime;

use crate::{Describe, PrimitiveKind, Shape, TypeId, TypeSet};

struct Address;

impl Describe for Address {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Address", |b| {
            b.field::<String>("City");
        })
    }
}

struct Base;

impl Describe for Base {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Base", |b| {
            b.field::<u64>("ID");
        })
    }
}

struct Person;

impl Describe for Person {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Person", |b| {
            b.embed::<Base>();
            b.field::<String>("Name").rename("name");
            b.field::<Option<Box<Address>>>("Home").optional();
            b.field::<Vec<Person>>("Friends");
            b.field::<String>("Password").skip();
        })
    }
}

#[test]
fn scalars_map_to_primitives() {
    let mut types = TypeSet::new();
    assert_eq!(types.of::<bool>(), TypeSet::BOOL);
    assert_eq!(types.of::<i32>(), TypeSet::INT);
    assert_eq!(types.of::<usize>(), TypeSet::UINT);
    assert_eq!(types.of::<f64>(), TypeSet::FLOAT);
    assert_eq!(types.of::<String>(), TypeSet::STRING);
    assert_eq!(types.of::<str>(), TypeSet::STRING);
    assert_eq!(types.of::<SystemTime>(), TypeSet::DATE_TIME);
}

#[test]
fn collections_share_structural_identity() {
    let mut types = TypeSet::new();
    let vec = types.of::<Vec<String>>();
    let slice = types.of::<[String]>();
    let array = types.of::<[String; 4]>();
    assert_eq!(vec, slice);
    assert_eq!(vec, array);
    assert_eq!(types.get(vec).shape, Shape::Sequence(TypeSet::STRING));

    let map = types.of::<HashMap<String, i64>>();
    assert_eq!(
        types.get(map).shape,
        Shape::Map {
            key: TypeSet::STRING,
            value: TypeSet::INT
        }
    );
}

#[test]
fn smart_pointers_are_pointers() {
    let mut types = TypeSet::new();
    let boxed = types.of::<Box<String>>();
    let optional = types.of::<Option<String>>();
    assert_eq!(boxed, optional);
    assert_eq!(types.get(boxed).shape, Shape::Pointer(TypeSet::STRING));
    assert_eq!(types.strip(boxed), TypeSet::STRING);
}

#[test]
fn struct_description_is_cached() {
    let mut types = TypeSet::new();
    let a = types.of::<Address>();
    let before = types.len();
    let b = types.of::<Address>();
    assert_eq!(a, b);
    assert_eq!(types.len(), before);
}

#[test]
fn self_referential_struct_terminates() {
    let mut types = TypeSet::new();
    let person = types.of::<Person>();
    let desc = types.get(person);

    assert_eq!(desc.name.as_deref(), Some("Person"));
    assert_eq!(desc.package, "models");
    assert_eq!(desc.members().len(), 5);

    let friends = &desc.members()[3];
    assert_eq!(types.get(friends.ty).shape, Shape::Sequence(person));
}

#[test]
fn builder_records_member_attributes() {
    let mut types = TypeSet::new();
    let person = types.of::<Person>();
    let members = types.get(person).members();

    assert!(members[0].embedded);
    assert_eq!(members[0].name, "Base");
    assert_eq!(members[1].attrs.rename.as_deref(), Some("name"));
    assert!(members[2].attrs.optional);
    assert!(members[4].attrs.skip);
}

#[test]
fn named_primitive_with_constants() {
    struct Level;

    impl Describe for Level {
        fn describe(types: &mut TypeSet) -> TypeId {
            let id = types.named_primitive("models", "Level", PrimitiveKind::Int);
            types.add_constant(id, crate::Constant::new("Low", 1));
            types.add_constant(id, crate::Constant::new("High", 2).with_comment("loud"));
            id
        }
    }

    let mut types = TypeSet::new();
    let level = types.of::<Level>();
    let desc = types.get(level);
    assert_eq!(desc.constants.len(), 2);
    assert_eq!(desc.constants[1].comment.as_deref(), Some("loud"));
}
