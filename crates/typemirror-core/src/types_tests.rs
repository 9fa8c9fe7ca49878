use crate::{Constant, Literal, Member, PrimitiveKind, Shape, TypeSet};

#[test]
fn new_set_has_primitives() {
    let types = TypeSet::new();
    assert_eq!(types.len(), PrimitiveKind::ALL.len());
    assert_eq!(types.get(TypeSet::BOOL).primitive(), Some(PrimitiveKind::Bool));
    assert_eq!(types.get(TypeSet::STRING).primitive(), Some(PrimitiveKind::String));
    assert_eq!(
        types.get(TypeSet::DATE_TIME).primitive(),
        Some(PrimitiveKind::DateTime)
    );
    assert_eq!(types.get(TypeSet::ANY).primitive(), Some(PrimitiveKind::Any));
}

#[test]
fn primitive_lookup_hits_prepopulated() {
    let mut types = TypeSet::new();
    assert_eq!(types.primitive(PrimitiveKind::Int), TypeSet::INT);
    assert_eq!(types.primitive(PrimitiveKind::Float), TypeSet::FLOAT);
    assert_eq!(types.len(), PrimitiveKind::ALL.len());
}

#[test]
fn structural_shapes_are_interned() {
    let mut types = TypeSet::new();
    let a = types.sequence(TypeSet::STRING);
    let b = types.sequence(TypeSet::STRING);
    let c = types.sequence(TypeSet::INT);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let m1 = types.map(TypeSet::STRING, TypeSet::INT);
    let m2 = types.map(TypeSet::STRING, TypeSet::INT);
    assert_eq!(m1, m2);
}

#[test]
fn anonymous_structs_with_same_members_share_identity() {
    let mut types = TypeSet::new();
    let a = types.anonymous_struct(vec![Member::new("Version", TypeSet::INT)]);
    let b = types.anonymous_struct(vec![Member::new("Version", TypeSet::INT)]);
    let c = types.anonymous_struct(vec![Member::new("Revision", TypeSet::INT)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(!types.get(a).is_named());
}

#[test]
fn declare_struct_is_idempotent() {
    let mut types = TypeSet::new();
    let a = types.declare_struct("models", "Person");
    let b = types.declare_struct("models", "Person");
    let other = types.declare_struct("billing", "Person");
    assert_eq!(a, b);
    assert_ne!(a, other);
    assert_eq!(types.lookup("models", "Person"), Some(a));
    assert_eq!(types.find("Person").collect::<Vec<_>>(), vec![a, other]);
}

#[test]
fn set_members_only_touches_named_structs() {
    let mut types = TypeSet::new();
    let person = types.declare_struct("models", "Person");
    types.set_members(person, vec![Member::new("Name", TypeSet::STRING)]);
    assert_eq!(types.get(person).members().len(), 1);

    let anon = types.anonymous_struct(Vec::new());
    types.set_members(anon, vec![Member::new("Name", TypeSet::STRING)]);
    assert!(types.get(anon).members().is_empty());

    let status = types.named_primitive("models", "Status", PrimitiveKind::String);
    types.set_members(status, vec![Member::new("Name", TypeSet::STRING)]);
    assert_eq!(types.get(status).shape, Shape::Primitive(PrimitiveKind::String));
}

#[test]
fn strip_follows_pointer_chain() {
    let mut types = TypeSet::new();
    let person = types.declare_struct("models", "Person");
    let p1 = types.pointer(person);
    let p2 = types.pointer(p1);
    assert_eq!(types.strip(p2), person);
    assert_eq!(types.strip(person), person);
}

#[test]
fn constants_attach_to_named_primitives_only() {
    let mut types = TypeSet::new();
    let status = types.named_primitive("models", "Status", PrimitiveKind::String);
    types.add_constant(status, Constant::new("Active", "active"));
    types.add_constant(TypeSet::STRING, Constant::new("Ignored", "x"));

    assert_eq!(types.get(status).constants.len(), 1);
    assert!(types.get(TypeSet::STRING).constants.is_empty());
}

#[test]
fn qualified_names() {
    let mut types = TypeSet::new();
    let person = types.declare_struct("models", "Person");
    let local = types.declare_struct("", "Local");
    assert_eq!(types.qualified_name(person).as_deref(), Some("models.Person"));
    assert_eq!(types.qualified_name(local).as_deref(), Some("Local"));
    assert_eq!(types.qualified_name(TypeSet::STRING), None);
}

#[test]
fn literal_fits_kind() {
    assert!(Literal::from("a").fits(PrimitiveKind::String));
    assert!(!Literal::from("a").fits(PrimitiveKind::Int));
    assert!(Literal::from(3).fits(PrimitiveKind::Int));
    assert!(Literal::from(3).fits(PrimitiveKind::UInt));
    assert!(!Literal::from(-3).fits(PrimitiveKind::UInt));
    assert!(Literal::from(1.5).fits(PrimitiveKind::Float));
    assert!(!Literal::from(1.5).fits(PrimitiveKind::Int));
}

#[test]
fn keyword_roundtrip() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
    }
    assert_eq!(PrimitiveKind::from_keyword("double"), None);
}

#[test]
fn literal_serializes_untagged() {
    let json = serde_json::to_string(&vec![
        Literal::from("active"),
        Literal::from(2),
        Literal::from(1.5),
    ])
    .unwrap();
    assert_eq!(json, r#"["active",2,1.5]"#);
}
