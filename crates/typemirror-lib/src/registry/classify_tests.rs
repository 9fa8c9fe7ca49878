use typemirror_core::{Member, TypeSet};

use super::classify;

#[test]
fn plain_member() {
    let types = TypeSet::new();
    let member = Member::new("Name", TypeSet::STRING);

    let field = classify(&types, &member, "Person");

    assert_eq!(field.name, "Name");
    assert_eq!(field.ty, TypeSet::STRING);
    assert_eq!(field.contextual_name, "NamePerson");
    assert!(!field.omitted);
    assert!(!field.anonymous);
    assert!(!field.optional);
    assert_eq!(field.doc, None);
}

#[test]
fn rename_changes_display_name_only() {
    let types = TypeSet::new();
    let mut member = Member::new("meta", TypeSet::ANY);
    member.rename("metadata");

    let field = classify(&types, &member, "Post");

    assert_eq!(field.name, "metadata");
    assert_eq!(field.contextual_name, "MetaPost");
}

#[test]
fn attributes_carry_over() {
    let types = TypeSet::new();
    let mut member = Member::new("Secret", TypeSet::STRING);
    member.skip().optional().doc("never shown");

    let field = classify(&types, &member, "User");

    assert!(field.omitted);
    assert!(field.optional);
    assert_eq!(field.doc.as_deref(), Some("never shown"));
}

#[test]
fn contextual_name_looks_through_containers() {
    let mut types = TypeSet::new();
    let address = types.declare_struct("models", "Address");
    let ptr = types.pointer(address);
    let seq = types.sequence(ptr);
    let map = types.map(TypeSet::STRING, seq);

    let field = classify(&types, &Member::new("Homes", map), "Person");

    assert_eq!(field.contextual_name, "Address");
}

#[test]
fn embedded_member_is_anonymous() {
    let mut types = TypeSet::new();
    let base = types.declare_struct("models", "Base");

    let field = classify(&types, &Member::embedded("Base", base), "User");

    assert!(field.anonymous);
    assert_eq!(field.name, "Base");
}
