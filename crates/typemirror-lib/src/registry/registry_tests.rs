use std::collections::HashMap;
use std::time::SystemTime;

use typemirror_core::{Constant, Describe, Member, PrimitiveKind, TypeId, TypeSet};

use crate::{Config, Error, Registry};

struct Address;

impl Describe for Address {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Address", |b| {
            b.field::<String>("City");
        })
    }
}

struct Person;

impl Describe for Person {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Person", |b| {
            b.field::<String>("Name");
            b.field::<Box<Address>>("Home");
        })
    }
}

struct Node;

impl Describe for Node {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("graph", "Node", |b| {
            b.field::<i64>("Value");
            b.field::<Option<Box<Node>>>("Next");
            b.field::<Vec<Node>>("Children");
            b.field::<HashMap<String, Node>>("ByName");
        })
    }
}

struct Parent;
struct Child;

impl Describe for Parent {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("family", "Parent", |b| {
            b.field::<Vec<Child>>("Kids");
        })
    }
}

impl Describe for Child {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("family", "Child", |b| {
            b.field::<Box<Parent>>("Parent");
        })
    }
}

struct Team;

impl Describe for Team {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Team", |b| {
            b.field::<Vec<Address>>("Offices");
            b.field::<HashMap<String, Vec<Address>>>("ByRegion");
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

struct Employee;

impl Describe for Employee {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Employee", |b| {
            b.embed::<Base>();
            b.field::<String>("Name");
        })
    }
}

struct Status;

impl Describe for Status {
    fn describe(types: &mut TypeSet) -> TypeId {
        let id = types.named_primitive("models", "Status", PrimitiveKind::String);
        types.add_constant(id, Constant::new("Active", "active"));
        types.add_constant(
            id,
            Constant::new("Gone", "gone").with_comment("no longer around"),
        );
        id
    }
}

struct Level;

impl Describe for Level {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.named_primitive("models", "Level", PrimitiveKind::Int)
    }
}

struct Account;

impl Describe for Account {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Account", |b| {
            b.field::<Status>("Status");
            b.field::<Level>("Level");
        })
    }
}

struct Holder;

impl Describe for Holder {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Holder", |b| {
            let meta = b
                .types()
                .anonymous_struct(vec![Member::new("Version", TypeSet::INT)]);
            b.field_of("meta", meta);
        })
    }
}

struct Event;

impl Describe for Event {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Event", |b| {
            b.field::<SystemTime>("At");
            b.field::<Vec<SystemTime>>("History");
        })
    }
}

struct Audited;

impl Describe for Audited {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Audited", |b| {
            b.embed::<Base>().skip();
            b.field::<Address>("Billing").skip();
            b.field::<String>("Name");
        })
    }
}

fn names(registry: &Registry) -> Vec<&str> {
    registry.declarations().map(|d| d.name.as_str()).collect()
}

#[test]
fn person_with_address_end_to_end() {
    let mut registry = Registry::default();
    registry.add::<Person>().unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r"
    // Code generated by typemirror. DO NOT EDIT.

    // models.Address
    export interface Address {
        City: string;
    }

    // models.Person
    export interface Person {
        Name: string;
        Home: Address;
    }
    ");
}

#[test]
fn adding_twice_returns_the_same_declaration() {
    let mut registry = Registry::default();
    let first = registry.add::<Person>().unwrap().clone();
    let second = registry.add::<Person>().unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(registry.len(), 2);
}

#[test]
fn add_value_resolves_to_type() {
    let mut registry = Registry::default();
    registry.add_value(&Address).unwrap();
    registry.add::<Address>().unwrap();

    assert_eq!(names(&registry), ["Address"]);
}

#[test]
fn self_reference_terminates() {
    let mut registry = Registry::default();
    let decl = registry.add::<Node>().unwrap();

    let fields: Vec<&str> = decl.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["Value", "Next", "Children", "ByName"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn mutual_reference_terminates() {
    let mut registry = Registry::default();
    registry.add::<Parent>().unwrap();

    assert_eq!(names(&registry), ["Child", "Parent"]);
}

#[test]
fn same_roots_same_order() {
    let run = || {
        let mut registry = Registry::default();
        registry.add::<Parent>().unwrap();
        registry.add::<Person>().unwrap();
        registry.add::<Node>().unwrap();
        registry.render_to_string().unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn containers_are_never_declared() {
    let mut registry = Registry::default();
    registry.add::<Team>().unwrap();

    assert_eq!(names(&registry), ["Address", "Team"]);
}

#[test]
fn embedded_aggregate_becomes_extends() {
    let mut registry = Registry::default();
    let decl = registry.add::<Employee>().unwrap();

    assert_eq!(decl.inherited(), ["Base"]);
    let fields: Vec<&str> = decl.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["Name"]);
    assert_eq!(names(&registry), ["Base", "Employee"]);
}

#[test]
fn legacy_embedding_records_name_only() {
    let config = Config::new().register_embedded(false);
    let mut registry = Registry::with_config(TypeSet::new(), config);
    let decl = registry.add::<Employee>().unwrap();

    assert_eq!(decl.inherited(), ["Base"]);
    assert_eq!(names(&registry), ["Employee"]);
}

#[test]
fn skipped_members_are_never_walked() {
    let mut registry = Registry::default();
    let decl = registry.add::<Audited>().unwrap();

    assert!(decl.inherited().is_empty());
    let fields: Vec<&str> = decl.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["Name"]);
    assert_eq!(names(&registry), ["Audited"]);
}

#[test]
fn date_time_is_inlined_as_string() {
    let mut registry = Registry::default();
    registry.add::<Event>().unwrap();

    assert_eq!(names(&registry), ["Event"]);
    let ts = registry.render_to_string().unwrap();
    insta::assert_snapshot!(ts, @r"
    // Code generated by typemirror. DO NOT EDIT.

    // models.Event
    export interface Event {
        At: string;
        History: string[];
    }
    ");
}

#[test]
fn named_primitive_with_constants_is_enumeration() {
    let mut registry = Registry::default();
    registry.add::<Account>().unwrap();

    let status = registry.declarations().next().unwrap();
    assert!(status.is_enumeration());
    let members: Vec<&str> = status.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(members, ["Active", "Gone"]);
    assert_eq!(names(&registry), ["Status", "Account"]);

    let ts = registry.render_to_string().unwrap();
    insta::assert_snapshot!(ts, @r#"
    // Code generated by typemirror. DO NOT EDIT.

    // models.Status
    export enum Status {
        Active = "active",
        Gone = "gone", // no longer around
    }

    // models.Account
    export interface Account {
        Status: Status;
        Level: number;
    }
    "#);
}

#[test]
fn enum_source_can_be_replaced() {
    let mut registry = Registry::default().enum_source(|types: &TypeSet, ty: TypeId| {
        if types.get(ty).name.as_deref() == Some("Level") {
            vec![Constant::new("Low", 1), Constant::new("High", 2)]
        } else {
            Vec::new()
        }
    });
    registry.add::<Account>().unwrap();

    assert_eq!(names(&registry), ["Level", "Account"]);
}

#[test]
fn enumeration_root_with_namespace_override() {
    let mut registry = Registry::default();
    let decl = registry
        .add_enumeration_of::<Status>(Some("AccountStatus"), Some("api"))
        .unwrap();

    assert_eq!(decl.name, "AccountStatus");
    assert_eq!(decl.origin.qualified(), "api.Status");
    assert_eq!(decl.members().len(), 2);
}

#[test]
fn anonymous_struct_uses_contextual_name() {
    let mut registry = Registry::default();
    registry.add::<Holder>().unwrap();

    assert_eq!(names(&registry), ["MetaHolder", "Holder"]);
    let meta = registry.declarations().next().unwrap();
    assert_eq!(meta.origin.qualified(), "MetaHolder");
}

#[test]
fn custom_type_is_never_declared() {
    let config = Config::new().custom_type("models.Address", "string");
    let mut registry = Registry::with_config(TypeSet::new(), config);
    registry.add::<Person>().unwrap();

    assert_eq!(names(&registry), ["Person"]);
    let ts = registry.render_to_string().unwrap();
    assert!(ts.contains("    Home: string;\n"));
}

#[test]
fn unnamed_root_needs_a_name() {
    let mut registry = Registry::default();
    let err = registry.add::<Vec<String>>().unwrap_err();
    assert!(matches!(err, Error::UnnamedType(_)));

    let decl = registry.add_named::<Vec<String>>("Names").unwrap();
    assert_eq!(decl.name, "Names");
    assert!(decl.fields().is_empty());
}

#[test]
fn foreign_type_id_is_rejected() {
    let mut other = TypeSet::new();
    let foreign = other.declare_struct("elsewhere", "Thing");

    let mut registry = Registry::default();
    let err = registry.add_type(foreign, None).unwrap_err();
    assert!(matches!(err, Error::UnknownType(id) if id == foreign));
}

#[test]
fn lookup_strips_pointers() {
    let mut registry = Registry::default();
    registry.add::<Person>().unwrap();

    let boxed = registry.types_mut().of::<Box<Address>>();
    assert_eq!(registry.lookup(boxed).unwrap().name, "Address");
}

#[test]
fn generate_file_writes_rendered_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.ts");

    let mut registry = Registry::default();
    registry.add::<Person>().unwrap();
    registry.generate_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, registry.render_to_string().unwrap());
}

#[test]
fn generate_file_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("types.ts");

    let mut registry = Registry::default();
    registry.add::<Person>().unwrap();
    let err = registry.generate_file(&path).unwrap_err();

    match err {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn render_writes_to_any_sink() {
    let mut registry = Registry::default();
    registry.add::<Address>().unwrap();

    let mut sink: Vec<u8> = Vec::new();
    registry.render(&mut sink).unwrap();
    assert_eq!(
        String::from_utf8(sink).unwrap(),
        registry.render_to_string().unwrap()
    );
}
