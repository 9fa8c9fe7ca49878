use std::collections::HashMap;
use std::fmt::{self, Write};

use typemirror_core::{Constant, Describe, Member, PrimitiveKind, TypeId, TypeSet};

use super::{Config, TypeScript};
use crate::Registry;
use crate::registry::Config as RegistryConfig;
use crate::render::{OutputAssembler, RenderContext};

struct Address;

impl Describe for Address {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("models", "Address", |b| {
            b.field::<String>("City");
        })
    }
}

struct Marker;

impl Describe for Marker {
    fn describe(types: &mut TypeSet) -> TypeId {
        types.build_struct::<Self>("users", "Marker", |_| {})
    }
}

struct Profile;

impl Describe for Profile {
    fn describe(types: &mut TypeSet) -> TypeId {
        let id = types.build_struct::<Self>("users", "Profile", |b| {
            b.embed::<Marker>();
            b.field::<String>("display-name")
                .optional()
                .doc("Shown name.");
            b.field::<Vec<String>>("Tags");
            b.field::<HashMap<u32, bool>>("Flags");
        });
        types.set_doc(id, "A user profile.\nShown publicly.");
        id
    }
}

fn status_types() -> (TypeSet, TypeId) {
    let mut types = TypeSet::new();
    let status = types.named_primitive("models", "Status", PrimitiveKind::String);
    types.add_constant(status, Constant::new("Active", "active"));
    types.add_constant(status, Constant::new("in-review", "review"));
    (types, status)
}

#[test]
fn docs_optional_and_extends() {
    let mut registry = Registry::default();
    registry.add::<Profile>().unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r#"
    // Code generated by typemirror. DO NOT EDIT.

    // users.Marker
    export interface Marker {}

    /**
     * A user profile.
     * Shown publicly.
     */
    // users.Profile
    export interface Profile extends Marker {
        /** Shown name. */
        "display-name"?: string;
        Tags: string[];
        Flags: { [key: number]: boolean };
    }
    "#);
}

#[test]
fn only_enumerations_key_records() {
    let (mut types, status) = status_types();
    let office = types.declare_struct("models", "Office");
    types.set_members(office, vec![Member::new("City", TypeSet::STRING)]);
    let by_status = types.map(status, office);
    let by_office = types.map(office, TypeSet::INT);
    let directory = types.declare_struct("models", "Directory");
    types.set_members(
        directory,
        vec![
            Member::new("ByStatus", by_status),
            Member::new("ByOffice", by_office),
        ],
    );
    let mut registry = Registry::new(types);
    registry.add_type(directory, None).unwrap();

    let ts = registry.render_to_string().unwrap();

    assert!(ts.contains("    ByStatus: Record<Status, Office>;\n"), "{ts}");
    assert!(ts.contains("    ByOffice: { [key: string]: number };\n"), "{ts}");
}

#[test]
fn namespace_wraps_and_indents() {
    let config = RegistryConfig::new().namespace("api");
    let mut registry = Registry::with_config(TypeSet::new(), config);
    registry.add::<Address>().unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r"
    // Code generated by typemirror. DO NOT EDIT.

    export namespace api {
        // models.Address
        export interface Address {
            City: string;
        }
    }
    ");
}

#[test]
fn without_export_or_header() {
    let config = RegistryConfig::new().header("");
    let mut registry = Registry::with_config(TypeSet::new(), config)
        .assembler(TypeScript::new(Config::new().export(false)));
    registry.add::<Address>().unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r"
    // models.Address
    interface Address {
        City: string;
    }
    ");
}

#[test]
fn enum_in_namespace_with_custom_indent() {
    let (types, status) = status_types();
    let config = RegistryConfig::new().namespace("api").header("");
    let mut registry = Registry::with_config(types, config)
        .assembler(TypeScript::new(Config::new().indent(2)));
    registry.add_enumeration(status, None, None).unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r#"
    export namespace api {
      // models.Status
      export enum Status {
        Active = "active",
        "in-review" = "review",
      }
    }
    "#);
}

#[test]
fn numeric_enum_comments_stay_on_one_line() {
    let mut types = TypeSet::new();
    let priority = types.named_primitive("", "Priority", PrimitiveKind::Int);
    types.add_constant(
        priority,
        Constant::new("Low", 1).with_comment("default\n   for new tickets"),
    );
    types.add_constant(priority, Constant::new("High", 10));
    let config = RegistryConfig::new().header("");
    let mut registry = Registry::with_config(types, config);
    registry.add_enumeration(priority, None, None).unwrap();

    let ts = registry.render_to_string().unwrap();

    insta::assert_snapshot!(ts, @r"
    // Priority
    export enum Priority {
        Low = 1, // default for new tickets
        High = 10,
    }
    ");
}

#[test]
fn render_with_overrides_registry_assembler() {
    let config = RegistryConfig::new().header("");
    let mut registry = Registry::with_config(TypeSet::new(), config);
    registry.add::<Address>().unwrap();

    let plain = TypeScript::new(Config::new().export(false).indent(1));
    let mut out = Vec::new();
    registry.render_with(&plain, &mut out).unwrap();

    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
    // models.Address
    interface Address {
     City: string;
    }
    ");
}

struct Listing;

impl OutputAssembler for Listing {
    fn assemble(&self, cx: &RenderContext<'_>, out: &mut String) -> fmt::Result {
        for decl in cx.declarations() {
            writeln!(out, "{} {}", decl.kind_name(), decl.name)?;
        }
        Ok(())
    }
}

#[test]
fn custom_assembler_sees_declarations_in_order() {
    let mut registry = Registry::default().assembler(Listing);
    registry.add::<Profile>().unwrap();

    let listing = registry.render_to_string().unwrap();

    assert_eq!(listing, "interface Marker\ninterface Profile\n");
}
