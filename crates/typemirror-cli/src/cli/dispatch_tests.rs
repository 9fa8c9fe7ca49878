//! Tests for CLI dispatch: flags parse into the expected params.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, generate_command, list_command};
use crate::commands::generate::GenerateArgs;

#[test]
fn generate_collects_registry_flags() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "models.tm",
            "extra/",
            "--root",
            "Person",
            "--root",
            "models.Status",
            "--namespace",
            "api",
            "--legacy-embedding",
            "--map",
            "time.Time=string",
            "--map",
            "big.Int=bigint",
        ])
        .unwrap();

    let params = GenerateParams::from_matches(&m);

    assert_eq!(
        params.schema_paths,
        [PathBuf::from("models.tm"), PathBuf::from("extra/")]
    );
    assert_eq!(params.roots, ["Person", "models.Status"]);
    assert_eq!(params.namespace.as_deref(), Some("api"));
    assert!(params.legacy_embedding);
    assert_eq!(
        params.mappings,
        [
            ("time.Time".to_string(), "string".to_string()),
            ("big.Int".to_string(), "bigint".to_string()),
        ]
    );
}

#[test]
fn generate_output_flags_convert_to_args() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "models.tm",
            "--header",
            "",
            "--no-export",
            "--indent",
            "2",
            "-o",
            "api.d.ts",
            "--color",
            "never",
        ])
        .unwrap();

    let args: GenerateArgs = GenerateParams::from_matches(&m).into();

    assert_eq!(args.header.as_deref(), Some(""));
    assert!(!args.export);
    assert_eq!(args.indent, Some(2));
    assert_eq!(args.output, Some(PathBuf::from("api.d.ts")));
    assert!(!args.color);
    assert!(args.registry.register_embedded);
    assert!(args.registry.roots.is_empty());
}

#[test]
fn generate_defaults() {
    let m = generate_command()
        .try_get_matches_from(["generate", "models.tm"])
        .unwrap();

    let params = GenerateParams::from_matches(&m);

    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(params.header, None);
    assert_eq!(params.indent, None);
    assert!(!params.no_export);
    assert!(params.mappings.is_empty());
}

#[test]
fn inline_schema_replaces_paths() {
    let m = generate_command()
        .try_get_matches_from(["generate", "-s", "struct A {}"])
        .unwrap();

    let params = GenerateParams::from_matches(&m);

    assert!(params.schema_paths.is_empty());
    assert_eq!(params.schema_text.as_deref(), Some("struct A {}"));
}

#[test]
fn inline_schema_conflicts_with_paths() {
    let result = generate_command().try_get_matches_from(["generate", "a.tm", "-s", "x"]);

    assert!(result.is_err());
}

#[test]
fn schema_is_required() {
    let result = check_command().try_get_matches_from(["check"]);

    assert!(result.is_err());
}

#[test]
fn malformed_mapping_is_rejected() {
    for bad in ["time.Time", "=string", "time.Time="] {
        let result =
            generate_command().try_get_matches_from(["generate", "a.tm", "--map", bad]);
        assert!(result.is_err(), "accepted --map {bad}");
    }
}

#[test]
fn indent_is_bounded() {
    let result =
        generate_command().try_get_matches_from(["generate", "a.tm", "--indent", "40"]);

    assert!(result.is_err());
}

#[test]
fn list_json_flag() {
    let m = list_command()
        .try_get_matches_from(["list", "models.tm", "--json", "--color", "always"])
        .unwrap();

    let params = ListParams::from_matches(&m);

    assert!(params.json);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn list_rejects_output_flags() {
    let result = list_command().try_get_matches_from(["list", "models.tm", "--no-export"]);

    assert!(result.is_err());
}

#[test]
fn check_strict_flag() {
    let m = check_command()
        .try_get_matches_from(["check", "schema/", "--strict"])
        .unwrap();

    let params = CheckParams::from_matches(&m);

    assert!(params.strict);
    assert_eq!(params.schema_paths, [PathBuf::from("schema/")]);
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["typemirror", "check", "models.tm", "-vv"])
        .unwrap();

    assert_eq!(m.get_count("verbose"), 2);
}

#[test]
fn verbosity_maps_to_log_levels() {
    let levels: Vec<&str> = (0..5).map(log_level).collect();

    assert_eq!(levels, ["warn", "info", "debug", "trace", "trace"]);
}
