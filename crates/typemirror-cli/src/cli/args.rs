//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema files or directories (positional, one or more).
pub fn schema_paths_arg() -> Arg {
    Arg::new("schema_paths")
        .value_name("SCHEMA")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required_unless_present("schema_text")
        .help("Schema files or directories of .tm files (`-` reads stdin)")
}

/// Inline schema text (-s/--schema).
pub fn schema_text_arg() -> Arg {
    Arg::new("schema_text")
        .short('s')
        .long("schema")
        .value_name("TEXT")
        .conflicts_with("schema_paths")
        .help("Inline schema text")
}

/// Wrap declarations in a namespace (--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .long("namespace")
        .value_name("NAME")
        .help("Wrap all declarations in `export namespace NAME`")
}

/// Header line (--header).
pub fn header_arg() -> Arg {
    Arg::new("header")
        .long("header")
        .value_name("TEXT")
        .help("Header written above the declarations (empty disables it)")
}

/// Don't export declarations (--no-export).
pub fn no_export_arg() -> Arg {
    Arg::new("no_export")
        .long("no-export")
        .action(ArgAction::SetTrue)
        .help("Don't export declarations")
}

/// Indent width (--indent).
pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .value_name("N")
        .value_parser(value_parser!(u8).range(0..=16))
        .help("Spaces per indent level, 0 for tabs (default: 4)")
}

/// Don't declare embedded structs on their own (--legacy-embedding).
pub fn legacy_embedding_arg() -> Arg {
    Arg::new("legacy_embedding")
        .long("legacy-embedding")
        .action(ArgAction::SetTrue)
        .help("Don't declare embedded structs on their own (no `extends`)")
}

/// Custom type mapping (--map NAME=TS), repeatable.
pub fn map_arg() -> Arg {
    Arg::new("map")
        .long("map")
        .value_name("NAME=TS")
        .value_parser(parse_mapping)
        .action(ArgAction::Append)
        .help("Render the qualified type NAME as the TypeScript text TS")
}

fn parse_mapping(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, ts)) if !name.is_empty() && !ts.is_empty() => {
            Ok((name.to_string(), ts.to_string()))
        }
        _ => Err(format!("expected NAME=TS, got '{value}'")),
    }
}

/// Restrict roots (--root NAME), repeatable.
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Only register this root (bare or package-qualified), repeatable")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// JSON listing (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print declarations as JSON")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log verbosity (-v info, -vv debug, -vvv trace)")
}
