//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("typemirror")
        .about("TypeScript declarations from a type graph")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(list_command())
        .subcommand(check_command())
}

/// Arguments that shape the registry, shared by generate and list.
fn with_registry_args(cmd: Command) -> Command {
    cmd.arg(schema_paths_arg())
        .arg(schema_text_arg())
        .arg(root_arg())
        .arg(namespace_arg())
        .arg(legacy_embedding_arg())
        .arg(map_arg())
        .arg(color_arg())
}

/// Render TypeScript declarations.
pub fn generate_command() -> Command {
    let cmd = Command::new("generate")
        .about("Render TypeScript declarations for a schema")
        .override_usage(
            "\
  typemirror generate <SCHEMA>...
  typemirror generate -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  typemirror generate models.tm                    # all roots, to stdout
  typemirror generate schema/ -o api.d.ts          # directory of .tm files
  typemirror generate models.tm --root Person      # Person and what it reaches
  typemirror generate models.tm --namespace api --indent 2
  typemirror generate models.tm --map time.Time=string
  typemirror generate -s 'struct A { B: [int] }'   # inline schema"#,
        );

    with_registry_args(cmd)
        .arg(header_arg())
        .arg(no_export_arg())
        .arg(indent_arg())
        .arg(output_file_arg())
}

/// List declarations in discovery order.
pub fn list_command() -> Command {
    let cmd = Command::new("list")
        .about("List declarations in discovery order")
        .after_help(
            r#"EXAMPLES:
  typemirror list models.tm
  typemirror list models.tm --root Person --json"#,
        );

    with_registry_args(cmd).arg(json_arg())
}

/// Validate a schema.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a schema")
        .after_help(
            r#"EXAMPLES:
  typemirror check models.tm          # silent on success
  typemirror check schema/ --strict   # warnings fail too"#,
        )
        .arg(schema_paths_arg())
        .arg(schema_text_arg())
        .arg(strict_arg())
        .arg(color_arg())
}
