//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but keep the raw clap values
//! (`ColorChoice`, repeated flags). The `Into<*Args>` impls resolve them.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::list::ListArgs;
use crate::commands::run_common::{RegistryOptions, SchemaInput};

pub struct GenerateParams {
    pub schema_paths: Vec<PathBuf>,
    pub schema_text: Option<String>,
    pub roots: Vec<String>,
    pub namespace: Option<String>,
    pub legacy_embedding: bool,
    pub mappings: Vec<(String, String)>,
    pub header: Option<String>,
    pub no_export: bool,
    pub indent: Option<u8>,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            // Schema input
            schema_paths: schema_paths(m),
            schema_text: m.get_one::<String>("schema_text").cloned(),

            // Registry
            roots: strings(m, "root"),
            namespace: m.get_one::<String>("namespace").cloned(),
            legacy_embedding: m.get_flag("legacy_embedding"),
            mappings: mappings(m),

            // TypeScript
            header: m.get_one::<String>("header").cloned(),
            no_export: m.get_flag("no_export"),
            indent: m.get_one::<u8>("indent").copied(),

            // Output
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            input: SchemaInput {
                paths: p.schema_paths,
                text: p.schema_text,
            },
            registry: RegistryOptions {
                roots: p.roots,
                namespace: p.namespace,
                register_embedded: !p.legacy_embedding,
                mappings: p.mappings,
            },
            header: p.header,
            export: !p.no_export,
            indent: p.indent,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ListParams {
    pub schema_paths: Vec<PathBuf>,
    pub schema_text: Option<String>,
    pub roots: Vec<String>,
    pub namespace: Option<String>,
    pub legacy_embedding: bool,
    pub mappings: Vec<(String, String)>,
    pub json: bool,
    pub color: ColorChoice,
}

impl ListParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_paths: schema_paths(m),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            roots: strings(m, "root"),
            namespace: m.get_one::<String>("namespace").cloned(),
            legacy_embedding: m.get_flag("legacy_embedding"),
            mappings: mappings(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<ListParams> for ListArgs {
    fn from(p: ListParams) -> Self {
        Self {
            input: SchemaInput {
                paths: p.schema_paths,
                text: p.schema_text,
            },
            registry: RegistryOptions {
                roots: p.roots,
                namespace: p.namespace,
                register_embedded: !p.legacy_embedding,
                mappings: p.mappings,
            },
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub schema_paths: Vec<PathBuf>,
    pub schema_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_paths: schema_paths(m),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: SchemaInput {
                paths: p.schema_paths,
                text: p.schema_text,
            },
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn schema_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("schema_paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn mappings(m: &ArgMatches) -> Vec<(String, String)> {
    m.get_many::<(String, String)>("map")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
