//! Shared logic for generate, list and check.

use std::path::PathBuf;

use log::{debug, info};
use typemirror_lib::schema::Root;
use typemirror_lib::{Config, Registry, Schema};

use super::schema_loader::load_schema_sources;

/// Where the schema text comes from.
pub struct SchemaInput {
    pub paths: Vec<PathBuf>,
    pub text: Option<String>,
}

/// Options that shape discovery.
pub struct RegistryOptions {
    /// Bare or package-qualified root names; empty selects every root.
    pub roots: Vec<String>,
    pub namespace: Option<String>,
    pub register_embedded: bool,
    /// Qualified type name -> verbatim TypeScript
    pub mappings: Vec<(String, String)>,
}

/// Load and validate a schema, exiting with its diagnostics when invalid.
///
/// With `strict`, warnings fail too. Warnings of a valid schema are printed
/// to stderr.
pub fn load_schema(input: &SchemaInput, strict: bool, color: bool) -> Schema {
    let sources = load_schema_sources(&input.paths, input.text.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });
    debug!("loaded {} schema source(s)", sources.len());

    let schema = Schema::load(sources);
    let diagnostics = schema.diagnostics();
    let failed = !schema.is_valid() || (strict && diagnostics.has_warnings());

    if failed {
        eprint!(
            "{}",
            diagnostics
                .filtered()
                .render_colored(schema.sources(), color)
        );
        std::process::exit(1);
    }
    if diagnostics.has_warnings() {
        eprint!("{}", diagnostics.render_colored(schema.sources(), color));
    }

    info!(
        "schema has {} root(s) across {} file(s)",
        schema.roots().len(),
        schema.files().len()
    );
    schema
}

/// Registry configuration from CLI options, plus an optional header override.
pub fn registry_config(options: &RegistryOptions, header: Option<&str>) -> Config {
    let mut config = Config::new().register_embedded(options.register_embedded);
    if let Some(namespace) = &options.namespace {
        config = config.namespace(namespace);
    }
    for (name, ts) in &options.mappings {
        config = config.custom_type(name, ts);
    }
    if let Some(header) = header {
        config = config.header(header);
    }
    config
}

/// Pick the roots named on the command line, in schema order.
pub fn select_roots(schema: &Schema, names: &[String]) -> Result<Vec<Root>, String> {
    if names.is_empty() {
        return Ok(schema.roots().to_vec());
    }

    let mut selected = Vec::new();
    for name in names {
        let mut matched = schema.roots_named(name).peekable();
        if matched.peek().is_none() {
            return Err(format!("no struct or enum named '{}'", name));
        }
        for root in matched {
            if !selected.contains(root) {
                selected.push(*root);
            }
        }
    }
    Ok(selected)
}

/// Register the selected roots, exiting on failure.
pub fn build_registry(
    schema: &Schema,
    options: &RegistryOptions,
    header: Option<&str>,
) -> Registry {
    let roots = select_roots(schema, &options.roots).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });
    let config = registry_config(options, header);

    schema.registry_for(config, &roots).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
