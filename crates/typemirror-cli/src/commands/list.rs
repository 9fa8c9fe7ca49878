use std::fmt::Write;

use typemirror_core::Colors;
use typemirror_lib::Registry;

use super::run_common::{RegistryOptions, SchemaInput, build_registry, load_schema};

pub struct ListArgs {
    pub input: SchemaInput,
    pub registry: RegistryOptions,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: ListArgs) {
    let schema = load_schema(&args.input, false, args.color);
    let registry = build_registry(&schema, &args.registry, None);

    if args.json {
        let declarations: Vec<_> = registry.declarations().collect();
        match serde_json::to_string_pretty(&declarations) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", format_listing(&registry, Colors::new(args.color)));
}

/// One line per declaration: `index kind name origin`.
pub fn format_listing(registry: &Registry, colors: Colors) -> String {
    let mut out = String::new();
    for (index, decl) in registry.declarations().enumerate() {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            colors.paint(colors.muted, &format!("{index:>3}")),
            colors.paint(colors.keyword, &format!("{:<9}", decl.kind_name())),
            colors.paint(colors.name, &decl.name),
            colors.paint(colors.muted, &decl.origin.qualified()),
        );
    }
    out
}
