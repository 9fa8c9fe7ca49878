use std::io;
use std::path::PathBuf;

use log::info;
use typemirror_lib::TypeScript;
use typemirror_lib::render::typescript::Config as TsConfig;

use super::run_common::{RegistryOptions, SchemaInput, build_registry, load_schema};

pub struct GenerateArgs {
    pub input: SchemaInput,
    pub registry: RegistryOptions,
    pub header: Option<String>,
    pub export: bool,
    /// Spaces per level; zero selects tabs.
    pub indent: Option<u8>,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let schema = load_schema(&args.input, false, args.color);
    let mut registry = build_registry(&schema, &args.registry, args.header.as_deref())
        .assembler(TypeScript::new(typescript_config(&args)));

    if registry.is_empty() {
        eprintln!("error: schema has no struct or enum to generate");
        std::process::exit(1);
    }

    match &args.output {
        Some(path) => registry.must_generate_file(path),
        None => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = registry.render(&mut stdout) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
            info!("rendered {} declaration(s) to stdout", registry.len());
        }
    }
}

pub fn typescript_config(args: &GenerateArgs) -> TsConfig {
    let config = TsConfig::new().export(args.export);
    match args.indent {
        Some(0) => config.tabs(),
        Some(width) => config.indent(usize::from(width)),
        None => config,
    }
}
