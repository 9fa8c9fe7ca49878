use super::run_common::{SchemaInput, load_schema};

pub struct CheckArgs {
    pub input: SchemaInput,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    load_schema(&args.input, args.strict, args.color);

    // Silent on success (like cargo check)
}
