//! TypeScript output: `export interface` and `export enum` declarations.

mod config;
mod emitter;
mod syntax;

#[cfg(test)]
mod emitter_tests;

pub use config::Config;
pub use emitter::TypeScript;
pub use syntax::{is_identifier, property_name, type_text};
