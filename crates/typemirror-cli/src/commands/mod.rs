pub mod check;
pub mod generate;
pub mod list;
pub mod run_common;
pub mod schema_loader;

#[cfg(test)]
mod schema_loader_tests;
