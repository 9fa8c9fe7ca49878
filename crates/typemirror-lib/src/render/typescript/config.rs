//! Configuration types for TypeScript emission.

use crate::render::DEFAULT_INDENT;

/// Configuration for TypeScript emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether to export declarations and the namespace
    pub(crate) export: bool,
    /// One level of indentation
    pub(crate) indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to export declarations.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// Indent with `width` spaces per level.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Indent with tabs.
    pub fn tabs(mut self) -> Self {
        self.indent = "\t".to_string();
        self
    }
}
