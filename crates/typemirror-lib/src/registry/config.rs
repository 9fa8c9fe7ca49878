//! Registry configuration.

use indexmap::IndexMap;

/// Default file header placed above the generated declarations.
pub const DEFAULT_HEADER: &str = "// Code generated by typemirror. DO NOT EDIT.";

/// Configuration for type discovery.
#[derive(Clone, Debug)]
pub struct Config {
    /// Namespace wrapping the whole output
    pub(crate) namespace: Option<String>,
    /// Register embedded aggregates so `extends` targets always exist
    pub(crate) register_embedded: bool,
    /// Qualified type name -> verbatim TypeScript text
    pub(crate) custom_types: IndexMap<String, String>,
    /// Text placed at the top of the output
    pub(crate) header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            register_embedded: true,
            custom_types: IndexMap::new(),
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the output in `namespace <name> { ... }`.
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.namespace = (!name.is_empty()).then_some(name);
        self
    }

    /// Set whether embedded aggregates are registered along with the type
    /// embedding them.
    ///
    /// When disabled, only the embedded type's name is recorded and the type
    /// is declared only if some other path reaches it.
    pub fn register_embedded(mut self, value: bool) -> Self {
        self.register_embedded = value;
        self
    }

    /// Render the type `qualified_name` (`package.Name`) as `ts` and never
    /// declare it.
    pub fn custom_type(mut self, qualified_name: impl Into<String>, ts: impl Into<String>) -> Self {
        self.custom_types.insert(qualified_name.into(), ts.into());
        self
    }

    /// Set the file header text. An empty header is omitted.
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.header = text.into();
        self
    }

    pub fn get_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn get_header(&self) -> &str {
        &self.header
    }

    pub fn custom_types(&self) -> &IndexMap<String, String> {
        &self.custom_types
    }

    pub fn registers_embedded(&self) -> bool {
        self.register_embedded
    }
}
