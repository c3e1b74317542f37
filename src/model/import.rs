use crate::render::{Renderable, Renderer};

/// A `use` of an external type. The alias is only set when the short name
/// collides with another name in the same test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestImport {
    name: String,
    alias: Option<String>,
}

impl TestImport {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    /// Fully qualified name, without leading backslash.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn short_name(&self) -> &str {
        self.name.rsplit('\\').next().unwrap_or(&self.name)
    }

    /// Name to write in code: the alias when there is one.
    pub fn final_name(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| self.short_name())
    }
}

impl Renderable for TestImport {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_import(self);
    }
}
