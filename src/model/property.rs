use super::TestDocumentation;
use crate::render::{Renderable, Renderer};

/// A fixture property of the generated test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestProperty {
    name: String,
    types: Vec<String>,
    documentation: Option<TestDocumentation>,
}

impl TestProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            documentation: None,
        }
    }

    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    pub fn with_documentation(mut self, documentation: TestDocumentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display names of the declared types.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn documentation(&self) -> Option<&TestDocumentation> {
        self.documentation.as_ref()
    }

    pub fn set_documentation(&mut self, documentation: TestDocumentation) {
        self.documentation = Some(documentation);
    }
}

impl Renderable for TestProperty {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_property(self);
    }
}
