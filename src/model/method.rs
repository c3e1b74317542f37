use super::{TestDocumentation, TestStatement};
use crate::reflection::Visibility;
use crate::render::{Renderable, Renderer};

/// A generated method. Test methods are public, fixtures are protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethod {
    name: String,
    visibility: Visibility,
    is_static: bool,
    documentation: Option<TestDocumentation>,
    statements: Vec<TestStatement>,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            documentation: None,
            statements: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_documentation(mut self, documentation: TestDocumentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn documentation(&self) -> Option<&TestDocumentation> {
        self.documentation.as_ref()
    }

    pub fn documentation_mut(&mut self) -> Option<&mut TestDocumentation> {
        self.documentation.as_mut()
    }

    pub fn set_documentation(&mut self, documentation: TestDocumentation) {
        self.documentation = Some(documentation);
    }

    pub fn statements(&self) -> &[TestStatement] {
        &self.statements
    }

    pub fn add_statement(&mut self, statement: TestStatement) -> &mut Self {
        self.statements.push(statement);
        self
    }

    /// The most recent statement, to extend it in place.
    pub fn last_statement_mut(&mut self) -> Option<&mut TestStatement> {
        self.statements.last_mut()
    }
}

impl Renderable for TestMethod {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_method(self);
    }
}
