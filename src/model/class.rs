use std::sync::Arc;

use super::{TestDocumentation, TestImport, TestMethod, TestProperty};
use crate::error::{GenerateError, Result};
use crate::reflection::ReflectedClass;
use crate::render::{Renderable, Renderer};

/// Root of the model for one generation run.
#[derive(Debug, Clone)]
pub struct TestClass {
    reflection: Arc<ReflectedClass>,
    name: String,
    namespace: String,
    extends: Option<String>,
    documentation: Option<TestDocumentation>,
    imports: Vec<Arc<TestImport>>,
    properties: Vec<TestProperty>,
    methods: Vec<TestMethod>,
}

impl TestClass {
    pub fn new(
        reflection: Arc<ReflectedClass>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            reflection,
            name: name.into(),
            namespace: namespace.into(),
            extends: None,
            documentation: None,
            imports: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// The source class this test class exercises.
    pub fn reflection(&self) -> &Arc<ReflectedClass> {
        &self.reflection
    }

    pub fn short_name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Display name of the base test case, once imported.
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    pub fn set_extends(&mut self, extends: impl Into<String>) {
        self.extends = Some(extends.into());
    }

    pub fn documentation(&self) -> Option<&TestDocumentation> {
        self.documentation.as_ref()
    }

    pub fn set_documentation(&mut self, documentation: TestDocumentation) {
        self.documentation = Some(documentation);
    }

    pub fn imports(&self) -> &[Arc<TestImport>] {
        &self.imports
    }

    /// Cached import for a fully qualified name. Class names are
    /// case-insensitive, so `App\Bar` and `app\bar` share one import.
    pub fn import(&self, name: &str) -> Option<&Arc<TestImport>> {
        self.imports
            .iter()
            .find(|i| i.name().eq_ignore_ascii_case(name))
    }

    /// Whether `name` is already used as a display name in this file, either
    /// by an import or by the test class itself. Case-insensitive like the
    /// target language.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .imports
                .iter()
                .any(|i| i.final_name().eq_ignore_ascii_case(name))
    }

    pub fn add_import(&mut self, import: Arc<TestImport>) {
        self.imports.push(import);
    }

    pub fn properties(&self) -> &[TestProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&TestProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Add a property unless one with the same name exists. Returns whether
    /// it was added.
    pub fn add_property(&mut self, property: TestProperty) -> bool {
        if self.property(property.name()).is_some() {
            return false;
        }
        self.properties.push(property);
        true
    }

    pub fn methods(&self) -> &[TestMethod] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&TestMethod> {
        self.methods
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Add a method; method names are unique within a class.
    pub fn add_method(&mut self, method: TestMethod) -> Result<()> {
        if self.method(method.name()).is_some() {
            return Err(GenerateError::unsupported_member(
                method.name(),
                "a test method with this name already exists",
            ));
        }
        self.methods.push(method);
        Ok(())
    }
}

impl Renderable for TestClass {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_class(self);
    }
}
