use super::{Renderable, Renderer};
use crate::model::{
    TestClass, TestDocumentation, TestImport, TestMethod, TestProperty, TestStatement,
};

/// Structural summary of a test class, one node per line.
#[derive(Debug, Default)]
pub struct OutlineRenderer {
    lines: Vec<String>,
    statements: usize,
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(class: &TestClass) -> String {
        let mut renderer = Self::new();
        class.accept(&mut renderer);
        renderer.into_output()
    }

    pub fn into_output(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

impl Renderer for OutlineRenderer {
    fn visit_test_class(&mut self, class: &TestClass) {
        let full_name = if class.namespace().is_empty() {
            class.short_name().to_string()
        } else {
            format!("{}\\{}", class.namespace(), class.short_name())
        };
        match class.extends() {
            Some(parent) => self.lines.push(format!("class {} extends {}", full_name, parent)),
            None => self.lines.push(format!("class {}", full_name)),
        }

        for import in class.imports() {
            import.accept(self);
        }
        for property in class.properties() {
            property.accept(self);
        }
        for method in class.methods() {
            method.accept(self);
        }
    }

    fn visit_test_import(&mut self, import: &TestImport) {
        match import.alias() {
            Some(alias) => self.lines.push(format!("  import {} as {}", import.name(), alias)),
            None => self.lines.push(format!("  import {}", import.name())),
        }
    }

    fn visit_test_documentation(&mut self, _documentation: &TestDocumentation) {}

    fn visit_test_property(&mut self, property: &TestProperty) {
        if property.types().is_empty() {
            self.lines.push(format!("  property {}", property.name()));
        } else {
            self.lines.push(format!(
                "  property {}: {}",
                property.name(),
                property.types().join("|")
            ));
        }
    }

    fn visit_test_method(&mut self, method: &TestMethod) {
        self.statements = 0;
        for statement in method.statements() {
            statement.accept(self);
        }
        self.lines.push(format!(
            "  method {} ({}, {} statement(s))",
            method.name(),
            method.visibility(),
            self.statements
        ));
    }

    fn visit_test_statement(&mut self, statement: &TestStatement) {
        if !statement.is_empty() {
            self.statements += 1;
        }
    }
}
