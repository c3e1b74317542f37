use super::{Renderable, Renderer};
use crate::model::{
    TestClass, TestDocumentation, TestImport, TestMethod, TestProperty, TestStatement,
};

const INDENT: &str = "    ";

/// Renders a test class as PHP source.
#[derive(Debug, Default)]
pub struct PhpRenderer {
    lines: Vec<String>,
    depth: usize,
}

impl PhpRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole class to a source string.
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

    fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), text));
        }
    }
}

impl Renderer for PhpRenderer {
    fn visit_test_class(&mut self, class: &TestClass) {
        self.line("<?php");
        self.line("");

        if !class.namespace().is_empty() {
            self.line(&format!("namespace {};", class.namespace()));
            self.line("");
        }

        let mut imports: Vec<&TestImport> = class.imports().iter().map(|i| i.as_ref()).collect();
        imports.sort_by_key(|i| i.name().to_ascii_lowercase());
        for import in &imports {
            import.accept(self);
        }
        if !imports.is_empty() {
            self.line("");
        }

        if let Some(documentation) = class.documentation() {
            documentation.accept(self);
        }

        match class.extends() {
            Some(parent) => self.line(&format!("class {} extends {}", class.short_name(), parent)),
            None => self.line(&format!("class {}", class.short_name())),
        }
        self.line("{");
        self.depth += 1;

        let mut first = true;
        for property in class.properties() {
            if !first {
                self.line("");
            }
            first = false;
            property.accept(self);
        }
        for method in class.methods() {
            if !first {
                self.line("");
            }
            first = false;
            method.accept(self);
        }

        self.depth -= 1;
        self.line("}");
    }

    fn visit_test_import(&mut self, import: &TestImport) {
        match import.alias() {
            Some(alias) => self.line(&format!("use {} as {};", import.name(), alias)),
            None => self.line(&format!("use {};", import.name())),
        }
    }

    fn visit_test_documentation(&mut self, documentation: &TestDocumentation) {
        self.line("/**");
        for line in documentation.lines() {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {}", line));
            }
        }
        self.line(" */");
    }

    fn visit_test_property(&mut self, property: &TestProperty) {
        if let Some(documentation) = property.documentation() {
            documentation.accept(self);
        }
        self.line(&format!("protected ${};", property.name()));
    }

    fn visit_test_method(&mut self, method: &TestMethod) {
        if let Some(documentation) = method.documentation() {
            documentation.accept(self);
        }

        let modifier = if method.is_static() { " static" } else { "" };
        self.line(&format!(
            "{}{} function {}(): void",
            method.visibility(),
            modifier,
            method.name()
        ));
        self.line("{");
        self.depth += 1;
        for statement in method.statements() {
            statement.accept(self);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn visit_test_statement(&mut self, statement: &TestStatement) {
        if statement.is_terminated() {
            self.line(&format!("{};", statement.text()));
        } else {
            self.line(statement.text());
        }
    }
}
