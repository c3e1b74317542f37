use std::sync::Arc;

use crate::config::Config;
use crate::model::{TestClass, TestDocumentation, TestImport};

/// A type written in a `@var` line: a plain name or an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocType {
    Name(String),
    Import(Arc<TestImport>),
}

impl DocType {
    pub fn display_name(&self) -> &str {
        match self {
            DocType::Name(name) => name,
            DocType::Import(import) => import.final_name(),
        }
    }
}

pub trait DocumentationFactory: Send + Sync {
    fn make_for_class(&self, config: &Config, class: &TestClass) -> TestDocumentation;

    fn make_for_property(&self, types: &[DocType]) -> TestDocumentation;

    fn make_for_inherited_method(&self) -> TestDocumentation;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PhpDocumentationFactory;

impl PhpDocumentationFactory {
    /// Tags of the source class whose name is listed in `mergedPhpDoc`.
    fn merged_doc_lines(config: &Config, class: &TestClass) -> Vec<String> {
        class
            .reflection()
            .doc_block()
            .tags
            .iter()
            .filter(|tag| config.merged_php_doc().contains(&tag.name))
            .map(|tag| tag.render())
            .collect()
    }
}

impl DocumentationFactory for PhpDocumentationFactory {
    fn make_for_class(&self, config: &Config, class: &TestClass) -> TestDocumentation {
        let mut documentation = TestDocumentation::new(format!("Class {}.", class.short_name()));

        let mut lines: Vec<String> = Vec::new();
        for line in Self::merged_doc_lines(config, class)
            .into_iter()
            .chain(config.php_doc().iter().cloned())
        {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }

        // The tag block is framed by blank lines, but only when it exists.
        if !lines.is_empty() {
            documentation.add_empty_line();
            for line in lines {
                documentation.add_line(line);
            }
            documentation.add_empty_line();
        }

        documentation.add_line(format!("@covers \\{}", class.reflection().full_name()));
        documentation
    }

    fn make_for_property(&self, types: &[DocType]) -> TestDocumentation {
        let types = types
            .iter()
            .map(DocType::display_name)
            .collect::<Vec<_>>()
            .join("|");
        TestDocumentation::new(format!("@var {}", types))
    }

    fn make_for_inherited_method(&self) -> TestDocumentation {
        TestDocumentation::new("{@inheritdoc}")
    }
}
