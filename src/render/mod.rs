//! Output side of the pipeline.
//!
//! Renderers walk a finished model through shared references only, so any
//! number of them can target the same `TestClass` without affecting
//! generation.

pub mod outline;
pub mod php;

pub use outline::OutlineRenderer;
pub use php::PhpRenderer;

use crate::model::{
    TestClass, TestDocumentation, TestImport, TestMethod, TestProperty, TestStatement,
};

/// Visitor with one operation per model node kind.
pub trait Renderer {
    fn visit_test_class(&mut self, class: &TestClass);

    fn visit_test_import(&mut self, import: &TestImport);

    fn visit_test_documentation(&mut self, documentation: &TestDocumentation);

    fn visit_test_property(&mut self, property: &TestProperty);

    fn visit_test_method(&mut self, method: &TestMethod);

    fn visit_test_statement(&mut self, statement: &TestStatement);
}

/// A model node that dispatches itself to the matching visit operation.
pub trait Renderable {
    fn accept(&self, renderer: &mut dyn Renderer);
}
