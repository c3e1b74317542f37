use crate::render::{Renderable, Renderer};

/// Structural role of a statement. Everything but `Raw` is terminated by the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Written verbatim: comments, blank lines.
    Raw,
    Assignment,
    Assertion,
    /// A bare call whose result is discarded.
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestStatement {
    kind: StatementKind,
    text: String,
}

impl TestStatement {
    pub fn new(kind: StatementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(StatementKind::Raw, text)
    }

    /// A blank separator line.
    pub fn empty() -> Self {
        Self::raw("")
    }

    pub fn assignment(text: impl Into<String>) -> Self {
        Self::new(StatementKind::Assignment, text)
    }

    pub fn assertion(text: impl Into<String>) -> Self {
        Self::new(StatementKind::Assertion, text)
    }

    pub fn expression(text: impl Into<String>) -> Self {
        Self::new(StatementKind::Expression, text)
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Extend the statement text.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    pub fn is_terminated(&self) -> bool {
        self.kind != StatementKind::Raw
    }
}

impl Renderable for TestStatement {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_statement(self);
    }
}
