use crate::render::{Renderable, Renderer};

/// Line buffer several factories contribute to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDocumentation {
    lines: Vec<String>,
}

impl TestDocumentation {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn add_empty_line(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Remove the last line, if any.
    pub fn remove_line(&mut self) -> &mut Self {
        self.lines.pop();
        self
    }

    /// Prepend `text` to the last line.
    pub fn prepend(&mut self, text: &str) -> &mut Self {
        match self.lines.len() {
            0 => self,
            len => self.prepend_at(len - 1, text),
        }
    }

    /// Append `text` to the last line.
    pub fn append(&mut self, text: &str) -> &mut Self {
        match self.lines.len() {
            0 => self,
            len => self.append_at(len - 1, text),
        }
    }

    /// Prepend `text` to the line at `index`. Out of range is a no-op.
    pub fn prepend_at(&mut self, index: usize, text: &str) -> &mut Self {
        if let Some(line) = self.lines.get_mut(index) {
            line.insert_str(0, text);
        }
        self
    }

    /// Append `text` to the line at `index`. Out of range is a no-op.
    pub fn append_at(&mut self, index: usize, text: &str) -> &mut Self {
        if let Some(line) = self.lines.get_mut(index) {
            line.push_str(text);
        }
        self
    }
}

impl Renderable for TestDocumentation {
    fn accept(&self, renderer: &mut dyn Renderer) {
        renderer.visit_test_documentation(self);
    }
}
