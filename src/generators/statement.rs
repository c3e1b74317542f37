use crate::model::TestStatement;

/// Builds the recurring statement shapes of generated tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatementFactory;

impl StatementFactory {
    /// `$this->name = value` for fixture properties, `$name = value` for locals.
    pub fn make_affect(&self, name: &str, value: &str, is_property: bool) -> TestStatement {
        if is_property {
            TestStatement::assignment(format!("$this->{} = {}", name, value))
        } else {
            TestStatement::assignment(format!("${} = {}", name, value))
        }
    }

    /// `$this->assert{Kind}(args...)`, e.g. `make_assert("same", &[a, b])`.
    pub fn make_assert(&self, kind: &str, arguments: &[&str]) -> TestStatement {
        TestStatement::assertion(format!(
            "$this->assert{}({})",
            ucfirst(kind),
            arguments.join(", ")
        ))
    }

    pub fn make_todo(&self, text: &str) -> TestStatement {
        TestStatement::raw(format!("/** @todo {} */", text))
    }

    pub fn make_incomplete(&self) -> TestStatement {
        TestStatement::expression("$this->markTestIncomplete()")
    }
}

pub fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lcfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
