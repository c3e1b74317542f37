use super::mock::MockGenerator;
use crate::error::Result;
use crate::model::TestClass;
use crate::reflection::ReflectedType;

/// Literal used for each built-in type. Unlisted built-ins get `null`.
const BUILT_IN_VALUES: &[(&str, &str)] = &[
    ("int", "42"),
    ("float", "42.42"),
    ("string", "'42'"),
    ("bool", "true"),
    ("callable", "function () {}"),
    ("array", "[]"),
    ("iterable", "[]"),
    ("object", "new \\stdClass()"),
];

/// Builds source expressions for parameter and return values.
pub struct ValueFactory {
    mocks: Box<dyn MockGenerator>,
}

impl ValueFactory {
    pub fn new(mocks: Box<dyn MockGenerator>) -> Self {
        Self { mocks }
    }

    pub fn mock_generator(&self) -> &dyn MockGenerator {
        self.mocks.as_ref()
    }

    /// Value for an optional type: `null` without a type, a literal for
    /// built-ins, a mock for anything else.
    pub fn make(&self, class: &mut TestClass, ty: Option<&ReflectedType>) -> Result<String> {
        let Some(ty) = ty else {
            return Ok("null".to_string());
        };

        if ty.is_self_reference() {
            let source = class.reflection().full_name();
            return self.mocks.generate_mock(class, &source);
        }

        if ty.is_builtin() {
            return Ok(built_in_value(ty.name()).unwrap_or("null").to_string());
        }

        self.mocks.generate_mock(class, ty.name())
    }
}

/// Literal for a built-in type name, if the table has one.
pub fn built_in_value(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    BUILT_IN_VALUES
        .iter()
        .find(|(ty, _)| *ty == lower)
        .map(|(_, value)| *value)
}

/// Whether values of this type are produced by the mock generator.
pub fn is_mocked(ty: &ReflectedType) -> bool {
    ty.is_self_reference() || !ty.is_builtin()
}
