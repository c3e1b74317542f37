//! Strategies that populate a `TestClass` with fixtures and member tests.

mod basic;
mod delegate;
mod policy;

pub use basic::BasicMethodFactory;
pub use delegate::{method_factory_from_config, ClassPredicate, DelegateMethodFactory};
pub use policy::PolicyMethodFactory;

use super::documentation::DocType;
use super::statement::{lcfirst, ucfirst};
use super::Factories;
use crate::error::Result;
use crate::model::{TestClass, TestMethod, TestProperty, TestStatement};
use crate::reflection::{ReflectedClass, ReflectedMethod, ReflectedType, Visibility};

/// Builds the fixture methods and the tests of one member.
///
/// Every variant works on an explicit `TestClass` and the per-run
/// `Factories`; implementations keep no state between calls.
pub trait MethodFactory: Send + Sync {
    /// Short name used in logs and by `generateWith`.
    fn name(&self) -> &'static str;

    fn make_set_up(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod>;

    /// `tearDown` unsets every fixture property of `class`.
    fn make_tear_down(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod> {
        Ok(tear_down(tools, class))
    }

    /// Add one or more test methods exercising `method` to `class`.
    fn make_testable(
        &self,
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
    ) -> Result<()>;

    fn is_getter_or_setter(
        &self,
        tools: &Factories,
        class: &TestClass,
        method: &ReflectedMethod,
    ) -> bool {
        tools.accessors.is_getter_or_setter(class.reflection(), method)
    }
}

/// `test{Member}{suffix}`.
pub fn test_method_name(method: &ReflectedMethod, suffix: &str) -> String {
    format!("test{}{}", ucfirst(&method.name), suffix)
}

/// Name of the fixture property holding the tested instance.
pub fn tested_property_name(reflection: &ReflectedClass) -> String {
    lcfirst(reflection.short_name())
}

/// Test that only carries a `@todo` and marks itself incomplete.
pub fn make_incomplete(
    tools: &Factories,
    class: &mut TestClass,
    method: &ReflectedMethod,
) -> Result<()> {
    let mut test = TestMethod::new(test_method_name(method, ""));
    test.add_statement(tools.statements.make_todo("This test is incomplete."))
        .add_statement(tools.statements.make_incomplete());
    class.add_method(test)
}

fn tear_down(tools: &Factories, class: &TestClass) -> TestMethod {
    let mut method = TestMethod::new("tearDown")
        .with_visibility(Visibility::Protected)
        .with_documentation(tools.documentation.make_for_inherited_method());
    method.add_statement(TestStatement::expression("parent::tearDown()"));

    if !class.properties().is_empty() {
        method.add_statement(TestStatement::empty());
    }
    for property in class.properties() {
        method.add_statement(TestStatement::expression(format!(
            "unset($this->{})",
            property.name()
        )));
    }

    method
}

/// Types documenting a value of `ty`: the type itself, plus the mock type
/// when the value is a mock.
pub(crate) fn doc_types(
    tools: &Factories,
    class: &mut TestClass,
    ty: Option<&ReflectedType>,
) -> Result<Vec<DocType>> {
    let Some(ty) = ty else {
        return Ok(vec![DocType::Name("mixed".to_string())]);
    };

    if !ty.is_self_reference() && ty.is_builtin() {
        return Ok(vec![DocType::Name(ty.name().to_string())]);
    }

    let name = if ty.is_self_reference() {
        class.reflection().full_name()
    } else {
        ty.name().to_string()
    };
    let import = tools.imports.make(class, &name)?;
    let mock = tools.values.mock_generator().mock_type(class)?;

    Ok(vec![DocType::Import(import), DocType::Import(mock)])
}

/// Add a documented fixture property. Returns false when the name is taken.
pub(crate) fn add_fixture_property(
    tools: &Factories,
    class: &mut TestClass,
    name: &str,
    types: &[DocType],
) -> bool {
    let property = TestProperty::new(name)
        .with_types(types.iter().map(|t| t.display_name().to_string()).collect())
        .with_documentation(tools.documentation.make_for_property(types));
    class.add_property(property)
}

/// Assign each parameter to a local, followed by a blank line when any was
/// bound. Returns the argument list.
pub(crate) fn bind_parameters(
    tools: &Factories,
    class: &mut TestClass,
    test: &mut TestMethod,
    method: &ReflectedMethod,
    skip: usize,
) -> Result<Vec<String>> {
    let mut arguments = Vec::new();

    for parameter in method.parameters.iter().skip(skip) {
        let ty = method.parameter_type(parameter);
        let value = tools.values.make(class, ty.as_ref())?;
        test.add_statement(tools.statements.make_affect(&parameter.name, &value, false));
        arguments.push(format!("${}", parameter.name));
    }

    if !arguments.is_empty() {
        test.add_statement(TestStatement::empty());
    }

    Ok(arguments)
}
