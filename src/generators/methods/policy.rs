use std::sync::Arc;

use super::{
    add_fixture_property, bind_parameters, test_method_name, tested_property_name,
    BasicMethodFactory, MethodFactory,
};
use crate::error::{GenerateError, Result};
use crate::generators::documentation::DocType;
use crate::generators::Factories;
use crate::model::{TestClass, TestImport, TestMethod, TestStatement};
use crate::reflection::ReflectedMethod;

pub const DEFAULT_USER_MODEL: &str = "App\\User";

/// Strategy for Laravel authorization policies.
///
/// Each ability gets a denied and an authorized test checking
/// `$this->user->can(...)`. The first parameter of an ability is the user
/// and is never bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolicyMethodFactory {
    basic: BasicMethodFactory,
}

impl PolicyMethodFactory {
    fn user_import(tools: &Factories, class: &mut TestClass) -> Result<Arc<TestImport>> {
        let user: String = tools
            .config
            .get_option("laravel.user", DEFAULT_USER_MODEL.to_string())?;
        tools.imports.make(class, &user)
    }

    fn add_policy_test(
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
        expected: &str,
        suffix: &str,
    ) -> Result<()> {
        let mut test = TestMethod::new(test_method_name(method, suffix));
        let arguments = bind_parameters(tools, class, &mut test, method, 1)?;

        let arguments = match arguments.len() {
            0 => {
                let full_name = class.reflection().full_name();
                let tested = tools.imports.make(class, &full_name)?;
                format!("[{}::class]", tested.final_name())
            }
            1 => arguments.join(""),
            _ => format!("[{}]", arguments.join(", ")),
        };

        let check = format!("$this->user->can('{}', {})", method.name, arguments);
        test.add_statement(tools.statements.make_assert(expected, &[&check]));

        class.add_method(test)
    }
}

impl MethodFactory for PolicyMethodFactory {
    fn name(&self) -> &'static str {
        "policy"
    }

    fn make_set_up(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod> {
        let mut method = self.basic.make_set_up(tools, class)?;

        let full_name = class.reflection().full_name();
        let tested = tools.imports.make(class, &full_name)?;
        let user = Self::user_import(tools, class)?;
        if !add_fixture_property(tools, class, "user", &[DocType::Import(Arc::clone(&user))]) {
            return Err(GenerateError::unsupported_member(
                "__construct",
                "parameter user collides with the policy user fixture",
            ));
        }

        method
            .add_statement(TestStatement::empty())
            .add_statement(TestStatement::expression(format!(
                "$this->app->instance({}::class, $this->{})",
                tested.final_name(),
                tested_property_name(class.reflection())
            )))
            .add_statement(TestStatement::empty())
            .add_statement(tools.statements.make_affect(
                "user",
                &format!("new {}()", user.final_name()),
                true,
            ));

        Ok(method)
    }

    fn make_testable(
        &self,
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
    ) -> Result<()> {
        if self.is_getter_or_setter(tools, class, method) {
            return self.basic.make_testable(tools, class, method);
        }

        if method.is_static {
            return Err(GenerateError::unsupported_member(
                &method.name,
                "policy method cannot be static",
            ));
        }

        Self::add_policy_test(tools, class, method, "false", "WhenUnauthorized")?;
        Self::add_policy_test(tools, class, method, "true", "WhenAuthorized")
    }
}
