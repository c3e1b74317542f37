use std::sync::Arc;

use tracing::debug;

use super::{
    add_fixture_property, bind_parameters, doc_types, test_method_name, tested_property_name,
    MethodFactory,
};
use crate::error::Result;
use crate::generators::accessor::{Accessor, AccessorKind};
use crate::generators::documentation::DocType;
use crate::generators::value::built_in_value;
use crate::generators::Factories;
use crate::model::{TestClass, TestImport, TestMethod, TestStatement};
use crate::reflection::{ReflectedMethod, ReflectedType, Visibility};

/// Default strategy: instantiate the tested class in `setUp` and write one
/// test per member.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicMethodFactory;

impl BasicMethodFactory {
    fn tested_import(tools: &Factories, class: &mut TestClass) -> Result<Arc<TestImport>> {
        let full_name = class.reflection().full_name();
        tools.imports.make(class, &full_name)
    }

    /// `$this->foo->bar(args)`, or `Foo::bar(args)` for static members.
    fn call(
        tested: &TestImport,
        class: &TestClass,
        method: &ReflectedMethod,
        arguments: &[String],
    ) -> String {
        let target = if method.is_static {
            format!("{}::", tested.final_name())
        } else {
            format!("$this->{}->", tested_property_name(class.reflection()))
        };
        format!("{}{}({})", target, method.name, arguments.join(", "))
    }

    fn make_accessor_test(
        &self,
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
        accessor: &Accessor,
    ) -> Result<()> {
        let reflection = Arc::clone(class.reflection());
        let tested = Self::tested_import(tools, class)?;
        let reflection_class = tools.imports.make(class, "ReflectionClass")?;

        let property_type = reflection
            .property(&accessor.property)
            .and_then(|p| p.effective_type());
        let ty = match accessor.kind {
            AccessorKind::Getter => property_type,
            AccessorKind::Setter => method
                .parameters
                .first()
                .and_then(|p| method.parameter_type(p))
                .or(property_type),
        };

        let mut test = TestMethod::new(test_method_name(method, ""));
        let expected = tools.values.make(class, ty.as_ref())?;
        let instance = if method.is_static {
            "null".to_string()
        } else {
            format!("$this->{}", tested_property_name(&reflection))
        };

        test.add_statement(tools.statements.make_affect("expected", &expected, false))
            .add_statement(tools.statements.make_affect(
                "property",
                &format!(
                    "(new {}({}::class))->getProperty('{}')",
                    reflection_class.final_name(),
                    tested.final_name(),
                    accessor.property
                ),
                false,
            ))
            .add_statement(TestStatement::expression("$property->setAccessible(true)"));

        match accessor.kind {
            AccessorKind::Getter => {
                test.add_statement(TestStatement::expression(format!(
                    "$property->setValue({}, $expected)",
                    instance
                )))
                .add_statement(TestStatement::empty())
                .add_statement(tools.statements.make_assert(
                    "same",
                    &["$expected", &Self::call(&tested, class, method, &[])],
                ));
            }
            AccessorKind::Setter => {
                let getter = if method.is_static {
                    "$property->getValue()".to_string()
                } else {
                    format!("$property->getValue({})", instance)
                };
                test.add_statement(TestStatement::expression(Self::call(
                    &tested,
                    class,
                    method,
                    &["$expected".to_string()],
                )))
                .add_statement(TestStatement::empty())
                .add_statement(tools.statements.make_assert("same", &["$expected", &getter]));
            }
        }

        class.add_method(test)
    }

    fn make_call_test(
        &self,
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
    ) -> Result<()> {
        let tested = Self::tested_import(tools, class)?;
        let mut test = TestMethod::new(test_method_name(method, ""));

        let arguments = bind_parameters(tools, class, &mut test, method, 0)?;
        let call = Self::call(&tested, class, method, &arguments);
        let statements = &tools.statements;

        let Some(ty) = method.effective_return_type() else {
            test.add_statement(statements.make_assert("null", &[&call]));
            return class.add_method(test);
        };

        if is_void(&ty) {
            test.add_statement(TestStatement::expression(call))
                .add_statement(TestStatement::empty())
                .add_statement(statements.make_todo("This test is incomplete."))
                .add_statement(statements.make_incomplete());
        } else if ty.is_self_reference() {
            let expected = format!("{}::class", tested.final_name());
            test.add_statement(statements.make_assert("instanceOf", &[&expected, &call]));
        } else if !ty.is_builtin() {
            let import = tools.imports.make(class, ty.name())?;
            let expected = format!("{}::class", import.final_name());
            test.add_statement(statements.make_assert("instanceOf", &[&expected, &call]));
        } else {
            match ty.name().to_ascii_lowercase().as_str() {
                "bool" | "true" => {
                    test.add_statement(statements.make_assert("true", &[&call]));
                }
                "false" => {
                    test.add_statement(statements.make_assert("false", &[&call]));
                }
                "callable" => {
                    test.add_statement(statements.make_assert("isCallable", &[&call]));
                }
                "object" => {
                    test.add_statement(statements.make_assert("isObject", &[&call]));
                }
                name => match built_in_value(name) {
                    Some(value) => {
                        test.add_statement(statements.make_affect("expected", value, false))
                            .add_statement(TestStatement::empty())
                            .add_statement(statements.make_assert("same", &["$expected", &call]));
                    }
                    None => {
                        test.add_statement(statements.make_assert("null", &[&call]));
                    }
                },
            }
        }

        class.add_method(test)
    }
}

fn is_void(ty: &ReflectedType) -> bool {
    matches!(ty.name().to_ascii_lowercase().as_str(), "void" | "never")
}

impl MethodFactory for BasicMethodFactory {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn make_set_up(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod> {
        let reflection = Arc::clone(class.reflection());
        let tested = Self::tested_import(tools, class)?;
        let tested_property = tested_property_name(&reflection);
        add_fixture_property(
            tools,
            class,
            &tested_property,
            &[DocType::Import(Arc::clone(&tested))],
        );

        let mut method = TestMethod::new("setUp")
            .with_visibility(Visibility::Protected)
            .with_documentation(tools.documentation.make_for_inherited_method());
        method
            .add_statement(TestStatement::expression("parent::setUp()"))
            .add_statement(TestStatement::empty());

        let mut arguments = Vec::new();
        if let Some(constructor) = reflection.constructor() {
            for parameter in &constructor.parameters {
                let ty = constructor.parameter_type(parameter);
                let value = tools.values.make(class, ty.as_ref())?;
                let types = doc_types(tools, class, ty.as_ref())?;
                if !add_fixture_property(tools, class, &parameter.name, &types) {
                    debug!(
                        "Fixture property {} already exists in {}",
                        parameter.name,
                        class.short_name()
                    );
                }

                method.add_statement(tools.statements.make_affect(&parameter.name, &value, true));
                arguments.push(format!("$this->{}", parameter.name));
            }
        }

        method.add_statement(tools.statements.make_affect(
            &tested_property,
            &format!("new {}({})", tested.final_name(), arguments.join(", ")),
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
        match tools.accessors.classify(class.reflection(), method) {
            Some(accessor) => self.make_accessor_test(tools, class, method, &accessor),
            None => self.make_call_test(tools, class, method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::reflection::{ReflectedClass, ReflectedParameter, ReflectedProperty};

    fn tools() -> Factories {
        Factories::from_config(Arc::new(Config::default())).unwrap()
    }

    fn class(reflection: ReflectedClass) -> TestClass {
        let name = format!("{}Test", reflection.short_name());
        TestClass::new(Arc::new(reflection), name, "Tests\\App")
    }

    fn statements(class: &TestClass, method: &str) -> Vec<String> {
        class
            .method(method)
            .unwrap()
            .statements()
            .iter()
            .map(|s| s.text().to_string())
            .collect()
    }

    fn test_for(method: ReflectedMethod) -> Vec<String> {
        let tools = tools();
        let mut class = class(ReflectedClass::new("Foo", "App").with_method(method.clone()));
        BasicMethodFactory
            .make_testable(&tools, &mut class, &method)
            .unwrap();
        statements(&class, &test_method_name(&method, ""))
    }

    #[test]
    fn test_set_up_with_constructor_parameters() {
        let tools = tools();
        let mut class = class(
            ReflectedClass::new("Foo", "App").with_method(
                ReflectedMethod::new("__construct")
                    .with_parameter(ReflectedParameter::new("bar", Some("App\\Bar")))
                    .with_parameter(ReflectedParameter::new("count", Some("int"))),
            ),
        );

        let method = BasicMethodFactory.make_set_up(&tools, &mut class).unwrap();
        let texts: Vec<&str> = method.statements().iter().map(|s| s.text()).collect();
        assert_eq!(
            texts,
            [
                "parent::setUp()",
                "",
                "$this->bar = $this->createMock(Bar::class)",
                "$this->count = 42",
                "$this->foo = new Foo($this->bar, $this->count)",
            ]
        );
        assert_eq!(method.visibility(), Visibility::Protected);

        let names: Vec<&str> = class.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["foo", "bar", "count"]);
        assert_eq!(
            class.property("bar").unwrap().documentation().unwrap().lines(),
            ["@var Bar|MockObject"]
        );
        assert_eq!(
            class.property("foo").unwrap().documentation().unwrap().lines(),
            ["@var Foo"]
        );
    }

    #[test]
    fn test_set_up_without_constructor() {
        let tools = tools();
        let mut class = class(ReflectedClass::new("Foo", "App"));

        let method = BasicMethodFactory.make_set_up(&tools, &mut class).unwrap();
        let last = method.statements().last().unwrap();
        assert_eq!(last.text(), "$this->foo = new Foo()");
        assert_eq!(class.properties().len(), 1);
    }

    #[test]
    fn test_void_method_is_called_and_marked_incomplete() {
        let texts = test_for(ReflectedMethod::new("run").with_return_type("void"));
        assert_eq!(
            texts,
            [
                "$this->foo->run()",
                "",
                "/** @todo This test is incomplete. */",
                "$this->markTestIncomplete()",
            ]
        );
    }

    #[test]
    fn test_bool_method_asserts_true() {
        let texts = test_for(
            ReflectedMethod::new("check")
                .with_parameter(ReflectedParameter::new("value", Some("string")))
                .with_return_type("bool"),
        );
        assert_eq!(
            texts,
            ["$value = '42'", "", "$this->assertTrue($this->foo->check($value))"]
        );
    }

    #[test]
    fn test_literal_return_asserts_same() {
        let texts = test_for(ReflectedMethod::new("count").with_return_type("int"));
        assert_eq!(
            texts,
            [
                "$expected = 42",
                "",
                "$this->assertSame($expected, $this->foo->count())",
            ]
        );
    }

    #[test]
    fn test_untyped_and_mixed_return_asserts_null() {
        assert_eq!(
            test_for(ReflectedMethod::new("raw")),
            ["$this->assertNull($this->foo->raw())"]
        );
        assert_eq!(
            test_for(ReflectedMethod::new("any").with_return_type("mixed")),
            ["$this->assertNull($this->foo->any())"]
        );
    }

    #[test]
    fn test_callable_and_object_returns() {
        assert_eq!(
            test_for(ReflectedMethod::new("handler").with_return_type("callable")),
            ["$this->assertIsCallable($this->foo->handler())"]
        );
        assert_eq!(
            test_for(ReflectedMethod::new("data").with_return_type("object")),
            ["$this->assertIsObject($this->foo->data())"]
        );
    }

    #[test]
    fn test_named_return_asserts_instance_of() {
        assert_eq!(
            test_for(ReflectedMethod::new("mailer").with_return_type("App\\Services\\Mailer")),
            ["$this->assertInstanceOf(Mailer::class, $this->foo->mailer())"]
        );
        assert_eq!(
            test_for(ReflectedMethod::new("copy").with_return_type("self")),
            ["$this->assertInstanceOf(Foo::class, $this->foo->copy())"]
        );
    }

    #[test]
    fn test_static_member_is_called_on_class() {
        let texts = test_for(
            ReflectedMethod::new("make")
                .with_static(true)
                .with_return_type("static"),
        );
        assert_eq!(texts, ["$this->assertInstanceOf(Foo::class, Foo::make())"]);
    }

    #[test]
    fn test_return_type_from_doc_block() {
        let texts = test_for(
            ReflectedMethod::new("enabled").with_doc_comment("/** @return bool|null */"),
        );
        assert_eq!(texts, ["$this->assertTrue($this->foo->enabled())"]);
    }

    #[test]
    fn test_getter_uses_reflection() {
        let tools = tools();
        let getter = ReflectedMethod::new("getName").with_return_type("string");
        let mut class = class(
            ReflectedClass::new("Foo", "App")
                .with_property(ReflectedProperty::new("name", Some("string")))
                .with_method(getter.clone()),
        );

        BasicMethodFactory
            .make_testable(&tools, &mut class, &getter)
            .unwrap();

        assert_eq!(
            statements(&class, "testGetName"),
            [
                "$expected = '42'",
                "$property = (new ReflectionClass(Foo::class))->getProperty('name')",
                "$property->setAccessible(true)",
                "$property->setValue($this->foo, $expected)",
                "",
                "$this->assertSame($expected, $this->foo->getName())",
            ]
        );
        assert!(class.import("ReflectionClass").is_some());
    }

    #[test]
    fn test_setter_uses_reflection() {
        let tools = tools();
        let setter = ReflectedMethod::new("setBar")
            .with_parameter(ReflectedParameter::new("bar", Some("App\\Bar")));
        let mut class = class(
            ReflectedClass::new("Foo", "App")
                .with_property(ReflectedProperty::new("bar", None))
                .with_method(setter.clone()),
        );

        BasicMethodFactory
            .make_testable(&tools, &mut class, &setter)
            .unwrap();

        assert_eq!(
            statements(&class, "testSetBar"),
            [
                "$expected = $this->createMock(Bar::class)",
                "$property = (new ReflectionClass(Foo::class))->getProperty('bar')",
                "$property->setAccessible(true)",
                "$this->foo->setBar($expected)",
                "",
                "$this->assertSame($expected, $property->getValue($this->foo))",
            ]
        );
    }

    #[test]
    fn test_static_getter() {
        let tools = tools();
        let getter = ReflectedMethod::new("getCount").with_static(true);
        let mut class = class(
            ReflectedClass::new("Foo", "App")
                .with_property(ReflectedProperty::new("count", Some("int")).with_static(true))
                .with_method(getter.clone()),
        );

        BasicMethodFactory
            .make_testable(&tools, &mut class, &getter)
            .unwrap();

        let texts = statements(&class, "testGetCount");
        assert_eq!(texts[3], "$property->setValue(null, $expected)");
        assert_eq!(texts[5], "$this->assertSame($expected, Foo::getCount())");
    }

    #[test]
    fn test_duplicate_test_fails() {
        let tools = tools();
        let method = ReflectedMethod::new("run");
        let mut class = class(ReflectedClass::new("Foo", "App"));

        BasicMethodFactory
            .make_testable(&tools, &mut class, &method)
            .unwrap();
        assert!(BasicMethodFactory
            .make_testable(&tools, &mut class, &method)
            .is_err());
    }
}
