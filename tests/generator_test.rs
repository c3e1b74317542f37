//! End-to-end generation of plain classes through the public API

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use unitgen::config::Config;
use unitgen::generators::TestGenerator;
use unitgen::reflection::{ReflectedClass, ReflectedMethod, ReflectedParameter};
use unitgen::render::OutlineRenderer;
use unitgen::GenerateError;

fn user_service() -> ReflectedClass {
    serde_json::from_str(include_str!("fixtures/user_service.json")).unwrap()
}

fn generator(overrides: serde_json::Value) -> TestGenerator {
    TestGenerator::new(Config::make(&overrides).unwrap()).unwrap()
}

const USER_SERVICE_TEST: &str = r#"<?php

namespace Tests\App\Services;

use App\Mail\Mailer;
use App\Services\UserService;
use PHPUnit\Framework\MockObject\MockObject;
use PHPUnit\Framework\TestCase;
use ReflectionClass;

/**
 * Class UserServiceTest.
 *
 * @author Jane Doe
 *
 * @covers \App\Services\UserService
 */
class UserServiceTest extends TestCase
{
    /**
     * @var UserService
     */
    protected $userService;

    /**
     * @var Mailer|MockObject
     */
    protected $mailer;

    /**
     * @var int
     */
    protected $limit;

    /**
     * {@inheritdoc}
     */
    protected function setUp(): void
    {
        parent::setUp();

        $this->mailer = $this->createMock(Mailer::class);
        $this->limit = 42;
        $this->userService = new UserService($this->mailer, $this->limit);
    }

    /**
     * {@inheritdoc}
     */
    protected function tearDown(): void
    {
        parent::tearDown();

        unset($this->userService);
        unset($this->mailer);
        unset($this->limit);
    }

    public function testGetLimit(): void
    {
        $expected = 42;
        $property = (new ReflectionClass(UserService::class))->getProperty('limit');
        $property->setAccessible(true);
        $property->setValue($this->userService, $expected);

        $this->assertSame($expected, $this->userService->getLimit());
    }

    public function testNotify(): void
    {
        $email = '42';

        $this->assertTrue($this->userService->notify($email));
    }

    public function testPurge(): void
    {
        $this->userService->purge();

        /** @todo This test is incomplete. */
        $this->markTestIncomplete();
    }
}
"#;

#[test]
fn test_full_output() -> Result<()> {
    let source = unitgen::generate(Config::default(), &user_service())?;
    assert_eq!(source, USER_SERVICE_TEST);
    Ok(())
}

#[test]
fn test_generation_is_deterministic() -> Result<()> {
    let generator = generator(json!({}));
    let first = generator.generate_source(&user_service())?;
    let second = generator.generate_source(&user_service())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_independent_runs_on_threads() -> Result<()> {
    let generator = Arc::new(generator(json!({})));
    let expected = generator.generate_source(&user_service())?;

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                scope.spawn(move || generator.generate_source(&user_service()).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for output in outputs {
        assert_eq!(output, expected);
    }
    Ok(())
}

#[test]
fn test_namespace_rewrite_and_test_case() -> Result<()> {
    let generator = generator(json!({
        "baseNamespace": "App",
        "baseTestNamespace": "Tests\\Unit",
        "testCase": "Tests\\TestCase",
    }));
    let source = generator.generate_source(&user_service())?;

    assert!(source.contains("namespace Tests\\Unit\\Services;"));
    assert!(source.contains("use Tests\\TestCase;"));
    assert!(source.contains("class UserServiceTest extends TestCase"));
    assert!(!source.contains("PHPUnit\\Framework\\TestCase"));
    Ok(())
}

#[test]
fn test_excluded_methods_get_no_test() -> Result<()> {
    let generator = generator(json!({"excludedMethods": ["__construct", "get.*"]}));
    let class = generator.generate(&user_service())?;

    assert!(class.method("testGetLimit").is_none());
    assert!(class.method("testNotify").is_some());
    assert!(class.method("testSecret").is_none());
    Ok(())
}

#[test]
fn test_without_automatic_tests() -> Result<()> {
    let generator = generator(json!({"automaticTests": false}));
    let class = generator.generate(&user_service())?;

    let names: Vec<&str> = class.methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["testGetLimit", "testNotify", "testPurge"]);
    assert!(class.properties().is_empty());

    for method in class.methods() {
        let last = method.statements().last().unwrap();
        assert_eq!(last.text(), "$this->markTestIncomplete()");
    }
    Ok(())
}

#[test]
fn test_mockery_mocks() -> Result<()> {
    let generator = generator(json!({"mockWith": "mockery"}));
    let source = generator.generate_source(&user_service())?;

    assert!(source.contains("use Mockery;"));
    assert!(source.contains("use Mockery\\Mock;"));
    assert!(source.contains("$this->mailer = Mockery::mock(Mailer::class);"));
    assert!(source.contains("@var Mailer|Mock"));
    Ok(())
}

#[test]
fn test_unknown_mock_framework() {
    let config = Config::make(&json!({"mockWith": "prophecy"})).unwrap();
    let err = TestGenerator::new(config).err().unwrap();
    assert_eq!(
        err,
        GenerateError::config_validation("mockWith", "one of: phpunit, mockery")
    );
}

#[test]
fn test_colliding_short_names_are_aliased() -> Result<()> {
    let class = ReflectedClass::new("Mailer", "App\\Services").with_method(
        ReflectedMethod::new("__construct")
            .with_parameter(ReflectedParameter::new("transport", Some("Vendor\\Mailer")))
            .with_parameter(ReflectedParameter::new("fallback", Some("Other\\Mailer"))),
    );
    let source = generator(json!({})).generate_source(&class)?;

    assert!(source.contains("use App\\Services\\Mailer;"));
    assert!(source.contains("use Vendor\\Mailer as MailerAlias;"));
    assert!(source.contains("use Other\\Mailer as MailerAlias2;"));
    assert!(source.contains("$this->transport = $this->createMock(MailerAlias::class);"));
    assert!(source.contains("$this->mailer = new Mailer($this->transport, $this->fallback);"));
    Ok(())
}

#[test]
fn test_doc_block_types_degrade_instead_of_failing() -> Result<()> {
    let class = ReflectedClass::new("Query", "App").with_method(
        ReflectedMethod::new("where")
            .with_parameter(ReflectedParameter::new("columns", None))
            .with_parameter(ReflectedParameter::new("bindings", None))
            .with_parameter(ReflectedParameter::new("mode", None))
            .with_parameter(ReflectedParameter::new("key", Some("int|string")))
            .with_doc_comment(
                "/**
                 * @param string[] $columns
                 * @param array<int, string> $bindings
                 * @param 'and'|'or' $mode
                 * @return $this
                 */",
            ),
    );
    let source = generator(json!({})).generate_source(&class)?;

    assert!(source.contains(
        "        $columns = [];
        $bindings = [];
        $mode = null;
        $key = 42;

        $this->assertInstanceOf(Query::class, $this->query->where($columns, $bindings, $mode, $key));"
    ));
    Ok(())
}

#[test]
fn test_unresolvable_type_aborts_generation() {
    let class = ReflectedClass::new("Foo", "App").with_method(
        ReflectedMethod::new("__construct")
            .with_parameter(ReflectedParameter::new("items", Some("array<int, Foo>"))),
    );
    let err = generator(json!({})).generate(&class).unwrap_err();
    assert!(matches!(err, GenerateError::Resolution { .. }));
}

#[test]
fn test_outline() -> Result<()> {
    let class = generator(json!({})).generate(&user_service())?;
    let outline = OutlineRenderer::render(&class);

    assert!(outline.starts_with("class Tests\\App\\Services\\UserServiceTest extends TestCase\n"));
    assert!(outline.contains("method testNotify"));
    Ok(())
}
