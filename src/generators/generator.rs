use std::sync::Arc;

use tracing::{debug, info};

use super::methods::{self, method_factory_from_config, MethodFactory};
use super::Factories;
use crate::config::Config;
use crate::error::Result;
use crate::model::TestClass;
use crate::reflection::ReflectedClass;
use crate::render::PhpRenderer;

/// The generation pipeline for one configuration.
///
/// A generator holds no per-class state: each `generate` call builds and
/// returns a fresh `TestClass`, so one generator can serve any number of
/// classes, from any number of threads.
pub struct TestGenerator {
    factories: Factories,
    methods: Arc<dyn MethodFactory>,
}

impl TestGenerator {
    pub fn new(config: Config) -> Result<Self> {
        Self::from_config(Arc::new(config))
    }

    /// Factories and method strategy as selected by `mockWith` and
    /// `generateWith`.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let methods = method_factory_from_config(&config)?;
        let factories = Factories::from_config(config)?;
        Ok(Self { factories, methods })
    }

    pub fn with_method_factory(mut self, methods: Arc<dyn MethodFactory>) -> Self {
        self.methods = methods;
        self
    }

    pub fn factories(&self) -> &Factories {
        &self.factories
    }

    pub fn config(&self) -> &Config {
        &self.factories.config
    }

    pub fn method_factory(&self) -> &Arc<dyn MethodFactory> {
        &self.methods
    }

    /// Namespace of the test class: `baseNamespace` is stripped from the
    /// source namespace and `baseTestNamespace` put in front.
    pub fn test_namespace(&self, source_namespace: &str) -> String {
        let config = self.config();
        let source = source_namespace.trim_matches('\\');
        let base = config.base_namespace().trim_matches('\\');

        let relative = if base.is_empty() {
            source
        } else if source == base {
            ""
        } else {
            source
                .strip_prefix(base)
                .and_then(|rest| rest.strip_prefix('\\'))
                .unwrap_or(source)
        };

        [config.base_test_namespace().trim_matches('\\'), relative]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\\")
    }

    pub fn generate(&self, reflection: &ReflectedClass) -> Result<TestClass> {
        let tools = &self.factories;
        let config = self.config();
        let reflection = Arc::new(reflection.clone());
        let full_name = reflection.full_name();
        info!("Generating tests for {}", full_name);

        let mut class = TestClass::new(
            Arc::clone(&reflection),
            format!("{}Test", reflection.short_name()),
            self.test_namespace(&reflection.namespace),
        );

        tools.imports.make(&mut class, &full_name)?;
        let test_case = tools.imports.make(&mut class, config.test_case())?;
        class.set_extends(test_case.final_name());

        let documentation = tools.documentation.make_for_class(config, &class);
        class.set_documentation(documentation);

        if config.automatic_tests() {
            let set_up = self.methods.make_set_up(tools, &mut class)?;
            class.add_method(set_up)?;
            let tear_down = self.methods.make_tear_down(tools, &mut class)?;
            class.add_method(tear_down)?;
        }

        for method in &reflection.methods {
            if !method.is_public() || config.is_excluded(&method.name) {
                debug!("Skipping {}::{}", reflection.short_name(), method.name);
                continue;
            }

            if config.automatic_tests() {
                self.methods.make_testable(tools, &mut class, method)?;
            } else {
                methods::make_incomplete(tools, &mut class, method)?;
            }
        }

        info!(
            "Generated {} with {} method(s)",
            class.short_name(),
            class.methods().len()
        );
        Ok(class)
    }

    /// Generate and render as PHP source.
    pub fn generate_source(&self, reflection: &ReflectedClass) -> Result<String> {
        let class = self.generate(reflection)?;
        Ok(PhpRenderer::render(&class))
    }
}
