use std::sync::Arc;

use super::import::ImportFactory;
use crate::error::{GenerateError, Result};
use crate::model::{TestClass, TestImport};

/// Produces framework-specific mock acquisition code.
pub trait MockGenerator: Send + Sync {
    /// Import of the type mocks are instances of, for property docs.
    fn mock_type(&self, class: &mut TestClass) -> Result<Arc<TestImport>>;

    /// Expression creating a mock of `type_name`. The mocked type becomes an
    /// import of `class`.
    fn generate_mock(&self, class: &mut TestClass, type_name: &str) -> Result<String>;
}

pub struct PhpUnitMockGenerator {
    imports: Arc<dyn ImportFactory>,
}

impl PhpUnitMockGenerator {
    pub fn new(imports: Arc<dyn ImportFactory>) -> Self {
        Self { imports }
    }
}

impl MockGenerator for PhpUnitMockGenerator {
    fn mock_type(&self, class: &mut TestClass) -> Result<Arc<TestImport>> {
        self.imports
            .make(class, "PHPUnit\\Framework\\MockObject\\MockObject")
    }

    fn generate_mock(&self, class: &mut TestClass, type_name: &str) -> Result<String> {
        let import = self.imports.make(class, type_name)?;
        Ok(format!("$this->createMock({}::class)", import.final_name()))
    }
}

pub struct MockeryMockGenerator {
    imports: Arc<dyn ImportFactory>,
}

impl MockeryMockGenerator {
    pub fn new(imports: Arc<dyn ImportFactory>) -> Self {
        Self { imports }
    }
}

impl MockGenerator for MockeryMockGenerator {
    fn mock_type(&self, class: &mut TestClass) -> Result<Arc<TestImport>> {
        self.imports.make(class, "Mockery\\Mock")
    }

    fn generate_mock(&self, class: &mut TestClass, type_name: &str) -> Result<String> {
        let import = self.imports.make(class, type_name)?;
        let mockery = self.imports.make(class, "Mockery")?;
        Ok(format!(
            "{}::mock({}::class)",
            mockery.final_name(),
            import.final_name()
        ))
    }
}

/// Pick the mock generator named by the `mockWith` option.
pub fn mock_generator_for(
    name: &str,
    imports: Arc<dyn ImportFactory>,
) -> Result<Box<dyn MockGenerator>> {
    match name.to_lowercase().as_str() {
        "phpunit" => Ok(Box::new(PhpUnitMockGenerator::new(imports))),
        "mockery" => Ok(Box::new(MockeryMockGenerator::new(imports))),
        _ => Err(GenerateError::config_validation(
            "mockWith",
            "one of: phpunit, mockery",
        )),
    }
}
