//! Factories that turn a reflected class into a populated `TestClass`.

pub mod accessor;
pub mod documentation;
pub mod generator;
pub mod import;
pub mod methods;
pub mod mock;
pub mod statement;
pub mod value;

pub use accessor::{Accessor, AccessorKind, AccessorRule};
pub use documentation::{DocType, DocumentationFactory, PhpDocumentationFactory};
pub use generator::TestGenerator;
pub use import::{ImportFactory, PhpImportFactory};
pub use methods::{BasicMethodFactory, DelegateMethodFactory, MethodFactory, PolicyMethodFactory};
pub use mock::{MockGenerator, MockeryMockGenerator, PhpUnitMockGenerator};
pub use statement::StatementFactory;
pub use value::ValueFactory;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

/// Everything a method factory needs for one run, injected explicitly.
///
/// Factories hold no per-class state: the import cache lives in each
/// `TestClass`, so one bundle can serve many independent runs.
pub struct Factories {
    pub config: Arc<Config>,
    pub imports: Arc<dyn ImportFactory>,
    pub documentation: Box<dyn DocumentationFactory>,
    pub values: ValueFactory,
    pub statements: StatementFactory,
    pub accessors: AccessorRule,
}

impl Factories {
    pub fn new(
        config: Arc<Config>,
        imports: Arc<dyn ImportFactory>,
        documentation: Box<dyn DocumentationFactory>,
    ) -> Result<Self> {
        let mocks = mock::mock_generator_for(config.mock_with(), Arc::clone(&imports))?;
        let accessors = AccessorRule::from_config(&config)?;

        Ok(Self {
            config,
            imports,
            documentation,
            values: ValueFactory::new(mocks),
            statements: StatementFactory,
            accessors,
        })
    }

    /// Default factories for the configured mock framework.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        Self::new(
            config,
            Arc::new(PhpImportFactory),
            Box::new(PhpDocumentationFactory),
        )
    }
}
