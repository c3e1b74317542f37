//! unitgen - Generate PHPUnit test skeletons from reflected PHP classes
//!
//! A reflected class description goes through pluggable factories (imports,
//! documentation, values and mocks, statements) and a per-class method
//! strategy into a test model, which renderers turn into PHP source.

pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod reflection;
pub mod render;

pub use config::Config;
pub use error::{GenerateError, Result};
pub use generators::TestGenerator;
pub use reflection::ReflectedClass;

/// Generate the PHP test source of one class with the given configuration.
pub fn generate(config: Config, class: &ReflectedClass) -> Result<String> {
    TestGenerator::new(config)?.generate_source(class)
}
