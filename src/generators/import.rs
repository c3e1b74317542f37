use std::sync::Arc;
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::model::{TestClass, TestImport};
use crate::reflection::{is_class_name, ReflectedType};

/// Resolves a type to an import of the test class.
pub trait ImportFactory: Send + Sync {
    /// Import `name` into `class`. Asking twice for the same fully qualified
    /// name returns the same import.
    fn make(&self, class: &mut TestClass, name: &str) -> Result<Arc<TestImport>>;
}

/// Imports by fully qualified name, aliasing on short-name collisions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhpImportFactory;

impl PhpImportFactory {
    /// First free alias: `FooAlias`, then `FooAlias2`, `FooAlias3`...
    fn make_alias(class: &TestClass, short_name: &str) -> String {
        let base = format!("{}Alias", short_name);
        if !class.is_name_taken(&base) {
            return base;
        }

        (2..)
            .map(|n| format!("{}{}", base, n))
            .find(|alias| !class.is_name_taken(alias))
            .unwrap_or(base)
    }
}

impl ImportFactory for PhpImportFactory {
    fn make(&self, class: &mut TestClass, name: &str) -> Result<Arc<TestImport>> {
        let trimmed = name.trim();
        if !is_class_name(trimmed) {
            return Err(GenerateError::resolution(name, "not a valid class name"));
        }
        if ReflectedType::parse(trimmed).is_builtin() {
            return Err(GenerateError::resolution(
                name,
                "built-in types cannot be imported",
            ));
        }

        let full_name = trimmed.trim_start_matches('\\');
        if let Some(existing) = class.import(full_name) {
            return Ok(Arc::clone(existing));
        }

        let short_name = full_name.rsplit('\\').next().unwrap_or(full_name);
        let alias = class
            .is_name_taken(short_name)
            .then(|| Self::make_alias(class, short_name));

        let import = Arc::new(TestImport::new(full_name, alias));
        debug!(
            "Importing {} as {} in {}",
            import.name(),
            import.final_name(),
            class.short_name()
        );
        class.add_import(Arc::clone(&import));

        Ok(import)
    }
}
