use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use super::{BasicMethodFactory, MethodFactory, PolicyMethodFactory};
use crate::config::Config;
use crate::error::{GenerateError, Result};
use crate::generators::Factories;
use crate::model::{TestClass, TestMethod};
use crate::reflection::{ReflectedClass, ReflectedMethod};

/// Decides whether a registered variant handles a class.
pub type ClassPredicate = Box<dyn Fn(&ReflectedClass) -> bool + Send + Sync>;

/// Dispatches every call to the first registered variant whose predicate
/// accepts the tested class, or to the fallback.
pub struct DelegateMethodFactory {
    variants: Vec<(ClassPredicate, Arc<dyn MethodFactory>)>,
    fallback: Arc<dyn MethodFactory>,
}

impl DelegateMethodFactory {
    /// Empty registry; every class goes to `fallback`.
    pub fn new(fallback: Arc<dyn MethodFactory>) -> Self {
        Self {
            variants: Vec::new(),
            fallback,
        }
    }

    /// Register a variant after the existing ones.
    pub fn register(mut self, predicate: ClassPredicate, variant: Arc<dyn MethodFactory>) -> Self {
        self.variants.push((predicate, variant));
        self
    }

    /// Basic fallback with the policy variant for policy classes.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(BasicMethodFactory)).register(
            Box::new(is_policy_class),
            Arc::new(PolicyMethodFactory::default()),
        )
    }

    /// Entries of the `delegate.variants` option (class name pattern to
    /// variant name) come before the defaults.
    pub fn from_config(config: &Config) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            config.get_option("delegate.variants", BTreeMap::new())?;
        let invalid = || {
            GenerateError::config_validation(
                "options.delegate.variants",
                "map of regular expressions to variant names",
            )
        };

        let mut factory = Self::new(Arc::new(BasicMethodFactory));
        for (pattern, name) in entries {
            let regex = Regex::new(&pattern).map_err(|_| invalid())?;
            let variant = variant_by_name(&name).ok_or_else(invalid)?;
            factory = factory.register(
                Box::new(move |class: &ReflectedClass| regex.is_match(&class.full_name())),
                variant,
            );
        }

        Ok(factory.register(
            Box::new(is_policy_class),
            Arc::new(PolicyMethodFactory::default()),
        ))
    }

    pub fn select(&self, class: &ReflectedClass) -> &Arc<dyn MethodFactory> {
        let variant = self
            .variants
            .iter()
            .find(|(predicate, _)| predicate(class))
            .map(|(_, variant)| variant)
            .unwrap_or(&self.fallback);
        debug!("Using {} tests for {}", variant.name(), class.full_name());
        variant
    }
}

impl MethodFactory for DelegateMethodFactory {
    fn name(&self) -> &'static str {
        "delegate"
    }

    fn make_set_up(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod> {
        let reflection = Arc::clone(class.reflection());
        self.select(&reflection).make_set_up(tools, class)
    }

    fn make_tear_down(&self, tools: &Factories, class: &mut TestClass) -> Result<TestMethod> {
        let reflection = Arc::clone(class.reflection());
        self.select(&reflection).make_tear_down(tools, class)
    }

    fn make_testable(
        &self,
        tools: &Factories,
        class: &mut TestClass,
        method: &ReflectedMethod,
    ) -> Result<()> {
        let reflection = Arc::clone(class.reflection());
        self.select(&reflection).make_testable(tools, class, method)
    }

    fn is_getter_or_setter(
        &self,
        tools: &Factories,
        class: &TestClass,
        method: &ReflectedMethod,
    ) -> bool {
        self.select(class.reflection())
            .is_getter_or_setter(tools, class, method)
    }
}

/// Laravel policies: `*Policy` classes or anything under a `Policies`
/// namespace segment.
pub fn is_policy_class(class: &ReflectedClass) -> bool {
    class.short_name().ends_with("Policy")
        || class.namespace.split('\\').any(|segment| segment == "Policies")
}

fn variant_by_name(name: &str) -> Option<Arc<dyn MethodFactory>> {
    match name.to_lowercase().as_str() {
        "basic" => Some(Arc::new(BasicMethodFactory)),
        "policy" => Some(Arc::new(PolicyMethodFactory::default())),
        _ => None,
    }
}

/// Strategy named by `generateWith`. `delegate` picks per class, the
/// others force one variant for every class.
pub fn method_factory_from_config(config: &Config) -> Result<Arc<dyn MethodFactory>> {
    if config.generate_with().eq_ignore_ascii_case("delegate") {
        return Ok(Arc::new(DelegateMethodFactory::from_config(config)?));
    }

    variant_by_name(config.generate_with()).ok_or_else(|| {
        GenerateError::config_validation("generateWith", "one of: delegate, basic, policy")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_detection() {
        assert!(is_policy_class(&ReflectedClass::new("PostPolicy", "App")));
        assert!(is_policy_class(&ReflectedClass::new("Post", "App\\Policies")));
        assert!(!is_policy_class(&ReflectedClass::new("Post", "App\\Models")));
        assert!(!is_policy_class(&ReflectedClass::new("PolicyHelper", "App")));
    }

    #[test]
    fn test_defaults_select_variant() {
        let factory = DelegateMethodFactory::with_defaults();
        assert_eq!(
            factory.select(&ReflectedClass::new("PostPolicy", "App")).name(),
            "policy"
        );
        assert_eq!(
            factory.select(&ReflectedClass::new("Post", "App")).name(),
            "basic"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let factory = DelegateMethodFactory::new(Arc::new(BasicMethodFactory))
            .register(
                Box::new(|class: &ReflectedClass| class.short_name().starts_with('A')),
                Arc::new(PolicyMethodFactory::default()),
            )
            .register(Box::new(|_: &ReflectedClass| true), Arc::new(BasicMethodFactory));

        assert_eq!(
            factory.select(&ReflectedClass::new("Admin", "App")).name(),
            "policy"
        );
        assert_eq!(
            factory.select(&ReflectedClass::new("User", "App")).name(),
            "basic"
        );
    }

    #[test]
    fn test_configured_variants_come_first() {
        let config = Config::make(&json!({
            "options": {"delegate": {"variants": {"^App.Gates": "policy", "Policy$": "basic"}}}
        }))
        .unwrap();
        let factory = DelegateMethodFactory::from_config(&config).unwrap();

        assert_eq!(
            factory.select(&ReflectedClass::new("Post", "App\\Gates")).name(),
            "policy"
        );
        assert_eq!(
            factory.select(&ReflectedClass::new("PostPolicy", "App")).name(),
            "basic"
        );
    }

    #[test]
    fn test_unknown_configured_variant() {
        let config = Config::make(&json!({
            "options": {"delegate.variants": {".*": "magic"}}
        }))
        .unwrap();
        let err = DelegateMethodFactory::from_config(&config).err().unwrap();
        assert!(matches!(
            err,
            GenerateError::ConfigValidation { ref property, .. } if property == "options.delegate.variants"
        ));
    }

    #[test]
    fn test_method_factory_from_config() {
        let basic = Config::make(&json!({"generateWith": "basic"})).unwrap();
        assert_eq!(method_factory_from_config(&basic).unwrap().name(), "basic");

        let delegate = Config::default();
        assert_eq!(
            method_factory_from_config(&delegate).unwrap().name(),
            "delegate"
        );

        let unknown = Config::make(&json!({"generateWith": "twig"})).unwrap();
        assert!(method_factory_from_config(&unknown).is_err());
    }
}
