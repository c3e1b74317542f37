use regex::Regex;

use super::statement::lcfirst;
use crate::config::Config;
use crate::error::{GenerateError, Result};
use crate::reflection::{ReflectedClass, ReflectedMethod};

pub const DEFAULT_GETTER_PATTERN: &str = r"^(?:get|is|has)(?P<property>[A-Z][A-Za-z0-9_]*)$";
pub const DEFAULT_SETTER_PATTERN: &str = r"^set(?P<property>[A-Z][A-Za-z0-9_]*)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A member recognized as reading or writing one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub property: String,
}

/// Naming heuristic for getters and setters.
///
/// A getter matches the getter pattern and takes no parameter, a setter
/// matches the setter pattern and takes exactly one. In both cases the
/// `property` capture, lower-cased on its first letter, must name a property
/// of the source class with the same static flag as the method.
#[derive(Debug, Clone)]
pub struct AccessorRule {
    getter: Regex,
    setter: Regex,
}

impl AccessorRule {
    pub fn new(getter: &str, setter: &str) -> Result<Self> {
        Ok(Self {
            getter: compile(getter, "options.accessor.getterPattern")?,
            setter: compile(setter, "options.accessor.setterPattern")?,
        })
    }

    /// Patterns from the `accessor.getterPattern` / `accessor.setterPattern`
    /// options, falling back to the defaults.
    pub fn from_config(config: &Config) -> Result<Self> {
        let getter: String =
            config.get_option("accessor.getterPattern", DEFAULT_GETTER_PATTERN.to_string())?;
        let setter: String =
            config.get_option("accessor.setterPattern", DEFAULT_SETTER_PATTERN.to_string())?;
        Self::new(&getter, &setter)
    }

    pub fn classify(&self, class: &ReflectedClass, method: &ReflectedMethod) -> Option<Accessor> {
        let (kind, captures) = match method.parameters.len() {
            0 => (AccessorKind::Getter, self.getter.captures(&method.name)?),
            1 => (AccessorKind::Setter, self.setter.captures(&method.name)?),
            _ => return None,
        };

        let property = lcfirst(captures.name("property")?.as_str());
        let backing = class.property(&property)?;
        if backing.is_static != method.is_static {
            return None;
        }

        Some(Accessor { kind, property })
    }

    pub fn is_getter_or_setter(&self, class: &ReflectedClass, method: &ReflectedMethod) -> bool {
        self.classify(class, method).is_some()
    }
}

fn compile(pattern: &str, property: &str) -> Result<Regex> {
    let expected = "regular expression with a property group";
    let regex = Regex::new(pattern)
        .map_err(|_| GenerateError::config_validation(property, expected))?;
    if !regex.capture_names().flatten().any(|name| name == "property") {
        return Err(GenerateError::config_validation(property, expected));
    }
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{ReflectedParameter, ReflectedProperty};
    use serde_json::json;

    fn rule() -> AccessorRule {
        AccessorRule::from_config(&Config::default()).unwrap()
    }

    fn class() -> ReflectedClass {
        ReflectedClass::new("User", "App")
            .with_property(ReflectedProperty::new("name", Some("string")))
            .with_property(ReflectedProperty::new("active", Some("bool")))
            .with_property(ReflectedProperty::new("count", Some("int")).with_static(true))
    }

    #[test]
    fn test_getter_is_recognized() {
        let accessor = rule()
            .classify(&class(), &ReflectedMethod::new("getName"))
            .unwrap();
        assert_eq!(accessor.kind, AccessorKind::Getter);
        assert_eq!(accessor.property, "name");

        assert!(rule().is_getter_or_setter(&class(), &ReflectedMethod::new("isActive")));
    }

    #[test]
    fn test_setter_is_recognized() {
        let setter = ReflectedMethod::new("setName")
            .with_parameter(ReflectedParameter::new("name", Some("string")));
        let accessor = rule().classify(&class(), &setter).unwrap();
        assert_eq!(accessor.kind, AccessorKind::Setter);
        assert_eq!(accessor.property, "name");
    }

    #[test]
    fn test_arity_must_match() {
        let getter_with_param = ReflectedMethod::new("getName")
            .with_parameter(ReflectedParameter::new("x", None));
        assert!(!rule().is_getter_or_setter(&class(), &getter_with_param));

        let setter_without_param = ReflectedMethod::new("setName");
        assert!(!rule().is_getter_or_setter(&class(), &setter_without_param));
    }

    #[test]
    fn test_backing_property_must_exist_with_same_static_flag() {
        assert!(!rule().is_getter_or_setter(&class(), &ReflectedMethod::new("getEmail")));
        assert!(!rule().is_getter_or_setter(&class(), &ReflectedMethod::new("getCount")));
        assert!(rule().is_getter_or_setter(
            &class(),
            &ReflectedMethod::new("getCount").with_static(true)
        ));
    }

    #[test]
    fn test_plain_method_is_not_accessor() {
        assert!(!rule().is_getter_or_setter(&class(), &ReflectedMethod::new("get")));
        assert!(!rule().is_getter_or_setter(&class(), &ReflectedMethod::new("getter")));
        assert!(!rule().is_getter_or_setter(&class(), &ReflectedMethod::new("save")));
    }

    #[test]
    fn test_custom_patterns_from_options() {
        let config = Config::make(&json!({
            "options": {"accessor": {"getterPattern": "^read(?P<property>[A-Z]\\w*)$"}}
        }))
        .unwrap();
        let rule = AccessorRule::from_config(&config).unwrap();

        assert!(rule.is_getter_or_setter(&class(), &ReflectedMethod::new("readName")));
        assert!(!rule.is_getter_or_setter(&class(), &ReflectedMethod::new("getName")));
    }

    #[test]
    fn test_pattern_without_property_group_is_rejected() {
        let err = AccessorRule::new("^get.*$", DEFAULT_SETTER_PATTERN).unwrap_err();
        assert!(err.to_string().contains("options.accessor.getterPattern"));
    }
}
