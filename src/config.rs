use anyhow::Context;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{GenerateError, Result};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "unitgen.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyType {
    Bool,
    String,
    StringList,
    Map,
}

impl PropertyType {
    fn describe(self) -> &'static str {
        match self {
            PropertyType::Bool => "bool",
            PropertyType::String => "string",
            PropertyType::StringList => "array of strings",
            PropertyType::Map => "map",
        }
    }
}

/// Every accepted property with its expected type. Anything else is ignored.
const PROPERTIES: &[(&str, PropertyType)] = &[
    ("automaticTests", PropertyType::Bool),
    ("mockWith", PropertyType::String),
    ("generateWith", PropertyType::String),
    ("baseNamespace", PropertyType::String),
    ("baseTestNamespace", PropertyType::String),
    ("testCase", PropertyType::String),
    ("excludedMethods", PropertyType::StringList),
    ("mergedPhpDoc", PropertyType::StringList),
    ("phpDoc", PropertyType::StringList),
    ("options", PropertyType::Map),
];

enum Validated {
    Bool(bool),
    String(String),
    StringList(Vec<String>),
    Map(Map<String, Value>),
}

/// Generation options, validated once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    automatic_tests: bool,
    mock_with: String,
    generate_with: String,
    base_namespace: String,
    base_test_namespace: String,
    test_case: String,
    excluded_methods: Vec<String>,
    excluded_patterns: Vec<Regex>,
    merged_php_doc: Vec<String>,
    php_doc: Vec<String>,
    options: Map<String, Value>,
}

impl Config {
    /// Merge the documented defaults with `overrides`, validating the type of
    /// each overridden property. `null` values count as absent.
    pub fn make(overrides: &Value) -> Result<Self> {
        let empty = Map::new();
        let overrides = match overrides {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(GenerateError::config_validation("config", "map")),
        };

        let mut config = Self::default();

        for (property, property_type) in PROPERTIES {
            let value = match overrides.get(*property) {
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };

            match validate(property, *property_type, value)? {
                Validated::Bool(v) => config.automatic_tests = v,
                Validated::String(v) => match *property {
                    "mockWith" => config.mock_with = v,
                    "generateWith" => config.generate_with = v,
                    "baseNamespace" => config.base_namespace = v,
                    "baseTestNamespace" => config.base_test_namespace = v,
                    _ => config.test_case = v,
                },
                Validated::StringList(v) => match *property {
                    "excludedMethods" => config.excluded_methods = v,
                    "mergedPhpDoc" => config.merged_php_doc = v,
                    _ => config.php_doc = v,
                },
                Validated::Map(v) => config.options = v,
            }
        }

        config.excluded_patterns = compile_patterns(&config.excluded_methods)?;

        debug!(
            "Built config: mockWith={}, generateWith={}, {} excluded pattern(s)",
            config.mock_with,
            config.generate_with,
            config.excluded_patterns.len()
        );

        Ok(config)
    }

    /// Load configuration from a specific path, or `./unitgen.toml`, or defaults.
    pub fn load_with_path(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path.display());
            return Self::load_from_path(config_path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            debug!("Loading config from ./{}", DEFAULT_CONFIG_FILE);
            return Self::load_from_path(local);
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    /// Read a TOML (or `.json`) config file and validate it.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let raw: Value = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        };

        let config = Self::make(&raw)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Enable member-test synthesis beyond a bare skeleton.
    pub fn automatic_tests(&self) -> bool {
        self.automatic_tests
    }

    /// Mock generator name (`phpunit` or `mockery`).
    pub fn mock_with(&self) -> &str {
        &self.mock_with
    }

    /// Generation strategy name (`delegate`, `basic` or `policy`).
    pub fn generate_with(&self) -> &str {
        &self.generate_with
    }

    pub fn base_namespace(&self) -> &str {
        &self.base_namespace
    }

    pub fn base_test_namespace(&self) -> &str {
        &self.base_test_namespace
    }

    pub fn test_case(&self) -> &str {
        &self.test_case
    }

    pub fn excluded_methods(&self) -> &[String] {
        &self.excluded_methods
    }

    /// Whether a method name matches one of the excluded patterns in full.
    pub fn is_excluded(&self, method: &str) -> bool {
        self.excluded_patterns.iter().any(|re| re.is_match(method))
    }

    pub fn merged_php_doc(&self) -> &[String] {
        &self.merged_php_doc
    }

    pub fn php_doc(&self) -> &[String] {
        &self.php_doc
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Typed option lookup. A dotted name is looked up as a flat key first,
    /// then as a path through nested maps. Absent or `null` options return
    /// `default`; a value of another type is a validation error.
    pub fn get_option<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let value = match self.option_value(name) {
            None | Some(Value::Null) => return Ok(default),
            Some(value) => value,
        };

        serde_json::from_value(value.clone()).map_err(|_| {
            let expected = serde_json::to_value(&default)
                .map(|v| json_kind(&v))
                .unwrap_or("value");
            GenerateError::config_validation(format!("options.{}", name), expected)
        })
    }

    fn option_value(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.options.get(name) {
            return Some(value);
        }

        let mut segments = name.split('.');
        let mut current = self.options.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// The effective configuration, keyed like the input.
    pub fn to_value(&self) -> Value {
        json!({
            "automaticTests": self.automatic_tests,
            "mockWith": self.mock_with,
            "generateWith": self.generate_with,
            "baseNamespace": self.base_namespace,
            "baseTestNamespace": self.base_test_namespace,
            "testCase": self.test_case,
            "excludedMethods": self.excluded_methods,
            "mergedPhpDoc": self.merged_php_doc,
            "phpDoc": self.php_doc,
            "options": self.options,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let excluded_methods = vec!["__construct".to_string(), "__destruct".to_string()];
        let excluded_patterns =
            compile_patterns(&excluded_methods).expect("default excluded patterns are valid");

        Self {
            automatic_tests: true,
            mock_with: "phpunit".to_string(),
            generate_with: "delegate".to_string(),
            base_namespace: String::new(),
            base_test_namespace: "Tests".to_string(),
            test_case: "PHPUnit\\Framework\\TestCase".to_string(),
            excluded_methods,
            excluded_patterns,
            merged_php_doc: vec![
                "author".to_string(),
                "copyright".to_string(),
                "license".to_string(),
                "version".to_string(),
            ],
            php_doc: Vec::new(),
            options: Map::new(),
        }
    }
}

fn validate(property: &str, property_type: PropertyType, value: &Value) -> Result<Validated> {
    let invalid = || GenerateError::config_validation(property, property_type.describe());

    match property_type {
        PropertyType::Bool => value.as_bool().map(Validated::Bool).ok_or_else(invalid),
        PropertyType::String => value
            .as_str()
            .map(|s| Validated::String(s.to_string()))
            .ok_or_else(invalid),
        PropertyType::StringList => {
            let items = value.as_array().ok_or_else(invalid)?;
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>>>()
                .map(Validated::StringList)
        }
        PropertyType::Map => value
            .as_object()
            .cloned()
            .map(Validated::Map)
            .ok_or_else(invalid),
    }
}

/// Excluded method patterns must match the whole method name.
fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{})$", pattern)).map_err(|_| {
                GenerateError::config_validation("excludedMethods", "array of regular expressions")
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
