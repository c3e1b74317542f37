//! Structured facts about one source class, as supplied by an external reflector.
//!
//! Named types are expected to be fully qualified already; the generator does
//! not infer anything the reflector did not provide. The only interpretation
//! done here is reading doc-block tags, which feeds class documentation and
//! the `@param` / `@return` / `@var` fallbacks for undeclared types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types the target language treats as keywords rather than class references.
const BUILT_IN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "never", "null",
    "object", "parent", "self", "static", "string", "true", "void",
];

/// Doc-block spellings and pseudo-types, mapped to the type whose value they take.
const DOC_TYPE_ALIASES: &[(&str, &str)] = &[
    ("$this", "static"),
    ("boolean", "bool"),
    ("integer", "int"),
    ("double", "float"),
    ("list", "array"),
    ("non-empty-array", "array"),
    ("non-empty-list", "array"),
    ("class-string", "string"),
    ("non-empty-string", "string"),
    ("numeric-string", "string"),
    ("positive-int", "int"),
    ("negative-int", "int"),
    ("non-negative-int", "int"),
    ("scalar", "mixed"),
    ("resource", "mixed"),
];

/// Class name, optionally fully qualified with a leading backslash.
static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\\?[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*(?:\\[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*)*$",
    )
    .unwrap_or_else(|e| panic!("regex: {e}"))
});

/// Whether `name` can be written as a class reference.
pub fn is_class_name(name: &str) -> bool {
    CLASS_NAME.is_match(name)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReflectedClass {
    /// Short name, without namespace.
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub methods: Vec<ReflectedMethod>,
    #[serde(default)]
    pub properties: Vec<ReflectedProperty>,
}

impl ReflectedClass {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc_comment: None,
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    pub fn with_method(mut self, method: ReflectedMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, property: ReflectedProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name, without leading backslash.
    pub fn full_name(&self) -> String {
        let namespace = self.namespace.trim_matches('\\');
        if namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}\\{}", namespace, self.name)
        }
    }

    /// Method lookup is case-insensitive, like the target language.
    pub fn method(&self, name: &str) -> Option<&ReflectedMethod> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn property(&self, name: &str) -> Option<&ReflectedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn constructor(&self) -> Option<&ReflectedMethod> {
        self.method("__construct")
    }

    pub fn doc_block(&self) -> DocBlock {
        self.doc_comment
            .as_deref()
            .map(DocBlock::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReflectedMethod {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<ReflectedParameter>,
    #[serde(default)]
    pub return_type: Option<ReflectedType>,
    #[serde(default)]
    pub doc_comment: Option<String>,
}

impl ReflectedMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
            doc_comment: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_parameter(mut self, parameter: ReflectedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: &str) -> Self {
        self.return_type = Some(ReflectedType::parse(return_type));
        self
    }

    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Declared parameter type, or the type of the matching `@param` tag.
    pub fn parameter_type(&self, parameter: &ReflectedParameter) -> Option<ReflectedType> {
        if let Some(ty) = &parameter.param_type {
            return Some(ty.clone());
        }

        let variable = format!("${}", parameter.name);
        let variadic = format!("...{}", variable);
        let block = self.doc_block();
        let ty = block.tags_named("param").find_map(|tag| {
            let (types, rest) = split_leading_type(&tag.body)?;
            // "@param $name" without type
            if types.starts_with('$') {
                return None;
            }
            let name = rest
                .split_whitespace()
                .find(|w| w.starts_with('$') || w.starts_with("...$"))?;
            if name == variable || name == variadic {
                ReflectedType::from_doc_types(types)
            } else {
                None
            }
        });
        ty
    }

    /// Declared return type, or the type of the first `@return` tag.
    pub fn effective_return_type(&self) -> Option<ReflectedType> {
        if let Some(ty) = &self.return_type {
            return Some(ty.clone());
        }

        let block = self.doc_block();
        let ty = block
            .tags_named("return")
            .find_map(|tag| split_leading_type(&tag.body))
            .and_then(|(types, _)| ReflectedType::from_doc_types(types));
        ty
    }

    pub fn doc_block(&self) -> DocBlock {
        self.doc_comment
            .as_deref()
            .map(DocBlock::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReflectedParameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub param_type: Option<ReflectedType>,
}

impl ReflectedParameter {
    pub fn new(name: impl Into<String>, param_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.map(ReflectedType::parse),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReflectedProperty {
    pub name: String,
    #[serde(default, rename = "type")]
    pub property_type: Option<ReflectedType>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub doc_comment: Option<String>,
}

impl ReflectedProperty {
    pub fn new(name: impl Into<String>, property_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.map(ReflectedType::parse),
            is_static: false,
            doc_comment: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Declared type, or the type of the `@var` tag.
    pub fn effective_type(&self) -> Option<ReflectedType> {
        if let Some(ty) = &self.property_type {
            return Some(ty.clone());
        }

        let block = self
            .doc_comment
            .as_deref()
            .map(DocBlock::parse)
            .unwrap_or_default();
        let ty = block
            .tags_named("var")
            .find_map(|tag| split_leading_type(&tag.body))
            .and_then(|(types, _)| ReflectedType::from_doc_types(types));
        ty
    }
}

/// A declared type, written `T` or `?T`. A declared union keeps its first
/// usable member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReflectedType {
    name: String,
    nullable: bool,
}

impl ReflectedType {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if split_union(raw).len() > 1 {
            if let Some(ty) = Self::from_doc_types(raw) {
                return ty;
            }
        }

        let (nullable, name) = match raw.strip_prefix('?') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let name = name.trim_start_matches('\\');

        Self {
            name: name.to_string(),
            nullable,
        }
    }

    /// Read a doc-block type list such as `string|null`.
    ///
    /// The first member that maps to a usable type wins and listing `null`
    /// makes it nullable. `$this` reads as `static`, `Foo[]` and generic
    /// arrays such as `array<int, Foo>` read as `array`, and other generics
    /// keep their base type. Returns `None` when no member is usable, for
    /// instance with literal types like `'asc'|'desc'`.
    pub fn from_doc_types(types: &str) -> Option<Self> {
        let mut nullable = false;
        let mut chosen = None;

        for part in split_union(types)
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            let part = match part.strip_prefix('?') {
                Some(rest) => {
                    nullable = true;
                    rest
                }
                None => part,
            };
            if part.eq_ignore_ascii_case("null") {
                nullable = true;
            } else if chosen.is_none() {
                chosen = doc_type_name(part);
            }
        }

        chosen.map(|name| Self { name, nullable })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_builtin(&self) -> bool {
        let lower = self.name.to_ascii_lowercase();
        BUILT_IN_TYPES.contains(&lower.as_str())
    }

    /// `self`, `parent` and `static` all point back at the source class.
    pub fn is_self_reference(&self) -> bool {
        matches!(
            self.name.to_ascii_lowercase().as_str(),
            "self" | "parent" | "static"
        )
    }
}

impl From<String> for ReflectedType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ReflectedType> for String {
    fn from(ty: ReflectedType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for ReflectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "?{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub body: String,
}

impl DocTag {
    pub fn render(&self) -> String {
        if self.body.is_empty() {
            format!("@{}", self.name)
        } else {
            format!("@{} {}", self.name, self.body)
        }
    }
}

/// Parsed `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub summary: Vec<String>,
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    pub fn parse(comment: &str) -> Self {
        let mut block = DocBlock::default();

        for raw in comment.lines() {
            let mut line = raw.trim();
            line = line.strip_prefix("/**").unwrap_or(line);
            line = line.strip_suffix("*/").unwrap_or(line).trim();
            line = line.strip_prefix('*').unwrap_or(line).trim();

            if line.is_empty() {
                continue;
            }

            if let Some(tag) = line.strip_prefix('@') {
                let (name, body) = match tag.split_once(char::is_whitespace) {
                    Some((name, body)) => (name, collapse_whitespace(body)),
                    None => (tag, String::new()),
                };
                block.tags.push(DocTag {
                    name: name.to_string(),
                    body,
                });
            } else if let Some(last) = block.tags.last_mut() {
                // Continuation of a multi-line tag.
                if !last.body.is_empty() {
                    last.body.push(' ');
                }
                last.body.push_str(&collapse_whitespace(line));
            } else {
                block.summary.push(line.to_string());
            }
        }

        block
    }

    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }
}

/// Split a type list on `|`, leaving separators inside `<>`, `{}` and `()` alone.
fn split_union(types: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in types.char_indices() {
        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(&types[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&types[start..]);
    parts
}

/// Split a tag body into its leading type and the rest, so that
/// `array<int, string> $map` keeps the whole generic as the type.
fn split_leading_type(body: &str) -> Option<(&str, &str)> {
    let body = body.trim_start();
    let mut depth = 0usize;
    let end = body
        .char_indices()
        .find(|&(_, c)| {
            match c {
                '<' | '{' | '(' => depth += 1,
                '>' | '}' | ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
            depth == 0 && c.is_whitespace()
        })
        .map_or(body.len(), |(i, _)| i);

    let (ty, rest) = body.split_at(end);
    (!ty.is_empty()).then_some((ty, rest))
}

/// Type name a single doc-block type stands for, if any.
fn doc_type_name(part: &str) -> Option<String> {
    if part.ends_with("[]") {
        return Some("array".to_string());
    }

    let base = part
        .find(|c: char| matches!(c, '<' | '{' | '('))
        .map_or(part, |at| &part[..at])
        .trim();
    let lower = base.to_ascii_lowercase();
    if let Some((_, name)) = DOC_TYPE_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return Some(name.to_string());
    }

    is_class_name(base).then(|| base.trim_start_matches('\\').to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
