//! Type registry: maps placeholder type names to pattern fragments
//!
//! A registry is plain data. It is built once (in code or from a TOML file)
//! and then only read; compiling a template looks types up by name and never
//! changes the registry.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a type registry
#[derive(Error, Debug)]
pub enum TypeRegistryError {
    #[error("Failed to read type registry file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse type registry TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Type registry defines a type with an empty name")]
    EmptyTypeName,
}

/// Mapping from type name to the pattern fragment matching its text form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeMap<String, String>,
}

/// TOML structure for deserializing registries
#[derive(Deserialize)]
struct TomlRegistry {
    types: BTreeMap<String, String>,
}

impl TypeRegistry {
    /// Fragment for the default `string` type: a run of non-whitespace
    pub const STRING: &'static str = r"[^\s]+";
    /// Fragment for the `integer` type: a run of decimal digits
    pub const INTEGER: &'static str = "[0-9]+";

    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The basic vocabulary: `string` and `integer`.
    ///
    /// Returns a fresh value on every call.
    pub fn basic() -> Self {
        Self::new()
            .with_type("string", Self::STRING)
            .with_type("integer", Self::INTEGER)
    }

    /// Return this registry extended with (or overriding) one type
    pub fn with_type(mut self, name: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.types.insert(name.into(), fragment.into());
        self
    }

    /// Load a registry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, TypeRegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a registry from a TOML string with a `[types]` table
    pub fn from_str(content: &str) -> Result<Self, TypeRegistryError> {
        let parsed: TomlRegistry = toml::from_str(content)?;

        if parsed.types.keys().any(|name| name.is_empty()) {
            return Err(TypeRegistryError::EmptyTypeName);
        }

        Ok(TypeRegistry {
            types: parsed.types,
        })
    }

    /// Look up the fragment for a type name
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Type names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }

    /// `(name, fragment)` pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |registry, (name, fragment)| {
                registry.with_type(name, fragment)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_types() {
        let registry = TypeRegistry::basic();
        assert_eq!(registry.resolve("string"), Some(r"[^\s]+"));
        assert_eq!(registry.resolve("integer"), Some("[0-9]+"));
        assert_eq!(registry.resolve("unknown"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_basic_is_fresh_value() {
        let extended = TypeRegistry::basic().with_type("word", "[a-z]+");
        assert!(extended.contains("word"));
        assert!(!TypeRegistry::basic().contains("word"));
    }

    #[test]
    fn test_with_type_overrides() {
        let registry = TypeRegistry::basic().with_type("integer", "-?[0-9]+");
        assert_eq!(registry.resolve("integer"), Some("-?[0-9]+"));
    }

    #[test]
    fn test_from_iterator() {
        let registry: TypeRegistry = [("string", r"[^\s]+"), ("rest", ".*")]
            .into_iter()
            .collect();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["rest", "string"]);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
[types]
word = '[a-z]+'
rest = '.*'
"#;
        let registry = TypeRegistry::from_str(toml).expect("Should parse");
        assert_eq!(registry.resolve("word"), Some("[a-z]+"));
        assert_eq!(registry.resolve("rest"), Some(".*"));
        assert!(!registry.contains("string"));
    }

    #[test]
    fn test_from_toml_rejects_empty_name() {
        let toml = r#"
[types]
"" = '.*'
"#;
        let result = TypeRegistry::from_str(toml);
        assert!(matches!(result, Err(TypeRegistryError::EmptyTypeName)));
    }

    #[test]
    fn test_from_toml_requires_types_table() {
        let result = TypeRegistry::from_str("name = 'x'");
        assert!(matches!(result, Err(TypeRegistryError::ParseError(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = TypeRegistry::from_file(Path::new("/nonexistent/types.toml"));
        assert!(matches!(result, Err(TypeRegistryError::IoError(_))));
    }
}
