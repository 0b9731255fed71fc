//! Registry entry descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of package an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:block")]
    Block,
}

impl EntryType {
    /// Wire name, e.g. `registry:ui`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "registry:ui",
            Self::Lib => "registry:lib",
            Self::Hook => "registry:hook",
            Self::Block => "registry:block",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One installable component package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryEntry {
    /// Unique name within the catalog (case-sensitive)
    pub name: String,

    /// Package kind
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Relative paths of the files this package copies, in order
    pub files: Vec<String>,

    /// External package names
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Names of other entries in the same catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
}

impl RegistryEntry {
    /// Create an entry with no dependencies.
    pub fn new(name: impl Into<String>, entry_type: EntryType, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            entry_type,
            title: None,
            description: None,
            files,
            dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
        }
    }

    /// Title if authored, otherwise the name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_registry_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_descriptor() {
        let json = r#"{
            "name": "separator",
            "type": "registry:ui",
            "title": "Separator",
            "files": ["components/ui/separator.tsx"],
            "dependencies": ["@radix-ui/react-separator"],
            "registryDependencies": ["utils"]
        }"#;

        let entry: RegistryEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.name, "separator");
        assert_eq!(entry.entry_type, EntryType::Ui);
        assert_eq!(entry.display_title(), "Separator");
        assert_eq!(entry.dependencies, vec!["@radix-ui/react-separator"]);
        assert_eq!(entry.registry_dependencies, vec!["utils"]);
    }

    #[test]
    fn rejects_unknown_type() {
        let json = r#"{ "name": "x", "type": "registry:theme", "files": ["x.ts"] }"#;

        assert!(serde_json::from_str::<RegistryEntry>(json).is_err());
    }

    #[test]
    fn dependencies_default_to_empty() {
        let json = r#"{ "name": "utils", "type": "registry:lib", "files": ["lib/utils.ts"] }"#;

        let entry: RegistryEntry = serde_json::from_str(json).unwrap();

        assert!(entry.dependencies.is_empty());
        assert!(entry.registry_dependencies.is_empty());
        assert_eq!(entry.display_title(), "utils");
    }
}
