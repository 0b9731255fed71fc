//! The immutable component catalog.
//!
//! A [`Catalog`] is assembled once from authored descriptors, validated as a
//! whole, and then only read. Any malformed descriptor fails construction so
//! consumers never observe a partial catalog.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::RegistryEntry;

/// Ordered, validated collection of registry entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Registry name from the manifest, if any
    name: Option<String>,

    /// Registry homepage from the manifest, if any
    homepage: Option<String>,

    /// Entries in authored order
    entries: Vec<RegistryEntry>,

    /// Entry position by exact name
    index: HashMap<String, usize>,
}

/// On-disk registry manifest.
#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,

    items: Vec<RegistryEntry>,
}

/// What an installer needs to add one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan<'a> {
    /// Entries to copy, dependencies first, each once
    pub entries: Vec<&'a RegistryEntry>,

    /// External packages to install, in first-seen order
    pub packages: Vec<&'a str>,
}

impl InstallPlan<'_> {
    /// All files across the plan, in copy order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|e| e.files.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

impl Catalog {
    /// Build a catalog from entries in authored order.
    pub fn from_entries(entries: Vec<RegistryEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            check_entry(entry)?;
            if index.insert(entry.name.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
        }

        let catalog = Self {
            name: None,
            homepage: None,
            entries,
            index,
        };
        catalog.check_references()?;

        tracing::debug!("Loaded catalog with {} entries", catalog.entries.len());

        Ok(catalog)
    }

    /// Parse a registry manifest (`{ "name": ..., "items": [...] }`).
    pub fn from_json(source_name: &str, json: &str) -> Result<Self, CatalogError> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let mut catalog = Self::from_entries(manifest.items)?;
        catalog.name = manifest.name;
        catalog.homepage = manifest.homepage;
        Ok(catalog)
    }

    /// Read and parse a registry manifest file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_json(&path.display().to_string(), &json)
    }

    /// Parse one descriptor per component and concatenate them in order.
    pub fn from_descriptors(descriptors: &[(&str, &str)]) -> Result<Self, CatalogError> {
        let entries = descriptors
            .iter()
            .map(|(source_name, json)| {
                serde_json::from_str::<RegistryEntry>(json).map_err(|e| CatalogError::Malformed {
                    source_name: source_name.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    /// Every entry, in authored order.
    pub fn list_all(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Look up an entry by exact, case-sensitive name.
    pub fn find_by_name(&self, name: &str) -> Result<&RegistryEntry, CatalogError> {
        self.index
            .get(name)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Check if an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry name from the manifest.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Registry homepage from the manifest.
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    /// Resolve everything needed to install `name`.
    pub fn install_plan(&self, name: &str) -> Result<InstallPlan<'_>, CatalogError> {
        let root = *self
            .index
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let mut marks = vec![Mark::Unvisited; self.entries.len()];
        let mut order = Vec::new();
        let mut path = Vec::new();
        self.visit(root, &mut marks, &mut order, &mut path)?;

        let entries: Vec<&RegistryEntry> = order.iter().map(|&pos| &self.entries[pos]).collect();

        let mut seen = HashSet::new();
        let packages = entries
            .iter()
            .copied()
            .flat_map(|e| e.dependencies.iter().map(String::as_str))
            .filter(|pkg| seen.insert(*pkg))
            .collect();

        Ok(InstallPlan { entries, packages })
    }

    /// Serialize back to the manifest format.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let manifest = Manifest {
            name: self.name.clone(),
            homepage: self.homepage.clone(),
            items: self.entries.clone(),
        };

        serde_json::to_string_pretty(&manifest).map_err(|e| CatalogError::Malformed {
            source_name: "catalog".to_string(),
            message: e.to_string(),
        })
    }

    /// Every registry dependency must name an entry, and no chain may loop.
    fn check_references(&self) -> Result<(), CatalogError> {
        for entry in &self.entries {
            for dep in &entry.registry_dependencies {
                if !self.index.contains_key(dep) {
                    return Err(CatalogError::DanglingDependency {
                        entry: entry.name.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let mut marks = vec![Mark::Unvisited; self.entries.len()];
        let mut order = Vec::new();
        for pos in 0..self.entries.len() {
            let mut path = Vec::new();
            self.visit(pos, &mut marks, &mut order, &mut path)?;
        }

        Ok(())
    }

    /// Depth-first post-order walk over registry dependencies.
    fn visit(
        &self,
        pos: usize,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
        path: &mut Vec<usize>,
    ) -> Result<(), CatalogError> {
        match marks[pos] {
            Mark::Done => return Ok(()),
            Mark::Visiting => {
                let start = path.iter().position(|&p| p == pos).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|&p| self.entries[p].name.clone())
                    .collect();
                cycle.push(self.entries[pos].name.clone());
                return Err(CatalogError::DependencyCycle(cycle.join(" -> ")));
            }
            Mark::Unvisited => {}
        }

        marks[pos] = Mark::Visiting;
        path.push(pos);

        for dep in &self.entries[pos].registry_dependencies {
            let dep_pos = *self
                .index
                .get(dep)
                .ok_or_else(|| CatalogError::NotFound(dep.clone()))?;
            self.visit(dep_pos, marks, order, path)?;
        }

        path.pop();
        marks[pos] = Mark::Done;
        order.push(pos);

        Ok(())
    }
}

fn check_entry(entry: &RegistryEntry) -> Result<(), CatalogError> {
    if entry.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }

    if entry.files.is_empty() {
        return Err(CatalogError::MissingFiles(entry.name.clone()));
    }

    if let Some(file) = entry
        .files
        .iter()
        .find(|f| f.starts_with('/') || Path::new(f).is_absolute())
    {
        return Err(CatalogError::AbsolutePath {
            entry: entry.name.clone(),
            path: file.clone(),
        });
    }

    Ok(())
}

/// Errors that can occur loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed descriptor in {source_name}: {message}")]
    Malformed { source_name: String, message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Entry with an empty name")]
    EmptyName,

    #[error("Duplicate entry name: {0}")]
    DuplicateName(String),

    #[error("Entry {0} lists no files")]
    MissingFiles(String),

    #[error("Entry {entry} has absolute file path {path}")]
    AbsolutePath { entry: String, path: String },

    #[error("Entry {entry} depends on unknown entry {dependency}")]
    DanglingDependency { entry: String, dependency: String },

    #[error("Dependency cycle: {0}")]
    DependencyCycle(String),

    #[error("Component not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use pretty_assertions::assert_eq;

    fn entry(name: &str) -> RegistryEntry {
        RegistryEntry::new(name, EntryType::Ui, vec![format!("components/ui/{name}.tsx")])
    }

    fn sample() -> Catalog {
        Catalog::from_entries(vec![
            RegistryEntry::new("utils", EntryType::Lib, vec!["lib/utils.ts".to_string()])
                .with_dependencies(["clsx", "tailwind-merge"]),
            entry("button")
                .with_dependencies(["@radix-ui/react-slot", "clsx"])
                .with_registry_dependencies(["utils"]),
            entry("kbd").with_registry_dependencies(["utils"]),
        ])
        .unwrap()
    }

    #[test]
    fn finds_every_listed_entry() {
        let catalog = sample();

        for entry in catalog.list_all() {
            let found = catalog.find_by_name(&entry.name).unwrap();
            assert!(std::ptr::eq(found, entry));
        }
    }

    #[test]
    fn lookup_of_absent_name_is_not_found() {
        let catalog = sample();

        assert!(matches!(
            catalog.find_by_name("nonexistent"),
            Err(CatalogError::NotFound(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = sample();

        assert!(catalog.find_by_name("kbd").is_ok());
        assert!(matches!(
            catalog.find_by_name("Kbd"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn list_all_is_stable() {
        let catalog = sample();

        let first: Vec<_> = catalog.list_all().to_vec();
        let second: Vec<_> = catalog.list_all().to_vec();

        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["utils", "button", "kbd"]);
    }

    #[test]
    fn kbd_exposes_declared_dependencies() {
        let catalog = sample();

        let kbd = catalog.find_by_name("kbd").unwrap();

        assert!(kbd.dependencies.is_empty());
        assert_eq!(kbd.registry_dependencies, vec!["utils"]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Catalog::from_entries(vec![entry("kbd"), entry("kbd")]);

        assert!(matches!(result, Err(CatalogError::DuplicateName(n)) if n == "kbd"));
    }

    #[test]
    fn rejects_dangling_registry_dependency() {
        let result =
            Catalog::from_entries(vec![entry("kbd").with_registry_dependencies(["utils"])]);

        assert!(matches!(
            result,
            Err(CatalogError::DanglingDependency { entry, dependency })
                if entry == "kbd" && dependency == "utils"
        ));
    }

    #[test]
    fn rejects_cycles() {
        let result = Catalog::from_entries(vec![
            entry("a").with_registry_dependencies(["b"]),
            entry("b").with_registry_dependencies(["a"]),
        ]);

        assert!(matches!(result, Err(CatalogError::DependencyCycle(c)) if c == "a -> b -> a"));
    }

    #[test]
    fn rejects_entries_without_files() {
        let result = Catalog::from_entries(vec![RegistryEntry::new("x", EntryType::Ui, vec![])]);

        assert!(matches!(result, Err(CatalogError::MissingFiles(_))));
    }

    #[test]
    fn rejects_absolute_paths() {
        let result = Catalog::from_entries(vec![RegistryEntry::new(
            "x",
            EntryType::Ui,
            vec!["/etc/passwd".to_string()],
        )]);

        assert!(matches!(result, Err(CatalogError::AbsolutePath { .. })));
    }

    #[test]
    fn malformed_descriptor_fails_whole_load() {
        let result = Catalog::from_descriptors(&[
            ("utils.json", r#"{"name":"utils","type":"registry:lib","files":["a.ts"]}"#),
            ("kbd.json", r#"{"name":"kbd","type":"registry:ui""#),
        ]);

        assert!(matches!(
            result,
            Err(CatalogError::Malformed { source_name, .. }) if source_name == "kbd.json"
        ));
    }

    #[test]
    fn install_plan_is_dependency_first() {
        let catalog = sample();

        let plan = catalog.install_plan("button").unwrap();

        let names: Vec<_> = plan.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["utils", "button"]);
        assert_eq!(
            plan.packages,
            vec!["clsx", "tailwind-merge", "@radix-ui/react-slot"]
        );
        assert_eq!(
            plan.files().collect::<Vec<_>>(),
            vec!["lib/utils.ts", "components/ui/button.tsx"]
        );
    }

    #[test]
    fn install_plan_visits_shared_dependencies_once() {
        let catalog = Catalog::from_entries(vec![
            entry("base"),
            entry("left").with_registry_dependencies(["base"]),
            entry("right").with_registry_dependencies(["base"]),
            entry("top").with_registry_dependencies(["left", "right"]),
        ])
        .unwrap();

        let plan = catalog.install_plan("top").unwrap();

        let names: Vec<_> = plan.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["base", "left", "right", "top"]);
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let json = r#"{
            "name": "phosphor",
            "homepage": "https://example.com",
            "items": [
                { "name": "utils", "type": "registry:lib", "files": ["lib/utils.ts"] }
            ]
        }"#;

        let catalog = Catalog::from_json("registry.json", json).unwrap();
        let reparsed = Catalog::from_json("out.json", &catalog.to_json().unwrap()).unwrap();

        assert_eq!(reparsed.name(), Some("phosphor"));
        assert_eq!(reparsed.homepage(), Some("https://example.com"));
        assert_eq!(reparsed.list_all(), catalog.list_all());
    }

    #[test]
    fn reads_manifest_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(
            &path,
            r#"{ "items": [ { "name": "kbd", "type": "registry:ui", "files": ["kbd.tsx"] } ] }"#,
        )
        .unwrap();

        let catalog = Catalog::from_path(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("kbd"));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let temp = tempfile::tempdir().unwrap();

        let result = Catalog::from_path(&temp.path().join("nope.json"));

        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
