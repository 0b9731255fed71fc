//! `phosphor.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use phosphor_docs::{BuildConfig, DEFAULT_INSTALL_COMMAND};
use phosphor_registry::Catalog;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            styles: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Manifest to load instead of the built-in catalog
    pub path: Option<String>,
    #[serde(default = "default_install_command")]
    pub install_command: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: None,
            install_command: default_install_command(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
    #[serde(default)]
    pub strict: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
            strict: false,
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_install_command() -> String {
    DEFAULT_INSTALL_COMMAND.to_string()
}
fn default_minify() -> bool {
    true
}

impl Config {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// The configured manifest, or the built-in catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.registry.path {
            Some(path) => Catalog::from_path(Path::new(path))
                .with_context(|| format!("Failed to load registry {}", path)),
            None => phosphor_registry::builtin().context("Failed to load built-in registry"),
        }
    }

    /// Site build settings, with command-line overrides applied.
    pub fn build_config(
        &self,
        output: Option<PathBuf>,
        minify: Option<bool>,
        strict: bool,
    ) -> BuildConfig {
        BuildConfig {
            docs_dir: PathBuf::from(&self.docs.dir),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.docs.output)),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.docs.base_url.clone(),
            title: self.docs.title.clone(),
            styles: self.docs.styles.clone(),
            install_command: self.registry.install_command.clone(),
            strict: strict || self.build.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = Config::load(&temp.path().join("phosphor.toml")).unwrap();

        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.docs.output, "dist");
        assert_eq!(config.registry.install_command, "npx phosphor add {name}");
        assert!(config.build.minify);
        assert!(!config.build.strict);
        assert_eq!(config.catalog().unwrap().len(), 8);
    }

    #[test]
    fn parses_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("phosphor.toml");
        fs::write(
            &path,
            r#"
[docs]
title = "Phosphor"
styles = ["theme.css"]

[registry]
install_command = "bunx phosphor add {name}"

[build]
minify = false
strict = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let build = config.build_config(Some(PathBuf::from("out")), None, false);

        assert_eq!(build.title, "Phosphor");
        assert_eq!(build.docs_dir, PathBuf::from("docs"));
        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert_eq!(build.styles, vec!["theme.css".to_string()]);
        assert_eq!(build.install_command, "bunx phosphor add {name}");
        assert!(!build.minify);
        assert!(build.strict);
    }

    #[test]
    fn flags_override_file() {
        let config = Config::default();

        let build = config.build_config(None, Some(false), true);

        assert!(!build.minify);
        assert!(build.strict);
        assert_eq!(build.output_dir, PathBuf::from("dist"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("phosphor.toml");
        fs::write(&path, "[docs\ntitle = 1").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn loads_configured_registry() {
        let temp = tempdir().unwrap();
        let manifest = temp.path().join("registry.json");
        fs::write(
            &manifest,
            r#"{"name": "acme", "items": [{"name": "kbd", "type": "registry:ui", "files": ["ui/kbd.tsx"]}]}"#,
        )
        .unwrap();

        let config = Config {
            registry: RegistryConfig {
                path: Some(manifest.display().to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.name(), Some("acme"));
    }
}
