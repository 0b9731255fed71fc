//! Scaffold a config file and a sample docs tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in the current directory.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing phosphor docs...");

    if scaffold(Path::new("."), yes)? {
        tracing::info!("Initialization complete!");
        tracing::info!("Run 'phosphor build' and then 'phosphor serve' to preview.");
    }

    Ok(())
}

/// Write the scaffold under `root`. Existing files are kept unless `yes` is
/// set. Returns false when an existing docs tree was left alone.
pub fn scaffold(root: &Path, yes: bool) -> Result<bool> {
    let docs_dir = root.join("docs");

    if docs_dir.exists() && !yes {
        tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
        return Ok(false);
    }

    let components_dir = docs_dir.join("components");
    fs::create_dir_all(&components_dir).context("Failed to create docs directory")?;

    let files = [
        (root.join("phosphor.toml"), DEFAULT_CONFIG),
        (docs_dir.join("index.mdx"), DEFAULT_INDEX),
        (components_dir.join("spinner.mdx"), DEFAULT_SPINNER_DOC),
        (components_dir.join("separator.mdx"), DEFAULT_SEPARATOR_DOC),
    ];

    for (path, content) in files {
        if path.exists() && !yes {
            tracing::debug!("Keeping {}", path.display());
            continue;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(true)
}

const DEFAULT_CONFIG: &str = r#"# phosphor configuration

[docs]
# Source directory for documentation
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "Phosphor"

# Base URL (for deployment)
base_url = "/"

[registry]
# Registry manifest to document; the built-in catalog when unset
# path = "registry.json"

# Shown on every component page; {name} is the entry name
install_command = "npx phosphor add {name}"

[build]
# Enable CSS minification
minify = true

# Fail on pages naming a component the registry lacks
strict = false
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
order: 1
---

# Phosphor

Terminal-themed components with live previews.

```tsx live
<Spinner label="Booting" />
```

Browse the components in the sidebar.
"#;

const DEFAULT_SPINNER_DOC: &str = r#"---
title: Spinner
description: ASCII activity indicator.
component: spinner
order: 10
---

```tsx live
<Spinner size="MD" label="Loading" />
```

## Sizes

```tsx live
<Grid preset="cols-3" gap="sm">
  <Spinner size="SM" />
  <Spinner size="MD" />
  <Spinner size="LG" />
</Grid>
```
"#;

const DEFAULT_SEPARATOR_DOC: &str = r#"---
title: Separator
description: Divider line, optionally labeled.
component: separator
order: 11
---

```tsx live
<Separator label="or" />
```

## Vertical

A vertical separator never shows its label.

```tsx live
<div className="flex items-center gap-4">
  <span>Left</span>
  <Separator orientation="vertical" decorative={false} />
  <span>Right</span>
</div>
```
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_config_and_pages() {
        let temp = tempdir().unwrap();

        assert!(scaffold(temp.path(), false).unwrap());

        assert!(temp.path().join("phosphor.toml").exists());
        assert!(temp.path().join("docs/index.mdx").exists());
        assert!(temp.path().join("docs/components/spinner.mdx").exists());
    }

    #[test]
    fn leaves_existing_docs_alone() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();

        assert!(!scaffold(temp.path(), false).unwrap());
        assert!(!temp.path().join("phosphor.toml").exists());
    }

    #[test]
    fn yes_overwrites() {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), false).unwrap();
        fs::write(temp.path().join("docs/index.mdx"), "old").unwrap();

        scaffold(temp.path(), true).unwrap();

        let index = fs::read_to_string(temp.path().join("docs/index.mdx")).unwrap();
        assert!(index.contains("Phosphor"));
    }

    #[test]
    fn scaffolded_config_parses() {
        let config: crate::config::Config = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.docs.title, "Phosphor");
        assert_eq!(config.registry.install_command, "npx phosphor add {name}");
    }

    #[test]
    fn scaffolded_pages_render() {
        for page in [DEFAULT_INDEX, DEFAULT_SPINNER_DOC, DEFAULT_SEPARATOR_DOC] {
            let page = phosphor_docs::parse_page(page).unwrap();
            for block in page.live_blocks() {
                phosphor_docs::render_preview(&block.source).unwrap();
            }
        }
    }
}
