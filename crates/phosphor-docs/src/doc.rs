//! Component page assembly: usage, preview, install command, props table.

use serde::Serialize;

use phosphor_registry::Catalog;
use phosphor_ui::{props_for, Markup, PropDoc};

use crate::page::Page;
use crate::preview::render_preview;

/// Default installer invocation; `{name}` is replaced by the entry name.
pub const DEFAULT_INSTALL_COMMAND: &str = "npx phosphor add {name}";

/// One row of a component's props table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropsTableRow {
    pub name: String,
    pub ty: String,
    pub default: Option<String>,
    pub description: String,
}

impl From<&PropDoc> for PropsTableRow {
    fn from(doc: &PropDoc) -> Self {
        Self {
            name: doc.name.to_string(),
            ty: doc.ty.to_string(),
            default: doc.default.map(str::to_string),
            description: doc.description.to_string(),
        }
    }
}

/// Everything a component page shows besides its prose.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDoc {
    /// Catalog entry name
    pub name: String,

    pub title: String,

    pub description: Option<String>,

    /// Index of the usage block among the page's code blocks
    #[serde(skip)]
    pub usage_block: Option<usize>,

    /// Source of the first live block
    pub usage: Option<String>,

    /// That block rendered through the widget
    pub preview: Option<Markup>,

    /// Why the preview could not be rendered
    pub preview_error: Option<String>,

    pub install_command: String,

    /// External packages the installer pulls in, dependencies included
    pub packages: Vec<String>,

    pub props: Vec<PropsTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("No widget renders component: {0}")]
    NoWidget(String),
}

/// Substitute `{name}` in an install command template.
pub fn install_command(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

/// Assemble the component section of `page` for catalog entry `name`.
///
/// The entry must exist and have a widget; anything else is a [`DocError`]
/// so the caller can render a not-found page. A preview that fails to
/// render is reported in `preview_error` and does not fail the page.
pub fn assemble(
    catalog: &Catalog,
    name: &str,
    page: &Page,
    install_template: &str,
) -> Result<ComponentDoc, DocError> {
    let entry = catalog
        .find_by_name(name)
        .map_err(|_| DocError::NotFound(name.to_string()))?;
    let props = props_for(&entry.name).ok_or_else(|| DocError::NoWidget(name.to_string()))?;

    let packages = catalog
        .install_plan(&entry.name)
        .map(|plan| plan.packages.iter().map(|p| p.to_string()).collect())
        .unwrap_or_default();

    let usage = page.live_blocks().next();
    let (preview, preview_error) = match usage {
        Some(block) => match render_preview(&block.source) {
            Ok(markup) => (Some(markup), None),
            Err(e) => {
                tracing::warn!("Preview for {} failed: {}", name, e);
                (None, Some(e.to_string()))
            }
        },
        None => (None, None),
    };

    let description = page
        .frontmatter
        .as_ref()
        .and_then(|f| f.description.clone())
        .or_else(|| entry.description.clone());

    Ok(ComponentDoc {
        name: entry.name.clone(),
        title: page
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| entry.display_title().to_string()),
        description,
        usage_block: usage.map(|b| b.index),
        usage: usage.map(|b| b.source.trim_end().to_string()),
        preview,
        preview_error,
        install_command: install_command(install_template, &entry.name),
        packages,
        props: props.iter().map(PropsTableRow::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_page;
    use pretty_assertions::assert_eq;

    const SPINNER_PAGE: &str = r#"---
title: Spinner
component: spinner
---

```tsx live
<Spinner size="SM" />
```

```tsx live
<Spinner size="LG" />
```
"#;

    #[test]
    fn assembles_all_four_pieces() {
        let catalog = phosphor_registry::builtin().unwrap();
        let page = parse_page(SPINNER_PAGE).unwrap();

        let doc = assemble(&catalog, "spinner", &page, DEFAULT_INSTALL_COMMAND).unwrap();

        assert_eq!(doc.usage.as_deref(), Some(r#"<Spinner size="SM" />"#));
        assert_eq!(doc.usage_block, Some(0));
        assert!(doc.preview.unwrap().as_str().contains("font-size: 0.75em"));
        assert_eq!(doc.install_command, "npx phosphor add spinner");
        assert_eq!(doc.props[0].name, "size");
        assert_eq!(doc.props.last().unwrap().name, "...attrs");
        assert!(doc.packages.contains(&"clsx".to_string()));
    }

    #[test]
    fn props_table_matches_widget_schema() {
        let catalog = phosphor_registry::builtin().unwrap();
        let page = parse_page("---\ntitle: Separator\n---\n").unwrap();

        let doc = assemble(&catalog, "separator", &page, "pnpm dlx phosphor add {name}").unwrap();

        let names: Vec<_> = doc.props.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["orientation", "decorative", "label", "...attrs"]);
        assert_eq!(doc.props[1].default.as_deref(), Some("true"));
        assert_eq!(doc.install_command, "pnpm dlx phosphor add separator");
        assert!(doc.usage.is_none());
        assert!(doc.preview.is_none());
    }

    #[test]
    fn missing_entry_is_not_found() {
        let catalog = phosphor_registry::builtin().unwrap();
        let page = parse_page(SPINNER_PAGE).unwrap();

        assert_eq!(
            assemble(&catalog, "button", &page, DEFAULT_INSTALL_COMMAND).unwrap_err(),
            DocError::NotFound("button".to_string())
        );
    }

    #[test]
    fn entry_without_widget_is_rejected() {
        let catalog = phosphor_registry::builtin().unwrap();
        let page = parse_page(SPINNER_PAGE).unwrap();

        assert_eq!(
            assemble(&catalog, "utils", &page, DEFAULT_INSTALL_COMMAND).unwrap_err(),
            DocError::NoWidget("utils".to_string())
        );
    }

    #[test]
    fn broken_preview_keeps_the_page() {
        let catalog = phosphor_registry::builtin().unwrap();
        let page = parse_page("```tsx live\n<Spinner size=\"XL\" />\n```\n").unwrap();

        let doc = assemble(&catalog, "spinner", &page, DEFAULT_INSTALL_COMMAND).unwrap();

        assert!(doc.preview.is_none());
        assert!(doc.preview_error.unwrap().contains("XL"));
        assert_eq!(doc.title, "Spinner");
    }
}
