//! YAML frontmatter of a documentation page.

use serde::Deserialize;

/// Page metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Summary used for search and the page header
    #[serde(default)]
    pub description: Option<String>,

    /// Catalog entry this page documents
    #[serde(default)]
    pub component: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether to show in navigation
    #[serde(default = "default_true")]
    pub nav: bool,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Split a page into frontmatter and body.
///
/// Pages without a leading `---` block have no frontmatter.
pub fn split_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((None, source));
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml = after_open[..close_pos].trim();
    let body = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), body.trim_start()))
}

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
