//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use phosphor_registry::Catalog;
use phosphor_ui::Markup;

use crate::assets::AssetPipeline;
use crate::doc::{assemble, ComponentDoc, DocError, DEFAULT_INSTALL_COMMAND};
use crate::page::{parse_page, Page};
use crate::preview::render_preview;
use crate::templates::{Context, MissingComponent, NavItem, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Install command template; `{name}` is the entry name
    pub install_command: String,

    /// Fail the build on pages naming a component the catalog lacks
    pub strict: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            strict: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of live previews rendered
    pub previews: usize,

    /// Component names that rendered a not-found page
    pub missing: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse page: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("{path}: {source}")]
    MissingComponent { path: String, source: DocError },
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Relative path from docs dir
    relative_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    page: Page,
}

/// What building one page produced.
#[derive(Debug, Default)]
struct PageOutcome {
    previews: usize,
    missing: Option<MissingComponent>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    catalog: Arc<Catalog>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    pub fn new(config: BuildConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            config,
            catalog,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        tracing::info!(
            "Found {} pages in {}",
            pages.len(),
            self.config.docs_dir.display()
        );

        let nav = self.build_navigation(&pages);

        let results: Vec<Result<PageOutcome, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &nav))
            .collect();

        let mut previews = 0;
        let mut missing = Vec::new();

        for result in results {
            let outcome = result?;
            previews += outcome.previews;
            missing.extend(outcome.missing.map(|m| m.name));
        }

        self.generate_assets()?;
        self.generate_search_index(&pages)?;
        self.generate_sitemap(&pages)?;
        self.publish_registry()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            previews,
            missing,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all Markdown and MDX pages in the docs directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let page = parse_page(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let output_path = self.calculate_output_path(&relative_path, &page);

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                relative_path,
                output_path,
                page,
            });
        }

        pages.sort_by(|a, b| {
            page_order(&a.page)
                .cmp(&page_order(&b.page))
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        Ok(pages)
    }

    /// Calculate output path for a page.
    fn calculate_output_path(&self, relative: &Path, page: &Page) -> PathBuf {
        if let Some(slug) = page.frontmatter.as_ref().and_then(|f| f.slug.as_deref()) {
            return self
                .config
                .output_dir
                .join(slug.trim_matches('/'))
                .join("index.html");
        }

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = relative.parent().unwrap_or(Path::new(""));

        if stem == "index" {
            // docs/index.mdx -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // docs/components/spinner.mdx -> dist/components/spinner/index.html
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }

    /// Build navigation structure from pages.
    fn build_navigation(&self, pages: &[PageInfo]) -> Vec<NavItem> {
        let mut nav = Vec::new();
        let mut dirs: Vec<(PathBuf, Vec<NavItem>)> = Vec::new();

        for page in pages {
            if page.page.frontmatter.as_ref().is_some_and(|f| !f.nav) {
                continue;
            }

            let title = page.page.title().map(str::to_string).unwrap_or_else(|| {
                page.relative_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Untitled")
                    .to_string()
            });

            let item = NavItem {
                title,
                path: self.path_to_url(&page.output_path),
                children: Vec::new(),
                active: false,
            };

            let parent = page.relative_path.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                nav.push(item);
                continue;
            }

            // Sections keep the order of their first page.
            match dirs.iter_mut().find(|(dir, _)| dir == parent) {
                Some((_, items)) => items.push(item),
                None => dirs.push((parent.to_path_buf(), vec![item])),
            }
        }

        for (dir, items) in dirs {
            let dir_name = dir
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("Section");

            nav.push(NavItem {
                title: capitalize(dir_name),
                path: format!("{}{}/", self.config.base_url, url_path(&dir)),
                children: items,
                active: false,
            });
        }

        nav
    }

    /// Convert output path to URL.
    fn path_to_url(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.output_dir).unwrap_or(path);
        let url = relative.parent().map(url_path).unwrap_or_default();

        if url.is_empty() {
            self.config.base_url.clone()
        } else {
            format!("{}{}/", self.config.base_url, url)
        }
    }

    /// Build a single page.
    fn build_page(&self, info: &PageInfo, nav: &[NavItem]) -> Result<PageOutcome, BuildError> {
        let page = &info.page;
        let mut outcome = PageOutcome::default();

        let mut component: Option<ComponentDoc> = None;
        if let Some(name) = page.component() {
            match assemble(&self.catalog, name, page, &self.config.install_command) {
                Ok(doc) => {
                    if doc.preview.is_some() {
                        outcome.previews += 1;
                    }
                    component = Some(doc);
                }
                Err(e) if self.config.strict => {
                    return Err(BuildError::MissingComponent {
                        path: info.source_path.display().to_string(),
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!("{} in {}", e, info.source_path.display());
                    outcome.missing = Some(MissingComponent::from(&e));
                }
            }
        }

        let usage_block = component.as_ref().and_then(|c| c.usage_block);
        let mut previews: HashMap<usize, Markup> = HashMap::new();

        // A not-found page shows none of its blocks.
        if outcome.missing.is_none() {
            for block in page.live_blocks() {
                if Some(block.index) == usage_block {
                    continue;
                }
                match render_preview(&block.source) {
                    Ok(markup) => {
                        previews.insert(block.index, markup);
                        outcome.previews += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Skipping preview for {} in {}: {}",
                            block.id(),
                            info.source_path.display(),
                            e
                        );
                    }
                }
            }
        }

        let content = if outcome.missing.is_some() {
            String::new()
        } else {
            page.render_html(&previews, usage_block)
        };

        let title = page
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| "Untitled".to_string());

        let context = Context {
            title,
            site_title: self.config.title.clone(),
            description: page.frontmatter.as_ref().and_then(|f| f.description.clone()),
            content,
            nav: nav.to_vec(),
            toc: page.toc.clone(),
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| format!("{}assets/{}", self.config.base_url, style_file_name(s)))
                .collect(),
            component,
            missing: outcome.missing.clone(),
        };

        let html = self
            .templates
            .render(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = info.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&info.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Wrote {}", info.output_path.display());

        Ok(outcome)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Writing unminified CSS: {}", e);
                    css
                }
            }
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if !source_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path);
                continue;
            }

            let content = fs::read_to_string(&source_path)
                .map_err(|e| BuildError::ReadError(format!("Failed to read stylesheet: {}", e)))?;
            fs::write(assets_dir.join(style_file_name(style_path)), content)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
            tracing::info!("Copied stylesheet from {}", style_path);
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|info| {
                let fm = info.page.frontmatter.as_ref();

                let content = info
                    .page
                    .body
                    .lines()
                    .filter(|l| !l.starts_with('#') && !l.starts_with("```"))
                    .filter(|l| !l.trim().is_empty())
                    .take(10)
                    .collect::<Vec<_>>()
                    .join(" ");

                serde_json::json!({
                    "title": info.page.title().unwrap_or_default(),
                    "description": fm.and_then(|f| f.description.clone()).unwrap_or_default(),
                    "component": info.page.component(),
                    "url": self.path_to_url(&info.output_path),
                    "content": content,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|info| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    self.path_to_url(&info.output_path)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Write `registry.json` and one `r/{name}.json` per entry for installers.
    fn publish_registry(&self) -> Result<(), BuildError> {
        let manifest = self
            .catalog
            .to_json()
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        fs::write(self.config.output_dir.join("registry.json"), manifest)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let items_dir = self.config.output_dir.join("r");
        fs::create_dir_all(&items_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for entry in self.catalog.list_all() {
            let json = serde_json::to_string_pretty(entry)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
            fs::write(items_dir.join(format!("{}.json", entry.name)), json)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        tracing::info!("Published {} registry entries", self.catalog.len());
        Ok(())
    }
}

fn page_order(page: &Page) -> i32 {
    page.frontmatter
        .as_ref()
        .and_then(|f| f.order)
        .unwrap_or(999)
}

/// Forward-slash URL segment for a relative path.
fn url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn style_file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
