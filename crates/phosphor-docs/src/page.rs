//! Documentation page parsing and body rendering.

use std::collections::HashMap;

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use phosphor_ui::Markup;

use crate::frontmatter::{split_frontmatter, Frontmatter, FrontmatterError};

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Position among the page's code blocks
    pub index: usize,

    /// First word of the info string, lowercase
    pub language: String,

    /// Marked `live` in the info string
    pub live: bool,

    /// Block contents
    pub source: String,
}

impl CodeBlock {
    fn from_info(index: usize, info: &str) -> Self {
        let mut words = info.split_whitespace();
        let language = words.next().unwrap_or("").to_lowercase();
        let live = words.any(|w| w == "live");

        Self {
            index,
            language,
            live,
            source: String::new(),
        }
    }

    /// Anchor id of this block's preview.
    pub fn id(&self) -> String {
        format!("block-{}", self.index)
    }

    /// Whether this block should be rendered as a live preview.
    pub fn is_live(&self) -> bool {
        self.live && matches!(self.language.as_str(), "tsx" | "jsx")
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TocEntry {
    pub title: String,
    pub id: String,
    pub level: u8,
}

/// A parsed documentation page.
#[derive(Debug, Clone)]
pub struct Page {
    pub frontmatter: Option<Frontmatter>,

    /// Markdown body without frontmatter
    pub body: String,

    pub code_blocks: Vec<CodeBlock>,

    pub toc: Vec<TocEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a page: frontmatter, code blocks, and headings.
pub fn parse_page(source: &str) -> Result<Page, PageError> {
    let (frontmatter, body) = split_frontmatter(source)?;

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();
    let mut slugs: HashMap<String, usize> = HashMap::new();

    let mut block: Option<CodeBlock> = None;
    let mut heading: Option<(u8, String)> = None;

    for event in Parser::new_ext(body, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                block = Some(CodeBlock::from_info(code_blocks.len(), info));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some(done) = block.take() {
                    code_blocks.push(done);
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = heading.take() {
                    let id = unique_slug(&mut slugs, &title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some(block) = block.as_mut() {
                    block.source.push_str(&text);
                } else if let Some((_, title)) = heading.as_mut() {
                    title.push_str(&text);
                }
            }

            _ => {}
        }
    }

    Ok(Page {
        frontmatter,
        body: body.to_string(),
        code_blocks,
        toc,
    })
}

impl Page {
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.as_ref().map(|f| f.title.as_str())
    }

    /// Catalog entry the page documents.
    pub fn component(&self) -> Option<&str> {
        self.frontmatter.as_ref().and_then(|f| f.component.as_deref())
    }

    pub fn live_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.code_blocks.iter().filter(|b| b.is_live())
    }

    /// Render the body to HTML.
    ///
    /// Headings get the ids listed in the TOC. A live block with an entry in
    /// `previews` is preceded by its preview container; the source stays
    /// visible below it. The block at `omit` (a component page's usage
    /// sample, shown separately) is left out.
    pub fn render_html(&self, previews: &HashMap<usize, Markup>, omit: Option<usize>) -> String {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut toc = self.toc.iter();
        let mut block_index = 0;
        let mut skipping = false;

        for event in Parser::new_ext(&self.body, options()) {
            if skipping {
                skipping = !matches!(event, Event::End(TagEnd::CodeBlock));
                continue;
            }

            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    let id = toc
                        .next()
                        .map(|entry| CowStr::from(entry.id.clone()))
                        .or(id);
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    }));
                }

                Event::Start(Tag::CodeBlock(_)) if omit == Some(block_index) => {
                    block_index += 1;
                    skipping = true;
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    if let Some(preview) = previews.get(&block_index) {
                        events.push(Event::Html(CowStr::from(format!(
                            "<div class=\"preview-container\" id=\"block-{}\">{}</div>\n",
                            block_index, preview
                        ))));
                    }
                    block_index += 1;
                    events.push(Event::Start(Tag::CodeBlock(kind)));
                }

                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// URL-safe slug, suffixed when the same heading text repeats.
fn unique_slug(seen: &mut HashMap<String, usize>, text: &str) -> String {
    let base = slugify(text);
    let count = seen.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    slug
}

pub(crate) fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SPINNER_PAGE: &str = r#"---
title: Spinner
component: spinner
---

# Spinner

Shows work in progress.

```tsx live
<Spinner size="LG" label="Loading" />
```

## Usage

```tsx
import { Spinner } from "@/components/ui/spinner";
```

## Usage
"#;

    #[test]
    fn extracts_blocks_and_headings() {
        let page = parse_page(SPINNER_PAGE).unwrap();

        assert_eq!(page.title(), Some("Spinner"));
        assert_eq!(page.component(), Some("spinner"));

        assert_eq!(page.code_blocks.len(), 2);
        assert!(page.code_blocks[0].is_live());
        assert_eq!(
            page.code_blocks[0].source.trim(),
            r#"<Spinner size="LG" label="Loading" />"#
        );
        assert!(!page.code_blocks[1].is_live());

        let ids: Vec<_> = page.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["spinner", "usage", "usage-1"]);
        assert_eq!(page.toc[1].level, 2);
    }

    #[test]
    fn live_needs_jsx() {
        let page = parse_page("```css live\n.a {}\n```\n").unwrap();

        assert!(page.code_blocks[0].live);
        assert!(!page.code_blocks[0].is_live());
        assert_eq!(page.live_blocks().count(), 0);
    }

    #[test]
    fn renders_previews_before_source() {
        let page = parse_page(SPINNER_PAGE).unwrap();
        let mut previews = HashMap::new();
        previews.insert(0, Markup::trusted("<span data-spinner></span>"));

        let html = page.render_html(&previews, None);

        let preview = html.find("preview-container").unwrap();
        let source = html.find("language-tsx").unwrap();
        assert!(preview < source);
        assert!(html.contains(r#"id="block-0""#));
        assert!(html.contains(r#"<h1 id="spinner">"#));
        assert!(html.contains(r#"<h2 id="usage-1">"#));
        assert_eq!(html.matches("preview-container").count(), 1);
    }

    #[test]
    fn omits_usage_block() {
        let page = parse_page(SPINNER_PAGE).unwrap();

        let html = page.render_html(&HashMap::new(), Some(0));

        assert!(!html.contains("Spinner size"));
        assert!(html.contains("import"));
        assert!(html.contains(r#"<h2 id="usage">"#));
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Props (API)"), "props-api");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn inline_code_counts_toward_heading() {
        let page = parse_page("## The `size` prop\n").unwrap();

        assert_eq!(page.toc[0].title, "The size prop");
        assert_eq!(page.toc[0].id, "the-size-prop");
    }
}
