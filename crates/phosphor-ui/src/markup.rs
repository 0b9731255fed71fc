//! HTML output and the widget template set.

use std::fmt;
use std::sync::LazyLock;

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::RenderError;

/// Rendered HTML that is safe to embed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Escape plain text into markup.
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    /// Wrap HTML produced by a widget or another trusted renderer.
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape HTML special characters including single quotes.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .expect("Failed to add widget template");
    }

    env
});

/// Render a widget template. Template names end in `.html`, so values are
/// auto-escaped.
pub(crate) fn render(template: &str, ctx: Value) -> Result<Markup, RenderError> {
    let html = ENV.get_template(template)?.render(ctx)?;
    Ok(Markup(html))
}

const TEMPLATES: &[(&str, &str)] = &[
    ("kbd.html", KBD_TEMPLATE),
    ("label.html", LABEL_TEMPLATE),
    ("separator.html", SEPARATOR_TEMPLATE),
    ("skeleton.html", SKELETON_TEMPLATE),
    ("spinner.html", SPINNER_TEMPLATE),
    ("grid.html", GRID_TEMPLATE),
];

const KBD_TEMPLATE: &str = r##"<kbd class="{{ class }}"{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}>
{% for key in keys %}
{% if not loop.first %}<span class="kbd-join" aria-hidden="true">+</span>{% endif %}
<span class="kbd-key">{{ key }}</span>
{% endfor %}
</kbd>"##;

const LABEL_TEMPLATE: &str = r##"<label class="{{ class }}"{% if html_for %} for="{{ html_for }}"{% endif %}{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}>
{{ text }}
{% if required %}<span class="label-required" aria-hidden="true">*</span>{% endif %}
</label>"##;

const SEPARATOR_TEMPLATE: &str = r##"{% if labeled %}
<div class="{{ class }}" role="{{ role }}" data-orientation="horizontal"{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}>
<div class="separator-line h-px flex-1 bg-border"></div>
<span class="separator-label px-2 text-xs uppercase tracking-widest text-muted-foreground">{{ label }}</span>
<div class="separator-line h-px flex-1 bg-border"></div>
</div>
{% else %}
<div class="{{ class }}" role="{{ role }}"{% if aria_orientation %} aria-orientation="{{ aria_orientation }}"{% endif %} data-orientation="{{ orientation }}"{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}></div>
{% endif %}"##;

const SKELETON_TEMPLATE: &str = r##"<div class="{{ class }}" aria-hidden="true"{% if style %} style="{{ style }}"{% endif %}{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}></div>"##;

const SPINNER_TEMPLATE: &str = r##"<span class="{{ class }}" role="status" aria-live="polite" style="font-size: {{ scale }}em" data-spinner data-frames="{{ frames }}" data-interval="{{ interval_ms }}"{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}>
<span class="spinner-frame" aria-hidden="true">{{ frame }}</span>
{% if label %}
<span class="spinner-label">{{ label }}</span>
{% else %}
<span class="sr-only">Loading</span>
{% endif %}
</span>"##;

const GRID_TEMPLATE: &str = r##"<div class="{{ class }}" data-preset="{{ preset }}" data-columns="{{ columns }}"{% for a in attrs %} {{ a.name }}="{{ a.value }}"{% endfor %}>
{% for child in children %}
{{ child | safe }}
{% endfor %}
</div>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text() {
        assert_eq!(
            Markup::text(r#"<a href="x">'hi' & bye</a>"#).as_str(),
            "&lt;a href=&quot;x&quot;&gt;&#x27;hi&#x27; &amp; bye&lt;/a&gt;"
        );
    }

    #[test]
    fn every_template_parses() {
        for &(name, _) in TEMPLATES {
            assert!(ENV.get_template(name).is_ok(), "{name} should load");
        }
    }
}
