//! Page templates for the documentation site.

use minijinja::Environment;
use serde::Serialize;

use crate::doc::{ComponentDoc, DocError};
use crate::page::TocEntry;

/// A navigation item.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A component a page names but cannot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingComponent {
    pub name: String,
    /// The catalog has the entry, but no widget renders it
    pub in_catalog: bool,
}

impl From<&DocError> for MissingComponent {
    fn from(err: &DocError) -> Self {
        match err {
            DocError::NotFound(name) => Self {
                name: name.clone(),
                in_catalog: false,
            },
            DocError::NoWidget(name) => Self {
                name: name.clone(),
                in_catalog: true,
            },
        }
    }
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    pub description: Option<String>,
    /// Rendered body HTML
    pub content: String,
    pub nav: Vec<NavItem>,
    pub toc: Vec<TocEntry>,
    pub base_url: String,
    /// Stylesheet URLs to link
    pub styles: Vec<String>,
    /// Component section, on component pages
    pub component: Option<ComponentDoc>,
    /// Set on not-found pages
    pub missing: Option<MissingComponent>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to add page template");
        }

        Self { env }
    }

    /// Template a page context should render with.
    pub fn template_for(context: &Context) -> &'static str {
        if context.missing.is_some() {
            "not_found.html"
        } else if context.component.is_some() {
            "component.html"
        } else {
            "doc.html"
        }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }

    /// Render a page with the template its context calls for.
    pub fn render(&self, context: &Context) -> Result<String, minijinja::Error> {
        self.render_page(Self::template_for(context), context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("nav.html", NAV_TEMPLATE),
    ("toc.html", TOC_TEMPLATE),
    ("doc.html", DOC_TEMPLATE),
    ("component.html", COMPONENT_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">{% endif %}
  {% for style in styles %}
  <link rel="stylesheet" href="{{ style }}">
  {% endfor %}
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const TOC_TEMPLATE: &str = r##"{% if toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% include "toc.html" %}
{% endblock %}"##;

const COMPONENT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc component-doc" data-component="{{ component.name }}">
  <header class="component-header">
    <h1>{{ component.title }}</h1>
    {% if component.description %}<p class="lead">{{ component.description }}</p>{% endif %}
  </header>

  <section class="component-preview">
    {% if component.preview %}
    <div class="preview-container">{{ component.preview | safe }}</div>
    {% elif component.preview_error %}
    <div class="preview-error" role="alert">Preview unavailable: {{ component.preview_error }}</div>
    {% endif %}
    {% if component.usage %}
    <pre><code class="language-tsx">{{ component.usage }}</code></pre>
    {% endif %}
  </section>

  <section class="component-install">
    <h2>Installation</h2>
    <pre class="install-command"><code>{{ component.install_command }}</code></pre>
    {% if component.packages %}
    <p class="install-packages">Installs {{ component.packages | join(", ") }}</p>
    {% endif %}
  </section>

  <div class="content">
    {{ content | safe }}
  </div>

  <section class="component-props">
    <h2>Props</h2>
    <table class="props-table">
      <thead>
        <tr><th>Prop</th><th>Type</th><th>Default</th><th>Description</th></tr>
      </thead>
      <tbody>
      {% for row in component.props %}
        <tr>
          <td><code>{{ row.name }}</code></td>
          <td><code>{{ row.ty }}</code></td>
          <td>{% if row.default %}<code>{{ row.default }}</code>{% else %}-{% endif %}</td>
          <td>{{ row.description }}</td>
        </tr>
      {% endfor %}
      </tbody>
    </table>
  </section>
</article>
{% include "toc.html" %}
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc not-found" data-missing="{{ missing.name }}">
  <h1>Component not found</h1>
  {% if missing.in_catalog %}
  <p><code>{{ missing.name }}</code> is in the catalog, but it has no widget to preview.</p>
  {% else %}
  <p>No component named <code>{{ missing.name }}</code> exists in the catalog.</p>
  {% endif %}
  <p><a href="{{ base_url }}">Back to the index</a></p>
</article>
{% endblock %}"##;
