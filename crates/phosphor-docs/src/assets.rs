//! Site CSS and the browser runtime for live widgets.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("CSS parse error: {0}")]
    Parse(String),

    #[error("CSS minify error: {0}")]
    Print(String),
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Site theme followed by the classes the widgets emit.
    pub fn generate_css() -> String {
        format!("{}\n{}", THEME_CSS, WIDGET_CSS)
    }

    pub fn generate_js() -> String {
        RUNTIME_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, AssetError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| AssetError::Parse(e.to_string()))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| AssetError::Print(e.to_string()))?;

        Ok(minified.code)
    }
}

const THEME_CSS: &str = r#"/* phosphor terminal theme */
:root {
  --background: #05080a;
  --foreground: #b8f5c8;
  --muted: #0d1512;
  --muted-foreground: #5f8f6e;
  --border: #1d3326;
  --primary: #39ff88;
  --primary-foreground: #021408;
  --destructive: #ff5f56;
  --font-mono: "JetBrains Mono", "IBM Plex Mono", ui-monospace, monospace;
  --sidebar-width: 260px;
  --toc-width: 200px;
  --content-max-width: 820px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-mono);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  text-shadow: 0 0 2px rgba(57, 255, 136, 0.35);
}

a {
  color: var(--primary);
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-logo {
  display: block;
  margin-bottom: 1.5rem;
  font-weight: 700;
  letter-spacing: 0.1em;
  text-transform: uppercase;
  text-decoration: none;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  padding-left: 1rem;
}

.nav-item a {
  display: block;
  padding: 0.25rem 0.5rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

.nav-item.active > a,
.nav-item a:hover {
  color: var(--primary);
}

.main {
  display: grid;
  grid-template-columns: minmax(0, var(--content-max-width)) var(--toc-width);
  gap: 2rem;
  padding: 2rem 3rem;
}

.doc h1,
.doc h2,
.doc h3 {
  margin: 1.5rem 0 0.75rem;
  color: var(--primary);
}

.doc p,
.doc ul,
.doc table {
  margin-bottom: 1rem;
}

.doc pre {
  position: relative;
  margin-bottom: 1rem;
  padding: 1rem;
  overflow-x: auto;
  background: var(--muted);
  border: 1px solid var(--border);
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.125rem 0.5rem;
  font: inherit;
  font-size: 0.75rem;
  color: var(--muted-foreground);
  background: transparent;
  border: 1px solid var(--border);
  cursor: pointer;
}

.preview-container {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  align-items: center;
  padding: 2rem;
  margin-bottom: 0.5rem;
  border: 1px dashed var(--border);
}

.preview-error,
.not-found {
  color: var(--destructive);
}

.props-table {
  width: 100%;
  border-collapse: collapse;
}

.props-table th,
.props-table td {
  padding: 0.5rem;
  text-align: left;
  border-bottom: 1px solid var(--border);
}

.toc {
  position: sticky;
  top: 2rem;
  align-self: start;
  font-size: 0.875rem;
}

.toc ul {
  list-style: none;
}

.toc-level-3 {
  padding-left: 1rem;
}

@media (max-width: 1024px) {
  .layout,
  .main {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }

  .toc {
    display: none;
  }
}
"#;

const WIDGET_CSS: &str = r#"/* widget classes */
.sr-only {
  position: absolute;
  width: 1px;
  height: 1px;
  overflow: hidden;
  clip: rect(0, 0, 0, 0);
  white-space: nowrap;
}

.inline-flex { display: inline-flex; }
.flex { display: flex; }
.grid { display: grid; }
.flex-1 { flex: 1 1 0%; }
.shrink-0 { flex-shrink: 0; }
.items-center { align-items: center; }
.w-full { width: 100%; }
.h-full { height: 100%; }
.h-px { height: 1px; }
.w-px { width: 1px; }
.bg-border { background: var(--border); }
.bg-muted { background: var(--muted); }
.text-xs { font-size: 0.75rem; }
.text-muted-foreground { color: var(--muted-foreground); }
.uppercase { text-transform: uppercase; }
.tracking-widest { letter-spacing: 0.1em; }
.font-mono { font-family: var(--font-mono); }
.px-2 { padding-left: 0.5rem; padding-right: 0.5rem; }
.px-1\.5 { padding-left: 0.375rem; padding-right: 0.375rem; }
.border { border-width: 1px; border-style: solid; }
.border-border { border-color: var(--border); }
.font-medium { font-weight: 500; }
.tracking-wider { letter-spacing: 0.05em; }
.leading-none { line-height: 1; }
.text-primary { color: var(--primary); }

.gap-1 { gap: 0.25rem; }
.gap-2 { gap: 0.5rem; }
.gap-4 { gap: 1rem; }
.gap-8 { gap: 2rem; }

.grid-cols-1 { grid-template-columns: repeat(1, minmax(0, 1fr)); }
.grid-cols-2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
.grid-cols-3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
.grid-cols-4 { grid-template-columns: repeat(4, minmax(0, 1fr)); }
.grid-cols-\[16rem_1fr\] { grid-template-columns: 16rem 1fr; }
.grid-cols-\[repeat\(auto-fit\,minmax\(12rem\,1fr\)\)\] {
  grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr));
}

.animate-pulse {
  animation: pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;
}

@keyframes pulse {
  50% { opacity: 0.5; }
}

kbd {
  display: inline-flex;
  align-items: center;
  gap: 0.25rem;
  font-family: var(--font-mono);
}

.kbd-key {
  padding: 0 0.375rem;
  border: 1px solid var(--border);
  border-bottom-width: 2px;
  background: var(--muted);
}

.label-required {
  margin-left: 0.125rem;
  color: var(--destructive);
}
"#;

const RUNTIME_JS: &str = r#"// phosphor docs runtime
(function() {
  'use strict';

  // Animate spinners with the frames and interval they were rendered with.
  // A spinner's timer is cleared once the element leaves the document.
  function startSpinner(el) {
    if (el.dataset.spinnerStarted) return;
    el.dataset.spinnerStarted = 'true';

    const frames = Array.from(el.dataset.frames || '|/-\\');
    const interval = parseInt(el.dataset.interval, 10) || 120;
    const glyph = el.querySelector('.spinner-frame');
    if (!glyph || frames.length === 0) return;

    let index = 0;
    const timer = setInterval(() => {
      if (!el.isConnected) {
        clearInterval(timer);
        return;
      }
      index = (index + 1) % frames.length;
      glyph.textContent = frames[index];
    }, interval);
  }

  document.querySelectorAll('[data-spinner]').forEach(startSpinner);

  new MutationObserver(records => {
    records.forEach(record => {
      record.addedNodes.forEach(node => {
        if (!(node instanceof Element)) return;
        if (node.matches('[data-spinner]')) startSpinner(node);
        node.querySelectorAll('[data-spinner]').forEach(startSpinner);
      });
    });
  }).observe(document.body, { childList: true, subtree: true });

  // Highlight current nav item
  const currentPath = window.location.pathname;
  document.querySelectorAll('.nav-item a').forEach(link => {
    const href = link.getAttribute('href');
    if (href === currentPath || (href !== '/' && currentPath.startsWith(href))) {
      link.parentElement.classList.add('active');
    }
  });

  // Copy button for code blocks
  document.querySelectorAll('.doc pre').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.type = 'button';
    btn.textContent = 'Copy';

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      try {
        await navigator.clipboard.writeText((code || pre).textContent || '');
        btn.textContent = 'Copied';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });

    pre.appendChild(btn);
  });
})();
"#;
