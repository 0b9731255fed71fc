//! Keyboard key / shortcut.

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::RenderError;
use crate::markup::{self, Markup};

/// One key, or a chord such as `Ctrl+K`.
#[derive(Debug, Clone, Default)]
pub struct Kbd {
    pub keys: Vec<String>,
    pub attrs: Attrs,
}

impl Kbd {
    /// A single key cap.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            keys: vec![key.into()],
            attrs: Attrs::default(),
        }
    }

    /// A chord; `"Ctrl+Shift+P"` renders three caps.
    pub fn chord(chord: &str) -> Self {
        Self {
            keys: chord
                .split('+')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            attrs: Attrs::default(),
        }
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Component for Kbd {
    const NAME: &'static str = "kbd";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "children",
                ty: "ReactNode",
                default: None,
                description: "Key text. A `+` separated chord renders one cap per key.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        markup::render(
            "kbd.html",
            context! {
                class => self.attrs.merged_class(
                    "inline-flex items-center gap-1 border border-border px-1.5 font-mono text-xs"
                ),
                attrs => self.attrs.rest(),
                keys => &self.keys,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_key() {
        let html = Kbd::new("Esc").render().unwrap();

        assert!(html.as_str().starts_with("<kbd "));
        assert!(html.as_str().contains(r#"<span class="kbd-key">Esc</span>"#));
        assert!(!html.as_str().contains("kbd-join"));
    }

    #[test]
    fn splits_chords() {
        let kbd = Kbd::chord("Ctrl + Shift+P");
        assert_eq!(kbd.keys, vec!["Ctrl", "Shift", "P"]);

        let html = kbd.render().unwrap();
        assert_eq!(html.as_str().matches("kbd-key").count(), 3);
        assert_eq!(html.as_str().matches("kbd-join").count(), 2);
    }

    #[test]
    fn forwards_attributes_once() {
        let html = Kbd::new("K")
            .attrs(Attrs::new().set("title", "Search").set("title", "Find"))
            .render()
            .unwrap();

        assert_eq!(html.as_str().matches("title=").count(), 1);
        assert!(html.as_str().contains(r#"title="Find""#));
    }
}
