//! Loading placeholder.

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::RenderError;
use crate::markup::{self, Markup};

#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    /// CSS width, e.g. `12rem`
    pub width: Option<String>,
    /// CSS height, e.g. `1rem`
    pub height: Option<String>,
    pub attrs: Attrs,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    fn style(&self) -> Option<String> {
        let parts: Vec<String> = [("width", &self.width), ("height", &self.height)]
            .into_iter()
            .filter_map(|(prop, value)| value.as_ref().map(|v| format!("{prop}: {v}")))
            .collect();

        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

impl Component for Skeleton {
    const NAME: &'static str = "skeleton";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "width",
                ty: "string",
                default: None,
                description: "CSS width of the placeholder.",
            },
            PropDoc {
                name: "height",
                ty: "string",
                default: None,
                description: "CSS height of the placeholder.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        let style = self.style();
        let owned: &[&str] = if style.is_some() {
            &["aria-hidden", "style"]
        } else {
            &["aria-hidden"]
        };

        markup::render(
            "skeleton.html",
            context! {
                class => self.attrs.merged_class("animate-pulse bg-muted"),
                attrs => self.attrs.rest_except(owned),
                style => style,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sized_placeholder() {
        let html = Skeleton::new().width("12rem").height("1rem").render().unwrap();

        assert!(html.as_str().contains("animate-pulse"));
        assert!(html.as_str().contains(r#"style="width: 12rem; height: 1rem""#));
        assert!(html.as_str().contains(r#"aria-hidden="true""#));
    }

    #[test]
    fn omits_style_when_unsized() {
        let html = Skeleton::new()
            .attrs(Attrs::new().class("h-4 w-32"))
            .render()
            .unwrap();

        assert!(!html.as_str().contains("style="));
        assert!(html.as_str().contains("animate-pulse bg-muted h-4 w-32"));
    }

    #[test]
    fn sized_style_wins_over_pass_through() {
        let attrs = Attrs::new().set("style", "opacity: 0.5").set("aria-hidden", "false");

        let sized = Skeleton::new().width("4rem").attrs(attrs.clone()).render().unwrap();
        assert_eq!(sized.as_str().matches("style=").count(), 1);
        assert!(sized.as_str().contains(r#"style="width: 4rem""#));
        assert_eq!(sized.as_str().matches("aria-hidden=").count(), 1);

        let no_size = Skeleton::new().attrs(attrs).render().unwrap();
        assert!(no_size.as_str().contains(r#"style="opacity: 0.5""#));
    }
}
