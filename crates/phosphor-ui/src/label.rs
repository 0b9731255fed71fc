//! Form label.

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::RenderError;
use crate::markup::{self, Markup};

#[derive(Debug, Clone, Default)]
pub struct Label {
    pub text: String,
    pub html_for: Option<String>,
    pub required: bool,
    pub attrs: Attrs,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Id of the control this label names.
    pub fn html_for(mut self, id: impl Into<String>) -> Self {
        self.html_for = Some(id.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Component for Label {
    const NAME: &'static str = "label";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "htmlFor",
                ty: "string",
                default: None,
                description: "Id of the labeled control.",
            },
            PropDoc {
                name: "required",
                ty: "boolean",
                default: Some("false"),
                description: "Appends a required marker.",
            },
            PropDoc {
                name: "children",
                ty: "ReactNode",
                default: None,
                description: "Label text.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        let owned: &[&str] = if self.html_for.is_some() { &["for"] } else { &[] };

        markup::render(
            "label.html",
            context! {
                class => self.attrs.merged_class(
                    "text-xs font-medium uppercase tracking-wider leading-none peer-disabled:opacity-70"
                ),
                attrs => self.attrs.rest_except(owned),
                html_for => self.html_for.as_deref(),
                text => &self.text,
                required => self.required,
            },
        )
    }
}
