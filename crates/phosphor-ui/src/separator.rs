//! Divider line, optionally labeled.

use std::str::FromStr;

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::{InvalidOption, RenderError};
use crate::markup::{self, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    fn line_class(&self) -> &'static str {
        match self {
            Self::Horizontal => "separator-line shrink-0 bg-border h-px w-full",
            Self::Vertical => "separator-line shrink-0 bg-border h-full w-px",
        }
    }
}

impl FromStr for Orientation {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(InvalidOption {
                option: "orientation",
                value: s.to_string(),
                expected: "horizontal, vertical",
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Separator {
    pub orientation: Orientation,
    pub decorative: bool,
    pub label: Option<String>,
    pub attrs: Attrs,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            decorative: true,
            label: None,
            attrs: Attrs::default(),
        }
    }
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn decorative(mut self, decorative: bool) -> Self {
        self.decorative = decorative;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Label shown only on a horizontal separator.
    pub fn visible_label(&self) -> Option<&str> {
        match self.orientation {
            Orientation::Horizontal => self.label.as_deref().filter(|l| !l.is_empty()),
            Orientation::Vertical => None,
        }
    }
}

impl Component for Separator {
    const NAME: &'static str = "separator";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "orientation",
                ty: "\"horizontal\" | \"vertical\"",
                default: Some("\"horizontal\""),
                description: "Direction of the line.",
            },
            PropDoc {
                name: "decorative",
                ty: "boolean",
                default: Some("true"),
                description: "Purely visual; hides the separator from assistive technology.",
            },
            PropDoc {
                name: "label",
                ty: "string",
                default: None,
                description: "Text centered between two lines. Horizontal only.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        let role = if self.decorative { "none" } else { "separator" };
        // Horizontal is the implicit orientation of role=separator.
        let aria_orientation = (!self.decorative && self.orientation == Orientation::Vertical)
            .then_some("vertical");
        let owned: &[&str] = if aria_orientation.is_some() {
            &["role", "aria-orientation", "data-orientation"]
        } else {
            &["role", "data-orientation"]
        };

        let ctx = match self.visible_label() {
            Some(label) => context! {
                labeled => true,
                label => label,
                role => role,
                class => self.attrs.merged_class("flex w-full items-center"),
                attrs => self.attrs.rest_except(&["role", "data-orientation"]),
            },
            None => context! {
                labeled => false,
                role => role,
                aria_orientation => aria_orientation,
                orientation => self.orientation.as_str(),
                class => self.attrs.merged_class(self.orientation.line_class()),
                attrs => self.attrs.rest_except(owned),
            },
        };

        markup::render("separator.html", ctx)
    }
}
