//! ASCII spinner.

use std::str::FromStr;
use std::time::Duration;

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::{InvalidOption, RenderError};
use crate::markup::{self, Markup};

/// Animation frames, in display order.
pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Time each frame stays on screen.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

const OWNED_ATTRS: &[&str] = &[
    "role",
    "aria-live",
    "style",
    "data-spinner",
    "data-frames",
    "data-interval",
];

/// Display scale of a spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl SpinnerSize {
    /// Font scale relative to the surrounding text.
    pub fn scale(&self) -> f32 {
        match self {
            Self::Sm => 0.75,
            Self::Md => 1.0,
            Self::Lg => 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "SM",
            Self::Md => "MD",
            Self::Lg => "LG",
        }
    }
}

impl FromStr for SpinnerSize {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SM" => Ok(Self::Sm),
            "MD" => Ok(Self::Md),
            "LG" => Ok(Self::Lg),
            _ => Err(InvalidOption {
                option: "size",
                value: s.to_string(),
                expected: "SM, MD, LG",
            }),
        }
    }
}

/// A spinner showing its first frame; the site script animates it.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    pub size: SpinnerSize,
    pub label: Option<String>,
    pub attrs: Attrs,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: SpinnerSize) -> Self {
        self.size = size;
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
}

impl Component for Spinner {
    const NAME: &'static str = "spinner";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "size",
                ty: "\"SM\" | \"MD\" | \"LG\"",
                default: Some("\"MD\""),
                description: "Display scale of the glyph.",
            },
            PropDoc {
                name: "label",
                ty: "string",
                default: None,
                description: "Accessible status text, also shown next to the glyph.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        let frames: String = SPINNER_FRAMES.iter().collect();

        markup::render(
            "spinner.html",
            context! {
                class => self.attrs.merged_class("inline-flex items-center gap-2 font-mono"),
                attrs => self.attrs.rest_except(OWNED_ATTRS),
                scale => self.size.scale().to_string(),
                frames => frames,
                interval_ms => SPINNER_INTERVAL.as_millis() as u64,
                frame => SPINNER_FRAMES[0].to_string(),
                label => self.label.as_deref().filter(|l| !l.is_empty()),
            },
        )
    }
}
