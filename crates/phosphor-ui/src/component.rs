//! The widget contract and declared prop schemas.

use crate::error::RenderError;
use crate::markup::Markup;

/// One documented option of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropDoc {
    /// Prop name as written in JSX
    pub name: &'static str,
    /// Declared type, as display text
    pub ty: &'static str,
    /// Default value, as display text
    pub default: Option<&'static str>,
    /// Human-readable description
    pub description: &'static str,
}

/// Attributes every widget forwards to its root element.
pub const PASS_THROUGH: PropDoc = PropDoc {
    name: "...attrs",
    ty: "HTML attributes",
    default: None,
    description: "Forwarded to the root element; className is merged.",
};

/// A server-rendered widget.
pub trait Component {
    /// Catalog entry name of this widget (e.g. "spinner")
    const NAME: &'static str;

    /// Options this widget accepts, in display order.
    fn props() -> &'static [PropDoc];

    /// Render to HTML.
    fn render(&self) -> Result<Markup, RenderError>;
}
