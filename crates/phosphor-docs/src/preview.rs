//! Live previews: inline JSX rendered through the phosphor widgets.

use phosphor_ui::markup::escape;
use phosphor_ui::{
    Attrs, Component, Grid, GridGap, GridPreset, InvalidOption, Kbd, Label, Markup, Orientation,
    RenderError, Separator, Skeleton, Spinner, SpinnerSize,
};

use crate::jsx::{parse_jsx, JsxElement, JsxError, JsxNode, PropValue};

/// Errors that can occur rendering a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error(transparent)]
    Jsx(#[from] JsxError),

    #[error("Unknown component <{0}>")]
    UnknownComponent(String),

    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Render a live code block.
pub fn render_preview(source: &str) -> Result<Markup, PreviewError> {
    let nodes = parse_jsx(source)?;
    render_nodes(&nodes)
}

fn render_nodes(nodes: &[JsxNode]) -> Result<Markup, PreviewError> {
    let mut html = String::new();
    for node in nodes {
        html.push_str(render_node(node)?.as_str());
    }
    Ok(Markup::trusted(html))
}

fn render_node(node: &JsxNode) -> Result<Markup, PreviewError> {
    match node {
        JsxNode::Text(text) => Ok(Markup::text(text)),
        JsxNode::Element(el) if el.is_fragment() => render_nodes(&el.children),
        JsxNode::Element(el) if el.is_component() => render_component(el),
        JsxNode::Element(el) => render_html_element(el),
    }
}

fn render_component(el: &JsxElement) -> Result<Markup, PreviewError> {
    let mut props = Props::new(el);

    let markup = match el.name.as_str() {
        "Kbd" => Kbd::chord(&el.text()).attrs(props.into_attrs()).render()?,

        "Label" => {
            let mut label = Label::new(el.text()).required(props.flag("required")?);
            if let Some(id) = props.string("htmlFor") {
                label = label.html_for(id);
            }
            label.attrs(props.into_attrs()).render()?
        }

        "Separator" => {
            let mut sep = Separator::new();
            if let Some(o) = props.string("orientation") {
                sep = sep.orientation(o.parse::<Orientation>()?);
            }
            if let Some(d) = props.bool("decorative")? {
                sep = sep.decorative(d);
            }
            if let Some(label) = props.string("label") {
                sep = sep.label(label);
            }
            sep.attrs(props.into_attrs()).render()?
        }

        "Skeleton" => {
            let mut skeleton = Skeleton::new();
            if let Some(w) = props.string("width") {
                skeleton = skeleton.width(w);
            }
            if let Some(h) = props.string("height") {
                skeleton = skeleton.height(h);
            }
            skeleton.attrs(props.into_attrs()).render()?
        }

        "Spinner" => {
            let mut spinner = Spinner::new();
            if let Some(size) = props.string("size") {
                spinner = spinner.size(size.parse::<SpinnerSize>()?);
            }
            if let Some(label) = props.string("label") {
                spinner = spinner.label(label);
            }
            spinner.attrs(props.into_attrs()).render()?
        }

        "Grid" => {
            let preset = match props.string("preset") {
                Some(p) => p.parse::<GridPreset>()?,
                None => GridPreset::default(),
            };
            let mut grid = Grid::new(preset);
            if let Some(gap) = props.string("gap") {
                grid = grid.gap(gap.parse::<GridGap>()?);
            }
            for child in &el.children {
                grid = grid.child(render_node(child)?);
            }
            grid.attrs(props.into_attrs()).render()?
        }

        other => return Err(PreviewError::UnknownComponent(other.to_string())),
    };

    Ok(markup)
}

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source", "wbr"];

/// Plain lowercase elements (`<div>`, `<p>`) pass through with escaped attributes.
fn render_html_element(el: &JsxElement) -> Result<Markup, PreviewError> {
    let attrs = Props::new(el).into_attrs();

    let mut html = format!("<{}", el.name);
    let class = attrs.merged_class("");
    if !class.is_empty() {
        html.push_str(&format!(" class=\"{}\"", escape(&class)));
    }
    for attr in attrs.rest() {
        html.push_str(&format!(" {}=\"{}\"", attr.name, escape(&attr.value)));
    }

    if VOID_ELEMENTS.contains(&el.name.as_str()) {
        html.push_str(" />");
        return Ok(Markup::trusted(html));
    }

    html.push('>');
    html.push_str(render_nodes(&el.children)?.as_str());
    html.push_str(&format!("</{}>", el.name));

    Ok(Markup::trusted(html))
}

/// Props of one element; named options are taken out, the rest pass through.
struct Props {
    remaining: Vec<(String, PropValue)>,
}

impl Props {
    fn new(el: &JsxElement) -> Self {
        Self {
            remaining: el.props.clone(),
        }
    }

    fn take(&mut self, name: &str) -> Option<PropValue> {
        let pos = self.remaining.iter().position(|(n, _)| n == name)?;
        Some(self.remaining.remove(pos).1)
    }

    fn string(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            PropValue::String(s) => Some(s),
            PropValue::Expression(expr) => {
                tracing::debug!("Ignoring expression for {}: {}", name, expr);
                None
            }
            PropValue::Boolean(_) => None,
        }
    }

    fn bool(&mut self, name: &'static str) -> Result<Option<bool>, InvalidOption> {
        match self.take(name) {
            None => Ok(None),
            Some(PropValue::Boolean(b)) => Ok(Some(b)),
            Some(PropValue::String(s)) => match s.as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(InvalidOption {
                    option: name,
                    value: s,
                    expected: "true, false",
                }),
            },
            Some(PropValue::Expression(_)) => Ok(None),
        }
    }

    fn flag(&mut self, name: &'static str) -> Result<bool, InvalidOption> {
        Ok(self.bool(name)?.unwrap_or(false))
    }

    fn into_attrs(self) -> Attrs {
        self.remaining
            .into_iter()
            .fold(Attrs::new(), |attrs, (name, value)| match value {
                PropValue::String(s) => attrs.set(name, s),
                PropValue::Boolean(true) => attrs.flag(name),
                PropValue::Boolean(false) | PropValue::Expression(_) => attrs,
            })
    }
}
