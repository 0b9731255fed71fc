//! Layout grid with column presets.

use std::str::FromStr;

use minijinja::context;

use crate::attrs::Attrs;
use crate::component::{Component, PropDoc, PASS_THROUGH};
use crate::error::{InvalidOption, RenderError};
use crate::markup::{self, Markup};

/// Column layout preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPreset {
    #[default]
    Cols2,
    Cols3,
    Cols4,
    Sidebar,
    Auto,
}

impl GridPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cols2 => "cols-2",
            Self::Cols3 => "cols-3",
            Self::Cols4 => "cols-4",
            Self::Sidebar => "sidebar",
            Self::Auto => "auto",
        }
    }

    /// Template columns class for a wide or narrow viewport.
    pub fn class(&self, narrow: bool) -> &'static str {
        match (self, narrow) {
            (Self::Auto, _) => "grid-cols-[repeat(auto-fit,minmax(12rem,1fr))]",
            (Self::Cols4, true) => "grid-cols-2",
            (_, true) => "grid-cols-1",
            (Self::Cols2, false) => "grid-cols-2",
            (Self::Cols3, false) => "grid-cols-3",
            (Self::Cols4, false) => "grid-cols-4",
            (Self::Sidebar, false) => "grid-cols-[16rem_1fr]",
        }
    }

    /// Fixed column count, or `None` when the browser decides.
    pub fn columns(&self, narrow: bool) -> Option<usize> {
        match (self, narrow) {
            (Self::Auto, _) => None,
            (Self::Cols4, true) => Some(2),
            (_, true) => Some(1),
            (Self::Cols2 | Self::Sidebar, false) => Some(2),
            (Self::Cols3, false) => Some(3),
            (Self::Cols4, false) => Some(4),
        }
    }
}

impl FromStr for GridPreset {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cols-2" => Ok(Self::Cols2),
            "cols-3" => Ok(Self::Cols3),
            "cols-4" => Ok(Self::Cols4),
            "sidebar" => Ok(Self::Sidebar),
            "auto" => Ok(Self::Auto),
            _ => Err(InvalidOption {
                option: "preset",
                value: s.to_string(),
                expected: "cols-2, cols-3, cols-4, sidebar, auto",
            }),
        }
    }
}

/// Gap between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridGap {
    Sm,
    #[default]
    Md,
    Lg,
}

impl GridGap {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Sm => "gap-2",
            Self::Md => "gap-4",
            Self::Lg => "gap-8",
        }
    }
}

impl FromStr for GridGap {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            "lg" => Ok(Self::Lg),
            _ => Err(InvalidOption {
                option: "gap",
                value: s.to_string(),
                expected: "sm, md, lg",
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub preset: GridPreset,
    pub gap: GridGap,
    /// Collapse columns; usually fed from a `NarrowObserver`
    pub narrow: bool,
    pub children: Vec<Markup>,
    pub attrs: Attrs,
}

impl Grid {
    pub fn new(preset: GridPreset) -> Self {
        Self {
            preset,
            ..Default::default()
        }
    }

    pub fn gap(mut self, gap: GridGap) -> Self {
        self.gap = gap;
        self
    }

    pub fn narrow(mut self, narrow: bool) -> Self {
        self.narrow = narrow;
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Component for Grid {
    const NAME: &'static str = "grid";

    fn props() -> &'static [PropDoc] {
        &[
            PropDoc {
                name: "preset",
                ty: "\"cols-2\" | \"cols-3\" | \"cols-4\" | \"sidebar\" | \"auto\"",
                default: Some("\"cols-2\""),
                description: "Column layout. Collapses on narrow viewports.",
            },
            PropDoc {
                name: "gap",
                ty: "\"sm\" | \"md\" | \"lg\"",
                default: Some("\"md\""),
                description: "Space between cells.",
            },
            PropDoc {
                name: "children",
                ty: "ReactNode",
                default: None,
                description: "Grid cells.",
            },
            PASS_THROUGH,
        ]
    }

    fn render(&self) -> Result<Markup, RenderError> {
        let base = format!(
            "grid {} {}",
            self.preset.class(self.narrow),
            self.gap.class()
        );
        let columns = self
            .preset
            .columns(self.narrow)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "auto".to_string());

        markup::render(
            "grid.html",
            context! {
                class => self.attrs.merged_class(&base),
                attrs => self.attrs.rest_except(&["data-preset", "data-columns"]),
                preset => self.preset.as_str(),
                columns => columns,
                children => &self.children,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_presets_to_classes() {
        let html = Grid::new(GridPreset::Cols3).gap(GridGap::Lg).render().unwrap();

        assert!(html.as_str().contains(r#"class="grid grid-cols-3 gap-8""#));
        assert!(html.as_str().contains(r#"data-columns="3""#));
    }

    #[test]
    fn collapses_when_narrow() {
        assert_eq!(GridPreset::Cols3.columns(true), Some(1));
        assert_eq!(GridPreset::Cols4.columns(true), Some(2));
        assert_eq!(GridPreset::Auto.columns(true), None);

        let html = Grid::new(GridPreset::Sidebar).narrow(true).render().unwrap();
        assert!(html.as_str().contains("grid grid-cols-1 gap-4"));
    }

    #[test]
    fn embeds_children_unescaped() {
        let html = Grid::new(GridPreset::Cols2)
            .child(Markup::trusted("<div>a</div>"))
            .child(Markup::text("<b>"))
            .render()
            .unwrap();

        assert!(html.as_str().contains("<div>a</div>"));
        assert!(html.as_str().contains("&lt;b&gt;"));
    }

    #[test]
    fn rejects_unknown_preset() {
        let err = "cols-9".parse::<GridPreset>().unwrap_err();

        assert_eq!(err.option, "preset");
        assert_eq!(err.value, "cols-9");
    }

    #[test]
    fn widget_data_attributes_win_over_pass_through() {
        let html = Grid::new(GridPreset::Cols3)
            .attrs(Attrs::new().set("data-columns", "9").set("data-test", "grid"))
            .render()
            .unwrap();
        let html = html.as_str();

        assert_eq!(html.matches("data-columns=").count(), 1);
        assert!(html.contains(r#"data-columns="3""#));
        assert!(html.contains(r#"data-test="grid""#));
    }
}
