//! Pass-through element attributes.

use serde::Serialize;

/// A single rendered attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Extra attributes forwarded onto a widget's root element.
///
/// `class` values are merged with the widget's own classes; everything else is
/// appended after the attributes the widget owns. Values are escaped when
/// rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    classes: Vec<String>,
    rest: Vec<Attr>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add classes to merge with the widget's own.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.trim().is_empty() {
            self.classes.push(class.trim().to_string());
        }
        self
    }

    /// Set an attribute, replacing any earlier value with the same name.
    ///
    /// `class` and `className` route to [`Attrs::class`]. Names that are not
    /// valid attribute names are dropped.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();

        if name == "class" || name == "className" {
            return self.class(value);
        }

        if !is_valid_name(&name) {
            tracing::warn!("Dropping invalid attribute name: {:?}", name);
            return self;
        }

        let value = value.into();
        match self.rest.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.rest.push(Attr { name, value }),
        }
        self
    }

    /// Set a boolean attribute.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.set(name, "")
    }

    /// Widget classes followed by the caller's.
    pub fn merged_class(&self, base: &str) -> String {
        std::iter::once(base)
            .chain(self.classes.iter().map(String::as_str))
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Non-class attributes, in insertion order.
    pub fn rest(&self) -> &[Attr] {
        &self.rest
    }

    /// Non-class attributes minus the names the widget renders itself.
    ///
    /// A widget's own attribute wins; the caller's copy is dropped so the
    /// element never carries a name twice.
    pub fn rest_except(&self, owned: &[&str]) -> Vec<&Attr> {
        self.rest
            .iter()
            .filter(|a| {
                let reserved = owned.contains(&a.name.as_str());
                if reserved {
                    tracing::warn!("Dropping attribute {:?} owned by the widget", a.name);
                }
                !reserved
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.rest
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.rest.is_empty()
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_classes_after_base() {
        let attrs = Attrs::new().class("mt-4").set("className", "text-sm");

        assert_eq!(attrs.merged_class("inline-flex"), "inline-flex mt-4 text-sm");
        assert!(attrs.rest().is_empty());
    }

    #[test]
    fn later_values_replace_earlier() {
        let attrs = Attrs::new().set("id", "a").set("id", "b");

        assert_eq!(attrs.rest().len(), 1);
        assert_eq!(attrs.get("id"), Some("b"));
    }

    #[test]
    fn drops_invalid_names() {
        let attrs = Attrs::new()
            .set("onclick=\"x\"", "y")
            .set("data-test", "ok")
            .flag("hidden");

        let names: Vec<_> = attrs.rest().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["data-test", "hidden"]);
    }

    #[test]
    fn rest_except_drops_owned_names() {
        let attrs = Attrs::new()
            .set("role", "presentation")
            .set("id", "sep")
            .set("aria-orientation", "vertical");

        let names: Vec<_> = attrs
            .rest_except(&["role", "aria-orientation"])
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["id"]);
        assert_eq!(attrs.rest().len(), 3);
    }
}
