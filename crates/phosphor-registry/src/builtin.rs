//! The kit's own catalog, embedded at compile time.

use crate::catalog::{Catalog, CatalogError};

/// One descriptor per component, in display order.
const DESCRIPTORS: &[(&str, &str)] = &[
    ("utils.json", include_str!("../registry/utils.json")),
    ("kbd.json", include_str!("../registry/kbd.json")),
    ("label.json", include_str!("../registry/label.json")),
    ("separator.json", include_str!("../registry/separator.json")),
    ("skeleton.json", include_str!("../registry/skeleton.json")),
    ("spinner.json", include_str!("../registry/spinner.json")),
    ("grid.json", include_str!("../registry/grid.json")),
    ("use-narrow.json", include_str!("../registry/use-narrow.json")),
];

/// Load the built-in catalog.
///
/// Fails if any embedded descriptor is malformed.
pub fn builtin() -> Result<Catalog, CatalogError> {
    Catalog::from_descriptors(DESCRIPTORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_every_descriptor_in_order() {
        let catalog = builtin().unwrap();

        let names: Vec<_> = catalog.list_all().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["utils", "kbd", "label", "separator", "skeleton", "spinner", "grid", "use-narrow"]
        );
    }

    #[test]
    fn every_ui_entry_depends_on_utils() {
        let catalog = builtin().unwrap();

        for entry in catalog
            .list_all()
            .iter()
            .filter(|e| e.entry_type == EntryType::Ui)
        {
            assert!(
                entry.registry_dependencies.iter().any(|d| d == "utils"),
                "{} should depend on utils",
                entry.name
            );
        }
    }

    #[test]
    fn separator_pulls_radix_primitive() {
        let catalog = builtin().unwrap();

        let plan = catalog.install_plan("separator").unwrap();

        assert_eq!(
            plan.packages,
            vec!["clsx", "tailwind-merge", "@radix-ui/react-separator"]
        );
    }
}
