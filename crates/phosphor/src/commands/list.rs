//! List catalog entries.

use std::fmt::Write;

use anyhow::Result;
use phosphor_registry::Catalog;
use phosphor_ui::{use_narrow, Viewport};

use crate::config::Config;

/// Terminals narrower than this get the compact listing.
pub const NARROW_COLUMNS: u32 = 80;

/// Run the list command.
pub async fn run(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    let viewport = terminal_viewport();
    let narrow = use_narrow(viewport.as_ref(), NARROW_COLUMNS);

    print!("{}", format_listing(&catalog, narrow.get()));
    Ok(())
}

/// Terminal width from `COLUMNS`, when the shell exports it.
pub fn terminal_viewport() -> Option<Viewport> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<u32>().ok())
        .map(Viewport::new)
}

/// One line per entry in catalog order; compact drops everything but names.
pub fn format_listing(catalog: &Catalog, compact: bool) -> String {
    let mut out = String::new();

    if compact {
        for entry in catalog.list_all() {
            let _ = writeln!(out, "{}", entry.name);
        }
        return out;
    }

    let width = catalog
        .list_all()
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    for entry in catalog.list_all() {
        let _ = writeln!(
            out,
            "{:<width$}  {:<14}  {}",
            entry.name,
            entry.entry_type.as_str(),
            entry.description.as_deref().unwrap_or(""),
            width = width
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_in_catalog_order() {
        let catalog = phosphor_registry::builtin().unwrap();

        let listing = format_listing(&catalog, true);

        assert_eq!(
            listing.lines().collect::<Vec<_>>(),
            vec!["utils", "kbd", "label", "separator", "skeleton", "spinner", "grid", "use-narrow"]
        );
    }

    #[test]
    fn wide_listing_shows_type_and_description() {
        let catalog = phosphor_registry::builtin().unwrap();

        let listing = format_listing(&catalog, false);
        let spinner = listing.lines().find(|l| l.starts_with("spinner")).unwrap();

        assert!(spinner.contains("registry:ui"));
        assert!(spinner.contains("ASCII spinner"));
        assert!(listing.lines().any(|l| l.contains("registry:hook")));
    }

    #[test]
    fn narrow_terminal_is_observed() {
        let viewport = Viewport::new(60);
        let narrow = use_narrow(Some(&viewport), NARROW_COLUMNS);
        assert!(narrow.get());

        viewport.resize(120);
        assert!(!narrow.get());
    }
}
