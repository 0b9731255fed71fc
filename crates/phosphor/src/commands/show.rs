//! Show one catalog entry and what installing it pulls in.

use std::fmt::Write;

use anyhow::Result;
use phosphor_docs::install_command;
use phosphor_registry::{Catalog, CatalogError};

use crate::config::Config;

/// Run the show command.
pub async fn run(config: &Config, name: &str) -> Result<()> {
    let catalog = config.catalog()?;
    let text = format_entry(&catalog, name, &config.registry.install_command)?;

    print!("{}", text);
    Ok(())
}

/// Entry details followed by its install plan.
pub fn format_entry(
    catalog: &Catalog,
    name: &str,
    install_template: &str,
) -> Result<String, CatalogError> {
    let entry = catalog.find_by_name(name)?;
    let plan = catalog.install_plan(name)?;

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", entry.display_title(), entry.entry_type);
    if let Some(description) = &entry.description {
        let _ = writeln!(out, "{}", description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Install:  {}", install_command(install_template, &entry.name));

    let entries: Vec<&str> = plan.entries.iter().map(|e| e.name.as_str()).collect();
    let _ = writeln!(out, "Entries:  {}", entries.join(", "));

    if !plan.packages.is_empty() {
        let _ = writeln!(out, "Packages: {}", plan.packages.join(", "));
    }

    let _ = writeln!(out, "Files:");
    for file in plan.files() {
        let _ = writeln!(out, "  {}", file);
    }

    Ok(out)
}
