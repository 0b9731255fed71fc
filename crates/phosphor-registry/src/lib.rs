//! Component catalog for the phosphor UI kit.
//!
//! Holds the ordered, immutable list of installable component descriptors
//! that the installer and the documentation site enumerate.

pub mod builtin;
pub mod catalog;
pub mod entry;

pub use builtin::builtin;
pub use catalog::{Catalog, CatalogError, InstallPlan};
pub use entry::{EntryType, RegistryEntry};
