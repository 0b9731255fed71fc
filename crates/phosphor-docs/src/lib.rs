//! Documentation site builder for the phosphor component kit.
//!
//! Pages are Markdown/MDX with YAML frontmatter. A page whose frontmatter
//! names a `component` gets the component section: its first live code
//! block as the usage sample, that block rendered through the matching
//! widget, the install command, and a props table taken from the widget's
//! declared schema.

pub mod assets;
pub mod builder;
pub mod doc;
pub mod frontmatter;
pub mod jsx;
pub mod page;
pub mod preview;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use doc::{assemble, install_command, ComponentDoc, DocError, PropsTableRow, DEFAULT_INSTALL_COMMAND};
pub use page::{parse_page, CodeBlock, Page, TocEntry};
pub use preview::{render_preview, PreviewError};
