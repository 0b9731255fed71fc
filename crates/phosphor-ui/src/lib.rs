//! Server-rendered widgets for the phosphor UI kit.
//!
//! Each widget renders the same DOM contract as its React counterpart so
//! documentation previews can be produced without a JavaScript runtime. The
//! two widgets with runtime behavior live here too: the spinner animation
//! ([`SpinnerTicker`]) and the breakpoint observer ([`use_narrow`]).

pub mod attrs;
pub mod component;
pub mod error;
pub mod grid;
pub mod kbd;
pub mod label;
pub mod markup;
pub mod separator;
pub mod skeleton;
pub mod spinner;
pub mod ticker;
pub mod viewport;

pub use attrs::{Attr, Attrs};
pub use component::{Component, PropDoc};
pub use error::{InvalidOption, RenderError};
pub use grid::{Grid, GridGap, GridPreset};
pub use kbd::Kbd;
pub use label::Label;
pub use markup::Markup;
pub use separator::{Orientation, Separator};
pub use skeleton::Skeleton;
pub use spinner::{Spinner, SpinnerSize, SPINNER_FRAMES, SPINNER_INTERVAL};
pub use ticker::SpinnerTicker;
pub use viewport::{use_narrow, NarrowObserver, ResizeListener, Viewport};

/// Declared props of the widget a catalog entry names.
pub fn props_for(name: &str) -> Option<&'static [PropDoc]> {
    match name {
        Kbd::NAME => Some(Kbd::props()),
        Label::NAME => Some(Label::props()),
        Separator::NAME => Some(Separator::props()),
        Skeleton::NAME => Some(Skeleton::props()),
        Spinner::NAME => Some(Spinner::props()),
        Grid::NAME => Some(Grid::props()),
        _ => None,
    }
}
