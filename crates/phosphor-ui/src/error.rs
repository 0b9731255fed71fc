//! Rendering errors.

/// A string prop value outside an option's closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {option}: {value:?} (expected one of {expected})")]
pub struct InvalidOption {
    pub option: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Errors that can occur rendering a widget.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
