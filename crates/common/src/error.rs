//! Common error types.

use thiserror::Error;

/// Main error type for the widget toolkit.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Malformed row/col span configuration: block {0} cannot be subdivided")]
    IndivisibleBlock(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type WidgetResult<T> = Result<T, WidgetError>;

impl WidgetError {
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn indivisible(block: impl Into<String>) -> Self {
        Self::IndivisibleBlock(block.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}
