//! Common utilities and types used across the widget toolkit.

pub mod error;
pub mod geometry;

pub use error::{WidgetError, WidgetResult};
pub use geometry::{Rect, Size};
