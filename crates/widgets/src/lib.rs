//! Responsive box widget.
//!
//! Wraps the layout engine and render primitive into a stateful
//! component: options with change tracking, screen class bookkeeping,
//! and lifecycle management of the rendered box tree.

pub mod options;
pub mod responsive_box;

pub use options::{ChangeEffect, OptionChange, OptionsStore, ResponsiveBoxOptions};
pub use responsive_box::{ResponsiveBox, RESPONSIVE_BOX_CLASS, SCREEN_SIZE_CLASS_PREFIX};
