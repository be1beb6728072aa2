//! Responsive box layout engine.
//!
//! Given a declarative grid of rows/columns and items with
//! row/col/span placement hints, this crate computes a
//! screen-size-dependent nested box layout: a screen classifier picks
//! the active size class, an occupancy grid resolves spanning and
//! overlap, and a recursive partitioner turns the grid into a tree of
//! box configurations ready for rendering.

pub mod engine;
pub mod grid;
pub mod item;
pub mod materialize;
pub mod partition;
pub mod screen;
pub mod size;

pub use engine::LayoutEngine;
pub use grid::{build_grid, Cell, Grid};
pub use item::{Item, ItemId, ItemLocation};
pub use materialize::RootBox;
pub use partition::{BlockSize, BoxContainer, BoxItem, BoxNode, CrossAlign, Direction};
pub use screen::{ScreenByWidthFn, ScreenPolicy, FALLBACK_SCREEN_WIDTH};
pub use size::{SizeConfig, SizeValue};
