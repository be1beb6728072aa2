//! Box rendering primitive.
//!
//! Turns the layout engine's box configurations into a tree of
//! positioned rectangles: each box lays out its children along one
//! axis from their ratio/base/min/max sizing rules, stretching them on
//! the cross axis.

pub mod instantiate;
pub mod solver;
pub mod tree;

pub use instantiate::instantiate;
pub use solver::solve_axis;
pub use tree::{RenderBox, RenderBoxId, RenderBoxKind, RenderTree};
