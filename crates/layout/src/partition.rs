//! Recursive block partitioning of the occupancy grid into a nested
//! box tree.

use common::{WidgetError, WidgetResult};

use crate::grid::Grid;
use crate::item::ItemId;
use crate::size::SizeValue;

/// Axis of a box container. A `Col` box stacks its children vertically
/// (one child per row block); a `Row` box lays them out horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Row,
    Col,
}

impl Direction {
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Direction::Row => Direction::Col,
            Direction::Col => Direction::Row,
        }
    }
}

/// Inclusive range of grid lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// A rectangular sub-region of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub row: LineRange,
    pub col: LineRange,
}

impl Bounds {
    /// Bounds covering the whole grid. The grid must be non-empty.
    pub fn full(grid: &Grid) -> Self {
        Self {
            row: LineRange {
                start: 0,
                end: grid.row_count().saturating_sub(1),
            },
            col: LineRange {
                start: 0,
                end: grid.col_count().saturating_sub(1),
            },
        }
    }

    #[inline]
    fn axis(&self, direction: Direction) -> LineRange {
        match direction {
            Direction::Row => self.row,
            Direction::Col => self.col,
        }
    }

    #[inline]
    fn set_axis_start(&mut self, direction: Direction, start: usize) {
        match direction {
            Direction::Row => self.row.start = start,
            Direction::Col => self.col.start = start,
        }
    }
}

/// Aggregated sizing for one block: sums over the rows or columns the
/// block spans on its container's cross axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockSize {
    pub ratio: f32,
    pub base_size: SizeValue,
    pub min_size: SizeValue,
    pub max_size: SizeValue,
    pub shrink: Option<f32>,
}

impl BlockSize {
    /// A pure-ratio size with no explicit pixel bounds.
    pub fn with_ratio(ratio: f32) -> Self {
        Self {
            ratio,
            base_size: SizeValue::ZERO,
            min_size: SizeValue::ZERO,
            max_size: SizeValue::ZERO,
            shrink: None,
        }
    }
}

/// Cross-axis alignment of box children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossAlign {
    Start,
    Center,
    End,
    Stretch,
}

/// A node of the computed box tree.
#[derive(Clone, Debug, PartialEq)]
pub enum BoxNode {
    /// Leaf for an empty grid cell; renders as blank space.
    Spacer,
    /// Leaf for a placed item.
    Item(ItemId),
    /// Nested box.
    Container(BoxContainer),
}

/// One child of a box container, annotated with its aggregated size.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxItem {
    pub size: BlockSize,
    pub node: BoxNode,
}

/// A box laying out its children along one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxContainer {
    pub direction: Direction,
    pub cross_align: CrossAlign,
    pub items: Vec<BoxItem>,
}

/// Result of partitioning one block.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockContent {
    /// The block's cell is covered by another item's span; its primary
    /// already produced the leaf, so nothing is emitted here.
    Spanned,
    /// An empty cell.
    Empty,
    /// A terminal block owned by one placed item.
    Item(ItemId),
    /// A subdivided block.
    Boxed(BoxContainer),
}

/// Partition the grid into a nested box tree, starting with a vertical
/// stack of row blocks. Fails when a sub-block cannot be subdivided
/// further (conflicting row/col spans).
pub fn partition(grid: &Grid) -> WidgetResult<BlockContent> {
    layout_block(grid, Bounds::full(grid), Direction::Col, None)
}

fn layout_block(
    grid: &Grid,
    bounds: Bounds,
    direction: Direction,
    parent: Option<Bounds>,
) -> WidgetResult<BlockContent> {
    if is_single_item(grid, bounds) {
        Ok(cell_content(grid, bounds.row.start, bounds.col.start))
    } else {
        layout_direction(grid, bounds, direction, parent).map(BlockContent::Boxed)
    }
}

/// Whether the cell at the bounds' origin spans the bounds exactly, on
/// both axes. Span values are the clipped ones stored on the cell.
fn is_single_item(grid: &Grid, bounds: Bounds) -> bool {
    grid.cell(bounds.row.start, bounds.col.start)
        .is_some_and(|cell| {
            cell.location.rowspan == bounds.row.len() && cell.location.colspan == bounds.col.len()
        })
}

fn cell_content(grid: &Grid, row: usize, col: usize) -> BlockContent {
    match grid.cell(row, col) {
        Some(cell) if cell.is_secondary() => BlockContent::Spanned,
        Some(cell) => match cell.item {
            Some(item) => BlockContent::Item(item),
            None => BlockContent::Empty,
        },
        None => BlockContent::Spanned,
    }
}

fn layout_direction(
    grid: &Grid,
    bounds: Bounds,
    direction: Direction,
    parent: Option<Bounds>,
) -> WidgetResult<BoxContainer> {
    let cross = direction.cross();
    let mut items = Vec::new();
    let mut cursor = bounds;

    while let Some(block) = next_block(grid, cursor, direction) {
        if parent == Some(block) {
            return Err(WidgetError::indivisible(format!(
                "rows {}..={}, cols {}..={}",
                block.row.start, block.row.end, block.col.start, block.col.end
            )));
        }

        let content = layout_block(grid, block, cross, Some(bounds))?;
        let size = block_size(grid, block, cross);
        match content {
            BlockContent::Spanned => {}
            BlockContent::Empty => items.push(BoxItem {
                size,
                node: BoxNode::Spacer,
            }),
            BlockContent::Item(item) => items.push(BoxItem {
                size,
                node: BoxNode::Item(item),
            }),
            BlockContent::Boxed(container) => items.push(BoxItem {
                size,
                node: BoxNode::Container(container),
            }),
        }

        cursor.set_axis_start(cross, block.axis(cross).end + 1);
    }

    Ok(BoxContainer {
        direction,
        cross_align: CrossAlign::Stretch,
        items,
    })
}

/// Compute the next block along `direction`: it spans the full main
/// axis of `bounds` and grows on the cross axis until no scanned line
/// declares a span reaching past the accepted range (fixed-point
/// expansion). Returns `None` once the cross axis is exhausted.
fn next_block(grid: &Grid, bounds: Bounds, direction: Direction) -> Option<Bounds> {
    let cross = direction.cross();
    let main = bounds.axis(direction);
    let cross_bounds = bounds.axis(cross);

    if cross_bounds.start > cross_bounds.end {
        return None;
    }

    let mut cross_span = 1usize;
    let mut cross_index = cross_bounds.start;
    while cross_index < cross_bounds.start + cross_span {
        let mut line_cross_span = 1usize;
        for index in main.start..=main.end {
            let (row, col) = match direction {
                Direction::Col => (cross_index, index),
                Direction::Row => (index, cross_index),
            };
            if let Some(cell) = grid.cell(row, col) {
                let span = match cross {
                    Direction::Row => cell.location.rowspan,
                    Direction::Col => cell.location.colspan,
                };
                line_cross_span = line_cross_span.max(span);
            }
        }

        let line_cross_end = cross_index + line_cross_span;
        let cross_end = cross_bounds.start + cross_span;
        if line_cross_end > cross_end {
            cross_span += line_cross_end - cross_end;
        }
        cross_index += 1;
    }

    // Spans are clipped at grid build; clamp anyway so a stray span can
    // never push the block past the current bounds.
    let cross_range = LineRange {
        start: cross_bounds.start,
        end: (cross_bounds.start + cross_span - 1).min(cross_bounds.end),
    };

    Some(match direction {
        Direction::Col => Bounds {
            row: cross_range,
            col: main,
        },
        Direction::Row => Bounds {
            row: main,
            col: cross_range,
        },
    })
}

/// Aggregate the sizing rules of every row or column the block spans on
/// `axis`. Zero-sum minimums default to auto on the row axis and zero
/// on the column axis; zero-sum maximums default to auto; single-column
/// grids force an auto base size. The last declared shrink factor wins.
pub fn block_size(grid: &Grid, block: Bounds, axis: Direction) -> BlockSize {
    let configs = match axis {
        Direction::Row => grid.rows(),
        Direction::Col => grid.cols(),
    };
    let range = block.axis(axis);

    let mut ratio = 0.0;
    let mut base = 0.0;
    let mut min = 0.0;
    let mut max = 0.0;
    let mut shrink = None;
    for config in &configs[range.start..=range.end] {
        ratio += config.ratio;
        base += config.base_size.px();
        min += config.min_size.px();
        max += config.max_size.px();
        if config.shrink.is_some() {
            shrink = config.shrink;
        }
    }

    let min_size = if min == 0.0 {
        match axis {
            Direction::Row => SizeValue::Auto,
            Direction::Col => SizeValue::ZERO,
        }
    } else {
        SizeValue::Px(min)
    };
    let max_size = if max == 0.0 {
        SizeValue::Auto
    } else {
        SizeValue::Px(max)
    };
    let base_size = if grid.is_single_column() {
        SizeValue::Auto
    } else {
        SizeValue::Px(base)
    };

    BlockSize {
        ratio,
        base_size,
        min_size,
        max_size,
        shrink,
    }
}
