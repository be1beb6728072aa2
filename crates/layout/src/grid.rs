//! Occupancy grid construction and item placement.

use crate::item::{screen_items, Item, ItemLocation, ScreenItem};
use crate::size::SizeConfig;

/// One cell of the occupancy grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Item covering this cell, if any.
    pub item: Option<usize>,
    /// Placement carried by this cell. For primary cells the spans are
    /// clipped to grid bounds and authoritative for all later layout
    /// math; secondary and empty cells keep unit spans.
    pub location: ItemLocation,
    /// For secondary cells, the coordinates of the primary cell whose
    /// span covers this one.
    pub spanning_cell: Option<(usize, usize)>,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.item.is_some()
    }

    pub fn is_secondary(&self) -> bool {
        self.spanning_cell.is_some()
    }
}

/// The occupancy grid for one layout pass, together with the
/// screen-filtered sizing rules it was built from. Rebuilt from scratch
/// on every pass; nothing is shared with previous passes.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Cells in row-major order.
    cells: Vec<Cell>,
    rows: Vec<SizeConfig>,
    cols: Vec<SizeConfig>,
    single_column: bool,
}

impl Grid {
    fn empty(rows: Vec<SizeConfig>, cols: Vec<SizeConfig>, single_column: bool) -> Self {
        let cells = vec![Cell::default(); rows.len() * cols.len()];
        Self {
            cells,
            rows,
            cols,
            single_column,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn rows(&self) -> &[SizeConfig] {
        &self.rows
    }

    pub fn cols(&self) -> &[SizeConfig] {
        &self.cols
    }

    pub fn is_single_column(&self) -> bool {
        self.single_column
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows.len() && col < self.cols.len() {
            self.cells.get(row * self.cols.len() + col)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let cols = self.cols.len();
        &mut self.cells[row * cols + col]
    }

    /// Iterate all cells with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let cols = self.cols.len().max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (index / cols, index % cols, cell))
    }

    /// Clip a placement's spans so they never exceed grid bounds. The
    /// caller's location is left untouched; the clipped copy becomes
    /// the authoritative placement stored on the primary cell.
    fn clip(&self, location: &ItemLocation) -> ItemLocation {
        let row_end = (location.row + location.rowspan - 1).min(self.rows.len() - 1);
        let col_end = (location.col + location.colspan - 1).min(self.cols.len() - 1);
        ItemLocation {
            rowspan: row_end - location.row + 1,
            colspan: col_end - location.col + 1,
            ..location.clone()
        }
    }

    fn span_occupied(&self, location: &ItemLocation) -> bool {
        for row in location.row..location.row + location.rowspan {
            for col in location.col..location.col + location.colspan {
                if self.cell(row, col).is_some_and(Cell::is_occupied) {
                    return true;
                }
            }
        }
        false
    }

    /// Place one item occurrence. Placements whose target cell is out
    /// of bounds, or whose clipped span collides with an occupied cell,
    /// are dropped silently.
    fn place(&mut self, screen_item: &ScreenItem) {
        let location = &screen_item.location;
        if location.row >= self.rows.len() || location.col >= self.cols.len() {
            return;
        }

        let clipped = self.clip(location);
        if self.span_occupied(&clipped) {
            return;
        }

        let origin = (clipped.row, clipped.col);
        for row in clipped.row..clipped.row + clipped.rowspan {
            for col in clipped.col..clipped.col + clipped.colspan {
                let cell = self.cell_mut(row, col);
                cell.item = Some(screen_item.item);
                if (row, col) == origin {
                    cell.location = clipped.clone();
                } else {
                    cell.spanning_cell = Some(origin);
                }
            }
        }
    }
}

/// Build the occupancy grid from screen-filtered row/column rules and
/// the declared items. In single-column mode the declared rows and
/// columns are discarded: items are stacked into one ratio-1 column in
/// (row, col) order, one row per item.
pub fn build_grid(
    rows: Vec<SizeConfig>,
    cols: Vec<SizeConfig>,
    items: &[Item],
    screen: &str,
    single_column: bool,
) -> Grid {
    let mut active = screen_items(items, screen);

    let (rows, cols) = if single_column {
        single_column_axes(&mut active, &rows)
    } else {
        (rows, cols)
    };

    let mut grid = Grid::empty(rows, cols, single_column);
    for screen_item in &active {
        grid.place(screen_item);
    }
    grid
}

/// Reassign items to sequential single-column placements and derive the
/// per-item row rules. A declared row at the same index contributes its
/// shrink factor; everything else resets to the ratio-1 default.
fn single_column_axes(
    items: &mut [ScreenItem],
    declared_rows: &[SizeConfig],
) -> (Vec<SizeConfig>, Vec<SizeConfig>) {
    items.sort_by_key(|entry| (entry.location.row, entry.location.col));
    for (index, entry) in items.iter_mut().enumerate() {
        entry.location = ItemLocation {
            row: index,
            col: 0,
            rowspan: 1,
            colspan: 1,
            screen: entry.location.screen.clone(),
        };
    }

    let rows = (0..items.len())
        .map(|index| {
            let mut config = SizeConfig::default();
            if let Some(declared) = declared_rows.get(index) {
                if declared.shrink.is_some() {
                    config.shrink = declared.shrink;
                }
            }
            config
        })
        .collect();

    (rows, vec![SizeConfig::default()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn ratio_rows(count: usize) -> Vec<SizeConfig> {
        (0..count).map(|_| SizeConfig::default()).collect()
    }

    #[test]
    fn test_simple_placement() {
        let items = vec![
            Item::new("a", ItemLocation::new(0, 0)),
            Item::new("b", ItemLocation::new(0, 1)),
        ];
        let grid = build_grid(ratio_rows(1), ratio_rows(2), &items, "lg", false);

        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.cell(0, 0).unwrap().item, Some(0));
        assert_eq!(grid.cell(0, 1).unwrap().item, Some(1));
        assert!(!grid.cell(0, 1).unwrap().is_secondary());
    }

    #[test]
    fn test_span_marks_secondary_cells() {
        let items = vec![Item::new("a", ItemLocation::with_span(0, 0, 2, 2))];
        let grid = build_grid(ratio_rows(2), ratio_rows(2), &items, "lg", false);

        let primary = grid.cell(0, 0).unwrap();
        assert_eq!(primary.item, Some(0));
        assert!(!primary.is_secondary());
        assert_eq!(primary.location.rowspan, 2);

        for (row, col) in [(0, 1), (1, 0), (1, 1)] {
            let cell = grid.cell(row, col).unwrap();
            assert_eq!(cell.item, Some(0));
            assert_eq!(cell.spanning_cell, Some((0, 0)));
            // Secondary cells keep unit spans.
            assert_eq!(cell.location.rowspan, 1);
        }
    }

    #[test]
    fn test_span_clipped_to_grid_bounds() {
        let items = vec![Item::new("a", ItemLocation::with_span(0, 1, 5, 9))];
        let grid = build_grid(ratio_rows(2), ratio_rows(3), &items, "lg", false);

        let primary = grid.cell(0, 1).unwrap();
        assert_eq!(primary.location.rowspan, 2);
        assert_eq!(primary.location.colspan, 2);
        assert!(grid.cell(1, 2).unwrap().is_secondary());
        assert!(!grid.cell(0, 0).unwrap().is_occupied());
    }

    #[test]
    fn test_colliding_item_dropped_silently() {
        let items = vec![
            Item::new("first", ItemLocation::new(0, 0)),
            Item::new("second", ItemLocation::new(0, 0)),
        ];
        let grid = build_grid(ratio_rows(1), ratio_rows(1), &items, "lg", false);
        assert_eq!(grid.cell(0, 0).unwrap().item, Some(0));
    }

    #[test]
    fn test_span_collision_dropped_silently() {
        let items = vec![
            Item::new("small", ItemLocation::new(1, 1)),
            Item::new("wide", ItemLocation::with_span(0, 0, 2, 2)),
        ];
        let grid = build_grid(ratio_rows(2), ratio_rows(2), &items, "lg", false);

        assert_eq!(grid.cell(1, 1).unwrap().item, Some(0));
        assert!(!grid.cell(0, 0).unwrap().is_occupied());
    }

    #[test]
    fn test_out_of_bounds_target_dropped() {
        let items = vec![Item::new("a", ItemLocation::new(5, 7))];
        let grid = build_grid(ratio_rows(2), ratio_rows(2), &items, "lg", false);
        assert!(grid.cells().all(|(_, _, cell)| !cell.is_occupied()));
    }

    #[test]
    fn test_full_coverage_for_valid_placements() {
        let items = vec![
            Item::new("wide", ItemLocation::with_span(0, 0, 1, 2)),
            Item::new("b", ItemLocation::new(1, 0)),
            Item::new("c", ItemLocation::new(1, 1)),
        ];
        let grid = build_grid(ratio_rows(2), ratio_rows(2), &items, "lg", false);

        for (row, col, cell) in grid.cells() {
            assert!(cell.is_occupied(), "cell ({row}, {col}) left uncovered");
            let end_row = cell.location.row + cell.location.rowspan;
            let end_col = cell.location.col + cell.location.colspan;
            assert!(end_row <= grid.row_count());
            assert!(end_col <= grid.col_count());
        }
    }

    #[test]
    fn test_single_column_reassignment() {
        let items = vec![
            Item::new("c", ItemLocation::with_span(4, 2, 3, 3)),
            Item::new("a", ItemLocation::new(0, 1)),
            Item::new("b", ItemLocation::new(0, 5)),
        ];
        let grid = build_grid(ratio_rows(3), ratio_rows(6), &items, "xs", true);

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 1);
        assert!(grid.is_single_column());

        // Sorted by (row, col): a (0,1), b (0,5), c (4,2).
        assert_eq!(grid.cell(0, 0).unwrap().item, Some(1));
        assert_eq!(grid.cell(1, 0).unwrap().item, Some(2));
        assert_eq!(grid.cell(2, 0).unwrap().item, Some(0));
        for row in 0..3 {
            assert_eq!(grid.cell(row, 0).unwrap().location.rowspan, 1);
            assert_eq!(grid.cell(row, 0).unwrap().location.colspan, 1);
        }
    }

    #[test]
    fn test_single_column_carries_declared_shrink() {
        let declared = vec![
            SizeConfig {
                shrink: Some(0.5),
                ..SizeConfig::default()
            },
            SizeConfig::default(),
        ];
        let items = vec![
            Item::new("a", ItemLocation::new(0, 0)),
            Item::new("b", ItemLocation::new(1, 0)),
            Item::new("c", ItemLocation::new(2, 0)),
        ];
        let grid = build_grid(declared, ratio_rows(1), &items, "xs", true);

        assert_eq!(grid.rows().len(), 3);
        assert_eq!(grid.rows()[0].shrink, Some(0.5));
        assert_eq!(grid.rows()[1].shrink, None);
        assert_eq!(grid.rows()[2].shrink, None);
    }

    #[test]
    fn test_screen_tagged_location_ignored_on_other_screens() {
        let items = vec![Item {
            label: "a".to_string(),
            locations: vec![ItemLocation::new(0, 0).for_screen("xs")],
        }];
        let grid = build_grid(ratio_rows(1), ratio_rows(1), &items, "lg", false);
        assert!(!grid.cell(0, 0).unwrap().is_occupied());
    }
}
