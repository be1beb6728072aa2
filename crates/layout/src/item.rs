//! Items and their grid placements.

use serde::{Deserialize, Serialize};

use crate::screen::screen_allows;

/// Index of an item in the caller's item list.
pub type ItemId = usize;

/// Grid placement of an item for one or more screen classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLocation {
    /// Starting row.
    pub row: usize,
    /// Starting column.
    pub col: usize,
    /// Number of rows covered (at least 1).
    pub rowspan: usize,
    /// Number of columns covered (at least 1).
    pub colspan: usize,
    /// Screen classes this placement applies to (whitespace-delimited);
    /// `None` applies everywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
}

impl ItemLocation {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            ..Self::default()
        }
    }

    pub fn with_span(row: usize, col: usize, rowspan: usize, colspan: usize) -> Self {
        Self {
            row,
            col,
            rowspan: rowspan.max(1),
            colspan: colspan.max(1),
            screen: None,
        }
    }

    pub fn for_screen(mut self, screen: impl Into<String>) -> Self {
        self.screen = Some(screen.into());
        self
    }
}

impl Default for ItemLocation {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            rowspan: 1,
            colspan: 1,
            screen: None,
        }
    }
}

/// An item placed in the responsive grid. The label is opaque to the
/// layout engine; widgets attach richer payloads keyed by item index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub label: String,
    /// Candidate placements; at most one is active per screen class.
    pub locations: Vec<ItemLocation>,
}

impl Item {
    pub fn new(label: impl Into<String>, location: ItemLocation) -> Self {
        Self {
            label: label.into(),
            locations: vec![location],
        }
    }
}

/// One item occurrence active for the current screen class.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenItem {
    pub item: ItemId,
    pub location: ItemLocation,
}

/// Resolve each item's active placement for `screen`. Items whose
/// placements are all tagged for other screens are left out; the first
/// matching placement wins, so at most one occurrence exists per item.
pub fn screen_items(items: &[Item], screen: &str) -> Vec<ScreenItem> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            item.locations
                .iter()
                .find(|location| screen_allows(location.screen.as_deref(), screen))
                .map(|location| ScreenItem {
                    item: index,
                    location: ItemLocation {
                        rowspan: location.rowspan.max(1),
                        colspan: location.colspan.max(1),
                        ..location.clone()
                    },
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_items_untagged_always_active() {
        let items = vec![
            Item::new("a", ItemLocation::new(0, 0)),
            Item::new("b", ItemLocation::new(0, 1)),
        ];

        let active = screen_items(&items, "lg");
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].item, 0);
        assert_eq!(active[1].location.col, 1);
    }

    #[test]
    fn test_screen_items_filtered_by_tag() {
        let items = vec![Item {
            label: "a".to_string(),
            locations: vec![
                ItemLocation::new(0, 0).for_screen("xs sm"),
                ItemLocation::new(2, 1).for_screen("lg"),
            ],
        }];

        let active = screen_items(&items, "LG");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].location.row, 2);

        let active = screen_items(&items, "md");
        assert!(active.is_empty());
    }

    #[test]
    fn test_screen_items_first_match_wins() {
        let items = vec![Item {
            label: "a".to_string(),
            locations: vec![ItemLocation::new(0, 0), ItemLocation::new(1, 1)],
        }];

        let active = screen_items(&items, "md");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].location.row, 0);
    }

    #[test]
    fn test_screen_items_normalizes_zero_spans() {
        let items = vec![Item::new("a", ItemLocation::with_span(0, 0, 1, 1))];
        let mut raw = items.clone();
        raw[0].locations[0].rowspan = 0;
        raw[0].locations[0].colspan = 0;

        let active = screen_items(&raw, "lg");
        assert_eq!(active[0].location.rowspan, 1);
        assert_eq!(active[0].location.colspan, 1);
    }
}
