//! Layout engine: one full pass from screen classification to the
//! renderer-ready box tree.

use common::{Size, WidgetResult};

use crate::grid::build_grid;
use crate::item::Item;
use crate::materialize::{materialize, RootBox};
use crate::partition::partition;
use crate::screen::{screen_allows, ScreenPolicy, FALLBACK_SCREEN_WIDTH};
use crate::size::SizeConfig;

/// The responsive layout engine. Holds the classification policy;
/// everything else is passed per pass and rebuilt from scratch, so no
/// state leaks between passes.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    policy: ScreenPolicy,
}

impl LayoutEngine {
    pub fn new(policy: ScreenPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScreenPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: ScreenPolicy) {
        self.policy = policy;
    }

    /// Screen class for the given viewport width. Without a live
    /// viewport the headless fallback width applies.
    pub fn classify(&self, viewport_width: Option<f32>) -> String {
        self.policy
            .classify(viewport_width.unwrap_or(FALLBACK_SCREEN_WIDTH))
    }

    /// Run one layout pass for an already-classified screen. Returns
    /// `Ok(None)` when there is nothing to lay out (no rows and no
    /// items). A partitioning failure aborts the pass; the caller's
    /// rendered state is untouched since nothing was produced.
    pub fn run(
        &self,
        rows: &[SizeConfig],
        cols: &[SizeConfig],
        items: &[Item],
        screen: &str,
        container: Size,
    ) -> WidgetResult<Option<RootBox>> {
        let filtered_rows: Vec<SizeConfig> = rows
            .iter()
            .filter(|config| screen_allows(config.screen.as_deref(), screen))
            .cloned()
            .collect();
        let filtered_cols: Vec<SizeConfig> = cols
            .iter()
            .filter(|config| screen_allows(config.screen.as_deref(), screen))
            .cloned()
            .collect();

        let single_column = self.policy.is_single_column_class(screen)
            || filtered_rows.is_empty()
            || filtered_cols.is_empty();

        let grid = build_grid(filtered_rows, filtered_cols, items, screen, single_column);
        if grid.row_count() == 0 || grid.col_count() == 0 {
            tracing::debug!(screen, "layout pass skipped: empty grid");
            return Ok(None);
        }

        tracing::debug!(
            screen,
            rows = grid.row_count(),
            cols = grid.col_count(),
            single_column,
            "layout pass"
        );

        let content = partition(&grid)?;
        Ok(Some(materialize(content, container)))
    }

    /// Classify the viewport, then run a pass for the resulting screen
    /// class. Returns the class alongside the layout.
    pub fn run_for_width(
        &self,
        rows: &[SizeConfig],
        cols: &[SizeConfig],
        items: &[Item],
        viewport_width: Option<f32>,
        container: Size,
    ) -> WidgetResult<(String, Option<RootBox>)> {
        let screen = self.classify(viewport_width);
        let root = self.run(rows, cols, items, &screen, container)?;
        Ok((screen, root))
    }
}
