//! The responsive box widget.

use std::collections::HashMap;
use std::sync::Arc;

use common::{Size, WidgetResult};
use layout::{Item, ItemId, LayoutEngine, ScreenByWidthFn, ScreenPolicy, SizeConfig};
use render::{instantiate, RenderBoxId, RenderBoxKind, RenderTree};

use crate::options::{ChangeEffect, OptionChange, OptionsStore, ResponsiveBoxOptions};

/// CSS-style class carried by every responsive box element.
pub const RESPONSIVE_BOX_CLASS: &str = "responsivebox";
/// Prefix of the class reflecting the active screen size.
pub const SCREEN_SIZE_CLASS_PREFIX: &str = "responsivebox-screen-";

type LayoutChangedFn = Box<dyn FnMut(&str) + Send>;

/// A widget that lays its items out on a responsive grid and keeps the
/// rendered box tree in sync with option changes and viewport resizes.
///
/// A failed layout pass leaves the previously rendered tree in place;
/// the error is reported to the caller instead.
pub struct ResponsiveBox {
    store: Arc<OptionsStore>,
    engine: LayoutEngine,
    tree: RenderTree,
    current_screen: Option<String>,
    viewport_width: Option<f32>,
    item_nodes: HashMap<ItemId, RenderBoxId>,
    element_classes: Vec<String>,
    layout_changed: Option<LayoutChangedFn>,
}

impl ResponsiveBox {
    pub fn new(options: ResponsiveBoxOptions) -> Self {
        let mut widget = Self {
            store: Arc::new(OptionsStore::new(options)),
            engine: LayoutEngine::default(),
            tree: RenderTree::new(),
            current_screen: None,
            viewport_width: None,
            item_nodes: HashMap::new(),
            element_classes: vec![RESPONSIVE_BOX_CLASS.to_string()],
            layout_changed: None,
        };
        widget.rebuild_engine();
        widget
    }

    /// Shared handle to the widget's options. External mutations must
    /// be followed by [`ResponsiveBox::apply`] for the matching change.
    pub fn options(&self) -> Arc<OptionsStore> {
        self.store.clone()
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// Screen class of the last completed layout pass.
    pub fn current_screen(&self) -> Option<&str> {
        self.current_screen.as_deref()
    }

    pub fn element_classes(&self) -> &[String] {
        &self.element_classes
    }

    /// Render box hosting the given item, if the item is laid out.
    pub fn item_node(&self, item: ItemId) -> Option<RenderBoxId> {
        self.item_nodes.get(&item).copied()
    }

    pub fn on_layout_changed(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.layout_changed = Some(Box::new(callback));
    }

    /// Initial render.
    pub fn render(&mut self) -> WidgetResult<()> {
        self.render_layout(true)
    }

    /// Re-run the layout pass. With `force` the previous tree is
    /// destroyed instead of detached.
    pub fn update(&mut self, force: bool) -> WidgetResult<()> {
        self.render_layout(force)?;
        self.fire_layout_changed();
        Ok(())
    }

    /// Re-render from the current options. The previous root is
    /// detached and retained until dispose, like any non-structural
    /// update.
    pub fn repaint(&mut self) -> WidgetResult<()> {
        self.update(false)
    }

    /// React to a viewport resize. The layout is recomputed only when
    /// the resize crosses a screen class boundary; returns whether it
    /// did.
    pub fn on_resize(&mut self, viewport_width: f32) -> WidgetResult<bool> {
        self.viewport_width = Some(viewport_width);
        let screen = self.engine.classify(self.viewport_width);
        if self.current_screen.as_deref() == Some(screen.as_str()) {
            return Ok(false);
        }

        tracing::debug!(from = ?self.current_screen, to = %screen, "screen class changed");
        self.update(false)?;
        Ok(true)
    }

    /// React to an already-stored option change.
    pub fn apply(&mut self, change: OptionChange) -> WidgetResult<()> {
        match change.effect() {
            ChangeEffect::StructuralRebuild => {
                self.rebuild_engine();
                self.update(true)
            }
            ChangeEffect::ReRender => self.update(false),
            ChangeEffect::NoOp => Ok(()),
        }
    }

    pub fn set_rows(&mut self, rows: Vec<SizeConfig>) -> WidgetResult<()> {
        self.store.set(OptionChange::Rows, |options| options.rows = rows);
        self.apply(OptionChange::Rows)
    }

    pub fn set_cols(&mut self, cols: Vec<SizeConfig>) -> WidgetResult<()> {
        self.store.set(OptionChange::Cols, |options| options.cols = cols);
        self.apply(OptionChange::Cols)
    }

    pub fn set_items(&mut self, items: Vec<Item>) -> WidgetResult<()> {
        self.store.set(OptionChange::Items, |options| options.items = items);
        self.apply(OptionChange::Items)
    }

    pub fn set_screen_by_width(&mut self, classifier: Option<ScreenByWidthFn>) -> WidgetResult<()> {
        self.store
            .set(OptionChange::ScreenByWidth, |options| options.screen_by_width = classifier);
        self.apply(OptionChange::ScreenByWidth)
    }

    pub fn set_single_column_screen(&mut self, screens: impl Into<String>) -> WidgetResult<()> {
        let screens = screens.into();
        self.store
            .set(OptionChange::SingleColumnScreen, |options| {
                options.single_column_screen = screens
            });
        self.apply(OptionChange::SingleColumnScreen)
    }

    pub fn set_size(&mut self, width: f32, height: f32) -> WidgetResult<()> {
        self.store.set(OptionChange::Width, |options| options.width = width);
        self.store.set(OptionChange::Height, |options| options.height = height);
        self.apply(OptionChange::Height)
    }

    /// Drop the rendered tree and every detached root.
    pub fn dispose(&mut self) {
        self.tree.clean_detached();
        self.tree.destroy_root();
        self.item_nodes.clear();
        self.current_screen = None;
    }

    fn rebuild_engine(&mut self) {
        let (classifier, single_column) = self
            .store
            .with(|options| (options.screen_by_width.clone(), options.single_column_screen.clone()));
        let mut policy = match classifier {
            Some(classifier) => ScreenPolicy::with_classifier(classifier),
            None => ScreenPolicy::new(),
        };
        policy.set_single_column_screen(single_column);
        self.engine.set_policy(policy);
    }

    fn render_layout(&mut self, force: bool) -> WidgetResult<()> {
        let options = self.store.get();
        let screen = self.engine.classify(self.viewport_width);
        let container = Size::new(options.width, options.height);

        let root = self
            .engine
            .run(&options.rows, &options.cols, &options.items, &screen, container)?;

        // The pass succeeded; only now is the previous tree replaced.
        if force {
            self.tree.destroy_root();
        } else {
            self.tree.detach_root();
        }
        self.item_nodes.clear();

        if let Some(root) = root {
            let root_id = instantiate(&mut self.tree, &root);
            self.tree.set_root(root_id);
            self.collect_item_nodes(root_id);
        }

        self.element_classes = vec![
            RESPONSIVE_BOX_CLASS.to_string(),
            format!("{SCREEN_SIZE_CLASS_PREFIX}{screen}"),
        ];
        self.current_screen = Some(screen);
        Ok(())
    }

    fn collect_item_nodes(&mut self, root: RenderBoxId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(render_box) = self.tree.get(id) {
                if let RenderBoxKind::Item(item) = render_box.kind {
                    self.item_nodes.insert(item, id);
                }
                stack.extend(render_box.children.iter().copied());
            }
        }
    }

    fn fire_layout_changed(&mut self) {
        if let Some(screen) = self.current_screen.clone() {
            if let Some(callback) = &mut self.layout_changed {
                callback(&screen);
            }
        }
    }
}
