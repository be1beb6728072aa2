//! Widget options and change tracking.

use std::fmt;

use layout::{Item, ScreenByWidthFn, SizeConfig};
use parking_lot::{Mutex, RwLock};
use serde::Deserialize;

/// Configuration of a responsive box widget.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ResponsiveBoxOptions {
    pub rows: Vec<SizeConfig>,
    pub cols: Vec<SizeConfig>,
    pub items: Vec<Item>,
    /// Custom screen classifier. `None` keeps the built-in breakpoints.
    #[serde(skip)]
    pub screen_by_width: Option<ScreenByWidthFn>,
    /// Whitespace-separated screen classes collapsed to a single
    /// column. Empty means never.
    pub single_column_screen: String,
    pub width: f32,
    pub height: f32,
}

impl Default for ResponsiveBoxOptions {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cols: Vec::new(),
            items: Vec::new(),
            screen_by_width: None,
            single_column_screen: String::new(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl fmt::Debug for ResponsiveBoxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveBoxOptions")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("items", &self.items)
            .field("single_column_screen", &self.single_column_screen)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Which option was changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionChange {
    Rows,
    Cols,
    Items,
    ScreenByWidth,
    SingleColumnScreen,
    Width,
    Height,
    /// The cached screen class; maintained internally, changing it
    /// from outside has no effect on the rendered layout.
    CurrentScreenClass,
}

/// What a change requires from the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeEffect {
    /// Tear the rendered tree down and rebuild from scratch.
    StructuralRebuild,
    /// Re-run the layout pass, keeping the previous tree detached.
    ReRender,
    NoOp,
}

impl OptionChange {
    pub fn effect(self) -> ChangeEffect {
        match self {
            OptionChange::Rows
            | OptionChange::Cols
            | OptionChange::Items
            | OptionChange::ScreenByWidth
            | OptionChange::SingleColumnScreen => ChangeEffect::StructuralRebuild,
            OptionChange::Width | OptionChange::Height => ChangeEffect::ReRender,
            OptionChange::CurrentScreenClass => ChangeEffect::NoOp,
        }
    }
}

type ChangeListener = Box<dyn FnMut(OptionChange) + Send>;

/// Shared option storage. Mutations go through [`OptionsStore::set`]
/// so observers hear about every change.
pub struct OptionsStore {
    options: RwLock<ResponsiveBoxOptions>,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl OptionsStore {
    pub fn new(options: ResponsiveBoxOptions) -> Self {
        Self {
            options: RwLock::new(options),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current options.
    pub fn get(&self) -> ResponsiveBoxOptions {
        self.options.read().clone()
    }

    /// Read without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&ResponsiveBoxOptions) -> R) -> R {
        f(&self.options.read())
    }

    /// Apply a mutation and notify listeners.
    pub fn set(&self, change: OptionChange, f: impl FnOnce(&mut ResponsiveBoxOptions)) {
        f(&mut self.options.write());
        for listener in self.listeners.lock().iter_mut() {
            listener(change);
        }
    }

    /// Apply a mutation without notifying anyone.
    pub fn set_silent(&self, f: impl FnOnce(&mut ResponsiveBoxOptions)) {
        f(&mut self.options.write());
    }

    pub fn on_change(&self, listener: impl FnMut(OptionChange) + Send + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }
}

impl fmt::Debug for OptionsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsStore")
            .field("options", &*self.options.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_change_effects() {
        assert_eq!(OptionChange::Items.effect(), ChangeEffect::StructuralRebuild);
        assert_eq!(OptionChange::Width.effect(), ChangeEffect::ReRender);
        assert_eq!(OptionChange::CurrentScreenClass.effect(), ChangeEffect::NoOp);
    }

    #[test]
    fn test_store_notifies_listeners() {
        let store = OptionsStore::new(ResponsiveBoxOptions::default());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        store.on_change(move |change| {
            assert_eq!(change, OptionChange::Width);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set(OptionChange::Width, |options| options.width = 640.0);
        store.set_silent(|options| options.height = 480.0);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(store.with(|options| (options.width, options.height)), (640.0, 480.0));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ResponsiveBoxOptions = serde_json::from_str(
            r#"{
                "rows": [{"ratio": 1.0}, {"ratio": 2.0, "screen": "lg"}],
                "cols": [{"ratio": 1.0}],
                "single_column_screen": "xs sm"
            }"#,
        )
        .unwrap();

        assert_eq!(options.rows.len(), 2);
        assert_eq!(options.rows[1].screen.as_deref(), Some("lg"));
        assert_eq!(options.single_column_screen, "xs sm");
        assert_eq!(options.width, 1280.0);
        assert!(options.items.is_empty());
    }
}
