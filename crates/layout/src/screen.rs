//! Screen classification: mapping viewport widths to named size classes.

use std::sync::Arc;

/// Viewport width assumed when no live viewport is available
/// (headless rendering, detached widgets).
pub const FALLBACK_SCREEN_WIDTH: f32 = 1920.0;

/// Strategy mapping a viewport width to a screen class name.
pub type ScreenByWidthFn = Arc<dyn Fn(f32) -> String + Send + Sync>;

/// Default width buckets: xs < 768 <= sm < 992 <= md < 1200 <= lg.
pub fn default_screen_by_width(width: f32) -> String {
    let class = if width < 768.0 {
        "xs"
    } else if width < 992.0 {
        "sm"
    } else if width < 1200.0 {
        "md"
    } else {
        "lg"
    };
    class.to_string()
}

/// Case-insensitive match of `screen` against a whitespace-delimited
/// token list.
pub fn screen_matches(tokens: &str, screen: &str) -> bool {
    tokens
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case(screen))
}

/// True when a screen tag permits the given class. Untagged entries are
/// always kept.
pub fn screen_allows(tag: Option<&str>, screen: &str) -> bool {
    tag.map_or(true, |tokens| screen_matches(tokens, screen))
}

/// Classification policy for one responsive container: the
/// width-to-class strategy plus the single-column class pattern.
#[derive(Clone)]
pub struct ScreenPolicy {
    screen_by_width: ScreenByWidthFn,
    single_column_screen: String,
}

impl ScreenPolicy {
    pub fn new() -> Self {
        Self {
            screen_by_width: Arc::new(default_screen_by_width),
            single_column_screen: String::new(),
        }
    }

    pub fn with_classifier(screen_by_width: ScreenByWidthFn) -> Self {
        Self {
            screen_by_width,
            single_column_screen: String::new(),
        }
    }

    pub fn set_single_column_screen(&mut self, pattern: impl Into<String>) {
        self.single_column_screen = pattern.into();
    }

    pub fn single_column_screen(&self) -> &str {
        &self.single_column_screen
    }

    /// Map a viewport width to its screen class.
    pub fn classify(&self, width: f32) -> String {
        (self.screen_by_width)(width)
    }

    /// Whether the single-column pattern matches the given class. An
    /// empty pattern never matches.
    pub fn is_single_column_class(&self, screen: &str) -> bool {
        screen_matches(&self.single_column_screen, screen)
    }
}

impl Default for ScreenPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScreenPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenPolicy")
            .field("single_column_screen", &self.single_column_screen)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_breakpoints() {
        assert_eq!(default_screen_by_width(0.0), "xs");
        assert_eq!(default_screen_by_width(767.9), "xs");
        assert_eq!(default_screen_by_width(768.0), "sm");
        assert_eq!(default_screen_by_width(991.9), "sm");
        assert_eq!(default_screen_by_width(992.0), "md");
        assert_eq!(default_screen_by_width(1199.9), "md");
        assert_eq!(default_screen_by_width(1200.0), "lg");
        assert_eq!(default_screen_by_width(FALLBACK_SCREEN_WIDTH), "lg");
    }

    #[test]
    fn test_screen_matches_tokens() {
        assert!(screen_matches("xs sm", "xs"));
        assert!(screen_matches("xs sm", "SM"));
        assert!(!screen_matches("xs sm", "lg"));
        assert!(!screen_matches("", "xs"));
        // A token must match whole, not as a substring.
        assert!(!screen_matches("xsmall", "xs"));
    }

    #[test]
    fn test_screen_allows_untagged() {
        assert!(screen_allows(None, "lg"));
        assert!(screen_allows(Some("lg"), "lg"));
        assert!(!screen_allows(Some("xs"), "lg"));
    }

    #[test]
    fn test_policy_custom_classifier() {
        let policy = ScreenPolicy::with_classifier(Arc::new(|width| {
            if width < 1000.0 {
                "small".to_string()
            } else {
                "large".to_string()
            }
        }));
        assert_eq!(policy.classify(500.0), "small");
        assert_eq!(policy.classify(1500.0), "large");
    }

    #[test]
    fn test_policy_single_column_pattern() {
        let mut policy = ScreenPolicy::new();
        assert!(!policy.is_single_column_class("xs"));

        policy.set_single_column_screen("xs sm");
        assert!(policy.is_single_column_class("xs"));
        assert!(policy.is_single_column_class("SM"));
        assert!(!policy.is_single_column_class("lg"));
    }
}
