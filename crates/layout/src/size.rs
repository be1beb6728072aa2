//! Row and column sizing rules.

use serde::{Deserialize, Serialize};

/// A size value: a fixed pixel amount or automatic sizing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizeValueRepr", into = "SizeValueRepr")]
pub enum SizeValue {
    /// Size determined by the renderer (share of remaining space).
    Auto,
    /// Fixed size in pixels.
    Px(f32),
}

impl SizeValue {
    pub const ZERO: SizeValue = SizeValue::Px(0.0);

    /// Pixel amount, treating `Auto` as zero for aggregation.
    #[inline]
    pub fn px(&self) -> f32 {
        match self {
            SizeValue::Auto => 0.0,
            SizeValue::Px(value) => *value,
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, SizeValue::Auto)
    }

    /// True for `Auto` and for an exact zero pixel amount.
    #[inline]
    pub fn is_zero_or_auto(&self) -> bool {
        match self {
            SizeValue::Auto => true,
            SizeValue::Px(value) => *value == 0.0,
        }
    }
}

impl Default for SizeValue {
    fn default() -> Self {
        SizeValue::ZERO
    }
}

/// Wire representation: a bare number or the `"auto"` keyword.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SizeValueRepr {
    Px(f32),
    Keyword(String),
}

impl From<SizeValueRepr> for SizeValue {
    fn from(repr: SizeValueRepr) -> Self {
        match repr {
            SizeValueRepr::Px(value) => SizeValue::Px(value),
            // Unknown keywords fall back to auto rather than erroring.
            SizeValueRepr::Keyword(_) => SizeValue::Auto,
        }
    }
}

impl From<SizeValue> for SizeValueRepr {
    fn from(value: SizeValue) -> Self {
        match value {
            SizeValue::Auto => SizeValueRepr::Keyword("auto".to_string()),
            SizeValue::Px(value) => SizeValueRepr::Px(value),
        }
    }
}

/// One row or column's sizing rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    /// Share of remaining space relative to sibling rows/columns.
    pub ratio: f32,
    /// Starting size before ratio distribution.
    pub base_size: SizeValue,
    /// Lower size bound.
    pub min_size: SizeValue,
    /// Upper size bound.
    pub max_size: SizeValue,
    /// Shrink factor applied when content overflows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink: Option<f32>,
    /// Screen classes this rule applies to (whitespace-delimited);
    /// `None` applies everywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
}

impl SizeConfig {
    /// A ratio-1 rule with zero sizes, used wherever no explicit
    /// configuration is given.
    pub fn ratio(ratio: f32) -> Self {
        Self {
            ratio,
            ..Self::default()
        }
    }
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            base_size: SizeValue::ZERO,
            min_size: SizeValue::ZERO,
            max_size: SizeValue::ZERO,
            shrink: None,
            screen: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_value_px() {
        assert_eq!(SizeValue::Px(12.0).px(), 12.0);
        assert_eq!(SizeValue::Auto.px(), 0.0);
        assert!(SizeValue::Auto.is_zero_or_auto());
        assert!(SizeValue::ZERO.is_zero_or_auto());
        assert!(!SizeValue::Px(5.0).is_zero_or_auto());
    }

    #[test]
    fn test_size_value_deserialize() {
        let value: SizeValue = serde_json::from_str("120.5").unwrap();
        assert_eq!(value, SizeValue::Px(120.5));

        let value: SizeValue = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(value, SizeValue::Auto);

        // Unknown keywords degrade to auto instead of failing the parse.
        let value: SizeValue = serde_json::from_str("\"inherit\"").unwrap();
        assert_eq!(value, SizeValue::Auto);
    }

    #[test]
    fn test_size_config_defaults() {
        let config: SizeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.ratio, 1.0);
        assert_eq!(config.base_size, SizeValue::ZERO);
        assert!(config.shrink.is_none());
        assert!(config.screen.is_none());
    }

    #[test]
    fn test_size_config_parse() {
        let config: SizeConfig =
            serde_json::from_str(r#"{"ratio": 2, "base_size": "auto", "screen": "xs sm"}"#)
                .unwrap();
        assert_eq!(config.ratio, 2.0);
        assert_eq!(config.base_size, SizeValue::Auto);
        assert_eq!(config.screen.as_deref(), Some("xs sm"));
    }
}
