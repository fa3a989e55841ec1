use crate::config::TargetUnit;
use serde::{Deserialize, Serialize};

/// User-facing conversion options, as written in a config file.
///
/// Every field is optional; missing fields take the defaults below and
/// unknown keys are ignored. Values are checked by
/// [`ConversionConfig::from_options`](crate::ConversionConfig::from_options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Unit family lengths are converted into
    pub target_unit: TargetUnit,

    /// Lengths at or below this many pixels are left untouched
    pub ignore_threshold: f64,

    /// Design viewport width in pixels (vw divisor)
    pub viewport_width: f64,

    /// Accepted for compatibility; no unit uses it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<f64>,

    /// Root font size in pixels (rem divisor)
    pub html_font_size: f64,

    /// Decimal places kept in converted values
    pub unit_precision: i64,

    pub exclude_files: Vec<ExclusionSpec>,
    pub exclude_selectors: Vec<ExclusionSpec>,
    pub exclude_properties: Vec<ExclusionSpec>,

    /// Capacity of each per-unit conversion cache
    pub cache_size: i64,

    /// Emit diagnostic log events
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_unit: TargetUnit::Vw,
            ignore_threshold: 1.0,
            viewport_width: 375.0,
            viewport_height: None,
            html_font_size: 37.5,
            unit_precision: 5,
            exclude_files: Vec::new(),
            exclude_selectors: Vec::new(),
            exclude_properties: Vec::new(),
            cache_size: 100,
            debug: false,
        }
    }
}

impl Options {
    /// Defaults with a different target unit
    pub fn with_target_unit(target_unit: TargetUnit) -> Self {
        Self {
            target_unit,
            ..Default::default()
        }
    }
}

/// An exclusion entry before compilation.
///
/// In JSON a bare string is a literal substring and an object
/// `{ "pattern": "..." }` is a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusionSpec {
    Literal(String),
    Pattern { pattern: String },
}

impl ExclusionSpec {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: source.into(),
        }
    }
}

impl From<&str> for ExclusionSpec {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}
