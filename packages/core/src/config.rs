use crate::converter::LengthUnit;
use crate::error::{PxUnitError, PxUnitResult};
use crate::exclusion::{compile_rules, ExclusionRule};
use crate::options::Options;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Which unit(s) pixel lengths are rewritten into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetUnit {
    #[default]
    #[serde(rename = "vw")]
    Vw,
    #[serde(rename = "rem")]
    Rem,
    /// Rewrite to rem in place and add a vw declaration right after it
    #[serde(rename = "vw&rem")]
    VwAndRem,
}

impl TargetUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetUnit::Vw => "vw",
            TargetUnit::Rem => "rem",
            TargetUnit::VwAndRem => "vw&rem",
        }
    }

    pub fn wants(self, unit: LengthUnit) -> bool {
        matches!(
            (self, unit),
            (TargetUnit::Vw, LengthUnit::Vw)
                | (TargetUnit::Rem, LengthUnit::Rem)
                | (TargetUnit::VwAndRem, _)
        )
    }
}

impl fmt::Display for TargetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetUnit {
    type Err = PxUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vw" => Ok(TargetUnit::Vw),
            "rem" => Ok(TargetUnit::Rem),
            "vw&rem" => Ok(TargetUnit::VwAndRem),
            other => Err(PxUnitError::invalid_configuration(
                "targetUnit",
                format!("expected one of vw, rem, vw&rem but found '{}'", other),
            )),
        }
    }
}

/// Validated, immutable settings for one pipeline run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    target_unit: TargetUnit,
    ignore_threshold: f64,
    viewport_width: f64,
    html_font_size: f64,
    unit_precision: u32,
    cache_capacity: NonZeroUsize,
    exclude_files: Vec<ExclusionRule>,
    exclude_selectors: Vec<ExclusionRule>,
    exclude_properties: Vec<ExclusionRule>,
    debug: bool,
}

impl ConversionConfig {
    /// Validate options and compile their exclusion patterns
    pub fn from_options(options: &Options) -> PxUnitResult<Self> {
        let ignore_threshold = non_negative("ignoreThreshold", options.ignore_threshold)?;
        let viewport_width = positive("viewportWidth", options.viewport_width)?;
        let html_font_size = positive("htmlFontSize", options.html_font_size)?;

        let unit_precision = u32::try_from(options.unit_precision).map_err(|_| {
            PxUnitError::invalid_configuration(
                "unitPrecision",
                format!("must be a non-negative integer, got {}", options.unit_precision),
            )
        })?;

        let cache_capacity = usize::try_from(options.cache_size)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                PxUnitError::invalid_configuration(
                    "cacheSize",
                    format!("must be a positive integer, got {}", options.cache_size),
                )
            })?;

        Ok(Self {
            target_unit: options.target_unit,
            ignore_threshold,
            viewport_width,
            html_font_size,
            unit_precision,
            cache_capacity,
            exclude_files: compile_rules(&options.exclude_files)?,
            exclude_selectors: compile_rules(&options.exclude_selectors)?,
            exclude_properties: compile_rules(&options.exclude_properties)?,
            debug: options.debug,
        })
    }

    pub fn target_unit(&self) -> TargetUnit {
        self.target_unit
    }

    pub fn ignore_threshold(&self) -> f64 {
        self.ignore_threshold
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn html_font_size(&self) -> f64 {
        self.html_font_size
    }

    pub fn unit_precision(&self) -> u32 {
        self.unit_precision
    }

    pub fn cache_capacity(&self) -> NonZeroUsize {
        self.cache_capacity
    }

    pub fn exclude_files(&self) -> &[ExclusionRule] {
        &self.exclude_files
    }

    pub fn exclude_selectors(&self) -> &[ExclusionRule] {
        &self.exclude_selectors
    }

    pub fn exclude_properties(&self) -> &[ExclusionRule] {
        &self.exclude_properties
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl TryFrom<Options> for ConversionConfig {
    type Error = PxUnitError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        Self::from_options(&options)
    }
}

fn positive(field: &'static str, value: f64) -> PxUnitResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PxUnitError::invalid_configuration(
            field,
            format!("must be a finite number greater than 0, got {}", value),
        ))
    }
}

fn non_negative(field: &'static str, value: f64) -> PxUnitResult<f64> {
    // An infinite threshold is allowed: it simply disables conversion
    if !value.is_nan() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PxUnitError::invalid_configuration(
            field,
            format!("must be a number greater than or equal to 0, got {}", value),
        ))
    }
}
