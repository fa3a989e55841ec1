//! # pxunit
//!
//! Rewrites pixel lengths in stylesheet declaration values into
//! viewport-relative (`vw`) or root-relative (`rem`) units.
//!
//! - Quoted strings and `url(...)` references are never touched
//! - Lengths at or below the ignore threshold keep their exact source text
//! - Files, selectors and properties can be excluded with literal or
//!   regular-expression rules
//! - Conversions are memoized in bounded LRU caches owned by the pipeline
//!
//! ## Example
//!
//! ```rust
//! use pxunit_core::{ConversionConfig, Options, PxToUnit, StyleRule, Stylesheet};
//!
//! let config = ConversionConfig::from_options(&Options::default()).unwrap();
//! let mut pipeline = PxToUnit::new(config).unwrap();
//!
//! let mut sheet = Stylesheet::with_source("src/app.css");
//! sheet.add_rule(StyleRule::new(".box").with_declaration("margin", "10px 1px"));
//!
//! pipeline.process(&mut sheet);
//! assert_eq!(sheet.rules[0].declarations[0].value, "2.66667vw 1px");
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod exclusion;
pub mod lru;
pub mod number_format;
pub mod options;
pub mod policy;
pub mod rewriter;
pub mod stylesheet;

pub use config::{ConversionConfig, TargetUnit};
pub use converter::{to_rem, to_vw, LengthUnit, UnitConverter};
pub use error::{PxUnitError, PxUnitResult};
pub use exclusion::{is_excluded, ExclusionMatcher, ExclusionRule};
pub use options::{ExclusionSpec, Options};
pub use policy::{ConvertedValue, ProcessReport, PxToUnit};
pub use rewriter::{RewriteResult, ValueRewriter, ValueToken};
pub use stylesheet::{Declaration, StyleRule, StyleSheetHost, Stylesheet};
