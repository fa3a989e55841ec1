use crate::config::{ConversionConfig, TargetUnit};
use crate::converter::UnitConverter;
use crate::error::PxUnitResult;
use crate::exclusion::ExclusionMatcher;
use crate::rewriter::{RewriteResult, ValueRewriter};
use crate::stylesheet::StyleSheetHost;
use serde::Serialize;
use tracing::{debug, instrument};

/// Counters describing what one `process` call did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    pub skipped_file: bool,
    pub rules_skipped: usize,
    pub declarations_skipped: usize,
    pub declarations_changed: usize,
    pub declarations_inserted: usize,
}

/// Converted forms of one declaration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedValue {
    pub vw: Option<RewriteResult>,
    pub rem: Option<RewriteResult>,
}

impl ConvertedValue {
    pub fn changed(&self) -> bool {
        self.vw.as_ref().is_some_and(|r| r.changed) || self.rem.as_ref().is_some_and(|r| r.changed)
    }
}

/// One pixel conversion pipeline.
///
/// Owns its exclusion memos and conversion caches, so separate instances
/// never share state. Build one per run (or per thread).
#[derive(Debug, Clone)]
pub struct PxToUnit {
    config: ConversionConfig,
    files: ExclusionMatcher,
    selectors: ExclusionMatcher,
    properties: ExclusionMatcher,
    vw: UnitConverter,
    rem: UnitConverter,
    rewriter: ValueRewriter,
}

impl PxToUnit {
    pub const NAME: &'static str = "px-to-unit";

    pub fn new(config: ConversionConfig) -> PxUnitResult<Self> {
        let rewriter = ValueRewriter::new(config.ignore_threshold(), config.unit_precision())?;

        Ok(Self {
            files: ExclusionMatcher::new(config.exclude_files().to_vec()),
            selectors: ExclusionMatcher::new(config.exclude_selectors().to_vec()),
            properties: ExclusionMatcher::new(config.exclude_properties().to_vec()),
            vw: UnitConverter::vw(config.viewport_width(), config.cache_capacity()),
            rem: UnitConverter::rem(config.html_font_size(), config.cache_capacity()),
            rewriter,
            config,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Rewrite a raw declaration value into every requested unit.
    ///
    /// Exclusions are not consulted.
    pub fn convert_value(&mut self, value: &str) -> ConvertedValue {
        let target = self.config.target_unit();

        // Fast rejection; the rewriter would agree
        if !value.contains("px") {
            return ConvertedValue {
                vw: matches!(target, TargetUnit::Vw | TargetUnit::VwAndRem)
                    .then(|| unchanged(value)),
                rem: matches!(target, TargetUnit::Rem | TargetUnit::VwAndRem)
                    .then(|| unchanged(value)),
            };
        }

        let vw = match target {
            TargetUnit::Vw | TargetUnit::VwAndRem => Some(self.rewriter.rewrite(value, &mut self.vw)),
            TargetUnit::Rem => None,
        };
        let rem = match target {
            TargetUnit::Rem | TargetUnit::VwAndRem => {
                Some(self.rewriter.rewrite(value, &mut self.rem))
            }
            TargetUnit::Vw => None,
        };

        ConvertedValue { vw, rem }
    }

    pub fn is_file_excluded(&mut self, source: &str) -> bool {
        self.files.is_excluded(source)
    }

    pub fn is_selector_excluded(&mut self, selector: &str) -> bool {
        self.selectors.is_excluded(selector)
    }

    pub fn is_property_excluded(&mut self, property: &str) -> bool {
        self.properties.is_excluded(property)
    }

    /// Convert every eligible declaration of a document in place
    #[instrument(skip(self, sheet), fields(source = sheet.source().unwrap_or("<anonymous>"), target = %self.config.target_unit()))]
    pub fn process<S: StyleSheetHost + ?Sized>(&mut self, sheet: &mut S) -> ProcessReport {
        let debug = self.config.debug();
        let mut report = ProcessReport::default();

        // A document without an identifier has nothing to match file rules against
        if let Some(source) = sheet.source() {
            if self.files.is_excluded(source) {
                if debug {
                    debug!(file = %source, "[{}] skipping file", Self::NAME);
                }
                report.skipped_file = true;
                return report;
            }
        }

        if debug {
            debug!(file = sheet.source().unwrap_or("<anonymous>"), "[{}] processing file", Self::NAME);
        }

        for rule in 0..sheet.rule_count() {
            if self.selectors.is_excluded(sheet.selector(rule)) {
                if debug {
                    debug!(selector = %sheet.selector(rule), "[{}] skipping selector", Self::NAME);
                }
                report.rules_skipped += 1;
                continue;
            }

            self.process_rule(sheet, rule, &mut report);
        }

        report
    }

    fn process_rule<S: StyleSheetHost + ?Sized>(
        &mut self,
        sheet: &mut S,
        rule: usize,
        report: &mut ProcessReport,
    ) {
        let debug = self.config.debug();
        let mut index = 0;

        while index < sheet.declaration_count(rule) {
            let (property, value) = sheet.declaration(rule, index);

            if self.properties.is_excluded(property) {
                if debug {
                    debug!(property = %property, "[{}] skipping property", Self::NAME);
                }
                report.declarations_skipped += 1;
                index += 1;
                continue;
            }

            if !value.contains("px") {
                index += 1;
                continue;
            }

            let property = property.to_string();
            let original = value.to_string();
            let converted = self.convert_value(&original);

            if !converted.changed() {
                index += 1;
                continue;
            }

            if debug {
                for result in [&converted.vw, &converted.rem].into_iter().flatten() {
                    debug!("[{}] convert: \"{}\" -> \"{}\"", Self::NAME, original, result.value);
                }
            }

            match (self.config.target_unit(), converted.vw, converted.rem) {
                (TargetUnit::Vw, Some(vw), _) => {
                    sheet.set_value(rule, index, vw.value);
                    report.declarations_changed += 1;
                }
                (TargetUnit::Rem, _, Some(rem)) => {
                    sheet.set_value(rule, index, rem.value);
                    report.declarations_changed += 1;
                }
                (TargetUnit::VwAndRem, Some(vw), Some(rem)) => {
                    sheet.set_value(rule, index, rem.value);
                    sheet.insert_after(rule, index, property, vw.value);
                    report.declarations_changed += 1;
                    report.declarations_inserted += 1;
                    // The inserted vw declaration is already converted
                    index += 1;
                }
                _ => {}
            }

            index += 1;
        }
    }
}

fn unchanged(value: &str) -> RewriteResult {
    RewriteResult {
        changed: false,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ExclusionSpec, Options};
    use crate::stylesheet::{StyleRule, Stylesheet};

    fn pipeline(options: Options) -> PxToUnit {
        PxToUnit::new(ConversionConfig::from_options(&options).unwrap()).unwrap()
    }

    fn single(selector: &str, property: &str, value: &str) -> Stylesheet {
        let mut sheet = Stylesheet::with_source("/project/src/app.css");
        sheet.add_rule(StyleRule::new(selector).with_declaration(property, value));
        sheet
    }

    #[test]
    fn test_convert_value_per_target() {
        let mut px = pipeline(Options::default());
        let converted = px.convert_value("100px");
        assert_eq!(converted.vw.unwrap().value, "26.66667vw");
        assert!(converted.rem.is_none());

        let mut px = pipeline(Options::with_target_unit(TargetUnit::VwAndRem));
        let converted = px.convert_value("100px");
        assert_eq!(converted.vw.unwrap().value, "26.66667vw");
        assert_eq!(converted.rem.unwrap().value, "2.66667rem");
    }

    #[test]
    fn test_convert_value_without_px() {
        let mut px = pipeline(Options::default());
        let converted = px.convert_value("auto");
        assert!(!converted.changed());
        assert_eq!(converted.vw.unwrap().value, "auto");
    }

    #[test]
    fn test_dual_unit_inserts_vw_after_rem() {
        let mut px = pipeline(Options::with_target_unit(TargetUnit::VwAndRem));
        let mut sheet = single(".a", "width", "100px");
        sheet.rules[0]
            .declarations
            .push(crate::stylesheet::Declaration::new("height", "auto"));

        let report = px.process(&mut sheet);

        assert_eq!(sheet.declaration_count(0), 3);
        assert_eq!(sheet.declaration(0, 0), ("width", "2.66667rem"));
        assert_eq!(sheet.declaration(0, 1), ("width", "26.66667vw"));
        assert_eq!(sheet.declaration(0, 2), ("height", "auto"));
        assert_eq!(report.declarations_changed, 1);
        assert_eq!(report.declarations_inserted, 1);
    }

    #[test]
    fn test_excluded_file_is_untouched() {
        let mut px = pipeline(Options {
            exclude_files: vec![ExclusionSpec::pattern("src/.*\\.css$")],
            ..Default::default()
        });
        let mut sheet = single(".a", "width", "100px");
        let before = sheet.clone();

        let report = px.process(&mut sheet);
        assert!(report.skipped_file);
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_anonymous_document_is_not_file_excluded() {
        let mut px = pipeline(Options {
            exclude_files: vec![ExclusionSpec::literal("")],
            ..Default::default()
        });
        let mut sheet = Stylesheet::new();
        sheet.add_rule(StyleRule::new(".a").with_declaration("width", "100px"));

        let report = px.process(&mut sheet);
        assert!(!report.skipped_file);
        assert_eq!(sheet.declaration(0, 0), ("width", "26.66667vw"));
    }

    #[test]
    fn test_excluded_property_counts() {
        let mut px = pipeline(Options {
            exclude_properties: vec![ExclusionSpec::literal("border")],
            ..Default::default()
        });
        let mut sheet = Stylesheet::with_source("a.css");
        sheet.add_rule(
            StyleRule::new(".a")
                .with_declaration("border-width", "10px")
                .with_declaration("padding", "10px"),
        );

        let report = px.process(&mut sheet);
        assert_eq!(sheet.declaration(0, 0), ("border-width", "10px"));
        assert_eq!(sheet.declaration(0, 1), ("padding", "2.66667vw"));
        assert_eq!(report.declarations_skipped, 1);
        assert_eq!(report.declarations_changed, 1);
    }

    #[test]
    fn test_debug_flag_does_not_change_output() {
        let mut quiet = pipeline(Options::with_target_unit(TargetUnit::VwAndRem));
        let mut loud = pipeline(Options {
            debug: true,
            ..Options::with_target_unit(TargetUnit::VwAndRem)
        });

        let mut a = single(".a", "margin", "10px 20px 1px");
        let mut b = a.clone();
        assert_eq!(quiet.process(&mut a), loud.process(&mut b));
        assert_eq!(a, b);
    }
}
