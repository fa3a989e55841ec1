//! Declaration value tokenizer and pixel rewriter

use crate::converter::UnitConverter;
use crate::error::{PxUnitError, PxUnitResult};
use regex::Regex;

/// Double-quoted run, single-quoted run, `url(...)` call, or a number
/// directly followed by `px`, tried in that order at each position.
const VALUE_PATTERN: &str = r#""[^"]+"|'[^']+'|url\([^)]+\)|([0-9]*\.?[0-9]+)px"#;

/// A lexical piece of a declaration value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueToken<'a> {
    /// Copied through verbatim: plain text, quoted strings, `url(...)`
    Literal(&'a str),
    /// A pixel length; `raw` is the full source text including `px`
    Length { magnitude: f64, raw: &'a str },
}

/// Outcome of rewriting one value into one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub changed: bool,
    pub value: String,
}

impl RewriteResult {
    fn unchanged(value: &str) -> Self {
        Self {
            changed: false,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValueRewriter {
    pattern: Regex,
    ignore_threshold: f64,
    unit_precision: u32,
}

impl ValueRewriter {
    pub fn new(ignore_threshold: f64, unit_precision: u32) -> PxUnitResult<Self> {
        let pattern = Regex::new(VALUE_PATTERN)
            .map_err(|err| PxUnitError::invalid_pattern(VALUE_PATTERN, err))?;

        Ok(Self {
            pattern,
            ignore_threshold,
            unit_precision,
        })
    }

    /// Split a value into verbatim spans and pixel lengths.
    ///
    /// Concatenating every token's source text gives back `value`.
    pub fn tokenize<'a>(&self, value: &'a str) -> Vec<ValueToken<'a>> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(value) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            if whole.start() > last {
                tokens.push(ValueToken::Literal(&value[last..whole.start()]));
            }
            last = whole.end();

            let raw = whole.as_str();
            let token = match caps.get(1) {
                Some(number) => match number.as_str().parse::<f64>() {
                    Ok(magnitude) if magnitude.is_finite() => ValueToken::Length { magnitude, raw },
                    // Structurally a length but not a usable number
                    _ => ValueToken::Literal(raw),
                },
                None => ValueToken::Literal(raw),
            };
            tokens.push(token);
        }

        if last < value.len() {
            tokens.push(ValueToken::Literal(&value[last..]));
        }

        tokens
    }

    /// Rewrite every pixel length above the ignore threshold with `converter`.
    ///
    /// A length the converter cannot express keeps its source text. `changed`
    /// is true exactly when the output differs from the input.
    pub fn rewrite(&self, original: &str, converter: &mut UnitConverter) -> RewriteResult {
        if !original.contains("px") {
            return RewriteResult::unchanged(original);
        }

        let mut value = String::with_capacity(original.len());
        for token in self.tokenize(original) {
            match token {
                ValueToken::Literal(text) => value.push_str(text),
                ValueToken::Length { magnitude, raw } => {
                    let converted = if magnitude <= self.ignore_threshold {
                        None
                    } else {
                        converter.convert(magnitude, self.unit_precision)
                    };
                    value.push_str(converted.as_deref().unwrap_or(raw));
                }
            }
        }

        RewriteResult {
            changed: value != original,
            value,
        }
    }
}
