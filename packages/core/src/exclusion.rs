//! Exclusion rules for files, selectors and properties

use crate::error::{PxUnitError, PxUnitResult};
use crate::options::ExclusionSpec;
use regex::Regex;
use std::collections::HashMap;

/// A compiled exclusion test
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// Matches when the value contains the text (case-sensitive, unanchored)
    Literal(String),
    /// Matches when the expression finds a match anywhere in the value
    Pattern(Regex),
}

impl ExclusionRule {
    pub fn compile(spec: &ExclusionSpec) -> PxUnitResult<Self> {
        match spec {
            ExclusionSpec::Literal(text) => Ok(Self::Literal(text.clone())),
            ExclusionSpec::Pattern { pattern } => Regex::new(pattern)
                .map(Self::Pattern)
                .map_err(|err| PxUnitError::invalid_pattern(pattern.as_str(), err)),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Literal(text) => value.contains(text.as_str()),
            Self::Pattern(regex) => regex.is_match(value),
        }
    }

    /// Text the rule was built from
    pub fn source(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Pattern(regex) => regex.as_str(),
        }
    }
}

/// Compile a list of specs, failing on the first bad pattern
pub fn compile_rules(specs: &[ExclusionSpec]) -> PxUnitResult<Vec<ExclusionRule>> {
    specs.iter().map(ExclusionRule::compile).collect()
}

/// Unmemoized existential match over an ordered rule list
pub fn is_excluded(value: &str, rules: &[ExclusionRule]) -> bool {
    rules.iter().any(|rule| rule.matches(value))
}

/// Ordered rule list with per-(value, rule) memoization.
///
/// Owned by a single pipeline run; the memo never outlives it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    rules: Vec<ExclusionRule>,
    // value -> outcome per rule index, filled lazily up to the first match
    memo: HashMap<String, Vec<Option<bool>>>,
}

impl ExclusionMatcher {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self {
            rules,
            memo: HashMap::new(),
        }
    }

    pub fn is_excluded(&mut self, value: &str) -> bool {
        if self.rules.is_empty() {
            return false;
        }

        let rule_count = self.rules.len();
        let outcomes = self
            .memo
            .entry(value.to_string())
            .or_insert_with(|| vec![None; rule_count]);

        for (rule, outcome) in self.rules.iter().zip(outcomes.iter_mut()) {
            let matched = *outcome.get_or_insert_with(|| rule.matches(value));
            if matched {
                return true;
            }
        }

        false
    }

    /// Number of distinct values memoized so far
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}
