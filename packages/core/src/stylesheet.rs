//! Stylesheet access used by the conversion pipeline
//!
//! The pipeline never parses CSS itself. A host (a CSS parser's tree, a
//! build tool's AST) exposes its style rules through [`StyleSheetHost`];
//! [`Stylesheet`] is a plain in-memory implementation that also
//! serializes to JSON and renders back to CSS text.

use serde::{Deserialize, Serialize};

/// Index-based view of a parsed stylesheet.
///
/// Rules are presented flat: rules nested in at-rules are enumerated like
/// top-level ones.
pub trait StyleSheetHost {
    /// Identifier of the source document (usually its path)
    fn source(&self) -> Option<&str>;

    fn rule_count(&self) -> usize;

    fn selector(&self, rule: usize) -> &str;

    fn declaration_count(&self, rule: usize) -> usize;

    /// `(property, value)` of a declaration
    fn declaration(&self, rule: usize, index: usize) -> (&str, &str);

    fn set_value(&mut self, rule: usize, index: usize, value: String);

    /// Insert a declaration directly after `index` in the same rule
    fn insert_after(&mut self, rule: usize, index: usize, property: String, value: String);
}

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Style rule with selector and ordered declarations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub selector: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_query: Option<String>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
            media_query: None,
        }
    }

    pub fn with_declaration(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }

    pub fn with_media_query(mut self, media_query: impl Into<String>) -> Self {
        self.media_query = Some(media_query.into());
        self
    }
}

/// Stylesheet document - collection of style rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            rules: Vec::new(),
        }
    }

    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for rule in &self.rules {
            let indent = if let Some(media_query) = &rule.media_query {
                css.push_str("@media ");
                css.push_str(media_query);
                css.push_str(" {\n");
                "  "
            } else {
                ""
            };

            css.push_str(indent);
            css.push_str(&rule.selector);
            css.push_str(" {\n");

            for declaration in &rule.declarations {
                css.push_str(indent);
                css.push_str("  ");
                css.push_str(&declaration.property);
                css.push_str(": ");
                css.push_str(&declaration.value);
                css.push_str(";\n");
            }

            css.push_str(indent);
            css.push_str("}\n");
            if rule.media_query.is_some() {
                css.push_str("}\n");
            }
            css.push('\n');
        }

        css
    }
}

impl StyleSheetHost for Stylesheet {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn selector(&self, rule: usize) -> &str {
        &self.rules[rule].selector
    }

    fn declaration_count(&self, rule: usize) -> usize {
        self.rules[rule].declarations.len()
    }

    fn declaration(&self, rule: usize, index: usize) -> (&str, &str) {
        let declaration = &self.rules[rule].declarations[index];
        (&declaration.property, &declaration.value)
    }

    fn set_value(&mut self, rule: usize, index: usize, value: String) {
        self.rules[rule].declarations[index].value = value;
    }

    fn insert_after(&mut self, rule: usize, index: usize, property: String, value: String) {
        self.rules[rule]
            .declarations
            .insert(index + 1, Declaration { property, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_css() {
        let mut sheet = Stylesheet::new();
        sheet.add_rule(
            StyleRule::new(".box")
                .with_declaration("width", "100px")
                .with_declaration("margin", "0 auto"),
        );

        assert_eq!(sheet.to_css(), ".box {\n  width: 100px;\n  margin: 0 auto;\n}\n\n");
    }

    #[test]
    fn test_to_css_media_query() {
        let mut sheet = Stylesheet::new();
        sheet.add_rule(
            StyleRule::new(".box")
                .with_declaration("width", "50px")
                .with_media_query("(min-width: 768px)"),
        );

        assert_eq!(
            sheet.to_css(),
            "@media (min-width: 768px) {\n  .box {\n    width: 50px;\n  }\n}\n\n"
        );
    }

    #[test]
    fn test_insert_after_keeps_order() {
        let mut sheet = Stylesheet::new();
        sheet.add_rule(
            StyleRule::new("a")
                .with_declaration("width", "1")
                .with_declaration("height", "2"),
        );

        sheet.insert_after(0, 0, "width".to_string(), "3".to_string());
        assert_eq!(sheet.declaration_count(0), 3);
        assert_eq!(sheet.declaration(0, 0), ("width", "1"));
        assert_eq!(sheet.declaration(0, 1), ("width", "3"));
        assert_eq!(sheet.declaration(0, 2), ("height", "2"));
    }

    #[test]
    fn test_json_document() {
        let json = r#"{
            "source": "src/app.css",
            "rules": [
                { "selector": ".a", "declarations": [{ "property": "width", "value": "10px" }] },
                { "selector": ".b", "mediaQuery": null }
            ]
        }"#;

        let sheet: Stylesheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.source(), Some("src/app.css"));
        assert_eq!(sheet.rule_count(), 2);
        assert_eq!(sheet.declaration(0, 0), ("width", "10px"));
        assert_eq!(sheet.declaration_count(1), 0);
    }
}
