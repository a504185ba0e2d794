//! Name matcher - ordered first-full-match rule evaluation

use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::RuleError;

#[cfg(test)]
#[path = "matcher_test.rs"]
mod matcher_test;

/// Stringify a JSON value the way predicates see it
///
/// Strings are used as-is (no surrounding quotes), numbers and booleans in
/// their canonical JSON form, `null` as the literal `null`. An attribute
/// missing from a reading is matched as `null` too, so a rule targeting
/// absent keys writes `"key=null"`.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// A single naming rule
///
/// Pairs an assigned name with an ordered list of `(attribute, pattern)`
/// predicates. The rule applies to a reading only when every predicate
/// full-matches the reading's attribute value.
#[derive(Debug)]
pub struct NamingRule {
    /// Name assigned when all predicates match
    name: String,

    /// Attribute predicates, all of which must full-match
    predicates: Vec<(String, Regex)>,
}

impl NamingRule {
    /// Parse one rule line: a JSON array `[name, "key=pattern", ...]`
    fn parse(line: &str) -> Result<Self, RuleError> {
        let tokens: Vec<Value> = serde_json::from_str(line)?;
        let mut tokens = tokens.into_iter();

        let name = match tokens.next() {
            Some(Value::String(name)) => name,
            _ => return Err(RuleError::MissingName),
        };

        let mut predicates = Vec::new();
        for token in tokens {
            let pair = match token {
                Value::String(pair) => pair,
                other => {
                    return Err(RuleError::BadPredicate {
                        predicate: other.to_string(),
                    })
                }
            };
            let (key, pattern) = match pair.split_once('=') {
                Some(split) => split,
                None => return Err(RuleError::BadPredicate { predicate: pair }),
            };
            // Anchor so the whole attribute value must match, not a substring
            let anchored = format!("^(?:{})$", pattern);
            let regex = Regex::new(&anchored).map_err(|source| RuleError::BadPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            predicates.push((key.to_string(), regex));
        }

        Ok(Self { name, predicates })
    }

    /// The name this rule assigns
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of predicates in this rule
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// True when every predicate full-matches the reading
    fn matches(&self, reading: &Map<String, Value>) -> bool {
        self.predicates.iter().all(|(key, pattern)| {
            let text = reading
                .get(key)
                .map(scalar_text)
                .unwrap_or_else(|| "null".to_string());
            pattern.is_match(&text)
        })
    }
}

/// Ordered rule list, loaded once and immutable thereafter
///
/// Rules are evaluated in file order; the first rule whose every predicate
/// matches wins. An empty matcher never assigns a name.
#[derive(Debug, Default)]
pub struct NameMatcher {
    rules: Vec<NamingRule>,
}

impl NameMatcher {
    /// A matcher with no rules - always returns no name
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from a file
    ///
    /// Blank lines and `#` comment lines are skipped. A line that fails to
    /// parse is logged and skipped; loading continues with the remaining
    /// rules.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file itself cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let matcher = Self::from_rules_text(&contents);
        tracing::info!(
            path = %path.display(),
            rules = matcher.len(),
            "loaded naming rules"
        );
        Ok(matcher)
    }

    /// Parse rules from text, skipping malformed lines
    pub fn from_rules_text(text: &str) -> Self {
        let mut rules = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match NamingRule::parse(trimmed) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    tracing::warn!(line, %error, "skipping unparsable naming rule");
                }
            }
        }
        Self { rules }
    }

    /// Resolve a reading to a name
    ///
    /// Evaluates rules in load order and returns the first full match,
    /// or `None` when no rule matches.
    pub fn name(&self, reading: &Map<String, Value>) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(reading))
            .map(NamingRule::name)
    }

    /// Number of loaded rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are loaded
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
