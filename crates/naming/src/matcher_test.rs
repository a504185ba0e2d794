//! Name matcher tests

use std::io::Write;

use serde_json::{json, Map, Value};

use super::{scalar_text, NameMatcher, NamingRule};

/// Helper to build a reading from a JSON literal
fn reading(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("reading must be a JSON object, got {}", other),
    }
}

// ============================================================================
// scalar_text
// ============================================================================

#[test]
fn test_scalar_text_string_is_unquoted() {
    assert_eq!(scalar_text(&json!("Foo")), "Foo");
}

#[test]
fn test_scalar_text_numbers() {
    assert_eq!(scalar_text(&json!(42)), "42");
    assert_eq!(scalar_text(&json!(1.5)), "1.5");
}

#[test]
fn test_scalar_text_bool_and_null() {
    assert_eq!(scalar_text(&json!(true)), "true");
    assert_eq!(scalar_text(&json!(null)), "null");
}

// ============================================================================
// NamingRule
// ============================================================================

#[test]
fn test_rule_parse() {
    let rule = NamingRule::parse(r#"["kitchen", "model=Foo", "channel=1"]"#).unwrap();
    assert_eq!(rule.name(), "kitchen");
    assert_eq!(rule.predicate_count(), 2);
}

#[test]
fn test_rule_parse_name_only() {
    let rule = NamingRule::parse(r#"["catchall"]"#).unwrap();
    assert_eq!(rule.predicate_count(), 0);
    assert!(rule.matches(&reading(json!({"model": "anything"}))));
}

#[test]
fn test_rule_parse_rejects_non_array() {
    assert!(NamingRule::parse(r#"{"name": "kitchen"}"#).is_err());
}

#[test]
fn test_rule_parse_rejects_missing_name() {
    assert!(NamingRule::parse("[]").is_err());
    assert!(NamingRule::parse(r#"[42, "model=Foo"]"#).is_err());
}

#[test]
fn test_rule_parse_rejects_bad_predicate() {
    assert!(NamingRule::parse(r#"["kitchen", "no-separator"]"#).is_err());
    assert!(NamingRule::parse(r#"["kitchen", 42]"#).is_err());
}

#[test]
fn test_rule_parse_rejects_bad_pattern() {
    assert!(NamingRule::parse(r#"["kitchen", "model=("]"#).is_err());
}

// ============================================================================
// Matching semantics
// ============================================================================

#[test]
fn test_first_full_match_wins() {
    let matcher = NameMatcher::from_rules_text(
        r#"["kitchen", "model=Foo", "channel=1"]
["any", "model=Foo"]
"#,
    );
    assert_eq!(matcher.len(), 2);

    let kitchen = reading(json!({"model": "Foo", "channel": "1"}));
    assert_eq!(matcher.name(&kitchen), Some("kitchen"));

    let other = reading(json!({"model": "Foo", "channel": "2"}));
    assert_eq!(matcher.name(&other), Some("any"));
}

#[test]
fn test_match_is_full_not_substring() {
    let matcher = NameMatcher::from_rules_text(r#"["foo", "model=Foo"]"#);
    assert_eq!(matcher.name(&reading(json!({"model": "FooBar"}))), None);
    assert_eq!(matcher.name(&reading(json!({"model": "Foo"}))), Some("foo"));
}

#[test]
fn test_match_against_numeric_attribute() {
    // Channel arrives as a number in many readings; patterns match its text
    let matcher = NameMatcher::from_rules_text(r#"["porch", "channel=\\d+"]"#);
    assert_eq!(
        matcher.name(&reading(json!({"channel": 42}))),
        Some("porch")
    );
}

#[test]
fn test_absent_attribute_matches_null_marker() {
    let matcher = NameMatcher::from_rules_text(r#"["unkeyed", "device=null"]"#);
    assert_eq!(matcher.name(&reading(json!({}))), Some("unkeyed"));
    assert_eq!(matcher.name(&reading(json!({"device": "d1"}))), None);
}

#[test]
fn test_no_match_returns_none() {
    let matcher = NameMatcher::from_rules_text(r#"["kitchen", "model=Foo"]"#);
    assert_eq!(matcher.name(&reading(json!({"model": "Bar"}))), None);
}

#[test]
fn test_empty_matcher_never_names() {
    let matcher = NameMatcher::empty();
    assert!(matcher.is_empty());
    assert_eq!(matcher.name(&reading(json!({"model": "Foo"}))), None);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_comments_and_blank_lines_skipped() {
    let matcher = NameMatcher::from_rules_text(
        r#"# sensors at home

["kitchen", "model=Foo"]

# garden ones
["garden", "model=Bar"]
"#,
    );
    assert_eq!(matcher.len(), 2);
}

#[test]
fn test_malformed_line_skipped_rest_loaded() {
    let matcher = NameMatcher::from_rules_text(
        r#"["kitchen", "model=Foo"]
this is not json
["garden", "model=Bar"]
"#,
    );
    assert_eq!(matcher.len(), 2);
    assert_eq!(
        matcher.name(&reading(json!({"model": "Bar"}))),
        Some("garden")
    );
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# rules").unwrap();
    writeln!(file, r#"["kitchen", "model=Foo", "channel=1"]"#).unwrap();
    file.flush().unwrap();

    let matcher = NameMatcher::from_file(file.path()).unwrap();
    assert_eq!(matcher.len(), 1);
}

#[test]
fn test_from_file_missing_is_an_error() {
    assert!(NameMatcher::from_file("/nonexistent/naming_rules.txt").is_err());
}
