//! Rule-based naming of sensor readings.
//!
//! A `NameMatcher` holds an ordered list of rules loaded once at startup
//! from a plain-text rule file. Each rule pairs an assigned name with
//! attribute predicates; a reading gets the name of the first rule whose
//! every predicate full-matches. Rules never change after loading.
//!
//! # Rule File Format
//!
//! UTF-8 text, one rule per line. Blank lines and lines starting with `#`
//! are skipped. Every other line is a JSON array whose first element is the
//! name and whose remaining elements are `"key=pattern"` strings:
//!
//! ```text
//! # kitchen sensor is the Foo on channel 1
//! ["kitchen", "model=Foo", "channel=1"]
//! ["any-foo", "model=Foo"]
//! ```
//!
//! Patterns are regular expressions matched against the whole attribute
//! value, not a substring of it.

mod error;
mod matcher;

pub use error::RuleError;
pub use matcher::{scalar_text, NameMatcher, NamingRule};
