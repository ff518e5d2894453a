//! Rule-based field extractors for component labels.
//!
//! Every extractor is an ordered list of named [`Rule`]s. Rules are tried in
//! order and the first one that yields a value wins, so the order of each
//! list is part of the extractor's behavior.

pub mod batch;
pub mod brand;
pub mod dates;
pub mod electrical;
pub mod material;
pub mod patterns;
pub mod quantity;

pub use batch::{extract_batch, BatchExtractor};
pub use brand::{extract_brand, BrandExtractor, DEFAULT_BRANDS};
pub use dates::{find_date, normalize_date, parse_date, DateExtractor, DATE_TEMPLATES};
pub use electrical::{extract_electrical_characteristics, ElectricalExtractor};
pub use material::{extract_material_code, MaterialCodeExtractor};
pub use quantity::{extract_numeric, extract_quantity, QuantityExtractor};

use regex::{Captures, Regex};
use tracing::trace;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field along with the rule that produced it.
    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_match(text).map(|m| m.value)
    }
}

/// A successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Source text that was matched.
    pub source: String,
    /// Byte range of the match in the searched text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Convert the extracted value, keeping rule and source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            source: self.source,
            position: self.position,
        }
    }
}

/// Turns the captures of a rule's pattern into a value, or rejects them.
pub type Interpreter<T> = fn(&Captures<'_>) -> Option<T>;

/// One named (pattern, interpreter) pair in an extractor's ordered list.
pub struct Rule<T> {
    pub name: &'static str,
    pattern: &'static Regex,
    interpret: Interpreter<T>,
}

impl<T> Rule<T> {
    pub fn new(name: &'static str, pattern: &'static Regex, interpret: Interpreter<T>) -> Self {
        Self {
            name,
            pattern,
            interpret,
        }
    }

    /// Apply the rule to the first match of its pattern.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<T>> {
        let caps = self.pattern.captures(text)?;
        let value = (self.interpret)(&caps)?;
        let full_match = caps.get(0)?;

        Some(
            ExtractionMatch::new(value, self.name, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Try `rules` in order and return the first successful extraction.
pub fn first_match<T>(rules: &[Rule<T>], text: &str) -> Option<ExtractionMatch<T>> {
    rules.iter().find_map(|rule| {
        let result = rule.apply(text);
        trace!(rule = rule.name, matched = result.is_some(), "Applied extraction rule");
        result
    })
}

/// Interpreter returning the whole match upper-cased.
pub(crate) fn whole_match_upper(caps: &Captures<'_>) -> Option<String> {
    Some(caps[0].to_uppercase())
}

/// Interpreter returning the first capture group verbatim.
pub(crate) fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
        static ref WORD: Regex = Regex::new(r"[a-z]+").unwrap();
    }

    fn whole_match(caps: &Captures<'_>) -> Option<String> {
        Some(caps[0].to_string())
    }

    fn reject(_: &Captures<'_>) -> Option<String> {
        None
    }

    #[test]
    fn test_first_match_respects_order() {
        let rules = [
            Rule::new("word", &WORD, whole_match),
            Rule::new("digits", &DIGITS, whole_match),
        ];

        let result = first_match(&rules, "42 apples").unwrap();
        assert_eq!(result.value, "apples");
        assert_eq!(result.rule, "word");
        assert_eq!(result.position, Some((3, 9)));
    }

    #[test]
    fn test_rejected_rule_falls_through() {
        let rules = [
            Rule::new("rejecting", &WORD, reject),
            Rule::new("digits", &DIGITS, whole_match),
        ];

        let result = first_match(&rules, "42 apples").unwrap();
        assert_eq!(result.value, "42");
        assert_eq!(result.rule, "digits");
    }

    #[test]
    fn test_no_rule_matches() {
        let rules = [Rule::new("digits", &DIGITS, whole_match)];
        assert!(first_match(&rules, "no numbers").is_none());
    }
}
