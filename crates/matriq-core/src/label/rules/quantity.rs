//! Quantity extraction.
//!
//! A keyword-labelled number wins. Without a keyword, the largest run of
//! three or more digits is taken, since the quantity is usually the biggest
//! number on a reel label. Phone numbers, part numbers and dates without a
//! keyword can be mistaken for it.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{DIGIT_RUN, DIGIT_RUN_LONG, QUANTITY_KEYWORD};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

const LARGEST_RUN_RULE: &str = "largest_run";

lazy_static! {
    static ref QUANTITY_RULES: [Rule<u64>; 1] = [
        Rule::new("keyword", &QUANTITY_KEYWORD, keyword_quantity),
    ];
}

fn keyword_quantity(caps: &Captures<'_>) -> Option<u64> {
    caps[1].replace(',', "").parse().ok()
}

/// Names of the quantity rules in the order they are tried.
pub fn rule_names() -> Vec<&'static str> {
    QUANTITY_RULES
        .iter()
        .map(|r| r.name)
        .chain(std::iter::once(LARGEST_RUN_RULE))
        .collect()
}

fn largest_run(text: &str) -> Option<ExtractionMatch<u64>> {
    let cleaned = text.replace(',', "");

    DIGIT_RUN_LONG
        .find_iter(&cleaned)
        .filter_map(|m| m.as_str().parse::<u64>().ok().map(|value| (value, m.as_str())))
        .max_by_key(|(value, _)| *value)
        .map(|(value, source)| ExtractionMatch::new(value, LARGEST_RUN_RULE, source))
}

/// Quantity field extractor.
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = u64;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<u64>> {
        first_match(&QUANTITY_RULES[..], text).or_else(|| largest_run(text))
    }
}

/// Extract a quantity from label text.
pub fn extract_quantity(text: &str) -> Option<u64> {
    QuantityExtractor::new().extract(text)
}

/// Extract the first integer from text, ignoring thousands separators and
/// spaces.
pub fn extract_numeric(text: &str) -> Option<u64> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != ' ').collect();
    DIGIT_RUN.find(&cleaned).and_then(|m| m.as_str().parse().ok())
}
