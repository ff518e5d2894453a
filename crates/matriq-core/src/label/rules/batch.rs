//! Batch/lot number extraction.

use lazy_static::lazy_static;

use super::patterns::{BATCH_B_CODE, BATCH_KEYWORD, BATCH_LOT_PREFIX};
use super::{first_group, first_match, ExtractionMatch, FieldExtractor, Rule};

lazy_static! {
    static ref BATCH_RULES: [Rule<String>; 3] = [
        Rule::new("keyword", &BATCH_KEYWORD, first_group),
        Rule::new("b_code", &BATCH_B_CODE, first_group),
        Rule::new("lot_prefix", &BATCH_LOT_PREFIX, first_group),
    ];
}

/// Names of the batch rules in the order they are tried.
pub fn rule_names() -> Vec<&'static str> {
    BATCH_RULES.iter().map(|r| r.name).collect()
}

/// Batch field extractor.
pub struct BatchExtractor;

impl BatchExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BatchExtractor {
    type Output = String;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        first_match(&BATCH_RULES[..], text)
    }
}

/// Extract a batch or lot number from text.
pub fn extract_batch(text: &str) -> Option<String> {
    BatchExtractor::new().extract(text)
}
