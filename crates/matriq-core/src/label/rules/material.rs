//! Material code extraction (e.g. `SL-IND-1008-100`).

use lazy_static::lazy_static;

use super::patterns::{MATERIAL_HYPHENATED, MATERIAL_LETTERS_DIGITS, MATERIAL_PREFIXED_DIGITS};
use super::{first_match, whole_match_upper, ExtractionMatch, FieldExtractor, Rule};

lazy_static! {
    static ref MATERIAL_RULES: [Rule<String>; 3] = [
        Rule::new("hyphenated", &MATERIAL_HYPHENATED, whole_match_upper),
        Rule::new("letters_digits", &MATERIAL_LETTERS_DIGITS, whole_match_upper),
        Rule::new("prefixed_digits", &MATERIAL_PREFIXED_DIGITS, whole_match_upper),
    ];
}

/// Names of the material code rules in the order they are tried.
pub fn rule_names() -> Vec<&'static str> {
    MATERIAL_RULES.iter().map(|r| r.name).collect()
}

/// Material code field extractor.
pub struct MaterialCodeExtractor;

impl MaterialCodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaterialCodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MaterialCodeExtractor {
    type Output = String;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        first_match(&MATERIAL_RULES[..], text)
    }
}

/// Extract a material code from text, upper-cased.
pub fn extract_material_code(text: &str) -> Option<String> {
    MaterialCodeExtractor::new().extract(text)
}
