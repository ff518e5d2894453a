//! Electrical characteristics extraction (e.g. `L=10uH±10%`).
//!
//! Values carry an optional SI prefix (k, m, u, µ, n, p) and a unit of H, F
//! or ohm. The text is returned as printed, tolerance included when present.

use lazy_static::lazy_static;

use super::patterns::{ELECTRICAL_PREFIXED, ELECTRICAL_TOLERANCE, ELECTRICAL_VALUE};
use super::{first_group, first_match, ExtractionMatch, FieldExtractor, Rule};

lazy_static! {
    static ref ELECTRICAL_RULES: [Rule<String>; 3] = [
        Rule::new("prefixed_tolerance", &ELECTRICAL_PREFIXED, first_group),
        Rule::new("bare_tolerance", &ELECTRICAL_TOLERANCE, first_group),
        Rule::new("bare_value", &ELECTRICAL_VALUE, first_group),
    ];
}

/// Names of the electrical rules in the order they are tried.
pub fn rule_names() -> Vec<&'static str> {
    ELECTRICAL_RULES.iter().map(|r| r.name).collect()
}

/// Electrical characteristics field extractor.
pub struct ElectricalExtractor;

impl ElectricalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ElectricalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ElectricalExtractor {
    type Output = String;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        first_match(&ELECTRICAL_RULES[..], text)
    }
}

/// Extract an electrical rating from text.
pub fn extract_electrical_characteristics(text: &str) -> Option<String> {
    ElectricalExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inductance_format() {
        assert_eq!(
            extract_electrical_characteristics("L=10uH±10%"),
            Some("10uH±10%".to_string())
        );
        assert_eq!(
            extract_electrical_characteristics("L = 10uH ±10%"),
            Some("10uH ±10%".to_string())
        );
        assert_eq!(
            extract_electrical_characteristics("10uH±10%"),
            Some("10uH±10%".to_string())
        );
    }

    #[test]
    fn test_simple_inductance() {
        assert_eq!(extract_electrical_characteristics("10uH"), Some("10uH".to_string()));
        assert_eq!(extract_electrical_characteristics("4.7µH"), Some("4.7µH".to_string()));
    }

    #[test]
    fn test_other_units() {
        assert_eq!(
            extract_electrical_characteristics("C: 100nF ±5%"),
            Some("100nF ±5%".to_string())
        );
        assert_eq!(extract_electrical_characteristics("R 10kohm"), Some("10kohm".to_string()));
        assert_eq!(extract_electrical_characteristics("R 470Ω ±1%"), Some("470Ω ±1%".to_string()));
    }

    #[test]
    fn test_value_after_chinese_text() {
        assert_eq!(
            extract_electrical_characteristics("电感10uH±10%"),
            Some("10uH±10%".to_string())
        );
        assert_eq!(
            extract_electrical_characteristics("电感L=4.7uH±20%"),
            Some("4.7uH±20%".to_string())
        );
        assert_eq!(extract_electrical_characteristics("电容100nF电压"), Some("100nF".to_string()));
    }

    #[test]
    fn test_value_inside_ascii_token_rejected() {
        assert_eq!(extract_electrical_characteristics("X10uH"), None);
        assert_eq!(extract_electrical_characteristics("50Hz"), None);
    }

    #[test]
    fn test_tolerance_without_percent_sign() {
        assert_eq!(
            extract_electrical_characteristics("L=10uH±10 Qty:4000"),
            Some("10uH±10".to_string())
        );
        assert_eq!(
            extract_electrical_characteristics("L=10uH±10\nQty:4000"),
            Some("10uH±10".to_string())
        );
        assert_eq!(
            extract_electrical_characteristics("10uH ± 5 \n"),
            Some("10uH ± 5".to_string())
        );
    }

    #[test]
    fn test_rule_reported() {
        let text = "SL-IND-1008-100 L=10uH±10% 2.2uH";
        let m = ElectricalExtractor::new().extract_match(text).unwrap();

        assert_eq!(m.value, "10uH±10%");
        assert_eq!(m.rule, "prefixed_tolerance");

        let m = ElectricalExtractor::new().extract_match("rated 2.2uH").unwrap();
        assert_eq!(m.rule, "bare_value");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_electrical_characteristics("No rating here"), None);
        assert_eq!(extract_electrical_characteristics("Qty: 4000"), None);
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            rule_names(),
            vec!["prefixed_tolerance", "bare_tolerance", "bare_value"]
        );
    }
}
