//! Brand (manufacturer) detection against an allow-list.

use super::{ExtractionMatch, FieldExtractor};

/// Manufacturers recognized when no list is configured.
pub const DEFAULT_BRANDS: [&str; 5] = ["Sunlord", "Murata", "TDK", "Vishay", "Coilcraft"];

const ALLOW_LIST_RULE: &str = "allow_list";

/// Brand field extractor.
///
/// Returns the canonical spelling of the first allow-list entry that occurs
/// anywhere in the text, ignoring case. List order decides between brands.
#[derive(Debug, Clone)]
pub struct BrandExtractor {
    brands: Vec<String>,
    folded: Vec<String>,
}

impl BrandExtractor {
    /// Create an extractor for the given brands, in priority order.
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let brands: Vec<String> = brands
            .into_iter()
            .map(Into::into)
            .filter(|b: &String| !b.trim().is_empty())
            .collect();
        let folded = brands.iter().map(|b| b.to_lowercase()).collect();

        Self { brands, folded }
    }

    /// Configured brands in priority order.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }
}

impl Default for BrandExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_BRANDS)
    }
}

impl FieldExtractor for BrandExtractor {
    type Output = String;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let haystack = text.to_lowercase();

        self.brands
            .iter()
            .zip(&self.folded)
            .find(|(_, folded)| haystack.contains(folded.as_str()))
            .map(|(brand, folded)| ExtractionMatch::new(brand.clone(), ALLOW_LIST_RULE, folded.as_str()))
    }
}

/// Detect a brand from the default allow-list.
pub fn extract_brand(text: &str) -> Option<String> {
    BrandExtractor::default().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_brands() {
        assert_eq!(extract_brand("Sunlord SL-IND-1008-100"), Some("Sunlord".to_string()));
        assert_eq!(extract_brand("Murata component"), Some("Murata".to_string()));
        assert_eq!(extract_brand("TDK inductor"), Some("TDK".to_string()));
    }

    #[test]
    fn test_canonical_spelling() {
        assert_eq!(extract_brand("SUNLORD ELECTRONICS"), Some("Sunlord".to_string()));
        assert_eq!(extract_brand("made by coilcraft"), Some("Coilcraft".to_string()));
    }

    #[test]
    fn test_list_order_decides() {
        // Murata appears first in the text, but Sunlord is earlier in the list.
        assert_eq!(extract_brand("Murata / Sunlord"), Some("Sunlord".to_string()));
    }

    #[test]
    fn test_custom_brands() {
        let extractor = BrandExtractor::new(["Bourns", "", "Yageo"]);

        assert_eq!(extractor.brands(), ["Bourns", "Yageo"]);
        assert_eq!(extractor.extract("YAGEO RC0603"), Some("Yageo".to_string()));
        assert_eq!(extractor.extract("Sunlord"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_brand("Unknown brand"), None);
        assert_eq!(BrandExtractor::new(Vec::<String>::new()).extract("TDK"), None);
    }
}
