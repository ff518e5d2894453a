//! OCR payload normalizer: merges pre-identified fields with fields
//! extracted from the raw OCR text.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::label::{LabelField, OcrPayload, StructuredRecord};

use super::rules::{
    extract_numeric, normalize_date, BatchExtractor, BrandExtractor, DateExtractor,
    ElectricalExtractor, ExtractionMatch, FieldExtractor, MaterialCodeExtractor,
    QuantityExtractor,
};
use super::PayloadParser;

const FIRST_NUMBER_RULE: &str = "first_number";
const RAW_TEXT_RULE: &str = "raw_text";

/// Where the value of a record field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FieldSource {
    /// Taken from the payload as supplied.
    Supplied,
    /// Extracted from the raw OCR text by the named rule.
    Extracted { rule: &'static str },
    /// Neither supplied nor found.
    Missing,
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supplied => f.write_str("supplied"),
            Self::Extracted { rule } => write!(f, "extracted ({})", rule),
            Self::Missing => f.write_str("missing"),
        }
    }
}

/// A structured record together with the provenance of each field.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub record: StructuredRecord,
    pub sources: BTreeMap<LabelField, FieldSource>,
}

impl ParseReport {
    /// Provenance of a single field.
    pub fn source(&self, field: LabelField) -> FieldSource {
        self.sources.get(&field).copied().unwrap_or(FieldSource::Missing)
    }
}

/// Rule-based label parser.
#[derive(Debug, Clone)]
pub struct LabelParser {
    /// Brand allow-list matcher.
    brands: BrandExtractor,
    /// Whether unset fields are filled from the raw text.
    extract_from_text: bool,
}

impl LabelParser {
    /// Create a parser with the default brand list.
    pub fn new() -> Self {
        Self {
            brands: BrandExtractor::default(),
            extract_from_text: true,
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_brands(config.brands.iter().cloned())
            .with_text_extraction(config.extract_from_text)
    }

    /// Replace the brand allow-list.
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = BrandExtractor::new(brands);
        self
    }

    /// Enable or disable extraction from raw text.
    pub fn with_text_extraction(mut self, enabled: bool) -> Self {
        self.extract_from_text = enabled;
        self
    }

    /// Parse a payload and report where each field came from.
    pub fn parse_detailed(&self, payload: &OcrPayload) -> ParseReport {
        let text = payload.raw_ocr_text.as_str();
        let extract = self.extract_from_text && !text.is_empty();
        let mut sources = BTreeMap::new();

        debug!(
            "Parsing OCR payload for '{}' ({} characters of text)",
            payload.image_filename,
            text.len()
        );

        let material_code = resolve(
            LabelField::MaterialCode,
            supplied_text(&payload.material_code),
            extract,
            || MaterialCodeExtractor::new().extract_match(text),
            &mut sources,
        );

        let quantity = resolve(
            LabelField::Quantity,
            payload.quantity.filter(|q| *q != 0),
            extract,
            || {
                QuantityExtractor::new().extract_match(text).or_else(|| {
                    extract_numeric(text)
                        .map(|value| ExtractionMatch::new(value, FIRST_NUMBER_RULE, text))
                })
            },
            &mut sources,
        );

        let batch = resolve(
            LabelField::Batch,
            supplied_text(&payload.batch),
            extract,
            || BatchExtractor::new().extract_match(text),
            &mut sources,
        );

        let date = resolve(
            LabelField::Date,
            payload.date.as_deref().and_then(normalize_date),
            extract,
            || {
                DateExtractor::new().extract_match(text).or_else(|| {
                    normalize_date(text)
                        .map(|value| ExtractionMatch::new(value, RAW_TEXT_RULE, text))
                })
            },
            &mut sources,
        );

        let brand = resolve(
            LabelField::Brand,
            supplied_text(&payload.brand),
            extract,
            || self.brands.extract_match(text),
            &mut sources,
        );

        let electrical_characteristics = resolve(
            LabelField::ElectricalCharacteristics,
            supplied_text(&payload.electrical_characteristics),
            extract,
            || ElectricalExtractor::new().extract_match(text),
            &mut sources,
        );

        let record = StructuredRecord {
            material_code,
            quantity,
            batch,
            date,
            brand,
            electrical_characteristics,
            raw_ocr_text: payload.raw_ocr_text.clone(),
            image_filename: payload.image_filename.clone(),
            scan_time: payload.scan_time,
        };

        let missing = record.missing_fields();
        if !missing.is_empty() {
            debug!("Fields not determined: {:?}", missing);
        }

        ParseReport { record, sources }
    }
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadParser for LabelParser {
    fn parse(&self, payload: &OcrPayload) -> StructuredRecord {
        self.parse_detailed(payload).record
    }
}

/// Normalize an OCR payload with the default parser.
pub fn parse_ocr_payload(payload: &OcrPayload) -> StructuredRecord {
    LabelParser::new().parse(payload)
}

fn supplied_text(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Pick the supplied value if present, otherwise run the extractor.
fn resolve<T>(
    field: LabelField,
    supplied: Option<T>,
    extract: bool,
    extractor: impl FnOnce() -> Option<ExtractionMatch<T>>,
    sources: &mut BTreeMap<LabelField, FieldSource>,
) -> Option<T> {
    if let Some(value) = supplied {
        sources.insert(field, FieldSource::Supplied);
        return Some(value);
    }

    if extract {
        if let Some(found) = extractor() {
            trace!(
                "Extracted {} with rule '{}' from '{}'",
                field, found.rule, found.source
            );
            sources.insert(field, FieldSource::Extracted { rule: found.rule });
            return Some(found.value);
        }
    }

    sources.insert(field, FieldSource::Missing);
    None
}
