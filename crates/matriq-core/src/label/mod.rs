//! Label field extraction module.

mod parser;
pub mod rules;

pub use parser::{parse_ocr_payload, FieldSource, LabelParser, ParseReport};

use crate::models::label::{OcrPayload, StructuredRecord};

/// Trait for turning OCR payloads into structured records.
///
/// Parsing never fails: fields that cannot be determined stay `None`.
pub trait PayloadParser {
    /// Normalize a payload, filling unset fields from its raw text.
    fn parse(&self, payload: &OcrPayload) -> StructuredRecord;

    /// Normalize bare OCR text with no pre-identified fields.
    fn parse_text(&self, text: &str) -> StructuredRecord {
        self.parse(&OcrPayload::from_text(text))
    }
}
