//! WASM bindings for component label field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use matriq_core::models::config::ExtractionConfig;
use matriq_core::{LabelParser, OcrPayload, PayloadParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn payload_from_js(payload: JsValue) -> Result<OcrPayload, JsValue> {
    serde_wasm_bindgen::from_value(payload).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract label fields from raw OCR text.
#[wasm_bindgen(js_name = parseOcrText)]
pub fn parse_ocr_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&LabelParser::new().parse_text(text))
}

/// Normalize an OCR payload object (`raw_ocr_text` plus optional fields).
#[wasm_bindgen(js_name = parseOcrPayload)]
pub fn parse_ocr_payload(payload: JsValue) -> Result<JsValue, JsValue> {
    let payload = payload_from_js(payload)?;
    to_js(&matriq_core::parse_ocr_payload(&payload))
}

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Unrecognized dates are returned trimmed; empty input yields `undefined`.
#[wasm_bindgen(js_name = normalizeDate)]
pub fn normalize_date(date: &str) -> Option<String> {
    matriq_core::normalize_date(date)
}

/// Label extractor class for browser use.
#[wasm_bindgen]
pub struct LabelExtractor {
    parser: LabelParser,
}

#[wasm_bindgen]
impl LabelExtractor {
    /// Create an extractor with the default brand list.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: LabelParser::new(),
        }
    }

    /// Create an extractor from a JSON extraction config
    /// (`{"brands": [...], "extract_from_text": true}`).
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<LabelExtractor, JsValue> {
        let config: ExtractionConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            parser: LabelParser::from_config(&config),
        })
    }

    /// Replace the brand allow-list.
    #[wasm_bindgen(js_name = setBrands)]
    pub fn set_brands(&mut self, brands: Vec<String>) {
        self.parser = self.parser.clone().with_brands(brands);
    }

    /// Extract fields from raw OCR text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse_text(text))
    }

    /// Normalize an OCR payload object.
    #[wasm_bindgen(js_name = extractPayload)]
    pub fn extract_payload(&self, payload: JsValue) -> Result<JsValue, JsValue> {
        let payload = payload_from_js(payload)?;
        to_js(&self.parser.parse(&payload))
    }

    /// Normalize an OCR payload and report which rule produced each field.
    #[wasm_bindgen(js_name = extractWithSources)]
    pub fn extract_with_sources(&self, payload: JsValue) -> Result<JsValue, JsValue> {
        let payload = payload_from_js(payload)?;
        to_js(&self.parser.parse_detailed(&payload))
    }
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("30-Nov-2025").as_deref(), Some("2025-11-30"));
        assert_eq!(normalize_date("not a date").as_deref(), Some("not a date"));
        assert_eq!(normalize_date(""), None);
    }

    #[wasm_bindgen_test]
    fn test_extractor_from_config() {
        assert!(LabelExtractor::from_config(r#"{"brands": ["Bourns"]}"#).is_ok());
    }
}
