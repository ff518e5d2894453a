//! Core library for component label OCR processing.
//!
//! This crate provides:
//! - OCR payload and structured record models
//! - Rule-based label field extraction (material code, quantity, batch,
//!   date, brand, electrical characteristics)
//! - Date normalization to `YYYY-MM-DD`
//! - Pipeline configuration

pub mod error;
pub mod models;
pub mod label;

pub use error::{MatriqError, PayloadError, Result};
pub use models::config::MatriqConfig;
pub use models::label::{LabelField, OcrPayload, StructuredRecord};
pub use label::{
    parse_ocr_payload, FieldSource, LabelParser, ParseReport, PayloadParser,
};
pub use label::rules::{
    extract_batch, extract_brand, extract_electrical_characteristics, extract_material_code,
    extract_numeric, extract_quantity, find_date, normalize_date, parse_date, BrandExtractor,
    FieldExtractor,
};
