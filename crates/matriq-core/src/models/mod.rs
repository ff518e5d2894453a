//! Data models for OCR payloads, structured records and configuration.

pub mod config;
pub mod label;
