//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use tracing::debug;

use matriq_core::models::config::{HeaderLanguage, OutputConfig};
use matriq_core::{LabelField, MatriqConfig, OcrPayload, StructuredRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing one record per file.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("matriq")
        .join("config.json")
}

/// Config file to use: the explicit `--config` path, else the default path.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration from `--config`, the default file if present, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MatriqConfig> {
    if let Some(path) = config_path {
        return MatriqConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(MatriqConfig::from_file(&default_path)?)
    } else {
        Ok(MatriqConfig::default())
    }
}

/// Build a payload from file or stdin contents.
///
/// Content starting with `{` is a JSON payload; anything else is raw OCR
/// text recorded under `source_name`. A missing scan time is stamped with
/// the current UTC time.
pub fn read_payload(content: &str, source_name: &str) -> anyhow::Result<OcrPayload> {
    let payload = if content.trim_start().starts_with('{') {
        OcrPayload::from_json(content)
            .with_context(|| format!("Invalid OCR payload in {}", source_name))?
    } else {
        OcrPayload::from_text(content).with_image_filename(source_name)
    };

    Ok(stamp_scan_time(payload))
}

/// Load a payload from a `.json` payload file or a `.txt` OCR dump.
pub fn load_payload_file(path: &Path) -> anyhow::Result<OcrPayload> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match extension.as_str() {
        "json" => OcrPayload::from_json(&content)
            .map(stamp_scan_time)
            .with_context(|| format!("Invalid OCR payload in {}", path.display())),
        "txt" | "" => {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            read_payload(&content, name)
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Stamp a payload without a scan time with the current UTC time.
pub fn stamp_scan_time(payload: OcrPayload) -> OcrPayload {
    match payload.scan_time {
        Some(_) => payload,
        None => payload.with_scan_time(Utc::now().naive_utc()),
    }
}

/// Column titles for a record, in the configured language.
pub fn record_header(language: HeaderLanguage) -> Vec<&'static str> {
    let fields = LabelField::ALL.iter().map(|field| match language {
        HeaderLanguage::En => field.key(),
        HeaderLanguage::Zh => field.chinese_title(),
    });

    let metadata: [&'static str; 3] = match language {
        HeaderLanguage::En => ["raw_ocr_text", "image_filename", "scan_time"],
        HeaderLanguage::Zh => ["原始OCR文本", "图片文件名", "识别时间"],
    };

    fields.chain(metadata).collect()
}

/// Record values in the same order as [`record_header`].
pub fn record_row(record: &StructuredRecord) -> Vec<String> {
    LabelField::ALL
        .iter()
        .map(|field| record.field_value(*field).unwrap_or_default())
        .chain([
            record.raw_ocr_text.clone(),
            record.image_filename.clone(),
            format_scan_time(record),
        ])
        .collect()
}

pub fn format_scan_time(record: &StructuredRecord) -> String {
    record
        .scan_time
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn format_record(
    record: &StructuredRecord,
    format: OutputFormat,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            if output.pretty_json {
                Ok(serde_json::to_string_pretty(record)?)
            } else {
                Ok(serde_json::to_string(record)?)
            }
        }
        OutputFormat::Csv => format_csv(record, output.header_language),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &StructuredRecord, language: HeaderLanguage) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(record_header(language))?;
    wtr.write_record(record_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &StructuredRecord) -> String {
    let mut output = String::new();

    for field in LabelField::ALL {
        let value = record.field_value(field).unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("{}: {}\n", field.title(), value));
    }

    output.push_str(&format!("Image: {}\n", record.image_filename));
    output.push_str(&format!("Scanned: {}\n", format_scan_time(record)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_payload_detects_json() {
        let payload = read_payload(
            r#"{"raw_ocr_text": "Qty: 5", "scan_time": "2025-11-30T09:30:00"}"#,
            "in.json",
        )
        .unwrap();

        assert_eq!(payload.raw_ocr_text, "Qty: 5");
        assert_eq!(payload.image_filename, "");
        assert_eq!(
            format_scan_time(&matriq_core::parse_ocr_payload(&payload)),
            "2025-11-30 09:30:00"
        );
    }

    #[test]
    fn test_read_payload_plain_text() {
        let payload = read_payload("Sunlord Qty: 5\n", "label.txt").unwrap();

        assert_eq!(payload.raw_ocr_text, "Sunlord Qty: 5\n");
        assert_eq!(payload.image_filename, "label.txt");
        assert!(payload.scan_time.is_some());
    }

    #[test]
    fn test_read_payload_rejects_bad_json() {
        assert!(read_payload("{not json", "bad.json").is_err());
    }

    #[test]
    fn test_header_languages() {
        let en = record_header(HeaderLanguage::En);
        let zh = record_header(HeaderLanguage::Zh);

        assert_eq!(en.len(), 9);
        assert_eq!(en[0], "material_code");
        assert_eq!(zh[0], "物料编码");
        assert_eq!(zh[8], "识别时间");
    }

    #[test]
    fn test_text_format_marks_missing() {
        let record = StructuredRecord {
            quantity: Some(4000),
            ..StructuredRecord::default()
        };

        let text = format_text(&record);
        assert!(text.contains("Quantity: 4000\n"));
        assert!(text.contains("Brand: -\n"));
    }
}
