//! Label scan data models: the OCR payload coming in and the structured
//! record going out.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{PayloadError, Result};
use crate::label::rules::extract_numeric;

/// One of the six structured fields extracted from a component label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelField {
    MaterialCode,
    Quantity,
    Batch,
    Date,
    Brand,
    ElectricalCharacteristics,
}

impl LabelField {
    /// All fields in spreadsheet column order.
    pub const ALL: [LabelField; 6] = [
        LabelField::MaterialCode,
        LabelField::Quantity,
        LabelField::Batch,
        LabelField::Date,
        LabelField::Brand,
        LabelField::ElectricalCharacteristics,
    ];

    /// Snake-case key used in JSON payloads.
    pub fn key(self) -> &'static str {
        match self {
            Self::MaterialCode => "material_code",
            Self::Quantity => "quantity",
            Self::Batch => "batch",
            Self::Date => "date",
            Self::Brand => "brand",
            Self::ElectricalCharacteristics => "electrical_characteristics",
        }
    }

    /// English column title.
    pub fn title(self) -> &'static str {
        match self {
            Self::MaterialCode => "Material Code",
            Self::Quantity => "Quantity",
            Self::Batch => "Batch",
            Self::Date => "Date",
            Self::Brand => "Brand",
            Self::ElectricalCharacteristics => "Electrical Characteristics",
        }
    }

    /// Chinese column title, as used on the shop-floor spreadsheets.
    pub fn chinese_title(self) -> &'static str {
        match self {
            Self::MaterialCode => "物料编码",
            Self::Quantity => "数量",
            Self::Batch => "批次",
            Self::Date => "日期",
            Self::Brand => "品牌",
            Self::ElectricalCharacteristics => "电气特性",
        }
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw result of one OCR call, optionally with fields the vision service
/// already identified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrPayload {
    /// Pre-identified material code.
    #[serde(default)]
    pub material_code: Option<String>,

    /// Pre-identified quantity. Accepts an integer or a numeric string.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: Option<u64>,

    /// Pre-identified batch/lot number.
    #[serde(default)]
    pub batch: Option<String>,

    /// Pre-identified date in any supported format.
    #[serde(default)]
    pub date: Option<String>,

    /// Pre-identified manufacturer.
    #[serde(default)]
    pub brand: Option<String>,

    /// Pre-identified electrical rating.
    #[serde(default)]
    pub electrical_characteristics: Option<String>,

    /// Full text returned by the OCR service. May be empty.
    pub raw_ocr_text: String,

    /// Name of the scanned image file.
    #[serde(default)]
    pub image_filename: String,

    /// When the image was scanned (UTC). Offsets are converted to UTC;
    /// unreadable values are dropped.
    #[serde(default, deserialize_with = "deserialize_scan_time")]
    pub scan_time: Option<NaiveDateTime>,
}

impl OcrPayload {
    /// Payload carrying only raw OCR text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw_ocr_text: text.into(),
            ..Self::default()
        }
    }

    /// Parse a payload from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(PayloadError::Empty.into());
        }
        serde_json::from_str(json).map_err(|e| PayloadError::Invalid(e.to_string()).into())
    }

    pub fn with_image_filename(mut self, filename: impl Into<String>) -> Self {
        self.image_filename = filename.into();
        self
    }

    pub fn with_scan_time(mut self, scan_time: NaiveDateTime) -> Self {
        self.scan_time = Some(scan_time);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Integer(u64),
    Float(f64),
    Text(String),
}

fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<QuantityRepr>::deserialize(deserializer)?;
    Ok(match repr {
        None => None,
        Some(QuantityRepr::Integer(n)) => Some(n),
        Some(QuantityRepr::Float(f)) => {
            (f.is_finite() && f >= 0.0 && f.fract() == 0.0).then_some(f as u64)
        }
        Some(QuantityRepr::Text(s)) => extract_numeric(&s),
    })
}

/// Naive timestamp formats accepted for `scan_time`, after RFC 3339.
const SCAN_TIME_TEMPLATES: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Read a scan timestamp as sent by OCR clients.
///
/// RFC 3339 and `YYYY-MM-DD HH:MM:SS+08:00` values are converted to UTC;
/// naive timestamps and bare dates are taken as UTC already.
pub fn parse_scan_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }

    SCAN_TIME_TEMPLATES
        .iter()
        .find_map(|template| NaiveDateTime::parse_from_str(text, template).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_scan_time<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let parsed = parse_scan_time(&text);
        if parsed.is_none() && !text.trim().is_empty() {
            warn!("Ignoring unreadable scan_time '{}'", text);
        }
        parsed
    }))
}

/// Canonical, field-decomposed result derived from an [`OcrPayload`].
///
/// Every field is independently nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub material_code: Option<String>,
    pub quantity: Option<u64>,
    pub batch: Option<String>,
    /// `YYYY-MM-DD` when recognised, otherwise the supplied text as-is.
    pub date: Option<String>,
    pub brand: Option<String>,
    pub electrical_characteristics: Option<String>,
    pub raw_ocr_text: String,
    pub image_filename: String,
    pub scan_time: Option<NaiveDateTime>,
}

impl StructuredRecord {
    /// Render a single field as text for tabular output.
    pub fn field_value(&self, field: LabelField) -> Option<String> {
        match field {
            LabelField::MaterialCode => self.material_code.clone(),
            LabelField::Quantity => self.quantity.map(|q| q.to_string()),
            LabelField::Batch => self.batch.clone(),
            LabelField::Date => self.date.clone(),
            LabelField::Brand => self.brand.clone(),
            LabelField::ElectricalCharacteristics => self.electrical_characteristics.clone(),
        }
    }

    /// Check whether a field holds a value.
    pub fn is_set(&self, field: LabelField) -> bool {
        match field {
            LabelField::MaterialCode => self.material_code.is_some(),
            LabelField::Quantity => self.quantity.is_some(),
            LabelField::Batch => self.batch.is_some(),
            LabelField::Date => self.date.is_some(),
            LabelField::Brand => self.brand.is_some(),
            LabelField::ElectricalCharacteristics => self.electrical_characteristics.is_some(),
        }
    }

    /// Fields that could not be determined.
    pub fn missing_fields(&self) -> Vec<LabelField> {
        LabelField::ALL
            .into_iter()
            .filter(|f| !self.is_set(*f))
            .collect()
    }
}
