//! End-to-end label scenarios through the public API.

use matriq_core::{
    normalize_date, parse_ocr_payload, LabelField, LabelParser, MatriqConfig, OcrPayload,
    PayloadParser,
};
use pretty_assertions::assert_eq;

#[test]
fn full_label_is_decomposed() {
    let payload = OcrPayload::from_json(
        r#"{
            "raw_ocr_text": "Sunlord SL-IND-1008-100 Qty:4000 Batch:B2511A Date:30/11/2025 L=10uH±10%",
            "image_filename": "reel_001.jpg",
            "scan_time": "2025-11-30T09:30:00"
        }"#,
    )
    .unwrap();

    let record = parse_ocr_payload(&payload);

    assert_eq!(record.material_code.as_deref(), Some("SL-IND-1008-100"));
    assert_eq!(record.quantity, Some(4000));
    assert_eq!(record.batch.as_deref(), Some("B2511A"));
    assert_eq!(record.date.as_deref(), Some("2025-11-30"));
    assert_eq!(record.brand.as_deref(), Some("Sunlord"));
    assert_eq!(record.electrical_characteristics.as_deref(), Some("10uH±10%"));
    assert_eq!(record.image_filename, "reel_001.jpg");
    assert_eq!(record.scan_time, payload.scan_time);
}

#[test]
fn multiline_chinese_label() {
    let text = "顺络电子 Sunlord\n料号: SDCL2012\n数量: 2,000\n批次: 2511C7\n生产日期: 2025年11月30日\n电感 4.7uH ±20%";

    let record = LabelParser::new().parse_text(text);

    assert_eq!(record.material_code.as_deref(), Some("SDCL2012"));
    assert_eq!(record.quantity, Some(2000));
    assert_eq!(record.batch.as_deref(), Some("2511C7"));
    assert_eq!(record.date.as_deref(), Some("2025-11-30"));
    assert_eq!(record.brand.as_deref(), Some("Sunlord"));
    assert_eq!(record.electrical_characteristics.as_deref(), Some("4.7uH ±20%"));
}

#[test]
fn unseparated_chinese_label() {
    let record = LabelParser::new().parse_text("顺络Sunlord 生产B2511A 电感10uH±10% 数量4000");

    assert_eq!(record.batch.as_deref(), Some("B2511A"));
    assert_eq!(record.electrical_characteristics.as_deref(), Some("10uH±10%"));
    assert_eq!(record.quantity, Some(4000));
}

#[test]
fn label_without_date_keeps_text_in_date_field() {
    let record = parse_ocr_payload(&OcrPayload::from_text("Sunlord Qty:4000"));

    assert_eq!(record.date.as_deref(), Some("Sunlord Qty:4000"));
    assert_eq!(record.date, normalize_date("Sunlord Qty:4000"));
}

#[test]
fn thousands_separator_quantity() {
    let record = parse_ocr_payload(&OcrPayload::from_text("Qty: 1,000"));
    assert_eq!(record.quantity, Some(1000));
}

#[test]
fn text_without_numbers_has_no_quantity() {
    let record = parse_ocr_payload(&OcrPayload::from_text("No numbers here"));
    assert_eq!(record.quantity, None);
}

#[test]
fn date_normalizer_scenarios() {
    assert_eq!(normalize_date("30-Nov-2025").as_deref(), Some("2025-11-30"));
    assert_eq!(normalize_date("not a date").as_deref(), Some("not a date"));
    assert_eq!(normalize_date(""), None);
}

#[test]
fn supplied_material_code_is_kept() {
    let payload = OcrPayload::from_json(
        r#"{"material_code": "PRE-001", "raw_ocr_text": "SL-IND-9999-1"}"#,
    )
    .unwrap();

    assert_eq!(parse_ocr_payload(&payload).material_code.as_deref(), Some("PRE-001"));
}

#[test]
fn supplied_fields_never_overwritten() {
    let payload = OcrPayload {
        material_code: Some("MC-1".into()),
        quantity: Some(7),
        batch: Some("LOT-X".into()),
        date: Some("2024-01-02".into()),
        brand: Some("Acme".into()),
        electrical_characteristics: Some("1H".into()),
        ..OcrPayload::from_text(
            "Murata SL-IND-1008-100 Qty:4000 Batch:B2511A Date:30/11/2025 L=10uH±10%",
        )
    };

    let record = parse_ocr_payload(&payload);

    assert_eq!(record.material_code.as_deref(), Some("MC-1"));
    assert_eq!(record.quantity, Some(7));
    assert_eq!(record.batch.as_deref(), Some("LOT-X"));
    assert_eq!(record.date.as_deref(), Some("2024-01-02"));
    assert_eq!(record.brand.as_deref(), Some("Acme"));
    assert_eq!(record.electrical_characteristics.as_deref(), Some("1H"));
}

#[test]
fn empty_text_yields_all_null_fields() {
    let payload = OcrPayload::from_json(r#"{"raw_ocr_text": "", "image_filename": "blank.jpg"}"#)
        .unwrap();

    let record = parse_ocr_payload(&payload);

    for field in LabelField::ALL {
        assert_eq!(record.field_value(field), None, "{} should be null", field);
    }
    assert_eq!(record.image_filename, "blank.jpg");
}

#[test]
fn configured_brand_list_is_used() {
    let mut config = MatriqConfig::default();
    config.extraction.brands = vec!["Würth".to_string(), "Sunlord".to_string()];

    let parser = LabelParser::from_config(&config.extraction);
    let record = parser.parse_text("WÜRTH ELEKTRONIK 744031100 / Sunlord");

    assert_eq!(record.brand.as_deref(), Some("Würth"));
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = std::sync::Arc::new(LabelParser::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse_text(&format!("Qty: {}000", i + 1)).quantity)
        })
        .collect();

    let quantities: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(quantities, vec![Some(1000), Some(2000), Some(3000), Some(4000)]);
}
