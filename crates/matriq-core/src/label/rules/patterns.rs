//! Common regex patterns for component label extraction.
//!
//! Digits that are parsed into integers use `[0-9]` rather than `\d`, which
//! would also accept non-ASCII digits.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Material code patterns
    pub static ref MATERIAL_HYPHENATED: Regex = Regex::new(
        r"(?i)[A-Z]{2,}-[A-Z]{2,}-\d+-\d+"
    ).unwrap();

    pub static ref MATERIAL_LETTERS_DIGITS: Regex = Regex::new(
        r"(?i)[A-Z]+\d+[A-Z]*"
    ).unwrap();

    pub static ref MATERIAL_PREFIXED_DIGITS: Regex = Regex::new(
        r"(?i)[A-Z]{2,}\d+(?:-\d+)?"
    ).unwrap();

    // Quantity patterns (English and Chinese keywords, optional thousands groups)
    pub static ref QUANTITY_KEYWORD: Regex = Regex::new(
        r"(?i)(?:qty|quantity|数量)[\s:：]*([0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:[^0-9]|$)"
    ).unwrap();

    pub static ref DIGIT_RUN_LONG: Regex = Regex::new(
        r"[0-9]{3,}"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();

    // Batch/lot patterns
    pub static ref BATCH_KEYWORD: Regex = Regex::new(
        r"(?i)(?:(?:^|[^A-Za-z0-9])(?:batch|lot)(?:\s*no\.?)?|批次|批号)[\s:：#]*([A-Z0-9]*[0-9][A-Z0-9]*)"
    ).unwrap();

    pub static ref BATCH_B_CODE: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])(B[0-9]+[A-Z]*)"
    ).unwrap();

    pub static ref BATCH_LOT_PREFIX: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])LOT\s*[:：]\s*([A-Z0-9]+)"
    ).unwrap();

    // Electrical characteristics: value + unit (H, F, ohm) with optional tolerance.
    // Values may follow CJK text directly, so only ASCII alphanumerics are
    // rejected before them.
    pub static ref ELECTRICAL_PREFIXED: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])L\s*=\s*([0-9]+(?:\.[0-9]+)?[kmunpµμ]?(?:H|F|Ω|OHM)\s*±\s*[0-9]+(?:\.[0-9]+)?(?:\s*%)?)"
    ).unwrap();

    pub static ref ELECTRICAL_TOLERANCE: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])([0-9]+(?:\.[0-9]+)?[kmunpµμ]?(?:H|F|Ω|OHM)\s*±\s*[0-9]+(?:\.[0-9]+)?(?:\s*%)?)"
    ).unwrap();

    pub static ref ELECTRICAL_VALUE: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])([0-9]+(?:\.[0-9]+)?[kmunpµμ]?(?:H|F|Ω|OHM))(?:[^A-Za-z0-9]|$)"
    ).unwrap();

    // Embedded date patterns
    pub static ref DATE_YMD: Regex = Regex::new(
        r"([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"([0-9]{1,2})[-/]([0-9]{1,2})[-/]([0-9]{4})"
    ).unwrap();

    pub static ref DATE_CJK: Regex = Regex::new(
        r"([0-9]{4})\s*年\s*([0-9]{1,2})\s*月\s*([0-9]{1,2})\s*日"
    ).unwrap();
}
