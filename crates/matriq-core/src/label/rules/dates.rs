//! Date normalization for component labels.
//!
//! A date is first parsed as a whole against [`DATE_TEMPLATES`], then searched
//! for inside the text with the embedded-date rules. Output is always
//! `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{DATE_CJK, DATE_DMY, DATE_YMD};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// Whole-string date formats, in priority order.
pub const DATE_TEMPLATES: [&str; 8] = [
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%Y年%m月%d日",
];

const TEMPLATE_RULE: &str = "template";

lazy_static! {
    static ref DATE_RULES: [Rule<NaiveDate>; 3] = [
        Rule::new("year_first", &DATE_YMD, year_first),
        Rule::new("day_first", &DATE_DMY, day_first),
        Rule::new("chinese", &DATE_CJK, year_first),
    ];
}

fn year_first(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
}

fn day_first(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)
}

/// Names of the date rules in the order they are tried.
pub fn rule_names() -> Vec<&'static str> {
    std::iter::once(TEMPLATE_RULE)
        .chain(DATE_RULES.iter().map(|r| r.name))
        .collect()
}

fn parse_template(text: &str) -> Option<NaiveDate> {
    DATE_TEMPLATES.iter().find_map(|template| {
        NaiveDate::parse_from_str(text, template)
            .ok()
            .filter(|date| (1000..=9999).contains(&date.year()))
    })
}

fn parse_date_match(text: &str) -> Option<ExtractionMatch<NaiveDate>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(date) = parse_template(text) {
        return Some(ExtractionMatch::new(date, TEMPLATE_RULE, text).with_position(0, text.len()));
    }

    first_match(&DATE_RULES[..], text)
}

fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a calendar date out of `text`, whether the whole text is a date or
/// the date is embedded in it.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_date_match(text).map(|m| m.value)
}

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Returns `None` for empty input. Text that contains no recognizable date is
/// returned trimmed but otherwise unchanged.
pub fn normalize_date(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(
        parse_date(trimmed)
            .map(format_iso)
            .unwrap_or_else(|| trimmed.to_string()),
    )
}

/// Find a date in free text and return it as `YYYY-MM-DD`.
///
/// Unlike [`normalize_date`], text without a date yields `None`.
pub fn find_date(text: &str) -> Option<String> {
    parse_date(text).map(format_iso)
}

/// Date field extractor producing canonical `YYYY-MM-DD` strings.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        parse_date_match(text).map(|m| m.map(format_iso))
    }
}
