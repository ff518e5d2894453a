//! Batch processing command for multiple payload files.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use matriq_core::models::config::HeaderLanguage;
use matriq_core::{LabelParser, PayloadParser, StructuredRecord};

use super::{format_record, load_config, load_payload_file, record_row, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: print each record to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also append records to a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<StructuredRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = LabelParser::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match load_payload_file(&path) {
            Ok(payload) => {
                results.push(ProcessResult {
                    path,
                    record: Some(parser.parse(&payload)),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        let Some(record) = &result.record else {
            continue;
        };
        let content = format_record(record, args.format, &config.output)?;

        match &args.output_dir {
            Some(output_dir) => {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("label");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!("{}", content),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        let records: Vec<&StructuredRecord> =
            successful.iter().filter_map(|r| r.record.as_ref()).collect();
        let appended = append_summary(&summary_path, &records, config.output.header_language)?;
        eprintln!(
            "{} Appended {} rows to {}",
            style("✓").green(),
            appended,
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Spreadsheet column titles: a running index followed by the scan time,
/// the six label fields, raw text and image filename.
fn summary_header(language: HeaderLanguage) -> Vec<&'static str> {
    let fields = super::record_header(language);
    let (index, scan_time) = match language {
        HeaderLanguage::En => ("index", "scan_time"),
        HeaderLanguage::Zh => ("序号", "识别时间"),
    };

    [index, scan_time]
        .into_iter()
        .chain(fields[..fields.len() - 1].iter().copied())
        .collect()
}

/// Append records to the summary CSV, writing the header when the file is
/// new. Indices continue from the rows already present.
fn append_summary(
    path: &Path,
    records: &[&StructuredRecord],
    language: HeaderLanguage,
) -> anyhow::Result<usize> {
    let existing_rows = if path.exists() {
        csv::Reader::from_path(path)?.records().count()
    } else {
        0
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::Writer::from_writer(file);

    if existing_rows == 0 && fs::metadata(path)?.len() == 0 {
        wtr.write_record(summary_header(language))?;
    }

    for (offset, record) in records.iter().enumerate() {
        let mut row = vec![
            (existing_rows + offset + 1).to_string(),
            super::format_scan_time(record),
        ];
        let mut values = record_row(record);
        values.pop();
        row.extend(values);

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(quantity: u64) -> StructuredRecord {
        StructuredRecord {
            quantity: Some(quantity),
            image_filename: format!("reel_{}.jpg", quantity),
            ..StructuredRecord::default()
        }
    }

    #[test]
    fn test_summary_header_layout() {
        assert_eq!(
            summary_header(HeaderLanguage::Zh),
            vec![
                "序号",
                "识别时间",
                "物料编码",
                "数量",
                "批次",
                "日期",
                "品牌",
                "电气特性",
                "原始OCR文本",
                "图片文件名",
            ]
        );
    }

    #[test]
    fn test_append_summary_continues_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        append_summary(&path, &[&record(100)], HeaderLanguage::En).unwrap();
        append_summary(&path, &[&record(200), &record(300)], HeaderLanguage::En).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "index");
        assert_eq!(&headers[3], "quantity");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "3");
        assert_eq!(&rows[2][3], "300");
        assert_eq!(&rows[2][9], "reel_300.jpg");
    }
}
