//! Parse command - extract fields from a single OCR payload.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use matriq_core::{FieldSource, LabelField, LabelParser, OcrPayload};

use super::{
    format_record, load_config, load_payload_file, read_payload, stamp_scan_time, OutputFormat,
};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (JSON payload or plain-text OCR dump), `-` for stdin
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Parse this OCR text instead of reading a file
    #[arg(short, long)]
    text: Option<String>,

    /// Image filename to record in the output
    #[arg(long)]
    filename: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which rule produced each field
    #[arg(long)]
    show_sources: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let mut payload = load_payload(&args)?;
    if let Some(filename) = &args.filename {
        payload.image_filename = filename.clone();
    }

    info!("Parsing payload for '{}'", payload.image_filename);

    let parser = LabelParser::from_config(&config.extraction);
    let report = parser.parse_detailed(&payload);

    let output = format_record(&report.record, args.format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_sources {
        eprintln!();
        eprintln!("{}", style("Field sources:").blue());
        for field in LabelField::ALL {
            let source = report.source(field);
            let line = format!("  {:<28} {}", field.title(), source);
            match source {
                FieldSource::Missing => eprintln!("{}", style(line).yellow()),
                _ => eprintln!("{}", line),
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn load_payload(args: &ParseArgs) -> anyhow::Result<OcrPayload> {
    if let Some(text) = &args.text {
        return Ok(stamp_scan_time(OcrPayload::from_text(text.as_str())));
    }

    let Some(input) = &args.input else {
        anyhow::bail!("Either an input file or --text is required");
    };

    if input.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return read_payload(&content, "");
    }

    load_payload_file(input)
}
