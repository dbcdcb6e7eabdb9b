//! Parse command - extract line items from a single OCR text dump.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use resift_core::{
    ExtractionError, ReceiptParser, ScanConfig, ScanResult, StrategyChainParser,
};

/// Exit code for the explicit "no items detected" outcome, distinct from
/// hard errors so wrappers can offer manual entry.
const EXIT_NO_ITEMS: i32 = 2;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file with raw OCR text
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Check item invariants and report issues
    #[arg(long)]
    validate: bool,

    /// Show which strategies were attempted
    #[arg(long)]
    show_trace: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        ScanConfig::from_file(std::path::Path::new(path))?
    } else {
        ScanConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    info!("Parsing receipt text from {}", args.input.display());

    let parser = StrategyChainParser::with_config(config);
    let result = match parser.parse(&text) {
        Ok(result) => result,
        Err(ExtractionError::NoItems) => {
            eprintln!(
                "{} No line items could be detected in this receipt.",
                style("✗").red()
            );
            eprintln!("  Retake the photo or enter the transaction manually.");
            std::process::exit(EXIT_NO_ITEMS);
        }
    };

    debug!(
        strategy = result.strategy.as_str(),
        items = result.items.len(),
        "extraction finished"
    );

    // Validate if requested
    if args.validate {
        let issues = result.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    // Format output
    let output = format_result(&result, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_trace {
        eprintln!();
        for attempt in &result.attempts {
            eprintln!(
                "{} {}: {} item(s)",
                style("ℹ").blue(),
                attempt.strategy.as_str(),
                attempt.items_found
            );
        }
    }

    Ok(())
}

fn format_result(result: &ScanResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => format_text(result),
    }
}

fn format_csv(result: &ScanResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["merchant", "date", "description", "amount", "quantity", "category"])?;

    for item in &result.items {
        wtr.write_record([
            result.merchant.as_str(),
            &result.date.to_string(),
            item.description.as_str(),
            &item.amount.to_string(),
            &item.quantity.to_string(),
            item.category.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ScanResult) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", result.merchant));
    output.push_str(&format!("Date: {}\n", result.date));
    output.push_str(&format!("Strategy: {}\n", result.strategy.as_str()));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &result.items {
        output.push_str(&format!(
            "  {}x {} - {} [{}]\n",
            item.quantity, item.description, item.amount, item.category
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {}\n", result.total()));

    for warning in &result.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }

    Ok(output)
}
