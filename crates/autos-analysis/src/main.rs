//! CLI entry point for the used-car listings analysis.

use anyhow::{Result, anyhow};
use autos_analysis::schema::{DEFAULT_ENCODING, DEFAULT_INPUT_PATH};
use autos_analysis::{AggregateOrder, Pipeline, PipelineConfig, ReportGenerator};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

/// CLI-compatible aggregate ordering
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAggregateOrder {
    /// Highest mean price first
    MeanPrice,
    /// Highest mean mileage first
    MeanMileage,
}

impl From<CliAggregateOrder> for AggregateOrder {
    fn from(cli: CliAggregateOrder) -> Self {
        match cli {
            CliAggregateOrder::MeanPrice => AggregateOrder::MeanPrice,
            CliAggregateOrder::MeanMileage => AggregateOrder::MeanMileage,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Used-car listings cleaning and per-brand summary",
    long_about = "Loads a CSV of used-car listings, normalizes column names, converts \
                  price and mileage to integers, removes implausible rows and prints \
                  mean price and mean mileage for every brand above 5% of listings.\n\n\
                  EXAMPLES:\n  \
                  autos-analysis\n  \
                  autos-analysis -i data/autos.csv --sort-by mean-mileage\n  \
                  autos-analysis --json | jq '.brands[0]'"
)]
struct Args {
    /// Path to the listings CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Character encoding of the input file
    #[arg(short, long, default_value = DEFAULT_ENCODING)]
    encoding: String,

    /// Metric used to order the brand table (descending)
    #[arg(long, value_enum, default_value = "mean-price")]
    sort_by: CliAggregateOrder,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the human-readable table
    ///
    /// Disables all logging; only the final JSON report is written.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries
/// the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = PipelineConfig::builder()
        .input_path(&args.input)
        .encoding(&args.encoding)
        .sort_by(args.sort_by.into())
        .build()?;

    let mut builder = Pipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let pipeline = builder.build()?;

    let result = match pipeline.run() {
        Ok(result) => result,
        Err(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "error": &e }));
            } else {
                error!("Analysis failed: {}", e);
            }
            return Err(anyhow!("Analysis failed: {}", e));
        }
    };

    let report = ReportGenerator::build_report(&args.input, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    print!("{}", ReportGenerator::render_summary(&report));

    Ok(())
}
