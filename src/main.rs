//! CLI entry point for the government data sentiment explorer.
//!
//! One-shot subcommands analyze UK Parliament petitions, a CSV dataset, or a
//! JSON array of records; `explore` runs the same pipeline interactively.

mod explore;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gov_sentiment::analysis::{FieldSpec, LexiconScorer, Pipeline};
use gov_sentiment::config::AppConfig;
use gov_sentiment::fetch::{BasicClient, load_source};
use gov_sentiment::infra::csv_dataset::CsvSource;
use gov_sentiment::infra::petitions::{ACTION_FIELD, PetitionsClient};
use gov_sentiment::output::{RenderOptions, append_table, print_pretty, render_text, to_json};
use gov_sentiment::record::{Record, records_from_json};
use gov_sentiment::services::RecordSource;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gov_sentiment")]
#[command(about = "Sentiment analysis over open government text data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch petitions from the UK Parliament API and analyze them
    Petitions {
        /// Number of petitions to analyze
        #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=100))]
        limit: u16,

        /// Fields to analyze (default: action and background)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Analyze a text column of a CSV file or URL
    Csv {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Column(s) to analyze, concatenated in the given order
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// Separator placed between concatenated columns
        #[arg(long, default_value = " ")]
        separator: String,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Analyze a JSON array of objects from a file or URL
    Json {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Field(s) to analyze, concatenated in the given order
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Interactively pick a source, preview it, and analyze it
    Explore,
}

#[derive(Args)]
struct ReportArgs {
    /// Print the full report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// CSV file to append the per-item table to
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum table rows in the text report (default: all)
    #[arg(long)]
    rows: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gov_sentiment.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = BasicClient::new(config.http_timeout)?;

    match cli.command {
        Commands::Petitions {
            limit,
            fields,
            report,
        } => {
            let source = PetitionsClient::new(client, config.petitions_url.clone(), limit.into());
            let spec = if fields.is_empty() {
                source
                    .default_field_spec()
                    .context("petitions source has no default fields")?
            } else {
                FieldSpec::fields(fields)?
            };
            let records = source.fetch_records().await?;
            analyze(&config, &records, &spec, &report, Some(ACTION_FIELD))?;
        }
        Commands::Csv {
            source,
            fields,
            separator,
            report,
        } => {
            let dataset = CsvSource::new(client, source).load().await?;
            let spec = FieldSpec::fields(fields)?.with_separator(separator);
            dataset.require_fields(&spec)?;
            analyze(&config, dataset.records(), &spec, &report, None)?;
        }
        Commands::Json {
            source,
            fields,
            report,
        } => {
            let bytes = load_source(&client, &source).await?;
            let value: serde_json::Value =
                serde_json::from_slice(&bytes).with_context(|| format!("'{source}' is not JSON"))?;
            let records = records_from_json(&value)?;
            let spec = FieldSpec::fields(fields)?;
            analyze(&config, &records, &spec, &report, None)?;
        }
        Commands::Explore => {
            explore::run(&config, &client).await?;
        }
    }

    Ok(())
}

/// Runs the pipeline over `records` and prints or exports the report.
#[tracing::instrument(skip_all, fields(records = records.len()))]
fn analyze(
    config: &AppConfig,
    records: &[Record],
    spec: &FieldSpec,
    args: &ReportArgs,
    title_field: Option<&str>,
) -> Result<()> {
    let pipeline = Pipeline::new(LexiconScorer::new()).with_thresholds(config.thresholds);
    let report = pipeline.run(records, spec)?;
    print_pretty(&report);

    if let Some(path) = &args.output {
        append_table(path, &report.table)?;
        info!(path = %path, rows = report.table.len(), "Table written");
    }

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        let options = RenderOptions {
            max_rows: args.rows,
            title_field: title_field.map(str::to_string),
        };
        print!("{}", render_text(&report, records, &options));
    }

    Ok(())
}
