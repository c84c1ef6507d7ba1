//! Interactive reporter: prompts for a source, previews it, and prints the
//! same report as the one-shot subcommands.

use std::fmt;

use anyhow::Result;
use gov_sentiment::analysis::{FieldSpec, LexiconScorer, Pipeline};
use gov_sentiment::config::AppConfig;
use gov_sentiment::fetch::HttpClient;
use gov_sentiment::infra::csv_dataset::{CsvDataset, CsvSource, PREVIEW_ROWS};
use gov_sentiment::infra::petitions::{ACTION_FIELD, DEFAULT_LIMIT, PetitionsClient};
use gov_sentiment::output::{RenderOptions, render_text, truncate};
use gov_sentiment::record::Record;
use gov_sentiment::services::RecordSource;
use inquire::{CustomType, InquireError, Select, Text};
use tracing::warn;

#[derive(Debug, Clone, Copy)]
enum Choice {
    Petitions,
    CsvUrl,
    CsvFile,
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Choice::Petitions => "UK Parliament petitions",
            Choice::CsvUrl => "CSV dataset from URL",
            Choice::CsvFile => "CSV dataset from file",
            Choice::Quit => "Quit",
        })
    }
}

/// Prompts until the user quits or cancels. Analysis failures are shown and
/// the loop continues.
pub async fn run<C: HttpClient>(config: &AppConfig, client: &C) -> Result<()> {
    let pipeline = Pipeline::new(LexiconScorer::new()).with_thresholds(config.thresholds);

    loop {
        let options = vec![
            Choice::Petitions,
            Choice::CsvUrl,
            Choice::CsvFile,
            Choice::Quit,
        ];
        let choice = match Select::new("Data source:", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let result = match choice {
            Choice::Petitions => petitions(config, client, &pipeline).await,
            Choice::CsvUrl | Choice::CsvFile => csv(client, &pipeline, choice).await,
            Choice::Quit => return Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                eprintln!("Error: {e:#}");
            }
        }
    }
}

async fn petitions<C: HttpClient>(
    config: &AppConfig,
    client: &C,
    pipeline: &Pipeline<LexiconScorer>,
) -> Result<()> {
    let limit = CustomType::<usize>::new("Number of petitions to analyse (10-100):")
        .with_default(DEFAULT_LIMIT)
        .prompt()?
        .clamp(10, 100);

    let source = PetitionsClient::new(client, config.petitions_url.clone(), limit);
    let records = source.fetch_records().await?;
    let spec = source
        .default_field_spec()
        .unwrap_or_else(|| FieldSpec::single(ACTION_FIELD));

    let report = pipeline.run(&records, &spec)?;
    let options = RenderOptions {
        max_rows: None,
        title_field: Some(ACTION_FIELD.to_string()),
    };
    println!("{}", render_text(&report, &records, &options));
    Ok(())
}

async fn csv<C: HttpClient>(
    client: &C,
    pipeline: &Pipeline<LexiconScorer>,
    choice: Choice,
) -> Result<()> {
    let prompt = match choice {
        Choice::CsvUrl => "CSV URL:",
        _ => "CSV file path:",
    };
    let location = Text::new(prompt).prompt()?;
    let dataset = CsvSource::new(client, location.trim()).load().await?;

    println!("{}", preview(&dataset));

    let columns = Text::new("Text column name(s), comma separated:").prompt()?;
    let spec = FieldSpec::fields(
        columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty()),
    )?;
    dataset.require_fields(&spec)?;

    let report = pipeline.run(dataset.records(), &spec)?;
    println!(
        "{}",
        render_text(&report, dataset.records(), &RenderOptions::default())
    );
    Ok(())
}

fn preview(dataset: &CsvDataset) -> String {
    let mut lines = vec![format!(
        "{} rows, columns: {}",
        dataset.len(),
        dataset.headers().join(", ")
    )];
    for record in dataset.preview(PREVIEW_ROWS) {
        lines.push(preview_row(dataset.headers(), record));
    }
    lines.join("\n")
}

fn preview_row(headers: &[String], record: &Record) -> String {
    headers
        .iter()
        .map(|h| truncate(record.get(h).unwrap_or(""), 40))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn is_cancel(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}
