//! nara-market: run one keyword batch and print the export rows as JSON lines.
//!
//! Usage: `nara-market [CONFIG_PATH]` (default `config/default`)

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use tracing::info;

use nara_market_lib::domain::FlatRow;
use nara_market_lib::infrastructure::config::{AggregatorConfig, defaults};
use nara_market_lib::infrastructure::logging;
use nara_market_lib::AggregationUseCases;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| defaults::CONFIG_PATH.to_string());

    let config = AggregatorConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;
    logging::init_logging_with_config(&config.logging)?;
    logging::log_system_info();

    let use_cases = AggregationUseCases::from_config(config)?;
    let today = chrono::Local::now().date_naive();

    let report = use_cases
        .run_batch(today, |progress| {
            info!("진행률 {}% ({}/{})", progress.percent(), progress.completed, progress.total);
        })
        .await?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serde_json::to_writer(&mut out, &FlatRow::HEADERS)?;
    writeln!(out)?;
    for row in &report.rows {
        serde_json::to_writer(&mut out, &row.to_columns())?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("결과 {} 행 출력 완료", report.rows.len());
    Ok(())
}
