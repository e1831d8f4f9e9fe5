//! Aggregation use cases
//!
//! Coordinates configuration, the fan-out scheduler and the flattener to run
//! one complete keyword batch: config → tasks → outcomes → export rows.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::application::fanout_scheduler::{FanoutScheduler, SchedulerConfig};
use crate::application::tabular_flattener::flatten;
use crate::domain::{AggregateResult, DateRange, FlatRow, KeywordTask, ProgressState};
use crate::infrastructure::config::{AggregatorConfig, ApiConfig, ConfigError};
use crate::infrastructure::http_executor::{HttpRequestExecutor, RequestExecutor};

/// Result of one batch, ready for a reporting layer and an export writer
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub aggregate: AggregateResult,
    pub rows: Vec<FlatRow>,
}

/// Request parameters for one keyword, in the order the API documents them
pub fn request_parameters(api: &ApiConfig, range: &DateRange, keyword: &str) -> Vec<(String, String)> {
    vec![
        ("serviceKey".to_string(), api.service_key.clone()),
        ("pageNo".to_string(), api.page_no.clone()),
        ("numOfRows".to_string(), api.num_of_rows.clone()),
        ("inqryDiv".to_string(), api.inqry_div.clone()),
        ("type".to_string(), api.response_type.clone()),
        ("bidNtceNm".to_string(), keyword.to_string()),
        ("inqryBgnDt".to_string(), range.begin_param()),
        ("inqryEndDt".to_string(), range.end_param()),
    ]
}

/// One task per configured keyword
pub fn build_tasks(config: &AggregatorConfig, today: NaiveDate) -> Result<Vec<KeywordTask>, ConfigError> {
    let range = config.query.resolve_date_range(today)?;

    Ok(config
        .query
        .keywords
        .iter()
        .map(|keyword| KeywordTask::new(keyword.clone(), request_parameters(&config.api, &range, keyword)))
        .collect())
}

/// High-level batch use cases
pub struct AggregationUseCases {
    config: AggregatorConfig,
    scheduler: FanoutScheduler,
}

impl AggregationUseCases {
    /// Use the reqwest executor configured from `config.workers`
    pub fn from_config(config: AggregatorConfig) -> Result<Self> {
        let executor = HttpRequestExecutor::from_worker_config(&config.workers)?;
        Ok(Self::with_executor(config, Arc::new(executor)))
    }

    pub fn with_executor(config: AggregatorConfig, executor: Arc<dyn RequestExecutor>) -> Self {
        let scheduler_config = SchedulerConfig {
            concurrency: config.workers.concurrency,
            request_timeout: Duration::from_secs(config.workers.request_timeout_seconds),
        };
        let scheduler = FanoutScheduler::new(executor, config.api.base_url.clone(), scheduler_config);

        Self { config, scheduler }
    }

    /// Run all configured keywords and flatten the result
    pub async fn run_batch<F>(&self, today: NaiveDate, on_progress: F) -> Result<BatchReport>
    where
        F: FnMut(ProgressState) + Send,
    {
        let tasks = build_tasks(&self.config, today).context("Failed to build keyword tasks")?;
        info!("데이터를 가져오는 중입니다... ({} keywords)", tasks.len());

        let aggregate = self
            .scheduler
            .run(tasks, on_progress)
            .await
            .context("Failed to start keyword batch")?;

        let rows = flatten(&aggregate);
        info!("📄 {} rows ready for export", rows.len());

        Ok(BatchReport { aggregate, rows })
    }
}
