//! 키워드 병렬 조회 스케줄러
//!
//! A fixed pool of `concurrency` workers drains a shared task queue. Each
//! worker runs build URL → execute → normalize for one keyword at a time and
//! sends `(keyword, outcome)` to a single collector, which owns the aggregate
//! and the progress counter. `run` returns only when every keyword has
//! exactly one outcome.

use std::collections::{HashSet, VecDeque};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::application::response_normalizer::normalize;
use crate::domain::{AggregateResult, ErrorDescriptor, KeywordOutcome, KeywordTask, ProgressState, RawResponse};
use crate::infrastructure::config::defaults;
use crate::infrastructure::http_executor::RequestExecutor;
use crate::infrastructure::request_builder::build_url;

/// Reasons a batch cannot start. Per-keyword failures never end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("키워드 목록이 비어 있습니다 (keyword list is empty)")]
    EmptyTaskList,

    #[error("Duplicate keyword in batch: {0}")]
    DuplicateKeyword(String),

    #[error("Concurrency must be greater than 0")]
    ZeroConcurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of workers, i.e. maximum requests in flight
    pub concurrency: usize,
    /// Independent timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            concurrency: defaults::CONCURRENCY,
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECONDS),
        }
    }
}

type TaskQueue = Arc<Mutex<VecDeque<KeywordTask>>>;

/// Bounded fan-out / fan-in over a list of keyword tasks
pub struct FanoutScheduler {
    executor: Arc<dyn RequestExecutor>,
    base_url: String,
    config: SchedulerConfig,
}

impl FanoutScheduler {
    pub fn new(executor: Arc<dyn RequestExecutor>, base_url: impl Into<String>, config: SchedulerConfig) -> Self {
        Self {
            executor,
            base_url: base_url.into(),
            config,
        }
    }

    /// Run every task to completion.
    ///
    /// `on_progress` fires once per finished task, in completion order, with a
    /// strictly increasing `completed`; the last call has `completed == total`.
    pub async fn run<F>(&self, tasks: Vec<KeywordTask>, mut on_progress: F) -> Result<AggregateResult, BatchError>
    where
        F: FnMut(ProgressState) + Send,
    {
        validate_batch(&tasks, self.config.concurrency)?;

        let batch_id = Uuid::new_v4();
        let total = tasks.len();
        let span = info_span!("batch", %batch_id, total);

        async move {
            let keywords: Vec<String> = tasks.iter().map(|t| t.keyword().to_string()).collect();
            let queue: TaskQueue = Arc::new(Mutex::new(VecDeque::from(tasks)));
            let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(String, KeywordOutcome)>();

            info!("🚀 {} 개의 워커를 시작합니다 ({} keywords)", self.config.concurrency, total);

            let mut workers = Vec::with_capacity(self.config.concurrency);
            for worker_id in 0..self.config.concurrency {
                let worker = worker_loop(
                    worker_id,
                    Arc::clone(&queue),
                    Arc::clone(&self.executor),
                    self.base_url.clone(),
                    self.config.request_timeout,
                    result_tx.clone(),
                );
                workers.push(tokio::spawn(worker.in_current_span()));
            }
            // Only workers hold senders now; the channel closes when the last one exits.
            drop(result_tx);

            let mut aggregate = AggregateResult::default();
            let mut completed = 0usize;

            while let Some((keyword, outcome)) = result_rx.recv().await {
                if aggregate.insert_once(keyword.clone(), outcome) {
                    completed += 1;
                    debug!("✅ [{}/{}] {}", completed, total, keyword);
                    on_progress(ProgressState::new(completed, total));
                } else {
                    warn!("Ignoring second outcome for keyword {}", keyword);
                }
            }

            for handle in workers {
                if let Err(e) = handle.await {
                    error!("❌ 워커 비정상 종료: {}", e);
                }
            }

            // A worker that died outside task processing may have dropped its keyword.
            for keyword in keywords {
                if aggregate.contains_keyword(&keyword) {
                    continue;
                }
                error!("No outcome reported for {}, recording as unexpected failure", keyword);
                let outcome = KeywordOutcome::RequestError(ErrorDescriptor::Unexpected(
                    "worker terminated before reporting a result".to_string(),
                ));
                aggregate.insert_once(keyword, outcome);
                completed += 1;
                on_progress(ProgressState::new(completed, total));
            }

            let summary = aggregate.summary();
            info!(
                "✅ 배치 완료: {} keywords, {} with records ({} records), {} empty, {} parse errors, {} request errors",
                summary.keywords,
                summary.with_records,
                summary.total_records,
                summary.empty,
                summary.parse_errors,
                summary.request_errors
            );

            Ok(aggregate)
        }
        .instrument(span)
        .await
    }
}

fn validate_batch(tasks: &[KeywordTask], concurrency: usize) -> Result<(), BatchError> {
    if concurrency == 0 {
        return Err(BatchError::ZeroConcurrency);
    }
    if tasks.is_empty() {
        return Err(BatchError::EmptyTaskList);
    }

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.keyword()) {
            return Err(BatchError::DuplicateKeyword(task.keyword().to_string()));
        }
    }
    Ok(())
}

/// 단일 워커: 큐가 빌 때까지 작업을 하나씩 꺼내 처리
async fn worker_loop(
    worker_id: usize,
    queue: TaskQueue,
    executor: Arc<dyn RequestExecutor>,
    base_url: String,
    timeout: Duration,
    results: mpsc::UnboundedSender<(String, KeywordOutcome)>,
) {
    debug!("👷 워커 {} 시작", worker_id);

    loop {
        let next = queue.lock().await.pop_front();
        let Some(task) = next else {
            break;
        };

        let outcome = AssertUnwindSafe(process_task(executor.as_ref(), &base_url, &task, timeout))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let reason = panic_reason(panic.as_ref());
                error!("❌ 키워드 {} 처리 중 panic: {}", task.keyword(), reason);
                KeywordOutcome::RequestError(ErrorDescriptor::Unexpected(reason))
            });

        if results.send((task.keyword().to_string(), outcome)).is_err() {
            warn!("Collector dropped, worker {} stopping", worker_id);
            break;
        }
    }

    debug!("👷 워커 {} 종료", worker_id);
}

/// build URL → execute → normalize for one keyword
pub async fn process_task(
    executor: &dyn RequestExecutor,
    base_url: &str,
    task: &KeywordTask,
    timeout: Duration,
) -> KeywordOutcome {
    let url = build_url(base_url, task.parameters());
    let raw = RawResponse {
        keyword: task.keyword().to_string(),
        body: executor.execute(&url, timeout).await,
    };
    outcome_from_raw(raw)
}

/// Successful bodies are normalized; transport failures skip normalization.
pub fn outcome_from_raw(raw: RawResponse) -> KeywordOutcome {
    match raw.body {
        Ok(body) => normalize(&body),
        Err(descriptor) => KeywordOutcome::RequestError(descriptor),
    }
}

fn panic_reason(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("panic: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("panic: {message}")
    } else {
        "panic during request processing".to_string()
    }
}
