//! Nara Market - Concurrent multi-keyword bid notice aggregator
//!
//! Queries the public procurement bid-notice search API for many keywords
//! at once through a bounded worker pool, normalizes the heterogeneous JSON
//! responses, and flattens the results into fixed 8-column export rows.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{AggregationUseCases, BatchError, BatchReport, FanoutScheduler, SchedulerConfig, flatten, normalize};
pub use domain::{AggregateResult, BidNotice, ErrorDescriptor, FlatRow, KeywordOutcome, KeywordTask, ProgressState};
pub use infrastructure::{AggregatorConfig, HttpRequestExecutor, RequestExecutor, build_url};
