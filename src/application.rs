//! Application layer module
//!
//! This module contains the batch pipeline stages and the use case
//! that orchestrates them.

pub mod aggregation_use_cases;
pub mod fanout_scheduler;
pub mod response_normalizer;
pub mod tabular_flattener;

pub use aggregation_use_cases::{AggregationUseCases, BatchReport, build_tasks, request_parameters};
pub use fanout_scheduler::{BatchError, FanoutScheduler, SchedulerConfig};
pub use response_normalizer::{ItemsShape, normalize};
pub use tabular_flattener::flatten;
