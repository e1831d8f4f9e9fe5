//! Domain module - Core data model of a keyword batch
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod bid_notice;
pub mod date_range;
pub mod flat_row;
pub mod keyword_task;
pub mod outcome;
pub mod progress;

pub use bid_notice::BidNotice;
pub use date_range::{DateRange, DateRangeError};
pub use flat_row::FlatRow;
pub use keyword_task::KeywordTask;
pub use outcome::{AggregateResult, BatchSummary, ErrorDescriptor, KeywordOutcome, RawResponse};
pub use progress::ProgressState;
