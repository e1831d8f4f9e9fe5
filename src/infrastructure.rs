//! Infrastructure layer for HTTP access, configuration and logging
//!
//! This module provides the request builder, the single-request executor,
//! configuration loading and the logging setup.

pub mod config; // Configuration loading and validation
pub mod http_executor; // One GET per call, failures classified
pub mod logging; // Logging infrastructure
pub mod request_builder;

// Re-export commonly used items
pub use config::{AggregatorConfig, ConfigError, LoggingConfig, WorkerConfig};
pub use http_executor::{HttpClientConfig, HttpRequestExecutor, RequestExecutor};
pub use logging::{get_log_directory, init_logging_with_config};
pub use request_builder::build_url;
