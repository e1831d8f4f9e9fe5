//! Logging system configuration and initialization
//!
//! This module provides the logging setup with:
//! - Console output on stderr (stdout is reserved for exported rows)
//! - Optional file output next to the executable, plain or JSON
//! - Configuration file based log level control, `RUST_LOG` override
//! - KST (Korea Standard Time) timestamps

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use chrono::{FixedOffset, Utc};
use lazy_static::lazy_static;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

const KST_OFFSET_SECONDS: i32 = 9 * 3600;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// Custom time formatter for KST (Korea Standard Time, UTC+9)
struct KstTimeFormatter;

impl FormatTime for KstTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let kst_offset = FixedOffset::east_opt(KST_OFFSET_SECONDS).ok_or(std::fmt::Error)?;
        let kst_time = Utc::now().with_timezone(&kst_offset);
        write!(w, "{}", kst_time.format("%Y-%m-%d %H:%M:%S%.3f %Z"))
    }
}

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level with
/// HTTP stack internals held at `warn` unless TRACE is requested.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.to_lowercase().contains("trace") {
        filter = filter
            .add_directive("reqwest=info".parse()?)
            .add_directive("hyper=warn".parse()?)
            .add_directive("hyper_util=warn".parse()?)
            .add_directive("h2=warn".parse()?)
            .add_directive("tokio=info".parse()?)
            .add_directive(format!("nara_market_lib={}", config.level).parse()?);
    }

    Ok(filter)
}

/// Rename an existing log file with its modification timestamp so each run starts fresh
fn rotate_existing_log_file(log_dir: &Path, log_file_name: &str) -> Result<()> {
    let log_file_path = log_dir.join(log_file_name);
    if !log_file_path.exists() {
        return Ok(());
    }

    let metadata = std::fs::metadata(&log_file_path)
        .map_err(|e| anyhow!("Failed to get log file metadata: {}", e))?;
    let file_time = metadata.modified().unwrap_or_else(|_| std::time::SystemTime::now());

    let kst_offset = FixedOffset::east_opt(KST_OFFSET_SECONDS).ok_or_else(|| anyhow!("invalid KST offset"))?;
    let datetime: chrono::DateTime<Utc> = file_time.into();
    let stamp = datetime.with_timezone(&kst_offset).format("%Y%m%dT%H%M%S");

    let file_stem = log_file_name.trim_end_matches(".log");
    let rotated_path = log_dir.join(format!("{file_stem}.{stamp}.log"));

    std::fs::rename(&log_file_path, &rotated_path).map_err(|e| {
        anyhow!(
            "Failed to rotate log file {} to {}: {}",
            log_file_path.display(),
            rotated_path.display(),
            e
        )
    })?;

    Ok(())
}

/// Initialize logging with custom configuration
///
/// # Environment Variable Override
/// ```bash
/// # Show detailed HTTP logs
/// RUST_LOG="debug,reqwest=debug,hyper=debug" nara-market
/// ```
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(config)?;
    let log_dir = get_log_directory();

    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(KstTimeFormatter)
            .with_target(false)
    });

    let mut plain_file_layer = None;
    let mut json_file_layer = None;

    if config.file_output {
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;
        rotate_existing_log_file(&log_dir, &config.file_name)?;

        let (file_writer, file_guard) = non_blocking(rolling::never(&log_dir, &config.file_name));
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);

        if config.json_format {
            json_file_layer = Some(
                fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(KstTimeFormatter)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false),
            );
        } else {
            plain_file_layer = Some(
                fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(KstTimeFormatter)
                    .with_target(false)
                    .with_ansi(false),
            );
        }
    }

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(plain_file_layer)
        .with(json_file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!("Log file: {:?}", log_dir.join(&config.file_name));
    }

    Ok(())
}

/// Log system information for diagnostics
pub fn log_system_info() {
    info!("=== Nara Market System Information ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {}", std::env::consts::OS);
    info!("Architecture: {}", std::env::consts::ARCH);
    info!("Log directory: {:?}", get_log_directory());
    info!("======================================");
}
