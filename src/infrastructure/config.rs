//! Configuration infrastructure
//!
//! Contains configuration loading and validation for a keyword batch.
//!
//! Configuration is organized into four sections:
//! 1. `api` - endpoint and fixed request parameters (service key, paging)
//! 2. `query` - keywords and the inquiry date range
//! 3. `workers` - concurrency and per-request timeout
//! 4. `logging` - log level and outputs
//!
//! Values come from a config file (`config/default.toml` by default) and can
//! be overridden with `NARA_MARKET__<SECTION>__<KEY>` environment variables.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{DateRange, DateRangeError};

/// Default configuration values
pub mod defaults {
    pub const BASE_URL: &str =
        "https://apis.data.go.kr/1230000/ad/BidPublicInfoService/getBidPblancListInfoThngPPSSrch";
    pub const PAGE_NO: &str = "1";
    pub const NUM_OF_ROWS: &str = "10";
    /// 조회구분 1 = 공고게시일시 기준
    pub const INQRY_DIV: &str = "1";
    pub const RESPONSE_TYPE: &str = "json";

    pub const CONCURRENCY: usize = 5;
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "nara-market.log";

    pub const CONFIG_PATH: &str = "config/default";
    pub const ENV_PREFIX: &str = "NARA_MARKET";
    /// Separator for `NARA_MARKET__QUERY__KEYWORDS`; keywords may contain commas
    pub const ENV_LIST_SEPARATOR: &str = ";";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid inquiry date range: {source}")]
    DateRange {
        #[from]
        source: DateRangeError,
    },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub workers: WorkerConfig,
    pub logging: LoggingConfig,
}

/// Endpoint and the request parameters shared by every keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// 서비스키 (data.go.kr 인증키)
    pub service_key: String,
    /// 조회페이지
    pub page_no: String,
    /// 조회갯수
    pub num_of_rows: String,
    pub inqry_div: String,
    pub response_type: String,
}

/// Keywords and 조회기간
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub keywords: Vec<String>,
    /// 조회 시작일자 (yyyyMMdd)
    pub begin_date: Option<String>,
    /// 조회 종료일자 (yyyyMMdd)
    pub end_date: Option<String>,
    /// 최근 N개월, used when explicit dates are not set
    pub recent_months: Option<u32>,
}

/// Worker configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of workers, i.e. maximum requests in flight
    pub concurrency: usize,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log file name inside the log directory
    pub file_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            service_key: String::new(),
            page_no: defaults::PAGE_NO.to_string(),
            num_of_rows: defaults::NUM_OF_ROWS.to_string(),
            inqry_div: defaults::INQRY_DIV.to_string(),
            response_type: defaults::RESPONSE_TYPE.to_string(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: defaults::CONCURRENCY,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: format!("nara-market/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl QueryConfig {
    /// Explicit dates win over `recent_months`; one of the two is required.
    pub fn resolve_date_range(&self, today: NaiveDate) -> Result<DateRange, ConfigError> {
        match (&self.begin_date, &self.end_date, self.recent_months) {
            (Some(begin), Some(end), _) => Ok(DateRange::parse(begin, end)?),
            (None, None, Some(months)) => Ok(DateRange::recent_months(months, today)?),
            (Some(_), None, _) | (None, Some(_), _) => Err(ConfigError::validation(
                "시작일자와 종료일자를 모두 지정해주세요 (begin_date and end_date must be set together)",
            )),
            (None, None, None) => Err(ConfigError::validation(
                "시작일자와 종료일자를 선택해주세요 (set begin_date/end_date or recent_months)",
            )),
        }
    }
}

impl AggregatorConfig {
    /// 설정 파일 + 환경 변수에서 로드
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(path, None)
    }

    /// Like [`Self::from_file`], with `vars` standing in for the process environment
    pub fn from_file_with_env(path: &str, vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(path, Some(vars))
    }

    fn load(path: &str, vars: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let environment = config::Environment::with_prefix(defaults::ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(defaults::ENV_LIST_SEPARATOR)
            .with_list_parse_key("query.keywords")
            .source(vars);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(environment)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        info!("📁 Configuration loaded from {} ({} keywords)", path, config.query.keywords.len());
        Ok(config)
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::validation(format!("base_url is not a valid URL: {e}")))?;

        if self.api.service_key.trim().is_empty() {
            return Err(ConfigError::validation("service_key must be set"));
        }

        for (name, value) in [("page_no", &self.api.page_no), ("num_of_rows", &self.api.num_of_rows)] {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigError::validation(format!(
                    "{name} must be a number, got '{value}'"
                )));
            }
        }

        if self.query.keywords.is_empty() {
            return Err(ConfigError::validation("at least one keyword is required"));
        }
        if self.query.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::validation("keywords must not be blank"));
        }
        let mut seen = HashSet::with_capacity(self.query.keywords.len());
        if let Some(duplicate) = self.query.keywords.iter().find(|k| !seen.insert(*k)) {
            return Err(ConfigError::validation(format!("duplicate keyword '{duplicate}'")));
        }

        if self.workers.concurrency == 0 {
            return Err(ConfigError::validation("concurrency must be greater than 0"));
        }
        if self.workers.request_timeout_seconds == 0 {
            return Err(ConfigError::validation("request_timeout_seconds must be greater than 0"));
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(ConfigError::validation("No logging output configured"));
        }

        if let (Some(begin), Some(end)) = (&self.query.begin_date, &self.query.end_date) {
            DateRange::parse(begin, end)?;
        }

        Ok(())
    }
}
