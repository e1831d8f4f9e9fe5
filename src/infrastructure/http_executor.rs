//! Single request executor
//!
//! Performs exactly one HTTP GET per call and folds every failure into an
//! [`ErrorDescriptor`]. Callers iterating many keywords never need their own
//! error handling around a request.

use std::error::Error as StdError;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use crate::domain::ErrorDescriptor;
use crate::infrastructure::config::WorkerConfig;

/// Executes one GET and returns the body text or a classified failure.
///
/// Implementations must return within `timeout` plus scheduling overhead and
/// must not panic; the scheduler still guards against panics but treats them
/// as `Unexpected`.
#[async_trait]
pub trait RequestExecutor: Send + Sync + 'static {
    async fn execute(&self, url: &str, timeout: Duration) -> Result<String, ErrorDescriptor>;
}

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Default request timeout in seconds, used when building the client
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    /// Create HttpClientConfig from WorkerConfig
    pub fn from_worker_config(worker_config: &WorkerConfig) -> Self {
        Self {
            timeout_seconds: worker_config.request_timeout_seconds,
            user_agent: worker_config.user_agent.clone(),
            follow_redirects: true,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: format!("nara-market/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: true,
        }
    }
}

/// reqwest-backed executor sharing one connection pool across workers
#[derive(Clone)]
pub struct HttpRequestExecutor {
    client: Client,
    config: HttpClientConfig,
}

impl HttpRequestExecutor {
    pub fn from_worker_config(worker_config: &WorkerConfig) -> Result<Self> {
        Self::with_config(HttpClientConfig::from_worker_config(worker_config))
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, ErrorDescriptor> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ErrorDescriptor::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        response.text().await.map_err(|e| classify_reqwest_error(&e))
    }
}

#[async_trait]
impl RequestExecutor for HttpRequestExecutor {
    async fn execute(&self, url: &str, timeout: Duration) -> Result<String, ErrorDescriptor> {
        debug!("🌐 HTTP GET: {}", redact_service_key(url));

        let result = match tokio::time::timeout(timeout, self.fetch_text(url, timeout)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ErrorDescriptor::Timeout),
        };

        if let Err(e) = &result {
            warn!("❌ 요청 실패 {}: {}", redact_service_key(url), e);
        }
        result
    }
}

/// Map a reqwest failure onto the closed error taxonomy
fn classify_reqwest_error(error: &reqwest::Error) -> ErrorDescriptor {
    if error.is_timeout() {
        ErrorDescriptor::Timeout
    } else if error.is_connect() || error.is_request() {
        ErrorDescriptor::Network(error_chain(error))
    } else {
        ErrorDescriptor::Unexpected(error_chain(error))
    }
}

/// Display of an error followed by its sources, `: `-separated
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Replace the `serviceKey` query value so credentials stay out of the logs
pub fn redact_service_key(raw_url: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw_url) else {
        return raw_url.to_string();
    };

    if !parsed.query_pairs().any(|(k, _)| k == "serviceKey") {
        return raw_url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "serviceKey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let executor = HttpRequestExecutor::with_config(HttpClientConfig::default());
        assert!(executor.is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = HttpClientConfig {
            timeout_seconds: 3,
            user_agent: "Test Agent".to_string(),
            follow_redirects: false,
        };

        let executor = HttpRequestExecutor::with_config(config).unwrap();
        assert_eq!(executor.config().timeout_seconds, 3);
        assert!(!executor.config().follow_redirects);
    }

    #[test]
    fn test_redact_service_key_hides_only_the_key() {
        let url = "https://apis.data.go.kr/x?serviceKey=SECRET%2Bkey&pageNo=1&bidNtceNm=%EC%B1%94%EB%B2%84";
        let redacted = redact_service_key(url);
        assert!(!redacted.contains("SECRET"));
        assert!(redacted.contains("serviceKey=***") || redacted.contains("serviceKey=%2A%2A%2A"));
        assert!(redacted.contains("pageNo=1"));
    }

    #[test]
    fn test_redact_leaves_unparsable_url_alone() {
        assert_eq!(redact_service_key("not a url"), "not a url");
    }

    #[tokio::test]
    async fn test_invalid_url_is_unexpected_not_panic() {
        let executor = HttpRequestExecutor::with_config(HttpClientConfig::default()).unwrap();
        let result = executor.execute("not a url", Duration::from_secs(1)).await;
        assert!(
            matches!(result, Err(ErrorDescriptor::Unexpected(_) | ErrorDescriptor::Network(_))),
            "{result:?}"
        );
    }
}
