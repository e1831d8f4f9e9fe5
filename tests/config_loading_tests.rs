//! Config file loading through the `config` crate

use std::io::Write;

use nara_market_lib::infrastructure::config::{AggregatorConfig, ConfigError};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_toml_and_fills_defaults() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"

        [query]
        keywords = ["챔버", "해양 경찰청, 중앙 해양 특수 구조단"]
        begin_date = "20240101"
        end_date = "20240331"

        [workers]
        concurrency = 3
        "#,
    );

    let config = AggregatorConfig::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.api.service_key, "file-key");
    assert_eq!(config.api.page_no, "1");
    assert_eq!(config.query.keywords.len(), 2);
    assert_eq!(config.query.keywords[1], "해양 경찰청, 중앙 해양 특수 구조단");
    assert_eq!(config.workers.concurrency, 3);
    assert_eq!(config.workers.request_timeout_seconds, 10);
}

#[test]
fn invalid_values_fail_validation() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"
        page_no = "first"

        [query]
        keywords = ["챔버"]
        recent_months = 1
        "#,
    );

    let err = AggregatorConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }), "{err}");
}

#[test]
fn reversed_dates_fail_validation() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"

        [query]
        keywords = ["챔버"]
        begin_date = "20240301"
        end_date = "20240101"
        "#,
    );

    let err = AggregatorConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::DateRange { .. }), "{err}");
}

#[test]
fn missing_file_is_load_error() {
    let err = AggregatorConfig::from_file("/nonexistent/nara-market-config").unwrap_err();
    assert!(matches!(err, ConfigError::FileLoad { .. }), "{err}");
}

#[test]
fn environment_overrides_scalars_and_keyword_list() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"

        [query]
        keywords = ["챔버"]
        recent_months = 1
        "#,
    );

    let vars = config::Map::from([
        ("NARA_MARKET__API__SERVICE_KEY".to_string(), "ENVKEY".to_string()),
        ("NARA_MARKET__WORKERS__CONCURRENCY".to_string(), "3".to_string()),
        (
            "NARA_MARKET__QUERY__KEYWORDS".to_string(),
            "감압 챔버;해양 경찰청, 중앙 해양 특수 구조단;scuba".to_string(),
        ),
    ]);

    let config = AggregatorConfig::from_file_with_env(file.path().to_str().unwrap(), vars).unwrap();

    assert_eq!(config.api.service_key, "ENVKEY");
    assert_eq!(config.workers.concurrency, 3);
    assert_eq!(
        config.query.keywords,
        ["감압 챔버", "해양 경찰청, 중앙 해양 특수 구조단", "scuba"]
    );
}

#[test]
fn single_keyword_from_environment_is_a_one_element_list() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"

        [query]
        keywords = ["scuba", "chamber"]
        recent_months = 1
        "#,
    );

    let vars = config::Map::from([("NARA_MARKET__QUERY__KEYWORDS".to_string(), "챔버".to_string())]);

    let config = AggregatorConfig::from_file_with_env(file.path().to_str().unwrap(), vars).unwrap();
    assert_eq!(config.query.keywords, ["챔버"]);
}

#[test]
fn duplicate_keywords_in_file_are_a_config_error() {
    let file = write_config(
        r#"
        [api]
        service_key = "file-key"

        [query]
        keywords = ["챔버", "scuba", "챔버"]
        recent_months = 1
        "#,
    );

    let err = AggregatorConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }), "{err}");
}
