//! Keyword task - one unit of work for the fan-out scheduler
//!
//! A task pairs a search keyword with the full, ordered parameter list that
//! will be encoded into its query URL. Tasks are immutable once built.

use serde::Serialize;

/// 키워드 단위 검색 작업
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTask {
    keyword: String,
    parameters: Vec<(String, String)>,
}

impl KeywordTask {
    /// Create a task from a keyword and its ordered request parameters.
    ///
    /// Missing parameter values must already be substituted with `""`.
    pub fn new<K, I, P, V>(keyword: K, parameters: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<String>,
    {
        Self {
            keyword: keyword.into(),
            parameters: parameters
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Parameters in the order they will appear in the query string
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}
