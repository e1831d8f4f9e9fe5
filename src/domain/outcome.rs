//! Per-keyword outcomes and the batch aggregate
//!
//! Every way a keyword can end - records, nothing found, a malformed body or
//! a transport failure - is a value here, so the scheduler never has to
//! carry exceptions across worker boundaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::bid_notice::BidNotice;

/// Transport-level failure of a single request
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorDescriptor {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP Error {code}: {reason}")]
    HttpStatus { code: u16, reason: String },

    #[error("URL Error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Body or failure returned by the executor for one keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub keyword: String,
    pub body: Result<String, ErrorDescriptor>,
}

/// Terminal result for one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum KeywordOutcome {
    Records(Vec<BidNotice>),
    Empty,
    ParseError,
    RequestError(ErrorDescriptor),
}

impl KeywordOutcome {
    /// Records carried by this outcome, empty for sentinel outcomes
    pub fn records(&self) -> &[BidNotice] {
        match self {
            Self::Records(records) => records,
            _ => &[],
        }
    }
}

/// Complete keyword → outcome mapping of one batch, iterated in keyword order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    outcomes: BTreeMap<String, KeywordOutcome>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordOutcome> {
        self.outcomes.get(keyword)
    }

    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.outcomes.contains_key(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordOutcome)> {
        self.outcomes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tally of outcome kinds for logging and reporting
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            keywords: self.outcomes.len(),
            ..BatchSummary::default()
        };

        for outcome in self.outcomes.values() {
            match outcome {
                KeywordOutcome::Records(records) => {
                    summary.with_records += 1;
                    summary.total_records += records.len();
                }
                KeywordOutcome::Empty => summary.empty += 1,
                KeywordOutcome::ParseError => summary.parse_errors += 1,
                KeywordOutcome::RequestError(_) => summary.request_errors += 1,
            }
        }

        summary
    }

    /// Write-once insert used by the collector; returns `false` if the keyword
    /// already had an outcome.
    pub(crate) fn insert_once(&mut self, keyword: String, outcome: KeywordOutcome) -> bool {
        use std::collections::btree_map::Entry;

        match self.outcomes.entry(keyword) {
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}

impl FromIterator<(String, KeywordOutcome)> for AggregateResult {
    fn from_iter<T: IntoIterator<Item = (String, KeywordOutcome)>>(iter: T) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

/// 배치 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub keywords: usize,
    pub with_records: usize,
    pub empty: usize,
    pub parse_errors: usize,
    pub request_errors: usize,
    pub total_records: usize,
}
