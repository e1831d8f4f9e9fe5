//! Response normalizer
//!
//! Turns one raw response body into a [`KeywordOutcome`]. The search API
//! answers in several shapes depending on how many notices matched:
//!
//! ```json
//! {"response": {"header": {...}, "body": {"items": [ {...}, {...} ], "totalCount": 2}}}
//! {"response": {"body": {"items": {...}}}}
//! {"response": {"body": {"items": ""}}}
//! {"response": {"body": {}}}
//! ```
//!
//! Each shape is classified into [`ItemsShape`] before being mapped to an
//! outcome, so the branching is enumerable and testable on its own.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{BidNotice, KeywordOutcome};

/// Where the items live
const ITEMS_POINTER: &str = "/response/body/items";

/// Shape of the `items` field after navigation
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsShape {
    /// A JSON array
    List(Vec<Value>),
    /// A single JSON object
    Single(Map<String, Value>),
    /// Path not present, or an intermediate level is not an object
    Absent,
    /// Present but neither array nor object (string, number, bool, null)
    Unrecognized,
}

impl ItemsShape {
    /// Move `response.body.items` out of a parsed document
    pub fn locate(mut document: Value) -> Self {
        match document.pointer_mut(ITEMS_POINTER).map(Value::take) {
            None => Self::Absent,
            Some(Value::Array(items)) => Self::List(items),
            Some(Value::Object(item)) => Self::Single(item),
            Some(_) => Self::Unrecognized,
        }
    }

    /// Map a shape onto an outcome. Array elements that are not objects are
    /// skipped; a list without any object element counts as empty.
    pub fn into_outcome(self) -> KeywordOutcome {
        match self {
            Self::List(items) => {
                let records: Vec<BidNotice> = items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(BidNotice::from_item)
                    .collect();

                if records.len() < items.len() {
                    debug!("Skipped {} non-object items", items.len() - records.len());
                }

                if records.is_empty() {
                    KeywordOutcome::Empty
                } else {
                    KeywordOutcome::Records(records)
                }
            }
            Self::Single(item) if !item.is_empty() => KeywordOutcome::Records(vec![BidNotice::from_item(&item)]),
            Self::Single(_) | Self::Absent | Self::Unrecognized => KeywordOutcome::Empty,
        }
    }
}

/// Parse a response body into a keyword outcome.
///
/// Only an outright JSON parse failure is `ParseError`; everything that
/// parses but carries no usable item is `Empty`.
pub fn normalize(body: &str) -> KeywordOutcome {
    let document: Value = match serde_json::from_str(body) {
        Ok(document) => document,
        Err(e) => {
            debug!("JSON 파싱 오류: {}", e);
            return KeywordOutcome::ParseError;
        }
    };

    log_api_result_header(&document);
    ItemsShape::locate(document).into_outcome()
}

/// The API reports service-level problems in `response.header`; `00` is success.
fn log_api_result_header(document: &Value) {
    let Some(header) = document.pointer("/response/header") else {
        return;
    };

    let code = header.get("resultCode").and_then(Value::as_str);
    if let Some(code) = code.filter(|code| *code != "00") {
        let message = header.get("resultMsg").and_then(Value::as_str).unwrap_or("");
        warn!("⚠️ API result code {}: {}", code, message);
    }
}
