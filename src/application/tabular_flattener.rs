use crate::domain::{AggregateResult, FlatRow, KeywordOutcome};

/// Title marker for a keyword whose response carried no items
pub const EMPTY_MARKER: &str = "검색된 항목이 없습니다.";
/// Title marker for a keyword whose response body was not valid JSON
pub const PARSE_ERROR_MARKER: &str = "JSON 파싱 오류";
/// Prefix of the title marker for a keyword whose request failed
pub const REQUEST_ERROR_PREFIX: &str = "요청 오류";

/// Flatten an aggregate into export rows.
///
/// Keywords come in the aggregate's order, records in their response order.
/// Every keyword yields at least one row: sentinel outcomes become a single
/// row with a marker in the title column.
pub fn flatten(aggregate: &AggregateResult) -> Vec<FlatRow> {
    let mut rows = Vec::with_capacity(expected_row_count(aggregate));

    for (keyword, outcome) in aggregate.iter() {
        match outcome {
            KeywordOutcome::Records(records) if !records.is_empty() => {
                rows.extend(records.iter().map(|notice| FlatRow::from_notice(keyword, notice)));
            }
            other => rows.push(FlatRow::sentinel(keyword, sentinel_marker(other))),
        }
    }

    rows
}

/// `Σ max(1, records)` over all keywords
pub fn expected_row_count(aggregate: &AggregateResult) -> usize {
    aggregate.iter().map(|(_, outcome)| outcome.records().len().max(1)).sum()
}

/// Human-readable marker for outcomes without records
pub fn sentinel_marker(outcome: &KeywordOutcome) -> String {
    match outcome {
        KeywordOutcome::Empty | KeywordOutcome::Records(_) => EMPTY_MARKER.to_string(),
        KeywordOutcome::ParseError => PARSE_ERROR_MARKER.to_string(),
        KeywordOutcome::RequestError(descriptor) => format!("{REQUEST_ERROR_PREFIX}: {descriptor}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BidNotice, ErrorDescriptor};

    fn notice(id: &str, title: &str) -> BidNotice {
        BidNotice {
            notice_id: id.into(),
            ordinal: "00".into(),
            title: title.into(),
            ..BidNotice::default()
        }
    }

    #[test]
    fn test_records_keep_order_within_keyword() {
        let aggregate: AggregateResult = vec![(
            "alpha".to_string(),
            KeywordOutcome::Records(vec![notice("2", "second"), notice("1", "first")]),
        )]
        .into_iter()
        .collect();

        let rows = flatten(&aggregate);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "second");
        assert_eq!(rows[1].composite_id, "1-00");
        assert!(rows.iter().all(|r| r.keyword == "alpha"));
    }

    #[test]
    fn test_sentinel_markers_are_distinct() {
        let empty = sentinel_marker(&KeywordOutcome::Empty);
        let parse = sentinel_marker(&KeywordOutcome::ParseError);
        let timeout = sentinel_marker(&KeywordOutcome::RequestError(ErrorDescriptor::Timeout));
        let http = sentinel_marker(&KeywordOutcome::RequestError(ErrorDescriptor::HttpStatus {
            code: 500,
            reason: "Internal Server Error".into(),
        }));

        assert_ne!(empty, parse);
        assert_ne!(empty, timeout);
        assert_ne!(parse, timeout);
        assert_eq!(http, "요청 오류: HTTP Error 500: Internal Server Error");
    }

    #[test]
    fn test_empty_records_list_still_produces_a_row() {
        let aggregate: AggregateResult = vec![("x".to_string(), KeywordOutcome::Records(Vec::new()))]
            .into_iter()
            .collect();

        let rows = flatten(&aggregate);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, EMPTY_MARKER);
        assert_eq!(expected_row_count(&aggregate), 1);
    }

    #[test]
    fn test_keywords_follow_aggregate_order() {
        let aggregate: AggregateResult = vec![
            ("b".to_string(), KeywordOutcome::Empty),
            ("a".to_string(), KeywordOutcome::ParseError),
        ]
        .into_iter()
        .collect();

        let keywords: Vec<String> = flatten(&aggregate).into_iter().map(|r| r.keyword).collect();
        let expected: Vec<String> = aggregate.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keywords, expected);
    }
}
