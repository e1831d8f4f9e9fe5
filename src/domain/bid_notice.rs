use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bid notice item from the search API, with every field defaulted to `""`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidNotice {
    /// 공고종류 (ntceKindNm)
    pub notice_kind: String,
    /// 입찰공고번호 (bidNtceNo)
    pub notice_id: String,
    /// 입찰공고차수 (bidNtceOrd)
    pub ordinal: String,
    /// 공고명 (bidNtceNm)
    pub title: String,
    /// 공고기관 (ntceInsttNm)
    pub announcing_org: String,
    /// 수요기관 (dminsttNm)
    pub requesting_org: String,
    /// 게시일자 (bidNtceDt)
    pub post_date: String,
    /// 입찰 마감일시 (bidClseDt)
    pub close_date: String,
}

impl BidNotice {
    /// Build a notice from one JSON item object. Never fails: unknown or
    /// missing fields become empty strings.
    pub fn from_item(item: &Map<String, Value>) -> Self {
        let field = |name: &str| item.get(name).map(text_of).unwrap_or_default();

        Self {
            notice_kind: field("ntceKindNm"),
            notice_id: field("bidNtceNo"),
            ordinal: field("bidNtceOrd"),
            title: field("bidNtceNm"),
            announcing_org: field("ntceInsttNm"),
            requesting_org: field("dminsttNm"),
            post_date: field("bidNtceDt"),
            close_date: field("bidClseDt"),
        }
    }

    /// `번호-차수`, either part may be empty
    pub fn composite_id(&self) -> String {
        format!("{}-{}", self.notice_id, self.ordinal)
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_item_reads_api_field_names() {
        let item = json!({
            "ntceKindNm": "등록공고",
            "bidNtceNo": "20240101234",
            "bidNtceOrd": "000",
            "bidNtceNm": "고압 산소 챔버 구매",
            "ntceInsttNm": "조달청",
            "dminsttNm": "해양경찰청",
            "bidNtceDt": "2024-01-02 10:00:00",
            "bidClseDt": "2024-01-12 10:00:00"
        });

        let notice = BidNotice::from_item(item.as_object().unwrap());
        assert_eq!(notice.notice_kind, "등록공고");
        assert_eq!(notice.composite_id(), "20240101234-000");
        assert_eq!(notice.requesting_org, "해양경찰청");
        assert_eq!(notice.close_date, "2024-01-12 10:00:00");
    }

    #[test]
    fn test_missing_and_non_text_fields_default_to_empty() {
        let item = json!({
            "bidNtceNo": 12345,
            "bidNtceOrd": null,
            "bidNtceNm": ["nested"],
        });

        let notice = BidNotice::from_item(item.as_object().unwrap());
        assert_eq!(notice.notice_id, "12345");
        assert_eq!(notice.ordinal, "");
        assert_eq!(notice.title, "");
        assert_eq!(notice.notice_kind, "");
        assert_eq!(notice.composite_id(), "12345-");
    }
}
