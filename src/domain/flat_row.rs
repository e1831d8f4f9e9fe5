//! Fixed 8-column export row
//!
//! The column order is the one the spreadsheet export has always used:
//! 구분, 입찰공고번호, 키워드, 공고명, 공고기관, 수요기관, 게시일자, 입찰 마감일시.

use serde::Serialize;

use crate::domain::bid_notice::BidNotice;

/// One row of the tabular export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    pub kind: String,
    pub composite_id: String,
    pub keyword: String,
    pub title: String,
    pub announcing_org: String,
    pub requesting_org: String,
    pub post_date: String,
    pub close_date: String,
}

impl FlatRow {
    pub const COLUMN_COUNT: usize = 8;

    /// Column headers expected by the export writer
    pub const HEADERS: [&'static str; Self::COLUMN_COUNT] = [
        "구분",
        "입찰공고번호",
        "키워드",
        "공고명",
        "공고기관",
        "수요기관",
        "게시일자",
        "입찰 마감일시",
    ];

    pub fn from_notice(keyword: &str, notice: &BidNotice) -> Self {
        Self {
            kind: notice.notice_kind.clone(),
            composite_id: notice.composite_id(),
            keyword: keyword.to_string(),
            title: notice.title.clone(),
            announcing_org: notice.announcing_org.clone(),
            requesting_org: notice.requesting_org.clone(),
            post_date: notice.post_date.clone(),
            close_date: notice.close_date.clone(),
        }
    }

    /// Placeholder row: marker text in the title column, keyword in its column
    pub fn sentinel(keyword: &str, marker: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            title: marker.into(),
            ..Self::default()
        }
    }

    /// Cells in header order
    pub fn to_columns(&self) -> [&str; Self::COLUMN_COUNT] {
        [
            &self.kind,
            &self.composite_id,
            &self.keyword,
            &self.title,
            &self.announcing_org,
            &self.requesting_org,
            &self.post_date,
            &self.close_date,
        ]
    }
}
