use super::book::Genre;

/// 検索リクエストの条件。`term` は入力そのまま（URLエンコードはゲートウェイ側）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    category: Option<Genre>,
    limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: None,
            limit: None,
        }
    }

    pub fn with_category(mut self, category: Option<Genre>) -> Self {
        self.category = category;
        self
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> Option<Genre> {
        self.category
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// 空白のみの検索語は「検索なし」として扱う。
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }
}
