#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("book id must not be empty")]
    EmptyBookId,

    #[error("rating {0} out of range 0-5")]
    RatingOutOfRange(i64),
}

/// バックエンド呼び出しの失敗分類。検索状態に保持されるため `Clone`。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("internal server error - check server logs")]
    Server,

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("invalid response format: {0}")]
    Format(String),

    #[error("not signed in")]
    Unauthenticated,
}

impl From<DomainError> for FetchError {
    fn from(e: DomainError) -> Self {
        FetchError::Format(e.to_string())
    }
}
