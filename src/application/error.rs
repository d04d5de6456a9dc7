use crate::domain::error::{DomainError, FetchError};
use crate::domain::model::id::BookId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("sign in to manage favorites")]
    NotAuthenticated,

    #[error("favorite update for book {0} is still in flight")]
    ToggleInFlight(BookId),

    #[error("login rejected: {0}")]
    LoginRejected(String),

    #[error("book {0} has no chapters")]
    NoChapters(BookId),
}
