use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// バックエンドが払い出す書籍ID（`_id`）。クライアント側では不透明な文字列として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookId(String);

impl BookId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyBookId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 詳細画面へのルート。
    pub fn route(&self) -> String {
        format!("/books/{}", self.0)
    }

    /// 章ページへのルート。章番号は1始まり。
    pub fn chapter_route(&self, number: u32) -> String {
        format!("/books/{}/chapter/{number}", self.0)
    }
}

impl TryFrom<String> for BookId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
