use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::BookId;
use crate::domain::error::DomainError;

/// ジャンル。バックエンドの固定列挙に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    ScienceFiction,
    Fantasy,
    Romance,
    Thriller,
    Horror,
    Biography,
    History,
    Poetry,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::Biography,
        Genre::History,
        Genre::Poetry,
        Genre::Other,
    ];

    /// APIで使われる表記。
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::Poetry => "Poetry",
            Genre::Other => "Other",
        }
    }

    /// 表記ゆれ（大小文字、"Sci-Fi"）を吸収して解釈する。未知の値はNone。
    pub fn parse(s: &str) -> Option<Genre> {
        let key = s.trim().to_ascii_lowercase();
        if key == "sci-fi" || key == "scifi" {
            return Some(Genre::ScienceFiction);
        }
        Self::ALL
            .into_iter()
            .find(|g| g.label().to_ascii_lowercase() == key)
    }

    /// バックエンド由来の文字列。未知のジャンルは `Other` に寄せる。
    pub fn from_wire(s: &str) -> Genre {
        Self::parse(s).unwrap_or(Genre::Other)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 0〜5の整数評価。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(0..=i64::from(Self::MAX)).contains(&value) {
            return Err(DomainError::RatingOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// 一覧・検索結果に現れる書籍の要約。バックエンドが所有し、クライアントからは不変。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    id: BookId,
    title: String,
    author: String,
    genre: Option<Genre>,
    cover_url: Option<String>,
    rating: Option<Rating>,
}

impl BookSummary {
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre: None,
            cover_url: None,
            rating: None,
        }
    }

    pub fn with_genre(mut self, genre: Option<Genre>) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_cover(mut self, cover_url: Option<String>) -> Self {
        self.cover_url = cover_url;
        self
    }

    pub fn with_rating(mut self, rating: Option<Rating>) -> Self {
        self.rating = rating;
        self
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> Option<Genre> {
        self.genre
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

/// ジャンル別一覧の1ページ。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryPage {
    pub books: Vec<BookSummary>,
    pub page: u32,
    pub total_pages: u32,
}

impl CategoryPage {
    /// 取得失敗時に表示する空ページ。
    pub fn empty(page: u32) -> Self {
        Self {
            books: Vec::new(),
            page,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
