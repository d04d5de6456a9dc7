//! バックエンドJSONの型付きデコード。
//!
//! 形が合わないレスポンスはすべて [`FetchError::Format`] にする。

use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::FetchError;
use crate::domain::model::auth::BearerToken;
use crate::domain::model::book::{BookSummary, CategoryPage, Genre, Rating};
use crate::domain::model::favorites::FavoriteList;
use crate::domain::model::id::BookId;
use crate::domain::model::reading::{BookDetail, ChapterText};

#[derive(Debug, Deserialize)]
struct WireBook {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    rating: Option<i64>,
    #[serde(default)]
    image: Option<WireImage>,
}

/// `image` は `{ "url": ... }` か、URL文字列そのもの。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireImage {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl WireImage {
    fn into_url(self) -> Option<String> {
        let url = match self {
            WireImage::Url(url) => Some(url),
            WireImage::Object { url } => url,
        };
        url.filter(|url| !url.trim().is_empty())
    }
}

impl WireBook {
    fn into_summary(self) -> Result<BookSummary, FetchError> {
        let id = BookId::new(self.id)?;
        let rating = self.rating.map(Rating::new).transpose()?;
        Ok(BookSummary::new(id, self.title, self.author.unwrap_or_default())
            .with_genre(
                self.genre
                    .as_deref()
                    .filter(|g| !g.trim().is_empty())
                    .map(Genre::from_wire),
            )
            .with_cover(self.image.and_then(WireImage::into_url))
            .with_rating(rating))
    }
}

/// お気に入り配列の要素。書籍オブジェクト、`_id` だけのオブジェクト、ID文字列の順に試す。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireFavorite {
    Book(WireBook),
    Ref {
        #[serde(rename = "_id")]
        id: String,
    },
    Id(String),
}

#[derive(Debug, Deserialize)]
struct WireFavorites {
    favorites: Vec<WireFavorite>,
}

#[derive(Debug, Deserialize)]
struct WireCategoryPage {
    #[serde(default)]
    books: Vec<Value>,
    #[serde(rename = "totalPages", default = "WireCategoryPage::default_total_pages")]
    total_pages: u32,
}

impl WireCategoryPage {
    fn default_total_pages() -> u32 {
        1
    }
}

/// 詳細レスポンスのうち要約以外の部分。
#[derive(Debug, Deserialize)]
struct WireBookExtras {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    chapters: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct WireChapter {
    #[serde(default)]
    title: Option<String>,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireLogin {
    token: String,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    message: Option<String>,
}

fn parse_json(body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Format(format!("body is not JSON: {e}")))
}

fn decode_book(value: Value) -> Result<BookSummary, FetchError> {
    let wire: WireBook =
        serde_json::from_value(value).map_err(|e| FetchError::Format(format!("book: {e}")))?;
    wire.into_summary()
}

/// 検索結果。JSON配列以外は形式エラー。
pub fn decode_book_list(body: &str) -> Result<Vec<BookSummary>, FetchError> {
    match parse_json(body)? {
        Value::Array(items) => items.into_iter().map(decode_book).collect(),
        other => Err(FetchError::Format(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

/// `{ "favorites": [...] }`
pub fn decode_favorites(body: &str) -> Result<FavoriteList, FetchError> {
    let wire: WireFavorites = serde_json::from_value(parse_json(body)?)
        .map_err(|e| FetchError::Format(format!("favorites: {e}")))?;

    let mut books = Vec::new();
    let mut bare_ids = Vec::new();
    for favorite in wire.favorites {
        match favorite {
            WireFavorite::Book(book) => books.push(book.into_summary()?),
            WireFavorite::Ref { id } | WireFavorite::Id(id) => bare_ids.push(BookId::new(id)?),
        }
    }
    Ok(FavoriteList::new(books, bare_ids))
}

/// 書籍詳細。章数は `chapters` 配列の長さ。
pub fn decode_book_detail(body: &str) -> Result<BookDetail, FetchError> {
    let value = parse_json(body)?;
    let extras: WireBookExtras = serde_json::from_value(value.clone())
        .map_err(|e| FetchError::Format(format!("book detail: {e}")))?;
    let summary = decode_book(value)?;
    let chapter_count = u32::try_from(extras.chapters.len()).unwrap_or(u32::MAX);
    Ok(BookDetail::new(
        summary,
        extras.description.filter(|d| !d.trim().is_empty()),
        chapter_count,
    ))
}

/// `{ "content": "<p>...</p>" }`
pub fn decode_chapter(body: &str) -> Result<ChapterText, FetchError> {
    let wire: WireChapter = serde_json::from_value(parse_json(body)?)
        .map_err(|e| FetchError::Format(format!("chapter: {e}")))?;
    Ok(ChapterText {
        title: wire.title.filter(|t| !t.trim().is_empty()),
        content: wire.content,
    })
}

/// `{ "books": [...], "totalPages": n }`
pub fn decode_category_page(body: &str, page: u32) -> Result<CategoryPage, FetchError> {
    let wire: WireCategoryPage = serde_json::from_value(parse_json(body)?)
        .map_err(|e| FetchError::Format(format!("category page: {e}")))?;
    let books = wire
        .books
        .into_iter()
        .map(decode_book)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CategoryPage {
        books,
        page,
        total_pages: wire.total_pages,
    })
}

/// `{ "token": "..." }`
pub fn decode_login_token(body: &str) -> Result<BearerToken, FetchError> {
    let wire: WireLogin = serde_json::from_value(parse_json(body)?)
        .map_err(|e| FetchError::Format(format!("login: {e}")))?;
    Ok(BearerToken::new(wire.token))
}

/// エラーレスポンスの `message`。読めなければNone。
pub fn decode_message(body: &str) -> Option<String> {
    serde_json::from_str::<WireMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
