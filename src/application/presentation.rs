use serde::Serialize;

use super::search::PanelView;
use crate::domain::model::book::{BookSummary, CategoryPage, Genre};
use crate::domain::model::favorites::FavoritesSet;
use crate::domain::model::reading::{BookDetail, Chapter};

/// タイトル中の一区間。`matched` は検索語に一致した部分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub matched: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: true,
        }
    }
}

/// 検索語（前後の空白を除く）の出現箇所を大文字小文字を無視して切り出す。
/// 一致は左から重ならないように取る。検索語が空なら一致なし。
/// 返すSpanを連結すると常に元のタイトルになる。
pub fn highlight(title: &str, query: &str) -> Vec<Span> {
    let needle: Vec<char> = query.trim().chars().collect();
    let mut spans = Vec::new();
    if needle.is_empty() {
        if !title.is_empty() {
            spans.push(Span::plain(title));
        }
        return spans;
    }

    let chars: Vec<(usize, char)> = title.char_indices().collect();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        let window = &chars[i..i + needle.len()];
        let hit = window
            .iter()
            .zip(&needle)
            .all(|(&(_, a), &b)| eq_ignore_case(a, b));
        if !hit {
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let end = chars
            .get(i + needle.len())
            .map(|&(byte, _)| byte)
            .unwrap_or(title.len());
        if plain_start < start {
            spans.push(Span::plain(&title[plain_start..start]));
        }
        spans.push(Span::matched(&title[start..end]));
        plain_start = end;
        i += needle.len();
    }

    if plain_start < title.len() {
        spans.push(Span::plain(&title[plain_start..]));
    }
    spans
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// 一覧1行分の表示データ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub title: Vec<Span>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub favorite: bool,
    pub route: String,
}

/// 検索結果ドロップダウンの表示モデル。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView {
    Hidden,
    Loading,
    Error { message: String },
    Empty,
    Results { query: String, rows: Vec<ResultRow> },
}

/// 検索結果・お気に入り状態から表示モデルとテキストを組み立てる。副作用なし。
pub struct ResultPresenter;

impl ResultPresenter {
    pub fn build(panel: &PanelView, query: &str, favorites: &FavoritesSet) -> ResultsView {
        match panel {
            PanelView::Hidden => ResultsView::Hidden,
            PanelView::Loading => ResultsView::Loading,
            PanelView::Error(e) => ResultsView::Error {
                message: e.to_string(),
            },
            PanelView::NoResults => ResultsView::Empty,
            PanelView::Results(books) => ResultsView::Results {
                query: query.to_string(),
                rows: Self::rows(books, query, favorites),
            },
        }
    }

    pub fn rows(books: &[BookSummary], query: &str, favorites: &FavoritesSet) -> Vec<ResultRow> {
        books
            .iter()
            .map(|book| ResultRow {
                id: book.id().to_string(),
                title: highlight(book.title(), query),
                author: book.author().to_string(),
                genre: book.genre().map(|g| g.label().to_string()),
                cover_url: book.cover_url().map(String::from),
                rating: book.rating().map(|r| r.value()),
                favorite: favorites.contains(book.id()),
                route: book.id().route(),
            })
            .collect()
    }

    /// 表示モデルをMarkdownに変換する。一致箇所は `**` で囲む。
    pub fn render_markdown(view: &ResultsView) -> String {
        match view {
            ResultsView::Hidden => String::new(),
            ResultsView::Loading => "Searching...\n".to_string(),
            ResultsView::Error { message } => format!("Search failed: {message}\n"),
            ResultsView::Empty => "No results found\n".to_string(),
            ResultsView::Results { query, rows } => {
                let mut buf = format!("# Results for \"{}\" ({})\n\n", query.trim(), rows.len());
                Self::render_rows(rows, &mut buf);
                buf
            }
        }
    }

    /// ジャンル別ページをMarkdownに変換する。
    pub fn render_category(genre: Genre, page: &CategoryPage, favorites: &FavoritesSet) -> String {
        let mut buf = format!(
            "# {} (page {}/{})\n\n",
            genre.label(),
            page.page,
            page.total_pages
        );
        if page.books.is_empty() {
            buf.push_str("No books found in this category.\n");
            return buf;
        }
        let rows = Self::rows(&page.books, "", favorites);
        Self::render_rows(&rows, &mut buf);
        buf
    }

    /// お気に入り一覧。書籍データが無いIDはルートだけ並べる。
    pub fn render_favorites(books: &[BookSummary], favorites: &FavoritesSet) -> String {
        let mut buf = format!("# Favorites ({})\n\n", favorites.len());
        if favorites.is_empty() {
            buf.push_str("No Favorites Yet!\n");
            return buf;
        }
        let rows = Self::rows(books, "", favorites);
        Self::render_rows(&rows, &mut buf);

        let bare: Vec<_> = favorites
            .sorted()
            .into_iter()
            .filter(|id| !books.iter().any(|b| b.id() == *id))
            .collect();
        if !bare.is_empty() {
            if !rows.is_empty() {
                buf.push('\n');
            }
            for id in bare {
                buf.push_str(&format!("- {id} ({})\n", id.route()));
            }
        }
        buf
    }

    /// 詳細画面。章は1始まりで章画面のルートを添える。
    pub fn render_book(detail: &BookDetail, favorite: bool) -> String {
        let book = detail.summary();
        let mut buf = format!("# {}\n\nby {}", book.title(), book.author());
        if let Some(genre) = book.genre() {
            buf.push_str(&format!(" [{}]", genre.label()));
        }
        if let Some(rating) = book.rating() {
            buf.push_str(&format!(" {}/5", rating.value()));
        }
        buf.push_str(if favorite { " ♥\n" } else { " ♡\n" });
        if let Some(description) = detail.description() {
            buf.push_str(&format!("\n{description}\n"));
        }

        buf.push_str(&format!("\n## Chapters ({})\n\n", detail.chapter_count()));
        if detail.chapter_count() == 0 {
            buf.push_str("No chapters yet.\n");
        }
        for n in 1..=detail.chapter_count() {
            buf.push_str(&format!("- Chapter {n} ({})\n", detail.id().chapter_route(n)));
        }
        buf
    }

    /// 章画面。本文のあとに前後の章へのルートを付ける。
    pub fn render_chapter(chapter: &Chapter) -> String {
        let mut buf = format!("# Chapter {} of {}", chapter.number, chapter.total);
        if let Some(title) = &chapter.title {
            buf.push_str(&format!(": {title}"));
        }
        buf.push_str(&format!("\n\n{}\n\n", chapter.content.trim_end()));

        let id = &chapter.book_id;
        match chapter.previous() {
            Some(n) => buf.push_str(&format!("Previous: {}\n", id.chapter_route(n))),
            None => buf.push_str("Previous: (first chapter)\n"),
        }
        match chapter.next() {
            Some(n) => buf.push_str(&format!("Next: {}\n", id.chapter_route(n))),
            None => buf.push_str("Next: (last chapter)\n"),
        }
        buf.push_str(&format!("Back to book: {}\n", id.route()));
        buf
    }

    fn render_rows(rows: &[ResultRow], buf: &mut String) {
        for (i, row) in rows.iter().enumerate() {
            let title: String = row
                .title
                .iter()
                .map(|span| {
                    if span.matched {
                        format!("**{}**", span.text)
                    } else {
                        span.text.clone()
                    }
                })
                .collect();
            buf.push_str(&format!("{}. {} by {}", i + 1, title, row.author));
            if let Some(genre) = &row.genre {
                buf.push_str(&format!(" [{genre}]"));
            }
            if let Some(rating) = row.rating {
                buf.push_str(&format!(" {rating}/5"));
            }
            buf.push_str(if row.favorite { " ♥" } else { " ♡" });
            buf.push_str(&format!(" ({})\n", row.route));
        }
    }
}
