//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use novely_client::application::favorites::FavoritesSync;
use novely_client::application::notify::{Notice, NoticeQueue};
use novely_client::application::session::Session;
use novely_client::domain::error::FetchError;
use novely_client::domain::model::auth::{BearerToken, Credentials, LoginOutcome};
use novely_client::domain::model::book::{BookSummary, CategoryPage, Genre};
use novely_client::domain::model::favorites::{FavoriteList, FavoritesSet};
use novely_client::domain::model::id::BookId;
use novely_client::domain::model::query::SearchQuery;
use novely_client::domain::model::reading::{BookDetail, ChapterText};
use novely_client::domain::repository::CatalogGateway;

// =============================================================================
// ScriptedCatalog: テスト用ゲートウェイ
// =============================================================================

/// 記録されたゲートウェイ呼び出し。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(SearchQuery),
    Favorites { token: String },
    Toggle { token: String, id: String },
    Category { genre: Genre, page: u32, limit: u32 },
    Login { username: String },
    Book { id: String, token: Option<String> },
    Chapter { id: String, number: u32 },
}

/// キューに積まれた応答1件。`gate` があれば解放されるまで応答しない。
struct Scripted<T> {
    result: Result<T, FetchError>,
    gate: Option<oneshot::Receiver<()>>,
}

impl<T> Scripted<T> {
    async fn resolve(self) -> Result<T, FetchError> {
        if let Some(gate) = self.gate {
            // 送信側が落とされても応答する
            let _ = gate.await;
        }
        self.result
    }
}

/// 応答を事前に積んでおくインメモリゲートウェイ。
/// キューが空のときは成功の空応答を返す。
#[derive(Default)]
pub struct ScriptedCatalog {
    searches: Mutex<VecDeque<Scripted<Vec<BookSummary>>>>,
    favorites: Mutex<VecDeque<Scripted<FavoriteList>>>,
    toggles: Mutex<VecDeque<Scripted<()>>>,
    categories: Mutex<VecDeque<Scripted<CategoryPage>>>,
    logins: Mutex<VecDeque<Scripted<LoginOutcome>>>,
    books: Mutex<VecDeque<Scripted<BookDetail>>>,
    chapters: Mutex<VecDeque<Scripted<ChapterText>>>,
    calls: Mutex<Vec<Call>>,
}

fn enqueue<T>(
    queue: &Mutex<VecDeque<Scripted<T>>>,
    result: Result<T, FetchError>,
    gated: bool,
) -> Option<oneshot::Sender<()>> {
    let (gate, release) = if gated {
        let (tx, rx) = oneshot::channel();
        (Some(rx), Some(tx))
    } else {
        (None, None)
    };
    queue
        .lock()
        .unwrap()
        .push_back(Scripted { result, gate });
    release
}

impl ScriptedCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_search(&self, result: Result<Vec<BookSummary>, FetchError>) {
        enqueue(&self.searches, result, false);
    }

    /// 返り値の送信側を `send` (またはdrop) するまで応答を保留する。
    pub fn push_search_gated(
        &self,
        result: Result<Vec<BookSummary>, FetchError>,
    ) -> oneshot::Sender<()> {
        enqueue(&self.searches, result, true).unwrap()
    }

    /// IDだけのお気に入り。
    pub fn push_favorites(&self, result: Result<FavoritesSet, FetchError>) {
        enqueue(&self.favorites, result.map(FavoriteList::from), false);
    }

    /// 書籍データ付きのお気に入り。
    pub fn push_favorite_list(&self, list: FavoriteList) {
        enqueue(&self.favorites, Ok(list), false);
    }

    pub fn push_toggle(&self, result: Result<(), FetchError>) {
        enqueue(&self.toggles, result, false);
    }

    pub fn push_toggle_gated(&self, result: Result<(), FetchError>) -> oneshot::Sender<()> {
        enqueue(&self.toggles, result, true).unwrap()
    }

    pub fn push_category(&self, result: Result<CategoryPage, FetchError>) {
        enqueue(&self.categories, result, false);
    }

    pub fn push_login(&self, result: Result<LoginOutcome, FetchError>) {
        enqueue(&self.logins, result, false);
    }

    pub fn push_book(&self, result: Result<BookDetail, FetchError>) {
        enqueue(&self.books, result, false);
    }

    pub fn push_chapter(&self, result: Result<ChapterText, FetchError>) {
        enqueue(&self.chapters, result, false);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// 検索語だけを発行順に。
    pub fn search_terms(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q) => Some(q.term().to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>, fallback: impl FnOnce() -> T) -> Scripted<T> {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| Scripted {
            result: Ok(fallback()),
            gate: None,
        })
    }
}

impl CatalogGateway for ScriptedCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookSummary>, FetchError> {
        self.record(Call::Search(query.clone()));
        let scripted = Self::next(&self.searches, Vec::new);
        scripted.resolve().await
    }

    async fn favorites(&self, token: &BearerToken) -> Result<FavoriteList, FetchError> {
        self.record(Call::Favorites {
            token: token.as_str().to_string(),
        });
        let scripted = Self::next(&self.favorites, FavoriteList::default);
        scripted.resolve().await
    }

    async fn toggle_favorite(&self, token: &BearerToken, id: &BookId) -> Result<(), FetchError> {
        self.record(Call::Toggle {
            token: token.as_str().to_string(),
            id: id.as_str().to_string(),
        });
        let scripted = Self::next(&self.toggles, || ());
        scripted.resolve().await
    }

    async fn category_page(
        &self,
        genre: Genre,
        page: u32,
        limit: u32,
    ) -> Result<CategoryPage, FetchError> {
        self.record(Call::Category { genre, page, limit });
        let scripted = Self::next(&self.categories, || CategoryPage::empty(page));
        scripted.resolve().await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, FetchError> {
        self.record(Call::Login {
            username: credentials.username.clone(),
        });
        let scripted = Self::next(&self.logins, || {
            LoginOutcome::Rejected("Invalid credentials".to_string())
        });
        scripted.resolve().await
    }

    async fn book(
        &self,
        token: Option<&BearerToken>,
        id: &BookId,
    ) -> Result<BookDetail, FetchError> {
        self.record(Call::Book {
            id: id.as_str().to_string(),
            token: token.map(|t| t.as_str().to_string()),
        });
        let scripted = Self::next(&self.books, || {
            BookDetail::new(book(id.as_str(), "Untitled", ""), None, 0)
        });
        scripted.resolve().await
    }

    async fn chapter(
        &self,
        _token: Option<&BearerToken>,
        id: &BookId,
        number: u32,
    ) -> Result<ChapterText, FetchError> {
        self.record(Call::Chapter {
            id: id.as_str().to_string(),
            number,
        });
        let scripted = Self::next(&self.chapters, || ChapterText {
            title: None,
            content: String::new(),
        });
        scripted.resolve().await
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn id(s: &str) -> BookId {
    BookId::new(s).unwrap()
}

pub fn book(id_str: &str, title: &str, author: &str) -> BookSummary {
    BookSummary::new(id(id_str), title, author)
}

pub fn favorite_ids(ids: &[&str]) -> FavoritesSet {
    ids.iter().map(|s| id(s)).collect()
}

pub fn detail(id_str: &str, title: &str, chapters: u32) -> BookDetail {
    BookDetail::new(book(id_str, title, "Author"), None, chapters)
}

pub fn chapter_text(content: &str) -> ChapterText {
    ChapterText {
        title: None,
        content: content.to_string(),
    }
}

pub fn signed_in() -> Arc<Session> {
    Arc::new(Session::with_token(Some(BearerToken::new("test-token"))))
}

/// ログイン済みセッションのFavoritesSyncと、通知の受け皿を返す。
pub fn favorites_sync(
    gateway: &Arc<ScriptedCatalog>,
    session: Arc<Session>,
) -> (Arc<FavoritesSync<ScriptedCatalog>>, Arc<NoticeQueue>) {
    let notices = Arc::new(NoticeQueue::new());
    let sync = FavoritesSync::new(gateway.clone(), session, notices.clone());
    (Arc::new(sync), notices)
}

pub fn messages(notices: &[Notice]) -> Vec<&str> {
    notices.iter().map(|n| n.message.as_str()).collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
