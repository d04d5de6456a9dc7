use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::error::FetchError;
use crate::domain::model::book::BookSummary;
use crate::domain::model::query::SearchQuery;
use crate::domain::repository::CatalogGateway;

/// 検索ボックス1つ分の状態。マウント時に生成し、アンマウントで破棄する。
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    input: String,
    focused: bool,
    loading: bool,
    results: Vec<BookSummary>,
    error: Option<FetchError>,
    /// 発行済み検索の通し番号。最新の番号と一致するレスポンスだけを反映する。
    generation: u64,
}

impl SearchState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &[BookSummary] {
        &self.results
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// 入力にフォーカスがあるか、入力が空でなければ表示する。
    pub fn is_panel_visible(&self) -> bool {
        self.focused || !self.input.is_empty()
    }

    pub fn panel(&self) -> PanelView {
        if !self.is_panel_visible() {
            PanelView::Hidden
        } else if self.loading {
            PanelView::Loading
        } else if let Some(e) = &self.error {
            PanelView::Error(e.clone())
        } else if self.results.is_empty() {
            PanelView::NoResults
        } else {
            PanelView::Results(self.results.clone())
        }
    }
}

/// 結果ドロップダウンの表示内容。スピナーと結果一覧は同時に出ない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Hidden,
    Loading,
    Error(FetchError),
    NoResults,
    Results(Vec<BookSummary>),
}

/// `search` 1回分の結末。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 空白のみの入力。通信せずに結果を消した。
    Cleared,
    Applied { count: usize },
    Failed(FetchError),
    /// より新しい検索が発行済みだったため破棄した。
    Stale,
}

/// 検索語をバックエンドへ問い合わせ、結果・エラー・ロード中の状態を管理する。
pub struct SearchEngine<G> {
    gateway: Arc<G>,
    state: Mutex<SearchState>,
}

impl<G: CatalogGateway> SearchEngine<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// キーワード検索。
    pub async fn search(&self, term: &str) -> SearchOutcome {
        self.run(SearchQuery::new(term)).await
    }

    /// カテゴリや件数上限付きの検索。空白のみの語の扱いは `search` と同じ。
    pub async fn run(&self, query: SearchQuery) -> SearchOutcome {
        if query.is_blank() {
            let mut state = self.lock();
            state.generation += 1;
            state.results.clear();
            state.error = None;
            state.loading = false;
            return SearchOutcome::Cleared;
        }

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };
        tracing::debug!(term = %query.term(), generation, "search issued");

        let result = self.gateway.search(&query).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                generation,
                latest = state.generation,
                "discarding stale search response"
            );
            return SearchOutcome::Stale;
        }

        state.loading = false;
        match result {
            Ok(books) => {
                let count = books.len();
                tracing::info!(term = %query.term(), count, "search completed");
                state.results = books;
                SearchOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!(term = %query.term(), error = %e, "search failed");
                state.results.clear();
                state.error = Some(e.clone());
                SearchOutcome::Failed(e)
            }
        }
    }

    /// キー入力のたびに呼ぶ。通信は行わない。
    pub fn set_input(&self, text: &str) {
        self.lock().input = text.to_string();
    }

    pub fn focus(&self) {
        self.lock().focused = true;
    }

    pub fn blur(&self) {
        self.lock().focused = false;
    }

    /// 結果クリック時。入力と結果を消してパネルを閉じる。
    /// 応答待ちの検索は世代を進めて捨てる。
    pub fn dismiss(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.input.clear();
        state.focused = false;
        state.loading = false;
        state.results.clear();
        state.error = None;
    }

    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    pub fn panel(&self) -> PanelView {
        self.lock().panel()
    }

    // --- private ---

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
