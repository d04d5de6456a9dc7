use std::sync::Arc;
use std::time::Duration;

use super::debounce::Debouncer;
use super::search::{PanelView, SearchEngine, SearchState};
use crate::domain::model::id::BookId;
use crate::domain::repository::CatalogGateway;

/// 入力しながら検索する検索ボックス。
/// キー入力 → Debouncer → SearchEngine の順に流す。
pub struct LiveSearch<G> {
    engine: Arc<SearchEngine<G>>,
    debouncer: Debouncer<String>,
}

impl<G: CatalogGateway + 'static> LiveSearch<G> {
    /// tokio ランタイム内で生成すること。
    pub fn new(engine: Arc<SearchEngine<G>>, delay: Duration) -> Self {
        let target = engine.clone();
        let debouncer = Debouncer::new(delay, move |term: String| {
            let engine = target.clone();
            async move {
                engine.search(&term).await;
            }
        });
        Self { engine, debouncer }
    }

    /// 入力欄の値が変わった。表示上の入力は即時に、検索は静止後に反映する。
    pub fn keystroke(&self, text: impl Into<String>) {
        let text = text.into();
        self.engine.set_input(&text);
        self.debouncer.call(text);
    }

    pub fn focus(&self) {
        self.engine.focus();
    }

    pub fn blur(&self) {
        self.engine.blur();
    }

    /// 結果をクリックした。入力を消してパネルを閉じ、遷移先のルートを返す。
    /// 静止待ちの入力は空文字で上書きし、古い語で検索しない。
    pub fn select(&self, id: &BookId) -> String {
        self.engine.dismiss();
        self.debouncer.call(String::new());
        tracing::debug!(book_id = %id, "search result selected");
        id.route()
    }

    pub fn panel(&self) -> PanelView {
        self.engine.panel()
    }

    pub fn snapshot(&self) -> SearchState {
        self.engine.snapshot()
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }
}
