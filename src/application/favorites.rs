use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::AppError;
use super::notify::{Notice, Notifier};
use super::session::Session;
use crate::domain::error::FetchError;
use crate::domain::model::book::BookSummary;
use crate::domain::model::favorites::FavoritesSet;
use crate::domain::model::id::BookId;
use crate::domain::repository::CatalogGateway;

/// 1つの画面が持つお気に入り集合。
///
/// マウント時に `load` で取得し、`toggle` で楽観的に更新する。
/// 失敗時は常にサーバーから取り直して収束させる。
/// 画面ごとに独立したコピーを持ち、画面間で共有はしない。
pub struct FavoritesSync<G> {
    gateway: Arc<G>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    set: Mutex<FavoritesSet>,
    /// 最後の `load` で受け取った書籍データ。
    books: Mutex<Vec<BookSummary>>,
    /// 応答待ちのトグル。同じIDへの二重発行を防ぐ。
    pending: Mutex<HashSet<BookId>>,
}

impl<G: CatalogGateway> FavoritesSync<G> {
    pub fn new(gateway: Arc<G>, session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            session,
            notifier,
            set: Mutex::new(FavoritesSet::new()),
            books: Mutex::new(Vec::new()),
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// サーバーから集合を取り直す。失敗時は通知して空集合のまま進む。
    /// 401ならセッションも破棄する。
    pub async fn load(&self) -> FavoritesSet {
        let Some(token) = self.session.token() else {
            tracing::debug!("no session; favorites left empty");
            return self.replace(Vec::new(), FavoritesSet::new());
        };

        match self.gateway.favorites(&token).await {
            Ok(list) => {
                let (books, set) = list.into_parts();
                tracing::info!(count = set.len(), with_details = books.len(), "favorites loaded");
                self.replace(books, set)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites");
                self.expire_session_on(&e);
                self.notifier
                    .notify(Notice::error("Failed to load your favorites."));
                self.replace(Vec::new(), FavoritesSet::new())
            }
        }
    }

    /// お気に入りを楽観的に反転し、サーバーへ反映する。反転後の所属を返す。
    pub async fn toggle(&self, id: &BookId) -> Result<bool, AppError> {
        let token = self.session.token().ok_or_else(|| {
            self.notifier
                .notify(Notice::info("Log in to manage your favorites."));
            AppError::NotAuthenticated
        })?;

        if !self.lock_pending().insert(id.clone()) {
            tracing::debug!(book_id = %id, "toggle already in flight");
            return Err(AppError::ToggleInFlight(id.clone()));
        }

        let now_favorite = self.lock_set().flip(id);
        tracing::debug!(book_id = %id, now_favorite, "optimistic favorite toggle");

        let result = self.gateway.toggle_favorite(&token, id).await;
        self.lock_pending().remove(id);

        match result {
            Ok(()) => {
                let notice = if now_favorite {
                    Notice::success("Added to favorites!")
                } else {
                    Notice::info("Removed from favorites.")
                };
                self.notifier.notify(notice);
                Ok(now_favorite)
            }
            Err(e) => {
                tracing::warn!(book_id = %id, error = %e, "favorite toggle failed; resyncing");
                self.expire_session_on(&e);
                self.notifier
                    .notify(Notice::error("Failed to update favorite status."));
                self.load().await;
                Err(e.into())
            }
        }
    }

    pub fn is_favorite(&self, id: &BookId) -> bool {
        self.lock_set().contains(id)
    }

    pub fn is_pending(&self, id: &BookId) -> bool {
        self.lock_pending().contains(id)
    }

    pub fn snapshot(&self) -> FavoritesSet {
        self.lock_set().clone()
    }

    /// 書籍データ付きのお気に入り。楽観的に外したものは含めない。
    pub fn books(&self) -> Vec<BookSummary> {
        let set = self.snapshot();
        self.lock_books()
            .iter()
            .filter(|b| set.contains(b.id()))
            .cloned()
            .collect()
    }

    // --- private ---

    fn replace(&self, books: Vec<BookSummary>, set: FavoritesSet) -> FavoritesSet {
        *self.lock_books() = books;
        *self.lock_set() = set.clone();
        set
    }

    fn expire_session_on(&self, e: &FetchError) {
        if *e == FetchError::Unauthenticated {
            tracing::info!("session rejected by backend; signing out");
            self.session.sign_out();
        }
    }

    fn lock_books(&self) -> MutexGuard<'_, Vec<BookSummary>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_set(&self) -> MutexGuard<'_, FavoritesSet> {
        self.set.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, HashSet<BookId>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
