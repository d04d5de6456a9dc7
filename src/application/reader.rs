use std::sync::Arc;

use super::error::AppError;
use super::session::Session;
use crate::domain::model::id::BookId;
use crate::domain::model::reading::{BookDetail, Chapter};
use crate::domain::repository::CatalogGateway;

/// 書籍詳細と章の閲覧。IDはルートから来た生の文字列を受け取る。
pub struct BookReader<G> {
    gateway: Arc<G>,
    session: Arc<Session>,
}

impl<G: CatalogGateway> BookReader<G> {
    pub fn new(gateway: Arc<G>, session: Arc<Session>) -> Self {
        Self { gateway, session }
    }

    /// 詳細画面 `/books/<id>`。
    pub async fn open(&self, raw_id: &str) -> Result<BookDetail, AppError> {
        let id = BookId::new(raw_id.trim())?;
        let token = self.session.token();
        let detail = self.gateway.book(token.as_ref(), &id).await?;
        tracing::debug!(book_id = %id, chapters = detail.chapter_count(), "book detail loaded");
        Ok(detail)
    }

    /// 章画面 `/books/<id>/chapter/<n>`。
    ///
    /// 章数を詳細から取り、`number` を 1..=章数 に収めてから本文を取得する。
    pub async fn chapter(&self, raw_id: &str, number: u32) -> Result<Chapter, AppError> {
        let detail = self.open(raw_id).await?;
        let id = detail.id().clone();
        let number = detail
            .clamp_chapter(number)
            .ok_or_else(|| AppError::NoChapters(id.clone()))?;

        let token = self.session.token();
        let text = self.gateway.chapter(token.as_ref(), &id, number).await?;
        tracing::info!(book_id = %id, number, total = detail.chapter_count(), "chapter loaded");

        Ok(Chapter {
            book_id: id,
            number,
            total: detail.chapter_count(),
            title: text.title,
            content: text.content,
        })
    }
}
